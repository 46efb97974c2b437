use sea_orm::entity::prelude::*;
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

/// A named sub-unit within a department. Subfunctions carry no identity of
/// their own; they are addressed by position in the department's list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subfunction {
    pub name: String,
    #[serde(default)]
    pub details: Option<String>,
}

/// Ordered subfunction list, stored as a JSON column.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize, FromJsonQueryResult)]
pub struct Subfunctions(pub Vec<Subfunction>);

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "departments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub dept_id: Uuid,
    pub org_id: Uuid,
    pub user_id: Uuid,
    pub department_name: String,
    pub hod_name: String,
    pub hod_email: String,
    #[sea_orm(nullable)]
    pub hod_pic: Option<String>,
    pub role: String,
    #[sea_orm(nullable)]
    pub department_details: Option<String>,
    #[sea_orm(column_type = "Json")]
    pub subfunctions: Subfunctions,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::organizations::Entity",
        from = "Column::OrgId",
        to = "super::organizations::Column::OrgId"
    )]
    Organization,
    #[sea_orm(has_many = "super::team_members::Entity")]
    TeamMembers,
}

impl Related<super::organizations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Organization.def()
    }
}

impl Related<super::team_members::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TeamMembers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
