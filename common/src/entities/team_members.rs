use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum MemberRole {
    #[sea_orm(string_value = "Team Lead")]
    #[serde(rename = "Team Lead")]
    TeamLead,
    #[sea_orm(string_value = "Team Member")]
    #[serde(rename = "Team Member")]
    TeamMember,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "team_members")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub member_id: Uuid,
    pub org_id: Uuid,
    pub user_id: Uuid,
    pub department_id: Uuid,
    pub subfunction_index: i32,
    pub name: String,
    pub email: String,
    pub role: MemberRole,
    pub invited: bool,
    #[sea_orm(nullable)]
    pub profile_pic: Option<String>,
    #[sea_orm(nullable)]
    pub report_to: Option<String>,
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
    #[sea_orm(
        belongs_to = "super::departments::Entity",
        from = "Column::DepartmentId",
        to = "super::departments::Column::DeptId"
    )]
    Department,
}

impl Related<super::organizations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Organization.def()
    }
}

impl Related<super::departments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Department.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
