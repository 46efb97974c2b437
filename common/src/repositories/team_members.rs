use crate::entities::{prelude::*, team_members};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, ModelTrait,
    QueryFilter, QueryOrder,
};
use std::sync::Arc;
use uuid::Uuid;

#[async_trait::async_trait]
pub trait TeamMemberRepository: Send + Sync {
    /// Members of one organization in (creation, id) order, optionally
    /// restricted to invited ones.
    async fn list_by_organization(
        &self,
        org_id: Uuid,
        invited_only: bool,
    ) -> Result<Vec<team_members::Model>, DbErr>;

    async fn find_by_id(&self, member_id: Uuid) -> Result<Option<team_members::Model>, DbErr>;

    async fn insert(
        &self,
        model: team_members::ActiveModel,
    ) -> Result<team_members::Model, DbErr>;

    async fn update(
        &self,
        model: team_members::ActiveModel,
    ) -> Result<team_members::Model, DbErr>;

    async fn delete(&self, model: team_members::Model) -> Result<(), DbErr>;

    async fn delete_by_department(&self, dept_id: Uuid) -> Result<u64, DbErr>;
}

pub struct TeamMemberRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl TeamMemberRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl TeamMemberRepository for TeamMemberRepositoryImpl {
    async fn list_by_organization(
        &self,
        org_id: Uuid,
        invited_only: bool,
    ) -> Result<Vec<team_members::Model>, DbErr> {
        let mut query = TeamMembers::find().filter(team_members::Column::OrgId.eq(org_id));
        if invited_only {
            query = query.filter(team_members::Column::Invited.eq(true));
        }
        query
            .order_by_asc(team_members::Column::CreatedAt)
            .order_by_asc(team_members::Column::MemberId)
            .all(self.db.as_ref())
            .await
    }

    async fn find_by_id(&self, member_id: Uuid) -> Result<Option<team_members::Model>, DbErr> {
        TeamMembers::find_by_id(member_id).one(self.db.as_ref()).await
    }

    async fn insert(
        &self,
        model: team_members::ActiveModel,
    ) -> Result<team_members::Model, DbErr> {
        model.insert(self.db.as_ref()).await
    }

    async fn update(
        &self,
        model: team_members::ActiveModel,
    ) -> Result<team_members::Model, DbErr> {
        model.update(self.db.as_ref()).await
    }

    async fn delete(&self, model: team_members::Model) -> Result<(), DbErr> {
        model.delete(self.db.as_ref()).await.map(|_| ())
    }

    async fn delete_by_department(&self, dept_id: Uuid) -> Result<u64, DbErr> {
        let res = TeamMembers::delete_many()
            .filter(team_members::Column::DepartmentId.eq(dept_id))
            .exec(self.db.as_ref())
            .await?;
        Ok(res.rows_affected)
    }
}
