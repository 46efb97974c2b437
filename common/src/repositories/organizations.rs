use crate::entities::{organizations, prelude::*};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, ModelTrait,
    QueryFilter,
};
use std::sync::Arc;
use uuid::Uuid;

#[async_trait::async_trait]
pub trait OrganizationRepository: Send + Sync {
    async fn find_by_id(&self, org_id: Uuid) -> Result<Option<organizations::Model>, DbErr>;

    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<organizations::Model>, DbErr>;

    async fn insert(
        &self,
        model: organizations::ActiveModel,
    ) -> Result<organizations::Model, DbErr>;

    async fn update(
        &self,
        model: organizations::ActiveModel,
    ) -> Result<organizations::Model, DbErr>;

    async fn delete(&self, model: organizations::Model) -> Result<(), DbErr>;
}

pub struct OrganizationRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl OrganizationRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl OrganizationRepository for OrganizationRepositoryImpl {
    async fn find_by_id(&self, org_id: Uuid) -> Result<Option<organizations::Model>, DbErr> {
        Organizations::find_by_id(org_id).one(self.db.as_ref()).await
    }

    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<organizations::Model>, DbErr> {
        Organizations::find()
            .filter(organizations::Column::UserId.eq(user_id))
            .one(self.db.as_ref())
            .await
    }

    async fn insert(
        &self,
        model: organizations::ActiveModel,
    ) -> Result<organizations::Model, DbErr> {
        model.insert(self.db.as_ref()).await
    }

    async fn update(
        &self,
        model: organizations::ActiveModel,
    ) -> Result<organizations::Model, DbErr> {
        model.update(self.db.as_ref()).await
    }

    async fn delete(&self, model: organizations::Model) -> Result<(), DbErr> {
        model.delete(self.db.as_ref()).await.map(|_| ())
    }
}
