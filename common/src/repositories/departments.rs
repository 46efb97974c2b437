use crate::entities::{departments, prelude::*};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, ModelTrait,
    QueryFilter, QueryOrder,
};
use std::sync::Arc;
use uuid::Uuid;

#[async_trait::async_trait]
pub trait DepartmentRepository: Send + Sync {
    /// Departments of one organization in a stable order: creation time
    /// first, id as the tie-break. The chart relies on this order.
    async fn list_by_organization(
        &self,
        org_id: Uuid,
    ) -> Result<Vec<departments::Model>, DbErr>;

    async fn find_by_id(&self, dept_id: Uuid) -> Result<Option<departments::Model>, DbErr>;

    async fn find_by_name(
        &self,
        org_id: Uuid,
        user_id: Uuid,
        department_name: &str,
    ) -> Result<Option<departments::Model>, DbErr>;

    async fn insert(&self, model: departments::ActiveModel)
        -> Result<departments::Model, DbErr>;

    async fn update(&self, model: departments::ActiveModel)
        -> Result<departments::Model, DbErr>;

    async fn delete(&self, model: departments::Model) -> Result<(), DbErr>;
}

pub struct DepartmentRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl DepartmentRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl DepartmentRepository for DepartmentRepositoryImpl {
    async fn list_by_organization(
        &self,
        org_id: Uuid,
    ) -> Result<Vec<departments::Model>, DbErr> {
        Departments::find()
            .filter(departments::Column::OrgId.eq(org_id))
            .order_by_asc(departments::Column::CreatedAt)
            .order_by_asc(departments::Column::DeptId)
            .all(self.db.as_ref())
            .await
    }

    async fn find_by_id(&self, dept_id: Uuid) -> Result<Option<departments::Model>, DbErr> {
        Departments::find_by_id(dept_id).one(self.db.as_ref()).await
    }

    async fn find_by_name(
        &self,
        org_id: Uuid,
        user_id: Uuid,
        department_name: &str,
    ) -> Result<Option<departments::Model>, DbErr> {
        Departments::find()
            .filter(departments::Column::OrgId.eq(org_id))
            .filter(departments::Column::UserId.eq(user_id))
            .filter(departments::Column::DepartmentName.eq(department_name))
            .one(self.db.as_ref())
            .await
    }

    async fn insert(
        &self,
        model: departments::ActiveModel,
    ) -> Result<departments::Model, DbErr> {
        model.insert(self.db.as_ref()).await
    }

    async fn update(
        &self,
        model: departments::ActiveModel,
    ) -> Result<departments::Model, DbErr> {
        model.update(self.db.as_ref()).await
    }

    async fn delete(&self, model: departments::Model) -> Result<(), DbErr> {
        model.delete(self.db.as_ref()).await.map(|_| ())
    }
}
