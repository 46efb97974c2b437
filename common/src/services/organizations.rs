use super::ServiceError;
use crate::entities::organizations;
use crate::repositories::organizations::OrganizationRepository;
use async_trait::async_trait;
use sea_orm::{IntoActiveModel, Set};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// The projection the CEO profile card asks for.
#[derive(Debug, Serialize)]
pub struct CeoDto {
    pub name: String,
    pub email: String,
    pub ceo_pic: Option<String>,
    pub organization: String,
    pub industry: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateOrganizationParams {
    pub name: String,
    pub ceo_name: String,
    pub ceo_email: String,
    pub ceo_pic: Option<String>,
    pub industry: String,
    pub company_size: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub year_founded: Option<i32>,
    pub organization_type: Option<String>,
    pub work_model: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateOrganizationParams {
    pub name: Option<String>,
    pub ceo_name: Option<String>,
    pub ceo_email: Option<String>,
    pub ceo_pic: Option<String>,
    pub industry: Option<String>,
    pub company_size: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub year_founded: Option<i32>,
    pub organization_type: Option<String>,
    pub work_model: Option<String>,
}

#[async_trait]
pub trait OrganizationService: Send + Sync {
    async fn find_for_user(&self, user_id: Uuid) -> Result<organizations::Model, ServiceError>;

    async fn get(&self, org_id: Uuid) -> Result<organizations::Model, ServiceError>;

    async fn ceo_view(&self, org_id: Uuid) -> Result<CeoDto, ServiceError>;

    async fn create(
        &self,
        user_id: Uuid,
        params: CreateOrganizationParams,
    ) -> Result<organizations::Model, ServiceError>;

    async fn update(
        &self,
        org_id: Uuid,
        user_id: Uuid,
        params: UpdateOrganizationParams,
    ) -> Result<organizations::Model, ServiceError>;

    async fn delete(&self, org_id: Uuid, user_id: Uuid) -> Result<(), ServiceError>;
}

pub struct OrganizationServiceImpl {
    repo: Arc<dyn OrganizationRepository>,
}

impl OrganizationServiceImpl {
    pub fn new(repo: Arc<dyn OrganizationRepository>) -> Self {
        Self { repo }
    }

    async fn owned(&self, org_id: Uuid, user_id: Uuid) -> Result<organizations::Model, ServiceError> {
        let org = self
            .repo
            .find_by_id(org_id)
            .await?
            .ok_or_else(|| ServiceError::new(404, "Organization not found"))?;
        if org.user_id != user_id {
            return Err(ServiceError::new(403, "Organization belongs to another user"));
        }
        Ok(org)
    }
}

#[async_trait]
impl OrganizationService for OrganizationServiceImpl {
    async fn find_for_user(&self, user_id: Uuid) -> Result<organizations::Model, ServiceError> {
        self.repo
            .find_by_user(user_id)
            .await?
            .ok_or_else(|| ServiceError::new(404, "Organization not found"))
    }

    async fn get(&self, org_id: Uuid) -> Result<organizations::Model, ServiceError> {
        self.repo
            .find_by_id(org_id)
            .await?
            .ok_or_else(|| ServiceError::new(404, "Organization not found"))
    }

    async fn ceo_view(&self, org_id: Uuid) -> Result<CeoDto, ServiceError> {
        let org = self.get(org_id).await?;
        Ok(CeoDto {
            name: org.ceo_name,
            email: org.ceo_email,
            ceo_pic: org.ceo_pic,
            organization: org.name,
            industry: org.industry,
        })
    }

    async fn create(
        &self,
        user_id: Uuid,
        params: CreateOrganizationParams,
    ) -> Result<organizations::Model, ServiceError> {
        if self.repo.find_by_user(user_id).await?.is_some() {
            return Err(ServiceError::new(409, "User already has an organization"));
        }

        let now = chrono::Utc::now().naive_utc();
        let model = organizations::ActiveModel {
            org_id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            name: Set(params.name),
            ceo_name: Set(params.ceo_name),
            ceo_email: Set(params.ceo_email),
            ceo_pic: Set(params.ceo_pic),
            industry: Set(params.industry),
            company_size: Set(params.company_size),
            city: Set(params.city),
            country: Set(params.country),
            year_founded: Set(params.year_founded),
            organization_type: Set(params.organization_type),
            work_model: Set(params.work_model),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(self.repo.insert(model).await?)
    }

    async fn update(
        &self,
        org_id: Uuid,
        user_id: Uuid,
        params: UpdateOrganizationParams,
    ) -> Result<organizations::Model, ServiceError> {
        let org = self.owned(org_id, user_id).await?;

        let mut am = org.into_active_model();
        if let Some(name) = params.name {
            am.name = Set(name);
        }
        if let Some(ceo_name) = params.ceo_name {
            am.ceo_name = Set(ceo_name);
        }
        if let Some(ceo_email) = params.ceo_email {
            am.ceo_email = Set(ceo_email);
        }
        if let Some(ceo_pic) = params.ceo_pic {
            am.ceo_pic = Set(Some(ceo_pic));
        }
        if let Some(industry) = params.industry {
            am.industry = Set(industry);
        }
        if let Some(company_size) = params.company_size {
            am.company_size = Set(Some(company_size));
        }
        if let Some(city) = params.city {
            am.city = Set(Some(city));
        }
        if let Some(country) = params.country {
            am.country = Set(Some(country));
        }
        if let Some(year_founded) = params.year_founded {
            am.year_founded = Set(Some(year_founded));
        }
        if let Some(organization_type) = params.organization_type {
            am.organization_type = Set(Some(organization_type));
        }
        if let Some(work_model) = params.work_model {
            am.work_model = Set(Some(work_model));
        }
        am.updated_at = Set(chrono::Utc::now().naive_utc());

        Ok(self.repo.update(am).await?)
    }

    async fn delete(&self, org_id: Uuid, user_id: Uuid) -> Result<(), ServiceError> {
        let org = self.owned(org_id, user_id).await?;
        self.repo.delete(org).await?;
        Ok(())
    }
}
