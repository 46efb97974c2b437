use super::ServiceError;
use crate::entities::departments::{self, Subfunction, Subfunctions};
use crate::repositories::departments::DepartmentRepository;
use crate::repositories::organizations::OrganizationRepository;
use crate::repositories::team_members::TeamMemberRepository;
use async_trait::async_trait;
use sea_orm::{IntoActiveModel, Set};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// The organization fields the department views populate alongside the
/// department itself.
#[derive(Debug, Serialize)]
pub struct OrganizationRef {
    pub name: String,
    pub ceo_name: String,
}

#[derive(Debug, Serialize)]
pub struct DepartmentDetail {
    #[serde(flatten)]
    pub department: departments::Model,
    pub organization: Option<OrganizationRef>,
}

#[derive(Debug, Deserialize)]
pub struct SubfunctionInput {
    pub name: String,
    pub details: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateDepartmentParams {
    pub organization_id: Uuid,
    pub department_name: String,
    pub hod_name: String,
    pub hod_email: String,
    pub hod_pic: Option<String>,
    pub role: String,
    pub department_details: Option<String>,
    #[serde(default)]
    pub subfunctions: Vec<SubfunctionInput>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateDepartmentParams {
    pub department_name: Option<String>,
    pub hod_name: Option<String>,
    pub hod_email: Option<String>,
    pub hod_pic: Option<String>,
    pub role: Option<String>,
    pub department_details: Option<String>,
    pub subfunctions: Option<Vec<SubfunctionInput>>,
}

#[async_trait]
pub trait DepartmentService: Send + Sync {
    async fn list_for_organization(
        &self,
        org_id: Uuid,
    ) -> Result<Vec<departments::Model>, ServiceError>;

    /// Department with its organization's name and CEO populated, the shape
    /// the department and head-of-department profile pages read.
    async fn get_detail(&self, dept_id: Uuid) -> Result<DepartmentDetail, ServiceError>;

    async fn create(
        &self,
        user_id: Uuid,
        params: CreateDepartmentParams,
    ) -> Result<departments::Model, ServiceError>;

    async fn update(
        &self,
        dept_id: Uuid,
        user_id: Uuid,
        params: UpdateDepartmentParams,
    ) -> Result<departments::Model, ServiceError>;

    /// Deleting a department also removes its team members.
    async fn delete(&self, dept_id: Uuid, user_id: Uuid) -> Result<(), ServiceError>;
}

/// Mirrors the `^\S+@\S+\.\S+$` shape check the department form enforces.
pub(crate) fn looks_like_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

pub struct DepartmentServiceImpl {
    repo: Arc<dyn DepartmentRepository>,
    org_repo: Arc<dyn OrganizationRepository>,
    member_repo: Arc<dyn TeamMemberRepository>,
}

impl DepartmentServiceImpl {
    pub fn new(
        repo: Arc<dyn DepartmentRepository>,
        org_repo: Arc<dyn OrganizationRepository>,
        member_repo: Arc<dyn TeamMemberRepository>,
    ) -> Self {
        Self {
            repo,
            org_repo,
            member_repo,
        }
    }

    async fn owned(&self, dept_id: Uuid, user_id: Uuid) -> Result<departments::Model, ServiceError> {
        let dept = self
            .repo
            .find_by_id(dept_id)
            .await?
            .ok_or_else(|| ServiceError::new(404, "Department not found"))?;
        if dept.user_id != user_id {
            return Err(ServiceError::new(403, "Department belongs to another user"));
        }
        Ok(dept)
    }
}

fn to_subfunctions(inputs: Vec<SubfunctionInput>) -> Subfunctions {
    Subfunctions(
        inputs
            .into_iter()
            .map(|input| Subfunction {
                name: input.name,
                details: input.details,
            })
            .collect(),
    )
}

#[async_trait]
impl DepartmentService for DepartmentServiceImpl {
    async fn list_for_organization(
        &self,
        org_id: Uuid,
    ) -> Result<Vec<departments::Model>, ServiceError> {
        Ok(self.repo.list_by_organization(org_id).await?)
    }

    async fn get_detail(&self, dept_id: Uuid) -> Result<DepartmentDetail, ServiceError> {
        let department = self
            .repo
            .find_by_id(dept_id)
            .await?
            .ok_or_else(|| ServiceError::new(404, "Department not found"))?;

        let organization = self
            .org_repo
            .find_by_id(department.org_id)
            .await?
            .map(|org| OrganizationRef {
                name: org.name,
                ceo_name: org.ceo_name,
            });

        Ok(DepartmentDetail {
            department,
            organization,
        })
    }

    async fn create(
        &self,
        user_id: Uuid,
        params: CreateDepartmentParams,
    ) -> Result<departments::Model, ServiceError> {
        if !looks_like_email(&params.hod_email) {
            return Err(ServiceError::new(400, "Please use a valid email address"));
        }

        let org = self
            .org_repo
            .find_by_id(params.organization_id)
            .await?
            .ok_or_else(|| ServiceError::new(404, "Organization not found"))?;
        if org.user_id != user_id {
            return Err(ServiceError::new(403, "Organization belongs to another user"));
        }

        if self
            .repo
            .find_by_name(org.org_id, user_id, &params.department_name)
            .await?
            .is_some()
        {
            return Err(ServiceError::new(409, "Department already exists"));
        }

        let now = chrono::Utc::now().naive_utc();
        let model = departments::ActiveModel {
            dept_id: Set(Uuid::new_v4()),
            org_id: Set(org.org_id),
            user_id: Set(user_id),
            department_name: Set(params.department_name),
            hod_name: Set(params.hod_name),
            hod_email: Set(params.hod_email),
            hod_pic: Set(params.hod_pic),
            role: Set(params.role),
            department_details: Set(params.department_details),
            subfunctions: Set(to_subfunctions(params.subfunctions)),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(self.repo.insert(model).await?)
    }

    async fn update(
        &self,
        dept_id: Uuid,
        user_id: Uuid,
        params: UpdateDepartmentParams,
    ) -> Result<departments::Model, ServiceError> {
        let dept = self.owned(dept_id, user_id).await?;

        if let Some(hod_email) = params.hod_email.as_deref() {
            if !looks_like_email(hod_email) {
                return Err(ServiceError::new(400, "Please use a valid email address"));
            }
        }

        if let Some(name) = params.department_name.as_deref() {
            if name != dept.department_name {
                let clash = self.repo.find_by_name(dept.org_id, user_id, name).await?;
                if clash.is_some() {
                    return Err(ServiceError::new(409, "Department already exists"));
                }
            }
        }

        let mut am = dept.into_active_model();
        if let Some(department_name) = params.department_name {
            am.department_name = Set(department_name);
        }
        if let Some(hod_name) = params.hod_name {
            am.hod_name = Set(hod_name);
        }
        if let Some(hod_email) = params.hod_email {
            am.hod_email = Set(hod_email);
        }
        if let Some(hod_pic) = params.hod_pic {
            am.hod_pic = Set(Some(hod_pic));
        }
        if let Some(role) = params.role {
            am.role = Set(role);
        }
        if let Some(department_details) = params.department_details {
            am.department_details = Set(Some(department_details));
        }
        if let Some(subfunctions) = params.subfunctions {
            am.subfunctions = Set(to_subfunctions(subfunctions));
        }
        am.updated_at = Set(chrono::Utc::now().naive_utc());

        Ok(self.repo.update(am).await?)
    }

    async fn delete(&self, dept_id: Uuid, user_id: Uuid) -> Result<(), ServiceError> {
        let dept = self.owned(dept_id, user_id).await?;
        let removed = self.member_repo.delete_by_department(dept.dept_id).await?;
        if removed > 0 {
            tracing::info!(dept_id = %dept.dept_id, removed, "removed team members with department");
        }
        self.repo.delete(dept).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::looks_like_email;

    #[test]
    fn accepts_plain_addresses() {
        assert!(looks_like_email("hod@acme.test"));
        assert!(looks_like_email("first.last@sub.example.co"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!looks_like_email("not-an-email"));
        assert!(!looks_like_email("missing@tld"));
        assert!(!looks_like_email("@acme.test"));
        assert!(!looks_like_email("two@@acme.test"));
        assert!(!looks_like_email("spaced name@acme.test"));
        assert!(!looks_like_email("dot@."));
    }
}
