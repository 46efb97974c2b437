use super::departments::OrganizationRef;
use super::ServiceError;
use crate::entities::team_members::{self, MemberRole};
use crate::repositories::departments::DepartmentRepository;
use crate::repositories::organizations::OrganizationRepository;
use crate::repositories::team_members::TeamMemberRepository;
use async_trait::async_trait;
use sea_orm::{IntoActiveModel, Set};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct DepartmentRef {
    pub department_name: String,
    pub hod_name: String,
}

/// Team member with its references populated, plus the subfunction name the
/// positional index resolves to (when it still points at a real position).
#[derive(Debug, Serialize)]
pub struct TeamMemberDetail {
    #[serde(flatten)]
    pub member: team_members::Model,
    pub organization: Option<OrganizationRef>,
    pub department: Option<DepartmentRef>,
    pub subfunction_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateTeamMemberParams {
    pub organization_id: Uuid,
    pub department_id: Uuid,
    pub subfunction_index: i32,
    pub name: String,
    pub email: String,
    pub role: MemberRole,
    #[serde(default)]
    pub invited: bool,
    pub profile_pic: Option<String>,
    pub report_to: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateTeamMemberParams {
    pub department_id: Option<Uuid>,
    pub subfunction_index: Option<i32>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<MemberRole>,
    pub invited: Option<bool>,
    pub profile_pic: Option<String>,
    pub report_to: Option<String>,
}

#[async_trait]
pub trait TeamMemberService: Send + Sync {
    async fn list_for_organization(
        &self,
        org_id: Uuid,
        invited_only: bool,
    ) -> Result<Vec<team_members::Model>, ServiceError>;

    async fn get_detail(&self, member_id: Uuid) -> Result<TeamMemberDetail, ServiceError>;

    async fn create(
        &self,
        user_id: Uuid,
        params: CreateTeamMemberParams,
    ) -> Result<team_members::Model, ServiceError>;

    async fn update(
        &self,
        member_id: Uuid,
        user_id: Uuid,
        params: UpdateTeamMemberParams,
    ) -> Result<team_members::Model, ServiceError>;

    async fn delete(&self, member_id: Uuid, user_id: Uuid) -> Result<(), ServiceError>;
}

pub struct TeamMemberServiceImpl {
    repo: Arc<dyn TeamMemberRepository>,
    org_repo: Arc<dyn OrganizationRepository>,
    dept_repo: Arc<dyn DepartmentRepository>,
}

impl TeamMemberServiceImpl {
    pub fn new(
        repo: Arc<dyn TeamMemberRepository>,
        org_repo: Arc<dyn OrganizationRepository>,
        dept_repo: Arc<dyn DepartmentRepository>,
    ) -> Self {
        Self {
            repo,
            org_repo,
            dept_repo,
        }
    }

    async fn owned(
        &self,
        member_id: Uuid,
        user_id: Uuid,
    ) -> Result<team_members::Model, ServiceError> {
        let member = self
            .repo
            .find_by_id(member_id)
            .await?
            .ok_or_else(|| ServiceError::new(404, "Team member not found"))?;
        if member.user_id != user_id {
            return Err(ServiceError::new(403, "Team member belongs to another user"));
        }
        Ok(member)
    }

    async fn department_in_org(
        &self,
        dept_id: Uuid,
        org_id: Uuid,
    ) -> Result<crate::entities::departments::Model, ServiceError> {
        let dept = self
            .dept_repo
            .find_by_id(dept_id)
            .await?
            .ok_or_else(|| ServiceError::new(404, "Department not found"))?;
        if dept.org_id != org_id {
            return Err(ServiceError::new(
                400,
                "Department belongs to another organization",
            ));
        }
        Ok(dept)
    }
}

#[async_trait]
impl TeamMemberService for TeamMemberServiceImpl {
    async fn list_for_organization(
        &self,
        org_id: Uuid,
        invited_only: bool,
    ) -> Result<Vec<team_members::Model>, ServiceError> {
        Ok(self.repo.list_by_organization(org_id, invited_only).await?)
    }

    async fn get_detail(&self, member_id: Uuid) -> Result<TeamMemberDetail, ServiceError> {
        let member = self
            .repo
            .find_by_id(member_id)
            .await?
            .ok_or_else(|| ServiceError::new(404, "Team member not found"))?;

        let organization = self
            .org_repo
            .find_by_id(member.org_id)
            .await?
            .map(|org| OrganizationRef {
                name: org.name,
                ceo_name: org.ceo_name,
            });

        let department = self.dept_repo.find_by_id(member.department_id).await?;
        let subfunction_name = department.as_ref().and_then(|dept| {
            usize::try_from(member.subfunction_index)
                .ok()
                .and_then(|index| dept.subfunctions.0.get(index))
                .map(|sub| sub.name.clone())
        });
        let department = department.map(|dept| DepartmentRef {
            department_name: dept.department_name,
            hod_name: dept.hod_name,
        });

        Ok(TeamMemberDetail {
            member,
            organization,
            department,
            subfunction_name,
        })
    }

    async fn create(
        &self,
        user_id: Uuid,
        params: CreateTeamMemberParams,
    ) -> Result<team_members::Model, ServiceError> {
        if params.subfunction_index < 0 {
            return Err(ServiceError::new(400, "Subfunction index must not be negative"));
        }

        let org = self
            .org_repo
            .find_by_id(params.organization_id)
            .await?
            .ok_or_else(|| ServiceError::new(404, "Organization not found"))?;
        if org.user_id != user_id {
            return Err(ServiceError::new(403, "Organization belongs to another user"));
        }

        self.department_in_org(params.department_id, org.org_id)
            .await?;

        let now = chrono::Utc::now().naive_utc();
        let model = team_members::ActiveModel {
            member_id: Set(Uuid::new_v4()),
            org_id: Set(org.org_id),
            user_id: Set(user_id),
            department_id: Set(params.department_id),
            subfunction_index: Set(params.subfunction_index),
            name: Set(params.name),
            email: Set(params.email),
            role: Set(params.role),
            invited: Set(params.invited),
            profile_pic: Set(params.profile_pic),
            report_to: Set(params.report_to),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(self.repo.insert(model).await?)
    }

    async fn update(
        &self,
        member_id: Uuid,
        user_id: Uuid,
        params: UpdateTeamMemberParams,
    ) -> Result<team_members::Model, ServiceError> {
        let member = self.owned(member_id, user_id).await?;

        if let Some(index) = params.subfunction_index {
            if index < 0 {
                return Err(ServiceError::new(400, "Subfunction index must not be negative"));
            }
        }
        if let Some(dept_id) = params.department_id {
            self.department_in_org(dept_id, member.org_id).await?;
        }

        let mut am = member.into_active_model();
        if let Some(department_id) = params.department_id {
            am.department_id = Set(department_id);
        }
        if let Some(subfunction_index) = params.subfunction_index {
            am.subfunction_index = Set(subfunction_index);
        }
        if let Some(name) = params.name {
            am.name = Set(name);
        }
        if let Some(email) = params.email {
            am.email = Set(email);
        }
        if let Some(role) = params.role {
            am.role = Set(role);
        }
        if let Some(invited) = params.invited {
            am.invited = Set(invited);
        }
        if let Some(profile_pic) = params.profile_pic {
            am.profile_pic = Set(Some(profile_pic));
        }
        if let Some(report_to) = params.report_to {
            am.report_to = Set(Some(report_to));
        }
        am.updated_at = Set(chrono::Utc::now().naive_utc());

        Ok(self.repo.update(am).await?)
    }

    async fn delete(&self, member_id: Uuid, user_id: Uuid) -> Result<(), ServiceError> {
        let member = self.owned(member_id, user_id).await?;
        self.repo.delete(member).await?;
        Ok(())
    }
}
