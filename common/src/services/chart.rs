use super::ServiceError;
use crate::chart::{assemble, render, CollapseState, OrphanPolicy, RebuildPolicy, RenderNode};
use crate::repositories::departments::DepartmentRepository;
use crate::repositories::organizations::OrganizationRepository;
use crate::repositories::team_members::TeamMemberRepository;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

/// Collapse state as the client sends it: the global toggle plus the ids of
/// the departments whose subtree is folded away.
#[derive(Debug, Default, Clone)]
pub struct ChartView {
    pub collapsed: bool,
    pub collapsed_departments: Vec<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct ChartDto {
    pub root: RenderNode,
}

#[async_trait]
pub trait ChartService: Send + Sync {
    /// The rendered chart for the caller's organization. A missing
    /// organization is a 404; failed department or team-member reads degrade
    /// to an empty layer so the rest of the chart still renders.
    async fn chart_for_user(
        &self,
        user_id: Uuid,
        view: ChartView,
    ) -> Result<ChartDto, ServiceError>;
}

pub struct ChartServiceImpl {
    org_repo: Arc<dyn OrganizationRepository>,
    dept_repo: Arc<dyn DepartmentRepository>,
    member_repo: Arc<dyn TeamMemberRepository>,
    on_orphan: OrphanPolicy,
}

impl ChartServiceImpl {
    pub fn new(
        org_repo: Arc<dyn OrganizationRepository>,
        dept_repo: Arc<dyn DepartmentRepository>,
        member_repo: Arc<dyn TeamMemberRepository>,
        on_orphan: OrphanPolicy,
    ) -> Self {
        Self {
            org_repo,
            dept_repo,
            member_repo,
            on_orphan,
        }
    }
}

#[async_trait]
impl ChartService for ChartServiceImpl {
    async fn chart_for_user(
        &self,
        user_id: Uuid,
        view: ChartView,
    ) -> Result<ChartDto, ServiceError> {
        let organization = self
            .org_repo
            .find_by_user(user_id)
            .await?
            .ok_or_else(|| ServiceError::new(404, "Organization not found"))?;

        let departments = match self.dept_repo.list_by_organization(organization.org_id).await {
            Ok(departments) => departments,
            Err(err) => {
                tracing::warn!(org_id = %organization.org_id, error = %err, "department fetch failed, rendering chart without departments");
                Vec::new()
            }
        };

        let members = match self
            .member_repo
            .list_by_organization(organization.org_id, true)
            .await
        {
            Ok(members) => members,
            Err(err) => {
                tracing::warn!(org_id = %organization.org_id, error = %err, "team member fetch failed, rendering chart without members");
                Vec::new()
            }
        };

        let chart = assemble(organization, departments, members, self.on_orphan)
            .map_err(|err| ServiceError::new(422, err.to_string()))?;

        let mut state = CollapseState::new();
        state.rebuild(&chart.department_ids(), RebuildPolicy::Reset);
        for dept_id in view.collapsed_departments {
            state.toggle_department(dept_id);
        }
        if view.collapsed {
            state.toggle_all();
        }

        Ok(ChartDto {
            root: render(&chart, &state),
        })
    }
}
