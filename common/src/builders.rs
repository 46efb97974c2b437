use crate::repositories::{
    departments::DepartmentRepositoryImpl, organizations::OrganizationRepositoryImpl,
    team_members::TeamMemberRepositoryImpl,
};
use crate::services::{
    chart::ChartServiceImpl, departments::DepartmentServiceImpl,
    organizations::OrganizationServiceImpl, team_members::TeamMemberServiceImpl,
};
use crate::settings::Settings;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

#[derive(Clone)]
pub struct Repositories {
    pub organization_repo: Arc<dyn crate::repositories::organizations::OrganizationRepository>,
    pub department_repo: Arc<dyn crate::repositories::departments::DepartmentRepository>,
    pub team_member_repo: Arc<dyn crate::repositories::team_members::TeamMemberRepository>,
}

#[derive(Clone)]
pub struct Services {
    pub organization_service: Arc<dyn crate::services::organizations::OrganizationService>,
    pub department_service: Arc<dyn crate::services::departments::DepartmentService>,
    pub team_member_service: Arc<dyn crate::services::team_members::TeamMemberService>,
    pub chart_service: Arc<dyn crate::services::chart::ChartService>,
}

pub fn build_repositories(db: Arc<DatabaseConnection>) -> Repositories {
    Repositories {
        organization_repo: Arc::new(OrganizationRepositoryImpl::new(db.clone())),
        department_repo: Arc::new(DepartmentRepositoryImpl::new(db.clone())),
        team_member_repo: Arc::new(TeamMemberRepositoryImpl::new(db.clone())),
    }
}

pub fn build_services(repos: &Repositories, settings: &Settings) -> Services {
    let organization_service = Arc::new(OrganizationServiceImpl::new(
        repos.organization_repo.clone(),
    ));

    let department_service = Arc::new(DepartmentServiceImpl::new(
        repos.department_repo.clone(),
        repos.organization_repo.clone(),
        repos.team_member_repo.clone(),
    ));

    let team_member_service = Arc::new(TeamMemberServiceImpl::new(
        repos.team_member_repo.clone(),
        repos.organization_repo.clone(),
        repos.department_repo.clone(),
    ));

    let chart_service = Arc::new(ChartServiceImpl::new(
        repos.organization_repo.clone(),
        repos.department_repo.clone(),
        repos.team_member_repo.clone(),
        settings.chart.on_orphan,
    ));

    Services {
        organization_service,
        department_service,
        team_member_service,
        chart_service,
    }
}

pub fn build_all(db: Arc<DatabaseConnection>, settings: &Settings) -> (Repositories, Services) {
    let repos = build_repositories(db);
    let services = build_services(&repos, settings);
    (repos, services)
}
