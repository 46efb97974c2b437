use crate::auth::AuthUser;
use crate::models::{status_for, ApiResponse};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use common::entities::{departments, organizations, team_members};
use common::services::chart::{ChartDto, ChartView};
use common::services::departments::{
    CreateDepartmentParams, DepartmentDetail, UpdateDepartmentParams,
};
use common::services::organizations::{
    CeoDto, CreateOrganizationParams, UpdateOrganizationParams,
};
use common::services::team_members::{
    CreateTeamMemberParams, TeamMemberDetail, UpdateTeamMemberParams,
};
use common::services::ServiceError;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

type ApiError = (StatusCode, Json<ApiResponse<()>>);
type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

fn service_error(err: ServiceError) -> ApiError {
    (
        status_for(err.code),
        Json(ApiResponse::error(err.code, err.message)),
    )
}

fn bad_request(message: &str) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::error(400, message.to_string())),
    )
}

// --- organization ---

#[derive(Deserialize)]
pub struct CeoParams {
    id: Option<Uuid>,
}

pub async fn get_my_organization(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> ApiResult<organizations::Model> {
    let org = state
        .services
        .organization_service
        .find_for_user(user.user_id)
        .await
        .map_err(service_error)?;
    Ok(Json(ApiResponse::success(org)))
}

pub async fn get_organization(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<organizations::Model> {
    let org = state
        .services
        .organization_service
        .get(id)
        .await
        .map_err(service_error)?;
    Ok(Json(ApiResponse::success(org)))
}

pub async fn get_ceo(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Query(params): Query<CeoParams>,
) -> ApiResult<CeoDto> {
    let id = params.id.ok_or_else(|| bad_request("Missing organization ID"))?;
    let ceo = state
        .services
        .organization_service
        .ceo_view(id)
        .await
        .map_err(service_error)?;
    Ok(Json(ApiResponse::success(ceo)))
}

pub async fn create_organization(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(params): Json<CreateOrganizationParams>,
) -> ApiResult<organizations::Model> {
    let org = state
        .services
        .organization_service
        .create(user.user_id, params)
        .await
        .map_err(service_error)?;
    Ok(Json(ApiResponse::success(org)))
}

pub async fn update_organization(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(params): Json<UpdateOrganizationParams>,
) -> ApiResult<organizations::Model> {
    let org = state
        .services
        .organization_service
        .update(id, user.user_id, params)
        .await
        .map_err(service_error)?;
    Ok(Json(ApiResponse::success(org)))
}

pub async fn delete_organization(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<()> {
    state
        .services
        .organization_service
        .delete(id, user.user_id)
        .await
        .map_err(service_error)?;
    Ok(Json(ApiResponse::success(())))
}

// --- departments ---

#[derive(Deserialize)]
pub struct DepartmentListParams {
    organization_id: Option<Uuid>,
}

pub async fn list_departments(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Query(params): Query<DepartmentListParams>,
) -> ApiResult<Vec<departments::Model>> {
    let org_id = params
        .organization_id
        .ok_or_else(|| bad_request("Missing organization ID"))?;
    let departments = state
        .services
        .department_service
        .list_for_organization(org_id)
        .await
        .map_err(service_error)?;
    Ok(Json(ApiResponse::success(departments)))
}

pub async fn get_department(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<DepartmentDetail> {
    let detail = state
        .services
        .department_service
        .get_detail(id)
        .await
        .map_err(service_error)?;
    Ok(Json(ApiResponse::success(detail)))
}

pub async fn get_hod(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<DepartmentDetail> {
    let detail = state
        .services
        .department_service
        .get_detail(id)
        .await
        .map_err(service_error)?;
    Ok(Json(ApiResponse::success(detail)))
}

pub async fn create_department(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(params): Json<CreateDepartmentParams>,
) -> ApiResult<departments::Model> {
    let dept = state
        .services
        .department_service
        .create(user.user_id, params)
        .await
        .map_err(service_error)?;
    Ok(Json(ApiResponse::success(dept)))
}

pub async fn update_department(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(params): Json<UpdateDepartmentParams>,
) -> ApiResult<departments::Model> {
    let dept = state
        .services
        .department_service
        .update(id, user.user_id, params)
        .await
        .map_err(service_error)?;
    Ok(Json(ApiResponse::success(dept)))
}

pub async fn delete_department(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<()> {
    state
        .services
        .department_service
        .delete(id, user.user_id)
        .await
        .map_err(service_error)?;
    Ok(Json(ApiResponse::success(())))
}

// --- team members ---

#[derive(Deserialize)]
pub struct TeamMemberListParams {
    invited: Option<bool>,
}

pub async fn list_team_members(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Query(params): Query<TeamMemberListParams>,
) -> ApiResult<Vec<team_members::Model>> {
    let org = state
        .services
        .organization_service
        .find_for_user(user.user_id)
        .await
        .map_err(service_error)?;
    let members = state
        .services
        .team_member_service
        .list_for_organization(org.org_id, params.invited.unwrap_or(false))
        .await
        .map_err(service_error)?;
    Ok(Json(ApiResponse::success(members)))
}

pub async fn get_team_member(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<TeamMemberDetail> {
    let detail = state
        .services
        .team_member_service
        .get_detail(id)
        .await
        .map_err(service_error)?;
    Ok(Json(ApiResponse::success(detail)))
}

pub async fn create_team_member(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(params): Json<CreateTeamMemberParams>,
) -> ApiResult<team_members::Model> {
    let member = state
        .services
        .team_member_service
        .create(user.user_id, params)
        .await
        .map_err(service_error)?;
    Ok(Json(ApiResponse::success(member)))
}

pub async fn update_team_member(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(params): Json<UpdateTeamMemberParams>,
) -> ApiResult<team_members::Model> {
    let member = state
        .services
        .team_member_service
        .update(id, user.user_id, params)
        .await
        .map_err(service_error)?;
    Ok(Json(ApiResponse::success(member)))
}

pub async fn delete_team_member(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<()> {
    state
        .services
        .team_member_service
        .delete(id, user.user_id)
        .await
        .map_err(service_error)?;
    Ok(Json(ApiResponse::success(())))
}

// --- chart ---

#[derive(Deserialize)]
pub struct ChartParams {
    collapsed: Option<bool>,
    collapsed_departments: Option<String>,
}

pub async fn get_chart(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Query(params): Query<ChartParams>,
) -> ApiResult<ChartDto> {
    let collapsed_departments = params
        .collapsed_departments
        .as_deref()
        .unwrap_or("")
        .split(',')
        .filter_map(|raw| Uuid::parse_str(raw.trim()).ok())
        .collect();

    let view = ChartView {
        collapsed: params.collapsed.unwrap_or(false),
        collapsed_departments,
    };

    let chart = state
        .services
        .chart_service
        .chart_for_user(user.user_id, view)
        .await
        .map_err(service_error)?;
    Ok(Json(ApiResponse::success(chart)))
}
