//! Habit handlers.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::api::extractors::{parse_habit_id, HabitId, ValidatedJson};
use crate::api::AppState;
use crate::config::INVALID_HABIT_ID_MESSAGE;
use crate::domain::{DeletedHabitResponse, HabitDraft, HabitResponse, MarkResponse};
use crate::errors::{AppError, AppResult};

/// Habit create/update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct HabitRequest {
    /// Habit name, must not be blank
    #[validate(
        required(message = "name is required"),
        length(min = 1, message = "name is required")
    )]
    #[schema(example = "Drink Water")]
    pub name: Option<String>,
    /// Optional free-text notes
    #[schema(example = "8 glasses")]
    pub notes: Option<String>,
}

impl HabitRequest {
    fn into_draft(self) -> AppResult<HabitDraft> {
        HabitDraft::new(self.name.unwrap_or_default(), self.notes)
    }
}

/// Query string accepted by `PUT /habits?id=`
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HabitIdQuery {
    /// Habit identifier
    pub id: Option<String>,
}

/// Create habit routes
pub fn habit_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_habits).post(create_habit).put(update_habit_by_query))
        .route("/:id", get(get_habit).put(update_habit).delete(delete_habit))
        .route("/:id/mark", post(mark_habit))
}

/// Create a habit
#[utoipa::path(
    post,
    path = "/habits",
    tag = "Habits",
    request_body = HabitRequest,
    responses(
        (status = 201, description = "Habit created", body = HabitResponse),
        (status = 400, description = "Validation error"),
        (status = 500, description = "Store error")
    )
)]
pub async fn create_habit(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<HabitRequest>,
) -> AppResult<(StatusCode, Json<HabitResponse>)> {
    let history = state
        .habit_service
        .create_habit(payload.into_draft()?)
        .await?;

    Ok((StatusCode::CREATED, Json(HabitResponse::from(history))))
}

/// List all habits with their history
#[utoipa::path(
    get,
    path = "/habits",
    tag = "Habits",
    responses(
        (status = 200, description = "Habits ordered by id", body = Vec<HabitResponse>),
        (status = 500, description = "Store error")
    )
)]
pub async fn list_habits(State(state): State<AppState>) -> AppResult<Json<Vec<HabitResponse>>> {
    let habits = state.habit_service.list_habits().await?;
    Ok(Json(habits.into_iter().map(HabitResponse::from).collect()))
}

/// Get a habit by id
#[utoipa::path(
    get,
    path = "/habits/{id}",
    tag = "Habits",
    params(("id" = i32, Path, description = "Habit identifier")),
    responses(
        (status = 200, description = "Habit found", body = HabitResponse),
        (status = 400, description = "Invalid habit id"),
        (status = 404, description = "Habit not found")
    )
)]
pub async fn get_habit(
    State(state): State<AppState>,
    HabitId(id): HabitId,
) -> AppResult<Json<HabitResponse>> {
    let history = state.habit_service.get_habit(id).await?;
    Ok(Json(HabitResponse::from(history)))
}

/// Mark a habit done for today
#[utoipa::path(
    post,
    path = "/habits/{id}/mark",
    tag = "Habits",
    params(("id" = i32, Path, description = "Habit identifier")),
    responses(
        (status = 201, description = "Marked for today", body = MarkResponse),
        (status = 200, description = "Already marked for today", body = MarkResponse),
        (status = 400, description = "Invalid habit id"),
        (status = 404, description = "Habit not found")
    )
)]
pub async fn mark_habit(
    State(state): State<AppState>,
    HabitId(id): HabitId,
) -> AppResult<(StatusCode, Json<MarkResponse>)> {
    let response = state.habit_service.mark_today(id).await?;

    let status = if response.status.is_new() {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((status, Json(response)))
}

/// Replace a habit's name and notes
#[utoipa::path(
    put,
    path = "/habits/{id}",
    tag = "Habits",
    params(("id" = i32, Path, description = "Habit identifier")),
    request_body = HabitRequest,
    responses(
        (status = 200, description = "Habit updated", body = HabitResponse),
        (status = 400, description = "Validation error or invalid habit id"),
        (status = 404, description = "Habit not found")
    )
)]
pub async fn update_habit(
    State(state): State<AppState>,
    HabitId(id): HabitId,
    ValidatedJson(payload): ValidatedJson<HabitRequest>,
) -> AppResult<Json<HabitResponse>> {
    apply_update(&state, id, payload).await
}

/// Replace a habit's name and notes, id given as `?id=`
#[utoipa::path(
    put,
    path = "/habits",
    tag = "Habits",
    params(HabitIdQuery),
    request_body = HabitRequest,
    responses(
        (status = 200, description = "Habit updated", body = HabitResponse),
        (status = 400, description = "Validation error or invalid habit id"),
        (status = 404, description = "Habit not found")
    )
)]
pub async fn update_habit_by_query(
    State(state): State<AppState>,
    Query(query): Query<HabitIdQuery>,
    ValidatedJson(payload): ValidatedJson<HabitRequest>,
) -> AppResult<Json<HabitResponse>> {
    let raw = query
        .id
        .ok_or_else(|| AppError::bad_request(INVALID_HABIT_ID_MESSAGE))?;
    let id = parse_habit_id(&raw)?;

    apply_update(&state, id, payload).await
}

async fn apply_update(
    state: &AppState,
    id: i32,
    payload: HabitRequest,
) -> AppResult<Json<HabitResponse>> {
    let history = state
        .habit_service
        .update_habit(id, payload.into_draft()?)
        .await?;

    Ok(Json(HabitResponse::from(history)))
}

/// Delete a habit and its marks
#[utoipa::path(
    delete,
    path = "/habits/{id}",
    tag = "Habits",
    params(("id" = i32, Path, description = "Habit identifier")),
    responses(
        (status = 200, description = "Habit deleted", body = DeletedHabitResponse),
        (status = 400, description = "Invalid habit id"),
        (status = 404, description = "Habit not found")
    )
)]
pub async fn delete_habit(
    State(state): State<AppState>,
    HabitId(id): HabitId,
) -> AppResult<Json<DeletedHabitResponse>> {
    let id = state.habit_service.delete_habit(id).await?;
    Ok(Json(DeletedHabitResponse { id }))
}
