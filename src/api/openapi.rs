//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::OpenApi;

use crate::api::handlers::habit_handler;
use crate::domain::{DeletedHabitResponse, HabitResponse, MarkResponse, MarkStatus};

/// OpenAPI documentation for the Habit Tracker
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Habit Tracker",
        version = "0.1.0",
        description = "Track daily habits and the days they were done",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(
        habit_handler::create_habit,
        habit_handler::list_habits,
        habit_handler::get_habit,
        habit_handler::mark_habit,
        habit_handler::update_habit,
        habit_handler::update_habit_by_query,
        habit_handler::delete_habit,
    ),
    components(
        schemas(
            HabitResponse,
            DeletedHabitResponse,
            MarkResponse,
            MarkStatus,
            habit_handler::HabitRequest,
        )
    ),
    tags(
        (name = "Habits", description = "Habit tracking operations")
    )
)]
pub struct ApiDoc;
