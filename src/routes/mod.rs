use axum::{
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Serialize;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers;
use crate::state::AppState;

pub mod health;

/// API response wrapper
#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub code: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: true,
            message: "success".to_string(),
            data: Some(data),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            code: false,
            message: message.into(),
            data: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn success_msg(message: impl Into<String>) -> Self {
        Self {
            code: true,
            message: message.into(),
            data: None,
        }
    }
}

/// Create the main router
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API routes
    let api_routes = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // User routes
        .route("/user/add", post(handlers::user::add_user))
        .route("/user/info", get(handlers::user::get_user))
        .route("/user/delete", post(handlers::user::delete_user))
        // Group routes
        .route("/group/add", post(handlers::group::add_group))
        .route("/group/info", get(handlers::group::get_group))
        .route("/group/query", get(handlers::group::get_groups))
        .route("/group/update", post(handlers::group::update_group))
        .route("/group/delete", post(handlers::group::delete_group))
        .route("/group/purge", post(handlers::group::purge_group))
        .route("/group/notices", get(handlers::group::get_group_notices))
        .route("/group/chatrooms", get(handlers::group::get_group_chat_rooms))
        .route("/group/members", get(handlers::group::get_group_members));

    Router::new()
        .nest("/api", api_routes)
        .fallback(fallback)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Fallback handler for 404
pub async fn fallback() -> (StatusCode, Json<ApiResponse<()>>) {
    (StatusCode::NOT_FOUND, Json(ApiResponse::error("Not Found")))
}
