use axum::http::Method;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub mod moods;
pub mod users;

/// Every `/api` route with permissive CORS and HTTP tracing.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let moods = Router::new()
        .route("/", post(moods::create_mood))
        .route("/user/:user_id", get(moods::list_user_moods))
        .route("/stats/:user_id", get(moods::mood_stats))
        .route("/weekly/:user_id", get(moods::weekly_trend))
        .route("/summary/:user_id", get(moods::mood_summary))
        .route("/:id", put(moods::update_mood).delete(moods::delete_mood));

    let users = Router::new()
        .route("/", get(users::list_users))
        .route("/register", post(users::register))
        .route("/login", post(users::login))
        .route("/me", get(users::me))
        .route(
            "/profile/:user_id",
            get(users::get_profile).put(users::update_profile),
        );

    Router::new()
        .route("/api/test", get(health))
        .nest("/api/moods", moods)
        .nest("/api/users", users)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "message": "Backend is running successfully! \u{1F680}" }))
}
