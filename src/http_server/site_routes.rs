//! Public site routes.
//!
//! What the marketing site reads and the one thing visitors write: the
//! inquiry form. None of these require a session.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use super::responses::ApiError;
use super::state::AppState;
use crate::store::{Inquiry, MenuItem, NewInquiry, Testimonial};

/// Public routes with shared state
pub fn site_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/menu", get(menu_handler))
        .route("/testimonials", get(testimonials_handler))
        .route("/inquiries", post(submit_inquiry_handler))
        .with_state(state)
}

/// Available menu items, ordered for display
async fn menu_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<MenuItem>>, ApiError> {
    Ok(Json(state.menu.list_available().await?))
}

/// Approved testimonials only
async fn testimonials_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Testimonial>>, ApiError> {
    Ok(Json(state.testimonials.list_approved().await?))
}

/// Inquiry form submission
async fn submit_inquiry_handler(
    State(state): State<Arc<AppState>>,
    Json(input): Json<NewInquiry>,
) -> Result<(StatusCode, Json<Inquiry>), ApiError> {
    if input.name.trim().is_empty()
        || input.email.trim().is_empty()
        || input.message.trim().is_empty()
    {
        return Err(ApiError::Validation(
            "name, email and message are required".to_string(),
        ));
    }

    let inquiry = state.inquiries.submit(input).await?;
    tracing::info!(inquiry_id = %inquiry.id, "inquiry received");

    Ok((StatusCode::CREATED, Json(inquiry)))
}
