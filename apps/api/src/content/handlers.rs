//! Axum route handlers for the public, read-only surface.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::models::content::{ContentDocument, PortfolioItem, ALL_CATEGORIES};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PortfolioQuery {
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PortfolioResponse {
    pub category: String,
    pub items: Vec<PortfolioItem>,
}

#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ContactAck {
    pub received: bool,
    pub message: String,
}

/// GET /api/v1/content
pub async fn handle_get_content(State(state): State<AppState>) -> Json<ContentDocument> {
    Json(state.live.snapshot().as_ref().clone())
}

/// GET /api/v1/content/portfolio?category=
pub async fn handle_get_portfolio(
    State(state): State<AppState>,
    Query(params): Query<PortfolioQuery>,
) -> Json<PortfolioResponse> {
    let category = params
        .category
        .unwrap_or_else(|| ALL_CATEGORIES.to_string());
    let doc = state.live.snapshot();
    let items = doc
        .filter_portfolio(&category)
        .into_iter()
        .cloned()
        .collect();
    Json(PortfolioResponse { category, items })
}

/// GET /api/v1/content/portfolio/categories
pub async fn handle_get_categories(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.live.snapshot().portfolio_categories())
}

/// POST /api/v1/contact
///
/// Acknowledges the message locally. Nothing is sent anywhere.
pub async fn handle_contact(Json(req): Json<ContactRequest>) -> Result<Json<ContactAck>, AppError> {
    if req.name.trim().is_empty() || req.message.trim().is_empty() {
        return Err(AppError::Validation(
            "name and message are required".to_string(),
        ));
    }
    if !req.email.contains('@') {
        return Err(AppError::Validation("email looks invalid".to_string()));
    }

    info!("Contact form submitted ({} chars)", req.message.len());
    Ok(Json(ContactAck {
        received: true,
        message: "Thanks for your message! I'll get back to you soon.".to_string(),
    }))
}
