pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post, put},
    Router,
};

use crate::content::handlers as content;
use crate::editor::handlers as admin;
use crate::editor::image::MAX_IMAGE_BYTES;
use crate::state::AppState;

/// Multipart framing on top of the image itself.
const UPLOAD_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Public surface
        .route("/api/v1/content", get(content::handle_get_content))
        .route(
            "/api/v1/content/portfolio",
            get(content::handle_get_portfolio),
        )
        .route(
            "/api/v1/content/portfolio/categories",
            get(content::handle_get_categories),
        )
        .route("/api/v1/contact", post(content::handle_contact))
        // Admin session
        .route("/api/v1/admin/session", get(admin::handle_session_status))
        .route(
            "/api/v1/admin/session/begin",
            post(admin::handle_begin_auth),
        )
        .route("/api/v1/admin/session/login", post(admin::handle_login))
        .route("/api/v1/admin/session/logout", post(admin::handle_logout))
        .route("/api/v1/admin/edit", post(admin::handle_reopen))
        .route("/api/v1/admin/cancel", post(admin::handle_cancel))
        .route("/api/v1/admin/commit", post(admin::handle_commit))
        // Draft editing
        .route("/api/v1/admin/draft", get(admin::handle_get_draft))
        .route("/api/v1/admin/draft/section", put(admin::handle_set_section))
        .route(
            "/api/v1/admin/draft/profile",
            patch(admin::handle_update_profile),
        )
        .route(
            "/api/v1/admin/draft/images",
            post(admin::handle_upload_image)
                .layer(DefaultBodyLimit::max(MAX_IMAGE_BYTES + UPLOAD_OVERHEAD_BYTES)),
        )
        .route(
            "/api/v1/admin/draft/:list/entries",
            post(admin::handle_append_entry),
        )
        .route(
            "/api/v1/admin/draft/:list/entries/:id",
            patch(admin::handle_update_entry).delete(admin::handle_remove_entry),
        )
        .with_state(state)
}
