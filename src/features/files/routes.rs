use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::features::files::handlers::{serve_file, upload_file};
use crate::features::files::services::FileService;

/// Create routes for the files feature
pub fn routes(file_service: Arc<FileService>, max_body_size: usize) -> Router {
    Router::new()
        .route(
            "/file/upload",
            post(upload_file).layer(DefaultBodyLimit::max(max_body_size)),
        )
        .route("/file/{fileName}", get(serve_file))
        .with_state(file_service)
}
