use axum::{
    body::Body,
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tokio_util::io::ReaderStream;
use tracing::debug;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppMultipart;
use crate::features::files::dtos::UploadFileDto;
use crate::features::files::services::FileService;
use crate::shared::constants::POSTER_CONTENT_TYPE;
use crate::shared::types::ProblemDetail;

/// Upload a file
///
/// Accepts multipart/form-data with a single `file` part. The file is stored
/// under its original name, replacing any file already stored under it.
#[utoipa::path(
    post,
    path = "/file/upload",
    tag = "files",
    request_body(
        content = UploadFileDto,
        content_type = "multipart/form-data",
        description = "File upload form",
    ),
    responses(
        (status = 200, description = "File stored", body = String, content_type = "text/plain"),
        (status = 400, description = "Missing file or invalid file name", body = ProblemDetail),
        (status = 413, description = "File too large")
    )
)]
pub async fn upload_file(
    State(service): State<Arc<FileService>>,
    mut multipart: AppMultipart,
) -> Result<String> {
    let file = multipart
        .take_file("file")
        .ok_or_else(|| AppError::BadRequest("File is required".to_string()))?;

    let name = service.upload(file).await?;
    Ok(format!("File uploaded : {}", name))
}

/// Serve a stored file
///
/// The body is streamed from disk and always labelled `image/jpeg`.
#[utoipa::path(
    get,
    path = "/file/{fileName}",
    tag = "files",
    params(
        ("fileName" = String, Path, description = "Stored file name")
    ),
    responses(
        (status = 200, description = "File content, served as image/jpeg"),
        (status = 400, description = "Invalid file name", body = ProblemDetail),
        (status = 404, description = "File not found", body = ProblemDetail)
    )
)]
pub async fn serve_file(
    State(service): State<Arc<FileService>>,
    Path(file_name): Path<String>,
) -> Result<Response> {
    let (file, len) = service.open(&file_name).await?;
    debug!("Serving file {} ({} bytes)", file_name, len);

    let headers = [
        (header::CONTENT_TYPE, POSTER_CONTENT_TYPE.to_string()),
        (header::CONTENT_LENGTH, len.to_string()),
    ];
    Ok((headers, Body::from_stream(ReaderStream::new(file))).into_response())
}
