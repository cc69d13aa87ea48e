use utoipa::ToSchema;

/// Upload form for OpenAPI documentation only.
/// The handler reads the multipart body through `AppMultipart`.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadFileDto {
    /// The file to store, kept under its original file name
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub file: String,
}
