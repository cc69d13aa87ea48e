use std::collections::HashMap;

use axum::{
    extract::{rejection::QueryRejection, FromRequest, FromRequestParts, Multipart, Query, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::core::error::AppError;
use crate::shared::types::UploadedFile;

/// Query string extractor that reports failures as problem responses
pub struct AppQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for AppQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(value) => Ok(Self(value.0)),
            Err(QueryRejection::FailedToDeserializeQueryString(err)) => Err(AppError::BadRequest(
                format!("Invalid query parameters: {}", err.body_text()),
            )),
            Err(_) => Err(AppError::BadRequest(
                "Failed to parse query parameters".to_string(),
            )),
        }
    }
}

/// Buffered multipart body: file parts keyed by field name, plus text parts
#[derive(Debug, Default)]
pub struct AppMultipart {
    files: HashMap<String, UploadedFile>,
    fields: HashMap<String, String>,
}

impl<S> FromRequest<S> for AppMultipart
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(format!("Invalid multipart request: {}", e.body_text())))?;

        let mut form = AppMultipart::default();

        while let Some(field) = multipart.next_field().await.map_err(|e| {
            debug!("Failed to read multipart field: {}", e);
            AppError::BadRequest(format!("Failed to read multipart data: {}", e))
        })? {
            let field_name = field.name().unwrap_or("").to_string();

            match field.file_name().map(|s| s.to_string()) {
                Some(file_name) => {
                    let content_type = field.content_type().map(|s| s.to_string());
                    let data = field.bytes().await.map_err(|e| {
                        debug!("Failed to read file bytes: {}", e);
                        AppError::BadRequest(format!("Failed to read file data: {}", e))
                    })?;

                    form.files.insert(
                        field_name,
                        UploadedFile {
                            file_name,
                            content_type,
                            data,
                        },
                    );
                }
                None => {
                    let text = field.text().await.map_err(|e| {
                        AppError::BadRequest(format!("Failed to read field '{}': {}", field_name, e))
                    })?;
                    form.fields.insert(field_name, text);
                }
            }
        }

        Ok(form)
    }
}

impl AppMultipart {
    /// Takes the file part named `name`, if one was sent
    pub fn take_file(&mut self, name: &str) -> Option<UploadedFile> {
        self.files.remove(name)
    }

    /// Parses the first present part among `names` as JSON.
    ///
    /// The part may arrive as plain text or as a file (e.g. a JSON blob).
    pub fn json<T: DeserializeOwned>(&self, names: &[&str]) -> Result<T, AppError> {
        let primary = names
            .first()
            .ok_or_else(|| AppError::Internal("No JSON part name given".to_string()))?;

        let raw = names
            .iter()
            .find_map(|name| {
                self.fields
                    .get(*name)
                    .map(|s| s.as_bytes())
                    .or_else(|| self.files.get(*name).map(|f| &f.data[..]))
            })
            .ok_or_else(|| AppError::BadRequest(format!("Missing part '{}'", primary)))?;

        serde_json::from_slice(raw).map_err(|err| {
            let message = match err.classify() {
                serde_json::error::Category::Data => format!("Invalid JSON data: {}", err),
                serde_json::error::Category::Syntax | serde_json::error::Category::Eof => {
                    format!("Invalid JSON syntax: {}", err)
                }
                serde_json::error::Category::Io => "Failed to parse JSON part".to_string(),
            };
            AppError::BadRequest(message)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Bytes;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Payload {
        title: String,
    }

    fn form_with_field(name: &str, value: &str) -> AppMultipart {
        let mut form = AppMultipart::default();
        form.fields.insert(name.to_string(), value.to_string());
        form
    }

    #[test]
    fn test_json_reads_first_present_alias() {
        let form = form_with_field("movieDto", r#"{"title":"Alien"}"#);
        let payload: Payload = form.json(&["movieDtoObj", "movieDto"]).unwrap();
        assert_eq!(payload.title, "Alien");
    }

    #[test]
    fn test_json_reads_file_part() {
        let mut form = AppMultipart::default();
        form.files.insert(
            "movieDto".to_string(),
            UploadedFile {
                file_name: "movie.json".to_string(),
                content_type: Some("application/json".to_string()),
                data: Bytes::from_static(br#"{"title":"Heat"}"#),
            },
        );
        let payload: Payload = form.json(&["movieDto"]).unwrap();
        assert_eq!(payload.title, "Heat");
    }

    #[test]
    fn test_json_missing_part() {
        let form = AppMultipart::default();
        let err = form.json::<Payload>(&["movieDto"]).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(msg) if msg.contains("movieDto")));
    }

    #[test]
    fn test_json_syntax_error() {
        let form = form_with_field("movieDto", "{not json");
        let err = form.json::<Payload>(&["movieDto"]).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(msg) if msg.starts_with("Invalid JSON syntax")));
    }
}
