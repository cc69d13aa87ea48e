use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::features::movies::models::{Movie, MovieFields};
use crate::shared::constants::{
    DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, DEFAULT_SORT_BY, DEFAULT_SORT_DIR,
};
use crate::shared::types::Page;

/// Movie metadata sent alongside a poster upload.
///
/// Missing fields default to empty; blank values are rejected when the
/// record is persisted. `movieId` and `poster` are accepted but ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct MovieRequestDto {
    pub movie_id: Option<i32>,
    #[schema(example = "Inception")]
    pub title: String,
    #[schema(example = "Christopher Nolan")]
    pub director: String,
    #[schema(example = "Warner Bros.")]
    pub studio: String,
    #[schema(value_type = Vec<String>, example = json!(["Leonardo DiCaprio"]))]
    pub movie_cast: BTreeSet<String>,
    #[schema(example = "2010")]
    pub release_year: String,
    pub poster: Option<String>,
}

impl MovieRequestDto {
    /// Record fields for this request, pointing at `poster`
    pub fn into_fields(self, poster: String) -> MovieFields {
        MovieFields {
            title: self.title,
            director: self.director,
            studio: self.studio,
            movie_cast: self.movie_cast,
            release_year: self.release_year,
            poster,
        }
    }
}

/// Response DTO for a movie
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MovieResponseDto {
    pub movie_id: i32,
    pub title: String,
    pub director: String,
    pub studio: String,
    #[schema(value_type = Vec<String>)]
    pub movie_cast: BTreeSet<String>,
    pub release_year: String,
    /// Stored poster file name
    pub poster: String,
    /// Public URL the poster is served from
    pub poster_url: String,
}

impl MovieResponseDto {
    pub fn from_movie(movie: Movie, poster_url: String) -> Self {
        let fields = movie.fields;
        Self {
            movie_id: movie.movie_id,
            title: fields.title,
            director: fields.director,
            studio: fields.studio,
            movie_cast: fields.movie_cast,
            release_year: fields.release_year,
            poster: fields.poster,
            poster_url,
        }
    }
}

/// One page of movies plus paging metadata
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MoviePageResponseDto {
    pub movie_dtos: Vec<MovieResponseDto>,
    pub page_number: i32,
    pub page_size: i32,
    pub total_elements: i64,
    pub total_pages: i32,
    pub is_last: bool,
}

impl From<Page<MovieResponseDto>> for MoviePageResponseDto {
    fn from(page: Page<MovieResponseDto>) -> Self {
        let total_pages = page.total_pages();
        let is_last = page.is_last();
        Self {
            page_number: page.page_number,
            page_size: page.page_size,
            total_elements: page.total_elements,
            total_pages,
            is_last,
            movie_dtos: page.content,
        }
    }
}

/// Query params for paged listing
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct MoviePageQuery {
    /// Zero-based page index (default: 0)
    #[serde(default = "default_page_number")]
    pub page_number: i32,
    /// Number of movies per page (default: 10)
    #[serde(default = "default_page_size")]
    pub page_size: i32,
}

/// Query params for paged and sorted listing
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct MoviePageSortQuery {
    /// Zero-based page index (default: 0)
    #[serde(default = "default_page_number")]
    pub page_number: i32,
    /// Number of movies per page (default: 10)
    #[serde(default = "default_page_size")]
    pub page_size: i32,
    /// Property to sort by: movieId, title, director, studio, releaseYear, poster
    #[serde(default = "default_sort_by")]
    pub sort_by: String,
    /// "asc" (any case) for ascending, anything else for descending
    #[serde(default = "default_sort_dir")]
    pub dir: String,
}

fn default_page_number() -> i32 {
    DEFAULT_PAGE_NUMBER
}

fn default_page_size() -> i32 {
    DEFAULT_PAGE_SIZE
}

fn default_sort_by() -> String {
    DEFAULT_SORT_BY.to_string()
}

fn default_sort_dir() -> String {
    DEFAULT_SORT_DIR.to_string()
}

/// Add-movie form for OpenAPI documentation only.
/// The handler reads the multipart body through `AppMultipart`.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
#[schema(rename_all = "camelCase")]
pub struct AddMovieFormDto {
    /// Poster image
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub file: String,
    /// JSON-encoded `MovieRequestDto`
    pub movie_dto: String,
}

/// Update-movie form for OpenAPI documentation only.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
#[schema(rename_all = "camelCase")]
pub struct UpdateMovieFormDto {
    /// Replacement poster image (optional; an empty part keeps the current poster)
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub file: Option<String>,
    /// JSON-encoded `MovieRequestDto`
    pub movie_dto_obj: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_uses_camel_case_and_defaults() {
        let dto: MovieRequestDto = serde_json::from_str(
            r#"{"title":"Inception","movieCast":["DiCaprio","Page"],"releaseYear":"2010"}"#,
        )
        .unwrap();
        assert_eq!(dto.title, "Inception");
        assert_eq!(dto.release_year, "2010");
        assert_eq!(dto.movie_cast.len(), 2);
        assert!(dto.director.is_empty());
        assert!(dto.movie_id.is_none());
    }

    #[test]
    fn test_request_cast_is_a_set() {
        let dto: MovieRequestDto =
            serde_json::from_str(r#"{"movieCast":["Page","DiCaprio","Page"]}"#).unwrap();
        assert_eq!(dto.movie_cast.len(), 2);
    }

    #[test]
    fn test_page_response_serializes_metadata() {
        let page = MoviePageResponseDto {
            movie_dtos: vec![],
            page_number: 0,
            page_size: 10,
            total_elements: 0,
            total_pages: 0,
            is_last: true,
        };
        let json = serde_json::to_value(page).unwrap();
        assert_eq!(json["isLast"], true);
        assert_eq!(json["totalElements"], 0);
        assert!(json["movieDtos"].is_array());
    }

    #[test]
    fn test_sort_query_defaults() {
        let query: MoviePageSortQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.page_number, 0);
        assert_eq!(query.page_size, 10);
        assert_eq!(query.sort_by, "movieId");
        assert_eq!(query.dir, "asc");
    }
}
