use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppMultipart, AppQuery};
use crate::features::movies::dtos::{
    AddMovieFormDto, MoviePageQuery, MoviePageResponseDto, MoviePageSortQuery, MovieRequestDto,
    MovieResponseDto, UpdateMovieFormDto,
};
use crate::features::movies::services::MovieService;
use crate::shared::types::ProblemDetail;

/// Add a movie with its poster
///
/// Accepts multipart/form-data with:
/// - `file`: the poster image, stored under its original file name (required)
/// - `movieDto`: the movie as a JSON string (required)
#[utoipa::path(
    post,
    path = "/api/v1/movie/add-movie",
    tag = "movies",
    request_body(
        content = AddMovieFormDto,
        content_type = "multipart/form-data",
        description = "Poster file plus the movie as a JSON part",
    ),
    responses(
        (status = 201, description = "Movie created", body = MovieResponseDto),
        (status = 400, description = "Missing file, file name taken, malformed JSON or blank field", body = ProblemDetail),
        (status = 413, description = "Request body too large")
    )
)]
pub async fn add_movie(
    State(service): State<Arc<MovieService>>,
    mut multipart: AppMultipart,
) -> Result<(StatusCode, Json<MovieResponseDto>)> {
    let file = multipart
        .take_file("file")
        .filter(|f| !f.is_empty())
        .ok_or_else(|| AppError::BadRequest("File is empty! Please send another file".to_string()))?;
    let dto: MovieRequestDto = multipart.json(&["movieDto"])?;

    let movie = service.add_movie(dto, file).await?;
    Ok((StatusCode::CREATED, Json(movie)))
}

/// Get a movie by id
#[utoipa::path(
    get,
    path = "/api/v1/movie/{movieId}",
    tag = "movies",
    params(
        ("movieId" = i32, Path, description = "Movie id")
    ),
    responses(
        (status = 200, description = "Movie found", body = MovieResponseDto),
        (status = 404, description = "Movie not found", body = ProblemDetail)
    )
)]
pub async fn get_movie(
    State(service): State<Arc<MovieService>>,
    Path(movie_id): Path<i32>,
) -> Result<Json<MovieResponseDto>> {
    let movie = service.get_movie(movie_id).await?;
    Ok(Json(movie))
}

/// List every movie
#[utoipa::path(
    get,
    path = "/api/v1/movie/all",
    tag = "movies",
    responses(
        (status = 200, description = "All movies", body = Vec<MovieResponseDto>)
    )
)]
pub async fn list_movies(
    State(service): State<Arc<MovieService>>,
) -> Result<Json<Vec<MovieResponseDto>>> {
    let movies = service.list_movies().await?;
    Ok(Json(movies))
}

/// Update a movie, optionally replacing its poster
///
/// Accepts multipart/form-data with:
/// - `file`: replacement poster (optional; an empty part keeps the current one)
/// - `movieDtoObj`: the movie as a JSON string (`movieDto` is accepted too)
#[utoipa::path(
    put,
    path = "/api/v1/movie/update/{movieId}",
    tag = "movies",
    params(
        ("movieId" = i32, Path, description = "Movie id")
    ),
    request_body(
        content = UpdateMovieFormDto,
        content_type = "multipart/form-data",
        description = "Optional replacement poster plus the movie as a JSON part",
    ),
    responses(
        (status = 200, description = "Movie updated", body = MovieResponseDto),
        (status = 400, description = "Malformed JSON or blank field", body = ProblemDetail),
        (status = 404, description = "Movie not found", body = ProblemDetail)
    )
)]
pub async fn update_movie(
    State(service): State<Arc<MovieService>>,
    Path(movie_id): Path<i32>,
    mut multipart: AppMultipart,
) -> Result<Json<MovieResponseDto>> {
    let file = multipart.take_file("file").filter(|f| !f.is_empty());
    let dto: MovieRequestDto = multipart.json(&["movieDtoObj", "movieDto"])?;

    let movie = service.update_movie(movie_id, dto, file).await?;
    Ok(Json(movie))
}

/// Delete a movie and its poster
#[utoipa::path(
    delete,
    path = "/api/v1/movie/delete/{movieId}",
    tag = "movies",
    params(
        ("movieId" = i32, Path, description = "Movie id")
    ),
    responses(
        (status = 200, description = "Movie deleted", body = String, content_type = "text/plain"),
        (status = 404, description = "Movie not found", body = ProblemDetail)
    )
)]
pub async fn delete_movie(
    State(service): State<Arc<MovieService>>,
    Path(movie_id): Path<i32>,
) -> Result<String> {
    service.delete_movie(movie_id).await
}

/// List movies one page at a time, in id order
#[utoipa::path(
    get,
    path = "/api/v1/movie/allMoviesPage",
    tag = "movies",
    params(MoviePageQuery),
    responses(
        (status = 200, description = "Page of movies", body = MoviePageResponseDto),
        (status = 400, description = "Invalid page index or size", body = ProblemDetail)
    )
)]
pub async fn list_movies_page(
    State(service): State<Arc<MovieService>>,
    AppQuery(query): AppQuery<MoviePageQuery>,
) -> Result<Json<MoviePageResponseDto>> {
    let page = service
        .list_movies_page(query.page_number, query.page_size)
        .await?;
    Ok(Json(page))
}

/// List movies one page at a time, sorted by a movie property
#[utoipa::path(
    get,
    path = "/api/v1/movie/allMoviesPageSort",
    tag = "movies",
    params(MoviePageSortQuery),
    responses(
        (status = 200, description = "Sorted page of movies", body = MoviePageResponseDto),
        (status = 400, description = "Invalid page index, size or sort property", body = ProblemDetail)
    )
)]
pub async fn list_movies_page_sorted(
    State(service): State<Arc<MovieService>>,
    AppQuery(query): AppQuery<MoviePageSortQuery>,
) -> Result<Json<MoviePageResponseDto>> {
    let page = service
        .list_movies_page_sorted(query.page_number, query.page_size, &query.sort_by, &query.dir)
        .await?;
    Ok(Json(page))
}
