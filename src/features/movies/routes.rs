use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
    Router,
};

use crate::features::movies::handlers;
use crate::features::movies::services::MovieService;

/// Create routes for the movies feature
///
/// `max_body_size` caps the multipart routes that carry a poster.
pub fn routes(service: Arc<MovieService>, max_body_size: usize) -> Router {
    Router::new()
        .route(
            "/api/v1/movie/add-movie",
            post(handlers::add_movie).layer(DefaultBodyLimit::max(max_body_size)),
        )
        .route("/api/v1/movie/all", get(handlers::list_movies))
        .route("/api/v1/movie/allMoviesPage", get(handlers::list_movies_page))
        .route(
            "/api/v1/movie/allMoviesPageSort",
            get(handlers::list_movies_page_sorted),
        )
        .route(
            "/api/v1/movie/update/{movieId}",
            put(handlers::update_movie).layer(DefaultBodyLimit::max(max_body_size)),
        )
        .route(
            "/api/v1/movie/delete/{movieId}",
            delete(handlers::delete_movie),
        )
        .route("/api/v1/movie/{movieId}", get(handlers::get_movie))
        .with_state(service)
}
