use utoipa::{Modify, OpenApi};

use crate::features::files::{dtos as files_dtos, handlers as files_handlers};
use crate::features::movies::{dtos as movies_dtos, handlers as movies_handlers};
use crate::shared::types::ProblemDetail;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Movies
        movies_handlers::add_movie,
        movies_handlers::get_movie,
        movies_handlers::list_movies,
        movies_handlers::update_movie,
        movies_handlers::delete_movie,
        movies_handlers::list_movies_page,
        movies_handlers::list_movies_page_sorted,
        // Files
        files_handlers::upload_file,
        files_handlers::serve_file,
    ),
    components(
        schemas(
            // Shared
            ProblemDetail,
            // Movies
            movies_dtos::MovieRequestDto,
            movies_dtos::MovieResponseDto,
            movies_dtos::MoviePageResponseDto,
            movies_dtos::AddMovieFormDto,
            movies_dtos::UpdateMovieFormDto,
            // Files
            files_dtos::UploadFileDto,
        )
    ),
    tags(
        (name = "movies", description = "Movie catalog with poster upload"),
        (name = "files", description = "Raw poster upload and download"),
    ),
    info(
        title = "Movie Catalog API",
        version = "0.1.0",
        description = "API documentation for the movie catalog",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
