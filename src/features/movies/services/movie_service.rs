use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::core::config::StorageConfig;
use crate::core::error::{AppError, Result};
use crate::features::movies::dtos::{MoviePageResponseDto, MovieRequestDto, MovieResponseDto};
use crate::features::movies::models::{Movie, MovieSortField};
use crate::features::movies::repositories::MovieRepository;
use crate::modules::storage::LocalFileStore;
use crate::shared::constants::POSTER_PATH_PREFIX;
use crate::shared::types::{PageRequest, SortDirection, UploadedFile};

/// Service for movie records and their posters
pub struct MovieService {
    repository: Arc<dyn MovieRepository>,
    store: Arc<LocalFileStore>,
    base_url: String,
    remove_replaced_poster: bool,
}

impl MovieService {
    pub fn new(
        repository: Arc<dyn MovieRepository>,
        store: Arc<LocalFileStore>,
        config: &StorageConfig,
    ) -> Self {
        Self {
            repository,
            store,
            base_url: config.base_url.clone(),
            remove_replaced_poster: config.remove_replaced_poster,
        }
    }

    /// Public URL a stored poster is served from
    pub fn poster_url(&self, poster: &str) -> String {
        format!("{}{}{}", self.base_url, POSTER_PATH_PREFIX, poster)
    }

    fn to_dto(&self, movie: Movie) -> MovieResponseDto {
        let poster_url = self.poster_url(&movie.fields.poster);
        MovieResponseDto::from_movie(movie, poster_url)
    }

    async fn find_movie(&self, movie_id: i32) -> Result<Movie> {
        self.repository
            .find_by_id(movie_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Movie not found with id = {}", movie_id)))
    }

    /// Store the poster, then persist the movie pointing at it.
    ///
    /// The collision check and the write are not atomic, and a record that
    /// fails validation leaves the stored poster behind.
    pub async fn add_movie(
        &self,
        dto: MovieRequestDto,
        file: UploadedFile,
    ) -> Result<MovieResponseDto> {
        if self.store.exists(&file.file_name).await? {
            return Err(AppError::AlreadyExists(format!(
                "File already exists: '{}'. Please rename the file",
                file.file_name
            )));
        }

        let poster = self.store.store(&file.file_name, &file.data).await?;
        debug!("Poster stored for new movie: {}", poster);

        let fields = dto.into_fields(poster);
        fields.ensure_valid()?;

        let movie = self.repository.insert(&fields).await?;
        info!(
            "Movie added: id={}, title={}, poster={}",
            movie.movie_id, movie.fields.title, movie.fields.poster
        );

        Ok(self.to_dto(movie))
    }

    pub async fn get_movie(&self, movie_id: i32) -> Result<MovieResponseDto> {
        let movie = self.find_movie(movie_id).await?;
        Ok(self.to_dto(movie))
    }

    pub async fn list_movies(&self) -> Result<Vec<MovieResponseDto>> {
        let movies = self.repository.find_all().await?;
        Ok(movies.into_iter().map(|m| self.to_dto(m)).collect())
    }

    /// Overwrite a movie's fields, optionally replacing its poster.
    ///
    /// With a replacement, the file carrying the upload's own name is removed
    /// before the upload is written. The previous poster is only removed when
    /// `remove_replaced_poster` is configured, and only after the record has
    /// been rewritten.
    pub async fn update_movie(
        &self,
        movie_id: i32,
        dto: MovieRequestDto,
        file: Option<UploadedFile>,
    ) -> Result<MovieResponseDto> {
        let existing = self.find_movie(movie_id).await?;
        let previous_poster = existing.fields.poster;

        let poster = match file {
            Some(file) => {
                self.store.delete_if_exists(&file.file_name).await?;
                self.store.store(&file.file_name, &file.data).await?
            }
            None => previous_poster.clone(),
        };

        let fields = dto.into_fields(poster);
        fields.ensure_valid()?;

        let movie = self
            .repository
            .replace(movie_id, &fields)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Movie not found with id = {}", movie_id)))?;

        // Only once the record points at the new poster
        if self.remove_replaced_poster && previous_poster != movie.fields.poster {
            if let Err(e) = self.store.delete_if_exists(&previous_poster).await {
                warn!(
                    "Failed to remove replaced poster '{}' of movie {}: {}",
                    previous_poster, movie_id, e
                );
            }
        }

        Ok(self.to_dto(movie))
    }

    /// Remove the poster (if still present), then the record
    pub async fn delete_movie(&self, movie_id: i32) -> Result<String> {
        let movie = self.find_movie(movie_id).await?;

        self.store.delete_if_exists(&movie.fields.poster).await?;
        self.repository.delete(movie.movie_id).await?;

        Ok(format!("Movie delete with id = {}", movie_id))
    }

    pub async fn list_movies_page(
        &self,
        page_number: i32,
        page_size: i32,
    ) -> Result<MoviePageResponseDto> {
        let request = PageRequest::new(page_number, page_size)?;
        let page = self.repository.find_page(&request).await?;
        Ok(page.map(|m| self.to_dto(m)).into())
    }

    pub async fn list_movies_page_sorted(
        &self,
        page_number: i32,
        page_size: i32,
        sort_by: &str,
        dir: &str,
    ) -> Result<MoviePageResponseDto> {
        let field = MovieSortField::parse(sort_by)?;
        let request = PageRequest::new(page_number, page_size)?
            .sorted_by(field, SortDirection::parse(dir));

        let page = self.repository.find_page(&request).await?;
        Ok(page.map(|m| self.to_dto(m)).into())
    }
}
