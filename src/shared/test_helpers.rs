use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Bytes;
use tempfile::TempDir;
use tokio::sync::RwLock;

use crate::core::config::StorageConfig;
use crate::core::error::Result;
use crate::features::movies::dtos::MovieRequestDto;
use crate::features::movies::models::{Movie, MovieFields, MovieSortField};
use crate::features::movies::repositories::MovieRepository;
use crate::features::movies::MovieService;
use crate::modules::storage::LocalFileStore;
use crate::shared::types::{Page, PageRequest, SortDirection, UploadedFile};

pub const TEST_BASE_URL: &str = "http://localhost:8080";

/// Movie repository backed by a map, for tests that don't need Postgres
#[derive(Default)]
pub struct InMemoryMovieRepository {
    movies: RwLock<BTreeMap<i32, MovieFields>>,
    next_id: RwLock<i32>,
}

impl InMemoryMovieRepository {
    pub async fn count(&self) -> usize {
        self.movies.read().await.len()
    }
}

fn compare(a: &Movie, b: &Movie, field: MovieSortField) -> Ordering {
    let (x, y) = (&a.fields, &b.fields);
    match field {
        MovieSortField::MovieId => a.movie_id.cmp(&b.movie_id),
        MovieSortField::Title => x.title.cmp(&y.title),
        MovieSortField::Director => x.director.cmp(&y.director),
        MovieSortField::Studio => x.studio.cmp(&y.studio),
        MovieSortField::ReleaseYear => x.release_year.cmp(&y.release_year),
        MovieSortField::Poster => x.poster.cmp(&y.poster),
    }
    .then(a.movie_id.cmp(&b.movie_id))
}

#[async_trait]
impl MovieRepository for InMemoryMovieRepository {
    async fn find_by_id(&self, movie_id: i32) -> Result<Option<Movie>> {
        Ok(self
            .movies
            .read()
            .await
            .get(&movie_id)
            .map(|fields| Movie {
                movie_id,
                fields: fields.clone(),
            }))
    }

    async fn find_all(&self) -> Result<Vec<Movie>> {
        Ok(self
            .movies
            .read()
            .await
            .iter()
            .map(|(id, fields)| Movie {
                movie_id: *id,
                fields: fields.clone(),
            })
            .collect())
    }

    async fn find_page(&self, request: &PageRequest<MovieSortField>) -> Result<Page<Movie>> {
        let mut all = self.find_all().await?;
        if let Some((field, direction)) = request.sort() {
            all.sort_by(|a, b| {
                let ord = compare(a, b, *field);
                match direction {
                    SortDirection::Asc => ord,
                    SortDirection::Desc => ord.reverse(),
                }
            });
        }

        let total = all.len() as i64;
        let content = all
            .into_iter()
            .skip(request.offset() as usize)
            .take(request.limit() as usize)
            .collect();
        Ok(Page::new(content, request, total))
    }

    async fn insert(&self, fields: &MovieFields) -> Result<Movie> {
        let mut next_id = self.next_id.write().await;
        *next_id += 1;
        let movie_id = *next_id;

        self.movies.write().await.insert(movie_id, fields.clone());
        Ok(Movie {
            movie_id,
            fields: fields.clone(),
        })
    }

    async fn replace(&self, movie_id: i32, fields: &MovieFields) -> Result<Option<Movie>> {
        let mut movies = self.movies.write().await;
        match movies.get_mut(&movie_id) {
            Some(existing) => {
                *existing = fields.clone();
                Ok(Some(Movie {
                    movie_id,
                    fields: fields.clone(),
                }))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, movie_id: i32) -> Result<()> {
        self.movies.write().await.remove(&movie_id);
        Ok(())
    }
}

/// Movie service over an in-memory repository and a throwaway poster directory
pub struct TestContext {
    pub service: Arc<MovieService>,
    pub repository: Arc<InMemoryMovieRepository>,
    pub store: Arc<LocalFileStore>,
    _dir: TempDir,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_poster_cleanup(false)
    }

    pub fn with_poster_cleanup(remove_replaced_poster: bool) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let config = StorageConfig::new(dir.path(), TEST_BASE_URL, remove_replaced_poster);

        let repository = Arc::new(InMemoryMovieRepository::default());
        let store = Arc::new(LocalFileStore::new(config.poster_dir.clone()));
        let service = Arc::new(MovieService::new(
            repository.clone(),
            store.clone(),
            &config,
        ));

        Self {
            service,
            repository,
            store,
            _dir: dir,
        }
    }
}

pub fn upload(name: &str, data: &[u8]) -> UploadedFile {
    UploadedFile {
        file_name: name.to_string(),
        content_type: Some("image/jpeg".to_string()),
        data: Bytes::copy_from_slice(data),
    }
}

pub fn inception() -> MovieRequestDto {
    MovieRequestDto {
        title: "Inception".to_string(),
        director: "Nolan".to_string(),
        studio: "WB".to_string(),
        movie_cast: ["DiCaprio".to_string()].into_iter().collect(),
        release_year: "2010".to_string(),
        ..Default::default()
    }
}
