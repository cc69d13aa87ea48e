use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::info;

use crate::core::error::{AppError, Result};
use crate::features::movies::models::{Movie, MovieFields, MovieRow, MovieSortField};
use crate::shared::types::{Page, PageRequest};

/// Storage seam for movie records
#[async_trait]
pub trait MovieRepository: Send + Sync {
    async fn find_by_id(&self, movie_id: i32) -> Result<Option<Movie>>;

    /// Every movie, in identity order
    async fn find_all(&self) -> Result<Vec<Movie>>;

    async fn find_page(&self, request: &PageRequest<MovieSortField>) -> Result<Page<Movie>>;

    /// Insert a new record, assigning its identity
    async fn insert(&self, fields: &MovieFields) -> Result<Movie>;

    /// Overwrite every field of an existing record; `None` if it is gone
    async fn replace(&self, movie_id: i32, fields: &MovieFields) -> Result<Option<Movie>>;

    async fn delete(&self, movie_id: i32) -> Result<()>;
}

/// Postgres-backed movie repository (`movies` + `movie_cast`)
pub struct PgMovieRepository {
    pool: PgPool,
}

const SELECT_MOVIES: &str = r#"
    SELECT m.movie_id, m.title, m.director, m.studio, m.release_year, m.poster,
           COALESCE(
               array_agg(c.cast_member::text ORDER BY c.cast_member)
                   FILTER (WHERE c.cast_member IS NOT NULL),
               '{}'::text[]
           ) AS movie_cast
    FROM movies m
    LEFT JOIN movie_cast c ON c.movie_id = m.movie_id
"#;

impl PgMovieRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn write_cast(
        tx: &mut Transaction<'_, Postgres>,
        movie_id: i32,
        fields: &MovieFields,
    ) -> Result<()> {
        if fields.movie_cast.is_empty() {
            return Ok(());
        }

        let cast: Vec<String> = fields.movie_cast.iter().cloned().collect();
        sqlx::query(
            r#"
            INSERT INTO movie_cast (movie_id, cast_member)
            SELECT $1, member FROM UNNEST($2::text[]) AS member
            "#,
        )
        .bind(movie_id)
        .bind(&cast)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl MovieRepository for PgMovieRepository {
    async fn find_by_id(&self, movie_id: i32) -> Result<Option<Movie>> {
        let sql = format!("{SELECT_MOVIES} WHERE m.movie_id = $1 GROUP BY m.movie_id");

        let row = sqlx::query_as::<_, MovieRow>(&sql)
            .bind(movie_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get movie by id: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(row.map(Movie::from))
    }

    async fn find_all(&self) -> Result<Vec<Movie>> {
        let sql = format!("{SELECT_MOVIES} GROUP BY m.movie_id ORDER BY m.movie_id");

        let rows = sqlx::query_as::<_, MovieRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list movies: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(rows.into_iter().map(Movie::from).collect())
    }

    async fn find_page(&self, request: &PageRequest<MovieSortField>) -> Result<Page<Movie>> {
        // Column names come from the MovieSortField whitelist, never from input
        let order_by = match request.sort() {
            Some((field, direction)) => format!(
                "{} {}, m.movie_id {}",
                field.column(),
                direction.as_sql(),
                direction.as_sql()
            ),
            None => "m.movie_id".to_string(),
        };
        let sql = format!(
            "{SELECT_MOVIES} GROUP BY m.movie_id ORDER BY {order_by} LIMIT $1 OFFSET $2"
        );

        // One snapshot for the rows and the total
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ READ ONLY")
            .execute(&mut *tx)
            .await?;

        let rows = sqlx::query_as::<_, MovieRow>(&sql)
            .bind(request.limit())
            .bind(request.offset())
            .fetch_all(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list movie page: {:?}", e);
                AppError::Database(e)
            })?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM movies")
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count movies: {:?}", e);
                AppError::Database(e)
            })?;
        tx.commit().await?;

        Ok(Page::new(
            rows.into_iter().map(Movie::from).collect(),
            request,
            total,
        ))
    }

    async fn insert(&self, fields: &MovieFields) -> Result<Movie> {
        let mut tx = self.pool.begin().await?;

        let movie_id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO movies (title, director, studio, release_year, poster)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING movie_id
            "#,
        )
        .bind(&fields.title)
        .bind(&fields.director)
        .bind(&fields.studio)
        .bind(&fields.release_year)
        .bind(&fields.poster)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert movie: {:?}", e);
            AppError::Database(e)
        })?;

        Self::write_cast(&mut tx, movie_id, fields).await?;
        tx.commit().await?;

        info!("Movie created: id={}, title={}", movie_id, fields.title);

        Ok(Movie {
            movie_id,
            fields: fields.clone(),
        })
    }

    async fn replace(&self, movie_id: i32, fields: &MovieFields) -> Result<Option<Movie>> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            r#"
            UPDATE movies
            SET title = $2, director = $3, studio = $4, release_year = $5, poster = $6
            WHERE movie_id = $1
            "#,
        )
        .bind(movie_id)
        .bind(&fields.title)
        .bind(&fields.director)
        .bind(&fields.studio)
        .bind(&fields.release_year)
        .bind(&fields.poster)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update movie: {:?}", e);
            AppError::Database(e)
        })?
        .rows_affected();

        if updated == 0 {
            return Ok(None);
        }

        sqlx::query("DELETE FROM movie_cast WHERE movie_id = $1")
            .bind(movie_id)
            .execute(&mut *tx)
            .await?;
        Self::write_cast(&mut tx, movie_id, fields).await?;
        tx.commit().await?;

        info!("Movie updated: id={}", movie_id);

        Ok(Some(Movie {
            movie_id,
            fields: fields.clone(),
        }))
    }

    async fn delete(&self, movie_id: i32) -> Result<()> {
        // movie_cast rows go with the movie (ON DELETE CASCADE)
        sqlx::query("DELETE FROM movies WHERE movie_id = $1")
            .bind(movie_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete movie: {:?}", e);
                AppError::Database(e)
            })?;

        info!("Movie deleted: id={}", movie_id);
        Ok(())
    }
}
