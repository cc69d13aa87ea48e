use std::collections::BTreeSet;

use sqlx::FromRow;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::shared::validation::not_blank;

/// Database model for a movie, with its cast aggregated from `movie_cast`
#[derive(Debug, Clone, FromRow)]
pub struct MovieRow {
    pub movie_id: i32,
    pub title: String,
    pub director: String,
    pub studio: String,
    pub release_year: String,
    pub poster: String,
    pub movie_cast: Vec<String>,
}

/// Persisted movie record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Movie {
    pub movie_id: i32,
    pub fields: MovieFields,
}

/// Everything about a movie except its identity.
///
/// Blank checks run right before the record is written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct MovieFields {
    #[validate(
        custom(function = "not_blank", message = "Please provide movie title"),
        length(max = 200, message = "Title must not exceed 200 characters")
    )]
    pub title: String,

    #[validate(custom(function = "not_blank", message = "Please provide movie's director"))]
    pub director: String,

    #[validate(custom(function = "not_blank", message = "Please provide movie's studio"))]
    pub studio: String,

    pub movie_cast: BTreeSet<String>,

    #[validate(custom(function = "not_blank", message = "Please provide movie's release year"))]
    pub release_year: String,

    #[validate(custom(function = "not_blank", message = "Please provide movie's poster"))]
    pub poster: String,
}

impl MovieFields {
    /// Run field constraints, mapping failures to a validation error
    pub fn ensure_valid(&self) -> Result<()> {
        self.validate()
            .map_err(|e| AppError::Validation(e.to_string()))
    }
}

impl From<MovieRow> for Movie {
    fn from(row: MovieRow) -> Self {
        Self {
            movie_id: row.movie_id,
            fields: MovieFields {
                title: row.title,
                director: row.director,
                studio: row.studio,
                movie_cast: row.movie_cast.into_iter().collect(),
                release_year: row.release_year,
                poster: row.poster,
            },
        }
    }
}

/// Properties a movie listing can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovieSortField {
    MovieId,
    Title,
    Director,
    Studio,
    ReleaseYear,
    Poster,
}

impl MovieSortField {
    /// Parse a property name as exposed in the JSON view (e.g. `releaseYear`)
    pub fn parse(name: &str) -> Result<Self> {
        match name {
            "movieId" => Ok(Self::MovieId),
            "title" => Ok(Self::Title),
            "director" => Ok(Self::Director),
            "studio" => Ok(Self::Studio),
            "releaseYear" => Ok(Self::ReleaseYear),
            "poster" => Ok(Self::Poster),
            _ => Err(AppError::BadRequest(format!(
                "No property '{}' found for type 'Movie'",
                name
            ))),
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            Self::MovieId => "m.movie_id",
            Self::Title => "m.title",
            Self::Director => "m.director",
            Self::Studio => "m.studio",
            Self::ReleaseYear => "m.release_year",
            Self::Poster => "m.poster",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_fields() -> MovieFields {
        MovieFields {
            title: "Inception".to_string(),
            director: "Nolan".to_string(),
            studio: "WB".to_string(),
            movie_cast: BTreeSet::from(["DiCaprio".to_string()]),
            release_year: "2010".to_string(),
            poster: "poster1.jpg".to_string(),
        }
    }

    #[test]
    fn test_valid_fields_pass() {
        assert!(valid_fields().ensure_valid().is_ok());
    }

    #[test]
    fn test_blank_fields_fail() {
        let mut fields = valid_fields();
        fields.director = "   ".to_string();
        let err = fields.ensure_valid().unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("director")));
    }

    #[test]
    fn test_empty_cast_is_allowed() {
        let mut fields = valid_fields();
        fields.movie_cast.clear();
        assert!(fields.ensure_valid().is_ok());
    }

    #[test]
    fn test_title_length_limit() {
        let mut fields = valid_fields();
        fields.title = "x".repeat(201);
        assert!(fields.ensure_valid().is_err());
    }

    #[test]
    fn test_sort_field_parse() {
        assert_eq!(
            MovieSortField::parse("releaseYear").unwrap(),
            MovieSortField::ReleaseYear
        );
        assert_eq!(MovieSortField::parse("movieId").unwrap().column(), "m.movie_id");
    }

    #[test]
    fn test_sort_field_rejects_unknown_and_collections() {
        for name in ["movieCast", "release_year", "'; DROP TABLE movies; --", ""] {
            assert!(matches!(
                MovieSortField::parse(name),
                Err(AppError::BadRequest(_))
            ));
        }
    }
}
