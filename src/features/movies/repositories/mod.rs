mod movie_repository;

pub use movie_repository::{MovieRepository, PgMovieRepository};
