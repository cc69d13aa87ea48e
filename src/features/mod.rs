pub mod files;
pub mod movies;
