mod movie;

pub use movie::{Movie, MovieFields, MovieRow, MovieSortField};
