mod movie_dto;

pub use movie_dto::{
    AddMovieFormDto, MoviePageQuery, MoviePageResponseDto, MoviePageSortQuery, MovieRequestDto,
    MovieResponseDto, UpdateMovieFormDto,
};
