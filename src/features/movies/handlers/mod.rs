pub mod movie_handler;

pub use movie_handler::{
    __path_add_movie, __path_delete_movie, __path_get_movie, __path_list_movies,
    __path_list_movies_page, __path_list_movies_page_sorted, __path_update_movie, add_movie,
    delete_movie, get_movie, list_movies, list_movies_page, list_movies_page_sorted, update_movie,
};
