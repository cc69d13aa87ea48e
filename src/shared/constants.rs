/// Default page index for paged listings (zero-based)
pub const DEFAULT_PAGE_NUMBER: i32 = 0;

/// Default page size for paged listings
pub const DEFAULT_PAGE_SIZE: i32 = 10;

/// Default sort property for sorted listings
pub const DEFAULT_SORT_BY: &str = "movieId";

/// Default sort direction for sorted listings
pub const DEFAULT_SORT_DIR: &str = "asc";

/// Path prefix under which stored posters are served
pub const POSTER_PATH_PREFIX: &str = "/file/";

/// Content type reported for every served poster
pub const POSTER_CONTENT_TYPE: &str = "image/jpeg";
