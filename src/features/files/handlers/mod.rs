pub mod file_handler;

pub use file_handler::{__path_serve_file, __path_upload_file, serve_file, upload_file};
