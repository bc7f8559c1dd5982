//! Content-store uploads.

mod upload;

pub use upload::{Uploader, collect_input_files};
