mod client;
mod types;

pub use client::{HttpUploadEndpoint, UploadEndpoint};
pub use types::{RenderedResult, SelectedFile, UploadResponse, MISSING_FILE_NOTICE};
