pub mod error;
pub mod file;
pub mod media;
pub mod request;
pub mod response;

pub use error::CoreError;
pub use file::{FileSelection, SelectedFile};
pub use request::{FilePart, UploadRequest, FILE_FIELD, UPLOAD_PATH};
pub use response::UploadResponse;
