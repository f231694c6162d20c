use std::path::Path;

use mime::Mime;

/// Guess the media type a file picker would report for `name`.
///
/// Unknown extensions fall back to `application/octet-stream`.
pub fn guess_media_type(name: impl AsRef<Path>) -> Mime {
    mime_guess::from_path(name).first_or(mime::APPLICATION_OCTET_STREAM)
}
