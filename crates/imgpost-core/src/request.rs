use crate::file::{FileSelection, SelectedFile};

/// Name of the single multipart field carrying the upload.
pub const FILE_FIELD: &str = "file";

/// Path the upload is posted to, relative to the server base URL.
pub const UPLOAD_PATH: &str = "/api/image_upload";

/// Contents of the `file` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilePart {
    Present(SelectedFile),
    /// Nothing was selected. The field is still sent, as the text value `""`
    /// rather than the literal `"undefined"` a browser form would carry.
    Missing,
}

/// One multipart body, built fresh for every submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    part: FilePart,
}

impl UploadRequest {
    /// Attach the first entry of `selection`. Any further entries are ignored
    /// and an empty selection is passed through as [`FilePart::Missing`].
    pub fn from_selection(selection: &FileSelection) -> Self {
        let part = match selection.first() {
            Some(file) => FilePart::Present(file.clone()),
            None => FilePart::Missing,
        };
        Self { part }
    }

    pub fn field(&self) -> &'static str {
        FILE_FIELD
    }

    pub fn part(&self) -> &FilePart {
        &self.part
    }

    pub fn file(&self) -> Option<&SelectedFile> {
        match &self.part {
            FilePart::Present(file) => Some(file),
            FilePart::Missing => None,
        }
    }

    pub fn into_part(self) -> FilePart {
        self.part
    }
}
