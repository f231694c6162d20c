use std::path::Path;

use bytes::Bytes;
use mime::Mime;

use crate::media::guess_media_type;
use crate::CoreError;

/// A file picked by the user: a name, the media type the picker reports and
/// the raw contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    name: String,
    media_type: Mime,
    data: Bytes,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        let name = name.into();
        let media_type = guess_media_type(&name);
        Self {
            name,
            media_type,
            data: data.into(),
        }
    }

    pub fn with_media_type(mut self, media_type: Mime) -> Self {
        self.media_type = media_type;
        self
    }

    /// Load a file from disk, keeping only its final path component as name.
    pub fn read(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();
        if !std::fs::metadata(path)?.is_file() {
            return Err(CoreError::NotAFile(path.to_path_buf()));
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| CoreError::MissingFileName(path.to_path_buf()))?;
        let data = std::fs::read(path)?;
        Ok(Self::new(name, data))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn media_type(&self) -> &Mime {
        &self.media_type
    }

    pub fn data(&self) -> &Bytes {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// The current contents of a file-input control. May be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSelection {
    files: Vec<SelectedFile>,
}

impl FileSelection {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Read every path in order. Fails on the first unreadable entry.
    pub fn read_all<P: AsRef<Path>>(paths: &[P]) -> Result<Self, CoreError> {
        paths.iter().map(SelectedFile::read).collect()
    }

    pub fn first(&self) -> Option<&SelectedFile> {
        self.files.first()
    }

    pub fn files(&self) -> &[SelectedFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl From<Vec<SelectedFile>> for FileSelection {
    fn from(files: Vec<SelectedFile>) -> Self {
        Self { files }
    }
}

impl FromIterator<SelectedFile> for FileSelection {
    fn from_iter<I: IntoIterator<Item = SelectedFile>>(iter: I) -> Self {
        Self {
            files: iter.into_iter().collect(),
        }
    }
}
