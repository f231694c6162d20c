use serde_json::Value;

/// A decoded server reply. The body is kept as an untyped JSON value; nothing
/// in it is inspected.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadResponse {
    pub status: u16,
    pub body: Value,
}

impl UploadResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    pub fn into_body(self) -> Value {
        self.body
    }
}
