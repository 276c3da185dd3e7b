use bytes::Bytes;

/// A saved file body together with the name and type it was uploaded with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredContent {
    /// File name at upload time.
    pub name: String,
    /// MIME type reported at upload time (may be empty).
    pub mime_type: String,
    /// Raw bytes.
    pub data: Bytes,
}

impl StoredContent {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// Size of the body in bytes. This is what counts against the quota.
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}
