//! Stored images

use core_kernel::ImageId;

use crate::error::CatalogError;

/// Content type recorded when an upload does not declare one
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// An uploaded file, read fully into memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl ImageUpload {
    pub fn new(name: impl Into<String>, content_type: Option<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string()),
            data,
        }
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.name.trim().is_empty() {
            return Err(CatalogError::validation("file name must not be blank"));
        }
        if self.data.is_empty() {
            return Err(CatalogError::validation("file must not be empty"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub id: ImageId,
    pub name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl Image {
    pub fn from_upload(id: ImageId, upload: ImageUpload) -> Self {
        Self {
            id,
            name: upload.name,
            content_type: upload.content_type,
            data: upload.data,
        }
    }

    /// Replaces name, content type and bytes
    pub fn replace(&mut self, upload: ImageUpload) {
        self.name = upload.name;
        self.content_type = upload.content_type;
        self.data = upload.data;
    }
}
