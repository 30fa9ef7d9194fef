//! Media value types

use serde::{Deserialize, Serialize};

/// Logical folder an asset is stored under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaFolder {
    Images,
    Pdfs,
}

impl MediaFolder {
    pub fn segment(&self) -> &'static str {
        match self {
            MediaFolder::Images => "images",
            MediaFolder::Pdfs => "pdfs",
        }
    }

    /// Resource type used on upload (`auto` lets the host detect PDFs)
    pub fn upload_resource_type(&self) -> &'static str {
        match self {
            MediaFolder::Images => "image",
            MediaFolder::Pdfs => "auto",
        }
    }

    /// MIME type assumed for bare base64 payloads
    fn default_mime(&self) -> &'static str {
        match self {
            MediaFolder::Images => "image/png",
            MediaFolder::Pdfs => "application/pdf",
        }
    }

    /// `{root}/{segment}`
    pub fn path(&self, root: &str) -> String {
        let root = root.trim_matches('/');
        if root.is_empty() {
            self.segment().to_string()
        } else {
            format!("{}/{}", root, self.segment())
        }
    }
}

/// Content to upload: a data URI, a remote URL, or bare base64
#[derive(Clone, PartialEq, Eq)]
pub struct MediaPayload(String);

impl MediaPayload {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Value for the upload `file` field
    ///
    /// Data URIs and http(s) URLs pass through; anything else is taken as
    /// bare base64 and wrapped in a data URI for `folder`.
    pub fn as_upload_field(&self, folder: MediaFolder) -> String {
        let raw = self.0.trim();
        if raw.starts_with("data:") || raw.starts_with("http://") || raw.starts_with("https://") {
            raw.to_string()
        } else {
            format!("data:{};base64,{}", folder.default_mime(), raw)
        }
    }
}

impl std::fmt::Debug for MediaPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Payloads can be megabytes of base64.
        write!(f, "MediaPayload({} bytes)", self.0.len())
    }
}

/// Opaque handle that deletes an uploaded asset
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MediaHandle {
    /// Full public id including folder, e.g. `Readsy/images/abc123`
    pub public_id: String,
    /// Stored resource type (`image`, `raw` or `video`)
    pub resource_type: String,
}

impl MediaHandle {
    pub fn new(public_id: impl Into<String>, resource_type: impl Into<String>) -> Self {
        Self {
            public_id: public_id.into(),
            resource_type: resource_type.into(),
        }
    }

    /// Recover a handle from a delivery URL for rows stored without one
    ///
    /// Takes the last path segment without its extension and prefixes the
    /// folder path. The resource type is read from the URL when it has the
    /// `/{resource_type}/upload/` shape, otherwise `image` is assumed.
    pub fn derive_from_url(url: &str, folder: MediaFolder, root: &str) -> Option<Self> {
        let path = url.split(['?', '#']).next().unwrap_or_default();
        let last = path.rsplit('/').next()?.trim();
        let stem = match last.rsplit_once('.') {
            Some((stem, _)) => stem,
            None => last,
        };
        if stem.is_empty() {
            return None;
        }

        let segments: Vec<&str> = path.split('/').collect();
        let resource_type = segments
            .windows(2)
            .find(|pair| pair[1] == "upload" && matches!(pair[0], "image" | "raw" | "video"))
            .map(|pair| pair[0])
            .unwrap_or("image");

        Some(Self::new(
            format!("{}/{}", folder.path(root), stem),
            resource_type,
        ))
    }
}

/// Result of a successful upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedAsset {
    pub url: String,
    pub handle: MediaHandle,
}
