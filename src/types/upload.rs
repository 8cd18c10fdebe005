use bytes::Bytes;
use std::fmt::{self, Debug, Formatter};

/// A file to be uploaded.
///
/// **Reference:** <https://github.com/jaydenseric/graphql-multipart-request-spec>
///
/// Place an `Upload` (single file) or a `Vec<Upload>` (multiple files) anywhere inside the
/// variables of an operation. The client moves the content into a form part of the multipart
/// request and leaves a `null` placeholder at its position in `variables`.
///
/// The content is held in [`Bytes`](https://docs.rs/bytes), so cloning an upload does not copy
/// the file.
///
/// # Example
///
/// ```
/// use graphql_multipart_client::*;
///
/// let icon =
///     Upload::new("icon.png", vec![0x89u8, 0x50, 0x4e, 0x47]).with_content_type("image/png");
/// assert_eq!(icon.filename(), "icon.png");
/// assert_eq!(icon.content_type(), Some("image/png"));
/// assert_eq!(icon.len(), 4);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Upload {
    filename: String,
    content_type: Option<String>,
    content: Bytes,
}

impl Upload {
    /// Create an upload from a filename and its content.
    pub fn new(filename: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            filename: filename.into(),
            content_type: None,
            content: content.into(),
        }
    }

    /// Set the MIME type sent with the file part.
    #[must_use]
    pub fn with_content_type(self, content_type: impl Into<String>) -> Self {
        Self {
            content_type: Some(content_type.into()),
            ..self
        }
    }

    /// Filename of the file.
    #[inline]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// MIME type of the file, if known.
    #[inline]
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Content of the file.
    #[inline]
    pub fn content(&self) -> &Bytes {
        &self.content
    }

    /// Size of the content in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Returns `true` if the file is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

// The content is omitted, it can be arbitrarily large.
impl Debug for Upload {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Upload")
            .field("filename", &self.filename)
            .field("content_type", &self.content_type)
            .field("len", &self.content.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_debug_hides_content() {
        let upload = Upload::new("a.txt", "secret").with_content_type("text/plain");
        let debug = format!("{:?}", upload);
        assert_eq!(
            debug,
            r#"Upload { filename: "a.txt", content_type: Some("text/plain"), len: 6 }"#
        );
    }

    #[test]
    fn test_upload_clone_shares_content() {
        let upload = Upload::new("a.bin", vec![1u8, 2, 3]);
        let cloned = upload.clone();
        assert_eq!(upload.content().as_ptr(), cloned.content().as_ptr());
        assert_eq!(cloned, upload);
        assert!(!cloned.is_empty());
    }
}
