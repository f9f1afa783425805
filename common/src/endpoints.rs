//! バックエンドのURL組み立て

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// パスセグメントでそのまま使える文字（RFC 3986 unreserved）以外をエンコードする
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// 既定のバックエンドURL
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, PartialEq)]
pub struct Endpoints {
    base_url: String,
}

impl Endpoints {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let trimmed = base_url.trim().trim_end_matches('/');
        let base_url = if trimmed.is_empty() {
            DEFAULT_BASE_URL.to_string()
        } else {
            trimmed.to_string()
        };
        Self { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn upload_face(&self) -> String {
        format!("{}/upload-face", self.base_url)
    }

    pub fn recognize(&self) -> String {
        format!("{}/recognize", self.base_url)
    }

    /// `<img src>` にもそのまま使える
    pub fn face_image(&self, id: &str) -> String {
        format!(
            "{}/faces/{}/image",
            self.base_url,
            utf8_percent_encode(id, PATH_SEGMENT)
        )
    }

    pub fn faces(&self, page: u32, page_size: u32) -> String {
        format!(
            "{}/faces?page={}&pageSize={}",
            self.base_url, page, page_size
        )
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
