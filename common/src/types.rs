//! 顔認識クライアントの型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - RawCapture: ファイル選択またはWebカメラのスナップショット
//! - NormalizedImage: 送信用に正規化された画像
//! - EnrollResponse / RecognitionResult / FaceRecord: バックエンドのレスポンス
//! - GalleryPage: ギャラリー1ページ分

use serde::{Deserialize, Serialize};

/// ギャラリーの1ページあたりの件数（固定）
pub const PAGE_SIZE: u32 = 20;

/// ユーザー操作で得られた未加工の画像
#[derive(Debug, Clone, PartialEq)]
pub enum RawCapture {
    /// ファイル選択で得た画像（メタデータはファイル側のもの）
    File {
        bytes: Vec<u8>,
        filename: String,
        mime_type: String,
    },
    /// `data:<mime>;base64,<payload>` 形式のスナップショット
    Snapshot { data_url: String },
}

impl RawCapture {
    /// プレビュー表示用のラベル
    pub fn display_name(&self) -> &str {
        match self {
            RawCapture::File { filename, .. } => filename,
            RawCapture::Snapshot { .. } => "webcam capture",
        }
    }
}

/// 送信用の画像（名前とMIMEタイプ付きバイト列）
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedImage {
    pub bytes: Vec<u8>,
    pub mime_type: String,
    pub filename: String,
}

/// `POST /upload-face` のレスポンス
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrollResponse {
    pub id: String,
    pub filename: String,
    pub label: String,
    pub message: String,
}

/// 登録済みの顔
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceRecord {
    pub id: String,
    pub filename: String,
    pub label: String,

    /// ISO-8601（バックエンドの値をそのまま保持）
    #[serde(default)]
    pub created_at: String,

    /// 一覧APIでは省略される
    #[serde(default)]
    pub feature_vector: Vec<f64>,
}

/// `POST /recognize` のレスポンス
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognitionResult {
    pub cosine_similarity: f64,

    #[serde(default)]
    pub cosine_distance: f64,

    #[serde(default)]
    pub search_vector: Vec<f64>,

    /// `None` は「一致なし」（エラーではない）
    #[serde(default)]
    pub matched_record: Option<FaceRecord>,
}

/// 認識結果の表示分岐
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchOutcome<'a> {
    Matched(&'a FaceRecord),
    NoMatch,
}

impl RecognitionResult {
    pub fn outcome(&self) -> MatchOutcome<'_> {
        match &self.matched_record {
            Some(record) => MatchOutcome::Matched(record),
            None => MatchOutcome::NoMatch,
        }
    }

    /// 類似度を整数パーセントで返す（0.92 → 92）
    pub fn similarity_percent(&self) -> i64 {
        (self.cosine_similarity * 100.0).round() as i64
    }
}

/// `GET /faces` のレスポンス
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceListResponse {
    pub faces: Vec<FaceRecord>,

    /// 古いバックエンドは件数を返さない
    #[serde(default)]
    pub count: Option<u64>,
}

/// `GET /faces/{id}/image` のレスポンス
#[derive(Debug, Clone, PartialEq)]
pub struct FaceImage {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// ギャラリー1ページ分（ページ番号は1始まり）
#[derive(Debug, Clone, PartialEq)]
pub struct GalleryPage {
    pub faces: Vec<FaceRecord>,
    pub total_count: u64,
    pub page_index: u32,
    pub page_size: u32,
}

impl GalleryPage {
    pub fn total_pages(&self) -> u32 {
        total_pages(self.total_count, self.page_size)
    }
}

/// `ceil(total_count / page_size)`、page_sizeが0なら0（u32に収まらなければ飽和）
pub fn total_pages(total_count: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    u32::try_from(total_count.div_ceil(u64::from(page_size))).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_saturates() {
        assert_eq!(total_pages(45, 20), 3);
        assert_eq!(total_pages(u64::MAX, 1), u32::MAX);
        assert_eq!(total_pages(u64::from(u32::MAX) * 20 + 1, 20), u32::MAX);
    }

    #[test]
    fn test_recognition_result_null_match() {
        let json = r#"{"cosine_similarity": 0.92, "matched_record": null}"#;
        let result: RecognitionResult = serde_json::from_str(json).unwrap();

        assert_eq!(result.outcome(), MatchOutcome::NoMatch);
        assert_eq!(result.cosine_distance, 0.0);
        assert!(result.search_vector.is_empty());
    }

    #[test]
    fn test_recognition_result_with_match() {
        let json = r#"{
            "cosine_similarity": 0.874,
            "cosine_distance": 0.126,
            "search_vector": [0.1, 0.2],
            "matched_record": {
                "id": "0b7c",
                "filename": "alice.jpg",
                "label": "alice",
                "created_at": "2024-05-01T12:00:00",
                "feature_vector": [0.1, 0.25]
            }
        }"#;
        let result: RecognitionResult = serde_json::from_str(json).unwrap();

        match result.outcome() {
            MatchOutcome::Matched(record) => {
                assert_eq!(record.label, "alice");
                assert_eq!(record.feature_vector.len(), 2);
            }
            MatchOutcome::NoMatch => panic!("expected a match"),
        }
        assert_eq!(result.similarity_percent(), 87);
    }

    #[test]
    fn test_face_record_without_feature_vector() {
        let json = r#"{"id": "1", "filename": "a.jpg", "label": "a", "created_at": "2024-01-01T00:00:00"}"#;
        let record: FaceRecord = serde_json::from_str(json).unwrap();
        assert!(record.feature_vector.is_empty());
    }

    #[test]
    fn test_face_list_without_count() {
        let list: FaceListResponse = serde_json::from_str(r#"{"faces": []}"#).unwrap();
        assert_eq!(list.count, None);
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(45, 20), 3);
        assert_eq!(total_pages(40, 20), 2);
        assert_eq!(total_pages(0, 20), 0);
        assert_eq!(total_pages(1, 20), 1);
        assert_eq!(total_pages(10, 0), 0);
    }

    #[test]
    fn test_display_name() {
        let file = RawCapture::File {
            bytes: vec![1],
            filename: "bob.png".to_string(),
            mime_type: "image/png".to_string(),
        };
        assert_eq!(file.display_name(), "bob.png");

        let snapshot = RawCapture::Snapshot { data_url: String::new() };
        assert_eq!(snapshot.display_name(), "webcam capture");
    }
}
