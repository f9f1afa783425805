//! エラー型定義

use thiserror::Error;

/// 共通エラー型
///
/// どのバリアントもワークフローコントローラで1つのメッセージ文字列に変換される。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// 必須項目の欠落（ネットワーク呼び出し前に検出）
    #[error("{0}")]
    Validation(String),

    /// キャプチャデータの復号失敗
    #[error("Invalid image data: {0}")]
    Decode(String),

    /// 接続失敗、またはボディを解釈できない非2xxレスポンス
    #[error("{0}")]
    Transport(String),

    /// 非2xxレスポンスの `detail` メッセージ
    #[error("{0}")]
    Remote(String),

    #[error("Request cancelled")]
    Cancelled,
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_displays_detail_verbatim() {
        let error = Error::Remote("db down".to_string());
        assert_eq!(error.to_string(), "db down");
    }

    #[test]
    fn test_decode_display() {
        let error = Error::Decode("Invalid symbol 33, offset 0.".to_string());
        let display = format!("{}", error);
        assert!(display.starts_with("Invalid image data"));
        assert!(display.contains("offset 0"));
    }

    #[test]
    fn test_validation_display() {
        let error = Error::Validation("Label is required".to_string());
        assert_eq!(error.to_string(), "Label is required");
    }

    #[test]
    fn test_error_debug() {
        let error = Error::Transport("Upload failed".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("Transport"));
        assert!(debug.contains("Upload failed"));
    }
}
