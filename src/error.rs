use thiserror::Error;

#[derive(Error, Debug)]
pub enum FaceClientError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("入力が不足しています: {0}")]
    MissingInput(String),

    #[error("{0}")]
    Workflow(String),

    #[error(transparent)]
    Common(#[from] face_client_common::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FaceClientError>;
