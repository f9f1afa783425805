//! ファイルからキャプチャを読み込む

use crate::error::{FaceClientError, Result};
use face_client_common::{mime_for_filename, RawCapture};
use std::path::Path;

/// 画像ファイルを読み込む（MIMEタイプは拡張子から推定）
pub fn read_image_file(path: &Path) -> Result<RawCapture> {
    if !path.is_file() {
        return Err(FaceClientError::MissingInput(format!(
            "画像ファイルが見つかりません: {}",
            path.display()
        )));
    }

    let bytes = std::fs::read(path)?;
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "image.jpg".to_string());
    let mime_type = mime_for_filename(&filename).to_string();

    Ok(RawCapture::File {
        bytes,
        filename,
        mime_type,
    })
}

/// Data URLを保存したテキストファイルを読み込む
pub fn read_snapshot_file(path: &Path) -> Result<RawCapture> {
    if !path.is_file() {
        return Err(FaceClientError::MissingInput(format!(
            "スナップショットファイルが見つかりません: {}",
            path.display()
        )));
    }

    let data_url = std::fs::read_to_string(path)?.trim().to_string();
    Ok(RawCapture::Snapshot { data_url })
}

/// `--image` / `--snapshot` のどちらか一方を読み込む
pub fn read_capture(image: Option<&Path>, snapshot: Option<&Path>) -> Result<RawCapture> {
    match (image, snapshot) {
        (Some(path), None) => read_image_file(path),
        (None, Some(path)) => read_snapshot_file(path),
        (Some(_), Some(_)) => Err(FaceClientError::MissingInput(
            "--image と --snapshot は同時に指定できません".to_string(),
        )),
        (None, None) => Err(FaceClientError::MissingInput(
            "--image または --snapshot を指定してください".to_string(),
        )),
    }
}
