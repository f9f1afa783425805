//! キャプチャ正規化モジュール
//!
//! ファイル選択・Webカメラのどちらで得た画像も `NormalizedImage` に変換する。
//! Data URLの復号はここだけで行う。

use crate::error::{Error, Result};
use crate::types::{NormalizedImage, RawCapture};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// ヘッダが無い・壊れている場合のMIMEタイプ
pub const DEFAULT_MIME_TYPE: &str = "image/jpeg";

/// スナップショットのファイル名プレフィックス
pub const SNAPSHOT_PREFIX: &str = "webcam-capture";

const MIME_EXTENSIONS: &[(&str, &str)] = &[
    ("image/jpeg", "jpg"),
    ("image/png", "png"),
    ("image/webp", "webp"),
    ("image/gif", "gif"),
    ("image/bmp", "bmp"),
];

/// RawCaptureを正規化する
///
/// # Arguments
/// * `capture` - 未加工のキャプチャ
/// * `stamp` - スナップショットのファイル名に使うタイムスタンプ（ミリ秒）
pub fn normalize(capture: RawCapture, stamp: u64) -> Result<NormalizedImage> {
    match capture {
        RawCapture::File {
            bytes,
            filename,
            mime_type,
        } => {
            if bytes.is_empty() {
                return Err(Error::Decode(format!("{} is empty", filename)));
            }
            let mime_type = if mime_type.trim().is_empty() {
                DEFAULT_MIME_TYPE.to_string()
            } else {
                mime_type
            };
            Ok(NormalizedImage {
                bytes,
                mime_type,
                filename,
            })
        }
        RawCapture::Snapshot { data_url } => {
            let (mime_type, bytes) = decode_data_url(&data_url)?;
            let filename = snapshot_filename(stamp, &mime_type);
            Ok(NormalizedImage {
                bytes,
                mime_type,
                filename,
            })
        }
    }
}

/// Data URLをMIMEタイプとバイト列に分解する
///
/// `,` が無い場合は文字列全体をペイロードとみなす。
pub fn decode_data_url(data_url: &str) -> Result<(String, Vec<u8>)> {
    let (header, payload) = match data_url.split_once(',') {
        Some((header, payload)) => (Some(header), payload),
        None => (None, data_url),
    };

    let mime_type = header
        .and_then(mime_type_from_header)
        .unwrap_or(DEFAULT_MIME_TYPE)
        .to_string();

    if payload.is_empty() {
        return Err(Error::Decode("empty payload".to_string()));
    }

    let bytes = STANDARD
        .decode(payload)
        .map_err(|e| Error::Decode(e.to_string()))?;

    if bytes.is_empty() {
        return Err(Error::Decode("empty payload".to_string()));
    }

    Ok((mime_type, bytes))
}

/// `data:<type>/<subtype>[;...]` からMIMEタイプを取り出す
pub fn mime_type_from_header(header: &str) -> Option<&str> {
    let rest = header.strip_prefix("data:")?;
    let mime = rest.split(';').next()?.trim();
    match mime.split_once('/') {
        Some((kind, subtype)) if !kind.is_empty() && !subtype.is_empty() => Some(mime),
        _ => None,
    }
}

/// MIMEタイプに対応する拡張子（不明なら `jpg`）
pub fn extension_for_mime(mime_type: &str) -> &'static str {
    MIME_EXTENSIONS
        .iter()
        .find(|(mime, _)| mime.eq_ignore_ascii_case(mime_type))
        .map(|(_, ext)| *ext)
        .unwrap_or("jpg")
}

/// ファイル名の拡張子からMIMEタイプを推定する
pub fn mime_for_filename(filename: &str) -> &'static str {
    let ext = match filename.rsplit_once('.') {
        Some((_, ext)) => ext.to_ascii_lowercase(),
        None => return DEFAULT_MIME_TYPE,
    };
    let ext = if ext == "jpeg" { "jpg".to_string() } else { ext };

    MIME_EXTENSIONS
        .iter()
        .find(|(_, e)| *e == ext)
        .map(|(mime, _)| *mime)
        .unwrap_or(DEFAULT_MIME_TYPE)
}

/// スナップショット用のファイル名（例: `webcam-capture-1700000000000.jpg`）
pub fn snapshot_filename(stamp: u64, mime_type: &str) -> String {
    format!(
        "{}-{}.{}",
        SNAPSHOT_PREFIX,
        stamp,
        extension_for_mime(mime_type)
    )
}
