//! 設定ファイルテスト

use face_client::config::Config;
use face_client::error::FaceClientError;
use face_client_common::DEFAULT_BASE_URL;
use tempfile::tempdir;

/// 設定ファイルがなければ既定値
#[test]
fn test_load_missing_file_returns_default() {
    let dir = tempdir().expect("Failed to create temp dir");
    let config = Config::load_from(&dir.path().join("config.json")).expect("load");
    assert_eq!(config.base_url, DEFAULT_BASE_URL);
}

/// 保存と読み込み（親ディレクトリは作成される）
#[test]
fn test_save_and_load() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("nested").join("config.json");

    let config = Config {
        base_url: "http://faces.example:9000".to_string(),
    };
    config.save_to(&path).expect("save");

    let loaded = Config::load_from(&path).expect("load");
    assert_eq!(loaded, config);
}

/// 壊れたJSONはエラー
#[test]
fn test_load_invalid_json() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();

    let result = Config::load_from(&path);
    assert!(matches!(result, Err(FaceClientError::JsonParse(_))));
}

/// コマンドライン引数が最優先
#[test]
fn test_cli_override_wins() {
    let config = Config {
        base_url: "http://from-file:8000".to_string(),
    };
    assert_eq!(
        config.resolve_base_url(Some("http://from-flag:8000")),
        "http://from-flag:8000"
    );
}

/// http(s) 以外のURLは保存前に拒否される
#[test]
fn test_set_base_url_rejects_non_http() {
    let mut config = Config::default();
    let result = config.set_base_url("ftp://faces.example".to_string());
    assert!(matches!(result, Err(FaceClientError::Config(_))));
    assert_eq!(config.base_url, DEFAULT_BASE_URL);
}
