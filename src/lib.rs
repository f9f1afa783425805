//! face-client: 顔認識サービスのCLIクライアント
//!
//! 正規化・通信・状態管理は face_client_common にあり、
//! ここではreqwestによる送信、設定ファイル、表示を扱う。

pub mod capture;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod render;
