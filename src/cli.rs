use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "face-client")]
#[command(about = "顔認識サービスのクライアント（顔登録・認識・ギャラリー）", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// バックエンドURL（環境変数・設定ファイルより優先）
    #[arg(long, global = true)]
    pub base_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 顔を登録する
    Enroll {
        /// 画像ファイル
        #[arg(short, long, conflicts_with = "snapshot")]
        image: Option<PathBuf>,

        /// Data URL（data:image/jpeg;base64,...）を保存したファイル
        #[arg(short, long)]
        snapshot: Option<PathBuf>,

        /// 顔のラベル（省略時は入力を求める）
        #[arg(short, long)]
        label: Option<String>,
    },

    /// 登録済みの顔から最も近いものを探す
    Recognize {
        /// 画像ファイル
        #[arg(short, long, conflicts_with = "snapshot")]
        image: Option<PathBuf>,

        /// Data URLを保存したファイル
        #[arg(short, long)]
        snapshot: Option<PathBuf>,

        /// 一致した顔の画像を保存する
        #[arg(long)]
        save_match: Option<PathBuf>,
    },

    /// 登録済みの顔画像をダウンロード
    Image {
        /// 顔ID
        #[arg(required = true)]
        id: String,

        /// 保存先
        #[arg(short, long)]
        output: PathBuf,
    },

    /// 登録済みの顔を一覧表示
    Gallery {
        /// ページ番号（1始まり）
        #[arg(short, long, default_value = "1")]
        page: u32,
    },

    /// 設定を管理
    Config {
        /// バックエンドURLを保存
        #[arg(long)]
        set_base_url: Option<String>,

        /// 現在の設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_enroll() {
        let cli = Cli::parse_from(["face-client", "enroll", "--image", "a.jpg", "--label", "alice"]);
        match cli.command {
            Commands::Enroll { image, snapshot, label } => {
                assert_eq!(image, Some(PathBuf::from("a.jpg")));
                assert!(snapshot.is_none());
                assert_eq!(label.as_deref(), Some("alice"));
            }
            _ => panic!("expected enroll"),
        }
    }

    #[test]
    fn test_image_and_snapshot_conflict() {
        let result = Cli::try_parse_from([
            "face-client", "recognize", "--image", "a.jpg", "--snapshot", "b.txt",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_gallery_default_page() {
        let cli = Cli::parse_from(["face-client", "gallery", "--base-url", "http://x"]);
        assert_eq!(cli.base_url.as_deref(), Some("http://x"));
        match cli.command {
            Commands::Gallery { page } => assert_eq!(page, 1),
            _ => panic!("expected gallery"),
        }
    }
}
