use clap::Parser;
use face_client::{capture, cli, client, config, error, render};
use cli::{Cli, Commands};
use client::ReqwestClient;
use config::Config;
use error::{FaceClientError, Result};
use face_client_common::{
    EnrollmentController, Endpoints, FaceApi, GalleryController, MatchOutcome, RawCapture,
    RecognitionController, WorkflowState,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load()?;
    let base_url = config.resolve_base_url(cli.base_url.as_deref());
    let api = FaceApi::new(ReqwestClient::new(), Endpoints::new(base_url));
    tracing::debug!(base_url = api.endpoints().base_url(), "backend selected");

    match cli.command {
        Commands::Enroll { image, snapshot, label } => {
            println!("📤 face-client - 顔登録\n");

            let capture = capture::read_capture(image.as_deref(), snapshot.as_deref())?;
            let label = match label {
                Some(label) => label,
                None => prompt_label()?,
            };

            let mut form = EnrollmentController::new();
            match capture {
                RawCapture::File { bytes, filename, mime_type } => {
                    form.select_file(bytes, filename, mime_type)
                }
                RawCapture::Snapshot { data_url } => form.capture_snapshot(data_url),
            }
            form.set_label(label);

            if !form.can_submit() {
                return Err(FaceClientError::MissingInput("ラベルが空です".to_string()));
            }

            let spinner = spinner("送信中...");
            let state = form.submit(&api, stamp()).await;
            spinner.finish_and_clear();

            match state {
                WorkflowState::Success(response) => println!("✔ {}", render::enrollment(response)),
                WorkflowState::Failed(message) => {
                    return Err(FaceClientError::Workflow(message.clone()))
                }
                WorkflowState::Idle | WorkflowState::Submitting => {}
            }
        }

        Commands::Recognize { image, snapshot, save_match } => {
            println!("🔍 face-client - 顔認識\n");

            let capture = capture::read_capture(image.as_deref(), snapshot.as_deref())?;
            let mut form = RecognitionController::new();
            match capture {
                RawCapture::File { bytes, filename, mime_type } => {
                    form.select_file(bytes, filename, mime_type)
                }
                RawCapture::Snapshot { data_url } => form.capture_snapshot(data_url),
            }

            let spinner = spinner("認識中...");
            let state = form.submit(&api, stamp()).await;
            spinner.finish_and_clear();

            let result = match state {
                WorkflowState::Success(result) => result,
                WorkflowState::Failed(message) => {
                    return Err(FaceClientError::Workflow(message.clone()))
                }
                WorkflowState::Idle | WorkflowState::Submitting => return Ok(()),
            };
            println!("{}", render::recognition(result));

            if let (MatchOutcome::Matched(record), Some(path)) = (result.outcome(), save_match) {
                // 画像の取得失敗は警告のみ
                match api.fetch_face_image(&record.id).await {
                    Ok(face) => {
                        std::fs::write(&path, &face.bytes)?;
                        println!("✔ 一致した顔画像を保存: {}", path.display());
                    }
                    Err(e) => {
                        tracing::warn!(id = %record.id, error = %e, "matched image fetch failed");
                        println!("⚠ Failed to load matched image: {}", e);
                    }
                }
            }
        }

        Commands::Image { id, output } => {
            let face = api.fetch_face_image(&id).await?;
            std::fs::write(&output, &face.bytes)?;
            println!(
                "✔ 保存しました: {} ({}, {} bytes)",
                output.display(),
                face.content_type,
                face.bytes.len()
            );
        }

        Commands::Gallery { page } => {
            let mut gallery = GalleryController::new();

            let spinner = spinner("読み込み中...");
            let state = gallery.go_to(page, &api).await;
            spinner.finish_and_clear();

            match state {
                WorkflowState::Success(page) => println!("{}", render::gallery(page)),
                WorkflowState::Failed(message) => {
                    return Err(FaceClientError::Workflow(message.clone()))
                }
                WorkflowState::Idle | WorkflowState::Submitting => {}
            }
        }

        Commands::Config { set_base_url, show } => {
            let mut config = config;

            if let Some(url) = set_base_url {
                config.set_base_url(url)?;
                println!("✔ バックエンドURLを設定しました");
            }

            if show {
                println!("設定:");
                println!("  設定ファイル: {}", Config::config_path()?.display());
                println!("  バックエンドURL: {}", config.base_url);
                println!("  使用中のURL: {}", config.resolve_base_url(cli.base_url.as_deref()));
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn spinner(message: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

fn prompt_label() -> Result<String> {
    if !std::io::stdin().is_terminal() {
        return Err(FaceClientError::MissingInput(
            "--label を指定してください".to_string(),
        ));
    }
    dialoguer::Input::<String>::new()
        .with_prompt("Label")
        .interact_text()
        .map_err(|e| FaceClientError::MissingInput(e.to_string()))
}

/// スナップショットのファイル名用タイムスタンプ
fn stamp() -> u64 {
    chrono::Utc::now().timestamp_millis().max(0) as u64
}
