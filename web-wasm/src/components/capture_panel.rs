//! 画像の取得元タブ（ファイル / Webカメラ）とプレビュー

use crate::app::use_lang;
use crate::components::image_upload::{ImageUpload, SelectedFile};
use crate::components::webcam_capture::WebcamCapture;
use face_client_common::{translate, CaptureMode, Key, RawCapture};
use gloo::file::{Blob, ObjectUrl};
use leptos::prelude::*;

#[component]
pub fn CapturePanel(
    #[prop(into)] mode: Signal<CaptureMode>,
    #[prop(into)] capture: Signal<Option<RawCapture>>,
    /// 送信中はタブを切り替えられない
    #[prop(into)] locked: Signal<bool>,
    on_mode: Callback<CaptureMode>,
    on_file: Callback<SelectedFile>,
    on_snapshot: Callback<String>,
    on_retake: Callback<()>,
) -> impl IntoView {
    let lang = use_lang();

    let tab = move |target: CaptureMode, key: Key| {
        view! {
            <button
                type="button"
                class=move || if mode.get() == target { "active" } else { "" }
                disabled=move || locked.get()
                on:click=move |_| {
                    if mode.get_untracked() != target {
                        on_mode.run(target);
                    }
                }
            >
                {move || translate(lang.get(), key)}
            </button>
        }
    };

    view! {
        <div class="capture-panel">
            <div class="tabs">
                {tab(CaptureMode::Upload, Key::UploadImage)}
                {tab(CaptureMode::Webcam, Key::WebcamCapture)}
            </div>
            {move || match (mode.get(), capture.get()) {
                (CaptureMode::Upload, current) => view! {
                    <ImageUpload on_file=on_file />
                    {current.map(|capture| view! { <CapturePreview capture=capture /> })}
                }
                .into_any(),
                (CaptureMode::Webcam, Some(capture)) => view! {
                    <CapturePreview capture=capture />
                    <button type="button" class="btn btn-secondary" on:click=move |_| on_retake.run(())>
                        {move || translate(lang.get(), Key::RetakePhoto)}
                    </button>
                }
                .into_any(),
                (CaptureMode::Webcam, None) => view! { <WebcamCapture on_capture=on_snapshot /> }.into_any(),
            }}
        </div>
    }
}

/// 選択済み画像のプレビュー
#[component]
fn CapturePreview(capture: RawCapture) -> impl IntoView {
    let lang = use_lang();
    let name = capture.display_name().to_string();

    let src = match capture {
        RawCapture::File {
            bytes, mime_type, ..
        } => {
            let blob = Blob::new_with_options(bytes.as_slice(), Some(mime_type.as_str()));
            let url = ObjectUrl::from(blob);
            let src = url.to_string();
            // プレビューが破棄されるまでURLを保持する
            let _ = StoredValue::new_local(url);
            src
        }
        RawCapture::Snapshot { data_url } => data_url,
    };

    view! {
        <div class="preview">
            <p class="text-muted">
                {move || translate(lang.get(), Key::Selected)}": "{name}
            </p>
            <img src=src alt="preview" />
        </div>
    }
}
