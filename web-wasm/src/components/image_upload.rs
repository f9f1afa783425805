//! 画像ファイル選択

use crate::app::use_lang;
use face_client_common::{translate, Key};
use gloo::file::{futures::read_as_bytes, File};
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::HtmlInputElement;

/// 選択したファイルの (bytes, filename, mime_type)
pub type SelectedFile = (Vec<u8>, String, String);

#[component]
pub fn ImageUpload(on_file: Callback<SelectedFile>) -> impl IntoView {
    let lang = use_lang();

    let on_change = move |ev: web_sys::Event| {
        let input: HtmlInputElement = event_target(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        let file = File::from(file);
        spawn_local(async move {
            match read_as_bytes(&file).await {
                Ok(bytes) => on_file.run((bytes, file.name(), file.raw_mime_type())),
                Err(e) => gloo::console::warn!(format!("ファイルを読み込めません: {}", e)),
            }
        });
    };

    view! {
        <label class="btn btn-secondary">
            {move || translate(lang.get(), Key::ChooseFile)}
            <input type="file" accept="image/*" hidden on:change=on_change />
        </label>
    }
}
