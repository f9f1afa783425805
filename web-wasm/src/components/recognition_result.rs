//! 認識結果の表示

use crate::api::face_api;
use crate::app::use_lang;
use face_client_common::{translate, Key, MatchOutcome, RecognitionResult};
use gloo::file::{Blob, ObjectUrl};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn RecognitionResultView(result: RecognitionResult) -> impl IntoView {
    let lang = use_lang();
    let similarity = result.similarity_percent();

    let body = match result.outcome() {
        MatchOutcome::NoMatch => view! {
            <div class="alert alert-info">
                {move || translate(lang.get(), Key::NoMatchFound)}
            </div>
        }
        .into_any(),
        MatchOutcome::Matched(record) => {
            let label = record.label.clone();
            view! {
                <div class="result-grid">
                    <div>
                        <p><strong>{move || translate(lang.get(), Key::MatchFound)}</strong></p>
                        <p class="text-muted">
                            {move || translate(lang.get(), Key::Label)}": "{label}
                        </p>
                        <p class="text-muted">
                            {move || translate(lang.get(), Key::Similarity)}": "{format!("{}%", similarity)}
                        </p>
                    </div>
                    <MatchedImage id=record.id.clone() label=record.label.clone() />
                </div>
            }
            .into_any()
        }
    };

    view! {
        <div class="paper">
            <h3>{move || translate(lang.get(), Key::RecognitionResult)}</h3>
            {body}
        </div>
    }
}

/// 一致した顔の登録画像。取得失敗は警告表示のみ
#[component]
fn MatchedImage(id: String, label: String) -> impl IntoView {
    let lang = use_lang();
    let image = RwSignal::new_local(None::<ObjectUrl>);
    let (failed, set_failed) = signal(false);

    spawn_local(async move {
        match face_api().fetch_face_image(&id).await {
            Ok(face) => {
                let blob =
                    Blob::new_with_options(face.bytes.as_slice(), Some(face.content_type.as_str()));
                image.try_set(Some(ObjectUrl::from(blob)));
            }
            Err(e) => {
                gloo::console::warn!(format!("matched image fetch failed ({}): {}", id, e));
                set_failed.try_set(true);
            }
        }
    });

    view! {
        <div>
            {move || {
                image.with(|url| {
                    url.as_ref().map(|url| {
                        view! {
                            <figure class="matched-face">
                                <img src=url.to_string() alt=label.clone() />
                                <figcaption class="text-muted">
                                    {move || translate(lang.get(), Key::MatchedFace)}
                                </figcaption>
                            </figure>
                        }
                    })
                })
            }}
            <Show when=move || failed.get()>
                <div class="alert alert-warning">
                    {move || translate(lang.get(), Key::FailedToLoadMatchedImage)}
                </div>
            </Show>
        </div>
    }
}
