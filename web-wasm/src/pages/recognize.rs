//! 顔認識ページ

use crate::api::face_api;
use crate::app::use_lang;
use crate::components::capture_panel::CapturePanel;
use crate::components::image_upload::SelectedFile;
use crate::components::recognition_result::RecognitionResultView;
use face_client_common::{translate, Key, RecognitionController, WorkflowState};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn RecognizePage() -> impl IntoView {
    let lang = use_lang();
    let form = RwSignal::new(RecognitionController::new());
    // 画像の複製はキャプチャが変わったときだけ
    let revision = Memo::new(move |_| form.with(|f| f.capture_revision()));
    let submitting = Memo::new(move |_| form.with(|f| f.state().is_submitting()));

    let on_recognize = move |_| {
        let stamp = js_sys::Date::now() as u64;
        let Some(submission) = form.try_update(|f| f.begin_submit(stamp)).flatten() else {
            return;
        };
        spawn_local(async move {
            let (generation, outcome) = submission.run(&face_api()).await;
            form.try_update(|f| f.finish(generation, outcome));
        });
    };

    let outcome = move || {
        form.with(|f| match f.state() {
            WorkflowState::Success(result) => {
                view! { <RecognitionResultView result=result.clone() /> }.into_any()
            }
            WorkflowState::Failed(message) => {
                view! { <div class="alert alert-error">{message.clone()}</div> }.into_any()
            }
            WorkflowState::Idle | WorkflowState::Submitting => ().into_any(),
        })
    };

    view! {
        <div class="paper">
            <h2>{move || translate(lang.get(), Key::RecognizeFace)}</h2>
            <CapturePanel
                mode=Memo::new(move |_| form.with(|f| f.mode()))
                capture=Signal::derive(move || {
                    revision.track();
                    form.with_untracked(|f| f.capture().cloned())
                })
                locked=submitting
                on_mode=Callback::new(move |mode| form.update(|f| f.set_mode(mode)))
                on_file=Callback::new(move |(bytes, filename, mime_type): SelectedFile| {
                    form.update(|f| f.select_file(bytes, filename, mime_type))
                })
                on_snapshot=Callback::new(move |data_url| form.update(|f| f.capture_snapshot(data_url)))
                on_retake=Callback::new(move |_| form.update(|f| f.retake()))
            />
            <button
                type="button"
                class="btn btn-primary"
                disabled=move || !form.with(|f| f.can_submit())
                on:click=on_recognize
            >
                {move || {
                    if submitting.get() {
                        format!("{}...", translate(lang.get(), Key::Recognizing))
                    } else {
                        translate(lang.get(), Key::Recognize).to_string()
                    }
                }}
            </button>
        </div>
        {outcome}
    }
}
