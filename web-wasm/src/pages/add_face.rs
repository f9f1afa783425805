//! 顔登録ページ

use crate::api::face_api;
use crate::app::use_lang;
use crate::components::capture_panel::CapturePanel;
use crate::components::image_upload::SelectedFile;
use face_client_common::{translate, EnrollmentController, Key, WorkflowState};
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::SubmitEvent;

#[component]
pub fn AddFacePage() -> impl IntoView {
    let lang = use_lang();
    // ページを離れるとコントローラごと破棄され、送信中のリクエストも中断される
    let form = RwSignal::new(EnrollmentController::new());
    // 画像の複製はキャプチャが変わったときだけ
    let revision = Memo::new(move |_| form.with(|f| f.capture_revision()));
    let submitting = Memo::new(move |_| form.with(|f| f.state().is_submitting()));

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let stamp = js_sys::Date::now() as u64;
        let Some(submission) = form.try_update(|f| f.begin_submit(stamp)).flatten() else {
            return;
        };
        spawn_local(async move {
            let (generation, outcome) = submission.run(&face_api()).await;
            form.try_update(|f| f.finish(generation, outcome));
        });
    };

    let status = move || {
        form.with(|f| match f.state() {
            WorkflowState::Success(response) => {
                let message = format!(
                    "{} - {}",
                    translate(lang.get(), Key::FaceUploadedSuccessfully),
                    response.filename
                );
                view! { <div class="alert alert-success">{message}</div> }.into_any()
            }
            WorkflowState::Failed(message) => {
                view! { <div class="alert alert-error">{message.clone()}</div> }.into_any()
            }
            WorkflowState::Idle | WorkflowState::Submitting => ().into_any(),
        })
    };

    view! {
        <div class="paper">
            <h2>{move || translate(lang.get(), Key::AddNewFace)}</h2>
            <form on:submit=on_submit>
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

                <div class="form-group">
                    <label for="face-label">{move || translate(lang.get(), Key::FaceLabel)}</label>
                    <input
                        id="face-label"
                        type="text"
                        prop:value=move || form.with(|f| f.label().to_string())
                        disabled=move || submitting.get()
                        on:input=move |ev| form.update(|f| f.set_label(event_target_value(&ev)))
                    />
                    <small class="text-muted">
                        {move || translate(lang.get(), Key::FaceLabelHelperText)}
                    </small>
                </div>

                <button
                    type="submit"
                    class="btn btn-primary"
                    disabled=move || !form.with(|f| f.can_submit())
                >
                    {move || translate(lang.get(), Key::UploadFace)}
                </button>
            </form>

            <Show when=move || form.with(|f| f.state().is_submitting())>
                <div class="spinner"></div>
            </Show>
            {status}
        </div>
    }
}
