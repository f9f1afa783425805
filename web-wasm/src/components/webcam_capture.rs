//! Webカメラのライブ映像と撮影

use crate::app::use_lang;
use crate::camera;
use face_client_common::{translate, Key};
use leptos::html::Video;
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::MediaStream;

/// マウント中だけカメラを使う。アンマウントで全トラックを停止する
#[component]
pub fn WebcamCapture(on_capture: Callback<String>) -> impl IntoView {
    let lang = use_lang();
    let video_ref = NodeRef::<Video>::new();
    let stream = StoredValue::new_local(None::<MediaStream>);
    let (ready, set_ready) = signal(false);
    let (unavailable, set_unavailable) = signal(false);

    spawn_local(async move {
        match camera::start().await {
            Ok(media) => {
                // 取得前にアンマウントされていたら即停止
                if stream.try_update_value(|s| *s = Some(media.clone())).is_none() {
                    camera::stop(&media);
                    return;
                }
                if let Some(video) = video_ref.get_untracked() {
                    video.set_src_object(Some(&media));
                }
                set_ready.try_set(true);
            }
            Err(e) => {
                gloo::console::warn!("camera unavailable", e);
                set_unavailable.try_set(true);
            }
        }
    });

    on_cleanup(move || {
        if let Some(Some(media)) = stream.try_update_value(|s| s.take()) {
            camera::stop(&media);
        }
    });

    let capture = move |_| {
        let Some(video) = video_ref.get_untracked() else {
            return;
        };
        match camera::snapshot(&video) {
            Ok(data_url) => on_capture.run(data_url),
            Err(e) => gloo::console::warn!("snapshot failed", e),
        }
    };

    view! {
        <div class="webcam">
            <Show
                when=move || !unavailable.get()
                fallback=move || view! {
                    <div class="alert alert-warning">
                        {move || translate(lang.get(), Key::CameraUnavailable)}
                    </div>
                }
            >
                <video node_ref=video_ref autoplay=true playsinline=true muted=true></video>
                <div>
                    <button
                        type="button"
                        class="btn btn-primary"
                        disabled=move || !ready.get()
                        on:click=capture
                    >
                        {move || translate(lang.get(), Key::CapturePhoto)}
                    </button>
                </div>
            </Show>
        </div>
    }
}
