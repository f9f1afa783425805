//! 登録済みの顔の一覧（ページ送り付き）

use crate::api::face_api;
use crate::app::use_lang;
use face_client_common::workflow::GalleryFetch;
use face_client_common::{translate, FaceRecord, GalleryController, Key, WorkflowState};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn GalleryPage() -> impl IntoView {
    let lang = use_lang();
    let gallery = RwSignal::new(GalleryController::new());

    let start = move |fetch: GalleryFetch| {
        spawn_local(async move {
            let (generation, outcome) = fetch.run(&face_api()).await;
            gallery.try_update(|g| g.finish(generation, outcome));
        });
    };

    if let Some(fetch) = gallery.try_update(|g| g.begin_load()) {
        start(fetch);
    }

    let go_to = move |page: u32| {
        if let Some(fetch) = gallery.try_update(|g| g.set_page(page)) {
            start(fetch);
        }
    };

    let content = move || {
        gallery.with(|g| match g.state() {
            WorkflowState::Idle | WorkflowState::Submitting => {
                view! { <div class="spinner"></div> }.into_any()
            }
            WorkflowState::Failed(message) => {
                view! { <div class="alert alert-error">{message.clone()}</div> }.into_any()
            }
            WorkflowState::Success(page) if page.faces.is_empty() => view! {
                <p class="text-muted">{move || translate(lang.get(), Key::NoFacesFound)}</p>
            }
            .into_any(),
            WorkflowState::Success(page) => view! {
                <div class="gallery-grid">
                    {page
                        .faces
                        .iter()
                        .cloned()
                        .map(|face| view! { <FaceCard face=face /> })
                        .collect_view()}
                </div>
            }
            .into_any(),
        })
    };

    view! {
        <div class="paper">
            <h2>{move || translate(lang.get(), Key::Gallery)}</h2>
            {content}
            <Show when=move || gallery.with(|g| g.total_pages() > 1)>
                <div class="pagination">
                    <button
                        class="btn btn-secondary"
                        disabled=move || gallery.with(|g| g.page() <= 1 || g.is_loading())
                        on:click=move |_| go_to(gallery.with_untracked(|g| g.page()) - 1)
                    >
                        "‹"
                    </button>
                    <span>
                        {move || gallery.with(|g| format!("{} / {}", g.page(), g.total_pages()))}
                    </span>
                    <button
                        class="btn btn-secondary"
                        disabled=move || {
                            gallery.with(|g| g.page() >= g.total_pages() || g.is_loading())
                        }
                        on:click=move |_| go_to(gallery.with_untracked(|g| g.page()) + 1)
                    >
                        "›"
                    </button>
                </div>
            </Show>
        </div>
    }
}

#[component]
fn FaceCard(face: FaceRecord) -> impl IntoView {
    let src = face_api().endpoints().face_image(&face.id);

    view! {
        <div class="face-card">
            <img src=src alt=face.label.clone() loading="lazy" />
            <div class="caption">
                <strong>{face.label}</strong>
                <div class="text-muted">{face.created_at}</div>
            </div>
        </div>
    }
}
