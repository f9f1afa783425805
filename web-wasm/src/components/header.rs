//! ヘッダー（ナビゲーションと言語選択）

use crate::app::{use_lang, Page};
use crate::components::language_selector::LanguageSelector;
use face_client_common::{translate, Key};
use leptos::prelude::*;

fn nav_key(page: Page) -> Key {
    match page {
        Page::Gallery => Key::Gallery,
        Page::Add => Key::Add,
        Page::Recognize => Key::Recognize,
    }
}

#[component]
pub fn Header<F>(page: ReadSignal<Page>, on_navigate: F) -> impl IntoView
where
    F: Fn(Page) + 'static + Clone + Send + Sync,
{
    let lang = use_lang();

    view! {
        <header class="header">
            <h1>{move || translate(lang.get(), Key::FaceRecognition)}</h1>
            <nav class="nav">
                {Page::ALL
                    .into_iter()
                    .map(|target| {
                        let on_navigate = on_navigate.clone();
                        view! {
                            <button
                                class=move || if page.get() == target { "active" } else { "" }
                                on:click=move |_| on_navigate(target)
                            >
                                {move || translate(lang.get(), nav_key(target))}
                            </button>
                        }
                    })
                    .collect_view()}
            </nav>
            <LanguageSelector />
        </header>
    }
}
