//! メインアプリケーションコンポーネント

use crate::components::header::Header;
use crate::pages::{add_face::AddFacePage, gallery::GalleryPage, recognize::RecognizePage};
use face_client_common::Lang;
use gloo::storage::{LocalStorage, Storage};
use leptos::prelude::*;

/// 表示言語の保存キー
const LANG_STORAGE_KEY: &str = "face-client.lang";

/// 表示中のページ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Gallery,
    Add,
    Recognize,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Gallery, Page::Add, Page::Recognize];
}

/// 現在の表示言語（`App` が提供する）
pub fn use_lang() -> RwSignal<Lang> {
    use_context::<RwSignal<Lang>>().unwrap_or_else(|| RwSignal::new(Lang::default()))
}

fn stored_lang() -> Lang {
    LocalStorage::get::<String>(LANG_STORAGE_KEY)
        .ok()
        .and_then(|code| Lang::from_code(&code))
        .unwrap_or_default()
}

#[component]
pub fn App() -> impl IntoView {
    let lang = RwSignal::new(stored_lang());
    provide_context(lang);

    // 言語を切り替えたら保存
    Effect::new(move |_| {
        let code = lang.get().code();
        if let Err(e) = LocalStorage::set(LANG_STORAGE_KEY, code) {
            gloo::console::warn!(format!("言語設定を保存できません: {}", e));
        }
    });

    let (page, set_page) = signal(Page::default());

    view! {
        <Header page=page on_navigate=move |p| set_page.set(p) />
        <main class="container">
            {move || match page.get() {
                Page::Gallery => view! { <GalleryPage /> }.into_any(),
                Page::Add => view! { <AddFacePage /> }.into_any(),
                Page::Recognize => view! { <RecognizePage /> }.into_any(),
            }}
        </main>
    }
}
