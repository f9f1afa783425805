//! 言語選択

use crate::app::use_lang;
use face_client_common::Lang;
use leptos::prelude::*;

#[component]
pub fn LanguageSelector() -> impl IntoView {
    let lang = use_lang();

    view! {
        <select
            class="language-selector"
            prop:value=move || lang.get().code()
            on:change=move |ev| {
                if let Some(selected) = Lang::from_code(&event_target_value(&ev)) {
                    lang.set(selected);
                }
            }
        >
            {Lang::ALL
                .into_iter()
                .map(|option| {
                    view! {
                        <option value=option.code() selected=move || lang.get() == option>
                            {format!("{} {}", option.flag(), option.label())}
                        </option>
                    }
                })
                .collect_view()}
        </select>
    }
}
