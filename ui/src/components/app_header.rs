use dioxus::prelude::*;

use crate::i18n;
use crate::page::shortcuts::Shortcut;
use crate::t;

const HEADER_CSS: Asset = asset!("/assets/styling/header.css");

fn shortcut_label(shortcut: Shortcut) -> String {
    match shortcut {
        Shortcut::NewAquarium => t!("action-new-aquarium"),
        Shortcut::NewMeasurement => t!("action-new-measurement"),
        Shortcut::EditAquarium => t!("action-edit-aquarium"),
    }
}

/// Page header: brand, keyboard shortcut hints and the locale switcher.
///
/// Switching language writes the shared language signal (when the shell
/// provides one) so every subscribed view re-renders with fresh strings.
#[component]
pub fn AppHeader() -> Element {
    i18n::init();

    let mut current_lang = use_signal(|| "en-US".to_string());
    let langs = use_signal(i18n::available_languages);
    let show_switcher = langs().len() > 1;
    let lang_code_ctx: Option<Signal<String>> = try_use_context::<Signal<String>>();
    let _lang_marker = lang_code_ctx.as_ref().map(|c| c()).unwrap_or_default();

    let on_change = move |evt: FormEvent| {
        let val = evt.value();
        match i18n::set_language(&val) {
            Ok(()) => {
                current_lang.set(val.clone());
                if let Some(mut code) = lang_code_ctx {
                    code.set(val);
                }
            }
            Err(err) => tracing::warn!(%err, lang = %val, "language switch failed"),
        }
    };

    rsx! {
        document::Link { rel: "stylesheet", href: HEADER_CSS }

        header { id: "app-header", class: "app-header",
            div { class: "app-header__inner",
                div { class: "app-header__brand",
                    span { class: "app-header__brand-mark", "Reefboard" }
                    span { class: "app-header__subtitle", {t!("tagline")} }
                }

                ul { class: "app-header__shortcuts", aria_label: t!("shortcuts-label"),
                    for shortcut in Shortcut::ALL {
                        li { key: "{shortcut.letter()}",
                            kbd { "{shortcut.hint()}" }
                            " "
                            span { {shortcut_label(shortcut)} }
                        }
                    }
                }

                if show_switcher {
                    div { class: "app-header__locale",
                        label { class: "visually-hidden", r#for: "locale-select",
                            {t!("language-label")}
                        }
                        select {
                            id: "locale-select",
                            value: "{current_lang()}",
                            oninput: on_change,
                            for code in langs() {
                                option { key: "{code}", value: "{code}", "{code}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
