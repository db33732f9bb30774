use dioxus::prelude::*;
use futures_util::StreamExt;

use crate::boot::BootConfig;
use crate::chart::ChartOptions;
use crate::components::AppHeader;
use crate::measurements::load_measurements;
use crate::page::modal::ModalKind;
use crate::page::shortcuts::{self, Shortcut};
use crate::t;

use super::{AquariumPicker, ChartPanel, FormModal};

/// A trigger is enabled when its modal needs no aquarium or the selection
/// names one from the boot list.
fn trigger_enabled(kind: ModalKind, boot: &BootConfig, selected: Option<i64>) -> bool {
    kind.is_available(boot.aquarium(selected).is_some())
}

/// Open `kind` only if its toolbar button would be enabled.
fn open_if_allowed(
    kind: ModalKind,
    boot: &BootConfig,
    selected: Option<i64>,
    mut open_modal: Signal<Option<ModalKind>>,
) {
    if !trigger_enabled(kind, boot, selected) {
        tracing::debug!(modal = kind.dom_id(), ?selected, "ignored: no aquarium selected");
        return;
    }
    open_modal.set(Some(kind));
}

fn action_label(kind: ModalKind) -> String {
    match kind {
        ModalKind::NewAquarium => t!("action-new-aquarium"),
        ModalKind::NewMeasurement => t!("action-new-measurement"),
        ModalKind::EditAquarium => t!("action-edit-aquarium"),
    }
}

/// The measurement dashboard. Expects a [`BootConfig`] in context.
#[component]
pub fn Dashboard() -> Element {
    let boot = use_hook(|| try_consume_context::<BootConfig>().unwrap_or_default());
    // Re-render on language switch.
    let _lang = try_use_context::<Signal<String>>().map(|code| code());

    let selected = use_signal(|| boot.aquarium_id);
    let open_modal = use_signal(|| Option::<ModalKind>::None);
    let options = ChartOptions::from(&boot.config);

    let client = use_hook(reqwest::Client::new);
    let fetch_config = boot.config.clone();
    let records = use_resource(move || {
        let client = client.clone();
        let config = fetch_config.clone();
        let aquarium_id = selected();
        async move { load_measurements(&client, &config, aquarium_id).await }
    });

    let shortcut_boot = boot.clone();
    let shortcut_rx = use_coroutine(move |mut rx: UnboundedReceiver<Shortcut>| {
        let boot = shortcut_boot.clone();
        async move {
            while let Some(shortcut) = rx.next().await {
                open_if_allowed(shortcut.modal(), &boot, *selected.peek(), open_modal);
            }
        }
    });
    use_hook(move || std::rc::Rc::new(shortcuts::install(shortcut_rx.tx())));

    let loaded = records.read().clone();
    let current = boot.aquarium(selected()).cloned();

    rsx! {
        AppHeader {}

        main { class: "dashboard",
            div { class: "dashboard__toolbar",
                AquariumPicker { aquariums: boot.aquariums.clone(), selected }
                div { class: "dashboard__actions",
                    for kind in [ModalKind::NewAquarium, ModalKind::NewMeasurement, ModalKind::EditAquarium] {
                        button {
                            key: "{kind.trigger_id()}",
                            id: kind.trigger_id(),
                            r#type: "button",
                            class: "button",
                            disabled: !trigger_enabled(kind, &boot, selected()),
                            onclick: {
                                let boot = boot.clone();
                                move |_| open_if_allowed(kind, &boot, selected(), open_modal)
                            },
                            {action_label(kind)}
                        }
                    }
                }
            }

            if let Some(list) = loaded {
                ChartPanel { records: list, options }
            } else {
                p { class: "dashboard__loading", {t!("chart-loading")} }
            }
        }

        FormModal { kind: ModalKind::NewAquarium, open: open_modal, aquarium: None }
        FormModal { kind: ModalKind::EditAquarium, open: open_modal, aquarium: current.clone() }
        FormModal { kind: ModalKind::NewMeasurement, open: open_modal, aquarium: current }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boot() -> BootConfig {
        BootConfig::from_json(r#"{ "aquariums": [{ "id": 3, "name": "Reef 120" }] }"#)
            .unwrap()
            .with_query_override(Some("999"))
            .resolve_selection()
    }

    #[test]
    fn unknown_selection_disables_aquarium_triggers() {
        let boot = boot();
        assert_eq!(boot.aquarium_id, Some(999));
        assert!(!trigger_enabled(ModalKind::EditAquarium, &boot, boot.aquarium_id));
        assert!(!trigger_enabled(ModalKind::NewMeasurement, &boot, boot.aquarium_id));
        assert!(trigger_enabled(ModalKind::NewAquarium, &boot, boot.aquarium_id));
    }

    #[test]
    fn known_selection_enables_every_trigger() {
        let boot = boot();
        for kind in [ModalKind::NewAquarium, ModalKind::NewMeasurement, ModalKind::EditAquarium] {
            assert!(trigger_enabled(kind, &boot, Some(3)));
        }
        assert!(!trigger_enabled(ModalKind::EditAquarium, &boot, None));
    }
}
