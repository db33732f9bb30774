use dioxus::prelude::*;

use crate::boot::AquariumEntry;
use crate::page::backdrop::{probe_image, BackdropState};
use crate::t;

/// Aquarium selector with a decorative backdrop taken from the selected
/// aquarium's photo.
#[component]
pub fn AquariumPicker(aquariums: Vec<AquariumEntry>, selected: Signal<Option<i64>>) -> Element {
    let mut selected = selected;
    let mut backdrop = use_signal(BackdropState::default);

    let probe_list = aquariums.clone();
    use_effect(move || {
        let id = selected();
        let url = probe_list
            .iter()
            .find(|a| Some(a.id) == id)
            .and_then(|a| a.image_url.clone());
        let Some(ticket) = backdrop.write().begin(url.as_deref()) else {
            return;
        };
        spawn(async move {
            let loaded = probe_image(&ticket.url).await;
            if backdrop.write().resolve(&ticket, loaded) {
                tracing::debug!(url = %ticket.url, "aquarium backdrop applied");
            }
        });
    });

    let style = backdrop.read().style();
    let current = selected().map(|id| id.to_string()).unwrap_or_default();

    rsx! {
        div { class: "aquarium-picker",
            label { r#for: "aquarium-select", class: "aquarium-picker__label",
                {t!("aquarium-select-label")}
            }
            if aquariums.is_empty() {
                p { class: "aquarium-picker__empty", {t!("aquarium-none")} }
            } else {
                select {
                    id: "aquarium-select",
                    class: "aquarium-picker__select",
                    style: "{style}",
                    value: "{current}",
                    onchange: move |evt: FormEvent| selected.set(evt.value().parse().ok()),
                    for aquarium in aquariums.iter() {
                        option {
                            key: "{aquarium.id}",
                            value: "{aquarium.id}",
                            "data-image": aquarium.image_url.clone().unwrap_or_default(),
                            selected: Some(aquarium.id) == selected(),
                            "{aquarium.name}"
                        }
                    }
                }
            }
            div {
                class: "aquarium-picker__preview",
                style: "{style}",
                aria_hidden: "true",
            }
        }
    }
}
