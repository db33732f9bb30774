use std::rc::Rc;

use dioxus::prelude::*;

use crate::boot::AquariumEntry;
use crate::core::platform;
use crate::measurements::RecommendedRange;
use crate::page::modal::{default_date, first_focus_target, FieldKind, FieldSpec, ModalKind};
use crate::page::range::{classify_range, range_tooltip, RangeStatus};
use crate::t;

fn modal_title(kind: ModalKind) -> String {
    match kind {
        ModalKind::NewAquarium => t!("modal-new-aquarium-title"),
        ModalKind::NewMeasurement => t!("modal-new-measurement-title"),
        ModalKind::EditAquarium => t!("modal-edit-aquarium-title"),
    }
}

fn field_label(field: &FieldSpec) -> String {
    if let Some(metric) = field.metric {
        return format!("{} ({})", metric.label(), metric.descriptor().unit);
    }
    match field.name {
        "name" => t!("field-name"),
        "created_at" => t!("field-created-at"),
        "image" => t!("field-image"),
        "date" => t!("field-date"),
        other => other.to_string(),
    }
}

/// Pre-filled value: the edited aquarium's fields, or the target aquarium id.
fn initial_value(field: &FieldSpec, aquarium: Option<&AquariumEntry>) -> String {
    match (field.name, aquarium) {
        ("name", Some(a)) => a.name.clone(),
        ("created_at", Some(a)) => a.created_at.clone().unwrap_or_default(),
        ("aquarium_id", Some(a)) => a.id.to_string(),
        _ => String::new(),
    }
}

fn field_id(kind: ModalKind, name: &str) -> String {
    format!("{}-{}", kind.dom_id(), name.replace('_', "-"))
}

/// One of the page's form dialogs. It stays in the document while closed so
/// the focus target is mounted by the time the dialog is shown.
#[component]
pub fn FormModal(
    kind: ModalKind,
    open: Signal<Option<ModalKind>>,
    aquarium: Option<AquariumEntry>,
) -> Element {
    let mut open = open;
    let fields = kind.fields();
    let focus_index = first_focus_target(&fields);
    let mut focus_target = use_signal(|| Option::<Rc<MountedData>>::None);
    let mut date_value = use_signal(String::new);

    // Shown: default the date, then focus the first field.
    use_effect(move || {
        if open() != Some(kind) {
            return;
        }
        if kind == ModalKind::NewMeasurement {
            let next = default_date(&date_value.peek(), platform::today());
            if let Some(today) = next {
                date_value.set(today);
            }
        }
        let target = focus_target.peek().clone();
        if let Some(target) = target {
            spawn(async move {
                let _ = target.set_focus(true).await;
            });
        }
    });

    let is_open = open() == Some(kind);
    let action = kind.action(aquarium.as_ref().map(|a| a.id));
    let can_submit = action.is_some();
    let action = action.unwrap_or_default();
    let title = modal_title(kind);
    let controlled_date = kind == ModalKind::NewMeasurement;

    rsx! {
        div {
            id: kind.dom_id(),
            class: if is_open { "modal modal--open" } else { "modal" },
            role: "dialog",
            aria_modal: "true",
            hidden: !is_open,
            onkeydown: move |evt: KeyboardEvent| {
                if evt.key() == Key::Escape {
                    open.set(None);
                }
            },
            div { class: "modal__backdrop", onclick: move |_| open.set(None) }
            div { class: "modal__dialog",
                header { class: "modal__header",
                    h2 { "{title}" }
                    button {
                        r#type: "button",
                        class: "modal__close",
                        aria_label: t!("modal-close"),
                        onclick: move |_| open.set(None),
                        "×"
                    }
                }
                form {
                    class: "modal__form",
                    method: "post",
                    action: "{action}",
                    enctype: "multipart/form-data",
                    for (idx, field) in fields.iter().enumerate() {
                        div { key: "{field.name}", class: "form-field",
                            {match (field.kind, field.range) {
                                (FieldKind::Hidden, _) => rsx! {
                                    input {
                                        r#type: "hidden",
                                        name: field.name,
                                        value: initial_value(field, aquarium.as_ref()),
                                    }
                                },
                                (FieldKind::Number, Some(range)) => rsx! {
                                    RangedInput {
                                        id: field_id(kind, field.name),
                                        name: field.name.to_string(),
                                        label: field_label(field),
                                        range,
                                    }
                                },
                                (FieldKind::Date, _) if controlled_date => rsx! {
                                    label { r#for: field_id(kind, field.name), {field_label(field)} }
                                    input {
                                        id: field_id(kind, field.name),
                                        class: "form-input",
                                        r#type: "date",
                                        name: field.name,
                                        required: true,
                                        value: "{date_value}",
                                        oninput: move |evt: FormEvent| date_value.set(evt.value()),
                                        onmounted: move |evt: MountedEvent| {
                                            if Some(idx) == focus_index {
                                                focus_target.set(Some(evt.data()));
                                            }
                                        },
                                    }
                                },
                                (FieldKind::File, _) => rsx! {
                                    label { r#for: field_id(kind, field.name), {field_label(field)} }
                                    input {
                                        id: field_id(kind, field.name),
                                        class: "form-input",
                                        r#type: "file",
                                        name: field.name,
                                        accept: "image/*",
                                    }
                                },
                                (other, _) => rsx! {
                                    label { r#for: field_id(kind, field.name), {field_label(field)} }
                                    input {
                                        id: field_id(kind, field.name),
                                        class: "form-input",
                                        r#type: other.input_type(),
                                        name: field.name,
                                        required: field.name == "name",
                                        value: initial_value(field, aquarium.as_ref()),
                                        onmounted: move |evt: MountedEvent| {
                                            if Some(idx) == focus_index {
                                                focus_target.set(Some(evt.data()));
                                            }
                                        },
                                    }
                                },
                            }}
                        }
                    }
                    footer { class: "modal__footer",
                        button {
                            r#type: "button",
                            class: "button button--ghost",
                            onclick: move |_| open.set(None),
                            {t!("form-cancel")}
                        }
                        button {
                            r#type: "submit",
                            class: "button button--primary",
                            disabled: !can_submit,
                            {t!("form-submit")}
                        }
                    }
                }
            }
        }
    }
}

/// Numeric input that highlights values outside the recommended range.
#[component]
fn RangedInput(id: String, name: String, label: String, range: RecommendedRange) -> Element {
    let mut status = use_signal(|| Option::<RangeStatus>::None);
    let mut hint = use_signal(String::new);
    let state_class = status().map(RangeStatus::css_class).unwrap_or_default();

    rsx! {
        label { r#for: "{id}", "{label}" }
        input {
            id: "{id}",
            class: "form-input {state_class}",
            r#type: "number",
            name: "{name}",
            min: "{range.min}",
            max: "{range.max}",
            step: "{range.step}",
            inputmode: "decimal",
            title: "{hint}",
            oninput: move |evt: FormEvent| {
                let (min, max) = (Some(range.min), Some(range.max));
                if let Some(next) = classify_range(&evt.value(), min, max) {
                    status.set(Some(next));
                    hint.set(range_tooltip(next, min, max));
                }
            },
        }
    }
}
