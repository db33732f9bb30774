//! Alt+letter shortcuts that open the page's modals.
//!
//! On wasm a document-level keydown listener maps key presses to [`Shortcut`]s
//! and forwards them into the dashboard's coroutine, which treats them exactly
//! like a click on the matching trigger button.

use super::modal::ModalKind;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyChord {
    /// `KeyboardEvent.key`.
    pub key: String,
    /// `KeyboardEvent.code`, used when Alt turns the key into a symbol (macOS).
    pub code: String,
    pub alt: bool,
    pub ctrl: bool,
    pub shift: bool,
    pub meta: bool,
}

impl KeyChord {
    pub fn alt(key: &str) -> Self {
        Self {
            key: key.to_string(),
            code: format!("Key{}", key.to_ascii_uppercase()),
            alt: true,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    NewAquarium,
    NewMeasurement,
    EditAquarium,
}

impl Shortcut {
    pub const ALL: [Shortcut; 3] = [
        Shortcut::NewAquarium,
        Shortcut::NewMeasurement,
        Shortcut::EditAquarium,
    ];

    pub fn modal(self) -> ModalKind {
        match self {
            Shortcut::NewAquarium => ModalKind::NewAquarium,
            Shortcut::NewMeasurement => ModalKind::NewMeasurement,
            Shortcut::EditAquarium => ModalKind::EditAquarium,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Shortcut::NewAquarium => 'a',
            Shortcut::NewMeasurement => 'm',
            Shortcut::EditAquarium => 'e',
        }
    }

    pub fn hint(self) -> String {
        format!("Alt+{}", self.letter().to_ascii_uppercase())
    }
}

/// Map a key press to a shortcut. Presses inside text fields never match, nor
/// do chords that also hold Ctrl, Shift or Meta.
pub fn shortcut_for(chord: &KeyChord, in_text_field: bool) -> Option<Shortcut> {
    if in_text_field || !chord.alt || chord.ctrl || chord.shift || chord.meta {
        return None;
    }
    let key = chord.key.to_lowercase();
    Shortcut::ALL.into_iter().find(|s| {
        let letter = s.letter();
        key.chars().eq(std::iter::once(letter))
            || chord.code == format!("Key{}", letter.to_ascii_uppercase())
    })
}

/// Whether an element with this tag (and `type`, for inputs) takes text.
pub fn is_text_field(tag: &str, input_type: Option<&str>, content_editable: bool) -> bool {
    if content_editable {
        return true;
    }
    match tag.to_ascii_lowercase().as_str() {
        "textarea" | "select" => true,
        "input" => !matches!(
            input_type.map(str::to_ascii_lowercase).as_deref(),
            Some("checkbox" | "radio" | "button" | "submit" | "reset" | "file" | "range" | "color")
        ),
        _ => false,
    }
}

#[cfg(target_arch = "wasm32")]
pub use listener::{install, ShortcutListener};

/// Native builds have no document to listen on.
#[cfg(not(target_arch = "wasm32"))]
pub struct ShortcutListener;

#[cfg(not(target_arch = "wasm32"))]
pub fn install(
    _tx: futures_channel::mpsc::UnboundedSender<Shortcut>,
) -> Option<ShortcutListener> {
    None
}

#[cfg(target_arch = "wasm32")]
mod listener {
    use futures_channel::mpsc::UnboundedSender;
    use wasm_bindgen::{closure::Closure, JsCast};
    use web_sys::{Element, HtmlElement, KeyboardEvent};

    use super::{is_text_field, shortcut_for, KeyChord, Shortcut};

    /// Document-level keydown listener; removed again on drop.
    pub struct ShortcutListener {
        closure: Closure<dyn FnMut(KeyboardEvent)>,
    }

    impl Drop for ShortcutListener {
        fn drop(&mut self) {
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                let _ = document.remove_event_listener_with_callback(
                    "keydown",
                    self.closure.as_ref().unchecked_ref(),
                );
            }
        }
    }

    fn target_is_text_field(event: &KeyboardEvent) -> bool {
        let Some(element) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
            return false;
        };
        let editable = element
            .dyn_ref::<HtmlElement>()
            .map(|el| el.is_content_editable())
            .unwrap_or(false);
        is_text_field(
            &element.tag_name(),
            element.get_attribute("type").as_deref(),
            editable,
        )
    }

    pub fn install(tx: UnboundedSender<Shortcut>) -> Option<ShortcutListener> {
        let document = web_sys::window()?.document()?;
        let closure = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
            let chord = KeyChord {
                key: event.key(),
                code: event.code(),
                alt: event.alt_key(),
                ctrl: event.ctrl_key(),
                shift: event.shift_key(),
                meta: event.meta_key(),
            };
            let Some(shortcut) = shortcut_for(&chord, target_is_text_field(&event)) else {
                return;
            };
            event.prevent_default();
            tracing::debug!(shortcut = ?shortcut, "keyboard shortcut");
            let _ = tx.unbounded_send(shortcut);
        });
        document
            .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())
            .ok()?;
        Some(ShortcutListener { closure })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alt_letters_map_to_modals() {
        assert_eq!(shortcut_for(&KeyChord::alt("a"), false), Some(Shortcut::NewAquarium));
        assert_eq!(shortcut_for(&KeyChord::alt("M"), false), Some(Shortcut::NewMeasurement));
        assert_eq!(shortcut_for(&KeyChord::alt("e"), false), Some(Shortcut::EditAquarium));
        assert_eq!(shortcut_for(&KeyChord::alt("x"), false), None);
    }

    #[test]
    fn ignored_inside_text_fields() {
        assert_eq!(shortcut_for(&KeyChord::alt("a"), true), None);
    }

    #[test]
    fn requires_plain_alt() {
        let mut chord = KeyChord::alt("a");
        chord.alt = false;
        assert_eq!(shortcut_for(&chord, false), None);

        let mut chord = KeyChord::alt("a");
        chord.ctrl = true;
        assert_eq!(shortcut_for(&chord, false), None);

        let mut chord = KeyChord::alt("A");
        chord.shift = true;
        assert_eq!(shortcut_for(&chord, false), None);

        let mut chord = KeyChord::alt("e");
        chord.meta = true;
        assert_eq!(shortcut_for(&chord, false), None);
    }

    #[test]
    fn physical_code_covers_alt_symbols() {
        let chord = KeyChord {
            key: "å".into(),
            code: "KeyA".into(),
            alt: true,
            ..Default::default()
        };
        assert_eq!(shortcut_for(&chord, false), Some(Shortcut::NewAquarium));
    }

    #[test]
    fn text_field_detection() {
        assert!(is_text_field("INPUT", Some("text"), false));
        assert!(is_text_field("INPUT", None, false));
        assert!(is_text_field("input", Some("number"), false));
        assert!(is_text_field("TEXTAREA", None, false));
        assert!(is_text_field("DIV", None, true));
        assert!(!is_text_field("INPUT", Some("checkbox"), false));
        assert!(!is_text_field("BUTTON", None, false));
    }

    #[test]
    fn hints_read_as_chords() {
        assert_eq!(Shortcut::EditAquarium.hint(), "Alt+E");
        assert_eq!(Shortcut::NewMeasurement.modal(), ModalKind::NewMeasurement);
    }
}
