use time::Date;

use crate::core::format::format_iso_date;
use crate::measurements::{MetricKey, RecommendedRange};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModalKind {
    NewAquarium,
    NewMeasurement,
    EditAquarium,
}

impl ModalKind {
    pub fn dom_id(self) -> &'static str {
        match self {
            ModalKind::NewAquarium => "modal-new-aquarium",
            ModalKind::NewMeasurement => "modal-new-measurement",
            ModalKind::EditAquarium => "modal-edit-aquarium",
        }
    }

    /// Id of the toolbar button that opens this modal.
    pub fn trigger_id(self) -> &'static str {
        match self {
            ModalKind::NewAquarium => "open-new-aquarium",
            ModalKind::NewMeasurement => "open-new-measurement",
            ModalKind::EditAquarium => "open-edit-aquarium",
        }
    }

    /// Measurements and edits belong to an aquarium; without a selection the
    /// trigger stays disabled.
    pub fn requires_aquarium(self) -> bool {
        !matches!(self, ModalKind::NewAquarium)
    }

    /// Whether the trigger is enabled, given whether the selection resolves
    /// to a known aquarium.
    pub fn is_available(self, has_aquarium: bool) -> bool {
        has_aquarium || !self.requires_aquarium()
    }

    /// Form target on the server. `None` when the form needs an aquarium and
    /// there is none.
    pub fn action(self, aquarium_id: Option<i64>) -> Option<String> {
        match (self, aquarium_id) {
            (ModalKind::NewAquarium, _) => Some("/aquarium".to_string()),
            (ModalKind::EditAquarium, Some(id)) => Some(format!("/aquarium/{id}")),
            (ModalKind::NewMeasurement, Some(_)) => Some("/measurement".to_string()),
            (_, None) => None,
        }
    }

    pub fn fields(self) -> Vec<FieldSpec> {
        match self {
            ModalKind::NewAquarium | ModalKind::EditAquarium => vec![
                FieldSpec::plain("name", FieldKind::Text),
                FieldSpec::plain("created_at", FieldKind::Date),
                FieldSpec::plain("image", FieldKind::File),
            ],
            ModalKind::NewMeasurement => {
                let mut fields = vec![
                    FieldSpec::plain("aquarium_id", FieldKind::Hidden),
                    FieldSpec::plain("date", FieldKind::Date),
                ];
                fields.extend(MetricKey::ALL.into_iter().map(|metric| FieldSpec {
                    name: metric.as_str(),
                    kind: FieldKind::Number,
                    metric: Some(metric),
                    range: Some(metric.descriptor().range),
                }));
                fields
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Date,
    Number,
    File,
    Hidden,
}

impl FieldKind {
    pub fn input_type(self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Date => "date",
            FieldKind::Number => "number",
            FieldKind::File => "file",
            FieldKind::Hidden => "hidden",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub metric: Option<MetricKey>,
    pub range: Option<RecommendedRange>,
}

impl FieldSpec {
    fn plain(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            metric: None,
            range: None,
        }
    }
}

/// Field that receives focus when a modal is shown: the first text or date
/// input, or the first field named `name`.
pub fn first_focus_target(fields: &[FieldSpec]) -> Option<usize> {
    fields
        .iter()
        .position(|f| matches!(f.kind, FieldKind::Text | FieldKind::Date) || f.name == "name")
}

/// Today's date for an empty date field; `None` leaves the field alone.
pub fn default_date(current: &str, today: Date) -> Option<String> {
    current.trim().is_empty().then(|| format_iso_date(today))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn aquarium_forms_focus_name_first() {
        let fields = ModalKind::NewAquarium.fields();
        assert_eq!(first_focus_target(&fields).map(|i| fields[i].name), Some("name"));
    }

    #[test]
    fn measurement_form_skips_hidden_id_for_focus() {
        let fields = ModalKind::NewMeasurement.fields();
        assert_eq!(first_focus_target(&fields).map(|i| fields[i].name), Some("date"));
    }

    #[test]
    fn no_focusable_field_means_no_focus() {
        let fields = vec![FieldSpec::plain("image", FieldKind::File)];
        assert_eq!(first_focus_target(&fields), None);
    }

    #[test]
    fn empty_date_gets_today() {
        let today = date!(2024 - 06 - 09);
        assert_eq!(default_date("", today), Some("2024-06-09".to_string()));
        assert_eq!(default_date("  ", today), Some("2024-06-09".to_string()));
        assert_eq!(default_date("2024-05-01", today), None);
    }

    #[test]
    fn measurement_inputs_carry_metric_ranges() {
        let fields = ModalKind::NewMeasurement.fields();
        let numeric: Vec<_> = fields.iter().filter(|f| f.kind == FieldKind::Number).collect();
        assert_eq!(numeric.len(), 5);
        assert!(numeric.iter().all(|f| f.range.is_some() && f.metric.is_some()));
    }

    #[test]
    fn only_new_aquarium_opens_without_selection() {
        assert!(!ModalKind::NewAquarium.requires_aquarium());
        assert!(ModalKind::NewMeasurement.requires_aquarium());
        assert!(ModalKind::EditAquarium.requires_aquarium());
    }

    #[test]
    fn availability_matches_the_aquarium_requirement() {
        assert!(ModalKind::NewAquarium.is_available(false));
        assert!(!ModalKind::NewMeasurement.is_available(false));
        assert!(!ModalKind::EditAquarium.is_available(false));
        assert!(ModalKind::EditAquarium.is_available(true));
    }

    #[test]
    fn edit_form_posts_to_aquarium_id() {
        assert_eq!(ModalKind::EditAquarium.action(Some(4)).as_deref(), Some("/aquarium/4"));
        assert_eq!(ModalKind::NewMeasurement.action(Some(4)).as_deref(), Some("/measurement"));
        assert_eq!(ModalKind::NewAquarium.action(None).as_deref(), Some("/aquarium"));
    }

    #[test]
    fn edit_without_aquarium_has_no_target() {
        assert_eq!(ModalKind::EditAquarium.action(None), None);
        assert_eq!(ModalKind::NewMeasurement.action(None), None);
    }
}
