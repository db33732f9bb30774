use serde::{Deserialize, Serialize};

use crate::t;

/// The tracked water parameters. Declaration order is display order, and
/// `Ord` follows it so ordered sets iterate the same way as [`METRICS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKey {
    Nitrate,
    Phosphate,
    Kh,
    Magnesium,
    Calcium,
}

/// Suggested reef-tank band, also used as the `min`/`max` of the form inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecommendedRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricDescriptor {
    pub key: MetricKey,
    pub color: &'static str,
    pub unit: &'static str,
    /// Decimal places shown in tooltips.
    pub precision: usize,
    pub range: RecommendedRange,
}

pub static METRICS: [MetricDescriptor; 5] = [
    MetricDescriptor {
        key: MetricKey::Nitrate,
        color: "#e4572e",
        unit: "mg/L",
        precision: 2,
        range: RecommendedRange { min: 1.0, max: 10.0, step: 0.1 },
    },
    MetricDescriptor {
        key: MetricKey::Phosphate,
        color: "#17bebb",
        unit: "mg/L",
        precision: 3,
        range: RecommendedRange { min: 0.02, max: 0.1, step: 0.01 },
    },
    MetricDescriptor {
        key: MetricKey::Kh,
        color: "#f0a202",
        unit: "dKH",
        precision: 2,
        range: RecommendedRange { min: 7.0, max: 11.0, step: 0.1 },
    },
    MetricDescriptor {
        key: MetricKey::Magnesium,
        color: "#76b041",
        unit: "ppm",
        precision: 0,
        range: RecommendedRange { min: 1250.0, max: 1450.0, step: 1.0 },
    },
    MetricDescriptor {
        key: MetricKey::Calcium,
        color: "#2e86ab",
        unit: "ppm",
        precision: 0,
        range: RecommendedRange { min: 380.0, max: 450.0, step: 1.0 },
    },
];

impl MetricKey {
    pub const ALL: [MetricKey; 5] = [
        MetricKey::Nitrate,
        MetricKey::Phosphate,
        MetricKey::Kh,
        MetricKey::Magnesium,
        MetricKey::Calcium,
    ];

    /// Field name in API records and toggle `value` attributes.
    pub fn as_str(self) -> &'static str {
        match self {
            MetricKey::Nitrate => "nitrate",
            MetricKey::Phosphate => "phosphate",
            MetricKey::Kh => "kh",
            MetricKey::Magnesium => "magnesium",
            MetricKey::Calcium => "calcium",
        }
    }

    pub fn from_key(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == raw.trim())
    }

    pub fn descriptor(self) -> &'static MetricDescriptor {
        // METRICS is declared in enum order.
        &METRICS[self as usize]
    }

    pub fn color(self) -> &'static str {
        self.descriptor().color
    }

    /// Localized display label.
    pub fn label(self) -> String {
        match self {
            MetricKey::Nitrate => t!("metric-nitrate"),
            MetricKey::Phosphate => t!("metric-phosphate"),
            MetricKey::Kh => t!("metric-kh"),
            MetricKey::Magnesium => t!("metric-magnesium"),
            MetricKey::Calcium => t!("metric-calcium"),
        }
    }
}
