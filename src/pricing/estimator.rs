// src/pricing/estimator.rs
use crate::pricing::catalog::{Catalog, FeatureAddOn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Complexity as sent by either calculator: a level id, or a 0..=100 slider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ComplexityInput {
    Slider(f64),
    Level(String),
}

impl ComplexityInput {
    /// Resolve to a multiplier. Unknown levels fall back to standard (1.0).
    pub fn multiplier(&self, catalog: &Catalog) -> f64 {
        match self {
            ComplexityInput::Level(id) => catalog.complexity(id).map_or(1.0, |c| c.multiplier),
            ComplexityInput::Slider(value) => slider_multiplier(*value),
        }
    }
}

/// `0.8 + (value / 100) * 0.4`, value clamped to 0..=100.
pub fn slider_multiplier(value: f64) -> f64 {
    let value = if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        50.0
    };
    0.8 + (value / 100.0) * 0.4
}

/// What the user picked in a calculator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    #[serde(default)]
    pub option_id: Option<String>,
    #[serde(default)]
    pub complexity: Option<ComplexityInput>,
    #[serde(default)]
    pub time_frame: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceEstimate {
    pub base_price: u32,
    pub complexity_multiplier: f64,
    pub time_frame_multiplier: f64,
    pub features: Vec<FeatureAddOn>,
    pub selected_feature_total: u64,
    pub total: u64,
}

impl PriceEstimate {
    /// Nothing selected (or nothing resolvable) costs nothing.
    pub fn zero() -> Self {
        Self {
            base_price: 0,
            complexity_multiplier: 1.0,
            time_frame_multiplier: 1.0,
            features: Vec::new(),
            selected_feature_total: 0,
            total: 0,
        }
    }

    /// Rounded multiplicative part, before add-ons.
    pub fn base_component(&self) -> u64 {
        self.total - self.selected_feature_total
    }
}

/// total = round(base * complexity * time frame) + sum(selected add-ons)
///
/// Pure: unknown option -> zero estimate, unknown complexity/time frame ->
/// standard, unknown feature ids -> ignored, duplicate feature ids -> counted once.
pub fn estimate(catalog: &Catalog, selection: &Selection) -> PriceEstimate {
    let Some(option) = selection
        .option_id
        .as_deref()
        .and_then(|id| catalog.option(id))
    else {
        return PriceEstimate::zero();
    };

    let complexity_multiplier = selection
        .complexity
        .as_ref()
        .map_or(1.0, |c| c.multiplier(catalog));

    let time_frame_multiplier = selection
        .time_frame
        .as_deref()
        .and_then(|id| catalog.time_frame(id))
        .map_or(1.0, |t| t.multiplier);

    let wanted: BTreeSet<&str> = selection.features.iter().map(String::as_str).collect();
    let features: Vec<FeatureAddOn> = catalog
        .add_ons(option.id)
        .iter()
        .filter(|f| wanted.contains(f.id))
        .cloned()
        .collect();
    let selected_feature_total: u64 = features.iter().map(|f| u64::from(f.price)).sum();

    let scaled = (f64::from(option.base_price) * complexity_multiplier * time_frame_multiplier)
        .round()
        .max(0.0) as u64;

    PriceEstimate {
        base_price: option.base_price,
        complexity_multiplier,
        time_frame_multiplier,
        features,
        selected_feature_total,
        total: scaled + selected_feature_total,
    }
}
