//! Gap-fill simulation: projects the radar and similarity score forward as
//! missing elements are marked fulfilled. Pure, no model call.
//!
//! ratio      = matched fulfilled ids / missing elements (0 when there are none)
//! current'   = round(current + (target - current) × ratio)
//! similarity = min(100, round(similarity + (100 - similarity) × ratio))

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::analysis::contract::PENTAGON_SIZE;
use crate::models::analysis::GapReport;

const FULL_MARK: u32 = 100;

/// Missing-element items the viewer has marked as done. View-local state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FulfillmentSet(BTreeSet<String>);

impl FulfillmentSet {
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

// Interactive view-state operations. The HTTP surface is stateless and only
// builds sets from a submitted list.
#[allow(dead_code)]
impl FulfillmentSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips `item`. Returns whether it is fulfilled afterwards.
    pub fn toggle(&mut self, item: &str) -> bool {
        if self.0.remove(item) {
            false
        } else {
            self.0.insert(item.to_string());
            true
        }
    }

    pub fn contains(&self, item: &str) -> bool {
        self.0.contains(item)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn reset(&mut self) {
        self.0.clear();
    }
}

impl<S: Into<String>> FromIterator<S> for FulfillmentSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// One radar axis after boosting. `current` is the simulated value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarPoint {
    pub subject: String,
    pub current: i64,
    pub target: f64,
    pub full_mark: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GapProjection {
    pub fulfillment_ratio: f64,
    pub similarity_score: i64,
    pub attributes: Vec<RadarPoint>,
}

/// Matches JavaScript's `Math.round`: halves round toward positive infinity.
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Distinct fulfilled identifiers over the number of missing elements.
/// Identifiers that name no missing element are ignored, so the ratio never exceeds 1.
pub fn fulfillment_ratio(report: &GapReport, fulfilled: &FulfillmentSet) -> f64 {
    let total = report.missing_elements.len();
    if total == 0 {
        return 0.0;
    }

    let done = fulfilled
        .iter()
        .filter(|id| report.missing_elements.iter().any(|e| e.item == *id))
        .count();

    done as f64 / total as f64
}

pub fn boosted_value(current: f64, target: f64, ratio: f64) -> i64 {
    round_half_up(current + (target - current) * ratio) as i64
}

pub fn boosted_similarity(original: f64, ratio: f64) -> i64 {
    let boosted = round_half_up(original + (100.0 - original) * ratio) as i64;
    boosted.min(100)
}

pub fn project(report: &GapReport, fulfilled: &FulfillmentSet) -> GapProjection {
    let ratio = fulfillment_ratio(report, fulfilled);

    let attributes = report
        .attributes
        .iter()
        .take(PENTAGON_SIZE)
        .map(|attr| RadarPoint {
            subject: attr.subject.clone(),
            current: boosted_value(attr.current, attr.target, ratio),
            target: attr.target,
            full_mark: FULL_MARK,
        })
        .collect();

    GapProjection {
        fulfillment_ratio: ratio,
        similarity_score: boosted_similarity(report.similarity_score, ratio),
        attributes,
    }
}

/// A results view: one gap report plus the viewer's fulfilled set.
/// Loading a new report clears the set.
#[derive(Debug, Clone)]
pub struct GapView {
    report: GapReport,
    fulfilled: FulfillmentSet,
}

impl GapView {
    pub fn with_fulfilled(report: GapReport, fulfilled: FulfillmentSet) -> Self {
        Self { report, fulfilled }
    }

    pub fn projection(&self) -> GapProjection {
        project(&self.report, &self.fulfilled)
    }
}

// Interactive view-state operations, unused by the stateless HTTP surface.
#[allow(dead_code)]
impl GapView {
    pub fn new(report: GapReport) -> Self {
        Self {
            report,
            fulfilled: FulfillmentSet::new(),
        }
    }

    pub fn toggle(&mut self, item: &str) -> bool {
        self.fulfilled.toggle(item)
    }

    pub fn load(&mut self, report: GapReport) {
        self.report = report;
        self.fulfilled.reset();
    }

    pub fn fulfilled(&self) -> &FulfillmentSet {
        &self.fulfilled
    }
}
