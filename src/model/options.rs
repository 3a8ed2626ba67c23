//! Dropdown option lists.
//!
//! Everything here is a pure function of the dataset and the upstream
//! selection: same inputs, same ordered output. Unknown years or regions are
//! not errors, they just leave the ALL entry on its own.

use std::collections::BTreeSet;

use serde::Serialize;

use super::census::Dataset;
use super::metric::Metric;
use super::selection::RegionChoice;

/// Value (and label) of the synthetic "no filter at this level" entry.
pub const ALL_VALUE: &str = "전체";
pub const ALL_LABEL: &str = "전체";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DropdownOption {
    pub label: String,
    pub value: String,
}

impl DropdownOption {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
        }
    }

    pub fn all() -> Self {
        Self {
            label: ALL_LABEL.to_string(),
            value: ALL_VALUE.to_string(),
        }
    }

    pub fn is_all(&self) -> bool {
        self.value == ALL_VALUE
    }
}

fn with_all(distinct: BTreeSet<&str>) -> Vec<DropdownOption> {
    std::iter::once(DropdownOption::all())
        .chain(distinct.into_iter().map(DropdownOption::new))
        .collect()
}

pub fn year_options(dataset: &Dataset) -> Vec<DropdownOption> {
    dataset
        .years()
        .into_iter()
        .map(|y| DropdownOption::new(y.to_string()))
        .collect()
}

pub fn category_options() -> Vec<DropdownOption> {
    Metric::ALL
        .iter()
        .map(|m| DropdownOption::new(m.column()))
        .collect()
}

/// ALL followed by the distinct sido present in `year`, ascending.
pub fn sido_options(dataset: &Dataset, year: i32) -> Vec<DropdownOption> {
    let distinct = dataset
        .records()
        .iter()
        .filter(|r| r.year == year)
        .map(|r| r.sido.as_str())
        .collect();
    with_all(distinct)
}

/// ALL followed by the distinct sgg under (`year`, `sido`), ascending.
/// Collapses to ALL alone when no sido is chosen.
pub fn sgg_options(dataset: &Dataset, year: i32, sido: &RegionChoice) -> Vec<DropdownOption> {
    let Some(sido) = sido.name() else {
        return vec![DropdownOption::all()];
    };
    let distinct = dataset
        .records()
        .iter()
        .filter(|r| r.year == year && r.sido == sido)
        .map(|r| r.sgg.as_str())
        .collect();
    with_all(distinct)
}

pub fn contains_value(options: &[DropdownOption], value: &str) -> bool {
    options.iter().any(|o| o.value == value)
}
