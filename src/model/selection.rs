use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::census::Dataset;
use super::metric::Metric;
use super::options::{contains_value, sgg_options, sido_options, DropdownOption, ALL_VALUE};

/// Value held by a sido or sgg dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub enum RegionChoice {
    /// Nothing picked yet (page mount).
    #[default]
    Unselected,
    /// The ALL sentinel: no filter at this level.
    All,
    Only(String),
}

impl RegionChoice {
    /// Parse a form value: empty is `Unselected`, the ALL sentinel is `All`.
    pub fn from_wire(raw: &str) -> Self {
        match raw.trim() {
            "" => RegionChoice::Unselected,
            ALL_VALUE => RegionChoice::All,
            name => RegionChoice::Only(name.to_string()),
        }
    }

    pub fn wire_value(&self) -> &str {
        match self {
            RegionChoice::Unselected => "",
            RegionChoice::All => ALL_VALUE,
            RegionChoice::Only(name) => name,
        }
    }

    /// The region this choice filters on, if any.
    pub fn name(&self) -> Option<&str> {
        match self {
            RegionChoice::Only(name) => Some(name),
            _ => None,
        }
    }
}

/// The four dashboard selections. Passed explicitly into every handler.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    pub year: i32,
    pub sido: RegionChoice,
    pub sgg: RegionChoice,
    pub category: Metric,
}

impl Selection {
    /// Mount-time defaults: earliest year, nothing picked, total population.
    pub fn initial(dataset: &Dataset) -> Self {
        Self {
            year: dataset.default_year().unwrap_or_default(),
            sido: RegionChoice::Unselected,
            sgg: RegionChoice::Unselected,
            category: Metric::default(),
        }
    }
}

/// A user interaction with one dropdown.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    YearChanged(i32),
    SidoChanged(RegionChoice),
    SggChanged(RegionChoice),
    CategoryChanged(Metric),
}

/// What happens to a dependent dropdown value that is no longer among its
/// recomputed options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum StalePolicy {
    /// Keep the value and flag it stale.
    #[default]
    Retain,
    /// Replace it with the ALL sentinel.
    ResetToAll,
    /// Replace it with `Unselected`.
    Clear,
}

impl StalePolicy {
    pub fn revalidate(self, value: RegionChoice, options: &[DropdownOption]) -> RegionChoice {
        let is_stale = matches!(&value, RegionChoice::Only(name) if !contains_value(options, name));
        if !is_stale {
            return value;
        }
        match self {
            StalePolicy::Retain => value,
            StalePolicy::ResetToAll => RegionChoice::All,
            StalePolicy::Clear => RegionChoice::Unselected,
        }
    }
}

impl fmt::Display for StalePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StalePolicy::Retain => "retain",
            StalePolicy::ResetToAll => "reset-all",
            StalePolicy::Clear => "clear",
        })
    }
}

impl FromStr for StalePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "retain" => Ok(StalePolicy::Retain),
            "reset-all" | "reset_all" => Ok(StalePolicy::ResetToAll),
            "clear" => Ok(StalePolicy::Clear),
            other => Err(format!(
                "unknown stale policy {other:?} (expected retain, reset-all or clear)"
            )),
        }
    }
}

/// Apply one event. Upstream changes recompute the dependent option lists
/// (sido after year, sgg after year or sido) and run the stale policy on
/// their values, sido first so sgg sees the revalidated sido.
pub fn apply_event(dataset: &Dataset, mut sel: Selection, event: Event, policy: StalePolicy) -> Selection {
    match event {
        Event::YearChanged(year) => {
            sel.year = year;
            sel.sido = policy.revalidate(sel.sido, &sido_options(dataset, year));
            sel.sgg = policy.revalidate(sel.sgg, &sgg_options(dataset, year, &sel.sido));
        }
        Event::SidoChanged(sido) => {
            sel.sido = sido;
            sel.sgg = policy.revalidate(sel.sgg, &sgg_options(dataset, sel.year, &sel.sido));
        }
        Event::SggChanged(sgg) => sel.sgg = sgg,
        Event::CategoryChanged(category) => sel.category = category,
    }
    sel
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DropdownPhase {
    Unselected,
    Populated,
    Selected,
}

/// A sido or sgg control as the page sees it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DependentDropdown {
    pub options: Vec<DropdownOption>,
    pub value: RegionChoice,
    /// The value is not among `options` (only possible under `Retain`,
    /// or when a client submits a region the data does not have).
    pub stale: bool,
}

impl DependentDropdown {
    pub fn new(options: Vec<DropdownOption>, value: RegionChoice) -> Self {
        let stale = matches!(&value, RegionChoice::Only(name) if !contains_value(&options, name));
        Self {
            options,
            value,
            stale,
        }
    }

    pub fn phase(&self) -> DropdownPhase {
        if self.options.is_empty() {
            DropdownPhase::Unselected
        } else if self.value == RegionChoice::Unselected {
            DropdownPhase::Populated
        } else {
            DropdownPhase::Selected
        }
    }
}

/// Both dependent dropdowns for `sel`, options freshly resolved.
pub fn dependent_dropdowns(dataset: &Dataset, sel: &Selection) -> (DependentDropdown, DependentDropdown) {
    let sido = DependentDropdown::new(sido_options(dataset, sel.year), sel.sido.clone());
    let sgg = DependentDropdown::new(sgg_options(dataset, sel.year, &sel.sido), sel.sgg.clone());
    (sido, sgg)
}
