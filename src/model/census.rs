use std::collections::BTreeSet;

use serde::Serialize;

use super::metric::Metric;

/// One row of the long-format census table: a single sgg in a single year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub year: i32,
    pub sido: String,
    pub sgg: String,
    /// Indexed by [`Metric::index`]. Blank cells are NaN.
    pub values: [f64; 6],
}

impl Record {
    pub fn value(&self, metric: Metric) -> f64 {
        self.values[metric.index()]
    }
}

/// The loaded census table. Built once at startup and shared read-only
/// (`Arc<Dataset>`) by every request.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Records in file order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct years, ascending.
    pub fn years(&self) -> Vec<i32> {
        self.records
            .iter()
            .map(|r| r.year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn default_year(&self) -> Option<i32> {
        self.records.iter().map(|r| r.year).min()
    }
}
