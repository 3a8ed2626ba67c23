use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::QueryError;

/// The six census measures a bar chart can show. The CSV column name of each
/// metric is its Korean display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Metric {
    #[default]
    TotalPopulation,
    Households,
    PersonsPerHousehold,
    MalePopulation,
    FemalePopulation,
    SexRatio,
}

impl Metric {
    /// Display (and column) order.
    pub const ALL: [Metric; 6] = [
        Metric::TotalPopulation,
        Metric::Households,
        Metric::PersonsPerHousehold,
        Metric::MalePopulation,
        Metric::FemalePopulation,
        Metric::SexRatio,
    ];

    pub fn column(self) -> &'static str {
        match self {
            Metric::TotalPopulation => "총인구수",
            Metric::Households => "세대수",
            Metric::PersonsPerHousehold => "세대당 인구",
            Metric::MalePopulation => "남자 인구수",
            Metric::FemalePopulation => "여자 인구수",
            Metric::SexRatio => "남여 비율",
        }
    }

    /// Position in [`Metric::ALL`], also the slot in a record's value array.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for Metric {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metric::ALL
            .into_iter()
            .find(|m| m.column() == s.trim())
            .ok_or_else(|| QueryError::Category(s.to_string()))
    }
}
