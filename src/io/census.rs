use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::error::LoadError;
use crate::model::census::{Dataset, Record};
use crate::model::metric::Metric;

pub const YEAR_COLUMN: &str = "year";
pub const SIDO_COLUMN: &str = "sido";
pub const SGG_COLUMN: &str = "sgg";

#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub delimiter: u8,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

#[derive(Debug, Deserialize)]
struct CensusRow {
    year: String,
    sido: String,
    sgg: String,
    #[serde(rename = "총인구수")]
    total_population: Option<f64>,
    #[serde(rename = "세대수")]
    households: Option<f64>,
    #[serde(rename = "세대당 인구")]
    persons_per_household: Option<f64>,
    #[serde(rename = "남자 인구수")]
    male_population: Option<f64>,
    #[serde(rename = "여자 인구수")]
    female_population: Option<f64>,
    #[serde(rename = "남여 비율")]
    sex_ratio: Option<f64>,
}

impl CensusRow {
    fn values(&self) -> [f64; 6] {
        [
            self.total_population,
            self.households,
            self.persons_per_household,
            self.male_population,
            self.female_population,
            self.sex_ratio,
        ]
        .map(|v| v.unwrap_or(f64::NAN))
    }
}

/// Every column the loader needs, in the order they are reported when missing.
pub fn required_columns() -> Vec<&'static str> {
    let mut cols = vec![YEAR_COLUMN, SIDO_COLUMN, SGG_COLUMN];
    cols.extend(Metric::ALL.iter().map(|m| m.column()));
    cols
}

/// Coerce a year cell to an integer. Accepts `2020` and `2020.0`.
pub fn parse_year(raw: &str) -> Result<i32, String> {
    let raw = raw.trim();
    if let Ok(y) = raw.parse::<i32>() {
        return Ok(y);
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v.fract() == 0.0 && v.abs() <= i32::MAX as f64 => Ok(v as i32),
        Ok(_) => Err(format!("year {raw:?} is not a whole number")),
        Err(_) => Err(format!("year {raw:?} is not a number")),
    }
}

/// Load the long-format census table (`year,sido,sgg,<six metric columns>`).
///
/// Extra columns are ignored. Blank metric cells load as NaN.
pub fn load_census_csv(path: impl AsRef<Path>, opts: &LoadOptions) -> Result<Dataset, LoadError> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(opts.delimiter)
        .trim(csv::Trim::All)
        .from_reader(file);

    let csv_err = |source: csv::Error| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let headers = rdr.headers().map_err(csv_err)?.clone();
    let missing: Vec<String> = required_columns()
        .into_iter()
        .filter(|col| !headers.iter().any(|h| h == *col))
        .map(str::to_string)
        .collect();
    if !missing.is_empty() {
        return Err(LoadError::MissingColumns {
            path: path.to_path_buf(),
            missing,
        });
    }

    let mut records = Vec::new();
    for result in rdr.records() {
        let raw = result.map_err(csv_err)?;
        let line = raw.position().map(|p| p.line()).unwrap_or_default();
        let malformed = |reason: String| LoadError::Malformed {
            path: path.to_path_buf(),
            line,
            reason,
        };

        let row: CensusRow = raw
            .deserialize(Some(&headers))
            .map_err(|e| malformed(e.to_string()))?;
        let year = parse_year(&row.year).map_err(malformed)?;

        records.push(Record {
            year,
            values: row.values(),
            sido: row.sido,
            sgg: row.sgg,
        });
    }

    if records.is_empty() {
        return Err(LoadError::Empty {
            path: path.to_path_buf(),
        });
    }

    let dataset = Dataset::new(records);
    let years = dataset.years();
    info!(
        path = %path.display(),
        rows = dataset.len(),
        first_year = years.first().copied().unwrap_or_default(),
        last_year = years.last().copied().unwrap_or_default(),
        "loaded census table"
    );
    Ok(dataset)
}
