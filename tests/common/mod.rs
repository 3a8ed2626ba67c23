#![allow(dead_code)]

use popdash::{Dataset, Record};

pub fn record(year: i32, sido: &str, sgg: &str, total: f64) -> Record {
    Record {
        year,
        sido: sido.to_string(),
        sgg: sgg.to_string(),
        values: [total, total / 2.0, 2.0, total * 0.49, total * 0.51, 0.96],
    }
}

/// 2020: Seoul {Gangnam, Jongno}; 2021: Busan {Haeundae}.
pub fn scenario() -> Dataset {
    Dataset::new(vec![
        record(2020, "Seoul", "Jongno", 150_000.0),
        record(2020, "Seoul", "Gangnam", 540_000.0),
        record(2021, "Busan", "Haeundae", 390_000.0),
    ])
}

/// Seoul in both years (Jongno only in 2020), Busan only in 2021.
pub fn two_years() -> Dataset {
    Dataset::new(vec![
        record(2020, "Seoul", "Gangnam", 540_000.0),
        record(2020, "Seoul", "Jongno", 150_000.0),
        record(2021, "Seoul", "Gangnam", 556_000.0),
        record(2021, "Busan", "Haeundae", 390_000.0),
    ])
}

pub fn values(options: &[popdash::DropdownOption]) -> Vec<&str> {
    options.iter().map(|o| o.value.as_str()).collect()
}

pub const CENSUS_HEADER: &str = "year,sido,sgg,총인구수,세대수,세대당 인구,남자 인구수,여자 인구수,남여 비율";
