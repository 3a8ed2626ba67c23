mod common;

use common::{record, scenario, two_years};
use popdash::{render, Dataset, Metric, RegionChoice, Selection};

fn sel(year: i32, sido: RegionChoice, sgg: RegionChoice, category: Metric) -> Selection {
    Selection {
        year,
        sido,
        sgg,
        category,
    }
}

#[test]
fn scenario_two_bars() {
    let chart = render(
        &scenario(),
        &sel(2020, RegionChoice::Only("Seoul".into()), RegionChoice::All, Metric::TotalPopulation),
    );

    let bars: Vec<_> = chart.bars.iter().map(|b| (b.sgg.as_str(), b.value)).collect();
    // File order, not sorted.
    assert_eq!(bars, [("Jongno", 150_000.0), ("Gangnam", 540_000.0)]);
    assert_eq!(chart.title, "2020년 총인구수");
    assert_eq!(chart.category, Metric::TotalPopulation);
}

#[test]
fn sgg_filter_narrows_to_one_bar() {
    let chart = render(
        &scenario(),
        &sel(
            2020,
            RegionChoice::Only("Seoul".into()),
            RegionChoice::Only("Gangnam".into()),
            Metric::Households,
        ),
    );
    assert_eq!(chart.bars.len(), 1);
    assert_eq!(chart.bars[0].value, 270_000.0);
}

#[test]
fn unfiltered_levels_match_the_whole_year() {
    let data = two_years();
    for sido in [RegionChoice::All, RegionChoice::Unselected] {
        let chart = render(&data, &sel(2021, sido, RegionChoice::Unselected, Metric::TotalPopulation));
        let labels: Vec<_> = chart.bars.iter().map(|b| (b.sido.as_str(), b.sgg.as_str())).collect();
        assert_eq!(labels, [("Seoul", "Gangnam"), ("Busan", "Haeundae")]);
    }
}

#[test]
fn duplicate_rows_are_not_aggregated() {
    let data = Dataset::new(vec![
        record(2020, "Seoul", "Jongno", 1.0),
        record(2020, "Seoul", "Jongno", 2.0),
    ]);
    let chart = render(&data, &sel(2020, RegionChoice::All, RegionChoice::All, Metric::TotalPopulation));
    assert_eq!(chart.bars.len(), 2);
    assert_eq!(chart.max_value(), 2.0);
}

#[test]
fn empty_result_is_an_empty_chart() {
    let chart = render(
        &scenario(),
        &sel(2020, RegionChoice::Only("Busan".into()), RegionChoice::All, Metric::TotalPopulation),
    );
    assert!(chart.is_empty());
    assert_eq!(chart.max_value(), 0.0);

    let chart = render(&scenario(), &sel(1999, RegionChoice::All, RegionChoice::All, Metric::TotalPopulation));
    assert!(chart.is_empty());
}

#[test]
fn blank_values_serialize_as_null() {
    let mut r = record(2020, "Seoul", "Jongno", 1.0);
    r.values[Metric::SexRatio.index()] = f64::NAN;
    let data = Dataset::new(vec![r]);

    let chart = render(&data, &sel(2020, RegionChoice::All, RegionChoice::All, Metric::SexRatio));
    assert!(chart.bars[0].value.is_nan());
    assert_eq!(chart.max_value(), 0.0);

    let json = serde_json::to_value(&chart).unwrap();
    assert!(json["bars"][0]["value"].is_null());
    assert_eq!(json["bars"][0]["sgg"], "Jongno");
}

#[test]
fn svg_has_title_and_a_rect_per_bar() {
    let chart = render(
        &scenario(),
        &sel(2020, RegionChoice::Only("Seoul".into()), RegionChoice::All, Metric::TotalPopulation),
    );
    let svg = chart.to_svg(800, 400).expect("svg");
    assert!(svg.contains("<svg"));
    assert!(svg.trim_end().ends_with("</svg>"));
    assert!(svg.contains("2020년 총인구수"));
    // background + one per bar at least
    assert!(svg.matches("<rect").count() >= 1 + chart.bars.len());
}

#[test]
fn empty_svg_says_no_data() {
    let chart = render(&scenario(), &sel(1999, RegionChoice::All, RegionChoice::All, Metric::TotalPopulation));
    let svg = chart.to_svg(800, 400).expect("svg");
    assert!(svg.contains("no data"));
    assert!(svg.contains("1999년 총인구수"));
}
