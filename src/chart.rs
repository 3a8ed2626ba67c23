use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use serde::Serialize;

use crate::error::ChartError;
use crate::model::census::Dataset;
use crate::model::metric::Metric;
use crate::model::selection::Selection;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub sido: String,
    pub sgg: String,
    /// NaN when the source cell was blank; serialized as `null`.
    pub value: f64,
}

/// Chart artifact for one selection: a bar per matching record, no aggregation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChart {
    pub title: String,
    pub category: Metric,
    pub bars: Vec<Bar>,
}

/// Filter the dataset down to `sel` and turn every remaining record into a bar,
/// in file order. Unfiltered levels (ALL / nothing picked) match everything.
pub fn render(dataset: &Dataset, sel: &Selection) -> BarChart {
    let sido = sel.sido.name();
    let sgg = sel.sgg.name();
    let bars = dataset
        .records()
        .iter()
        .filter(|r| r.year == sel.year)
        .filter(|r| sido.map_or(true, |s| r.sido == s))
        .filter(|r| sgg.map_or(true, |g| r.sgg == g))
        .map(|r| Bar {
            sido: r.sido.clone(),
            sgg: r.sgg.clone(),
            value: r.value(sel.category),
        })
        .collect();

    BarChart {
        title: format!("{}년 {}", sel.year, sel.category),
        category: sel.category,
        bars,
    }
}

impl BarChart {
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Largest finite bar height, 0 when there is none.
    pub fn max_value(&self) -> f64 {
        self.bars
            .iter()
            .map(|b| b.value)
            .filter(|v| v.is_finite())
            .fold(0.0, f64::max)
    }

    pub fn to_svg(&self, width: u32, height: u32) -> Result<String, ChartError> {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (width, height)).into_drawing_area();
            self.draw(&root).map_err(|e| ChartError(e.to_string()))?;
            root.present().map_err(|e| ChartError(e.to_string()))?;
        }
        Ok(svg)
    }

    fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        root.fill(&WHITE)?;

        if self.bars.is_empty() {
            let area = root.titled(&self.title, ("sans-serif", 24))?;
            let (w, h) = area.dim_in_pixel();
            let style = ("sans-serif", 18)
                .into_font()
                .color(&BLACK.mix(0.6))
                .pos(Pos::new(HPos::Center, VPos::Center));
            area.draw(&Text::new("no data", (w as i32 / 2, h as i32 / 2), style))?;
            return Ok(());
        }

        let n = self.bars.len() as u32;
        let top = match self.max_value() {
            v if v > 0.0 => v * 1.1,
            _ => 1.0,
        };

        let mut chart = ChartBuilder::on(root)
            .caption(&self.title, ("sans-serif", 24))
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(80)
            .build_cartesian_2d((0u32..n).into_segmented(), 0f64..top)?;

        let x_label = |v: &SegmentValue<u32>| match v {
            SegmentValue::CenterOf(i) => self
                .bars
                .get(*i as usize)
                .map(|b| b.sgg.clone())
                .unwrap_or_default(),
            _ => String::new(),
        };

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(self.bars.len())
            .x_label_formatter(&x_label)
            .y_desc(self.category.column())
            .draw()?;

        chart.draw_series(self.bars.iter().enumerate().map(|(i, bar)| {
            let i = i as u32;
            let height = if bar.value.is_finite() { bar.value.max(0.0) } else { 0.0 };
            let mut rect = Rectangle::new(
                [(SegmentValue::Exact(i), 0.0), (SegmentValue::Exact(i + 1), height)],
                BLUE.mix(0.7).filled(),
            );
            rect.set_margin(0, 0, 4, 4);
            rect
        }))?;

        Ok(())
    }
}
