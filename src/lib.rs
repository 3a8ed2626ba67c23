pub mod api;
pub mod chart;
pub mod config;
pub mod error;
pub mod io;
pub mod model;
pub mod page;
pub mod session;

pub use chart::{render, Bar, BarChart};
pub use error::LoadError;
pub use io::census::{load_census_csv, LoadOptions};
pub use model::census::{Dataset, Record};
pub use model::metric::Metric;
pub use model::options::{category_options, sgg_options, sido_options, year_options, DropdownOption};
pub use model::selection::{apply_event, Event, RegionChoice, Selection, StalePolicy};
