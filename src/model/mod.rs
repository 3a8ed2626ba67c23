pub mod census;
pub mod metric;
pub mod options;
pub mod selection;
