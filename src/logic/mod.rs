pub mod compose;
pub mod extract;
pub mod reporter;

pub use compose::compose_place_report;
pub use reporter::ForecastReporter;
