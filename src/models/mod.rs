pub mod forecast;
pub mod report;

pub use forecast::*;
pub use report::*;
