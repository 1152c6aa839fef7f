pub mod jma;
pub mod yahoo;

pub use jma::JmaClient;
pub use yahoo::YahooClient;

use std::time::Duration;

/// Upper bound for every outbound request, fetches and push alike.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
