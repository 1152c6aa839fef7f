pub mod line;

pub use line::LineClient;
