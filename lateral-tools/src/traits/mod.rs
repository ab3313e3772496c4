pub mod detector;

pub use detector::{HgtDetector, PreparedInput, RunContext};
