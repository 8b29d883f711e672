pub mod classify;
pub mod countries;
pub mod error;
pub mod fallback;
pub mod features;
pub mod hash;
pub mod ingest;
pub mod mood;
pub mod policy;
pub mod score;
pub mod sentiment;
pub mod spike;
pub mod stats;
pub mod summary;
pub mod types;

pub use error::{MoodError, Result};
pub use ingest::{run_ingest, IngestReport, IngestSnapshot};
pub use mood::{batch_compute, compute_mood};
pub use policy::MoodPolicy;
pub use types::*;

/// Round `value` to `digits` decimal places (half away from zero).
pub(crate) fn round_to(value: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits);
    (value * factor).round() / factor
}
