//! Orchestration of external HGT-detection tools.
//!
//! One `HgtDetector` implementation per external tool (T-REX, RANGER-DTL,
//! RIATA-HGT, Jane 4, CONSEL AU pipeline), a generic batch driver that
//! iterates gene trees through any detector, a timed subprocess invocation
//! layer, and the batch-queue job submitter.

// Modules
pub mod convert;
pub mod detectors;
pub mod driver;
pub mod invoke;
pub mod queue;
pub mod testing;
pub mod traits;
pub mod types;

// Re-exports for convenience
pub use detectors::{detector_for, ConselDetector, JaneDetector, RangerDetector, RiataDetector, TrexDetector};
pub use driver::{run_batch, BatchSummary};
pub use invoke::{run_timed, ProcessOutput};
pub use queue::{JobRequest, Resources, Submitter, SubmitMode};
pub use traits::{HgtDetector, PreparedInput, RunContext};
pub use types::Tool;
