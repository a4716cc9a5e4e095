//! Core run logic that does no I/O of its own

pub mod dataset;
pub mod invocation;
pub mod overrides;
pub mod report;

pub use dataset::DatasetLayout;
pub use invocation::Invocation;
pub use overrides::demo_overrides;
pub use report::{CapturedOutput, ExitOutcome, RunReport};
