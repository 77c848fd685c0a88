//! Bounded operation runner and the sequential probe plan.
//!
//! [`run_bounded`] times one operation under a hard deadline and turns
//! whatever happens (value, error, panic, or deadline) into an
//! [`OperationRecord`](probe_types::OperationRecord). [`run_plan`] walks the
//! dataset catalog section by section and runs every download through it.

mod deadline;
mod plan;
mod runner;

pub use deadline::Deadline;
pub use plan::{NoopObserver, ProbeObserver, run_plan, run_plan_with};
pub use runner::run_bounded;
