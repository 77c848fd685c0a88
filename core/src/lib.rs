//! Domain logic for recoil-probe that sits above the pure types.
//!
//! - [`Dataset`] and [`SECTIONS`]: the fixed set of remote files and the
//!   order they are probed in
//! - [`ProbeRun`]: every record of one pass, keyed by dataset
//! - [`report`]: plain-text rendering of per-operation lines, the summary
//!   table, UI recommendations and example estimates
//!
//! Nothing here performs IO. Rendering returns strings; the binary decides
//! where they go.

mod catalog;
pub mod report;
mod run;

pub use catalog::{Dataset, SECTIONS, Section};
pub use report::{Glyphs, glyphs};
pub use run::ProbeRun;
