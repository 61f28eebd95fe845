//! Dice-o-metric (workspace facade crate).
//!
//! Re-exports the member crates under `crates/` as
//! `dice_o_metric::{core,input,term,types}` so the binary, integration tests and
//! benchmarks share one import path.

pub use dice_o_metric_core as core;
pub use dice_o_metric_input as input;
pub use dice_o_metric_term as term;
pub use dice_o_metric_types as types;
