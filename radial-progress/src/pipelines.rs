//! Draw commands produced by the indicator and their GPU-facing layout.

pub mod progress_arc;
