//! Arc drawing for circular progress indicators.
//!
//! ## Usage
//!
//! [`RadialProgress::render`](crate::RadialProgress::render) emits
//! [`command::RadialDrawCommand`]s; renderers either consume them directly or
//! pack them with [`instance::build_instances`] for a storage buffer upload.

pub mod command;
pub mod instance;
