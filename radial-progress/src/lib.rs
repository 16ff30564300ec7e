//! A circular progress indicator for frame-driven render trees.
//!
//! # Usage
//!
//! The widget is a leaf component. The host owns the render loop and talks to
//! the widget through three seams:
//!
//! - a [`RenderHost`](radial_progress::RenderHost) that receives redraw and
//!   relayout requests,
//! - a [`Clock`](clock::Clock) that tells the widget what time it is,
//! - [`RadialProgress::on_frame`](radial_progress::RadialProgress::on_frame),
//!   called once per frame while
//!   [`needs_frame`](radial_progress::RadialProgress::needs_frame) is true.
//!
//! # Example
//!
//! ```
//! use std::{sync::Arc, time::Duration};
//!
//! use radial_progress::{
//!     clock::ManualClock,
//!     config::RadialProgressArgs,
//!     radial_progress::{NoopHost, RadialProgress},
//! };
//!
//! let clock = Arc::new(ManualClock::new());
//! let mut widget = RadialProgress::new(
//!     RadialProgressArgs::default().progress(20.0),
//!     Arc::new(NoopHost),
//!     clock.clone(),
//! );
//!
//! widget.animate_progress_to(80.0);
//! clock.advance(Duration::from_millis(1500));
//! widget.on_frame();
//! assert_eq!(widget.progress(), 80.0);
//! ```
#![deny(missing_docs, clippy::unwrap_used)]

pub mod animation;
pub mod clock;
pub mod color;
pub mod config;
pub mod dp;
pub mod error;
pub mod paint;
pub mod pipelines;
pub mod px;
pub mod radial_progress;
pub mod timer;

pub use crate::{
    color::Color,
    dp::Dp,
    error::{RadialProgressError, Result},
    px::{Px, PxSize},
    radial_progress::{ProgressDirection, RadialProgress, RenderHost},
};
