//! # DEMOSET
//!
//! Create small demo subsets of large NumPy (`.npy`) datasets, for quick local testing
//! without the full-scale data.
//!
//! A 3-D dataset (`[samples, y, x]`) is truncated to its first samples, a 2-D metadata
//! array (a mask, a latitude or longitude grid) is copied verbatim. Files with any other
//! number of dimensions are skipped.
//!
//! ## Usage
//!
//! Describe the files to process in a [Configuration](config::Configuration), then
//! [run](run::run) it:
//!
//! ```no_run
//! use demoset::prelude::*;
//!
//! let c = Configuration::new(
//!     150,
//!     vec![
//!         ProcessingItem::new("training data", "/data/train/ubar_hr.npy", "demo/ubar_hr.npy"),
//!         ProcessingItem::new("mask", "/data/static/mask_hr_full.npy", "demo/mask.npy"),
//!     ],
//! )
//! .unwrap();
//!
//! let report = run(&c);
//! println!("{report:?}");
//! ```
//!
//! A single file can also be processed with [subset::process].

#[macro_use]
extern crate anyhow;

#[macro_use]
extern crate log;

pub mod config;
pub mod npy;
pub mod run;
pub mod subset;

#[cfg(test)]
mod testlog;

pub mod prelude {
    pub use super::config::{Configuration, ProcessingItem};
    pub use super::npy::{Header, NpyArray};
    pub use super::run::{run, Report};
    pub use super::subset::{process, Outcome, Overflow, Skip, Subsetter};
}
