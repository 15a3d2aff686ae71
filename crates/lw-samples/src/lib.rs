//! # lw-samples
//!
//! Luminosity-weighted sample aggregation.
//!
//! A [`Sample`] ties one homogeneous data source to its integrated
//! luminosity and trigger prescale. A [`SampleCollection`] combines
//! samples (or nested collections) under one of two policies —
//! [`CombineMode::Add`] for independent slices whose luminosities sum,
//! [`CombineMode::Merge`] for alternative measurements capped by the
//! weakest member — and answers the one question an event loop needs:
//! which sources to read, and with what per-event weight, so that the
//! whole collection represents a chosen target luminosity.
//!
//! # Example
//!
//! ```
//! use lw_core::EventSource;
//! use lw_samples::{CombineMode, Sample, SampleCollection};
//!
//! let prescaled = Sample::with_prescale("lowpt", 10.0, 16.0, EventSource::new())?;
//! let unprescaled = Sample::new("highpt", 20.0, EventSource::new())?;
//!
//! let combined = SampleCollection::new(
//!     "dijet",
//!     vec![prescaled.into(), unprescaled.into()],
//!     CombineMode::Merge,
//! )?;
//!
//! assert_eq!(combined.effective_luminosity(), 0.625);
//! for ws in combined.events_and_weights(Some(5.0))? {
//!     println!("{}: weight {}", ws.name, ws.weight);
//! }
//! # Ok::<(), lw_core::Error>(())
//! ```

#![warn(clippy::all)]

pub mod catalog;
pub mod collection;
pub mod sample;

pub use catalog::{build_sample, build_sample_with, Catalog, DatasetEntry, DirectLoader};
pub use collection::{CombineMode, Member, SampleCollection, WeightedSource};
pub use sample::Sample;
