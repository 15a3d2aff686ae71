//! Dataset catalog: a JSON luminosity map keyed by dataset name.
//!
//! The catalog is the bookkeeping input that feeds [`Sample`]
//! construction: for each dataset it records the integrated
//! luminosity, the trigger prescale, and the file references backing
//! it. [`build_sample`] turns a list of catalog entries into a ready
//! [`SampleCollection`].

use std::collections::BTreeMap;
use std::path::Path;

use lw_core::{Error, EventSource, Result, SourceLoader};
use serde::{Deserialize, Serialize};

use crate::collection::{CombineMode, Member, SampleCollection};
use crate::sample::Sample;

fn default_prescale() -> f64 {
    1.0
}

/// One dataset entry in the luminosity map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetEntry {
    /// Integrated luminosity, in the catalog's units (e.g. pb⁻¹).
    pub int_lumi: f64,
    /// Trigger prescale; 1.0 means unprescaled.
    #[serde(default = "default_prescale")]
    pub prescale: f64,
    /// File references backing this dataset.
    #[serde(default)]
    pub files: Vec<String>,
}

/// Luminosity map keyed by dataset name.
///
/// `BTreeMap` keeps listings deterministic; the order samples appear
/// in a built collection is the order the caller requests them in, not
/// catalog order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    /// Datasets by name.
    pub datasets: BTreeMap<String, DatasetEntry>,
}

impl Catalog {
    /// Parse a catalog from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        let catalog: Self = serde_json::from_str(text)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load a catalog from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&text)?;
        tracing::debug!(
            path = %path.display(),
            datasets = catalog.datasets.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// Look up a dataset by name.
    pub fn get(&self, name: &str) -> Option<&DatasetEntry> {
        self.datasets.get(name)
    }

    fn validate(&self) -> Result<()> {
        for (name, entry) in &self.datasets {
            if !(entry.int_lumi > 0.0 && entry.int_lumi.is_finite()) {
                return Err(Error::InvalidConfig(format!(
                    "catalog dataset '{}': integrated luminosity must be > 0, got {}",
                    name, entry.int_lumi
                )));
            }
            if !(entry.prescale > 0.0 && entry.prescale.is_finite()) {
                return Err(Error::InvalidConfig(format!(
                    "catalog dataset '{}': prescale must be > 0, got {}",
                    name, entry.prescale
                )));
            }
        }
        Ok(())
    }
}

/// Default loader: dataset file references are already usable paths.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectLoader;

impl SourceLoader for DirectLoader {
    fn resolve(&self, files: &[String]) -> Result<EventSource> {
        Ok(EventSource::from_files(files))
    }
}

/// Build a collection from catalog entries, one leaf sample per
/// requested dataset, in request order.
pub fn build_sample(
    catalog: &Catalog,
    name: impl Into<String>,
    mode: CombineMode,
    datasets: &[&str],
) -> Result<SampleCollection> {
    build_sample_with(&DirectLoader, catalog, name, mode, datasets, 1)
}

/// [`build_sample`] with an explicit [`SourceLoader`] and an event
/// thinning factor.
///
/// `take_every = N` means the event loop will read only 1-in-N events
/// from each source, which is bookkept as an extra prescale of N on
/// every leaf sample. Unknown dataset names and `take_every == 0` are
/// [`Error::InvalidConfig`].
pub fn build_sample_with(
    loader: &impl SourceLoader,
    catalog: &Catalog,
    name: impl Into<String>,
    mode: CombineMode,
    datasets: &[&str],
    take_every: u32,
) -> Result<SampleCollection> {
    let name = name.into();
    if take_every == 0 {
        return Err(Error::InvalidConfig(format!(
            "collection '{}': take_every must be >= 1",
            name
        )));
    }

    let mut members = Vec::with_capacity(datasets.len());
    for &dataset in datasets {
        let entry = catalog.get(dataset).ok_or_else(|| {
            Error::InvalidConfig(format!(
                "collection '{}': dataset '{}' not found in catalog",
                name, dataset
            ))
        })?;
        let source = loader.resolve(&entry.files)?;
        let sample = Sample::with_prescale(
            dataset,
            entry.int_lumi,
            entry.prescale * f64::from(take_every),
            source,
        )?;
        members.push(Member::Sample(sample));
    }

    tracing::debug!(collection = %name, members = members.len(), %mode, "built sample collection");
    SampleCollection::new(name, members, mode)
}
