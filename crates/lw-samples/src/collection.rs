//! Sample collections: combining samples under add or merge semantics.

use std::fmt;
use std::str::FromStr;

use lw_core::{Error, EventSource, Result};
use serde::{Deserialize, Serialize};

use crate::sample::{norm_factor, Sample};

/// How a collection combines the luminosities of its members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CombineMode {
    /// Members are statistically independent slices of the same
    /// process recorded in parallel; their effective luminosities sum.
    Add,
    /// Members are alternative, mutually exclusive measurements of the
    /// same events; the lowest effective luminosity caps the usable
    /// exposure for the group (always scale down, never up).
    Merge,
}

impl FromStr for CombineMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "add" => Ok(Self::Add),
            "merge" => Ok(Self::Merge),
            other => Err(Error::InvalidConfig(format!(
                "unrecognized combine mode '{}' (expected 'add' or 'merge')",
                other
            ))),
        }
    }
}

impl fmt::Display for CombineMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add => f.write_str("add"),
            Self::Merge => f.write_str("merge"),
        }
    }
}

/// A member of a collection: either a leaf sample or a nested
/// collection.
#[derive(Debug, Clone)]
pub enum Member {
    /// Leaf sample.
    Sample(Sample),
    /// Nested collection, combined under its own mode.
    Collection(SampleCollection),
}

impl Member {
    /// Member name, for reporting.
    pub fn name(&self) -> &str {
        match self {
            Self::Sample(s) => s.name(),
            Self::Collection(c) => c.name(),
        }
    }

    /// Effective luminosity of this member.
    pub fn effective_luminosity(&self) -> f64 {
        match self {
            Self::Sample(s) => s.effective_luminosity(),
            Self::Collection(c) => c.effective_luminosity(),
        }
    }

    /// Weight needed to scale this member to `target` luminosity.
    pub fn norm_factor_for(&self, target: f64) -> Result<f64> {
        match self {
            Self::Sample(s) => s.norm_factor_for(target),
            Self::Collection(c) => c.norm_factor_for(target),
        }
    }

    /// Flatten this member's leaf sources into `out`, each scaled by
    /// `scale` on top of the member's own internal weighting.
    fn collect_weighted<'a>(&'a self, scale: f64, out: &mut Vec<WeightedSource<'a>>) -> Result<()> {
        match self {
            Self::Sample(s) => {
                out.push(WeightedSource { name: s.name(), source: s.source(), weight: scale });
                Ok(())
            }
            Self::Collection(c) => c.collect_weighted(scale, out),
        }
    }
}

impl From<Sample> for Member {
    fn from(sample: Sample) -> Self {
        Self::Sample(sample)
    }
}

impl From<SampleCollection> for Member {
    fn from(collection: SampleCollection) -> Self {
        Self::Collection(collection)
    }
}

/// One leaf sample's event source together with the weight that scales
/// it to the requested target luminosity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedSource<'a> {
    /// Name of the leaf sample.
    pub name: &'a str,
    /// The leaf sample's event source.
    pub source: &'a EventSource,
    /// Multiplicative per-event weight.
    pub weight: f64,
}

/// An ordered set of samples (or nested collections) combined under one
/// [`CombineMode`].
///
/// Immutable after construction; every query is a pure function of the
/// stored configuration.
#[derive(Debug, Clone)]
pub struct SampleCollection {
    name: String,
    members: Vec<Member>,
    mode: CombineMode,
}

impl SampleCollection {
    /// Create a collection. Fails with [`Error::InvalidConfig`] if
    /// `members` is empty.
    pub fn new(name: impl Into<String>, members: Vec<Member>, mode: CombineMode) -> Result<Self> {
        let name = name.into();
        if members.is_empty() {
            return Err(Error::InvalidConfig(format!(
                "collection '{}' has no members",
                name
            )));
        }
        Ok(Self { name, members, mode })
    }

    /// Collection name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Combination mode.
    pub fn mode(&self) -> CombineMode {
        self.mode
    }

    /// Members in declaration order.
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Effective integrated luminosity of the whole collection.
    ///
    /// `Add` sums the members' effective luminosities; `Merge` takes
    /// the minimum, since the weakest measurement caps the exposure the
    /// group can represent without extrapolating.
    pub fn effective_luminosity(&self) -> f64 {
        let lumis = self.members.iter().map(Member::effective_luminosity);
        match self.mode {
            CombineMode::Add => lumis.sum(),
            CombineMode::Merge => lumis.fold(f64::INFINITY, f64::min),
        }
    }

    /// Weight needed to scale the whole collection to `target`
    /// luminosity.
    pub fn norm_factor_for(&self, target: f64) -> Result<f64> {
        norm_factor(&self.name, self.effective_luminosity(), target)
    }

    /// The flattened `(source, weight)` stream for an event loop.
    ///
    /// Weights are chosen so the whole collection corresponds to an
    /// integrated luminosity of `target_lumi`; `None` means the
    /// collection's own effective luminosity (no rescaling). Yields one
    /// entry per leaf sample, in declaration order. Pure: repeated
    /// calls, with the same or different targets, are independent.
    pub fn events_and_weights(
        &self,
        target_lumi: Option<f64>,
    ) -> Result<Vec<WeightedSource<'_>>> {
        let target = target_lumi.unwrap_or_else(|| self.effective_luminosity());
        let overall = self.norm_factor_for(target)?;
        let mut out = Vec::new();
        self.collect_weighted(overall, &mut out)?;
        Ok(out)
    }

    /// Flatten all leaf sources into `out`, scaled by `scale` on top of
    /// this collection's internal weighting.
    ///
    /// In `Add` mode each member already represents its natural share
    /// of the summed luminosity, so `scale` passes through unchanged.
    /// In `Merge` mode each member is first scaled down to the group's
    /// capped effective luminosity, then `scale` applies on top. A
    /// nested collection recurses with the member's factor folded into
    /// `scale`, which keeps grouping associative.
    fn collect_weighted<'a>(&'a self, scale: f64, out: &mut Vec<WeightedSource<'a>>) -> Result<()> {
        match self.mode {
            CombineMode::Add => {
                for member in &self.members {
                    member.collect_weighted(scale, out)?;
                }
            }
            CombineMode::Merge => {
                let capped = self.effective_luminosity();
                for member in &self.members {
                    let down = member.norm_factor_for(capped)?;
                    member.collect_weighted(down * scale, out)?;
                }
            }
        }
        Ok(())
    }
}
