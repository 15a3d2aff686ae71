//! Leaf sample: one homogeneous data source with a known luminosity.

use lw_core::{Error, EventSource, Result};

/// One homogeneous data source with a known, possibly prescaled,
/// integrated luminosity.
///
/// The sample owns its [`EventSource`] and is immutable after
/// construction, except that the source's file list may be edited
/// through [`Sample::source_mut`] before the event loop starts.
#[derive(Debug, Clone)]
pub struct Sample {
    name: String,
    int_lumi: f64,
    prescale: f64,
    source: EventSource,
}

impl Sample {
    /// Create an unprescaled sample.
    ///
    /// Fails with [`Error::InvalidConfig`] unless `int_lumi` is
    /// strictly positive.
    pub fn new(name: impl Into<String>, int_lumi: f64, source: EventSource) -> Result<Self> {
        Self::with_prescale(name, int_lumi, 1.0, source)
    }

    /// Create a sample recorded at a trigger prescale.
    ///
    /// A prescale of N means only 1-in-N qualifying events were
    /// recorded. Both `int_lumi` and `prescale` must be strictly
    /// positive and finite.
    pub fn with_prescale(
        name: impl Into<String>,
        int_lumi: f64,
        prescale: f64,
        source: EventSource,
    ) -> Result<Self> {
        let name = name.into();
        if !(int_lumi > 0.0 && int_lumi.is_finite()) {
            return Err(Error::InvalidConfig(format!(
                "sample '{}': integrated luminosity must be > 0, got {}",
                name, int_lumi
            )));
        }
        if !(prescale > 0.0 && prescale.is_finite()) {
            return Err(Error::InvalidConfig(format!(
                "sample '{}': prescale must be > 0, got {}",
                name, prescale
            )));
        }
        Ok(Self { name, int_lumi, prescale, source })
    }

    /// Sample name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Integrated luminosity before any prescale correction.
    pub fn int_lumi(&self) -> f64 {
        self.int_lumi
    }

    /// Trigger prescale (1.0 = unprescaled).
    pub fn prescale(&self) -> f64 {
        self.prescale
    }

    /// The event source backing this sample.
    pub fn source(&self) -> &EventSource {
        &self.source
    }

    /// Mutable access to the backing source, for pre-use file-list
    /// rewriting by staging tools.
    pub fn source_mut(&mut self) -> &mut EventSource {
        &mut self.source
    }

    /// Effective integrated luminosity given the prescale:
    /// `int_lumi / prescale`.
    pub fn effective_luminosity(&self) -> f64 {
        self.int_lumi / self.prescale
    }

    /// Weight needed to scale this sample to `target` luminosity.
    pub fn norm_factor_for(&self, target: f64) -> Result<f64> {
        norm_factor(&self.name, self.effective_luminosity(), target)
    }
}

/// `target / effective`, rejecting a degenerate effective luminosity.
pub(crate) fn norm_factor(name: &str, effective: f64, target: f64) -> Result<f64> {
    if !(effective > 0.0 && effective.is_finite()) {
        return Err(Error::DegenerateLuminosity { name: name.to_owned(), value: effective });
    }
    Ok(target / effective)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_effective_luminosity_divides_by_prescale() {
        let s = Sample::with_prescale("s1", 10.0, 16.0, EventSource::new()).unwrap();
        assert_relative_eq!(s.effective_luminosity(), 0.625);
        assert_relative_eq!(s.norm_factor_for(10.0).unwrap(), 16.0);
    }

    #[test]
    fn test_default_prescale_is_identity() {
        let s = Sample::new("s2", 20.0, EventSource::new()).unwrap();
        assert_relative_eq!(s.effective_luminosity(), 20.0);
        assert_relative_eq!(s.norm_factor_for(20.0).unwrap(), 1.0);
    }

    #[test]
    fn test_rejects_nonpositive_luminosity() {
        assert!(Sample::new("bad", 0.0, EventSource::new()).is_err());
        assert!(Sample::new("bad", -3.0, EventSource::new()).is_err());
        assert!(Sample::new("bad", f64::NAN, EventSource::new()).is_err());
    }

    #[test]
    fn test_rejects_nonpositive_prescale() {
        assert!(Sample::with_prescale("bad", 10.0, 0.0, EventSource::new()).is_err());
        assert!(Sample::with_prescale("bad", 10.0, -1.0, EventSource::new()).is_err());
        assert!(Sample::with_prescale("bad", 10.0, f64::INFINITY, EventSource::new()).is_err());
    }

    #[test]
    fn test_source_mut_before_use() {
        let mut s =
            Sample::new("s3", 5.0, EventSource::from_files(["/store/remote/f.root"])).unwrap();
        s.source_mut().retarget(["/tmp/local/f.root"]);
        assert_eq!(s.source().files()[0].to_str(), Some("/tmp/local/f.root"));
    }
}
