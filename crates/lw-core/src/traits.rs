//! Collaborator seams for LumiWeight
//!
//! The weighting model neither opens files nor iterates events. These
//! traits name the two capabilities it relies on from the outside:
//! resolving declared file references into an [`EventSource`], and
//! consuming the `(source, weight)` pairs the model produces.

use crate::types::EventSource;
use crate::Result;

/// Resolves a sample's declared file references into a concrete source
/// handle (e.g. by mapping dataset paths onto a local mirror).
pub trait SourceLoader {
    /// Resolve an ordered list of file references into one source.
    fn resolve(&self, files: &[String]) -> Result<EventSource>;
}

/// Anything that runs an event loop over a weighted source.
pub trait EventConsumer {
    /// Process one source, applying `weight` to every event drawn from it.
    fn consume(&mut self, source: &EventSource, weight: f64) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct PassthroughLoader;

    impl SourceLoader for PassthroughLoader {
        fn resolve(&self, files: &[String]) -> Result<EventSource> {
            Ok(EventSource::from_files(files))
        }
    }

    struct WeightTally {
        total: f64,
    }

    impl EventConsumer for WeightTally {
        fn consume(&mut self, _source: &EventSource, weight: f64) -> Result<()> {
            self.total += weight;
            Ok(())
        }
    }

    #[test]
    fn test_passthrough_loader() {
        let loader = PassthroughLoader;
        let src = loader.resolve(&["a.root".into(), "b.root".into()]).unwrap();
        assert_eq!(src.len(), 2);
    }

    #[test]
    fn test_consumer_sees_weights() {
        let mut tally = WeightTally { total: 0.0 };
        let src = EventSource::new();
        tally.consume(&src, 0.5).unwrap();
        tally.consume(&src, 1.5).unwrap();
        assert_eq!(tally.total, 2.0);
    }
}
