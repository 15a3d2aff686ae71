//! Common data types for LumiWeight

use std::path::PathBuf;

/// Opaque handle to the event containers backing one sample.
///
/// An `EventSource` aggregates any number of underlying files into a
/// single logical source. The weighting model never looks inside it:
/// it stores the handle at construction and forwards it, paired with a
/// weight, to whatever consumer runs the event loop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventSource {
    files: Vec<PathBuf>,
}

impl EventSource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a source backed by the given files, in order.
    ///
    /// Every source owns its own freshly allocated file list; sources
    /// built from the same input share nothing.
    pub fn from_files<I, P>(files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self { files: files.into_iter().map(Into::into).collect() }
    }

    /// Append a file to the source.
    ///
    /// Only valid before the source is handed to an event loop; the
    /// weighting model itself never calls this.
    pub fn add_file(&mut self, path: impl Into<PathBuf>) {
        self.files.push(path.into());
    }

    /// Replace the backing file list wholesale, keeping order.
    ///
    /// Staging tools use this to point a sample at local copies of its
    /// files before the event loop starts.
    pub fn retarget<I, P>(&mut self, files: I)
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.files = files.into_iter().map(Into::into).collect();
    }

    /// The backing files, in declaration order.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Number of backing files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the source has no backing files.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_from_files_keeps_order() {
        let src = EventSource::from_files(["a.root", "b.root"]);
        assert_eq!(src.len(), 2);
        assert_eq!(src.files()[0], Path::new("a.root"));
        assert_eq!(src.files()[1], Path::new("b.root"));
    }

    #[test]
    fn test_retarget_replaces_files() {
        let mut src = EventSource::from_files(["/store/remote/a.root"]);
        src.retarget(["/tmp/local/a.root"]);
        assert_eq!(src.files(), &[PathBuf::from("/tmp/local/a.root")]);
    }

    #[test]
    fn test_add_file_appends() {
        let mut src = EventSource::new();
        assert!(src.is_empty());
        src.add_file("a.root");
        src.add_file("b.root");
        assert_eq!(src.len(), 2);
    }
}
