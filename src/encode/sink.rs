use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::error::{FractalError, FractalResult};

/// What an artifact contains.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArtifactKind {
    /// A single PNG still.
    Image,
    /// A finished video container.
    Video,
    /// A zip archive of PNG frames.
    Archive,
}

/// A finished file handed to the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artifact {
    /// Suggested file name (no directories).
    pub filename: String,
    /// Content category.
    pub kind: ArtifactKind,
    /// MIME type of `bytes`.
    pub mime: &'static str,
    /// File contents.
    pub bytes: Vec<u8>,
}

/// Destination for exported artifacts.
///
/// Delivery order is the order of calls. A sink never receives partial artifacts.
pub trait ArtifactSink {
    /// Deliver one artifact.
    fn deliver(&mut self, artifact: Artifact) -> FractalResult<()>;
}

/// Writes artifacts as files into a directory, creating it on first delivery.
#[derive(Clone, Debug)]
pub struct DirectorySink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl DirectorySink {
    /// Sink writing into `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: Vec::new(),
        }
    }

    /// Target directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Paths written so far, in delivery order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl ArtifactSink for DirectorySink {
    fn deliver(&mut self, artifact: Artifact) -> FractalResult<()> {
        if artifact.filename.is_empty()
            || artifact.filename.contains(['/', '\\'])
            || artifact.filename == ".."
        {
            return Err(FractalError::validation(format!(
                "artifact filename '{}' must be a plain file name",
                artifact.filename
            )));
        }
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create output directory '{}'", self.dir.display()))?;
        let path = self.dir.join(&artifact.filename);
        std::fs::write(&path, &artifact.bytes)
            .with_context(|| format!("failed to write '{}'", path.display()))?;
        tracing::info!(path = %path.display(), bytes = artifact.bytes.len(), "artifact written");
        self.written.push(path);
        Ok(())
    }
}

/// In-memory sink for tests and embedding.
#[derive(Debug, Default)]
pub struct InMemoryArtifactSink {
    pub(crate) artifacts: Vec<Artifact>,
}

impl InMemoryArtifactSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow delivered artifacts.
    pub fn artifacts(&self) -> &[Artifact] {
        &self.artifacts
    }

    /// Take delivered artifacts, leaving the sink empty.
    pub fn take(&mut self) -> Vec<Artifact> {
        std::mem::take(&mut self.artifacts)
    }
}

impl ArtifactSink for InMemoryArtifactSink {
    fn deliver(&mut self, artifact: Artifact) -> FractalResult<()> {
        self.artifacts.push(artifact);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png(name: &str) -> Artifact {
        Artifact {
            filename: name.to_owned(),
            kind: ArtifactKind::Image,
            mime: "image/png",
            bytes: vec![1, 2, 3],
        }
    }

    #[test]
    fn in_memory_keeps_delivery_order() {
        let mut sink = InMemoryArtifactSink::new();
        sink.deliver(png("a.png")).unwrap();
        sink.deliver(png("b.png")).unwrap();
        let names: Vec<_> = sink.artifacts().iter().map(|a| a.filename.as_str()).collect();
        assert_eq!(names, ["a.png", "b.png"]);
        assert_eq!(sink.take().len(), 2);
        assert!(sink.artifacts().is_empty());
    }

    #[test]
    fn directory_sink_rejects_paths() {
        let mut sink = DirectorySink::new(std::env::temp_dir().join("fractal_blend_sink_reject"));
        assert!(sink.deliver(png("../escape.png")).is_err());
        assert!(sink.deliver(png("")).is_err());
        assert!(sink.written().is_empty());
    }
}
