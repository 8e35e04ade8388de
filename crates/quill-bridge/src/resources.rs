//! Sources of bundled ambient declaration files.

use std::collections::HashMap;
use std::io;
use std::path::Path;
use std::sync::Arc;

use cap_std::ambient_authority;
use cap_std::fs::Dir;

/// Read access to bundled resources.
pub trait ResourceSource: Send + Sync {
    /// Reads the resource at `path`, returning `Ok(None)` when it is absent.
    fn read(&self, path: &str) -> Result<Option<String>, io::Error>;
}

/// Resources compiled into the binary, typically with `include_str!`.
#[derive(Debug, Clone, Default)]
pub struct StaticResources {
    entries: HashMap<&'static str, &'static str>,
}

impl StaticResources {
    /// Builds a source from `(path, text)` pairs.
    #[must_use]
    pub fn new(entries: impl IntoIterator<Item = (&'static str, &'static str)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }
}

impl ResourceSource for StaticResources {
    fn read(&self, path: &str) -> Result<Option<String>, io::Error> {
        Ok(self.entries.get(path).map(|text| (*text).to_owned()))
    }
}

/// Resources shipped as files next to the application.
///
/// Reads are confined to the opened directory.
#[derive(Debug)]
pub struct DirectoryResources {
    dir: Dir,
}

impl DirectoryResources {
    /// Opens `path` as the resource directory.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, io::Error> {
        let dir = Dir::open_ambient_dir(path, ambient_authority())?;
        Ok(Self { dir })
    }
}

impl ResourceSource for DirectoryResources {
    fn read(&self, path: &str) -> Result<Option<String>, io::Error> {
        match self.dir.read_to_string(path) {
            Ok(content) => Ok(Some(content)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error),
        }
    }
}

/// Ordered set of resources registered as shared libraries.
#[derive(Clone)]
pub struct LibraryBundle {
    source: Arc<dyn ResourceSource>,
    paths: Vec<String>,
}

impl LibraryBundle {
    /// Pairs `source` with the resource paths to register, in order.
    #[must_use]
    pub fn new<I, S>(source: Arc<dyn ResourceSource>, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            source,
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    /// A bundle with no libraries.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(Arc::new(StaticResources::default()), Vec::<String>::new())
    }

    /// Resource paths in registration order.
    #[must_use]
    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    /// Source the paths are read from.
    #[must_use]
    pub fn source(&self) -> &dyn ResourceSource {
        self.source.as_ref()
    }
}

impl std::fmt::Debug for LibraryBundle {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("LibraryBundle")
            .field("paths", &self.paths)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    #[rstest]
    fn static_resources_report_missing_paths() {
        let source = StaticResources::new([("types/host.d.ts", "declare const host: unknown;")]);

        assert_eq!(
            source.read("types/host.d.ts").expect("read").as_deref(),
            Some("declare const host: unknown;")
        );
        assert_eq!(source.read("types/other.d.ts").expect("read"), None);
    }

    #[rstest]
    fn directory_resources_read_relative_paths() {
        let temp = TempDir::new().expect("temp dir");
        fs::create_dir(temp.path().join("types")).expect("mkdir");
        fs::write(temp.path().join("types/ui.d.ts"), "declare const ui: object;")
            .expect("write resource");

        let source = DirectoryResources::open(temp.path()).expect("open resources");

        assert_eq!(
            source.read("types/ui.d.ts").expect("read").as_deref(),
            Some("declare const ui: object;")
        );
        assert_eq!(source.read("types/absent.d.ts").expect("read"), None);
    }

    #[rstest]
    fn directory_resources_refuse_to_escape() {
        let temp = TempDir::new().expect("temp dir");
        let source = DirectoryResources::open(temp.path()).expect("open resources");

        assert!(source.read("../outside.d.ts").is_err());
    }
}
