//! Resolution of plugins installed as packages on disk.
//!
//! A plugin `name` is installed when `<root>/node_modules/<name>/package.json`
//! exists and is readable. Scoped names (`@scope/pkg`) map to nested
//! directories. The manifest supplies the reported version.

use std::path::{Component, Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use super::{PluginLocation, PluginPackage, PluginResolver};

/// Directory holding installed packages, relative to a search root.
pub const PACKAGES_DIR: &str = "node_modules";

/// Manifest file that marks a directory as an installed package.
pub const MANIFEST_FILE: &str = "package.json";

#[derive(Debug, Deserialize)]
struct Manifest {
    name: Option<String>,
    version: Option<String>,
}

/// Locates plugins installed under one or more package directories.
///
/// # Example
///
/// ```rust
/// use std::fs;
/// use stylecfg::{PackageDirResolver, PluginResolver};
///
/// let project = tempfile::tempdir()?;
/// let web = project.path().join("web");
/// let pkg = project.path().join("node_modules/@acme/forms");
/// fs::create_dir_all(&web)?;
/// fs::create_dir_all(&pkg)?;
/// fs::write(pkg.join("package.json"), r#"{"name": "@acme/forms", "version": "1.2.0"}"#)?;
///
/// let resolver = PackageDirResolver::new(&web).search_ancestors(true);
/// let forms = resolver.locate("@acme/forms").expect("installed one level up");
/// assert_eq!(forms.version.as_deref(), Some("1.2.0"));
/// assert!(PackageDirResolver::new(&web).locate("@acme/forms").is_none());
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct PackageDirResolver {
    root: PathBuf,
    ancestors: bool,
}

impl PackageDirResolver {
    /// Resolves packages under `<root>/node_modules`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ancestors: false,
        }
    }

    /// Also search `node_modules` of every parent directory, nearest first.
    pub fn search_ancestors(mut self, enabled: bool) -> Self {
        self.ancestors = enabled;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn search_roots(&self) -> Vec<&Path> {
        if self.ancestors {
            self.root.ancestors().collect()
        } else {
            vec![self.root.as_path()]
        }
    }
}

impl PluginResolver for PackageDirResolver {
    fn locate(&self, name: &str) -> Option<PluginPackage> {
        if !is_package_name(name) {
            debug!(plugin = %name, "not a valid package name");
            return None;
        }

        self.search_roots().into_iter().find_map(|root| {
            let dir = root.join(PACKAGES_DIR).join(name);
            read_package(name, &dir)
        })
    }
}

fn read_package(name: &str, dir: &Path) -> Option<PluginPackage> {
    let manifest_path = dir.join(MANIFEST_FILE);
    let content = std::fs::read_to_string(&manifest_path).ok()?;

    let manifest: Manifest = match serde_json::from_str(&content) {
        Ok(manifest) => manifest,
        Err(err) => {
            warn!(path = %manifest_path.display(), error = %err, "unreadable package manifest");
            return None;
        }
    };

    if let Some(declared) = manifest.name.as_deref() {
        if declared != name {
            warn!(plugin = %name, declared = %declared, "package manifest declares a different name");
        }
    }

    Some(PluginPackage {
        name: name.to_string(),
        version: manifest.version,
        location: PluginLocation::Directory(dir.to_path_buf()),
    })
}

/// Accepts `pkg` and `@scope/pkg`; rejects anything that could escape the
/// packages directory.
fn is_package_name(name: &str) -> bool {
    let components: Vec<_> = Path::new(name).components().collect();
    if !components.iter().all(|c| matches!(c, Component::Normal(_))) {
        return false;
    }
    match components.as_slice() {
        [_] => !name.starts_with('@'),
        [Component::Normal(scope), _] => scope.to_string_lossy().starts_with('@'),
        _ => false,
    }
}
