use crate::discovery::find_project_root;
use crate::error::{ProjectError, Result};
use crate::layout::ProjectLayout;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::RwLock;

/// The resolved project root plus every state path derived from it.
///
/// Constructed once by whatever composes the indexing driver and the search
/// layer, then shared (typically behind an `Arc`). All file access in the
/// subsystem goes through [`ProjectContext::resolve`]; nothing else may turn
/// a caller-supplied string into a filesystem path.
pub struct ProjectContext {
    inner: RwLock<ProjectLayout>,
}

impl ProjectContext {
    /// Builds a context for an explicitly known root directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let root = root.canonicalize().unwrap_or(root);
        Self {
            inner: RwLock::new(ProjectLayout::for_root(root)),
        }
    }

    /// Builds a context by running project-root discovery.
    pub fn discover(override_path: Option<&Path>) -> Self {
        Self::new(find_project_root(override_path))
    }

    #[must_use]
    pub fn root(&self) -> PathBuf {
        self.read().root().to_path_buf()
    }

    #[must_use]
    pub fn layout(&self) -> ProjectLayout {
        self.read().clone()
    }

    #[must_use]
    pub fn metadata_path(&self) -> PathBuf {
        self.read().metadata_file().to_path_buf()
    }

    /// Replaces the root and every derived path in one step. Readers observe
    /// either the old layout or the new one, never a mix.
    pub fn reconfigure(&self, new_root: impl Into<PathBuf>) {
        let root = new_root.into();
        let root = root.canonicalize().unwrap_or(root);
        log::info!("reconfiguring project root to {}", root.display());
        *self.write() = ProjectLayout::for_root(root);
    }

    /// Validates a caller-supplied path against the project root.
    ///
    /// `"."` resolves to the root itself, not the process working directory.
    /// Relative inputs are joined to the root; symlinks are followed and
    /// `..` collapsed before the containment check, so a path can never
    /// resolve outside the root without failing.
    pub fn resolve(&self, input: &str) -> Result<PathBuf> {
        if input.is_empty() {
            return Err(ProjectError::EmptyPath);
        }

        let root = self.root();
        if input == "." {
            return Ok(root);
        }

        let raw = Path::new(input);
        let candidate = if raw.is_absolute() {
            raw.to_path_buf()
        } else {
            root.join(raw)
        };

        let resolved = resolve_real_path(&candidate, input)?;
        if resolved.starts_with(&root) {
            Ok(resolved)
        } else {
            Err(ProjectError::OutsideRoot {
                path: input.to_string(),
                root,
            })
        }
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, ProjectLayout> {
        self.inner
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, ProjectLayout> {
        self.inner
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

/// Canonicalizes `candidate`, tolerating a not-yet-existing tail.
///
/// The deepest existing ancestor is canonicalized (following symlinks); the
/// remaining components are appended lexically. A `..` in the tail pops the
/// resolved base, so escapes still surface in the containment check.
fn resolve_real_path(candidate: &Path, input: &str) -> Result<PathBuf> {
    match candidate.canonicalize() {
        Ok(resolved) => Ok(resolved),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            let base = candidate
                .ancestors()
                .skip(1)
                .find(|ancestor| ancestor.exists())
                .ok_or_else(|| ProjectError::Unresolvable {
                    path: input.to_string(),
                    source: io::Error::new(io::ErrorKind::NotFound, "no existing ancestor"),
                })?;
            let tail = candidate
                .strip_prefix(base)
                .expect("ancestor is a prefix of candidate");
            let resolved_base =
                base.canonicalize()
                    .map_err(|source| ProjectError::Unresolvable {
                        path: input.to_string(),
                        source,
                    })?;
            Ok(append_lexical(resolved_base, tail))
        }
        Err(source) => Err(ProjectError::Unresolvable {
            path: input.to_string(),
            source,
        }),
    }
}

fn append_lexical(mut base: PathBuf, tail: &Path) -> PathBuf {
    for component in tail.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                base.pop();
            }
            Component::Normal(name) => base.push(name),
            // Absolute prefixes cannot occur in a strip_prefix remainder.
            Component::RootDir | Component::Prefix(_) => {}
        }
    }
    base
}
