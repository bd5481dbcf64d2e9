use std::env;
use std::path::{Path, PathBuf};

/// Environment variables consulted for the project root, in priority order.
pub const ROOT_ENV_VARS: &[&str] = &["CODEMIND_PROJECT_ROOT", "CODEMIND_ROOT", "WORKSPACE_FOLDER"];

/// Marker entries that identify a directory as a project root.
pub const PROJECT_MARKERS: &[&str] = &[
    ".git",
    ".codemind",
    "package.json",
    "pyproject.toml",
    "Cargo.toml",
    "go.mod",
    "pom.xml",
    "build.gradle",
    ".project",
    ".vscode",
];

// The working directory of the hosting process can be arbitrarily deep inside
// a monorepo; bound the upward search so a marker-less tree terminates fast.
const MAX_MARKER_ASCENT: usize = 10;

/// Locates the project root directory.
///
/// Resolution order: explicit override, then [`ROOT_ENV_VARS`], then an
/// upward marker search from the working directory, then the working
/// directory itself. The result is canonicalized when possible.
#[must_use]
pub fn find_project_root(override_path: Option<&Path>) -> PathBuf {
    if let Some(root) = override_path {
        if root.is_dir() {
            return canonicalized(root);
        }
        log::warn!(
            "ignoring project root override {}: not a directory",
            root.display()
        );
    }

    if let Some(root) = env_root_override() {
        return canonicalized(&root);
    }

    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    if let Some(root) = find_marker_root_from(&cwd) {
        return canonicalized(&root);
    }
    canonicalized(&cwd)
}

fn env_root_override() -> Option<PathBuf> {
    for key in ROOT_ENV_VARS {
        let Ok(value) = env::var(key) else {
            continue;
        };
        let trimmed = value.trim();
        if trimmed.is_empty() {
            continue;
        }
        let candidate = PathBuf::from(trimmed);
        if candidate.is_dir() {
            return Some(candidate);
        }
        log::warn!("ignoring {key}={trimmed}: not a directory");
    }
    None
}

fn find_marker_root_from(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .take(MAX_MARKER_ASCENT)
        .find(|dir| has_project_marker(dir))
        .map(PathBuf::from)
}

fn has_project_marker(dir: &Path) -> bool {
    PROJECT_MARKERS.iter().any(|marker| dir.join(marker).exists())
}

fn canonicalized(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{EnvGuard, ENV_MUTEX};
    use pretty_assertions::assert_eq;
    use std::fs;

    #[test]
    fn override_wins_over_env_vars() {
        let _lock = ENV_MUTEX.lock().expect("ENV_MUTEX");
        let _guard = EnvGuard::new(ROOT_ENV_VARS);

        let env_dir = tempfile::tempdir().expect("tempdir");
        let override_dir = tempfile::tempdir().expect("tempdir");
        env::set_var("CODEMIND_PROJECT_ROOT", env_dir.path());

        let root = find_project_root(Some(override_dir.path()));
        assert_eq!(root, override_dir.path().canonicalize().unwrap());
    }

    #[test]
    fn env_var_priority_order_is_respected() {
        let _lock = ENV_MUTEX.lock().expect("ENV_MUTEX");
        let _guard = EnvGuard::new(ROOT_ENV_VARS);

        let first = tempfile::tempdir().expect("tempdir");
        let second = tempfile::tempdir().expect("tempdir");
        env::set_var("CODEMIND_ROOT", first.path());
        env::set_var("WORKSPACE_FOLDER", second.path());

        let root = find_project_root(None);
        assert_eq!(root, first.path().canonicalize().unwrap());
    }

    #[test]
    fn nonexistent_env_root_is_skipped() {
        let _lock = ENV_MUTEX.lock().expect("ENV_MUTEX");
        let _guard = EnvGuard::new(ROOT_ENV_VARS);

        let real = tempfile::tempdir().expect("tempdir");
        env::set_var("CODEMIND_PROJECT_ROOT", "/no/such/dir/codemind");
        env::set_var("CODEMIND_ROOT", real.path());

        let root = find_project_root(None);
        assert_eq!(root, real.path().canonicalize().unwrap());
    }

    #[test]
    fn marker_search_finds_repo_root_from_nested_dir() {
        let _lock = ENV_MUTEX.lock().expect("ENV_MUTEX");
        let _guard = EnvGuard::new(ROOT_ENV_VARS);

        let tmp = tempfile::tempdir().expect("tempdir");
        let repo = tmp.path().join("repo");
        let nested = repo.join("src").join("deep");
        fs::create_dir_all(&nested).unwrap();
        fs::create_dir_all(repo.join(".git")).unwrap();

        let found = find_marker_root_from(&nested).expect("marker root");
        assert_eq!(found, repo);
    }

    #[test]
    fn nearest_marker_wins() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let repo = tmp.path().join("repo");
        let sub = repo.join("pkg");
        let deep = sub.join("src");
        fs::create_dir_all(&deep).unwrap();
        fs::create_dir_all(repo.join(".git")).unwrap();
        fs::write(sub.join("package.json"), "{}").unwrap();

        let found = find_marker_root_from(&deep).expect("marker root");
        assert_eq!(found, sub);
    }
}
