//! End-to-end reindex cycle: scan, detect changes, read through the content
//! cache, record, prune, persist, and pick the state back up after a
//! simulated restart.

use codemind_content_cache::ContentCache;
use codemind_indexer::{path_key, ChangeTracker, FileScanner};
use codemind_project::{metadata_path_for_root, ProjectContext};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

fn current_mtime(path: &Path) -> f64 {
    fs::metadata(path)
        .and_then(|meta| meta.modified())
        .ok()
        .and_then(|modified| modified.duration_since(UNIX_EPOCH).ok())
        .map(|age| age.as_secs_f64())
        .expect("mtime")
}

fn seed_project(root: &Path) {
    fs::create_dir_all(root.join("src")).unwrap();
    fs::write(root.join("src/main.rs"), "fn main() {}\n").unwrap();
    fs::write(root.join("README.md"), "# demo\n").unwrap();
    fs::create_dir_all(root.join("target/debug")).unwrap();
    fs::write(root.join("target/debug/out.rs"), "// build artifact\n").unwrap();
}

async fn index_changed(
    ctx: &ProjectContext,
    tracker: &ChangeTracker,
    cache: &ContentCache,
    candidates: &[PathBuf],
) -> anyhow::Result<usize> {
    let changed = tracker.changed_since_last_index(candidates).await;
    for path in &changed {
        // Driver contract: resolve, read through the cache, record on success.
        let resolved = ctx.resolve(&path.to_string_lossy())?;
        cache.invalidate(&resolved);
        let _text = cache.read_text(&resolved).await?;
        tracker.record(path_key(path), current_mtime(path));
    }
    Ok(changed.len())
}

#[tokio::test]
async fn full_reindex_cycle_and_restart() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    seed_project(tmp.path());

    let ctx = ProjectContext::new(tmp.path());
    let root = ctx.root();
    let cache = ContentCache::default();
    let tracker = ChangeTracker::new(metadata_path_for_root(&root));
    tracker.load().await;

    let candidates = FileScanner::new(&root).scan();
    // Build artifacts under target/ never make it into the candidate set.
    assert!(candidates
        .iter()
        .all(|p| !p.to_string_lossy().contains("target")));
    assert_eq!(candidates.len(), 2);

    // First run: nothing tracked, everything is changed.
    let indexed = index_changed(&ctx, &tracker, &cache, &candidates).await?;
    assert_eq!(indexed, 2);
    tracker.save().await;

    // Second run in the same process: nothing changed.
    let indexed = index_changed(&ctx, &tracker, &cache, &candidates).await?;
    assert_eq!(indexed, 0);

    // Restart: a fresh tracker reads the persisted mapping.
    let restarted = ChangeTracker::new(metadata_path_for_root(&root));
    restarted.load().await;
    assert_eq!(restarted.stats().total_tracked, 2);
    let indexed = index_changed(&ctx, &restarted, &cache, &candidates).await?;
    assert_eq!(indexed, 0);

    // Simulate an edit that predates the stored mtime marker.
    let main_rs = root.join("src/main.rs");
    restarted.record(path_key(&main_rs), current_mtime(&main_rs) - 5.0);
    let changed = restarted.changed_since_last_index(&candidates).await;
    assert_eq!(changed, vec![main_rs.clone()]);

    // The changed file is re-read from disk after invalidation.
    fs::write(&main_rs, "fn main() { println!(\"v2\"); }\n")?;
    index_changed(&ctx, &restarted, &cache, &changed).await?;
    let text = cache.read_text(&main_rs).await?;
    assert!(text.contains("v2"));

    // Deleting a file and pruning forgets its record.
    fs::remove_file(root.join("README.md"))?;
    let existing: HashSet<String> = FileScanner::new(&root)
        .scan()
        .iter()
        .map(|p| path_key(p))
        .collect();
    restarted.prune(&existing);
    assert_eq!(restarted.stats().total_tracked, 1);
    restarted.save().await;

    Ok(())
}

#[tokio::test]
async fn traversal_attempts_never_reach_the_cache() {
    let tmp = tempfile::tempdir().unwrap();
    seed_project(tmp.path());
    let ctx = ProjectContext::new(tmp.path());

    assert!(ctx.resolve("../../etc/passwd").is_err());
    assert!(ctx.resolve("src/../../escape.rs").is_err());
    // The resolver is the only gate; a clean path goes through.
    assert!(ctx.resolve("src/main.rs").is_ok());
}
