use crate::tracker::ChangeRecord;
use crate::Result;
use std::collections::HashMap;
use std::path::Path;

/// Reads the persisted metadata document, `Ok(None)` when it does not exist.
pub async fn read_metadata(path: &Path) -> Result<Option<HashMap<String, ChangeRecord>>> {
    if !path.exists() {
        return Ok(None);
    }
    let bytes = tokio::fs::read(path).await?;
    Ok(Some(serde_json::from_slice(&bytes)?))
}

/// Persists the metadata document atomically (tmp file + rename), creating
/// the state directory when missing.
pub async fn write_metadata(path: &Path, records: &HashMap<String, ChangeRecord>) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let bytes = serde_json::to_vec_pretty(records)?;
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, bytes).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}
