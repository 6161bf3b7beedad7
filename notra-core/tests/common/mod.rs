//! Helpers shared by the integration tests

use anyhow::Result;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Once;
use walkdir::WalkDir;

static INIT: Once = Once::new();

/// Initialize logging for tests (only once per test run)
pub fn init_test_logging() {
    INIT.call_once(|| {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let _ = tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().with_test_writer())
            .with(tracing_subscriber::filter::EnvFilter::from_default_env())
            .try_init();
    });
}

/// Write `files` (relative path, content) under `root`
pub fn write_tree(root: &Path, files: &[(&str, &str)]) -> Result<()> {
    for (relative, content) in files {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
    }
    Ok(())
}

/// Every regular file under `root` as `/`-separated relative path -> bytes
pub fn read_tree(root: &Path) -> Result<BTreeMap<String, Vec<u8>>> {
    let mut tree = BTreeMap::new();
    for entry in WalkDir::new(root).min_depth(1) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(root)?
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("/");
        tree.insert(relative, fs::read(entry.path())?);
    }
    Ok(tree)
}
