//! Stub commands and the layout rules they share.

pub mod add;
pub mod set;

use anyhow::{bail, Context, Result};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Empty (project root) or `sites/<site>`; the site must exist.
pub fn site_root(site: Option<&str>) -> Result<PathBuf> {
    match site {
        Some(site) => {
            let root = Path::new("sites").join(site);
            if !root.is_dir() {
                bail!("Site '{}' not found", site);
            }
            Ok(root)
        }
        None => Ok(PathBuf::new()),
    }
}

/// `<site root>/pages/<page>`; the pages directory must exist.
pub fn page_dir(page: &str, site: Option<&str>) -> Result<PathBuf> {
    let pages = site_root(site)?.join("pages");
    if !pages.is_dir() {
        bail!("No pages directory at {}", pages.display());
    }
    Ok(pages.join(page))
}

/// Read `page.yml` of an existing page.
pub fn load_manifest(dir: &Path) -> Result<Mapping> {
    let path = dir.join("page.yml");
    if !path.exists() {
        bail!("Page '{}' not found", dir.display());
    }
    let content =
        fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))?;
    let value: Value = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    match value {
        Value::Mapping(map) => Ok(map),
        Value::Null => Ok(Mapping::new()),
        _ => bail!("{} is not a mapping", path.display()),
    }
}

/// Write `page.yml`.
pub fn save_manifest(dir: &Path, manifest: &Mapping) -> Result<()> {
    let path = dir.join("page.yml");
    let content = serde_yaml::to_string(manifest)?;
    fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))
}

/// Write a file, creating parent directories.
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directories for {}", path.display()))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write file: {}", path.display()))
}
