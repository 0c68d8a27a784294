//! Recursive directory snapshots used by structure assertions.

use std::collections::BTreeMap;
use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use tracing::{debug, warn};

/// A directory mirrored as a name-ordered map.
pub type DirTree = BTreeMap<String, DirEntry>;

/// One entry of a [`DirTree`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirEntry {
    /// A regular file (or anything that is not a directory).
    File,
    /// A subdirectory and its contents.
    Dir(DirTree),
    /// An entry whose metadata or contents could not be read.
    Inaccessible,
}

impl DirEntry {
    /// True for [`DirEntry::Dir`].
    pub fn is_dir(&self) -> bool {
        matches!(self, Self::Dir(_))
    }
}

/// Walk `dir` recursively. A missing or unreadable root yields an empty tree;
/// entries below it that cannot be read, or whose listing breaks off part
/// way, become [`DirEntry::Inaccessible`] while their siblings are still
/// reported.
pub async fn snapshot(dir: &Path) -> DirTree {
    read_level(dir).await.unwrap_or_default()
}

type LevelFuture<'a> = Pin<Box<dyn Future<Output = Option<DirTree>> + Send + 'a>>;

// Boxed so the walk can recurse.
fn read_level(dir: &Path) -> LevelFuture<'_> {
    Box::pin(async move {
        let mut entries = tokio::fs::read_dir(dir).await.ok()?;
        let mut tree = DirTree::new();

        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    // A partial listing is not passed off as complete.
                    warn!("Listing of {} broke off: {}", dir.display(), e);
                    return None;
                }
            };
            let name = entry.file_name().to_string_lossy().into_owned();
            let path = entry.path();
            let kind = match entry.file_type().await {
                Ok(ft) if ft.is_dir() => match read_level(&path).await {
                    Some(sub) => DirEntry::Dir(sub),
                    None => DirEntry::Inaccessible,
                },
                Ok(_) => DirEntry::File,
                Err(e) => {
                    debug!("Cannot stat {}: {}", path.display(), e);
                    DirEntry::Inaccessible
                }
            };
            tree.insert(name, kind);
        }

        Some(tree)
    })
}

/// Look up a `/`-separated relative path inside a tree.
pub fn lookup<'a>(tree: &'a DirTree, path: &str) -> Option<&'a DirEntry> {
    let mut parts = path.split('/').filter(|p| !p.is_empty() && *p != ".").peekable();
    let mut current = tree;

    while let Some(part) = parts.next() {
        let entry = current.get(part)?;
        if parts.peek().is_none() {
            return Some(entry);
        }
        match entry {
            DirEntry::Dir(sub) => current = sub,
            _ => return None,
        }
    }

    None
}
