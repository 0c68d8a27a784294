//! Deferred assertions over sandbox state.
//!
//! Checks are declared first and evaluated together by [`AssertionChain::verify`],
//! in declaration order, stopping at the first one that fails.

use crate::error::{HarnessError, Result};
use crate::manifest::lookup_path;
use crate::sandbox::Sandbox;
use crate::tree::{lookup, DirEntry};
use serde_yaml::Value;
use std::path::Path;
use tracing::debug;

type CustomCheck = Box<dyn Fn(&Path) -> std::result::Result<(), String> + Send + Sync>;

/// Declarative checks on the sandbox, resolved against its cursor.
pub enum Assertion {
    FileExists {
        path: String,
    },
    FileNotExists {
        path: String,
    },
    FileContains {
        path: String,
        needle: String,
    },
    FileNotContains {
        path: String,
        needle: String,
    },
    /// A dotted property of a YAML document equals `expected`.
    YamlProperty {
        path: String,
        property: String,
        expected: Value,
    },
    /// A dotted property of a YAML document does not resolve.
    YamlPropertyAbsent {
        path: String,
        property: String,
    },
    /// Every listed `/`-separated path exists under `dir`.
    DirectoryStructure {
        dir: String,
        expected: Vec<String>,
    },
    /// The page manifest declares `name` exactly once.
    SectionInManifest {
        page: String,
        site: Option<String>,
        name: String,
    },
    /// Receives the cursor directory.
    Custom(CustomCheck),
}

impl std::fmt::Debug for Assertion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FileExists { path } => write!(f, "FileExists {{ path: {:?} }}", path),
            Self::FileNotExists { path } => write!(f, "FileNotExists {{ path: {:?} }}", path),
            Self::FileContains { path, needle } => {
                write!(f, "FileContains {{ path: {:?}, needle: {:?} }}", path, needle)
            }
            Self::FileNotContains { path, needle } => {
                write!(f, "FileNotContains {{ path: {:?}, needle: {:?} }}", path, needle)
            }
            Self::YamlProperty {
                path,
                property,
                expected,
            } => write!(
                f,
                "YamlProperty {{ path: {:?}, property: {:?}, expected: {:?} }}",
                path, property, expected
            ),
            Self::YamlPropertyAbsent { path, property } => write!(
                f,
                "YamlPropertyAbsent {{ path: {:?}, property: {:?} }}",
                path, property
            ),
            Self::DirectoryStructure { dir, expected } => write!(
                f,
                "DirectoryStructure {{ dir: {:?}, expected: {:?} }}",
                dir, expected
            ),
            Self::SectionInManifest { page, site, name } => write!(
                f,
                "SectionInManifest {{ page: {:?}, site: {:?}, name: {:?} }}",
                page, site, name
            ),
            Self::Custom(_) => write!(f, "Custom(<fn>)"),
        }
    }
}

/// An ordered queue of assertions bound to a sandbox.
#[must_use = "assertions do nothing until verified"]
pub struct AssertionChain<'a> {
    sandbox: &'a Sandbox,
    checks: Vec<(Assertion, String)>,
}

impl<'a> AssertionChain<'a> {
    pub(crate) fn new(sandbox: &'a Sandbox) -> Self {
        Self {
            sandbox,
            checks: Vec::new(),
        }
    }

    /// Queue an assertion with the message reported if it fails.
    pub fn assert(mut self, assertion: Assertion, message: impl Into<String>) -> Self {
        self.checks.push((assertion, message.into()));
        self
    }

    /// Queue: `path` exists.
    pub fn file_exists(self, path: &str, message: impl Into<String>) -> Self {
        self.assert(
            Assertion::FileExists {
                path: path.to_string(),
            },
            message,
        )
    }

    /// Queue: `path` does not exist.
    pub fn file_not_exists(self, path: &str, message: impl Into<String>) -> Self {
        self.assert(
            Assertion::FileNotExists {
                path: path.to_string(),
            },
            message,
        )
    }

    /// Queue: `path` contains `needle`.
    pub fn file_contains(self, path: &str, needle: &str, message: impl Into<String>) -> Self {
        self.assert(
            Assertion::FileContains {
                path: path.to_string(),
                needle: needle.to_string(),
            },
            message,
        )
    }

    /// Queue: `path` exists and does not contain `needle`.
    pub fn file_not_contains(self, path: &str, needle: &str, message: impl Into<String>) -> Self {
        self.assert(
            Assertion::FileNotContains {
                path: path.to_string(),
                needle: needle.to_string(),
            },
            message,
        )
    }

    /// Queue: the dotted `property` of the YAML at `path` equals `expected`.
    pub fn yaml_property(
        self,
        path: &str,
        property: &str,
        expected: impl Into<Value>,
        message: impl Into<String>,
    ) -> Self {
        self.assert(
            Assertion::YamlProperty {
                path: path.to_string(),
                property: property.to_string(),
                expected: expected.into(),
            },
            message,
        )
    }

    /// Queue: the dotted `property` of the YAML at `path` does not resolve.
    pub fn yaml_property_absent(
        self,
        path: &str,
        property: &str,
        message: impl Into<String>,
    ) -> Self {
        self.assert(
            Assertion::YamlPropertyAbsent {
                path: path.to_string(),
                property: property.to_string(),
            },
            message,
        )
    }

    /// Queue: every path in `expected` exists under `dir`.
    pub fn directory_structure(
        self,
        dir: &str,
        expected: &[&str],
        message: impl Into<String>,
    ) -> Self {
        self.assert(
            Assertion::DirectoryStructure {
                dir: dir.to_string(),
                expected: expected.iter().map(|p| p.to_string()).collect(),
            },
            message,
        )
    }

    /// Queue: `name` appears exactly once in the manifest of `page`.
    pub fn section_in_manifest(
        self,
        page: &str,
        site: Option<&str>,
        name: &str,
        message: impl Into<String>,
    ) -> Self {
        self.assert(
            Assertion::SectionInManifest {
                page: page.to_string(),
                site: site.map(str::to_string),
                name: name.to_string(),
            },
            message,
        )
    }

    /// Queue an ad-hoc check run against the cursor directory.
    pub fn custom<F>(self, check: F, message: impl Into<String>) -> Self
    where
        F: Fn(&Path) -> std::result::Result<(), String> + Send + Sync + 'static,
    {
        self.assert(Assertion::Custom(Box::new(check)), message)
    }

    /// Number of queued assertions.
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    /// True when nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// Evaluate the queue in order; the first failure is returned.
    pub async fn verify(self) -> Result<&'a Sandbox> {
        for (i, (assertion, message)) in self.checks.iter().enumerate() {
            debug!("assertion {}: {:?}", i, assertion);
            if let Err(detail) = self.check(assertion).await {
                let message = if message.is_empty() {
                    format!("{:?}", assertion)
                } else {
                    message.clone()
                };
                return Err(HarnessError::assertion(&message, detail));
            }
        }
        Ok(self.sandbox)
    }

    async fn check(&self, assertion: &Assertion) -> std::result::Result<(), String> {
        let sb = self.sandbox;
        match assertion {
            Assertion::FileExists { path } => {
                if sb.file_exists(path).await {
                    Ok(())
                } else {
                    Err(format!("{} does not exist", path))
                }
            }
            Assertion::FileNotExists { path } => {
                if sb.file_exists(path).await {
                    Err(format!("{} exists", path))
                } else {
                    Ok(())
                }
            }
            Assertion::FileContains { path, needle } => {
                let content = sb.read_file(path).await.map_err(|e| e.to_string())?;
                if content.contains(needle.as_str()) {
                    Ok(())
                } else {
                    Err(format!(
                        "{} does not contain {:?}; content was {:?}",
                        path, needle, content
                    ))
                }
            }
            Assertion::FileNotContains { path, needle } => {
                let content = sb.read_file(path).await.map_err(|e| e.to_string())?;
                if content.contains(needle.as_str()) {
                    Err(format!("{} unexpectedly contains {:?}", path, needle))
                } else {
                    Ok(())
                }
            }
            Assertion::YamlProperty {
                path,
                property,
                expected,
            } => {
                let doc = sb.read_yaml(path).await.map_err(|e| e.to_string())?;
                let actual = lookup_path(&doc, property);
                if actual.as_ref() == Some(expected) {
                    Ok(())
                } else {
                    Err(format!(
                        "{} property {:?}: expected {:?}, got {:?}",
                        path, property, expected, actual
                    ))
                }
            }
            Assertion::YamlPropertyAbsent { path, property } => {
                let doc = sb.read_yaml(path).await.map_err(|e| e.to_string())?;
                match lookup_path(&doc, property) {
                    None => Ok(()),
                    Some(actual) => Err(format!(
                        "{} property {:?}: expected no value, got {:?}",
                        path, property, actual
                    )),
                }
            }
            Assertion::DirectoryStructure { dir, expected } => {
                let tree = sb.directory_structure(dir).await;
                let missing: Vec<&str> = expected
                    .iter()
                    .map(String::as_str)
                    .filter(|p| matches!(lookup(&tree, p), None | Some(DirEntry::Inaccessible)))
                    .collect();
                if missing.is_empty() {
                    Ok(())
                } else {
                    Err(format!("missing under {}: {:?}", dir, missing))
                }
            }
            Assertion::SectionInManifest { page, site, name } => {
                let manifest = sb
                    .page_manifest(page, site.as_deref())
                    .await
                    .map_err(|e| e.to_string())?;
                match manifest.occurrences(name) {
                    1 => Ok(()),
                    n => Err(format!(
                        "'{}' appears {} times in {:?}",
                        name,
                        n,
                        manifest.section_names()
                    )),
                }
            }
            Assertion::Custom(f) => f(sb.cwd()),
        }
    }
}

impl Sandbox {
    /// Start a chain of deferred assertions on this sandbox.
    pub fn assertions(&self) -> AssertionChain<'_> {
        AssertionChain::new(self)
    }
}
