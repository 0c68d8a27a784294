//! Isolated, disposable working directories and tool invocation.
//!
//! A [`Sandbox`] owns one temporary directory per test. It never touches the
//! process working directory: it keeps its own cursor (`cwd`) inside the
//! sandbox, resolves every relative path against it, and launches the tool
//! with it as the child's working directory.

use crate::config::HarnessConfig;
use crate::error::{HarnessError, Result};
use crate::manifest::PageManifest;
use crate::options::{page_dir, site_root};
use crate::tree::{self, DirTree};
use serde_yaml::Value;
use std::path::{Component, Path, PathBuf};
use std::time::Instant;
use tempfile::TempDir;
use tokio::process::Command;
use tracing::{debug, info, warn};

/// Outcome of one tool invocation. Never an error: callers decide.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    /// True when the process launched and exited with code 0.
    pub success: bool,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
    /// Exit code; `None` on launch failure or signal termination.
    pub exit_code: Option<i32>,
    /// Best-available diagnostic when `success` is false.
    pub error: Option<String>,
}

impl ToolOutput {
    /// The diagnostic to surface on failure: stderr, else `error`, else stdout.
    pub fn diagnostic(&self) -> String {
        if !self.stderr.trim().is_empty() {
            self.stderr.trim().to_string()
        } else if let Some(error) = &self.error {
            error.clone()
        } else {
            self.stdout.trim().to_string()
        }
    }
}

/// Per-invocation overrides for [`Sandbox::run_tool`].
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Run in this directory (relative to the cursor) instead of the cursor.
    pub cwd: Option<PathBuf>,
    /// Extra environment variables for the child.
    pub env: Vec<(String, String)>,
}

/// Layout of the project under the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectKind {
    /// Neither `pages/` nor `sites/`.
    Minimal,
    /// `site.yml` + `pages/` at the root.
    SingleSite,
    /// One or more sites under `sites/`.
    Workspace,
}

/// One isolated test environment.
pub struct Sandbox {
    dir: Option<TempDir>,
    root: PathBuf,
    cwd: PathBuf,
    config: HarnessConfig,
}

impl Sandbox {
    /// Allocate a uniquely named temporary directory and point the cursor at it.
    pub async fn setup(config: HarnessConfig) -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix(&config.temp_prefix)
            .tempdir()
            .map_err(HarnessError::SandboxSetup)?;
        // Canonical so that navigation checks compare like with like.
        let root = tokio::fs::canonicalize(dir.path())
            .await
            .map_err(HarnessError::SandboxSetup)?;
        info!("Created sandbox at {}", root.display());

        Ok(Self {
            dir: Some(dir),
            cwd: root.clone(),
            root,
            config,
        })
    }

    /// Restore the cursor and delete the sandbox. Failures are logged, not returned.
    pub async fn cleanup(mut self) {
        self.cwd = self.root.clone();
        let Some(dir) = self.dir.take() else {
            return;
        };

        if self.config.keep_sandbox {
            let kept = dir.keep();
            info!("Keeping sandbox at {}", kept.display());
            return;
        }

        let path = dir.path().to_path_buf();
        match tokio::task::spawn_blocking(move || dir.close()).await {
            Ok(Ok(())) => info!("Removed sandbox at {}", path.display()),
            Ok(Err(e)) => warn!("Failed to remove sandbox {}: {}", path.display(), e),
            Err(e) => warn!("Sandbox removal task for {} failed: {}", path.display(), e),
        }
    }

    /// Sandbox root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Current directory cursor.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Active configuration.
    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Resolve a path against the cursor.
    pub fn path(&self, rel: impl AsRef<Path>) -> PathBuf {
        self.cwd.join(rel)
    }

    // ===== Navigation =====

    /// Move the cursor to a directory relative to it. The target must stay
    /// inside the sandbox and exist.
    pub async fn cd(&mut self, rel: impl AsRef<Path>) -> Result<&mut Self> {
        let target = normalize(&self.cwd.join(rel.as_ref()));
        if !target.starts_with(&self.root) {
            return Err(HarnessError::InvalidOperation(format!(
                "cannot leave the sandbox: {}",
                rel.as_ref().display()
            )));
        }
        if !is_dir(&target).await {
            return Err(HarnessError::InvalidOperation(format!(
                "no such directory: {}",
                target.display()
            )));
        }
        debug!("cd {}", target.display());
        self.cwd = target;
        Ok(self)
    }

    /// Move the cursor back to the sandbox root.
    pub fn navigate_to_root(&mut self) -> &mut Self {
        self.cwd = self.root.clone();
        self
    }

    /// Move the cursor into `sites/<name>` of the current project.
    pub async fn navigate_to_site(&mut self, name: &str) -> Result<&mut Self> {
        self.cd(site_root(Some(name))).await
    }

    // ===== Tool invocation =====

    /// Run the configured tool with `args` in the cursor directory.
    pub async fn run_tool<I, S>(&self, args: I, options: RunOptions) -> ToolOutput
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|a| a.as_ref().to_string()).collect();
        let cwd = match &options.cwd {
            Some(rel) => self.cwd.join(rel),
            None => self.cwd.clone(),
        };

        let mut command = Command::new(&self.config.tool);
        command
            .args(&self.config.tool_prefix_args)
            .args(&args)
            .current_dir(&cwd)
            .kill_on_drop(true);
        for (key, value) in &options.env {
            command.env(key, value);
        }

        let started = Instant::now();
        let output = match command.output().await {
            Ok(output) => output,
            Err(e) => {
                debug!(
                    "Failed to launch {} {:?}: {}",
                    self.config.tool.display(),
                    args,
                    e
                );
                return ToolOutput {
                    success: false,
                    error: Some(format!(
                        "failed to launch {}: {}",
                        self.config.tool.display(),
                        e
                    )),
                    ..ToolOutput::default()
                };
            }
        };

        let result = ToolOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code(),
            error: None,
        };
        debug!(
            args = ?args,
            cwd = %cwd.display(),
            exit_code = ?result.exit_code,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "tool finished"
        );

        if result.success {
            result
        } else {
            let error = Some(result.diagnostic());
            ToolOutput { error, ..result }
        }
    }

    // ===== Files =====

    /// Whether a file or directory exists relative to the cursor.
    pub async fn file_exists(&self, rel: impl AsRef<Path>) -> bool {
        tokio::fs::try_exists(self.path(rel)).await.unwrap_or(false)
    }

    /// Read a UTF-8 file relative to the cursor.
    ///
    /// # Errors
    ///
    /// Returns `ReadFile` with the path if the file is absent or unreadable.
    pub async fn read_file(&self, rel: impl AsRef<Path>) -> Result<String> {
        let path = self.path(rel);
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| HarnessError::ReadFile { path, source })
    }

    /// Write a file relative to the cursor, creating parent directories.
    pub async fn write_file(&self, rel: impl AsRef<Path>, content: &str) -> Result<()> {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| HarnessError::WriteFile {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }
        tokio::fs::write(&path, content)
            .await
            .map_err(|source| HarnessError::WriteFile { path, source })
    }

    /// Read and parse a YAML document relative to the cursor.
    pub async fn read_yaml(&self, rel: impl AsRef<Path>) -> Result<Value> {
        let rel = rel.as_ref();
        let content = self.read_file(rel).await?;
        serde_yaml::from_str(&content).map_err(|source| HarnessError::ParseYaml {
            path: self.path(rel),
            source,
        })
    }

    /// Read and parse a JSON document relative to the cursor.
    pub async fn read_json(&self, rel: impl AsRef<Path>) -> Result<serde_json::Value> {
        let rel = rel.as_ref();
        let content = self.read_file(rel).await?;
        serde_json::from_str(&content).map_err(|source| HarnessError::ParseJson {
            path: self.path(rel),
            source,
        })
    }

    /// Parse the manifest of `page` (in `site`, or the root context).
    pub async fn page_manifest(&self, page: &str, site: Option<&str>) -> Result<PageManifest> {
        let rel = format!("{}/page.yml", page_dir(page, site, None));
        let content = self.read_file(&rel).await?;
        serde_yaml::from_str(&content).map_err(|source| HarnessError::ParseYaml {
            path: self.path(&rel),
            source,
        })
    }

    /// Mirror a directory (relative to the cursor) as a tree. Missing
    /// directories yield an empty tree.
    pub async fn directory_structure(&self, rel: impl AsRef<Path>) -> DirTree {
        tree::snapshot(&self.path(rel)).await
    }

    /// Classify the project under the cursor.
    pub async fn project_kind(&self) -> ProjectKind {
        if is_dir(&self.path("sites")).await {
            ProjectKind::Workspace
        } else if is_dir(&self.path("pages")).await {
            ProjectKind::SingleSite
        } else {
            ProjectKind::Minimal
        }
    }

    pub(crate) fn set_cwd(&mut self, cwd: PathBuf) {
        self.cwd = cwd;
    }
}

impl std::fmt::Debug for Sandbox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sandbox")
            .field("root", &self.root)
            .field("cwd", &self.cwd)
            .finish()
    }
}

async fn is_dir(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false)
}

/// Lexically resolve `.` and `..` without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}
