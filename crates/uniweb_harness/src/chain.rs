//! Fluent operations: each one invokes the tool, requires success, checks
//! the expected filesystem effect, and hands the sandbox back for chaining.
//!
//! ```no_run
//! # async fn demo() -> uniweb_harness::Result<()> {
//! use uniweb_harness::{HarnessConfig, InitOptions, PageOptions, SectionOptions, Sandbox};
//!
//! let mut sandbox = Sandbox::setup(HarnessConfig::default()).await?;
//! sandbox
//!     .init_project("site", InitOptions::single_site())
//!     .await?
//!     .add_page("about", PageOptions::default())
//!     .await?
//!     .add_section("hero", SectionOptions::page("about"))
//!     .await?;
//! sandbox.cleanup().await;
//! # Ok(())
//! # }
//! ```

use crate::error::{HarnessError, Result};
use crate::options::{
    locale_dir, page_dir, pages_dir, site_root, InitOptions, LocaleOptions, PageOptions, Position,
    SectionOptions, SetSectionOptions,
};
use crate::sandbox::{RunOptions, Sandbox, ToolOutput};
use std::path::Path;
use tracing::debug;

impl Sandbox {
    /// Create a project and move the cursor into it (unless `name` is `.`).
    pub async fn init_project(&mut self, name: &str, options: InitOptions) -> Result<&mut Self> {
        let operation = format!("init {}", name);
        let output = self.run_tool(options.to_args(name), RunOptions::default()).await;
        require_success(&operation, &output)?;

        let project = if name == "." {
            self.cwd().to_path_buf()
        } else {
            self.path(name)
        };

        if self.config().verify_effects {
            let rel = |file: &str| -> String {
                if name == "." {
                    file.to_string()
                } else {
                    format!("{}/{}", name, file)
                }
            };

            self.require_exists(&operation, &rel("package.json")).await?;
            if name != "." {
                let package = self.read_json(rel("package.json")).await?;
                let declared = package.get("name").and_then(|v| v.as_str());
                if declared != Some(name) {
                    return Err(HarnessError::MissingEffect {
                        operation,
                        detail: format!(
                            "package.json declares name {:?}, expected {:?}",
                            declared, name
                        ),
                    });
                }
            }
            if options.single_site {
                self.require_exists(&operation, &rel("site.yml")).await?;
                self.require_exists(&operation, &rel("pages")).await?;
            }
            if let Some(site) = options.site.as_deref() {
                let site_yml = rel(&format!("{}/site.yml", site_root(Some(site))));
                self.require_exists(&operation, &site_yml).await?;
            }
        }

        if name != "." {
            self.set_cwd(project);
        }
        Ok(self)
    }

    /// Add a page and check that its `page.yml` exists.
    pub async fn add_page(&mut self, name: &str, options: PageOptions) -> Result<&mut Self> {
        let operation = format!("add page {}", name);
        let output = self.run_tool(options.to_args(name), RunOptions::default()).await;
        require_success(&operation, &output)?;

        if self.config().verify_effects {
            let manifest = format!("{}/{}/page.yml", pages_dir(options.site.as_deref()), name);
            self.require_exists(&operation, &manifest).await?;
        }
        Ok(self)
    }

    /// Add a section and check both its document and its manifest entry.
    pub async fn add_section(&mut self, name: &str, options: SectionOptions) -> Result<&mut Self> {
        let operation = format!("add section {} to page {}", name, options.page);
        let output = self.run_tool(options.to_args(name), RunOptions::default()).await;
        require_success(&operation, &output)?;

        if !self.config().verify_effects {
            return Ok(self);
        }

        let site = options.site.as_deref();
        let document = format!("{}/{}.md", page_dir(&options.page, site, None), name);
        self.require_exists(&operation, &document).await?;

        let manifest = self.page_manifest(&options.page, site).await?;
        let count = manifest.occurrences(name);
        if count != 1 {
            return Err(HarnessError::MissingEffect {
                operation,
                detail: format!(
                    "page manifest lists '{}' {} times, expected exactly once",
                    name, count
                ),
            });
        }

        match &options.position {
            Some(Position::Under(parent)) => {
                let nested = manifest
                    .children_of(parent)
                    .is_some_and(|children| children.iter().any(|c| c == name));
                if !nested {
                    return Err(HarnessError::MissingEffect {
                        operation,
                        detail: format!(
                            "'{}' is not nested under '{}' in the page manifest",
                            name, parent
                        ),
                    });
                }
            }
            Some(position @ (Position::Before(_) | Position::After(_))) => {
                let top = manifest.top_level();
                let at = top.iter().position(|n| *n == name);
                let anchor = top.iter().position(|n| *n == position.anchor());
                // Only ordered when both sit at the top level.
                if let (Some(at), Some(anchor)) = (at, anchor) {
                    let ordered = match position {
                        Position::Before(_) => at < anchor,
                        _ => at > anchor,
                    };
                    if !ordered {
                        return Err(HarnessError::MissingEffect {
                            operation,
                            detail: format!("'{}' is not placed {} in {:?}", name, position, top),
                        });
                    }
                }
            }
            None => {}
        }

        Ok(self)
    }

    /// Overwrite a section's content (or a locale variant of it) and check
    /// that the file contains at least the first line of `content`.
    pub async fn set_section(
        &mut self,
        name: &str,
        content: &str,
        options: SetSectionOptions,
    ) -> Result<&mut Self> {
        let operation = format!("set section {} on page {}", name, options.page);
        let output = self
            .run_tool(options.to_args(name, content), RunOptions::default())
            .await;
        require_success(&operation, &output)?;

        if self.config().verify_effects {
            let document = format!(
                "{}/{}.md",
                page_dir(&options.page, options.site.as_deref(), options.locale.as_deref()),
                name
            );
            self.require_exists(&operation, &document).await?;

            let first_line = content.lines().next().unwrap_or_default();
            let written = self.read_file(&document).await?;
            if !written.contains(first_line) {
                return Err(HarnessError::MissingEffect {
                    operation,
                    detail: format!("{} does not contain {:?}", document, first_line),
                });
            }
        }
        Ok(self)
    }

    /// Add one or more locales and check each `locales/<code>` directory.
    pub async fn add_locale(&mut self, codes: &[&str], options: LocaleOptions) -> Result<&mut Self> {
        if codes.is_empty() {
            return Err(HarnessError::InvalidOperation(
                "add_locale needs at least one locale code".to_string(),
            ));
        }

        let operation = format!("add locale {}", codes.join(","));
        let output = self.run_tool(options.to_args(codes), RunOptions::default()).await;
        require_success(&operation, &output)?;

        if self.config().verify_effects {
            for code in codes {
                let dir = locale_dir(code, options.site.as_deref());
                self.require_exists(&operation, &dir).await?;
            }
        }
        Ok(self)
    }

    async fn require_exists(&self, operation: &str, rel: &str) -> Result<()> {
        if self.file_exists(Path::new(rel)).await {
            debug!("{}: found {}", operation, rel);
            Ok(())
        } else {
            Err(HarnessError::MissingEffect {
                operation: operation.to_string(),
                detail: format!("{} does not exist", rel),
            })
        }
    }
}

fn require_success(operation: &str, output: &ToolOutput) -> Result<()> {
    if output.success {
        return Ok(());
    }
    Err(HarnessError::ToolFailed {
        operation: operation.to_string(),
        exit_code: output.exit_code,
        stderr: output.diagnostic(),
    })
}
