//! Uniweb Harness Library
//!
//! Drives the `uniweb` content tool inside disposable sandboxes and checks
//! what it leaves on disk:
//! - Isolated temporary directories with their own working-directory cursor
//! - Fluent operations that run the tool and verify each effect eagerly
//! - Deferred batches of operations and deferred assertion chains
//! - Deterministic section documents via [`ContentBuilder`]
//! - Ready-made project scaffolds and timing helpers
//!
//! # Quick Start
//!
//! ```no_run
//! use uniweb_harness::{
//!     HarnessConfig, InitOptions, PageOptions, Sandbox, SectionOptions, SetSectionOptions,
//! };
//!
//! # async fn demo() -> uniweb_harness::Result<()> {
//! let mut sandbox = Sandbox::setup(HarnessConfig::with_tool("uniweb")).await?;
//!
//! sandbox
//!     .init_project("p", InitOptions::single_site())
//!     .await?
//!     .add_page("about", PageOptions::default())
//!     .await?
//!     .add_section("hero", SectionOptions::page("about"))
//!     .await?
//!     .set_section("hero", "# About Me\n\nBio text", SetSectionOptions::page("about"))
//!     .await?;
//!
//! sandbox
//!     .assertions()
//!     .file_contains("pages/about/hero.md", "# About Me", "heading written")
//!     .yaml_property("pages/about/page.yml", "sections.length", 1u64, "one section")
//!     .verify()
//!     .await?;
//!
//! sandbox.cleanup().await;
//! # Ok(())
//! # }
//! ```
//!
//! # Deferred Work
//!
//! Batches queue operations and run them in order on `execute`; assertion
//! chains queue checks and run them in order on `verify`. Both stop at the
//! first failure and neither rolls anything back.

mod assertions;
mod batch;
mod chain;
mod config;
mod content;
mod error;
mod manifest;
mod options;
mod perf;
mod sandbox;
mod scenario;
mod tree;

pub use assertions::{Assertion, AssertionChain};
pub use batch::{BatchOp, BatchOperations};
pub use config::HarnessConfig;
pub use content::ContentBuilder;
pub use error::{HarnessError, Result};
pub use manifest::{lookup_path, PageManifest, SectionEntry};
pub use options::{
    locale_dir, page_dir, pages_dir, site_root, InitOptions, LocaleOptions, PageOptions, Position,
    SectionOptions, SetSectionOptions,
};
pub use perf::{BulkReport, Measurement, PerformanceHelper, BULK_OPERATION};
pub use sandbox::{ProjectKind, RunOptions, Sandbox, ToolOutput};
pub use scenario::ScenarioBuilder;
pub use tree::{DirEntry, DirTree};
