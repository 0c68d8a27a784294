//! Deferred structural operations, replayed in declaration order.

use crate::error::Result;
use crate::options::{LocaleOptions, PageOptions, SectionOptions, SetSectionOptions};
use crate::sandbox::Sandbox;
use tracing::debug;

/// One queued operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOp {
    AddPage {
        name: String,
        options: PageOptions,
    },
    AddSection {
        name: String,
        options: SectionOptions,
    },
    SetSection {
        name: String,
        content: String,
        options: SetSectionOptions,
    },
    AddLocale {
        codes: Vec<String>,
        options: LocaleOptions,
    },
}

/// A queue of operations bound to a sandbox. Nothing runs until [`execute`].
///
/// There is no rollback: if an operation fails, everything before it stays
/// on disk.
///
/// [`execute`]: BatchOperations::execute
#[must_use = "a batch does nothing until executed"]
pub struct BatchOperations<'a> {
    sandbox: &'a mut Sandbox,
    ops: Vec<BatchOp>,
}

impl<'a> BatchOperations<'a> {
    pub(crate) fn new(sandbox: &'a mut Sandbox) -> Self {
        Self {
            sandbox,
            ops: Vec::new(),
        }
    }

    /// Queue `add page`.
    pub fn add_page(mut self, name: impl Into<String>, options: PageOptions) -> Self {
        self.ops.push(BatchOp::AddPage {
            name: name.into(),
            options,
        });
        self
    }

    /// Queue `add section`.
    pub fn add_section(mut self, name: impl Into<String>, options: SectionOptions) -> Self {
        self.ops.push(BatchOp::AddSection {
            name: name.into(),
            options,
        });
        self
    }

    /// Queue `set section`.
    pub fn set_section(
        mut self,
        name: impl Into<String>,
        content: impl Into<String>,
        options: SetSectionOptions,
    ) -> Self {
        self.ops.push(BatchOp::SetSection {
            name: name.into(),
            content: content.into(),
            options,
        });
        self
    }

    /// Queue `add locale`.
    pub fn add_locale(mut self, codes: &[&str], options: LocaleOptions) -> Self {
        self.ops.push(BatchOp::AddLocale {
            codes: codes.iter().map(|c| c.to_string()).collect(),
            options,
        });
        self
    }

    /// Queued operations, in order.
    pub fn ops(&self) -> &[BatchOp] {
        &self.ops
    }

    /// Number of queued operations.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// True when nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Run every queued operation in order, stopping at the first failure.
    pub async fn execute(self) -> Result<&'a mut Sandbox> {
        let Self { sandbox, ops } = self;
        let total = ops.len();

        for (i, op) in ops.into_iter().enumerate() {
            debug!("batch {}/{}: {:?}", i + 1, total, op);
            match op {
                BatchOp::AddPage { name, options } => {
                    sandbox.add_page(&name, options).await?;
                }
                BatchOp::AddSection { name, options } => {
                    sandbox.add_section(&name, options).await?;
                }
                BatchOp::SetSection {
                    name,
                    content,
                    options,
                } => {
                    sandbox.set_section(&name, &content, options).await?;
                }
                BatchOp::AddLocale { codes, options } => {
                    let codes: Vec<&str> = codes.iter().map(String::as_str).collect();
                    sandbox.add_locale(&codes, options).await?;
                }
            }
        }

        Ok(sandbox)
    }
}

impl Sandbox {
    /// Start a batch of deferred operations on this sandbox.
    pub fn batch(&mut self) -> BatchOperations<'_> {
        BatchOperations::new(self)
    }
}
