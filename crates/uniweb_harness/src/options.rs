//! Option structures for the fluent operations and their argv translation.
//!
//! Each operation renders its options into the tool's argument vector in a
//! fixed order: subcommand words, positional name, then flags in the order
//! they are declared on the struct.

use std::fmt;

/// Where a new section goes relative to existing ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Position {
    /// Nest one level under the named parent section.
    Under(String),
    /// Insert at top level before the named section.
    Before(String),
    /// Insert at top level after the named section.
    After(String),
}

impl Position {
    /// Nest under `parent`.
    pub fn under(parent: impl Into<String>) -> Self {
        Self::Under(parent.into())
    }

    /// The section this position is relative to.
    pub fn anchor(&self) -> &str {
        match self {
            Self::Under(s) | Self::Before(s) | Self::After(s) => s,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Under(p) => write!(f, "under:{}", p),
            Self::Before(a) => write!(f, "before:{}", a),
            Self::After(a) => write!(f, "after:{}", a),
        }
    }
}

/// Options for `init`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitOptions {
    /// Create a single-site project (`site.yml` + `pages/` at the root). Default: false.
    pub single_site: bool,
    /// Foundation module to scaffold alongside the site. Default: none.
    pub module: Option<String>,
    /// Create a workspace with this first site under `sites/`. Default: none.
    pub site: Option<String>,
}

impl InitOptions {
    /// Single-site project.
    pub fn single_site() -> Self {
        Self {
            single_site: true,
            ..Self::default()
        }
    }

    /// Workspace project with a first site.
    pub fn workspace(site: impl Into<String>) -> Self {
        Self {
            site: Some(site.into()),
            ..Self::default()
        }
    }

    /// Also scaffold a module.
    pub fn module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }

    pub(crate) fn to_args(&self, name: &str) -> Vec<String> {
        let mut args = vec!["init".to_string(), name.to_string()];
        if self.single_site {
            args.push("--single-site".to_string());
        }
        push_flag(&mut args, "--module", self.module.as_deref());
        push_flag(&mut args, "--site", self.site.as_deref());
        args
    }
}

/// Options for `add page`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageOptions {
    /// Target site in a workspace. Default: the root (single-site) context.
    pub site: Option<String>,
}

impl PageOptions {
    /// Page in the named workspace site.
    pub fn site(site: impl Into<String>) -> Self {
        Self {
            site: Some(site.into()),
        }
    }

    pub(crate) fn to_args(&self, name: &str) -> Vec<String> {
        let mut args = vec!["add".to_string(), "page".to_string(), name.to_string()];
        push_flag(&mut args, "--site", self.site.as_deref());
        args
    }
}

/// Options for `add section`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionOptions {
    /// Owning page. Required by the tool; empty by default.
    pub page: String,
    /// Target site in a workspace. Default: the root context.
    pub site: Option<String>,
    /// Placement directive. Default: appended at top level.
    pub position: Option<Position>,
}

impl SectionOptions {
    /// Section on `page` in the root context.
    pub fn page(page: impl Into<String>) -> Self {
        Self {
            page: page.into(),
            ..Self::default()
        }
    }

    /// Target a workspace site.
    pub fn in_site(mut self, site: impl Into<String>) -> Self {
        self.site = Some(site.into());
        self
    }

    /// Place the section relative to another.
    pub fn position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    /// Nest under `parent`.
    pub fn under(self, parent: impl Into<String>) -> Self {
        self.position(Position::under(parent))
    }

    pub(crate) fn to_args(&self, name: &str) -> Vec<String> {
        let mut args = vec!["add".to_string(), "section".to_string(), name.to_string()];
        push_flag(&mut args, "--page", Some(&self.page));
        push_flag(&mut args, "--site", self.site.as_deref());
        if let Some(position) = &self.position {
            push_flag(&mut args, "--position", Some(&position.to_string()));
        }
        args
    }
}

/// Options for `set section`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetSectionOptions {
    /// Owning page. Required by the tool; empty by default.
    pub page: String,
    /// Target site in a workspace. Default: the root context.
    pub site: Option<String>,
    /// Write a locale variant instead of the default document. Default: none.
    pub locale: Option<String>,
}

impl SetSectionOptions {
    /// Default-locale content on `page` in the root context.
    pub fn page(page: impl Into<String>) -> Self {
        Self {
            page: page.into(),
            ..Self::default()
        }
    }

    /// Target a workspace site.
    pub fn in_site(mut self, site: impl Into<String>) -> Self {
        self.site = Some(site.into());
        self
    }

    /// Write the variant for `locale`.
    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    pub(crate) fn to_args(&self, name: &str, body: &str) -> Vec<String> {
        let mut args = vec!["set".to_string(), "section".to_string(), name.to_string()];
        push_flag(&mut args, "--page", Some(&self.page));
        push_flag(&mut args, "--site", self.site.as_deref());
        push_flag(&mut args, "--locale", self.locale.as_deref());
        push_flag(&mut args, "--body", Some(body));
        args
    }
}

/// Options for `add locale`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocaleOptions {
    /// Target site in a workspace. Default: the root context.
    pub site: Option<String>,
}

impl LocaleOptions {
    /// Locales of the named workspace site.
    pub fn site(site: impl Into<String>) -> Self {
        Self {
            site: Some(site.into()),
        }
    }

    pub(crate) fn to_args(&self, codes: &[&str]) -> Vec<String> {
        let mut args = vec!["add".to_string(), "locale".to_string(), codes.join(",")];
        push_flag(&mut args, "--site", self.site.as_deref());
        args
    }
}

fn push_flag(args: &mut Vec<String>, flag: &str, value: Option<&str>) {
    if let Some(value) = value {
        args.push(flag.to_string());
        args.push(value.to_string());
    }
}

/// Site root relative to the project: `""` or `sites/<site>`.
pub fn site_root(site: Option<&str>) -> String {
    match site {
        Some(site) => format!("sites/{}", site),
        None => String::new(),
    }
}

/// Base pages directory: `pages` or `sites/<site>/pages`.
pub fn pages_dir(site: Option<&str>) -> String {
    join(&site_root(site), "pages")
}

/// Locale overlay of a site: `locales/<locale>` or `sites/<site>/locales/<locale>`.
pub fn locale_dir(locale: &str, site: Option<&str>) -> String {
    join(&site_root(site), &format!("locales/{}", locale))
}

/// Directory of one page. A locale variant lives in the site's locale
/// overlay, which mirrors the site's own `pages/` tree.
pub fn page_dir(page: &str, site: Option<&str>, locale: Option<&str>) -> String {
    match locale {
        Some(locale) => format!("{}/pages/{}", locale_dir(locale, site), page),
        None => join(&pages_dir(site), page),
    }
}

fn join(prefix: &str, rest: &str) -> String {
    if prefix.is_empty() {
        rest.to_string()
    } else {
        format!("{}/{}", prefix, rest)
    }
}
