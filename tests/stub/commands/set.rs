//! Overwrite section content.

use super::{page_dir, site_root, write_file};
use anyhow::{bail, Result};

/// Write `body` to a section's default document, or to its locale variant
/// under the site's `locales/<locale>/pages/<page>/`. The default document
/// must already exist.
pub fn section(
    name: &str,
    page: &str,
    site: Option<&str>,
    locale: Option<&str>,
    body: &str,
) -> Result<()> {
    let dir = page_dir(page, site)?;
    let document = dir.join(format!("{}.md", name));
    if !document.exists() {
        bail!("Section '{}' not found on page '{}'", name, page);
    }

    let target = match locale {
        Some(locale) => site_root(site)?
            .join("locales")
            .join(locale)
            .join("pages")
            .join(page)
            .join(format!("{}.md", name)),
        None => document,
    };

    let mut content = body.to_string();
    if !content.ends_with('\n') {
        content.push('\n');
    }
    write_file(&target, &content)?;

    println!("Updated {}", target.display());
    Ok(())
}
