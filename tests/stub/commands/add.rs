//! Add pages, sections and locales.

use super::{load_manifest, page_dir, save_manifest, site_root, write_file};
use anyhow::{bail, Context, Result};
use serde_yaml::{Mapping, Value};
use std::fs;
use tracing::debug;

/// Create `pages/<name>/page.yml` with an empty section list.
pub fn page(name: &str, site: Option<&str>) -> Result<()> {
    let dir = page_dir(name, site)?;
    if dir.exists() {
        bail!("Page '{}' already exists", name);
    }
    fs::create_dir_all(&dir).with_context(|| format!("Failed to create {}", dir.display()))?;

    let mut manifest = Mapping::new();
    manifest.insert(Value::from("title"), Value::from(title_case(name)));
    manifest.insert(Value::from("sections"), Value::Sequence(Vec::new()));
    save_manifest(&dir, &manifest)?;

    println!("Added page {}", name);
    Ok(())
}

/// Create `<name>.md` on a page and register it in the manifest.
pub fn section(name: &str, page: &str, site: Option<&str>, position: Option<&str>) -> Result<()> {
    let dir = page_dir(page, site)?;
    let mut manifest = load_manifest(&dir)?;

    let mut sections = match manifest.get("sections") {
        Some(Value::Sequence(seq)) => seq.clone(),
        Some(Value::Null) | None => Vec::new(),
        Some(_) => bail!("'sections' in page '{}' is not a list", page),
    };
    if all_names(&sections).iter().any(|n| n == name) {
        bail!("Section '{}' already exists on page '{}'", name, page);
    }

    match position.map(parse_position).transpose()? {
        None => sections.push(Value::from(name)),
        Some(("under", parent)) => nest_under(&mut sections, parent, name)?,
        Some((placement, anchor)) => {
            let at = top_level_index(&sections, anchor)
                .with_context(|| format!("Section '{}' not found at top level", anchor))?;
            let at = if placement == "before" { at } else { at + 1 };
            sections.insert(at, Value::from(name));
        }
    }

    write_file(
        &dir.join(format!("{}.md", name)),
        &format!("---\ntype: Section\n---\n\n# {}\n", title_case(name)),
    )?;
    manifest.insert(Value::from("sections"), Value::Sequence(sections));
    save_manifest(&dir, &manifest)?;

    debug!("Added section {} to {}", name, dir.display());
    println!("Added section {} to page {}", name, page);
    Ok(())
}

/// Create `locales/<code>/` for every comma-separated code.
pub fn locale(codes: &str, site: Option<&str>) -> Result<()> {
    let root = site_root(site)?;
    let codes: Vec<&str> = codes
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .collect();
    if codes.is_empty() {
        bail!("No locale codes given");
    }

    for code in codes {
        let dir = root.join("locales").join(code);
        fs::create_dir_all(&dir).with_context(|| format!("Failed to create {}", dir.display()))?;
        println!("Added locale {}", code);
    }
    Ok(())
}

fn parse_position(position: &str) -> Result<(&str, &str)> {
    match position.split_once(':') {
        Some((kind @ ("under" | "before" | "after"), anchor)) if !anchor.is_empty() => {
            Ok((kind, anchor))
        }
        _ => bail!("Invalid position '{}'", position),
    }
}

/// Append `child` to `parent`'s group, turning a bare `parent` into a group.
/// Only top-level sections can take children.
fn nest_under(sections: &mut [Value], parent: &str, child: &str) -> Result<()> {
    for entry in sections.iter_mut() {
        if entry.as_str() == Some(parent) {
            let mut group = Mapping::new();
            group.insert(
                Value::from(parent),
                Value::Sequence(vec![Value::from(child)]),
            );
            *entry = Value::Mapping(group);
            return Ok(());
        }
        if let Value::Mapping(group) = entry {
            if let Some(Value::Sequence(children)) = group.get_mut(parent) {
                children.push(Value::from(child));
                return Ok(());
            }
        }
    }
    bail!("Parent section '{}' not found at top level", parent)
}

fn top_level_index(sections: &[Value], name: &str) -> Option<usize> {
    sections.iter().position(|entry| match entry {
        Value::String(s) => s == name,
        Value::Mapping(group) => group.contains_key(name),
        _ => false,
    })
}

fn all_names(sections: &[Value]) -> Vec<String> {
    let mut names = Vec::new();
    for entry in sections {
        match entry {
            Value::String(s) => names.push(s.clone()),
            Value::Mapping(group) => {
                for (key, children) in group {
                    if let Some(key) = key.as_str() {
                        names.push(key.to_string());
                    }
                    if let Value::Sequence(children) = children {
                        names.extend(children.iter().filter_map(|c| c.as_str().map(str::to_string)));
                    }
                }
            }
            _ => {}
        }
    }
    names
}

fn title_case(name: &str) -> String {
    name.split(|c: char| c == '-' || c == '_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
