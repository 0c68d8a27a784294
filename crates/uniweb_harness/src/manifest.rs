//! Page manifest (`page.yml`) model and dotted-path lookup over YAML values.
//!
//! A manifest's `sections` key is an ordered sequence. Each element is either a
//! bare section name or a single-key mapping `{parent: [children...]}` that
//! nests children one level under `parent`.

use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::collections::BTreeMap;

/// One element of a manifest's `sections` sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SectionEntry {
    /// A top-level leaf section.
    Name(String),
    /// A parent section with children nested under it.
    Group(BTreeMap<String, Vec<String>>),
}

impl SectionEntry {
    /// Every section name this entry declares, parent before children.
    pub fn names(&self) -> Vec<&str> {
        match self {
            Self::Name(name) => vec![name.as_str()],
            Self::Group(group) => group
                .iter()
                .flat_map(|(parent, children)| {
                    std::iter::once(parent.as_str()).chain(children.iter().map(String::as_str))
                })
                .collect(),
        }
    }
}

/// Parsed `page.yml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageManifest {
    /// Ordered section list.
    #[serde(default)]
    pub sections: Vec<SectionEntry>,

    /// Every other key of the document (title, layout, ...).
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl PageManifest {
    /// All section names in manifest order, nested children included.
    pub fn section_names(&self) -> Vec<&str> {
        self.sections.iter().flat_map(SectionEntry::names).collect()
    }

    /// How many times `name` is declared at any depth.
    pub fn occurrences(&self, name: &str) -> usize {
        self.section_names().into_iter().filter(|n| *n == name).count()
    }

    /// Names of the top-level entries (parents for groups).
    pub fn top_level(&self) -> Vec<&str> {
        self.sections
            .iter()
            .flat_map(|entry| match entry {
                SectionEntry::Name(name) => vec![name.as_str()],
                SectionEntry::Group(group) => group.keys().map(String::as_str).collect(),
            })
            .collect()
    }

    /// Children nested under `parent`, or `None` when `parent` has no group.
    pub fn children_of(&self, parent: &str) -> Option<&[String]> {
        self.sections.iter().find_map(|entry| match entry {
            SectionEntry::Group(group) => group.get(parent).map(Vec::as_slice),
            SectionEntry::Name(_) => None,
        })
    }
}

/// Resolve a dotted path such as `sections.length` or `sections.0.hero`.
///
/// Mapping segments select keys, numeric segments index sequences, and
/// `length` yields the length of a sequence, string or mapping when no key of
/// that name exists. Any missing segment yields `None`.
pub fn lookup_path(root: &Value, path: &str) -> Option<Value> {
    let mut current = root.clone();

    for segment in path.split('.').filter(|s| !s.is_empty()) {
        current = match &current {
            Value::Mapping(map) => match map.get(segment) {
                Some(v) => v.clone(),
                None if segment == "length" => Value::from(map.len() as u64),
                None => return None,
            },
            Value::Sequence(seq) => {
                if segment == "length" {
                    Value::from(seq.len() as u64)
                } else {
                    seq.get(segment.parse::<usize>().ok()?)?.clone()
                }
            }
            Value::String(s) if segment == "length" => Value::from(s.chars().count() as u64),
            Value::Tagged(tagged) => lookup_path(&tagged.value, segment)?,
            _ => return None,
        };
    }

    Some(current)
}
