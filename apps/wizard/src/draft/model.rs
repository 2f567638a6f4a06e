use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::warn;

/// The six independently editable sections of a profile draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Basic,
    Contact,
    CurrentEdu,
    PreviousEdu,
    Internships,
    Documents,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Basic,
        Section::Contact,
        Section::CurrentEdu,
        Section::PreviousEdu,
        Section::Internships,
        Section::Documents,
    ];

    /// Wire key for this section in the nested draft shape.
    pub fn key(self) -> &'static str {
        match self {
            Section::Basic => "basic",
            Section::Contact => "contact",
            Section::CurrentEdu => "currentEdu",
            Section::PreviousEdu => "previousEdu",
            Section::Internships => "internships",
            Section::Documents => "documents",
        }
    }

    /// The empty value for this section: `{}` for the scalar sections,
    /// `[]` for internships, `{"list": []}` for documents.
    fn empty_value(self) -> Value {
        match self {
            Section::Internships => json!([]),
            Section::Documents => json!({ "list": [] }),
            _ => json!({}),
        }
    }

    /// Coerces `value` into the shape this section requires. A bare array
    /// under `documents` (the flat shape) is wrapped into `{"list": [...]}`;
    /// anything unusable degrades to the section's empty value.
    fn normalize(self, value: Value) -> Value {
        match (self, value) {
            (Section::Internships, v @ Value::Array(_)) => v,
            (Section::Internships, _) => self.empty_value(),
            (Section::Documents, Value::Array(list)) => json!({ "list": list }),
            (Section::Documents, v @ Value::Object(_)) => v,
            (Section::Documents, _) => self.empty_value(),
            (_, v @ Value::Object(_)) => v,
            _ => self.empty_value(),
        }
    }
}

/// An in-progress profile.
///
/// Invariant: the backing JSON object always carries all six section keys
/// (objects for the scalar sections and `documents`, an array for
/// `internships`), so the scorer and the step predicates stay total.
/// Scalar leaves may be empty strings; booleans default to `false`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Draft(Value);

impl Draft {
    /// All-empty default draft: every section present, every leaf empty.
    pub fn empty() -> Self {
        let mut root = Map::new();
        for section in Section::ALL {
            root.insert(section.key().to_string(), section.empty_value());
        }
        Draft(Value::Object(root))
    }

    /// Builds a draft from a possibly-partial nested value (e.g. a local
    /// snapshot), installing any missing sections and coercing malformed
    /// ones. Non-object input yields the empty draft.
    pub fn from_nested(value: Value) -> Self {
        let root = match value {
            Value::Object(map) => map,
            _ => return Draft::empty(),
        };
        let mut normalized = Map::new();
        for section in Section::ALL {
            let slot = root
                .get(section.key())
                .cloned()
                .unwrap_or_else(|| section.empty_value());
            normalized.insert(section.key().to_string(), section.normalize(slot));
        }
        Draft(Value::Object(normalized))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    pub fn section(&self, section: Section) -> &Value {
        &self.0[section.key()]
    }

    /// Pure field update: returns a new draft with `section.name = value`
    /// and every other section unchanged. `internships` is array-valued and
    /// has no named fields; a `set_field` against it is logged and ignored
    /// (use `set_section`).
    pub fn set_field(&self, section: Section, name: &str, value: Value) -> Draft {
        let mut next = self.clone();
        match &mut next.0[section.key()] {
            Value::Object(map) => {
                map.insert(name.to_string(), value);
            }
            _ => warn!(
                "set_field on array section '{}' ignored (field '{name}')",
                section.key()
            ),
        }
        next
    }

    /// Wholesale section replacement, used for the array-valued sections.
    pub fn set_section(&self, section: Section, value: Value) -> Draft {
        let mut next = self.clone();
        next.0[section.key()] = section.normalize(value);
        next
    }
}

impl Default for Draft {
    fn default() -> Self {
        Draft::empty()
    }
}

/// One internship entry of the `internships` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Internship {
    pub company: String,
    pub role: String,
    pub duration: String,
    pub description: String,
}

/// One uploaded document reference of the `documents` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentRef {
    pub url: String,
    pub name: String,
}
