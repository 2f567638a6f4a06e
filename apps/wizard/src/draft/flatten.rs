//! Bidirectional projection between the nested draft shape and the flat
//! record the backend stores. Every scalar field maps to exactly one flat
//! key; the array sections pass through.

use serde_json::{json, Map, Value};

use super::model::{Draft, Section};

/// One scalar field of the draft: where it lives in the nested shape, the
/// flat key the backend uses for it, and any legacy aliases older payloads
/// may still carry.
pub struct FieldMapping {
    pub section: Section,
    pub nested_key: &'static str,
    pub flat_key: &'static str,
    pub aliases: &'static [&'static str],
    pub boolean: bool,
}

const fn field(
    section: Section,
    nested_key: &'static str,
    flat_key: &'static str,
) -> FieldMapping {
    FieldMapping {
        section,
        nested_key,
        flat_key,
        aliases: &[],
        boolean: false,
    }
}

const fn flag(section: Section, key: &'static str) -> FieldMapping {
    FieldMapping {
        section,
        nested_key: key,
        flat_key: key,
        aliases: &[],
        boolean: true,
    }
}

const fn legacy(
    section: Section,
    key: &'static str,
    aliases: &'static [&'static str],
) -> FieldMapping {
    FieldMapping {
        section,
        nested_key: key,
        flat_key: key,
        aliases,
        boolean: false,
    }
}

pub const SCALAR_FIELDS: &[FieldMapping] = &[
    field(Section::Basic, "firstName", "firstName"),
    field(Section::Basic, "middleName", "middleName"),
    field(Section::Basic, "lastName", "lastName"),
    field(Section::Basic, "dob", "dob"),
    field(Section::Basic, "gender", "gender"),
    field(Section::Basic, "phone", "phone"),
    field(Section::Basic, "permanentAddress", "permanentAddress"),
    field(Section::Basic, "currentAddress", "currentAddress"),
    flag(Section::Basic, "sameAsPermanent"),
    field(Section::Contact, "email", "email"),
    field(Section::Contact, "alternatePhone", "alternatePhone"),
    field(Section::Contact, "city", "city"),
    field(Section::Contact, "state", "state"),
    field(Section::CurrentEdu, "degree", "currentEducation_degree"),
    field(Section::CurrentEdu, "college", "currentEducation_college"),
    field(Section::CurrentEdu, "cgpa", "currentEducation_cgpa"),
    field(Section::CurrentEdu, "year", "currentEducation_year"),
    legacy(Section::PreviousEdu, "previousEducation_10_school", &["school10"]),
    legacy(Section::PreviousEdu, "previousEducation_10_marks", &["percent10"]),
    legacy(Section::PreviousEdu, "previousEducation_12_school", &["school12"]),
    legacy(Section::PreviousEdu, "previousEducation_12_marks", &["percent12"]),
    flag(Section::PreviousEdu, "isDiploma"),
];

/// Projects a nested draft onto the backend's flat record shape.
/// Deterministic: the same draft always yields the same record, which is
/// what makes an orphaned autosave harmless.
pub fn flatten(draft: &Draft) -> Value {
    let mut flat = Map::new();
    for f in SCALAR_FIELDS {
        let value = draft
            .section(f.section)
            .get(f.nested_key)
            .cloned()
            .unwrap_or_else(|| empty_leaf(f));
        flat.insert(f.flat_key.to_string(), value);
    }
    flat.insert(
        "internships".to_string(),
        draft.section(Section::Internships).clone(),
    );
    let documents = draft
        .section(Section::Documents)
        .get("list")
        .cloned()
        .unwrap_or_else(|| json!([]));
    flat.insert("documents".to_string(), documents);
    Value::Object(flat)
}

/// Builds a fully populated nested draft from a flat backend record.
///
/// Per field the lookup order is: the flat top-level key, then the nested
/// section's key (legacy payload shape), then each legacy alias at either
/// level, else the empty leaf. Never fails; malformed input degrades to
/// empty leaves.
pub fn nest(flat: &Value) -> Draft {
    let mut draft = Draft::empty().into_value();
    for f in SCALAR_FIELDS {
        let value = lookup_scalar(flat, f)
            .cloned()
            .unwrap_or_else(|| empty_leaf(f));
        draft[f.section.key()][f.nested_key] = value;
    }
    if let Some(entries) = flat.get("internships").and_then(Value::as_array) {
        draft[Section::Internships.key()] = Value::Array(entries.clone());
    }
    if let Some(list) = flat_documents(flat) {
        draft[Section::Documents.key()] = json!({ "list": list });
    }
    Draft::from_nested(draft)
}

fn lookup_scalar<'a>(flat: &'a Value, f: &FieldMapping) -> Option<&'a Value> {
    let nested = flat.get(f.section.key());
    let primary = [
        flat.get(f.flat_key),
        nested.and_then(|s| s.get(f.nested_key)),
    ];
    for candidate in primary.into_iter().flatten() {
        if !candidate.is_null() {
            return Some(candidate);
        }
    }
    for alias in f.aliases {
        let fallback = flat
            .get(*alias)
            .or_else(|| nested.and_then(|s| s.get(*alias)));
        if let Some(v) = fallback {
            if !v.is_null() {
                return Some(v);
            }
        }
    }
    None
}

fn flat_documents(flat: &Value) -> Option<Vec<Value>> {
    let docs = flat.get("documents")?;
    docs.as_array()
        .or_else(|| docs.get("list").and_then(Value::as_array))
        .cloned()
}

fn empty_leaf(f: &FieldMapping) -> Value {
    if f.boolean {
        Value::Bool(false)
    } else {
        Value::String(String::new())
    }
}
