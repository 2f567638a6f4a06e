//! Weighted profile-completion scoring.
//!
//! The scorer is a pure function over a profile value in either its nested
//! draft or flat record shape. Each scalar field carries a fixed weight and
//! an explicit ordered chain of accessor paths, tried in priority order, so
//! the flat-vs-nested and legacy-alias fallback policy is auditable in one
//! table.

use serde_json::Value;

use crate::draft::Draft;

/// One scored scalar field: its weight plus the accessor paths tried in
/// order until one yields a filled value.
struct FieldWeight {
    weight: f64,
    paths: &'static [&'static [&'static str]],
}

const fn w(weight: f64, paths: &'static [&'static [&'static str]]) -> FieldWeight {
    FieldWeight { weight, paths }
}

/// Basic sums to 35, contact to 20, current education to 20, previous
/// education to 10. Internships and documents contribute up to 10 each via
/// the array sub-scores below; the final sum is clamped to 100.
const FIELD_WEIGHTS: &[FieldWeight] = &[
    // basic — 35
    w(5.0, &[&["firstName"], &["basic", "firstName"]]),
    w(3.0, &[&["middleName"], &["basic", "middleName"]]),
    w(5.0, &[&["lastName"], &["basic", "lastName"]]),
    w(4.0, &[&["dob"], &["basic", "dob"]]),
    w(4.0, &[&["gender"], &["basic", "gender"]]),
    w(5.0, &[&["phone"], &["basic", "phone"]]),
    w(5.0, &[&["permanentAddress"], &["basic", "permanentAddress"]]),
    w(4.0, &[&["currentAddress"], &["basic", "currentAddress"]]),
    // contact — 20
    w(5.0, &[&["email"], &["contact", "email"]]),
    w(4.0, &[&["alternatePhone"], &["contact", "alternatePhone"]]),
    w(6.0, &[&["city"], &["contact", "city"]]),
    w(5.0, &[&["state"], &["contact", "state"]]),
    // current education — 20
    w(
        5.0,
        &[
            &["currentEducation_degree"],
            &["currentEdu", "currentEducation_degree"],
            &["currentEdu", "degree"],
        ],
    ),
    w(
        5.0,
        &[
            &["currentEducation_college"],
            &["currentEdu", "currentEducation_college"],
            &["currentEdu", "college"],
        ],
    ),
    w(
        5.0,
        &[
            &["currentEducation_cgpa"],
            &["currentEdu", "currentEducation_cgpa"],
            &["currentEdu", "cgpa"],
        ],
    ),
    w(
        5.0,
        &[
            &["currentEducation_year"],
            &["currentEdu", "currentEducation_year"],
            &["currentEdu", "year"],
        ],
    ),
    // previous education — 10, with legacy aliases
    w(
        2.5,
        &[
            &["previousEducation_10_school"],
            &["previousEdu", "previousEducation_10_school"],
            &["previousEdu", "school10"],
            &["school10"],
        ],
    ),
    w(
        2.5,
        &[
            &["previousEducation_10_marks"],
            &["previousEdu", "previousEducation_10_marks"],
            &["previousEdu", "percent10"],
            &["percent10"],
        ],
    ),
    w(
        2.5,
        &[
            &["previousEducation_12_school"],
            &["previousEdu", "previousEducation_12_school"],
            &["previousEdu", "school12"],
            &["school12"],
        ],
    ),
    w(
        2.5,
        &[
            &["previousEducation_12_marks"],
            &["previousEdu", "previousEducation_12_marks"],
            &["previousEdu", "percent12"],
            &["percent12"],
        ],
    ),
];

const INTERNSHIP_WEIGHT: f64 = 10.0;
const INTERNSHIP_CAP: usize = 3;
const DOCUMENT_WEIGHT: f64 = 10.0;
const DOCUMENT_CAP: usize = 2;

/// Computes the 0-100 completion score for a profile. Pure and idempotent:
/// the same value always scores the same integer.
pub fn completion_score(profile: &Value) -> u8 {
    let mut total = 0.0;
    for field in FIELD_WEIGHTS {
        if field
            .paths
            .iter()
            .any(|path| is_filled(lookup(profile, path)))
        {
            total += field.weight;
        }
    }
    total += internship_subscore(profile);
    total += document_subscore(profile);
    total.round().clamp(0.0, 100.0) as u8
}

/// Scores a draft held by the store.
pub fn score_draft(draft: &Draft) -> u8 {
    completion_score(draft.as_value())
}

fn lookup<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(root, |node, key| node.get(key))
}

/// A leaf counts as filled when its trimmed string form is non-empty.
/// Numbers count; `false` does not.
fn is_filled(value: Option<&Value>) -> bool {
    match value {
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(Value::Number(_)) => true,
        Some(Value::Bool(b)) => *b,
        _ => false,
    }
}

/// Up to 3 internship entries count; an entry counts when its `company` or
/// `role` is filled. The sub-score is continuous, not integer-floored.
fn internship_subscore(profile: &Value) -> f64 {
    let filled = profile
        .get("internships")
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter(|e| is_filled(e.get("company")) || is_filled(e.get("role")))
                .count()
        })
        .unwrap_or(0);
    (filled.min(INTERNSHIP_CAP) as f64 / INTERNSHIP_CAP as f64) * INTERNSHIP_WEIGHT
}

/// Up to 2 documents count; the list lives at `documents.list` in the
/// nested shape and directly under `documents` in the flat one.
fn document_subscore(profile: &Value) -> f64 {
    let count = document_list(profile).map_or(0, |list| list.len());
    (count.min(DOCUMENT_CAP) as f64 / DOCUMENT_CAP as f64) * DOCUMENT_WEIGHT
}

fn document_list(profile: &Value) -> Option<&Vec<Value>> {
    let docs = profile.get("documents")?;
    docs.get("list")
        .and_then(Value::as_array)
        .or_else(|| docs.as_array())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::{nest, Section};
    use serde_json::json;

    fn full_flat() -> Value {
        json!({
            "firstName": "Ann", "middleName": "B", "lastName": "Lee",
            "dob": "2001-04-02", "gender": "female", "phone": "555",
            "permanentAddress": "12 Elm St", "currentAddress": "12 Elm St",
            "sameAsPermanent": true,
            "email": "a@b.com", "alternatePhone": "556", "city": "Pune", "state": "MH",
            "currentEducation_degree": "BTech", "currentEducation_college": "IIT",
            "currentEducation_cgpa": "8.9", "currentEducation_year": "2023",
            "previousEducation_10_school": "Central High", "previousEducation_10_marks": "91",
            "previousEducation_12_school": "Central High", "previousEducation_12_marks": "88",
            "isDiploma": false,
            "internships": [
                { "company": "Acme", "role": "Intern" },
                { "company": "Globex", "role": "SWE" },
                { "company": "Initech", "role": "QA" }
            ],
            "documents": [
                { "url": "https://x/cv.pdf", "name": "cv.pdf" },
                { "url": "https://x/tc.pdf", "name": "tc.pdf" }
            ]
        })
    }

    #[test]
    fn test_empty_draft_scores_zero() {
        assert_eq!(score_draft(&Draft::empty()), 0);
        assert_eq!(completion_score(&json!({})), 0);
    }

    #[test]
    fn test_fully_populated_scores_hundred() {
        let flat = full_flat();
        assert_eq!(completion_score(&flat), 100);
        // Same record scored through the nested draft shape.
        assert_eq!(score_draft(&nest(&flat)), 100);
    }

    #[test]
    fn test_scoring_is_idempotent() {
        let flat = full_flat();
        assert_eq!(completion_score(&flat), completion_score(&flat));
    }

    #[test]
    fn test_walkthrough_scenario() {
        let draft = Draft::empty();
        assert_eq!(score_draft(&draft), 0);

        let draft = draft
            .set_field(Section::Basic, "firstName", json!("Ann"))
            .set_field(Section::Basic, "phone", json!("555"));
        assert_eq!(score_draft(&draft), 10);

        let draft = draft
            .set_field(Section::Contact, "email", json!("a@b.com"))
            .set_field(Section::Contact, "city", json!("X"));
        assert_eq!(score_draft(&draft), 21);

        // Two role-filled internships earn 2/3 of the internship weight.
        let draft = draft.set_section(
            Section::Internships,
            json!([{ "role": "SWE" }, { "role": "QA" }]),
        );
        let draft = draft.set_section(Section::Documents, json!([{ "url": "u", "name": "n" }]));
        assert_eq!(score_draft(&draft), 33); // 21 + 6.67 + 5, rounded

        // A third internship completes the sub-score: 21 + 10 + 5.
        let draft = draft.set_section(
            Section::Internships,
            json!([{ "role": "SWE" }, { "role": "QA" }, { "company": "Acme" }]),
        );
        assert_eq!(score_draft(&draft), 36);
    }

    #[test]
    fn test_internship_count_capped_at_three() {
        let three = json!({ "internships": [
            { "company": "A" }, { "company": "B" }, { "company": "C" }
        ]});
        let five = json!({ "internships": [
            { "company": "A" }, { "company": "B" }, { "company": "C" },
            { "company": "D" }, { "company": "E" }
        ]});
        assert_eq!(completion_score(&three), completion_score(&five));
        assert_eq!(completion_score(&three), 10);
    }

    #[test]
    fn test_blank_internship_entries_do_not_count() {
        let blanks = json!({ "internships": [
            { "company": "", "role": " " }, { "company": "Acme" }
        ]});
        let one = json!({ "internships": [{ "company": "Acme" }] });
        assert_eq!(completion_score(&blanks), completion_score(&one));
    }

    #[test]
    fn test_document_count_capped_at_two() {
        let two = json!({ "documents": [{ "url": "a" }, { "url": "b" }] });
        let four = json!({ "documents": [
            { "url": "a" }, { "url": "b" }, { "url": "c" }, { "url": "d" }
        ]});
        assert_eq!(completion_score(&two), completion_score(&four));
        assert_eq!(completion_score(&two), 10);
    }

    #[test]
    fn test_documents_read_from_nested_list_or_bare_array() {
        let nested = json!({ "documents": { "list": [{ "url": "a" }] } });
        let flat = json!({ "documents": [{ "url": "a" }] });
        assert_eq!(completion_score(&nested), completion_score(&flat));
        assert_eq!(completion_score(&nested), 5);
    }

    #[test]
    fn test_legacy_previous_education_keys_score_equally() {
        let canonical = json!({ "previousEdu": {
            "previousEducation_10_school": "X", "previousEducation_10_marks": "90"
        }});
        let legacy = json!({ "previousEdu": { "school10": "X", "percent10": "90" } });
        assert_eq!(completion_score(&canonical), completion_score(&legacy));
        assert_eq!(completion_score(&legacy), 5);
    }

    #[test]
    fn test_whitespace_only_values_are_not_filled() {
        let draft = Draft::empty().set_field(Section::Basic, "firstName", json!("   "));
        assert_eq!(score_draft(&draft), 0);
    }

    #[test]
    fn test_score_never_decreases_when_fields_fill_in() {
        let fields: &[(Section, &str)] = &[
            (Section::Basic, "firstName"),
            (Section::Basic, "middleName"),
            (Section::Basic, "lastName"),
            (Section::Basic, "dob"),
            (Section::Basic, "gender"),
            (Section::Basic, "phone"),
            (Section::Basic, "permanentAddress"),
            (Section::Basic, "currentAddress"),
            (Section::Contact, "email"),
            (Section::Contact, "alternatePhone"),
            (Section::Contact, "city"),
            (Section::Contact, "state"),
            (Section::CurrentEdu, "degree"),
            (Section::CurrentEdu, "college"),
            (Section::CurrentEdu, "cgpa"),
            (Section::CurrentEdu, "year"),
            (Section::PreviousEdu, "previousEducation_10_school"),
            (Section::PreviousEdu, "previousEducation_10_marks"),
            (Section::PreviousEdu, "previousEducation_12_school"),
            (Section::PreviousEdu, "previousEducation_12_marks"),
        ];
        let mut draft = Draft::empty();
        let mut last = score_draft(&draft);
        for (section, name) in fields {
            draft = draft.set_field(*section, name, json!("value"));
            let next = score_draft(&draft);
            assert!(next >= last, "score dropped after filling {name}");
            last = next;
        }
        // Clearing a field never raises the score.
        let cleared = draft.set_field(Section::Basic, "firstName", json!(""));
        assert!(score_draft(&cleared) <= last);
    }
}
