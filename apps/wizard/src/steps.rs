//! Linear step sequencing for the wizard, plus the advisory per-step
//! completion ticks. The predicates here are simple boolean projections
//! over the draft and intentionally independent of the scoring weights.

use serde_json::Value;

use crate::draft::{Draft, Section};

/// Ordered wizard steps. `Finish` is the read-only review step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Basic,
    Contact,
    CurrentEdu,
    PreviousEdu,
    Internships,
    Documents,
    Finish,
}

pub const STEP_ORDER: [Step; 7] = [
    Step::Basic,
    Step::Contact,
    Step::CurrentEdu,
    Step::PreviousEdu,
    Step::Internships,
    Step::Documents,
    Step::Finish,
];

impl Step {
    pub fn key(self) -> &'static str {
        match self {
            Step::Basic => "basic",
            Step::Contact => "contact",
            Step::CurrentEdu => "currentEdu",
            Step::PreviousEdu => "previousEdu",
            Step::Internships => "internships",
            Step::Documents => "documents",
            Step::Finish => "finish",
        }
    }

    /// The draft section this step edits; `Finish` edits nothing.
    pub fn section(self) -> Option<Section> {
        match self {
            Step::Basic => Some(Section::Basic),
            Step::Contact => Some(Section::Contact),
            Step::CurrentEdu => Some(Section::CurrentEdu),
            Step::PreviousEdu => Some(Section::PreviousEdu),
            Step::Internships => Some(Section::Internships),
            Step::Documents => Some(Section::Documents),
            Step::Finish => None,
        }
    }
}

/// Linear cursor over the wizard steps; `next`/`prev` clamp at the bounds.
#[derive(Debug, Default)]
pub struct StepSequencer {
    index: usize,
}

impl StepSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Step {
        STEP_ORDER[self.index]
    }

    pub fn next(&mut self) -> Step {
        if self.index + 1 < STEP_ORDER.len() {
            self.index += 1;
        }
        self.current()
    }

    pub fn prev(&mut self) -> Step {
        self.index = self.index.saturating_sub(1);
        self.current()
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.index == STEP_ORDER.len() - 1
    }
}

/// Advisory completion tick for the wizard header.
pub fn is_step_complete(step: Step, draft: &Draft) -> bool {
    match step {
        Step::Basic => {
            filled(draft, Section::Basic, "firstName") && filled(draft, Section::Basic, "phone")
        }
        Step::Contact => filled(draft, Section::Contact, "email"),
        Step::CurrentEdu => {
            filled(draft, Section::CurrentEdu, "degree")
                && filled(draft, Section::CurrentEdu, "college")
        }
        Step::PreviousEdu => filled(draft, Section::PreviousEdu, "previousEducation_10_school"),
        Step::Internships => draft
            .section(Section::Internships)
            .as_array()
            .is_some_and(|entries| {
                entries
                    .iter()
                    .any(|e| non_empty(e.get("company")) || non_empty(e.get("role")))
            }),
        Step::Documents => draft
            .section(Section::Documents)
            .get("list")
            .and_then(Value::as_array)
            .is_some_and(|list| !list.is_empty()),
        Step::Finish => STEP_ORDER[..STEP_ORDER.len() - 1]
            .iter()
            .all(|s| is_step_complete(*s, draft)),
    }
}

fn filled(draft: &Draft, section: Section, key: &str) -> bool {
    non_empty(draft.section(section).get(key))
}

fn non_empty(value: Option<&Value>) -> bool {
    value
        .and_then(Value::as_str)
        .is_some_and(|s| !s.trim().is_empty())
}
