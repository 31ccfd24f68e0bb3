//! Inline field extraction: pulls labelled fields out of a single message such as
//! `create resume experience: ... education: ... skills: ...`.
//!
//! A field's capture starts after the first `<field>` followed by `:` or
//! whitespace and runs to the next `<any field>[:\s]` label or the end of input.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::resume::{ResumeData, ResumeField};

lazy_static! {
    static ref FIELD_LABELS: Vec<(ResumeField, Regex)> = ResumeField::ALL
        .iter()
        .map(|field| {
            let pattern = format!(r"(?i){}[:\s]", field.as_str());
            (*field, Regex::new(&pattern).expect("field label pattern is valid"))
        })
        .collect();
    static ref ANY_LABEL: Regex = {
        let names: Vec<&str> = ResumeField::ALL.iter().map(|f| f.as_str()).collect();
        Regex::new(&format!(r"(?i)(?:{})[:\s]", names.join("|")))
            .expect("label alternation pattern is valid")
    };
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldExtraction {
    pub found: ResumeData,
    /// Fields with no usable text, in interview order.
    pub missing: Vec<ResumeField>,
}

impl FieldExtraction {
    pub fn found_fields(&self) -> Vec<ResumeField> {
        self.found.fields().collect()
    }
}

pub fn extract_fields(input: &str) -> FieldExtraction {
    let mut found = ResumeData::new();
    let mut missing = Vec::new();

    for (field, label) in FIELD_LABELS.iter() {
        let lines = label
            .find(input)
            .map(|m| split_lines(capture_from(input, m.end())))
            .unwrap_or_default();

        if lines.is_empty() {
            missing.push(*field);
        } else {
            found.set(*field, lines);
        }
    }

    FieldExtraction { found, missing }
}

/// Text from `start` up to the next field label, or to the end.
fn capture_from(input: &str, start: usize) -> &str {
    let end = ANY_LABEL
        .find_at(input, start)
        .map(|m| m.start())
        .unwrap_or(input.len());
    &input[start..end]
}

fn split_lines(capture: &str) -> Vec<String> {
    capture
        .trim()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}
