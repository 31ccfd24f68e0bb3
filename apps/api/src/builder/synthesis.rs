//! Renders collected résumé data as a fixed-structure markdown document.
//!
//! The summary block appears only when objective lines exist. Every other
//! heading is always rendered, even with nothing under it.

use crate::models::resume::{ResumeData, ResumeField};

pub const RESUME_TITLE: &str = "# Professional Resume";

/// Always-rendered sections, in document order.
const BULLET_SECTIONS: [(&str, ResumeField); 4] = [
    ("## Professional Experience", ResumeField::Experience),
    ("## Education", ResumeField::Education),
    ("## Skills & Expertise", ResumeField::Skills),
    ("## Key Achievements", ResumeField::Achievements),
];

pub fn render_resume(data: &ResumeData) -> String {
    let summary = if data.has(ResumeField::Objective) {
        format!(
            "## Professional Summary\n{}",
            data.lines(ResumeField::Objective).join("\n")
        )
    } else {
        String::new()
    };

    let mut blocks = vec![RESUME_TITLE.to_string(), summary];
    for (heading, field) in BULLET_SECTIONS {
        let bullets = data
            .lines(field)
            .iter()
            .map(|line| format!("- {line}"))
            .collect::<Vec<_>>()
            .join("\n");
        blocks.push(format!("{heading}\n{bullets}"));
    }

    blocks.join("\n\n")
}
