//! Prompt templates for the three generation calls.
//!
//! Templates are rendered with minijinja; the dynamic parts (image
//! descriptions, report text, speakers) are assembled in Rust and passed in
//! as context values.

use minijinja::{Environment, context};
use scribe_core::error::Result;
use scribe_core::speaker::Speaker;
use serde::Serialize;

/// Instruction sent with every image to the vision model.
pub const IMAGE_ANALYSIS_INSTRUCTION: &str = "Analyze this workshop photo. \
1) Transcribe ALL legible text from sticky notes, cards, or whiteboards. \
2) Describe the color coding or grouping of items (e.g., 'yellow notes clustered on the left'). \
3) Identify any drawn diagrams or arrows. \
Output as a structured summary of the visual data.";

/// Stored as the description when the vision model returns no text.
pub const NO_ANALYSIS_PLACEHOLDER: &str = "No analysis generated.";

/// A section the synthesized report must contain.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ReportSection {
    pub title: &'static str,
    pub purpose: &'static str,
}

/// The four sections every report is asked for, in order.
pub const REPORT_SECTIONS: [ReportSection; 4] = [
    ReportSection {
        title: "Executive Summary",
        purpose: "A high-level overview of the session's visible outcome.",
    },
    ReportSection {
        title: "Key Themes & Insights",
        purpose: "Group the sticky notes and points into thematic clusters.",
    },
    ReportSection {
        title: "Actionable Findings",
        purpose: "Specific takeaways derived from the content.",
    },
    ReportSection {
        title: "Suggested Next Steps",
        purpose: "Practical follow-up actions based on the workshop type.",
    },
];

const REPORT_TEMPLATE: &str = r#"You are an expert Workshop Facilitator and Documentation Specialist.
I have analyzed several photos from a workshop session.

Here is the extracted data from the materials:
---
{{ context }}
---

Based on these inputs, generate a professional Workshop Summary Report in Markdown format.
The report MUST include:
{% for section in sections %}{{ loop.index }}. **{{ section.title }}**: {{ section.purpose }}
{% endfor %}
Formatting:
- Use headers (#, ##).
- Use bullet points.
- Use bold text for emphasis.
- Keep the tone professional, encouraging, and clear."#;

const SCRIPT_TEMPLATE: &str = r#"Convert the following workshop report into a lively podcast transcript between two colleagues, {{ speaker_names }}.

Report Content:
{{ report }}

Characters:
{% for speaker in speakers %}- {{ speaker.name }}: {{ speaker.role }}. {{ speaker.style }}
{% endfor %}
Format the output EXACTLY like this (no other text):
{% for name in turns %}{{ name }}: [Line]
{% endfor %}...

Keep it under 2 minutes of speaking time. Start with a friendly welcome."#;

/// Joins descriptions into one block, labelling each with its 1-based position.
pub fn combine_descriptions(descriptions: &[String]) -> String {
    descriptions
        .iter()
        .enumerate()
        .map(|(i, description)| format!("Image {} Analysis:\n{}", i + 1, description))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Builds the report-writing prompt for the given descriptions.
pub fn build_report_prompt(descriptions: &[String]) -> Result<String> {
    let env = Environment::new();
    let rendered = env.render_str(
        REPORT_TEMPLATE,
        context! {
            context => combine_descriptions(descriptions),
            sections => REPORT_SECTIONS,
        },
    )?;
    Ok(rendered)
}

/// Cuts `text` to at most `max_chars` characters.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

/// Builds the two-speaker script prompt from a report.
pub fn build_script_prompt(
    report_markdown: &str,
    speakers: &[Speaker],
    char_budget: usize,
) -> Result<String> {
    let names: Vec<&str> = speakers.iter().map(|s| s.name.as_str()).collect();
    let speaker_names = match names.as_slice() {
        [] => String::new(),
        [only] => only.to_string(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    };
    // Example turns alternate and come back to the opener.
    let turns: Vec<&str> = names
        .iter()
        .chain(names.first())
        .copied()
        .collect();

    let env = Environment::new();
    let rendered = env.render_str(
        SCRIPT_TEMPLATE,
        context! {
            speaker_names => speaker_names,
            report => truncate_chars(report_markdown, char_budget),
            speakers => speakers,
            turns => turns,
        },
    )?;
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scribe_core::speaker::default_speakers;

    #[test]
    fn test_report_prompt_labels_descriptions_by_position() {
        let prompt = build_report_prompt(&["A".to_string(), "B".to_string()]).unwrap();
        assert!(prompt.contains("Image 1 Analysis:\nA\n\nImage 2 Analysis:\nB"));
    }

    #[test]
    fn test_report_prompt_requests_exactly_four_sections() {
        let prompt = build_report_prompt(&["A".to_string()]).unwrap();
        assert!(prompt.contains("1. **Executive Summary**"));
        assert!(prompt.contains("2. **Key Themes & Insights**"));
        assert!(prompt.contains("3. **Actionable Findings**"));
        assert!(prompt.contains("4. **Suggested Next Steps**"));
        assert!(!prompt.contains("5. **"));
        assert!(prompt.contains("Markdown format"));
    }

    #[test]
    fn test_report_prompt_is_not_html_escaped() {
        let prompt = build_report_prompt(&["<b>R&D</b>".to_string()]).unwrap();
        assert!(prompt.contains("<b>R&D</b>"));
    }

    #[test]
    fn test_truncate_chars_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("abc", 0), "");
    }

    #[test]
    fn test_script_prompt_names_speakers_and_format() {
        let prompt = build_script_prompt("# Report", &default_speakers(), 8000).unwrap();
        assert!(prompt.contains("two colleagues, Alex and Sam."));
        assert!(prompt.contains("- Alex: The lead facilitator."));
        assert!(prompt.contains("- Sam: The analyst."));
        assert!(prompt.contains("Alex: [Line]\nSam: [Line]\nAlex: [Line]\n..."));
        assert!(prompt.contains("# Report"));
    }

    #[test]
    fn test_script_prompt_truncates_report() {
        let report = "x".repeat(50);
        let prompt = build_script_prompt(&report, &default_speakers(), 10).unwrap();
        assert!(prompt.contains(&"x".repeat(10)));
        assert!(!prompt.contains(&"x".repeat(11)));
    }
}
