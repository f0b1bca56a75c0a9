//! Turns plain resume text into styled lines.
//!
//! Sections are separated by blank lines. The first line of a section is a
//! heading when it contains a colon; every other non-empty line is body text.

use crate::render::font_metrics::{get_metrics, FontFace, FontMetricTable};

pub const HEADING_SIZE: f32 = 14.0;
pub const BODY_SIZE: f32 = 11.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    Heading,
    Body,
}

impl TextStyle {
    pub fn font_size(self) -> f32 {
        match self {
            TextStyle::Heading => HEADING_SIZE,
            TextStyle::Body => BODY_SIZE,
        }
    }

    pub fn face(self) -> FontFace {
        match self {
            TextStyle::Heading => FontFace::HelveticaBold,
            TextStyle::Body => FontFace::Helvetica,
        }
    }

    pub fn metrics(self) -> &'static FontMetricTable {
        get_metrics(self.face())
    }

    /// Name of the font in the page resource dictionary.
    pub fn resource_name(self) -> &'static str {
        match self {
            TextStyle::Heading => "F2",
            TextStyle::Body => "F1",
        }
    }

    /// Distance between consecutive baselines.
    pub fn line_height(self) -> f32 {
        self.font_size() * 1.2
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StyledLine {
    pub text: String,
    pub style: TextStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LayoutItem {
    /// Vertical space of one body line between sections.
    Gap,
    Line(StyledLine),
}

/// Keeps printable ASCII and newlines; tabs become spaces, everything else is dropped.
pub fn sanitize(text: &str) -> String {
    text.chars()
        .filter_map(|c| match c {
            '\n' | ' '..='~' => Some(c),
            '\t' => Some(' '),
            _ => None,
        })
        .collect()
}

pub fn compose(text: &str) -> Vec<LayoutItem> {
    let clean = sanitize(text);
    let mut items = Vec::new();

    for (section_index, section) in clean.split("\n\n").enumerate() {
        if section_index > 0 {
            items.push(LayoutItem::Gap);
        }
        for (line_index, line) in section.split('\n').enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let style = if line_index == 0 && trimmed.contains(':') {
                TextStyle::Heading
            } else {
                TextStyle::Body
            };
            items.push(LayoutItem::Line(StyledLine {
                text: trimmed.to_string(),
                style,
            }));
        }
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heading(text: &str) -> LayoutItem {
        LayoutItem::Line(StyledLine {
            text: text.to_string(),
            style: TextStyle::Heading,
        })
    }

    fn body(text: &str) -> LayoutItem {
        LayoutItem::Line(StyledLine {
            text: text.to_string(),
            style: TextStyle::Body,
        })
    }

    #[test]
    fn test_compose_sections_and_headings() {
        let items = compose("Summary:\nBuilt systems.\n\nSkills:\nGo, Rust");
        assert_eq!(
            items,
            vec![
                heading("Summary:"),
                body("Built systems."),
                LayoutItem::Gap,
                heading("Skills:"),
                body("Go, Rust"),
            ]
        );
    }

    #[test]
    fn test_first_line_without_colon_is_body() {
        let items = compose("Jane Doe\nEmail: jane@example.com");
        assert_eq!(items, vec![body("Jane Doe"), body("Email: jane@example.com")]);
    }

    #[test]
    fn test_colon_only_counts_on_first_line() {
        let items = compose("Experience:\nRole: Staff Engineer");
        assert_eq!(items[1], body("Role: Staff Engineer"));
    }

    #[test]
    fn test_empty_lines_are_skipped_and_lines_trimmed() {
        let items = compose("   \n  Led a team of five.  \n\t\n");
        assert_eq!(items, vec![body("Led a team of five.")]);
    }

    #[test]
    fn test_sanitize_strips_non_ascii() {
        assert_eq!(sanitize("Résumé — Zoë\tRust\r\n"), "Rsum  Zo Rust\n");
    }

    #[test]
    fn test_crlf_sections_still_split_after_sanitize() {
        let items = compose("Summary:\r\nText\r\n\r\nSkills:\r\nRust");
        assert_eq!(items.iter().filter(|i| **i == LayoutItem::Gap).count(), 1);
    }

    #[test]
    fn test_empty_text_composes_nothing() {
        assert!(compose("").is_empty());
    }
}
