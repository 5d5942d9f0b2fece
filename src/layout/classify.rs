//! Per-line structure classification: headings, list items, inline emphasis.

use regex::Regex;

use crate::model::{ClassifiedLine, Line, TextFragment};
use crate::options::{ConvertOptions, HeadingThresholds, INDENT_THRESHOLD};

use super::PageMetrics;

/// Classifies grouped lines into headings, list items, or plain text and
/// renders their Markdown form.
///
/// The prefix patterns are compiled once per conversion and reused for every
/// line.
pub struct LineClassifier {
    thresholds: HeadingThresholds,
    detect_lists: bool,
    bullet_re: Regex,
    numbered_re: Regex,
    lettered_re: Regex,
}

impl LineClassifier {
    /// Build a classifier for one conversion's options.
    pub fn new(options: &ConvertOptions) -> Self {
        Self {
            thresholds: options.heading_sensitivity.thresholds(),
            detect_lists: options.detect_lists,
            // Unicode bullets are unambiguous; ASCII markers need trailing
            // whitespace so "*emphasis*" is not read as a list item.
            bullet_re: Regex::new(r"^(?:[\u{2022}\u{25E6}\u{25AA}\u{2023}\u{2219}\u{00B7}]\s*|[-*>]\s+)").unwrap(),
            numbered_re: Regex::new(r"^(\d+)[.)]\s+").unwrap(),
            lettered_re: Regex::new(r"^[A-Za-z][.)]\s+").unwrap(),
        }
    }

    /// Classify one line against the page's typographic baselines.
    pub fn classify(&self, line: &Line, metrics: &PageMetrics) -> ClassifiedLine {
        let raw = line.text();
        let content = raw.trim_start();
        if content.trim().is_empty() {
            return ClassifiedLine::empty(line.y);
        }
        // Byte offset where visible content starts, for the inline walk.
        let lead = raw.len() - content.len();

        let base = if metrics.base_font_size > 0.0 {
            metrics.base_font_size
        } else {
            12.0
        };
        let ratio = line.average_font_size() / base;
        let level = self.thresholds.level_for_ratio(ratio);
        if level > 0 {
            // Heading text is emitted verbatim; bullets are not stripped and
            // no emphasis markers are inserted.
            let mut text = "#".repeat(level as usize);
            text.push(' ');
            text.push_str(content.trim_end());
            return ClassifiedLine {
                text,
                is_heading: true,
                is_list: false,
                y: line.y,
            };
        }

        if self.detect_lists {
            if let Some(m) = self.bullet_re.find(content) {
                let body = format_inline(&line.fragments, lead + m.end());
                return list_line(format!("- {}", body.trim()), line.y);
            }

            if let Some(caps) = self.numbered_re.captures(content) {
                let number = &caps[1];
                let body = format_inline(&line.fragments, lead + caps.get(0).map(|m| m.end()).unwrap_or(0));
                return list_line(format!("{}. {}", number, body.trim()), line.y);
            }

            // Alphabetic enumerators keep their text but fall back to "1";
            // no alphabetic-to-numeric conversion is attempted.
            if let Some(m) = self.lettered_re.find(content) {
                let body = format_inline(&line.fragments, lead + m.end());
                return list_line(format!("1. {}", body.trim()), line.y);
            }

            if line.min_x > metrics.base_indent + INDENT_THRESHOLD {
                let body = format_inline(&line.fragments, lead);
                return list_line(format!("  - {}", body.trim()), line.y);
            }
        }

        let text = format_inline(&line.fragments, lead);
        ClassifiedLine {
            text: text.trim().to_string(),
            is_heading: false,
            is_list: false,
            y: line.y,
        }
    }
}

fn list_line(text: String, y: f32) -> ClassifiedLine {
    ClassifiedLine {
        text,
        is_heading: false,
        is_list: true,
        y,
    }
}

/// Walk a line's fragments emitting `**`/`*` markers at style transitions.
///
/// Bold is the outer marker: on any transition, open italic closes first and
/// reopens after bold has been handled, so the emitted markers always nest.
/// Styles still open at the end of the line are closed automatically.
/// `skip_bytes` drops a consumed prefix (bullet or enumerator) from the
/// front of the walk; the prefix length comes from a regex match over the
/// same concatenation, so it always lands on a character boundary.
fn format_inline(fragments: &[TextFragment], skip_bytes: usize) -> String {
    let mut out = String::new();
    let mut bold_open = false;
    let mut italic_open = false;
    let mut to_skip = skip_bytes;

    for fragment in fragments {
        let text = if to_skip >= fragment.text.len() {
            to_skip -= fragment.text.len();
            continue;
        } else {
            let t = &fragment.text[to_skip..];
            to_skip = 0;
            t
        };
        if text.is_empty() {
            continue;
        }

        // Whitespace-only runs carry no visible glyphs; toggling emphasis
        // around them would emit empty marker pairs.
        if text.trim().is_empty() {
            out.push_str(text);
            continue;
        }

        if fragment.is_bold != bold_open {
            if italic_open {
                out.push('*');
                italic_open = false;
            }
            out.push_str("**");
            bold_open = fragment.is_bold;
        }
        if fragment.is_italic != italic_open {
            out.push('*');
            italic_open = fragment.is_italic;
        }

        out.push_str(text);
    }

    if italic_open {
        out.push('*');
    }
    if bold_open {
        out.push_str("**");
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::group_into_lines;
    use crate::options::HeadingSensitivity;

    fn classify_one(
        fragments: Vec<TextFragment>,
        options: &ConvertOptions,
        metrics: &PageMetrics,
    ) -> ClassifiedLine {
        let lines = group_into_lines(fragments, options.line_tolerance);
        assert_eq!(lines.len(), 1);
        LineClassifier::new(options).classify(&lines[0], metrics)
    }

    fn frag(text: &str, x: f32, size: f32, font: &str) -> TextFragment {
        TextFragment::new(text, x, 100.0, size, font)
    }

    fn body_metrics() -> PageMetrics {
        PageMetrics {
            base_font_size: 12.0,
            base_indent: 0.0,
        }
    }

    #[test]
    fn test_heading_levels_by_ratio() {
        let options = ConvertOptions::default();
        let metrics = body_metrics();

        let h1 = classify_one(vec![frag("Title", 0.0, 20.0, "Helvetica")], &options, &metrics);
        assert_eq!(h1.text, "# Title");
        assert!(h1.is_heading);

        let h2 = classify_one(vec![frag("Section", 0.0, 16.0, "Helvetica")], &options, &metrics);
        assert_eq!(h2.text, "## Section");

        let h3 = classify_one(vec![frag("Sub", 0.0, 14.5, "Helvetica")], &options, &metrics);
        assert_eq!(h3.text, "### Sub");
    }

    #[test]
    fn test_body_ratio_is_not_heading() {
        let options = ConvertOptions::default();
        let line = classify_one(
            vec![frag("Plain text", 0.0, 12.0, "Helvetica")],
            &options,
            &body_metrics(),
        );
        assert!(!line.is_heading);
        assert_eq!(line.text, "Plain text");
    }

    #[test]
    fn test_lone_large_line_not_heading_against_itself() {
        // The page's only line defines the baseline, so its ratio is 1.0.
        let options = ConvertOptions::default();
        let metrics = PageMetrics {
            base_font_size: 24.0,
            base_indent: 0.0,
        };
        let line = classify_one(
            vec![frag("Title", 0.0, 24.0, "Helvetica")],
            &options,
            &metrics,
        );
        assert!(!line.is_heading);
        assert_eq!(line.text, "Title");
    }

    #[test]
    fn test_bullet_glyph_becomes_dash() {
        let options = ConvertOptions::default();
        let line = classify_one(
            vec![frag("\u{2022} Something", 0.0, 12.0, "Helvetica")],
            &options,
            &body_metrics(),
        );
        assert!(line.is_list);
        assert_eq!(line.text, "- Something");
    }

    #[test]
    fn test_numbered_item_keeps_digits() {
        let options = ConvertOptions::default();
        let line = classify_one(
            vec![frag("3) Third item", 0.0, 12.0, "Helvetica")],
            &options,
            &body_metrics(),
        );
        assert!(line.is_list);
        assert_eq!(line.text, "3. Third item");
    }

    #[test]
    fn test_lettered_item_falls_back_to_one() {
        let options = ConvertOptions::default();
        let line = classify_one(
            vec![frag("b) Second", 0.0, 12.0, "Helvetica")],
            &options,
            &body_metrics(),
        );
        assert!(line.is_list);
        assert_eq!(line.text, "1. Second");
    }

    #[test]
    fn test_indented_line_becomes_nested_item() {
        let options = ConvertOptions::default();
        let line = classify_one(
            vec![frag("nested detail", 40.0, 12.0, "Helvetica")],
            &options,
            &body_metrics(),
        );
        assert!(line.is_list);
        assert_eq!(line.text, "  - nested detail");
    }

    #[test]
    fn test_bullet_takes_priority_over_indentation() {
        // Indented past the threshold AND carrying a bullet: the bullet
        // rule must win.
        let options = ConvertOptions::default();
        let line = classify_one(
            vec![frag("\u{2022} deep item", 60.0, 12.0, "Helvetica")],
            &options,
            &body_metrics(),
        );
        assert_eq!(line.text, "- deep item");
    }

    #[test]
    fn test_lists_disabled() {
        let options = ConvertOptions::default().with_lists(false);
        let line = classify_one(
            vec![frag("\u{2022} Something", 0.0, 12.0, "Helvetica")],
            &options,
            &body_metrics(),
        );
        assert!(!line.is_list);
        assert_eq!(line.text, "\u{2022} Something");
    }

    #[test]
    fn test_heading_bypasses_list_detection() {
        let options = ConvertOptions::default();
        let line = classify_one(
            vec![frag("1. Introduction", 0.0, 20.0, "Helvetica")],
            &options,
            &body_metrics(),
        );
        assert!(line.is_heading);
        assert!(!line.is_list);
        assert_eq!(line.text, "# 1. Introduction");
    }

    #[test]
    fn test_whitespace_only_line_is_dropped() {
        let options = ConvertOptions::default();
        let line = classify_one(
            vec![frag("   ", 0.0, 12.0, "Helvetica")],
            &options,
            &body_metrics(),
        );
        assert!(line.is_empty());
    }

    #[test]
    fn test_uniform_style_emits_no_markup() {
        let out = format_inline(
            &[
                frag("one ", 0.0, 12.0, "Helvetica"),
                frag("two", 30.0, 12.0, "Helvetica"),
            ],
            0,
        );
        assert_eq!(out, "one two");
    }

    #[test]
    fn test_bold_run_transitions() {
        let out = format_inline(
            &[
                frag("normal ", 0.0, 12.0, "Helvetica"),
                frag("strong", 40.0, 12.0, "Helvetica-Bold"),
                frag(" tail", 80.0, 12.0, "Helvetica"),
            ],
            0,
        );
        assert_eq!(out, "normal **strong** tail");
    }

    #[test]
    fn test_italic_closes_at_line_end() {
        let out = format_inline(
            &[
                frag("lead ", 0.0, 12.0, "Helvetica"),
                frag("slanted", 30.0, 12.0, "Helvetica-Oblique"),
            ],
            0,
        );
        assert_eq!(out, "lead *slanted*");
    }

    #[test]
    fn test_bold_markers_outside_italic() {
        let out = format_inline(
            &[frag("both", 0.0, 12.0, "Times-BoldItalic")],
            0,
        );
        assert_eq!(out, "***both***");
    }

    #[test]
    fn test_italic_toggles_inside_bold_run() {
        let out = format_inline(
            &[
                frag("heavy ", 0.0, 12.0, "Helvetica-Bold"),
                frag("lean", 40.0, 12.0, "Helvetica-BoldOblique"),
            ],
            0,
        );
        assert_eq!(out, "**heavy *lean***");
    }

    #[test]
    fn test_skip_spans_fragment_boundary() {
        // "1. " prefix split across two fragments.
        let out = format_inline(
            &[
                frag("1.", 0.0, 12.0, "Helvetica"),
                frag(" First item", 12.0, 12.0, "Helvetica"),
            ],
            3,
        );
        assert_eq!(out, "First item");
    }

    #[test]
    fn test_bullet_strip_applies_formatting_to_remainder() {
        let options = ConvertOptions::default();
        let line = classify_one(
            vec![
                frag("\u{2022} ", 0.0, 12.0, "Helvetica"),
                frag("urgent", 12.0, 12.0, "Helvetica-Bold"),
            ],
            &options,
            &body_metrics(),
        );
        assert_eq!(line.text, "- **urgent**");
    }

    #[test]
    fn test_high_sensitivity_promotes_smaller_ratios() {
        let low = ConvertOptions::default().with_sensitivity(HeadingSensitivity::Low);
        let high = ConvertOptions::default().with_sensitivity(HeadingSensitivity::High);
        let metrics = body_metrics();
        let fragments = || vec![frag("Maybe heading", 0.0, 14.5, "Helvetica")];

        assert!(!classify_one(fragments(), &low, &metrics).is_heading);
        assert!(classify_one(fragments(), &high, &metrics).is_heading);
    }
}
