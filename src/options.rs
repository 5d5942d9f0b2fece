//! Conversion options and configuration.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Default vertical tolerance for grouping fragments into lines, in PDF
/// position units.
pub const DEFAULT_LINE_TOLERANCE: f32 = 3.0;

/// How much a line's left edge must exceed the page's base indent before it
/// is read as a nested list item.
pub const INDENT_THRESHOLD: f32 = 20.0;

/// Options for a single conversion. Immutable once the conversion starts.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Threshold table used for heading detection
    pub heading_sensitivity: HeadingSensitivity,

    /// Whether to detect bulleted/numbered/indented list items
    pub detect_lists: bool,

    /// Whether to insert `---` separators between pages
    pub page_breaks: bool,

    /// Vertical tolerance for line grouping
    pub line_tolerance: f32,
}

impl ConvertOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the heading sensitivity.
    pub fn with_sensitivity(mut self, sensitivity: HeadingSensitivity) -> Self {
        self.heading_sensitivity = sensitivity;
        self
    }

    /// Enable or disable list detection.
    pub fn with_lists(mut self, detect: bool) -> Self {
        self.detect_lists = detect;
        self
    }

    /// Enable or disable page-break separators.
    pub fn with_page_breaks(mut self, breaks: bool) -> Self {
        self.page_breaks = breaks;
        self
    }

    /// Set the line-grouping tolerance.
    pub fn with_line_tolerance(mut self, tolerance: f32) -> Self {
        self.line_tolerance = tolerance;
        self
    }
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            heading_sensitivity: HeadingSensitivity::Medium,
            detect_lists: true,
            page_breaks: true,
            line_tolerance: DEFAULT_LINE_TOLERANCE,
        }
    }
}

/// How aggressively lines are promoted to headings.
///
/// Higher sensitivity lowers the font-size-ratio cutoffs, so more lines
/// qualify. The enum is closed: string boundaries must parse through
/// [`FromStr`], which rejects unknown names instead of falling back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingSensitivity {
    /// Fewer headings: a line must tower over the body text
    Low,
    /// Balanced detection
    #[default]
    Medium,
    /// More headings: mildly enlarged lines already qualify
    High,
}

impl HeadingSensitivity {
    /// The ratio cutoffs this sensitivity level selects.
    pub fn thresholds(self) -> HeadingThresholds {
        match self {
            HeadingSensitivity::Low => HeadingThresholds {
                h1: 1.8,
                h2: 1.5,
                h3: 1.35,
            },
            HeadingSensitivity::Medium => HeadingThresholds {
                h1: 1.5,
                h2: 1.3,
                h3: 1.2,
            },
            HeadingSensitivity::High => HeadingThresholds {
                h1: 1.35,
                h2: 1.2,
                h3: 1.1,
            },
        }
    }
}

impl FromStr for HeadingSensitivity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(HeadingSensitivity::Low),
            "medium" => Ok(HeadingSensitivity::Medium),
            "high" => Ok(HeadingSensitivity::High),
            other => Err(Error::UnknownSensitivity(other.to_string())),
        }
    }
}

/// Minimum font-size ratios (line average over page base) for heading levels
/// 1 through 3. Checked h1 first; levels 4+ are never produced.
#[derive(Debug, Clone, Copy)]
pub struct HeadingThresholds {
    pub h1: f32,
    pub h2: f32,
    pub h3: f32,
}

impl HeadingThresholds {
    /// Heading level for a font-size ratio, or 0 for body text.
    pub fn level_for_ratio(&self, ratio: f32) -> u8 {
        if ratio >= self.h1 {
            1
        } else if ratio >= self.h2 {
            2
        } else if ratio >= self.h3 {
            3
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_builder() {
        let options = ConvertOptions::new()
            .with_sensitivity(HeadingSensitivity::High)
            .with_lists(false)
            .with_page_breaks(false)
            .with_line_tolerance(5.0);

        assert_eq!(options.heading_sensitivity, HeadingSensitivity::High);
        assert!(!options.detect_lists);
        assert!(!options.page_breaks);
        assert_eq!(options.line_tolerance, 5.0);
    }

    #[test]
    fn test_default_options() {
        let options = ConvertOptions::default();
        assert_eq!(options.heading_sensitivity, HeadingSensitivity::Medium);
        assert!(options.detect_lists);
        assert!(options.page_breaks);
        assert_eq!(options.line_tolerance, DEFAULT_LINE_TOLERANCE);
    }

    #[test]
    fn test_sensitivity_from_str() {
        assert_eq!(
            "medium".parse::<HeadingSensitivity>().unwrap(),
            HeadingSensitivity::Medium
        );
        assert_eq!(
            "HIGH".parse::<HeadingSensitivity>().unwrap(),
            HeadingSensitivity::High
        );
        assert!(matches!(
            "extreme".parse::<HeadingSensitivity>(),
            Err(Error::UnknownSensitivity(_))
        ));
    }

    #[test]
    fn test_level_for_ratio_medium() {
        let t = HeadingSensitivity::Medium.thresholds();
        assert_eq!(t.level_for_ratio(1.6), 1);
        assert_eq!(t.level_for_ratio(1.5), 1);
        assert_eq!(t.level_for_ratio(1.4), 2);
        assert_eq!(t.level_for_ratio(1.25), 3);
        assert_eq!(t.level_for_ratio(1.0), 0);
    }

    #[test]
    fn test_level_monotonic_in_ratio() {
        // Increasing the ratio never decreases the detected level.
        for sensitivity in [
            HeadingSensitivity::Low,
            HeadingSensitivity::Medium,
            HeadingSensitivity::High,
        ] {
            let t = sensitivity.thresholds();
            let mut prev_level = 0u8;
            let mut ratio = 0.5;
            while ratio < 3.0 {
                let level = t.level_for_ratio(ratio);
                // Level numbers shrink as headings get bigger, so compare on
                // a "prominence" scale where 0 < h3 < h2 < h1.
                let rank = |l: u8| if l == 0 { 0 } else { 4 - l };
                assert!(rank(level) >= rank(prev_level));
                prev_level = level;
                ratio += 0.01;
            }
        }
    }
}
