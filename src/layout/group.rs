//! Grouping of unordered fragments into visually coherent lines.
//!
//! PDF text fragments arrive in content-stream order, not visual order, and
//! carry no line-break markers; line membership has to be inferred purely
//! from geometry.

use std::cmp::Ordering;

use crate::model::{Line, TextFragment};

/// Cluster a page's fragments into lines, top-to-bottom.
///
/// Fragments are sorted by `y` descending (ties by `x` ascending) and walked
/// in order. A fragment joins the current line while its `y` is within
/// `tolerance` of the fragment that *opened* the cluster; comparing against
/// the anchor rather than a running average keeps drift bounded. Each
/// finished line is internally sorted ascending by `x`.
///
/// An empty fragment list yields an empty line sequence.
pub fn group_into_lines(mut fragments: Vec<TextFragment>, tolerance: f32) -> Vec<Line> {
    if fragments.is_empty() {
        return Vec::new();
    }

    fragments.sort_by(|a, b| {
        let y_cmp = b.y.partial_cmp(&a.y).unwrap_or(Ordering::Equal);
        if y_cmp == Ordering::Equal {
            a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal)
        } else {
            y_cmp
        }
    });

    let mut lines: Vec<Line> = Vec::new();
    let mut current: Vec<TextFragment> = Vec::new();
    let mut anchor_y = 0.0f32;

    for fragment in fragments {
        if current.is_empty() {
            anchor_y = fragment.y;
            current.push(fragment);
            continue;
        }

        if (fragment.y - anchor_y).abs() <= tolerance {
            current.push(fragment);
        } else {
            lines.push(Line::from_fragments(std::mem::take(&mut current), anchor_y));
            anchor_y = fragment.y;
            current.push(fragment);
        }
    }

    // Flush the final open line unconditionally.
    if !current.is_empty() {
        lines.push(Line::from_fragments(current, anchor_y));
    }

    lines
}
