use similar::{Algorithm, ChangeTag, TextDiff};

use crate::config::{DiffStyle, Matching, RenderConfig};
use crate::rematch::{distance, rematch};

pub const CHANGED_WORD_CLASS: &str = "dw-change";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightedLine {
    pub prefix: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightedPair {
    pub old_line: HighlightedLine,
    pub new_line: HighlightedLine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Unchanged,
    Added,
    Removed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub kind: SegmentKind,
    pub value: String,
    /// Set on an added/removed segment that is a small edit of its counterpart.
    pub changed_word: bool,
}

/// Splits a raw diff line into its prefix (one column per parent) and content.
pub fn deconstruct_line(line: &str, is_combined: bool) -> (&str, &str) {
    let prefix_len = if is_combined { 2 } else { 1 };
    let split_at = line
        .char_indices()
        .nth(prefix_len)
        .map_or(line.len(), |(index, _)| index);
    line.split_at(split_at)
}

pub fn escape_for_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            '/' => escaped.push_str("&#x2F;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Computes the token level diff of two strings, merging consecutive tokens
/// of the same kind into one segment.
pub fn diff_segments(old_text: &str, new_text: &str, style: DiffStyle) -> Vec<Segment> {
    let mut config = TextDiff::configure();
    config.algorithm(Algorithm::Myers);
    let diff = match style {
        DiffStyle::Word => config.diff_words(old_text, new_text),
        DiffStyle::Char => config.diff_chars(old_text, new_text),
    };

    let mut segments: Vec<Segment> = Vec::new();
    for change in diff.iter_all_changes() {
        let kind = match change.tag() {
            ChangeTag::Equal => SegmentKind::Unchanged,
            ChangeTag::Delete => SegmentKind::Removed,
            ChangeTag::Insert => SegmentKind::Added,
        };

        if let Some(last) = segments.last_mut()
            && last.kind == kind
        {
            last.value.push_str(change.value());
        } else {
            segments.push(Segment {
                kind,
                value: change.value().to_string(),
                changed_word: false,
            });
        }
    }

    segments
}

/// Tags removed/added segments that are minor edits of each other.
///
/// Added and removed segments are paired with [`rematch`]; a 1:1 pair closer
/// than `threshold` marks both of its segments.
fn mark_changed_words(segments: &mut [Segment], threshold: f64) {
    let added: Vec<usize> = indices_of(segments, SegmentKind::Added);
    let removed: Vec<usize> = indices_of(segments, SegmentKind::Removed);

    let groups = rematch(added.len(), removed.len(), |i, j| {
        distance(&segments[added[i]].value, &segments[removed[j]].value)
    });

    for (added_range, removed_range) in groups {
        if added_range.len() != 1 || removed_range.len() != 1 {
            continue;
        }
        let added_index = added[added_range.start];
        let removed_index = removed[removed_range.start];
        if distance(&segments[added_index].value, &segments[removed_index].value) < threshold {
            segments[added_index].changed_word = true;
            segments[removed_index].changed_word = true;
        }
    }
}

fn indices_of(segments: &[Segment], kind: SegmentKind) -> Vec<usize> {
    segments
        .iter()
        .enumerate()
        .filter(|(_, segment)| segment.kind == kind)
        .map(|(index, _)| index)
        .collect()
}

/// Renders segments as escaped HTML, leaving out segments of kind `skip`.
fn render_segments(segments: &[Segment], skip: SegmentKind) -> String {
    let mut html = String::new();
    for segment in segments.iter().filter(|segment| segment.kind != skip) {
        let escaped = escape_for_html(&segment.value);
        let tag = match segment.kind {
            SegmentKind::Unchanged => {
                html.push_str(&escaped);
                continue;
            }
            SegmentKind::Added => "ins",
            SegmentKind::Removed => "del",
        };
        if segment.changed_word {
            html.push_str(&format!("<{tag} class=\"{CHANGED_WORD_CLASS}\">{escaped}</{tag}>"));
        } else {
            html.push_str(&format!("<{tag}>{escaped}</{tag}>"));
        }
    }
    html
}

/// Highlights the differences between a deleted and an inserted line.
///
/// * `old_line` / `new_line` - raw lines including their diff prefix
/// * `is_combined` - whether the lines carry one prefix column per parent
///
/// The old side keeps unchanged and `<del>` segments, the new side unchanged
/// and `<ins>` segments. Lines longer than `max_line_length_highlight` are only
/// escaped.
pub fn diff_highlight(
    old_line: &str,
    new_line: &str,
    is_combined: bool,
    config: &RenderConfig,
) -> HighlightedPair {
    let (old_prefix, old_content) = deconstruct_line(old_line, is_combined);
    let (new_prefix, new_content) = deconstruct_line(new_line, is_combined);

    if old_content.chars().count() > config.max_line_length_highlight
        || new_content.chars().count() > config.max_line_length_highlight
    {
        return HighlightedPair {
            old_line: HighlightedLine {
                prefix: old_prefix.to_string(),
                content: escape_for_html(old_content),
            },
            new_line: HighlightedLine {
                prefix: new_prefix.to_string(),
                content: escape_for_html(new_content),
            },
        };
    }

    let mut segments = diff_segments(old_content, new_content, config.diff_style);
    if config.diff_style == DiffStyle::Word && config.matching == Matching::Words {
        mark_changed_words(&mut segments, config.match_words_threshold);
    }

    HighlightedPair {
        old_line: HighlightedLine {
            prefix: old_prefix.to_string(),
            content: render_segments(&segments, SegmentKind::Added),
        },
        new_line: HighlightedLine {
            prefix: new_prefix.to_string(),
            content: render_segments(&segments, SegmentKind::Removed),
        },
    }
}
