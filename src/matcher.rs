use log::debug;

use crate::config::{Matching, RenderConfig};
use crate::diff_file::{DiffBlock, DiffLine, LineType};
use crate::highlight::{deconstruct_line, diff_highlight, escape_for_html};
use crate::rematch::{distance, rematch};

/// A context line, or a run of deleted lines followed by inserted lines.
#[derive(Debug, Clone, PartialEq)]
pub enum LineGroup<'a> {
    Context(&'a DiffLine),
    Changes {
        old: Vec<&'a DiffLine>,
        new: Vec<&'a DiffLine>,
    },
}

/// A line ready for output: prefix split off, content escaped and, for
/// paired lines, highlighted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLine {
    pub line_type: LineType,
    pub prefix: String,
    pub content: String,
    pub old_number: Option<u32>,
    pub new_number: Option<u32>,
}

/// Lines at the same position of the old and new side of a matched group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangedRow {
    pub old: Option<RenderedLine>,
    pub new: Option<RenderedLine>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedGroup {
    Context(RenderedLine),
    Changes(Vec<ChangedRow>),
}

pub fn group_block_lines(block: &DiffBlock) -> Vec<LineGroup<'_>> {
    let mut groups = Vec::new();
    let mut old: Vec<&DiffLine> = Vec::new();
    let mut new: Vec<&DiffLine> = Vec::new();

    for line in &block.lines {
        let is_insert = matches!(line.line_type, LineType::Insert | LineType::InsertChange);
        let is_delete = matches!(line.line_type, LineType::Delete | LineType::DeleteChange);

        if (!is_insert && !new.is_empty()) || (!is_insert && !is_delete && !old.is_empty()) {
            groups.push(LineGroup::Changes {
                old: std::mem::take(&mut old),
                new: std::mem::take(&mut new),
            });
        }

        if is_delete {
            old.push(line);
        } else if is_insert && old.is_empty() {
            groups.push(LineGroup::Changes {
                old: Vec::new(),
                new: vec![line],
            });
        } else if is_insert {
            new.push(line);
        } else {
            groups.push(LineGroup::Context(line));
        }
    }

    if !old.is_empty() || !new.is_empty() {
        groups.push(LineGroup::Changes { old, new });
    }

    groups
}

/// Splits a change run into groups of similar lines.
///
/// Only [`Matching::Lines`] pairs by similarity, and only while the run stays
/// under the comparison and line size caps; otherwise the run is returned as
/// a single positional group.
pub fn match_lines<'b, 'a>(
    old: &'b [&'a DiffLine],
    new: &'b [&'a DiffLine],
    is_combined: bool,
    config: &RenderConfig,
) -> Vec<(&'b [&'a DiffLine], &'b [&'a DiffLine])> {
    if config.matching != Matching::Lines || old.is_empty() || new.is_empty() {
        return vec![(old, new)];
    }

    let comparisons = old.len() * new.len();
    let longest_line = old
        .iter()
        .chain(new)
        .map(|line| line.content.chars().count())
        .max()
        .unwrap_or(0);

    if comparisons >= config.matching_max_comparisons
        || longest_line >= config.max_line_size_in_block_for_comparison
    {
        debug!(
            "Skipping line matching of {} deleted and {} inserted lines",
            old.len(),
            new.len()
        );
        return vec![(old, new)];
    }

    rematch(old.len(), new.len(), |i, j| {
        line_distance(old[i], new[j], is_combined)
    })
    .into_iter()
    .map(|(old_range, new_range)| (&old[old_range], &new[new_range]))
    .collect()
}

/// Distance of two lines without their diff prefix.
pub fn line_distance(old: &DiffLine, new: &DiffLine, is_combined: bool) -> f64 {
    let (_, old_content) = deconstruct_line(&old.content, is_combined);
    let (_, new_content) = deconstruct_line(&new.content, is_combined);
    distance(old_content, new_content)
}

/// Pairs lines by position; each pair is highlighted and retyped as a change.
pub fn process_changed_lines(
    old: &[&DiffLine],
    new: &[&DiffLine],
    is_combined: bool,
    config: &RenderConfig,
) -> Vec<ChangedRow> {
    let rows = old.len().max(new.len());
    (0..rows)
        .map(|index| match (old.get(index), new.get(index)) {
            (Some(old_line), Some(new_line)) => {
                let pair = diff_highlight(&old_line.content, &new_line.content, is_combined, config);
                ChangedRow {
                    old: Some(RenderedLine {
                        line_type: LineType::DeleteChange,
                        prefix: pair.old_line.prefix,
                        content: pair.old_line.content,
                        old_number: old_line.old_number,
                        new_number: old_line.new_number,
                    }),
                    new: Some(RenderedLine {
                        line_type: LineType::InsertChange,
                        prefix: pair.new_line.prefix,
                        content: pair.new_line.content,
                        old_number: new_line.old_number,
                        new_number: new_line.new_number,
                    }),
                }
            }
            (old_line, new_line) => ChangedRow {
                old: old_line.map(|line| render_plain(line, is_combined)),
                new: new_line.map(|line| render_plain(line, is_combined)),
            },
        })
        .collect()
}

/// Matches one change run and highlights every pair of every group.
pub fn pair_changes(
    old: &[&DiffLine],
    new: &[&DiffLine],
    is_combined: bool,
    config: &RenderConfig,
) -> Vec<Vec<ChangedRow>> {
    match_lines(old, new, is_combined, config)
        .into_iter()
        .map(|(old_group, new_group)| process_changed_lines(old_group, new_group, is_combined, config))
        .collect()
}

/// Everything a printer needs for one block, in display order.
pub fn prepare_block(block: &DiffBlock, is_combined: bool, config: &RenderConfig) -> Vec<RenderedGroup> {
    let mut rendered = Vec::new();
    for group in group_block_lines(block) {
        match group {
            LineGroup::Context(line) => {
                rendered.push(RenderedGroup::Context(render_plain(line, is_combined)));
            }
            LineGroup::Changes { old, new } => {
                rendered.extend(
                    pair_changes(&old, &new, is_combined, config)
                        .into_iter()
                        .map(RenderedGroup::Changes),
                );
            }
        }
    }
    rendered
}

fn render_plain(line: &DiffLine, is_combined: bool) -> RenderedLine {
    let (prefix, content) = deconstruct_line(&line.content, is_combined);
    RenderedLine {
        line_type: line.line_type,
        prefix: prefix.to_string(),
        content: escape_for_html(content),
        old_number: line.old_number,
        new_number: line.new_number,
    }
}
