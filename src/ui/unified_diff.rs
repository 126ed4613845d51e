use crate::{
    config::RenderConfig,
    diff_file::DiffFile,
    highlight::escape_for_html,
    matcher::{RenderedGroup, RenderedLine, prepare_block},
    ui::{
        block_header_row, empty_file_row, file_id, line_class, number_or_blank,
        render_code_line, render_file_header,
    },
};

/// Renders every file as one table, old and new line numbers side by side
/// in the gutter. Within a change group all old lines come before the new ones.
pub fn render_unified_diff(files: &[DiffFile], config: &RenderConfig) -> String {
    files
        .iter()
        .enumerate()
        .map(|(index, file)| render_file(index, file, config))
        .collect()
}

fn render_file(index: usize, file: &DiffFile, config: &RenderConfig) -> String {
    let mut html = format!(
        "<div id=\"{}\" class=\"dw-file-wrapper\" data-lang=\"{}\">\n",
        file_id(index),
        escape_for_html(&file.language)
    );
    html.push_str(&render_file_header(file));
    html.push_str("<div class=\"dw-file-diff\"><table class=\"dw-diff-table\"><tbody>\n");

    if file.blocks.is_empty() {
        html.push_str(&empty_file_row(2));
    }

    for block in &file.blocks {
        html.push_str(&block_header_row(&block.header));

        for group in prepare_block(block, file.is_combined, config) {
            match group {
                RenderedGroup::Context(line) => html.push_str(&render_line(&line)),
                RenderedGroup::Changes(rows) => {
                    let old_lines = rows.iter().filter_map(|row| row.old.as_ref());
                    let new_lines = rows.iter().filter_map(|row| row.new.as_ref());
                    for line in old_lines.chain(new_lines) {
                        html.push_str(&render_line(line));
                    }
                }
            }
        }
    }

    html.push_str("</tbody></table></div>\n</div>\n");
    html
}

fn render_line(line: &RenderedLine) -> String {
    format!(
        "<tr><td class=\"dw-code-linenumber {}\"><div class=\"line-num1\">{}</div><div class=\"line-num2\">{}</div></td>{}</tr>\n",
        line_class(line.line_type),
        number_or_blank(line.old_number),
        number_or_blank(line.new_number),
        render_code_line(line.line_type, &line.prefix, &line.content),
    )
}
