use crate::{
    config::RenderConfig,
    diff_file::DiffFile,
    highlight::escape_for_html,
    matcher::{RenderedGroup, RenderedLine, prepare_block},
    ui::{
        empty_file_row, file_id, line_class, number_or_blank, render_code_line,
        render_file_header,
    },
};

/// Renders every file as two tables, old on the left and new on the right.
/// Rows stay aligned: a side without a counterpart gets an empty cell.
pub fn render_side_by_side_diff(files: &[DiffFile], config: &RenderConfig) -> String {
    files
        .iter()
        .enumerate()
        .map(|(index, file)| render_file(index, file, config))
        .collect()
}

fn render_file(index: usize, file: &DiffFile, config: &RenderConfig) -> String {
    let mut old_rows = String::new();
    let mut new_rows = String::new();

    if file.blocks.is_empty() {
        old_rows.push_str(&empty_file_row(2));
        new_rows.push_str(&empty_file_row(2));
    }

    for block in &file.blocks {
        old_rows.push_str(&format!(
            "<tr><td class=\"dw-code-side-linenumber dw-info\"></td><td class=\"dw-info\"><div class=\"dw-code-side-line\">{}</div></td></tr>\n",
            escape_for_html(&block.header)
        ));
        new_rows.push_str(
            "<tr><td class=\"dw-code-side-linenumber dw-info\"></td><td class=\"dw-info\"><div class=\"dw-code-side-line\"></div></td></tr>\n",
        );

        for group in prepare_block(block, file.is_combined, config) {
            match group {
                RenderedGroup::Context(line) => {
                    old_rows.push_str(&render_line(Some(&line), line.old_number));
                    new_rows.push_str(&render_line(Some(&line), line.new_number));
                }
                RenderedGroup::Changes(rows) => {
                    for row in rows {
                        let old_number = row.old.as_ref().and_then(|line| line.old_number);
                        let new_number = row.new.as_ref().and_then(|line| line.new_number);
                        old_rows.push_str(&render_line(row.old.as_ref(), old_number));
                        new_rows.push_str(&render_line(row.new.as_ref(), new_number));
                    }
                }
            }
        }
    }

    let mut html = format!(
        "<div id=\"{}\" class=\"dw-file-wrapper\" data-lang=\"{}\">\n",
        file_id(index),
        escape_for_html(&file.language)
    );
    html.push_str(&render_file_header(file));
    html.push_str("<div class=\"dw-files-diff\">\n");
    for rows in [old_rows, new_rows] {
        html.push_str(
            "<div class=\"dw-file-side-diff\"><table class=\"dw-diff-table\"><tbody>\n",
        );
        html.push_str(&rows);
        html.push_str("</tbody></table></div>\n");
    }
    html.push_str("</div>\n</div>\n");
    html
}

fn render_line(line: Option<&RenderedLine>, number: Option<u32>) -> String {
    match line {
        Some(line) => format!(
            "<tr><td class=\"dw-code-side-linenumber {}\">{}</td>{}</tr>\n",
            line_class(line.line_type),
            number_or_blank(number),
            render_code_line(line.line_type, &line.prefix, &line.content),
        ),
        None => "<tr><td class=\"dw-code-side-linenumber dw-emptyplaceholder\"></td><td class=\"dw-cntx dw-emptyplaceholder\"><div class=\"dw-code-side-line\"></div></td></tr>\n".to_string(),
    }
}
