pub mod file_list;
pub mod render_ui;
pub mod side_by_side_diff;
pub mod unified_diff;

use crate::diff_file::{DiffFile, LineType};
use crate::highlight::escape_for_html;

pub use render_ui::{render_document, render_html};

pub(crate) fn file_id(index: usize) -> String {
    format!("dw-file-{index}")
}

pub(crate) fn line_class(line_type: LineType) -> &'static str {
    match line_type {
        LineType::Insert => "dw-ins",
        LineType::Delete => "dw-del",
        LineType::Context => "dw-cntx",
        LineType::InsertChange => "dw-ins dw-change",
        LineType::DeleteChange => "dw-del dw-change",
        LineType::Info => "dw-info",
    }
}

pub(crate) fn render_file_header(file: &DiffFile) -> String {
    let status = file.status().as_str();
    format!(
        "<div class=\"dw-file-header\"><span class=\"dw-file-name\">{}</span><span class=\"dw-tag dw-{status}\">{}</span></div>\n",
        escape_for_html(&file.display_name()),
        status.to_uppercase(),
    )
}

pub(crate) fn render_code_line(line_type: LineType, prefix: &str, content: &str) -> String {
    format!(
        "<td class=\"{}\"><div class=\"dw-code-line\"><span class=\"dw-code-line-prefix\">{}</span><span class=\"dw-code-line-ctn\">{content}</span></div></td>",
        line_class(line_type),
        escape_for_html(prefix),
    )
}

pub(crate) fn number_or_blank(number: Option<u32>) -> String {
    number.map(|number| number.to_string()).unwrap_or_default()
}

/// Row shown in place of the blocks of a file without hunks, e.g. a pure rename.
pub(crate) fn empty_file_row(colspan: usize) -> String {
    format!(
        "<tr><td class=\"dw-info\" colspan=\"{colspan}\"><div class=\"dw-code-line\">File without changes</div></td></tr>\n"
    )
}

pub(crate) fn block_header_row(header: &str) -> String {
    format!(
        "<tr><td class=\"dw-code-linenumber dw-info\"></td><td class=\"dw-info\"><div class=\"dw-code-line\">{}</div></td></tr>\n",
        escape_for_html(header)
    )
}
