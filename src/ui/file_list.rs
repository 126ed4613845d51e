use crate::{diff_file::DiffFile, highlight::escape_for_html, ui::file_id};

/// Summary of all files: status tag, name linking to the file's diff and
/// added/deleted line counts.
pub fn render_file_list(files: &[DiffFile]) -> String {
    let mut html = format!(
        "<div class=\"dw-file-list-wrapper\">\n<div class=\"dw-file-list-header\"><span class=\"dw-file-list-title\">Files changed ({})</span></div>\n<ol class=\"dw-file-list\">\n",
        files.len()
    );

    for (index, file) in files.iter().enumerate() {
        let status = file.status().as_str();
        html.push_str(&format!(
            "<li class=\"dw-file-list-line\"><span class=\"dw-tag dw-{status}\">{status}</span><a href=\"#{}\" class=\"dw-file-name\">{}</a><span class=\"dw-file-stats\"><span class=\"dw-lines-added\">+{}</span><span class=\"dw-lines-deleted\">-{}</span></span></li>\n",
            file_id(index),
            escape_for_html(&file.display_name()),
            file.added_lines,
            file.deleted_lines,
        ));
    }

    html.push_str("</ol>\n</div>\n");
    html
}
