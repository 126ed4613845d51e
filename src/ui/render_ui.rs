use crate::{
    config::{OutputFormat, RenderConfig},
    diff_file::DiffFile,
    highlight::escape_for_html,
    ui::{
        file_list::render_file_list, side_by_side_diff::render_side_by_side_diff,
        unified_diff::render_unified_diff,
    },
};

const STYLESHEET: &str = r#"
.dw-wrapper { font-family: sans-serif; text-align: left; }
.dw-file-wrapper { border: 1px solid #ddd; border-radius: 3px; margin-bottom: 1em; }
.dw-file-header { background-color: #f7f7f7; border-bottom: 1px solid #d8d8d8; padding: 5px 10px; display: flex; gap: 8px; }
.dw-tag { border: 1px solid; border-radius: 3px; font-size: 10px; padding: 0 2px; }
.dw-added { color: #399839; } .dw-deleted { color: #c33; } .dw-renamed, .dw-copied { color: #3572b0; } .dw-changed { color: #d0b44c; }
.dw-files-diff { display: flex; } .dw-file-side-diff { width: 50%; overflow-x: auto; }
.dw-diff-table { width: 100%; border-collapse: collapse; font-family: monospace; font-size: 13px; }
.dw-code-line, .dw-code-side-line { white-space: pre; padding: 0 8px; }
.dw-code-linenumber, .dw-code-side-linenumber { color: #999; text-align: right; padding: 0 6px; width: 1%; white-space: nowrap; }
.line-num1, .line-num2 { display: inline-block; min-width: 3.5em; }
.dw-ins { background-color: #dfd; } .dw-del { background-color: #fee8e9; }
.dw-info { background-color: #f8fafd; color: #0009; }
.dw-emptyplaceholder { background-color: #f1f1f1; }
ins, del { text-decoration: none; } .dw-ins ins { background-color: #97f295; } .dw-del del { background-color: #ffb6ba; }
ins.dw-change, del.dw-change { background-color: #ffe58f; }
.dw-file-list { padding-left: 1.5em; } .dw-file-list-line { display: flex; gap: 8px; }
.dw-lines-added { color: #399839; } .dw-lines-deleted { color: #c33; margin-left: 4px; }
"#;

/// Renders the diff body: optional file list followed by every file in the
/// configured layout.
pub fn render_html(files: &[DiffFile], config: &RenderConfig) -> String {
    if files.is_empty() && config.render_nothing_when_empty {
        return String::new();
    }

    let mut html = String::from("<div class=\"dw-wrapper\">\n");
    if config.draw_file_list {
        html.push_str(&render_file_list(files));
    }

    let diff = match config.output_format {
        OutputFormat::LineByLine => render_unified_diff(files, config),
        OutputFormat::SideBySide => render_side_by_side_diff(files, config),
    };
    html.push_str(&diff);
    html.push_str("</div>\n");
    html
}

/// Wraps [`render_html`] in a standalone page with the default stylesheet.
pub fn render_document(files: &[DiffFile], config: &RenderConfig, title: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n<style>{STYLESHEET}</style>\n</head>\n<body>\n{}</body>\n</html>\n",
        escape_for_html(title),
        render_html(files, config),
    )
}
