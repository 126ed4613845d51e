//! Parse unified and git diffs into files, blocks and lines, pair the deleted
//! and inserted lines of each change run, and render the result as HTML.
//!
//! ```
//! use diffweave::{ParserConfig, parse_diff};
//!
//! let files = parse_diff(
//!     "--- a/x.txt\n+++ b/x.txt\n@@ -1 +1 @@\n-old\n+new\n",
//!     &ParserConfig::default(),
//! );
//! assert_eq!(files[0].new_name, "x.txt");
//! assert_eq!(files[0].added_lines, 1);
//! ```

pub mod app;
pub mod config;
pub mod diff_file;
pub mod highlight;
pub mod matcher;
pub mod parser;
pub mod rematch;
pub mod ui;

mod test;

pub use config::{DiffStyle, Matching, OutputFormat, ParserConfig, RenderConfig};
pub use diff_file::{DiffBlock, DiffFile, DiffLine, LineType, Revision};
pub use highlight::{HighlightedLine, HighlightedPair, diff_highlight};
pub use matcher::{match_lines, pair_changes, process_changed_lines};
pub use parser::parse_diff;
