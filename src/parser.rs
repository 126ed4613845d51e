use std::sync::LazyLock;

use log::{debug, warn};
use regex::Regex;

use crate::config::ParserConfig;
use crate::diff_file::{DiffBlock, DiffFile, DiffLine, Revision};

const OLD_FILE_HEADER: &str = "--- ";
const NEW_FILE_HEADER: &str = "+++ ";
const HUNK_HEADER_PREFIX: &str = "@@";
const NO_NEWLINE_MARKER: &str = "\\ No newline at end of file";
const BINARY_BLOCK_HEADER: &str = "Binary files differ";

const ADDED_PREFIXES: &[&str] = &["+"];
const DELETED_PREFIXES: &[&str] = &["-"];
// Combined diffs carry one prefix column per parent.
const COMBINED_ADDED_PREFIXES: &[&str] = &["+ ", " +", "++"];
const COMBINED_DELETED_PREFIXES: &[&str] = &["- ", " -", "--"];

/// Path prefixes git uses for the two sides (`--src-prefix` / `--dst-prefix`,
/// `diff.mnemonicPrefix`).
const BASE_FILENAME_PREFIXES: [&str; 6] = ["a/", "b/", "i/", "w/", "c/", "o/"];

fn regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("Invalid diff header regex")
}

static GIT_DIFF_START: LazyLock<Regex> =
    LazyLock::new(|| regex(r#"^diff --git "?([a-ciow]/.+)"? "?([a-ciow]/.+)"?"#));
static COMBINED_DIFF_START: LazyLock<Regex> =
    LazyLock::new(|| regex(r#"^diff --(?:cc|combined) "?(.+?)"?$"#));
static UNIX_BINARY_START: LazyLock<Regex> = LazyLock::new(|| {
    regex(r#"^Binary files "?([a-ciow]/.+)"? and "?([a-ciow]/.+)"? differ"#)
});

static HUNK_HEADER: LazyLock<Regex> =
    LazyLock::new(|| regex(r"^@@ -(\d+)(?:,\d+)? \+(\d+)(?:,\d+)? @@.*"));
static COMBINED_HUNK_HEADER: LazyLock<Regex> =
    LazyLock::new(|| regex(r"^@@@ -(\d+)(?:,\d+)? -(\d+)(?:,\d+)? \+(\d+)(?:,\d+)? @@@.*"));

static QUOTED_NAME: LazyLock<Regex> = LazyLock::new(|| regex(r#"^"?(.+?)"?$"#));
static UNIFIED_TIMESTAMP: LazyLock<Regex> = LazyLock::new(|| {
    regex(r"\s+\d{4}-\d\d-\d\d\s+\d\d:\d\d:\d\d(?:\.\d+)?\s+[+-]\d{4}.*$")
});

static OLD_MODE: LazyLock<Regex> = LazyLock::new(|| regex(r"^old mode (\d{6})"));
static NEW_MODE: LazyLock<Regex> = LazyLock::new(|| regex(r"^new mode (\d{6})"));
static COMBINED_DELETED_FILE_MODE: LazyLock<Regex> =
    LazyLock::new(|| regex(r"^deleted file mode (\d{6}(?:,\d{6})+)"));
static DELETED_FILE_MODE: LazyLock<Regex> =
    LazyLock::new(|| regex(r"^deleted file mode (\d{6})"));
static NEW_FILE_MODE: LazyLock<Regex> = LazyLock::new(|| regex(r"^new file mode (\d{6})"));
static COPY_FROM: LazyLock<Regex> = LazyLock::new(|| regex(r#"^copy from "?(.+?)"?$"#));
static COPY_TO: LazyLock<Regex> = LazyLock::new(|| regex(r#"^copy to "?(.+?)"?$"#));
static RENAME_FROM: LazyLock<Regex> = LazyLock::new(|| regex(r#"^rename from "?(.+?)"?$"#));
static RENAME_TO: LazyLock<Regex> = LazyLock::new(|| regex(r#"^rename to "?(.+?)"?$"#));
static SIMILARITY_INDEX: LazyLock<Regex> =
    LazyLock::new(|| regex(r"^similarity index (\d+)%"));
static DISSIMILARITY_INDEX: LazyLock<Regex> =
    LazyLock::new(|| regex(r"^dissimilarity index (\d+)%"));
static INDEX: LazyLock<Regex> =
    LazyLock::new(|| regex(r"^index ([\da-z]+)\.\.([\da-z]+)\s*(\d{6})?"));
static COMBINED_INDEX: LazyLock<Regex> =
    LazyLock::new(|| regex(r"^index ([\da-z]+(?:,[\da-z]+)+)\.\.([\da-z]+)"));
static COMBINED_MODE: LazyLock<Regex> =
    LazyLock::new(|| regex(r"^mode (\d{6}(?:,\d{6})+)\.\.(\d{6})"));
static BINARY_FILES: LazyLock<Regex> =
    LazyLock::new(|| regex(r"^Binary files (.*) and (.*) differ"));
static GIT_BINARY_PATCH: LazyLock<Regex> = LazyLock::new(|| regex(r"^GIT binary patch"));

/// Parse diff text into the files it touches.
///
/// Never fails: unknown lines are skipped and malformed hunk headers number
/// their lines from 0. Input without any file header yields an empty list.
pub fn parse_diff(diff_input: &str, config: &ParserConfig) -> Vec<DiffFile> {
    let normalized = normalize_input(diff_input);
    let lines: Vec<&str> = normalized.split('\n').collect();

    (0..lines.len())
        .fold(DiffParser::new(&lines, config), |mut parser, index| {
            parser.parse_line(index);
            parser
        })
        .finish()
}

/// Drop "no newline" markers and turn `\r\n` and bare `\r` into `\n`.
fn normalize_input(diff_input: &str) -> String {
    diff_input
        .replace(NO_NEWLINE_MARKER, "")
        .replace("\r\n", "\n")
        .replace('\r', "\n")
}

struct DiffParser<'a> {
    lines: &'a [&'a str],
    config: &'a ParserConfig,
    files: Vec<DiffFile>,
    current_file: Option<DiffFile>,
    current_block: Option<DiffBlock>,
    old_line: u32,
    new_line: u32,
    possible_old_name: Option<String>,
    possible_new_name: Option<String>,
}

impl<'a> DiffParser<'a> {
    fn new(lines: &'a [&'a str], config: &'a ParserConfig) -> Self {
        Self {
            lines,
            config,
            files: Vec::new(),
            current_file: None,
            current_block: None,
            old_line: 0,
            new_line: 0,
            possible_old_name: None,
            possible_new_name: None,
        }
    }

    fn line_at(&self, index: Option<usize>) -> &'a str {
        index
            .and_then(|index| self.lines.get(index))
            .copied()
            .unwrap_or("")
    }

    fn parse_line(&mut self, index: usize) {
        let line = self.lines[index];
        if line.is_empty() || line.starts_with('*') {
            return;
        }

        let prev_line = self.line_at(index.checked_sub(1));
        let next_line = self.line_at(Some(index + 1));
        let after_next_line = self.line_at(Some(index + 2));

        if line.starts_with("diff --git")
            || line.starts_with("diff --combined")
            || line.starts_with("diff --cc")
        {
            self.start_file_from_git_header(line);
            return;
        }

        let in_git_diff = self.current_file.as_ref().is_some_and(|file| file.is_git_diff);

        if line.starts_with("Binary files") && !in_git_diff {
            self.start_file();
            if let Some(caps) = UNIX_BINARY_START.captures(line) {
                self.possible_old_name = Some(self.old_filename(&caps[1]));
                self.possible_new_name = Some(self.new_filename(&caps[2]));
            }
            if let Some(file) = self.current_file.as_mut() {
                file.is_binary = true;
            }
            self.start_block(BINARY_BLOCK_HEADER);
            return;
        }

        // Plain `diff -u` output has no `diff` line; a header triple opens the next file.
        if self.current_file.is_none()
            || (!in_git_diff
                && line.starts_with(OLD_FILE_HEADER)
                && next_line.starts_with(NEW_FILE_HEADER)
                && after_next_line.starts_with(HUNK_HEADER_PREFIX))
        {
            self.start_file();
        }

        if self.current_file.as_ref().is_some_and(|file| file.is_too_big) {
            return;
        }

        if self.exceeds_limits(line) {
            self.truncate_current_file();
            return;
        }

        if ((line.starts_with(OLD_FILE_HEADER) && next_line.starts_with(NEW_FILE_HEADER))
            || (line.starts_with(NEW_FILE_HEADER) && prev_line.starts_with(OLD_FILE_HEADER)))
            && self.set_name_from_header(line)
        {
            return;
        }

        if line.starts_with(HUNK_HEADER_PREFIX) {
            self.start_block(line);
            return;
        }

        if self.current_block.is_some()
            && (line.starts_with('+') || line.starts_with('-') || line.starts_with(' '))
        {
            self.create_line(line);
            return;
        }

        self.parse_metadata(index, line);
    }

    fn start_file_from_git_header(&mut self, line: &str) {
        self.start_file();

        if let Some(caps) = GIT_DIFF_START.captures(line) {
            self.possible_old_name = Some(self.old_filename(&caps[1]));
            self.possible_new_name = Some(self.new_filename(&caps[2]));
        } else if let Some(caps) = COMBINED_DIFF_START.captures(line) {
            self.possible_old_name = Some(caps[1].to_string());
            self.possible_new_name = Some(caps[1].to_string());
        }

        if let Some(file) = self.current_file.as_mut() {
            file.is_git_diff = true;
            file.is_combined = !line.starts_with("diff --git");
        }
    }

    /// Returns true when the line named one side of the current file.
    fn set_name_from_header(&mut self, line: &str) -> bool {
        let src_prefix = self.config.src_prefix.as_deref();
        let dst_prefix = self.config.dst_prefix.as_deref();
        let Some(file) = self.current_file.as_mut() else {
            return false;
        };

        if file.old_name.is_empty()
            && let Some(name) = header_filename(line, OLD_FILE_HEADER, src_prefix)
        {
            file.language = extension(&name).unwrap_or(&file.language).to_string();
            file.old_name = name;
            return true;
        }

        if file.new_name.is_empty()
            && let Some(name) = header_filename(line, NEW_FILE_HEADER, dst_prefix)
        {
            file.language = extension(&name).unwrap_or(&file.language).to_string();
            file.new_name = name;
            return true;
        }

        false
    }

    fn exceeds_limits(&self, line: &str) -> bool {
        let Some(file) = self.current_file.as_ref() else {
            return false;
        };

        let too_many_changes = self
            .config
            .diff_max_changes
            .is_some_and(|max| file.added_lines + file.deleted_lines > max);
        let too_long = self
            .config
            .diff_max_line_length
            .is_some_and(|max| line.chars().count() > max);

        too_many_changes || too_long
    }

    fn truncate_current_file(&mut self) {
        if let Some(file) = self.current_file.as_mut() {
            debug!(
                "Diff of file {} too big, dropping its {} blocks",
                self.files.len(),
                file.blocks.len()
            );
            file.is_too_big = true;
            file.added_lines = 0;
            file.deleted_lines = 0;
            file.blocks.clear();
        }
        self.current_block = None;
        let message = self.config.too_big_message().to_string();
        self.start_block(&message);
    }

    fn parse_metadata(&mut self, index: usize, line: &'a str) {
        let explicit_header_ahead = self.hunk_header_ahead(index);
        let src_prefix = self.config.src_prefix.as_deref();
        let dst_prefix = self.config.dst_prefix.as_deref();
        let Some(file) = self.current_file.as_mut() else {
            return;
        };

        let mut block_header = None;

        if let Some(caps) = OLD_MODE.captures(line) {
            file.old_mode = Some(Revision::Single(caps[1].to_string()));
        } else if let Some(caps) = NEW_MODE.captures(line) {
            file.new_mode = Some(caps[1].to_string());
        } else if let Some(caps) = COMBINED_DELETED_FILE_MODE.captures(line) {
            file.deleted_file_mode = Some(split_revisions(&caps[1]));
            file.is_deleted = true;
        } else if let Some(caps) = DELETED_FILE_MODE.captures(line) {
            file.deleted_file_mode = Some(Revision::Single(caps[1].to_string()));
            file.is_deleted = true;
        } else if let Some(caps) = NEW_FILE_MODE.captures(line) {
            file.new_file_mode = Some(caps[1].to_string());
            file.is_new = true;
        } else if let Some(caps) = COPY_FROM.captures(line) {
            if !explicit_header_ahead {
                file.old_name = caps[1].to_string();
            }
            file.is_copy = true;
        } else if let Some(caps) = COPY_TO.captures(line) {
            if !explicit_header_ahead {
                file.new_name = caps[1].to_string();
            }
            file.is_copy = true;
        } else if let Some(caps) = RENAME_FROM.captures(line) {
            if !explicit_header_ahead {
                file.old_name = caps[1].to_string();
            }
            file.is_rename = true;
        } else if let Some(caps) = RENAME_TO.captures(line) {
            if !explicit_header_ahead {
                file.new_name = caps[1].to_string();
            }
            file.is_rename = true;
        } else if let Some(caps) = BINARY_FILES.captures(line) {
            file.is_binary = true;
            file.old_name = get_filename(&caps[1], src_prefix);
            file.new_name = get_filename(&caps[2], dst_prefix);
            block_header = Some(BINARY_BLOCK_HEADER);
        } else if GIT_BINARY_PATCH.is_match(line) {
            file.is_binary = true;
            block_header = Some(line);
        } else if let Some(caps) = SIMILARITY_INDEX.captures(line) {
            file.unchanged_percentage = caps[1].parse().ok();
        } else if let Some(caps) = DISSIMILARITY_INDEX.captures(line) {
            file.changed_percentage = caps[1].parse().ok();
        } else if let Some(caps) = INDEX.captures(line) {
            file.checksum_before = Some(Revision::Single(caps[1].to_string()));
            file.checksum_after = Some(caps[2].to_string());
            if let Some(mode) = caps.get(3) {
                file.mode = Some(mode.as_str().to_string());
            }
        } else if let Some(caps) = COMBINED_INDEX.captures(line) {
            file.checksum_before = Some(split_revisions(&caps[1]));
            file.checksum_after = Some(caps[2].to_string());
        } else if let Some(caps) = COMBINED_MODE.captures(line) {
            file.old_mode = Some(split_revisions(&caps[1]));
            file.new_mode = Some(caps[2].to_string());
        }

        if let Some(header) = block_header {
            self.start_block(header);
        }
    }

    /// Whether a `---`/`+++`/`@@` triple follows before the next `diff` line.
    fn hunk_header_ahead(&self, index: usize) -> bool {
        let lines = self.lines;
        let mut idx = index;
        while idx + 2 < lines.len() {
            if idx > index && lines[idx].starts_with("diff") {
                return false;
            }
            if lines[idx].starts_with(OLD_FILE_HEADER)
                && lines[idx + 1].starts_with(NEW_FILE_HEADER)
                && lines[idx + 2].starts_with(HUNK_HEADER_PREFIX)
            {
                return true;
            }
            idx += 1;
        }
        false
    }

    fn start_file(&mut self) {
        self.save_block();
        self.save_file();
        self.current_file = Some(DiffFile::new());
    }

    fn start_block(&mut self, line: &str) {
        self.save_block();

        let Some(file) = self.current_file.as_mut() else {
            return;
        };

        let mut old_line2 = None;
        if let Some((old_line, new_line)) = HUNK_HEADER
            .captures(line)
            .and_then(|caps| Some((caps[1].parse::<u32>().ok()?, caps[2].parse::<u32>().ok()?)))
        {
            file.is_combined = false;
            self.old_line = old_line;
            self.new_line = new_line;
        } else if let Some((old_line, second_old_line, new_line)) = COMBINED_HUNK_HEADER
            .captures(line)
            .and_then(|caps| {
                Some((
                    caps[1].parse::<u32>().ok()?,
                    caps[2].parse::<u32>().ok()?,
                    caps[3].parse::<u32>().ok()?,
                ))
            })
        {
            file.is_combined = true;
            self.old_line = old_line;
            old_line2 = Some(second_old_line);
            self.new_line = new_line;
        } else {
            if line.starts_with(HUNK_HEADER_PREFIX) {
                warn!("Failed to parse hunk header {line:?}, numbering its lines from 0");
            }
            file.is_combined = false;
            self.old_line = 0;
            self.new_line = 0;
        }

        let mut block = DiffBlock::new(line, self.old_line, self.new_line);
        block.old_start_line2 = old_line2;
        self.current_block = Some(block);
    }

    fn create_line(&mut self, line: &str) {
        let (Some(file), Some(block)) = (self.current_file.as_mut(), self.current_block.as_mut())
        else {
            return;
        };

        let (added_prefixes, deleted_prefixes) = if file.is_combined {
            (COMBINED_ADDED_PREFIXES, COMBINED_DELETED_PREFIXES)
        } else {
            (ADDED_PREFIXES, DELETED_PREFIXES)
        };

        // Counters stop at u32::MAX for hunk headers starting at the very end.
        if added_prefixes.iter().any(|prefix| line.starts_with(prefix)) {
            file.added_lines += 1;
            block.add_line(DiffLine::new_added(line, self.new_line));
            self.new_line = self.new_line.saturating_add(1);
        } else if deleted_prefixes.iter().any(|prefix| line.starts_with(prefix)) {
            file.deleted_lines += 1;
            block.add_line(DiffLine::new_removed(line, self.old_line));
            self.old_line = self.old_line.saturating_add(1);
        } else {
            block.add_line(DiffLine::new_context(line, self.old_line, self.new_line));
            self.old_line = self.old_line.saturating_add(1);
            self.new_line = self.new_line.saturating_add(1);
        }
    }

    fn save_block(&mut self) {
        if let Some(block) = self.current_block.take()
            && let Some(file) = self.current_file.as_mut()
        {
            file.add_block(block);
        }
    }

    /// Emit the current file once it has a name; stubs without one are dropped.
    fn save_file(&mut self) {
        if let Some(mut file) = self.current_file.take() {
            if file.old_name.is_empty()
                && let Some(name) = self.possible_old_name.take()
            {
                file.old_name = name;
            }
            if file.new_name.is_empty()
                && let Some(name) = self.possible_new_name.take()
            {
                file.new_name = name;
            }
            if !file.new_name.is_empty() {
                self.files.push(file);
            }
        }

        self.possible_old_name = None;
        self.possible_new_name = None;
    }

    fn finish(mut self) -> Vec<DiffFile> {
        self.save_block();
        self.save_file();
        self.files
    }

    fn old_filename(&self, value: &str) -> String {
        get_filename(value, self.config.src_prefix.as_deref())
    }

    fn new_filename(&self, value: &str) -> String {
        get_filename(value, self.config.dst_prefix.as_deref())
    }
}

fn header_filename(line: &str, header: &str, extra_prefix: Option<&str>) -> Option<String> {
    let name = get_filename(line.strip_prefix(header)?, extra_prefix);
    (!name.is_empty()).then_some(name)
}

/// Strip quotes, one known side prefix and a `diff -u` timestamp from a file name.
fn get_filename(value: &str, extra_prefix: Option<&str>) -> String {
    let filename = QUOTED_NAME
        .captures(value)
        .and_then(|caps| caps.get(1))
        .map_or("", |name| name.as_str());

    let prefix_len = BASE_FILENAME_PREFIXES
        .iter()
        .find(|prefix| filename.starts_with(**prefix))
        .map(|prefix| prefix.len())
        .or_else(|| {
            extra_prefix
                .filter(|prefix| filename.starts_with(prefix))
                .map(str::len)
        })
        .unwrap_or(0);

    UNIFIED_TIMESTAMP
        .replace(&filename[prefix_len..], "")
        .into_owned()
}

fn extension(filename: &str) -> Option<&str> {
    filename
        .rsplit_once('.')
        .map(|(_, extension)| extension)
}

fn split_revisions(values: &str) -> Revision {
    Revision::Combined(values.split(',').map(str::to_string).collect())
}
