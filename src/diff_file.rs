use serde::Serialize;

/// Name git and `diff -u` use for the missing side of a created or deleted file.
pub const DEV_NULL: &str = "/dev/null";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffFile {
    pub old_name: String,
    pub new_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub language: String,
    pub is_git_diff: bool,
    pub is_combined: bool,
    pub is_new: bool,
    pub is_deleted: bool,
    pub is_rename: bool,
    pub is_copy: bool,
    pub is_binary: bool,
    pub is_too_big: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_mode: Option<Revision>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_file_mode: Option<Revision>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_file_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checksum_before: Option<Revision>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checksum_after: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unchanged_percentage: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changed_percentage: Option<u32>,
    pub added_lines: usize,
    pub deleted_lines: usize,
    pub blocks: Vec<DiffBlock>,
}

/// A checksum or file mode. Combined diffs carry one value per parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Revision {
    Single(String),
    Combined(Vec<String>),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffBlock {
    pub header: String,
    pub old_start_line: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_start_line2: Option<u32>,
    pub new_start_line: u32,
    pub lines: Vec<DiffLine>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffLine {
    pub content: String,
    #[serde(rename = "type")]
    pub line_type: LineType,
    pub old_number: Option<u32>,
    pub new_number: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineType {
    Insert,
    Delete,
    Context,
    InsertChange,
    DeleteChange,
    Info,
}

/// Coarse summary of what happened to a file, used by the file list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    Added,
    Deleted,
    Renamed,
    Copied,
    Changed,
}

impl FileStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            FileStatus::Added => "added",
            FileStatus::Deleted => "deleted",
            FileStatus::Renamed => "renamed",
            FileStatus::Copied => "copied",
            FileStatus::Changed => "changed",
        }
    }
}

impl DiffFile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line_count(&self) -> usize {
        self.blocks.iter().map(|block| block.lines.len()).sum()
    }

    pub fn add_block(&mut self, block: DiffBlock) {
        self.blocks.push(block);
    }

    pub fn status(&self) -> FileStatus {
        if self.is_rename {
            FileStatus::Renamed
        } else if self.is_copy {
            FileStatus::Copied
        } else if self.is_new {
            FileStatus::Added
        } else if self.is_deleted {
            FileStatus::Deleted
        } else if self.new_name != self.old_name {
            FileStatus::Renamed
        } else {
            FileStatus::Changed
        }
    }

    /// Human readable name. Renames collapse the shared directories, e.g.
    /// `src/{old.rs → new.rs}`.
    pub fn display_name(&self) -> String {
        let old_name = self.old_name.replace('\\', "/");
        let new_name = self.new_name.replace('\\', "/");

        if old_name != new_name && !is_dev_null(&old_name) && !is_dev_null(&new_name) {
            return rename_display_name(&old_name, &new_name);
        }

        if is_dev_null(&new_name) {
            old_name
        } else {
            new_name
        }
    }
}

fn is_dev_null(name: &str) -> bool {
    name.contains("dev/null")
}

fn rename_display_name(old_name: &str, new_name: &str) -> String {
    let old_parts: Vec<&str> = old_name.split('/').collect();
    let new_parts: Vec<&str> = new_name.split('/').collect();

    let mut i = 0;
    let mut j = old_parts.len() - 1;
    let mut k = new_parts.len() - 1;

    while i < j && i < k && old_parts[i] == new_parts[i] {
        i += 1;
    }
    while j > i && k > i && old_parts[j] == new_parts[k] {
        j -= 1;
        k -= 1;
    }

    let prefix = new_parts[..i].join("/");
    let suffix = new_parts[k + 1..].join("/");
    let old_rest = old_parts[i..=j].join("/");
    let new_rest = new_parts[i..=k].join("/");

    match (prefix.is_empty(), suffix.is_empty()) {
        (false, false) => format!("{prefix}/{{{old_rest} → {new_rest}}}/{suffix}"),
        (false, true) => format!("{prefix}/{{{old_rest} → {new_rest}}}"),
        (true, false) => format!("{{{old_rest} → {new_rest}}}/{suffix}"),
        (true, true) => format!("{old_name} → {new_name}"),
    }
}

impl DiffBlock {
    pub fn new(header: &str, old_start_line: u32, new_start_line: u32) -> Self {
        Self {
            header: header.to_string(),
            old_start_line,
            old_start_line2: None,
            new_start_line,
            lines: Vec::new(),
        }
    }

    pub fn add_line(&mut self, line: DiffLine) {
        self.lines.push(line);
    }
}

impl DiffLine {
    pub fn new_added(line: &str, line_number: u32) -> Self {
        Self {
            content: line.to_string(),
            line_type: LineType::Insert,
            old_number: None,
            new_number: Some(line_number),
        }
    }

    pub fn new_removed(line: &str, line_number: u32) -> Self {
        Self {
            content: line.to_string(),
            line_type: LineType::Delete,
            old_number: Some(line_number),
            new_number: None,
        }
    }

    pub fn new_context(line: &str, old_line_num: u32, new_line_num: u32) -> Self {
        Self {
            content: line.to_string(),
            line_type: LineType::Context,
            old_number: Some(old_line_num),
            new_number: Some(new_line_num),
        }
    }
}
