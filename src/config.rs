use clap::ValueEnum;

pub const DEFAULT_TOO_BIG_MESSAGE: &str = "Diff too big to be displayed";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParserConfig {
    /// Extra prefix stripped from old file names, on top of `a/`, `b/`, `i/`, `w/`, `c/`, `o/`.
    pub src_prefix: Option<String>,
    /// Extra prefix stripped from new file names.
    pub dst_prefix: Option<String>,
    /// A file whose added plus deleted lines exceed this is truncated.
    pub diff_max_changes: Option<usize>,
    /// A file containing a line longer than this is truncated.
    pub diff_max_line_length: Option<usize>,
    /// Header of the placeholder block of a truncated file.
    pub diff_too_big_message: Option<String>,
}

impl ParserConfig {
    pub fn too_big_message(&self) -> &str {
        self.diff_too_big_message
            .as_deref()
            .unwrap_or(DEFAULT_TOO_BIG_MESSAGE)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Matching {
    /// Pair deleted and inserted lines by position only
    #[default]
    None,
    /// Pair deleted and inserted lines by similarity
    Lines,
    /// Pair by position and tag similar words inside each pair
    Words,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum DiffStyle {
    /// Highlight changed words, keeping whitespace as tokens
    #[default]
    Word,
    /// Highlight changed characters
    Char,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    #[value(name = "line")]
    LineByLine,
    #[value(name = "side")]
    SideBySide,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub matching: Matching,
    /// Word pairs closer than this are tagged as changed words.
    pub match_words_threshold: f64,
    /// Line matching is skipped when `old * new` reaches this.
    pub matching_max_comparisons: usize,
    /// Line matching is skipped when any line of the run reaches this length.
    pub max_line_size_in_block_for_comparison: usize,
    /// Pairs with a side longer than this are escaped but not highlighted.
    pub max_line_length_highlight: usize,
    pub diff_style: DiffStyle,
    pub output_format: OutputFormat,
    pub draw_file_list: bool,
    pub render_nothing_when_empty: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            matching: Matching::None,
            match_words_threshold: 0.25,
            matching_max_comparisons: 2500,
            max_line_size_in_block_for_comparison: 200,
            max_line_length_highlight: 10000,
            diff_style: DiffStyle::Word,
            output_format: OutputFormat::LineByLine,
            draw_file_list: true,
            render_nothing_when_empty: false,
        }
    }
}
