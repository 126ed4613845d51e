use std::path::PathBuf;

use anyhow::{Result, ensure};
use clap::Parser;
use diffweave::{
    DiffStyle, Matching, OutputFormat, ParserConfig, RenderConfig,
    app::{App, InputSource, OutputKind, write_output},
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Where to read the diff from
    #[arg(short, long, value_enum, default_value_t = InputSource::Command)]
    input: InputSource,

    /// Diff file to read with `--input file`
    #[arg(long)]
    file: Option<PathBuf>,

    /// Output HTML or the parsed diff as JSON
    #[arg(short, long, value_enum, default_value_t = OutputKind::Html)]
    format: OutputKind,

    /// HTML layout
    #[arg(short, long, value_enum, default_value_t = OutputFormat::LineByLine)]
    style: OutputFormat,

    /// How deleted and inserted lines are paired
    #[arg(long, value_enum, default_value_t = Matching::None)]
    matching: Matching,

    /// Granularity of intra-line highlights
    #[arg(long, value_enum, default_value_t = DiffStyle::Word)]
    diff_style: DiffStyle,

    /// Word pairs below this distance are highlighted as changed words
    #[arg(long, default_value_t = 0.25)]
    match_words_threshold: f64,

    /// Skip line matching when deleted * inserted lines reaches this
    #[arg(long, default_value_t = 2500)]
    matching_max_comparisons: usize,

    /// Skip line matching when a line of the run reaches this length
    #[arg(long, default_value_t = 200)]
    max_line_size_in_block_for_comparison: usize,

    /// Do not highlight line pairs longer than this
    #[arg(long, default_value_t = 10000)]
    max_line_length_highlight: usize,

    /// Extra prefix to strip from old file names
    #[arg(long)]
    src_prefix: Option<String>,

    /// Extra prefix to strip from new file names
    #[arg(long)]
    dst_prefix: Option<String>,

    /// Truncate files with more changed lines than this
    #[arg(long)]
    diff_max_changes: Option<usize>,

    /// Truncate files containing a line longer than this
    #[arg(long)]
    diff_max_line_length: Option<usize>,

    /// Message shown for truncated files
    #[arg(long)]
    diff_too_big_message: Option<String>,

    /// Leave out the summary of changed files
    #[arg(long)]
    no_file_list: bool,

    /// Produce no output when the diff has no files
    #[arg(long)]
    render_nothing_when_empty: bool,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log debug details to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Git diff arguments (e.g., "HEAD~1", "main..feature")
    #[arg(last = true)]
    git_args: Vec<String>,
}

impl Args {
    fn parser_config(&self) -> ParserConfig {
        ParserConfig {
            src_prefix: self.src_prefix.clone(),
            dst_prefix: self.dst_prefix.clone(),
            diff_max_changes: self.diff_max_changes,
            diff_max_line_length: self.diff_max_line_length,
            diff_too_big_message: self.diff_too_big_message.clone(),
        }
    }

    fn render_config(&self) -> Result<RenderConfig> {
        ensure!(
            (0.0..=1.0).contains(&self.match_words_threshold),
            "--match-words-threshold must be between 0 and 1, got {}",
            self.match_words_threshold
        );

        Ok(RenderConfig {
            matching: self.matching,
            match_words_threshold: self.match_words_threshold,
            matching_max_comparisons: self.matching_max_comparisons,
            max_line_size_in_block_for_comparison: self.max_line_size_in_block_for_comparison,
            max_line_length_highlight: self.max_line_length_highlight,
            diff_style: self.diff_style,
            output_format: self.style,
            draw_file_list: !self.no_file_list,
            render_nothing_when_empty: self.render_nothing_when_empty,
        })
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let app = App::new(args.parser_config(), args.render_config()?, args.format);
    let diff_text = app.load_diff(args.input, args.file.as_deref(), &args.git_args)?;
    let files = app.parse(&diff_text);
    let output = app.render(&files)?;

    write_output(args.output.as_deref(), &output)
}
