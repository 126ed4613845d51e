use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result, bail};
use clap::ValueEnum;
use log::debug;

use crate::{
    config::{ParserConfig, RenderConfig},
    diff_file::DiffFile,
    parser::parse_diff,
    ui::render_document,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum InputSource {
    /// Read the diff from the file given with `--file`
    File,
    /// Run `git diff` with the trailing arguments
    #[default]
    Command,
    /// Read the diff from standard input
    Stdin,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputKind {
    /// Standalone HTML page
    #[default]
    Html,
    /// The parsed files as JSON
    Json,
}

pub struct App {
    pub parser_config: ParserConfig,
    pub render_config: RenderConfig,
    pub output_kind: OutputKind,
}

impl App {
    pub fn new(
        parser_config: ParserConfig,
        render_config: RenderConfig,
        output_kind: OutputKind,
    ) -> Self {
        Self {
            parser_config,
            render_config,
            output_kind,
        }
    }

    pub fn load_diff(
        &self,
        source: InputSource,
        file: Option<&Path>,
        git_args: &[String],
    ) -> Result<String> {
        match source {
            InputSource::File => {
                let Some(path) = file else {
                    bail!("--file is required when reading the diff from a file");
                };
                fs::read_to_string(path)
                    .with_context(|| format!("Failed to read diff from {}", path.display()))
            }
            InputSource::Stdin => {
                let mut diff_text = String::new();
                io::stdin()
                    .read_to_string(&mut diff_text)
                    .context("Failed to read diff from stdin")?;
                Ok(diff_text)
            }
            InputSource::Command => run_git_diff(git_args),
        }
    }

    pub fn parse(&self, diff_text: &str) -> Vec<DiffFile> {
        let files = parse_diff(diff_text, &self.parser_config);
        debug!("Parsed {} files", files.len());
        files
    }

    pub fn render(&self, files: &[DiffFile]) -> Result<String> {
        match self.output_kind {
            OutputKind::Html => Ok(render_document(files, &self.render_config, "diffweave")),
            OutputKind::Json => {
                serde_json::to_string_pretty(files).context("Failed to serialize parsed diff")
            }
        }
    }
}

fn run_git_diff(git_args: &[String]) -> Result<String> {
    let mut cmd = Command::new("git");
    cmd.arg("diff").arg("-M").arg("-C");
    cmd.args(git_args);

    debug!("Running {cmd:?}");
    let output = cmd.output().context("Failed to run git diff")?;
    if !output.status.success() {
        bail!(
            "git diff exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Writes to `output`, or to stdout when no path is given.
pub fn write_output(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => fs::write(path, content)
            .with_context(|| format!("Failed to write output to {}", path.display())),
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(content.as_bytes())
                .context("Failed to write output to stdout")?;
            stdout.flush().context("Failed to flush stdout")
        }
    }
}
