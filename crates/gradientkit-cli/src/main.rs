//! GradientKit command line entry point (native).
//!
//! Builds an editor from an optional config and preset, applies the edits
//! given as flags, and prints the resulting CSS and/or Tailwind code.

use clap::{Parser, ValueEnum};
use gradientkit_core::{
    CodeFormat, ConfigError, EditorConfig, GradientEditor, HexInput, Preset, PresetError, StopId,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thiserror::Error;

#[derive(Debug, Error)]
enum CliError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Preset(#[from] PresetError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Invalid color edit {0:?}, expected <ID>=#rrggbb")]
    ColorEdit(String),
    #[error("Clipboard error: {0}")]
    Clipboard(String),
}

/// Which projection to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Css,
    Tailwind,
    Both,
}

impl OutputFormat {
    fn code_formats(self) -> &'static [CodeFormat] {
        match self {
            OutputFormat::Css => &[CodeFormat::Css],
            OutputFormat::Tailwind => &[CodeFormat::Tailwind],
            OutputFormat::Both => &CodeFormat::ALL,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "gradientkit", version, about = "Edit a CSS linear gradient and print its code")]
struct Cli {
    /// Preset JSON file to load before applying edits.
    #[arg(long, value_name = "FILE")]
    preset: Option<PathBuf>,

    /// Editor configuration JSON file.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Remove the stop with this id (ignored below two stops).
    #[arg(long, value_name = "ID")]
    remove: Vec<String>,

    /// Insert a stop at this position, colored like its nearer neighbor.
    #[arg(long, value_name = "POS", allow_negative_numbers = true)]
    insert: Vec<f64>,

    /// Add this many stops in the widest gaps.
    #[arg(long, value_name = "N", default_value_t = 0)]
    add: u32,

    /// Recolor a stop, written as <ID>=#rrggbb.
    #[arg(long, value_name = "ID=HEX")]
    color: Vec<String>,

    /// Gradient angle in degrees, clamped to [0, 360].
    #[arg(long, value_name = "DEG", allow_negative_numbers = true)]
    direction: Option<f64>,

    /// Output flavor.
    #[arg(long, value_enum, default_value_t = OutputFormat::Css)]
    format: OutputFormat,

    /// Print the highlighted display line instead of the raw code.
    #[arg(long)]
    snippet: bool,

    /// Print the resulting gradient as preset JSON.
    #[arg(long, conflicts_with_all = ["format", "snippet"])]
    json: bool,

    /// Copy the output to the clipboard.
    #[arg(long)]
    copy: bool,
}

fn read_file(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn build_editor(cli: &Cli) -> Result<GradientEditor, CliError> {
    let config = match &cli.config {
        Some(path) => EditorConfig::from_json(&read_file(path)?)?,
        None => EditorConfig::default(),
    };
    let mut editor = GradientEditor::new(config);

    if let Some(path) = &cli.preset {
        let preset = Preset::from_json(&read_file(path)?)?;
        preset.validate()?;
        editor.load_preset(&preset);
        log::info!("Loaded preset from {}", path.display());
    }

    for id in &cli.remove {
        if !editor.remove_stop(&StopId::from(id.as_str())) {
            log::warn!("Stop {} was not removed", id);
        }
    }
    for &position in &cli.insert {
        editor.insert_stop_at(position);
    }
    for _ in 0..cli.add {
        editor.add_stop();
    }
    for edit in &cli.color {
        let (id, hex) = edit
            .split_once('=')
            .ok_or_else(|| CliError::ColorEdit(edit.clone()))?;
        let id = StopId::from(id);
        if !editor.state().contains(&id) {
            log::warn!("No stop with id {}", id);
            continue;
        }
        if matches!(editor.edit_color(&id, hex), HexInput::Partial | HexInput::Invalid) {
            return Err(CliError::ColorEdit(edit.clone()));
        }
    }
    if let Some(direction) = cli.direction {
        editor.set_direction(direction);
    }

    Ok(editor)
}

fn render(cli: &Cli, editor: &GradientEditor) -> Result<String, CliError> {
    if cli.json {
        return Ok(editor.to_preset().to_json()?);
    }
    let lines: Vec<String> = cli
        .format
        .code_formats()
        .iter()
        .map(|&format| {
            if cli.snippet {
                editor.snippet(format).to_string()
            } else {
                editor.code(format)
            }
        })
        .collect();
    Ok(lines.join("\n"))
}

fn run(cli: &Cli) -> Result<String, CliError> {
    let editor = build_editor(cli)?;
    render(cli, &editor)
}

#[cfg(feature = "clipboard")]
fn copy_to_clipboard(text: &str) -> Result<(), CliError> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| CliError::Clipboard(e.to_string()))?;
    clipboard
        .set_text(text.to_string())
        .map_err(|e| CliError::Clipboard(e.to_string()))
}

#[cfg(not(feature = "clipboard"))]
fn copy_to_clipboard(_text: &str) -> Result<(), CliError> {
    Err(CliError::Clipboard(
        "built without the `clipboard` feature".to_string(),
    ))
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let output = match run(&cli) {
        Ok(output) => output,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    println!("{}", output);

    if cli.copy {
        match copy_to_clipboard(&output) {
            Ok(()) => log::info!("Code copied to clipboard"),
            Err(e) => {
                log::error!("{}", e);
                eprintln!("error: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}
