//! CLI Application logic
//!
//! Contains the command-line interface implementation.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, warn, Level};
use tracing_subscriber::EnvFilter;

use slidemark_ast::{ContentMode, Presentation};
use slidemark_core::config::CONFIG_FILE_NAME;
use slidemark_core::{
    diff_presentations, parse_presentation, DiffOutcome, ParseOptions, PresentationCache, Settings,
};

/// Output format for command results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for tool consumption
    Json,
}

/// Content mode override on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Plain lines are speaker notes
    Notes,
    /// Everything is visible until a `notes:` line
    Visible,
}

impl From<ModeArg> for ContentMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Notes => ContentMode::NotesByDefault,
            ModeArg::Visible => ContentMode::VisibleByDefault,
        }
    }
}

#[derive(Parser)]
#[command(name = "slidemark")]
#[command(author, version, about = "Markdown slides, parsed", long_about = None)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a presentation and print its model
    Parse {
        /// Input Markdown file
        input: PathBuf,

        /// Default content mode when the document does not set one
        #[arg(short, long, value_enum)]
        mode: Option<ModeArg>,

        /// Output format (text or json)
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Print one line per slide: index, layout, columns and title
    Outline {
        /// Input Markdown file
        input: PathBuf,

        /// Default content mode when the document does not set one
        #[arg(short, long, value_enum)]
        mode: Option<ModeArg>,
    },

    /// Print the speaker notes of every slide
    Notes {
        /// Input Markdown file
        input: PathBuf,

        /// Default content mode when the document does not set one
        #[arg(short, long, value_enum)]
        mode: Option<ModeArg>,
    },

    /// Classify the changes between two versions of a presentation
    Diff {
        /// Previous version
        old: PathBuf,

        /// Current version
        new: PathBuf,

        /// Output format (text or json)
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

/// Run the CLI application
///
/// This is the main entry point for the command-line interface.
/// It parses arguments and dispatches to the appropriate command.
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = load_settings(cli.config.as_deref())?;

    match cli.command {
        Commands::Parse {
            input,
            mode,
            format,
        } => parse_command(&input, mode, format, &settings),
        Commands::Outline { input, mode } => outline_command(&input, mode, &settings),
        Commands::Notes { input, mode } => notes_command(&input, mode, &settings),
        Commands::Diff { old, new, format } => diff_command(&old, &new, format, &settings),
    }
}

/// Install the stderr log subscriber; `RUST_LOG` refines the default level
fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .try_init();
}

/// Parse a file and print the model or a summary
pub fn parse_command(
    input: &Path,
    mode: Option<ModeArg>,
    format: OutputFormat,
    settings: &Settings,
) -> Result<()> {
    let presentation = load_presentation(input, mode, settings)?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&presentation)
                .context("Failed to serialize presentation to JSON")?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            println!("slidemark v{}", slidemark_core::VERSION);
            println!("Parsed: {}", input.display());
            print!("{}", summary_text(&presentation));
        }
    }

    Ok(())
}

/// Print the slide outline of a file
pub fn outline_command(input: &Path, mode: Option<ModeArg>, settings: &Settings) -> Result<()> {
    let presentation = load_presentation(input, mode, settings)?;
    print!("{}", outline_text(&presentation));
    Ok(())
}

/// Print the speaker notes of a file
pub fn notes_command(input: &Path, mode: Option<ModeArg>, settings: &Settings) -> Result<()> {
    let presentation = load_presentation(input, mode, settings)?;
    print!("{}", notes_text(&presentation));
    Ok(())
}

/// Diff two versions of a file
pub fn diff_command(
    old: &Path,
    new: &Path,
    format: OutputFormat,
    settings: &Settings,
) -> Result<()> {
    let outcome = diff_files(old, new, settings)?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&outcome)
                .context("Failed to serialize diff to JSON")?;
            println!("{}", json);
        }
        OutputFormat::Text => print!("{}", diff_text(&outcome)),
    }

    Ok(())
}

/// Read and parse a presentation file
pub fn load_presentation(
    input: &Path,
    mode: Option<ModeArg>,
    settings: &Settings,
) -> Result<Presentation> {
    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    let text = fs::read_to_string(input)
        .with_context(|| format!("Failed to read input file: {}", input.display()))?;

    let options = match mode {
        Some(mode) => ParseOptions::with_content_mode(mode.into()),
        None => settings.parse_options()?,
    };
    debug!(input = %input.display(), mode = options.default_content_mode.as_str(), "parsing");

    Ok(parse_presentation(&text, &options))
}

/// Parse two files and diff the second against the first
pub fn diff_files(old: &Path, new: &Path, settings: &Settings) -> Result<DiffOutcome> {
    let before = load_presentation(old, None, settings)?;
    let after = load_presentation(new, None, settings)?;

    let cache = PresentationCache::build(&before);
    Ok(diff_presentations(&cache, &after, &settings.diff_options()))
}

/// Load settings from an explicit path, `slidemark.toml`, or defaults
pub fn load_settings(config_path: Option<&Path>) -> Result<Settings> {
    match config_path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            Settings::from_toml_str(&content)
                .with_context(|| format!("Failed to parse config: {}", path.display()))
        }
        None => {
            let candidate = Path::new(CONFIG_FILE_NAME);
            if candidate.exists() {
                let content = fs::read_to_string(candidate)?;
                match Settings::from_toml_str(&content) {
                    Ok(settings) => return Ok(settings),
                    Err(err) => warn!(code = err.code(), "ignoring {}: {}", CONFIG_FILE_NAME, err),
                }
            }
            Ok(Settings::default())
        }
    }
}

/// Human-readable summary of a presentation
pub fn summary_text(presentation: &Presentation) -> String {
    let mode = presentation.content_mode().unwrap_or_default();
    let hidden = presentation.slides.iter().filter(|s| s.is_hidden()).count();

    let mut out = String::new();
    if let Some(title) = &presentation.frontmatter.title {
        let _ = writeln!(out, "  Title: {}", title);
    }
    if presentation.content_mode().is_some() {
        let _ = writeln!(out, "  Mode: {}", mode.as_str());
    }
    let _ = writeln!(
        out,
        "  Slides: {} ({} hidden)",
        presentation.slide_count(),
        hidden
    );
    for slide in &presentation.slides {
        let _ = writeln!(
            out,
            "  [{}] {}: {} element(s), {} note(s)",
            slide.index,
            slide.layout(),
            slide.elements.len(),
            slide.notes.len()
        );
    }
    out
}

/// One line per slide: source index, layout, column count, title
pub fn outline_text(presentation: &Presentation) -> String {
    let mut out = String::new();
    for slide in &presentation.slides {
        let columns = match slide.column_count() {
            0 => String::new(),
            n => format!(" [{} col]", n),
        };
        let hidden = if slide.is_hidden() { " (hidden)" } else { "" };
        let _ = writeln!(
            out,
            "{:>3}  {:<12}{}{}  {}",
            slide.index,
            slide.layout().as_str(),
            columns,
            hidden,
            slide.title().unwrap_or("-")
        );
    }
    out
}

/// Speaker notes grouped by slide
pub fn notes_text(presentation: &Presentation) -> String {
    let mut out = String::new();
    for slide in presentation.slides.iter().filter(|s| !s.notes.is_empty()) {
        let _ = writeln!(
            out,
            "## Slide {}: {}",
            slide.index,
            slide.title().unwrap_or("untitled")
        );
        for note in &slide.notes {
            let _ = writeln!(out, "{}", note);
        }
        out.push('\n');
    }
    out
}

/// Human-readable diff classification
pub fn diff_text(outcome: &DiffOutcome) -> String {
    match outcome {
        DiffOutcome::FullRender { reason } => format!("full render: {}\n", reason),
        DiffOutcome::Incremental(diff) => {
            let mut out = format!("{}\n", diff.kind.as_str());
            for (label, indices) in [
                ("modified", &diff.modified_indices),
                ("added", &diff.added_indices),
                ("removed", &diff.removed_indices),
            ] {
                if !indices.is_empty() {
                    let list: Vec<String> = indices.iter().map(|i| i.to_string()).collect();
                    let _ = writeln!(out, "  {}: {}", label, list.join(", "));
                }
            }
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slidemark_core::parse;

    #[test]
    fn test_cli_parse_parse() {
        let args = vec!["slidemark", "parse", "talk.md"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Parse {
                input,
                mode,
                format,
            } => {
                assert_eq!(input, PathBuf::from("talk.md"));
                assert_eq!(mode, None);
                assert_eq!(format, OutputFormat::Text);
            }
            _ => panic!("Expected Parse command"),
        }
        assert!(!cli.verbose);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_cli_parse_parse_json_visible() {
        let args = vec![
            "slidemark", "parse", "talk.md", "--mode", "visible", "--format", "json",
        ];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Parse { mode, format, .. } => {
                assert_eq!(mode, Some(ModeArg::Visible));
                assert_eq!(format, OutputFormat::Json);
            }
            _ => panic!("Expected Parse command"),
        }
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let args = vec!["slidemark", "outline", "talk.md", "--verbose", "--config", "deck.toml"];
        let cli = Cli::try_parse_from(args).unwrap();

        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("deck.toml")));
        assert!(matches!(cli.command, Commands::Outline { .. }));
    }

    #[test]
    fn test_cli_parse_diff() {
        let args = vec!["slidemark", "diff", "v1.md", "v2.md", "-f", "json"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Diff { old, new, format } => {
                assert_eq!(old, PathBuf::from("v1.md"));
                assert_eq!(new, PathBuf::from("v2.md"));
                assert_eq!(format, OutputFormat::Json);
            }
            _ => panic!("Expected Diff command"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_mode() {
        let args = vec!["slidemark", "notes", "talk.md", "--mode", "both"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_mode_arg_conversion() {
        assert_eq!(ContentMode::from(ModeArg::Notes), ContentMode::NotesByDefault);
        assert_eq!(ContentMode::from(ModeArg::Visible), ContentMode::VisibleByDefault);
    }

    #[test]
    fn test_outline_text() {
        let presentation = parse("# Hello\n---\n### A\n\ta\n### B\n\tb\n---\nlayout: (hidden)\n## Backup");
        let outline = outline_text(&presentation);
        let lines: Vec<&str> = outline.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("title"));
        assert!(lines[0].ends_with("Hello"));
        assert!(lines[1].contains("[2 col]"));
        assert!(lines[2].contains("(hidden)"));
    }

    #[test]
    fn test_notes_text() {
        let presentation = parse("# One\nSay hi\n---\n# Two\n---\n# Three\nWrap up\nThank you");
        let notes = notes_text(&presentation);

        assert!(notes.contains("## Slide 0: One\nSay hi\n"));
        assert!(!notes.contains("Slide 1"));
        assert!(notes.contains("Wrap up\nThank you\n"));
    }

    #[test]
    fn test_diff_text() {
        let before = parse("# A\n---\n# B\n---\n# C");
        let after = parse("# A\n---\n# C");
        let cache = PresentationCache::build(&before);
        let outcome = diff_presentations(&cache, &after, &Default::default());

        assert_eq!(diff_text(&outcome), "structural\n  removed: 1\n");
    }

    #[test]
    fn test_load_settings_default() {
        let settings = load_settings(None).unwrap();
        assert_eq!(settings.diff.max_structural_changes, 3);
    }

    #[test]
    fn test_load_settings_missing_file() {
        let err = load_settings(Some(Path::new("/nonexistent/slidemark.toml"))).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }
}
