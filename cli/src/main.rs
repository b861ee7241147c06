//! gdoc2md CLI - Google Docs to Markdown converter

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use log::debug;

use gdoc2md::{parse_json, ConversionStats, DocsParser, DocumentTree, FootnoteMode, RenderOptions};

#[derive(Parser)]
#[command(name = "gdoc2md")]
#[command(version)]
#[command(about = "Convert Google Docs research reports to Markdown", long_about = None)]
struct Cli {
    /// Input JSON file (Docs API response or document tree); stdin if omitted or "-"
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output file (stdout if not specified)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    #[command(flatten)]
    render: RenderArgs,

    /// Print conversion statistics to stderr
    #[arg(long)]
    stats: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Args, Clone)]
struct RenderArgs {
    /// Include YAML frontmatter
    #[arg(short, long)]
    frontmatter: bool,

    /// Maximum heading level (1-6)
    #[arg(long, default_value = "6", env = "GDOC2MD_MAX_HEADING")]
    max_heading: u8,

    /// Leave equations unescaped
    #[arg(long)]
    no_latex: bool,

    /// Footnote rendering
    #[arg(long, value_enum, default_value = "heuristic")]
    footnotes: FootnoteStyle,

    /// Put a rule after a leading level-1 heading
    #[arg(long)]
    rule_after_heading: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show document information
    Info {
        /// Input JSON file; stdin if omitted or "-"
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,
    },

    /// Dump the parsed document tree as JSON
    Tree {
        /// Input JSON file; stdin if omitted or "-"
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum FootnoteStyle {
    /// Link the cited phrase, falling back to the marker
    Heuristic,
    /// Link only the footnote marker
    Marker,
    /// Drop footnote references
    Omit,
}

impl From<FootnoteStyle> for FootnoteMode {
    fn from(style: FootnoteStyle) -> Self {
        match style {
            FootnoteStyle::Heuristic => FootnoteMode::Heuristic,
            FootnoteStyle::Marker => FootnoteMode::MarkerOnly,
            FootnoteStyle::Omit => FootnoteMode::Omit,
        }
    }
}

impl RenderArgs {
    fn to_options(&self) -> RenderOptions {
        RenderOptions::new()
            .with_frontmatter(self.frontmatter)
            .with_max_heading(self.max_heading)
            .with_latex(!self.no_latex)
            .with_footnote_mode(self.footnotes.into())
            .with_rule_after_first_heading(self.rule_after_heading)
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Info { input }) => cmd_info(input.as_deref()),
        Some(Commands::Tree {
            input,
            output,
            compact,
        }) => cmd_tree(input.as_deref(), output.as_deref(), compact),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            if cli.input.is_none() && io::stdin().is_terminal() {
                println!("{}", "Usage: gdoc2md <FILE> [-o OUTPUT]".yellow());
                println!("       gdoc2md --help for more information");
                Ok(())
            } else {
                cmd_convert(
                    cli.input.as_deref(),
                    cli.output.as_deref(),
                    &cli.render,
                    cli.stats,
                )
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Load a document from a file, or from stdin when no path (or "-") is given.
fn load_document(input: Option<&Path>) -> Result<DocumentTree, Box<dyn std::error::Error>> {
    match input {
        Some(path) if path != Path::new("-") => {
            debug!("reading {}", path.display());
            Ok(DocsParser::open(path)?.parse()?)
        }
        _ => {
            debug!("reading stdin");
            let mut json = String::new();
            io::stdin().read_to_string(&mut json)?;
            Ok(parse_json(&json)?)
        }
    }
}

fn write_output(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        eprintln!("{} {}", "Saved to".green(), path.display());
    } else {
        print!("{}", content);
    }
    Ok(())
}

fn cmd_convert(
    input: Option<&Path>,
    output: Option<&Path>,
    render: &RenderArgs,
    show_stats: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = load_document(input)?;
    let options = render.to_options();

    if show_stats {
        let result = gdoc2md::render::to_markdown_with_stats(&doc, &options);
        write_output(output, &result.content)?;
        print_stats(&result.stats);
    } else {
        let markdown = gdoc2md::render::to_markdown(&doc, &options);
        write_output(output, &markdown)?;
    }

    Ok(())
}

fn print_stats(stats: &ConversionStats) {
    eprintln!();
    eprintln!("{}", "Conversion Statistics".cyan().bold());
    eprintln!("{}", "─".repeat(40).dimmed());
    eprintln!("{}: {}", "Elements".bold(), stats.element_count);
    eprintln!("{}: {}", "Headings".bold(), stats.heading_count);
    eprintln!("{}: {}", "Paragraphs".bold(), stats.paragraph_count);
    eprintln!("{}: {}", "Skipped".bold(), stats.skipped_count);
    eprintln!("{}: {}", "Links".bold(), stats.link_count);
    eprintln!("{}: {}", "Equations".bold(), stats.equation_count);
    eprintln!(
        "{}: {} ({} phrase, {} marker, {} unresolved)",
        "Footnotes".bold(),
        stats.footnote_count(),
        stats.footnotes_linked,
        stats.footnotes_marker_only,
        stats.footnotes_unresolved
    );
    eprintln!(
        "{}: {}",
        "Truncated".bold(),
        if stats.truncated { "Yes" } else { "No" }
    );
    eprintln!("{}: {}", "Words".bold(), stats.word_count);
}

fn cmd_info(input: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let doc = load_document(input)?;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    if let Some(path) = input {
        println!("{}: {}", "File".bold(), path.display());
    }
    if let Some(ref title) = doc.metadata.title {
        println!("{}: {}", "Title".bold(), title);
    }
    if let Some(ref id) = doc.metadata.document_id {
        println!("{}: {}", "Document ID".bold(), id);
    }
    if let Some(ref rev) = doc.metadata.revision_id {
        println!("{}: {}", "Revision".bold(), rev);
    }

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let headings = doc.elements.iter().filter(|e| e.is_heading()).count();
    let linked = doc
        .footnotes
        .iter()
        .filter(|(_, entry)| entry.link_target().is_some())
        .count();
    let words = doc.plain_text().split_whitespace().count();

    println!("{}: {}", "Elements".bold(), doc.element_count());
    println!("{}: {}", "Headings".bold(), headings);
    println!(
        "{}: {} ({} with links)",
        "Footnotes".bold(),
        doc.footnotes.len(),
        linked
    );
    println!("{}: {}", "Words".bold(), words);

    Ok(())
}

fn cmd_tree(
    input: Option<&Path>,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = load_document(input)?;

    let mut json = if compact {
        serde_json::to_string(&doc)?
    } else {
        serde_json::to_string_pretty(&doc)?
    };
    json.push('\n');

    write_output(output, &json)
}

fn cmd_version() {
    println!("{} {}", "gdoc2md".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Google Docs to Markdown converter");
    println!();
    println!("License: MIT");
}
