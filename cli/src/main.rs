//! unabstract CLI - abstract record extraction tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use unabstract::{
    apply_patches, assign_headers, render, Document, ExtractOptions, Extraction, Extractor,
    HeaderRange, JsonFormat, Layout, PageSection, RecordPatch,
};

#[derive(Parser)]
#[command(name = "unabstract")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Extract abstract records from proceedings page dumps to JSON", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract records from one or more page dumps
    Extract(ExtractArgs),

    /// Show page dump statistics
    Info {
        /// Input page dump (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// List supported layouts
    Layouts,

    /// Show version information
    Version,
}

#[derive(Args)]
struct ExtractArgs {
    /// Input page dumps (JSON)
    #[arg(value_name = "FILE", required = true)]
    inputs: Vec<PathBuf>,

    /// Proceedings layout
    #[arg(short, long, value_enum, env = "UNABSTRACT_LAYOUT")]
    layout: LayoutArg,

    /// Output file, or directory when several inputs are given (stdout if not specified)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Output compact JSON
    #[arg(long)]
    compact: bool,

    /// Output JSON Lines, one record per line
    #[arg(long, conflicts_with = "compact")]
    jsonl: bool,

    /// JSON file of record patches applied by id
    #[arg(long, value_name = "FILE")]
    patches: Option<PathBuf>,

    /// JSON file of headers assigned by id range
    #[arg(long, value_name = "FILE")]
    header_ranges: Option<PathBuf>,

    /// Page section LABEL=START..END (0-based, end exclusive), repeatable
    #[arg(long = "section", value_name = "LABEL=START..END")]
    sections: Vec<PageSection>,

    /// Disable parallel processing
    #[arg(long)]
    sequential: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum LayoutArg {
    /// 2013-2018 two-column volumes
    #[value(name = "2013-2018")]
    Typeset,
    /// 2019 labeled export
    #[value(name = "2019")]
    Labeled2019,
    /// 2021 export in four page sections
    #[value(name = "2021")]
    Sectioned2021,
    /// 2022 session export
    #[value(name = "2022")]
    Session2022,
    /// 2023 platform and plenary sessions
    #[value(name = "2023")]
    Platform2023,
    /// 2023 posters
    #[value(name = "2023-poster")]
    Poster2023,
}

impl From<LayoutArg> for Layout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Typeset => Layout::Typeset,
            LayoutArg::Labeled2019 => Layout::Labeled2019,
            LayoutArg::Sectioned2021 => Layout::Sectioned2021,
            LayoutArg::Session2022 => Layout::Session2022,
            LayoutArg::Platform2023 => Layout::Platform2023,
            LayoutArg::Poster2023 => Layout::Poster2023,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Extract(args) => cmd_extract(&args),
        Commands::Info { input } => cmd_info(&input),
        Commands::Layouts => {
            cmd_layouts();
            Ok(())
        }
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_extract(args: &ExtractArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut options = ExtractOptions::new().with_parallel(!args.sequential);
    if !args.sections.is_empty() {
        options = options.with_sections(args.sections.clone());
    }
    let extractor = Extractor::new(args.layout.into()).with_options(options);

    let patches = args.patches.as_deref().map(RecordPatch::load).transpose()?;
    let ranges = args
        .header_ranges
        .as_deref()
        .map(HeaderRange::load)
        .transpose()?;

    let run = |input: &Path| -> Result<String, Box<dyn std::error::Error>> {
        let document = Document::from_path(input)?;
        let mut extraction = extractor.extract(&document);
        refine(&mut extraction, patches.as_deref(), ranges.as_deref());
        render_extraction(&extraction, args)
    };

    if let [input] = args.inputs.as_slice() {
        let output = run(input)?;
        if let Some(path) = &args.output {
            fs::write(path, &output)?;
            println!("{} {}", "Saved to".green(), path.display());
        } else {
            print!("{}", output);
        }
        return Ok(());
    }

    let output_dir = args.output.clone().unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&output_dir)?;

    let pb = ProgressBar::new(args.inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let extension = if args.jsonl { "jsonl" } else { "json" };
    let mut written = Vec::new();
    for input in &args.inputs {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        pb.set_message(stem.to_string());
        let output = run(input)?;
        let filename = format!("{}.records.{}", stem, extension);
        fs::write(output_dir.join(&filename), &output)?;
        written.push(filename);
        pb.inc(1);
    }
    pb.finish_with_message("Done!");

    println!("\n{}", "Output files:".green().bold());
    for (i, filename) in written.iter().enumerate() {
        let branch = if i + 1 == written.len() { "└─" } else { "├─" };
        println!("  {} {}", branch.dimmed(), filename);
    }

    Ok(())
}

fn refine(extraction: &mut Extraction, patches: Option<&[RecordPatch]>, ranges: Option<&[HeaderRange]>) {
    for set in &mut extraction.sets {
        if let Some(patches) = patches {
            let patched = apply_patches(set, patches);
            log::info!("Patched {} records", patched);
        }
        if let Some(ranges) = ranges {
            let assigned = assign_headers(set, ranges);
            log::info!("Assigned headers to {} records", assigned);
        }
    }
}

fn render_extraction(
    extraction: &Extraction,
    args: &ExtractArgs,
) -> Result<String, Box<dyn std::error::Error>> {
    if args.jsonl {
        return Ok(render::to_json_lines(extraction)?);
    }

    let format = if args.compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    let mut json = render::to_json(extraction, format)?;
    json.push('\n');
    Ok(json)
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let doc = Document::from_path(input)?;

    let blocks: usize = doc.pages.iter().map(|p| p.block_count()).sum();
    let images: usize = doc
        .pages
        .iter()
        .flat_map(|p| p.blocks.iter())
        .filter(|b| b.is_image())
        .count();
    let lines: usize = doc.pages.iter().map(|p| p.line_count()).sum();
    let empty_pages = doc.pages.iter().filter(|p| p.is_empty()).count();

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Pages".bold(), doc.page_count());
    println!("{}: {}", "Empty pages".bold(), empty_pages);

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Blocks".bold(), blocks);
    println!("{}: {}", "Image blocks".bold(), images);
    println!("{}: {}", "Lines".bold(), lines);

    Ok(())
}

fn cmd_layouts() {
    println!("{}", "Supported Layouts".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    for layout in Layout::ALL {
        let name = format!("{:<12}", layout.name());
        println!("{} {}", name.bold(), layout.description());

        let fields: Vec<_> = layout.variant().fields().iter().map(|f| f.as_str()).collect();
        println!("{:<12} {} {}", "", "fields:".dimmed(), fields.join(", "));
    }
}

fn cmd_version() {
    println!("{} {}", "unabstract".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Abstract record extraction tool");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/unabstract".dimmed());
    println!("License: MIT");
}
