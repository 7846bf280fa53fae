//! pagemark CLI - Markdown to page operations and back

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pagemark::detect::title_of;
use pagemark::reconstruct::{classify, FileTextSource, LineKind, ReconstructionState};
use pagemark::render::OpRecorder;
use pagemark::{
    pages_to_markdown, render_batch_with, render_file, ConversionOptions, JsonFormat, PageSize,
    ReconstructOptions, RenderOptions, RenderStats,
};

type CliResult = Result<(), Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "pagemark")]
#[command(version)]
#[command(about = "Convert Markdown notes to fixed-layout pages and page text back to Markdown", long_about = None)]
struct Cli {
    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a source file to a page operation stream (JSON)
    Render {
        /// Source file (.md, .yml, .conf, ...)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Rebuild Markdown from flat page text
    #[command(alias = "md")]
    Reconstruct {
        /// Text extracted from a page document
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        reconstruct: ReconstructArgs,
    },

    /// Render many files in parallel
    Batch {
        /// Files or directories (walked recursively)
        #[arg(value_name = "PATHS", required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory; each input becomes <name>.json under its relative path
        #[arg(short, long, value_name = "DIR")]
        output: PathBuf,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Show how each line of flat page text is classified
    Classify {
        /// Text extracted from a page document
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(Args)]
struct RenderArgs {
    /// Page margins in millimetres
    #[arg(long, env = "PAGEMARK_MARGINS", default_value_t = 20.0)]
    margins: f32,

    /// Body font size in points
    #[arg(long, env = "PAGEMARK_FONT_SIZE", default_value_t = 11.0)]
    font_size: f32,

    /// Font for body text
    #[arg(long, env = "PAGEMARK_MAIN_FONT", default_value = "Arial")]
    main_font: String,

    /// Font for code
    #[arg(long, env = "PAGEMARK_MONO_FONT", default_value = "Courier")]
    mono_font: String,

    /// Page size (a3, a4, a5, letter, legal)
    #[arg(long, env = "PAGEMARK_PAGE_SIZE", default_value = "a4")]
    page_size: PageSize,

    /// Keep link text black
    #[arg(long, env = "PAGEMARK_NO_COLOR_LINKS")]
    no_color_links: bool,

    /// Skip the table of contents
    #[arg(long, env = "PAGEMARK_NO_TOC")]
    no_toc: bool,

    /// Do not fill code block backgrounds
    #[arg(long, env = "PAGEMARK_NO_HIGHLIGHT")]
    no_highlight: bool,
}

impl From<RenderArgs> for RenderOptions {
    fn from(args: RenderArgs) -> Self {
        RenderOptions::new()
            .with_margins(args.margins)
            .with_font_size(args.font_size)
            .with_main_font(args.main_font)
            .with_mono_font(args.mono_font)
            .with_page_size(args.page_size)
            .with_color_links(!args.no_color_links)
            .with_toc(!args.no_toc)
            .with_highlight(!args.no_highlight)
    }
}

#[derive(Args)]
struct ReconstructArgs {
    /// Added to every heading level (clamped to 1-6)
    #[arg(
        long,
        env = "PAGEMARK_HEADER_ADJUST",
        default_value_t = 1,
        allow_negative_numbers = true
    )]
    header_adjust: i32,

    /// Omit the frontmatter block
    #[arg(long, env = "PAGEMARK_NO_FRONTMATTER")]
    no_frontmatter: bool,

    /// Emit trimmed lines without normalizing them
    #[arg(long, env = "PAGEMARK_NO_CLEANUP")]
    no_cleanup: bool,

    /// Frontmatter title (defaults to the file stem)
    #[arg(long)]
    title: Option<String>,

    /// Frontmatter date, YYYY-MM-DD (defaults to today)
    #[arg(long)]
    date: Option<NaiveDate>,
}

impl ReconstructArgs {
    fn into_options(self, input: &Path) -> ReconstructOptions {
        let mut options = ReconstructOptions::new()
            .with_header_level_adjust(self.header_adjust)
            .with_frontmatter(!self.no_frontmatter)
            .with_cleanup(!self.no_cleanup)
            .with_title(self.title.unwrap_or_else(|| title_of(input)));
        if let Some(date) = self.date {
            options = options.with_date(date);
        }
        options
    }
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.quiet { "error" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let result = match cli.command {
        Commands::Render {
            input,
            output,
            compact,
            render,
        } => cmd_render(&input, output.as_deref(), compact, render.into()),
        Commands::Reconstruct {
            input,
            output,
            reconstruct,
        } => {
            let options = reconstruct.into_options(&input);
            cmd_reconstruct(&input, output.as_deref(), options)
        }
        Commands::Batch {
            inputs,
            output,
            render,
        } => cmd_batch(&inputs, &output, render.into()),
        Commands::Classify { input } => cmd_classify(&input),
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

fn write_output(output: Option<&Path>, content: &str) -> CliResult {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_render(input: &Path, output: Option<&Path>, compact: bool, render: RenderOptions) -> CliResult {
    let options = ConversionOptions::new().with_render_options(render);
    let mut recorder = OpRecorder::new();
    let stats = render_file(input, &options, &mut recorder)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    let json = pagemark::render::to_json(recorder.ops(), format)?;
    write_output(output, &json)?;

    log::info!(
        "{}: {} pages, {} headings, {} text blocks",
        input.display(),
        stats.page_count,
        stats.heading_count,
        stats.text_block_count
    );
    Ok(())
}

fn cmd_reconstruct(input: &Path, output: Option<&Path>, reconstruct: ReconstructOptions) -> CliResult {
    let options = ConversionOptions::new().with_reconstruct_options(reconstruct);
    let mut source = FileTextSource::new(input);
    let markdown = pages_to_markdown(&mut source, &options)?;
    write_output(output, &markdown)
}

/// A file to convert and its path relative to the input it was found under.
#[derive(Debug)]
struct BatchInput {
    path: PathBuf,
    relative: PathBuf,
}

/// Files under `path`, recursing into directories.
fn collect_files(root: &Path, path: &Path, files: &mut Vec<BatchInput>) -> std::io::Result<()> {
    if path.is_dir() {
        let mut entries: Vec<PathBuf> = fs::read_dir(path)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<std::io::Result<_>>()?;
        entries.sort();
        for entry in entries {
            collect_files(root, &entry, files)?;
        }
    } else {
        let relative = match path.strip_prefix(root) {
            Ok(rel) if !rel.as_os_str().is_empty() => rel.to_path_buf(),
            _ => PathBuf::from(path.file_name().unwrap_or(path.as_os_str())),
        };
        files.push(BatchInput {
            path: path.to_path_buf(),
            relative,
        });
    }
    Ok(())
}

/// Output paths, relative to the output directory, one per input.
///
/// Inputs keep their directory layout and full file name (`a/guide.md`
/// becomes `a/guide.md.json`). Names still taken get a numeric suffix.
fn output_names(files: &[BatchInput]) -> Vec<PathBuf> {
    let mut taken = HashSet::new();
    files
        .iter()
        .map(|file| {
            let name = file
                .relative
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "output".to_string());
            let mut target = file.relative.with_file_name(format!("{}.json", name));
            let mut n = 2;
            while !taken.insert(target.clone()) {
                target = file.relative.with_file_name(format!("{}-{}.json", name, n));
                n += 1;
            }
            target
        })
        .collect()
}

fn cmd_batch(inputs: &[PathBuf], output: &Path, render: RenderOptions) -> CliResult {
    let mut files = Vec::new();
    for input in inputs {
        let root = if input.is_dir() {
            input.as_path()
        } else {
            input.parent().unwrap_or(Path::new(""))
        };
        collect_files(root, input, &mut files)?;
    }
    fs::create_dir_all(output)?;
    let targets = output_names(&files);

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message("Rendering...");
    let options = ConversionOptions::new().with_render_options(render);
    let paths: Vec<&Path> = files.iter().map(|f| f.path.as_path()).collect();
    let outcomes = render_batch_with(&paths, &options, |_| pb.inc(1));

    let mut failed = 0;
    let mut total = RenderStats::new();
    for (outcome, target) in outcomes.into_iter().zip(&targets) {
        match outcome.result {
            Ok((ops, stats)) => {
                let target = output.join(target);
                if let Some(parent) = target.parent() {
                    fs::create_dir_all(parent)?;
                }
                let json = serde_json::to_string_pretty(&ops)?;
                fs::write(&target, json)?;
                total.merge(&stats);
            }
            Err(e) => {
                failed += 1;
                pb.println(format!(
                    "{} {}: {}",
                    "Skipped".yellow(),
                    outcome.path.display(),
                    e
                ));
            }
        }
    }
    pb.finish_with_message("Done!");

    println!(
        "\n{} {} rendered, {} skipped",
        "Batch complete:".green().bold(),
        files.len() - failed,
        failed
    );
    println!(
        "  {} pages, {} headings, {} text blocks",
        total.page_count, total.heading_count, total.text_block_count
    );
    Ok(())
}

fn cmd_classify(input: &Path) -> CliResult {
    let text = fs::read_to_string(input)?;
    let mut state = ReconstructionState::default();

    for (idx, line) in text.lines().enumerate() {
        let (kind, next) = classify(line, state);
        state = next;
        let label = match kind {
            LineKind::Heading { .. } => kind.to_string().cyan(),
            LineKind::Bullet { .. } | LineKind::Numbered { .. } => kind.to_string().green(),
            LineKind::FenceToggle | LineKind::Passthrough => kind.to_string().yellow(),
            LineKind::Blank | LineKind::Plain => kind.to_string().dimmed(),
        };
        println!("{:>5} {:<14} {}", idx + 1, label, line);
    }

    if state.in_fence {
        println!("{}", "warning: input ends inside a code fence".yellow());
    }
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "pagemark".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Markdown to fixed-layout pages and back");
    println!();
    println!("License: MIT");
}
