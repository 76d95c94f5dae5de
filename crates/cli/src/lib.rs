use anyhow::{Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::env;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::sync::Arc;
use sweep_core::{filter, find_statements, preview, Dialect, ScanMethod, Sweeper};

use batch::{run_batch, WriteMode};
use flags::parse_dialect;
use path_filters::PathFilters;
use settings::{RemovalArgs, SettingsFile};
use walker::FileWalker;

mod batch;
mod flags;
mod output;
mod path_filters;
mod settings;
mod walker;

fn print_stdout(text: &str) -> Result<()> {
    write_stdout(text, true)
}

fn write_stdout(text: &str, newline: bool) -> Result<()> {
    use std::io::Write;

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| if newline { stdout.write_all(b"\n") } else { Ok(()) })
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    print_stdout(&serde_json::to_string_pretty(value)?)
}

#[derive(Parser)]
#[command(name = "debug-sweep")]
#[command(about = "Remove leftover debug statements from source files", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Settings file (default: ./debug-sweep.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Remove debug statements from files or stdin
    Clean(CleanArgs),

    /// Show what `clean` would remove from one file
    Preview(PreviewArgs),

    /// List every debug statement found in one file, removable or not
    Scan(ScanArgs),
}

#[derive(Args)]
struct CleanArgs {
    /// Files or directories to clean
    #[arg(default_value = ".")]
    paths: Vec<PathBuf>,

    /// Report changes without writing files
    #[arg(long)]
    dry_run: bool,

    /// Like --dry-run, but exit with status 1 when anything would change
    #[arg(long)]
    check: bool,

    /// Read one buffer from stdin and write the cleaned text to stdout
    #[arg(long)]
    stdin: bool,

    /// Dialect of the stdin buffer (name, editor language id or extension)
    #[arg(long, value_parser = parse_dialect)]
    dialect: Option<Dialect>,

    /// File name used to infer the dialect of the stdin buffer
    #[arg(long)]
    stdin_path: Option<String>,

    /// Print a JSON summary
    #[arg(long)]
    json: bool,

    /// Files processed concurrently (default: available cores)
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Only clean paths under this prefix or matching this glob (repeatable)
    #[arg(long)]
    include: Vec<String>,

    /// Skip paths under this prefix or matching this glob (repeatable)
    #[arg(long)]
    exclude: Vec<String>,

    #[command(flatten)]
    removal: RemovalArgs,
}

#[derive(Args)]
struct PreviewArgs {
    /// File to preview
    path: PathBuf,

    /// Override the dialect inferred from the extension
    #[arg(long, value_parser = parse_dialect)]
    dialect: Option<Dialect>,

    /// Print JSON
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    removal: RemovalArgs,
}

#[derive(Args)]
struct ScanArgs {
    /// File to scan
    path: PathBuf,

    /// Override the dialect inferred from the extension
    #[arg(long, value_parser = parse_dialect)]
    dialect: Option<Dialect>,

    /// Print JSON
    #[arg(long)]
    json: bool,
}

pub async fn main_entry() -> Result<()> {
    let mut cli = Cli::parse();

    let json_output = match &cli.command {
        Commands::Clean(args) => args.json,
        Commands::Preview(args) => args.json,
        Commands::Scan(args) => args.json,
    };
    if json_output {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let cwd = env::current_dir().context("Failed to resolve working directory")?;
    let settings = SettingsFile::load(cli.config.as_deref(), &cwd)?;

    match cli.command {
        Commands::Clean(args) => run_clean(args, settings).await?,
        Commands::Preview(args) => run_preview(args, &settings)?,
        Commands::Scan(args) => run_scan(args)?,
    }

    Ok(())
}

async fn run_clean(args: CleanArgs, settings: SettingsFile) -> Result<()> {
    let sweeper = args.removal.build_sweeper(&settings)?;

    if args.stdin {
        return run_clean_stdin(&args, &sweeper);
    }

    let mut include = settings.include.clone();
    include.extend(args.include.iter().cloned());
    let mut exclude = settings.exclude.clone();
    exclude.extend(args.exclude.iter().cloned());
    let filters = PathFilters::new(&include, &exclude)?;

    let files = FileWalker::new(&filters).collect(&args.paths);
    if files.is_empty() {
        log::info!("No files to clean");
    }

    let mode = if args.dry_run || args.check {
        WriteMode::DryRun
    } else {
        WriteMode::Write
    };
    let jobs = args
        .jobs
        .or(settings.jobs)
        .unwrap_or_else(|| std::thread::available_parallelism().map_or(1, |n| n.get()));

    let summary = run_batch(files, Arc::new(sweeper), mode, jobs).await?;

    if args.json {
        print_json(&summary)?;
    } else {
        print_stdout(&output::render_batch(&summary, mode))?;
    }

    if summary.cancelled || summary.errors > 0 || (args.check && summary.files_changed > 0) {
        std::process::exit(1);
    }
    Ok(())
}

fn run_clean_stdin(args: &CleanArgs, sweeper: &Sweeper) -> Result<()> {
    let mut text = String::new();
    io::stdin()
        .read_to_string(&mut text)
        .context("Failed to read stdin")?;

    let dialect = args
        .dialect
        .or_else(|| args.stdin_path.as_deref().map(Dialect::from_path))
        .unwrap_or(Dialect::Unknown);

    let outcome = sweeper.clean_with_dialect(&text, dialect);
    if let ScanMethod::Lexical { reason } = &outcome.method {
        log::info!(
            "stdin was scanned lexically ({reason}); matches inside strings or comments are possible"
        );
    }
    log::info!("{}", outcome.report);

    if args.json {
        print_json(&outcome)?;
    } else if !args.check {
        write_stdout(&outcome.result.clean_text, false)?;
    }

    if args.check && outcome.is_changed() {
        std::process::exit(1);
    }
    Ok(())
}

fn run_preview(args: PreviewArgs, settings: &SettingsFile) -> Result<()> {
    let sweeper = args.removal.build_sweeper(settings)?;
    let text = fs::read_to_string(&args.path)
        .with_context(|| format!("Failed to read {}", args.path.display()))?;
    let dialect = args
        .dialect
        .unwrap_or_else(|| Dialect::from_path(&args.path));

    let outcome = find_statements(&text, dialect);
    if let ScanMethod::Lexical { reason } = &outcome.method {
        log::info!(
            "{} was scanned lexically ({reason}); matches inside strings or comments are possible",
            args.path.display()
        );
    }

    let eligible = filter(&outcome.statements, sweeper.config());
    let entries = preview(&text, &eligible);
    let path = args.path.display().to_string();

    if args.json {
        print_json(&output::PreviewOutput {
            path,
            dialect,
            method: &outcome.method,
            entries: &entries,
        })
    } else {
        print_stdout(&output::render_preview(&path, &entries))
    }
}

fn run_scan(args: ScanArgs) -> Result<()> {
    let text = fs::read_to_string(&args.path)
        .with_context(|| format!("Failed to read {}", args.path.display()))?;
    let dialect = args
        .dialect
        .unwrap_or_else(|| Dialect::from_path(&args.path));

    let outcome = find_statements(&text, dialect);
    let path = args.path.display().to_string();

    if args.json {
        print_json(&output::ScanOutput {
            path,
            dialect,
            outcome: &outcome,
        })
    } else {
        print_stdout(&output::render_scan(&path, &outcome))
    }
}
