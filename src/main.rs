use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use folio::config::{self, SiteConfig};
use folio::content::{self, ContentManifest};
use folio::fetch::{self, SanityClient};
use folio::generate::{self, GeneratedSite};
use folio::migrate::{self, DocumentSink, DryRun};
use folio::output;
use std::path::{Path, PathBuf};

/// Shared flags for commands that write the site.
#[derive(clap::Args, Clone)]
struct BuildArgs {
    /// Send a Pushover notification when the build finishes
    #[arg(long)]
    notify: bool,
}

#[derive(clap::Args, Clone)]
struct MigrateArgs {
    /// Directory holding events.json, talks.json and testimonials.json
    #[arg(long)]
    fixtures: PathBuf,

    /// Print the documents instead of creating them
    #[arg(long)]
    dry_run: bool,
}

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Content pipeline and static site generator for a speaker portfolio")]
#[command(long_about = "\
Content pipeline and static site generator for a speaker portfolio

Documents live in a hosted headless CMS and are read with GROQ queries.
GitHub repositories, Medium and Contentful posts are pulled in next to them.
Everything lands in one JSON content manifest, which is then rendered into
a static site.

Pipeline:

  1. fetch      CMS + APIs  →  .folio-temp/content.json
  2. generate   manifest    →  dist/

Generated site:

  dist/
  ├── index.html                   # Hero, metrics, upcoming events, featured talks
  ├── events/index.html            # Upcoming and past events
  ├── talks/<slug>/index.html      # Talk page with table of contents and video
  ├── workshops/<slug>/index.html
  ├── projects/index.html          # Projects with GitHub stars
  ├── writing/index.html           # External posts, newest first
  ├── about/index.html
  ├── 404.html
  ├── rss.xml
  └── sitemap.xml

Secrets (CMS write token, Contentful and Pushover keys) are read from the
environment variables named in the config, never from the file itself.

Run 'folio gen-config' to generate a documented folio.toml.")]
#[command(version)]
struct Cli {
    /// Site config file
    #[arg(long, default_value = "folio.toml", global = true)]
    config: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory for intermediate files (content manifest)
    #[arg(long, default_value = ".folio-temp", global = true)]
    temp_dir: PathBuf,

    /// Date used to split upcoming from past events (default: today)
    #[arg(long, global = true, value_name = "YYYY-MM-DD")]
    today: Option<NaiveDate>,

    /// More log output (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch CMS documents and third-party data into the content manifest
    Fetch,
    /// Render the site from the content manifest
    Generate,
    /// Run the full pipeline: fetch → generate
    Build(BuildArgs),
    /// Fetch and report the content inventory without writing anything
    Check,
    /// Create CMS documents from legacy JSON fixtures
    Migrate(MigrateArgs),
    /// Print a stock folio.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let today = cli
        .today
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let manifest_path = cli.temp_dir.join("content.json");

    match &cli.command {
        Command::Fetch => {
            let config = config::load_config(&cli.config)?;
            let manifest = content::fetch(&config)?;
            std::fs::create_dir_all(&cli.temp_dir)?;
            content::write_manifest(&manifest, &manifest_path)?;
            output::print_fetch_output(&manifest);
        }
        Command::Generate => {
            let manifest = content::read_manifest(&manifest_path)?;
            let site = run_generate(&cli, &manifest, today)?;
            output::print_generate_output(&site);
        }
        Command::Build(args) => {
            let config = config::load_config(&cli.config)?;
            let result = run_build(&cli, &config, &manifest_path, today);
            if args.notify {
                send_build_notification(&config, &result);
            }
            let site = result?;
            println!(
                "==> Build complete: {} ({} pages)",
                cli.output.display(),
                site.pages.len()
            );
        }
        Command::Check => {
            let config = config::load_config(&cli.config)?;
            println!("==> Checking content for {}", config.site.title);
            let manifest = content::fetch(&config)?;
            let problems = content::find_dangling_references(&manifest);
            output::print_check_output(&manifest, &problems);
        }
        Command::Migrate(args) => {
            let config = config::load_config(&cli.config)?;
            let fixtures = migrate::load_fixtures(&args.fixtures)?;
            println!(
                "==> Migrating {} records from {}",
                fixtures.len(),
                args.fixtures.display()
            );
            let http;
            let mut sink: Box<dyn DocumentSink + '_> = if args.dry_run {
                Box::new(DryRun::new(std::io::stdout()))
            } else {
                let token = config::secret(&config.cms.token_env).ok_or_else(|| {
                    format!(
                        "migration needs a CMS write token in ${}",
                        config.cms.token_env
                    )
                })?;
                http = fetch::http_client(&config.http)?;
                Box::new(SanityClient::with_token(&http, &config.cms, Some(token)))
            };
            let report = migrate::migrate(&fixtures, sink.as_mut());
            output::print_migration_report(&report);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Install the logger. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn run_build(
    cli: &Cli,
    config: &SiteConfig,
    manifest_path: &Path,
    today: NaiveDate,
) -> Result<GeneratedSite, Box<dyn std::error::Error>> {
    std::fs::create_dir_all(&cli.temp_dir)?;

    println!("==> Stage 1: Fetching content");
    let manifest = content::fetch(config)?;
    content::write_manifest(&manifest, manifest_path)?;
    output::print_fetch_output(&manifest);

    println!("==> Stage 2: Generating HTML → {}", cli.output.display());
    let site = run_generate(cli, &manifest, today)?;
    output::print_generate_output(&site);
    Ok(site)
}

fn run_generate(
    cli: &Cli,
    manifest: &ContentManifest,
    today: NaiveDate,
) -> Result<GeneratedSite, generate::GenerateError> {
    let assets_dir = resolve_assets_dir(&cli.config, &manifest.config.site.assets_dir);
    generate::generate(manifest, &cli.output, &assets_dir, today)
}

/// `site.assets_dir` is relative to the directory holding the config file.
fn resolve_assets_dir(config_path: &Path, assets_dir: &str) -> PathBuf {
    let assets = Path::new(assets_dir);
    if assets.is_absolute() {
        return assets.to_path_buf();
    }
    match config_path.parent() {
        Some(parent) => parent.join(assets),
        None => assets.to_path_buf(),
    }
}

fn send_build_notification(
    config: &SiteConfig,
    result: &Result<GeneratedSite, Box<dyn std::error::Error>>,
) {
    let message = match result {
        Ok(site) => format!("{} pages generated", site.pages.len()),
        Err(e) => format!("build failed: {e}"),
    };
    match fetch::http_client(&config.http) {
        Ok(http) => {
            let title = format!("{} build", config.site.title);
            fetch::pushover::notify(&http, &config.pushover, &title, &message);
        }
        Err(e) => log::warn!("Pushover notification skipped: {e}"),
    }
}
