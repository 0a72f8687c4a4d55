//! Command line entry point for the company registry scraper

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use tracing::info;

use corp_registry_lib::application::{
    render_detail_report, render_portfolio_report, render_summary_table, CompanyLookupService,
};
use corp_registry_lib::domain::{CompanyDetail, CompanySummary};
use corp_registry_lib::infrastructure::{
    export_detail, export_portfolio, export_summaries, init_logging_with_config, AppConfig, ConfigManager,
    ExportError, HttpPageFetcher, PageFetcher,
};

/// CLI arguments
#[derive(Parser, Debug)]
#[command(name = "corp-registry")]
#[command(version, about = "Look up companies on a public company registry", long_about = None)]
struct Cli {
    /// Configuration file (JSON, TOML or YAML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the configured log level
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct ExportArgs {
    /// Write the results to files
    #[arg(long)]
    export: bool,

    /// Output directory, defaults to the configured export directory
    #[arg(long, requires = "export")]
    out_dir: Option<PathBuf>,
}

impl ExportArgs {
    fn directory(self, config: &AppConfig) -> Option<PathBuf> {
        self.export
            .then(|| self.out_dir.unwrap_or_else(|| config.export.output_dir.clone()))
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search companies by name (several names run one after another)
    Search {
        #[arg(required = true)]
        names: Vec<String>,

        /// Maximum results per name
        #[arg(short, long)]
        max: Option<usize>,

        #[command(flatten)]
        export: ExportArgs,
    },

    /// Fetch and show a company detail page
    Detail {
        url: String,

        #[command(flatten)]
        export: ExportArgs,
    },

    /// Search, then show the detail page of one result
    Lookup {
        name: String,

        /// 1-based row of the search result to open
        #[arg(short, long)]
        pick: usize,

        #[arg(short, long)]
        max: Option<usize>,

        #[command(flatten)]
        export: ExportArgs,
    },

    /// Search several names, fetch the detail pages and summarize them
    Analyze {
        #[arg(required = true)]
        names: Vec<String>,

        /// Maximum results per name
        #[arg(short, long)]
        max: Option<usize>,

        /// Maximum detail pages to fetch
        #[arg(long, default_value_t = 50)]
        max_details: usize,

        #[command(flatten)]
        export: ExportArgs,
    },

    /// Parse a saved search results page
    ParseSearch {
        file: PathBuf,

        #[arg(short, long)]
        max: Option<usize>,
    },

    /// Parse a saved company detail page
    ParseDetail {
        file: PathBuf,

        /// Page URL, used in log messages
        #[arg(long)]
        url: Option<String>,

        /// Print the record as JSON instead of a report
        #[arg(long)]
        json: bool,
    },

    /// Write the default configuration file
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

async fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    if let Some(path) = path {
        return AppConfig::from_file(path).with_context(|| format!("Failed to load {:?}", path));
    }

    let manager = ConfigManager::new()?;
    if tokio::fs::try_exists(manager.config_path()).await.unwrap_or(false) {
        manager.load_config().await
    } else {
        Ok(AppConfig::load(None)?)
    }
}

fn print_summaries(summaries: &[CompanySummary], search_term: &str, export: Option<&Path>) -> Result<()> {
    print!("{}", render_summary_table(summaries));
    if let Some(dir) = export {
        if !summaries.is_empty() {
            let path = export_summaries(summaries, search_term, dir, &Local::now())?;
            println!("Results exported to: {}", path.display());
        }
    }
    Ok(())
}

fn print_detail(detail: &CompanyDetail, company_name: &str, export: Option<&Path>) -> Result<()> {
    print!("{}", render_detail_report(detail));
    if let Some(dir) = export {
        match export_detail(detail, company_name, dir, &Local::now()) {
            Ok(files) => {
                println!("Detailed information exported to: {}", files.json.display());
                println!("Data also exported to CSV: {}", files.csv.display());
            }
            Err(ExportError::NothingToExport) => println!("No detailed information to export"),
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

async fn run<F: PageFetcher>(
    service: &CompanyLookupService<F>,
    config: &AppConfig,
    command: Command,
) -> Result<()> {
    match command {
        Command::Search { names, max, export } => {
            let export = export.directory(config);
            let max = max.unwrap_or_else(|| service.default_max_results());
            if let [name] = names.as_slice() {
                let summaries = service.search(name, max).await;
                print_summaries(&summaries, name, export.as_deref())?;
            } else {
                let hits = service.batch_search(&names, max).await;
                for name in &names {
                    let summaries: Vec<CompanySummary> = hits
                        .iter()
                        .filter(|hit| &hit.search_term == name)
                        .map(|hit| hit.summary.clone())
                        .collect();
                    println!("\n>>> {name}");
                    print_summaries(&summaries, name, export.as_deref())?;
                }
            }
        }
        Command::Detail { url, export } => {
            let export = export.directory(config);
            let Some(detail) = service.detail(&url).await else {
                bail!("Could not fetch detailed information from {url}");
            };
            let name = detail.display_name().unwrap_or("company").to_string();
            print_detail(&detail, &name, export.as_deref())?;
        }
        Command::Lookup {
            name,
            pick,
            max,
            export,
        } => {
            let export = export.directory(config);
            let max = max.unwrap_or_else(|| service.default_max_results());
            let summaries = service.search(&name, max).await;
            print!("{}", render_summary_table(&summaries));

            let Some(selected) = pick.checked_sub(1).and_then(|index| summaries.get(index)) else {
                bail!("Please pick a number between 1 and {}", summaries.len());
            };
            info!("Getting detailed information for: {}", selected.name);

            let Some(detail) = service.detail_for(selected).await else {
                bail!("Could not fetch detailed information for {}", selected.name);
            };
            print_detail(&detail, &selected.name, export.as_deref())?;
        }
        Command::Analyze {
            names,
            max,
            max_details,
            export,
        } => {
            let export = export.directory(config);
            let max = max.unwrap_or_else(|| service.default_max_results());
            let hits = service.batch_search(&names, max).await;
            println!("Batch search complete: {} total companies found", hits.len());

            let batch = service.batch_details(&hits, max_details).await;
            let summary = batch.summary();
            print!("{}", render_portfolio_report(&summary));

            if let Some(dir) = export.as_deref() {
                if !batch.profiles.is_empty() {
                    let files = export_portfolio(&batch.profiles, &summary, dir, &Local::now())?;
                    println!("Data saved to: {}", files.json.display());
                    println!("Flattened data exported to: {}", files.csv.display());
                }
            }
        }
        Command::ParseSearch { file, max } => {
            let html = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("Failed to read {:?}", file))?;
            let summaries = service.parse_search_page(&html, max.unwrap_or_else(|| service.default_max_results()));
            print!("{}", render_summary_table(&summaries));
        }
        Command::ParseDetail { file, url, json } => {
            let html = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("Failed to read {:?}", file))?;
            let detail = service.parse_detail_page(&html, url.as_deref())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&detail)?);
            } else {
                print!("{}", render_detail_report(&detail));
            }
        }
        Command::InitConfig { force } => init_config(force).await?,
    }
    Ok(())
}

async fn init_config(force: bool) -> Result<()> {
    let manager = ConfigManager::new()?;
    if !force && tokio::fs::try_exists(manager.config_path()).await.unwrap_or(false) {
        println!("Configuration already exists: {}", manager.config_path().display());
        return Ok(());
    }
    manager.reset_to_defaults().await?;
    println!("Wrote default configuration: {}", manager.config_path().display());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Command::InitConfig { force } = cli.command {
        return init_config(force).await;
    }

    let mut config = load_config(cli.config.as_deref()).await?;
    if let Some(level) = cli.log_level {
        config.logging.level = level;
        config.validate()?;
    }
    let _log_guard = init_logging_with_config(&config.logging)?;

    let fetcher = HttpPageFetcher::with_config(&config.fetcher)?;
    let service = CompanyLookupService::new(fetcher, &config)?;
    run(&service, &config, cli.command).await
}
