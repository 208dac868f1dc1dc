mod browse;
mod render;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use clap::builder::RangedU64ValueParser;
use pandemic_types::{Dataset, EraFilter, PandemicRecord, Stats, views};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_EXPORT: &str = "output/pandemics.json";

#[derive(Parser)]
#[command(
    name = "pandemic_atlas",
    about = "Historical pandemics: filters, timeline and ranking"
)]
struct Cli {
    /// Load the dataset from a JSON file instead of the built-in one
    #[arg(long, global = true, env = "PANDEMIC_DATA")]
    data: Option<PathBuf>,
    /// Print views as JSON
    #[arg(long, global = true)]
    json: bool,
    /// Log at info level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Cards in dataset order, optionally narrowed to one era
    List {
        /// Era label, e.g. "14 век"; "all" keeps every record
        #[arg(long, default_value = EraFilter::ALL_LABEL)]
        era: String,
    },
    /// Era filter labels in first-appearance order
    Eras,
    /// Record count, total deaths and unique regions
    Stats,
    /// Every record by year of onset
    Timeline {
        #[arg(long, default_value_t = render::DEFAULT_BAR_WIDTH, value_parser = width_parser())]
        width: usize,
    },
    /// Every record by death toll, largest first
    Ranking {
        #[arg(long, default_value_t = render::DEFAULT_BAR_WIDTH, value_parser = width_parser())]
        width: usize,
    },
    /// Full detail for one record, by id or exact name
    Show { key: String },
    /// Write the dataset as JSON
    Export {
        #[arg(long, default_value = DEFAULT_EXPORT)]
        out: PathBuf,
    },
    /// Interactive browser on stdin
    Browse {
        #[arg(long, default_value_t = render::DEFAULT_BAR_WIDTH, value_parser = width_parser())]
        width: usize,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let dataset = load_dataset(cli.data.as_deref())?;
    let json = cli.json;

    match cli.command {
        Some(Command::List { era }) => run_list(&dataset, &era, json),
        Some(Command::Eras) => run_eras(&dataset, json),
        Some(Command::Stats) => run_stats(&dataset, json),
        Some(Command::Timeline { width }) => run_timeline(&dataset, width, json),
        Some(Command::Ranking { width }) => run_ranking(&dataset, width, json),
        Some(Command::Show { key }) => run_show(&dataset, &key, json),
        Some(Command::Export { out }) => run_export(&dataset, &out),
        Some(Command::Browse { width }) => run_browse(&dataset, width),
        None => run_overview(&dataset, json),
    }
}

fn width_parser() -> RangedU64ValueParser<usize> {
    RangedU64ValueParser::new().range(0..=render::MAX_BAR_WIDTH as u64)
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "pandemic_atlas=info"
    } else {
        "pandemic_atlas=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

// ═══════════════════════════════════════════════════════════════════════
//  DATASET + OUTPUT HELPERS
// ═══════════════════════════════════════════════════════════════════════

fn load_dataset(path: Option<&Path>) -> anyhow::Result<Dataset> {
    let dataset = match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("cannot read {}", path.display()))?;
            Dataset::from_json(&json)
                .with_context(|| format!("invalid dataset {}", path.display()))?
        }
        None => Dataset::builtin().context("built-in dataset is invalid")?,
    };
    info!(records = dataset.len(), "dataset loaded");
    Ok(dataset)
}

fn print_json<T: serde::Serialize>(data: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(data).context("JSON serialization failed")?;
    println!("{json}");
    Ok(())
}

fn print_text(text: &str) -> anyhow::Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════
//  VIEWS
// ═══════════════════════════════════════════════════════════════════════

/// The landing page: stats and every card.
#[derive(Serialize)]
struct Overview<'a> {
    stats: Stats,
    records: Vec<&'a PandemicRecord>,
}

impl<'a> Overview<'a> {
    fn new(dataset: &'a Dataset) -> Self {
        Self {
            stats: Stats::compute(dataset),
            records: views::filtered(dataset, &EraFilter::All),
        }
    }
}

fn run_overview(dataset: &Dataset, json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(&Overview::new(dataset));
    }
    run_stats(dataset, false)?;
    run_list(dataset, EraFilter::ALL_LABEL, false)
}

fn run_list(dataset: &Dataset, era: &str, json: bool) -> anyhow::Result<()> {
    let filter = EraFilter::parse(dataset, era)?;
    let records = views::filtered(dataset, &filter);
    debug!(era = filter.label(), shown = records.len(), "list");
    if json {
        return print_json(&records);
    }
    print_text(&render::render_eras(&views::era_filters(dataset), &filter))?;
    println!();
    print_text(&render::render_cards(&records))
}

fn run_eras(dataset: &Dataset, json: bool) -> anyhow::Result<()> {
    let labels: Vec<String> = views::era_filters(dataset)
        .iter()
        .map(|f| f.label().to_string())
        .collect();
    if json {
        return print_json(&labels);
    }
    for label in labels {
        println!("{label}");
    }
    Ok(())
}

fn run_stats(dataset: &Dataset, json: bool) -> anyhow::Result<()> {
    let stats = Stats::compute(dataset);
    if json {
        return print_json(&stats);
    }
    print_text(&render::render_stats(&stats))
}

fn run_timeline(dataset: &Dataset, width: usize, json: bool) -> anyhow::Result<()> {
    let points = views::timeline(dataset);
    if json {
        return print_json(&points);
    }
    print_text(&render::render_timeline(&points, width))
}

fn run_ranking(dataset: &Dataset, width: usize, json: bool) -> anyhow::Result<()> {
    let entries = views::ranking_with_bars(dataset);
    if json {
        return print_json(&entries);
    }
    print_text(&render::render_ranking(&entries, width))
}

fn run_show(dataset: &Dataset, key: &str, json: bool) -> anyhow::Result<()> {
    let record = dataset
        .find(key)
        .with_context(|| format!("no record with id or name {key:?}"))?;
    if json {
        return print_json(record);
    }
    print_text(&render::render_detail(record))
}

// ═══════════════════════════════════════════════════════════════════════
//  EXPORT + BROWSE
// ═══════════════════════════════════════════════════════════════════════

fn run_export(dataset: &Dataset, out: &Path) -> anyhow::Result<()> {
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("cannot create {}", parent.display()))?;
    }
    let json = dataset.to_json_pretty()?;
    std::fs::write(out, &json).with_context(|| format!("cannot write {}", out.display()))?;
    info!(path = %out.display(), bytes = json.len(), "dataset exported");
    eprintln!("  {} ({} bytes)", out.display(), json.len());
    Ok(())
}

fn run_browse(dataset: &Dataset, width: usize) -> anyhow::Result<()> {
    let stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();
    let state = browse::run(dataset, stdin, &mut stdout, width)?;
    debug!(?state, "browse finished");
    Ok(())
}
