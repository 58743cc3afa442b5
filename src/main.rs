use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use dmcat::{config::Config, render, server, DamageRecord, FilterOptions, FilterState, RecordStore};
use dmcat_core::{filter_records, is_displayable};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "dmcat", about = "Browse and filter a catalog of damage mechanisms")]
struct Cli {
    /// Data file to read instead of the configured candidates. Repeat to
    /// give fallbacks; the first readable one is used.
    #[arg(long = "data", global = true, value_name = "PATH")]
    data: Vec<PathBuf>,

    /// Log at debug level to stderr (RUST_LOG overrides).
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the mechanisms matching a filter.
    List {
        #[command(flatten)]
        filter: FilterArgs,
        /// Print matching records as a JSON array.
        #[arg(long)]
        json: bool,
    },
    /// Show one mechanism in full.
    Show {
        id: String,
        #[arg(long)]
        json: bool,
    },
    /// Print the filter values that occur in the catalog.
    Options {
        /// Only list grades for this category (exact match).
        #[arg(long)]
        category: Option<String>,
    },
    /// Serve the JSON API.
    Serve {
        /// Address to bind; defaults to `server.bind` from the config.
        #[arg(long)]
        bind: Option<String>,
    },
}

#[derive(Args)]
struct FilterArgs {
    /// Operating temperature in °C.
    #[arg(long, short = 't', allow_negative_numbers = true, value_parser = parse_temperature)]
    temperature: Option<f64>,
    /// Material category, e.g. "Carbon Steel".
    #[arg(long, short = 'c')]
    category: Option<String>,
    /// Material grade, e.g. "A516".
    #[arg(long, short = 'g')]
    grade: Option<String>,
    /// Damage morphology, e.g. "Cracking".
    #[arg(long, short = 'm')]
    morphology: Option<String>,
    /// Free-text search over id, names, summary, and description.
    #[arg(long, short = 'q', default_value = "")]
    query: String,
}

impl From<FilterArgs> for FilterState {
    fn from(args: FilterArgs) -> Self {
        FilterState {
            temperature: args.temperature,
            material_category: args.category,
            grade: args.grade,
            damage_morphology: args.morphology,
            text_query: args.query,
        }
    }
}

fn parse_temperature(raw: &str) -> Result<f64, String> {
    dmcat_core::query::parse_temperature(raw).ok_or_else(|| format!("not a finite number: {raw:?}"))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug, matches!(cli.command, Command::Serve { .. }));

    let config = Config::load().unwrap_or_else(|err| {
        tracing::warn!(error = %err, "config unreadable, using defaults");
        Config::defaults()
    });
    let store = if cli.data.is_empty() {
        RecordStore::from_config(&config.data)
    } else {
        RecordStore::new(cli.data)
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::List { filter, json } => {
            let filter = FilterState::from(filter);
            let records = store.load()?;
            let hits = filter_records(records, &filter);
            if json {
                serde_json::to_writer_pretty(&mut out, &hits)?;
                writeln!(out)?;
            } else {
                for record in hits.iter().copied().filter(|r| is_displayable(r)) {
                    render::write_summary(&mut out, record)?;
                    writeln!(out)?;
                }
                writeln!(out, "{} of {} mechanisms", hits.len(), records.len())?;
            }
        }
        Command::Show { id, json } => {
            let record: &DamageRecord = store
                .find(&id)?
                .with_context(|| format!("no damage mechanism with id {id:?}"))?;
            if json {
                serde_json::to_writer_pretty(&mut out, record)?;
                writeln!(out)?;
            } else {
                render::write_detail(&mut out, record)?;
            }
        }
        Command::Options { category } => {
            let options = FilterOptions::collect(store.load()?);
            write_options(&mut out, &options, category.as_deref())?;
        }
        Command::Serve { bind } => {
            drop(out);
            let addr = bind.unwrap_or(config.server.bind);
            tokio::runtime::Runtime::new()?.block_on(server::serve(Arc::new(store), &addr))?;
        }
    }
    Ok(())
}

fn write_options<W: Write>(w: &mut W, options: &FilterOptions, category: Option<&str>) -> std::io::Result<()> {
    let materials = &options.materials;
    match category {
        Some(category) => {
            writeln!(w, "grades for {category}:")?;
            for grade in materials.grades_for(category) {
                writeln!(w, "  {grade}")?;
            }
        }
        None => {
            writeln!(w, "categories:")?;
            for c in &materials.categories {
                let grades = materials.grades_for(c);
                if grades.is_empty() {
                    writeln!(w, "  {c}")?;
                } else {
                    writeln!(w, "  {c}: {}", grades.join(", "))?;
                }
            }
        }
    }
    writeln!(w, "damage morphologies:")?;
    for m in &options.damage_morphologies {
        writeln!(w, "  {m}")?;
    }
    Ok(())
}

fn init_logging(debug: bool, serving: bool) {
    let default = if debug {
        "debug"
    } else if serving {
        "info"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .init();
}
