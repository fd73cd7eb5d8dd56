//! `schubert`: reflection-path calculations and maximal-point reports.

mod render;

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use schubert_core::{parse_point, parse_value, Point};
use schubert_explore::census::{arrangements, comparability_census};
use schubert_explore::{dedup_points, maximal_points, CalculatorConfig, ReflectionCalculator};

#[derive(Parser, Debug)]
#[command(name = "schubert")]
#[command(about = "Enumerate reflection paths of signed-value points and report maximal points")]
struct Cli {
    /// JSON calculator config; missing fields use defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Emit JSON instead of TeX trace text
    #[arg(long, global = true)]
    json: bool,
    /// Write to this file instead of stdout
    #[arg(long, short, global = true)]
    output: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate every composition of a degree against (1 | 2 | ... | n)
    Degree { degree: usize },
    /// Evaluate the orderings of one composition against a given point
    Composition {
        /// Base point, e.g. "(1|2|3)"
        point: String,
        /// Run lengths, e.g. 1 1 2
        #[arg(required = true)]
        runs: Vec<usize>,
    },
    /// Maximal elements of the given points
    Maximal {
        #[arg(required = true)]
        points: Vec<String>,
    },
    /// Relation between two points
    Compare { left: String, right: String },
    /// Pairwise comparability of every arrangement of a value pool
    Census {
        /// Comma-separated values, e.g. 1,2,3,4b
        #[arg(long, value_delimiter = ',', required = true)]
        pool: Vec<String>,
        #[arg(long)]
        arity: usize,
        /// Only list incomparable pairs whose first slots both hold this value
        #[arg(long)]
        leading: Option<String>,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let text = run(&cli)?;
    write_output(cli.output.as_deref(), &text)
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(env_filter)
        .init();
}

fn run(cli: &Cli) -> Result<String> {
    let config = load_config(cli.config.as_deref())?;
    match &cli.command {
        Commands::Degree { degree } => {
            let calculation = ReflectionCalculator::for_degree(*degree, config)
                .and_then(|calc| calc.calculate_all())
                .with_context(|| format!("calculating degree {degree}"))?;
            render::calculation(&calculation, cli.json)
        }
        Commands::Composition { point, runs } => {
            let base = parse_point(point).with_context(|| format!("parsing base point {point:?}"))?;
            let calculation = ReflectionCalculator::new(base, config)
                .calculate_composition(runs)
                .with_context(|| format!("calculating composition {runs:?}"))?;
            render::calculation(&calculation, cli.json)
        }
        Commands::Maximal { points } => {
            let points = dedup_points(parse_points(points)?);
            let maximal = maximal_points(&points).context("filtering maximal points")?;
            render::points(&maximal, cli.json)
        }
        Commands::Compare { left, right } => {
            let (a, b) = (parse_one(left)?, parse_one(right)?);
            let relation = a.compare(&b).context("comparing points")?;
            render::relation(&a, &b, relation, cli.json)
        }
        Commands::Census {
            pool,
            arity,
            leading,
        } => {
            let pool = pool
                .iter()
                .map(|v| parse_value(v).with_context(|| format!("parsing pool value {v:?}")))
                .collect::<Result<Vec<_>>>()?;
            let leading = leading
                .as_deref()
                .map(|v| parse_value(v).with_context(|| format!("parsing leading value {v:?}")))
                .transpose()?;
            let points = arrangements(&pool, *arity).context("building arrangements")?;
            tracing::info!(points = points.len(), "running comparability census");
            let census = comparability_census(&points).context("comparing arrangements")?;
            render::census(&census, leading, cli.json)
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<CalculatorConfig> {
    let Some(path) = path else {
        return Ok(CalculatorConfig::default());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config = CalculatorConfig::from_json(&json)
        .with_context(|| format!("parsing config {}", path.display()))?;
    tracing::debug!(?config, path = %path.display(), "loaded config");
    Ok(config)
}

fn parse_one(text: &str) -> Result<Point> {
    parse_point(text).with_context(|| format!("parsing point {text:?}"))
}

fn parse_points(texts: &[String]) -> Result<Vec<Point>> {
    texts.iter().map(|t| parse_one(t)).collect()
}

fn write_output(path: Option<&Path>, text: &str) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote output");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
