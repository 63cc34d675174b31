use clap::{Args, Parser, Subcommand, ValueEnum, ValueHint};
use serde::Serialize;
use std::error::Error;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use w33_core::cliques::{maximal_cliques, maximum_clique, maximum_coclique, sampled_coclique};
use w33_core::graph::{Graph, SrgParams};
use w33_core::spectrum::{
    cluster_eigenvalues, exact_spectrum, minimal_polynomial_identity_holds, numeric_spectrum,
    quadratic_identity_holds, SrgSpectrum,
};
use w33_core::spreads::{enumerate_spreads, SPREAD_SIZE};
use w33_core::summary::W33Summary;
use w33_core::symplectic::Quadrangle;
use w33_mub::{spread_bases, worst_spread_deviation};

type DynError = Box<dyn Error>;

type Result<T> = std::result::Result<T, DynError>;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Exploration driver for the W(3,3) symplectic quadrangle over GF(3)"
)]
struct Cli {
    /// Write the artifact to this path instead of STDOUT
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    output: Option<PathBuf>,

    /// Pretty-print JSON artifacts
    #[arg(long, global = true)]
    pretty: bool,

    /// Seed override for the randomised searches
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Collect the full invariant summary, optionally with MUB verification extras
    Summary(SummaryArgs),

    /// Compare the exact SRG spectrum against the numeric eigensolver
    Spectrum(SpectrumArgs),

    /// Enumerate maximal cliques and report the clique number
    Cliques(CliquesArgs),

    /// Run the exact and seeded-greedy maximum coclique searches
    Cocliques(CocliquesArgs),

    /// Enumerate the spreads of the quadrangle
    Spreads(SpreadsArgs),

    /// Build a spread's eigenbases and verify mutual unbiasedness
    Mub(MubArgs),

    /// Emit an adjacency matrix as JSON or CSV
    Adjacency(AdjacencyArgs),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum GraphChoice {
    /// Collinearity graph on the 40 points
    Point,
    /// Intersection graph on the 40 lines
    Line,
}

impl GraphChoice {
    fn label(self) -> &'static str {
        match self {
            GraphChoice::Point => "point",
            GraphChoice::Line => "line",
        }
    }

    fn build(self, gq: &Quadrangle) -> Graph {
        match self {
            GraphChoice::Point => Graph::collinearity(gq),
            GraphChoice::Line => Graph::line_intersection(gq),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum MatrixFormat {
    Json,
    Csv,
}

#[derive(Args)]
struct SummaryArgs {
    /// Skip the MUB construction and report core invariants only
    #[arg(long)]
    skip_mub: bool,

    /// Unbiasedness tolerance recorded in the MUB extras
    #[arg(long, default_value_t = 1e-9)]
    tolerance: f64,
}

#[derive(Args)]
struct SpectrumArgs {
    /// Which graph to analyse
    #[arg(long, value_enum, default_value = "point")]
    graph: GraphChoice,

    /// Clustering tolerance for the numeric eigenvalues
    #[arg(long, default_value_t = 1e-6)]
    tolerance: f64,
}

#[derive(Args)]
struct CliquesArgs {
    /// Which graph to search
    #[arg(long, value_enum, default_value = "point")]
    graph: GraphChoice,
}

#[derive(Args)]
struct CocliquesArgs {
    /// Which graph to search
    #[arg(long, value_enum, default_value = "point")]
    graph: GraphChoice,

    /// Number of greedy restarts to sample
    #[arg(long, default_value_t = 64)]
    restarts: usize,
}

#[derive(Args)]
struct SpreadsArgs {
    /// How many sample spreads to include in the artifact
    #[arg(long, default_value_t = 1)]
    samples: usize,
}

#[derive(Args)]
struct MubArgs {
    /// Index of the spread whose bases are built
    #[arg(long, default_value_t = 0)]
    spread: usize,

    /// Unbiasedness tolerance
    #[arg(long, default_value_t = 1e-9)]
    tolerance: f64,
}

#[derive(Args)]
struct AdjacencyArgs {
    /// Which graph to emit
    #[arg(long, value_enum, default_value = "point")]
    graph: GraphChoice,

    /// Artifact format
    #[arg(long, value_enum, default_value = "json")]
    format: MatrixFormat,
}

#[derive(Serialize)]
struct ClusterEntry {
    value: f64,
    multiplicity: usize,
}

#[derive(Serialize)]
struct SpectrumReport {
    graph: String,
    params: SrgParams,
    exact: SrgSpectrum,
    clusters: Vec<ClusterEntry>,
    quadratic_identity: bool,
    minimal_polynomial_identity: bool,
}

#[derive(Serialize)]
struct CliquesReport {
    graph: String,
    maximal_count: usize,
    clique_number: usize,
    maximum: Vec<usize>,
}

#[derive(Serialize)]
struct CocliquesReport {
    graph: String,
    exact_size: usize,
    exact: Vec<usize>,
    sampled_size: usize,
    sampled: Vec<usize>,
    restarts: usize,
}

#[derive(Serialize)]
struct SpreadsReport {
    count: usize,
    lines_per_spread: usize,
    samples: Vec<Vec<usize>>,
}

#[derive(Serialize)]
struct MubReport {
    spread: usize,
    lines: Vec<usize>,
    bases: usize,
    orthonormality_defect: f64,
    worst_deviation: f64,
    pairwise_unbiased: bool,
}

#[derive(Serialize)]
struct AdjacencyReport {
    graph: String,
    order: usize,
    matrix: Vec<Vec<i64>>,
}

fn main() {
    if let Err(err) = try_main() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn try_main() -> Result<()> {
    w33_config::tracing::ensure_tracing();
    let cli = Cli::parse();
    match &cli.command {
        Command::Summary(args) => run_summary(&cli, args),
        Command::Spectrum(args) => run_spectrum(&cli, args),
        Command::Cliques(args) => run_cliques(&cli, args),
        Command::Cocliques(args) => run_cocliques(&cli, args),
        Command::Spreads(args) => run_spreads(&cli, args),
        Command::Mub(args) => run_mub(&cli, args),
        Command::Adjacency(args) => run_adjacency(&cli, args),
    }
}

fn run_summary(cli: &Cli, args: &SummaryArgs) -> Result<()> {
    let gq = Quadrangle::build();
    let mut summary = W33Summary::collect(&gq)?;
    if !args.skip_mub {
        let spreads = enumerate_spreads(&gq);
        let spread = spreads
            .first()
            .ok_or("the quadrangle has no spread to verify")?;
        let bases = spread_bases(&gq, spread)?;
        let worst = worst_spread_deviation(&bases);
        summary.insert_extra_number("mub_bases", bases.len() as f64);
        summary.insert_extra_number("mub_worst_deviation", worst);
        summary.insert_extra_flag("mub_pairwise_unbiased", worst <= args.tolerance);
    }
    emit_json(cli, &summary)
}

fn run_spectrum(cli: &Cli, args: &SpectrumArgs) -> Result<()> {
    let gq = Quadrangle::build();
    let graph = args.graph.build(&gq);
    let params = graph
        .srg_params()
        .ok_or("the requested graph is not strongly regular")?;
    let exact =
        exact_spectrum(params).ok_or("the SRG parameters do not give an integer spectrum")?;
    let values = numeric_spectrum(&graph);
    let clusters = cluster_eigenvalues(&values, args.tolerance)
        .into_iter()
        .map(|(value, multiplicity)| ClusterEntry {
            value,
            multiplicity,
        })
        .collect();

    let report = SpectrumReport {
        graph: args.graph.label().to_string(),
        params,
        exact,
        clusters,
        quadratic_identity: quadratic_identity_holds(&graph, params),
        minimal_polynomial_identity: minimal_polynomial_identity_holds(&graph, exact, params.mu),
    };
    emit_json(cli, &report)
}

fn run_cliques(cli: &Cli, args: &CliquesArgs) -> Result<()> {
    let gq = Quadrangle::build();
    let graph = args.graph.build(&gq);
    let maximal = maximal_cliques(&graph);
    let mut maximum = maximum_clique(&graph);
    maximum.sort_unstable();

    let report = CliquesReport {
        graph: args.graph.label().to_string(),
        maximal_count: maximal.len(),
        clique_number: maximum.len(),
        maximum,
    };
    emit_json(cli, &report)
}

fn run_cocliques(cli: &Cli, args: &CocliquesArgs) -> Result<()> {
    let gq = Quadrangle::build();
    let graph = args.graph.build(&gq);
    let mut exact = maximum_coclique(&graph);
    exact.sort_unstable();
    let mut sampled = sampled_coclique(&graph, args.restarts, cli.seed);
    sampled.sort_unstable();

    let report = CocliquesReport {
        graph: args.graph.label().to_string(),
        exact_size: exact.len(),
        exact,
        sampled_size: sampled.len(),
        sampled,
        restarts: args.restarts,
    };
    emit_json(cli, &report)
}

fn run_spreads(cli: &Cli, args: &SpreadsArgs) -> Result<()> {
    let gq = Quadrangle::build();
    let spreads = enumerate_spreads(&gq);
    let samples = spreads
        .iter()
        .take(args.samples)
        .map(|spread| spread.lines().iter().map(|line| line.index()).collect())
        .collect();

    let report = SpreadsReport {
        count: spreads.len(),
        lines_per_spread: SPREAD_SIZE,
        samples,
    };
    emit_json(cli, &report)
}

fn run_mub(cli: &Cli, args: &MubArgs) -> Result<()> {
    let gq = Quadrangle::build();
    let spreads = enumerate_spreads(&gq);
    let spread = spreads.get(args.spread).ok_or_else(|| {
        format!(
            "spread index {} out of range (0..{})",
            args.spread,
            spreads.len()
        )
    })?;
    let bases = spread_bases(&gq, spread)?;
    let worst = worst_spread_deviation(&bases);
    let defect = bases
        .iter()
        .map(|basis| basis.orthonormality_defect())
        .fold(0.0f64, f64::max);

    let report = MubReport {
        spread: args.spread,
        lines: spread.lines().iter().map(|line| line.index()).collect(),
        bases: bases.len(),
        orthonormality_defect: defect,
        worst_deviation: worst,
        pairwise_unbiased: worst <= args.tolerance,
    };
    emit_json(cli, &report)
}

fn run_adjacency(cli: &Cli, args: &AdjacencyArgs) -> Result<()> {
    let gq = Quadrangle::build();
    let graph = args.graph.build(&gq);
    let n = graph.order();
    match args.format {
        MatrixFormat::Json => {
            let matrix = (0..n)
                .map(|i| (0..n).map(|j| i64::from(graph.adjacent(i, j))).collect())
                .collect();
            let report = AdjacencyReport {
                graph: args.graph.label().to_string(),
                order: n,
                matrix,
            };
            emit_json(cli, &report)
        }
        MatrixFormat::Csv => {
            let mut text = String::with_capacity(n * (2 * n + 1));
            for i in 0..n {
                for j in 0..n {
                    if j > 0 {
                        text.push(',');
                    }
                    text.push(if graph.adjacent(i, j) { '1' } else { '0' });
                }
                text.push('\n');
            }
            emit_text(cli, &text)
        }
    }
}

fn emit_json<T: Serialize>(cli: &Cli, payload: &T) -> Result<()> {
    let mut text = if cli.pretty {
        serde_json::to_string_pretty(payload)?
    } else {
        serde_json::to_string(payload)?
    };
    text.push('\n');
    emit_text(cli, &text)
}

fn emit_text(cli: &Cli, text: &str) -> Result<()> {
    match cli.output.as_deref() {
        Some(path) => {
            ensure_parent_dir(path)?;
            fs::write(path, text)?;
        }
        None => print!("{text}"),
    }
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
