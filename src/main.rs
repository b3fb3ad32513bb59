//! Command line front end for `f3grid2msh`

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use f3grid2msh::{ConvertOptions, MeshSummary};

/// Convert FLAC3D grid files into Gmsh 2.2 ascii meshes
#[derive(Parser)]
#[command(name = "f3grid2msh")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Convert FLAC3D grids to Gmsh meshes with Gmsh corner ordering", long_about = None)]
struct Cli {
    /// log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a grid file into a mesh with corrected node order
    Convert(ConvertArgs),
    /// Correct the node order of an existing Gmsh 2.2 mesh
    Reorder(ReorderArgs),
    /// Print node and element counts of a Gmsh 2.2 mesh
    Inspect(InspectArgs),
}

#[derive(Args)]
struct ConvertArgs {
    /// FLAC3D grid file
    input: PathBuf,

    /// corrected mesh file
    #[arg(short, long, default_value = "output.msh")]
    output: PathBuf,

    /// mesh written before node order correction [default: <OUTPUT>.convert.msh]
    #[arg(long)]
    intermediate: Option<PathBuf>,

    /// delete the intermediate mesh after a successful conversion
    #[arg(long)]
    discard_intermediate: bool,
}

#[derive(Args)]
struct ReorderArgs {
    /// mesh in FLAC3D corner order
    input: PathBuf,
    /// where to write the mesh in Gmsh corner order
    output: PathBuf,
}

#[derive(Args)]
struct InspectArgs {
    mesh: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Convert(args) => convert(args),
        Commands::Reorder(args) => reorder(args),
        Commands::Inspect(args) => inspect(args),
    }
}

fn convert(args: ConvertArgs) -> anyhow::Result<()> {
    let mut options = ConvertOptions::new(args.input, args.output)
        .keep_intermediate(!args.discard_intermediate);

    if let Some(intermediate) = args.intermediate {
        options = options.with_intermediate(intermediate);
    }

    let report = f3grid2msh::convert(&options)?;

    println!("read {} nodes and {} elements", report.nodes, report.elements);
    for (kind, count) in &report.kind_counts {
        println!("  {kind}: {count}");
    }
    println!(
        "corrected {} elements, {} left unchanged",
        report.reorder.corrected, report.reorder.passed_through
    );
    println!("wrote {}", options.output.display());

    Ok(())
}

fn reorder(args: ReorderArgs) -> anyhow::Result<()> {
    let stats = f3grid2msh::reorder_file(&args.input, &args.output)
        .with_context(|| format!("could not reorder {}", args.input.display()))?;

    println!(
        "corrected {} elements, {} left unchanged",
        stats.corrected, stats.passed_through
    );
    println!("wrote {}", args.output.display());

    Ok(())
}

fn inspect(args: InspectArgs) -> anyhow::Result<()> {
    let summary = MeshSummary::read(&args.mesh)
        .with_context(|| format!("could not summarize {}", args.mesh.display()))?;

    println!("{}", args.mesh.display());
    println!("{summary}");

    Ok(())
}
