use anyhow::Result;
use clap::{Parser, Subcommand};
use mbed::api::refine;
use provenance::{current_git_rev, write_sidecar, Payload};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

mod mesh_io;
mod provenance;

#[derive(Parser)]
#[command(name = "mbed")]
#[command(about = "Prepare curve meshes for volumetric embedding")]
struct Cmd {
    /// Log refinement details
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Refine a curve mesh so that no edge is longer than the threshold
    Refine {
        /// Mesh as `.json` (points, optional edges) or `.csv` (one point per row)
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        threshold: f64,
        /// Refined mesh with parent map (JSON)
        #[arg(long)]
        out: PathBuf,
        /// Close polyline input into a loop
        #[arg(long)]
        close: bool,
        /// Check the refinement postconditions before writing
        #[arg(long)]
        verify: bool,
        /// Optional per-edge table (`.csv` or `.parquet`)
        #[arg(long)]
        edges_table: Option<PathBuf>,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = if cmd.debug { Level::DEBUG } else { Level::INFO };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .init();
    match cmd.action {
        Action::Refine {
            input,
            threshold,
            out,
            close,
            verify,
            edges_table,
        } => run_refine(input, threshold, out, close, verify, edges_table),
        Action::Report => report(),
    }
}

fn run_refine(
    input: PathBuf,
    threshold: f64,
    out: PathBuf,
    close: bool,
    verify: bool,
    edges_table: Option<PathBuf>,
) -> Result<()> {
    let mesh = mesh_io::read_mesh(&input, close)?;
    tracing::info!(
        input = %input.display(),
        vertices = mesh.num_vertices(),
        edges = mesh.num_edges(),
        dim = mesh.dim(),
        "loaded mesh"
    );

    let refined = refine(&mesh, threshold)?;
    if verify {
        refined.check(&mesh, threshold)?;
    }
    tracing::info!(
        vertices = refined.mesh.num_vertices(),
        edges = refined.mesh.num_edges(),
        threshold,
        "refined mesh"
    );

    mesh_io::write_refined(&out, &refined)?;
    let mut outputs = vec![out.display().to_string()];
    if let Some(table) = &edges_table {
        mesh_io::write_edge_table(table, &refined)?;
        outputs.push(table.display().to_string());
    }

    let params = serde_json::json!({
        "threshold": threshold,
        "close": close,
        "verified": verify,
        "input_edges": mesh.num_edges(),
        "output_edges": refined.mesh.num_edges(),
        "outputs": outputs,
    });
    let payload = Payload::new(params).with_input(input.display().to_string());
    let sidecar = write_sidecar(&out, payload)?;
    tracing::info!(sidecar = %sidecar.display(), "wrote provenance");
    Ok(())
}

fn report() -> Result<()> {
    let obj = serde_json::json!({
        "code_rev": current_git_rev(),
        "mbed_version": mbed::VERSION,
        "params": {},
        "outputs": []
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
