use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::fmt::SubscriberBuilder;

use isocontour::contour::extract;
use isocontour::cycle::discover;
use isocontour::polyline::emit;
use isocontour::stitch::{run as stitch_run, StitchCfg};

mod io;
mod svg_export;

#[derive(Parser)]
#[command(name = "isocontour")]
#[command(about = "Marching-squares isocontour extraction and stitching")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Extract contours from a `.npy` scalar field, then stitch them into
    /// closed loops. Writes `<stem>_contour.npz` (unstitched) and
    /// `<stem>_cycle.npz` (stitched) next to the input.
    Main {
        /// Path to the input `.npy` scalar field.
        input: PathBuf,
    },
    /// Render a saved archive to an SVG file alongside it.
    Tosvg {
        /// Base name shared by the archive and the output SVG (no extension).
        name: PathBuf,
        #[arg(value_enum)]
        data: ArchiveKind,
    },
    /// Open an interactive view of a field or archive. Not implemented in
    /// this driver — no windowing stack is part of its dependency surface.
    Visualise {
        name: PathBuf,
        #[arg(value_enum)]
        data: VisualiseKind,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ArchiveKind {
    Contour,
    Cycle,
}

impl ArchiveKind {
    fn suffix(self) -> &'static str {
        match self {
            ArchiveKind::Contour => "_contour",
            ArchiveKind::Cycle => "_cycle",
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum VisualiseKind {
    Scalar,
    Contour,
    Cycle,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Main { input } => main_pipeline(&input),
        Action::Tosvg { name, data } => tosvg(&name, data),
        Action::Visualise { name, data } => visualise(&name, data),
    }
}

fn with_suffix(base: &Path, suffix: &str, ext: &str) -> PathBuf {
    let stem = base.file_stem().map(|s| s.to_owned()).unwrap_or_default();
    let mut name = stem;
    name.push(suffix);
    base.with_file_name(name).with_extension(ext)
}

fn main_pipeline(input: &Path) -> Result<()> {
    let field = tracing::info_span!("load", path = %input.display()).in_scope(|| io::load_field(input))?;

    let graph = tracing::info_span!("extract").in_scope(|| {
        let mut g = extract(&field);
        discover(&mut g, &field);
        g
    });
    tracing::info!(cycles = graph.alive_cycle_count(), "extracted");

    let contour_path = with_suffix(input, "_contour", "npz");
    tracing::info_span!("save_contour", path = %contour_path.display())
        .in_scope(|| io::save_graph(&contour_path, &graph))?;

    let mut stitched = graph;
    tracing::info_span!("stitch").in_scope(|| stitch_run(&mut stitched, StitchCfg::default()))?;
    tracing::info!(cycles = stitched.alive_cycle_count(), "stitched");

    let cycle_path = with_suffix(input, "_cycle", "npz");
    tracing::info_span!("save_cycle", path = %cycle_path.display())
        .in_scope(|| io::save_graph(&cycle_path, &stitched))?;

    Ok(())
}

fn tosvg(name: &Path, data: ArchiveKind) -> Result<()> {
    let archive_path = with_suffix(name, data.suffix(), "npz");
    let graph = tracing::info_span!("load_archive", path = %archive_path.display())
        .in_scope(|| io::load_graph(&archive_path))?;
    let lines = emit(&graph);
    let svg_path = with_suffix(name, data.suffix(), "svg");
    tracing::info_span!("export_svg", path = %svg_path.display())
        .in_scope(|| svg_export::write_svg(&svg_path, &lines))?;
    tracing::info!(polylines = lines.len(), "wrote svg");
    Ok(())
}

fn visualise(name: &Path, data: VisualiseKind) -> Result<()> {
    tracing::warn!(name = %name.display(), data = ?data, "visualise is not implemented in this driver");
    bail!(
        "interactive visualisation is out of scope for this build; run `tosvg {} {}` and open the SVG instead",
        name.display(),
        match data {
            VisualiseKind::Scalar => "contour",
            VisualiseKind::Contour => "contour",
            VisualiseKind::Cycle => "cycle",
        }
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_suffix_inserts_before_the_extension() {
        let base = Path::new("/data/fields/blob.npy");
        assert_eq!(
            with_suffix(base, "_contour", "npz"),
            Path::new("/data/fields/blob_contour.npz")
        );
    }

    #[test]
    fn with_suffix_handles_a_name_with_no_extension() {
        let base = Path::new("/data/fields/blob");
        assert_eq!(
            with_suffix(base, "_cycle", "svg"),
            Path::new("/data/fields/blob_cycle.svg")
        );
    }
}
