use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use district_borders::prelude::*;
use district_borders::pipeline::{PipelineReport, StageCounts};
use serde::Serialize;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;
mod svg;

use provenance::{write_sidecar, Payload};
use svg::{render_svg, RenderCfg};

#[derive(Parser)]
#[command(name = "district-borders")]
#[command(about = "Generate districts, normalize their shared borders, and render them")]
struct Cmd {
    /// Verify graph symmetry after every pipeline stage
    #[arg(long, global = true)]
    check_invariants: bool,

    #[command(subcommand)]
    action: Action,
}

/// Where polygons come from: a JSON file, or the rectangle packer.
#[derive(Args, Clone, Debug)]
struct Source {
    /// JSON file holding `[[{"x":..,"y":..}, ...], ...]`
    #[arg(long, conflicts_with_all = ["districts", "seed"])]
    input: Option<PathBuf>,
    /// Number of districts to pack when no input file is given
    #[arg(long, default_value_t = 1000)]
    districts: usize,
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

#[derive(Subcommand)]
enum Action {
    /// Pack random rectangular districts and write them as JSON
    Generate {
        #[arg(long, default_value_t = 1000)]
        districts: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long)]
        out: PathBuf,
    },
    /// Normalize the borders and write an SVG drawing
    Render {
        #[command(flatten)]
        source: Source,
        #[arg(long)]
        out: PathBuf,
        /// Skip splitting borders at embedded corners
        #[arg(long)]
        no_merge: bool,
        /// Skip joining straight lines through vertices
        #[arg(long)]
        no_continue: bool,
        /// Gap left at both ends of each border segment
        #[arg(long, default_value_t = 0.25)]
        gap: f64,
    },
    /// Print per-stage node and edge counts as JSON
    Report {
        #[command(flatten)]
        source: Source,
    },
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    let pipeline = PipelineCfg {
        check_invariants: cmd.check_invariants || PipelineCfg::default().check_invariants,
        ..PipelineCfg::default()
    };
    match cmd.action {
        Action::Generate {
            districts,
            seed,
            out,
        } => generate(districts, seed, &out),
        Action::Render {
            source,
            out,
            no_merge,
            no_continue,
            gap,
        } => {
            let cfg = PipelineCfg {
                merge_corners: !no_merge,
                continue_lines: !no_continue,
                ..pipeline
            };
            render(&source, &out, cfg, gap)
        }
        Action::Report { source } => report(&source, pipeline),
    }
}

fn generate(districts: usize, seed: u64, out: &Path) -> Result<()> {
    tracing::info!(districts, seed, out = %out.display(), "generate");
    let polygons = pack(districts, seed)?;
    ensure_parent(out)?;
    std::fs::write(out, serde_json::to_vec(&polygons)?)
        .with_context(|| format!("writing {}", out.display()))?;
    write_sidecar(
        out,
        Payload::new("generate", json!({ "districts": districts, "seed": seed })),
    )?;
    Ok(())
}

fn render(source: &Source, out: &Path, cfg: PipelineCfg, gap: f64) -> Result<()> {
    tracing::info!(source = ?source, out = %out.display(), ?cfg, gap, "render");
    let polygons = load(source)?;
    let normalized = normalize(&polygons, &cfg)?;
    let render_cfg = RenderCfg {
        gap,
        ..RenderCfg::default()
    };
    let doc = render_svg(&polygons, &normalized.graph, &render_cfg)?;
    ensure_parent(out)?;
    std::fs::write(out, doc).with_context(|| format!("writing {}", out.display()))?;
    tracing::info!(
        edges = normalized.graph.edge_count(),
        nodes = normalized.graph.node_count(),
        "rendered"
    );
    let params = json!({
        "source": source_json(source),
        "merge_corners": cfg.merge_corners,
        "continue_lines": cfg.continue_lines,
        "gap": gap,
    });
    write_sidecar(
        out,
        Payload::new("render", params).with_report(report_json(&normalized.report)?),
    )?;
    Ok(())
}

fn report(source: &Source, cfg: PipelineCfg) -> Result<()> {
    let polygons = load(source)?;
    let normalized = normalize(&polygons, &cfg)?;
    let stages = report_json(&normalized.report)?;
    let obj = json!({
        "code_rev": provenance::current_git_rev(),
        "source": source_json(source),
        "report": stages,
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

fn pack(districts: usize, seed: u64) -> Result<Vec<Vec<Point>>> {
    let cfg = DistrictCfg {
        num_districts: districts,
        ..DistrictCfg::default()
    };
    draw_districts(&cfg, seed).with_context(|| format!("packing {districts} districts"))
}

fn load(source: &Source) -> Result<Vec<Vec<Point>>> {
    match &source.input {
        Some(path) => {
            let bytes =
                std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
            let polygons: Vec<Vec<Point>> = serde_json::from_slice(&bytes)
                .with_context(|| format!("parsing polygons from {}", path.display()))?;
            tracing::info!(polygons = polygons.len(), path = %path.display(), "loaded");
            Ok(polygons)
        }
        None => pack(source.districts, source.seed),
    }
}

fn ensure_parent(out: &Path) -> Result<()> {
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    Ok(())
}

fn source_json(source: &Source) -> Value {
    match &source.input {
        Some(path) => json!({ "input": path.to_string_lossy() }),
        None => json!({ "districts": source.districts, "seed": source.seed }),
    }
}

#[derive(Serialize)]
struct StageJson {
    nodes: usize,
    edges: usize,
}

impl From<StageCounts> for StageJson {
    fn from(c: StageCounts) -> Self {
        Self {
            nodes: c.nodes,
            edges: c.edges,
        }
    }
}

#[derive(Serialize)]
struct ReportJson {
    polygons: usize,
    built: StageJson,
    merged: Option<StageJson>,
    straightened: Option<StageJson>,
    splits: Option<usize>,
    bypasses: Option<usize>,
}

fn report_json(report: &PipelineReport) -> Result<Value> {
    let doc = ReportJson {
        polygons: report.polygons,
        built: report.built.into(),
        merged: report.merged.map(Into::into),
        straightened: report.straightened.map(Into::into),
        splits: report.merge.map(|m| m.splits),
        bypasses: report.straighten.map(|s| s.bypasses),
    };
    Ok(serde_json::to_value(doc)?)
}
