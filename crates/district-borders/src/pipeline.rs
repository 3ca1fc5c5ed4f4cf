//! End-to-end border normalization: build → merge corners → continue lines.
//!
//! Each stage runs to completion on the single owned graph before the next
//! one starts. With `check_invariants` the graph's symmetry is verified at
//! every stage boundary.

use crate::error::BorderError;
use crate::graph::{build_graph, Graph, Point};
use crate::merge::{merge_corners, MergeStats};
use crate::straighten::{continue_straight_lines, ContinueStats};

/// Pipeline switches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PipelineCfg {
    /// Verify graph symmetry after every stage.
    pub check_invariants: bool,
    pub merge_corners: bool,
    pub continue_lines: bool,
}

impl Default for PipelineCfg {
    fn default() -> Self {
        Self {
            check_invariants: cfg!(debug_assertions),
            merge_corners: true,
            continue_lines: true,
        }
    }
}

/// Node/edge counts after one stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StageCounts {
    pub nodes: usize,
    pub edges: usize,
}

impl StageCounts {
    fn of(graph: &Graph) -> Self {
        Self {
            nodes: graph.node_count(),
            edges: graph.edge_count(),
        }
    }
}

/// What each stage did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PipelineReport {
    pub polygons: usize,
    pub built: StageCounts,
    pub merge: Option<MergeStats>,
    pub merged: Option<StageCounts>,
    pub straighten: Option<ContinueStats>,
    pub straightened: Option<StageCounts>,
}

/// Final graph plus the per-stage report.
#[derive(Clone, Debug)]
pub struct Normalized {
    pub graph: Graph,
    pub report: PipelineReport,
}

/// Run the whole pipeline over `polygons`.
pub fn normalize<P>(polygons: &[P], cfg: &PipelineCfg) -> Result<Normalized, BorderError>
where
    P: AsRef<[Point]>,
{
    let mut graph = build_graph(polygons)?;
    let mut report = PipelineReport {
        polygons: polygons.len(),
        built: StageCounts::of(&graph),
        ..PipelineReport::default()
    };
    check_stage(&graph, cfg, "build")?;

    if cfg.merge_corners {
        report.merge = Some(merge_corners(&mut graph)?);
        report.merged = Some(StageCounts::of(&graph));
        check_stage(&graph, cfg, "merge")?;
    }
    if cfg.continue_lines {
        report.straighten = Some(continue_straight_lines(&mut graph)?);
        report.straightened = Some(StageCounts::of(&graph));
        check_stage(&graph, cfg, "straighten")?;
    }
    tracing::debug!(?report, "normalized borders");
    Ok(Normalized { graph, report })
}

fn check_stage(graph: &Graph, cfg: &PipelineCfg, stage: &'static str) -> Result<(), BorderError> {
    if !cfg.check_invariants {
        return Ok(());
    }
    graph.check_symmetry().inspect_err(|err| {
        tracing::error!(stage, %err, "graph invariant broken");
    })
}
