//! Pack a few random districts and print the border graph stage by stage.
//!
//! Usage:
//!   cargo run -p district-borders --example borders_demo -- [districts] [seed]

use district_borders::prelude::*;

fn main() {
    let mut args = std::env::args().skip(1);
    let n: usize = args.next().and_then(|s| s.parse().ok()).unwrap_or(12);
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(2025);
    let cfg = DistrictCfg {
        num_districts: n,
        ..DistrictCfg::default()
    };
    let polygons = match draw_districts(&cfg, seed) {
        Ok(p) => p,
        Err(err) => {
            eprintln!("borders_demo: {err}");
            return;
        }
    };
    let out = match normalize(&polygons, &PipelineCfg::default()) {
        Ok(out) => out,
        Err(err) => {
            eprintln!("borders_demo: {err}");
            return;
        }
    };
    println!("{:#?}", out.report);
    for edge in graph_edges(&out.graph) {
        println!("{edge}");
    }
}
