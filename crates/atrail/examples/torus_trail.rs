//! Torus A-trail timing probe.
//!
//! Purpose
//! - Give a reproducible data point for how the parity search scales on
//!   6-regular triangulated tori, where every vertex is a branch node.
//!
//! Usage
//! - `cargo run --release -p atrail --example torus_trail -- [k] [max_splits]`
//! - Defaults: `k = 4`, at most 100000 split attempts. Larger tori can need
//!   exponentially many attempts; a run that hits the cap reports it instead
//!   of hanging.

use std::time::Instant;

use atrail::gen::triangulated_torus;
use atrail::prelude::*;

fn main() {
    let mut args = std::env::args().skip(1);
    let k: usize = args.next().and_then(|s| s.parse().ok()).unwrap_or(4);
    let budget: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(100_000);
    let emb = triangulated_torus(k);
    let cfg = SearchCfg {
        split_budget: Some(budget),
        ..SearchCfg::default()
    };

    let start = Instant::now();
    let result = search_embedding(&emb, cfg);
    let elapsed = start.elapsed().as_secs_f64() * 1e3;

    match result {
        Ok(SearchOutcome::Found(trail)) => println!(
            "torus k={k} vertices={} edges={} found=true verified={}",
            emb.number_of_vertices(),
            emb.number_of_edges(),
            verify(&emb, &trail.edge_trail)
        ),
        Ok(outcome) => println!("torus k={k} found=false outcome={outcome:?}"),
        Err(err) => println!("torus k={k} stopped: {err}"),
    }
    println!("search_time_ms={elapsed:.3}");
}
