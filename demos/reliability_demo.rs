//! Reliability demo on a small 10-node network.
//!
//! Usage: `cargo run --example reliability_demo [START TARGET]`
//!
//! Without arguments a random pair is picked (start in 1..=9, target at or after it).
//! Set `RUST_LOG=relpath=debug` to see the search events.

use rand::Rng;
use relpath::{
    all_simple_paths, k_least_reliable, k_most_reliable, most_reliable_path, score, select_best,
    Graph, NodeId, ScoringMode,
};
use tracing_subscriber::EnvFilter;

fn network() -> Result<Graph, relpath::graph::Error> {
    Graph::from_adjacency(vec![
        vec![(2, 0.2), (3, 0.9), (9, 0.9)],
        vec![(7, 0.8), (3, 0.1)],
        vec![(5, 0.1), (4, 0.1), (7, 0.35)],
        vec![(8, 0.25)],
        vec![(4, 0.1)],
        vec![(10, 0.5)],
        vec![(6, 0.35), (5, 0.1)],
        vec![(10, 0.4)],
        vec![(4, 0.1)],
        vec![],
    ])
}

fn show(path: &[NodeId]) -> String {
    path.iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let g = network()?;
    let args: Vec<NodeId> = std::env::args()
        .skip(1)
        .map(|a| a.parse())
        .collect::<Result<_, _>>()?;
    let (start, target) = match args[..] {
        [s, t] => (s, t),
        _ => {
            let mut rng = rand::thread_rng();
            let s = rng.gen_range(1..=9);
            (s, rng.gen_range(s..=g.node_count()))
        }
    };

    println!("Most reliable path from {start} to {target}:");
    let best = most_reliable_path(&g, start, target)?;
    if best.is_found() {
        println!("  path: {}", show(&best.path));
        println!("  reliability: {:.6}", best.probability);
    } else {
        println!("  no path exists");
    }

    let paths = all_simple_paths(&g, start, target)?;
    println!("\nAll {} simple paths (additive score):", paths.len());
    for p in &paths {
        println!("  {:<28} {:.2}", show(p), score(&g, p)?);
    }

    if let Some(top) = select_best(&g, &paths, ScoringMode::Additive)? {
        println!("\nBest by additive score: {} ({:.2})", show(&top.path), top.score);
    }

    let k = 3;
    println!("\n{k} most reliable:");
    for s in k_most_reliable(&g, &paths, k)? {
        println!("  {:<28} {:.2}", show(&s.path), s.score);
    }
    println!("\n{k} least reliable:");
    for s in k_least_reliable(&g, &paths, k)? {
        println!("  {:<28} {:.2}", show(&s.path), s.score);
    }
    Ok(())
}
