//! `routesim generate` — write a random topology file.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use rand::rngs::StdRng;
use rand::SeedableRng;

use routesim_routing::{persist, random_topology, GeneratorConfig};

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Output topology file.
    pub output: PathBuf,

    /// Number of routers.
    #[arg(short, long, default_value_t = 5)]
    pub routers: usize,

    /// Probability that any unordered router pair is linked.
    #[arg(short, long, default_value_t = 0.5)]
    pub probability: f64,

    /// Minimum link cost (inclusive).
    #[arg(long, default_value_t = 1)]
    pub min_cost: u32,

    /// Maximum link cost (inclusive).
    #[arg(long, default_value_t = 10)]
    pub max_cost: u32,

    /// RNG seed; the same seed reproduces the same topology.
    #[arg(short, long)]
    pub seed: Option<u64>,
}

pub fn run(args: &GenerateArgs) -> anyhow::Result<()> {
    let config = GeneratorConfig {
        routers: args.routers,
        link_probability: args.probability,
        cost_range: args.min_cost..=args.max_cost,
    };
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let network = random_topology(&config, &mut rng)?;
    persist::save_path(&network, &args.output)
        .with_context(|| format!("writing topology to {}", args.output.display()))?;

    println!(
        "Generated {} routers and {} links into {}",
        network.router_count(),
        network.link_count(),
        args.output.display()
    );
    Ok(())
}
