//! `routesim query` — cost and path between two routers of a topology file.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use routesim_routing::persist;

use super::show::{format_path, report_skipped};

#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Topology file to load.
    pub file: PathBuf,

    /// Source router.
    #[arg(short, long)]
    pub from: String,

    /// Destination router.
    #[arg(short, long)]
    pub to: String,

    /// Emit JSON instead of plain text.
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: &QueryArgs) -> anyhow::Result<()> {
    let (network, report) = persist::load_path(&args.file)
        .with_context(|| format!("loading topology from {}", args.file.display()))?;
    report_skipped(&report);

    let cost = network.cost_between(&args.from, &args.to);
    let path = network.path_between(&args.from, &args.to);

    if args.json {
        let doc = match (cost, path) {
            (Some(cost), Some(path)) => serde_json::json!({
                "from": args.from,
                "to": args.to,
                "reachable": true,
                "cost": cost,
                "path": path.iter().map(|hop| hop.as_str()).collect::<Vec<_>>(),
            }),
            _ => serde_json::json!({
                "from": args.from,
                "to": args.to,
                "reachable": false,
            }),
        };
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    match (cost, path) {
        (Some(cost), Some(path)) => {
            println!("cost: {cost}");
            println!("path: {}", format_path(path));
        }
        _ => println!("{} -> {}: unreachable", args.from, args.to),
    }
    Ok(())
}
