//! `routesim show` — print a topology and, optionally, routing tables.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use routesim_core::RouterId;
use routesim_routing::{persist, LoadReport, Network, RoutingTable};

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Topology file to load.
    pub file: PathBuf,

    /// Also print every router's routing table.
    #[arg(long)]
    pub tables: bool,

    /// Emit JSON instead of plain text.
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: &ShowArgs) -> anyhow::Result<()> {
    let (network, report) = persist::load_path(&args.file)
        .with_context(|| format!("loading topology from {}", args.file.display()))?;
    report_skipped(&report);

    if args.json {
        let mut doc = topology_json(&network);
        if args.tables {
            doc["tables"] = tables_json(&network);
        }
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    print_topology(&network);
    if args.tables {
        for id in network.router_ids() {
            if let Some(table) = network.routing_table(id.as_str()) {
                println!();
                print_routing_table(table);
            }
        }
    }
    Ok(())
}

pub(crate) fn report_skipped(report: &LoadReport) {
    for skipped in &report.skipped {
        eprintln!("warning: skipped {skipped}");
    }
}

pub(crate) fn print_topology(network: &Network) {
    println!("Routers: {}", network.router_count());
    println!("Links:   {}", network.link_count());
    for link in network.links() {
        println!("  {link}");
    }
}

pub(crate) fn print_routing_table(table: &RoutingTable) {
    println!("Routing table for {}:", table.owner());
    println!("  {:<16} {:>6}  path", "destination", "cost");
    for (destination, entry) in table.entries() {
        println!(
            "  {:<16} {:>6}  {}",
            destination.as_str(),
            entry.cost,
            format_path(&entry.path)
        );
    }
}

pub(crate) fn format_path(path: &[RouterId]) -> String {
    path.iter()
        .map(RouterId::as_str)
        .collect::<Vec<_>>()
        .join(" -> ")
}

pub(crate) fn topology_json(network: &Network) -> serde_json::Value {
    serde_json::json!({
        "routers": network.router_ids().map(RouterId::as_str).collect::<Vec<_>>(),
        "links": network
            .links()
            .iter()
            .map(|link| {
                serde_json::json!({
                    "a": link.a.as_str(),
                    "b": link.b.as_str(),
                    "cost": link.cost,
                })
            })
            .collect::<Vec<_>>(),
    })
}

fn tables_json(network: &Network) -> serde_json::Value {
    let tables: serde_json::Map<String, serde_json::Value> = network
        .router_ids()
        .filter_map(|id| network.routing_table(id.as_str()))
        .map(|table| {
            let entries: serde_json::Map<String, serde_json::Value> = table
                .entries()
                .map(|(destination, entry)| {
                    (
                        destination.to_string(),
                        serde_json::json!({
                            "cost": entry.cost,
                            "path": entry.path.iter().map(RouterId::as_str).collect::<Vec<_>>(),
                        }),
                    )
                })
                .collect();
            (table.owner().to_string(), entries.into())
        })
        .collect();
    tables.into()
}
