//! `routesim shell` — interactive topology shell.
//!
//! A numbered menu driving the topology engine: mutate routers and links,
//! inspect the topology and routing tables, query costs and paths, and
//! load/save/generate topologies without leaving the session.
//!
//! The shell pre-validates only that inputs are non-empty and parseable;
//! domain validation (existence, cost positivity) happens in the engine and
//! comes back as a typed error that is rendered, never crashing the loop.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use rand::rngs::StdRng;
use rand::SeedableRng;

use routesim_core::TopologyError;
use routesim_routing::{persist, random_topology, GeneratorConfig, Network};

use super::show::{format_path, print_routing_table, print_topology, report_skipped};

#[derive(Args, Debug)]
pub struct ShellArgs {
    /// Topology file to preload before the first prompt.
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

const MENU: &str = "\
================ routesim ================
  1. Add router
  2. Remove router
  3. Add link
  4. Remove link
  5. Update link cost
  6. Show topology
  7. Show routing tables
  8. Query cost
  9. Query path
 10. Load topology from file
 11. Save topology to file
 12. Generate random topology
 13. Load demo network
  0. Quit
==========================================";

type InputLines = io::Lines<io::StdinLock<'static>>;

pub fn run(args: &ShellArgs) -> anyhow::Result<()> {
    let mut network = match &args.file {
        Some(path) => {
            let (network, report) = persist::load_path(path)
                .with_context(|| format!("loading topology from {}", path.display()))?;
            report_skipped(&report);
            println!(
                "Loaded {} routers and {} links from {}",
                network.router_count(),
                network.link_count(),
                path.display()
            );
            network
        }
        None => Network::new(),
    };

    let mut lines = io::stdin().lock().lines();

    loop {
        println!("{MENU}");
        let Some(choice) = prompt(&mut lines, "choice> ")? else {
            break;
        };
        match choice.as_str() {
            "1" => add_router(&mut network, &mut lines)?,
            "2" => remove_router(&mut network, &mut lines)?,
            "3" => add_link(&mut network, &mut lines)?,
            "4" => remove_link(&mut network, &mut lines)?,
            "5" => update_link_cost(&mut network, &mut lines)?,
            "6" => print_topology(&network),
            "7" => show_routing_tables(&network),
            "8" => query_cost(&network, &mut lines)?,
            "9" => query_path(&network, &mut lines)?,
            "10" => load_topology(&mut network, &mut lines)?,
            "11" => save_topology(&network, &mut lines)?,
            "12" => generate_topology(&mut network, &mut lines)?,
            "13" => load_demo(&mut network),
            "0" | "q" | "quit" => break,
            "" => {}
            other => println!("unknown option '{other}'"),
        }
    }

    println!("bye");
    Ok(())
}

fn prompt(lines: &mut InputLines, label: &str) -> anyhow::Result<Option<String>> {
    print!("{label}");
    io::stdout().flush()?;
    match lines.next() {
        Some(line) => Ok(Some(line?.trim().to_string())),
        None => Ok(None),
    }
}

/// Prompt for a value that must be non-empty; `None` on EOF or empty input
/// (after printing a complaint).
fn prompt_required(lines: &mut InputLines, label: &str) -> anyhow::Result<Option<String>> {
    match prompt(lines, label)? {
        Some(value) if value.is_empty() => {
            println!("input must not be empty");
            Ok(None)
        }
        other => Ok(other),
    }
}

fn render(result: Result<(), TopologyError>, success: &str) {
    match result {
        Ok(()) => println!("{success}"),
        Err(err) => println!("error: {err}"),
    }
}

fn add_router(network: &mut Network, lines: &mut InputLines) -> anyhow::Result<()> {
    let Some(name) = prompt_required(lines, "router name: ")? else {
        return Ok(());
    };
    render(
        network.add_router(name.as_str()),
        &format!("router '{name}' added"),
    );
    Ok(())
}

fn remove_router(network: &mut Network, lines: &mut InputLines) -> anyhow::Result<()> {
    let Some(name) = prompt_required(lines, "router name: ")? else {
        return Ok(());
    };
    render(
        network.remove_router(&name),
        &format!("router '{name}' removed"),
    );
    Ok(())
}

fn prompt_endpoints(lines: &mut InputLines) -> anyhow::Result<Option<(String, String)>> {
    let Some(a) = prompt_required(lines, "first router: ")? else {
        return Ok(None);
    };
    let Some(b) = prompt_required(lines, "second router: ")? else {
        return Ok(None);
    };
    Ok(Some((a, b)))
}

fn prompt_cost(lines: &mut InputLines, label: &str) -> anyhow::Result<Option<u32>> {
    let Some(text) = prompt_required(lines, label)? else {
        return Ok(None);
    };
    match text.parse::<u32>() {
        Ok(cost) => Ok(Some(cost)),
        Err(_) => {
            println!("cost must be a positive integer, got '{text}'");
            Ok(None)
        }
    }
}

fn add_link(network: &mut Network, lines: &mut InputLines) -> anyhow::Result<()> {
    let Some((a, b)) = prompt_endpoints(lines)? else {
        return Ok(());
    };
    let Some(cost) = prompt_cost(lines, "link cost: ")? else {
        return Ok(());
    };
    render(
        network.add_link(&a, &b, cost),
        &format!("link {a} <-> {b} set (cost {cost})"),
    );
    Ok(())
}

fn remove_link(network: &mut Network, lines: &mut InputLines) -> anyhow::Result<()> {
    let Some((a, b)) = prompt_endpoints(lines)? else {
        return Ok(());
    };
    render(
        network.remove_link(&a, &b),
        &format!("link {a} <-> {b} removed"),
    );
    Ok(())
}

fn update_link_cost(network: &mut Network, lines: &mut InputLines) -> anyhow::Result<()> {
    let Some((a, b)) = prompt_endpoints(lines)? else {
        return Ok(());
    };
    let Some(cost) = prompt_cost(lines, "new cost: ")? else {
        return Ok(());
    };
    render(
        network.update_link_cost(&a, &b, cost),
        &format!("link {a} <-> {b} updated (cost {cost})"),
    );
    Ok(())
}

fn show_routing_tables(network: &Network) {
    if network.router_count() == 0 {
        println!("no routers");
        return;
    }
    for id in network.router_ids() {
        if let Some(table) = network.routing_table(id.as_str()) {
            print_routing_table(table);
            println!();
        }
    }
}

fn prompt_pair(lines: &mut InputLines) -> anyhow::Result<Option<(String, String)>> {
    let Some(from) = prompt_required(lines, "source router: ")? else {
        return Ok(None);
    };
    let Some(to) = prompt_required(lines, "destination router: ")? else {
        return Ok(None);
    };
    Ok(Some((from, to)))
}

fn query_cost(network: &Network, lines: &mut InputLines) -> anyhow::Result<()> {
    let Some((from, to)) = prompt_pair(lines)? else {
        return Ok(());
    };
    match network.cost_between(&from, &to) {
        Some(cost) => println!("cost {from} -> {to}: {cost}"),
        None => println!("{from} -> {to}: unreachable"),
    }
    Ok(())
}

fn query_path(network: &Network, lines: &mut InputLines) -> anyhow::Result<()> {
    let Some((from, to)) = prompt_pair(lines)? else {
        return Ok(());
    };
    match network.path_between(&from, &to) {
        Some(path) => println!("path {from} -> {to}: {}", format_path(path)),
        None => println!("{from} -> {to}: unreachable"),
    }
    Ok(())
}

fn load_topology(network: &mut Network, lines: &mut InputLines) -> anyhow::Result<()> {
    let Some(path) = prompt_required(lines, "file to load: ")? else {
        return Ok(());
    };
    match persist::load_path(&path) {
        Ok((loaded, report)) => {
            report_skipped(&report);
            println!(
                "loaded {} routers and {} links (replacing the current topology)",
                loaded.router_count(),
                loaded.link_count()
            );
            *network = loaded;
        }
        Err(err) => println!("error: {err}"),
    }
    Ok(())
}

fn save_topology(network: &Network, lines: &mut InputLines) -> anyhow::Result<()> {
    let Some(path) = prompt_required(lines, "file to save: ")? else {
        return Ok(());
    };
    match persist::save_path(network, &path) {
        Ok(()) => println!(
            "saved {} routers and {} links to {path}",
            network.router_count(),
            network.link_count()
        ),
        Err(err) => println!("error: {err}"),
    }
    Ok(())
}

fn generate_topology(network: &mut Network, lines: &mut InputLines) -> anyhow::Result<()> {
    let Some(routers) = prompt_required(lines, "router count: ")? else {
        return Ok(());
    };
    let Ok(routers) = routers.parse::<usize>() else {
        println!("router count must be an integer, got '{routers}'");
        return Ok(());
    };
    let Some(probability) = prompt_required(lines, "link probability [0-1]: ")? else {
        return Ok(());
    };
    let Ok(probability) = probability.parse::<f64>() else {
        println!("probability must be a number, got '{probability}'");
        return Ok(());
    };
    let Some(min_cost) = prompt_cost(lines, "minimum cost: ")? else {
        return Ok(());
    };
    let Some(max_cost) = prompt_cost(lines, "maximum cost: ")? else {
        return Ok(());
    };
    let Some(seed) = prompt(lines, "seed (blank for random): ")? else {
        return Ok(());
    };

    let mut rng = if seed.is_empty() {
        StdRng::from_entropy()
    } else {
        match seed.parse::<u64>() {
            Ok(seed) => StdRng::seed_from_u64(seed),
            Err(_) => {
                println!("seed must be an integer, got '{seed}'");
                return Ok(());
            }
        }
    };

    let config = GeneratorConfig {
        routers,
        link_probability: probability,
        cost_range: min_cost..=max_cost,
    };
    match random_topology(&config, &mut rng) {
        Ok(generated) => {
            println!(
                "generated {} routers and {} links (replacing the current topology)",
                generated.router_count(),
                generated.link_count()
            );
            *network = generated;
        }
        Err(err) => println!("error: {err}"),
    }
    Ok(())
}

/// The worked example topology: A-B=4, A-C=10, B-C=3, B-D=1, C-D=2.
fn load_demo(network: &mut Network) {
    let mut demo = Network::new();
    for name in ["A", "B", "C", "D"] {
        let _ = demo.add_router(name);
    }
    let links = [
        ("A", "B", 4),
        ("A", "C", 10),
        ("B", "C", 3),
        ("B", "D", 1),
        ("C", "D", 2),
    ];
    for (a, b, cost) in links {
        let _ = demo.add_link(a, b, cost);
    }
    println!("demo network loaded (A, B, C, D with 5 links)");
    *network = demo;
}
