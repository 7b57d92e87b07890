//! Integration tests: routing invariants over whole topologies.
//!
//! Exercises the topology engine end to end — mutations, recompute passes,
//! and the structural properties every routing table must satisfy.

use rand::rngs::StdRng;
use rand::SeedableRng;

use routesim_core::RouterId;
use routesim_routing::{random_topology, GeneratorConfig, Network};

/// The worked example: A-B=4, A-C=10, B-C=3, B-D=1, C-D=2.
fn worked_example() -> Network {
    let mut network = Network::new();
    for name in ["A", "B", "C", "D"] {
        network.add_router(name).unwrap();
    }
    network.add_link("A", "B", 4).unwrap();
    network.add_link("A", "C", 10).unwrap();
    network.add_link("B", "C", 3).unwrap();
    network.add_link("B", "D", 1).unwrap();
    network.add_link("C", "D", 2).unwrap();
    network
}

fn seeded_network(seed: u64) -> Network {
    let config = GeneratorConfig {
        routers: 15,
        link_probability: 0.3,
        cost_range: 1..=9,
    };
    random_topology(&config, &mut StdRng::seed_from_u64(seed)).unwrap()
}

fn names(network: &Network) -> Vec<String> {
    network.router_ids().map(RouterId::to_string).collect()
}

#[test]
fn test_worked_example_end_to_end() {
    let network = worked_example();

    assert_eq!(network.cost_between("A", "D"), Some(5));
    let path: Vec<&str> = network
        .path_between("A", "D")
        .unwrap()
        .iter()
        .map(RouterId::as_str)
        .collect();
    assert_eq!(path, ["A", "B", "D"]);

    assert_eq!(network.cost_between("A", "C"), Some(7));
    let path: Vec<&str> = network
        .path_between("A", "C")
        .unwrap()
        .iter()
        .map(RouterId::as_str)
        .collect();
    assert_eq!(path, ["A", "B", "C"]);
}

#[test]
fn test_costs_are_symmetric_across_all_pairs() {
    let network = seeded_network(11);
    let names = names(&network);
    for a in &names {
        for b in &names {
            assert_eq!(
                network.cost_between(a, b),
                network.cost_between(b, a),
                "asymmetric cost between {a} and {b}"
            );
        }
    }
}

#[test]
fn test_triangle_inequality_holds_post_recompute() {
    let network = seeded_network(23);
    let names = names(&network);
    for s in &names {
        for m in &names {
            for d in &names {
                let (Some(sm), Some(md)) =
                    (network.cost_between(s, m), network.cost_between(m, d))
                else {
                    continue;
                };
                let sd = network
                    .cost_between(s, d)
                    .expect("reachable via m, so reachable directly");
                assert!(
                    sd <= sm + md,
                    "cost({s},{d})={sd} > cost({s},{m})+cost({m},{d})={}",
                    sm + md
                );
            }
        }
    }
}

#[test]
fn test_paths_are_well_formed() {
    let network = seeded_network(37);
    let names = names(&network);
    for s in &names {
        for d in &names {
            let Some(path) = network.path_between(s, d) else {
                continue;
            };
            assert_eq!(path.first().map(RouterId::as_str), Some(s.as_str()));
            assert_eq!(path.last().map(RouterId::as_str), Some(d.as_str()));
            // Every consecutive hop pair is an actual link, and the link
            // costs sum to the stored total.
            let mut total = 0;
            for window in path.windows(2) {
                assert!(network.has_link(window[0].as_str(), window[1].as_str()));
                total += link_cost(&network, window[0].as_str(), window[1].as_str());
            }
            assert_eq!(network.cost_between(s, d), Some(total));
        }
    }
}

fn link_cost(network: &Network, a: &str, b: &str) -> u32 {
    network
        .links()
        .into_iter()
        .find(|link| {
            (link.a.as_str() == a && link.b.as_str() == b)
                || (link.a.as_str() == b && link.b.as_str() == a)
        })
        .map(|link| link.cost)
        .expect("consecutive path hops must be linked")
}

#[test]
fn test_self_entries_hold_after_every_mutation() {
    let mut network = worked_example();

    let check = |network: &Network| {
        for id in network.router_ids() {
            assert_eq!(network.cost_between(id.as_str(), id.as_str()), Some(0));
            let path = network.path_between(id.as_str(), id.as_str()).unwrap();
            assert_eq!(path, &[id.clone()][..]);
        }
    };

    check(&network);
    network.add_router("E").unwrap();
    check(&network);
    network.add_link("D", "E", 6).unwrap();
    check(&network);
    network.update_link_cost("A", "B", 2).unwrap();
    check(&network);
    network.remove_link("B", "C").unwrap();
    check(&network);
    network.remove_router("C").unwrap();
    check(&network);
}

#[test]
fn test_removed_router_vanishes_from_every_table() {
    let mut network = seeded_network(5);
    network.remove_router("R3").unwrap();

    assert!(network.routing_table("R3").is_none());
    for id in network.router_ids() {
        let table = network.routing_table(id.as_str()).unwrap();
        for (destination, entry) in table.entries() {
            assert_ne!(destination.as_str(), "R3");
            assert!(entry.path.iter().all(|hop| hop.as_str() != "R3"));
        }
    }
}

#[test]
fn test_rejected_mutations_change_nothing() {
    let mut network = worked_example();
    let before = network.clone();

    assert!(network.add_link("A", "B", 0).is_err());
    assert!(network.add_link("A", "A", 2).is_err());
    assert!(network.add_link("A", "nope", 2).is_err());
    assert!(network.update_link_cost("A", "D", 1).is_err());
    assert!(network.remove_link("A", "D").is_err());
    assert!(network.remove_router("nope").is_err());
    assert!(network.add_router("A").is_err());

    assert_eq!(network, before);
}

#[test]
fn test_disconnected_components_stay_unreachable() {
    let mut network = Network::new();
    for name in ["X", "Y", "P", "Q"] {
        network.add_router(name).unwrap();
    }
    network.add_link("X", "Y", 1).unwrap();
    network.add_link("P", "Q", 1).unwrap();

    assert_eq!(network.cost_between("X", "Y"), Some(1));
    assert_eq!(network.cost_between("X", "P"), None);
    assert_eq!(network.path_between("Y", "Q"), None);
}
