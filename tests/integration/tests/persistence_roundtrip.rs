//! Integration tests: the persistence layer against the topology engine.
//!
//! A saved topology reloaded into a fresh engine must answer every query
//! identically to the original.

use rand::rngs::StdRng;
use rand::SeedableRng;

use routesim_core::RouterId;
use routesim_routing::{persist, random_topology, GeneratorConfig, Network};

fn worked_example_text() -> &'static str {
    "\
A,B,C,D
A B 4
A C 10
B C 3
B D 1
C D 2
"
}

fn assert_identical_queries(original: &Network, reloaded: &Network) {
    let names: Vec<String> = original.router_ids().map(RouterId::to_string).collect();
    let reloaded_names: Vec<String> = reloaded.router_ids().map(RouterId::to_string).collect();
    assert_eq!(names, reloaded_names);

    for source in &names {
        for destination in &names {
            assert_eq!(
                original.cost_between(source, destination),
                reloaded.cost_between(source, destination),
                "cost mismatch for ({source}, {destination})"
            );
            assert_eq!(
                original.path_between(source, destination),
                reloaded.path_between(source, destination),
                "path mismatch for ({source}, {destination})"
            );
        }
    }
}

#[test]
fn test_worked_example_round_trip() {
    let (original, report) = persist::parse_topology(worked_example_text()).unwrap();
    assert!(report.skipped.is_empty());

    let serialized = persist::write_topology(&original);
    let (reloaded, report) = persist::parse_topology(&serialized).unwrap();
    assert!(report.skipped.is_empty());

    assert_identical_queries(&original, &reloaded);
}

#[test]
fn test_generated_topology_round_trip() {
    let config = GeneratorConfig {
        routers: 20,
        link_probability: 0.25,
        cost_range: 1..=50,
    };
    let original = random_topology(&config, &mut StdRng::seed_from_u64(4242)).unwrap();

    let serialized = persist::write_topology(&original);
    let (reloaded, report) = persist::parse_topology(&serialized).unwrap();
    assert!(report.skipped.is_empty());
    assert_eq!(report.routers, 20);

    assert_identical_queries(&original, &reloaded);
}

#[test]
fn test_bidirectional_links_written_once() {
    let (network, _) = persist::parse_topology(worked_example_text()).unwrap();
    let serialized = persist::write_topology(&network);

    let link_lines: Vec<&str> = serialized.lines().skip(1).collect();
    assert_eq!(link_lines.len(), 5);
    assert!(link_lines.contains(&"A B 4"));
    assert!(!serialized.contains("B A"));
}

#[test]
fn test_partially_malformed_file_still_loads_and_round_trips() {
    let input = "\
A,B,C
A B 4
broken line here with too many fields 9
B C oops
B C 3
";
    let (network, report) = persist::parse_topology(input).unwrap();
    assert_eq!(report.links, 2);
    assert_eq!(report.skipped.len(), 2);

    let (reloaded, report) = persist::parse_topology(&persist::write_topology(&network)).unwrap();
    assert!(report.skipped.is_empty());
    assert_identical_queries(&network, &reloaded);
}
