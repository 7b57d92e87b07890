//! Line-oriented topology persistence.
//!
//! Canonical wire format, one topology per file:
//! - the first non-empty, non-comment line lists every router id,
//!   comma-separated;
//! - each following line describes one bidirectional link as `A B COST`
//!   (two router ids and a positive integer cost, whitespace-separated);
//! - lines starting with `#` are comments; blank lines are ignored.
//!
//! Router ids in this format therefore cannot contain whitespace or commas.
//!
//! Loading is tolerant: a malformed or rejected link line is skipped with a
//! warning and recorded in the [`LoadReport`]; it never aborts the load. A
//! link endpoint missing from the header line is registered on the fly, also
//! with a warning.

use std::path::Path;
use std::{fmt, fs};

use tracing::warn;

use routesim_core::RouterId;

use crate::network::Network;

#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("no router line found")]
    MissingRouterLine,
}

/// One tolerated-but-skipped input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    pub line: usize,
    pub reason: String,
}

impl fmt::Display for SkippedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.reason)
    }
}

/// Outcome of a topology load.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoadReport {
    /// Routers registered, header and on-the-fly additions combined.
    pub routers: usize,
    /// Links applied.
    pub links: usize,
    pub skipped: Vec<SkippedLine>,
}

impl LoadReport {
    fn skip(&mut self, line: usize, reason: impl Into<String>) {
        let reason = reason.into();
        warn!(line, %reason, "skipping topology line");
        self.skipped.push(SkippedLine { line, reason });
    }
}

/// Parse a topology from its textual form.
///
/// Every router named in the header is registered before any link line is
/// applied, so link lines may reference them in any order.
pub fn parse_topology(input: &str) -> Result<(Network, LoadReport), PersistError> {
    let mut network = Network::new();
    let mut report = LoadReport::default();
    let mut header_seen = false;

    for (index, raw_line) in input.lines().enumerate() {
        let line_no = index + 1;
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if !header_seen {
            for name in line.split(',').map(str::trim).filter(|name| !name.is_empty()) {
                match network.add_router(name) {
                    Ok(()) => report.routers += 1,
                    Err(err) => report.skip(line_no, err.to_string()),
                }
            }
            header_seen = true;
            continue;
        }

        parse_link_line(&mut network, &mut report, line_no, line);
    }

    if !header_seen {
        return Err(PersistError::MissingRouterLine);
    }
    Ok((network, report))
}

fn parse_link_line(network: &mut Network, report: &mut LoadReport, line_no: usize, line: &str) {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let &[a, b, cost_field] = fields.as_slice() else {
        report.skip(line_no, format!("expected 'A B COST', got '{line}'"));
        return;
    };
    let Ok(cost) = cost_field.parse::<i64>() else {
        report.skip(line_no, format!("unparseable cost '{cost_field}'"));
        return;
    };
    if cost <= 0 || cost > i64::from(u32::MAX) {
        report.skip(line_no, format!("cost out of range: {cost}"));
        return;
    }

    // Endpoints absent from the header are registered on the fly.
    for endpoint in [a, b] {
        if !network.contains_router(endpoint) {
            warn!(line = line_no, router = endpoint, "router missing from header line");
            if network.add_router(endpoint).is_ok() {
                report.routers += 1;
            }
        }
    }

    match network.add_link(a, b, cost as u32) {
        Ok(()) => report.links += 1,
        Err(err) => report.skip(line_no, err.to_string()),
    }
}

/// Serialize a topology to its textual form: header line from
/// [`Network::router_ids`], then every link exactly once.
pub fn write_topology(network: &Network) -> String {
    let mut out = String::new();
    let header: Vec<&str> = network.router_ids().map(RouterId::as_str).collect();
    out.push_str(&header.join(","));
    out.push('\n');
    for link in network.links() {
        out.push_str(&format!("{} {} {}\n", link.a, link.b, link.cost));
    }
    out
}

pub fn load_path(path: impl AsRef<Path>) -> Result<(Network, LoadReport), PersistError> {
    parse_topology(&fs::read_to_string(path)?)
}

pub fn save_path(network: &Network, path: impl AsRef<Path>) -> Result<(), PersistError> {
    fs::write(path, write_topology(network))?;
    Ok(())
}
