//! Seeded random topology generation.
//!
//! All randomness is drawn from a caller-supplied [`Rng`], so a fixed seed
//! reproduces the exact same topology; there is no process-global RNG state.

use std::ops::RangeInclusive;

use rand::Rng;
use tracing::debug;

use routesim_core::RouterId;

use crate::network::Network;

/// Parameters for random topology generation.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Number of synthetic routers to create, named `R0`, `R1`, ...
    pub routers: usize,
    /// Independent probability, per unordered router pair, of a link.
    pub link_probability: f64,
    /// Inclusive range link costs are drawn from uniformly.
    pub cost_range: RangeInclusive<u32>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            routers: 5,
            link_probability: 0.5,
            cost_range: 1..=10,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    #[error("link probability must be within [0, 1], got {0}")]
    InvalidProbability(f64),

    #[error("cost range must be non-empty with a positive minimum, got {min}..={max}")]
    InvalidCostRange { min: u32, max: u32 },
}

impl GeneratorConfig {
    fn validate(&self) -> Result<(), GeneratorError> {
        if !(0.0..=1.0).contains(&self.link_probability) {
            return Err(GeneratorError::InvalidProbability(self.link_probability));
        }
        if self.cost_range.is_empty() || *self.cost_range.start() == 0 {
            return Err(GeneratorError::InvalidCostRange {
                min: *self.cost_range.start(),
                max: *self.cost_range.end(),
            });
        }
        Ok(())
    }
}

/// Build a random topology: `config.routers` synthetic routers, then one
/// independent Bernoulli trial per unordered pair, with winning pairs linked
/// at a cost drawn uniformly from `config.cost_range`.
pub fn random_topology<R: Rng + ?Sized>(
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<Network, GeneratorError> {
    config.validate()?;

    let mut network = Network::new();
    let ids: Vec<RouterId> = (0..config.routers)
        .map(|index| RouterId::from(format!("R{index}")))
        .collect();

    // Synthetic names are unique and every endpoint is registered with a
    // cost from a validated positive range, so these mutations cannot fail.
    for id in &ids {
        let _ = network.add_router(id.clone());
    }
    for (index, a) in ids.iter().enumerate() {
        for b in &ids[index + 1..] {
            if rng.gen::<f64>() < config.link_probability {
                let cost = rng.gen_range(config.cost_range.clone());
                let _ = network.add_link(a.as_str(), b.as_str(), cost);
            }
        }
    }

    debug!(
        routers = network.router_count(),
        links = network.link_count(),
        "generated random topology"
    );
    Ok(network)
}
