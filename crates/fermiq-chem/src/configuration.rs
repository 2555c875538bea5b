//! Fixed-particle occupation bases.

use std::collections::HashMap;

use itertools::Itertools;

use crate::error::{ChemError, ChemResult};

/// Binary occupation vector; entry q is the occupation of site q.
pub type Configuration = Vec<u8>;

/// Binomial coefficient C(n, k); zero when `k > n`.
pub fn binomial(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    (0..k).fold(1usize, |acc, i| acc * (n - i) / (i + 1))
}

/// Every way to place `k` ones in `n` sites, in lexicographic order of the
/// occupied positions.
pub fn generate_configurations(n: usize, k: usize) -> Vec<Configuration> {
    if k == 0 {
        return vec![vec![0; n]];
    }
    (0..n)
        .combinations(k)
        .map(|occupied| {
            let mut c = vec![0u8; n];
            for q in occupied {
                c[q] = 1;
            }
            c
        })
        .collect()
}

/// Basis-state index of a configuration: bit q is site q.
pub fn configuration_index(config: &[u8]) -> usize {
    config
        .iter()
        .enumerate()
        .filter(|(_, b)| **b != 0)
        .fold(0, |acc, (q, _)| acc | (1 << q))
}

/// An ordered set of configurations with a reverse index.
///
/// Row i of every matrix built against this basis corresponds to
/// `basis.get(i)`.
#[derive(Debug, Clone)]
pub struct ConfigurationBasis {
    n_sites: usize,
    configs: Vec<Configuration>,
    index: HashMap<Configuration, usize>,
}

impl ConfigurationBasis {
    /// All `k`-particle configurations on `n` sites.
    pub fn fixed_particle(n: usize, k: usize) -> Self {
        Self::build(n, generate_configurations(n, k))
    }

    /// Wrap an explicit list, checking lengths, binary values and uniqueness.
    pub fn from_configs(configs: Vec<Configuration>) -> ChemResult<Self> {
        let n = configs.first().map_or(0, Vec::len);
        for (i, c) in configs.iter().enumerate() {
            if c.len() != n {
                return Err(ChemError::InvalidConfiguration(format!(
                    "configuration {i} has length {}, expected {n}",
                    c.len()
                )));
            }
            if c.iter().any(|&b| b > 1) {
                return Err(ChemError::InvalidConfiguration(format!(
                    "configuration {i} is not binary"
                )));
            }
        }
        let basis = Self::build(n, configs);
        if basis.index.len() != basis.configs.len() {
            return Err(ChemError::InvalidConfiguration(
                "duplicate configurations".to_string(),
            ));
        }
        Ok(basis)
    }

    fn build(n_sites: usize, configs: Vec<Configuration>) -> Self {
        let index = configs
            .iter()
            .enumerate()
            .map(|(i, c)| (c.clone(), i))
            .collect();
        Self {
            n_sites,
            configs,
            index,
        }
    }

    /// Length of each configuration.
    pub fn n_sites(&self) -> usize {
        self.n_sites
    }

    /// Number of configurations.
    pub fn len(&self) -> usize {
        self.configs.len()
    }

    /// True if the basis is empty.
    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }

    /// Configuration at row `i`.
    pub fn get(&self, i: usize) -> Option<&[u8]> {
        self.configs.get(i).map(Vec::as_slice)
    }

    /// Row of `config`, if it belongs to the basis.
    pub fn index_of(&self, config: &[u8]) -> Option<usize> {
        self.index.get(config).copied()
    }

    /// All configurations in row order.
    pub fn configs(&self) -> &[Configuration] {
        &self.configs
    }
}
