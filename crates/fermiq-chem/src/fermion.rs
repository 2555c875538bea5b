//! Second-quantized fermionic operators.
//!
//! A [`FermionOperator`] maps ordered ladder-operator strings to real
//! coefficients. Strings use the common text form `"0^ 3 1"`: an index
//! followed by `^` is a creation operator, a bare index is an annihilation
//! operator.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use ndarray::Array4;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ChemError, ChemResult};
use crate::integrals::IntegralSet;

/// Creation or annihilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Ladder {
    /// `a†`
    Create,
    /// `a`
    Annihilate,
}

/// One ladder operator on a fermionic mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LadderOp {
    /// Mode index.
    pub mode: u32,
    /// Which ladder operator.
    pub action: Ladder,
}

impl LadderOp {
    /// `a†_mode`
    pub fn create(mode: u32) -> Self {
        Self {
            mode,
            action: Ladder::Create,
        }
    }

    /// `a_mode`
    pub fn annihilate(mode: u32) -> Self {
        Self {
            mode,
            action: Ladder::Annihilate,
        }
    }
}

impl fmt::Display for LadderOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.action {
            Ladder::Create => write!(f, "{}^", self.mode),
            Ladder::Annihilate => write!(f, "{}", self.mode),
        }
    }
}

/// Parse `"0^ 1"` into ladder operators. The empty string is the identity.
pub fn parse_ladder_string(s: &str) -> ChemResult<Vec<LadderOp>> {
    s.split_whitespace()
        .map(|tok| {
            let (digits, action) = match tok.strip_suffix('^') {
                Some(d) => (d, Ladder::Create),
                None => (tok, Ladder::Annihilate),
            };
            let mode = digits
                .parse::<u32>()
                .map_err(|_| ChemError::InvalidConfiguration(format!("bad ladder token '{tok}'")))?;
            Ok(LadderOp { mode, action })
        })
        .collect()
}

/// A real-weighted sum of ladder-operator strings.
///
/// Built additively; there is no way to remove a term once added.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FermionOperator {
    terms: BTreeMap<Vec<LadderOp>, f64>,
}

impl FermionOperator {
    /// The zero operator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `coeff · ops`, merging with an existing identical string.
    pub fn add_term(&mut self, ops: Vec<LadderOp>, coeff: f64) {
        *self.terms.entry(ops).or_insert(0.0) += coeff;
    }

    /// Add `coeff` times the string written in text form.
    pub fn add_parsed(&mut self, ops: &str, coeff: f64) -> ChemResult<()> {
        self.add_term(parse_ladder_string(ops)?, coeff);
        Ok(())
    }

    /// Terms in string order.
    pub fn iter(&self) -> impl Iterator<Item = (&[LadderOp], f64)> {
        self.terms.iter().map(|(k, v)| (k.as_slice(), *v))
    }

    /// Number of stored terms.
    pub fn n_terms(&self) -> usize {
        self.terms.len()
    }

    /// One past the highest mode referenced.
    pub fn n_modes(&self) -> usize {
        self.terms
            .keys()
            .flat_map(|ops| ops.iter().map(|o| o.mode as usize + 1))
            .max()
            .unwrap_or(0)
    }
}

impl fmt::Display for FermionOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (ops, c) in &self.terms {
            let s: Vec<String> = ops.iter().map(ToString::to_string).collect();
            writeln!(f, "{c:+.8} [{}]", s.join(" "))?;
        }
        Ok(())
    }
}

/// How spatial orbitals become fermionic modes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpinMode {
    /// Spatial orbital p gives modes 2p (α) and 2p+1 (β).
    #[default]
    SpinOrbital,
    /// One mode per spatial orbital, no spin.
    ///
    /// Two-body coefficients always come from
    /// [`IntegralSet::physicist_eri`], so a chemist-ordered tensor is
    /// reordered before it reaches `p^ q^ s r`. To feed a raw tensor into
    /// that string unchanged, tag the integrals
    /// [`EriConvention::Physicist`](crate::integrals::EriConvention::Physicist).
    Spatial,
}

impl FromStr for SpinMode {
    type Err = ChemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "spin-orbital" => Ok(Self::SpinOrbital),
            "spatial" => Ok(Self::Spatial),
            other => Err(ChemError::InvalidConfiguration(format!(
                "unknown spin mode '{other}'"
            ))),
        }
    }
}

impl SpinMode {
    /// Number of modes for `n_orb` spatial orbitals.
    pub fn n_modes(self, n_orb: usize) -> usize {
        match self {
            Self::SpinOrbital => 2 * n_orb,
            Self::Spatial => n_orb,
        }
    }

    /// `(spatial orbital, spin)` of a mode; spin is always 0 in spatial mode.
    fn split(self, mode: usize) -> (usize, usize) {
        match self {
            Self::SpinOrbital => (mode / 2, mode % 2),
            Self::Spatial => (mode, 0),
        }
    }
}

/// Default magnitude below which Hamiltonian terms are skipped.
pub const DEFAULT_CUTOFF: f64 = 1e-12;

/// Assemble `H = Σ h[P,Q] P^ Q + ½ Σ <PQ|RS> P^ Q^ S R (+ e_nuc)`.
pub fn molecular_hamiltonian(
    integrals: &IntegralSet,
    spin_mode: SpinMode,
    cutoff: f64,
) -> FermionOperator {
    let n_modes = spin_mode.n_modes(integrals.n_orb);
    let phys: Array4<f64> = integrals.physicist_eri();
    let mut op = FermionOperator::new();

    if integrals.e_nuc != 0.0 {
        op.add_term(Vec::new(), integrals.e_nuc);
    }

    for pm in 0..n_modes {
        let (p, sp) = spin_mode.split(pm);
        for qm in 0..n_modes {
            let (q, sq) = spin_mode.split(qm);
            if sp != sq {
                continue;
            }
            let c = integrals.h1[[p, q]];
            if c.abs() > cutoff {
                op.add_term(
                    vec![LadderOp::create(pm as u32), LadderOp::annihilate(qm as u32)],
                    c,
                );
            }
        }
    }

    for pm in 0..n_modes {
        let (p, sp) = spin_mode.split(pm);
        for qm in 0..n_modes {
            if qm == pm {
                continue;
            }
            let (q, sq) = spin_mode.split(qm);
            for rm in 0..n_modes {
                let (r, sr) = spin_mode.split(rm);
                if sr != sp {
                    continue;
                }
                for sm in 0..n_modes {
                    if sm == rm {
                        continue;
                    }
                    let (s, ss) = spin_mode.split(sm);
                    if ss != sq {
                        continue;
                    }
                    let c = 0.5 * phys[[p, q, r, s]];
                    if c.abs() > cutoff {
                        op.add_term(
                            vec![
                                LadderOp::create(pm as u32),
                                LadderOp::create(qm as u32),
                                LadderOp::annihilate(sm as u32),
                                LadderOp::annihilate(rm as u32),
                            ],
                            c,
                        );
                    }
                }
            }
        }
    }

    debug!(n_modes, n_terms = op.n_terms(), ?spin_mode, "assembled fermionic Hamiltonian");
    op
}
