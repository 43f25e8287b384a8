//! Linguistic variables: a universe partitioned into named terms.

use std::collections::HashMap;

use super::membership::MembershipFunction;
use super::universe::Universe;
use crate::error::ConfigError;

/// Whether a variable is read from the sensors or produced by inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Antecedent,
    Consequent,
}

/// Term name → degree for one crisp value.
pub type Fuzzified = HashMap<String, f64>;

/// A named universe with overlapping terms.
///
/// Built once at start-up through the chaining [`term`](Self::term)
/// constructor; immutable afterwards.
#[derive(Debug, Clone)]
pub struct LinguisticVariable {
    name: String,
    role: Role,
    universe: Universe,
    // insertion order is kept for reporting
    terms: Vec<(String, MembershipFunction)>,
}

impl LinguisticVariable {
    pub fn antecedent(name: impl Into<String>, universe: Universe) -> Self {
        Self::new(name, Role::Antecedent, universe)
    }

    pub fn consequent(name: impl Into<String>, universe: Universe) -> Self {
        Self::new(name, Role::Consequent, universe)
    }

    pub fn new(name: impl Into<String>, role: Role, universe: Universe) -> Self {
        Self {
            name: name.into(),
            role,
            universe,
            terms: Vec::new(),
        }
    }

    /// Add a term.  Names must be unique and breakpoints inside the universe.
    pub fn term(
        mut self,
        name: impl Into<String>,
        membership: MembershipFunction,
    ) -> Result<Self, ConfigError> {
        let name = name.into();
        if self.terms.iter().any(|(n, _)| *n == name) {
            return Err(ConfigError::DuplicateTerm {
                variable: self.name,
                term: name,
            });
        }
        if !membership.fits(&self.universe) {
            return Err(ConfigError::BreakpointOutsideUniverse {
                variable: self.name,
                term: name,
            });
        }
        self.terms.push((name, membership));
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    pub fn term_names(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(|(n, _)| n.as_str())
    }

    pub fn has_term(&self, name: &str) -> bool {
        self.term_membership(name).is_some()
    }

    pub fn term_membership(&self, name: &str) -> Option<&MembershipFunction> {
        self.terms.iter().find(|(n, _)| n == name).map(|(_, mf)| mf)
    }

    pub(crate) fn membership_at(&self, index: usize) -> &MembershipFunction {
        &self.terms[index].1
    }

    /// Degree of `x` in every term.  `x` is evaluated as given; clamping is
    /// the engine's job.
    pub fn fuzzify(&self, x: f64) -> Fuzzified {
        self.terms
            .iter()
            .map(|(name, mf)| (name.clone(), mf.degree(x)))
            .collect()
    }

    /// Setup check: at every sample of the universe some term is above zero.
    pub fn check_coverage(&self) -> Result<(), ConfigError> {
        if self.terms.is_empty() {
            return Err(ConfigError::EmptyVariable(self.name.clone()));
        }
        for x in self.universe.samples() {
            if self.terms.iter().all(|(_, mf)| mf.degree(x) <= 0.) {
                return Err(ConfigError::CoverageGap {
                    variable: self.name.clone(),
                    at: x,
                });
            }
        }
        Ok(())
    }
}
