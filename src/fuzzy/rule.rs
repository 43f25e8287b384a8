//! IF-THEN rules and the small builder used to write them.
//!
//! ```ignore
//! Rule::when("temperature", "low")
//!     .and("humidity", "dry")
//!     .then("fan_speed", "off")?;
//! ```

use std::collections::HashMap;

use super::variable::Fuzzified;
use crate::error::ConfigError;

/// A `(variable, term)` pair, e.g. `temperature is low`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Clause {
    pub variable: String,
    pub term: String,
}

impl Clause {
    pub fn new(variable: impl Into<String>, term: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
            term: term.into(),
        }
    }
}

/// How the antecedent clauses of one rule combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Connective {
    /// Fuzzy conjunction, `min`.
    #[default]
    And,
    /// Fuzzy disjunction, `max`.
    Or,
}

impl Connective {
    pub fn combine(self, degrees: impl IntoIterator<Item = f64>) -> f64 {
        match self {
            Self::And => degrees.into_iter().fold(1., f64::min),
            Self::Or => degrees.into_iter().fold(0., f64::max),
        }
    }
}

/// One rule of the static rule base.  Identity is its position in the base.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    antecedents: Vec<Clause>,
    connective: Connective,
    consequent: Clause,
    weight: f64,
}

impl Rule {
    pub fn new(antecedents: Vec<Clause>, connective: Connective, consequent: Clause) -> Self {
        Self {
            antecedents,
            connective,
            consequent,
            weight: 1.,
        }
    }

    pub fn when(variable: impl Into<String>, term: impl Into<String>) -> RuleBuilder {
        RuleBuilder {
            antecedents: vec![Clause::new(variable, term)],
            connective: None,
            mixed: false,
            weight: 1.,
        }
    }

    /// Weight in `(0, 1]`; checked when the engine is built.
    #[must_use]
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn antecedents(&self) -> &[Clause] {
        &self.antecedents
    }

    pub fn connective(&self) -> Connective {
        self.connective
    }

    pub fn consequent(&self) -> &Clause {
        &self.consequent
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Firing strength: `weight × combine(clause degrees)`.
    ///
    /// A clause whose variable or term is absent contributes 0.  The engine
    /// validates references up front, so that only happens for hand-built
    /// inputs.
    pub fn fire(&self, inputs: &HashMap<String, Fuzzified>) -> f64 {
        let degrees = self.antecedents.iter().map(|clause| {
            inputs
                .get(&clause.variable)
                .and_then(|terms| terms.get(&clause.term))
                .copied()
                .unwrap_or(0.)
        });
        self.weight * self.connective.combine(degrees)
    }
}

/// Accumulates antecedent clauses until [`then`](Self::then) names the
/// consequent.
#[derive(Debug, Clone)]
pub struct RuleBuilder {
    antecedents: Vec<Clause>,
    connective: Option<Connective>,
    mixed: bool,
    weight: f64,
}

impl RuleBuilder {
    pub fn and(self, variable: impl Into<String>, term: impl Into<String>) -> Self {
        self.push(Connective::And, Clause::new(variable, term))
    }

    pub fn or(self, variable: impl Into<String>, term: impl Into<String>) -> Self {
        self.push(Connective::Or, Clause::new(variable, term))
    }

    pub fn weighted(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn then(
        self,
        variable: impl Into<String>,
        term: impl Into<String>,
    ) -> Result<Rule, ConfigError> {
        if self.mixed {
            return Err(ConfigError::MixedConnectives);
        }
        let rule = Rule::new(
            self.antecedents,
            self.connective.unwrap_or_default(),
            Clause::new(variable, term),
        );
        Ok(rule.with_weight(self.weight))
    }

    fn push(mut self, connective: Connective, clause: Clause) -> Self {
        match self.connective {
            Some(c) if c != connective => self.mixed = true,
            _ => self.connective = Some(connective),
        }
        self.antecedents.push(clause);
        self
    }
}
