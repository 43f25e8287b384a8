//! Mamdani inference: min-AND, min-implication, max-aggregation.
//!
//! ```text
//!  crisp inputs ──▶ clamp ──▶ fuzzify ──▶ fire rules ──▶ clip terms ──▶ max ──▶ AggregatedMembership
//! ```
//!
//! The engine owns the variables and the rule base.  Both are validated once
//! in [`InferenceEngine::new`] and never change afterwards, so a shared
//! reference is all the control loop needs.

use std::collections::HashMap;

use log::{debug, warn};

use super::defuzz::Defuzzifier;
use super::membership::MembershipFunction;
use super::rule::{Clause, Rule};
use super::universe::Universe;
use super::variable::{Fuzzified, LinguisticVariable, Role};
use crate::error::{ConfigError, InferenceError};

// ───────────────────────────────────────────────────────────────
// Inputs / outputs
// ───────────────────────────────────────────────────────────────

/// One crisp value per antecedent variable, supplied fresh each cycle.
#[derive(Debug, Clone, Default)]
pub struct Inputs(HashMap<String, f64>);

impl Inputs {
    pub fn new() -> Self {
        Inputs(HashMap::new())
    }

    pub fn add(&mut self, variable: impl Into<String>, value: f64) {
        self.0.insert(variable.into(), value);
    }

    #[must_use]
    pub fn with(mut self, variable: impl Into<String>, value: f64) -> Self {
        self.add(variable, value);
        self
    }

    pub fn get(&self, variable: &str) -> Option<f64> {
        self.0.get(variable).copied()
    }
}

/// Crisp value of one consequent after defuzzification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crisp {
    pub value: f64,
    /// The aggregated set has zero sampled area (no rule fired, or only on
    /// terms falling between samples); `value` is the universe midpoint.
    pub fallback: bool,
}

/// One crisp value per consequent variable, valid for the current cycle only.
#[derive(Debug, Clone, Default)]
pub struct Outputs(HashMap<String, Crisp>);

impl Outputs {
    pub fn get(&self, variable: &str) -> Option<f64> {
        self.0.get(variable).map(|c| c.value)
    }

    pub fn crisp(&self, variable: &str) -> Option<Crisp> {
        self.0.get(variable).copied()
    }

    /// Like [`crisp`](Self::crisp), but a missing consequent is an error.
    pub fn require(&self, variable: &str) -> Result<Crisp, InferenceError> {
        self.crisp(variable)
            .ok_or_else(|| InferenceError::MissingOutput(variable.to_owned()))
    }

    pub fn used_fallback(&self, variable: &str) -> bool {
        self.0.get(variable).is_some_and(|c| c.fallback)
    }
}

// ───────────────────────────────────────────────────────────────
// Aggregated membership
// ───────────────────────────────────────────────────────────────

/// One consequent term clipped at the strongest rule that claims it.
#[derive(Debug, Clone, PartialEq)]
pub struct TermActivation {
    pub term: String,
    pub strength: f64,
    membership: MembershipFunction,
}

impl TermActivation {
    /// `min(strength, term_degree(y))`
    pub fn degree(&self, y: f64) -> f64 {
        self.strength.min(self.membership.degree(y))
    }
}

/// The Mamdani union of every rule output for one consequent variable.
///
/// Clipping a term by the maximum strength of the rules pointing at it is
/// the same as taking the pointwise maximum of every rule's clipped term,
/// so one activation per term is kept instead of one per rule.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedMembership {
    universe: Universe,
    activations: Vec<TermActivation>,
}

impl AggregatedMembership {
    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    pub fn activations(&self) -> &[TermActivation] {
        &self.activations
    }

    /// Aggregated degree at output value `y`.
    pub fn degree(&self, y: f64) -> f64 {
        self.activations
            .iter()
            .map(|a| a.degree(y))
            .fold(0., f64::max)
    }

    /// True when no rule fired above zero; the function is identically 0.
    /// A false result does not guarantee a non-zero sampled area.
    pub fn is_zero(&self) -> bool {
        self.activations.iter().all(|a| a.strength <= 0.)
    }

    /// `(y, degree)` at every sample of `universe`.
    pub fn sample<'a>(&'a self, universe: &Universe) -> impl Iterator<Item = (f64, f64)> + 'a {
        universe.samples().map(move |y| (y, self.degree(y)))
    }
}

// ───────────────────────────────────────────────────────────────
// Engine
// ───────────────────────────────────────────────────────────────

/// Holds the registered variables and the rule base.
#[derive(Debug, Clone)]
pub struct InferenceEngine {
    variables: Vec<LinguisticVariable>,
    rules: Vec<Rule>,
}

impl InferenceEngine {
    /// Validate and freeze the variables and rule base.
    ///
    /// Checks, in order: unique variable names, term coverage of every
    /// variable, at least one consequent, and for every rule its weight,
    /// its clause references and the role of each referenced variable.
    pub fn new(variables: Vec<LinguisticVariable>, rules: Vec<Rule>) -> Result<Self, ConfigError> {
        for (i, var) in variables.iter().enumerate() {
            if variables[..i].iter().any(|v| v.name() == var.name()) {
                return Err(ConfigError::DuplicateVariable(var.name().to_owned()));
            }
            var.check_coverage()?;
        }
        if !variables.iter().any(|v| v.role() == Role::Consequent) {
            return Err(ConfigError::NoConsequent);
        }

        let engine = Self { variables, rules };
        for (i, rule) in engine.rules.iter().enumerate() {
            engine.check_rule(i, rule)?;
        }

        debug!(
            "Inference engine ready: {} variables, {} rules",
            engine.variables.len(),
            engine.rules.len()
        );
        Ok(engine)
    }

    fn check_rule(&self, index: usize, rule: &Rule) -> Result<(), ConfigError> {
        let weight = rule.weight();
        if !(weight > 0. && weight <= 1.) {
            return Err(ConfigError::InvalidWeight {
                rule: index,
                weight,
            });
        }
        if rule.antecedents().is_empty() {
            return Err(ConfigError::EmptyRule(index));
        }
        for clause in rule.antecedents() {
            self.check_clause(index, clause, Role::Antecedent)?;
        }
        self.check_clause(index, rule.consequent(), Role::Consequent)
    }

    fn check_clause(&self, index: usize, clause: &Clause, role: Role) -> Result<(), ConfigError> {
        let var = self
            .variable(&clause.variable)
            .ok_or_else(|| ConfigError::UnknownVariable {
                rule: index,
                variable: clause.variable.clone(),
            })?;
        if var.role() != role {
            return Err(ConfigError::RoleMismatch {
                rule: index,
                variable: clause.variable.clone(),
            });
        }
        if !var.has_term(&clause.term) {
            return Err(ConfigError::UnknownTerm {
                rule: index,
                variable: clause.variable.clone(),
                term: clause.term.clone(),
            });
        }
        Ok(())
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn variable(&self, name: &str) -> Option<&LinguisticVariable> {
        self.variables.iter().find(|v| v.name() == name)
    }

    pub fn antecedents(&self) -> impl Iterator<Item = &LinguisticVariable> {
        self.variables.iter().filter(|v| v.role() == Role::Antecedent)
    }

    pub fn consequents(&self) -> impl Iterator<Item = &LinguisticVariable> {
        self.variables.iter().filter(|v| v.role() == Role::Consequent)
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    // ── Inference ─────────────────────────────────────────────

    /// Clamp every crisp input to its universe and fuzzify it.
    pub fn fuzzify(&self, inputs: &Inputs) -> Result<HashMap<String, Fuzzified>, InferenceError> {
        if let Some(unknown) = inputs
            .0
            .keys()
            .find(|name| self.antecedents().all(|v| v.name() != name.as_str()))
        {
            return Err(InferenceError::UnknownInput(unknown.clone()));
        }

        let mut fuzzified = HashMap::with_capacity(inputs.0.len());
        for var in self.antecedents() {
            let value = inputs
                .get(var.name())
                .ok_or_else(|| InferenceError::MissingInput(var.name().to_owned()))?;
            if !value.is_finite() {
                return Err(InferenceError::NonFiniteInput {
                    variable: var.name().to_owned(),
                    value,
                });
            }
            let clamped = var.universe().clamp(value);
            if clamped != value {
                warn!(
                    "{} = {} outside [{}, {}], clamped to {}",
                    var.name(),
                    value,
                    var.universe().min(),
                    var.universe().max(),
                    clamped
                );
            }
            fuzzified.insert(var.name().to_owned(), var.fuzzify(clamped));
        }
        Ok(fuzzified)
    }

    /// Firing strength of every rule, in rule-base order.
    pub fn firing_strengths(&self, inputs: &Inputs) -> Result<Vec<f64>, InferenceError> {
        let fuzzified = self.fuzzify(inputs)?;
        Ok(self.rules.iter().map(|r| r.fire(&fuzzified)).collect())
    }

    /// One aggregated membership function per consequent variable.
    pub fn evaluate(
        &self,
        inputs: &Inputs,
    ) -> Result<HashMap<String, AggregatedMembership>, InferenceError> {
        let strengths = self.firing_strengths(inputs)?;
        debug!("Rule strengths: {:?}", strengths);

        let aggregated = self
            .consequents()
            .map(|var| {
                let activations = var
                    .term_names()
                    .enumerate()
                    .map(|(t, term)| {
                        let strength = self
                            .rules
                            .iter()
                            .zip(&strengths)
                            .filter(|(rule, _)| {
                                let c = rule.consequent();
                                c.variable == var.name() && c.term == term
                            })
                            .map(|(_, s)| *s)
                            .fold(0., f64::max);
                        TermActivation {
                            term: term.to_owned(),
                            strength,
                            membership: *var.membership_at(t),
                        }
                    })
                    .collect();
                let agg = AggregatedMembership {
                    universe: *var.universe(),
                    activations,
                };
                (var.name().to_owned(), agg)
            })
            .collect();
        Ok(aggregated)
    }

    /// Evaluate and reduce every consequent to a crisp value.
    pub fn infer(&self, inputs: &Inputs, defuzzifier: Defuzzifier) -> Result<Outputs, InferenceError> {
        let outputs = self
            .evaluate(inputs)?
            .into_iter()
            .map(|(name, agg)| {
                let crisp = match defuzzifier.reduce(&agg, agg.universe()) {
                    Some(value) => Crisp { value, fallback: false },
                    None => Crisp {
                        value: agg.universe().midpoint(),
                        fallback: true,
                    },
                };
                (name, crisp)
            })
            .collect();
        Ok(Outputs(outputs))
    }
}
