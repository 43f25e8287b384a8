//! Fuzzy inference core: pure computation, zero I/O.
//!
//! ```text
//!  Universe ─▶ MembershipFunction ─▶ LinguisticVariable ─┐
//!                                                         ├─▶ InferenceEngine ─▶ Defuzzifier
//!                                     Rule ──────────────┘
//! ```

pub mod defuzz;
pub mod engine;
pub mod linspace;
pub mod membership;
pub mod rule;
pub mod universe;
pub mod variable;

pub use defuzz::Defuzzifier;
pub use engine::{AggregatedMembership, Crisp, InferenceEngine, Inputs, Outputs, TermActivation};
pub use membership::MembershipFunction;
pub use rule::{Clause, Connective, Rule, RuleBuilder};
pub use universe::Universe;
pub use variable::{Fuzzified, LinguisticVariable, Role};
