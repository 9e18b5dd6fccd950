//! The expansion rules.
//!
//! Each rule inspects the current interpretation and either reports a clash,
//! applies (possibly forking alternative interpretations for the branch
//! stack), or reports that nothing was applicable. A rule that forks clones
//! the interpretation *before* touching it, so an alternative never carries a
//! partial mutation, and locates "the same" individual in a clone by name.

pub mod clash;
pub mod global_desc;
pub mod local_desc;
pub mod propositional;
pub mod role;

use crate::structures::interpretation::Interpretation;

#[derive(Debug)]
pub enum RuleOutcome {
    /// An individual carries a formula and its negation. The branch closes.
    Clash,
    /// The rule fired. Alternative interpretations, if any, go on the
    /// branch stack.
    Applied(Vec<Interpretation>),
    NotApplied,
}

pub type RuleFn = fn(&mut Interpretation) -> RuleOutcome;

/// The rules in priority order. The driver applies the first rule that
/// fires and then restarts from the top, so the clash check always runs
/// before anything else touches the staged formulas.
pub const RULE_SEQUENCE: [(&str, RuleFn); 14] = [
    ("clash", clash::clash_rule),
    ("double negation", propositional::double_negation_rule),
    ("conjunction", propositional::conjunction_rule),
    ("role 2", role::role_rule_2),
    ("negated conjunction", propositional::negated_conjunction_rule),
    ("local description 1", local_desc::local_description_rule_1),
    ("local description 2", local_desc::local_description_rule_2),
    ("local description 3", local_desc::local_description_rule_3),
    ("local description cut", local_desc::local_description_cut_rule),
    ("global description 1", global_desc::global_description_rule_1),
    ("global description 2", global_desc::global_description_rule_2),
    ("global description 3", global_desc::global_description_rule_3),
    ("global description cut", global_desc::global_description_cut_rule),
    ("role 1", role::role_rule_1),
];
