//! The clash rule.
//!
//! Staged formulas are compared against each other and against every formula
//! already at the individual. Only when an individual survives are its staged
//! formulas sorted into their shape pools. Classification alone does not
//! count as an application, so the rule is retried only when something new
//! stages.

use crate::structures::formula::Formula;
use crate::structures::interpretation::{Interpretation, WorldId};
use crate::structures::world::{Slot, NEGATIVE_SLOTS, POSITIVE_SLOTS};

use super::RuleOutcome;

pub fn clash_rule(ip: &mut Interpretation) -> RuleOutcome {
    let the_worlds: Vec<WorldId> = ip.worlds().collect();

    for w in the_worlds {
        let world = ip.world(w);
        let staged = world.partition.staged_count();
        if staged == 0 {
            continue;
        }

        // staged against staged, only worth checking with at least a pair
        if staged > 1 {
            for posit in &world.partition[Slot::NewPosit] {
                for negat in &world.partition[Slot::NewNegat] {
                    let Formula::Negation(sub) = negat.as_ref() else {
                        continue;
                    };
                    if posit == sub {
                        log::debug!(target: crate::log::targets::CLASH, "{} clashes on {posit} at {}", negat, world.name);
                        return RuleOutcome::Clash;
                    }
                }
            }
        }

        // staged positives against the resident negative pools
        for posit in &world.partition[Slot::NewPosit] {
            for slot in NEGATIVE_SLOTS {
                for negat in &world.partition[slot] {
                    let Formula::Negation(sub) = negat.as_ref() else {
                        continue;
                    };
                    if posit == sub {
                        log::debug!(target: crate::log::targets::CLASH, "{} clashes on {posit} at {}", negat, world.name);
                        return RuleOutcome::Clash;
                    }
                }
            }
        }

        // staged negatives against the resident positive pools
        for negat in &world.partition[Slot::NewNegat] {
            let Formula::Negation(sub) = negat.as_ref() else {
                continue;
            };
            for slot in POSITIVE_SLOTS {
                if world.partition[slot].contains(sub) {
                    log::debug!(target: crate::log::targets::CLASH, "{} clashes on {sub} at {}", negat, world.name);
                    return RuleOutcome::Clash;
                }
            }
        }

        ip.world_mut(w).partition.classify_staged();
    }

    RuleOutcome::NotApplied
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structures::formula::Formula;
    use crate::structures::world::Partition;

    #[test]
    fn staged_pair_clashes() {
        let mut ip = Interpretation::new();
        let mut partition = Partition::empty();
        partition.stage(Formula::atom("A"));
        partition.stage(Formula::negation(Formula::atom("A")));
        ip.add_named_world("w0", partition);

        assert!(matches!(clash_rule(&mut ip), RuleOutcome::Clash));
    }

    #[test]
    fn staged_negative_against_resident_positive() {
        let mut ip = Interpretation::new();
        let mut partition = Partition::empty();
        partition.stage(Formula::atom("A"));
        let w = ip.add_named_world("w0", partition);
        assert!(matches!(clash_rule(&mut ip), RuleOutcome::NotApplied));

        ip.world_mut(w)
            .partition
            .stage(Formula::negation(Formula::atom("A")));
        assert!(matches!(clash_rule(&mut ip), RuleOutcome::Clash));
    }

    #[test]
    fn survivors_are_classified() {
        let mut ip = Interpretation::new();
        let mut partition = Partition::empty();
        partition.stage(Formula::atom("A"));
        partition.stage(Formula::negation(Formula::atom("B")));
        let w = ip.add_named_world("w0", partition);

        assert!(matches!(clash_rule(&mut ip), RuleOutcome::NotApplied));
        assert_eq!(ip.world(w).partition.staged_count(), 0);
        assert!(ip.world(w).partition[Slot::Atoms].contains(&Formula::atom("A")));
        assert!(ip.world(w).partition[Slot::NegAtoms]
            .contains(&Formula::negation(Formula::atom("B"))));
    }

    #[test]
    fn commutative_conjunction_clashes_either_way() {
        let mut ip = Interpretation::new();
        let ab = Formula::conjunction(Formula::atom("A"), Formula::atom("B"));
        let ba = Formula::conjunction(Formula::atom("B"), Formula::atom("A"));
        let mut partition = Partition::empty();
        partition.stage(ab);
        partition.stage(Formula::negation(ba));
        ip.add_named_world("w0", partition);

        assert!(matches!(clash_rule(&mut ip), RuleOutcome::Clash));
    }
}
