//! Propositional rules: double negation, conjunction and its negation.

use crate::structures::formula::{Fml, Formula};
use crate::structures::interpretation::{Interpretation, WorldId};
use crate::structures::world::Slot;

use super::RuleOutcome;

/// `¬¬A` yields `A`. One formula per application; a double negation whose
/// body is already present is absorbed silently.
pub fn double_negation_rule(ip: &mut Interpretation) -> RuleOutcome {
    let the_worlds: Vec<WorldId> = ip.worlds().collect();

    for w in the_worlds {
        let queue: Vec<Fml> = ip.world(w).partition[Slot::DoubleNeg].iter().cloned().collect();

        for fml in queue {
            let Formula::Negation(inner) = fml.as_ref() else {
                continue;
            };
            let Formula::Negation(body) = inner.as_ref() else {
                continue;
            };

            if ip.world(w).contains(body) {
                ip.world_mut(w)
                    .partition
                    .move_formula(&fml, Slot::DoubleNeg, Slot::ProcNegat);
                continue;
            }

            let world = ip.world_mut(w);
            world.partition.stage(body.clone());
            world
                .partition
                .move_formula(&fml, Slot::DoubleNeg, Slot::ProcNegat);
            log::trace!(target: crate::log::targets::RULES, "{fml} unwrapped at {}", world.name);
            return RuleOutcome::Applied(vec![]);
        }
    }

    RuleOutcome::NotApplied
}

/// `AΠB` yields both conjuncts. Conjuncts already present are not re-staged.
pub fn conjunction_rule(ip: &mut Interpretation) -> RuleOutcome {
    let the_worlds: Vec<WorldId> = ip.worlds().collect();

    for w in the_worlds {
        let queue: Vec<Fml> = ip.world(w).partition[Slot::Conjunction]
            .iter()
            .cloned()
            .collect();

        for fml in queue {
            let Formula::Conjunction(left, right) = fml.as_ref() else {
                continue;
            };
            let left_present = ip.world(w).contains(left);
            let right_present = ip.world(w).contains(right);

            if left_present && right_present {
                ip.world_mut(w)
                    .partition
                    .move_formula(&fml, Slot::Conjunction, Slot::ProcPosit);
                continue;
            }

            let world = ip.world_mut(w);
            if !left_present {
                world.partition.stage(left.clone());
            }
            if !right_present {
                world.partition.stage(right.clone());
            }
            world
                .partition
                .move_formula(&fml, Slot::Conjunction, Slot::ProcPosit);
            log::trace!(target: crate::log::targets::RULES, "{fml} split at {}", world.name);
            return RuleOutcome::Applied(vec![]);
        }
    }

    RuleOutcome::NotApplied
}

/// `¬(AΠB)` branches on `¬A` and `¬B`. The current interpretation takes the
/// left disjunct, a clone takes the right; when either negation is already
/// present the formula is skipped entirely.
pub fn negated_conjunction_rule(ip: &mut Interpretation) -> RuleOutcome {
    let the_worlds: Vec<WorldId> = ip.worlds().collect();

    for w in the_worlds {
        let queue: Vec<Fml> = ip.world(w).partition[Slot::NegConjunction]
            .iter()
            .cloned()
            .collect();

        for fml in queue {
            let Formula::Negation(inner) = fml.as_ref() else {
                continue;
            };
            let Formula::Conjunction(left, right) = inner.as_ref() else {
                continue;
            };
            let neg_left = Formula::negation(left.clone());
            let neg_right = Formula::negation(right.clone());

            if ip.world(w).contains(&neg_left) || ip.world(w).contains(&neg_right) {
                continue;
            }

            let mut alternative = ip.clone();

            let world = ip.world_mut(w);
            world.partition.stage(neg_left);
            world
                .partition
                .move_formula(&fml, Slot::NegConjunction, Slot::ProcNegat);
            let name = world.name.clone();

            if let Some(matched) = alternative.world_with_name(&name) {
                let world = alternative.world_mut(matched);
                world.partition.stage(neg_right);
                world
                    .partition
                    .move_formula(&fml, Slot::NegConjunction, Slot::ProcNegat);
            }

            log::trace!(target: crate::log::targets::RULES, "{fml} branched at {name}");
            return RuleOutcome::Applied(vec![alternative]);
        }
    }

    RuleOutcome::NotApplied
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::clash::clash_rule;
    use crate::structures::world::Partition;

    fn world_with(fmls: &[Fml]) -> (Interpretation, WorldId) {
        let mut ip = Interpretation::new();
        let mut partition = Partition::empty();
        for fml in fmls {
            partition.stage(fml.clone());
        }
        let w = ip.add_named_world("w0", partition);
        assert!(matches!(clash_rule(&mut ip), RuleOutcome::NotApplied));
        (ip, w)
    }

    #[test]
    fn double_negation_unwraps_once() {
        let a = Formula::atom("A");
        let fml = Formula::negation(Formula::negation(a.clone()));
        let (mut ip, w) = world_with(&[fml.clone()]);

        assert!(matches!(
            double_negation_rule(&mut ip),
            RuleOutcome::Applied(_)
        ));
        assert!(ip.world(w).partition[Slot::NewPosit].contains(&a));
        assert!(ip.world(w).partition[Slot::ProcNegat].contains(&fml));
        assert!(matches!(
            double_negation_rule(&mut ip),
            RuleOutcome::NotApplied
        ));
    }

    #[test]
    fn conjunction_stages_missing_conjuncts() {
        let a = Formula::atom("A");
        let b = Formula::atom("B");
        let fml = Formula::conjunction(a.clone(), b.clone());
        let (mut ip, w) = world_with(&[fml.clone(), a.clone()]);

        assert!(matches!(conjunction_rule(&mut ip), RuleOutcome::Applied(_)));
        // A was already present, so only B stages
        assert!(!ip.world(w).partition[Slot::NewPosit].contains(&a));
        assert!(ip.world(w).partition[Slot::NewPosit].contains(&b));
        assert!(ip.world(w).partition[Slot::ProcPosit].contains(&fml));
    }

    #[test]
    fn negated_conjunction_forks() {
        let a = Formula::atom("A");
        let b = Formula::atom("B");
        let fml = Formula::negation(Formula::conjunction(a.clone(), b.clone()));
        let (mut ip, w) = world_with(&[fml.clone()]);

        let RuleOutcome::Applied(alternatives) = negated_conjunction_rule(&mut ip) else {
            panic!("expected an application");
        };
        assert_eq!(alternatives.len(), 1);

        assert!(ip.world(w).partition[Slot::NewNegat].contains(&Formula::negation(a.clone())));
        let alt = &alternatives[0];
        let alt_w = alt.world_with_name("w0").unwrap();
        assert!(alt.world(alt_w).partition[Slot::NewNegat].contains(&Formula::negation(b)));
        // the fork carries no trace of the left disjunct
        assert!(!alt.world(alt_w).contains(&Formula::negation(a)));
    }

    #[test]
    fn negated_conjunction_skips_when_settled() {
        let a = Formula::atom("A");
        let b = Formula::atom("B");
        let fml = Formula::negation(Formula::conjunction(a.clone(), b));
        let (mut ip, _) = world_with(&[fml, Formula::negation(a)]);

        assert!(matches!(
            negated_conjunction_rule(&mut ip),
            RuleOutcome::NotApplied
        ));
    }
}
