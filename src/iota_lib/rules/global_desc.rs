//! Rules for global definite descriptions `i A.B`: a unique individual
//! satisfies `A`, and that individual also satisfies `B`.

use crate::structures::formula::{Fml, Formula};
use crate::structures::interpretation::{Interpretation, WorldId};
use crate::structures::world::{FmlSet, Slot};

use super::RuleOutcome;

fn same_contents(left: &FmlSet, right: &FmlSet) -> bool {
    left.len() == right.len() && left.iter().all(|f| right.contains(f))
}

/// Expand `i A.B`: reuse an individual satisfying both operands, else stage
/// `B` where `A` already holds, else mint an individual carrying both.
/// Reuse absorbs the formula without counting as an application.
pub fn global_description_rule_1(ip: &mut Interpretation) -> RuleOutcome {
    let the_worlds: Vec<WorldId> = ip.worlds().collect();

    for w in &the_worlds {
        let queue: Vec<Fml> = ip.world(*w).partition[Slot::GlobalDesc]
            .iter()
            .cloned()
            .collect();

        'next_formula: for fml in queue {
            let Formula::GlobalDesc(first, second) = fml.as_ref() else {
                continue;
            };

            for &v in &the_worlds {
                if ip.world(v).contains(first) && ip.world(v).contains(second) {
                    ip.world_mut(*w)
                        .partition
                        .move_formula(&fml, Slot::GlobalDesc, Slot::ProcGlobalDesc);
                    continue 'next_formula;
                }
            }

            for &v in &the_worlds {
                if ip.world(v).contains(first) {
                    ip.world_mut(v).partition.stage(second.clone());
                    ip.world_mut(*w)
                        .partition
                        .move_formula(&fml, Slot::GlobalDesc, Slot::ProcGlobalDesc);
                    log::trace!(target: crate::log::targets::RULES,
                        "{fml} settled on {}", ip.world(v).name);
                    return RuleOutcome::Applied(vec![]);
                }
            }

            let mut partition = ip.seeded_partition();
            partition.stage(first.clone());
            partition.stage(second.clone());
            let minted = ip.add_world(partition);
            ip.world_mut(*w)
                .partition
                .move_formula(&fml, Slot::GlobalDesc, Slot::ProcGlobalDesc);
            log::trace!(target: crate::log::targets::RULES,
                "{fml} witnessed by {}", ip.world(minted).name);
            return RuleOutcome::Applied(vec![]);
        }
    }

    RuleOutcome::NotApplied
}

/// Unify all individuals satisfying a shared first operand: uniqueness of
/// the described individual forces them to carry the same formulas, so each
/// receives the union. Fires once per call; operands found already uniform
/// are skipped for the rest of the call.
pub fn global_description_rule_2(ip: &mut Interpretation) -> RuleOutcome {
    let mut checked = FmlSet::new();
    let the_worlds: Vec<WorldId> = ip.worlds().collect();

    for w in &the_worlds {
        let queue: Vec<Fml> = ip.world(*w).partition[Slot::GlobalDesc]
            .iter()
            .chain(ip.world(*w).partition[Slot::ProcGlobalDesc].iter())
            .cloned()
            .collect();

        for fml in queue {
            let Formula::GlobalDesc(first, _) = fml.as_ref() else {
                continue;
            };
            if checked.contains(first) {
                continue;
            }

            let members: Vec<WorldId> = the_worlds
                .iter()
                .copied()
                .filter(|&v| ip.world(v).contains(first))
                .collect();
            if members.len() < 2 {
                continue;
            }

            let contents: Vec<FmlSet> = members.iter().map(|&v| ip.world(v).formulas()).collect();
            if contents[1..].iter().all(|c| same_contents(c, &contents[0])) {
                checked.insert(first.clone());
                continue;
            }

            let mut union = FmlSet::new();
            for content in &contents {
                union.extend(content.iter().cloned());
            }
            for (member, content) in members.iter().zip(&contents) {
                let world = ip.world_mut(*member);
                for fml in union.iter().filter(|f| !content.contains(*f)) {
                    world.partition.stage(fml.clone());
                }
            }
            log::trace!(target: crate::log::targets::RULES,
                "{} individuals unified on {first}", members.len());
            return RuleOutcome::Applied(vec![]);
        }
    }

    RuleOutcome::NotApplied
}

/// Refute `¬(i A.B)` at the first individual undecided on both operands.
/// Three branches: `¬A` there; `¬B` there; or `A` is satisfied by two
/// distinct individuals, told apart by a fresh atom. The third branch marks
/// the formula processed and is never re-taken for the same `A`, which the
/// sweep at the top enforces.
pub fn global_description_rule_3(ip: &mut Interpretation) -> RuleOutcome {
    let the_worlds: Vec<WorldId> = ip.worlds().collect();

    for w in &the_worlds {
        let sweep: Vec<Fml> = ip.world(*w).partition[Slot::NegGlobalDesc]
            .iter()
            .filter(|fml| match fml.as_ref() {
                Formula::Negation(inner) => match inner.as_ref() {
                    Formula::GlobalDesc(first, _) => ip.gd_refutation_memo.contains(first),
                    _ => false,
                },
                _ => false,
            })
            .cloned()
            .collect();
        for fml in sweep {
            ip.world_mut(*w)
                .partition
                .move_formula(&fml, Slot::NegGlobalDesc, Slot::ProcNegat);
        }

        let queue: Vec<Fml> = ip.world(*w).partition[Slot::NegGlobalDesc]
            .iter()
            .cloned()
            .collect();

        for fml in queue {
            let Formula::Negation(inner) = fml.as_ref() else {
                continue;
            };
            let Formula::GlobalDesc(first, second) = inner.as_ref() else {
                continue;
            };
            let neg_first = Formula::negation(first.clone());
            let neg_second = Formula::negation(second.clone());

            let undecided = the_worlds.iter().copied().find(|&v| {
                !ip.world(v).contains(&neg_first) && !ip.world(v).contains(&neg_second)
            });
            let Some(v) = undecided else {
                continue;
            };

            let mut alternative1 = ip.clone();
            let mut alternative2 = ip.clone();

            let target_name = ip.world(v).name.clone();
            let origin_name = ip.world(*w).name.clone();

            ip.world_mut(v).partition.stage(neg_first);

            if let Some(matched) = alternative1.world_with_name(&target_name) {
                alternative1.world_mut(matched).partition.stage(neg_second);
            }

            let witness_atom = alternative2.fresh_atom();
            let mut told = alternative2.seeded_partition();
            told.stage(first.clone());
            told.stage(witness_atom.clone());
            alternative2.add_world(told);
            let mut told_apart = alternative2.seeded_partition();
            told_apart.stage(first.clone());
            told_apart.stage(Formula::negation(witness_atom));
            alternative2.add_world(told_apart);
            if let Some(matched) = alternative2.world_with_name(&origin_name) {
                alternative2
                    .world_mut(matched)
                    .partition
                    .move_formula(&fml, Slot::NegGlobalDesc, Slot::ProcNegat);
            }
            alternative2.gd_refutation_memo.insert(first.clone());

            log::trace!(target: crate::log::targets::RULES,
                "{fml} refuted at {target_name}");
            return RuleOutcome::Applied(vec![alternative1, alternative2]);
        }
    }

    RuleOutcome::NotApplied
}

/// Cut on the first operand of any global description: every individual must
/// settle whether it is the described one. Forks `A` against `¬A` at the
/// first undecided individual.
pub fn global_description_cut_rule(ip: &mut Interpretation) -> RuleOutcome {
    let the_worlds: Vec<WorldId> = ip.worlds().collect();

    for w in &the_worlds {
        let queue: Vec<Fml> = ip.world(*w).partition[Slot::GlobalDesc]
            .iter()
            .chain(ip.world(*w).partition[Slot::ProcGlobalDesc].iter())
            .cloned()
            .collect();

        for fml in queue {
            let Formula::GlobalDesc(first, _) = fml.as_ref() else {
                continue;
            };
            let neg_first = Formula::negation(first.clone());

            for &v in &the_worlds {
                if ip.world(v).contains(first) || ip.world(v).contains(&neg_first) {
                    continue;
                }

                let mut alternative = ip.clone();
                let target_name = ip.world(v).name.clone();

                ip.world_mut(v).partition.stage(first.clone());
                if let Some(matched) = alternative.world_with_name(&target_name) {
                    alternative.world_mut(matched).partition.stage(neg_first);
                }

                log::trace!(target: crate::log::targets::RULES,
                    "cut on {first} at {target_name}");
                return RuleOutcome::Applied(vec![alternative]);
            }
        }
    }

    RuleOutcome::NotApplied
}
