//! Rules for local definite descriptions `i.A`: the carrying individual is
//! the unique one satisfying `A`.

use crate::structures::formula::{Fml, Formula};
use crate::structures::interpretation::{Interpretation, WorldId};
use crate::structures::world::{FmlSet, Slot};

use super::RuleOutcome;

fn same_contents(left: &FmlSet, right: &FmlSet) -> bool {
    left.len() == right.len() && left.iter().all(|f| right.contains(f))
}

/// `i.A` puts `A` at the individual carrying it.
pub fn local_description_rule_1(ip: &mut Interpretation) -> RuleOutcome {
    let the_worlds: Vec<WorldId> = ip.worlds().collect();

    for w in the_worlds {
        let queue: Vec<Fml> = ip.world(w).partition[Slot::LocalDesc].iter().cloned().collect();

        for fml in queue {
            let Formula::LocalDesc(body) = fml.as_ref() else {
                continue;
            };

            let world = ip.world_mut(w);
            world.partition.stage(body.clone());
            world
                .partition
                .move_formula(&fml, Slot::LocalDesc, Slot::ProcLocalDesc);
            log::trace!(target: crate::log::targets::RULES, "{fml} expanded at {}", world.name);
            return RuleOutcome::Applied(vec![]);
        }
    }

    RuleOutcome::NotApplied
}

/// Unify all individuals satisfying the operand of some `i.A`, as the
/// global merge does for `i A.B`.
pub fn local_description_rule_2(ip: &mut Interpretation) -> RuleOutcome {
    let the_worlds: Vec<WorldId> = ip.worlds().collect();

    for w in &the_worlds {
        let queue: Vec<Fml> = ip.world(*w).partition[Slot::LocalDesc]
            .iter()
            .chain(ip.world(*w).partition[Slot::ProcLocalDesc].iter())
            .cloned()
            .collect();

        for fml in queue {
            let Formula::LocalDesc(body) = fml.as_ref() else {
                continue;
            };

            let members: Vec<WorldId> = the_worlds
                .iter()
                .copied()
                .filter(|&v| ip.world(v).contains(body))
                .collect();
            if members.len() < 2 {
                continue;
            }

            let contents: Vec<FmlSet> = members.iter().map(|&v| ip.world(v).formulas()).collect();
            if contents[1..].iter().all(|c| same_contents(c, &contents[0])) {
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
                "{} individuals unified on {body}", members.len());
            return RuleOutcome::Applied(vec![]);
        }
    }

    RuleOutcome::NotApplied
}

/// Refute `¬i.A`. Either the individual fails `A`, or it is told apart from
/// the actual satisfier of `A` by a witness atom: the individual receives
/// the witness while a minted satisfier of `A` receives its negation. Each
/// concept mints its witness once per branch and later occurrences reuse it.
pub fn local_description_rule_3(ip: &mut Interpretation) -> RuleOutcome {
    let the_worlds: Vec<WorldId> = ip.worlds().collect();

    for w in the_worlds {
        let queue: Vec<Fml> = ip.world(w).partition[Slot::NegLocalDesc]
            .iter()
            .cloned()
            .collect();

        for fml in queue {
            let Formula::Negation(inner) = fml.as_ref() else {
                continue;
            };
            let Formula::LocalDesc(body) = inner.as_ref() else {
                continue;
            };
            let neg_body = Formula::negation(body.clone());

            if ip.world(w).contains(&neg_body) {
                ip.world_mut(w)
                    .partition
                    .move_formula(&fml, Slot::NegLocalDesc, Slot::ProcNegat);
                continue;
            }

            let mut alternative = ip.clone();

            let world = ip.world_mut(w);
            world.partition.stage(neg_body);
            world
                .partition
                .move_formula(&fml, Slot::NegLocalDesc, Slot::ProcNegat);
            let origin_name = world.name.clone();

            let recorded = alternative
                .ld_witnesses
                .iter()
                .find(|(concept, _)| concept == body)
                .map(|(_, witness)| witness.clone());

            match recorded {
                Some(witness) => {
                    if let Some(matched) = alternative.world_with_name(&origin_name) {
                        let world = alternative.world_mut(matched);
                        world.partition.stage(witness);
                        world
                            .partition
                            .move_formula(&fml, Slot::NegLocalDesc, Slot::ProcNegat);
                    }
                }
                None => {
                    let witness = alternative.fresh_atom();
                    if let Some(matched) = alternative.world_with_name(&origin_name) {
                        let world = alternative.world_mut(matched);
                        world.partition.stage(witness.clone());
                        world
                            .partition
                            .move_formula(&fml, Slot::NegLocalDesc, Slot::ProcNegat);
                    }
                    let mut satisfier = alternative.seeded_partition();
                    satisfier.stage(body.clone());
                    satisfier.stage(Formula::negation(witness.clone()));
                    alternative.add_world(satisfier);
                    alternative.ld_witnesses.push((body.clone(), witness));
                }
            }

            log::trace!(target: crate::log::targets::RULES,
                "{fml} refuted at {origin_name}");
            return RuleOutcome::Applied(vec![alternative]);
        }
    }

    RuleOutcome::NotApplied
}

/// Cut on the operand of any local description, as the global cut does.
pub fn local_description_cut_rule(ip: &mut Interpretation) -> RuleOutcome {
    let the_worlds: Vec<WorldId> = ip.worlds().collect();

    for w in &the_worlds {
        let queue: Vec<Fml> = ip.world(*w).partition[Slot::LocalDesc]
            .iter()
            .chain(ip.world(*w).partition[Slot::ProcLocalDesc].iter())
            .cloned()
            .collect();

        for fml in queue {
            let Formula::LocalDesc(body) = fml.as_ref() else {
                continue;
            };
            let neg_body = Formula::negation(body.clone());

            for &v in &the_worlds {
                if ip.world(v).contains(body) || ip.world(v).contains(&neg_body) {
                    continue;
                }

                let mut alternative = ip.clone();
                let target_name = ip.world(v).name.clone();

                ip.world_mut(v).partition.stage(body.clone());
                if let Some(matched) = alternative.world_with_name(&target_name) {
                    alternative.world_mut(matched).partition.stage(neg_body);
                }

                log::trace!(target: crate::log::targets::RULES,
                    "cut on {body} at {target_name}");
                return RuleOutcome::Applied(vec![alternative]);
            }
        }
    }

    RuleOutcome::NotApplied
}
