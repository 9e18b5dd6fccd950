//! Role rules: existential witnesses with blocking, and universal
//! propagation.

use std::collections::HashMap;

use crate::structures::formula::{Fml, Formula, Role};
use crate::structures::interpretation::{Interpretation, WorldId};
use crate::structures::world::{FmlSet, Slot};

use super::RuleOutcome;

/// Expand `Ǝ r A`.
///
/// In order of preference: reuse an `r` successor already satisfying `A`,
/// block on some non-successor satisfying both `A` and every universal
/// obligation recorded for `r`, or mint a fresh witness. Minting leaves the
/// formula unprocessed; the next application absorbs it through the reuse
/// case once the witness's formulas are classified.
pub fn role_rule_1(ip: &mut Interpretation) -> RuleOutcome {
    let the_worlds: Vec<WorldId> = ip.worlds().collect();

    for w in the_worlds {
        refresh_candidates(ip, w);

        let queue: Vec<Fml> = ip.world(w).partition[Slot::Diamond].iter().cloned().collect();

        for fml in queue {
            let Formula::Diamond(role, body) = fml.as_ref() else {
                continue;
            };

            // reuse
            let related = ip.related_worlds(w, role);
            if related.iter().any(|&v| ip.world(v).contains(body)) {
                ip.world_mut(w)
                    .partition
                    .move_formula(&fml, Slot::Diamond, Slot::ProcPosit);
                return RuleOutcome::Applied(vec![]);
            }

            // block
            let obligations = ip.world(w).box_subformulas.get(role).cloned();
            for v in ip.unrelated_worlds(w, role) {
                let candidate = ip.world(v);
                let body_holds = candidate.contains(body);
                let obligations_hold = obligations
                    .as_ref()
                    .map_or(true, |set| set.iter().all(|f| candidate.contains(f)));
                if body_holds && obligations_hold {
                    log::debug!(target: crate::log::targets::BLOCKING,
                        "{} blocks {fml} from {}", candidate.name, ip.world(w).name);
                    let world = ip.world_mut(w);
                    world
                        .candidates_blocking
                        .entry(v)
                        .or_default()
                        .entry(role.clone())
                        .or_default()
                        .insert(fml.clone());
                    world
                        .partition
                        .move_formula(&fml, Slot::Diamond, Slot::ProcPosit);
                    return RuleOutcome::Applied(vec![]);
                }
            }

            // mint a witness
            let mut partition = ip.seeded_partition();
            partition.stage(body.clone());
            for resident in ip.world(w).partition[Slot::ProcNegat].iter() {
                let Formula::Negation(inner) = resident.as_ref() else {
                    continue;
                };
                let Formula::Diamond(obligation_role, obligation_body) = inner.as_ref() else {
                    continue;
                };
                if obligation_role == role {
                    partition.stage(Formula::negation(obligation_body.clone()));
                }
            }
            let witness = ip.add_world(partition);
            ip.add_edge(w, witness, role);
            log::trace!(target: crate::log::targets::RULES,
                "{fml} witnessed by {}", ip.world(witness).name);
            return RuleOutcome::Applied(vec![]);
        }
    }

    RuleOutcome::NotApplied
}

/// Re-check every blocking candidate of `w` against the universal
/// obligations recorded since it was chosen. A diamond whose candidate no
/// longer qualifies is restored to the unprocessed pool for re-expansion.
/// The single place a processed formula is un-processed.
fn refresh_candidates(ip: &mut Interpretation, w: WorldId) {
    if ip.world(w).candidates_blocking.is_empty() || ip.world(w).box_subformulas.is_empty() {
        return;
    }

    let entries: Vec<(WorldId, Role, FmlSet)> = ip
        .world(w)
        .candidates_blocking
        .iter()
        .flat_map(|(&candidate, roles)| {
            roles
                .iter()
                .map(move |(role, blocked)| (candidate, role.clone(), blocked.clone()))
        })
        .collect();

    let mut keep: HashMap<WorldId, HashMap<Role, FmlSet>> = HashMap::new();
    let mut restore: Vec<Fml> = Vec::new();

    for (candidate, role, blocked) in entries {
        let still_valid = match ip.world(w).box_subformulas.get(&role) {
            None => true,
            Some(obligations) => {
                let candidate_world = ip.world(candidate);
                obligations.iter().all(|f| candidate_world.contains(f))
            }
        };
        match still_valid {
            true => {
                keep.entry(candidate).or_default().insert(role, blocked);
            }
            false => {
                log::debug!(target: crate::log::targets::BLOCKING,
                    "{} no longer blocks for {} at {}", ip.world(candidate).name, role, ip.world(w).name);
                restore.extend(blocked);
            }
        }
    }

    let world = ip.world_mut(w);
    for fml in restore {
        world
            .partition
            .move_formula(&fml, Slot::ProcPosit, Slot::Diamond);
    }
    world.candidates_blocking = keep;
}

/// Process `¬Ǝ r A`: record the universal obligation and stage `¬A` at every
/// current `r` successor. Successors minted later receive the obligation at
/// minting time.
pub fn role_rule_2(ip: &mut Interpretation) -> RuleOutcome {
    let the_worlds: Vec<WorldId> = ip.worlds().collect();

    for w in the_worlds {
        let queue: Vec<Fml> = ip.world(w).partition[Slot::NegDiamond]
            .iter()
            .cloned()
            .collect();

        for fml in queue {
            let Formula::Negation(inner) = fml.as_ref() else {
                continue;
            };
            let Formula::Diamond(role, body) = inner.as_ref() else {
                continue;
            };

            let successors = ip.related_worlds(w, role);

            ip.world_mut(w)
                .box_subformulas
                .entry(role.clone())
                .or_default()
                .insert(fml.clone());

            let negated_body = Formula::negation(body.clone());
            for v in successors {
                ip.world_mut(v).partition.stage(negated_body.clone());
            }

            ip.world_mut(w)
                .partition
                .move_formula(&fml, Slot::NegDiamond, Slot::ProcNegat);
            log::trace!(target: crate::log::targets::RULES, "{fml} recorded at {}", ip.world(w).name);
            return RuleOutcome::Applied(vec![]);
        }
    }

    RuleOutcome::NotApplied
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::clash::clash_rule;
    use crate::structures::world::Partition;

    fn classified(ip: &mut Interpretation) {
        assert!(matches!(clash_rule(ip), RuleOutcome::NotApplied));
    }

    #[test]
    fn witness_minted_then_absorbed() {
        let mut ip = Interpretation::new();
        let fml = Formula::diamond("r", Formula::atom("A"));
        let mut partition = Partition::empty();
        partition.stage(fml.clone());
        let w = ip.add_named_world("w0", partition);
        classified(&mut ip);

        assert!(matches!(role_rule_1(&mut ip), RuleOutcome::Applied(_)));
        assert_eq!(ip.world_count(), 2);
        let witness = ip.world_with_name("w1").unwrap();
        assert!(ip.related_worlds(w, "r").contains(&witness));
        // the restriction is absorbed on the next pass, once the witness's
        // body has been classified
        assert!(ip.world(w).partition[Slot::Diamond].contains(&fml));
        classified(&mut ip);
        assert!(matches!(role_rule_1(&mut ip), RuleOutcome::Applied(_)));
        assert!(ip.world(w).partition[Slot::ProcPosit].contains(&fml));
    }

    #[test]
    fn universal_obligations_reach_successors() {
        let mut ip = Interpretation::new();
        let neg_diamond = Formula::negation(Formula::diamond("r", Formula::atom("A")));
        let mut partition = Partition::empty();
        partition.stage(neg_diamond.clone());
        let w = ip.add_named_world("w0", partition);
        let v = ip.add_named_world("w1", Partition::empty());
        ip.add_edge(w, v, "r");
        classified(&mut ip);

        assert!(matches!(role_rule_2(&mut ip), RuleOutcome::Applied(_)));
        assert!(ip.world(v).partition[Slot::NewNegat]
            .contains(&Formula::negation(Formula::atom("A"))));
        assert!(ip.world(w).box_subformulas["r"].contains(&neg_diamond));
        assert!(ip.world(w).partition[Slot::ProcNegat].contains(&neg_diamond));
    }

    #[test]
    fn minted_witness_receives_recorded_obligations() {
        let mut ip = Interpretation::new();
        let diamond = Formula::diamond("r", Formula::atom("A"));
        let neg_diamond = Formula::negation(Formula::diamond("r", Formula::atom("B")));
        let mut partition = Partition::empty();
        partition.stage(diamond);
        partition.stage(neg_diamond);
        ip.add_named_world("w0", partition);
        classified(&mut ip);

        // the universal is processed first, then the witness is minted
        assert!(matches!(role_rule_2(&mut ip), RuleOutcome::Applied(_)));
        assert!(matches!(role_rule_1(&mut ip), RuleOutcome::Applied(_)));

        let witness = ip.world_with_name("w1").unwrap();
        assert!(ip.world(witness).partition[Slot::NewNegat]
            .contains(&Formula::negation(Formula::atom("B"))));
        assert!(ip.world(witness).partition[Slot::NewPosit].contains(&Formula::atom("A")));
    }

    #[test]
    fn blocking_reuses_an_unrelated_world() {
        let mut ip = Interpretation::new();
        let diamond = Formula::diamond("r", Formula::atom("A"));
        let mut partition = Partition::empty();
        partition.stage(diamond.clone());
        let w = ip.add_named_world("w0", partition);
        let mut other = Partition::empty();
        other.stage(Formula::atom("A"));
        let v = ip.add_named_world("v", other);
        classified(&mut ip);

        assert!(matches!(role_rule_1(&mut ip), RuleOutcome::Applied(_)));
        // no new world, no edge: v blocks the restriction
        assert_eq!(ip.world_count(), 2);
        assert!(ip.related_worlds(w, "r").is_empty());
        assert!(ip.world(w).candidates_blocking.contains_key(&v));
        assert!(ip.world(w).partition[Slot::ProcPosit].contains(&diamond));
    }

    #[test]
    fn invalidated_candidate_restores_the_diamond() {
        let mut ip = Interpretation::new();
        let diamond = Formula::diamond("r", Formula::atom("A"));
        let mut partition = Partition::empty();
        partition.stage(diamond.clone());
        let w = ip.add_named_world("w0", partition);
        let mut other = Partition::empty();
        other.stage(Formula::atom("A"));
        let v = ip.add_named_world("v", other);
        classified(&mut ip);
        assert!(matches!(role_rule_1(&mut ip), RuleOutcome::Applied(_)));
        assert!(ip.world(w).candidates_blocking.contains_key(&v));

        // a universal arrives afterwards which v does not satisfy
        let neg_diamond = Formula::negation(Formula::diamond("r", Formula::atom("B")));
        ip.world_mut(w).partition.stage(neg_diamond);
        classified(&mut ip);
        assert!(matches!(role_rule_2(&mut ip), RuleOutcome::Applied(_)));

        // the next expansion pass un-processes the blocked diamond first,
        // and then re-expands it by minting a real witness
        assert!(matches!(role_rule_1(&mut ip), RuleOutcome::Applied(_)));
        assert!(ip.world(w).candidates_blocking.is_empty());
        assert_eq!(ip.world_count(), 3);
    }
}
