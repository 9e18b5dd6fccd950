//! Interpretations.
//!
//! An interpretation is one branch of the tableau: a directed multigraph of
//! individuals with role-labelled edges, together with the bookkeeping a
//! branch carries (names in use, the normalized terminology, memos for the
//! description refutation rules). Individuals and edges are only ever added,
//! so node indices are stable for the life of a branch and survive cloning;
//! the individual's *name* is the key rules use to find the same individual
//! in a cloned branch.

use std::collections::HashSet;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use crate::structures::formula::{Fml, Formula, Role};
use crate::structures::world::{FmlSet, Partition, World};

pub type WorldId = NodeIndex;

#[derive(Debug, Clone, Default)]
pub struct Interpretation {
    graph: DiGraph<World, Role>,
    /// Individual names in use, consulted when minting.
    pub world_names: HashSet<String>,
    /// Atom symbols in use, consulted when minting witnesses.
    pub atom_names: HashSet<String>,
    /// The normalized terminology, seeded into every minted individual.
    pub tbox: FmlSet,
    /// First operands of global descriptions whose fresh-witness refutation
    /// branch has already been taken on this branch.
    pub gd_refutation_memo: FmlSet,
    /// Concept to witness atom pairs minted by the local description
    /// refutation rule, reused for later occurrences of the same concept.
    pub ld_witnesses: Vec<(Fml, Fml)>,
    world_counter: usize,
    atom_counter: usize,
}

impl Interpretation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn worlds(&self) -> impl Iterator<Item = WorldId> {
        self.graph.node_indices()
    }

    pub fn world_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn world(&self, id: WorldId) -> &World {
        &self.graph[id]
    }

    pub fn world_mut(&mut self, id: WorldId) -> &mut World {
        &mut self.graph[id]
    }

    pub fn world_with_name(&self, name: &str) -> Option<WorldId> {
        self.worlds().find(|&id| self.graph[id].name == name)
    }

    /// Mint a fresh-named individual carrying the given pools.
    pub fn add_world(&mut self, partition: Partition) -> WorldId {
        let name = self.fresh_world_name();
        self.graph.add_node(World::named(name, partition))
    }

    /// Insert an individual under a caller-supplied name, registering it.
    pub fn add_named_world(&mut self, name: &str, partition: Partition) -> WorldId {
        self.world_names.insert(name.to_string());
        self.graph.add_node(World::named(name, partition))
    }

    /// A partition seeded with this branch's terminology.
    pub fn seeded_partition(&self) -> Partition {
        Partition::seeded(&self.tbox)
    }

    /// Record a role edge. Re-adding an existing edge is a no-op.
    pub fn add_edge(&mut self, origin: WorldId, destination: WorldId, role: &str) {
        let present = self
            .graph
            .edges_connecting(origin, destination)
            .any(|edge| edge.weight() == role);
        if !present {
            self.graph.add_edge(origin, destination, role.to_string());
        }
    }

    pub fn edge_exists(&self, origin: WorldId, role: &str) -> bool {
        self.graph
            .edges_directed(origin, Direction::Outgoing)
            .any(|edge| edge.weight() == role)
    }

    /// Successors of `origin` along `role`, in edge insertion order.
    pub fn related_worlds(&self, origin: WorldId, role: &str) -> Vec<WorldId> {
        let mut successors = Vec::new();
        for edge in self.graph.edges_directed(origin, Direction::Outgoing) {
            if edge.weight() == role && !successors.contains(&edge.target()) {
                successors.push(edge.target());
            }
        }
        successors.reverse();
        successors
    }

    /// Every individual, `origin` included, which is not a `role` successor
    /// of `origin`.
    pub fn unrelated_worlds(&self, origin: WorldId, role: &str) -> Vec<WorldId> {
        let related = self.related_worlds(origin, role);
        self.worlds().filter(|id| !related.contains(id)).collect()
    }

    /// All edges as (role, origin, destination) triples.
    pub fn edges(&self) -> impl Iterator<Item = (&Role, WorldId, WorldId)> {
        self.graph
            .edge_references()
            .map(|edge| (edge.weight(), edge.source(), edge.target()))
    }

    /// The next unused name of the form `w1, w2, ...`.
    pub fn fresh_world_name(&mut self) -> String {
        loop {
            self.world_counter += 1;
            let name = format!("w{}", self.world_counter);
            if !self.world_names.contains(&name) {
                self.world_names.insert(name.clone());
                return name;
            }
        }
    }

    /// Mint an atom of the form `Fresh_Atom_1, Fresh_Atom_2, ...`, skipping
    /// symbols already in use, and register it.
    pub fn fresh_atom(&mut self) -> Fml {
        loop {
            self.atom_counter += 1;
            let name = format!("Fresh_Atom_{}", self.atom_counter);
            if !self.atom_names.contains(&name) {
                self.atom_names.insert(name.clone());
                return Formula::atom(name);
            }
        }
    }

    /// Register every atom symbol occurring in a formula, so minted
    /// witnesses can never collide with input vocabulary.
    pub fn register_atoms(&mut self, fml: &Fml) {
        for symbol in fml.atom_symbols() {
            self.atom_names.insert(symbol);
        }
    }
}

impl std::fmt::Display for Interpretation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for id in self.worlds() {
            let world = self.world(id);
            writeln!(f, "individual {}", world.name)?;
            for fml in world.partition.iter() {
                writeln!(f, "  {fml}")?;
            }
        }
        for (role, origin, destination) in self.edges() {
            writeln!(
                f,
                "role {role}: {} -> {}",
                self.world(origin).name,
                self.world(destination).name
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structures::formula::Formula;
    use crate::structures::world::Slot;

    #[test]
    fn edges_and_relatedness() {
        let mut ip = Interpretation::new();
        let w0 = ip.add_named_world("w0", Partition::empty());
        let w1 = ip.add_named_world("w1", Partition::empty());
        let w2 = ip.add_named_world("w2", Partition::empty());
        ip.add_edge(w0, w1, "r");
        ip.add_edge(w0, w2, "s");

        assert!(ip.edge_exists(w0, "r"));
        assert!(!ip.edge_exists(w1, "r"));
        assert_eq!(ip.related_worlds(w0, "r"), vec![w1]);
        assert_eq!(ip.unrelated_worlds(w0, "r"), vec![w0, w2]);

        // parallel roles between the same pair
        ip.add_edge(w0, w1, "s");
        assert_eq!(ip.related_worlds(w0, "s"), vec![w2, w1]);

        // re-adding is a no-op
        ip.add_edge(w0, w1, "r");
        assert_eq!(ip.related_worlds(w0, "r"), vec![w1]);
    }

    #[test]
    fn minted_names_skip_registered_ones() {
        let mut ip = Interpretation::new();
        ip.add_named_world("w1", Partition::empty());
        let minted = ip.fresh_world_name();
        assert_eq!(minted, "w2");

        ip.atom_names.insert("Fresh_Atom_1".to_string());
        let witness = ip.fresh_atom();
        assert_eq!(witness, Formula::atom("Fresh_Atom_2"));
    }

    #[test]
    fn cloned_branches_are_independent() {
        let mut ip = Interpretation::new();
        let w0 = ip.add_named_world("w0", Partition::empty());
        ip.world_mut(w0).partition.stage(Formula::atom("A"));

        let mut fork = ip.clone();
        let fork_w0 = fork.world_with_name("w0").unwrap();
        fork.world_mut(fork_w0)
            .partition
            .stage(Formula::atom("B"));
        fork.world_mut(fork_w0).partition.classify_staged();

        assert_eq!(ip.world(w0).partition.staged_count(), 1);
        assert!(!ip.world(w0).contains(&Formula::atom("B")));
        assert!(fork.world(fork_w0).contains(&Formula::atom("B")));
        assert!(fork.world(fork_w0).contains(&Formula::atom("A")));
    }

    #[test]
    fn seeded_partitions_follow_the_tbox() {
        let mut ip = Interpretation::new();
        let axiom = Formula::negation(Formula::conjunction(
            Formula::atom("A"),
            Formula::negation(Formula::atom("B")),
        ));
        ip.tbox.insert(axiom.clone());
        let w = ip.add_world(ip.seeded_partition());
        assert!(ip.world(w).partition[Slot::NegConjunction].contains(&axiom));
        assert_eq!(ip.world(w).name, "w1");
    }
}
