//! Individuals and their partitioned formula pools.
//!
//! The formulas at an individual are split across seventeen pools by shape,
//! processing state and arrival. Fresh formulas always land in one of the two
//! staging pools and are only sorted into a shape pool once the clash check
//! has compared them against everything already present. This bounds each
//! clash pass to the newly arrived formulas.

use std::collections::HashMap;
use std::ops::{Index, IndexMut};

use indexmap::IndexSet;

use crate::structures::formula::{Fml, Formula, Role};
use crate::structures::interpretation::WorldId;

pub type FmlSet = IndexSet<Fml>;

/// The pool tags.
///
/// Unprocessed positives and negatives are grouped by outermost shape,
/// `Proc*` pools hold formulas a rule has finished with, and the two `New*`
/// pools stage arrivals for the next clash pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Atoms,
    NegAtoms,
    DoubleNeg,
    Conjunction,
    NegConjunction,
    Diamond,
    NegDiamond,
    GlobalDesc,
    NegGlobalDesc,
    LocalDesc,
    NegLocalDesc,
    ProcPosit,
    ProcNegat,
    ProcGlobalDesc,
    ProcLocalDesc,
    NewPosit,
    NewNegat,
}

pub const SLOT_COUNT: usize = 17;

/// Pools holding every new formula compared by the clash rule.
pub const NEGATIVE_SLOTS: [Slot; 6] = [
    Slot::NegAtoms,
    Slot::NegConjunction,
    Slot::NegDiamond,
    Slot::NegGlobalDesc,
    Slot::NegLocalDesc,
    Slot::ProcNegat,
];

pub const POSITIVE_SLOTS: [Slot; 8] = [
    Slot::Atoms,
    Slot::Conjunction,
    Slot::Diamond,
    Slot::GlobalDesc,
    Slot::LocalDesc,
    Slot::ProcPosit,
    Slot::ProcGlobalDesc,
    Slot::ProcLocalDesc,
];

#[derive(Debug, Clone, Default)]
pub struct Partition {
    pools: [FmlSet; SLOT_COUNT],
}

impl Index<Slot> for Partition {
    type Output = FmlSet;

    fn index(&self, slot: Slot) -> &FmlSet {
        &self.pools[slot as usize]
    }
}

impl IndexMut<Slot> for Partition {
    fn index_mut(&mut self, slot: Slot) -> &mut FmlSet {
        &mut self.pools[slot as usize]
    }
}

impl Partition {
    pub fn empty() -> Self {
        Self::default()
    }

    /// A partition for a freshly minted individual: the normalized
    /// terminology sits in the negated-conjunction pool from the start.
    pub fn seeded(tbox: &FmlSet) -> Self {
        let mut the_partition = Self::default();
        the_partition[Slot::NegConjunction] = tbox.clone();
        the_partition
    }

    /// Stage a formula for the next clash pass. Negations go to the negative
    /// staging pool, everything else to the positive one. Every rule inserts
    /// through this.
    pub fn stage(&mut self, fml: Fml) {
        match fml.as_ref() {
            Formula::Negation(_) => self[Slot::NewNegat].insert(fml),
            _ => self[Slot::NewPosit].insert(fml),
        };
    }

    pub fn staged_count(&self) -> usize {
        self[Slot::NewPosit].len() + self[Slot::NewNegat].len()
    }

    /// Membership across all seventeen pools.
    pub fn contains(&self, fml: &Fml) -> bool {
        self.pools.iter().any(|pool| pool.contains(fml))
    }

    /// The union of all pools.
    pub fn all(&self) -> FmlSet {
        let mut the_union = FmlSet::new();
        for pool in &self.pools {
            the_union.extend(pool.iter().cloned());
        }
        the_union
    }

    pub fn iter(&self) -> impl Iterator<Item = &Fml> {
        self.pools.iter().flat_map(|pool| pool.iter())
    }

    /// Sort the staged formulas into their shape pools and clear staging.
    /// Conditionals are normalized away before staging, so none is expected
    /// here; a stray one is discarded.
    pub fn classify_staged(&mut self) {
        let staged_negat = std::mem::take(&mut self[Slot::NewNegat]);
        for fml in staged_negat {
            let Formula::Negation(sub) = fml.as_ref() else {
                continue;
            };
            let slot = match sub.as_ref() {
                Formula::Negation(_) => Slot::DoubleNeg,
                Formula::Atom(_) => Slot::NegAtoms,
                Formula::Conjunction(..) => Slot::NegConjunction,
                Formula::Diamond(..) => Slot::NegDiamond,
                Formula::GlobalDesc(..) => Slot::NegGlobalDesc,
                Formula::LocalDesc(_) => Slot::NegLocalDesc,
                Formula::Conditional(..) => continue,
            };
            self[slot].insert(fml);
        }

        let staged_posit = std::mem::take(&mut self[Slot::NewPosit]);
        for fml in staged_posit {
            let slot = match fml.as_ref() {
                Formula::Atom(_) => Slot::Atoms,
                Formula::Conjunction(..) => Slot::Conjunction,
                Formula::Diamond(..) => Slot::Diamond,
                Formula::GlobalDesc(..) => Slot::GlobalDesc,
                Formula::LocalDesc(_) => Slot::LocalDesc,
                Formula::Negation(_) | Formula::Conditional(..) => continue,
            };
            self[slot].insert(fml);
        }
    }

    /// Move a formula between pools, preserving pool order elsewhere.
    pub fn move_formula(&mut self, fml: &Fml, from: Slot, to: Slot) {
        self[from].shift_remove(fml);
        self[to].insert(fml.clone());
    }
}

/// An individual of an interpretation.
///
/// Identity is the node index in the interpretation graph; the name is the
/// stable identifier used to find the matching individual in a cloned branch
/// and in all input and output.
#[derive(Debug, Clone)]
pub struct World {
    pub name: String,
    pub partition: Partition,
    /// Universal obligations recorded so far, keyed by role: the whole
    /// negated role restriction is kept, not just its body.
    pub box_subformulas: HashMap<Role, FmlSet>,
    /// Candidate pseudo-successor to the role restrictions it blocks.
    pub candidates_blocking: HashMap<WorldId, HashMap<Role, FmlSet>>,
}

impl World {
    pub fn named(name: impl Into<String>, partition: Partition) -> Self {
        World {
            name: name.into(),
            partition,
            box_subformulas: HashMap::new(),
            candidates_blocking: HashMap::new(),
        }
    }

    pub fn contains(&self, fml: &Fml) -> bool {
        self.partition.contains(fml)
    }

    pub fn formulas(&self) -> FmlSet {
        self.partition.all()
    }
}
