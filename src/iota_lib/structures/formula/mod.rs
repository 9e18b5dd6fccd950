//! The formula algebra.
//!
//! Formulas are immutable trees shared behind [`Rc`], so staging the same
//! formula at many individuals, or cloning a whole branch, never copies a
//! tree. Equality and hashing are structural with one exception: conjunction
//! is commutative, `AΠB` and `BΠA` are the same formula and hash alike.

pub mod parse;

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use indexmap::IndexMap;

/// A role symbol, `[a-z]\w*`.
pub type Role = String;

/// A shared formula tree.
pub type Fml = Rc<Formula>;

#[derive(Debug, Clone)]
pub enum Formula {
    /// A concept symbol, `[A-Z]\w*`.
    Atom(String),
    /// ¬ sub.
    Negation(Fml),
    /// Ǝ role . sub, an existential role restriction.
    Diamond(Role, Fml),
    /// `i.sub`, a local definite description: this individual is the unique
    /// one satisfying sub.
    LocalDesc(Fml),
    /// Commutative conjunction.
    Conjunction(Fml, Fml),
    /// A subsumption. Accepted only in terminology input and normalized away
    /// before any rule runs.
    Conditional(Fml, Fml),
    /// `i a.b`, a global definite description: a unique individual satisfies
    /// a, and that individual also satisfies b.
    GlobalDesc(Fml, Fml),
}

impl Formula {
    pub fn atom(name: impl Into<String>) -> Fml {
        Rc::new(Formula::Atom(name.into()))
    }

    pub fn negation(sub: Fml) -> Fml {
        Rc::new(Formula::Negation(sub))
    }

    pub fn diamond(role: impl Into<Role>, sub: Fml) -> Fml {
        Rc::new(Formula::Diamond(role.into(), sub))
    }

    pub fn local_desc(sub: Fml) -> Fml {
        Rc::new(Formula::LocalDesc(sub))
    }

    pub fn conjunction(left: Fml, right: Fml) -> Fml {
        Rc::new(Formula::Conjunction(left, right))
    }

    pub fn conditional(left: Fml, right: Fml) -> Fml {
        Rc::new(Formula::Conditional(left, right))
    }

    pub fn global_desc(left: Fml, right: Fml) -> Fml {
        Rc::new(Formula::GlobalDesc(left, right))
    }
}

impl PartialEq for Formula {
    fn eq(&self, other: &Self) -> bool {
        use Formula::*;
        match (self, other) {
            (Atom(a), Atom(b)) => a == b,
            (Negation(a), Negation(b)) => a == b,
            (Diamond(r, a), Diamond(s, b)) => r == s && a == b,
            (LocalDesc(a), LocalDesc(b)) => a == b,
            (Conjunction(a1, a2), Conjunction(b1, b2)) => {
                (a1 == b1 && a2 == b2) || (a1 == b2 && a2 == b1)
            }
            (Conditional(a1, a2), Conditional(b1, b2)) => a1 == b1 && a2 == b2,
            (GlobalDesc(a1, a2), GlobalDesc(b1, b2)) => a1 == b1 && a2 == b2,
            _ => false,
        }
    }
}

impl Eq for Formula {}

impl Hash for Formula {
    fn hash<H: Hasher>(&self, state: &mut H) {
        use Formula::*;
        std::mem::discriminant(self).hash(state);
        match self {
            Atom(name) => name.hash(state),
            Negation(sub) | LocalDesc(sub) => sub.hash(state),
            Diamond(role, sub) => {
                role.hash(state);
                sub.hash(state);
            }
            // Conjunction equality ignores operand order, so the operand
            // hashes are folded in with symmetric combiners.
            Conjunction(a, b) => {
                let ha = tree_hash(a);
                let hb = tree_hash(b);
                (ha ^ hb).hash(state);
                ha.wrapping_add(hb).hash(state);
            }
            Conditional(a, b) | GlobalDesc(a, b) => {
                a.hash(state);
                b.hash(state);
            }
        }
    }
}

fn tree_hash(fml: &Formula) -> u64 {
    let mut hasher = DefaultHasher::new();
    fml.hash(&mut hasher);
    hasher.finish()
}

// Structural counts. Diagnostics only, computed on demand.
impl Formula {
    /// Number of conjunctions and conditionals in the tree.
    pub fn binary_count(&self) -> usize {
        use Formula::*;
        match self {
            Atom(_) => 0,
            Negation(sub) | LocalDesc(sub) | Diamond(_, sub) => sub.binary_count(),
            Conjunction(a, b) | Conditional(a, b) => a.binary_count() + b.binary_count() + 1,
            GlobalDesc(a, b) => a.binary_count() + b.binary_count(),
        }
    }

    pub fn descr_global_count(&self) -> usize {
        use Formula::*;
        match self {
            Atom(_) => 0,
            Negation(sub) | LocalDesc(sub) | Diamond(_, sub) => sub.descr_global_count(),
            Conjunction(a, b) | Conditional(a, b) => {
                a.descr_global_count() + b.descr_global_count()
            }
            GlobalDesc(a, b) => a.descr_global_count() + b.descr_global_count() + 1,
        }
    }

    pub fn descr_local_count(&self) -> usize {
        use Formula::*;
        match self {
            Atom(_) => 0,
            Negation(sub) | Diamond(_, sub) => sub.descr_local_count(),
            LocalDesc(sub) => sub.descr_local_count() + 1,
            Conjunction(a, b) | Conditional(a, b) | GlobalDesc(a, b) => {
                a.descr_local_count() + b.descr_local_count()
            }
        }
    }

    pub fn descr_global_local_count(&self) -> usize {
        self.descr_global_count() + self.descr_local_count()
    }

    /// All binaries, global descriptions included.
    pub fn binary_descr_global_count(&self) -> usize {
        self.binary_count() + self.descr_global_count()
    }

    pub fn modal_count(&self) -> usize {
        use Formula::*;
        match self {
            Atom(_) => 0,
            Negation(sub) | LocalDesc(sub) => sub.modal_count(),
            Diamond(_, sub) => sub.modal_count() + 1,
            Conjunction(a, b) | Conditional(a, b) | GlobalDesc(a, b) => {
                a.modal_count() + b.modal_count()
            }
        }
    }

    /// The deepest nesting of role restrictions.
    pub fn modal_degree(&self) -> usize {
        use Formula::*;
        match self {
            Atom(_) => 0,
            Negation(sub) | LocalDesc(sub) => sub.modal_degree(),
            Diamond(_, sub) => sub.modal_degree() + 1,
            Conjunction(a, b) | Conditional(a, b) | GlobalDesc(a, b) => {
                a.modal_degree().max(b.modal_degree())
            }
        }
    }

    /// Number of atom occurrences in the tree.
    pub fn occur_var_count(&self) -> usize {
        self.binary_descr_global_count() + 1
    }

    /// Number of distinct atom symbols in the tree.
    pub fn var_count(&self) -> usize {
        self.atoms().len()
    }

    /// Atom symbol to its occurrences, in first-occurrence order.
    pub fn atoms(&self) -> IndexMap<String, Vec<&Formula>> {
        let mut the_atoms = IndexMap::new();
        self.collect_atoms(&mut the_atoms);
        the_atoms
    }

    pub fn atom_symbols(&self) -> Vec<String> {
        self.atoms().keys().cloned().collect()
    }

    fn collect_atoms<'f>(&'f self, into: &mut IndexMap<String, Vec<&'f Formula>>) {
        use Formula::*;
        match self {
            Atom(name) => into.entry(name.clone()).or_default().push(self),
            Negation(sub) | LocalDesc(sub) | Diamond(_, sub) => sub.collect_atoms(into),
            Conjunction(a, b) | Conditional(a, b) | GlobalDesc(a, b) => {
                a.collect_atoms(into);
                b.collect_atoms(into);
            }
        }
    }
}

// Printing. Binary subtrees are bracketed, and a diamond also brackets a
// diamond or local description body.
impl Formula {
    fn binary_shape(&self) -> bool {
        matches!(
            self,
            Formula::Conjunction(..) | Formula::Conditional(..) | Formula::GlobalDesc(..)
        )
    }

    fn bracketed(&self) -> String {
        match self.binary_shape() {
            true => format!("({self})"),
            false => format!("{self}"),
        }
    }
}

impl std::fmt::Display for Formula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use Formula::*;
        match self {
            Atom(name) => write!(f, "{name}"),
            Negation(sub) => write!(f, "¬{}", sub.bracketed()),
            Diamond(role, sub) => {
                let body = match sub.binary_shape()
                    || matches!(sub.as_ref(), Diamond(..) | LocalDesc(_))
                {
                    true => format!("({sub})"),
                    false => format!("{sub}"),
                };
                write!(f, "Ǝ {role} {body}")
            }
            LocalDesc(sub) => write!(f, "i.{}", sub.bracketed()),
            Conjunction(a, b) => write!(f, "{}Π{}", a.bracketed(), b.bracketed()),
            Conditional(a, b) => write!(f, "{}→{}", a.bracketed(), b.bracketed()),
            GlobalDesc(a, b) => write!(f, "i {}.{}", a.bracketed(), b.bracketed()),
        }
    }
}
