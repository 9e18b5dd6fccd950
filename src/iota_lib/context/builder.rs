//! Building a context from knowledge base input.
//!
//! ABox individuals come first, then RBox edges (creating any individuals
//! they mention), then the target concepts at a fresh base individual, and
//! finally the TBox, normalized and staged everywhere. Every input formula
//! is staged, so the first clash pass both checks and classifies the whole
//! input.

use crate::config::Config;
use crate::context::{Context, SearchCounters, SearchStatus};
use crate::io::files::KnowledgeBase;
use crate::io::window::SearchWindow;
use crate::structures::formula::{parse, Fml, Formula};
use crate::structures::interpretation::Interpretation;
use crate::structures::world::Partition;
use crate::types::errs::BuildErr;

impl Context {
    pub fn from_kb(kb: &KnowledgeBase, config: Config) -> Result<Self, BuildErr> {
        let mut ip = Interpretation::new();

        // assertions about named individuals
        for (name, formula_strings) in &kb.abox {
            let name = strip_whitespace(name);
            let mut formulas = Vec::new();
            for text in formula_strings {
                formulas.push(parse::parse(text)?);
            }
            // an individual named by a local description satisfies it
            if let Some(description) = description_name(&name) {
                formulas.push(description);
            }

            let mut partition = Partition::empty();
            for fml in formulas {
                ip.register_atoms(&fml);
                partition.stage(fml);
            }
            ip.add_named_world(&name, partition);
            log::trace!(target: crate::log::targets::BUILD, "individual {name} asserted");
        }

        // role edges, creating endpoints on demand
        for (role, pairs) in &kb.rbox {
            let role = strip_whitespace(role);
            for (origin, destination) in pairs {
                let origin = strip_whitespace(origin);
                let destination = strip_whitespace(destination);
                for name in [&origin, &destination] {
                    if ip.world_with_name(name).is_none() {
                        let mut partition = Partition::empty();
                        if let Some(description) = description_name(name) {
                            ip.register_atoms(&description);
                            partition.stage(description);
                        }
                        ip.add_named_world(name, partition);
                    }
                }
                let u = ip.world_with_name(&origin).expect("endpoint just added");
                let v = ip
                    .world_with_name(&destination)
                    .expect("endpoint just added");
                ip.add_edge(u, v, &role);
                log::trace!(target: crate::log::targets::BUILD,
                    "{role} relates {origin} to {destination}");
            }
        }

        // the target concepts, at a fresh base individual
        if !kb.concept.is_empty() {
            let mut partition = Partition::empty();
            for text in &kb.concept {
                let fml = parse::parse(text)?;
                ip.register_atoms(&fml);
                partition.stage(fml);
            }
            let base_name = base_world_name(&ip);
            ip.add_named_world(&base_name, partition);
            log::trace!(target: crate::log::targets::BUILD, "concepts placed at {base_name}");
        }

        // the terminology, normalized to negated conjunctions
        if !kb.tbox.is_empty() {
            let mut normalized = Vec::new();
            for text in &kb.tbox {
                let fml = parse::parse(text)?;
                let Formula::Conditional(left, right) = fml.as_ref() else {
                    return Err(BuildErr::TBoxEntry(text.clone()));
                };
                ip.register_atoms(&fml);
                normalized.push(Formula::negation(Formula::conjunction(
                    left.clone(),
                    Formula::negation(right.clone()),
                )));
            }

            if ip.world_count() > 0 {
                let the_worlds: Vec<_> = ip.worlds().collect();
                for w in the_worlds {
                    for fml in &normalized {
                        ip.world_mut(w).partition.stage(fml.clone());
                    }
                }
            } else {
                // the terminology is the only source of individuals
                let mut partition = Partition::empty();
                for fml in &normalized {
                    partition.stage(fml.clone());
                }
                ip.add_named_world("w0", partition);
            }

            ip.tbox = normalized.into_iter().collect();
        }

        Ok(Context {
            initial_interpretation: ip.clone(),
            interpretation: ip,
            alternatives: Vec::new(),
            counters: SearchCounters::default(),
            window: match config.show_stats {
                true => Some(SearchWindow::new()),
                false => None,
            },
            config,
            status: SearchStatus::Initialised,
        })
    }
}

fn strip_whitespace(text: &str) -> String {
    text.chars().filter(|ch| !ch.is_whitespace()).collect()
}

/// An individual name of the form `i.<Atom>` denotes the unique satisfier of
/// that atom; the matching local description formula is returned.
fn description_name(name: &str) -> Option<Fml> {
    let rest = name.strip_prefix("i.")?;
    let mut chars = rest.chars();
    let first = chars.next()?;
    if !first.is_ascii_uppercase() {
        return None;
    }
    if !chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_') {
        return None;
    }
    Some(Formula::local_desc(Formula::atom(rest)))
}

/// `w0` unless taken, then `w00`, `w000` and so on.
fn base_world_name(ip: &Interpretation) -> String {
    let mut name = "w0".to_string();
    while ip.world_names.contains(&name) {
        name.push('0');
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structures::world::Slot;

    #[test]
    fn description_names() {
        assert_eq!(
            description_name("i.Point"),
            Some(Formula::local_desc(Formula::atom("Point")))
        );
        assert_eq!(description_name("w1"), None);
        assert_eq!(description_name("i.lower"), None);
        assert_eq!(description_name("i."), None);
    }

    #[test]
    fn abox_individuals_carry_their_assertions() {
        let mut kb = KnowledgeBase::new();
        kb.abox.insert("w1".to_string(), vec!["A & B".to_string()]);
        kb.abox.insert("i.Q".to_string(), vec!["A".to_string()]);

        let ctx = Context::from_kb(&kb, Config::default()).unwrap();
        let ip = ctx.interpretation();
        let w1 = ip.world_with_name("w1").unwrap();
        assert_eq!(ip.world(w1).partition.staged_count(), 1);

        let described = ip.world_with_name("i.Q").unwrap();
        assert!(ip
            .world(described)
            .contains(&Formula::local_desc(Formula::atom("Q"))));
    }

    #[test]
    fn rbox_creates_missing_endpoints() {
        let mut kb = KnowledgeBase::new();
        kb.rbox.insert(
            "r".to_string(),
            vec![("w1".to_string(), "w 2".to_string())],
        );

        let ctx = Context::from_kb(&kb, Config::default()).unwrap();
        let ip = ctx.interpretation();
        let w1 = ip.world_with_name("w1").unwrap();
        let w2 = ip.world_with_name("w2").unwrap();
        assert_eq!(ip.related_worlds(w1, "r"), vec![w2]);
    }

    #[test]
    fn base_world_dodges_taken_names() {
        let mut kb = KnowledgeBase::new();
        kb.abox.insert("w0".to_string(), vec!["A".to_string()]);
        kb.concept.push("B".to_string());

        let ctx = Context::from_kb(&kb, Config::default()).unwrap();
        assert!(ctx.interpretation().world_with_name("w00").is_some());
    }

    #[test]
    fn tbox_entries_must_be_conditionals() {
        let mut kb = KnowledgeBase::new();
        kb.tbox.push("A & B".to_string());
        assert!(matches!(
            Context::from_kb(&kb, Config::default()),
            Err(BuildErr::TBoxEntry(_))
        ));
    }

    #[test]
    fn tbox_is_normalized_and_staged_everywhere() {
        let mut kb = KnowledgeBase::new();
        kb.abox.insert("w1".to_string(), vec!["A".to_string()]);
        kb.concept.push("A".to_string());
        kb.tbox.push("A -> B".to_string());

        let ctx = Context::from_kb(&kb, Config::default()).unwrap();
        let ip = ctx.interpretation();
        let expected = Formula::negation(Formula::conjunction(
            Formula::atom("A"),
            Formula::negation(Formula::atom("B")),
        ));
        assert!(ip.tbox.contains(&expected));
        for w in ip.worlds() {
            assert!(ip.world(w).partition[Slot::NewNegat].contains(&expected));
        }
    }

    #[test]
    fn tbox_alone_seeds_a_base_individual() {
        let mut kb = KnowledgeBase::new();
        kb.tbox.push("A -> B".to_string());

        let ctx = Context::from_kb(&kb, Config::default()).unwrap();
        let ip = ctx.interpretation();
        assert_eq!(ip.world_count(), 1);
        assert!(ip.world_with_name("w0").is_some());
    }
}
