//! The knowledge base file format.
//!
//! Line oriented. A line starting with `c` is a comment. Otherwise the
//! leading keyword picks the section:
//!
//! ```text
//! c  a concept to check, one per line
//! concept Ǝ r A & ~Ǝ r A
//! abox w1 : A & B
//! rbox r : w1 w2
//! tbox A -> B
//! ```
//!
//! `concept` and `tbox` lines accumulate; `abox` appends a formula to the
//! named individual's list; `rbox` appends a related pair to the role.

use indexmap::IndexMap;

use crate::types::errs::BuildErr;

#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    pub concept: Vec<String>,
    pub abox: IndexMap<String, Vec<String>>,
    pub rbox: IndexMap<String, Vec<(String, String)>>,
    pub tbox: Vec<String>,
}

impl KnowledgeBase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(text: &str) -> Result<Self, BuildErr> {
        let mut the_kb = KnowledgeBase::new();

        for (index, line) in text.lines().enumerate() {
            let line_number = index + 1;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed == "c" || trimmed.starts_with("c ") {
                continue;
            }

            let Some((keyword, rest)) = trimmed.split_once(char::is_whitespace) else {
                return Err(BuildErr::KbLine(line_number, trimmed.to_string()));
            };
            let rest = rest.trim();

            match keyword {
                "concept" => the_kb.concept.push(rest.to_string()),
                "tbox" => the_kb.tbox.push(rest.to_string()),
                "abox" => {
                    let Some((name, formula)) = rest.split_once(':') else {
                        return Err(BuildErr::KbLine(line_number, trimmed.to_string()));
                    };
                    the_kb
                        .abox
                        .entry(name.trim().to_string())
                        .or_default()
                        .push(formula.trim().to_string());
                }
                "rbox" => {
                    let Some((role, pair)) = rest.split_once(':') else {
                        return Err(BuildErr::KbLine(line_number, trimmed.to_string()));
                    };
                    let endpoints: Vec<&str> = pair.split_whitespace().collect();
                    let [origin, destination] = endpoints.as_slice() else {
                        return Err(BuildErr::KbPair(line_number, trimmed.to_string()));
                    };
                    the_kb
                        .rbox
                        .entry(role.trim().to_string())
                        .or_default()
                        .push((origin.to_string(), destination.to_string()));
                }
                _ => return Err(BuildErr::KbLine(line_number, trimmed.to_string())),
            }
        }

        Ok(the_kb)
    }
}
