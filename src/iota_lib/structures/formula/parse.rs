//! Concrete syntax.
//!
//! Two spellings are accepted for most connectives: `~` or `¬` for negation,
//! `&` or `Π` for conjunction, `->` or `-:` for conditionals and `Ǝ` or `*E`
//! for role restrictions. Descriptions are written `i.C` and `i C.D`, and the
//! bare identifier `i` is reserved for them. Binary connectives associate to
//! the left over unary-level subformulas, so `A & B -> C` reads `(AΠB)→C`.

use crate::structures::formula::{Fml, Formula};
use crate::types::errs::ParseErr;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Not,
    And,
    Arrow,
    Exists,
    Dot,
    LParen,
    RParen,
    Iota,
    Atom(String),
    Role(String),
}

fn lex(input: &str) -> Result<Vec<(usize, Token)>, ParseErr> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some((at, ch)) = chars.next() {
        let token = match ch {
            _ if ch.is_whitespace() => continue,
            '~' | '¬' => Token::Not,
            '&' | 'Π' => Token::And,
            '-' => match chars.next() {
                Some((_, '>')) | Some((_, ':')) => Token::Arrow,
                _ => return Err(ParseErr::UnexpectedChar(at, ch)),
            },
            'Ǝ' => Token::Exists,
            '*' => match chars.next() {
                Some((_, 'E')) => Token::Exists,
                _ => return Err(ParseErr::UnexpectedChar(at, ch)),
            },
            '.' => Token::Dot,
            '(' => Token::LParen,
            ')' => Token::RParen,
            _ if ch.is_ascii_alphabetic() => {
                let mut name = String::from(ch);
                while let Some(&(_, next)) = chars.peek() {
                    if next.is_ascii_alphanumeric() || next == '_' {
                        name.push(next);
                        chars.next();
                    } else {
                        break;
                    }
                }
                match ch.is_ascii_uppercase() {
                    true => Token::Atom(name),
                    false if name == "i" => Token::Iota,
                    false => Token::Role(name),
                }
            }
            _ => return Err(ParseErr::UnexpectedChar(at, ch)),
        };
        tokens.push((at, token));
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<(usize, Token)>,
    at: usize,
}

/// Parse one formula, consuming the whole input.
pub fn parse(input: &str) -> Result<Fml, ParseErr> {
    let mut the_parser = Parser {
        tokens: lex(input)?,
        at: 0,
    };
    let fml = the_parser.formula()?;
    match the_parser.tokens.get(the_parser.at) {
        Some((at, _)) => Err(ParseErr::TrailingInput(*at)),
        None => Ok(fml),
    }
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.at).map(|(_, token)| token)
    }

    fn bump(&mut self) -> Option<(usize, Token)> {
        let next = self.tokens.get(self.at).cloned();
        self.at += 1;
        next
    }

    fn expect(&mut self, token: Token, expected: &str) -> Result<(), ParseErr> {
        match self.bump() {
            Some((_, found)) if found == token => Ok(()),
            Some((at, _)) => Err(ParseErr::UnexpectedToken(at, expected.to_string())),
            None => Err(ParseErr::UnexpectedEnd),
        }
    }

    fn formula(&mut self) -> Result<Fml, ParseErr> {
        let mut the_formula = self.subformula()?;
        loop {
            match self.peek() {
                Some(Token::And) => {
                    self.bump();
                    the_formula = Formula::conjunction(the_formula, self.subformula()?);
                }
                Some(Token::Arrow) => {
                    self.bump();
                    the_formula = Formula::conditional(the_formula, self.subformula()?);
                }
                _ => break,
            }
        }
        Ok(the_formula)
    }

    fn subformula(&mut self) -> Result<Fml, ParseErr> {
        match self.bump() {
            None => Err(ParseErr::UnexpectedEnd),
            Some((at, token)) => match token {
                Token::LParen => {
                    let inner = self.formula()?;
                    self.expect(Token::RParen, "a closing parenthesis")?;
                    Ok(inner)
                }
                Token::Not => Ok(Formula::negation(self.subformula()?)),
                Token::Exists => {
                    let role = match self.bump() {
                        Some((_, Token::Role(role))) => role,
                        // 'i' is a legitimate role symbol outside description position
                        Some((_, Token::Iota)) => "i".to_string(),
                        Some((at, _)) => {
                            return Err(ParseErr::UnexpectedToken(at, "a role symbol".to_string()))
                        }
                        None => return Err(ParseErr::UnexpectedEnd),
                    };
                    Ok(Formula::diamond(role, self.subformula()?))
                }
                Token::Iota => match self.peek() {
                    Some(Token::Dot) => {
                        self.bump();
                        Ok(Formula::local_desc(self.subformula()?))
                    }
                    _ => {
                        let first = self.subformula()?;
                        self.expect(Token::Dot, "'.' between description operands")?;
                        let second = self.subformula()?;
                        Ok(Formula::global_desc(first, second))
                    }
                },
                Token::Atom(name) => Ok(Formula::atom(name)),
                _ => Err(ParseErr::UnexpectedToken(at, "a subformula".to_string())),
            },
        }
    }
}
