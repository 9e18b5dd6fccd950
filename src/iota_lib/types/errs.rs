#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErr {
    UnexpectedChar(usize, char), // a character no token starts with
    UnexpectedToken(usize, String), // a token out of place, with what was expected instead
    UnexpectedEnd,               // input stopped where a subformula was required
    TrailingInput(usize),        // a complete formula followed by leftover tokens
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildErr {
    Formula(ParseErr),      // a formula string failed to parse
    TBoxEntry(String),      // a terminology entry which is not a conditional
    KbLine(usize, String),  // a knowledge base line with an unknown leading keyword
    KbPair(usize, String),  // an rbox line without a source and destination pair
    Io(String),             // the knowledge base file could not be read
}

impl From<ParseErr> for BuildErr {
    fn from(value: ParseErr) -> Self {
        BuildErr::Formula(value)
    }
}

impl std::fmt::Display for ParseErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedChar(at, ch) => write!(f, "unexpected character '{ch}' at {at}"),
            Self::UnexpectedToken(at, expected) => {
                write!(f, "expected {expected} at {at}")
            }
            Self::UnexpectedEnd => write!(f, "formula ends where a subformula was expected"),
            Self::TrailingInput(at) => write!(f, "unexpected input after the formula at {at}"),
        }
    }
}

impl std::fmt::Display for BuildErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Formula(e) => write!(f, "{e}"),
            Self::TBoxEntry(entry) => write!(f, "tbox entries must be conditionals: {entry}"),
            Self::KbLine(line, text) => write!(f, "puzzled by line {line}: {text}"),
            Self::KbPair(line, text) => {
                write!(f, "line {line} should relate a pair of individuals: {text}")
            }
            Self::Io(e) => write!(f, "{e}"),
        }
    }
}
