//! Pattern text parsing.

use smallvec::SmallVec;
use tern_descriptors::TypeRef;
use tern_ir::FqName;

use crate::ParamConstraint;

/// Alternatives accepted for one path segment (`Int|Long`).
pub(crate) type Alternatives = SmallVec<[Box<str>; 2]>;

/// Error in pattern text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    #[error("empty pattern")]
    Empty,
    #[error("empty segment at byte {position} in pattern `{text}`")]
    EmptySegment { text: String, position: usize },
    #[error("invalid character {ch:?} at byte {position} in pattern `{text}`")]
    InvalidChar {
        text: String,
        position: usize,
        ch: char,
    },
    #[error("malformed parameter constraint at byte {position} in pattern `{text}`: {reason}")]
    BadConstraint {
        text: String,
        position: usize,
        reason: &'static str,
    },
}

/// Pattern split into its matchers.
#[derive(Debug)]
pub(crate) struct ParsedPattern {
    pub owner: Vec<Alternatives>,
    pub member: Alternatives,
    pub params: ParamConstraint,
}

pub(crate) fn parse(text: &str) -> Result<ParsedPattern, PatternError> {
    if text.is_empty() {
        return Err(PatternError::Empty);
    }

    let (path, constraint) = match text.find(|c: char| c == '(' || c == '/') {
        Some(at) => (&text[..at], Some(at)),
        None => (text, None),
    };

    let mut segments = Vec::new();
    let mut position = 0;
    for segment in path.split('.') {
        segments.push(parse_segment(text, segment, position)?);
        position += segment.len() + 1;
    }

    let params = match constraint {
        Some(at) => parse_constraint(text, at)?,
        None => ParamConstraint::Any,
    };

    // `split` always yields at least one item.
    let member = segments.pop().unwrap_or_default();
    Ok(ParsedPattern {
        owner: segments,
        member,
        params,
    })
}

fn parse_segment(text: &str, segment: &str, start: usize) -> Result<Alternatives, PatternError> {
    let mut alternatives = Alternatives::new();
    let mut position = start;
    for alt in segment.split('|') {
        if alt.is_empty() {
            return Err(PatternError::EmptySegment {
                text: text.to_owned(),
                position,
            });
        }
        if let Some((offset, ch)) = alt.char_indices().find(|&(_, c)| !is_identifier_char(c)) {
            return Err(PatternError::InvalidChar {
                text: text.to_owned(),
                position: position + offset,
                ch,
            });
        }
        alternatives.push(alt.into());
        position += alt.len() + 1;
    }
    Ok(alternatives)
}

fn parse_constraint(text: &str, at: usize) -> Result<ParamConstraint, PatternError> {
    let bad = |position: usize, reason: &'static str| PatternError::BadConstraint {
        text: text.to_owned(),
        position,
        reason,
    };

    let rest = &text[at + 1..];
    if text[at..].starts_with('/') {
        if rest.is_empty() || !rest.bytes().all(|b| b.is_ascii_digit()) {
            return Err(bad(at + 1, "arity must be a decimal number"));
        }
        return rest
            .parse()
            .map(ParamConstraint::Arity)
            .map_err(|_| bad(at + 1, "arity out of range"));
    }

    let Some(inner) = rest.strip_suffix(')') else {
        return Err(bad(text.len(), "expected `)` at end of pattern"));
    };
    if inner.trim().is_empty() {
        return Ok(ParamConstraint::Types(Vec::new()));
    }

    let mut types = Vec::new();
    let mut position = at + 1;
    for raw in inner.split(',') {
        let item = raw.trim();
        let (name, nullable) = match item.strip_suffix('?') {
            Some(name) => (name, true),
            None => (item, false),
        };
        if name.is_empty() {
            return Err(bad(position, "empty parameter type"));
        }
        let fq_name = FqName::parse(name).map_err(|_| bad(position, "invalid parameter type"))?;
        types.push(TypeRef { fq_name, nullable });
        position += raw.len() + 1;
    }
    Ok(ParamConstraint::Types(types))
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$' || c == '<' || c == '>'
}
