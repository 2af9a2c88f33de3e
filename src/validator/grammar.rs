//! Rule grammar
//!
//! A rule text is a `;`-separated list of tokens. Every token is matched against a small fixed
//! set of shapes, anchored at the start of the token only:
//!
//! - numeric kinds: `>N`, `<N`, `=N`, `!=N` (floats require `N` in `digits.digits` form)
//! - text: `len>N`, `len<N`, `len=N`, `format=ARG`, plus the rule-text-wide `required` flag
//!
//! Digits are ASCII only: `>١٠` is not a numeric token and is ignored.
//!
//! Anchored prefix matching is deliberate: `>10abc` is recognised as a `>` token. The literal is
//! everything after the operator and unparsable literals read as zero.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

/// Token separator within a rule text
pub const SEPARATOR: char = ';';

/// Marker that makes a text field non-empty
pub const REQUIRED: &str = "required";

static INT_TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(!=|>|<|=)[0-9]+").unwrap());

static FLOAT_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(!=|>|<|=)[0-9]+\.[0-9]+").unwrap());

static LEN_TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^len(>|<|=)[0-9]+").unwrap());

static FORMAT_TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^format=.+").unwrap());

const FORMAT_PREFIX: &str = "format=";
const LEN_PREFIX: &str = "len";

/// Comparison operator of a numeric or length token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// `>`: value must exceed the bound
    More,
    /// `<`: value must be below the bound
    Less,
    /// `=`: value must equal the bound
    Equal,
    /// `!=`: value must differ from the bound
    NotEqual,
}

impl Comparison {
    fn from_operator(op: &str) -> Option<Self> {
        match op {
            ">" => Some(Comparison::More),
            "<" => Some(Comparison::Less),
            "=" => Some(Comparison::Equal),
            "!=" => Some(Comparison::NotEqual),
            _ => None,
        }
    }

    /// Whether `value` violates this comparison against `bound`
    pub fn violated_by<T: PartialOrd>(&self, value: T, bound: T) -> bool {
        match self {
            Comparison::More => value <= bound,
            Comparison::Less => value >= bound,
            Comparison::Equal => value != bound,
            Comparison::NotEqual => value == bound,
        }
    }
}

/// Literal form a numeric kind accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralShape {
    /// ASCII digits: `[0-9]+`
    Digits,
    /// ASCII digits, a literal dot, ASCII digits: `[0-9]+\.[0-9]+`
    Decimal,
}

/// A parsed numeric token
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericRule<T> {
    pub op: Comparison,
    pub bound: T,
}

/// A parsed text token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRule<'a> {
    /// `len>N`, `len<N`, `len=N`
    Length { op: Comparison, bound: usize },
    /// `format=ARG`, ARG being a registered name or a literal pattern
    Format(&'a str),
}

/// Splits a rule text into its tokens, in source order.
pub fn tokens(rule_text: &str) -> impl Iterator<Item = &str> {
    rule_text.split(SEPARATOR)
}

/// Whether the rule text asks for a non-empty value.
///
/// This is a substring check over the whole rule text, not a token match.
pub fn is_required(rule_text: &str) -> bool {
    rule_text.contains(REQUIRED)
}

/// Parses a numeric token, or returns `None` if the token has no numeric shape.
pub fn parse_numeric<T>(token: &str, shape: LiteralShape) -> Option<NumericRule<T>>
where
    T: FromStr + Default,
{
    let pattern = match shape {
        LiteralShape::Digits => &*INT_TOKEN,
        LiteralShape::Decimal => &*FLOAT_TOKEN,
    };
    let caps = pattern.captures(token)?;
    let operator = caps.get(1)?.as_str();
    let op = Comparison::from_operator(operator)?;

    Some(NumericRule {
        op,
        bound: parse_literal(&token[operator.len()..]),
    })
}

/// Parses a text token, or returns `None` if the token has no text shape.
pub fn parse_text(token: &str) -> Option<TextRule<'_>> {
    if let Some(caps) = LEN_TOKEN.captures(token) {
        let operator = caps.get(1)?.as_str();
        let op = Comparison::from_operator(operator)?;
        let literal = &token[LEN_PREFIX.len() + operator.len()..];
        return Some(TextRule::Length {
            op,
            bound: parse_literal(literal),
        });
    }

    if FORMAT_TOKEN.is_match(token) {
        return Some(TextRule::Format(&token[FORMAT_PREFIX.len()..]));
    }

    None
}

/// Parses a literal with the target type's parser; failures read as zero.
fn parse_literal<T: FromStr + Default>(literal: &str) -> T {
    literal.parse().unwrap_or_default()
}
