//! Comparison operators usable in CQL filter expressions.

use serde::{Deserialize, Serialize};

/// A comparison operator as accepted by the server's CQL filter parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    Equal,
    NotEqual,
    LessThan,
    GreaterThan,
    LessThanOrEqual,
    GreaterThanOrEqual,
    Like,
    ILike,
    IsNull,
}

impl Operator {
    /// The literal token emitted into a CQL expression.
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Equal => "=",
            Operator::NotEqual => "<>",
            Operator::LessThan => "<",
            Operator::GreaterThan => ">",
            Operator::LessThanOrEqual => "<=",
            Operator::GreaterThanOrEqual => ">=",
            Operator::Like => "LIKE",
            Operator::ILike => "ILIKE",
            Operator::IsNull => "IS NULL",
        }
    }

    /// Parse an operator from its CQL token (case-sensitive for the
    /// word-form operators, matching what the server accepts).
    pub fn from_symbol(s: &str) -> Option<Self> {
        match s {
            "=" => Some(Operator::Equal),
            "<>" => Some(Operator::NotEqual),
            "<" => Some(Operator::LessThan),
            ">" => Some(Operator::GreaterThan),
            "<=" => Some(Operator::LessThanOrEqual),
            ">=" => Some(Operator::GreaterThanOrEqual),
            "LIKE" => Some(Operator::Like),
            "ILIKE" => Some(Operator::ILike),
            "IS NULL" => Some(Operator::IsNull),
            _ => None,
        }
    }

    /// Whether the operator does a pattern match rather than an exact
    /// comparison.
    pub fn is_pattern_match(&self) -> bool {
        matches!(self, Operator::Like | Operator::ILike)
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_round_trip() {
        for op in [
            Operator::Equal,
            Operator::NotEqual,
            Operator::LessThan,
            Operator::GreaterThan,
            Operator::LessThanOrEqual,
            Operator::GreaterThanOrEqual,
            Operator::Like,
            Operator::ILike,
            Operator::IsNull,
        ] {
            assert_eq!(Operator::from_symbol(op.symbol()), Some(op));
        }
    }

    #[test]
    fn test_from_symbol_rejects_unknown() {
        assert_eq!(Operator::from_symbol("=="), None);
        assert_eq!(Operator::from_symbol("like"), None);
    }
}
