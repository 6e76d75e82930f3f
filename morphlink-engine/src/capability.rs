//! Backend families and the operations each one supports
//!
//! The compatibility table is closed and authoritative: every front-end
//! checks it before touching a backend.

use std::fmt;
use std::str::FromStr;

use crate::error::{CompatibilityError, EngineError};

/// Backend family identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Family {
    /// Hannanum (KAIST)
    Hannanum,
    /// Komoran (Shineware)
    Komoran,
    /// Kkma (SNU)
    Kkma,
    /// Eunjeon (mecab-ko)
    Eunjeon,
    /// Twitter / Open Korean Text
    Twitter,
    /// Arirang
    Arirang,
    /// Rhino
    Rhino,
}

/// Operation families a backend may provide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operation {
    /// Morphological tagging
    Tagging,
    /// Dependency parsing
    Parsing,
    /// Sentence boundary detection
    SentenceSplitting,
    /// User dictionary query and mutation
    Dictionary,
}

impl Family {
    /// Every family, in declaration order
    pub const ALL: [Family; 7] = [
        Family::Hannanum,
        Family::Komoran,
        Family::Kkma,
        Family::Eunjeon,
        Family::Twitter,
        Family::Arirang,
        Family::Rhino,
    ];

    /// Lowercase identifier
    pub fn name(&self) -> &'static str {
        match self {
            Family::Hannanum => "hannanum",
            Family::Komoran => "komoran",
            Family::Kkma => "kkma",
            Family::Eunjeon => "eunjeon",
            Family::Twitter => "twitter",
            Family::Arirang => "arirang",
            Family::Rhino => "rhino",
        }
    }

    /// Whether this family provides `operation`
    pub fn supports(&self, operation: Operation) -> bool {
        match operation {
            Operation::Tagging => true,
            Operation::Parsing => matches!(self, Family::Hannanum | Family::Kkma),
            // Twitter splits heuristically, Hannanum by rule
            Operation::SentenceSplitting => matches!(self, Family::Twitter | Family::Hannanum),
            Operation::Dictionary => !matches!(self, Family::Rhino),
        }
    }

    /// Families providing `operation`
    pub fn supporting(operation: Operation) -> impl Iterator<Item = Family> {
        Family::ALL.into_iter().filter(move |f| f.supports(operation))
    }
}

impl Operation {
    /// Every operation, in declaration order
    pub const ALL: [Operation; 4] = [
        Operation::Tagging,
        Operation::Parsing,
        Operation::SentenceSplitting,
        Operation::Dictionary,
    ];
}

/// Fail fast when `family` does not provide `operation`
pub fn validate(family: Family, operation: Operation) -> Result<(), CompatibilityError> {
    if family.supports(operation) {
        Ok(())
    } else {
        Err(CompatibilityError { operation, family })
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::Tagging => "tagging",
            Operation::Parsing => "parsing",
            Operation::SentenceSplitting => "sentence splitting",
            Operation::Dictionary => "user dictionary",
        })
    }
}

impl FromStr for Family {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        if key == "okt" {
            return Ok(Family::Twitter);
        }
        Family::ALL
            .into_iter()
            .find(|f| f.name() == key)
            .ok_or_else(|| EngineError::Config(format!("unknown backend family '{s}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compatibility_table() {
        let parsers: Vec<_> = Family::supporting(Operation::Parsing).collect();
        assert_eq!(parsers, vec![Family::Hannanum, Family::Kkma]);

        let splitters: Vec<_> = Family::supporting(Operation::SentenceSplitting).collect();
        assert_eq!(splitters, vec![Family::Hannanum, Family::Twitter]);

        let dictionaries: Vec<_> = Family::supporting(Operation::Dictionary).collect();
        assert_eq!(dictionaries.len(), 6);
        assert!(!dictionaries.contains(&Family::Rhino));

        assert_eq!(Family::supporting(Operation::Tagging).count(), 7);
    }

    #[test]
    fn test_validate_names_operation_and_family() {
        assert!(validate(Family::Kkma, Operation::Parsing).is_ok());

        let err = validate(Family::Komoran, Operation::Parsing).unwrap_err();
        assert_eq!(err.operation, Operation::Parsing);
        assert_eq!(err.family, Family::Komoran);
        let message = err.to_string();
        assert!(message.contains("parsing"));
        assert!(message.contains("komoran"));
    }

    #[test]
    fn test_family_names() {
        assert_eq!("KKMA".parse::<Family>().unwrap(), Family::Kkma);
        assert_eq!(" okt ".parse::<Family>().unwrap(), Family::Twitter);
        assert!("mecab".parse::<Family>().is_err());
        for family in Family::ALL {
            assert_eq!(family.to_string().parse::<Family>().unwrap(), family);
        }
    }
}
