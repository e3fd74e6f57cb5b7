//! The strand upon which a feature is annotated.

use std::str::FromStr;

/// An error related to the parsing of a strand.
#[derive(Debug, Eq, PartialEq)]
pub struct ParseStrandError(String);

impl std::fmt::Display for ParseStrandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "parse strand error: {} is not a valid strand", self.0)
    }
}

impl std::error::Error for ParseStrandError {}

/// The strand of a feature.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Strand {
    /// The plus strand (`+`).
    #[default]
    Plus,

    /// The minus strand (`-`).
    Minus,
}

impl FromStr for Strand {
    type Err = ParseStrandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Self::Plus),
            "-" => Ok(Self::Minus),
            c => Err(ParseStrandError(c.to_string())),
        }
    }
}

impl std::fmt::Display for Strand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strand::Plus => write!(f, "+"),
            Strand::Minus => write!(f, "-"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strand_from_str() -> Result<(), Box<dyn std::error::Error>> {
        let strand: Strand = "+".parse()?;
        assert_eq!(strand, Strand::Plus);

        let strand: Strand = "-".parse()?;
        assert_eq!(strand, Strand::Minus);

        let err = "?".parse::<Strand>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "parse strand error: ? is not a valid strand"
        );

        Ok(())
    }

    #[test]
    fn test_strand_display() {
        assert_eq!(Strand::Plus.to_string(), "+");
        assert_eq!(Strand::Minus.to_string(), "-");
    }
}
