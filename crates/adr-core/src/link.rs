use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LinkParseError {
    #[error("Link token cannot be empty")]
    Empty,
    #[error("Invalid link token {0:?}; expected NUMBER:LINK:REVERSE-LINK")]
    Malformed(String),
}

/// Named relation from a new record to an existing one, e.g. `12:Amends:Amended by`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRelation {
    pub target_number: u32,
    pub forward_label: String,
    pub reverse_label: String,
}

impl LinkRelation {
    pub fn parse(text: &str) -> Result<Self, LinkParseError> {
        if text.trim().is_empty() {
            return Err(LinkParseError::Empty);
        }
        let fragments: Vec<&str> = text.split(':').filter(|part| !part.is_empty()).collect();
        let [number, forward, reverse] = fragments.as_slice() else {
            return Err(LinkParseError::Malformed(text.to_string()));
        };
        let target_number = number
            .trim()
            .parse::<u32>()
            .map_err(|_| LinkParseError::Malformed(text.to_string()))?;
        Ok(LinkRelation {
            target_number,
            forward_label: forward.to_string(),
            reverse_label: reverse.to_string(),
        })
    }
}

impl FromStr for LinkRelation {
    type Err = LinkParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LinkRelation::parse(s)
    }
}

impl fmt::Display for LinkRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.target_number, self.forward_label, self.reverse_label
        )
    }
}
