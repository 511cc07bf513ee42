//! ClassName value object - a validated `[A-Za-z0-9_]+` identifier

use std::fmt;

use crate::error::InvalidNameError;

/// A non-empty identifier made of ASCII letters, digits and underscores
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassName(String);

impl ClassName {
    /// Validate and wrap a class name
    pub fn parse(name: &str) -> Result<Self, InvalidNameError> {
        if name.is_empty() {
            return Err(InvalidNameError::Empty);
        }
        if let Some(ch) = name
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '_'))
        {
            return Err(InvalidNameError::IllegalCharacter {
                name: name.to_string(),
                ch,
            });
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ClassName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_letters_digits_underscore() {
        assert_eq!(ClassName::parse("Product_2").unwrap().as_str(), "Product_2");
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(ClassName::parse(""), Err(InvalidNameError::Empty));
    }

    #[test]
    fn rejects_first_illegal_character() {
        assert_eq!(
            ClassName::parse("Create Product"),
            Err(InvalidNameError::IllegalCharacter {
                name: "Create Product".to_string(),
                ch: ' ',
            })
        );
        assert!(ClassName::parse("Prodüct").is_err());
    }
}
