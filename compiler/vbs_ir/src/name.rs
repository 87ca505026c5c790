//! Case-insensitive identifiers.

use std::borrow::Borrow;
use std::fmt;

/// An identifier folded to ASCII lowercase.
///
/// VBScript names are case-insensitive everywhere (`Response.Write`,
/// `response.write` and `RESPONSE.WRITE` are the same member), so folding
/// happens once when the name is created and every later comparison or hash
/// lookup is a plain string comparison.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Name(String);

impl Name {
    /// Fold `text` into a name.
    pub fn new(text: &str) -> Self {
        Name(text.to_ascii_lowercase())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if this name matches `text` under case folding.
    #[inline]
    pub fn is(&self, text: &str) -> bool {
        self.0.eq_ignore_ascii_case(text)
    }
}

impl From<&str> for Name {
    fn from(text: &str) -> Self {
        Name::new(text)
    }
}

impl Borrow<str> for Name {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({:?})", self.0)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_fold_case() {
        assert_eq!(Name::new("Response"), Name::new("RESPONSE"));
        assert_eq!(Name::new("QueryString").as_str(), "querystring");
        assert!(Name::new("Write").is("WRITE"));
    }
}
