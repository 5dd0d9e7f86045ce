//! Reserved object keys
//!
//! Keys are classified by their syntax alone. A child element that really is
//! named `#ns`, `#text` or starts with `@` cannot be expressed.

/// Declares the namespace of an element; `null` clears the inherited one
pub const NAMESPACE_KEY: &str = "#ns";
/// Supplies the text content of an element
pub const TEXT_KEY: &str = "#text";
/// Prefix marking an attribute key
pub const ATTRIBUTE_PREFIX: char = '@';

/// Role of an object key
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key<'a> {
    Namespace,
    Text,
    /// Attribute, carrying the name without its prefix
    Attribute(&'a str),
    /// Child element name
    Child(&'a str),
}

impl<'a> Key<'a> {
    pub fn classify(key: &'a str) -> Self {
        if key == NAMESPACE_KEY {
            Self::Namespace
        } else if key == TEXT_KEY {
            Self::Text
        } else if let Some(name) = key.strip_prefix(ATTRIBUTE_PREFIX) {
            Self::Attribute(name)
        } else {
            Self::Child(key)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(Key::classify("#ns"), Key::Namespace);
        assert_eq!(Key::classify("#text"), Key::Text);
        assert_eq!(Key::classify("@id"), Key::Attribute("id"));
        assert_eq!(Key::classify("@"), Key::Attribute(""));
        assert_eq!(Key::classify("name"), Key::Child("name"));
    }

    #[test]
    fn test_other_hash_keys_are_children() {
        assert_eq!(Key::classify("#comment"), Key::Child("#comment"));
        assert_eq!(Key::classify("text"), Key::Child("text"));
    }
}
