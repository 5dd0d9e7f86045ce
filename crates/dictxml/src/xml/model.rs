//! Abstract element tree handed from the builder to the emitter

use indexmap::IndexMap;

/// XML element
///
/// `namespace` is the absolute namespace name, never a prefix. Prefixes are
/// chosen by the emitter.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Element {
    pub name: String,
    pub namespace: Option<String>,
    pub attributes: IndexMap<String, String>,
    /// Text content, always rendered before `children`
    pub text: Option<String>,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(name: impl Into<String>, namespace: Option<String>) -> Self {
        Self {
            name: name.into(),
            namespace,
            ..Self::default()
        }
    }

    /// Element built from a scalar: a name, a namespace and optional text
    pub fn leaf(name: impl Into<String>, namespace: Option<String>, text: Option<String>) -> Self {
        Self {
            text,
            ..Self::new(name, namespace)
        }
    }

    /// True when the element renders self-closing
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.children.is_empty()
    }

    /// First child with the given name
    pub fn child(&self, name: &str) -> Option<&Self> {
        self.children.iter().find(|child| child.name == name)
    }

    /// All children with the given name, in document order
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Self> + 'a {
        self.children.iter().filter(move |child| child.name == name)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Number of elements in this subtree, this element included
    pub fn element_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(Self::element_count)
            .sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_element_is_empty() {
        let element = Element::new("root", None);
        assert!(element.is_empty());
        assert!(element.attributes.is_empty());
        assert_eq!(element.namespace, None);
    }

    #[test]
    fn test_leaf_with_text_is_not_empty() {
        let element = Element::leaf("a", Some("urn:x".to_string()), Some("x".to_string()));
        assert!(!element.is_empty());
        assert_eq!(element.namespace.as_deref(), Some("urn:x"));
    }

    #[test]
    fn test_child_lookup() {
        let mut root = Element::new("root", None);
        root.children.push(Element::leaf("a", None, Some("1".to_string())));
        root.children.push(Element::leaf("b", None, None));
        root.children.push(Element::leaf("a", None, Some("2".to_string())));

        assert_eq!(root.child("b").map(|b| b.is_empty()), Some(true));
        assert!(root.child("c").is_none());
        let texts: Vec<_> = root
            .children_named("a")
            .filter_map(|a| a.text.as_deref())
            .collect();
        assert_eq!(texts, vec!["1", "2"]);
        assert_eq!(root.element_count(), 4);
    }
}
