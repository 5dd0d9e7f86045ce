//! Tree builder: turns a [`Value`] into an [`Element`] tree

use tracing::{debug, instrument, trace};

use crate::error::{Error, ErrorKind, Result};
use crate::value::{Object, Value};
use crate::xml::keys::{Key, NAMESPACE_KEY, TEXT_KEY};
use crate::xml::model::Element;

/// Root element name used when none is given
pub const DEFAULT_ROOT_NAME: &str = "root";

/// Configuration for the tree builder
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Name of the root element
    pub root_name: String,
    /// Maximum element nesting depth, root included (0 means unlimited)
    pub max_depth: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root_name: DEFAULT_ROOT_NAME.to_string(),
            max_depth: 256,
        }
    }
}

impl Config {
    /// Create a config with a specific root name and depth limit
    pub fn new(root_name: impl Into<String>, max_depth: u16) -> Self {
        Self {
            root_name: root_name.into(),
            max_depth,
        }
    }

    /// Create a config without a depth limit
    pub fn unlimited() -> Self {
        Self {
            max_depth: 0,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_root_name(mut self, root_name: impl Into<String>) -> Self {
        self.root_name = root_name.into();
        self
    }
}

/// Builds element trees from values
#[derive(Clone, Debug, Default)]
pub struct Builder {
    config: Config,
}

impl Builder {
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Build the element tree for `value`, which must be an object
    #[instrument(level = "debug", skip_all, fields(root = %self.config.root_name))]
    pub fn build(&self, value: &Value) -> Result<Element> {
        let mut walk = Walk {
            max_depth: self.config.max_depth,
            path: Vec::new(),
        };
        let root = match value {
            Value::Object(object) => {
                walk.element_from_object(&self.config.root_name, object, None)?
            }
            other => {
                return Err(walk.error(
                    ErrorKind::RootNotObject {
                        found: other.type_name(),
                    },
                    None,
                ))
            }
        };
        debug!(elements = root.element_count(), "built element tree");
        Ok(root)
    }
}

/// Build with the default config, optionally overriding the root name
pub fn build(value: &Value, root: Option<&str>) -> Result<Element> {
    let config = match root {
        Some(name) => Config::default().with_root_name(name),
        None => Config::default(),
    };
    build_with_config(value, &config)
}

pub fn build_with_config(value: &Value, config: &Config) -> Result<Element> {
    Builder::new(config.clone()).build(value)
}

/// State of a single build: the element path doubles as the depth counter
struct Walk<'a> {
    max_depth: u16,
    path: Vec<&'a str>,
}

impl<'a> Walk<'a> {
    fn element_from_object(
        &mut self,
        name: &'a str,
        object: &'a Object,
        parent_namespace: Option<&'a str>,
    ) -> Result<Element> {
        self.enter(name)?;

        let namespace = match object.get(NAMESPACE_KEY) {
            Some(value) => self.namespace(value)?,
            None => parent_namespace,
        };
        trace!(element = name, namespace, "element");

        let mut element = Element::new(name, namespace.map(str::to_owned));
        for (key, value) in object {
            match Key::classify(key) {
                Key::Namespace => {}
                Key::Attribute(attribute) => {
                    let text = self.attribute_value(key, attribute, value)?;
                    element.attributes.insert(attribute.to_owned(), text);
                }
                Key::Text => element.text = self.text(value, TEXT_KEY)?,
                Key::Child(child) => {
                    self.push_children(&mut element.children, child, value, namespace)?;
                }
            }
        }

        self.leave();
        Ok(element)
    }

    fn push_children(
        &mut self,
        children: &mut Vec<Element>,
        name: &'a str,
        value: &'a Value,
        namespace: Option<&'a str>,
    ) -> Result<()> {
        match value {
            Value::Object(object) => {
                children.push(self.element_from_object(name, object, namespace)?);
            }
            Value::Array(items) => {
                // each item resolves its own namespace against the inherited one
                for item in items {
                    match item {
                        Value::Object(object) => {
                            children.push(self.element_from_object(name, object, namespace)?);
                        }
                        Value::Array(_) => {
                            return Err(self.error(ErrorKind::NestedSequence, Some(name)));
                        }
                        scalar => children.push(self.leaf(name, scalar, namespace)?),
                    }
                }
            }
            scalar => children.push(self.leaf(name, scalar, namespace)?),
        }
        Ok(())
    }

    fn leaf(&mut self, name: &'a str, value: &Value, namespace: Option<&str>) -> Result<Element> {
        self.enter(name)?;
        let text = self.text(value, name)?;
        self.leave();
        Ok(Element::leaf(name, namespace.map(str::to_owned), text))
    }

    fn namespace(&self, value: &'a Value) -> Result<Option<&'a str>> {
        match value {
            Value::Null => Ok(None),
            Value::String(uri) if !uri.is_empty() => Ok(Some(uri)),
            Value::String(_) => Err(self.error(
                ErrorKind::InvalidNamespace {
                    found: "empty string".to_string(),
                },
                Some(NAMESPACE_KEY),
            )),
            other => Err(self.error(
                ErrorKind::InvalidNamespace {
                    found: other.type_name().to_string(),
                },
                Some(NAMESPACE_KEY),
            )),
        }
    }

    /// Attribute values are taken as written: strings pass through and
    /// numbers use their canonical text. Booleans are not lowercased.
    fn attribute_value(&self, key: &str, name: &str, value: &Value) -> Result<String> {
        match value {
            Value::String(text) => Ok(text.clone()),
            Value::Int(_) | Value::Float(_) => Ok(value.number_text().unwrap_or_default()),
            other => Err(self.error(
                ErrorKind::InvalidAttributeValue {
                    name: name.to_string(),
                    found: other.type_name(),
                },
                Some(key),
            )),
        }
    }

    /// Text of a scalar: null has none, booleans are lowercase
    fn text(&self, value: &Value, segment: &str) -> Result<Option<String>> {
        match value {
            Value::Null => Ok(None),
            Value::Bool(flag) => Ok(Some(flag.to_string())),
            Value::Int(_) | Value::Float(_) => Ok(value.number_text()),
            Value::String(text) => Ok(Some(text.clone())),
            Value::Array(_) | Value::Object(_) => Err(self.error(
                ErrorKind::InvalidText {
                    found: value.type_name(),
                },
                Some(segment),
            )),
        }
    }

    fn enter(&mut self, name: &'a str) -> Result<()> {
        if self.max_depth > 0 && self.path.len() >= usize::from(self.max_depth) {
            return Err(self.error(
                ErrorKind::MaxDepthExceeded {
                    max: self.max_depth,
                },
                Some(name),
            ));
        }
        self.path.push(name);
        Ok(())
    }

    fn leave(&mut self) {
        self.path.pop();
    }

    fn error(&self, kind: ErrorKind, segment: Option<&str>) -> Error {
        let mut path = String::new();
        for part in self.path.iter().copied().chain(segment) {
            path.push('/');
            path.push_str(part);
        }
        if path.is_empty() {
            path.push('/');
        }
        Error::new(kind, path)
    }
}
