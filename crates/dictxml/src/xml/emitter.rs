//! Markup emitter: serializes an [`Element`] tree to XML text

use tracing::{debug, instrument};

use crate::error::{Error, ErrorKind, Result};
use crate::xml::model::Element;

const DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// How elements in a namespace are written
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NamespaceStyle {
    /// Qualify with a generated prefix bound by `xmlns:<prefix>`
    #[default]
    Prefixed,
    /// Rebind the default namespace with `xmlns`, using `xmlns=""` to leave it
    DefaultNamespace,
}

/// Configuration for the emitter
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Prepend the `<?xml ...?>` declaration
    pub declaration: bool,
    /// Indentation unit; `None` writes everything on one line
    pub indent: Option<String>,
    pub namespace_style: NamespaceStyle,
    /// Base of generated prefixes, numbered from 0 (`ns0`, `ns1`, ...)
    pub prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            declaration: false,
            indent: None,
            namespace_style: NamespaceStyle::Prefixed,
            prefix: "ns".to_string(),
        }
    }
}

impl Config {
    /// Indented output with a declaration
    pub fn pretty() -> Self {
        Self {
            declaration: true,
            indent: Some("  ".to_string()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = Some(indent.into());
        self
    }

    #[must_use]
    pub fn with_declaration(mut self, declaration: bool) -> Self {
        self.declaration = declaration;
        self
    }

    #[must_use]
    pub fn with_namespace_style(mut self, style: NamespaceStyle) -> Self {
        self.namespace_style = style;
        self
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }
}

/// Serializes element trees
#[derive(Clone, Debug, Default)]
pub struct Emitter {
    config: Config,
}

impl Emitter {
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Serialize `root` and its subtree to a string
    #[instrument(level = "debug", skip_all, fields(root = %root.name))]
    pub fn emit(&self, root: &Element) -> Result<String> {
        if !is_ncname(&self.config.prefix) {
            return Err(Error::new(
                ErrorKind::InvalidName {
                    name: self.config.prefix.clone(),
                },
                "/",
            ));
        }

        let mut writer = Writer {
            config: &self.config,
            out: String::new(),
            path: Vec::new(),
            bindings: Vec::new(),
            default_namespace: None,
        };
        if self.config.declaration {
            writer.out.push_str(DECLARATION);
            writer.out.push('\n');
        }
        writer.element(root, 0, self.config.indent.is_some())?;
        debug!(bytes = writer.out.len(), "emitted document");
        Ok(writer.out)
    }
}

/// Serialize `root` with the given config
pub fn emit(root: &Element, config: &Config) -> Result<String> {
    Emitter::new(config.clone()).emit(root)
}

struct Writer<'a> {
    config: &'a Config,
    out: String,
    path: Vec<&'a str>,
    /// In-scope prefix bindings, innermost last
    bindings: Vec<(String, &'a str)>,
    default_namespace: Option<&'a str>,
}

impl<'a> Writer<'a> {
    fn element(&mut self, element: &'a Element, depth: usize, indent: bool) -> Result<()> {
        self.path.push(&element.name);
        if !is_ncname(&element.name) {
            return Err(self.error(
                ErrorKind::InvalidName {
                    name: element.name.clone(),
                },
                None,
            ));
        }

        let saved_bindings = self.bindings.len();
        let saved_default = self.default_namespace;
        let namespace = element.namespace.as_deref();
        if namespace == Some("") {
            return Err(self.error(
                ErrorKind::InvalidNamespace {
                    found: "empty string".to_string(),
                },
                Some("#ns"),
            ));
        }

        let mut declaration: Option<(Option<String>, &'a str)> = None;
        let qualified = match self.config.namespace_style {
            NamespaceStyle::Prefixed => match namespace {
                None => element.name.clone(),
                Some(uri) => {
                    let bound = self.bindings.iter().rev().find(|(_, bound)| *bound == uri);
                    let prefix = match bound {
                        Some((prefix, _)) => prefix.clone(),
                        None => {
                            let prefix = format!("{}{}", self.config.prefix, self.bindings.len());
                            self.bindings.push((prefix.clone(), uri));
                            declaration = Some((Some(prefix.clone()), uri));
                            prefix
                        }
                    };
                    format!("{prefix}:{}", element.name)
                }
            },
            NamespaceStyle::DefaultNamespace => {
                if namespace != self.default_namespace {
                    declaration = Some((None, namespace.unwrap_or_default()));
                    self.default_namespace = namespace;
                }
                element.name.clone()
            }
        };

        self.out.push('<');
        self.out.push_str(&qualified);

        if let Some((prefix, uri)) = declaration {
            self.out.push_str(" xmlns");
            if let Some(prefix) = prefix {
                self.out.push(':');
                self.out.push_str(&prefix);
            }
            self.out.push_str("=\"");
            self.escaped(uri, true, Some("#ns"))?;
            self.out.push('"');
        }

        for (name, value) in &element.attributes {
            let segment = format!("@{name}");
            if name == "xmlns" || !is_ncname(name) {
                return Err(self.error(
                    ErrorKind::InvalidName { name: name.clone() },
                    Some(&segment),
                ));
            }
            self.out.push(' ');
            self.out.push_str(name);
            self.out.push_str("=\"");
            self.escaped(value, true, Some(&segment))?;
            self.out.push('"');
        }

        if element.is_empty() {
            self.out.push_str("/>");
        } else {
            self.out.push('>');
            if let Some(text) = &element.text {
                self.escaped(text, false, None)?;
            }
            // mixed content is never reindented
            let indent = indent && element.text.is_none();
            for child in &element.children {
                if indent {
                    self.newline(depth + 1);
                }
                self.element(child, depth + 1, indent)?;
            }
            if indent {
                self.newline(depth);
            }
            self.out.push_str("</");
            self.out.push_str(&qualified);
            self.out.push('>');
        }

        self.bindings.truncate(saved_bindings);
        self.default_namespace = saved_default;
        self.path.pop();
        Ok(())
    }

    fn newline(&mut self, depth: usize) {
        if let Some(unit) = &self.config.indent {
            self.out.push('\n');
            for _ in 0..depth {
                self.out.push_str(unit);
            }
        }
    }

    fn escaped(&mut self, input: &str, attribute: bool, segment: Option<&str>) -> Result<()> {
        for ch in input.chars() {
            match ch {
                '&' => self.out.push_str("&amp;"),
                '<' => self.out.push_str("&lt;"),
                '>' => self.out.push_str("&gt;"),
                '"' if attribute => self.out.push_str("&quot;"),
                '\t' if attribute => self.out.push_str("&#9;"),
                '\n' if attribute => self.out.push_str("&#10;"),
                '\r' => self.out.push_str("&#13;"),
                ch if is_xml_char(ch) => self.out.push(ch),
                ch => return Err(self.error(ErrorKind::InvalidCharacter { ch }, segment)),
            }
        }
        Ok(())
    }

    fn error(&self, kind: ErrorKind, segment: Option<&str>) -> Error {
        let mut path = String::new();
        for part in self.path.iter().copied().chain(segment) {
            path.push('/');
            path.push_str(part);
        }
        Error::new(kind, path)
    }
}

/// XML 1.0 `Char` production
fn is_xml_char(ch: char) -> bool {
    matches!(
        ch,
        '\t'
            | '\n'
            | '\r'
            | '\u{20}'..='\u{D7FF}'
            | '\u{E000}'..='\u{FFFD}'
            | '\u{10000}'..='\u{10FFFF}'
    )
}

fn is_name_start_char(ch: char) -> bool {
    matches!(
        ch,
        'A'..='Z'
            | '_'
            | 'a'..='z'
            | '\u{C0}'..='\u{D6}'
            | '\u{D8}'..='\u{F6}'
            | '\u{F8}'..='\u{2FF}'
            | '\u{370}'..='\u{37D}'
            | '\u{37F}'..='\u{1FFF}'
            | '\u{200C}'..='\u{200D}'
            | '\u{2070}'..='\u{218F}'
            | '\u{2C00}'..='\u{2FEF}'
            | '\u{3001}'..='\u{D7FF}'
            | '\u{F900}'..='\u{FDCF}'
            | '\u{FDF0}'..='\u{FFFD}'
            | '\u{10000}'..='\u{EFFFF}'
    )
}

fn is_name_char(ch: char) -> bool {
    is_name_start_char(ch)
        || matches!(
            ch,
            '-' | '.' | '0'..='9' | '\u{B7}' | '\u{300}'..='\u{36F}' | '\u{203F}'..='\u{2040}'
        )
}

/// XML name without a colon
pub fn is_ncname(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if is_name_start_char(first) => chars.all(is_name_char),
        _ => false,
    }
}
