//! dictxml - build XML documents from ordered nested values
//!
//! Object keys become child elements, arrays repeat an element once per
//! item, and three reserved keys shape the element itself:
//!
//! - `@name` sets the attribute `name`
//! - `#text` sets the text content, written before any child element
//! - `#ns` sets the namespace, inherited by descendants; `null` clears it
//!
//! # Quick Start
//!
//! ```
//! use dictxml::{to_xml_string, Object, Value};
//! # fn main() -> Result<(), dictxml::Error> {
//! let mut person = Object::new();
//! person.insert("@id", "5");
//! person.insert("name", "Bob");
//! person.insert("tags", vec![Value::from("a"), Value::from("b")]);
//!
//! let xml = to_xml_string(&Value::Object(person), Some("person"))?;
//! assert_eq!(
//!     xml,
//!     r#"<person id="5"><name>Bob</name><tags>a</tags><tags>b</tags></person>"#
//! );
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub use error::{Error, ErrorKind, Result};

pub mod value;
pub use value::{Array, Object, Value};

pub mod xml;
pub use xml::{
    build, build_with_config, BuildConfig, Builder, Element, EmitConfig, Emitter, NamespaceStyle,
};

#[cfg(feature = "serde")]
mod de;

use tracing::instrument;

/// Options for the whole value to document pipeline
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Options {
    pub build: BuildConfig,
    pub emit: EmitConfig,
}

impl Options {
    /// Default options with a custom root element name
    pub fn with_root_name(root_name: impl Into<String>) -> Self {
        Self {
            build: BuildConfig::default().with_root_name(root_name),
            emit: EmitConfig::default(),
        }
    }
}

/// Convert `value` to an XML string; `root` defaults to `"root"`
pub fn to_xml_string(value: &Value, root: Option<&str>) -> Result<String> {
    let options = root.map_or_else(Options::default, Options::with_root_name);
    to_xml_string_with_options(value, &options)
}

/// Convert `value` to UTF-8 encoded XML bytes
pub fn to_xml_bytes(value: &Value, root: Option<&str>) -> Result<Vec<u8>> {
    to_xml_string(value, root).map(String::into_bytes)
}

/// Convert with custom build and emit options
#[instrument(level = "debug", skip_all)]
pub fn to_xml_string_with_options(value: &Value, options: &Options) -> Result<String> {
    let root = Builder::new(options.build.clone()).build(value)?;
    Emitter::new(options.emit.clone()).emit(&root)
}
