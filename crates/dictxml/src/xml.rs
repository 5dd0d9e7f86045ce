//! Element tree model, tree builder and emitter

pub mod builder;
pub mod emitter;
pub mod keys;
pub mod model;

pub use builder::{build, build_with_config, Builder, Config as BuildConfig};
pub use emitter::{emit, Config as EmitConfig, Emitter, NamespaceStyle};
pub use keys::{Key, ATTRIBUTE_PREFIX, NAMESPACE_KEY, TEXT_KEY};
pub use model::Element;
