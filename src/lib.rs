//! Meme Core - command-line option layer
//!
//! # Flow
//! 1. The template catalog is built once from the embedded assets
//! 2. Raw arguments resolve into a single `Options` value
//! 3. Validation gates everything downstream
//! 4. Image loading, compositing and upload consume the validated options

pub mod assets;
pub mod templates;
pub mod options;
pub mod validation;
pub mod usage;

pub use assets::{AssetSource, EmbeddedAssets, IMAGE_EXTENSION, IMAGE_PATH};
pub use templates::{build_catalog, TemplateCatalog, TemplateId};
pub use options::{parse_options, split_text, Destination, Flags, Options, ParseError};
pub use validation::{ValidationError, ValidationResult, ValidationRule, Validator};
pub use usage::{print_usage, write_usage};

pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");
