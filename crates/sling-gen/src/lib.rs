//! CommonJS dependency discovery and rewriting using OXC
//!
//! This crate is the source-to-source half of the sling bundler. Given one
//! module's text and the directory of its canonical id, it parses the text
//! with `oxc_parser`, rewrites every static `require("...")` call to target
//! the bundle runtime with a canonical module id, and regenerates the code
//! with `oxc_codegen`.
//!
//! # Example
//!
//! ```rust
//! use sling_gen::ModuleTransformer;
//!
//! let transformer = ModuleTransformer::default();
//! let out = transformer.transform("const a = require('./a');", "./src")?;
//!
//! assert_eq!(out.dependencies, vec!["./src/a.js".to_string()]);
//! assert!(out.code.contains("__sling_require__(\"./src/a.js\")"));
//! # Ok::<(), sling_gen::GenError>(())
//! ```

mod error;
mod parser;
mod rewrite;

pub mod specifier;

pub use error::{GenError, Result};
pub use parser::{ParseOptions, parse};
pub use rewrite::{
    DEPENDENCY_IMPORT_NAME, ModuleTransformer, RUNTIME_REQUIRE_NAME, TransformOptions,
    TransformOutput,
};

// Re-export commonly used OXC types for convenience
pub use oxc_allocator::Allocator;
pub use oxc_span::SourceType;
