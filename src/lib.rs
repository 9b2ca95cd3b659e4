//! Automatic import insertion for ECMAScript modules.
//!
//! Given a table of declarations (which names a module provides, and how),
//! [`AutoImport`] finds free references to those names in a source file and
//! adds the matching `import` statements. Locally bound names, property
//! keys, labels and assignment targets are left alone.
//!
//! ```no_run
//! use autoimport::{AutoImport, parse_config};
//!
//! let config = parse_config(r#"{ "declarations": [{ "default": "React", "path": "react" }] }"#)?;
//! let rewriter = AutoImport::from_config(&config)?;
//! let result = rewriter.transform("React.createElement('div');", Some("app.js"));
//! assert!(result.code.starts_with("import React from \"react\";"));
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod classifier;
pub mod config;
pub mod resolver;
pub mod synthesizer;
pub mod tracing_config;
pub mod transform;

pub use config::{
    AutoImportConfig, Declaration, DeclarationConfig, DeclarationTable, load_config, parse_config,
};
pub use resolver::{ImportKind, ImportMatch, resolve, resolve_module_path};
pub use synthesizer::{ApplyOutcome, InsertionOrder};
pub use transform::{AutoImport, ExcludeGlobs, FileFilter, TransformResult, transform_source};

#[cfg(test)]
#[path = "tests/test_fixtures.rs"]
mod test_fixtures;

#[cfg(test)]
#[path = "tests/classifier_tests.rs"]
mod classifier_tests;

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod config_tests;

#[cfg(test)]
#[path = "tests/resolver_tests.rs"]
mod resolver_tests;

#[cfg(test)]
#[path = "tests/synthesizer_tests.rs"]
mod synthesizer_tests;
