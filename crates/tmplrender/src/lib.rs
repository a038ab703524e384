//! # tmplrender - Cached File-Based Template Rendering
//!
//! `tmplrender` is a thin caching layer over [MiniJinja](minijinja). It parses
//! named template files on first use, keeps the compiled result, and renders
//! either the whole template or one of its blocks against serializable data.
//!
//! ## Core Concepts
//!
//! - [`Renderer`]: lazily built cache from template name to compiled template
//! - [`TemplateSource`]: read-only file source ([`MemorySource`], [`DirSource`])
//! - Include patterns: globs parsed with every template, for layouts and partials
//! - [`FuncMap`]: extra template functions, merged over the built-in `dict` and `list`
//! - [`RendererConfig`]: base directory and include patterns, loadable from YAML
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use tmplrender::{FuncMap, MemorySource, Renderer};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Page { title: String, tags: Vec<String> }
//!
//! let source = MemorySource::new()
//!     .with_file("tpl/partials/tags.txt", "{% macro taglist(t) %}{{ t | join(', ') }}{% endmacro %}")
//!     .with_file(
//!         "tpl/page.txt",
//!         "{% from 'partials/tags.txt' import taglist %}{{ shout(title) }}: {{ taglist(tags) }}",
//!     );
//!
//! let renderer = Renderer::new(Arc::new(source))
//!     .with_base_dir("tpl")
//!     .with_include_patterns(["partials/*.txt"])
//!     .with_funcs(FuncMap::new().with("shout", |s: String| s.to_uppercase()));
//!
//! let out = renderer
//!     .render_to_string(
//!         "page.txt",
//!         Page { title: "Notes".into(), tags: vec!["a".into(), "b".into()] },
//!     )
//!     .unwrap();
//! assert_eq!(out, "NOTES: a, b");
//! ```
//!
//! ## Caching
//!
//! Each distinct name is parsed once and kept until the renderer is dropped.
//! Failed parses are not cached. There is no invalidation.

#![deny(deprecated)]

mod config;
mod error;
pub mod source;
pub mod template;

pub use config::{ConfigError, RendererConfig};
pub use error::RenderError;
pub use source::{DirSource, MemorySource, TemplateSource};
pub use template::{dict, list, FuncMap, Renderer};

// Re-exported so callers can build data and functions without a direct dependency.
pub use minijinja;
