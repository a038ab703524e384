//! Cached, file-backed template renderer.
//!
//! [`Renderer`] parses a template the first time its name is requested and
//! keeps the compiled unit for the lifetime of the renderer. There is no
//! eviction and no invalidation: edits to the underlying files are not picked
//! up until a new renderer is built.
//!
//! # Concurrency
//!
//! A renderer is `Send + Sync` and meant to be shared across threads. The
//! cache map is created once on first use and guarded by a single mutex that
//! is held only for the map read or write, never while parsing or executing.
//!
//! Two threads asking for the same unseen name at the same moment may both
//! parse it. Both renders succeed with identical output and the later insert
//! replaces the earlier one.

use std::collections::HashMap;
use std::io;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use once_cell::sync::OnceCell;
use serde::Serialize;
use tracing::debug;

use super::engine::{compile, CompileSpec, CompiledTemplate};
use super::functions::FuncMap;
use super::patterns::compose;
use crate::config::RendererConfig;
use crate::error::RenderError;
use crate::source::TemplateSource;

type TemplateCache = Mutex<HashMap<String, CompiledTemplate>>;

/// Renders named templates from a [`TemplateSource`], caching each compiled
/// template after its first use.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use tmplrender::{MemorySource, Renderer};
/// use minijinja::context;
///
/// let source = MemorySource::new()
///     .with_file("web/layouts/base.txt", "[{% block body %}{% endblock %}]")
///     .with_file(
///         "web/pages/hello.txt",
///         "{% extends 'layouts/base.txt' %}{% block body %}Hello, {{ name }}!{% endblock %}",
///     );
///
/// let renderer = Renderer::new(Arc::new(source))
///     .with_base_dir("web")
///     .with_include_patterns(["layouts/*.txt"]);
///
/// let out = renderer
///     .render_to_string("pages/hello.txt", context! { name => "World" })
///     .unwrap();
/// assert_eq!(out, "[Hello, World!]");
///
/// let body = renderer
///     .render_block_to_string("pages/hello.txt", "body", context! { name => "you" })
///     .unwrap();
/// assert_eq!(body, "Hello, you!");
/// ```
pub struct Renderer {
    source: Arc<dyn TemplateSource>,
    base_dir: String,
    include_patterns: Vec<String>,
    funcs: FuncMap,
    templates: OnceCell<TemplateCache>,
}

impl Renderer {
    /// Creates a renderer over `source` with no base directory, no include
    /// patterns and only the built-in functions.
    pub fn new(source: Arc<dyn TemplateSource>) -> Self {
        Self {
            source,
            base_dir: String::new(),
            include_patterns: Vec::new(),
            funcs: FuncMap::new(),
            templates: OnceCell::new(),
        }
    }

    /// Creates a renderer from a declarative configuration.
    pub fn from_config(source: Arc<dyn TemplateSource>, config: RendererConfig) -> Self {
        Self::new(source)
            .with_base_dir(config.base_dir)
            .with_include_patterns(config.include_patterns)
    }

    /// Sets the directory every template path is resolved against.
    pub fn with_base_dir(mut self, base_dir: impl Into<String>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    /// Sets the patterns parsed alongside every template, in order.
    ///
    /// Patterns are relative to the base directory and use shell glob syntax.
    /// Each one must match at least one file.
    pub fn with_include_patterns<I, P>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        self.include_patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Sets extra template functions. Entries replace built-ins of the same name.
    pub fn with_funcs(mut self, funcs: FuncMap) -> Self {
        self.funcs = funcs;
        self
    }

    pub fn base_dir(&self) -> &str {
        &self.base_dir
    }

    pub fn include_patterns(&self) -> &[String] {
        &self.include_patterns
    }

    pub fn funcs(&self) -> &FuncMap {
        &self.funcs
    }

    /// Renders template `name` with `data` into `w`.
    ///
    /// # Errors
    ///
    /// Parse failures ([`RenderError::is_parse`]) leave the cache untouched,
    /// so the next call parses again. Execution failures are returned as
    /// [`RenderError::Execute`]; anything already written to `w` stays written.
    pub fn render<W, S>(&self, w: W, name: &str, data: S) -> Result<(), RenderError>
    where
        W: io::Write,
        S: Serialize,
    {
        self.lookup(name)?.execute(data, w)
    }

    /// Renders only block `block` of template `name` into `w`.
    ///
    /// Errors follow [`render`](Self::render). A block that does not exist is
    /// an execution error and leaves the cached template usable.
    pub fn render_block<W, S>(
        &self,
        w: W,
        name: &str,
        block: &str,
        data: S,
    ) -> Result<(), RenderError>
    where
        W: io::Write,
        S: Serialize,
    {
        self.lookup(name)?.execute_block(block, data, w)
    }

    /// Like [`render`](Self::render), collecting the output into a string.
    pub fn render_to_string<S: Serialize>(
        &self,
        name: &str,
        data: S,
    ) -> Result<String, RenderError> {
        let mut out = Vec::new();
        self.render(&mut out, name, data)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    /// Like [`render_block`](Self::render_block), collecting the output into a string.
    pub fn render_block_to_string<S: Serialize>(
        &self,
        name: &str,
        block: &str,
        data: S,
    ) -> Result<String, RenderError> {
        let mut out = Vec::new();
        self.render_block(&mut out, name, block, data)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    /// Returns `true` if `name` has been parsed and cached.
    pub fn is_cached(&self, name: &str) -> bool {
        self.templates
            .get()
            .is_some_and(|cache| lock(cache).contains_key(name))
    }

    /// Names currently in the cache, sorted.
    pub fn cached_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .templates
            .get()
            .map(|cache| lock(cache).keys().cloned().collect())
            .unwrap_or_default();
        names.sort();
        names
    }

    /// The file patterns that would be parsed for `name`, in parse order.
    pub fn patterns(&self, name: &str) -> Vec<String> {
        compose(&self.base_dir, &self.include_patterns, name)
    }

    fn lookup(&self, name: &str) -> Result<CompiledTemplate, RenderError> {
        if let Some(tmpl) = self.template(name) {
            debug!(template = %name, "template cache hit");
            return Ok(tmpl);
        }

        debug!(template = %name, "template cache miss");
        let tmpl = self.parse(name)?;
        self.set_template(name, tmpl.clone());
        Ok(tmpl)
    }

    fn parse(&self, name: &str) -> Result<CompiledTemplate, RenderError> {
        let spec = CompileSpec {
            source: self.source.as_ref(),
            base_dir: &self.base_dir,
            include_patterns: &self.include_patterns,
            funcs: &self.funcs,
        };
        compile(&spec, name)
    }

    fn cache(&self) -> &TemplateCache {
        self.templates.get_or_init(|| {
            debug!(base_dir = %self.base_dir, "initializing template cache");
            Mutex::new(HashMap::new())
        })
    }

    fn template(&self, name: &str) -> Option<CompiledTemplate> {
        lock(self.cache()).get(name).cloned()
    }

    fn set_template(&self, name: &str, tmpl: CompiledTemplate) {
        lock(self.cache()).insert(name.to_string(), tmpl);
        debug!(template = %name, "template cached");
    }
}

// Entries are immutable once inserted, so a poisoned map is still consistent.
fn lock(cache: &TemplateCache) -> MutexGuard<'_, HashMap<String, CompiledTemplate>> {
    cache.lock().unwrap_or_else(PoisonError::into_inner)
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("base_dir", &self.base_dir)
            .field("include_patterns", &self.include_patterns)
            .field("funcs", &self.funcs)
            .field("cached", &self.cached_names())
            .finish_non_exhaustive()
    }
}
