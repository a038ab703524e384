//! Compilation of template units on top of MiniJinja.
//!
//! A [`CompiledTemplate`] is one MiniJinja [`Environment`] holding the
//! requested template together with every file matched by the include
//! patterns. Shared fragments are registered under their path relative to the
//! base directory, so a page can `{% extends "layouts/base.html" %}` or
//! `{% include "partials/nav.html" %}` them by that name.
//!
//! Files are registered in pattern order: includes first, target last. When
//! two registrations share a name MiniJinja keeps the later one.

use std::fmt;
use std::io;
use std::sync::Arc;

use minijinja::Environment;
use serde::Serialize;
use tracing::{debug, trace};

use super::functions::{register_functions, FuncMap};
use super::patterns::{compose, relative_name};
use crate::error::RenderError;
use crate::source::TemplateSource;

/// A parsed, ready-to-execute template unit.
///
/// Cloning is cheap; clones share the compiled environment.
#[derive(Clone)]
pub(crate) struct CompiledTemplate {
    name: String,
    files: Vec<String>,
    env: Arc<Environment<'static>>,
}

impl CompiledTemplate {
    /// The name this unit is executed under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Source paths that were parsed into this unit, in parse order.
    pub fn files(&self) -> &[String] {
        &self.files
    }

    /// Executes the whole template, streaming output into `w`.
    ///
    /// Output written before an error is not rolled back.
    pub fn execute<S: Serialize, W: io::Write>(&self, data: S, w: W) -> Result<(), RenderError> {
        let tmpl = self
            .env
            .get_template(&self.name)
            .map_err(RenderError::Execute)?;
        tmpl.render_to_write(data, w).map_err(RenderError::Execute)?;
        Ok(())
    }

    /// Executes only the block named `block`.
    pub fn execute_block<S: Serialize, W: io::Write>(
        &self,
        block: &str,
        data: S,
        w: W,
    ) -> Result<(), RenderError> {
        let tmpl = self
            .env
            .get_template(&self.name)
            .map_err(RenderError::Execute)?;
        let mut state = tmpl.eval_to_state(data).map_err(RenderError::Execute)?;
        state
            .render_block_to_write(block, w)
            .map_err(RenderError::Execute)
    }
}

impl fmt::Debug for CompiledTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledTemplate")
            .field("name", &self.name)
            .field("files", &self.files)
            .finish_non_exhaustive()
    }
}

/// Everything needed to compile a unit, borrowed from the renderer.
pub(crate) struct CompileSpec<'a> {
    pub source: &'a dyn TemplateSource,
    pub base_dir: &'a str,
    pub include_patterns: &'a [String],
    pub funcs: &'a FuncMap,
}

/// Parses template `name` along with all include patterns.
///
/// Fails if any pattern matches nothing, a file cannot be read, or a file
/// does not compile.
pub(crate) fn compile(spec: &CompileSpec<'_>, name: &str) -> Result<CompiledTemplate, RenderError> {
    let mut env = Environment::new();
    env.set_keep_trailing_newline(true);
    register_functions(&mut env, spec.funcs);

    let patterns = compose(spec.base_dir, spec.include_patterns, name);
    let target_index = patterns.len() - 1;
    let mut files = Vec::new();

    for (index, pattern) in patterns.iter().enumerate() {
        let matches = spec.source.glob(pattern)?;
        if matches.is_empty() {
            return Err(RenderError::NoMatch(pattern.clone()));
        }

        let is_target = index == target_index;
        let alias_target = is_target && matches.len() == 1;

        for path in matches {
            let content = spec
                .source
                .read(&path)
                .map_err(|e| RenderError::source_io(path.as_str(), e))?;
            let registered = relative_name(spec.base_dir, &path).to_string();
            trace!(template = %name, file = %path, as_name = %registered, "parsing file");

            if alias_target && registered != name {
                env.add_template_owned(name.to_string(), content.clone())
                    .map_err(RenderError::Parse)?;
            }
            env.add_template_owned(registered, content)
                .map_err(RenderError::Parse)?;
            files.push(path);
        }
    }

    debug!(template = %name, files = files.len(), "compiled template");

    Ok(CompiledTemplate {
        name: name.to_string(),
        files,
        env: Arc::new(env),
    })
}
