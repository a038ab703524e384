//! Template compilation, caching and rendering.
//!
//! ## Lookup
//!
//! Every render goes through the same steps:
//!
//! 1. Look the name up in the renderer's cache.
//! 2. On a miss, compose the patterns: include patterns first, then the
//!    requested file, each joined onto the base directory.
//! 3. Expand each pattern against the [`TemplateSource`](crate::TemplateSource)
//!    and compile every matched file into one MiniJinja environment.
//! 4. Store the result, then execute the whole template or a single block.
//!
//! ## Functions
//!
//! `dict` and `list` are always registered. A caller's [`FuncMap`] is applied
//! on top and wins on name collisions.
//!
//! ## Key Types
//!
//! - [`Renderer`]: the cache and the render entry points
//! - [`FuncMap`]: caller-supplied template functions

mod engine;
pub mod functions;
mod patterns;
mod renderer;

pub use functions::{dict, list, FuncMap};
pub use patterns::join;
pub use renderer::Renderer;
