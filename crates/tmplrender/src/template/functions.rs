//! Template functions: the built-in helpers and caller-supplied [`FuncMap`].
//!
//! Two helpers are always available inside templates:
//!
//! - `dict(k1, v1, k2, v2, ...)` builds a string-keyed map
//! - `list(a, b, c, ...)` builds a sequence
//!
//! They are registered before the caller's functions, so a [`FuncMap`] entry
//! with the same name replaces them.

use std::collections::BTreeMap;
use std::fmt;

use minijinja::functions::Function;
use minijinja::value::{FunctionArgs, FunctionResult, Rest};
use minijinja::{Environment, Error, ErrorKind, Value};

/// Caller-supplied template functions, keyed by name.
///
/// # Example
///
/// ```rust
/// use tmplrender::FuncMap;
///
/// let funcs = FuncMap::new()
///     .with("shout", |s: String| s.to_uppercase())
///     .with("add", |a: i64, b: i64| a + b);
///
/// assert_eq!(funcs.len(), 2);
/// assert!(funcs.contains("shout"));
/// ```
#[derive(Clone, Default)]
pub struct FuncMap {
    funcs: BTreeMap<String, Value>,
}

impl FuncMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a function, replacing any earlier entry with the same name.
    pub fn add<F, Rv, Args>(&mut self, name: impl Into<String>, f: F) -> &mut Self
    where
        F: Function<Rv, Args>,
        Rv: FunctionResult,
        Args: for<'a> FunctionArgs<'a>,
    {
        self.funcs.insert(name.into(), Value::from_function(f));
        self
    }

    /// Builder form of [`add`](Self::add).
    pub fn with<F, Rv, Args>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Function<Rv, Args>,
        Rv: FunctionResult,
        Args: for<'a> FunctionArgs<'a>,
    {
        self.add(name, f);
        self
    }

    /// Registers an already-built callable value.
    pub fn add_value(&mut self, name: impl Into<String>, callable: Value) -> &mut Self {
        self.funcs.insert(name.into(), callable);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.funcs.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.funcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.funcs.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.funcs.keys().map(String::as_str)
    }

    fn register(&self, env: &mut Environment<'static>) {
        for (name, callable) in &self.funcs {
            env.add_global(name.clone(), callable.clone());
        }
    }
}

impl fmt::Debug for FuncMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.funcs.keys()).finish()
    }
}

/// Registers the built-in helpers and then `extra`, in that order.
pub(crate) fn register_functions(env: &mut Environment<'static>, extra: &FuncMap) {
    env.add_function("dict", dict);
    env.add_function("list", list);
    extra.register(env);
}

/// Builds a map from alternating key/value arguments.
///
/// Fails on an odd argument count or on a key that is not a string.
pub fn dict(keyvals: Rest<Value>) -> Result<Value, Error> {
    if keyvals.len() % 2 != 0 {
        return Err(Error::new(
            ErrorKind::InvalidOperation,
            "odd number of keyvals",
        ));
    }

    let mut out: Vec<(String, Value)> = Vec::with_capacity(keyvals.len() / 2);
    for pair in keyvals.chunks(2) {
        let key = pair[0].as_str().ok_or_else(|| {
            Error::new(
                ErrorKind::InvalidOperation,
                format!("key not a string: {}", pair[0].kind()),
            )
        })?;
        out.push((key.to_string(), pair[1].clone()));
    }

    Ok(Value::from_iter(out))
}

/// Returns the arguments unchanged as a sequence.
pub fn list(elems: Rest<Value>) -> Value {
    Value::from(elems.0)
}
