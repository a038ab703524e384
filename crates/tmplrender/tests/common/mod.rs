//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tmplrender::{MemorySource, TemplateSource};

/// Wraps a source and counts every call that reaches it.
#[derive(Debug, Default)]
pub struct CountingSource {
    inner: MemorySource,
    reads: AtomicUsize,
    listings: AtomicUsize,
}

impl CountingSource {
    pub fn new(inner: MemorySource) -> Arc<Self> {
        Arc::new(Self {
            inner,
            reads: AtomicUsize::new(0),
            listings: AtomicUsize::new(0),
        })
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn listings(&self) -> usize {
        self.listings.load(Ordering::SeqCst)
    }
}

impl TemplateSource for CountingSource {
    fn paths(&self) -> io::Result<Vec<String>> {
        self.listings.fetch_add(1, Ordering::SeqCst);
        self.inner.paths()
    }

    fn read(&self, path: &str) -> io::Result<String> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.read(path)
    }
}

/// A small site: a layout, a partial and two pages.
pub fn site() -> MemorySource {
    MemorySource::new()
        .with_file(
            "site/layouts/base.html",
            "<title>{% block title %}Site{% endblock %}</title>\
             <main>{% block content %}{% endblock %}</main>",
        )
        .with_file(
            "site/partials/item.html",
            "{% macro item(label, value) %}<li>{{ label }}={{ value }}</li>{% endmacro %}",
        )
        .with_file(
            "site/pages/list.html",
            "{% extends 'layouts/base.html' %}\
             {% block title %}{{ heading }}{% endblock %}\
             {% block content %}{% from 'partials/item.html' import item %}<ul>{% for e in entries %}{{ item(e.label, e.value) }}{% endfor %}</ul>{% endblock %}",
        )
        .with_file(
            "site/pages/plain.html",
            "{% extends 'layouts/base.html' %}{% block content %}{{ body }}{% endblock %}",
        )
}
