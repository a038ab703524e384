//! Rendering straight from a directory on disk.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use minijinja::context;
use tempfile::TempDir;
use tmplrender::{DirSource, RenderError, Renderer, RendererConfig, TemplateSource};

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn fixture() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "views/shared/base.txt", "[{% block body %}{% endblock %}]\n");
    write(
        dir.path(),
        "views/users/show.txt",
        "{% extends 'shared/base.txt' %}{% block body %}{{ user }}{% endblock %}",
    );
    write(dir.path(), "renderer.yaml", "base_dir: views\ninclude_patterns:\n  - shared/*.txt\n");
    dir
}

#[test]
fn lists_files_with_slash_paths() {
    let dir = fixture();
    let source = DirSource::new(dir.path()).unwrap();

    let mut paths = source.paths().unwrap();
    paths.sort();
    assert_eq!(
        paths,
        vec!["renderer.yaml", "views/shared/base.txt", "views/users/show.txt"]
    );
    assert_eq!(
        source.glob("views/*/*.txt").unwrap(),
        vec!["views/shared/base.txt", "views/users/show.txt"]
    );
}

#[test]
fn renders_from_disk_with_yaml_config() {
    let dir = fixture();
    let config = RendererConfig::from_file(dir.path().join("renderer.yaml")).unwrap();
    let renderer = Renderer::from_config(Arc::new(DirSource::new(dir.path()).unwrap()), config);

    let out = renderer
        .render_to_string("users/show.txt", context! { user => "ada" })
        .unwrap();
    assert_eq!(out, "[ada]\n");
}

#[test]
fn cached_template_survives_file_removal() {
    let dir = fixture();
    let renderer = Renderer::new(Arc::new(DirSource::new(dir.path()).unwrap()))
        .with_base_dir("views")
        .with_include_patterns(["shared/*.txt"]);

    renderer
        .render_to_string("users/show.txt", context! { user => "a" })
        .unwrap();
    fs::remove_file(dir.path().join("views/users/show.txt")).unwrap();

    let out = renderer
        .render_to_string("users/show.txt", context! { user => "b" })
        .unwrap();
    assert_eq!(out, "[b]\n");
}

#[test]
fn missing_file_on_disk_is_no_match() {
    let dir = fixture();
    let renderer = Renderer::new(Arc::new(DirSource::new(dir.path()).unwrap()))
        .with_base_dir("views");

    let err = renderer
        .render_to_string("users/edit.txt", context! {})
        .unwrap_err();
    assert!(matches!(err, RenderError::NoMatch(_)));
}
