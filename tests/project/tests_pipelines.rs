//! Condense and bundle pipelines over real directories.

use std::fs;
use std::path::Path;

use crate::helpers::host_helpers::*;
use crate::helpers::object_assertions::*;
use crate::helpers::source_fixtures::*;
use rdex::project::{
    Bundle, Condense, DependencyResolver, GemOutcome, GemSpec, IndexConfig, MemoryStore,
    RegistryStore,
};

struct Resolver(Vec<GemSpec>);

impl DependencyResolver for Resolver {
    fn resolve(&self, name: &str) -> Option<GemSpec> {
        self.0.iter().find(|spec| spec.name == name).cloned()
    }

    fn all(&self) -> Vec<GemSpec> {
        self.0.clone()
    }
}

fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
fn test_condense_project_directory() {
    let dir = tempfile::tempdir().unwrap();
    let lib = dir.path().join("lib");
    write(&lib.join("widget.rb"), WIDGET_LIBRARY);
    write(&lib.join("notes.txt"), "not ruby");

    let config = IndexConfig::from_json_str(&format!(
        r#"{{"files": [{:?}], "omit_stdlib": true}}"#,
        lib.to_string_lossy()
    ))
    .unwrap();

    let mut out = Vec::new();
    let report = Condense::run(&config, &MemoryStore::new(), &mut out).unwrap();
    assert_eq!(report.indexed_files, 1);
    assert_eq!(report.syntax_errors, 0);

    let document = document_from_output(&String::from_utf8(out).unwrap());
    assert_eq!(document.objects.len(), 9);
    let widget = exported(&document, "Widgets::Widget");
    assert_eq!(widget.file, lib.join("widget.rb").to_string_lossy());
}

#[test]
fn test_bundle_then_condense() {
    let dir = tempfile::tempdir().unwrap();
    let gem_root = dir.path().join("gems").join("base-1.0.0");
    write(
        &gem_root.join("lib").join("base.rb"),
        "# The base of everything.\nclass Base\n  def initialize\n    @ready = true\n  end\nend\n",
    );
    let app = dir.path().join("app");
    write(&app.join("widget.rb"), WIDGET_LIBRARY);

    let resolver = Resolver(vec![GemSpec::new("base", "1.0.0", &gem_root)]);
    let mut store = MemoryStore::new();

    let outcomes = Bundle::new().build(&[], &resolver, &mut store).unwrap();
    assert_eq!(
        outcomes,
        vec![GemOutcome::Built {
            key: "base-1.0.0".to_string(),
            objects: 3
        }]
    );
    assert_eq!(
        Bundle::new().list(&[], &resolver),
        vec![("base".to_string(), "base-1.0.0".to_string())]
    );

    let mut config = IndexConfig::new([&app]);
    config.omit_stdlib = true;
    config.load_index_files = Bundle::new()
        .list(&[], &resolver)
        .into_iter()
        .map(|(_, key)| key)
        .collect();

    let mut out = Vec::new();
    let report = Condense::run(&config, &store, &mut out).unwrap();
    assert_eq!(report.merged_indexes, vec!["base-1.0.0"]);

    // Dependency objects resolve in the registry but are not emitted.
    let document = document_from_output(&String::from_utf8(out).unwrap());
    assert!(document.objects.iter().all(|o| o.path != "Base"));
    assert!(document.objects.iter().any(|o| o.path == "Widgets::Widget"));
}

#[test]
fn test_saved_index_feeds_cache() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("a.rb");
    write(&file, "module A\n  def run\n  end\nend\n");

    let mut store = MemoryStore::new();
    let cached = registry_from_source("module Cached\nend\n");
    store.save(".rdex", &cached).unwrap();

    let mut config = IndexConfig::new([&file]);
    config.use_cache = true;
    config.omit_stdlib = true;

    let mut out = Vec::new();
    let report = Condense::run(&config, &store, &mut out).unwrap();
    assert!(report.loaded_cache);

    let document = document_from_output(&String::from_utf8(out).unwrap());
    let paths: Vec<_> = document.objects.iter().map(|o| o.path.as_str()).collect();
    assert_eq!(paths, vec!["A", "A#run"]);
    assert!(get_object(&cached, "Cached").source.is_some());
}
