//! Local scope tests: naming, paths and resolution across a build.

use crate::helpers::host_helpers::*;
use crate::helpers::source_fixtures::*;
use rdex::hir::{LocalScopeId, Registry, ScopeParent};

fn scope_paths(registry: &Registry, namespace: &str) -> Vec<String> {
    let id = registry.lookup(namespace).unwrap();
    registry
        .get(id)
        .and_then(|object| object.local_scopes())
        .map(|manager| manager.scopes().to_vec())
        .unwrap_or_default()
        .into_iter()
        .map(|scope| registry.scope_path(scope).unwrap().to_string())
        .collect()
}

fn scope_named(registry: &Registry, namespace: &str, name: &str) -> LocalScopeId {
    let id = registry.lookup(namespace).unwrap();
    registry
        .get(id)
        .and_then(|object| object.local_scopes())
        .and_then(|manager| {
            manager
                .scopes()
                .iter()
                .copied()
                .find(|&scope| registry.scope(scope).is_some_and(|s| s.name == name))
        })
        .unwrap_or_else(|| panic!("Expected scope '{}' in '{}'", name, namespace))
}

#[test]
fn test_scope_paths_follow_the_build() {
    let registry = registry_from_source(WIDGET_LIBRARY);

    assert_eq!(scope_paths(&registry, "Widgets"), vec!["Widgets>_local_0"]);
    assert_eq!(
        scope_paths(&registry, "Widgets::Widget"),
        vec![
            "Widgets::Widget>_local_0",
            "Widgets::Widget>_local_0>build_local_0",
            "Widgets::Widget>_local_0>render_local_0",
            "Widgets::Widget>_local_0>reset!_local_0",
        ]
    );
}

#[test]
fn test_reopened_namespace_gets_a_fresh_body_scope() {
    let mut host = host_from_source(WIDGET_LIBRARY, "lib/widget.rb");
    host.set_file_content("lib/widget/size.rb", WIDGET_EXTENSION)
        .unwrap();

    let paths = scope_paths(host.registry(), "Widgets::Widget");
    assert!(paths.contains(&"Widgets::Widget>_local_1".to_string()));
    assert!(paths.contains(&"Widgets::Widget>_local_1>size_local_0".to_string()));
}

#[test]
fn test_resolution_walks_up_to_the_namespace() {
    let mut registry = registry_from_source(WIDGET_LIBRARY);
    let body = scope_named(&registry, "Widgets::Widget", "_local_0");
    let render = scope_named(&registry, "Widgets::Widget", "render_local_0");

    assert_eq!(registry.resolve_scope(render, "build_local_0"), Some(scope_named(&registry, "Widgets::Widget", "build_local_0")));
    assert_eq!(registry.resolve_scope(body, "render_local_0"), Some(render));
    assert_eq!(registry.resolve_scope(render, "_local_0"), None);

    let widget = registry.lookup("Widgets::Widget").unwrap();
    assert_eq!(registry.scope_parent_module(render), Some(widget));

    // New scopes keep counting where the build stopped.
    let again = registry
        .new_local_scope(widget, Some("render"), ScopeParent::Scope(body))
        .unwrap();
    assert_eq!(registry.scope(again).unwrap().name, "render_local_1");
}

#[test]
fn test_clear_drops_scopes() {
    let mut registry = registry_from_source(WIDGET_LIBRARY);
    assert!(registry.scope_count() > 0);
    registry.clear();
    assert_eq!(registry.scope_count(), 0);
    assert!(registry.is_empty());
    assert!(registry.at("Widgets").is_none());
}
