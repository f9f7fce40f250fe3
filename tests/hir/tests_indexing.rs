//! Indexing tests: source text in, code objects out.

use crate::helpers::host_helpers::*;
use crate::helpers::object_assertions::*;
use crate::helpers::source_fixtures::*;
use rdex::hir::{MethodScope, NamespaceFlavor, Registry, RegistryError, index_source};
use rdex::{FileName, ObjectKind};
use rstest::rstest;

// =============================================================================
// NAMESPACES
// =============================================================================

#[test]
fn test_widget_library_objects() {
    let registry = registry_from_source(WIDGET_LIBRARY);

    assert_eq!(
        registry_paths(&registry),
        vec![
            "Widgets",
            "Widgets::Widget",
            "Widgets::Widget::@@count",
            "Widgets::Widget.build",
            "Widgets::Widget::@@registry",
            "Widgets::Widget#render",
            "Widgets::Widget::@rendered",
            "Widgets::Widget::@last",
            "Widgets::Widget.reset!",
        ]
    );
}

#[test]
fn test_namespace_details() {
    let registry = registry_from_source(WIDGET_LIBRARY);

    let widgets = get_object(&registry, "Widgets");
    assert_eq!(widgets.flavor(), Some(NamespaceFlavor::Module));
    assert_eq!(widgets.docstring, "Widgets and their parts.");

    let widget = get_object(&registry, "Widgets::Widget");
    assert_eq!(widget.flavor(), Some(NamespaceFlavor::Class));
    assert_eq!(widget.superclass(), Some("Base"));
    assert_eq!(widget.docstring, "Something you can render.");
    assert_eq!(
        registry.parent_module(registry.lookup("Widgets::Widget").unwrap()),
        registry.lookup("Widgets")
    );
}

#[test]
fn test_reopening_across_files_merges() {
    let mut host = host_from_source(WIDGET_LIBRARY, "lib/widget.rb");
    let errors = host
        .set_file_content("lib/widget/size.rb", WIDGET_EXTENSION)
        .unwrap();
    assert!(errors.is_empty());

    let registry = host.registry();
    let namespaces: Vec<_> = registry
        .all_objects()
        .filter(|o| o.kind() == ObjectKind::Namespace)
        .map(|o| o.path.to_string())
        .collect();
    assert_eq!(namespaces, vec!["Widgets", "Widgets::Widget"]);

    let size = get_object(registry, "Widgets::Widget#size");
    assert_eq!(size.file().unwrap().as_str(), "lib/widget/size.rb");
    // The namespace follows its latest definition.
    let widget = get_object(registry, "Widgets::Widget");
    assert_eq!(widget.file().unwrap().as_str(), "lib/widget/size.rb");
    // Reopening without a docstring keeps the earlier one.
    assert_eq!(widget.docstring, "Something you can render.");
    assert_eq!(widget.superclass(), Some("Base"));
}

// =============================================================================
// METHODS
// =============================================================================

#[rstest]
#[case("Widgets::Widget.build", MethodScope::Class, "def self.build(name, size = 1)")]
#[case("Widgets::Widget#render", MethodScope::Instance, "def render(io)")]
#[case("Widgets::Widget.reset!", MethodScope::Class, "def reset!")]
fn test_method_details(#[case] path: &str, #[case] scope: MethodScope, #[case] signature: &str) {
    let registry = registry_from_source(WIDGET_LIBRARY);
    assert_object_kind(&registry, path, ObjectKind::Method);

    let method = get_object(&registry, path);
    assert_eq!(method.method_scope(), Some(scope));
    assert_eq!(method.signature(), Some(signature));
}

// =============================================================================
// VARIABLES
// =============================================================================

#[rstest]
#[case("Widgets::Widget::@@count", ObjectKind::ClassVariable, "0")]
#[case("Widgets::Widget::@@registry", ObjectKind::ClassVariable, "{}")]
#[case("Widgets::Widget::@rendered", ObjectKind::InstanceVariable, "true")]
#[case("Widgets::Widget::@last", ObjectKind::InstanceVariable, "item")]
fn test_variable_details(#[case] path: &str, #[case] kind: ObjectKind, #[case] value: &str) {
    let registry = registry_from_source(WIDGET_LIBRARY);
    assert_object_kind(&registry, path, kind);
    assert_eq!(get_object(&registry, path).value(), Some(value));
    assert!(!get_object(&registry, path).is_exported());
}

#[test]
fn test_class_method_assignment_becomes_class_variable() {
    let registry = registry_from_source(CLASS_METHOD_ASSIGNMENT);
    assert_eq!(registry_paths(&registry), vec!["A", "A::B", "A::B.foo", "A::B::@@x"]);
    assert_eq!(get_object(&registry, "A::B::@@x").name, "@@x");
}

#[test]
fn test_body_assignment_is_not_registered() {
    let registry = registry_from_source(BODY_ASSIGNMENT);
    assert_eq!(registry_paths(&registry), vec!["A", "A::B"]);
}

// =============================================================================
// ERRORS
// =============================================================================

#[test]
fn test_kind_collision_aborts_indexing() {
    let mut registry = Registry::new();
    // A top-level method has a bare path, the same as a top-level namespace.
    index_source(&mut registry, FileName::from("a.rb"), "def Widget\nend\n").unwrap();

    let err = index_source(&mut registry, FileName::from("b.rb"), "module Widget\nend\n")
        .unwrap_err();
    assert_eq!(
        err,
        RegistryError::KindMismatch {
            path: "Widget".to_string(),
            existing: ObjectKind::Method,
            requested: ObjectKind::Namespace,
        }
    );
}

#[test]
fn test_nested_methods_do_not_collide() {
    let mut registry = Registry::new();
    index_source(&mut registry, FileName::from("a.rb"), "module A\n  def B\n  end\nend\n").unwrap();
    index_source(&mut registry, FileName::from("b.rb"), "module A\n  module B\n  end\nend\n").unwrap();

    assert_object_kind(&registry, "A#B", ObjectKind::Method);
    assert_object_kind(&registry, "A::B", ObjectKind::Namespace);
}
