//! Serializer tests over real indexing output.

use crate::helpers::host_helpers::*;
use crate::helpers::object_assertions::*;
use crate::helpers::source_fixtures::*;
use rdex::interchange::{InterchangeError, JsonSerializer};
use rdex::project::IndexHost;
use rdex::Registry;

// =============================================================================
// END-TO-END SCENARIOS
// =============================================================================

#[test]
fn test_class_method_assignment_document() {
    let document = document_from_source(CLASS_METHOD_ASSIGNMENT);
    let objects = non_method_objects(&document);

    let summary: Vec<_> = objects
        .iter()
        .map(|o| (o.path.as_str(), o.kind.as_str(), o.exported))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("A", "namespace", true),
            ("A::B", "namespace", true),
            ("A::B::@@x", "classvariable", false),
        ]
    );

    let var = exported(&document, "A::B::@@x");
    assert_eq!(var.name, "@@x");
    assert_eq!(var.module, "A::B");
    assert_eq!(var.file, "test.rb");
}

#[test]
fn test_body_assignment_document() {
    let document = document_from_source(BODY_ASSIGNMENT);
    let paths: Vec<_> = non_method_objects(&document)
        .iter()
        .map(|o| o.path.as_str())
        .collect();
    assert_eq!(paths, vec!["A", "A::B"]);
}

#[test]
fn test_empty_registry_document() {
    assert_eq!(emit(&Registry::new(), &["test.rb"]), "{\"objects\":[]}\n");
}

// =============================================================================
// PROJECTION
// =============================================================================

#[test]
fn test_widget_document_fields() {
    let document = document_from_source(WIDGET_LIBRARY);

    let widgets = exported(&document, "Widgets");
    assert_eq!(widgets.module, "");
    assert_eq!(widgets.def_start, Some(27));
    assert_eq!(widgets.docstring.as_deref(), Some("<p>Widgets and their parts.</p>"));

    let build = exported(&document, "Widgets::Widget.build");
    assert_eq!(build.kind, "method");
    assert_eq!(build.module, "Widgets::Widget");
    assert_eq!(build.signature.as_deref(), Some("self.build(name, size = 1)"));
    assert!(build.exported);

    let render = exported(&document, "Widgets::Widget#render");
    assert_eq!(
        render.docstring.as_deref(),
        Some("<p>Render the widget as <tt>html</tt>.</p>")
    );

    let count = exported(&document, "Widgets::Widget::@@count");
    assert_eq!(count.signature, None);
    assert_eq!(count.docstring, None);
}

#[test]
fn test_def_range_is_half_open() {
    let source = "module A\nend\n";
    let document = document_from_source(source);
    let a = exported(&document, "A");
    let (start, end) = (a.def_start.unwrap() as usize, a.def_end.unwrap() as usize);
    assert_eq!(&source[start..end], "module A\nend");
}

#[test]
fn test_optional_fields_are_omitted() {
    let registry = registry_from_source("module A\nend\n");
    let output = emit(&registry, &["test.rb"]);
    assert!(!output.contains("docstring"));
    assert!(!output.contains("signature"));
    assert!(output.contains("\"defStart\":0"));
    assert!(output.contains("\"defEnd\":12"));
}

// =============================================================================
// FILE SET
// =============================================================================

#[test]
fn test_only_configured_files_are_emitted() {
    let mut host = IndexHost::new();
    host.set_file_content("lib/widget.rb", WIDGET_LIBRARY).unwrap();
    host.set_file_content("lib/widget/size.rb", WIDGET_EXTENSION).unwrap();

    let document = document_from_output(&emit(host.registry(), &["lib/widget.rb"]));
    assert!(document.objects.iter().all(|o| o.file == "lib/widget.rb"));
    // Both namespaces were last defined in the other file.
    assert!(document.objects.iter().all(|o| o.kind != "namespace"));
    assert!(document.objects.iter().any(|o| o.path == "Widgets::Widget#render"));
    assert!(document.objects.iter().all(|o| o.path != "Widgets::Widget#size"));
}

#[test]
fn test_directory_file_set() {
    let dir = tempfile::tempdir().unwrap();
    let lib = dir.path().join("lib");
    std::fs::create_dir(&lib).unwrap();
    std::fs::write(lib.join("widget.rb"), WIDGET_LIBRARY).unwrap();
    std::fs::write(dir.path().join("extra.rb"), "module Extra\nend\n").unwrap();

    let mut host = IndexHost::new();
    host.load_paths([dir.path()]).unwrap();

    let serializer = JsonSerializer::new([&lib]).unwrap();
    let document = serializer.document(host.registry());
    assert!(!document.objects.is_empty());
    assert!(document.objects.iter().all(|o| o.path != "Extra"));
}

#[test]
fn test_empty_file_set_fails_fast() {
    let err = JsonSerializer::new(Vec::<String>::new()).unwrap_err();
    assert!(matches!(err, InterchangeError::EmptyFileSet));
}
