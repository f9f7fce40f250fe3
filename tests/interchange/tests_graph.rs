//! Graph conversion of emitted documents.

use crate::helpers::host_helpers::*;
use crate::helpers::source_fixtures::*;
use rdex::interchange::graph::{convert, symbol_path};
use rdex::interchange::{ExportDocument, SymbolKind};
use rdex::project::IndexHost;

#[test]
fn test_widget_symbols() {
    let output = convert(&document_from_source(WIDGET_LIBRARY));

    let symbols: Vec<_> = output
        .symbols
        .iter()
        .map(|s| (s.path.as_str(), s.kind))
        .collect();
    assert_eq!(
        symbols,
        vec![
            ("Widgets", Some(SymbolKind::Module)),
            ("Widgets/Widget", Some(SymbolKind::Module)),
            ("Widgets/Widget/@@count", Some(SymbolKind::Var)),
            ("Widgets/Widget/$classmethods/build", Some(SymbolKind::Func)),
            ("Widgets/Widget/@@registry", Some(SymbolKind::Var)),
            ("Widgets/Widget/$methods/render", Some(SymbolKind::Func)),
            ("Widgets/Widget/@rendered", Some(SymbolKind::Var)),
            ("Widgets/Widget/@last", Some(SymbolKind::Var)),
            ("Widgets/Widget/$classmethods/reset!", Some(SymbolKind::Func)),
        ]
    );
    assert!(output.symbols.iter().all(|s| !s.test));
    assert!(output.symbols.iter().all(|s| !s.data.is_local_var()));
}

#[test]
fn test_docs_follow_docstrings() {
    let output = convert(&document_from_source(WIDGET_LIBRARY));
    let documented: Vec<_> = output.docs.iter().map(|d| d.symbol_path.as_str()).collect();
    assert_eq!(
        documented,
        vec![
            "Widgets",
            "Widgets/Widget",
            "Widgets/Widget/$classmethods/build",
            "Widgets/Widget/$methods/render",
        ]
    );
}

#[test]
fn test_symbols_from_spec_files_are_tests() {
    let mut host = IndexHost::new();
    host.set_file_content("spec/widget_spec.rb", "module WidgetSpec\nend\n")
        .unwrap();
    let output = convert(&document_from_output(&emit(
        host.registry(),
        &["spec/widget_spec.rb"],
    )));
    assert_eq!(output.symbols.len(), 1);
    assert!(output.symbols[0].test);
}

#[test]
fn test_duplicate_paths_keep_the_first() {
    let mut document = document_from_source("module A\nend\n");
    let mut copy = document.objects[0].clone();
    copy.file = "other.rb".to_string();
    document.objects.push(copy);

    let output = convert(&ExportDocument {
        objects: document.objects,
    });
    assert_eq!(output.symbols.len(), 1);
    assert_eq!(output.symbols[0].file, "test.rb");
}

#[test]
fn test_symbol_path_of_scoped_variable() {
    assert_eq!(
        symbol_path("A::B>_local_0>run_local_0>x"),
        "A/B@_local_0@run_local_0@x"
    );
}
