use super::*;
use crate::parser::parse;

fn first<T: AstNode>(source: &str) -> T {
    let parsed = parse(source);
    parsed
        .syntax()
        .descendants()
        .find_map(T::cast)
        .unwrap_or_else(|| panic!("no node in {source:?}"))
}

#[test]
fn test_ast_module() {
    let parsed = parse("module Test\nend\n");
    assert!(parsed.ok(), "errors: {:?}", parsed.errors);
    let root = SourceFile::cast(parsed.syntax()).unwrap();

    let statements: Vec<_> = root.statements().collect();
    assert_eq!(statements.len(), 1);

    let module = ModuleDef::cast(statements[0].clone()).unwrap();
    assert_eq!(module.name().unwrap().segments(), vec!["Test"]);
    assert!(module.body().is_some());
}

#[test]
fn test_ast_qualified_module_name() {
    let module: ModuleDef = first("module ::A::B; end");
    let name = module.name().unwrap();
    assert_eq!(name.segments(), vec!["A", "B"]);
    assert!(name.is_absolute());
}

#[test]
fn test_ast_class_superclass() {
    let class: ClassDef = first("class Foo < Bar::Base\nend");
    assert_eq!(class.name().unwrap().segments(), vec!["Foo"]);
    assert_eq!(class.superclass(), Some("Bar::Base".to_string()));

    let plain: ClassDef = first("class Foo\nend");
    assert_eq!(plain.superclass(), None);
}

#[test]
fn test_ast_namespace_def_enum() {
    let parsed = parse("module A\n  class B\n  end\nend");
    let defs: Vec<_> = parsed
        .syntax()
        .descendants()
        .filter_map(NamespaceDef::cast)
        .collect();
    assert_eq!(defs.len(), 2);
    assert!(matches!(defs[0], NamespaceDef::Module(_)));
    assert!(matches!(defs[1], NamespaceDef::Class(_)));
    assert_eq!(defs[1].name().unwrap().segments(), vec!["B"]);
}

#[test]
fn test_ast_method_signature() {
    let method: MethodDef = first("def foo(a, b = 1)\n  a + b\nend");
    assert_eq!(method.name(), Some("foo".to_string()));
    assert_eq!(method.signature(), "def foo(a, b = 1)");
    assert_eq!(method.params().unwrap().inner_text(), "a, b = 1");
    assert!(!method.is_singleton());
}

#[test]
fn test_ast_method_without_params() {
    let method: MethodDef = first("def run\n  go\nend");
    assert_eq!(method.signature(), "def run");
    assert!(method.params().is_none());
}

#[test]
fn test_ast_singleton_method() {
    let method: MethodDef = first("def self.build(x)\nend");
    assert!(method.is_singleton());
    assert_eq!(method.name(), Some("build".to_string()));
    assert_eq!(method.signature(), "def self.build(x)");
}

#[test]
fn test_ast_method_in_singleton_class() {
    let method: MethodDef = first("class << self\n  def helper\n  end\nend");
    assert!(method.is_singleton());
}

#[test]
fn test_ast_method_nested_in_singleton_class() {
    let modified: MethodDef = first("class << self\n  private def helper\n  end\nend");
    assert!(modified.is_singleton());

    let conditional: MethodDef = first("class << self\n  if debug\n    def trace\n    end\n  end\nend");
    assert!(conditional.is_singleton());

    let plain: MethodDef = first("if debug\n  def trace\n  end\nend");
    assert!(!plain.is_singleton());

    let reset: MethodDef = first("class << self\n  class Inner\n    def run\n    end\n  end\nend");
    assert!(!reset.is_singleton());
}

#[test]
fn test_ast_setter_and_operator_names() {
    let setter: MethodDef = first("def name=(value)\nend");
    assert_eq!(setter.name(), Some("name=".to_string()));

    let op: MethodDef = first("def <=>(other)\nend");
    assert_eq!(op.name(), Some("<=>".to_string()));
}

#[test]
fn test_ast_assign() {
    let assign: Assign = first("@inmethod = \"hi\"");
    assert_eq!(assign.target_kind(), Some(SyntaxKind::IVAR));
    assert_eq!(assign.target().unwrap().name(), Some("@inmethod".to_string()));
    assert_eq!(assign.value().unwrap().text(), "\"hi\"");
    assert_eq!(assign.source_text(), "@inmethod = \"hi\"");
}

#[test]
fn test_ast_class_variable_assign() {
    let assign: Assign = first("@@count = 0 # trailing");
    assert_eq!(assign.target_kind(), Some(SyntaxKind::CVAR));
    assert_eq!(assign.value().unwrap().text(), "0");
}

#[test]
fn test_ast_doc_comment() {
    let source = "# First line\n# second line\ndef foo\nend";
    let method: MethodDef = first(source);
    assert_eq!(
        method.doc_comment(),
        Some("First line\nsecond line".to_string())
    );
}

#[test]
fn test_ast_doc_comment_stops_at_blank_line() {
    let source = "# Unrelated\n\n# Docs\nmodule A\nend";
    let module: ModuleDef = first(source);
    assert_eq!(module.doc_comment(), Some("Docs".to_string()));
}

#[test]
fn test_ast_doc_comment_ignores_trailing_comment() {
    let source = "module A\n  x = 1 # not docs\n  def foo\n  end\nend";
    let method: MethodDef = first(source);
    assert_eq!(method.doc_comment(), None);
}

#[test]
fn test_ast_doc_comment_indented() {
    let source = "module A\n  # Indented docs\n  def foo\n  end\nend";
    let method: MethodDef = first(source);
    assert_eq!(method.doc_comment(), Some("Indented docs".to_string()));
}
