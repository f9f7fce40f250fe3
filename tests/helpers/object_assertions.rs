//! Assertions over registries and export documents.

use rdex::interchange::{ExportDocument, ExportObject};
use rdex::{CodeObject, ObjectKind, Registry};

/// Assert an object exists at `path` and return it.
pub fn get_object<'a>(registry: &'a Registry, path: &str) -> &'a CodeObject {
    registry
        .at(path)
        .unwrap_or_else(|| panic!("Expected object '{}' to exist", path))
}

pub fn assert_object_kind(registry: &Registry, path: &str, expected: ObjectKind) {
    let object = get_object(registry, path);
    assert_eq!(
        object.kind(),
        expected,
        "Expected '{}' to have kind {:?}, got {:?}",
        path,
        expected,
        object.kind()
    );
}

/// Paths of every registered object, in registration order.
pub fn registry_paths(registry: &Registry) -> Vec<String> {
    registry.all_objects().map(|o| o.path.to_string()).collect()
}

/// Exported objects, methods excluded.
pub fn non_method_objects(document: &ExportDocument) -> Vec<&ExportObject> {
    document
        .objects
        .iter()
        .filter(|o| o.kind != "method")
        .collect()
}

/// Find an exported object by path.
pub fn exported<'a>(document: &'a ExportDocument, path: &str) -> &'a ExportObject {
    document
        .objects
        .iter()
        .find(|o| o.path == path)
        .unwrap_or_else(|| panic!("Expected '{}' in the exported document", path))
}
