//! Helpers for building registries and documents from Ruby source.

use rdex::interchange::{ExportDocument, JsonSerializer};
use rdex::project::IndexHost;
use rdex::Registry;

/// Index a single file and assert it parsed cleanly.
pub fn host_from_source(source: &str, filename: &str) -> IndexHost {
    let mut host = IndexHost::new();
    let errors = host
        .set_file_content(filename, source)
        .expect("indexing should not violate registry invariants");
    assert!(
        errors.is_empty(),
        "Parse errors in '{}': {:?}",
        filename,
        errors
    );
    host
}

/// Index `source` as `test.rb`.
pub fn registry_from_source(source: &str) -> Registry {
    host_from_source(source, "test.rb").into_registry()
}

/// Serialize a registry for the given files, framing included.
pub fn emit(registry: &Registry, files: &[&str]) -> String {
    let serializer = JsonSerializer::new(files).expect("file set should not be empty");
    let mut out = Vec::new();
    serializer.before_serialize(&mut out).unwrap();
    serializer.serialize(registry, &mut out).unwrap();
    serializer.after_serialize(&mut out).unwrap();
    String::from_utf8(out).unwrap()
}

/// Parse emitted output back into a document.
pub fn document_from_output(output: &str) -> ExportDocument {
    assert!(output.ends_with('\n'), "output should end with a newline");
    serde_json::from_str(output.trim_end()).expect("output should be valid JSON")
}

/// Index `source` as `test.rb` and export it.
pub fn document_from_source(source: &str) -> ExportDocument {
    let registry = registry_from_source(source);
    document_from_output(&emit(&registry, &["test.rb"]))
}
