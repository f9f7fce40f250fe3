//! Conversion of export documents into graph symbols.
//!
//! Graph consumers address symbols by slash-separated paths, so Ruby paths
//! are rewritten:
//!
//! | Ruby       | Graph               |
//! |------------|---------------------|
//! | `A::B`     | `A/B`               |
//! | `A#run`    | `A/$methods/run`    |
//! | `A.build`  | `A/$classmethods/build` |
//! | `A>x`      | `A@x`               |
//! | `a.rb`     | `a_rb`              |

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::json::{ExportDocument, ExportObject};
use crate::base::FileName;
use crate::hir::SCOPE_SEPARATOR;

/// Coarse, language-neutral symbol classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    Module,
    Type,
    Func,
    Const,
    Var,
}

impl SymbolKind {
    /// Map an exported `kind` string; unknown kinds have no graph kind.
    pub fn from_ruby_kind(kind: &str) -> Option<Self> {
        match kind {
            "namespace" | "module" => Some(SymbolKind::Module),
            "class" => Some(SymbolKind::Type),
            "method" => Some(SymbolKind::Func),
            "constant" => Some(SymbolKind::Const),
            "localvariable" | "instancevariable" | "classvariable" => Some(SymbolKind::Var),
            _ => None,
        }
    }
}

/// Ruby-specific data carried along with a symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SymbolData {
    pub ruby_kind: String,
    pub module: String,
    pub ruby_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

impl SymbolData {
    /// True for variables that live in a local scope.
    pub fn is_local_var(&self) -> bool {
        self.ruby_path
            .split(SCOPE_SEPARATOR)
            .skip(1)
            .any(|part| part.contains("_local_"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSymbol {
    pub path: String,
    pub tree_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<SymbolKind>,
    pub name: String,
    pub exported: bool,
    pub file: String,
    pub def_start: u32,
    pub def_end: u32,
    pub test: bool,
    pub data: SymbolData,
}

/// Rendered documentation attached to a symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphDoc {
    pub symbol_path: String,
    pub format: String,
    pub data: String,
    pub file: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphOutput {
    pub symbols: Vec<GraphSymbol>,
    pub docs: Vec<GraphDoc>,
}

/// Rewrite a Ruby object path into a graph symbol path.
pub fn symbol_path(ruby_path: &str) -> String {
    let path = ruby_path
        .replace(".rb", "_rb")
        .replace("::", "/")
        .replace('#', "/$methods/")
        .replace('.', "/$classmethods/")
        .replace(SCOPE_SEPARATOR, "@");
    path.trim_start_matches('/').to_string()
}

/// Display path with the scope-uniquifying components removed.
pub fn tree_path(ruby_path: &str) -> String {
    let path = ruby_path
        .replace(".rb", "_rb")
        .replace("::", "/")
        .replace(['#', '.'], "/")
        .replace(SCOPE_SEPARATOR, "/");
    path.split('/')
        .filter(|part| !part.is_empty() && !part.contains("_local_"))
        .collect::<Vec<_>>()
        .join("/")
}

impl From<&ExportObject> for GraphSymbol {
    fn from(object: &ExportObject) -> Self {
        GraphSymbol {
            path: symbol_path(&object.path),
            tree_path: tree_path(&object.path),
            kind: SymbolKind::from_ruby_kind(&object.kind),
            name: object.name.clone(),
            exported: object.exported,
            file: object.file.clone(),
            def_start: object.def_start.unwrap_or(0),
            def_end: object.def_end.unwrap_or(0),
            test: FileName::from(object.file.as_str()).is_test(),
            data: SymbolData {
                ruby_kind: object.kind.clone(),
                module: object.module.clone(),
                ruby_path: object.path.clone(),
                signature: object.signature.clone(),
            },
        }
    }
}

/// Convert a document, keeping the first symbol for each symbol path.
pub fn convert(document: &ExportDocument) -> GraphOutput {
    let mut output = GraphOutput::default();
    let mut seen: FxHashMap<String, usize> = FxHashMap::default();

    for object in &document.objects {
        let symbol = GraphSymbol::from(object);
        if let Some(&index) = seen.get(&symbol.path) {
            let previous = &output.symbols[index];
            info!(
                path = %symbol.path,
                first = %previous.file,
                duplicate = %symbol.file,
                "skipping already seen symbol"
            );
            continue;
        }
        seen.insert(symbol.path.clone(), output.symbols.len());

        if let Some(docstring) = &object.docstring {
            output.docs.push(GraphDoc {
                symbol_path: symbol.path.clone(),
                format: "text/html".to_string(),
                data: docstring.clone(),
                file: object.file.clone(),
            });
        }
        output.symbols.push(symbol);
    }
    output
}
