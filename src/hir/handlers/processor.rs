//! The dispatcher loop.

use std::sync::Arc;

use tracing::trace;

use super::{Handler, ParseContext, handlers_for};
use crate::base::FileName;
use crate::hir::{NamespaceFlavor, Registry, RegistryError, SourceRef};
use crate::parser::{SourceFile, SyntaxKind, SyntaxNode};

/// Walks syntax nodes and runs handlers against a registry.
pub struct Processor<'r> {
    pub(super) registry: &'r mut Registry,
}

impl<'r> Processor<'r> {
    pub fn new(registry: &'r mut Registry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Registry {
        self.registry
    }

    /// Process the top level of a parsed file.
    pub fn process_file(&mut self, file: FileName, source: &SourceFile) -> Result<(), RegistryError> {
        let ctx = ParseContext::root(self.registry, file)?;
        trace!(file = %ctx.file, "processing file");
        self.process_statements(source.statements(), &ctx)
    }

    /// Process a sequence of statement nodes under one context.
    pub fn process_statements(
        &mut self,
        statements: impl Iterator<Item = SyntaxNode>,
        ctx: &ParseContext,
    ) -> Result<(), RegistryError> {
        for node in statements {
            self.process(&node, ctx)?;
        }
        Ok(())
    }

    /// Dispatch one node: run the first entry whose guard holds.
    pub fn process(&mut self, node: &SyntaxNode, ctx: &ParseContext) -> Result<(), RegistryError> {
        let kind = node.kind();
        let entries = handlers_for(kind);

        if entries.is_empty() {
            if walks_through(kind) {
                return self.process_statements(node.children(), ctx);
            }
            trace!(?kind, "no handler");
            return Ok(());
        }

        let matched = entries.iter().find(|entry| {
            entry
                .guard
                .is_none_or(|guard| guard.holds(node, ctx, self.registry()))
        });
        match matched {
            Some(entry) => {
                trace!(?kind, handler = ?entry.handler, "dispatching");
                self.invoke(entry.handler, node, ctx)?;
            }
            None => trace!(?kind, "no guard matched"),
        }

        // The right-hand side may hold blocks (`x = items.map do ... end`).
        if kind == SyntaxKind::ASSIGN {
            self.process_statements(node.children(), ctx)?;
        }
        Ok(())
    }

    fn invoke(
        &mut self,
        handler: Handler,
        node: &SyntaxNode,
        ctx: &ParseContext,
    ) -> Result<(), RegistryError> {
        match handler {
            Handler::Module => self.handle_namespace(node, NamespaceFlavor::Module, ctx),
            Handler::Class => self.handle_namespace(node, NamespaceFlavor::Class, ctx),
            Handler::Method => self.handle_method(node, ctx),
            Handler::InstanceVariable => self.handle_instance_variable(node, ctx),
            Handler::ClassVariable => self.handle_class_variable(node, ctx),
        }
    }
}

/// Compound nodes whose children are processed under the same context.
fn walks_through(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::STATEMENT | SyntaxKind::EXPR | SyntaxKind::BLOCK | SyntaxKind::BODY
    )
}

/// Source reference for the node a handler registered an object from.
pub(super) fn source_ref(node: &SyntaxNode, ctx: &ParseContext) -> SourceRef {
    SourceRef {
        file: ctx.file.clone(),
        range: node.text_range(),
        text: Arc::from(node.text().to_string()),
    }
}
