//! Module and class handler.

use tracing::debug;

use super::ParseContext;
use super::processor::{Processor, source_ref};
use crate::hir::{NamespaceFlavor, NewObject, ObjectDetails, ObjectId, RegistryError, ScopeParent};
use crate::parser::{AstNode, NamespaceDef, SyntaxNode};

impl Processor<'_> {
    /// Register (or reopen) a namespace and process its body inside it.
    ///
    /// `module A::B` registers `A` as a plain module when it is missing and
    /// nests `B` under it.
    pub(super) fn handle_namespace(
        &mut self,
        node: &SyntaxNode,
        flavor: NamespaceFlavor,
        ctx: &ParseContext,
    ) -> Result<(), RegistryError> {
        let Some(def) = NamespaceDef::cast(node.clone()) else {
            return Ok(());
        };
        let Some(name) = def.name() else {
            debug!(file = %ctx.file, "namespace without a name");
            return Ok(());
        };
        let segments = name.segments();
        let Some((last, intermediates)) = segments.split_last() else {
            return Ok(());
        };

        let mut parent = if name.is_absolute() {
            ObjectId::ROOT
        } else {
            ctx.namespace
        };
        for segment in intermediates {
            parent = self.registry.register(
                NewObject::new(
                    parent,
                    segment.as_str(),
                    ObjectDetails::namespace(NamespaceFlavor::Module),
                ),
                |_| {},
            )?;
        }

        let source = source_ref(node, ctx);
        let docstring = def.doc_comment().unwrap_or_default();
        let superclass = def.superclass();
        let namespace = self.registry.register(
            NewObject::new(parent, last.as_str(), ObjectDetails::namespace(flavor)),
            |object| {
                object.source = Some(source);
                if !docstring.is_empty() {
                    object.docstring = docstring;
                }
                if let Some(superclass) = superclass {
                    object.set_superclass(superclass);
                }
            },
        )?;

        let scope = self
            .registry
            .new_local_scope(namespace, None, ScopeParent::Namespace(namespace))?;
        let inner = ctx.enter_namespace(namespace, scope);
        if let Some(body) = def.body() {
            self.process_statements(body.statements(), &inner)?;
        }
        Ok(())
    }
}
