//! Method handler.

use tracing::debug;

use super::processor::{Processor, source_ref};
use super::{ParseContext, SelfBinding};
use crate::hir::{MethodScope, NewObject, ObjectDetails, RegistryError, ScopeParent};
use crate::parser::{AstNode, MethodDef, SyntaxNode};

impl Processor<'_> {
    /// Register a method under the current namespace and process its body
    /// with the method as owner.
    pub(super) fn handle_method(
        &mut self,
        node: &SyntaxNode,
        ctx: &ParseContext,
    ) -> Result<(), RegistryError> {
        let Some(def) = MethodDef::cast(node.clone()) else {
            return Ok(());
        };
        let Some(name) = def.name() else {
            debug!(file = %ctx.file, "method without a name");
            return Ok(());
        };

        let (scope, self_binding) = if def.is_singleton() {
            (MethodScope::Class, SelfBinding::Class)
        } else {
            (MethodScope::Instance, SelfBinding::Instance)
        };

        let source = source_ref(node, ctx);
        let docstring = def.doc_comment().unwrap_or_default();
        let signature = def.signature();
        let method = self.registry.register(
            NewObject::new(ctx.namespace, name.as_str(), ObjectDetails::method(scope)),
            |object| {
                object.source = Some(source);
                if !docstring.is_empty() {
                    object.docstring = docstring;
                }
                object.set_signature(signature);
            },
        )?;

        let local = self.registry.new_local_scope(
            ctx.namespace,
            Some(name.as_str()),
            ScopeParent::Scope(ctx.scope),
        )?;
        let inner = ctx.enter_method(method, local, self_binding);
        if let Some(body) = def.body() {
            self.process_statements(body.statements(), &inner)?;
        }
        Ok(())
    }
}
