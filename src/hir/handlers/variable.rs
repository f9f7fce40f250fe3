//! Instance- and class-variable handlers.

use std::sync::Arc;

use tracing::debug;

use super::processor::{Processor, source_ref};
use super::{ParseContext, SelfBinding};
use crate::hir::{CodeObject, NewObject, ObjectDetails, RegistryError};
use crate::parser::{Assign, AstNode, SyntaxNode};

impl Processor<'_> {
    /// `@x = value`
    ///
    /// In an instance method this is an instance variable. In a singleton
    /// method `self` is the namespace, so it is recorded as the class
    /// variable `@@x`. Directly in a namespace body it is not recorded.
    pub(super) fn handle_instance_variable(
        &mut self,
        node: &SyntaxNode,
        ctx: &ParseContext,
    ) -> Result<(), RegistryError> {
        let Some((assign, name)) = assignment(node) else {
            return Ok(());
        };

        match ctx.self_binding {
            SelfBinding::Instance => self.register_variable(
                node,
                &assign,
                name,
                |value| ObjectDetails::InstanceVariable { value },
                ctx,
            ),
            SelfBinding::Class => {
                let in_method = self
                    .registry
                    .get(ctx.owner)
                    .is_some_and(CodeObject::is_method);
                if !in_method {
                    debug!(name = %name, file = %ctx.file, "instance variable in namespace body not recorded");
                    return Ok(());
                }
                let name = format!("@@{}", name.trim_start_matches('@'));
                self.register_variable(
                    node,
                    &assign,
                    name,
                    |value| ObjectDetails::ClassVariable { value },
                    ctx,
                )
            }
        }
    }

    /// `@@x = value`, in any context.
    pub(super) fn handle_class_variable(
        &mut self,
        node: &SyntaxNode,
        ctx: &ParseContext,
    ) -> Result<(), RegistryError> {
        let Some((assign, name)) = assignment(node) else {
            return Ok(());
        };
        self.register_variable(
            node,
            &assign,
            name,
            |value| ObjectDetails::ClassVariable { value },
            ctx,
        )
    }

    fn register_variable(
        &mut self,
        node: &SyntaxNode,
        assign: &Assign,
        name: String,
        details: impl FnOnce(Arc<str>) -> ObjectDetails,
        ctx: &ParseContext,
    ) -> Result<(), RegistryError> {
        let source = source_ref(node, ctx);
        let docstring = assign.doc_comment().unwrap_or_default();
        let value = assigned_value(assign);
        self.registry.register(
            NewObject::new(ctx.namespace, name, details(Arc::clone(&value))),
            |object| {
                object.source = Some(source);
                if !docstring.is_empty() {
                    object.docstring = docstring;
                }
                object.set_value(value);
            },
        )?;
        Ok(())
    }
}

fn assignment(node: &SyntaxNode) -> Option<(Assign, String)> {
    let assign = Assign::cast(node.clone())?;
    let name = assign.target()?.name()?;
    Some((assign, name))
}

fn assigned_value(assign: &Assign) -> Arc<str> {
    Arc::from(assign.value().map(|expr| expr.text()).unwrap_or_default())
}
