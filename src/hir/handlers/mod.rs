//! Handler dispatch: turns syntax nodes into code objects.
//!
//! A static table maps each [`SyntaxKind`] to an ordered list of entries.
//! For every node the [`Processor`] tries the entries for its kind in order
//! and runs the first one whose [`Guard`] holds. Nodes without entries are
//! either walked through (compound statements, blocks, bodies) or ignored.
//!
//! ```text
//! MODULE_DEF  [namespace only]  → Module
//! CLASS_DEF   [namespace only]  → Class
//! METHOD_DEF                    → Method
//! ASSIGN      [target is @x]    → InstanceVariable
//! ASSIGN      [target is @@x]   → ClassVariable
//! ```

use std::sync::LazyLock;

use rustc_hash::FxHashMap;

use crate::hir::{CodeObject, Registry};
use crate::parser::{Assign, AstNode, SyntaxKind, SyntaxNode};

mod context;
mod method;
mod namespace;
mod processor;
mod variable;

pub use context::{ParseContext, SelfBinding};
pub use processor::Processor;

/// Extra condition an entry places on a node before its handler runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    /// The body being processed belongs to a namespace, not a method.
    NamespaceOnly,
    /// The node is an assignment whose target token has this kind.
    AssignsTo(SyntaxKind),
}

impl Guard {
    pub fn holds(self, node: &SyntaxNode, ctx: &ParseContext, registry: &Registry) -> bool {
        match self {
            Guard::NamespaceOnly => registry
                .get(ctx.owner)
                .is_some_and(CodeObject::is_namespace),
            Guard::AssignsTo(kind) => Assign::cast(node.clone())
                .and_then(|assign| assign.target_kind())
                .is_some_and(|target| target == kind),
        }
    }
}

/// The handlers the dispatcher can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    Module,
    Class,
    Method,
    InstanceVariable,
    ClassVariable,
}

/// One row of the dispatch table.
#[derive(Debug, Clone, Copy)]
pub struct HandlerEntry {
    pub kind: SyntaxKind,
    pub guard: Option<Guard>,
    pub handler: Handler,
}

/// Dispatch table in registration order.
pub static HANDLERS: &[HandlerEntry] = &[
    HandlerEntry {
        kind: SyntaxKind::MODULE_DEF,
        guard: Some(Guard::NamespaceOnly),
        handler: Handler::Module,
    },
    HandlerEntry {
        kind: SyntaxKind::CLASS_DEF,
        guard: Some(Guard::NamespaceOnly),
        handler: Handler::Class,
    },
    HandlerEntry {
        kind: SyntaxKind::METHOD_DEF,
        guard: None,
        handler: Handler::Method,
    },
    HandlerEntry {
        kind: SyntaxKind::ASSIGN,
        guard: Some(Guard::AssignsTo(SyntaxKind::IVAR)),
        handler: Handler::InstanceVariable,
    },
    HandlerEntry {
        kind: SyntaxKind::ASSIGN,
        guard: Some(Guard::AssignsTo(SyntaxKind::CVAR)),
        handler: Handler::ClassVariable,
    },
];

static HANDLER_TABLE: LazyLock<FxHashMap<SyntaxKind, Vec<&'static HandlerEntry>>> =
    LazyLock::new(|| {
        let mut table: FxHashMap<SyntaxKind, Vec<&'static HandlerEntry>> = FxHashMap::default();
        for entry in HANDLERS {
            table.entry(entry.kind).or_default().push(entry);
        }
        table
    });

/// Entries declared for `kind`, in registration order.
pub fn handlers_for(kind: SyntaxKind) -> &'static [&'static HandlerEntry] {
    HANDLER_TABLE
        .get(&kind)
        .map(Vec::as_slice)
        .unwrap_or_default()
}
