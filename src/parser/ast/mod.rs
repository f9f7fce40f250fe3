//! Typed AST wrappers over the untyped rowan CST.
//!
//! Each struct wraps a SyntaxNode and provides methods to access children.
//! The handlers only ever see these wrappers plus the raw node kind.

use super::syntax_kind::SyntaxKind;
use super::{SyntaxNode, SyntaxToken};

// ============================================================================
// Helper utilities
// ============================================================================

/// Find the first direct child token matching `pred`.
#[inline]
fn find_token(node: &SyntaxNode, pred: impl Fn(SyntaxKind) -> bool) -> Option<SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|e| e.into_token())
        .find(|t| pred(t.kind()))
}

/// Check if the first child token of a node has the specified kind.
#[inline]
fn opens_with(node: &SyntaxNode, kind: SyntaxKind) -> bool {
    node.first_token().is_some_and(|t| t.kind() == kind)
}

/// Macro to generate a method that finds the first child of a specific AST type.
macro_rules! first_child_method {
    ($name:ident, $type:ident) => {
        #[doc = concat!("Get the first `", stringify!($type), "` child of this node.")]
        pub fn $name(&self) -> Option<$type> {
            self.0.children().find_map($type::cast)
        }
    };
}

/// Macro to generate a method that returns the statement nodes of a body-like node.
///
/// Statements are returned untyped: the handler table dispatches on the kind.
macro_rules! statements_method {
    () => {
        /// Get the statement nodes, in source order.
        pub fn statements(&self) -> impl Iterator<Item = SyntaxNode> + '_ {
            self.0.children()
        }
    };
}

/// Trait for AST nodes that wrap a SyntaxNode
pub trait AstNode: Sized {
    fn can_cast(kind: SyntaxKind) -> bool;
    fn cast(node: SyntaxNode) -> Option<Self>;
    fn syntax(&self) -> &SyntaxNode;

    /// Find all descendant nodes of a specific AST type
    fn descendants<T: AstNode>(&self) -> impl Iterator<Item = T> {
        self.syntax().descendants().filter_map(T::cast)
    }

    /// Verbatim source text of the node
    fn source_text(&self) -> String {
        self.syntax().text().to_string()
    }

    /// Extract the comment block directly above this node.
    /// Consecutive `#` lines count; a blank line ends the block.
    fn doc_comment(&self) -> Option<String> {
        extract_doc_comment(self.syntax())
    }
}

/// Extract the doc comment preceding a syntax node.
///
/// Walks backwards over sibling trivia collecting full-line `#` comments.
/// A blank line or any non-trivia sibling stops the walk, and a comment
/// that trails code on its own line is never part of a doc block.
pub fn extract_doc_comment(node: &SyntaxNode) -> Option<String> {
    let mut lines = Vec::new();
    let mut newlines = 0;
    let mut current = node.prev_sibling_or_token();

    while let Some(element) = current {
        let Some(token) = element.as_token() else {
            break;
        };
        match token.kind() {
            SyntaxKind::WHITESPACE => {}
            SyntaxKind::NEWLINE => {
                newlines += 1;
                if newlines > 1 {
                    break;
                }
            }
            SyntaxKind::COMMENT if starts_line(token) => {
                lines.push(clean_comment_line(token.text()));
                newlines = 0;
            }
            _ => break,
        }
        current = token.prev_sibling_or_token();
    }

    lines.reverse();
    while lines.first().is_some_and(|l| l.is_empty()) {
        lines.remove(0);
    }
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

/// A comment starts its line when only whitespace separates it from the
/// previous line break (or the start of its parent).
fn starts_line(token: &SyntaxToken) -> bool {
    let mut prev = token.prev_sibling_or_token();
    while let Some(element) = prev {
        match element.kind() {
            SyntaxKind::WHITESPACE => prev = element.prev_sibling_or_token(),
            SyntaxKind::NEWLINE => return true,
            _ => return false,
        }
    }
    true
}

/// Strip the `#` marker and a single following space.
fn clean_comment_line(text: &str) -> String {
    let body = text.strip_prefix('#').unwrap_or(text);
    let body = body.strip_prefix(' ').unwrap_or(body);
    body.trim_end().to_string()
}

// ============================================================================
// Helper macros
// ============================================================================

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(pub(crate) SyntaxNode);

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                kind == SyntaxKind::$kind
            }

            fn cast(node: SyntaxNode) -> Option<Self> {
                if Self::can_cast(node.kind()) {
                    Some(Self(node))
                } else {
                    None
                }
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

// Submodules: declared after macros so macro_rules! are in scope
mod nodes;

pub use nodes::*;

#[cfg(test)]
mod tests;
