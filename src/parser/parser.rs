//! Recursive descent parser for the Ruby subset
//!
//! Builds a rowan GreenNode tree from tokens. Only the constructs the
//! indexer cares about get dedicated nodes; everything else is kept as
//! flat `STATEMENT` / `EXPR` token runs so the tree stays lossless.

use super::lexer::{Lexer, Token};
use super::syntax_kind::SyntaxKind;
use rowan::{Checkpoint, GreenNode, GreenNodeBuilder, TextRange, TextSize};

/// Parse result containing the green tree and any errors
#[derive(Debug, Clone)]
pub struct Parse {
    pub green: GreenNode,
    pub errors: Vec<SyntaxError>,
}

impl Parse {
    /// Get the root syntax node
    pub fn syntax(&self) -> super::SyntaxNode {
        super::SyntaxNode::new_root(self.green.clone())
    }

    /// Check if parsing succeeded without errors
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A syntax error with location and message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub range: TextRange,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }
}

/// Parse Ruby source code into a CST
pub fn parse(input: &str) -> Parse {
    let tokens: Vec<_> = Lexer::new(input).collect();
    let mut parser = Parser::new(&tokens);
    parser.parse_source_file();
    parser.finish()
}

/// Keywords that continue an `end`-terminated construct with a new clause
const CLAUSE_KEYWORDS: &[SyntaxKind] = &[
    SyntaxKind::ELSE_KW,
    SyntaxKind::ELSIF_KW,
    SyntaxKind::WHEN_KW,
    SyntaxKind::IN_KW,
    SyntaxKind::RESCUE_KW,
    SyntaxKind::ENSURE_KW,
    SyntaxKind::THEN_KW,
];

/// Tokens that stop a statement list inside a body
const BODY_TERMINATORS: &[SyntaxKind] = &[
    SyntaxKind::END_KW,
    SyntaxKind::ELSE_KW,
    SyntaxKind::ELSIF_KW,
    SyntaxKind::WHEN_KW,
    SyntaxKind::IN_KW,
    SyntaxKind::RESCUE_KW,
    SyntaxKind::ENSURE_KW,
    SyntaxKind::THEN_KW,
];

/// How an expression run treats keywords it meets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExprMode {
    /// A whole statement; trailing modifiers belong to it
    Statement,
    /// The right-hand side of an assignment; stops before a modifier
    Value,
    /// The header of `while`/`until`/`for`; `do` is a separator, not a block
    LoopHeader,
}

/// The parser state
struct Parser<'a> {
    tokens: &'a [Token<'a>],
    pos: usize,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<SyntaxError>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token<'a>]) -> Self {
        Self {
            tokens,
            pos: 0,
            builder: GreenNodeBuilder::new(),
            errors: Vec::new(),
        }
    }

    fn finish(self) -> Parse {
        Parse {
            green: self.builder.finish(),
            errors: self.errors,
        }
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    fn current(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn current_kind(&self) -> SyntaxKind {
        self.current().map(|t| t.kind).unwrap_or(SyntaxKind::ERROR)
    }

    fn current_text(&self) -> &str {
        self.current().map(|t| t.text).unwrap_or("")
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        !self.at_eof() && self.current_kind() == kind
    }

    fn at_any(&self, kinds: &[SyntaxKind]) -> bool {
        !self.at_eof() && kinds.contains(&self.current_kind())
    }

    fn at_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Look ahead `n` tokens, skipping inline whitespace only.
    ///
    /// Line breaks are significant in Ruby, so they count as tokens here.
    fn nth(&self, n: usize) -> SyntaxKind {
        let mut idx = self.pos;
        let mut count = 0;
        while idx < self.tokens.len() {
            if self.tokens[idx].kind != SyntaxKind::WHITESPACE {
                if count == n {
                    return self.tokens[idx].kind;
                }
                count += 1;
            }
            idx += 1;
        }
        SyntaxKind::ERROR
    }

    /// Look ahead exactly `n` tokens without skipping anything
    fn peek_raw(&self, n: usize) -> Option<SyntaxKind> {
        self.tokens.get(self.pos + n).map(|t| t.kind)
    }

    /// Kind of the first token after the current whitespace run
    fn kind_after_whitespace(&self) -> Option<SyntaxKind> {
        self.tokens[self.pos..]
            .iter()
            .find(|t| t.kind != SyntaxKind::WHITESPACE)
            .map(|t| t.kind)
    }

    /// A keyword directly followed by `:` is a hash label (`if: x`)
    fn at_label(&self) -> bool {
        self.peek_raw(1) == Some(SyntaxKind::COLON)
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    fn bump(&mut self) {
        let tokens = self.tokens;
        if let Some(token) = tokens.get(self.pos) {
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    fn bump_any(&mut self) {
        self.bump();
    }

    fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while self.at(SyntaxKind::WHITESPACE) {
            self.bump();
        }
    }

    /// Skip everything that separates statements: blanks, line breaks,
    /// comments and `;`
    fn skip_separators(&mut self) {
        while self.at_any(&[
            SyntaxKind::WHITESPACE,
            SyntaxKind::NEWLINE,
            SyntaxKind::COMMENT,
            SyntaxKind::SEMICOLON,
        ]) {
            self.bump();
        }
    }

    // =========================================================================
    // Error handling
    // =========================================================================

    fn error(&mut self, message: impl Into<String>) {
        let range = self
            .current()
            .map(|t| TextRange::at(t.offset, TextSize::of(t.text)))
            .unwrap_or_else(|| {
                let end = self
                    .tokens
                    .last()
                    .map(|t| t.offset + TextSize::of(t.text))
                    .unwrap_or_default();
                TextRange::empty(end)
            });
        self.errors.push(SyntaxError::new(message, range));
    }

    fn error_recover(&mut self, message: impl Into<String>, recovery: &[SyntaxKind]) {
        self.error(message);
        self.builder.start_node(SyntaxKind::ERROR.into());
        // Always consume at least one token to make progress
        let mut consumed = false;
        while !self.at_eof() && !self.at_any(recovery) {
            self.bump_any();
            consumed = true;
        }
        if !consumed && !self.at_eof() {
            self.bump_any();
        }
        self.builder.finish_node();
    }

    fn expect_end(&mut self, construct: &str) {
        if !self.eat(SyntaxKind::END_KW) {
            self.error(format!("expected `end` to close {construct}"));
        }
    }

    // =========================================================================
    // Node building helpers
    // =========================================================================

    fn start_node(&mut self, kind: SyntaxKind) {
        self.builder.start_node(kind.into());
    }

    fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(checkpoint, kind.into());
    }

    fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    // =========================================================================
    // Grammar rules
    // =========================================================================

    /// SourceFile = Statement*
    fn parse_source_file(&mut self) {
        self.start_node(SyntaxKind::SOURCE_FILE);
        self.parse_statements(&[]);
        self.finish_node();
    }

    /// Statement (separator Statement)* up to one of `terminators`
    fn parse_statements(&mut self, terminators: &[SyntaxKind]) {
        loop {
            self.skip_separators();
            if self.at_eof() || self.at_any(terminators) {
                break;
            }
            let pos_before = self.pos;
            self.parse_statement();
            // Safety: if we didn't make progress, force-skip a token
            if self.pos == pos_before && !self.at_eof() {
                self.error(format!("stuck on token: {:?}", self.current_kind()));
                self.bump_any();
            }
        }
    }

    fn parse_statement(&mut self) {
        let checkpoint = self.builder.checkpoint();
        match self.current_kind() {
            SyntaxKind::MODULE_KW => self.parse_module(),
            SyntaxKind::CLASS_KW if self.nth(1) == SyntaxKind::SHL => self.parse_block(),
            SyntaxKind::CLASS_KW => self.parse_class(),
            SyntaxKind::DEF_KW => self.parse_method(),
            kind if kind.opens_block() && !self.at_label() => self.parse_block(),
            kind if kind.is_variable() && self.nth(1) == SyntaxKind::EQ => self.parse_assign(),
            SyntaxKind::END_KW
            | SyntaxKind::R_PAREN
            | SyntaxKind::R_BRACKET
            | SyntaxKind::R_BRACE => {
                let message = format!("unexpected `{}`", self.current_text());
                self.error_recover(message, &[SyntaxKind::NEWLINE, SyntaxKind::SEMICOLON]);
                return;
            }
            kind if CLAUSE_KEYWORDS.contains(&kind) => {
                let message = format!("`{}` outside of a block", self.current_text());
                self.error_recover(message, &[SyntaxKind::NEWLINE, SyntaxKind::SEMICOLON]);
                return;
            }
            _ => {
                self.start_node(SyntaxKind::STATEMENT);
                self.consume_expression(ExprMode::Statement);
                self.finish_node();
                return;
            }
        }
        self.parse_modifier_tail(checkpoint);
    }

    /// `<stmt> if cond`: wraps the statement already built in a STATEMENT.
    fn parse_modifier_tail(&mut self, checkpoint: Checkpoint) {
        let is_modifier = self
            .kind_after_whitespace()
            .is_some_and(SyntaxKind::is_modifier);
        if !is_modifier {
            return;
        }
        self.start_node_at(checkpoint, SyntaxKind::STATEMENT);
        self.skip_whitespace();
        self.bump(); // if / unless / while / until / rescue
        self.consume_expression(ExprMode::Statement);
        self.finish_node();
    }

    /// ModuleDef = 'module' ConstPath Body 'end'
    fn parse_module(&mut self) {
        self.start_node(SyntaxKind::MODULE_DEF);
        self.bump(); // module
        self.skip_whitespace();

        if self.at_any(&[SyntaxKind::CONST, SyntaxKind::COLON_COLON]) {
            self.parse_const_path();
        } else {
            self.error("expected module name");
        }

        self.parse_body();
        self.expect_end("module");
        self.finish_node();
    }

    /// ClassDef = 'class' ConstPath ('<' Superclass)? Body 'end'
    fn parse_class(&mut self) {
        self.start_node(SyntaxKind::CLASS_DEF);
        self.bump(); // class
        self.skip_whitespace();

        if self.at_any(&[SyntaxKind::CONST, SyntaxKind::COLON_COLON]) {
            self.parse_const_path();
        } else {
            self.error("expected class name");
        }

        if self.nth(0) == SyntaxKind::LT {
            self.skip_whitespace();
            self.bump(); // <
            self.skip_whitespace();
            self.start_node(SyntaxKind::SUPERCLASS);
            self.consume_expression(ExprMode::Value);
            self.finish_node();
        }

        self.parse_body();
        self.expect_end("class");
        self.finish_node();
    }

    /// ConstPath = '::'? CONST ('::' CONST)*
    fn parse_const_path(&mut self) {
        self.start_node(SyntaxKind::CONST_PATH);
        self.eat(SyntaxKind::COLON_COLON);
        if !self.eat(SyntaxKind::CONST) {
            self.error("expected constant name");
        }
        while self.at(SyntaxKind::COLON_COLON) && self.peek_raw(1) == Some(SyntaxKind::CONST) {
            self.bump(); // ::
            self.bump(); // CONST
        }
        self.finish_node();
    }

    /// MethodDef = 'def' Singleton? MethodName ParamList? (Body 'end' | '=' Expr)
    fn parse_method(&mut self) {
        self.start_node(SyntaxKind::METHOD_DEF);
        self.bump(); // def
        self.skip_whitespace();

        let receiver = matches!(
            self.current_kind(),
            SyntaxKind::SELF_KW | SyntaxKind::CONST
        );
        if receiver && self.peek_raw(1) == Some(SyntaxKind::DOT) {
            self.start_node(SyntaxKind::SINGLETON);
            self.bump(); // self / Const
            self.bump(); // .
            self.finish_node();
        }

        self.parse_method_name();

        if self.at(SyntaxKind::L_PAREN) {
            self.start_node(SyntaxKind::PARAM_LIST);
            self.consume_balanced(SyntaxKind::L_PAREN, SyntaxKind::R_PAREN);
            self.finish_node();
        } else if self.at(SyntaxKind::WHITESPACE)
            && !matches!(
                self.kind_after_whitespace(),
                None | Some(
                    SyntaxKind::NEWLINE
                        | SyntaxKind::SEMICOLON
                        | SyntaxKind::COMMENT
                        | SyntaxKind::EQ
                )
            )
        {
            // Bare parameters: `def foo a, b`
            self.skip_whitespace();
            self.start_node(SyntaxKind::PARAM_LIST);
            self.consume_expression(ExprMode::Value);
            self.finish_node();
        }

        // Endless method: `def answer = 42`
        if self.nth(0) == SyntaxKind::EQ {
            self.skip_whitespace();
            self.bump(); // =
            self.skip_whitespace();
            self.start_node(SyntaxKind::BODY);
            self.start_node(SyntaxKind::STATEMENT);
            self.consume_expression(ExprMode::Value);
            self.finish_node();
            self.finish_node();
            self.finish_node();
            return;
        }

        self.parse_body();
        self.expect_end("method");
        self.finish_node();
    }

    fn parse_method_name(&mut self) {
        self.start_node(SyntaxKind::METHOD_NAME);
        let kind = self.current_kind();
        match kind {
            SyntaxKind::IDENT | SyntaxKind::CONST => {
                self.bump();
                // Setter: `def name=(value)`
                if self.at(SyntaxKind::EQ)
                    && matches!(
                        self.peek_raw(1),
                        Some(SyntaxKind::L_PAREN | SyntaxKind::IDENT)
                    )
                {
                    self.bump();
                }
            }
            SyntaxKind::L_BRACKET => {
                self.bump();
                self.eat(SyntaxKind::R_BRACKET);
                if self.at(SyntaxKind::EQ) && self.peek_raw(1) == Some(SyntaxKind::L_PAREN) {
                    self.bump();
                }
            }
            SyntaxKind::PLUS
            | SyntaxKind::MINUS
            | SyntaxKind::STAR
            | SyntaxKind::STAR_STAR
            | SyntaxKind::SLASH
            | SyntaxKind::PERCENT
            | SyntaxKind::EQ_EQ
            | SyntaxKind::EQ_EQ_EQ
            | SyntaxKind::EQ_TILDE
            | SyntaxKind::BANG
            | SyntaxKind::BANG_EQ
            | SyntaxKind::LT
            | SyntaxKind::GT
            | SyntaxKind::LT_EQ
            | SyntaxKind::GT_EQ
            | SyntaxKind::SPACESHIP
            | SyntaxKind::SHL
            | SyntaxKind::SHR
            | SyntaxKind::AMP
            | SyntaxKind::PIPE => self.bump(),
            k if k.is_keyword() => self.bump(),
            _ => self.error("expected method name"),
        }
        self.finish_node();
    }

    /// Consume a parenthesized run, including nested pairs and line breaks
    fn consume_balanced(&mut self, open: SyntaxKind, close: SyntaxKind) {
        let mut depth = 0usize;
        while !self.at_eof() {
            let kind = self.current_kind();
            self.bump();
            if kind == open {
                depth += 1;
            } else if kind == close {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return;
                }
            }
        }
        self.error(format!("unclosed {:?}", open));
    }

    /// Assign = VarField '=' Expr
    fn parse_assign(&mut self) {
        self.start_node(SyntaxKind::ASSIGN);

        self.start_node(SyntaxKind::VAR_FIELD);
        self.bump();
        self.finish_node();

        self.skip_whitespace();
        self.bump(); // =
        while self.at_any(&[SyntaxKind::WHITESPACE, SyntaxKind::NEWLINE]) {
            self.bump();
        }

        self.start_node(SyntaxKind::EXPR);
        self.consume_expression(ExprMode::Value);
        self.finish_node();

        self.finish_node();
    }

    /// Block = opener header Body 'end'
    ///
    /// Covers `if`, `unless`, `while`, `until`, `case`, `begin`, `for`,
    /// `do` and `class << self`.
    fn parse_block(&mut self) {
        self.start_node(SyntaxKind::BLOCK);
        let opener = self.current_kind();
        self.bump();

        let mode = match opener {
            SyntaxKind::WHILE_KW | SyntaxKind::UNTIL_KW | SyntaxKind::FOR_KW => {
                ExprMode::LoopHeader
            }
            _ => ExprMode::Statement,
        };
        self.consume_expression(mode);

        self.parse_body();
        self.expect_end("block");
        self.finish_node();
    }

    /// Body = Statement* (Clause Statement*)*
    fn parse_body(&mut self) {
        self.start_node(SyntaxKind::BODY);
        loop {
            self.parse_statements(BODY_TERMINATORS);
            match self.current_kind() {
                _ if self.at_eof() => break,
                SyntaxKind::ELSIF_KW
                | SyntaxKind::WHEN_KW
                | SyntaxKind::IN_KW
                | SyntaxKind::RESCUE_KW => {
                    self.bump();
                    self.consume_expression(ExprMode::Statement);
                }
                SyntaxKind::ELSE_KW | SyntaxKind::ENSURE_KW | SyntaxKind::THEN_KW => {
                    self.bump();
                }
                _ => break,
            }
        }
        self.finish_node();
    }

    /// Whether `kind` ends the current expression run
    fn ends_expression(
        &self,
        kind: SyntaxKind,
        depth: usize,
        last: Option<SyntaxKind>,
        mode: ExprMode,
    ) -> bool {
        if last == Some(SyntaxKind::DOT) && kind.is_keyword() {
            // `range.end`, `obj.class`
            return false;
        }
        let after_value = last.is_some_and(SyntaxKind::ends_value);
        match kind {
            SyntaxKind::NEWLINE => depth == 0 && !last.is_some_and(SyntaxKind::continues_line),
            SyntaxKind::COMMENT | SyntaxKind::SEMICOLON => depth == 0,
            SyntaxKind::R_PAREN | SyntaxKind::R_BRACKET | SyntaxKind::R_BRACE => depth == 0,
            SyntaxKind::END_KW
            | SyntaxKind::ELSE_KW
            | SyntaxKind::ELSIF_KW
            | SyntaxKind::WHEN_KW
            | SyntaxKind::ENSURE_KW => depth == 0,
            SyntaxKind::RESCUE_KW if !after_value => depth == 0,
            k if k.is_modifier() => depth == 0 && after_value && mode == ExprMode::Value,
            _ => false,
        }
    }

    /// Consume tokens of one expression until a statement boundary.
    ///
    /// Nested `end`-terminated constructs that appear in value position
    /// (`x = if ...`, `list.each do ... end`) are parsed as blocks.
    fn consume_expression(&mut self, mode: ExprMode) {
        let mut depth = 0usize;
        let mut last: Option<SyntaxKind> = None;

        while !self.at_eof() {
            let kind = self.current_kind();

            if kind == SyntaxKind::WHITESPACE {
                match self.kind_after_whitespace() {
                    Some(next) if !self.ends_expression(next, depth, last, mode) => {
                        self.bump();
                        continue;
                    }
                    _ => break,
                }
            }

            if self.ends_expression(kind, depth, last, mode) {
                break;
            }

            let after_dot = last == Some(SyntaxKind::DOT);
            let label = kind.is_keyword() && self.at_label();
            match kind {
                SyntaxKind::L_PAREN | SyntaxKind::L_BRACKET | SyntaxKind::L_BRACE => {
                    depth += 1;
                    self.bump();
                }
                SyntaxKind::R_PAREN | SyntaxKind::R_BRACKET | SyntaxKind::R_BRACE => {
                    depth = depth.saturating_sub(1);
                    self.bump();
                }
                SyntaxKind::DO_KW if mode != ExprMode::LoopHeader && !after_dot && !label => {
                    self.parse_block();
                    last = Some(SyntaxKind::END_KW);
                    continue;
                }
                SyntaxKind::DEF_KW if !after_dot && !label => {
                    // `private def foo ... end`
                    self.parse_method();
                    last = Some(SyntaxKind::END_KW);
                    continue;
                }
                k if k.opens_block() && !after_dot && !label => {
                    let modifier = k.is_modifier() && last.is_some_and(SyntaxKind::ends_value);
                    if modifier {
                        self.bump();
                    } else {
                        self.parse_block();
                        last = Some(SyntaxKind::END_KW);
                        continue;
                    }
                }
                _ => self.bump(),
            }

            if !kind.is_trivia() {
                last = Some(kind);
            }
        }
    }
}
