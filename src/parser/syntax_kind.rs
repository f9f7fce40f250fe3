//! Syntax kinds for the Rowan-based CST
//!
//! This enum defines all possible node and token kinds in the syntax tree
//! for the Ruby subset the indexer understands.

/// All syntax kinds (tokens and nodes)
///
/// Tokens are leaf nodes (identifiers, keywords, punctuation).
/// Nodes are composite (modules, classes, method definitions, assignments).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    WHITESPACE = 0,
    NEWLINE,
    COMMENT,

    // =========================================================================
    // LITERALS AND NAMES
    // =========================================================================
    IDENT,   // foo, empty?, save!
    CONST,   // Foo
    IVAR,    // @foo
    CVAR,    // @@foo
    GVAR,    // $foo
    INTEGER, // 42
    FLOAT,   // 3.14
    STRING,  // "hello" or 'hello'
    SYMBOL,  // :hello

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    L_PAREN,     // (
    R_PAREN,     // )
    L_BRACKET,   // [
    R_BRACKET,   // ]
    L_BRACE,     // {
    R_BRACE,     // }
    COMMA,       // ,
    DOT,         // .
    DOT_DOT,     // .. and ...
    COLON,       // :
    COLON_COLON, // ::
    SEMICOLON,   // ;
    EQ,          // =
    EQ_EQ,       // ==
    EQ_EQ_EQ,    // ===
    EQ_TILDE,    // =~
    BANG_EQ,     // !=
    LT,          // <
    GT,          // >
    LT_EQ,       // <=
    GT_EQ,       // >=
    SPACESHIP,   // <=>
    SHL,         // <<
    SHR,         // >>
    PLUS,        // +
    MINUS,       // -
    STAR,        // *
    STAR_STAR,   // **
    SLASH,       // /
    PERCENT,     // %
    BANG,        // !
    QUESTION,    // ?
    AMP,         // &
    AMP_AMP,     // &&
    PIPE,        // |
    PIPE_PIPE,   // ||
    FAT_ARROW,   // =>
    ARROW,       // ->
    OP_ASSIGN,   // += -= *= /= ||= &&= <<= ...

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    MODULE_KW,
    CLASS_KW,
    DEF_KW,
    END_KW,
    SELF_KW,
    DO_KW,
    IF_KW,
    UNLESS_KW,
    WHILE_KW,
    UNTIL_KW,
    CASE_KW,
    BEGIN_KW,
    FOR_KW,
    THEN_KW,
    ELSE_KW,
    ELSIF_KW,
    WHEN_KW,
    IN_KW,
    RESCUE_KW,
    ENSURE_KW,
    RETURN_KW,
    YIELD_KW,
    SUPER_KW,
    NIL_KW,
    TRUE_KW,
    FALSE_KW,
    AND_KW,
    OR_KW,
    NOT_KW,

    // =========================================================================
    // NODES
    // =========================================================================
    SOURCE_FILE,
    BODY,
    MODULE_DEF,
    CLASS_DEF,
    CONST_PATH,
    SUPERCLASS,
    METHOD_DEF,
    SINGLETON,
    METHOD_NAME,
    PARAM_LIST,
    ASSIGN,
    VAR_FIELD,
    EXPR,
    STATEMENT,
    BLOCK,

    // Special
    ERROR,

    #[doc(hidden)]
    __LAST,
}

impl SyntaxKind {
    /// Check if this is a trivia token (whitespace, line breaks or comments)
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::NEWLINE | Self::COMMENT)
    }

    /// Check if this is a keyword
    pub fn is_keyword(self) -> bool {
        (self as u16) >= (Self::MODULE_KW as u16) && (self as u16) <= (Self::NOT_KW as u16)
    }

    /// Check if this is a variable reference token (`@x`, `@@x`, `$x`, `x`)
    pub fn is_variable(self) -> bool {
        matches!(self, Self::IVAR | Self::CVAR | Self::GVAR | Self::IDENT | Self::CONST)
    }

    /// Keywords that open a construct closed by `end` when they start a statement
    pub fn opens_block(self) -> bool {
        matches!(
            self,
            Self::IF_KW
                | Self::UNLESS_KW
                | Self::WHILE_KW
                | Self::UNTIL_KW
                | Self::CASE_KW
                | Self::BEGIN_KW
                | Self::FOR_KW
        )
    }

    /// Keywords that act as statement modifiers after a complete expression
    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            Self::IF_KW | Self::UNLESS_KW | Self::WHILE_KW | Self::UNTIL_KW | Self::RESCUE_KW
        )
    }

    /// Tokens that can end an expression (so a following keyword is a modifier)
    pub fn ends_value(self) -> bool {
        matches!(
            self,
            Self::IDENT
                | Self::CONST
                | Self::IVAR
                | Self::CVAR
                | Self::GVAR
                | Self::INTEGER
                | Self::FLOAT
                | Self::STRING
                | Self::SYMBOL
                | Self::R_PAREN
                | Self::R_BRACKET
                | Self::R_BRACE
                | Self::END_KW
                | Self::SELF_KW
                | Self::NIL_KW
                | Self::TRUE_KW
                | Self::FALSE_KW
                | Self::RETURN_KW
                | Self::YIELD_KW
                | Self::SUPER_KW
        )
    }

    /// Tokens after which a line break does not terminate the statement
    pub fn continues_line(self) -> bool {
        matches!(
            self,
            Self::COMMA
                | Self::DOT
                | Self::EQ
                | Self::EQ_EQ
                | Self::BANG_EQ
                | Self::LT
                | Self::GT
                | Self::LT_EQ
                | Self::GT_EQ
                | Self::PLUS
                | Self::MINUS
                | Self::STAR
                | Self::SLASH
                | Self::PERCENT
                | Self::AMP_AMP
                | Self::PIPE_PIPE
                | Self::FAT_ARROW
                | Self::OP_ASSIGN
                | Self::AND_KW
                | Self::OR_KW
                | Self::QUESTION
                | Self::COLON
        )
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl From<rowan::SyntaxKind> for SyntaxKind {
    fn from(raw: rowan::SyntaxKind) -> Self {
        assert!(raw.0 < SyntaxKind::__LAST as u16);
        // Safety: we control all syntax kinds and check bounds above
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }
}

/// Language definition for Rowan
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RubyLanguage {}

impl rowan::Language for RubyLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for convenience
pub type SyntaxNode = rowan::SyntaxNode<RubyLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<RubyLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<RubyLanguage>;
