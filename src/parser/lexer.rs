//! Logos-based lexer for the Ruby subset
//!
//! Fast tokenization using the logos crate. Every byte of the input ends up
//! in exactly one token so the CST stays lossless.

use super::syntax_kind::SyntaxKind;
use logos::Logos;
use rowan::TextSize;

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub offset: TextSize,
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
    offset: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
            offset: 0,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let text = self.inner.slice();
        let offset = TextSize::new(self.offset);
        self.offset += text.len() as u32;

        let kind = match logos_token {
            Ok(t) => t.into(),
            Err(()) => SyntaxKind::ERROR,
        };

        Some(Token { kind, text, offset })
    }
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Logos token enum - maps to SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t]+")]
    #[regex(r"\\\r?\n")]
    Whitespace,

    #[regex(r"\r?\n")]
    Newline,

    #[regex(r"#[^\n]*")]
    Comment,

    // =========================================================================
    // NAMES AND LITERALS
    // =========================================================================
    #[regex(r"[a-z_][a-zA-Z0-9_]*[?!]?")]
    Ident,

    #[regex(r"[A-Z][a-zA-Z0-9_]*")]
    Const,

    #[regex(r"@[a-zA-Z_][a-zA-Z0-9_]*")]
    Ivar,

    #[regex(r"@@[a-zA-Z_][a-zA-Z0-9_]*")]
    Cvar,

    #[regex(r"\$[a-zA-Z_][a-zA-Z0-9_]*")]
    Gvar,

    #[regex(r"[0-9][0-9_]*")]
    Integer,

    #[regex(r"[0-9][0-9_]*\.[0-9][0-9_]*([eE][+-]?[0-9]+)?")]
    Float,

    #[regex(r#""([^"\\]|\\.)*""#)]
    #[regex(r"'([^'\\]|\\.)*'")]
    String,

    #[regex(r":[a-zA-Z_][a-zA-Z0-9_]*[?!=]?")]
    #[regex(r#":"([^"\\]|\\.)*""#)]
    Symbol,

    // =========================================================================
    // MULTI-CHARACTER PUNCTUATION
    // =========================================================================
    #[token("+=")]
    #[token("-=")]
    #[token("*=")]
    #[token("/=")]
    #[token("%=")]
    #[token("**=")]
    #[token("||=")]
    #[token("&&=")]
    #[token("|=")]
    #[token("&=")]
    #[token("<<=")]
    #[token(">>=")]
    OpAssign,

    #[token("::")]
    ColonColon,

    #[token("..")]
    #[token("...")]
    DotDot,

    #[token("===")]
    EqEqEq,

    #[token("==")]
    EqEq,

    #[token("=~")]
    EqTilde,

    #[token("!=")]
    BangEq,

    #[token("<=>")]
    Spaceship,

    #[token("<=")]
    LtEq,

    #[token(">=")]
    GtEq,

    #[token("<<")]
    Shl,

    #[token(">>")]
    Shr,

    #[token("**")]
    StarStar,

    #[token("&&")]
    AmpAmp,

    #[token("||")]
    PipePipe,

    #[token("=>")]
    FatArrow,

    #[token("->")]
    Arrow,

    // =========================================================================
    // SINGLE-CHARACTER PUNCTUATION
    // =========================================================================
    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    #[token(",")]
    Comma,

    #[token(".")]
    Dot,

    #[token(":")]
    Colon,

    #[token(";")]
    Semicolon,

    #[token("=")]
    Eq,

    #[token("<")]
    Lt,

    #[token(">")]
    Gt,

    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    Star,

    #[token("/")]
    Slash,

    #[token("%")]
    Percent,

    #[token("!")]
    Bang,

    #[token("?")]
    Question,

    #[token("&")]
    Amp,

    #[token("|")]
    Pipe,

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    #[token("module")]
    ModuleKw,
    #[token("class")]
    ClassKw,
    #[token("def")]
    DefKw,
    #[token("end")]
    EndKw,
    #[token("self")]
    SelfKw,
    #[token("do")]
    DoKw,
    #[token("if")]
    IfKw,
    #[token("unless")]
    UnlessKw,
    #[token("while")]
    WhileKw,
    #[token("until")]
    UntilKw,
    #[token("case")]
    CaseKw,
    #[token("begin")]
    BeginKw,
    #[token("for")]
    ForKw,
    #[token("then")]
    ThenKw,
    #[token("else")]
    ElseKw,
    #[token("elsif")]
    ElsifKw,
    #[token("when")]
    WhenKw,
    #[token("in")]
    InKw,
    #[token("rescue")]
    RescueKw,
    #[token("ensure")]
    EnsureKw,
    #[token("return")]
    ReturnKw,
    #[token("yield")]
    YieldKw,
    #[token("super")]
    SuperKw,
    #[token("nil")]
    NilKw,
    #[token("true")]
    TrueKw,
    #[token("false")]
    FalseKw,
    #[token("and")]
    AndKw,
    #[token("or")]
    OrKw,
    #[token("not")]
    NotKw,
}

impl From<LogosToken> for SyntaxKind {
    fn from(token: LogosToken) -> Self {
        use LogosToken::*;
        match token {
            // Trivia
            Whitespace => SyntaxKind::WHITESPACE,
            Newline => SyntaxKind::NEWLINE,
            Comment => SyntaxKind::COMMENT,

            // Names and literals
            Ident => SyntaxKind::IDENT,
            Const => SyntaxKind::CONST,
            Ivar => SyntaxKind::IVAR,
            Cvar => SyntaxKind::CVAR,
            Gvar => SyntaxKind::GVAR,
            Integer => SyntaxKind::INTEGER,
            Float => SyntaxKind::FLOAT,
            String => SyntaxKind::STRING,
            Symbol => SyntaxKind::SYMBOL,

            // Multi-char punctuation
            OpAssign => SyntaxKind::OP_ASSIGN,
            ColonColon => SyntaxKind::COLON_COLON,
            DotDot => SyntaxKind::DOT_DOT,
            EqEqEq => SyntaxKind::EQ_EQ_EQ,
            EqEq => SyntaxKind::EQ_EQ,
            EqTilde => SyntaxKind::EQ_TILDE,
            BangEq => SyntaxKind::BANG_EQ,
            Spaceship => SyntaxKind::SPACESHIP,
            LtEq => SyntaxKind::LT_EQ,
            GtEq => SyntaxKind::GT_EQ,
            Shl => SyntaxKind::SHL,
            Shr => SyntaxKind::SHR,
            StarStar => SyntaxKind::STAR_STAR,
            AmpAmp => SyntaxKind::AMP_AMP,
            PipePipe => SyntaxKind::PIPE_PIPE,
            FatArrow => SyntaxKind::FAT_ARROW,
            Arrow => SyntaxKind::ARROW,

            // Single-char punctuation
            LParen => SyntaxKind::L_PAREN,
            RParen => SyntaxKind::R_PAREN,
            LBracket => SyntaxKind::L_BRACKET,
            RBracket => SyntaxKind::R_BRACKET,
            LBrace => SyntaxKind::L_BRACE,
            RBrace => SyntaxKind::R_BRACE,
            Comma => SyntaxKind::COMMA,
            Dot => SyntaxKind::DOT,
            Colon => SyntaxKind::COLON,
            Semicolon => SyntaxKind::SEMICOLON,
            Eq => SyntaxKind::EQ,
            Lt => SyntaxKind::LT,
            Gt => SyntaxKind::GT,
            Plus => SyntaxKind::PLUS,
            Minus => SyntaxKind::MINUS,
            Star => SyntaxKind::STAR,
            Slash => SyntaxKind::SLASH,
            Percent => SyntaxKind::PERCENT,
            Bang => SyntaxKind::BANG,
            Question => SyntaxKind::QUESTION,
            Amp => SyntaxKind::AMP,
            Pipe => SyntaxKind::PIPE,

            // Keywords
            ModuleKw => SyntaxKind::MODULE_KW,
            ClassKw => SyntaxKind::CLASS_KW,
            DefKw => SyntaxKind::DEF_KW,
            EndKw => SyntaxKind::END_KW,
            SelfKw => SyntaxKind::SELF_KW,
            DoKw => SyntaxKind::DO_KW,
            IfKw => SyntaxKind::IF_KW,
            UnlessKw => SyntaxKind::UNLESS_KW,
            WhileKw => SyntaxKind::WHILE_KW,
            UntilKw => SyntaxKind::UNTIL_KW,
            CaseKw => SyntaxKind::CASE_KW,
            BeginKw => SyntaxKind::BEGIN_KW,
            ForKw => SyntaxKind::FOR_KW,
            ThenKw => SyntaxKind::THEN_KW,
            ElseKw => SyntaxKind::ELSE_KW,
            ElsifKw => SyntaxKind::ELSIF_KW,
            WhenKw => SyntaxKind::WHEN_KW,
            InKw => SyntaxKind::IN_KW,
            RescueKw => SyntaxKind::RESCUE_KW,
            EnsureKw => SyntaxKind::ENSURE_KW,
            ReturnKw => SyntaxKind::RETURN_KW,
            YieldKw => SyntaxKind::YIELD_KW,
            SuperKw => SyntaxKind::SUPER_KW,
            NilKw => SyntaxKind::NIL_KW,
            TrueKw => SyntaxKind::TRUE_KW,
            FalseKw => SyntaxKind::FALSE_KW,
            AndKw => SyntaxKind::AND_KW,
            OrKw => SyntaxKind::OR_KW,
            NotKw => SyntaxKind::NOT_KW,
        }
    }
}
