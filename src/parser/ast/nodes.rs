use super::*;

// ============================================================================
// Root and bodies
// ============================================================================

ast_node!(SourceFile, SOURCE_FILE);

impl SourceFile {
    statements_method!();
}

ast_node!(Body, BODY);

impl Body {
    statements_method!();
}

// ============================================================================
// Namespaces
// ============================================================================

ast_node!(ModuleDef, MODULE_DEF);

impl ModuleDef {
    first_child_method!(name, ConstPath);
    first_child_method!(body, Body);
}

ast_node!(ClassDef, CLASS_DEF);

impl ClassDef {
    first_child_method!(name, ConstPath);
    first_child_method!(body, Body);

    /// Superclass expression text (`Base` in `class Foo < Base`)
    pub fn superclass(&self) -> Option<String> {
        self.0
            .children()
            .find(|n| n.kind() == SyntaxKind::SUPERCLASS)
            .map(|n| n.text().to_string().trim().to_string())
            .filter(|s| !s.is_empty())
    }
}

/// Either kind of namespace-introducing definition
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NamespaceDef {
    Module(ModuleDef),
    Class(ClassDef),
}

impl AstNode for NamespaceDef {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(kind, SyntaxKind::MODULE_DEF | SyntaxKind::CLASS_DEF)
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::MODULE_DEF => Some(Self::Module(ModuleDef(node))),
            SyntaxKind::CLASS_DEF => Some(Self::Class(ClassDef(node))),
            _ => None,
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Self::Module(n) => n.syntax(),
            Self::Class(n) => n.syntax(),
        }
    }
}

impl NamespaceDef {
    pub fn name(&self) -> Option<ConstPath> {
        match self {
            Self::Module(n) => n.name(),
            Self::Class(n) => n.name(),
        }
    }

    pub fn body(&self) -> Option<Body> {
        match self {
            Self::Module(n) => n.body(),
            Self::Class(n) => n.body(),
        }
    }

    pub fn superclass(&self) -> Option<String> {
        match self {
            Self::Module(_) => None,
            Self::Class(n) => n.superclass(),
        }
    }
}

ast_node!(ConstPath, CONST_PATH);

impl ConstPath {
    /// Constant segments in order (`["A", "B"]` for `A::B`)
    pub fn segments(&self) -> Vec<String> {
        self.0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .filter(|t| t.kind() == SyntaxKind::CONST)
            .map(|t| t.text().to_string())
            .collect()
    }

    /// `::Foo` is anchored at the root namespace
    pub fn is_absolute(&self) -> bool {
        self.0
            .first_token()
            .is_some_and(|t| t.kind() == SyntaxKind::COLON_COLON)
    }
}

// ============================================================================
// Methods
// ============================================================================

ast_node!(MethodDef, METHOD_DEF);

impl MethodDef {
    first_child_method!(params, ParamList);
    first_child_method!(body, Body);

    /// The method name as written (`foo`, `name=`, `[]`, `<=>`)
    pub fn name(&self) -> Option<String> {
        self.0
            .children()
            .find(|n| n.kind() == SyntaxKind::METHOD_NAME)
            .map(|n| n.text().to_string())
            .filter(|s| !s.is_empty())
    }

    /// `def self.x`, `def Const.x`, or any `def` inside `class << self`
    pub fn is_singleton(&self) -> bool {
        self.0.children().any(|n| n.kind() == SyntaxKind::SINGLETON) || self.in_singleton_class()
    }

    /// Nearest `class << ...` block above this definition, without crossing
    /// another module, class or method definition.
    fn in_singleton_class(&self) -> bool {
        self.0
            .ancestors()
            .skip(1)
            .take_while(|n| {
                !matches!(
                    n.kind(),
                    SyntaxKind::MODULE_DEF | SyntaxKind::CLASS_DEF | SyntaxKind::METHOD_DEF
                )
            })
            .any(|n| n.kind() == SyntaxKind::BLOCK && opens_with(&n, SyntaxKind::CLASS_KW))
    }

    /// The definition line up to the end of the parameter list,
    /// e.g. `def foo(a, b)`.
    pub fn signature(&self) -> String {
        let start = self.0.text_range().start();
        let end = self
            .params()
            .map(|p| p.syntax().text_range().end())
            .or_else(|| {
                self.0
                    .children()
                    .find(|n| n.kind() == SyntaxKind::METHOD_NAME)
                    .map(|n| n.text_range().end())
            });
        let text = self.0.text().to_string();
        match end {
            Some(end) => {
                let len = usize::from(end - start);
                text.get(..len).unwrap_or(&text).trim_end().to_string()
            }
            None => text.lines().next().unwrap_or_default().trim_end().to_string(),
        }
    }
}

ast_node!(ParamList, PARAM_LIST);

impl ParamList {
    /// Parameter list text without surrounding parentheses
    pub fn inner_text(&self) -> String {
        let text = self.0.text().to_string();
        let trimmed = text.trim();
        trimmed
            .strip_prefix('(')
            .and_then(|s| s.strip_suffix(')'))
            .unwrap_or(trimmed)
            .to_string()
    }
}

// ============================================================================
// Assignments
// ============================================================================

ast_node!(Assign, ASSIGN);

impl Assign {
    first_child_method!(target, VarField);
    first_child_method!(value, Expr);

    /// Token kind of the assignment target (`IVAR` for `@x = ...`)
    pub fn target_kind(&self) -> Option<SyntaxKind> {
        self.target().and_then(|t| t.token()).map(|t| t.kind())
    }
}

ast_node!(VarField, VAR_FIELD);

impl VarField {
    pub fn token(&self) -> Option<SyntaxToken> {
        find_token(&self.0, SyntaxKind::is_variable)
    }

    /// Variable name including its sigil
    pub fn name(&self) -> Option<String> {
        self.token().map(|t| t.text().to_string())
    }
}

ast_node!(Expr, EXPR);

impl Expr {
    /// Verbatim expression text
    pub fn text(&self) -> String {
        self.0.text().to_string()
    }
}
