//! Grammar adapter: per-language/dialect tables mapping canonical extraction
//! concepts onto concrete tree-sitter node kinds.
//!
//! Node-kind strings are classified once per node into the closed
//! [`NodeClass`] and [`ParamShape`] variants; the traversal engine dispatches
//! on those instead of comparing strings at every site. Selection happens per
//! file, because two dialects of one family (JavaScript vs TypeScript) expose
//! different node taxonomies.

mod javascript;
mod python;
mod typescript;

use tree_sitter::Language;

use crate::error::AnalyzerError;

/// Canonical classification of a syntax-tree node kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeClass {
    /// Free-standing function definition.
    FunctionDef,
    /// Method definition inside a class body (JS family; Python reuses
    /// `FunctionDef` there).
    MethodDef,
    ClassDef,
    /// Anonymous function body: a scope boundary, never promoted.
    Lambda,
    ExpressionStatement,
    /// Assignment with a plain name (or receiver attribute) on the left.
    Assignment,
    /// `var`/`let`/`const` statement wrapping one or more declarators.
    VariableDeclaration,
    VariableDeclarator,
    /// Field declared directly in a class body.
    ClassField,
    Call,
    /// Qualified/member access used as a call target.
    MemberAccess,
    StringLiteral,
    Identifier,
    Other,
}

impl NodeClass {
    /// Whether extraction must not descend past this node when collecting
    /// variables or calls for an enclosing scope.
    pub fn is_scope_boundary(self) -> bool {
        matches!(
            self,
            NodeClass::FunctionDef | NodeClass::MethodDef | NodeClass::ClassDef | NodeClass::Lambda
        )
    }
}

/// The six canonical parameter shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamShape {
    /// Bare name.
    Bare,
    /// Name with a default value.
    WithDefault,
    /// Name with a type annotation.
    Typed,
    /// Name with both annotation and default.
    TypedDefault,
    /// `*args` / `...rest`.
    VariadicPositional,
    /// `**kwargs`.
    VariadicKeyword,
}

impl ParamShape {
    /// Marker prepended to the parameter name for variadic shapes.
    pub fn name_prefix(self) -> &'static str {
        match self {
            ParamShape::VariadicPositional => "*",
            ParamShape::VariadicKeyword => "**",
            _ => "",
        }
    }
}

/// Immutable adapter table for one language/dialect.
pub struct Grammar {
    name: &'static str,
    language: Language,
    classify: fn(&str) -> NodeClass,
    param_shape: fn(&str) -> Option<ParamShape>,
    /// Field holding the trailing name of a member access
    /// (`attribute` in Python, `property` in the JS family).
    pub member_name_field: &'static str,
    /// Receiver spelling for instance-attribute assignments.
    pub self_receiver: &'static str,
    /// Whether `const f = () => ...` bindings at module top level are
    /// promoted to functions.
    pub promotes_arrow_bindings: bool,
}

impl Grammar {
    /// Select the adapter for a language name plus an optional
    /// extension/dialect hint.
    ///
    /// The hint matters within the JavaScript family: a `ts`/`tsx` hint
    /// selects the TypeScript table, which shares most of the family's node
    /// kinds but classifies parameters and class fields differently.
    pub fn select(language: &str, extension_hint: Option<&str>) -> Result<Self, AnalyzerError> {
        let lang = language.to_lowercase();
        let hint = extension_hint.map(|h| h.to_lowercase());
        match (lang.as_str(), hint.as_deref()) {
            ("python" | "py", _) => Ok(python::grammar()),
            ("javascript" | "js", Some("ts" | "tsx")) => Ok(typescript::grammar()),
            ("javascript" | "js", _) => Ok(javascript::grammar()),
            ("typescript" | "ts", _) => Ok(typescript::grammar()),
            _ => Err(AnalyzerError::unsupported(language, extension_hint)),
        }
    }

    /// Human-readable dialect name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The tree-sitter grammar handle.
    pub fn language(&self) -> &Language {
        &self.language
    }

    /// Classify a node kind into its canonical concept.
    pub fn classify(&self, kind: &str) -> NodeClass {
        (self.classify)(kind)
    }

    /// Classify a child of a parameter list. `None` means the child is not a
    /// parameter (punctuation, separators, unknown kinds) and is skipped.
    pub fn param_shape(&self, kind: &str) -> Option<ParamShape> {
        (self.param_shape)(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selects_python_by_name() {
        let g = Grammar::select("Python", None).unwrap();
        assert_eq!(g.name(), "Python");
        assert_eq!(g.classify("function_definition"), NodeClass::FunctionDef);
        assert_eq!(g.classify("class_definition"), NodeClass::ClassDef);
        assert_eq!(g.classify("call"), NodeClass::Call);
    }

    #[test]
    fn ts_hint_switches_dialect_within_family() {
        let js = Grammar::select("javascript", Some("js")).unwrap();
        let ts = Grammar::select("javascript", Some("ts")).unwrap();
        assert_eq!(js.name(), "JavaScript");
        assert_eq!(ts.name(), "TypeScript");

        // The dialects disagree on parameter taxonomy.
        assert_eq!(ts.param_shape("required_parameter"), Some(ParamShape::Typed));
        assert_eq!(js.param_shape("required_parameter"), None);
        assert_eq!(js.param_shape("assignment_pattern"), Some(ParamShape::WithDefault));
    }

    #[test]
    fn unsupported_language_is_fatal() {
        let result = Grammar::select("cobol", None);
        assert!(matches!(
            result.err(),
            Some(AnalyzerError::UnsupportedLanguage { .. })
        ));
    }

    #[test]
    fn boundaries_cover_nested_scopes() {
        assert!(NodeClass::FunctionDef.is_scope_boundary());
        assert!(NodeClass::Lambda.is_scope_boundary());
        assert!(!NodeClass::ExpressionStatement.is_scope_boundary());
        assert!(!NodeClass::Call.is_scope_boundary());
    }

    #[test]
    fn variadic_shapes_carry_markers() {
        assert_eq!(ParamShape::VariadicPositional.name_prefix(), "*");
        assert_eq!(ParamShape::VariadicKeyword.name_prefix(), "**");
        assert_eq!(ParamShape::Bare.name_prefix(), "");
    }
}
