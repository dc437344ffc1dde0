//! Python grammar table.

use super::{Grammar, NodeClass, ParamShape};

fn classify(kind: &str) -> NodeClass {
    match kind {
        "function_definition" => NodeClass::FunctionDef,
        "class_definition" => NodeClass::ClassDef,
        "lambda" => NodeClass::Lambda,
        "expression_statement" => NodeClass::ExpressionStatement,
        "assignment" => NodeClass::Assignment,
        "call" => NodeClass::Call,
        "attribute" => NodeClass::MemberAccess,
        "string" => NodeClass::StringLiteral,
        "identifier" => NodeClass::Identifier,
        _ => NodeClass::Other,
    }
}

fn param_shape(kind: &str) -> Option<ParamShape> {
    match kind {
        "identifier" => Some(ParamShape::Bare),
        "default_parameter" => Some(ParamShape::WithDefault),
        "typed_parameter" => Some(ParamShape::Typed),
        "typed_default_parameter" => Some(ParamShape::TypedDefault),
        "list_splat_pattern" => Some(ParamShape::VariadicPositional),
        "dictionary_splat_pattern" => Some(ParamShape::VariadicKeyword),
        _ => None,
    }
}

pub(super) fn grammar() -> Grammar {
    Grammar {
        name: "Python",
        language: tree_sitter_python::LANGUAGE.into(),
        classify,
        param_shape,
        member_name_field: "attribute",
        self_receiver: "self",
        promotes_arrow_bindings: false,
    }
}
