//! JavaScript grammar table.

use super::{Grammar, NodeClass, ParamShape};

fn classify(kind: &str) -> NodeClass {
    match kind {
        "function_declaration" | "generator_function_declaration" => NodeClass::FunctionDef,
        "method_definition" => NodeClass::MethodDef,
        "class_declaration" => NodeClass::ClassDef,
        "arrow_function" | "function_expression" => NodeClass::Lambda,
        "expression_statement" => NodeClass::ExpressionStatement,
        "assignment_expression" => NodeClass::Assignment,
        "variable_declaration" | "lexical_declaration" => NodeClass::VariableDeclaration,
        "variable_declarator" => NodeClass::VariableDeclarator,
        "field_definition" => NodeClass::ClassField,
        "call_expression" => NodeClass::Call,
        "member_expression" => NodeClass::MemberAccess,
        "string" => NodeClass::StringLiteral,
        "identifier" => NodeClass::Identifier,
        _ => NodeClass::Other,
    }
}

fn param_shape(kind: &str) -> Option<ParamShape> {
    match kind {
        "identifier" => Some(ParamShape::Bare),
        "assignment_pattern" => Some(ParamShape::WithDefault),
        "rest_pattern" => Some(ParamShape::VariadicPositional),
        _ => None,
    }
}

pub(super) fn grammar() -> Grammar {
    Grammar {
        name: "JavaScript",
        language: tree_sitter_javascript::LANGUAGE.into(),
        classify,
        param_shape,
        member_name_field: "property",
        self_receiver: "this",
        promotes_arrow_bindings: true,
    }
}
