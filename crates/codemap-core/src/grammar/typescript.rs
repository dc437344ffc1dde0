//! TypeScript grammar table.
//!
//! Shares the JavaScript family's statement and call kinds but exposes a
//! different parameter taxonomy (`required_parameter`/`optional_parameter`
//! with annotation fields) and annotated class fields.

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
        "public_field_definition" | "field_definition" => NodeClass::ClassField,
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
        "required_parameter" => Some(ParamShape::Typed),
        "optional_parameter" => Some(ParamShape::TypedDefault),
        "rest_pattern" => Some(ParamShape::VariadicPositional),
        _ => None,
    }
}

pub(super) fn grammar() -> Grammar {
    Grammar {
        name: "TypeScript",
        language: tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
        classify,
        param_shape,
        member_name_field: "property",
        self_receiver: "this",
        promotes_arrow_bindings: true,
    }
}
