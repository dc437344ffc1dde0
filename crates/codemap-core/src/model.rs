//! Normalized entity model produced by the traversal engine.
//!
//! One analysis pass builds these transiently and hands them to the
//! persistence gateway; the engine keeps no entity state between calls.

use serde::{Deserialize, Serialize};

/// A function parameter, in source declaration order.
///
/// Variadic parameters carry a `*` (positional) or `**` (keyword) prefix on
/// the name. Default values are raw source text, never evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    /// Raw annotation text (e.g. `int`, `Optional[str]`, `number`).
    pub type_annotation: Option<String>,
    /// Raw default-value text (e.g. `"Hello"`, `0`).
    pub default_value: Option<String>,
}

impl Parameter {
    pub fn bare(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_annotation: None,
            default_value: None,
        }
    }
}

/// Which lexical scope a variable was declared in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableScope {
    /// Module top level.
    ModuleGlobal,
    /// Declared directly in a class body, or assigned on a self/this
    /// receiver inside a method.
    ClassAttribute,
    /// Local to a function body.
    FunctionLocal,
}

/// A variable definition or assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    /// Raw right-hand-side text.
    pub value: Option<String>,
    /// Raw annotation text for annotated assignments.
    pub type_annotation: Option<String>,
    pub scope: VariableScope,
    /// 1-based line of the defining occurrence.
    pub defined_at_line: u32,
    /// Name of the enclosing function or class, if any.
    pub parent_scope: Option<String>,
}

/// A deduplicated call site inside a function body.
///
/// The callee is an unresolved symbolic name: calls through a receiver keep
/// only the trailing segment, so `self.log(..)` and `other.log(..)` are
/// indistinguishable. Call count and order are intentionally not preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallSite {
    pub callee: String,
    /// Best-effort call line; falls back to the calling function's start
    /// line when the site is unknown.
    pub line: u32,
}

/// A function or method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Function {
    pub name: String,
    pub start_line: u32,
    /// Derived from the body span, falling back to the declaration span.
    /// Never before `start_line`.
    pub end_line: u32,
    /// Ordered as declared in source.
    pub parameters: Vec<Parameter>,
    /// Present only when the first body statement is a bare string literal.
    pub docstring: Option<String>,
    /// Raw body text by byte span.
    pub body: Option<String>,
    /// Function-local variables, first definition wins.
    pub variables: Vec<Variable>,
    /// Deduplicated callees, sorted by name.
    pub calls: Vec<CallSite>,
}

/// A class with its attributes and methods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Class {
    pub name: String,
    pub start_line: u32,
    pub end_line: u32,
    pub docstring: Option<String>,
    /// Raw body text by byte span.
    pub body: Option<String>,
    /// Variables declared directly in the class body. Variables inside
    /// methods are never attributed here.
    pub attributes: Vec<Variable>,
    /// Methods from the body's direct children, one nesting level only.
    pub methods: Vec<Function>,
}

/// Whether the parse tree contained malformed regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseStatus {
    /// The whole file parsed without error nodes.
    Clean,
    /// One or more subtrees were malformed and skipped; everything else was
    /// extracted normally.
    Partial,
}

/// A recovered, non-fatal problem encountered during extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// 1-based line of the offending region.
    pub line: u32,
    pub message: String,
}

impl Diagnostic {
    pub fn new(line: u32, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

/// Aggregated extraction result for one file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub file_path: String,
    /// Bare string literal opening the module, if any.
    pub module_docstring: Option<String>,
    pub top_level_variables: Vec<Variable>,
    pub functions: Vec<Function>,
    pub classes: Vec<Class>,
}

impl AnalysisResult {
    pub fn new(file_path: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            ..Default::default()
        }
    }
}

/// What one `analyze` call produced.
#[derive(Debug)]
pub struct AnalysisOutcome {
    /// Identifier of the persisted file row.
    pub file_id: i64,
    /// Extracted entities. Empty apart from the path on a cache hit.
    pub result: AnalysisResult,
    /// True when the stored checksum matched and extraction was skipped.
    /// Previously persisted entities are not reloaded.
    pub cache_hit: bool,
    pub status: ParseStatus,
    /// Recovered problems (skipped malformed subtrees and the like).
    pub diagnostics: Vec<Diagnostic>,
}
