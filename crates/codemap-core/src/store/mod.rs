//! Persistence gateway: the contract toward the relational store.
//!
//! The engine issues inserts in parent-before-child order (file, then class,
//! then function, then parameters/variables/call edges) so every child row
//! can reference an already-known parent identifier. That fixed ordering is
//! the only transactional guarantee the engine relies on; backends must
//! cascade-delete children when a parent row is removed.

mod error;
mod memory;
mod sqlite;

pub use error::StoreError;
pub use memory::InMemoryStore;
pub use sqlite::SqliteStore;

use chrono::{DateTime, Utc};

use crate::model::{Class, Function, Parameter, Variable, VariableScope};

/// Which parent row a variable belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableOwner {
    /// Module-level variable, scoped to a file.
    File(i64),
    /// Class attribute.
    Class(i64),
    /// Function-local variable.
    Function(i64),
}

/// A persisted file row.
#[derive(Debug, Clone)]
pub struct FileRecord {
    pub id: i64,
    pub path: String,
    pub analyzed_at: DateTime<Utc>,
    pub checksum: String,
    pub content: String,
}

/// A persisted class row.
#[derive(Debug, Clone)]
pub struct ClassRecord {
    pub id: i64,
    pub file_id: i64,
    pub name: String,
    pub start_line: u32,
    pub end_line: u32,
    pub docstring: Option<String>,
    pub body: Option<String>,
}

/// A persisted function row. `class_id` distinguishes methods from
/// top-level functions.
#[derive(Debug, Clone)]
pub struct FunctionRecord {
    pub id: i64,
    pub file_id: i64,
    pub class_id: Option<i64>,
    pub name: String,
    pub start_line: u32,
    pub end_line: u32,
    pub docstring: Option<String>,
    pub body: Option<String>,
    pub signature: String,
}

/// A persisted parameter row, ordered by id within its function.
#[derive(Debug, Clone)]
pub struct ParameterRecord {
    pub id: i64,
    pub function_id: i64,
    pub name: String,
    pub type_annotation: Option<String>,
    pub default_value: Option<String>,
}

/// A persisted variable row.
#[derive(Debug, Clone)]
pub struct VariableRecord {
    pub id: i64,
    pub owner: VariableOwner,
    pub name: String,
    pub value: Option<String>,
    pub type_annotation: Option<String>,
    pub scope: VariableScope,
    pub defined_at_line: u32,
}

/// A persisted call edge. The callee is a symbolic name, not a row id.
#[derive(Debug, Clone)]
pub struct CallEdgeRecord {
    pub id: i64,
    pub function_id: i64,
    pub callee: String,
    pub line: u32,
}

/// Contract toward the external relational store.
///
/// Backends assign identifiers on insert and must serialize concurrent
/// writes themselves; the engine is single-threaded per instance and issues
/// one file's inserts fully before the next.
pub trait AnalysisStore: Send + Sync {
    /// Insert a file row, returning its identifier. Paths are unique; the
    /// caller removes any stale row for the path first.
    fn insert_file(
        &self,
        path: &str,
        analyzed_at: DateTime<Utc>,
        checksum: &str,
        content: &str,
    ) -> Result<i64, StoreError>;

    /// Look up a file row by path.
    fn get_file_by_path(&self, path: &str) -> Result<Option<FileRecord>, StoreError>;

    /// Remove a file row and, by cascade, every class/function/parameter/
    /// variable/call-edge row under it. Removing a missing path is a no-op.
    fn remove_file(&self, path: &str) -> Result<(), StoreError>;

    fn insert_class(&self, file_id: i64, class: &Class) -> Result<i64, StoreError>;

    fn insert_function(
        &self,
        file_id: i64,
        class_id: Option<i64>,
        function: &Function,
    ) -> Result<i64, StoreError>;

    fn insert_parameter(&self, function_id: i64, parameter: &Parameter) -> Result<i64, StoreError>;

    fn insert_variable(&self, owner: VariableOwner, variable: &Variable) -> Result<i64, StoreError>;

    fn insert_call_edge(&self, function_id: i64, callee: &str, line: u32)
        -> Result<i64, StoreError>;

    /// Classes belonging to a file.
    fn classes_for_file(&self, file_id: i64) -> Result<Vec<ClassRecord>, StoreError>;

    /// Top-level functions of a file (methods excluded).
    fn functions_for_file(&self, file_id: i64) -> Result<Vec<FunctionRecord>, StoreError>;

    /// Methods of a class.
    fn methods_for_class(&self, class_id: i64) -> Result<Vec<FunctionRecord>, StoreError>;

    /// Parameters of a function, in declaration order.
    fn parameters_for_function(&self, function_id: i64)
        -> Result<Vec<ParameterRecord>, StoreError>;

    /// Variables scoped to the given owner.
    fn variables_for_owner(&self, owner: VariableOwner) -> Result<Vec<VariableRecord>, StoreError>;

    /// Call edges originating from a function.
    fn call_edges_for_function(&self, function_id: i64)
        -> Result<Vec<CallEdgeRecord>, StoreError>;
}

/// Display signature stored alongside a function row.
pub(crate) fn function_signature(function: &Function) -> String {
    let params: Vec<&str> = function.parameters.iter().map(|p| p.name.as_str()).collect();
    format!("{}({})", function.name, params.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Parameter;

    #[test]
    fn signature_joins_parameter_names() {
        let f = Function {
            name: "greet".into(),
            start_line: 1,
            end_line: 3,
            parameters: vec![Parameter::bare("name"), Parameter::bare("greeting")],
            docstring: None,
            body: None,
            variables: Vec::new(),
            calls: Vec::new(),
        };
        assert_eq!(function_signature(&f), "greet(name, greeting)");
    }
}
