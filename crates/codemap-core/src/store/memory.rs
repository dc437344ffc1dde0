//! In-memory persistence backend.
//!
//! Mirrors the relational backend's semantics (auto-assigned ids, unique
//! paths, cascade delete) without a database. Used as the test double and
//! for callers that only want the in-memory [`crate::model::AnalysisResult`].

use std::sync::Mutex;

use chrono::{DateTime, Utc};

use super::{
    function_signature, AnalysisStore, CallEdgeRecord, ClassRecord, FileRecord, FunctionRecord,
    ParameterRecord, StoreError, VariableOwner, VariableRecord,
};
use crate::model::{Class, Function, Parameter, Variable};

#[derive(Default)]
struct Inner {
    files: Vec<FileRecord>,
    classes: Vec<ClassRecord>,
    functions: Vec<FunctionRecord>,
    parameters: Vec<ParameterRecord>,
    variables: Vec<VariableRecord>,
    call_edges: Vec<CallEdgeRecord>,
    next_id: i64,
}

impl Inner {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// In-memory [`AnalysisStore`].
#[derive(Default)]
pub struct InMemoryStore {
    inner: Mutex<Inner>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn inner(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().expect("InMemoryStore mutex poisoned")
    }
}

impl AnalysisStore for InMemoryStore {
    fn insert_file(
        &self,
        path: &str,
        analyzed_at: DateTime<Utc>,
        checksum: &str,
        content: &str,
    ) -> Result<i64, StoreError> {
        let mut inner = self.inner();
        if inner.files.iter().any(|f| f.path == path) {
            return Err(StoreError::Backend(format!(
                "file path already exists: {path}"
            )));
        }
        let id = inner.next_id();
        inner.files.push(FileRecord {
            id,
            path: path.to_string(),
            analyzed_at,
            checksum: checksum.to_string(),
            content: content.to_string(),
        });
        Ok(id)
    }

    fn get_file_by_path(&self, path: &str) -> Result<Option<FileRecord>, StoreError> {
        Ok(self.inner().files.iter().find(|f| f.path == path).cloned())
    }

    fn remove_file(&self, path: &str) -> Result<(), StoreError> {
        let mut inner = self.inner();
        let Some(pos) = inner.files.iter().position(|f| f.path == path) else {
            return Ok(());
        };
        let file_id = inner.files[pos].id;
        inner.files.remove(pos);

        // Cascade: classes and functions under the file, then their children.
        let class_ids: Vec<i64> = inner
            .classes
            .iter()
            .filter(|c| c.file_id == file_id)
            .map(|c| c.id)
            .collect();
        inner.classes.retain(|c| c.file_id != file_id);
        let function_ids: Vec<i64> = inner
            .functions
            .iter()
            .filter(|f| f.file_id == file_id)
            .map(|f| f.id)
            .collect();
        inner.functions.retain(|f| f.file_id != file_id);

        inner
            .parameters
            .retain(|p| !function_ids.contains(&p.function_id));
        inner
            .call_edges
            .retain(|c| !function_ids.contains(&c.function_id));
        inner.variables.retain(|v| match v.owner {
            VariableOwner::File(id) => id != file_id,
            VariableOwner::Class(id) => !class_ids.contains(&id),
            VariableOwner::Function(id) => !function_ids.contains(&id),
        });
        Ok(())
    }

    fn insert_class(&self, file_id: i64, class: &Class) -> Result<i64, StoreError> {
        let mut inner = self.inner();
        let id = inner.next_id();
        inner.classes.push(ClassRecord {
            id,
            file_id,
            name: class.name.clone(),
            start_line: class.start_line,
            end_line: class.end_line,
            docstring: class.docstring.clone(),
            body: class.body.clone(),
        });
        Ok(id)
    }

    fn insert_function(
        &self,
        file_id: i64,
        class_id: Option<i64>,
        function: &Function,
    ) -> Result<i64, StoreError> {
        let mut inner = self.inner();
        let id = inner.next_id();
        inner.functions.push(FunctionRecord {
            id,
            file_id,
            class_id,
            name: function.name.clone(),
            start_line: function.start_line,
            end_line: function.end_line,
            docstring: function.docstring.clone(),
            body: function.body.clone(),
            signature: function_signature(function),
        });
        Ok(id)
    }

    fn insert_parameter(&self, function_id: i64, parameter: &Parameter) -> Result<i64, StoreError> {
        let mut inner = self.inner();
        let id = inner.next_id();
        inner.parameters.push(ParameterRecord {
            id,
            function_id,
            name: parameter.name.clone(),
            type_annotation: parameter.type_annotation.clone(),
            default_value: parameter.default_value.clone(),
        });
        Ok(id)
    }

    fn insert_variable(&self, owner: VariableOwner, variable: &Variable) -> Result<i64, StoreError> {
        let mut inner = self.inner();
        let id = inner.next_id();
        inner.variables.push(VariableRecord {
            id,
            owner,
            name: variable.name.clone(),
            value: variable.value.clone(),
            type_annotation: variable.type_annotation.clone(),
            scope: variable.scope,
            defined_at_line: variable.defined_at_line,
        });
        Ok(id)
    }

    fn insert_call_edge(
        &self,
        function_id: i64,
        callee: &str,
        line: u32,
    ) -> Result<i64, StoreError> {
        let mut inner = self.inner();
        let id = inner.next_id();
        inner.call_edges.push(CallEdgeRecord {
            id,
            function_id,
            callee: callee.to_string(),
            line,
        });
        Ok(id)
    }

    fn classes_for_file(&self, file_id: i64) -> Result<Vec<ClassRecord>, StoreError> {
        Ok(self
            .inner()
            .classes
            .iter()
            .filter(|c| c.file_id == file_id)
            .cloned()
            .collect())
    }

    fn functions_for_file(&self, file_id: i64) -> Result<Vec<FunctionRecord>, StoreError> {
        Ok(self
            .inner()
            .functions
            .iter()
            .filter(|f| f.file_id == file_id && f.class_id.is_none())
            .cloned()
            .collect())
    }

    fn methods_for_class(&self, class_id: i64) -> Result<Vec<FunctionRecord>, StoreError> {
        Ok(self
            .inner()
            .functions
            .iter()
            .filter(|f| f.class_id == Some(class_id))
            .cloned()
            .collect())
    }

    fn parameters_for_function(
        &self,
        function_id: i64,
    ) -> Result<Vec<ParameterRecord>, StoreError> {
        Ok(self
            .inner()
            .parameters
            .iter()
            .filter(|p| p.function_id == function_id)
            .cloned()
            .collect())
    }

    fn variables_for_owner(&self, owner: VariableOwner) -> Result<Vec<VariableRecord>, StoreError> {
        Ok(self
            .inner()
            .variables
            .iter()
            .filter(|v| v.owner == owner)
            .cloned()
            .collect())
    }

    fn call_edges_for_function(
        &self,
        function_id: i64,
    ) -> Result<Vec<CallEdgeRecord>, StoreError> {
        Ok(self
            .inner()
            .call_edges
            .iter()
            .filter(|c| c.function_id == function_id)
            .cloned()
            .collect())
    }
}
