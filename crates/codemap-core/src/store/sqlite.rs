//! SQLite persistence backend.
//!
//! Uses rusqlite with bundled SQLite and an embedded schema. Foreign keys
//! are switched on so removing a file row cascades through classes,
//! functions, parameters, variables and call edges.

use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{
    function_signature, AnalysisStore, CallEdgeRecord, ClassRecord, FileRecord, FunctionRecord,
    ParameterRecord, StoreError, VariableOwner, VariableRecord,
};
use crate::model::{Class, Function, Parameter, Variable, VariableScope};

const SCHEMA: &str = include_str!("schema.sql");

/// SQLite-backed [`AnalysisStore`].
///
/// Wraps the connection in a `Mutex` so a single store can be shared across
/// engine instances; writes serialize through the lock.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) a database at the given path.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.busy_timeout(std::time::Duration::from_secs(5))?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().expect("SqliteStore mutex poisoned")
    }
}

fn owner_columns(owner: VariableOwner) -> (Option<i64>, Option<i64>, Option<i64>) {
    match owner {
        VariableOwner::File(id) => (Some(id), None, None),
        VariableOwner::Class(id) => (None, Some(id), None),
        VariableOwner::Function(id) => (None, None, Some(id)),
    }
}

fn scope_flags(scope: VariableScope) -> (bool, bool, bool) {
    match scope {
        VariableScope::ModuleGlobal => (true, false, false),
        VariableScope::ClassAttribute => (false, true, false),
        VariableScope::FunctionLocal => (false, false, true),
    }
}

fn function_from_row(row: &Row<'_>) -> rusqlite::Result<FunctionRecord> {
    Ok(FunctionRecord {
        id: row.get(0)?,
        file_id: row.get(1)?,
        class_id: row.get(2)?,
        name: row.get(3)?,
        start_line: row.get(4)?,
        end_line: row.get(5)?,
        docstring: row.get(6)?,
        body: row.get(7)?,
        signature: row.get(8)?,
    })
}

fn variable_from_row(row: &Row<'_>) -> rusqlite::Result<VariableRecord> {
    let file_id: Option<i64> = row.get(1)?;
    let class_id: Option<i64> = row.get(2)?;
    let function_id: Option<i64> = row.get(3)?;
    let is_global: bool = row.get(7)?;
    let is_class_attribute: bool = row.get(8)?;

    let owner = if let Some(id) = function_id {
        VariableOwner::Function(id)
    } else if let Some(id) = class_id {
        VariableOwner::Class(id)
    } else {
        VariableOwner::File(file_id.unwrap_or_default())
    };
    let scope = if is_global {
        VariableScope::ModuleGlobal
    } else if is_class_attribute {
        VariableScope::ClassAttribute
    } else {
        VariableScope::FunctionLocal
    };

    Ok(VariableRecord {
        id: row.get(0)?,
        owner,
        name: row.get(4)?,
        value: row.get(5)?,
        type_annotation: row.get(6)?,
        scope,
        defined_at_line: row.get(10)?,
    })
}

impl AnalysisStore for SqliteStore {
    fn insert_file(
        &self,
        path: &str,
        analyzed_at: DateTime<Utc>,
        checksum: &str,
        content: &str,
    ) -> Result<i64, StoreError> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO files (path, analyzed_at, checksum, content) VALUES (?1, ?2, ?3, ?4)",
            params![path, analyzed_at.to_rfc3339(), checksum, content],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn get_file_by_path(&self, path: &str) -> Result<Option<FileRecord>, StoreError> {
        let conn = self.conn();
        let row = conn
            .query_row(
                "SELECT id, path, analyzed_at, checksum, content FROM files WHERE path = ?1",
                params![path],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, String>(4)?,
                    ))
                },
            )
            .optional()?;

        row.map(|(id, path, analyzed_at, checksum, content)| {
            let analyzed_at = DateTime::parse_from_rfc3339(&analyzed_at)
                .map_err(|e| StoreError::Backend(format!("bad timestamp for {path}: {e}")))?
                .with_timezone(&Utc);
            Ok(FileRecord {
                id,
                path,
                analyzed_at,
                checksum,
                content,
            })
        })
        .transpose()
    }

    fn remove_file(&self, path: &str) -> Result<(), StoreError> {
        self.conn()
            .execute("DELETE FROM files WHERE path = ?1", params![path])?;
        Ok(())
    }

    fn insert_class(&self, file_id: i64, class: &Class) -> Result<i64, StoreError> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO classes (file_id, name, start_line, end_line, docstring, body)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                file_id,
                class.name,
                class.start_line,
                class.end_line,
                class.docstring,
                class.body,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn insert_function(
        &self,
        file_id: i64,
        class_id: Option<i64>,
        function: &Function,
    ) -> Result<i64, StoreError> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO functions (file_id, class_id, name, start_line, end_line, docstring, body, signature)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                file_id,
                class_id,
                function.name,
                function.start_line,
                function.end_line,
                function.docstring,
                function.body,
                function_signature(function),
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn insert_parameter(&self, function_id: i64, parameter: &Parameter) -> Result<i64, StoreError> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO parameters (function_id, name, type_annotation, default_value)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                function_id,
                parameter.name,
                parameter.type_annotation,
                parameter.default_value,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn insert_variable(&self, owner: VariableOwner, variable: &Variable) -> Result<i64, StoreError> {
        let (file_id, class_id, function_id) = owner_columns(owner);
        let (is_global, is_class_attribute, is_function_local) = scope_flags(variable.scope);
        let conn = self.conn();
        conn.execute(
            "INSERT INTO variables (file_id, class_id, function_id, name, value, type_annotation,
                                    is_global, is_class_attribute, is_function_local, defined_at_line)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                file_id,
                class_id,
                function_id,
                variable.name,
                variable.value,
                variable.type_annotation,
                is_global,
                is_class_attribute,
                is_function_local,
                variable.defined_at_line,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn insert_call_edge(
        &self,
        function_id: i64,
        callee: &str,
        line: u32,
    ) -> Result<i64, StoreError> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO call_edges (function_id, callee, line) VALUES (?1, ?2, ?3)",
            params![function_id, callee, line],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn classes_for_file(&self, file_id: i64) -> Result<Vec<ClassRecord>, StoreError> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT id, file_id, name, start_line, end_line, docstring, body
             FROM classes WHERE file_id = ?1 ORDER BY id",
        )?;
        let rows = stmt.query_map(params![file_id], |row| {
            Ok(ClassRecord {
                id: row.get(0)?,
                file_id: row.get(1)?,
                name: row.get(2)?,
                start_line: row.get(3)?,
                end_line: row.get(4)?,
                docstring: row.get(5)?,
                body: row.get(6)?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn functions_for_file(&self, file_id: i64) -> Result<Vec<FunctionRecord>, StoreError> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT id, file_id, class_id, name, start_line, end_line, docstring, body, signature
             FROM functions WHERE file_id = ?1 AND class_id IS NULL ORDER BY id",
        )?;
        let rows = stmt.query_map(params![file_id], function_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn methods_for_class(&self, class_id: i64) -> Result<Vec<FunctionRecord>, StoreError> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT id, file_id, class_id, name, start_line, end_line, docstring, body, signature
             FROM functions WHERE class_id = ?1 ORDER BY id",
        )?;
        let rows = stmt.query_map(params![class_id], function_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn parameters_for_function(
        &self,
        function_id: i64,
    ) -> Result<Vec<ParameterRecord>, StoreError> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT id, function_id, name, type_annotation, default_value
             FROM parameters WHERE function_id = ?1 ORDER BY id",
        )?;
        let rows = stmt.query_map(params![function_id], |row| {
            Ok(ParameterRecord {
                id: row.get(0)?,
                function_id: row.get(1)?,
                name: row.get(2)?,
                type_annotation: row.get(3)?,
                default_value: row.get(4)?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn variables_for_owner(&self, owner: VariableOwner) -> Result<Vec<VariableRecord>, StoreError> {
        let (column, id) = match owner {
            VariableOwner::File(id) => ("file_id", id),
            VariableOwner::Class(id) => ("class_id", id),
            VariableOwner::Function(id) => ("function_id", id),
        };
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT id, file_id, class_id, function_id, name, value, type_annotation,
                    is_global, is_class_attribute, is_function_local, defined_at_line
             FROM variables WHERE {column} = ?1 ORDER BY id"
        ))?;
        let rows = stmt.query_map(params![id], variable_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn call_edges_for_function(
        &self,
        function_id: i64,
    ) -> Result<Vec<CallEdgeRecord>, StoreError> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT id, function_id, callee, line
             FROM call_edges WHERE function_id = ?1 ORDER BY id",
        )?;
        let rows = stmt.query_map(params![function_id], |row| {
            Ok(CallEdgeRecord {
                id: row.get(0)?,
                function_id: row.get(1)?,
                callee: row.get(2)?,
                line: row.get(3)?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }
}
