//! Traversal engine: scope-sensitive extraction over tree-sitter trees.
//!
//! One parametrized engine serves every supported language; all dialect
//! differences live in the [`Grammar`] table. The engine walks the concrete
//! syntax tree with explicit work stacks (no unbounded recursion), skips
//! malformed subtrees individually, and issues persistence calls in
//! parent-before-child order once extraction is complete.

use std::collections::{BTreeMap, HashSet};

use chrono::Utc;
use tracing::{debug, warn};
use tree_sitter::{Node, Parser as TsParser, Tree};

use crate::error::AnalyzerError;
use crate::fingerprint;
use crate::grammar::{Grammar, NodeClass, ParamShape};
use crate::model::{
    AnalysisOutcome, AnalysisResult, CallSite, Class, Diagnostic, Function, Parameter,
    ParseStatus, Variable, VariableScope,
};
use crate::store::{AnalysisStore, StoreError, VariableOwner};

/// States of one analysis run, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunState {
    NotStarted,
    Parsing,
    ParseErrorPartial,
    Parsed,
    Extracting,
    Persisting,
    Done,
}

/// Result of the pure extraction pass, before persistence.
#[derive(Debug)]
pub struct Extraction {
    pub result: AnalysisResult,
    pub status: ParseStatus,
    pub diagnostics: Vec<Diagnostic>,
}

/// Language-aware extraction engine.
///
/// Holds only immutable configuration (the grammar table); instances are
/// stateless between calls, so distinct instances may process distinct files
/// concurrently as long as the store serializes writes.
pub struct Analyzer {
    grammar: Grammar,
}

impl Analyzer {
    /// Create an engine for a language plus an optional extension/dialect
    /// hint (e.g. `"javascript"` with hint `"ts"` selects TypeScript).
    ///
    /// Fails fast when the language is unsupported or its grammar cannot be
    /// loaded; no partial engine is constructed.
    pub fn new(language: &str, extension_hint: Option<&str>) -> Result<Self, AnalyzerError> {
        let grammar = Grammar::select(language, extension_hint)?;
        // Probe the grammar once so version mismatches fail at init.
        let mut parser = TsParser::new();
        parser
            .set_language(grammar.language())
            .map_err(|e| AnalyzerError::Grammar {
                language: grammar.name().to_string(),
                message: e.to_string(),
            })?;
        debug!(grammar = grammar.name(), "analyzer initialized");
        Ok(Self { grammar })
    }

    /// The resolved dialect name (`"Python"`, `"JavaScript"`, `"TypeScript"`).
    pub fn grammar_name(&self) -> &'static str {
        self.grammar.name()
    }

    /// Fingerprint-guarded analysis of one file, persisted through `store`.
    ///
    /// - unknown path: insert a file row, extract and persist everything;
    /// - known path, changed checksum: remove the stale file row (the store
    ///   cascades over its children), then re-insert and re-extract;
    /// - known path, matching checksum: skip extraction and return the
    ///   existing file id with a `cache_hit` outcome carrying no entities.
    pub fn analyze(
        &self,
        store: &dyn AnalysisStore,
        path: &str,
        source: &str,
    ) -> Result<AnalysisOutcome, AnalyzerError> {
        debug!(path, state = ?RunState::NotStarted, "analysis started");
        let checksum = fingerprint::checksum(source);

        let mut stale = false;
        if let Some(existing) = store.get_file_by_path(path)? {
            if existing.checksum == checksum {
                debug!(path, file_id = existing.id, "checksum unchanged, skipping extraction");
                return Ok(AnalysisOutcome {
                    file_id: existing.id,
                    result: AnalysisResult::new(path),
                    cache_hit: true,
                    status: ParseStatus::Clean,
                    diagnostics: Vec::new(),
                });
            }
            stale = true;
        }

        // Extract before touching stored rows, so a failed pass leaves the
        // previous snapshot in place.
        let extraction = self.extract(path, source)?;

        if stale {
            debug!(path, "content changed, removing stale rows");
            store.remove_file(path)?;
        }

        debug!(path, state = ?RunState::Persisting, "persisting entities");
        let file_id = store.insert_file(path, Utc::now(), &checksum, source)?;
        self.persist(store, file_id, &extraction.result)?;

        debug!(path, file_id, state = ?RunState::Done, "analysis complete");
        Ok(AnalysisOutcome {
            file_id,
            result: extraction.result,
            cache_hit: false,
            status: extraction.status,
            diagnostics: extraction.diagnostics,
        })
    }

    /// Pure extraction pass: parse and build the entity model without
    /// touching any store.
    pub fn extract(&self, path: &str, source: &str) -> Result<Extraction, AnalyzerError> {
        debug!(path, state = ?RunState::Parsing, "parsing");
        let tree = self.parse_tree(path, source)?;
        let root = tree.root_node();

        let status = if root.has_error() {
            debug!(path, state = ?RunState::ParseErrorPartial, "tree contains malformed regions");
            ParseStatus::Partial
        } else {
            debug!(path, state = ?RunState::Parsed, "parsed cleanly");
            ParseStatus::Clean
        };

        debug!(path, state = ?RunState::Extracting, "extracting entities");
        let mut diagnostics = Vec::new();
        let mut result = AnalysisResult::new(path);
        result.module_docstring = self.detect_docstring(root, source);
        result.top_level_variables = self.collect_variables(
            root,
            source,
            VariableScope::ModuleGlobal,
            None,
            &mut diagnostics,
        );

        let mut cursor = root.walk();
        for child in root.named_children(&mut cursor) {
            if self.skip_fragment(child, source, &mut diagnostics) {
                continue;
            }
            match self.grammar.classify(child.kind()) {
                NodeClass::FunctionDef => {
                    if let Some(func) = self.extract_function(child, source, &mut diagnostics) {
                        result.functions.push(func);
                    }
                }
                NodeClass::ClassDef => {
                    if let Some(class) = self.extract_class(child, source, &mut diagnostics) {
                        result.classes.push(class);
                    }
                }
                NodeClass::VariableDeclaration if self.grammar.promotes_arrow_bindings => {
                    let mut decl_cursor = child.walk();
                    for declarator in child.named_children(&mut decl_cursor) {
                        if self.grammar.classify(declarator.kind()) != NodeClass::VariableDeclarator
                        {
                            continue;
                        }
                        if let Some(func) =
                            self.extract_arrow_binding(declarator, source, &mut diagnostics)
                        {
                            result.functions.push(func);
                        }
                    }
                }
                _ => {}
            }
        }

        // The variable walk and the declaration loop can both visit one
        // malformed top-level region; report it once, in line order.
        diagnostics.sort_by(|a, b| a.line.cmp(&b.line).then_with(|| a.message.cmp(&b.message)));
        diagnostics.dedup();

        Ok(Extraction {
            result,
            status,
            diagnostics,
        })
    }

    fn parse_tree(&self, path: &str, source: &str) -> Result<Tree, AnalyzerError> {
        let mut parser = TsParser::new();
        parser
            .set_language(self.grammar.language())
            .map_err(|e| AnalyzerError::Grammar {
                language: self.grammar.name().to_string(),
                message: e.to_string(),
            })?;
        parser.parse(source, None).ok_or_else(|| AnalyzerError::Parse {
            path: path.to_string(),
            message: "parser produced no tree".to_string(),
        })
    }

    /// Record and skip an unparseable fragment. Siblings continue normally;
    /// a whole file is never abandoned because of one bad region.
    fn skip_fragment(&self, node: Node<'_>, source: &str, diagnostics: &mut Vec<Diagnostic>) -> bool {
        if !node.is_error() && !node.is_missing() {
            return false;
        }
        let line = node_line(node);
        let preview: String = node_text(node, source).chars().take(40).collect();
        warn!(line, preview = preview.as_str(), "skipping malformed region");
        diagnostics.push(Diagnostic::new(
            line,
            format!("skipped malformed region: {preview}"),
        ));
        true
    }

    // ------------------------------------------------------------------
    // Functions
    // ------------------------------------------------------------------

    fn extract_function(
        &self,
        node: Node<'_>,
        source: &str,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Option<Function> {
        // Unnamed definitions are discarded, not an error.
        let name_node = node.child_by_field_name("name")?;
        let name = node_text(name_node, source).to_string();
        let body = node.child_by_field_name("body");

        self.build_function(node, name, node, body, source, diagnostics)
    }

    /// `const f = () => ...` / `const f = function () ...` at module level.
    fn extract_arrow_binding(
        &self,
        declarator: Node<'_>,
        source: &str,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Option<Function> {
        let value = declarator.child_by_field_name("value")?;
        if self.grammar.classify(value.kind()) != NodeClass::Lambda {
            return None;
        }
        let name_node = declarator.child_by_field_name("name")?;
        let name = node_text(name_node, source).to_string();
        let body = value.child_by_field_name("body");

        self.build_function(declarator, name, value, body, source, diagnostics)
    }

    /// Shared assembly: `decl` spans the whole declaration, `carrier` is the
    /// node holding the parameter list (differs for arrow bindings).
    fn build_function(
        &self,
        decl: Node<'_>,
        name: String,
        carrier: Node<'_>,
        body: Option<Node<'_>>,
        source: &str,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Option<Function> {
        let start_line = node_line(decl);
        let end_line = body
            .map(node_end_line)
            .unwrap_or_else(|| node_end_line(decl))
            .max(start_line);

        let parameters = self.extract_parameters(carrier, source);
        let docstring = body.and_then(|b| self.detect_docstring(b, source));
        let body_text = body.map(|b| node_text(b, source).to_string());

        let mut variables = body
            .map(|b| {
                self.collect_variables(
                    b,
                    source,
                    VariableScope::FunctionLocal,
                    Some(&name),
                    diagnostics,
                )
            })
            .unwrap_or_default();
        // Parameters shadow same-named locals. Receiver-attribute records
        // (`self.balance = balance`) keep their entries even when the
        // attribute shares a parameter's name.
        let param_names: HashSet<&str> = parameters
            .iter()
            .map(|p| p.name.trim_start_matches('*'))
            .collect();
        variables.retain(|v| {
            v.scope == VariableScope::ClassAttribute || !param_names.contains(v.name.as_str())
        });

        let calls = body
            .map(|b| self.collect_calls(b, source, diagnostics))
            .unwrap_or_default();

        Some(Function {
            name,
            start_line,
            end_line,
            parameters,
            docstring,
            body: body_text,
            variables,
            calls,
        })
    }

    // ------------------------------------------------------------------
    // Parameters
    // ------------------------------------------------------------------

    fn extract_parameters(&self, func_node: Node<'_>, source: &str) -> Vec<Parameter> {
        let Some(params_node) = func_node.child_by_field_name("parameters") else {
            // Single bare parameter of an arrow function: `x => ...`
            if let Some(single) = func_node.child_by_field_name("parameter") {
                if self.grammar.classify(single.kind()) == NodeClass::Identifier {
                    return vec![Parameter::bare(node_text(single, source))];
                }
            }
            return Vec::new();
        };

        let mut parameters = Vec::new();
        let mut cursor = params_node.walk();
        for child in params_node.named_children(&mut cursor) {
            let Some(shape) = self.grammar.param_shape(child.kind()) else {
                // Punctuation, comments, separators, unknown kinds.
                continue;
            };
            if let Some(parameter) = self.extract_one_parameter(child, shape, source) {
                parameters.push(parameter);
            }
        }
        parameters
    }

    fn extract_one_parameter(
        &self,
        node: Node<'_>,
        shape: ParamShape,
        source: &str,
    ) -> Option<Parameter> {
        match shape {
            ParamShape::Bare => Some(Parameter::bare(node_text(node, source))),
            ParamShape::VariadicPositional | ParamShape::VariadicKeyword => {
                let inner = first_identifier_child(node, &self.grammar)?;
                Some(Parameter::bare(format!(
                    "{}{}",
                    shape.name_prefix(),
                    node_text(inner, source)
                )))
            }
            ParamShape::WithDefault | ParamShape::Typed | ParamShape::TypedDefault => {
                let name_node = node
                    .child_by_field_name("name")
                    .or_else(|| node.child_by_field_name("pattern"))
                    .or_else(|| node.child_by_field_name("left"))
                    .or_else(|| first_identifier_child(node, &self.grammar))?;

                // TypeScript rest parameters nest a rest_pattern inside
                // required_parameter.
                let (prefix, name_node) = if self.grammar.param_shape(name_node.kind())
                    == Some(ParamShape::VariadicPositional)
                {
                    ("*", first_identifier_child(name_node, &self.grammar)?)
                } else {
                    ("", name_node)
                };

                let type_annotation = node.child_by_field_name("type").map(|t| {
                    node_text(t, source)
                        .trim_start_matches(':')
                        .trim()
                        .to_string()
                });
                let default_value = node
                    .child_by_field_name("value")
                    .or_else(|| node.child_by_field_name("right"))
                    .map(|v| node_text(v, source).to_string());

                Some(Parameter {
                    name: format!("{prefix}{}", node_text(name_node, source)),
                    type_annotation,
                    default_value,
                })
            }
        }
    }

    // ------------------------------------------------------------------
    // Variables
    // ------------------------------------------------------------------

    /// Work-stack walk of one scope's statements. Descends through control
    /// flow but never past function/class/lambda boundaries, so inner-scope
    /// variables cannot leak outward. First definition of a name wins.
    fn collect_variables(
        &self,
        scope_node: Node<'_>,
        source: &str,
        scope: VariableScope,
        parent_scope: Option<&str>,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Vec<Variable> {
        let mut variables = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut stack: Vec<Node<'_>> = Vec::new();
        push_named_children(scope_node, &mut stack);

        while let Some(node) = stack.pop() {
            if self.skip_fragment(node, source, diagnostics) {
                continue;
            }
            let class = self.grammar.classify(node.kind());
            if class.is_scope_boundary() {
                continue;
            }
            match class {
                NodeClass::Assignment => {
                    if let Some(variable) =
                        self.variable_from_assignment(node, source, scope, parent_scope)
                    {
                        if seen.insert(variable.name.clone()) {
                            variables.push(variable);
                        }
                    }
                    // The assignment itself is handled; its right-hand side
                    // is not a declaration site.
                }
                NodeClass::VariableDeclaration => {
                    let mut cursor = node.walk();
                    for declarator in node.named_children(&mut cursor) {
                        if self.grammar.classify(declarator.kind()) != NodeClass::VariableDeclarator
                        {
                            continue;
                        }
                        if let Some(variable) =
                            self.variable_from_declarator(declarator, source, scope, parent_scope)
                        {
                            if seen.insert(variable.name.clone()) {
                                variables.push(variable);
                            }
                        }
                    }
                }
                NodeClass::ClassField => {
                    if scope == VariableScope::ClassAttribute {
                        if let Some(variable) =
                            self.variable_from_class_field(node, source, parent_scope)
                        {
                            if seen.insert(variable.name.clone()) {
                                variables.push(variable);
                            }
                        }
                    }
                }
                _ => push_named_children(node, &mut stack),
            }
        }
        variables
    }

    fn variable_from_assignment(
        &self,
        node: Node<'_>,
        source: &str,
        scope: VariableScope,
        parent_scope: Option<&str>,
    ) -> Option<Variable> {
        let left = node.child_by_field_name("left")?;
        let (name_node, scope) = match self.grammar.classify(left.kind()) {
            NodeClass::Identifier => (left, scope),
            NodeClass::MemberAccess => {
                // Only self/this receivers count, recorded as instance
                // attributes.
                let object = left.child_by_field_name("object")?;
                if node_text(object, source) != self.grammar.self_receiver {
                    return None;
                }
                let attr = left.child_by_field_name(self.grammar.member_name_field)?;
                (attr, VariableScope::ClassAttribute)
            }
            _ => return None,
        };

        let type_annotation = node.child_by_field_name("type").map(|t| {
            node_text(t, source)
                .trim_start_matches(':')
                .trim()
                .to_string()
        });
        let value = node
            .child_by_field_name("right")
            .map(|v| node_text(v, source).to_string());

        Some(Variable {
            name: node_text(name_node, source).to_string(),
            value,
            type_annotation,
            scope,
            defined_at_line: node_line(name_node),
            parent_scope: parent_scope.map(|s| s.to_string()),
        })
    }

    fn variable_from_declarator(
        &self,
        declarator: Node<'_>,
        source: &str,
        scope: VariableScope,
        parent_scope: Option<&str>,
    ) -> Option<Variable> {
        let name_node = declarator.child_by_field_name("name")?;
        if self.grammar.classify(name_node.kind()) != NodeClass::Identifier {
            // Destructuring patterns are out of scope.
            return None;
        }
        let value = declarator.child_by_field_name("value");
        if let Some(v) = value {
            // Function bindings are promoted to functions, not variables.
            if self.grammar.classify(v.kind()) == NodeClass::Lambda {
                return None;
            }
        }
        let type_annotation = declarator.child_by_field_name("type").map(|t| {
            node_text(t, source)
                .trim_start_matches(':')
                .trim()
                .to_string()
        });
        if value.is_none() && type_annotation.is_none() {
            return None;
        }

        Some(Variable {
            name: node_text(name_node, source).to_string(),
            value: value.map(|v| node_text(v, source).to_string()),
            type_annotation,
            scope,
            defined_at_line: node_line(name_node),
            parent_scope: parent_scope.map(|s| s.to_string()),
        })
    }

    fn variable_from_class_field(
        &self,
        node: Node<'_>,
        source: &str,
        parent_scope: Option<&str>,
    ) -> Option<Variable> {
        let name_node = node
            .child_by_field_name("name")
            .or_else(|| node.child_by_field_name("property"))?;
        let value = node
            .child_by_field_name("value")
            .map(|v| node_text(v, source).to_string());
        let type_annotation = node.child_by_field_name("type").map(|t| {
            node_text(t, source)
                .trim_start_matches(':')
                .trim()
                .to_string()
        });

        Some(Variable {
            name: node_text(name_node, source).to_string(),
            value,
            type_annotation,
            scope: VariableScope::ClassAttribute,
            defined_at_line: node_line(name_node),
            parent_scope: parent_scope.map(|s| s.to_string()),
        })
    }

    // ------------------------------------------------------------------
    // Calls
    // ------------------------------------------------------------------

    /// Work-stack walk of a function body collecting callee names. Stops at
    /// function/class/lambda boundaries so a call is always attributed to
    /// its innermost enclosing function; continues through conditionals,
    /// loops and exception handlers. Qualified calls keep only the trailing
    /// name segment.
    fn collect_calls(
        &self,
        body: Node<'_>,
        source: &str,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Vec<CallSite> {
        let mut found: BTreeMap<String, u32> = BTreeMap::new();
        let mut stack: Vec<Node<'_>> = Vec::new();
        push_named_children(body, &mut stack);

        while let Some(node) = stack.pop() {
            if self.skip_fragment(node, source, diagnostics) {
                continue;
            }
            let class = self.grammar.classify(node.kind());
            if class.is_scope_boundary() {
                continue;
            }
            if class == NodeClass::Call {
                if let Some(callee) = node.child_by_field_name("function") {
                    let name = match self.grammar.classify(callee.kind()) {
                        NodeClass::Identifier => {
                            Some(node_text(callee, source).to_string())
                        }
                        NodeClass::MemberAccess => callee
                            .child_by_field_name(self.grammar.member_name_field)
                            .map(|n| node_text(n, source).to_string()),
                        _ => None,
                    };
                    if let Some(name) = name {
                        // Set semantics: first-seen line, no counts.
                        found.entry(name).or_insert_with(|| node_line(node));
                    }
                }
            }
            // Arguments may contain further calls.
            push_named_children(node, &mut stack);
        }

        found
            .into_iter()
            .map(|(callee, line)| CallSite { callee, line })
            .collect()
    }

    // ------------------------------------------------------------------
    // Classes
    // ------------------------------------------------------------------

    fn extract_class(
        &self,
        node: Node<'_>,
        source: &str,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Option<Class> {
        let name_node = node.child_by_field_name("name")?;
        let name = node_text(name_node, source).to_string();
        let body = node.child_by_field_name("body");

        let start_line = node_line(name_node);
        let end_line = body
            .map(node_end_line)
            .unwrap_or_else(|| node_end_line(name_node))
            .max(start_line);
        let docstring = body.and_then(|b| self.detect_docstring(b, source));
        let body_text = body.map(|b| node_text(b, source).to_string());

        // Attributes come from the class body only; method bodies are scope
        // boundaries for this walk.
        let attributes = body
            .map(|b| {
                self.collect_variables(
                    b,
                    source,
                    VariableScope::ClassAttribute,
                    Some(&name),
                    diagnostics,
                )
            })
            .unwrap_or_default();

        // Methods: direct children of the body, one nesting level. Nested
        // classes are not descended into.
        let mut methods = Vec::new();
        if let Some(b) = body {
            let mut cursor = b.walk();
            for child in b.named_children(&mut cursor) {
                if self.skip_fragment(child, source, diagnostics) {
                    continue;
                }
                if matches!(
                    self.grammar.classify(child.kind()),
                    NodeClass::FunctionDef | NodeClass::MethodDef
                ) {
                    if let Some(method) = self.extract_function(child, source, diagnostics) {
                        methods.push(method);
                    }
                }
            }
        }

        Some(Class {
            name,
            start_line,
            end_line,
            docstring,
            body: body_text,
            attributes,
            methods,
        })
    }

    // ------------------------------------------------------------------
    // Docstrings
    // ------------------------------------------------------------------

    /// A docstring exists only when the first statement of a body is a bare
    /// string-literal expression.
    fn detect_docstring(&self, body: Node<'_>, source: &str) -> Option<String> {
        let first = body.named_child(0)?;
        if self.grammar.classify(first.kind()) != NodeClass::ExpressionStatement {
            return None;
        }
        let inner = first.named_child(0)?;
        if self.grammar.classify(inner.kind()) != NodeClass::StringLiteral {
            return None;
        }
        Some(strip_string_quotes(node_text(inner, source)))
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Push one file's entities through the gateway in parent-before-child
    /// order: file, then classes, then functions, then parameters/variables/
    /// call edges. Any insert failure propagates.
    fn persist(
        &self,
        store: &dyn AnalysisStore,
        file_id: i64,
        result: &AnalysisResult,
    ) -> Result<(), StoreError> {
        for variable in &result.top_level_variables {
            store.insert_variable(VariableOwner::File(file_id), variable)?;
        }
        for function in &result.functions {
            self.persist_function(store, file_id, None, function)?;
        }
        for class in &result.classes {
            let class_id = store.insert_class(file_id, class)?;
            for attribute in &class.attributes {
                store.insert_variable(VariableOwner::Class(class_id), attribute)?;
            }
            for method in &class.methods {
                self.persist_function(store, file_id, Some(class_id), method)?;
            }
        }
        Ok(())
    }

    fn persist_function(
        &self,
        store: &dyn AnalysisStore,
        file_id: i64,
        class_id: Option<i64>,
        function: &Function,
    ) -> Result<(), StoreError> {
        let function_id = store.insert_function(file_id, class_id, function)?;
        for parameter in &function.parameters {
            store.insert_parameter(function_id, parameter)?;
        }
        for variable in &function.variables {
            store.insert_variable(VariableOwner::Function(function_id), variable)?;
        }
        for call in &function.calls {
            store.insert_call_edge(function_id, &call.callee, call.line)?;
        }
        Ok(())
    }
}

// ----------------------------------------------------------------------
// Node helpers
// ----------------------------------------------------------------------

fn node_text<'a>(node: Node<'_>, source: &'a str) -> &'a str {
    &source[node.byte_range()]
}

/// 1-based start line.
fn node_line(node: Node<'_>) -> u32 {
    node.start_position().row as u32 + 1
}

/// 1-based end line.
fn node_end_line(node: Node<'_>) -> u32 {
    node.end_position().row as u32 + 1
}

/// Push named children in reverse so the stack pops them in source order.
fn push_named_children<'t>(node: Node<'t>, stack: &mut Vec<Node<'t>>) {
    let mut cursor = node.walk();
    let children: Vec<Node<'t>> = node.named_children(&mut cursor).collect();
    stack.extend(children.into_iter().rev());
}

fn first_identifier_child<'t>(node: Node<'t>, grammar: &Grammar) -> Option<Node<'t>> {
    let mut cursor = node.walk();
    let found = node
        .named_children(&mut cursor)
        .find(|c| grammar.classify(c.kind()) == NodeClass::Identifier);
    found
}

fn strip_string_quotes(text: &str) -> String {
    text.trim_start_matches("\"\"\"")
        .trim_end_matches("\"\"\"")
        .trim_start_matches("'''")
        .trim_end_matches("'''")
        .trim_start_matches(['"', '\''])
        .trim_end_matches(['"', '\''])
        .trim()
        .to_string()
}
