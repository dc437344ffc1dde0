//! End-to-end extraction tests across the supported languages.

use codemap_core::store::{InMemoryStore, SqliteStore, VariableOwner};
use codemap_core::{Analyzer, AnalysisStore, ParseStatus, VariableScope};

fn python() -> Analyzer {
    Analyzer::new("python", None).unwrap()
}

fn javascript() -> Analyzer {
    Analyzer::new("javascript", Some("js")).unwrap()
}

fn typescript() -> Analyzer {
    Analyzer::new("typescript", None).unwrap()
}

const PYTHON_SAMPLE: &str = r#""""Bank module."""

MAX_RETRIES = 3

def greet(name, greeting="Hello"):
    """Return a greeting."""
    message = greeting + ", " + name
    print(message)
    return message

class Account:
    """A bank account."""

    currency = "USD"

    def deposit(self, amount):
        self.balance = amount
        total = self.log(amount)
        return total
"#;

#[test]
fn python_module_round_trip() {
    let extraction = python().extract("bank.py", PYTHON_SAMPLE).unwrap();
    let result = &extraction.result;

    assert_eq!(extraction.status, ParseStatus::Clean);
    assert!(extraction.diagnostics.is_empty());
    assert_eq!(result.module_docstring.as_deref(), Some("Bank module."));

    assert_eq!(result.top_level_variables.len(), 1);
    let max_retries = &result.top_level_variables[0];
    assert_eq!(max_retries.name, "MAX_RETRIES");
    assert_eq!(max_retries.value.as_deref(), Some("3"));
    assert_eq!(max_retries.scope, VariableScope::ModuleGlobal);
    assert_eq!(max_retries.defined_at_line, 3);

    assert_eq!(result.functions.len(), 1);
    let greet = &result.functions[0];
    assert_eq!(greet.name, "greet");
    assert_eq!(greet.start_line, 5);
    assert_eq!(greet.end_line, 9);
    assert_eq!(greet.docstring.as_deref(), Some("Return a greeting."));

    assert_eq!(result.classes.len(), 1);
    let account = &result.classes[0];
    assert_eq!(account.name, "Account");
    assert_eq!(account.docstring.as_deref(), Some("A bank account."));
    assert_eq!(account.attributes.len(), 1);
    assert_eq!(account.attributes[0].name, "currency");
    assert_eq!(account.attributes[0].value.as_deref(), Some("\"USD\""));
    assert_eq!(account.methods.len(), 1);
}

#[test]
fn python_parameters_keep_declaration_order() {
    let source = "def f(a, b=1, c: int = 2, *args, **kwargs):\n    pass\n";
    let extraction = python().extract("f.py", source).unwrap();
    let f = &extraction.result.functions[0];

    let names: Vec<&str> = f.parameters.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["a", "b", "c", "*args", "**kwargs"]);
    assert_eq!(f.parameters[1].default_value.as_deref(), Some("1"));
    assert_eq!(f.parameters[2].type_annotation.as_deref(), Some("int"));
    assert_eq!(f.parameters[2].default_value.as_deref(), Some("2"));
    assert!(f.parameters[3].type_annotation.is_none());
}

#[test]
fn qualified_calls_keep_trailing_name_and_dedup() {
    let source = "\
def run():
    os.path.join(a, b)
    helper()
    helper()
    self.helper()
";
    let extraction = python().extract("run.py", source).unwrap();
    let run = &extraction.result.functions[0];

    let callees: Vec<&str> = run.calls.iter().map(|c| c.callee.as_str()).collect();
    assert_eq!(callees, ["helper", "join"]);
    // First-seen line wins for duplicate names.
    let helper = run.calls.iter().find(|c| c.callee == "helper").unwrap();
    assert_eq!(helper.line, 3);
}

#[test]
fn first_variable_definition_wins() {
    let source = "def f():\n    x = 1\n    x = 2\n    y = 3\n";
    let extraction = python().extract("f.py", source).unwrap();
    let f = &extraction.result.functions[0];

    assert_eq!(f.variables.len(), 2);
    assert_eq!(f.variables[0].name, "x");
    assert_eq!(f.variables[0].value.as_deref(), Some("1"));
    assert_eq!(f.variables[1].name, "y");
}

#[test]
fn parameters_shadow_same_named_locals() {
    let source = "def f(x):\n    x = x + 1\n    y = 2\n";
    let extraction = python().extract("f.py", source).unwrap();
    let f = &extraction.result.functions[0];

    let names: Vec<&str> = f.variables.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, ["y"]);
}

#[test]
fn end_line_never_precedes_start_line() {
    let source = "def one_liner(): pass\n\ndef spanning():\n    a = 1\n    return a\n";
    let extraction = python().extract("lines.py", source).unwrap();
    for f in &extraction.result.functions {
        assert!(f.end_line >= f.start_line, "{} spans backwards", f.name);
    }
}

#[test]
fn malformed_region_does_not_abort_the_file() {
    let source = "\
def good_one():
    return 1

???

def good_two():
    return 2
";
    let extraction = python().extract("broken.py", source).unwrap();

    assert_eq!(extraction.status, ParseStatus::Partial);
    assert!(!extraction.diagnostics.is_empty());
    let names: Vec<&str> = extraction
        .result
        .functions
        .iter()
        .map(|f| f.name.as_str())
        .collect();
    assert!(names.contains(&"good_one"));
    assert!(names.contains(&"good_two"));
}

#[test]
fn inner_scope_variables_do_not_leak_outward() {
    let source = "\
TOP = 1

def outer():
    local = 2
    def inner():
        hidden = 3
    return local

class Holder:
    attr = 4

    def method(self):
        member_local = 5
";
    let extraction = python().extract("scopes.py", source).unwrap();
    let result = &extraction.result;

    let top: Vec<&str> = result
        .top_level_variables
        .iter()
        .map(|v| v.name.as_str())
        .collect();
    assert_eq!(top, ["TOP"]);

    let outer = &result.functions[0];
    let outer_vars: Vec<&str> = outer.variables.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(outer_vars, ["local"]);

    let holder = &result.classes[0];
    let attrs: Vec<&str> = holder.attributes.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(attrs, ["attr"]);
    let method_vars: Vec<&str> = holder.methods[0]
        .variables
        .iter()
        .map(|v| v.name.as_str())
        .collect();
    assert_eq!(method_vars, ["member_local"]);
}

#[test]
fn self_assignments_become_class_attributes() {
    let source = "\
class Account:
    def __init__(self, balance):
        self.balance = balance
        rate = 0.01
";
    let extraction = python().extract("account.py", source).unwrap();
    let init = &extraction.result.classes[0].methods[0];

    let balance = init.variables.iter().find(|v| v.name == "balance").unwrap();
    assert_eq!(balance.scope, VariableScope::ClassAttribute);
    let rate = init.variables.iter().find(|v| v.name == "rate").unwrap();
    assert_eq!(rate.scope, VariableScope::FunctionLocal);
}

#[test]
fn methods_come_from_one_nesting_level_only() {
    let source = "\
class Outer:
    def direct(self):
        pass

    class Nested:
        def indirect(self):
            pass
";
    let extraction = python().extract("nested.py", source).unwrap();
    let outer = &extraction.result.classes[0];

    let methods: Vec<&str> = outer.methods.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(methods, ["direct"]);
}

const JS_SAMPLE: &str = r#"const VERSION = "1.0";

const add = (a, b = 1) => a + b;

function main() {
  const total = add(2, 3);
  console.log(total);
  return total;
}

class Queue {
  limit = 10;

  push(item) {
    this.size = this.size + 1;
    return item;
  }
}
"#;

#[test]
fn javascript_arrow_bindings_become_functions() {
    let extraction = javascript().extract("app.js", JS_SAMPLE).unwrap();
    let result = &extraction.result;

    let top: Vec<&str> = result
        .top_level_variables
        .iter()
        .map(|v| v.name.as_str())
        .collect();
    assert_eq!(top, ["VERSION"]);

    let names: Vec<&str> = result.functions.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["add", "main"]);

    let add = &result.functions[0];
    assert_eq!(add.start_line, 3);
    let params: Vec<&str> = add.parameters.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(params, ["a", "b"]);
    assert_eq!(add.parameters[1].default_value.as_deref(), Some("1"));

    let main = &result.functions[1];
    let callees: Vec<&str> = main.calls.iter().map(|c| c.callee.as_str()).collect();
    assert_eq!(callees, ["add", "log"]);
    assert_eq!(main.variables[0].name, "total");
}

#[test]
fn javascript_class_fields_and_this_assignments() {
    let extraction = javascript().extract("app.js", JS_SAMPLE).unwrap();
    let queue = &extraction.result.classes[0];

    assert_eq!(queue.name, "Queue");
    assert_eq!(queue.attributes.len(), 1);
    assert_eq!(queue.attributes[0].name, "limit");
    assert_eq!(queue.attributes[0].value.as_deref(), Some("10"));

    let push = &queue.methods[0];
    assert_eq!(push.name, "push");
    let size = push.variables.iter().find(|v| v.name == "size").unwrap();
    assert_eq!(size.scope, VariableScope::ClassAttribute);
}

const TS_SAMPLE: &str = r#"function greet(name: string, title?: string, ...tags: string[]): string {
  const prefix: string = title ?? "";
  return prefix + name;
}

class Point {
  x: number = 0;

  scale(factor: number) {
    this.x = this.x * factor;
    return this.x;
  }
}
"#;

#[test]
fn typescript_parameter_annotations() {
    let extraction = typescript().extract("app.ts", TS_SAMPLE).unwrap();
    let greet = &extraction.result.functions[0];

    let names: Vec<&str> = greet.parameters.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["name", "title", "*tags"]);
    assert_eq!(greet.parameters[0].type_annotation.as_deref(), Some("string"));
    assert_eq!(greet.parameters[1].type_annotation.as_deref(), Some("string"));
    assert_eq!(greet.parameters[2].type_annotation.as_deref(), Some("string[]"));

    let prefix = &greet.variables[0];
    assert_eq!(prefix.name, "prefix");
    assert_eq!(prefix.type_annotation.as_deref(), Some("string"));
}

#[test]
fn typescript_annotated_class_fields() {
    let extraction = typescript().extract("app.ts", TS_SAMPLE).unwrap();
    let point = &extraction.result.classes[0];

    assert_eq!(point.attributes.len(), 1);
    let x = &point.attributes[0];
    assert_eq!(x.name, "x");
    assert_eq!(x.type_annotation.as_deref(), Some("number"));
    assert_eq!(x.value.as_deref(), Some("0"));

    let scale = &point.methods[0];
    assert_eq!(scale.parameters[0].type_annotation.as_deref(), Some("number"));
}

#[test]
fn analyze_persists_parent_before_child() {
    let store = InMemoryStore::new();
    let outcome = python()
        .analyze(&store, "bank.py", PYTHON_SAMPLE)
        .unwrap();
    assert!(!outcome.cache_hit);

    let file = store.get_file_by_path("bank.py").unwrap().unwrap();
    assert_eq!(file.id, outcome.file_id);
    assert_eq!(file.content, PYTHON_SAMPLE);

    let top_vars = store
        .variables_for_owner(VariableOwner::File(file.id))
        .unwrap();
    assert_eq!(top_vars.len(), 1);
    assert_eq!(top_vars[0].name, "MAX_RETRIES");

    let functions = store.functions_for_file(file.id).unwrap();
    assert_eq!(functions.len(), 1);
    assert_eq!(functions[0].signature, "greet(name, greeting)");

    let params = store.parameters_for_function(functions[0].id).unwrap();
    let names: Vec<&str> = params.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["name", "greeting"]);

    let classes = store.classes_for_file(file.id).unwrap();
    assert_eq!(classes.len(), 1);
    let methods = store.methods_for_class(classes[0].id).unwrap();
    assert_eq!(methods.len(), 1);
    assert_eq!(methods[0].name, "deposit");

    let edges = store.call_edges_for_function(methods[0].id).unwrap();
    let callees: Vec<&str> = edges.iter().map(|e| e.callee.as_str()).collect();
    assert_eq!(callees, ["log"]);
}

#[test]
fn unchanged_content_is_a_cache_hit() {
    let store = InMemoryStore::new();
    let analyzer = python();

    let first = analyzer.analyze(&store, "bank.py", PYTHON_SAMPLE).unwrap();
    let second = analyzer.analyze(&store, "bank.py", PYTHON_SAMPLE).unwrap();

    assert!(second.cache_hit);
    assert_eq!(second.file_id, first.file_id);
    assert!(second.result.functions.is_empty());
    assert!(second.result.classes.is_empty());

    // The stored entities survive the skipped pass.
    let functions = store.functions_for_file(first.file_id).unwrap();
    assert_eq!(functions.len(), 1);
}

#[test]
fn single_character_change_triggers_reanalysis() {
    let store = InMemoryStore::new();
    let analyzer = python();

    let first = analyzer.analyze(&store, "f.py", "def f():\n    x = 1\n").unwrap();
    let second = analyzer.analyze(&store, "f.py", "def f():\n    x = 2\n").unwrap();

    assert!(!second.cache_hit);
    // The stale file row and its children are gone.
    assert!(store.functions_for_file(first.file_id).unwrap().is_empty());
    let functions = store.functions_for_file(second.file_id).unwrap();
    assert_eq!(functions.len(), 1);
    let variables = store
        .variables_for_owner(VariableOwner::Function(functions[0].id))
        .unwrap();
    assert_eq!(variables[0].value.as_deref(), Some("2"));
}

#[test]
fn reanalysis_replaces_the_stored_snapshot() {
    let store = InMemoryStore::new();
    let analyzer = python();

    analyzer.analyze(&store, "f.py", "x = 1\n").unwrap();
    let outcome = analyzer.analyze(&store, "f.py", "x = 2\n").unwrap();

    // Exactly one row per path survives the replacement.
    let file = store.get_file_by_path("f.py").unwrap().unwrap();
    assert_eq!(file.id, outcome.file_id);
    assert_eq!(file.content, "x = 2\n");
    let top_vars = store
        .variables_for_owner(VariableOwner::File(file.id))
        .unwrap();
    assert_eq!(top_vars.len(), 1);
    assert_eq!(top_vars[0].value.as_deref(), Some("2"));
}

#[test]
fn analyze_works_against_sqlite() {
    let store = SqliteStore::open_in_memory().unwrap();
    let outcome = python()
        .analyze(&store, "bank.py", PYTHON_SAMPLE)
        .unwrap();

    let classes = store.classes_for_file(outcome.file_id).unwrap();
    assert_eq!(classes[0].name, "Account");
    let methods = store.methods_for_class(classes[0].id).unwrap();
    assert_eq!(methods[0].signature, "deposit(self, amount)");
}
