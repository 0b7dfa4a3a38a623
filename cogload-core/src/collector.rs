//! Function discovery over a parsed Python module
//!
//! Global invariants enforced:
//! - Discovery order is pre-order traversal order: outer definitions before
//!   their nested children, siblings in source order
//! - Formatting, comments, and whitespace must not affect results

use crate::span::SourceSpan;
use crate::walker::{find_child_by_kind, walk, Visit};
use tree_sitter::Node;

/// Node kinds that introduce a function or method definition.
///
/// Recent tree-sitter-python grammars fold `async def` into
/// `function_definition`; the dedicated kind is matched for older grammars.
pub const FUNCTION_KINDS: &[&str] = &["function_definition", "async_function_definition"];

/// A function definition discovered in a file's tree.
///
/// Borrows the file's parse tree and never outlives the per-file analysis;
/// nothing is persisted across files.
#[derive(Debug, Clone)]
pub struct FunctionRecord<'tree> {
    pub name: String,
    pub node: Node<'tree>,
    pub span: SourceSpan,
    pub parameter_count: usize,
}

/// Collect every function and method definition under `root` in one walk.
///
/// Nested definitions are emitted as independent records. `count_receiver`
/// selects whether the explicit receiver of a method (`self`/`cls`) counts
/// toward its parameter total.
pub fn collect<'tree>(
    root: Node<'tree>,
    source: &str,
    count_receiver: bool,
) -> Vec<FunctionRecord<'tree>> {
    let mut visitor = Collector {
        source,
        count_receiver,
        records: Vec::new(),
    };
    walk(root, &mut visitor);
    visitor.records
}

struct Collector<'tree, 'src> {
    source: &'src str,
    count_receiver: bool,
    records: Vec<FunctionRecord<'tree>>,
}

impl<'tree> Visit<'tree> for Collector<'tree, '_> {
    fn enter(&mut self, node: Node<'tree>) -> bool {
        if FUNCTION_KINDS.contains(&node.kind()) {
            if let Some(record) = extract_function(node, self.source, self.count_receiver) {
                self.records.push(record);
            }
        }
        // Keep descending: nested definitions get their own records
        true
    }
}

/// Extract a FunctionRecord from a function_definition node
fn extract_function<'tree>(
    node: Node<'tree>,
    source: &str,
    count_receiver: bool,
) -> Option<FunctionRecord<'tree>> {
    let name_node = find_child_by_kind(node, "identifier")?;
    let name = source[name_node.start_byte()..name_node.end_byte()].to_string();

    let parameter_count = match find_child_by_kind(node, "parameters") {
        Some(params) => count_parameters(params, source, count_receiver, is_method(node)),
        None => 0,
    };

    Some(FunctionRecord {
        name,
        node,
        span: SourceSpan::from_node(&node),
        parameter_count,
    })
}

/// Count formal parameters in a `parameters` node.
///
/// Positional, keyword, and variadic parameters (`*args`, `**kwargs`) each
/// count one; the bare `*` and `/` separators count zero. The receiver of a
/// method is excluded unless `count_receiver` is set.
fn count_parameters(params: Node, source: &str, count_receiver: bool, method: bool) -> usize {
    let mut cursor = params.walk();
    let formals: Vec<Node> = params
        .named_children(&mut cursor)
        .filter(|child| {
            !matches!(
                child.kind(),
                "comment" | "positional_separator" | "keyword_separator"
            )
        })
        .collect();

    let mut count = formals.len();
    if method && !count_receiver {
        if let Some(first) = formals.first() {
            if parameter_name(*first, source).is_some_and(|name| name == "self" || name == "cls") {
                count -= 1;
            }
        }
    }
    count
}

/// The identifier a parameter binds, used for receiver detection
fn parameter_name<'src>(param: Node, source: &'src str) -> Option<&'src str> {
    let ident = match param.kind() {
        "identifier" => param,
        "typed_parameter" => find_child_by_kind(param, "identifier")?,
        "default_parameter" | "typed_default_parameter" => param.child_by_field_name("name")?,
        _ => return None,
    };
    Some(&source[ident.start_byte()..ident.end_byte()])
}

/// True when the definition sits directly in a class body (decorators skipped)
fn is_method(node: Node) -> bool {
    let mut parent = node.parent();
    if let Some(p) = parent {
        if p.kind() == "decorated_definition" {
            parent = p.parent();
        }
    }
    match parent {
        Some(block) if block.kind() == "block" => block
            .parent()
            .is_some_and(|scope| scope.kind() == "class_definition"),
        _ => false,
    }
}
