use crate::dialect::{Dialect, Grammar};
use crate::error::{Result, SweepError};
use crate::lines::{extend_past_terminator, LineIndex};
use crate::types::{ConsoleMethod, DebugStatement, StatementKind};
use tree_sitter::{Node, Parser};

/// Locate debug statements in `text` with a syntax tree.
///
/// Each grammar listed for `dialect` is tried in order and the first one that
/// parses without errors wins. Fails with [`SweepError::ParseFailure`] when no
/// grammar accepts the text or the dialect has none.
pub fn scan(text: &str, dialect: Dialect) -> Result<Vec<DebugStatement>> {
    let grammars = dialect.grammars();
    if grammars.is_empty() {
        return Err(SweepError::parse(format!(
            "no structural grammar for dialect `{dialect}`"
        )));
    }

    let mut first_failure = None;
    for &grammar in grammars {
        match StructuralScanner::new(grammar)?.scan(text) {
            Ok(statements) => return Ok(statements),
            Err(SweepError::ParseFailure(msg)) => {
                log::debug!("{} grammar rejected input: {msg}", grammar.as_str());
                first_failure.get_or_insert(msg);
            }
            Err(e) => return Err(e),
        }
    }

    Err(SweepError::parse(
        first_failure.unwrap_or_else(|| "syntax error".to_string()),
    ))
}

/// Tree-sitter backed scanner for one grammar
pub struct StructuralScanner {
    parser: Parser,
    grammar: Grammar,
}

impl StructuralScanner {
    pub fn new(grammar: Grammar) -> Result<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&grammar.tree_sitter_language())
            .map_err(|e| SweepError::tree_sitter(format!("Failed to set language: {e}")))?;

        Ok(Self { parser, grammar })
    }

    pub const fn grammar(&self) -> Grammar {
        self.grammar
    }

    /// Parse `text` and collect every debug statement, ascending by offset
    pub fn scan(&mut self, text: &str) -> Result<Vec<DebugStatement>> {
        let tree = self
            .parser
            .parse(text, None)
            .ok_or_else(|| SweepError::parse("Failed to parse source code"))?;

        let root = tree.root_node();
        if root.has_error() {
            return Err(SweepError::parse(describe_syntax_error(root)));
        }

        let index = LineIndex::new(text);
        let mut statements = Vec::new();
        let mut stack = vec![root];

        while let Some(node) = stack.pop() {
            if let Some((kind, sub_kind)) = classify(node, text) {
                let end = extend_past_terminator(text, node.end_byte());
                statements.push(DebugStatement::from_span(
                    text,
                    &index,
                    kind,
                    sub_kind,
                    node.start_byte()..end,
                ));
                // arguments of a matched call are removed with it
                continue;
            }

            let mut cursor = node.walk();
            stack.extend(node.named_children(&mut cursor));
        }

        statements.sort_by_key(|s| s.start_offset);
        Ok(statements)
    }
}

fn classify(node: Node, text: &str) -> Option<(StatementKind, Option<ConsoleMethod>)> {
    match node.kind() {
        "debugger_statement" => Some((StatementKind::Debugger, None)),
        "call_expression" => {
            let callee = node.child_by_field_name("function")?;
            classify_callee(callee, text)
        }
        _ => None,
    }
}

fn classify_callee(callee: Node, text: &str) -> Option<(StatementKind, Option<ConsoleMethod>)> {
    match callee.kind() {
        "identifier" if node_text(callee, text) == "print" => Some((StatementKind::Print, None)),
        "member_expression" => {
            let object = callee.child_by_field_name("object")?;
            let property = node_text(callee.child_by_field_name("property")?, text);

            if is_identifier(object, text, "console") {
                let method = ConsoleMethod::from_name(property)?;
                return Some((StatementKind::Console, Some(method)));
            }

            if property == "println" && is_member_access(object, text, "System", "out") {
                return Some((StatementKind::SystemOut, None));
            }

            None
        }
        _ => None,
    }
}

fn is_identifier(node: Node, text: &str, name: &str) -> bool {
    node.kind() == "identifier" && node_text(node, text) == name
}

fn is_member_access(node: Node, text: &str, base: &str, property: &str) -> bool {
    if node.kind() != "member_expression" {
        return false;
    }

    let object_matches = node
        .child_by_field_name("object")
        .is_some_and(|object| is_identifier(object, text, base));
    let property_matches = node
        .child_by_field_name("property")
        .is_some_and(|prop| node_text(prop, text) == property);

    object_matches && property_matches
}

fn node_text<'a>(node: Node, text: &'a str) -> &'a str {
    &text[node.byte_range()]
}

/// Position of the first error or missing node, in document order
fn describe_syntax_error(root: Node) -> String {
    let mut stack = vec![root];

    while let Some(node) = stack.pop() {
        let pos = node.start_position();
        if node.is_missing() {
            return format!(
                "missing `{}` at line {}, column {}",
                node.kind(),
                pos.row + 1,
                pos.column
            );
        }
        if node.is_error() {
            return format!("syntax error at line {}, column {}", pos.row + 1, pos.column);
        }

        if node.has_error() {
            let mut cursor = node.walk();
            let children: Vec<_> = node.children(&mut cursor).collect();
            stack.extend(children.into_iter().rev());
        }
    }

    "syntax error".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(statements: &[DebugStatement]) -> Vec<String> {
        statements.iter().map(DebugStatement::label).collect()
    }

    #[test]
    fn test_console_methods() {
        let code = r"
console.log('a');
console.debug('b');
console.info('c');
console.warn('d');
console.error('e');
console.trace('f');
console.table(rows);
console.time('t');
console.timeEnd('t');
console.group('ignored');
";
        let statements = scan(code, Dialect::JavaScript).unwrap();
        assert_eq!(
            labels(&statements),
            vec![
                "console.log",
                "console.debug",
                "console.info",
                "console.warn",
                "console.error",
                "console.trace",
                "console.table",
                "console.time",
                "console.timeEnd",
            ]
        );
        assert!(statements.iter().all(|s| s.raw_text.ends_with(';')));
    }

    #[test]
    fn test_strings_and_comments_ignored() {
        let code = r#"
const s = "console.log('in string')";
const t = `debugger; ${name} print(1)`;
// console.log('in comment');
/* System.out.println("block") */
"#;
        let statements = scan(code, Dialect::JavaScript).unwrap();
        assert!(statements.is_empty(), "got {:?}", labels(&statements));
    }

    #[test]
    fn test_print_requires_bare_identifier() {
        let code = "print(1);\nwindow.print();\nsprint(2);\n";
        let statements = scan(code, Dialect::JavaScript).unwrap();
        assert_eq!(labels(&statements), vec!["print"]);
        assert_eq!(statements[0].line, 1);
    }

    #[test]
    fn test_system_out_and_debugger() {
        let code = "function f() {\n  debugger;\n  System.out.println(x);\n  System.err.println(y);\n}\n";
        let statements = scan(code, Dialect::JavaScript).unwrap();
        assert_eq!(labels(&statements), vec!["debugger", "System.out.println"]);
        assert_eq!(statements[0].raw_text, "debugger;");
        assert_eq!((statements[0].line, statements[0].column), (2, 2));
        assert_eq!(statements[1].raw_text, "System.out.println(x);");
    }

    #[test]
    fn test_terminator_extension() {
        let code = "console.log(a)  ;\nconsole.log(b)\nfoo();\n";
        let statements = scan(code, Dialect::JavaScript).unwrap();
        assert_eq!(statements[0].raw_text, "console.log(a)  ;");
        assert_eq!(statements[1].raw_text, "console.log(b)");
    }

    #[test]
    fn test_nested_call_reported_once() {
        let code = "console.log(console.warn(1), print(2));\n";
        let statements = scan(code, Dialect::JavaScript).unwrap();
        assert_eq!(labels(&statements), vec!["console.log"]);
    }

    #[test]
    fn test_typescript_annotations() {
        let code = "interface P { x: number }\nfunction f(a: P): void {\n  console.log(a as P);\n}\n";
        let statements = scan(code, Dialect::TypeScript).unwrap();
        assert_eq!(labels(&statements), vec!["console.log"]);
    }

    #[test]
    fn test_javascript_hint_accepts_superset_syntax() {
        let code = "function f(a: string) {\n  console.info(a);\n}\n";
        let statements = scan(code, Dialect::JavaScript).unwrap();
        assert_eq!(labels(&statements), vec!["console.info"]);
    }

    #[test]
    fn test_jsx_expression() {
        let code =
            "const App = () => (\n  <button onClick={() => console.log('hi')}>go</button>\n);\n";
        let statements = scan(code, Dialect::Jsx).unwrap();
        assert_eq!(labels(&statements), vec!["console.log"]);
        assert_eq!(statements[0].raw_text, "console.log('hi')");
    }

    #[test]
    fn test_parse_failure() {
        let code = "function broken() {\n  console.log('x');\n";
        let err = scan(code, Dialect::JavaScript).unwrap_err();
        assert!(err.is_parse_failure());
        assert!(err.to_string().contains("line"), "{err}");
    }

    #[test]
    fn test_unsupported_dialect_fails() {
        let err = scan("print('x')\n", Dialect::Python).unwrap_err();
        assert!(err.is_parse_failure());
        assert!(err.to_string().contains("python"));
    }

    #[test]
    fn test_offsets_within_bounds() {
        let code = "let a = 1; console.log(a); debugger\nprint(a)";
        let statements = scan(code, Dialect::JavaScript).unwrap();
        assert_eq!(statements.len(), 3);
        for stmt in &statements {
            assert!(stmt.start_offset < stmt.end_offset);
            assert!(stmt.end_offset <= code.len());
            assert_eq!(&code[stmt.span()], stmt.raw_text);
        }
        assert!(statements.windows(2).all(|w| w[0].end_offset <= w[1].start_offset));
    }

    #[test]
    fn test_scanner_reports_grammar() {
        let scanner = StructuralScanner::new(Grammar::Tsx).unwrap();
        assert_eq!(scanner.grammar(), Grammar::Tsx);
    }
}
