use pretty_assertions::assert_eq;
use sweep_core::{
    filter, find_statements, preview, remove_all, scan, scan_lexical, ConsoleMethod, Dialect,
    RemovalConfig, ScanMethod, StatementKind, Sweeper,
};

const SAMPLES: &[(&str, &str)] = &[
    (
        "app.js",
        "import { load } from './load';\n\nexport function run(cfg) {\n  console.log('starting', cfg);\n  const data = load(cfg); debugger;\n  console.error('loaded', data.length);\n  return data.map((d) => {\n    console.debug(d);\n    return d * 2;\n  });\n}\n",
    ),
    (
        "service.ts",
        "interface User {\n  id: number;\n}\n\n\n\nexport class Service {\n  find(id: number): User {\n    console.info(`find ${id}`);\n    const user = { id } as User;\n    console.warn(\n      'slow path',\n      id,\n    );\n    return user;\n  }\n}\n",
    ),
    (
        "view.tsx",
        "export const View = ({ items }: { items: string[] }) => {\n  console.trace('render');\n  return <ul>{items.map((i) => <li key={i}>{i}</li>)}</ul>;\n};\n",
    ),
    (
        "mixed.js",
        "const r = f(); console.log(r); use(r);\ncall(a, console.log(b), c);\nconst s = \"console.log('not a call')\";\n// console.log('commented')\n",
    ),
    (
        "Main.java",
        "public class Main {\n  public static void main(String[] args) {\n    System.out.println(\"hello\");\n    run(args);\n  }\n}\n",
    ),
];

fn non_space(text: &str) -> Vec<char> {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

fn is_subsequence(needle: &[char], haystack: &[char]) -> bool {
    let mut rest = haystack.iter();
    needle.iter().all(|c| rest.any(|h| h == c))
}

#[test]
fn test_text_without_statements() {
    let text = "const message = 'console.log(1)';\n// debugger\n/* print(x) */\nfunction go() {\n  return message;\n}\n";

    assert!(scan(text, Dialect::JavaScript).unwrap().is_empty());

    let result = remove_all(text, &[], &RemovalConfig::default());
    assert_eq!(result.clean_text, text);
    assert_eq!(result.removed_count, 0);
    assert!(result.removed_statements.is_empty());
}

#[test]
fn test_offsets_within_bounds() {
    for (path, text) in SAMPLES {
        let outcome = find_statements(text, Dialect::from_path(path));
        assert!(!outcome.statements.is_empty(), "{path}: nothing found");
        for statement in &outcome.statements {
            assert!(statement.start_offset < statement.end_offset, "{path}");
            assert!(statement.end_offset <= text.len(), "{path}");
            assert_eq!(&text[statement.span()], statement.raw_text, "{path}");
        }
    }
}

#[test]
fn test_idempotent() {
    let config = RemovalConfig::default();
    for (path, text) in SAMPLES {
        let dialect = Dialect::from_path(path);
        let statements = filter(&find_statements(text, dialect).statements, &config);
        let first = remove_all(text, &statements, &config);

        let again = filter(&find_statements(&first.clean_text, dialect).statements, &config);
        assert!(again.is_empty(), "{path}: left behind {again:?}");

        let second = remove_all(&first.clean_text, &again, &config);
        assert_eq!(second.clean_text, first.clean_text, "{path}");
    }
}

#[test]
fn test_non_corruption() {
    let config = RemovalConfig::remove_everything();
    for (path, text) in SAMPLES {
        let statements = find_statements(text, Dialect::from_path(path)).statements;
        let result = remove_all(text, &statements, &config);

        assert!(
            is_subsequence(&non_space(&result.clean_text), &non_space(text)),
            "{path}: output is not drawn from the original"
        );
        for removed in &result.removed_statements {
            assert!(
                !result.clean_text.contains(&removed.raw_text),
                "{path}: `{}` survived",
                removed.raw_text
            );
        }
    }
}

#[test]
fn test_statements_on_one_line() {
    let text = "console.log('a'); const x=1; console.log('b');";
    let statements = scan(text, Dialect::JavaScript).unwrap();
    assert_eq!(statements.len(), 2);

    let result = remove_all(text, &statements, &RemovalConfig::default());
    assert_eq!(result.clean_text, "const x=1;\n");
    assert_eq!(result.removed_count, 2);
}

#[test]
fn test_alone_between_blank_lines() {
    let text = "setup();\n\nconsole.log('checkpoint');\n\nteardown();\n";
    let sweeper = Sweeper::new(RemovalConfig::default()).unwrap();
    let outcome = sweeper.clean_str(text, Some("lifecycle.js"));

    assert_eq!(outcome.result.clean_text, "setup();\n\nteardown();\n");

    let tight = Sweeper::new(RemovalConfig {
        max_empty_lines: 0,
        ..RemovalConfig::default()
    })
    .unwrap();
    let outcome = tight.clean_str(text, Some("lifecycle.js"));
    assert_eq!(outcome.result.clean_text, "setup();\nteardown();\n");
}

#[test]
fn test_alone_between_blank_lines_crlf() {
    let text = "setup();\r\n\r\nconsole.log('checkpoint');\r\n\r\nteardown();\r\n";
    for clean_whitespace in [true, false] {
        let sweeper = Sweeper::new(RemovalConfig {
            clean_whitespace,
            ..RemovalConfig::default()
        })
        .unwrap();
        let outcome = sweeper.clean_str(text, Some("lifecycle.js"));
        assert_eq!(outcome.result.clean_text, "setup();\r\n\r\nteardown();\r\n");
        assert_eq!(outcome.result.removed_count, 1);
    }

    let text = "run(); console.log(1);\r\nnext();\r\n";
    let statements = find_statements(text, Dialect::JavaScript).statements;
    let config = RemovalConfig {
        clean_whitespace: false,
        ..RemovalConfig::default()
    };
    let result = remove_all(text, &statements, &config);
    assert_eq!(result.clean_text, "run();\r\nnext();\r\n");
}

#[test]
fn test_mid_line_excision() {
    let text = "const r = f(); console.log(r); return r;\n";
    let statements = find_statements(text, Dialect::JavaScript).statements;
    assert_eq!(statements[0].raw_text, "console.log(r);");

    let result = remove_all(text, &statements, &RemovalConfig::default());
    assert_eq!(result.clean_text, "const r = f(); return r;\n");
}

#[test]
fn test_wrapped_statement_removed_as_unit() {
    let text = "const a = 1;\nconsole.log(\n  'first',\n  { deep: [1, 2] },\n);\nconst b = 2;\n";
    let statements = scan(text, Dialect::JavaScript).unwrap();
    assert_eq!(statements.len(), 1);
    assert_eq!(statements[0].line, 2);

    let result = remove_all(text, &statements, &RemovalConfig::default());
    assert_eq!(result.clean_text, "const a = 1;\nconst b = 2;\n");
    assert!(!result.clean_text.contains("first"));
    assert!(!result.clean_text.contains("deep"));
}

#[test]
fn test_console_error_kept() {
    let text = "console.log('remove me');\nconsole.error('keep me');\n";
    let config = RemovalConfig {
        remove_console_log: true,
        remove_console_error: false,
        ..RemovalConfig::default()
    };
    let sweeper = Sweeper::new(config).unwrap();
    let outcome = sweeper.clean_str(text, Some("index.js"));

    assert!(!outcome.result.clean_text.contains("console.log('remove me')"));
    assert!(outcome.result.clean_text.contains("console.error('keep me')"));
    assert_eq!(outcome.result.removed_count, 1);
    assert_eq!(
        outcome.result.removed_statements[0].sub_kind,
        Some(ConsoleMethod::Log)
    );
}

#[test]
fn test_broken_text_falls_back() {
    let text = "function f() {\n  console.log(1);\n  if (x) {\n    debugger;\n    print('x');\n";

    let err = scan(text, Dialect::JavaScript).unwrap_err();
    assert!(err.is_parse_failure());

    let lexical = scan_lexical(text);
    let kinds: Vec<_> = lexical.iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        vec![
            StatementKind::Console,
            StatementKind::Debugger,
            StatementKind::Print
        ]
    );

    let outcome = find_statements(text, Dialect::JavaScript);
    assert!(matches!(outcome.method, ScanMethod::Lexical { .. }));
    assert_eq!(outcome.statements, lexical);
}

#[test]
fn test_report_and_preview_agree() {
    let (path, text) = SAMPLES[0];
    let sweeper = Sweeper::new(RemovalConfig::default()).unwrap();
    let outcome = sweeper.clean_str(text, Some(path));

    let statements = filter(
        &find_statements(text, Dialect::from_path(path)).statements,
        sweeper.config(),
    );
    let entries = preview(text, &statements);

    assert_eq!(entries.len(), outcome.report.removed_count);
    assert_eq!(outcome.report.count(StatementKind::Console), 2);
    assert_eq!(outcome.report.count(StatementKind::Debugger), 1);
    assert!(outcome.report.lines_reduced >= 2);
}
