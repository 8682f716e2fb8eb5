//! Lexing whole Choral programs end to end.

use std::path::Path;

use choral_lexer::{Category, Registry, choral};

const SOURCE: &str = r#"import choral.channels.SymChannel;

class HelloRoles@(A, B) {
    static String greet() {
        return "hello"@A;
    }
}
"#;

#[test]
fn test_hello_roles_tokens() {
    let grammar = choral::grammar();
    let tokens: Vec<_> = grammar.lex(SOURCE).map(|t| (t.category, t.text)).collect();
    assert_eq!(
        tokens,
        vec![
            (Category::KeywordNamespace, "import"),
            (Category::Text, " "),
            (Category::NameNamespace, "choral.channels.SymChannel"),
            (Category::Operator, ";"),
            (Category::Text, "\n"),
            (Category::Text, "\n"),
            (Category::KeywordDeclaration, "class"),
            (Category::Text, " "),
            (Category::NameClass, "HelloRoles"),
            (Category::NameNamespace, "@"),
            (Category::Text, "("),
            (Category::NameNamespace, "A"),
            (Category::Text, ","),
            (Category::Text, " "),
            (Category::NameNamespace, "B"),
            (Category::Text, ")"),
            (Category::Text, " "),
            (Category::Operator, "{"),
            (Category::Text, "\n"),
            (Category::Text, "    "),
            (Category::KeywordDeclaration, "static"),
            (Category::Text, " "),
            (Category::NameClass, "String"),
            (Category::Text, " "),
            (Category::NameFunction, "greet"),
            (Category::Operator, "("),
            (Category::Operator, ")"),
            (Category::Text, " "),
            (Category::Operator, "{"),
            (Category::Text, "\n"),
            (Category::Text, "        "),
            (Category::Keyword, "return"),
            (Category::Text, " "),
            (Category::String, "\"hello\""),
            (Category::NameNamespace, "@"),
            (Category::NameNamespace, "A"),
            (Category::Operator, ";"),
            (Category::Text, "\n"),
            (Category::Text, "    "),
            (Category::Operator, "}"),
            (Category::Text, "\n"),
            (Category::Operator, "}"),
            (Category::Text, "\n"),
        ]
    );
}

#[test]
fn test_lexing_covers_the_entire_source() {
    let grammar = choral::grammar();
    let rebuilt: String = grammar.lex(SOURCE).map(|t| t.text).collect();
    assert_eq!(rebuilt, SOURCE);
}

#[test]
fn test_registry_finds_grammar_for_choral_files() {
    let registry = Registry::with_builtin();
    let grammar = registry.for_path(Path::new("HelloRoles.ch")).unwrap();
    assert_eq!(grammar.tag(), "choral");
    assert!(grammar.matches_mimetype("text/x-choral"));
}
