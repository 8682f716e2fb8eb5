//! The Choral grammar.
//!
//! Choral is a choreographic programming language with Java-flavored
//! syntax. Its distinguishing feature is world annotations: types and
//! literals carry the roles they live at, written `Foo@A` or `Foo@(A, B)`.
//! Dedicated states track the text right after an `@`, a declared type
//! name, or a literal, so role names highlight as namespaces wherever
//! they appear.

use crate::{Category, Grammar, Group, Rule};

/// Keywords that may start a statement or expression.
const KEYWORDS: &[&str] = &[
    "case",
    "catch",
    "else",
    "if",
    "instanceof",
    "new",
    "return",
    "switch",
    "this",
    "throw",
    "try",
];

/// Declaration keywords and modifiers.
const DECLARATIONS: &[&str] = &[
    "abstract",
    "enum",
    "extends",
    "final",
    "implements",
    "private",
    "protected",
    "public",
    "static",
    "super",
    "throws",
];

/// An identifier. Primitive type names are not special-cased and lex as
/// plain identifiers.
const IDENT: &str = r"[\p{Alphabetic}_]\w*";
/// An all-uppercase constant name.
const CONST_NAME: &str = r"\p{Lu}[\p{Lu}\p{Nd}_]*\b";
/// A capitalized class or interface name.
const CLASS_NAME: &str = r"\p{Lu}[\p{Alphabetic}\p{Nd}]*\b";

/// One digit, or a digit pair joined by underscores.
const DIGIT: &str = r"(?:[0-9]_+[0-9]|[0-9])";
const BIN_DIGIT: &str = r"(?:[01]_+[01]|[01])";
const OCT_DIGIT: &str = r"(?:[0-7]_+[0-7]|[0-7])";
const HEX_DIGIT: &str = r"(?:[0-9a-f]_+[0-9a-f]|[0-9a-f])";

/// Build the Choral grammar.
///
/// The rule tables below are fixed, so a build failure can only mean a
/// defect in this file; this function panics rather than returning the
/// error.
pub fn grammar() -> Grammar {
    let keyword = format!(r"(?:{})\b", KEYWORDS.join("|"));
    let declaration = format!(r"(?:{})\b", DECLARATIONS.join("|"));
    // Modifiers and return type, method name, spacing, opening paren. The
    // leading part is re-lexed so its keywords keep their own colors.
    let signature = r"(\s*(?:[a-zA-Z_][a-zA-Z0-9_.\[\]<>]*\s+)+?)([a-zA-Z_][a-zA-Z0-9_]*)(\s*)(\()";

    Grammar::builder("Choral", "choral")
        .description("The Choral programming language")
        .filename("*.ch")
        .mimetype("text/x-choral")
        .state(
            "root",
            vec![
                Rule::token(r"[^\S\n]+", Category::Text),
                Rule::token(r"//[^\n]*", Category::CommentSingle),
                Rule::token(r"(?s)/\*.*?\*/", Category::CommentMultiline),
                // Keywords go before signatures so "throw new Xyz(...)"
                // never lexes as one.
                Rule::token(keyword, Category::Keyword),
                Rule::groups(
                    signature,
                    vec![
                        Group::Delegate,
                        Group::Token(Category::NameFunction),
                        Group::Token(Category::Text),
                        Group::Token(Category::Operator),
                    ],
                ),
                Rule::token(format!("@{}", IDENT), Category::NameDecorator),
                Rule::groups(
                    format!("({})(@)", IDENT),
                    vec![
                        Group::Token(Category::Name),
                        Group::Token(Category::NameNamespace),
                    ],
                )
                .goto("worldDeclWithoutAt"),
                Rule::token(declaration, Category::KeywordDeclaration),
                Rule::token(r"null\b", Category::KeywordConstant),
                Rule::token(r"(?:class|interface)\b", Category::KeywordDeclaration).push("class"),
                Rule::token(r"(?:import|package)\b", Category::KeywordNamespace).push("import"),
                Rule::token(r#""(?:\\\\|\\"|[^"])*""#, Category::String).push("worldDeclOrProd"),
                Rule::token(r"'(?:\\.|[^\\]|\\u[0-9a-f]{4})'", Category::StringChar)
                    .push("worldDecl"),
                Rule::token(r"(?:\.|::)", Category::Operator).push("access"),
                Rule::token(CONST_NAME, Category::NameConstant),
                Rule::token(CLASS_NAME, Category::NameClass),
                Rule::token(format!(r"\$?{}", IDENT), Category::Name),
                Rule::token(r"[~^*!%&\[\](){}<>|+=:;,./?-]", Category::Operator),
                Rule::token(
                    format!(r"{0}+\.{0}+(?:[eE]{0}+)?[fd]?", DIGIT),
                    Category::NumberFloat,
                )
                .push("worldDecl"),
                Rule::token(format!(r"(?i)0b{}+", BIN_DIGIT), Category::NumberBin)
                    .push("worldDecl"),
                Rule::token(format!(r"(?i)0x{}+", HEX_DIGIT), Category::NumberHex)
                    .push("worldDecl"),
                Rule::token(format!(r"0{}+", OCT_DIGIT), Category::NumberOctal).push("worldDecl"),
                Rule::token(format!(r"{}+L?", DIGIT), Category::NumberInteger).push("worldDecl"),
                Rule::token(r"\n", Category::Text),
            ],
        )
        .state(
            "class",
            vec![
                Rule::token(r"\s+", Category::Text),
                Rule::token(IDENT, Category::NameClass).push("worldDecl"),
            ],
        )
        .state(
            "import",
            vec![
                Rule::token(r"\s+", Category::Text),
                Rule::token(r"(?i)[a-z0-9_.]+\*?", Category::NameNamespace).pop(),
            ],
        )
        // The annotation states hand control back by replacing themselves
        // with root, which keeps the stack depth bounded.
        .state(
            "worldDecl",
            vec![
                Rule::token(r"\s+", Category::Text),
                Rule::token("@", Category::NameNamespace),
                Rule::token(r"\(", Category::Text).push("multiWorldDecl"),
                Rule::token(IDENT, Category::NameNamespace).goto("root"),
            ],
        )
        .state(
            "worldDeclWithoutAt",
            vec![
                Rule::token(r"\s+", Category::Text),
                Rule::token(r"\(", Category::Text).push("multiWorldDecl"),
                Rule::token(IDENT, Category::NameNamespace).goto("root"),
            ],
        )
        .state(
            "multiWorldDecl",
            vec![
                Rule::token(IDENT, Category::NameNamespace),
                Rule::token(",", Category::Text),
                Rule::token(r"\)", Category::Text).goto("root"),
            ],
        )
        .state(
            "multiWorldProDecl",
            vec![
                Rule::token(IDENT, Category::NameNamespace),
                Rule::token(",", Category::Text),
                Rule::token(r"\]", Category::Text).goto("root"),
            ],
        )
        .state(
            "worldDeclOrProd",
            vec![
                Rule::token(r"\s+", Category::Text),
                Rule::token("@", Category::NameNamespace),
                Rule::token(IDENT, Category::NameNamespace).goto("root"),
                Rule::token(r"\[", Category::Text).push("multiWorldProDecl"),
                Rule::token(r"\(", Category::Text).push("multiWorldDecl"),
            ],
        )
        .state(
            "access",
            vec![
                Rule::token(r"\s+", Category::Text),
                Rule::token("<", Category::Text).push("generics"),
                Rule::token(IDENT, Category::NameAttribute).pop(),
            ],
        )
        .state(
            "generics",
            vec![
                Rule::token(r"\s+", Category::Text),
                Rule::token(IDENT, Category::Name),
                Rule::token("<", Category::Text).push("generics"),
                Rule::token(",", Category::Text),
                Rule::token(">", Category::Text).pop(),
            ],
        )
        .build()
        .expect("Choral grammar is well-formed")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(source: &str) -> Vec<(Category, &str)> {
        grammar().lex(source).map(|t| (t.category, t.text)).collect()
    }

    #[test]
    fn test_keywords_and_expression() {
        assert_eq!(
            lex("if (x) return;"),
            vec![
                (Category::Keyword, "if"),
                (Category::Text, " "),
                (Category::Operator, "("),
                (Category::Name, "x"),
                (Category::Operator, ")"),
                (Category::Text, " "),
                (Category::Keyword, "return"),
                (Category::Operator, ";"),
            ]
        );
    }

    #[test]
    fn test_line_comment() {
        assert_eq!(
            lex("// hello\nx"),
            vec![
                (Category::CommentSingle, "// hello"),
                (Category::Text, "\n"),
                (Category::Name, "x"),
            ]
        );
    }

    #[test]
    fn test_block_comment_spans_lines() {
        assert_eq!(
            lex("/* a\nb */"),
            vec![(Category::CommentMultiline, "/* a\nb */")]
        );
    }

    #[test]
    fn test_string_with_escapes() {
        assert_eq!(
            lex(r#""he said \"hi\"""#),
            vec![(Category::String, r#""he said \"hi\"""#)]
        );
    }

    #[test]
    fn test_unterminated_string_degrades() {
        assert_eq!(
            lex(r#""ab"#),
            vec![(Category::Text, "\""), (Category::Name, "ab")]
        );
    }

    #[test]
    fn test_char_literals() {
        assert_eq!(lex("'a'"), vec![(Category::StringChar, "'a'")]);
        assert_eq!(lex(r"'\n'"), vec![(Category::StringChar, r"'\n'")]);
        assert_eq!(lex(r"'A'"), vec![(Category::StringChar, r"'A'")]);
    }

    #[test]
    fn test_numbers() {
        assert_eq!(lex("0x1F"), vec![(Category::NumberHex, "0x1F")]);
        assert_eq!(lex("0b101"), vec![(Category::NumberBin, "0b101")]);
        assert_eq!(lex("042"), vec![(Category::NumberOctal, "042")]);
        assert_eq!(lex("3.14"), vec![(Category::NumberFloat, "3.14")]);
        assert_eq!(lex("3.14f"), vec![(Category::NumberFloat, "3.14f")]);
        assert_eq!(lex("6.02e23"), vec![(Category::NumberFloat, "6.02e23")]);
        assert_eq!(lex("7L"), vec![(Category::NumberInteger, "7L")]);
        assert_eq!(lex("0"), vec![(Category::NumberInteger, "0")]);
        assert_eq!(lex("1_000"), vec![(Category::NumberInteger, "1_000")]);
    }

    #[test]
    fn test_world_annotation_on_identifier() {
        assert_eq!(
            lex("Foo@(A, B)"),
            vec![
                (Category::Name, "Foo"),
                (Category::NameNamespace, "@"),
                (Category::Text, "("),
                (Category::NameNamespace, "A"),
                (Category::Text, ","),
                (Category::Text, " "),
                (Category::NameNamespace, "B"),
                (Category::Text, ")"),
            ]
        );
    }

    #[test]
    fn test_world_annotation_on_number() {
        assert_eq!(
            lex("5@A"),
            vec![
                (Category::NumberInteger, "5"),
                (Category::NameNamespace, "@"),
                (Category::NameNamespace, "A"),
            ]
        );
    }

    #[test]
    fn test_world_annotation_on_string() {
        assert_eq!(
            lex(r#""hi"@[A, B]"#),
            vec![
                (Category::String, "\"hi\""),
                (Category::NameNamespace, "@"),
                (Category::Text, "["),
                (Category::NameNamespace, "A"),
                (Category::Text, ","),
                (Category::Text, " "),
                (Category::NameNamespace, "B"),
                (Category::Text, "]"),
            ]
        );
    }

    #[test]
    fn test_method_signature_delegation() {
        assert_eq!(
            lex("public static void main(String[] args)"),
            vec![
                (Category::KeywordDeclaration, "public"),
                (Category::Text, " "),
                (Category::KeywordDeclaration, "static"),
                (Category::Text, " "),
                (Category::Name, "void"),
                (Category::Text, " "),
                (Category::NameFunction, "main"),
                (Category::Operator, "("),
                (Category::NameClass, "String"),
                (Category::Operator, "["),
                (Category::Operator, "]"),
                (Category::Text, " "),
                (Category::Name, "args"),
                (Category::Operator, ")"),
            ]
        );
    }

    #[test]
    fn test_plain_signature() {
        assert_eq!(
            lex("int add(int a)"),
            vec![
                (Category::Name, "int"),
                (Category::Text, " "),
                (Category::NameFunction, "add"),
                (Category::Operator, "("),
                (Category::Name, "int"),
                (Category::Text, " "),
                (Category::Name, "a"),
                (Category::Operator, ")"),
            ]
        );
    }

    #[test]
    fn test_throw_new_is_not_a_signature() {
        assert_eq!(
            lex("throw new Exception()"),
            vec![
                (Category::Keyword, "throw"),
                (Category::Text, " "),
                (Category::Keyword, "new"),
                (Category::Text, " "),
                (Category::NameClass, "Exception"),
                (Category::Operator, "("),
                (Category::Operator, ")"),
            ]
        );
    }

    #[test]
    fn test_class_declaration_with_worlds() {
        assert_eq!(
            lex("class HelloRoles@(A, B)"),
            vec![
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
            ]
        );
    }

    #[test]
    fn test_interface_declaration() {
        assert_eq!(
            lex("interface Greeter"),
            vec![
                (Category::KeywordDeclaration, "interface"),
                (Category::Text, " "),
                (Category::NameClass, "Greeter"),
            ]
        );
    }

    #[test]
    fn test_imports() {
        assert_eq!(
            lex("import choral.channels.SymChannel;"),
            vec![
                (Category::KeywordNamespace, "import"),
                (Category::Text, " "),
                (Category::NameNamespace, "choral.channels.SymChannel"),
                (Category::Operator, ";"),
            ]
        );
        assert_eq!(
            lex("import choral.runtime.*;"),
            vec![
                (Category::KeywordNamespace, "import"),
                (Category::Text, " "),
                (Category::NameNamespace, "choral.runtime.*"),
                (Category::Operator, ";"),
            ]
        );
        assert_eq!(
            lex("package demo;"),
            vec![
                (Category::KeywordNamespace, "package"),
                (Category::Text, " "),
                (Category::NameNamespace, "demo"),
                (Category::Operator, ";"),
            ]
        );
    }

    #[test]
    fn test_member_access() {
        assert_eq!(
            lex("obj.method"),
            vec![
                (Category::Name, "obj"),
                (Category::Operator, "."),
                (Category::NameAttribute, "method"),
            ]
        );
        assert_eq!(
            lex("System.out.println"),
            vec![
                (Category::NameClass, "System"),
                (Category::Operator, "."),
                (Category::NameAttribute, "out"),
                (Category::Operator, "."),
                (Category::NameAttribute, "println"),
            ]
        );
    }

    #[test]
    fn test_access_after_world_annotation() {
        // The trailing paren lands in an annotation state with no rule for
        // it, so it degrades to plain text.
        assert_eq!(
            lex(r#"System@A.out.println("Hi")"#),
            vec![
                (Category::Name, "System"),
                (Category::NameNamespace, "@"),
                (Category::NameNamespace, "A"),
                (Category::Operator, "."),
                (Category::NameAttribute, "out"),
                (Category::Operator, "."),
                (Category::NameAttribute, "println"),
                (Category::Operator, "("),
                (Category::String, "\"Hi\""),
                (Category::Text, ")"),
            ]
        );
    }

    #[test]
    fn test_decorator() {
        assert_eq!(lex("@World"), vec![(Category::NameDecorator, "@World")]);
    }

    #[test]
    fn test_constant_name() {
        assert_eq!(lex("MAX_SIZE"), vec![(Category::NameConstant, "MAX_SIZE")]);
    }

    #[test]
    fn test_null_literal() {
        assert_eq!(lex("null"), vec![(Category::KeywordConstant, "null")]);
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            lex("a + b"),
            vec![
                (Category::Name, "a"),
                (Category::Text, " "),
                (Category::Operator, "+"),
                (Category::Text, " "),
                (Category::Name, "b"),
            ]
        );
    }

    #[test]
    fn test_generic_type() {
        assert_eq!(
            lex("SymChannel<String>"),
            vec![
                (Category::NameClass, "SymChannel"),
                (Category::Operator, "<"),
                (Category::NameClass, "String"),
                (Category::Operator, ">"),
            ]
        );
    }

    #[test]
    fn test_generic_method_access() {
        assert_eq!(
            lex("ch.<Integer>com"),
            vec![
                (Category::Name, "ch"),
                (Category::Operator, "."),
                (Category::Text, "<"),
                (Category::Name, "Integer"),
                (Category::Text, ">"),
                (Category::NameAttribute, "com"),
            ]
        );
    }

    #[test]
    fn test_dollar_identifier() {
        assert_eq!(lex("$tmp"), vec![(Category::Name, "$tmp")]);
    }

    #[test]
    fn test_whitespace() {
        assert_eq!(lex("  \t"), vec![(Category::Text, "  \t")]);
        assert_eq!(
            lex("\n\n"),
            vec![(Category::Text, "\n"), (Category::Text, "\n")]
        );
    }

    #[test]
    fn test_unmatched_character_degrades() {
        assert_eq!(lex("#"), vec![(Category::Text, "#")]);
        assert_eq!(
            lex("a # b"),
            vec![
                (Category::Name, "a"),
                (Category::Text, " "),
                (Category::Text, "#"),
                (Category::Text, " "),
                (Category::Name, "b"),
            ]
        );
    }

    #[test]
    fn test_metadata() {
        let grammar = grammar();
        assert_eq!(grammar.name(), "Choral");
        assert_eq!(grammar.tag(), "choral");
        assert_eq!(grammar.description(), "The Choral programming language");
        assert!(grammar.matches_filename("HelloRoles.ch"));
        assert!(!grammar.matches_filename("main.rs"));
        assert!(grammar.matches_mimetype("text/x-choral"));
    }
}
