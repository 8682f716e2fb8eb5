//! A stateful pattern-dispatch lexer for the Choral programming language.
//!
//! Grammars here are data: named states holding ordered rules, each rule a
//! regular expression paired with a token category and a state transition.
//! The engine in [`Lexer`] walks those tables, falling back to one-character
//! [`Category::Text`] tokens for anything no rule claims, so lexing never
//! fails and tokens always concatenate back to the input.

mod category;
pub use category::Category;

mod span;
pub use span::Span;

mod token;
pub use token::Token;

mod grammar;
pub use grammar::{Grammar, GrammarBuilder, GrammarError, Group, Rule};

mod lexer;
pub use lexer::Lexer;

mod registry;
pub use registry::Registry;

pub mod choral;
