use crate::{Category, Span};

/// A categorized slice of the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'src> {
    pub category: Category,
    pub span: Span,
    pub text: &'src str,
}

impl<'src> Token<'src> {
    pub fn new(category: Category, span: Span, text: &'src str) -> Self {
        Self {
            category,
            span,
            text,
        }
    }
}
