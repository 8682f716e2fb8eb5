//! Token categories for syntax highlighting.

/// The category assigned to a lexed token.
///
/// The taxonomy is closed: every token a grammar emits carries exactly one
/// of these categories, and highlighting themes key off them. A grammar
/// may leave entries unused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Whitespace, newlines, and anything no rule claims
    Text,
    /// `// ...` line comment
    CommentSingle,
    /// `/* ... */` comment, possibly spanning lines
    CommentMultiline,
    /// Control-flow and expression keyword: `if`, `return`, ...
    Keyword,
    /// Declaration keyword or modifier: `class`, `public`, ...
    KeywordDeclaration,
    /// Keyword-like constant: `null`
    KeywordConstant,
    /// Namespace keyword: `import`, `package`
    KeywordNamespace,
    /// Plain identifier
    Name,
    /// Class or interface name
    NameClass,
    /// All-uppercase constant name
    NameConstant,
    /// Member accessed through `.` or `::`
    NameAttribute,
    /// Namespace segment or world name
    NameNamespace,
    /// Method name in a signature
    NameFunction,
    /// Statement label
    NameLabel,
    /// Annotation: `@name`
    NameDecorator,
    /// Operator or punctuation
    Operator,
    /// Double-quoted string literal
    String,
    /// Character literal
    StringChar,
    /// Decimal integer literal
    NumberInteger,
    /// Floating-point literal
    NumberFloat,
    /// Binary literal: `0b...`
    NumberBin,
    /// Hexadecimal literal: `0x...`
    NumberHex,
    /// Octal literal: `0...`
    NumberOctal,
}

impl Category {
    /// Hyphenated identifier for this category, e.g. `"Keyword-Declaration"`.
    pub fn name(&self) -> &'static str {
        match self {
            Category::Text => "Text",
            Category::CommentSingle => "Comment-Single",
            Category::CommentMultiline => "Comment-Multiline",
            Category::Keyword => "Keyword",
            Category::KeywordDeclaration => "Keyword-Declaration",
            Category::KeywordConstant => "Keyword-Constant",
            Category::KeywordNamespace => "Keyword-Namespace",
            Category::Name => "Name",
            Category::NameClass => "Name-Class",
            Category::NameConstant => "Name-Constant",
            Category::NameAttribute => "Name-Attribute",
            Category::NameNamespace => "Name-Namespace",
            Category::NameFunction => "Name-Function",
            Category::NameLabel => "Name-Label",
            Category::NameDecorator => "Name-Decorator",
            Category::Operator => "Operator",
            Category::String => "String",
            Category::StringChar => "String-Char",
            Category::NumberInteger => "Number-Integer",
            Category::NumberFloat => "Number-Float",
            Category::NumberBin => "Number-Bin",
            Category::NumberHex => "Number-Hex",
            Category::NumberOctal => "Number-Octal",
        }
    }

    /// Short highlighting class used by HTML formatters, e.g. `"kd"`.
    ///
    /// [`Category::Text`] maps to the empty string: unstyled.
    pub fn css_class(&self) -> &'static str {
        match self {
            Category::Text => "",
            Category::CommentSingle => "c1",
            Category::CommentMultiline => "cm",
            Category::Keyword => "k",
            Category::KeywordDeclaration => "kd",
            Category::KeywordConstant => "kc",
            Category::KeywordNamespace => "kn",
            Category::Name => "n",
            Category::NameClass => "nc",
            Category::NameConstant => "no",
            Category::NameAttribute => "na",
            Category::NameNamespace => "nn",
            Category::NameFunction => "nf",
            Category::NameLabel => "nl",
            Category::NameDecorator => "nd",
            Category::Operator => "o",
            Category::String => "s",
            Category::StringChar => "sc",
            Category::NumberInteger => "mi",
            Category::NumberFloat => "mf",
            Category::NumberBin => "mb",
            Category::NumberHex => "mh",
            Category::NumberOctal => "mo",
        }
    }

    /// Whether this is a comment category.
    pub fn is_comment(&self) -> bool {
        matches!(self, Category::CommentSingle | Category::CommentMultiline)
    }

    /// Whether this is a keyword category.
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            Category::Keyword
                | Category::KeywordDeclaration
                | Category::KeywordConstant
                | Category::KeywordNamespace
        )
    }

    /// Whether this is a literal category (strings and numbers).
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            Category::String
                | Category::StringChar
                | Category::NumberInteger
                | Category::NumberFloat
                | Category::NumberBin
                | Category::NumberHex
                | Category::NumberOctal
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_hyphenated() {
        assert_eq!(Category::Text.name(), "Text");
        assert_eq!(Category::CommentSingle.name(), "Comment-Single");
        assert_eq!(Category::KeywordDeclaration.name(), "Keyword-Declaration");
        assert_eq!(Category::NameFunction.name(), "Name-Function");
        assert_eq!(Category::NumberOctal.name(), "Number-Octal");
    }

    #[test]
    fn test_css_classes() {
        assert_eq!(Category::Text.css_class(), "");
        assert_eq!(Category::Keyword.css_class(), "k");
        assert_eq!(Category::NameFunction.css_class(), "nf");
        assert_eq!(Category::String.css_class(), "s");
        assert_eq!(Category::NumberHex.css_class(), "mh");
    }

    #[test]
    fn test_predicates() {
        assert!(Category::CommentMultiline.is_comment());
        assert!(!Category::String.is_comment());
        assert!(Category::KeywordNamespace.is_keyword());
        assert!(!Category::Name.is_keyword());
        assert!(Category::StringChar.is_literal());
        assert!(Category::NumberFloat.is_literal());
        assert!(!Category::Operator.is_literal());
    }
}
