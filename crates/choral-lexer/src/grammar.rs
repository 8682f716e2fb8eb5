//! Grammar definitions for stateful pattern-dispatch lexing.
//!
//! A [`Grammar`] is data, not code: a set of named states, each holding an
//! ordered list of rules. Every rule pairs a regular expression with an
//! action (what to emit) and a transition (which state handles the text that
//! follows). The [`Lexer`](crate::Lexer) walks these tables, so defining a
//! new language means building new tables rather than writing control flow.

use std::collections::HashMap;

use regex::Regex;

use crate::Category;
use crate::lexer::Lexer;

/// A compiled lexing grammar.
///
/// Grammars are immutable once built. [`GrammarBuilder::build`] validates the
/// whole state graph up front: every transition target must name a defined
/// state and every pattern must compile, so lexing itself cannot fail.
#[derive(Debug)]
pub struct Grammar {
    name: String,
    tag: String,
    description: String,
    filenames: Vec<String>,
    mimetypes: Vec<String>,
    /// One compiled matcher per filename glob.
    filename_matchers: Vec<Regex>,
    pub(crate) states: Vec<State>,
    pub(crate) root: usize,
}

impl Grammar {
    /// Start building a grammar with the given display name and tag.
    ///
    /// The tag is the short lowercase identifier used for lookup, e.g.
    /// `"choral"`.
    pub fn builder(name: impl Into<String>, tag: impl Into<String>) -> GrammarBuilder {
        GrammarBuilder {
            name: name.into(),
            tag: tag.into(),
            description: String::new(),
            filenames: Vec::new(),
            mimetypes: Vec::new(),
            states: Vec::new(),
        }
    }

    /// Human-readable language name, e.g. `"Choral"`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Short lookup tag, e.g. `"choral"`.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// One-line description of the language.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Filename globs this grammar claims, e.g. `"*.ch"`.
    pub fn filenames(&self) -> &[String] {
        &self.filenames
    }

    /// MIME types this grammar claims, e.g. `"text/x-choral"`.
    pub fn mimetypes(&self) -> &[String] {
        &self.mimetypes
    }

    /// Whether any of this grammar's filename globs matches `filename`.
    ///
    /// The globs match whole filenames, not paths: pass `"Hello.ch"`, not
    /// `"src/Hello.ch"`.
    pub fn matches_filename(&self, filename: &str) -> bool {
        self.filename_matchers.iter().any(|m| m.is_match(filename))
    }

    /// Whether this grammar claims the given MIME type.
    pub fn matches_mimetype(&self, mimetype: &str) -> bool {
        self.mimetypes.iter().any(|m| m == mimetype)
    }

    /// Lex `source`, returning an iterator over its tokens.
    pub fn lex<'g, 'src>(&'g self, source: &'src str) -> Lexer<'g, 'src> {
        Lexer::new(self, source)
    }
}

/// A named state and its rules, in declaration order.
#[derive(Debug)]
pub(crate) struct State {
    pub(crate) name: String,
    pub(crate) rules: Vec<CompiledRule>,
}

/// A rule with its pattern compiled and its transition target resolved.
#[derive(Debug)]
pub(crate) struct CompiledRule {
    pub(crate) regex: Regex,
    pub(crate) action: Action,
    pub(crate) transition: CompiledTransition,
}

/// What a rule emits when its pattern matches.
#[derive(Debug, Clone)]
pub(crate) enum Action {
    /// Emit the whole match as one token.
    Token(Category),
    /// Emit one token per capture group, in group order.
    Groups(Vec<Group>),
}

/// How one capture group of a [`Rule::groups`] rule is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Group {
    /// Emit the group as a single token with this category.
    Token(Category),
    /// Re-lex the group's text from the grammar's root state and splice the
    /// resulting tokens into the output.
    Delegate,
}

/// State transition as written in a rule, by state name.
#[derive(Debug, Clone, Copy)]
enum Transition {
    Stay,
    Push(&'static str),
    Pop,
    Goto(&'static str),
}

/// State transition with the target resolved to a state index.
#[derive(Debug, Clone, Copy)]
pub(crate) enum CompiledTransition {
    /// Remain in the current state.
    Stay,
    /// Push the target state onto the stack.
    Push(usize),
    /// Pop the current state off the stack.
    Pop,
    /// Replace the top of the stack with the target state.
    Goto(usize),
}

/// A single lexing rule: a pattern, an action, and a state transition.
///
/// Rules are tried in the order they were added to their state, and the first
/// pattern that matches at the cursor wins. Patterns are anchored at the
/// cursor automatically.
#[derive(Debug)]
pub struct Rule {
    pattern: String,
    action: Action,
    transition: Transition,
}

impl Rule {
    /// A rule that emits its whole match as one token of `category`.
    pub fn token(pattern: impl Into<String>, category: Category) -> Self {
        Self {
            pattern: pattern.into(),
            action: Action::Token(category),
            transition: Transition::Stay,
        }
    }

    /// A rule that emits one token per capture group.
    ///
    /// `groups[i]` describes capture group `i + 1`. Groups that did not
    /// participate in the match, or matched empty text, emit nothing.
    pub fn groups(pattern: impl Into<String>, groups: Vec<Group>) -> Self {
        Self {
            pattern: pattern.into(),
            action: Action::Groups(groups),
            transition: Transition::Stay,
        }
    }

    /// After this rule matches, push `state` onto the state stack.
    pub fn push(mut self, state: &'static str) -> Self {
        self.transition = Transition::Push(state);
        self
    }

    /// After this rule matches, pop the current state off the stack.
    ///
    /// Popping the last remaining state is a no-op.
    pub fn pop(mut self) -> Self {
        self.transition = Transition::Pop;
        self
    }

    /// After this rule matches, replace the current state with `state`.
    pub fn goto(mut self, state: &'static str) -> Self {
        self.transition = Transition::Goto(state);
        self
    }
}

/// Error raised by [`GrammarBuilder::build`] when a grammar is malformed.
#[derive(Debug, Clone, PartialEq)]
pub enum GrammarError {
    /// No state named `root` was defined.
    MissingRoot,
    /// Two states share a name.
    DuplicateState(String),
    /// A transition names a state that does not exist.
    UnknownState { from: String, to: String },
    /// A rule pattern failed to compile.
    Pattern {
        state: String,
        pattern: String,
        error: regex::Error,
    },
    /// A filename glob failed to compile.
    Glob { pattern: String, error: regex::Error },
}

impl std::fmt::Display for GrammarError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GrammarError::MissingRoot => write!(f, "grammar has no root state"),
            GrammarError::DuplicateState(name) => write!(f, "state defined twice: {}", name),
            GrammarError::UnknownState { from, to } => {
                write!(f, "state {} transitions to undefined state {}", from, to)
            }
            GrammarError::Pattern {
                state,
                pattern,
                error,
            } => {
                write!(f, "bad pattern {:?} in state {}: {}", pattern, state, error)
            }
            GrammarError::Glob { pattern, error } => {
                write!(f, "bad filename glob {:?}: {}", pattern, error)
            }
        }
    }
}

impl std::error::Error for GrammarError {}

/// Builder for [`Grammar`].
///
/// States are declared with [`state`](GrammarBuilder::state); the one named
/// `root` is where lexing starts.
#[derive(Debug)]
pub struct GrammarBuilder {
    name: String,
    tag: String,
    description: String,
    filenames: Vec<String>,
    mimetypes: Vec<String>,
    states: Vec<(&'static str, Vec<Rule>)>,
}

impl GrammarBuilder {
    /// Set the one-line description of the language.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Claim a filename glob, e.g. `"*.ch"`. `*` matches any run of
    /// characters and `?` matches one.
    pub fn filename(mut self, glob: impl Into<String>) -> Self {
        self.filenames.push(glob.into());
        self
    }

    /// Claim a MIME type, e.g. `"text/x-choral"`.
    pub fn mimetype(mut self, mimetype: impl Into<String>) -> Self {
        self.mimetypes.push(mimetype.into());
        self
    }

    /// Define a state and its rules, in match-priority order.
    pub fn state(mut self, name: &'static str, rules: Vec<Rule>) -> Self {
        self.states.push((name, rules));
        self
    }

    /// Compile all patterns and resolve all transitions.
    ///
    /// Fails if a state is missing or duplicated, a transition targets an
    /// undefined state, or a pattern or glob does not compile.
    pub fn build(self) -> Result<Grammar, GrammarError> {
        let mut indices = HashMap::new();
        for (i, (name, _)) in self.states.iter().enumerate() {
            if indices.insert(*name, i).is_some() {
                return Err(GrammarError::DuplicateState(name.to_string()));
            }
        }
        let Some(&root) = indices.get("root") else {
            return Err(GrammarError::MissingRoot);
        };

        let mut states = Vec::with_capacity(self.states.len());
        for (name, rules) in self.states {
            let mut compiled = Vec::with_capacity(rules.len());
            for rule in rules {
                // Anchoring here keeps rule patterns free of position syntax
                // while guaranteeing matches start exactly at the cursor.
                let regex = Regex::new(&format!(r"\A(?:{})", rule.pattern)).map_err(|error| {
                    GrammarError::Pattern {
                        state: name.to_string(),
                        pattern: rule.pattern.clone(),
                        error,
                    }
                })?;
                let transition = match rule.transition {
                    Transition::Stay => CompiledTransition::Stay,
                    Transition::Push(to) => CompiledTransition::Push(resolve(name, to, &indices)?),
                    Transition::Pop => CompiledTransition::Pop,
                    Transition::Goto(to) => CompiledTransition::Goto(resolve(name, to, &indices)?),
                };
                compiled.push(CompiledRule {
                    regex,
                    action: rule.action,
                    transition,
                });
            }
            states.push(State {
                name: name.to_string(),
                rules: compiled,
            });
        }

        let mut filename_matchers = Vec::with_capacity(self.filenames.len());
        for glob in &self.filenames {
            let regex = Regex::new(&glob_to_regex(glob)).map_err(|error| GrammarError::Glob {
                pattern: glob.clone(),
                error,
            })?;
            filename_matchers.push(regex);
        }

        Ok(Grammar {
            name: self.name,
            tag: self.tag,
            description: self.description,
            filenames: self.filenames,
            mimetypes: self.mimetypes,
            filename_matchers,
            states,
            root,
        })
    }
}

/// Look up a transition target, reporting the offending edge on failure.
fn resolve(
    from: &str,
    to: &'static str,
    indices: &HashMap<&'static str, usize>,
) -> Result<usize, GrammarError> {
    indices
        .get(to)
        .copied()
        .ok_or_else(|| GrammarError::UnknownState {
            from: from.to_string(),
            to: to.to_string(),
        })
}

/// Translate a filename glob into an anchored regex.
fn glob_to_regex(glob: &str) -> String {
    let mut pattern = String::with_capacity(glob.len() + 8);
    pattern.push_str(r"\A");
    for ch in glob.chars() {
        match ch {
            '*' => pattern.push_str(".*"),
            '?' => pattern.push('.'),
            _ => {
                let mut buf = [0; 4];
                pattern.push_str(&regex::escape(ch.encode_utf8(&mut buf)));
            }
        }
    }
    pattern.push_str(r"\z");
    pattern
}
