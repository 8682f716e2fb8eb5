//! The pattern-dispatch lexing engine.

use std::collections::VecDeque;

use tracing::trace;

use crate::grammar::{Action, CompiledTransition, Grammar, Group};
use crate::{Category, Span, Token};

/// Delegated substrings beyond this depth degrade to plain text.
const MAX_DELEGATION_DEPTH: usize = 8;

/// An iterator over the tokens of one source string.
///
/// The lexer holds a cursor and a stack of grammar states. At each step the
/// rules of the state on top of the stack are tried in order against the
/// text at the cursor; the first match emits tokens, applies its transition,
/// and advances the cursor. Text no rule claims is emitted one character at
/// a time as [`Category::Text`], so lexing never fails and the emitted
/// tokens always concatenate back to the input.
#[derive(Clone)]
pub struct Lexer<'g, 'src> {
    grammar: &'g Grammar,
    /// The source text being lexed.
    source: &'src str,
    /// Current byte position in `source`.
    pos: u32,
    /// Stack of state indices; the top entry is the active state.
    stack: Vec<usize>,
    /// Tokens produced but not yet handed out.
    queue: VecDeque<Token<'src>>,
    /// How many delegations deep this lexer runs; zero at top level.
    depth: usize,
}

impl<'g, 'src> Lexer<'g, 'src> {
    /// Create a lexer over `source`, starting in the grammar's root state.
    pub fn new(grammar: &'g Grammar, source: &'src str) -> Self {
        Self::with_depth(grammar, source, 0)
    }

    fn with_depth(grammar: &'g Grammar, source: &'src str, depth: usize) -> Self {
        Self {
            grammar,
            source,
            pos: 0,
            stack: vec![grammar.root],
            queue: VecDeque::new(),
            depth,
        }
    }

    /// Get the current byte position.
    #[inline]
    pub fn position(&self) -> u32 {
        self.pos
    }

    /// Check if the cursor has consumed all of the source.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos as usize == self.source.len()
    }

    /// Create a token for the given span.
    fn token(&self, category: Category, span: Span) -> Token<'src> {
        let text = span.slice(self.source);
        trace!("Token {:?} at {:?}: {:?}", category, span, text);
        Token::new(category, span, text)
    }

    /// Try the active state's rules at the cursor, queueing whatever tokens
    /// result and advancing the cursor by at least one byte.
    fn step(&mut self) {
        let source = self.source;
        let base = self.pos;
        let rest = &source[base as usize..];
        let grammar = self.grammar;
        // The stack is never empty: it starts with the root state and pops
        // of the last frame are clamped.
        let current = *self.stack.last().unwrap();
        let state = &grammar.states[current];

        for rule in &state.rules {
            let Some(caps) = rule.regex.captures(rest) else {
                continue;
            };
            let whole = caps.get(0).unwrap();
            // A zero-length match would stall the cursor.
            if whole.end() == 0 {
                continue;
            }

            match &rule.action {
                Action::Token(category) => {
                    let span = Span::new(base, base + whole.end() as u32);
                    let token = self.token(*category, span);
                    self.queue.push_back(token);
                }
                Action::Groups(groups) => {
                    for (i, group) in groups.iter().enumerate() {
                        let Some(m) = caps.get(i + 1) else {
                            continue;
                        };
                        if m.is_empty() {
                            continue;
                        }
                        let span = Span::new(base + m.start() as u32, base + m.end() as u32);
                        match group {
                            Group::Token(category) => {
                                let token = self.token(*category, span);
                                self.queue.push_back(token);
                            }
                            Group::Delegate => self.delegate(span),
                        }
                    }
                }
            }

            match rule.transition {
                CompiledTransition::Stay => {}
                CompiledTransition::Push(target) => self.stack.push(target),
                CompiledTransition::Pop => {
                    // Popping the last frame is clamped to a no-op.
                    if self.stack.len() > 1 {
                        self.stack.pop();
                    }
                }
                CompiledTransition::Goto(target) => {
                    let top = self.stack.len() - 1;
                    self.stack[top] = target;
                }
            }

            self.pos = base + whole.end() as u32;
            return;
        }

        // No rule matched: emit one character as plain text and move on.
        trace!("no rule matched in state {:?} at {}", state.name, base);
        let Some(c) = rest.chars().next() else {
            return;
        };
        let span = Span::new(base, base + c.len_utf8() as u32);
        let token = self.token(Category::Text, span);
        self.queue.push_back(token);
        self.pos = span.end;
    }

    /// Re-lex the text under `span` from the root state and splice the
    /// resulting tokens into the queue, re-based to `span`'s coordinates.
    fn delegate(&mut self, span: Span) {
        if self.depth >= MAX_DELEGATION_DEPTH {
            // Runaway self-delegation degrades to plain text.
            let token = self.token(Category::Text, span);
            self.queue.push_back(token);
            return;
        }
        let sub = Lexer::with_depth(self.grammar, span.slice(self.source), self.depth + 1);
        for token in sub {
            self.queue.push_back(Token::new(
                token.category,
                token.span.shift(span.start),
                token.text,
            ));
        }
    }
}

impl<'g, 'src> Iterator for Lexer<'g, 'src> {
    type Item = Token<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(token) = self.queue.pop_front() {
                return Some(token);
            }
            if self.is_eof() {
                return None;
            }
            self.step();
        }
    }
}
