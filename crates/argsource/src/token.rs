use serde_json::Value as Json;
use std::collections::VecDeque;

/// A single value token handed to [`Value::parse`](crate::model::Value::parse).
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    value: Json,
}

impl Token {
    /// Token for a literal flag value given as a raw string (command line, environment).
    pub fn flag_value(raw: impl Into<String>) -> Self {
        Self {
            value: Json::String(raw.into()),
        }
    }

    /// Token carrying an already-decoded value, e.g. one produced by a resolver.
    pub fn typed(value: Json) -> Self {
        Self { value }
    }

    pub fn value(&self) -> &Json {
        &self.value
    }

    pub fn into_value(self) -> Json {
        self.value
    }
}

/// Ordered token stream consumed front to back.
#[derive(Debug, Clone, Default)]
pub struct Scanner {
    tokens: VecDeque<Token>,
}

impl Scanner {
    pub fn from_tokens(tokens: impl IntoIterator<Item = Token>) -> Self {
        Self {
            tokens: tokens.into_iter().collect(),
        }
    }

    pub fn pop(&mut self) -> Option<Token> {
        self.tokens.pop_front()
    }

    pub fn peek(&self) -> Option<&Token> {
        self.tokens.front()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
