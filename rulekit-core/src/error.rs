//! The structured, nested error tree (spec §4.6/§7).
//!
//! Every failure path produces an [`Error`]. Composite rules wrap or
//! aggregate child errors rather than discarding them: `Or` keeps every
//! alternative's failure (`NoAlternativeMatched`), `And`/`Reference` keep the
//! one child that actually failed (`RuleContext` for the latter).

use std::fmt;

use thiserror::Error as ThisError;

/// The tagged kind of a failure. Carries its own message via `thiserror`;
/// the surrounding [`Error`] carries the rest of the tree (rule identity,
/// state snapshot, children).
#[derive(ThisError, Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    #[error("empty stream")]
    EmptyStream,

    #[error("head mismatch: {0}")]
    HeadMismatch(String),

    #[error("unknown rule `{0}`")]
    UnknownRule(String),

    #[error("no alternative matched")]
    NoAlternativeMatched,

    #[error("while applying rule `{0}`")]
    RuleContext(String),

    #[error("not-rule was violated: inner rule unexpectedly succeeded")]
    NotViolated,

    #[error("invalid construction: {0}")]
    InvalidConstruction(String),

    #[error("unconsumed input remains after the root rule succeeded")]
    UnconsumedInput,

    #[error("rule succeeded without consuming input while the stream was non-empty")]
    NonProgress,
}

/// A tagged tree: optional message, optional rule identifier, optional state
/// snapshot, and a list of child errors (possibly empty).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    pub kind: ErrorKind,
    pub rule: Option<String>,
    pub state: Option<String>,
    pub children: Vec<Error>,
}

impl Error {
    fn leaf(kind: ErrorKind) -> Self {
        Error {
            kind,
            rule: None,
            state: None,
            children: Vec::new(),
        }
    }

    pub fn empty_stream() -> Self {
        Error::leaf(ErrorKind::EmptyStream)
    }

    pub fn head_mismatch(description: impl Into<String>) -> Self {
        Error::leaf(ErrorKind::HeadMismatch(description.into()))
    }

    pub fn unknown_rule(name: impl Into<String>) -> Self {
        Error::leaf(ErrorKind::UnknownRule(name.into()))
    }

    pub fn not_violated() -> Self {
        Error::leaf(ErrorKind::NotViolated)
    }

    pub fn invalid_construction(message: impl Into<String>) -> Self {
        Error::leaf(ErrorKind::InvalidConstruction(message.into()))
    }

    pub fn unconsumed_input() -> Self {
        Error::leaf(ErrorKind::UnconsumedInput)
    }

    pub fn non_progress() -> Self {
        Error::leaf(ErrorKind::NonProgress)
    }

    /// Wraps a child failure with the name of the rule being applied
    /// (`Reference`'s `RuleContext`).
    pub fn rule_context(rule_name: impl Into<String>, child: Error) -> Self {
        let rule_name = rule_name.into();
        Error {
            kind: ErrorKind::RuleContext(rule_name.clone()),
            rule: Some(rule_name),
            state: None,
            children: vec![child],
        }
    }

    /// Aggregates every alternative's failure, in branch order (`Or`).
    pub fn no_alternative_matched(children: Vec<Error>) -> Self {
        Error {
            kind: ErrorKind::NoAlternativeMatched,
            rule: None,
            state: None,
            children,
        }
    }

    /// Attaches a rendered snapshot of the state at the point of failure.
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// Depth-first count of leaf (childless) errors under this node.
    pub fn leaf_count(&self) -> usize {
        if self.children.is_empty() {
            1
        } else {
            self.children.iter().map(Error::leaf_count).sum()
        }
    }

    fn fmt_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let indent = "  ".repeat(depth);
        write!(f, "{indent}{}", self.kind)?;
        if let Some(state) = &self.state {
            write!(f, " (at {state})")?;
        }
        writeln!(f)?;
        for child in &self.children {
            child.fmt_indented(f, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_indented(f, 0)
    }
}

impl std::error::Error for Error {}
