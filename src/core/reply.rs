use crate::domain::model::{HolderHandle, Role};
use std::collections::BTreeMap;

/// Outcome of a single contract call.
///
/// Carries the call's value together with the messages produced while
/// computing it and any holder handles the host should persist. Nothing here
/// outlives the call.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply<T> {
    pub value: T,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub successes: Vec<String>,
    pub handles: BTreeMap<Role, HolderHandle>,
}

impl<T> Reply<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            errors: Vec::new(),
            warnings: Vec::new(),
            successes: Vec::new(),
            handles: BTreeMap::new(),
        }
    }

    /// Shorthand for contract methods the registrar cannot serve.
    pub fn unsupported(value: T, message: &str) -> Self {
        let mut reply = Self::new(value);
        reply.error(message);
        reply
    }

    pub fn error(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!("Recording error: {}", message);
        self.errors.push(message);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.successes.push(message.into());
    }

    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn with_value<U>(self, value: U) -> Reply<U> {
        Reply {
            value,
            errors: self.errors,
            warnings: self.warnings,
            successes: self.successes,
            handles: self.handles,
        }
    }

    /// Moves the messages and handles of a nested call into this reply and
    /// hands back its value.
    pub fn absorb<U>(&mut self, other: Reply<U>) -> U {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
        self.successes.extend(other.successes);
        self.handles.extend(other.handles);
        other.value
    }
}
