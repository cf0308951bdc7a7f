//! Operation results paired with their post-commit notices.

use ideahub_events::Notice;

/// The value a workflow operation produced plus the notices to deliver once
/// the caller is satisfied the write has committed.
#[derive(Debug, Clone)]
#[must_use = "notices are only delivered when handed to a dispatcher"]
pub struct Outcome<T> {
    pub value: T,
    pub notices: Vec<Notice>,
}

impl<T> Outcome<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            notices: Vec::new(),
        }
    }

    pub fn with_notice(mut self, notice: Notice) -> Self {
        self.notices.push(notice);
        self
    }

    pub fn into_parts(self) -> (T, Vec<Notice>) {
        (self.value, self.notices)
    }
}
