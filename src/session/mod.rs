/// The summary most recently produced in one interactive session.
///
/// Created per invocation and handed explicitly to the actions that need it.
/// Each successful generation replaces the previous value.
#[derive(Debug, Default, Clone)]
pub struct Session {
    summary: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the latest summary, replacing any earlier one
    pub fn set(&mut self, summary: impl Into<String>) {
        self.summary = Some(summary.into());
    }

    pub fn get(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    pub fn clear(&mut self) {
        self.summary = None;
    }

    pub fn has_summary(&self) -> bool {
        self.summary.is_some()
    }
}
