use std::time::Duration;

/// Text returned by a completion call
#[derive(Debug, Clone)]
pub struct CompletionOutput {
    /// Concatenated response text
    pub text: String,
    /// Model that produced the response
    pub model: String,
    /// Duration of the call
    pub duration: Duration,
}

impl CompletionOutput {
    pub fn new(text: String, model: String, duration: Duration) -> Self {
        Self {
            text,
            model,
            duration,
        }
    }

    /// Count lines in the response
    pub fn lines(&self) -> usize {
        self.text.lines().count()
    }
}

