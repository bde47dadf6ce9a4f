use std::cell::RefCell;

/// Receives the text emitted by the `log` primitive during reduction.
pub trait Output {
    fn emit(&self, text: &str);
}

/// Writes every message on its own line to standard output.
#[derive(Debug, Clone, Copy, Default)]
pub struct Stdout;

impl Output for Stdout {
    fn emit(&self, text: &str) {
        println!("{text}");
    }
}

/// Collects emitted messages in order.
#[derive(Debug, Default)]
pub struct Captured {
    lines: RefCell<Vec<String>>,
}

impl Captured {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }

    /// Remove and return everything emitted so far.
    pub fn take(&self) -> Vec<String> {
        self.lines.take()
    }
}

impl Output for Captured {
    fn emit(&self, text: &str) {
        self.lines.borrow_mut().push(text.to_owned());
    }
}
