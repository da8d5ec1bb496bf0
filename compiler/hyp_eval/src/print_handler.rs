//! Where `print` output goes.
//!
//! The binary writes to stdout; tests and embedders capture into a buffer.

use std::io::Write;
use std::sync::Arc;

use parking_lot::Mutex;

/// Destination for program output.
pub enum PrintHandlerImpl {
    Stdout,
    /// Accumulates output for later inspection.
    Buffer(Mutex<String>),
    /// Discards output.
    Silent,
}

impl PrintHandlerImpl {
    /// Write `line` followed by a newline.
    pub fn println(&self, line: &str) {
        match self {
            Self::Stdout => {
                let mut out = std::io::stdout().lock();
                // A closed stdout is not a runtime error of the program.
                let _ = writeln!(out, "{line}");
            }
            Self::Buffer(buffer) => {
                let mut buffer = buffer.lock();
                buffer.push_str(line);
                buffer.push('\n');
            }
            Self::Silent => {}
        }
    }

    /// Everything captured so far. Empty for non-capturing handlers.
    pub fn output(&self) -> String {
        match self {
            Self::Buffer(buffer) => buffer.lock().clone(),
            Self::Stdout | Self::Silent => String::new(),
        }
    }

    pub fn clear(&self) {
        if let Self::Buffer(buffer) = self {
            buffer.lock().clear();
        }
    }
}

/// Handle shared between the interpreter and whoever reads the output.
pub type SharedPrintHandler = Arc<PrintHandlerImpl>;

pub fn stdout_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Stdout)
}

pub fn buffer_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Buffer(Mutex::new(String::new())))
}

pub fn silent_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Silent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn buffer_captures_lines() {
        let handler = buffer_handler();
        handler.println("hello");
        handler.println("world");
        assert_eq!(handler.output(), "hello\nworld\n");
    }

    #[test]
    fn buffer_clear() {
        let handler = buffer_handler();
        handler.println("first");
        handler.clear();
        handler.println("second");
        assert_eq!(handler.output(), "second\n");
    }

    #[test]
    fn shared_handle_sees_interpreter_output() {
        let handler = buffer_handler();
        let reader = Arc::clone(&handler);
        handler.println("x");
        assert_eq!(reader.output(), "x\n");
    }

    #[test]
    fn silent_and_stdout_capture_nothing() {
        let silent = silent_handler();
        silent.println("dropped");
        assert_eq!(silent.output(), "");
        assert_eq!(stdout_handler().output(), "");
    }
}
