// Lexical errors are pushed to a reporter rather than raised; the
// scanner keeps going and always reaches the Eof token.
pub trait ErrorReporter {
    fn error(&mut self, line: u32, message: &str);
    fn had_error(&self) -> bool;
    // Clears the error flag (used by the REPL between input lines).
    fn reset(&mut self);
}

#[derive(Clone, Debug, Default)]
pub struct ConsoleErrorReporter {
    had_error: bool,
}

impl ConsoleErrorReporter {
    pub fn new() -> ConsoleErrorReporter {
        ConsoleErrorReporter {
            had_error: false,
        }
    }
}

impl ErrorReporter for ConsoleErrorReporter {
    fn error(&mut self, line: u32, message: &str) {
        eprintln!("[Line {}] Error: {}", line, message);
        self.had_error = true;
    }

    fn had_error(&self) -> bool {
        self.had_error
    }

    fn reset(&mut self) {
        self.had_error = false;
    }
}
