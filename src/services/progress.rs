use std::io::Write;

const FRAMES: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Single-line spinner redrawn on demand. It never ticks on its own: the
/// caller advances it after each unit of work.
pub struct Spinner<W: Write> {
    sink: W,
    message: String,
    frame: usize,
    enabled: bool,
}

impl Spinner<std::io::Stderr> {
    /// Spinner on stderr, silent unless stderr is a terminal.
    pub fn stderr(message: impl Into<String>) -> Self {
        use std::io::IsTerminal;
        let sink = std::io::stderr();
        let enabled = sink.is_terminal();
        Self::new(sink, message, enabled)
    }
}

impl<W: Write> Spinner<W> {
    pub fn new(sink: W, message: impl Into<String>, enabled: bool) -> Self {
        Self {
            sink,
            message: message.into(),
            frame: 0,
            enabled,
        }
    }

    pub fn start(&mut self) {
        self.draw(None);
    }

    pub fn update(&mut self, count: usize) {
        self.frame = (self.frame + 1) % FRAMES.len();
        self.draw(Some(count));
    }

    /// Clears the spinner line.
    pub fn stop(&mut self) {
        if !self.enabled {
            return;
        }
        let _ = write!(self.sink, "\r\x1b[K");
        let _ = self.sink.flush();
        self.enabled = false;
    }

    fn draw(&mut self, count: Option<usize>) {
        if !self.enabled {
            return;
        }
        let _ = match count {
            Some(n) => write!(
                self.sink,
                "\r\x1b[K{} {}... downloaded {} logs...",
                FRAMES[self.frame], self.message, n
            ),
            None => write!(self.sink, "\r\x1b[K{} {}...", FRAMES[self.frame], self.message),
        };
        let _ = self.sink.flush();
    }
}

impl<W: Write> Drop for Spinner<W> {
    fn drop(&mut self) {
        self.stop();
    }
}
