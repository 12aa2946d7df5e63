use std::io::{BufRead, Write};

/// Yes/no confirmation asked before a remote mutation.
pub trait Confirm {
    fn ask(&self, message: &str) -> bool;
}

/// Asks on the terminal. Anything other than `y`/`yes` is a no, including EOF.
pub struct InteractiveConfirm;

impl Confirm for InteractiveConfirm {
    fn ask(&self, message: &str) -> bool {
        let stdin = std::io::stdin();
        ask_with(&mut stdin.lock(), &mut std::io::stdout(), message)
    }
}

/// Fixed answer, for non-interactive runs. Prints the question so output stays comparable.
pub struct FixedConfirm {
    pub answer: bool,
}

impl Confirm for FixedConfirm {
    fn ask(&self, message: &str) -> bool {
        println!("{}", message);
        self.answer
    }
}

pub fn ask_with(input: &mut impl BufRead, out: &mut impl Write, message: &str) -> bool {
    let _ = write!(out, "{} [y/N]: ", message);
    let _ = out.flush();
    let mut line = String::new();
    if input.read_line(&mut line).is_err() {
        return false;
    }
    matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
