use std::io::{self, IsTerminal, Write};
use nu_ansi_term::Style;
use crate::InterpreterError;
use crate::theme::catppuccin::Mocha;

/// Pretty-print a structured InterpreterError with caret positioning.
/// If `program` is `Some("bf")`, prefix messages with "bf: ..."
///
/// `code` must be the filtered program; error positions index into it.
pub fn print_interpreter_error(program: Option<&str>, code: &str, err: &InterpreterError) {
    let prefix_program = |msg: &str| {
        if let Some(p) = program {
            format!("{p}: {msg}")
        } else {
            msg.to_string()
        }
    };

    let msg = match err {
        InterpreterError::TapeUnderflow { .. } => {
            "Runtime error: tape underflow (cannot move left of cell 0)".to_string()
        }
        InterpreterError::UnmatchedBrace { kind, .. } => {
            format!("Bracket error: unmatched bracket {kind}")
        }
        InterpreterError::Io { source, .. } => format!("I/O error: {source}"),
        InterpreterError::StepLimitExceeded { .. } | InterpreterError::Canceled => err.to_string(),
    };
    let msg = prefix_program(&msg);

    // Errors tied to an instruction get a caret under it; run-control aborts do not
    match err.instruction_pointer() {
        Some(ip) => print_error_with_context(&msg, code, ip),
        None => {
            eprintln!("{}", paint(Mocha::PEACH.bold(), &msg));
            let _ = io::stderr().flush();
        }
    }
}

/// Print a concise error with instruction index and a caret context window,
/// working with UTF-8 by slicing using char indices.
pub fn print_error_with_context(prefix: &str, code: &str, pos: usize) {
    eprintln!("{} at instruction {pos}", paint(Mocha::RED.bold(), prefix));

    // Show a short window around the position for context
    const WINDOW_CHARS: usize = 32;

    let total_chars = code.chars().count();
    let start_char = pos.saturating_sub(WINDOW_CHARS);
    let end_char = (pos + WINDOW_CHARS + 1).min(total_chars);

    let start_byte = char_to_byte_index(code, start_char);
    let end_byte = char_to_byte_index(code, end_char);
    let slice = &code[start_byte..end_byte];

    eprintln!("  {}", paint(Style::new().fg(Mocha::SURFACE2), slice));

    // Caret under the exact position
    let caret_offset_chars = pos.saturating_sub(start_char);
    let underline = format!("{}^", " ".repeat(caret_offset_chars));
    eprintln!("  {}", paint(Mocha::YELLOW.normal(), &underline));
    let _ = io::stderr().flush();
}

/// Apply `style` only when stderr is a terminal, so piped output stays plain.
fn paint(style: Style, text: &str) -> String {
    if io::stderr().is_terminal() {
        style.paint(text).to_string()
    } else {
        text.to_string()
    }
}

/// Convert a char index into a byte index in the given UTF-8 string.
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map_or(s.len(), |(byte_idx, _)| byte_idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn char_index_maps_to_byte_index() {
        assert_eq!(char_to_byte_index("+-[]", 0), 0);
        assert_eq!(char_to_byte_index("+-[]", 2), 2);
        assert_eq!(char_to_byte_index("é+", 1), 2);
        assert_eq!(char_to_byte_index("+-", 5), 2);
    }
}
