pub mod check;
pub mod run;

use std::fs;
use std::io::{self, Write};

/// Program text from `--file` or from the concatenated positional parts.
/// On a read failure the error is printed and the exit code returned.
pub fn read_code(program: &str, file: Option<String>, code: Vec<String>) -> Result<String, i32> {
    let Some(path) = file else {
        return Ok(code.join(""));
    };

    fs::read_to_string(&path).map_err(|e| {
        eprintln!("{program}: failed to read code file as UTF-8: {e}");
        let _ = io::stderr().flush();
        1
    })
}
