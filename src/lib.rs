//! A small Brainfuck interpreter library.
//!
//! Programs are filtered down to the eight instruction characters, loop
//! brackets are paired once up front, and execution runs against a tape that
//! grows to the right on demand.
//!
//! Features and behaviors:
//! - Any character outside `><+-.,[]` is a comment and silently dropped.
//! - The tape starts as a single zero cell and appends cells as the data
//!   pointer moves right. Moving left of cell 0 is an error.
//! - Cells are signed 64-bit integers; `.` writes the value modulo 256.
//! - Input `,` reads one line and stores the code of its first character;
//!   an empty line or EOF stores 0.
//! - Unmatched brackets are rejected at load time by [`Interpreter::new`], or
//!   at jump time by [`Interpreter::new_lenient`].
//!
//! Quick start:
//!
//! ```no_run
//! use bfi::Interpreter;
//!
//! let code = "++++++++[>++++++++<-]>+.";
//! let mut bf = Interpreter::new(code).expect("brackets are balanced");
//! bf.run().expect("program should run");
//! println!();
//! ```
//!
//! Capturing output instead of writing to stdout:
//!
//! ```
//! use std::sync::{Arc, Mutex};
//! use bfi::Interpreter;
//!
//! let out = Arc::new(Mutex::new(Vec::new()));
//! let sink = out.clone();
//!
//! let mut bf = Interpreter::new("++++++++[>++++++++<-]>.").unwrap();
//! bf.set_output_sink(move |b| sink.lock().unwrap().push(b));
//! bf.run().unwrap();
//!
//! assert_eq!(*out.lock().unwrap(), b"@");
//! ```

pub mod brace;
pub mod cli_util;
pub mod config;
pub mod error;
pub mod instruction;
pub mod interpreter;
pub mod tape;
pub mod theme;

pub use brace::BraceMatcher;
pub use error::{BracketKind, InterpreterError, TapeUnderflow, UnmatchedBrace};
pub use instruction::{filter, parse, Instruction, VALID_CHARS};
pub use interpreter::{Interpreter, StepControl};
pub use tape::{Cell, Tape};
