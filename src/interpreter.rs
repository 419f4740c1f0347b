use std::io::{self, BufRead, Write};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use crate::brace::BraceMatcher;
use crate::error::InterpreterError;
use crate::instruction::{self, Instruction};
use crate::tape::{Cell, Tape};

type OutputSink = Box<dyn FnMut(u8) + Send>;
type InputProvider = Box<dyn FnMut() -> io::Result<Option<String>> + Send>;

/// Controls for cooperative cancellation and step limiting.
#[derive(Clone)]
pub struct StepControl {
    pub max_steps: Option<usize>,
    pub cancel_flag: Arc<AtomicBool>,
}

impl StepControl {
    pub fn new(max_steps: Option<usize>, cancel_flag: Arc<AtomicBool>) -> Self {
        Self { max_steps, cancel_flag }
    }
}

/// A Brainfuck interpreter.
///
/// The interpreter owns:
/// - the filtered instruction sequence and its precomputed [`BraceMatcher`],
/// - a [`Tape`] that grows to the right as the data pointer advances,
/// - the instruction pointer into the program.
///
/// Output (`.`) and input (`,`) go through optional hooks and fall back to
/// stdout and stdin.
pub struct Interpreter {
    program: Vec<Instruction>,
    braces: BraceMatcher,
    tape: Tape,
    ip: usize,
    output_sink: Option<OutputSink>,
    input_provider: Option<InputProvider>,
}

impl Interpreter {
    /// Load `code`, dropping every non-instruction character.
    ///
    /// Fails with [`InterpreterError::UnmatchedBrace`] if any bracket has no
    /// partner, so malformed programs are rejected before they run.
    pub fn new(code: &str) -> Result<Self, InterpreterError> {
        let interpreter = Self::new_lenient(code);
        interpreter.braces.validate()?;
        Ok(interpreter)
    }

    /// Load `code` without checking bracket balance.
    ///
    /// An unmatched bracket only becomes an error when a jump through it is
    /// actually taken.
    pub fn new_lenient(code: &str) -> Self {
        let program = instruction::parse(code);
        let braces = BraceMatcher::new(&program);
        Self {
            program,
            braces,
            tape: Tape::new(),
            ip: 0,
            output_sink: None,
            input_provider: None,
        }
    }

    /// Provide an output sink. When set, '.' sends bytes to this sink instead of stdout.
    pub fn set_output_sink<F>(&mut self, sink: F)
    where
        F: FnMut(u8) + Send + 'static,
    {
        self.output_sink = Some(Box::new(sink));
    }

    /// Provide an input provider. When set, ',' asks it for a line instead of stdin.
    /// Returning `Ok(None)` indicates EOF.
    pub fn set_input_provider<F>(&mut self, provider: F)
    where
        F: FnMut() -> io::Result<Option<String>> + Send + 'static,
    {
        self.input_provider = Some(Box::new(provider));
    }

    pub fn program(&self) -> &[Instruction] {
        &self.program
    }

    /// The filtered program as text. Error positions index into this string.
    pub fn source(&self) -> String {
        self.program.iter().map(|i| i.as_char()).collect()
    }

    pub fn braces(&self) -> &BraceMatcher {
        &self.braces
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    pub fn instruction_pointer(&self) -> usize {
        self.ip
    }

    pub fn data_pointer(&self) -> usize {
        self.tape.pointer()
    }

    /// True once the instruction pointer has run past the end of the program.
    pub fn is_finished(&self) -> bool {
        self.ip >= self.program.len()
    }

    /// Execute the instruction under the instruction pointer, then advance it.
    /// Does nothing once the program is finished.
    pub fn step(&mut self) -> Result<(), InterpreterError> {
        let Some(&instr) = self.program.get(self.ip) else {
            return Ok(());
        };
        self.apply(instr, false)?;
        self.ip += 1;
        Ok(())
    }

    /// Apply the effect of `instr`. Loop jumps leave the instruction pointer on
    /// the partner bracket; the caller's unconditional advance moves past it.
    ///
    /// In debug mode I/O is suppressed and a description of the action is returned.
    fn apply(&mut self, instr: Instruction, debug: bool) -> Result<Option<String>, InterpreterError> {
        let ip = self.ip;
        let action = match instr {
            Instruction::Right => {
                self.tape.increment_data_pointer();
                debug.then(|| format!("Moved pointer head to index {}", self.tape.pointer()))
            }
            Instruction::Left => {
                self.tape
                    .decrement_data_pointer()
                    .map_err(|_| InterpreterError::TapeUnderflow { ip })?;
                debug.then(|| format!("Moved pointer head to index {}", self.tape.pointer()))
            }
            Instruction::Increment => {
                let before = self.tape.get();
                self.tape.increment_cell();
                debug.then(|| {
                    format!("Increment cell[{}] from {} to {}", self.tape.pointer(), before, self.tape.get())
                })
            }
            Instruction::Decrement => {
                let before = self.tape.get();
                self.tape.decrement_cell();
                debug.then(|| {
                    format!("Decrement cell[{}] from {} to {}", self.tape.pointer(), before, self.tape.get())
                })
            }
            Instruction::Output => {
                let byte = output_byte(self.tape.get());
                if debug {
                    Some(format!("Output byte {byte} (suppressed in debug)"))
                } else {
                    self.write_byte(byte)?;
                    None
                }
            }
            Instruction::Input => {
                if debug {
                    self.tape.reset_cell();
                    Some("Read line -> simulated EOF (set cell to 0)".to_string())
                } else {
                    let code = self.read_char_code()?;
                    self.tape.reset_cell();
                    for _ in 0..code {
                        self.tape.increment_cell();
                    }
                    None
                }
            }
            Instruction::LoopOpen => {
                if self.tape.get() == 0 {
                    let close = self.braces.lookup(ip)?;
                    self.ip = close;
                    debug.then(|| format!("Cell is 0; jump forward to matching ']' at IP {close}"))
                } else {
                    debug.then(|| "Enter loop (cell != 0)".to_string())
                }
            }
            Instruction::LoopClose => {
                if self.tape.get() != 0 {
                    let open = self.braces.reverse_lookup(ip)?;
                    self.ip = open;
                    debug.then(|| format!("Cell != 0; jump back to matching '[' at IP {open}"))
                } else {
                    debug.then(|| "Exit loop (cell is 0)".to_string())
                }
            }
        };
        Ok(action)
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), InterpreterError> {
        match self.output_sink.as_mut() {
            Some(sink) => {
                sink(byte);
                Ok(())
            }
            None => io::stdout()
                .write_all(&[byte])
                .map_err(|source| InterpreterError::Io { ip: self.ip, source }),
        }
    }

    fn read_char_code(&mut self) -> Result<Cell, InterpreterError> {
        let line = match self.input_provider.as_mut() {
            Some(provider) => provider(),
            None => read_stdin_line(),
        };
        let line = line.map_err(|source| InterpreterError::Io { ip: self.ip, source })?;
        Ok(line.as_deref().map_or(0, first_char_code))
    }

    /// Internal executor shared by run and run_debug.
    fn execute(&mut self, debug: bool, step_control: Option<&StepControl>) -> Result<(), InterpreterError> {
        let mut step: usize = 0;
        if debug {
            println!("STEP | IP  | PTR | CELL | INSTR | ACTION");
            println!("-----+-----+-----+------+-------+------------------------------------------------");
        }

        while self.ip < self.program.len() {
            if let Some(ctrl) = step_control {
                if ctrl.cancel_flag.load(Ordering::Relaxed) {
                    return Err(InterpreterError::Canceled);
                }
                if let Some(max) = ctrl.max_steps {
                    if step >= max {
                        return Err(InterpreterError::StepLimitExceeded { limit: max });
                    }
                }
            }

            let ip = self.ip;
            let instr = self.program[ip];
            let (ptr_before, cell_before) = (self.tape.pointer(), self.tape.get());

            let action = self.apply(instr, debug)?;

            if debug {
                println!(
                    "{:<4} | {:<3} | {:<3} | {:<4} |  {}    | {}",
                    step,
                    ip,
                    ptr_before,
                    cell_before,
                    instr,
                    action.unwrap_or_default()
                );
            }

            step += 1;
            self.ip += 1;
        }

        if !debug && self.output_sink.is_none() {
            io::stdout()
                .flush()
                .map_err(|source| InterpreterError::Io { ip: self.ip, source })?;
        }
        Ok(())
    }

    /// Execute the program until the instruction pointer runs off the end.
    pub fn run(&mut self) -> Result<(), InterpreterError> {
        self.execute(false, None)
    }

    /// Debug-run the program, printing a step-by-step table of operations
    /// instead of producing I/O side effects. The interpreter state advances
    /// exactly as it would during a real run, but:
    /// - '.' does not write the byte; the action is logged instead
    /// - ',' does not read input; EOF is simulated and the cell set to 0
    pub fn run_debug(&mut self) -> Result<(), InterpreterError> {
        self.execute(true, None)
    }

    /// Execute with cooperative cancellation and optional step limit.
    pub fn run_with_control(&mut self, step_control: StepControl) -> Result<(), InterpreterError> {
        self.execute(false, Some(&step_control))
    }

    /// Debug-run with cooperative cancellation and optional step limit.
    pub fn run_debug_with_control(&mut self, step_control: StepControl) -> Result<(), InterpreterError> {
        self.execute(true, Some(&step_control))
    }
}

/// Byte written for a cell value: the value modulo 256.
fn output_byte(value: Cell) -> u8 {
    value.rem_euclid(256) as u8
}

fn read_stdin_line() -> io::Result<Option<String>> {
    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line)? {
        0 => Ok(None),
        _ => Ok(Some(line)),
    }
}

/// Character code of the first character on `line` once its line separator
/// is stripped. An empty line reads as 0.
fn first_char_code(line: &str) -> Cell {
    let line = line.strip_suffix('\n').unwrap_or(line);
    let line = line.strip_suffix('\r').unwrap_or(line);
    line.chars().next().map_or(0, |c| Cell::from(u32::from(c)))
}
