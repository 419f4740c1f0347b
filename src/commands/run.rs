use clap::Args;
use std::thread;
use std::io::{self, Write};
use std::sync::{mpsc, Arc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use bfi::{config, Interpreter, InterpreterError, StepControl};
use bfi::cli_util::print_interpreter_error;

// How often the waiting thread checks for Ctrl+C and the deadline
const POLL_INTERVAL: Duration = Duration::from_millis(20);

#[derive(Args, Debug)]
#[command(disable_help_flag = true)]
pub struct RunArgs {
    /// Print a step-by-step table of operations instead of executing
    #[arg(short = 'd', long = "debug")]
    pub debug: bool,

    /// Report unmatched brackets only when a jump through them is taken
    #[arg(long = "lenient")]
    pub lenient: bool,

    /// Read Brainfuck code from PATH instead of positional "<code>"
    #[arg(short = 'f', long = "file")]
    pub file: Option<String>,

    /// Concatenated Brainfuck code parts
    #[arg(value_name = "code", trailing_var_arg = true, allow_hyphen_values = true)]
    pub code: Vec<String>,

    /// Wall-clock timeout in milliseconds (fallback BF_TIMEOUT_MS, then bf.toml; default none)
    #[arg(long = "timeout", value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Maximum interpreter steps before abort (fallback BF_MAX_STEPS, then bf.toml; default unlimited)
    #[arg(long = "max-steps", value_name = "N")]
    pub max_steps: Option<u64>,

    /// Show this help
    #[arg(short = 'h', long = "help", action = clap::ArgAction::SetTrue)]
    pub help: bool,
}

enum Outcome {
    Finished(Result<(), InterpreterError>),
    TimedOut,
    Interrupted,
    WorkerLost,
}

pub fn run(program: &str, args: RunArgs) -> i32 {
    if args.help {
        usage_and_exit(program, 0);
    }

    let RunArgs {
        debug,
        lenient,
        file,
        code,
        timeout_ms,
        max_steps,
        ..
    } = args;

    if file.is_none() && code.is_empty() {
        usage_and_exit(program, 2);
    }

    if file.is_some() && !code.is_empty() {
        eprintln!("{program}: cannot use positional code together with --file");
        usage_and_exit(program, 2);
    }

    let code_str = match super::read_code(program, file, code) {
        Ok(s) => s,
        Err(exit_code) => return exit_code,
    };

    // Resolve limits: flags -> env -> bf.toml -> defaults
    let timeout_ms = config::resolve_timeout_ms(timeout_ms);
    let max_steps = config::resolve_max_steps(max_steps)
        .map(|n| usize::try_from(n).unwrap_or(usize::MAX));

    let bf = if config::resolve_strict_brackets(lenient) {
        match Interpreter::new(&code_str) {
            Ok(bf) => bf,
            Err(err) => {
                print_interpreter_error(Some(program), &bfi::filter(&code_str), &err);
                return 1;
            }
        }
    } else {
        Interpreter::new_lenient(&code_str)
    };
    let source = bf.source();

    let cancel = Arc::new(AtomicBool::new(false));

    // Ctrl+C asks the run to stop instead of killing the process mid-write
    let cancel_on_sigint = cancel.clone();
    if let Err(e) = ctrlc::set_handler(move || cancel_on_sigint.store(true, Ordering::Relaxed)) {
        eprintln!("{program}: failed to set ctrl+c handler: {e}");
        let _ = io::stderr().flush();
        return 1;
    }

    // Execute on a worker thread with cooperative cancellation
    let (tx, rx) = mpsc::channel::<Result<(), InterpreterError>>();
    let ctrl = StepControl::new(max_steps, cancel.clone());
    thread::spawn(move || {
        let mut bf = bf;
        let res = if debug {
            bf.run_debug_with_control(ctrl)
        } else {
            bf.run_with_control(ctrl)
        };
        let _ = tx.send(res);
    });

    let deadline = timeout_ms.map(|ms| Instant::now() + Duration::from_millis(ms));
    let outcome = loop {
        match rx.recv_timeout(POLL_INTERVAL) {
            Ok(res) => break Outcome::Finished(res),
            Err(mpsc::RecvTimeoutError::Disconnected) => break Outcome::WorkerLost,
            Err(mpsc::RecvTimeoutError::Timeout) => {
                if cancel.load(Ordering::Relaxed) {
                    break Outcome::Interrupted;
                }
                if deadline.is_some_and(|d| Instant::now() >= d) {
                    cancel.store(true, Ordering::Relaxed);
                    break Outcome::TimedOut;
                }
            }
        }
    };

    let exit_code = match outcome {
        Outcome::Finished(Ok(())) => 0,
        Outcome::Finished(Err(InterpreterError::Canceled)) | Outcome::Interrupted => {
            eprintln!("Execution aborted: interrupted");
            let _ = io::stderr().flush();
            130
        }
        Outcome::Finished(Err(err)) => {
            print_interpreter_error(Some(program), &source, &err);
            1
        }
        Outcome::TimedOut => {
            let ms = timeout_ms.unwrap_or_default();
            eprintln!("Execution aborted: wall-clock timeout exceeded ({ms} ms)");
            let _ = io::stderr().flush();
            1
        }
        Outcome::WorkerLost => {
            eprintln!("{program}: interpreter thread exited unexpectedly");
            let _ = io::stderr().flush();
            1
        }
    };

    // For readability, ensure output ends with a newline
    println!();
    let _ = io::stdout().flush();
    exit_code
}

fn usage_and_exit(program: &str, code: i32) -> ! {
    eprintln!(
        r#"Usage:
  {0} run [--debug|-d] [--lenient] [--timeout MS] [--max-steps N] "<code>"
  {0} run [--debug|-d] [--lenient] [--timeout MS] [--max-steps N] --file <PATH>

Options:
  --file,  -f <PATH>  Read Brainfuck code from PATH instead of positional "<code>"
  --debug, -d         Print a step-by-step table of operations instead of executing
  --lenient           Report unmatched brackets only when a jump through them is taken
  --timeout <MS>      Abort after MS milliseconds of wall-clock time
  --max-steps <N>     Abort after N executed instructions
  --help,  -h         Show this help

Notes:
- Characters outside of Brainfuck's ><+-.,[] are comments and ignored.
- Input (`,`) reads one line from stdin and stores the code of its first
  character; an empty line or EOF stores 0.
- Output (`.`) writes the current cell modulo 256 as a byte.

Examples:
- Load Brainfuck code from a file:
    {0} run --file ./program.bf
- Feed input lines from a file:
    {0} run ",[.,]" < input.txt
"#,
        program
    );
    let _ = io::stderr().flush();
    std::process::exit(code);
}
