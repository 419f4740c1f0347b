use clap::Args;
use std::io::{self, Write};
use bfi::{BraceMatcher, InterpreterError};
use bfi::cli_util::print_interpreter_error;

#[derive(Args, Debug)]
#[command(disable_help_flag = true)]
pub struct CheckArgs {
    /// Read Brainfuck code from PATH instead of positional "<code>"
    #[arg(short = 'f', long = "file")]
    pub file: Option<String>,

    /// Concatenated Brainfuck code parts
    #[arg(value_name = "code", trailing_var_arg = true, allow_hyphen_values = true)]
    pub code: Vec<String>,

    /// Show this help
    #[arg(short = 'h', long = "help", action = clap::ArgAction::SetTrue)]
    pub help: bool,
}

/// Print the filtered program followed by one `open -> close` line per loop.
pub fn run(program: &str, args: CheckArgs) -> i32 {
    if args.help {
        usage_and_exit(program, 0);
    }

    let CheckArgs { file, code, .. } = args;

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

    let source = bfi::filter(&code_str);
    let braces = BraceMatcher::new(&bfi::parse(&code_str));

    if let Err(err) = braces.validate() {
        print_interpreter_error(Some(program), &source, &InterpreterError::from(err));
        return 1;
    }

    println!("{source}");
    for (open, close) in braces.pairs() {
        println!("{open} -> {close}");
    }
    let _ = io::stdout().flush();
    0
}

fn usage_and_exit(program: &str, code: i32) -> ! {
    eprintln!(
        r#"Usage:
  {0} check "<code>"
  {0} check --file <PATH>

Prints the program with comments removed, then the index of every loop
bracket pair as "open -> close". Exits 1 on the first unmatched bracket.

Options:
  --file,  -f <PATH>  Read Brainfuck code from PATH instead of positional "<code>"
  --help,  -h         Show this help
"#,
        program
    );
    let _ = io::stderr().flush();
    std::process::exit(code);
}
