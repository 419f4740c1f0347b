use std::fmt;

/// The eight characters that make up the Brainfuck instruction set.
pub const VALID_CHARS: [char; 8] = ['<', '>', '+', '-', '.', ',', '[', ']'];

/// A single Brainfuck instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// `>`: move the data pointer one cell to the right.
    Right,
    /// `<`: move the data pointer one cell to the left.
    Left,
    /// `+`: increment the current cell.
    Increment,
    /// `-`: decrement the current cell.
    Decrement,
    /// `.`: write the current cell as a byte.
    Output,
    /// `,`: read a line and store its first character code.
    Input,
    /// `[`: jump past the matching `]` if the current cell is zero.
    LoopOpen,
    /// `]`: jump back to the matching `[` if the current cell is non-zero.
    LoopClose,
}

impl Instruction {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '>' => Some(Instruction::Right),
            '<' => Some(Instruction::Left),
            '+' => Some(Instruction::Increment),
            '-' => Some(Instruction::Decrement),
            '.' => Some(Instruction::Output),
            ',' => Some(Instruction::Input),
            '[' => Some(Instruction::LoopOpen),
            ']' => Some(Instruction::LoopClose),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Instruction::Right => '>',
            Instruction::Left => '<',
            Instruction::Increment => '+',
            Instruction::Decrement => '-',
            Instruction::Output => '.',
            Instruction::Input => ',',
            Instruction::LoopOpen => '[',
            Instruction::LoopClose => ']',
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Keep only Brainfuck instructions from `code`, preserving their order.
/// Everything else is treated as a comment and dropped.
pub fn parse(code: &str) -> Vec<Instruction> {
    code.chars().filter_map(Instruction::from_char).collect()
}

/// Textual form of [`parse`]: the instruction characters of `code`.
pub fn filter(code: &str) -> String {
    code.chars()
        .filter(|&c| Instruction::from_char(c).is_some())
        .collect()
}
