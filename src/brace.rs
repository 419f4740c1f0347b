//! Loop bracket pairing.
//!
//! [`BraceMatcher`] precomputes the partner of every `[` and `]` in a program
//! so loop entry and exit jump in O(1) instead of re-scanning the program.

use crate::error::{BracketKind, UnmatchedBrace};
use crate::instruction::Instruction;

/// Bidirectional map between each loop-open index and its loop-close index.
///
/// Both directions are plain tables indexed by instruction position, filled
/// together in a single pass. Brackets without a partner get no entry and are
/// remembered in `unmatched`.
#[derive(Debug, Clone, Default)]
pub struct BraceMatcher {
    // forward[i] is the close partner when program[i] is a matched '['
    forward: Vec<Option<usize>>,
    // reverse[j] is the open partner when program[j] is a matched ']'
    reverse: Vec<Option<usize>>,
    unmatched: Vec<UnmatchedBrace>,
    pairs: usize,
}

impl BraceMatcher {
    /// Pair up the brackets of `program`.
    ///
    /// A `[` matches the first `]` at which the nesting depth opened by it
    /// returns to zero. Unbalanced input is not an error here; see
    /// [`BraceMatcher::validate`].
    pub fn new(program: &[Instruction]) -> Self {
        let mut forward = vec![None; program.len()];
        let mut reverse = vec![None; program.len()];
        let mut unmatched = Vec::new();
        let mut pairs = 0;

        let mut stack: Vec<usize> = Vec::new();
        for (i, instr) in program.iter().enumerate() {
            match instr {
                Instruction::LoopOpen => stack.push(i),
                Instruction::LoopClose => {
                    let Some(open_index) = stack.pop() else {
                        unmatched.push(UnmatchedBrace { index: i, kind: BracketKind::Close });
                        continue;
                    };
                    forward[open_index] = Some(i);
                    reverse[i] = Some(open_index);
                    pairs += 1;
                }
                _ => {}
            }
        }

        unmatched.extend(
            stack
                .into_iter()
                .map(|index| UnmatchedBrace { index, kind: BracketKind::Open }),
        );
        unmatched.sort_by_key(|u| u.index);

        Self { forward, reverse, unmatched, pairs }
    }

    /// Close index matching the `[` at `open`.
    pub fn lookup(&self, open: usize) -> Result<usize, UnmatchedBrace> {
        self.forward
            .get(open)
            .copied()
            .flatten()
            .ok_or(UnmatchedBrace { index: open, kind: BracketKind::Open })
    }

    /// Open index matching the `]` at `close`.
    pub fn reverse_lookup(&self, close: usize) -> Result<usize, UnmatchedBrace> {
        self.reverse
            .get(close)
            .copied()
            .flatten()
            .ok_or(UnmatchedBrace { index: close, kind: BracketKind::Close })
    }

    /// Number of matched pairs.
    pub fn len(&self) -> usize {
        self.pairs
    }

    pub fn is_empty(&self) -> bool {
        self.pairs == 0
    }

    /// Matched `(open, close)` pairs, ascending by open index.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.forward
            .iter()
            .enumerate()
            .filter_map(|(open, close)| close.map(|c| (open, c)))
    }

    /// The leftmost bracket that has no partner, if any.
    pub fn first_unmatched(&self) -> Option<UnmatchedBrace> {
        self.unmatched.first().copied()
    }

    /// Fail on the leftmost unmatched bracket.
    pub fn validate(&self) -> Result<(), UnmatchedBrace> {
        match self.first_unmatched() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
