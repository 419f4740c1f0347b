use crate::error::TapeUnderflow;

/// Value held by a single tape cell.
///
/// Cells are signed and never saturate. Wrapping only happens at the `i64`
/// boundary, which no realistic program reaches one increment at a time.
pub type Cell = i64;

/// The interpreter's memory: a tape that grows to the right on demand.
///
/// Starts as a single zero cell. Cells are only ever appended, so index 0 is
/// always valid and a visited cell keeps its value for the rest of the run.
#[derive(Debug, Clone)]
pub struct Tape {
    cells: Vec<Cell>,
    pointer: usize,
}

impl Default for Tape {
    fn default() -> Self {
        Self::new()
    }
}

impl Tape {
    pub fn new() -> Self {
        Self { cells: vec![0], pointer: 0 }
    }

    /// Current data pointer.
    pub fn pointer(&self) -> usize {
        self.pointer
    }

    /// Number of cells allocated so far.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Value of the cell under the data pointer.
    pub fn get(&self) -> Cell {
        self.cells[self.pointer]
    }

    /// Move right, appending a zero cell if the pointer runs past the end.
    pub fn increment_data_pointer(&mut self) {
        self.pointer += 1;
        if self.pointer >= self.cells.len() {
            self.cells.push(0);
        }
    }

    /// Move left. Fails without touching the tape when already at cell 0.
    pub fn decrement_data_pointer(&mut self) -> Result<(), TapeUnderflow> {
        if self.pointer == 0 {
            return Err(TapeUnderflow);
        }
        self.pointer -= 1;
        Ok(())
    }

    pub fn increment_cell(&mut self) {
        let cell = &mut self.cells[self.pointer];
        *cell = cell.wrapping_add(1);
    }

    pub fn decrement_cell(&mut self) {
        let cell = &mut self.cells[self.pointer];
        *cell = cell.wrapping_sub(1);
    }

    pub fn reset_cell(&mut self) {
        self.cells[self.pointer] = 0;
    }
}
