/// The default number of cells of addressable memory.
pub const DEFAULT_MEMORY_SIZE: usize = 100_000;

/// A flat, fixed size array of integer cells along with the `here` allocation cursor.
///
/// All reads and writes are bounds checked against the array itself.  Cells at or past `here`
/// are still addressable, they just haven't been handed out by an allocation yet.
#[derive(Clone)]
pub struct Memory {
    cells: Vec<i64>,
    here: usize,
}

impl Memory {
    /// Create a new zero filled memory with the given number of cells.
    pub fn new(size: usize) -> Memory {
        Memory {
            cells: vec![0; size],
            here: 0,
        }
    }

    /// Total number of cells.
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    /// The next free cell.
    pub fn here(&self) -> usize {
        self.here
    }

    /// Reserve `count` cells starting at `here`, returning the address of the first one.  None if
    /// the reservation would run past the end of memory, in which case `here` is unchanged.
    pub fn allot(&mut self, count: usize) -> Option<usize> {
        let start = self.here;
        let end = start.checked_add(count)?;

        if end > self.cells.len() {
            return None;
        }

        self.here = end;
        Some(start)
    }

    fn index(&self, address: i64) -> Option<usize> {
        usize::try_from(address)
            .ok()
            .filter(|index| *index < self.cells.len())
    }

    /// Read the cell at the address, None if the address is outside of memory.
    pub fn read(&self, address: i64) -> Option<i64> {
        self.index(address).map(|index| self.cells[index])
    }

    /// Write the cell at the address, None if the address is outside of memory.
    pub fn write(&mut self, address: i64, value: i64) -> Option<()> {
        let index = self.index(address)?;

        self.cells[index] = value;
        Some(())
    }

    /// Every cell holding something other than zero, as (address, value) pairs.
    pub fn non_zero_cells(&self) -> impl Iterator<Item = (usize, i64)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, value)| **value != 0)
            .map(|(address, value)| (address, *value))
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new(DEFAULT_MEMORY_SIZE)
    }
}
