use std::fmt;

/// Number of cells on the tape
pub const TAPE_LEN: usize = 30_000;

/// Circular byte memory with a data pointer.
///
/// The data pointer always stays within `0..TAPE_LEN`; moving past either end
/// wraps around, as does incrementing or decrementing a cell past 255/0.
#[derive(Clone, PartialEq, Eq)]
pub struct Tape {
    /// Pointer into the cells
    data_pointer: usize,

    /// Always exactly `TAPE_LEN` long
    cells: Vec<u8>,
}

impl Tape {
    pub fn new() -> Self {
        Self {
            data_pointer: 0,
            cells: vec![0; TAPE_LEN],
        }
    }

    pub fn data_pointer(&self) -> usize {
        self.data_pointer
    }

    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    pub fn get(&self) -> u8 {
        self.cells[self.data_pointer]
    }

    pub fn set(&mut self, value: u8) {
        self.cells[self.data_pointer] = value;
    }

    /// is the value at the data pointer zero?
    pub fn value_is_zero(&self) -> bool {
        self.get() == 0
    }

    pub fn increment(&mut self) {
        self.set(self.get().wrapping_add(1));
    }

    pub fn decrement(&mut self) {
        self.set(self.get().wrapping_sub(1));
    }

    pub fn advance(&mut self) {
        self.data_pointer = (self.data_pointer + 1) % TAPE_LEN;
    }

    pub fn retreat(&mut self) {
        self.data_pointer = (self.data_pointer + TAPE_LEN - 1) % TAPE_LEN;
    }

    pub fn reset(&mut self) {
        self.cells.fill(0);
        self.data_pointer = 0;
    }
}

impl Default for Tape {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Tape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 30k cells are useless in a debug print, only show what's been touched
        let used = self
            .cells
            .iter()
            .rposition(|&cell| cell != 0)
            .map_or(0, |last| last + 1);
        f.debug_struct("Tape")
            .field("data_pointer", &self.data_pointer)
            .field("cells", &&self.cells[..used])
            .finish()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn full_lap_returns_pointer(start in 0usize..TAPE_LEN) {
            let mut tape = Tape::new();
            for _ in 0..start {
                tape.advance();
            }
            prop_assert_eq!(tape.data_pointer(), start);
            for _ in 0..TAPE_LEN {
                tape.advance();
            }
            prop_assert_eq!(tape.data_pointer(), start);
            for _ in 0..TAPE_LEN {
                tape.retreat();
            }
            prop_assert_eq!(tape.data_pointer(), start);
        }

        #[test]
        fn full_byte_cycle_returns_value(value in any::<u8>()) {
            let mut tape = Tape::new();
            tape.set(value);
            for _ in 0..256 {
                tape.increment();
            }
            prop_assert_eq!(tape.get(), value);
            for _ in 0..256 {
                tape.decrement();
            }
            prop_assert_eq!(tape.get(), value);
        }

        #[test]
        fn pointer_stays_in_bounds(moves in prop::collection::vec(any::<bool>(), 0..512)) {
            let mut tape = Tape::new();
            for right in moves {
                if right { tape.advance() } else { tape.retreat() }
                prop_assert!(tape.data_pointer() < TAPE_LEN);
            }
        }
    }
}
