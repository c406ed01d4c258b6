//! A single falling column of glyphs.

use std::collections::VecDeque;

use rand::Rng;

/// One glyph of a trail. The position is fixed when the cell is emitted,
/// only the glyph may change afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    x: u16,
    y: u16,
    glyph: char,
}

impl Cell {
    pub fn x(&self) -> u16 {
        self.x
    }

    pub fn y(&self) -> u16 {
        self.y
    }

    pub fn glyph(&self) -> char {
        self.glyph
    }
}

pub struct Trail<'a> {
    column: u16,
    max_length: usize,
    length: usize,
    fall_offset: u16,
    max_fall_depth: u16,
    flicker_chance: f32,
    alphabet: &'a [char],
    cells: VecDeque<Cell>,
}

impl<'a> Trail<'a> {
    /// `max_length` and `max_fall_depth` are raised to at least 1 and
    /// `flicker_chance` is clamped to `0.0..=1.0`.
    ///
    /// The trail holds no randomness of its own: every [`Trail::advance`]
    /// takes the source to draw from, so several trails can share one seeded
    /// generator.
    ///
    /// # Panics
    ///
    /// If `alphabet` is empty.
    pub fn new(
        max_length: usize,
        column: u16,
        max_fall_depth: u16,
        flicker_chance: f32,
        alphabet: &'a [char],
    ) -> Self {
        assert!(!alphabet.is_empty(), "a trail needs at least one glyph");

        let max_length = max_length.max(1);

        Self {
            column,
            max_length,
            length: (max_length / 2).max(1),
            fall_offset: 0,
            max_fall_depth: max_fall_depth.max(1),
            flicker_chance: flicker_chance.clamp(0.0, 1.0),
            alphabet,
            cells: VecDeque::new(),
        }
    }

    /// Moves the trail one step down.
    ///
    /// Existing cells flicker first, then a new leading cell is emitted at the
    /// current fall offset, the oldest cells are dropped if the trail got too
    /// long, and finally the fall offset moves on, wrapping at the fall depth.
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let (alphabet, chance) = (self.alphabet, self.flicker_chance);
        for cell in &mut self.cells {
            if rng.gen::<f32>() < chance {
                cell.glyph = pick(alphabet, rng);
            }
        }

        self.cells.push_front(Cell {
            x: self.column,
            y: self.fall_offset,
            glyph: pick(alphabet, rng),
        });

        // A shrink since the last step can leave more than one cell over.
        self.cells.truncate(self.length);

        self.fall_offset += 1;
        if self.fall_offset >= self.max_fall_depth {
            self.fall_offset = 0;
        }
    }

    /// Cells newest first. The borrow ends before the next [`Trail::advance`].
    pub fn cells(&self) -> impl ExactSizeIterator<Item = &Cell> + '_ {
        self.cells.iter()
    }

    pub fn grow(&mut self) {
        self.length = self.length.saturating_add(1).min(self.max_length);
    }

    pub fn shrink(&mut self) {
        self.length = self.length.saturating_sub(1).max(1);
    }

    pub fn column(&self) -> u16 {
        self.column
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    pub fn fall_offset(&self) -> u16 {
        self.fall_offset
    }

    pub fn max_fall_depth(&self) -> u16 {
        self.max_fall_depth
    }
}

fn pick<R: Rng + ?Sized>(alphabet: &[char], rng: &mut R) -> char {
    alphabet[rng.gen_range(0..alphabet.len())]
}
