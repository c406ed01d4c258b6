use std::io::Write;

use rand::Rng;

use crate::surface::{Style, Surface, SurfaceError};
use crate::trail::Trail;

pub const FLICKER_CHANCE: f32 = 0.2;
pub const RESIZE_CHANCE: f64 = 0.9;

/// One trail per column, all drawing from the same alphabet and randomness.
pub struct Rain<'a, R> {
    trails: Vec<Trail<'a>>,
    style: Style,
    rng: R,
}

impl<'a, R: Rng> Rain<'a, R> {
    /// Each column gets a random maximum length up to the full height and
    /// falls somewhere between one and one and a half screen heights before
    /// starting over from the top.
    pub fn new(width: u16, height: u16, alphabet: &'a [char], style: Style, mut rng: R) -> Self {
        let height = height.max(1);
        let trails = (0..width)
            .map(|column| {
                let max_length = rng.gen_range(1..=height) as usize;
                let max_fall_depth = rng.gen_range(height..=height.saturating_add(height / 2));
                Trail::new(max_length, column, max_fall_depth, FLICKER_CHANCE, alphabet)
            })
            .collect();

        Self { trails, style, rng }
    }

    pub fn trails(&self) -> &[Trail<'a>] {
        &self.trails
    }

    pub fn prime<W: Write>(&self, surface: &mut Surface<W>) -> Result<(), SurfaceError> {
        surface.clear(' ', self.style)
    }

    /// Advances every trail, draws all of them into the back grid, then
    /// presents once and clears for the next frame.
    pub fn tick<W: Write>(&mut self, surface: &mut Surface<W>) -> Result<(), SurfaceError> {
        for trail in &mut self.trails {
            trail.advance(&mut self.rng);

            for cell in trail.cells() {
                if surface.contains(cell.x(), cell.y()) {
                    surface.write(cell.x(), cell.y(), cell.glyph(), self.style)?;
                }
            }

            if self.rng.gen_bool(RESIZE_CHANCE) {
                if self.rng.gen_bool(0.5) {
                    trail.grow();
                } else {
                    trail.shrink();
                }
            }
        }

        surface.present()?;
        surface.clear(' ', self.style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Hue;
    use rand::{rngs::StdRng, SeedableRng};

    const STYLE: Style = Style::new(Hue::Green, true);
    const ALPHABET: &[char] = &['1', '0'];

    #[test]
    fn one_trail_per_column_within_bounds() {
        let rain = Rain::new(12, 8, ALPHABET, STYLE, StdRng::seed_from_u64(11));

        assert_eq!(rain.trails().len(), 12);
        for (column, trail) in rain.trails().iter().enumerate() {
            assert_eq!(trail.column() as usize, column);
            assert!((1..=8).contains(&trail.max_length()));
            assert!((8..=12).contains(&trail.max_fall_depth()));
        }
    }

    #[test]
    fn first_tick_fills_the_top_row() {
        let mut surface = Surface::with_writer(Vec::new(), "test", 6, 4).unwrap();
        let mut rain = Rain::new(6, 4, ALPHABET, STYLE, StdRng::seed_from_u64(2));

        rain.prime(&mut surface).unwrap();
        rain.tick(&mut surface).unwrap();

        for x in 0..6 {
            let cell = surface.visible_cell(x, 0).unwrap();
            assert!(ALPHABET.contains(&cell.glyph));
            assert_eq!(cell.style, STYLE);

            for y in 1..4 {
                assert_eq!(surface.visible_cell(x, y).unwrap().glyph, ' ');
            }
        }

        for y in 0..4 {
            for x in 0..6 {
                assert_eq!(surface.back_cell(x, y).unwrap().glyph, ' ');
            }
        }
    }

    #[test]
    fn ticks_past_the_bottom_edge_are_clipped() {
        let mut surface = Surface::with_writer(Vec::new(), "test", 3, 2).unwrap();
        let mut rain = Rain::new(3, 2, ALPHABET, STYLE, StdRng::seed_from_u64(8));

        rain.prime(&mut surface).unwrap();
        for _ in 0..50 {
            rain.tick(&mut surface).unwrap();
        }

        for trail in rain.trails() {
            assert!(trail.cells().len() <= trail.length());
        }
    }

    #[test]
    fn same_seed_same_frames() {
        let frame = |seed| {
            let mut surface = Surface::with_writer(Vec::new(), "test", 5, 5).unwrap();
            let mut rain = Rain::new(5, 5, ALPHABET, STYLE, StdRng::seed_from_u64(seed));
            rain.prime(&mut surface).unwrap();
            for _ in 0..7 {
                rain.tick(&mut surface).unwrap();
            }
            surface.writer().clone()
        };

        assert_eq!(frame(42), frame(42));
    }
}
