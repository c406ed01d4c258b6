//! Command-line options and the colour choices offered by the menu.

use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::charset::Charset;
use crate::surface::{Hue, Style};

/// Time between two frames.
pub const FRAME_PERIOD: Duration = Duration::from_millis(50);

pub const TITLE: &str = "Matrix";

#[derive(Parser, Debug, Clone)]
#[command(name = "digital-rain")]
#[command(version)]
#[command(about = "Falling columns of glyphs in your terminal", long_about = None)]
pub struct Args {
    /// Glyphs the columns are made of
    #[arg(short = 's', long, value_enum, default_value_t = Charset::Standard)]
    pub charset: Charset,

    /// Colour of the glyphs
    #[arg(short, long, value_enum, default_value_t = Palette::Green)]
    pub color: Palette,

    /// Width in columns (defaults to the terminal width minus one)
    #[arg(long, value_name = "COLS")]
    pub width: Option<u16>,

    /// Height in rows (defaults to the terminal height)
    #[arg(long, value_name = "ROWS")]
    pub height: Option<u16>,

    /// Seed for a reproducible animation
    #[arg(long)]
    pub seed: Option<u64>,

    /// Start the animation right away and exit when it stops
    #[arg(long)]
    pub skip_menu: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Palette {
    #[default]
    Green,
    White,
    Blue,
    Yellow,
}

impl Palette {
    pub fn style(self) -> Style {
        let hue = match self {
            Palette::Green => Hue::Green,
            Palette::White => Hue::White,
            Palette::Blue => Hue::Blue,
            Palette::Yellow => Hue::Yellow,
        };
        Style::new(hue, true)
    }

    pub fn name(self) -> &'static str {
        match self {
            Palette::Green => "green",
            Palette::White => "white",
            Palette::Blue => "blue",
            Palette::Yellow => "yellow",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Palette::Green => Palette::White,
            Palette::White => Palette::Blue,
            Palette::Blue => Palette::Yellow,
            Palette::Yellow => Palette::Green,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["digital-rain"]).unwrap();
        assert_eq!(args.charset, Charset::Standard);
        assert_eq!(args.color, Palette::Green);
        assert_eq!(args.width, None);
        assert!(!args.skip_menu);
    }

    #[test]
    fn explicit_options() {
        let args = Args::try_parse_from([
            "digital-rain",
            "--charset",
            "snow",
            "-c",
            "yellow",
            "--width",
            "40",
            "--height",
            "12",
            "--seed",
            "9",
            "--skip-menu",
        ])
        .unwrap();

        assert_eq!(args.charset, Charset::Snow);
        assert_eq!(args.color, Palette::Yellow);
        assert_eq!((args.width, args.height), (Some(40), Some(12)));
        assert_eq!(args.seed, Some(9));
        assert!(args.skip_menu);
    }

    #[test]
    fn matrix_is_an_alias_for_standard() {
        let args = Args::try_parse_from(["digital-rain", "-s", "matrix"]).unwrap();
        assert_eq!(args.charset, Charset::Standard);
    }

    #[test]
    fn unknown_colour_is_rejected() {
        assert!(Args::try_parse_from(["digital-rain", "--color", "red"]).is_err());
    }

    #[test]
    fn palette_styles_are_intense() {
        assert_eq!(Palette::Blue.style(), Style::new(Hue::Blue, true));
        assert_eq!(Palette::Yellow.next(), Palette::Green);
    }
}
