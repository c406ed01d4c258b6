pub mod config;
pub mod rain;
pub mod surface;
pub mod trail;

pub mod terminal {
    use crossterm::{
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    };
    use std::io::stdout;

    /// Keeps the terminal in the alternate screen with raw mode enabled for
    /// as long as it lives.
    pub struct AlternateScreen;

    impl AlternateScreen {
        pub fn new() -> std::io::Result<Self> {
            execute!(stdout(), EnterAlternateScreen)?;
            enable_raw_mode()?;
            Ok(Self)
        }
    }

    impl Drop for AlternateScreen {
        fn drop(&mut self) {
            let _ = disable_raw_mode();
            let _ = execute!(stdout(), LeaveAlternateScreen);
        }
    }
}

pub mod charset {
    use clap::ValueEnum;

    const STANDARD: &[char] = &[
        'Ƣ', 'Ʃ', 'Ʊ', 'Ƹ', 'ǂ', 'ƽ', 'ǌ', 'Ȣ', 'Ⱦ', 'Ƚ', 'ɑ', 'ɤ', 'ʑ', //
        'ʫ', 'ʥ', 'ʮ', 'λ', 'ε', 'Ϡ', 'Ϟ', 'Ϡ', 'ϰ', 'Є', //
        'ʃ', 'ʘ', 'ʭ', 'ʗ', 'ʡ', 'ʖ', 'ɕ', 'ɺ', 'ɧ', 'ʄ', //
        'β', 'θ', 'ψ', 'ξ', 'ζ', 'ϵ', 'ϑ', //
        'Ж', 'Щ', 'Ѧ', 'Җ', 'Ҩ', 'Ӝ', 'Ԇ', //
        '∑', '∂', '∏', '∩', '∬', '⊕', //
        '★', '♠', '♣', '♪', '♯', '░', '▓',
    ];
    const SNOW: &[char] = &['✼', '❋', '❊'];
    const DIAMONDS: &[char] = &['⬖', '⬗', '⬘', '⬙', '◈'];
    const RAIN: &[char] = &['░', '▓'];

    /// The built-in glyph pools a trail can draw from.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
    pub enum Charset {
        #[default]
        #[value(alias = "matrix")]
        Standard,
        Snow,
        Diamonds,
        Rain,
    }

    impl Charset {
        pub const ALL: [Charset; 4] = [
            Charset::Standard,
            Charset::Snow,
            Charset::Diamonds,
            Charset::Rain,
        ];

        pub fn glyphs(self) -> &'static [char] {
            match self {
                Charset::Standard => STANDARD,
                Charset::Snow => SNOW,
                Charset::Diamonds => DIAMONDS,
                Charset::Rain => RAIN,
            }
        }

        pub fn name(self) -> &'static str {
            match self {
                Charset::Standard => "matrix",
                Charset::Snow => "snow",
                Charset::Diamonds => "diamonds",
                Charset::Rain => "rain",
            }
        }

        pub fn next(self) -> Self {
            match self {
                Charset::Standard => Charset::Snow,
                Charset::Snow => Charset::Diamonds,
                Charset::Diamonds => Charset::Rain,
                Charset::Rain => Charset::Standard,
            }
        }
    }

}
