use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use crossterm::terminal::{Clear, ClearType};
use crossterm::{cursor::MoveTo, queue, style::Print};
use digital_rain::{
    charset::Charset,
    config::{Args, Palette, FRAME_PERIOD, TITLE},
    rain::Rain,
    surface::Surface,
    terminal::AlternateScreen,
};
use clap::Parser;
use log::{debug, info};
use rand::{rngs::StdRng, SeedableRng};
use std::io::{stdout, BufWriter, Write};

struct Selection {
    charset: Charset,
    palette: Palette,
}

fn main() -> anyhow::Result<()> {
    use anyhow::Context;

    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let _screen = AlternateScreen::new().context("couldn't enter the alternate screen")?;

    let mut selection = Selection {
        charset: args.charset,
        palette: args.color,
    };

    if args.skip_menu {
        return animate(&args, &selection);
    }

    render_menu(&selection)?;

    while let Ok(event) = event::read() {
        if let Some(key) = pressed(event) {
            use event::KeyCode::*;

            match key.code {
                Esc | Char('q') => break,

                Enter | Char('1') => animate(&args, &selection)?,
                Char('2') => selection.charset = selection.charset.next(),
                Char('3') => selection.palette = selection.palette.next(),

                _ => (),
            }

            render_menu(&selection)?;
        }
    }

    info!("exiting");
    Ok(())
}

/// Runs the rain until any key is pressed.
fn animate(args: &Args, selection: &Selection) -> anyhow::Result<()> {
    use anyhow::Context;

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut surface = Surface::create(TITLE, args.width, args.height)
        .context("couldn't create the render surface")?;
    let (width, height) = surface.dimensions();
    debug!(
        "raining {} in {} on {width}x{height}",
        selection.charset.name(),
        selection.palette.name()
    );

    let mut rain = Rain::new(
        width,
        height,
        selection.charset.glyphs(),
        selection.palette.style(),
        rng,
    );

    rain.prime(&mut surface)?;
    loop {
        rain.tick(&mut surface)?;

        if event::poll(FRAME_PERIOD)? && pressed(event::read()?).is_some() {
            break;
        }
    }

    surface.release()?;
    Ok(())
}

fn pressed(event: Event) -> Option<KeyEvent> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(key),
        _ => None,
    }
}

fn render_menu(selection: &Selection) -> anyhow::Result<()> {
    let lines = [
        "Digital Rain".to_string(),
        String::new(),
        "1) Start".to_string(),
        format!("2) Character set: {}", selection.charset.name()),
        format!("3) Colour: {}", selection.palette.name()),
        "q) Quit".to_string(),
        String::new(),
        "Press any key to leave the rain.".to_string(),
    ];

    let mut stdout = BufWriter::new(stdout());
    queue!(stdout, Clear(ClearType::All))?;

    for (y, line) in lines.iter().enumerate() {
        queue!(stdout, MoveTo(2, 1 + y as u16))?;
        queue!(stdout, Print(line))?;
    }

    stdout.flush()?;

    Ok(())
}
