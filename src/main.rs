//! Super Pug headless runner
//!
//! Drives the simulation with a simple autopilot through the same input
//! adapter and fixed-step loop a windowed front end would use, optionally
//! printing text frames.
//!
//! Usage:
//!   super-pug --mode campaign --ticks 3600 --draw-every 60
//!   super-pug --mode mission --level 3 --seed 42
//!   super-pug --settings settings.json --mode endless
//!   super-pug --json --draw-every 1 > frames.jsonl
//!   super-pug --dump-tuning

use std::io::{self, StdoutLock};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use super_pug::Settings;
use super_pug::platform::{FixedStep, InputAdapter, Key, RawEvent};
use super_pug::renderer::{JsonRenderer, RenderSnapshot, Renderer, TextRenderer};
use super_pug::sim::{Game, GameEvent, GamePhase, tick};

#[derive(Parser)]
#[command(name = "super-pug")]
#[command(about = "Headless runner for the Super Pug platformer")]
struct Cli {
    /// JSON settings file
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Session seed (overrides the settings file)
    #[arg(long)]
    seed: Option<u64>,
    /// Number of ticks to run (overrides the settings file)
    #[arg(long)]
    ticks: Option<u64>,
    /// Game mode to start
    #[arg(long, value_enum, default_value_t = Mode::Campaign)]
    mode: Mode,
    /// Mission level (mission mode only)
    #[arg(long, default_value_t = 1)]
    level: u32,
    /// Print a frame every N ticks (0 disables)
    #[arg(long)]
    draw_every: Option<u64>,
    /// Print frames as JSON lines instead of text
    #[arg(long)]
    json: bool,
    /// Print the effective tuning as JSON and exit
    #[arg(long)]
    dump_tuning: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    Campaign,
    Mission,
    Endless,
}

/// Frame sink selected on the command line
enum Output<'a> {
    Text(TextRenderer<StdoutLock<'a>>),
    Json(JsonRenderer<StdoutLock<'a>>),
}

impl Output<'_> {
    fn draw(&mut self, frame: &RenderSnapshot) -> Result<()> {
        match self {
            Output::Text(r) => r.render(frame)?,
            Output::Json(r) => r.render(frame)?,
        }
        Ok(())
    }
}

/// Plays by holding right and fire, jumping on a timer or at a ledge
struct Autopilot {
    mode: Mode,
    level: u32,
    last_jump_tick: u64,
}

impl Autopilot {
    /// Probe distance ahead of the player for ground
    const LOOKAHEAD: f32 = 40.0;
    const JUMP_INTERVAL: u64 = 90;

    fn new(mode: Mode, level: u32) -> Self {
        Self {
            mode,
            level,
            last_jump_tick: 0,
        }
    }

    fn events(&mut self, game: &Game, tick_no: u64) -> Vec<RawEvent> {
        match game.phase {
            GamePhase::Menu => vec![RawEvent::KeyDown(match self.mode {
                Mode::Campaign => Key::Confirm,
                Mode::Mission => Key::Missions,
                Mode::Endless => Key::Endless,
            })],
            GamePhase::MissionSelect => {
                vec![RawEvent::KeyDown(Key::Digit(self.level.clamp(1, 9) as u8))]
            }
            GamePhase::Playing => {
                let mut events = vec![RawEvent::KeyDown(Key::Right), RawEvent::KeyDown(Key::Fire)];
                if let Some(world) = &game.world {
                    let player = &world.player;
                    let probe = player.rect.right() + Self::LOOKAHEAD;
                    let ground_ahead = world.platforms.iter().any(|p| {
                        p.rect.left() <= probe && probe <= p.rect.right() && p.rect.top() >= player.rect.bottom() - 1.0
                    });
                    let timer = tick_no.saturating_sub(self.last_jump_tick) >= Self::JUMP_INTERVAL;
                    if player.on_ground && (!ground_ahead || timer) {
                        self.last_jump_tick = tick_no;
                        events.push(RawEvent::KeyDown(Key::Jump));
                    }
                }
                events
            }
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut settings = match &cli.settings {
        Some(path) => Settings::load_or_default(path),
        None => Settings::default(),
    };
    if let Some(seed) = cli.seed {
        settings.seed = Some(seed);
    }
    if let Some(ticks) = cli.ticks {
        settings.max_ticks = ticks;
    }
    if let Some(every) = cli.draw_every {
        settings.draw_every = every;
    }

    if cli.dump_tuning {
        let json = serde_json::to_string_pretty(&settings.tuning()).context("Failed to serialize tuning")?;
        println!("{json}");
        return Ok(());
    }

    let seed = settings.seed.unwrap_or_else(rand::random);
    log::info!(
        "Super Pug starting: {:?} mode, seed {}, {} ticks at {} Hz",
        cli.mode,
        seed,
        settings.max_ticks,
        settings.tick_rate
    );

    let mut game = Game::new(settings.tuning(), seed);
    let mut input = InputAdapter::new(settings.screen_width);
    let mut clock = FixedStep::new(settings.tick_rate, settings.max_substeps);
    let mut output = if cli.json {
        Output::Json(JsonRenderer::new(io::stdout().lock()))
    } else {
        Output::Text(TextRenderer::new(
            io::stdout().lock(),
            settings.text_columns,
            settings.text_rows,
        ))
    };
    let mut autopilot = Autopilot::new(cli.mode, cli.level);

    let mut ticks_run = 0u64;
    let mut best_score = 0u64;
    let mut levels_cleared = 0u32;
    let mut deaths = 0u32;

    while !input.quit_requested() && ticks_run < settings.max_ticks {
        for event in autopilot.events(&game, ticks_run) {
            input.handle(event);
        }

        for _ in 0..clock.advance(clock.step_ms()) {
            let tick_input = input.sample();
            let events = tick(&mut game, &tick_input, clock.step_ms());
            input.clear_one_shots();
            ticks_run += 1;

            for event in &events {
                match event {
                    GameEvent::LevelComplete => levels_cleared += 1,
                    GameEvent::PlayerFell | GameEvent::PlayerDied => deaths += 1,
                    other => log::debug!("tick {ticks_run}: {other:?}"),
                }
            }
            best_score = best_score.max(game.score);

            if settings.draw_every > 0 && ticks_run % settings.draw_every == 0 {
                output
                    .draw(&RenderSnapshot::capture(&game))
                    .context("Failed to write frame")?;
            }
            if ticks_run >= settings.max_ticks {
                input.handle(RawEvent::Quit);
                break;
            }
        }
    }

    log::info!(
        "Finished after {} ticks: best score {}, {} levels cleared, {} deaths",
        ticks_run,
        best_score,
        levels_cleared,
        deaths
    );
    // Keep stdout pure JSON lines in JSON mode
    if !cli.json {
        println!("ticks={ticks_run} best_score={best_score} levels_cleared={levels_cleared} deaths={deaths}");
    }
    Ok(())
}
