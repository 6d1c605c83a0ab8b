/// Entry point and frame loop.

mod config;
mod domain;
mod logger;
mod sim;
mod ui;

use std::io;
use std::time::{Duration, Instant};

use anyhow::Context;
use rand::Rng;

use config::GameConfig;
use sim::game_loop::{GameLoop, INVALID_NAME_MESSAGE};
use sim::save::{self, FileStore, HighScoreStore};
use sim::world::Phase;
use ui::gamepad::GamepadState;
use ui::input::{InputState, KEYS_CONFIRM, KEYS_PAUSE, KEYS_QUIT, KEYS_RENAME};
use ui::prompt::{NameInput, PromptAction};
use ui::renderer::Renderer;

const FRAME_SLEEP: Duration = Duration::from_millis(5);

fn main() -> anyhow::Result<()> {
    let save_dir = save::save_dir();
    logger::init_logger(Some("namesnake".to_string()), Some(&save_dir.join(logger::LOG_FILE)));

    let config = GameConfig::load();
    crate::log!(
        "config: name={:?} field={}x{} cell={} interval={}ms",
        config.name, config.grid.width, config.grid.height, config.grid.cell_size, config.speed.initial_ms,
    );

    let store = FileStore::default_location();
    crate::log!("high score file: {}", store.path().display());

    let now = Instant::now();
    let mut game = GameLoop::new(&config, rand::rng(), store, now);

    // Ask for a name first; the field waits behind the prompt.
    let mut prompt = NameInput::new(config.grid.layout().capacity());
    game.set_paused(true, now);
    prompt.open(&game.world.name);

    let mut renderer = Renderer::new();
    renderer.init().context("terminal setup failed")?;

    let result = frame_loop(&mut game, &mut prompt, &mut renderer, &config);

    let cleanup = renderer.cleanup().context("terminal cleanup failed");
    result.context("game loop failed")?;
    cleanup?;

    crate::log!("exit: stored high score {:?}", game.store().load());
    println!();
    println!("Thanks for playing Name Snake!");
    println!("{}", game.world.score_line());
    Ok(())
}

fn frame_loop<R: Rng, S: HighScoreStore>(
    game: &mut GameLoop<R, S>,
    prompt: &mut NameInput,
    renderer: &mut Renderer,
    config: &GameConfig,
) -> io::Result<()> {
    let mut kb = InputState::new();
    let mut gp = GamepadState::new();
    gp.load_button_config(&config.gamepad);

    loop {
        kb.drain_events();
        gp.update();
        let now = Instant::now();

        if kb.ctrl_c_pressed() {
            break;
        }
        if prompt.is_open() {
            handle_prompt(game, prompt, &kb, now);
        } else if handle_meta(game, prompt, &kb, &gp, now) {
            break;
        }

        game.update(now);
        renderer.render(&game.world, prompt)?;

        std::thread::sleep(FRAME_SLEEP);
    }
    Ok(())
}

/// Feed this frame's keys to the open name prompt.
fn handle_prompt<R: Rng, S: HighScoreStore>(
    game: &mut GameLoop<R, S>,
    prompt: &mut NameInput,
    kb: &InputState,
    now: Instant,
) {
    for key in &kb.raw_events {
        match prompt.handle_key(key) {
            PromptAction::Pending => {}
            PromptAction::Rejected => game.world.set_message(INVALID_NAME_MESSAGE, 0),
            PromptAction::Submitted(name) => {
                game.rename(&name, now);
                game.set_paused(false, now);
                break;
            }
            PromptAction::Cancelled => {
                game.set_paused(false, now);
                break;
            }
        }
    }
}

/// Meta keys and steering. Returns true to quit.
fn handle_meta<R: Rng, S: HighScoreStore>(
    game: &mut GameLoop<R, S>,
    prompt: &mut NameInput,
    kb: &InputState,
    gp: &GamepadState,
    now: Instant,
) -> bool {
    if kb.any_pressed(KEYS_QUIT) || gp.cancel_pressed() {
        return true;
    }

    if kb.any_pressed(KEYS_RENAME) {
        game.set_paused(true, now);
        prompt.open(&game.world.name);
        return false;
    }

    let confirm = kb.any_pressed(KEYS_CONFIRM) || gp.confirm_pressed();
    let dirs: Vec<_> = kb.directions().chain(gp.direction_pressed()).collect();

    if game.world.phase == Phase::Won {
        if confirm {
            game.world.clear_message();
            game.restart(now);
        }
        return false;
    }

    if game.world.paused {
        if confirm || kb.any_pressed(KEYS_PAUSE) || !dirs.is_empty() {
            for d in dirs {
                game.steer(d);
            }
            game.set_paused(false, now);
        }
        return false;
    }

    if kb.any_pressed(KEYS_PAUSE) {
        game.toggle_pause(now);
        return false;
    }
    for d in dirs {
        game.steer(d);
    }
    false
}
