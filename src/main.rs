use sdl2::image::InitFlag;

mod asteroid;
mod collision;
mod config;
mod entity;
mod error;
mod explosion;
mod game;
mod gui;
mod input_system;
mod mask;
mod player;
mod projectile;
mod sprite;
mod text;

use config::GameSettings;
use error::GameError;
use game::{FrameClock, FrameOutcome, GameOver, GameState, GameWorld};
use gui::{Button, Hud, ScrollingBackground};
use input_system::{GameAction, InputContext, InputSystem, ShipControls};
use sprite::SpriteAtlas;

const START_BUTTON_WIDTH: u32 = 300;
const START_BUTTON_HEIGHT: u32 = 120;

/// How the main loop ended
enum Exit {
    /// Window closed by the player
    Closed,
    /// Ship ran out of lives
    GameOver(GameOver),
}

fn main() -> Result<(), String> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = GameSettings::load()?;

    // SDL resources are dropped when `run` returns, before the process exits
    match run(settings)? {
        Exit::Closed => {
            log::info!("Window closed");
            Ok(())
        }
        Exit::GameOver(over) => {
            log::info!("Game over with score {}", over.score);
            eprintln!("{}", over);
            std::process::exit(1);
        }
    }
}

fn run(settings: GameSettings) -> Result<Exit, String> {
    let sdl_context = sdl2::init()?;
    let video_subsystem = sdl_context.video()?;
    let timer = sdl_context.timer()?;
    let _image_context = sdl2::image::init(InitFlag::PNG)?;

    let (width, height) = (settings.window.width, settings.window.height);
    let window = video_subsystem
        .window(&settings.window.title, width, height)
        .position_centered()
        .build()
        .map_err(|e| GameError::Sdl(e.to_string()))?;

    let mut canvas = window
        .into_canvas()
        .accelerated()
        .build()
        .map_err(|e| GameError::Sdl(e.to_string()))?;

    let texture_creator = canvas.texture_creator();
    let mut event_pump = sdl_context.event_pump()?;

    let (atlas, masks) = SpriteAtlas::load(&texture_creator, &settings)?;

    let background = ScrollingBackground::new(width, height);
    let start_button = Button::centered((width, height), START_BUTTON_WIDTH, START_BUTTON_HEIGHT);
    let hud = Hud::new();

    let mut world = GameWorld::from_settings(settings.clone(), masks, atlas.explosion_frame_count());
    let mut input = InputSystem::new();
    let mut state = GameState::MainMenu;
    let mut clock = FrameClock::new(settings.window.fps);

    log::info!("Window {}x{} at {} fps", width, height, settings.window.fps);
    log::info!("Controls: Up - thrust, Left/Right - rotate, Space - fire (on release)");

    loop {
        let now = timer.ticks() as u64;

        if state == GameState::Running {
            if let Some(over) = world.game_over() {
                return Ok(Exit::GameOver(over));
            }
        }

        for action in input.poll_events(&mut event_pump) {
            match action {
                GameAction::Quit => return Ok(Exit::Closed),
                GameAction::Click(x, y) => {
                    if state == GameState::MainMenu && start_button.is_clicked(x, y) {
                        log::info!("Starting game");
                        state = GameState::Running;
                        input.context = InputContext::Playing;
                    }
                }
            }
        }

        canvas.clear();
        background.render(&mut canvas, &atlas, now)?;

        match state {
            GameState::MainMenu => {
                start_button.render(&mut canvas, &atlas.start_button)?;
            }
            GameState::Running => {
                let controls = ShipControls::from_keyboard(&event_pump.keyboard_state());
                if let FrameOutcome::GameOver(over) = world.step(controls, now) {
                    return Ok(Exit::GameOver(over));
                }
                world.render(&mut canvas, &atlas, now)?;
                hud.render(&mut canvas, world.player.score(), world.player.lives())?;
            }
        }

        canvas.present();
        clock.tick();
    }
}
