//! Heist engine demo entry point.
//!
//! Runs the platformer core headless: a scene is loaded, a scripted player
//! walks, crouches, interacts and drag-jumps through it for a fixed number
//! of frames, and everything the engine reports is logged.
//!
//! - **env_logger** prints the log (`RUST_LOG=debug` for per-entity detail)
//! - a background thread stands in for the audio engine and logs every
//!   [`AudioCmd`] it receives
//! - collision and destruction messages are drained from the broker each
//!   frame
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --frames 1200 --seed 7
//! ```

use std::path::PathBuf;

use clap::Parser;
use crossbeam_channel::Receiver;
use log::{debug, error, info, warn};

use heistengine::components::physicsbody::{PhysicsBody, category};
use heistengine::components::transform::Transform;
use heistengine::ecs::Entity;
use heistengine::events::audio::AudioCmd;
use heistengine::events::collision::Message;
use heistengine::game::Engine;
use heistengine::math::Vector2;
use heistengine::resources::audio::{setup_audio, shutdown_audio};
use heistengine::resources::gameconfig::EngineConfig;
use heistengine::resources::gamestate::GameStates;
use heistengine::resources::input::Key;
use heistengine::scene::{SceneDescription, SceneError};

const FRAME_DT: f32 = 1.0 / 60.0;
const SCRIPT_PERIOD: u32 = 240;
const DEFAULT_SCENE: &str = include_str!("../demos/level.json");

/// Heist Engine 2D
#[derive(Parser)]
#[command(version, about = "Headless run of the heist platformer core.")]
struct Cli {
    /// INI configuration file.
    #[arg(long, value_name = "PATH", default_value = "./heist.ini")]
    config: PathBuf,

    /// JSON scene to load instead of the built-in demo level.
    #[arg(long, value_name = "PATH")]
    scene: Option<PathBuf>,

    /// Number of frames to simulate.
    #[arg(long, default_value_t = 600)]
    frames: u32,

    /// Seed for the scripted jump drags.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Start with debug outlines enabled.
    #[arg(long)]
    debug: bool,
}

/// What the scripted player does on one frame.
#[derive(Debug, Default, Clone, Copy)]
struct ScriptedInput {
    key: Option<Key>,
    mouse: Option<Vector2>,
    mouse_down: bool,
}

/// Walk right, pause, drag-jump, interact, crouch, repeat.
fn scripted_input(frame: u32, rng: &mut fastrand::Rng) -> ScriptedInput {
    let anchor = Vector2::new(800.0, 450.0);
    match frame % SCRIPT_PERIOD {
        0..90 => ScriptedInput {
            key: Some(Key::D),
            ..ScriptedInput::default()
        },
        120..125 => ScriptedInput {
            mouse: Some(anchor),
            mouse_down: true,
            ..ScriptedInput::default()
        },
        125 => {
            // Dragging down and sideways launches up and the other way.
            let drag = Vector2::new(rng.f32() * 200.0 - 150.0, 100.0 + rng.f32() * 150.0);
            debug!("frame {}: drag {:?}", frame, drag);
            ScriptedInput {
                mouse: Some(anchor + drag),
                ..ScriptedInput::default()
            }
        }
        150..152 => ScriptedInput {
            key: Some(Key::E),
            ..ScriptedInput::default()
        },
        200..230 => ScriptedInput {
            key: Some(Key::S),
            ..ScriptedInput::default()
        },
        _ => ScriptedInput::default(),
    }
}

fn audio_thread(rx: Receiver<AudioCmd>) {
    for cmd in rx.iter() {
        match cmd {
            AudioCmd::Shutdown => break,
            AudioCmd::PlayFx { id, channel, .. } => debug!("audio: play {} on {:?}", id, channel),
            AudioCmd::PauseChannel { channel } => debug!("audio: pause {:?}", channel),
        }
    }
    info!("Audio thread stopped");
}

fn find_thief(engine: &Engine) -> Option<Entity> {
    engine
        .coordinator()
        .store::<PhysicsBody>()
        .ok()?
        .iter()
        .find(|(_, body)| body.is(category::THIEF))
        .map(|(entity, _)| entity)
}

#[derive(Debug, Default)]
struct Summary {
    frames: u32,
    collisions: usize,
    destroyed: usize,
    steps: u32,
}

fn run(cli: &Cli, engine: &mut Engine) -> Result<Summary, SceneError> {
    let scene = match &cli.scene {
        Some(path) => SceneDescription::from_file(path)?,
        None => SceneDescription::from_json(DEFAULT_SCENE)?,
    };
    scene.load_into(engine)?;
    let thief = find_thief(engine);
    if thief.is_none() {
        warn!("Scene has no thief; nothing will move");
    }

    let messages = engine.ctx_mut().broker.subscribe();
    let mut rng = fastrand::Rng::with_seed(cli.seed);
    let mut summary = Summary::default();

    for frame in 0..cli.frames {
        let script = scripted_input(frame, &mut rng);
        {
            let input = &mut engine.ctx_mut().input;
            input.update(|key| script.key == Some(key));
            input.update_mouse(script.mouse, script.mouse_down);
        }

        summary.steps += engine.update(FRAME_DT)?;
        summary.frames += 1;

        for message in messages.try_iter() {
            match message {
                Message::CollisionDetected(event) => {
                    summary.collisions += 1;
                    debug!("{} hit {} at t={:.4}", event.a, event.b, event.time);
                }
                Message::EntityDestroyed(entity) => {
                    summary.destroyed += 1;
                    info!("frame {}: {} destroyed", frame, entity);
                }
            }
        }
        if let Some(flags) = thief.and_then(|t| engine.map_flags(t)).filter(|f| *f != 0) {
            debug!("frame {}: thief touches map sides {:#06b}", frame, flags);
        }
        if let Some(outlines) = engine.outlines().filter(|_| frame % 60 == 0) {
            debug!(
                "frame {}: {} outlines, {} occupied cells",
                frame,
                outlines.boxes.len(),
                outlines.cells.len()
            );
        }

        if engine.ctx().health <= 0 && !engine.is_quitting() {
            info!("frame {}: the thief is out of health", frame);
            engine.ctx_mut().game_state.request(GameStates::Quitting);
        }
        if engine.is_quitting() {
            break;
        }
    }

    if let Some(t) = thief.and_then(|t| engine.coordinator().try_component::<Transform>(t)) {
        info!("Thief ends at ({:.1}, {:.1})", t.translate.x, t.translate.y);
    }
    Ok(summary)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    info!("Hello, world! This is the Heist Engine!");

    let mut config = EngineConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("{}; using defaults", e);
    }

    let mut engine = match Engine::new(config) {
        Ok(engine) => engine,
        Err(e) => {
            error!("Engine setup failed: {e}");
            std::process::exit(1);
        }
    };
    if cli.debug {
        engine.ctx_mut().debug.toggle();
    }

    // Must be wired before the scene starts producing sounds.
    let (bridge, sink) = setup_audio(audio_thread);
    engine.ctx_mut().audio = sink;

    let result = run(&cli, &mut engine);
    shutdown_audio(bridge);

    match result {
        Ok(summary) => info!(
            "Ran {} frames ({} fixed steps): {} collisions, {} destroyed, {} picked up, health {}",
            summary.frames,
            summary.steps,
            summary.collisions,
            summary.destroyed,
            engine.ctx().objects_picked,
            engine.ctx().health
        ),
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    }
}
