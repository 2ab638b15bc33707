//! Engine configuration resource.
//!
//! Tunables for the world, the physics step and gameplay, loaded from an INI
//! file. Defaults are safe for startup; missing keys keep their current value.
//!
//! # Configuration File Format
//!
//! ```ini
//! [world]
//! width = 1600
//! height = 900
//! cell_size = 50
//!
//! [physics]
//! gravity = 200
//! ground_line = 850
//! move_velocity = 20
//! move_force = 1000
//! ground_decay = 0.2
//! max_jump_velocity = 170
//! fixed_step = 0.016666668
//!
//! [gameplay]
//! health = 3
//! laser_cooldown = 0.5
//! laser_knockback = 50
//!
//! [collision]
//! legacy_vertical_sweep = false
//! ```

use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

use crate::systems::collision::SweepMode;

/// Default safe values for startup
const DEFAULT_WORLD_WIDTH: f32 = 1600.0;
const DEFAULT_WORLD_HEIGHT: f32 = 900.0;
const DEFAULT_CELL_SIZE: f32 = 50.0;
const DEFAULT_GRAVITY: f32 = 200.0;
const DEFAULT_GROUND_LINE: f32 = 850.0;
const DEFAULT_MOVE_VELOCITY: f32 = 20.0;
const DEFAULT_MOVE_FORCE: f32 = 1000.0;
const DEFAULT_GROUND_DECAY: f32 = 0.2;
const DEFAULT_MAX_JUMP_VELOCITY: f32 = 170.0;
const DEFAULT_FIXED_STEP: f32 = 1.0 / 60.0;
const DEFAULT_HEALTH: i32 = 3;
const DEFAULT_LASER_COOLDOWN: f32 = 0.5;
const DEFAULT_LASER_KNOCKBACK: f32 = 50.0;
const DEFAULT_CONFIG_PATH: &str = "./heist.ini";

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// World extent covered by the spatial grid.
    pub world_width: f32,
    pub world_height: f32,
    pub cell_size: f32,
    /// Downward acceleration while airborne.
    pub gravity: f32,
    /// World y of the floor; bodies whose bottom reaches it are grounded.
    pub ground_line: f32,
    /// Grounded horizontal speed limit.
    pub move_velocity: f32,
    /// Force per unit mass added while a direction is held.
    pub move_force: f32,
    /// Factor applied to grounded horizontal velocity every tick.
    pub ground_decay: f32,
    /// Upper bound on the drag-to-jump launch speed.
    pub max_jump_velocity: f32,
    pub fixed_step: f32,
    pub health: i32,
    /// Seconds between two laser hits.
    pub laser_cooldown: f32,
    pub laser_knockback: f32,
    pub legacy_vertical_sweep: bool,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            world_width: DEFAULT_WORLD_WIDTH,
            world_height: DEFAULT_WORLD_HEIGHT,
            cell_size: DEFAULT_CELL_SIZE,
            gravity: DEFAULT_GRAVITY,
            ground_line: DEFAULT_GROUND_LINE,
            move_velocity: DEFAULT_MOVE_VELOCITY,
            move_force: DEFAULT_MOVE_FORCE,
            ground_decay: DEFAULT_GROUND_DECAY,
            max_jump_velocity: DEFAULT_MAX_JUMP_VELOCITY,
            fixed_step: DEFAULT_FIXED_STEP,
            health: DEFAULT_HEALTH,
            laser_cooldown: DEFAULT_LASER_COOLDOWN,
            laser_knockback: DEFAULT_LASER_KNOCKBACK,
            legacy_vertical_sweep: false,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    pub fn sweep_mode(&self) -> SweepMode {
        if self.legacy_vertical_sweep {
            SweepMode::Legacy
        } else {
            SweepMode::Corrected
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply(&config);
        Ok(())
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply(&config);
        Ok(())
    }

    fn apply(&mut self, config: &Ini) {
        let float = |section: &str, key: &str| {
            config
                .getfloat(section, key)
                .ok()
                .flatten()
                .map(|v| v as f32)
        };

        // [world] section
        if let Some(v) = float("world", "width") {
            self.world_width = v;
        }
        if let Some(v) = float("world", "height") {
            self.world_height = v;
        }
        if let Some(v) = float("world", "cell_size") {
            self.cell_size = v;
        }

        // [physics] section
        if let Some(v) = float("physics", "gravity") {
            self.gravity = v;
        }
        if let Some(v) = float("physics", "ground_line") {
            self.ground_line = v;
        }
        if let Some(v) = float("physics", "move_velocity") {
            self.move_velocity = v;
        }
        if let Some(v) = float("physics", "move_force") {
            self.move_force = v;
        }
        if let Some(v) = float("physics", "ground_decay") {
            self.ground_decay = v;
        }
        if let Some(v) = float("physics", "max_jump_velocity") {
            self.max_jump_velocity = v;
        }
        if let Some(v) = float("physics", "fixed_step") {
            self.fixed_step = v;
        }

        // [gameplay] section
        if let Some(v) = config.getint("gameplay", "health").ok().flatten() {
            self.health = v as i32;
        }
        if let Some(v) = float("gameplay", "laser_cooldown") {
            self.laser_cooldown = v;
        }
        if let Some(v) = float("gameplay", "laser_knockback") {
            self.laser_knockback = v;
        }

        // [collision] section
        if let Some(v) = config
            .getbool("collision", "legacy_vertical_sweep")
            .ok()
            .flatten()
        {
            self.legacy_vertical_sweep = v;
        }

        info!(
            "Loaded config: world {}x{} cell={}, gravity={} ground_line={}, move={}/{}, jump={}, step={}, sweep={:?}",
            self.world_width,
            self.world_height,
            self.cell_size,
            self.gravity,
            self.ground_line,
            self.move_velocity,
            self.move_force,
            self.max_jump_velocity,
            self.fixed_step,
            self.sweep_mode()
        );
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        config.set("world", "width", Some(self.world_width.to_string()));
        config.set("world", "height", Some(self.world_height.to_string()));
        config.set("world", "cell_size", Some(self.cell_size.to_string()));

        config.set("physics", "gravity", Some(self.gravity.to_string()));
        config.set("physics", "ground_line", Some(self.ground_line.to_string()));
        config.set("physics", "move_velocity", Some(self.move_velocity.to_string()));
        config.set("physics", "move_force", Some(self.move_force.to_string()));
        config.set("physics", "ground_decay", Some(self.ground_decay.to_string()));
        config.set(
            "physics",
            "max_jump_velocity",
            Some(self.max_jump_velocity.to_string()),
        );
        config.set("physics", "fixed_step", Some(self.fixed_step.to_string()));

        config.set("gameplay", "health", Some(self.health.to_string()));
        config.set(
            "gameplay",
            "laser_cooldown",
            Some(self.laser_cooldown.to_string()),
        );
        config.set(
            "gameplay",
            "laser_knockback",
            Some(self.laser_knockback.to_string()),
        );

        config.set(
            "collision",
            "legacy_vertical_sweep",
            Some(self.legacy_vertical_sweep.to_string()),
        );

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }
}
