//! Mushroom Rush - A side-scrolling platform shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, waves, game state)
//! - `settings`: Per-session tuning loaded from JSON
//! - `error`: Errors for the fallible configuration surface
//!
//! Rendering, audio and keyboard plumbing live outside this crate. The
//! simulation is driven through [`sim::tick`] and observed through
//! [`sim::RenderSnapshot`].

pub mod error;
pub mod settings;
pub mod sim;

pub use error::SettingsError;
pub use settings::Settings;

/// Game configuration constants
///
/// These are the defaults baked into [`Settings::default`]. The simulation
/// itself always reads the session's `Settings`, never these directly.
pub mod consts {
    /// Fixed simulation rate (ticks per second)
    pub const TICK_RATE: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / TICK_RATE as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Visible viewport
    pub const VIEWPORT_WIDTH: i32 = 1360;
    pub const VIEWPORT_HEIGHT: i32 = 768;
    /// Ground line (bottom edge players and enemies stand on)
    pub const GROUND_Y: i32 = VIEWPORT_HEIGHT - 50;
    /// Playable horizontal extent, wider than the viewport
    pub const WORLD_WIDTH: i32 = 5000;

    /// Player defaults
    pub const PLAYER_WIDTH: i32 = 100;
    pub const PLAYER_HEIGHT: i32 = 120;
    pub const PLAYER_SPAWN_X: i32 = 60;
    /// Spawn height above the ground line (player drops onto the ground)
    pub const PLAYER_SPAWN_LIFT: i32 = 130;
    pub const PLAYER_SPEED: i32 = 8;
    pub const JUMP_VELOCITY: i32 = -20;
    pub const GRAVITY: i32 = 1;
    /// Ticks per walk-cycle frame
    pub const ANIMATION_DELAY: u32 = 10;
    /// ~1.5 seconds at 60 Hz
    pub const INVULNERABILITY_TICKS: u32 = 90;

    /// Enemy defaults
    pub const ENEMY_SIZE: i32 = 80;
    pub const ENEMY_SPEED: i32 = 3;
    /// Enemies bounce off this line instead of leaving the top of the screen
    pub const ENEMY_TOP_MARGIN: i32 = 50;
    /// Spawn band ends this far above the ground line
    pub const ENEMY_SPAWN_CLEARANCE: i32 = 200;
    pub const ENEMY_MIN_VERTICAL_SPEED: i32 = 2;
    pub const ENEMY_VERTICAL_JITTER: i32 = 3;
    pub const ENEMY_DESPAWN_MARGIN: i32 = 100;

    /// Boss defaults
    pub const BOSS_SIZE: i32 = 200;
    pub const BOSS_SPEED: i32 = 2;
    pub const BOSS_GROUND_Y: i32 = 650;
    pub const BOSS_HEALTH: u32 = 10;

    /// Projectile defaults
    pub const PROJECTILE_WIDTH: i32 = 20;
    pub const PROJECTILE_HEIGHT: i32 = 10;
    pub const PROJECTILE_SPEED: i32 = 25;
    pub const PROJECTILE_DESPAWN_MARGIN: i32 = 50;

    /// Director timing (500 ms spawn, 10 s wave)
    pub const SPAWN_INTERVAL_TICKS: u32 = 30;
    pub const WAVE_INTERVAL_TICKS: u32 = 600;
    /// Every Nth wave brings a boss
    pub const BOSS_WAVE_PERIOD: u32 = 3;
    /// Title decoration cadence (100 ms)
    pub const TITLE_TICK_INTERVAL: u32 = 6;
    /// How long a notification banner stays up
    pub const NOTIFICATION_TICKS: u32 = 120;

    /// Session rules
    pub const STARTING_LIVES: u32 = 3;
    pub const ENEMY_KILL_SCORE: u64 = 10;
    pub const ENEMY_CONTACT_SCORE: u64 = 10;
    pub const BOSS_HIT_SCORE: u64 = 100;
    pub const BOSS_DEFEAT_BONUS: u64 = 1000;
    pub const ENEMY_KNOCKBACK: i32 = 50;
    pub const BOSS_KNOCKBACK: i32 = 100;
    /// Falling this far below the viewport ends the run
    pub const FALL_OUT_MARGIN: i32 = 100;
}
