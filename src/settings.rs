//! Per-session tuning
//!
//! Every constant the simulation reads lives here so a host can tweak a
//! session without recompiling. Missing JSON fields fall back to the
//! defaults in [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SettingsError;

/// Session tuning (fixed for the lifetime of a session)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === World ===
    pub world_width: i32,
    pub ground_y: i32,
    pub viewport_width: i32,
    pub viewport_height: i32,

    // === Player ===
    pub player_width: i32,
    pub player_height: i32,
    pub player_spawn_x: i32,
    pub player_spawn_lift: i32,
    pub player_speed: i32,
    pub jump_velocity: i32,
    pub gravity: i32,
    pub animation_delay: u32,
    pub invulnerability_ticks: u32,

    // === Enemies ===
    pub enemy_size: i32,
    pub enemy_speed: i32,
    pub enemy_top_margin: i32,
    pub enemy_spawn_clearance: i32,
    pub enemy_min_vertical_speed: i32,
    pub enemy_vertical_jitter: i32,
    pub enemy_despawn_margin: i32,

    // === Boss ===
    pub boss_size: i32,
    pub boss_speed: i32,
    pub boss_ground_y: i32,
    pub boss_health: u32,

    // === Projectiles ===
    pub projectile_width: i32,
    pub projectile_height: i32,
    pub projectile_speed: i32,
    pub projectile_despawn_margin: i32,

    // === Director ===
    pub spawn_interval_ticks: u32,
    pub wave_interval_ticks: u32,
    pub boss_wave_period: u32,
    pub title_tick_interval: u32,
    pub notification_ticks: u32,

    // === Rules ===
    pub starting_lives: u32,
    pub enemy_kill_score: u64,
    pub enemy_contact_score: u64,
    pub boss_hit_score: u64,
    pub boss_defeat_bonus: u64,
    pub enemy_knockback: i32,
    pub boss_knockback: i32,
    pub fall_out_margin: i32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            ground_y: GROUND_Y,
            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,

            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            player_spawn_x: PLAYER_SPAWN_X,
            player_spawn_lift: PLAYER_SPAWN_LIFT,
            player_speed: PLAYER_SPEED,
            jump_velocity: JUMP_VELOCITY,
            gravity: GRAVITY,
            animation_delay: ANIMATION_DELAY,
            invulnerability_ticks: INVULNERABILITY_TICKS,

            enemy_size: ENEMY_SIZE,
            enemy_speed: ENEMY_SPEED,
            enemy_top_margin: ENEMY_TOP_MARGIN,
            enemy_spawn_clearance: ENEMY_SPAWN_CLEARANCE,
            enemy_min_vertical_speed: ENEMY_MIN_VERTICAL_SPEED,
            enemy_vertical_jitter: ENEMY_VERTICAL_JITTER,
            enemy_despawn_margin: ENEMY_DESPAWN_MARGIN,

            boss_size: BOSS_SIZE,
            boss_speed: BOSS_SPEED,
            boss_ground_y: BOSS_GROUND_Y,
            boss_health: BOSS_HEALTH,

            projectile_width: PROJECTILE_WIDTH,
            projectile_height: PROJECTILE_HEIGHT,
            projectile_speed: PROJECTILE_SPEED,
            projectile_despawn_margin: PROJECTILE_DESPAWN_MARGIN,

            spawn_interval_ticks: SPAWN_INTERVAL_TICKS,
            wave_interval_ticks: WAVE_INTERVAL_TICKS,
            boss_wave_period: BOSS_WAVE_PERIOD,
            title_tick_interval: TITLE_TICK_INTERVAL,
            notification_ticks: NOTIFICATION_TICKS,

            starting_lives: STARTING_LIVES,
            enemy_kill_score: ENEMY_KILL_SCORE,
            enemy_contact_score: ENEMY_CONTACT_SCORE,
            boss_hit_score: BOSS_HIT_SCORE,
            boss_defeat_bonus: BOSS_DEFEAT_BONUS,
            enemy_knockback: ENEMY_KNOCKBACK,
            boss_knockback: BOSS_KNOCKBACK,
            fall_out_margin: FALL_OUT_MARGIN,
        }
    }
}

impl Settings {
    /// Parse settings from JSON and validate them
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        if let Err(err) = settings.validate() {
            log::warn!("Rejected settings: {}", err);
            return Err(err);
        }
        log::info!(
            "Loaded settings (world {}x{}, {} lives)",
            settings.world_width,
            settings.ground_y,
            settings.starting_lives
        );
        Ok(settings)
    }

    /// Serialize to pretty JSON (for writing a template file)
    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject tunings the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        let positive = [
            ("world_width", self.world_width),
            ("ground_y", self.ground_y),
            ("viewport_width", self.viewport_width),
            ("viewport_height", self.viewport_height),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("player_speed", self.player_speed),
            ("gravity", self.gravity),
            ("enemy_size", self.enemy_size),
            ("enemy_speed", self.enemy_speed),
            ("enemy_vertical_jitter", self.enemy_vertical_jitter),
            ("boss_size", self.boss_size),
            ("boss_speed", self.boss_speed),
            ("projectile_width", self.projectile_width),
            ("projectile_height", self.projectile_height),
            ("projectile_speed", self.projectile_speed),
        ];
        for (field, value) in positive {
            if value <= 0 {
                return Err(SettingsError::NonPositive { field, value: value as i64 });
            }
        }

        let intervals = [
            ("animation_delay", self.animation_delay),
            ("spawn_interval_ticks", self.spawn_interval_ticks),
            ("wave_interval_ticks", self.wave_interval_ticks),
            ("boss_wave_period", self.boss_wave_period),
            ("title_tick_interval", self.title_tick_interval),
            ("boss_health", self.boss_health),
            ("starting_lives", self.starting_lives),
        ];
        for (field, value) in intervals {
            if value == 0 {
                return Err(SettingsError::NonPositive { field, value: 0 });
            }
        }

        if self.jump_velocity >= 0 {
            return Err(SettingsError::JumpNotUpward {
                jump_velocity: self.jump_velocity,
            });
        }

        let widest = self.player_width.max(self.boss_size).max(self.viewport_width);
        if self.world_width <= widest {
            return Err(SettingsError::WorldTooNarrow {
                world_width: self.world_width,
                required: widest + 1,
            });
        }

        // Enemies need a non-empty spawn band between the top margin and the ground
        if self.enemy_spawn_band() <= 0 {
            return Err(SettingsError::EmptySpawnBand {
                ground_y: self.ground_y,
                clearance: self.enemy_spawn_clearance,
            });
        }

        Ok(())
    }

    /// Height of the band enemies spawn in (starting at `enemy_top_margin`)
    pub fn enemy_spawn_band(&self) -> i32 {
        self.ground_y - self.enemy_spawn_clearance
    }

    /// Y coordinate the boss' top edge is pinned to
    pub fn boss_top(&self) -> i32 {
        self.boss_ground_y - self.boss_size
    }

    /// Player y below which the run is lost
    pub fn fall_out_line(&self) -> i32 {
        self.viewport_height + self.fall_out_margin
    }
}
