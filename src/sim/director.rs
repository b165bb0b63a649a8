//! Spawn and wave scheduling
//!
//! Two interval timers drive difficulty: a short spawn timer that drops a
//! batch of enemies, and a long wave timer that grows the batch size and
//! summons a boss every few waves. Timers only produce [`DirectorEvent`]s;
//! the tick consumes them in the same single-threaded step as everything
//! else.

use glam::IVec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::rect::Rect;
use super::state::{Actor, GameEvent, SessionState};
use crate::settings::Settings;

/// Work the director asks the tick to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectorEvent {
    SpawnEnemies,
    AdvanceWave,
}

/// Interval timers for spawning and wave progression
#[derive(Debug, Clone)]
pub struct WaveDirector {
    spawn_interval: u32,
    wave_interval: u32,
    spawn_elapsed: u32,
    wave_elapsed: u32,
    running: bool,
}

impl WaveDirector {
    /// A stopped director using the session's intervals
    pub fn new(settings: &Settings) -> Self {
        Self {
            spawn_interval: settings.spawn_interval_ticks.max(1),
            wave_interval: settings.wave_interval_ticks.max(1),
            spawn_elapsed: 0,
            wave_elapsed: 0,
            running: false,
        }
    }

    /// (Re)start both timers from a full interval
    pub fn start(&mut self) {
        self.spawn_elapsed = 0;
        self.wave_elapsed = 0;
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Ticks until the next wave fires (for HUD countdowns)
    pub fn ticks_until_wave(&self) -> u32 {
        self.wave_interval - self.wave_elapsed
    }

    /// Advance one tick and collect any timers that fired
    ///
    /// When both fire on the same tick the spawn comes first, so the batch
    /// uses the wave count from before the wave advances.
    pub fn advance(&mut self) -> Vec<DirectorEvent> {
        let mut fired = Vec::new();
        if !self.running {
            return fired;
        }

        self.spawn_elapsed += 1;
        if self.spawn_elapsed >= self.spawn_interval {
            self.spawn_elapsed = 0;
            fired.push(DirectorEvent::SpawnEnemies);
        }

        self.wave_elapsed += 1;
        if self.wave_elapsed >= self.wave_interval {
            self.wave_elapsed = 0;
            fired.push(DirectorEvent::AdvanceWave);
        }

        fired
    }
}

/// Spawn `wave_count` enemies at random heights from random world edges
///
/// Returns how many were spawned.
pub fn spawn_enemies(session: &mut SessionState, settings: &Settings, rng: &mut Pcg32) -> u32 {
    let count = session.wave_count;
    for _ in 0..count {
        let y = settings.enemy_top_margin + rng.random_range(0..settings.enemy_spawn_band());
        let from_right = rng.random_bool(0.5);
        let (x, vx) = if from_right {
            (settings.world_width, -settings.enemy_speed)
        } else {
            (-settings.enemy_size, settings.enemy_speed)
        };
        let vy = settings.enemy_min_vertical_speed
            + rng.random_range(0..settings.enemy_vertical_jitter);

        let id = session.next_entity_id();
        session.enemies.push(Actor::enemy(
            id,
            Rect::new(x, y, settings.enemy_size, settings.enemy_size),
            IVec2::new(vx, vy),
        ));
    }
    log::debug!(
        "Spawned {} enemies ({} alive)",
        count,
        session.enemies.len()
    );
    count
}

/// Bump the wave counter; every `boss_wave_period`th wave brings a boss
pub fn advance_wave(session: &mut SessionState, settings: &Settings, events: &mut Vec<GameEvent>) {
    session.wave_count += 1;
    let wave = session.wave_count;
    session.notify(format!("WAVE {wave}!"), settings.notification_ticks);
    events.push(GameEvent::WaveAdvanced { wave });
    log::info!("Wave {} (spawning {} per batch)", wave, wave);

    if wave % settings.boss_wave_period == 0 {
        spawn_boss(session, settings, events);
    }
}

/// Put a fresh boss mid-world, replacing any existing one
pub fn spawn_boss(session: &mut SessionState, settings: &Settings, events: &mut Vec<GameEvent>) {
    let id = session.next_entity_id();
    let x = settings.world_width / 2 - settings.boss_size / 2;
    let boss = Actor::boss(id, x, settings);
    if session.boss.replace(boss).is_some() {
        log::info!("Boss replaced by a fresh one on wave {}", session.wave_count);
    } else {
        log::info!("Boss spawned on wave {}", session.wave_count);
    }
    session.notify("BOSS HAS APPEARED!", settings.notification_ticks);
    events.push(GameEvent::BossSpawned {
        health: settings.boss_health,
    });
}
