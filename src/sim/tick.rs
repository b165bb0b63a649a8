//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. One call to
//! [`tick`] is one atomic step: menu input, director timers, player
//! movement, combat resolution and the game-over check all happen here, in
//! that order, on a single thread.

use super::collision::{first_hit, knock_back, outside_world};
use super::director::{DirectorEvent, advance_wave, spawn_enemies};
use super::state::{GameEvent, GamePhase, GameState, Player, SessionState};
use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::settings::Settings;

/// Held horizontal direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Horizontal {
    #[default]
    Stop,
    Left,
    Right,
}

impl Horizontal {
    /// From held keys; left wins when both are down
    pub fn from_held(left: bool, right: bool) -> Self {
        if left {
            Horizontal::Left
        } else if right {
            Horizontal::Right
        } else {
            Horizontal::Stop
        }
    }
}

/// Input intents for a single tick (deterministic)
///
/// `horizontal` is a held state; every other field is "just pressed" and
/// should be cleared by the caller once consumed.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub horizontal: Horizontal,
    pub jump: bool,
    pub shoot: bool,
    pub pause_toggle: bool,
    pub confirm: bool,
    pub cancel: bool,
    pub select_next: bool,
    pub select_previous: bool,
}

/// Advance the game state by one fixed timestep
///
/// Returns everything that happened this tick, in order.
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();
    state.time_ticks += 1;

    match state.phase {
        GamePhase::Title => {
            if input.confirm {
                set_phase(state, GamePhase::CharacterSelect, &mut events);
            }
        }

        GamePhase::CharacterSelect => {
            if input.cancel {
                set_phase(state, GamePhase::Title, &mut events);
            } else if input.confirm {
                let from = state.phase;
                state.start_session();
                events.push(GameEvent::PhaseChanged {
                    from,
                    to: GamePhase::Playing,
                });
                events.push(GameEvent::SessionStarted {
                    character: state.selected,
                });
            } else if input.select_next || input.select_previous {
                state.selected = if input.select_next {
                    state.selected.next()
                } else {
                    state.selected.previous()
                };
                events.push(GameEvent::CharacterSelected {
                    character: state.selected,
                });
            }
        }

        GamePhase::Playing => {
            if input.cancel {
                return_to_title(state, &mut events);
            } else if input.pause_toggle {
                if let Some(session) = &mut state.session {
                    session.director.stop();
                }
                set_phase(state, GamePhase::Paused, &mut events);
            } else if simulate(state, input, &mut events) {
                end_run(state, &mut events);
            }
        }

        GamePhase::Paused => {
            if input.pause_toggle {
                if let Some(session) = &mut state.session {
                    session.director.start();
                }
                set_phase(state, GamePhase::Playing, &mut events);
            } else if input.cancel {
                return_to_title(state, &mut events);
            }
        }

        GamePhase::GameOver => {
            if input.confirm {
                return_to_title(state, &mut events);
            } else if input.cancel {
                events.push(GameEvent::QuitRequested);
            }
        }
    }

    // Menu decoration runs whenever gameplay doesn't
    if state.phase != GamePhase::Playing {
        state.title.tick(&mut state.rng);
    }

    events
}

fn set_phase(state: &mut GameState, to: GamePhase, events: &mut Vec<GameEvent>) {
    let from = state.phase;
    if from == to {
        return;
    }
    log::debug!("Phase {:?} -> {:?}", from, to);
    state.phase = to;
    events.push(GameEvent::PhaseChanged { from, to });
}

fn return_to_title(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.session = None;
    set_phase(state, GamePhase::Title, events);
}

fn end_run(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let Some(session) = &mut state.session else {
        return;
    };
    session.director.stop();
    let (score, wave) = (session.score, session.wave_count);
    log::info!("Game over: score {} on wave {}", score, wave);
    set_phase(state, GamePhase::GameOver, events);
    events.push(GameEvent::GameOver { score, wave });
}

/// Run one gameplay step. Returns true if the run ended this tick.
fn simulate(state: &mut GameState, input: &TickInput, events: &mut Vec<GameEvent>) -> bool {
    let GameState {
        settings,
        session,
        rng,
        ..
    } = state;
    let Some(session) = session.as_mut() else {
        return false;
    };

    session.time_ticks += 1;
    session.tick_notification();

    for event in session.director.advance() {
        match event {
            DirectorEvent::SpawnEnemies => {
                let count = spawn_enemies(session, settings, rng);
                events.push(GameEvent::EnemiesSpawned { count });
            }
            DirectorEvent::AdvanceWave => advance_wave(session, settings, events),
        }
    }

    apply_player_input(session, input, settings, events);
    session.player.update(session.environment.platforms(), settings);
    session.update_camera(settings);

    update_projectiles(session, settings, events);
    let mut run_over = update_enemies(session, settings, events);
    run_over |= update_boss(session, settings, events);
    collect_defeated_boss(session, settings, events);

    if session.player.rect.y > settings.fall_out_line() {
        log::info!("Player fell out of the world");
        session.lives = 0;
        run_over = true;
    }

    session.environment.drift_clouds(settings.world_width);
    run_over
}

fn apply_player_input(
    session: &mut SessionState,
    input: &TickInput,
    settings: &Settings,
    events: &mut Vec<GameEvent>,
) {
    let player = &mut session.player;
    match input.horizontal {
        Horizontal::Left => player.move_left(settings.player_speed),
        Horizontal::Right => player.move_right(settings.player_speed),
        Horizontal::Stop => player.stop(),
    }
    if input.jump {
        player.jump(settings.jump_velocity);
    }
    if input.shoot {
        let id = session.shoot(settings);
        events.push(GameEvent::ShotFired { id });
    }
}

/// Move shots and resolve them against enemies first, then the boss
///
/// A shot is spent on the first thing it hits, so it kills at most one
/// enemy and never reaches the boss test after an enemy kill.
fn update_projectiles(
    session: &mut SessionState,
    settings: &Settings,
    events: &mut Vec<GameEvent>,
) {
    let SessionState {
        projectiles,
        enemies,
        boss,
        score,
        ..
    } = session;

    projectiles.retain_mut(|shot| {
        shot.update();

        if let Some(index) = first_hit(&shot.rect, enemies.iter().map(|e| &e.rect)) {
            let enemy = enemies.remove(index);
            *score += settings.enemy_kill_score;
            events.push(GameEvent::EnemyKilled { id: enemy.id });
            return false;
        }

        if let Some(boss) = boss.as_mut().filter(|b| b.is_alive()) {
            if shot.rect.intersects(&boss.rect) {
                boss.damage();
                *score += settings.boss_hit_score;
                events.push(GameEvent::BossHit {
                    health: boss.health().unwrap_or(0),
                });
                return false;
            }
        }

        !outside_world(
            &shot.rect,
            settings.world_width,
            settings.projectile_despawn_margin,
        )
    });
}

/// Move enemies, resolve contact with the player, cull strays
///
/// Returns true if contact took the last life.
fn update_enemies(
    session: &mut SessionState,
    settings: &Settings,
    events: &mut Vec<GameEvent>,
) -> bool {
    let SessionState {
        enemies,
        player,
        score,
        lives,
        ..
    } = session;
    let mut run_over = false;

    enemies.retain_mut(|enemy| {
        enemy.update(settings);

        if player.rect.intersects(&enemy.rect) {
            *score += settings.enemy_contact_score;
            events.push(GameEvent::EnemyContact { id: enemy.id });
            run_over |= hurt_player(player, lives, settings.enemy_knockback, settings, events);
            return false;
        }

        !outside_world(
            &enemy.rect,
            settings.world_width,
            settings.enemy_despawn_margin,
        )
    });

    run_over
}

/// Move the boss and resolve contact; the boss survives contact
fn update_boss(
    session: &mut SessionState,
    settings: &Settings,
    events: &mut Vec<GameEvent>,
) -> bool {
    let SessionState {
        boss,
        player,
        lives,
        ..
    } = session;
    let Some(boss) = boss.as_mut().filter(|b| b.is_alive()) else {
        return false;
    };

    boss.update(settings);
    player.rect.intersects(&boss.rect)
        && hurt_player(player, lives, settings.boss_knockback, settings, events)
}

/// Damage the player if not invulnerable. Returns true if no lives remain.
fn hurt_player(
    player: &mut Player,
    lives: &mut u32,
    knockback: i32,
    settings: &Settings,
    events: &mut Vec<GameEvent>,
) -> bool {
    if !player.take_damage(settings.invulnerability_ticks) {
        return false;
    }
    *lives = lives.saturating_sub(1);
    knock_back(&mut player.rect, knockback, settings.world_width);
    events.push(GameEvent::PlayerDamaged { lives: *lives });
    *lives == 0
}

fn collect_defeated_boss(
    session: &mut SessionState,
    settings: &Settings,
    events: &mut Vec<GameEvent>,
) {
    if !session.boss.as_ref().is_some_and(|b| !b.is_alive()) {
        return;
    }
    session.boss = None;
    session.score += settings.boss_defeat_bonus;
    session.notify(
        format!("BOSS DEFEATED! +{} POINTS", settings.boss_defeat_bonus),
        settings.notification_ticks,
    );
    events.push(GameEvent::BossDefeated);
    log::info!("Boss defeated (score {})", session.score);
}

/// Accumulates real frame time into whole simulation ticks
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    dt: f32,
    max_substeps: u32,
    accumulator: f32,
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_SUBSTEPS)
    }
}

impl FixedTimestep {
    pub fn new(dt: f32, max_substeps: u32) -> Self {
        Self {
            dt,
            max_substeps,
            accumulator: 0.0,
        }
    }

    /// Add a frame's elapsed seconds; returns how many ticks to run now
    ///
    /// Long stalls are capped so a slow frame can't snowball.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.min(0.1);

        let mut substeps = 0;
        while self.accumulator >= self.dt && substeps < self.max_substeps {
            self.accumulator -= self.dt;
            substeps += 1;
        }
        substeps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rect::Rect;
    use crate::sim::state::{Actor, ActorKind, Character, Projectile};
    use glam::IVec2;

    fn press(f: impl FnOnce(&mut TickInput)) -> TickInput {
        let mut input = TickInput::default();
        f(&mut input);
        input
    }

    /// Quiet settings: no spawns or waves unless a test asks for them
    fn quiet() -> Settings {
        Settings {
            spawn_interval_ticks: 1_000_000,
            wave_interval_ticks: 1_000_000,
            ..Settings::default()
        }
    }

    fn playing(settings: Settings) -> GameState {
        let mut state = GameState::with_settings(12345, settings).expect("valid settings");
        tick(&mut state, &press(|i| i.confirm = true));
        tick(&mut state, &press(|i| i.confirm = true));
        assert_eq!(state.phase, GamePhase::Playing);
        // Let the player drop onto the ground
        for _ in 0..10 {
            tick(&mut state, &TickInput::default());
        }
        state
    }

    fn session(state: &mut GameState) -> &mut SessionState {
        state.session.as_mut().expect("session running")
    }

    #[test]
    fn test_menu_flow_into_playing() {
        let mut state = GameState::new(1);
        assert_eq!(state.phase, GamePhase::Title);

        // Gameplay intents do nothing on the title screen
        let events = tick(&mut state, &press(|i| i.jump = true));
        assert!(events.is_empty());

        tick(&mut state, &press(|i| i.confirm = true));
        assert_eq!(state.phase, GamePhase::CharacterSelect);

        tick(&mut state, &press(|i| i.select_next = true));
        tick(&mut state, &press(|i| i.select_next = true));
        tick(&mut state, &press(|i| i.select_previous = true));
        assert_eq!(state.selected, Character::Peppa);

        let events = tick(&mut state, &press(|i| i.confirm = true));
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(events.contains(&GameEvent::SessionStarted {
            character: Character::Peppa
        }));

        let session = session(&mut state);
        assert_eq!(session.lives, 3);
        assert_eq!(session.wave_count, 1);
        assert_eq!(session.score, 0);
        assert!(session.enemies.is_empty());
        assert!(session.projectiles.is_empty());
        assert!(session.boss.is_none());
        assert_eq!(session.player.character, Character::Peppa);
        assert!(session.director.is_running());
    }

    #[test]
    fn test_cancel_from_select_returns_to_title() {
        let mut state = GameState::new(1);
        tick(&mut state, &press(|i| i.confirm = true));
        tick(&mut state, &press(|i| i.cancel = true));
        assert_eq!(state.phase, GamePhase::Title);
        assert!(state.session.is_none());
    }

    #[test]
    fn test_pause_freezes_simulation() {
        let mut state = playing(Settings::default());
        let before = session(&mut state).time_ticks;

        tick(&mut state, &press(|i| i.pause_toggle = true));
        assert_eq!(state.phase, GamePhase::Paused);
        assert!(!session(&mut state).director.is_running());

        let x = session(&mut state).player.rect.x;
        for _ in 0..100 {
            tick(
                &mut state,
                &press(|i| {
                    i.horizontal = Horizontal::Right;
                    i.shoot = true;
                }),
            );
        }
        let session_ref = session(&mut state);
        assert_eq!(session_ref.time_ticks, before);
        assert_eq!(session_ref.player.rect.x, x);
        assert!(session_ref.enemies.is_empty());
        assert!(session_ref.projectiles.is_empty());

        tick(&mut state, &press(|i| i.pause_toggle = true));
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(session(&mut state).director.is_running());
        assert_eq!(session(&mut state).director.ticks_until_wave(), 600);
    }

    #[test]
    fn test_title_decoration_runs_only_outside_play() {
        let mut state = playing(Settings::default());
        let frame = state.title.animation_frame;
        for _ in 0..12 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.title.animation_frame, frame);

        tick(&mut state, &press(|i| i.pause_toggle = true));
        for _ in 0..12 {
            tick(&mut state, &TickInput::default());
        }
        assert_ne!(state.title.animation_frame, frame);
    }

    #[test]
    fn test_cancel_while_playing_drops_session() {
        let mut state = playing(Settings::default());
        tick(&mut state, &press(|i| i.cancel = true));
        assert_eq!(state.phase, GamePhase::Title);
        assert!(state.session.is_none());
    }

    #[test]
    fn test_projectile_moves_at_fixed_speed() {
        let mut state = playing(quiet());
        let events = tick(&mut state, &press(|i| i.shoot = true));
        assert!(matches!(events.as_slice(), [GameEvent::ShotFired { .. }]));

        let player = session(&mut state).player.rect;
        let x0 = player.right();
        for t in 1..=20 {
            if t > 1 {
                tick(&mut state, &TickInput::default());
            }
            let shot = &session(&mut state).projectiles[0];
            assert_eq!(shot.rect.x, x0 + 25 * t);
            assert_eq!(shot.rect.y, player.y + 55);
        }
    }

    #[test]
    fn test_projectile_culled_past_margin() {
        let mut state = playing(quiet());
        let shot = Projectile {
            id: 99,
            rect: Rect::new(5020, 100, 20, 10),
            direction: 1,
            speed: 25,
        };
        session(&mut state).projectiles.push(shot);
        tick(&mut state, &TickInput::default());
        // 5045 is still within the 50 unit margin
        assert_eq!(session(&mut state).projectiles.len(), 1);
        tick(&mut state, &TickInput::default());
        assert!(session(&mut state).projectiles.is_empty());
    }

    #[test]
    fn test_enemy_takes_priority_over_boss() {
        let mut state = playing(quiet());
        let settings = state.settings.clone();
        let session = session(&mut state);

        let mut boss = Actor::boss(50, 2000, &settings);
        boss.vel = IVec2::ZERO;
        session.boss = Some(boss);
        session
            .enemies
            .push(Actor::enemy(51, Rect::new(2000, 500, 80, 80), IVec2::ZERO));
        session.projectiles.push(Projectile {
            id: 52,
            rect: Rect::new(1980, 520, 20, 10),
            direction: 1,
            speed: 25,
        });

        let events = tick(&mut state, &TickInput::default());
        let session = self::session(&mut state);
        assert!(session.enemies.is_empty());
        assert!(session.projectiles.is_empty());
        assert_eq!(session.boss.as_ref().and_then(|b| b.health()), Some(10));
        assert_eq!(session.score, 10);
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, GameEvent::EnemyKilled { .. } | GameEvent::BossHit { .. }))
                .count(),
            1
        );
    }

    #[test]
    fn test_one_shot_kills_one_enemy() {
        let mut state = playing(quiet());
        let session = session(&mut state);
        for id in 0..3 {
            session
                .enemies
                .push(Actor::enemy(id, Rect::new(1000, 500, 80, 80), IVec2::ZERO));
        }
        session.projectiles.push(Projectile {
            id: 10,
            rect: Rect::new(980, 520, 20, 10),
            direction: 1,
            speed: 25,
        });

        tick(&mut state, &TickInput::default());
        let session = self::session(&mut state);
        assert_eq!(session.enemies.len(), 2);
        // The first enemy in spawn order is the one that died
        assert_eq!(session.enemies[0].id, 1);
    }

    #[test]
    fn test_every_boss_hit_scores() {
        let mut state = playing(quiet());
        let settings = state.settings.clone();
        let session = session(&mut state);
        let mut boss = Actor::boss(50, 2000, &settings);
        boss.vel = IVec2::ZERO;
        session.boss = Some(boss);

        for round in 1..=3u32 {
            self::session(&mut state).projectiles.push(Projectile {
                id: 100 + round,
                rect: Rect::new(1980, 500, 20, 10),
                direction: 1,
                speed: 25,
            });
            tick(&mut state, &TickInput::default());
            let session = self::session(&mut state);
            assert_eq!(session.boss.as_ref().and_then(|b| b.health()), Some(10 - round));
            assert_eq!(session.score, 100 * round as u64);
        }
    }

    #[test]
    fn test_boss_defeat_awards_bonus() {
        let mut state = playing(quiet());
        let settings = state.settings.clone();
        let session = session(&mut state);
        let mut boss = Actor::boss(50, 2000, &settings);
        boss.vel = IVec2::ZERO;
        boss.kind = ActorKind::Boss { health: 1 };
        session.boss = Some(boss);
        session.projectiles.push(Projectile {
            id: 60,
            rect: Rect::new(1980, 500, 20, 10),
            direction: 1,
            speed: 25,
        });

        let events = tick(&mut state, &TickInput::default());
        let session = self::session(&mut state);
        assert!(session.boss.is_none());
        assert_eq!(session.score, 100 + 1000);
        assert!(events.contains(&GameEvent::BossHit { health: 0 }));
        assert!(events.contains(&GameEvent::BossDefeated));
        let banner = session.notification.as_ref().expect("banner");
        assert_eq!(banner.text, "BOSS DEFEATED! +1000 POINTS");
        assert_eq!(banner.remaining_ticks, 120);
    }

    #[test]
    fn test_enemy_contact_costs_one_life() {
        let mut state = playing(quiet());
        let session = session(&mut state);
        session.player.rect.x = 500;
        let player = session.player.rect;
        session
            .enemies
            .push(Actor::enemy(1, Rect::new(player.x, 600, 80, 80), IVec2::ZERO));

        let events = tick(&mut state, &TickInput::default());
        let session = self::session(&mut state);
        assert!(events.contains(&GameEvent::PlayerDamaged { lives: 2 }));
        assert_eq!(session.lives, 2);
        assert_eq!(session.player.rect.x, 450);
        assert!(session.player.is_invulnerable());
        assert!(session.enemies.is_empty());
        assert_eq!(session.score, 10);

        // A second contact inside the window removes the enemy but spares the life
        let x = session.player.rect.x;
        session
            .enemies
            .push(Actor::enemy(2, Rect::new(x, 600, 80, 80), IVec2::ZERO));
        let events = tick(&mut state, &TickInput::default());
        let session = self::session(&mut state);
        assert!(events.contains(&GameEvent::EnemyContact { id: 2 }));
        assert!(!events.iter().any(|e| matches!(e, GameEvent::PlayerDamaged { .. })));
        assert_eq!(session.lives, 2);
        assert_eq!(session.player.rect.x, x);
        assert!(session.enemies.is_empty());
    }

    #[test]
    fn test_boss_contact_knocks_back_further() {
        let mut state = playing(quiet());
        let settings = state.settings.clone();
        let session = session(&mut state);
        session.player.rect.x = 1000;
        let mut boss = Actor::boss(50, 1000, &settings);
        boss.vel = IVec2::ZERO;
        session.boss = Some(boss);

        tick(&mut state, &TickInput::default());
        let session = self::session(&mut state);
        assert_eq!(session.lives, 2);
        assert_eq!(session.player.rect.x, 900);
        assert!(session.boss.is_some());
    }

    #[test]
    fn test_last_life_ends_run() {
        let mut state = playing(quiet());
        let session = session(&mut state);
        session.lives = 1;
        let player = session.player.rect;
        session
            .enemies
            .push(Actor::enemy(1, Rect::new(player.x, 600, 80, 80), IVec2::ZERO));

        let events = tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(events.contains(&GameEvent::GameOver { score: 10, wave: 1 }));
        let session = self::session(&mut state);
        assert_eq!(session.lives, 0);
        assert!(!session.director.is_running());

        // Nothing simulates after the run ends
        let ticks = session.time_ticks;
        tick(&mut state, &press(|i| i.horizontal = Horizontal::Right));
        assert_eq!(self::session(&mut state).time_ticks, ticks);
    }

    #[test]
    fn test_game_over_inputs() {
        let mut state = playing(quiet());
        session(&mut state).lives = 0;
        state.phase = GamePhase::GameOver;

        let events = tick(&mut state, &press(|i| i.cancel = true));
        assert_eq!(events, vec![GameEvent::QuitRequested]);
        assert_eq!(state.phase, GamePhase::GameOver);

        tick(&mut state, &press(|i| i.confirm = true));
        assert_eq!(state.phase, GamePhase::Title);
        assert!(state.session.is_none());
    }

    #[test]
    fn test_falling_out_of_world_ends_run() {
        // Ground sits below the fall-out line, so nothing catches the player
        let settings = Settings {
            ground_y: 1000,
            ..quiet()
        };
        let mut state = GameState::with_settings(3, settings).expect("valid settings");
        tick(&mut state, &press(|i| i.confirm = true));
        tick(&mut state, &press(|i| i.confirm = true));

        let events = tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(session(&mut state).lives, 0);
        assert!(events.iter().any(|e| matches!(e, GameEvent::GameOver { .. })));
    }

    #[test]
    fn test_waves_and_boss_cadence() {
        let settings = Settings {
            wave_interval_ticks: 10,
            ..quiet()
        };
        let mut state = GameState::with_settings(5, settings).expect("valid settings");
        tick(&mut state, &press(|i| i.confirm = true));
        tick(&mut state, &press(|i| i.confirm = true));

        let mut waves = Vec::new();
        let mut boss_on = Vec::new();
        for _ in 0..30 {
            for event in tick(&mut state, &TickInput::default()) {
                match event {
                    GameEvent::WaveAdvanced { wave } => waves.push(wave),
                    GameEvent::BossSpawned { .. } => {
                        boss_on.push(session(&mut state).wave_count)
                    }
                    _ => {}
                }
            }
        }
        assert_eq!(waves, vec![2, 3, 4]);
        assert_eq!(boss_on, vec![3]);
        assert_eq!(session(&mut state).wave_count, 4);
        assert!(session(&mut state).boss.is_some());
    }

    #[test]
    fn test_spawn_batches_follow_wave_count() {
        let settings = Settings {
            spawn_interval_ticks: 5,
            ..quiet()
        };
        let mut state = playing(settings);
        session(&mut state).enemies.clear();
        session(&mut state).wave_count = 3;

        let mut spawned = 0;
        for _ in 0..5 {
            for event in tick(&mut state, &TickInput::default()) {
                if let GameEvent::EnemiesSpawned { count } = event {
                    spawned += count;
                }
            }
        }
        assert_eq!(spawned, 3);
    }

    #[test]
    fn test_enemy_lives_until_past_margin() {
        let mut state = playing(quiet());
        session(&mut state)
            .enemies
            .push(Actor::enemy(7, Rect::new(-80, 100, 80, 80), IVec2::new(3, 0)));

        // -80 + 3t > 5100 first holds at t = 1727
        for _ in 0..1726 {
            tick(&mut state, &TickInput::default());
            let enemy = &session(&mut state).enemies[0];
            assert!(enemy.rect.x <= 5100);
        }
        assert_eq!(session(&mut state).enemies[0].rect.x, 5098);
        tick(&mut state, &TickInput::default());
        assert!(session(&mut state).enemies.is_empty());
    }

    #[test]
    fn test_player_movement_and_jump_through_tick() {
        let mut state = playing(quiet());
        let x = session(&mut state).player.rect.x;
        tick(&mut state, &press(|i| i.horizontal = Horizontal::Left));
        assert_eq!(session(&mut state).player.rect.x, x - 8);
        assert!(!session(&mut state).player.facing_right);

        tick(&mut state, &press(|i| i.jump = true));
        let player = &session(&mut state).player;
        assert!(player.jumped);
        assert_eq!(player.vel.y, -19);
    }

    #[test]
    fn test_determinism() {
        let inputs = [
            press(|i| i.horizontal = Horizontal::Right),
            press(|i| i.shoot = true),
            press(|i| i.jump = true),
            TickInput::default(),
        ];
        let run = || {
            let mut state = playing(Settings::default());
            let mut log = Vec::new();
            for n in 0..1500 {
                log.extend(tick(&mut state, &inputs[n % inputs.len()]));
            }
            let session = state.session.as_ref().map(|s| {
                (
                    s.score,
                    s.lives,
                    s.enemies.iter().map(|e| e.rect).collect::<Vec<_>>(),
                )
            });
            (log, session, state.phase)
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_fixed_timestep_accumulates() {
        let mut clock = FixedTimestep::new(0.01, 3);
        assert_eq!(clock.advance(0.005), 0);
        assert_eq!(clock.advance(0.006), 1);
        assert_eq!(clock.advance(0.025), 2);
        // Capped at 3 substeps, the rest carries over
        assert_eq!(clock.advance(0.1), 3);
        assert!(clock.advance(0.0) >= 3);
    }

    #[test]
    fn test_horizontal_from_held() {
        assert_eq!(Horizontal::from_held(true, true), Horizontal::Left);
        assert_eq!(Horizontal::from_held(false, true), Horizontal::Right);
        assert_eq!(Horizontal::from_held(false, false), Horizontal::Stop);
    }
}
