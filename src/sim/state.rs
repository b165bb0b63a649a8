//! Game state and core simulation types
//!
//! Entities own their position outright; the renderer only ever sees the
//! copies in [`super::RenderSnapshot`].

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{PlatformContact, platform_contact};
use super::director::WaveDirector;
use super::rect::Rect;
use super::title::TitleScene;
use super::world::Environment;
use crate::error::SettingsError;
use crate::settings::Settings;

/// Ticks per blink half-period while invulnerable
pub const BLINK_PERIOD_TICKS: u32 = 10;

/// Coarse state of the whole game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for confirm
    Title,
    /// Choosing a character
    CharacterSelect,
    /// Active gameplay
    Playing,
    /// Game is paused (session kept, nothing simulates)
    Paused,
    /// Run ended
    GameOver,
}

/// Playable characters
///
/// Opaque to the simulation; the renderer uses it to pick walk-cycle frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Character {
    #[default]
    Mario,
    Peppa,
    Homer,
    JohnWick,
    Empanada,
}

impl Character {
    pub const ALL: [Character; 5] = [
        Character::Mario,
        Character::Peppa,
        Character::Homer,
        Character::JohnWick,
        Character::Empanada,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Character::Mario => "Mario",
            Character::Peppa => "Peppa Pig",
            Character::Homer => "Homer",
            Character::JohnWick => "John Wick",
            Character::Empanada => "Empanada Gaucha",
        }
    }

    fn index(&self) -> usize {
        Self::ALL.iter().position(|c| c == self).unwrap_or(0)
    }

    /// Next character, wrapping around
    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Previous character, wrapping around
    pub fn previous(&self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// The player-controlled character
#[derive(Debug, Clone)]
pub struct Player {
    pub rect: Rect,
    /// Horizontal speed is constant while a direction is held; vertical
    /// speed integrates gravity
    pub vel: IVec2,
    pub on_ground: bool,
    pub facing_right: bool,
    pub jumped: bool,
    pub double_jumped: bool,
    /// Moving horizontally this tick (drives the walk cycle)
    pub moving: bool,
    /// Walk-cycle frame, 0 or 1
    pub animation_frame: u8,
    animation_counter: u32,
    /// Ticks of invulnerability left (0 = vulnerable)
    pub invulnerable_ticks: u32,
    pub character: Character,
}

impl Player {
    /// Fresh player at the spawn point, slightly above the ground line
    pub fn new(character: Character, settings: &Settings) -> Self {
        Self {
            rect: Rect::new(
                settings.player_spawn_x,
                settings.ground_y - settings.player_spawn_lift,
                settings.player_width,
                settings.player_height,
            ),
            vel: IVec2::ZERO,
            on_ground: true,
            facing_right: true,
            jumped: false,
            double_jumped: false,
            moving: false,
            animation_frame: 0,
            animation_counter: 0,
            invulnerable_ticks: 0,
            character,
        }
    }

    pub fn move_left(&mut self, speed: i32) {
        self.vel.x = -speed;
        self.facing_right = false;
    }

    pub fn move_right(&mut self, speed: i32) {
        self.vel.x = speed;
        self.facing_right = true;
    }

    pub fn stop(&mut self) {
        self.vel.x = 0;
    }

    /// Jump from the ground, or double-jump once in the air
    ///
    /// Returns false when the jump was ignored (already double-jumped, or
    /// airborne without having jumped).
    pub fn jump(&mut self, jump_velocity: i32) -> bool {
        if self.on_ground {
            self.vel.y = jump_velocity;
            self.on_ground = false;
            self.jumped = true;
            true
        } else if self.jumped && !self.double_jumped {
            self.vel.y = jump_velocity;
            self.double_jumped = true;
            true
        } else {
            false
        }
    }

    /// Integrate one tick: move, apply gravity, resolve ground and platforms
    pub fn update(&mut self, platforms: &[Rect], settings: &Settings) {
        let previous = self.rect;

        self.rect.x += self.vel.x;
        self.vel.y += settings.gravity;
        self.rect.y += self.vel.y;

        self.advance_animation(settings.animation_delay);
        self.invulnerable_ticks = self.invulnerable_ticks.saturating_sub(1);

        self.on_ground = false;
        if self.rect.y >= settings.ground_y - self.rect.height {
            self.land_on(settings.ground_y);
        }

        for platform in platforms {
            match platform_contact(&self.rect, &previous, self.vel.y, platform) {
                Some(PlatformContact::Landed { top }) => self.land_on(top),
                Some(PlatformContact::Blocked) => self.rect.x = previous.x,
                None => {}
            }
        }

        self.rect.clamp_x(settings.world_width);
    }

    fn land_on(&mut self, surface_y: i32) {
        self.rect.y = surface_y - self.rect.height;
        self.on_ground = true;
        self.vel.y = 0;
        self.jumped = false;
        self.double_jumped = false;
    }

    fn advance_animation(&mut self, delay: u32) {
        let moving = self.vel.x != 0;
        if moving != self.moving {
            self.animation_frame = 0;
            self.animation_counter = 0;
        }
        self.moving = moving;

        if moving {
            self.animation_counter += 1;
            if self.animation_counter >= delay {
                self.animation_counter = 0;
                self.animation_frame = (self.animation_frame + 1) % 2;
            }
        } else {
            self.animation_frame = 0;
        }
    }

    /// Try to hurt the player
    ///
    /// Returns true if the hit landed. A landed hit starts a fresh
    /// invulnerability window; hits during the window are ignored and do
    /// not extend it.
    pub fn take_damage(&mut self, invulnerability_ticks: u32) -> bool {
        if self.is_invulnerable() {
            return false;
        }
        self.invulnerable_ticks = invulnerability_ticks;
        true
    }

    #[inline]
    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable_ticks > 0
    }

    /// Whether the sprite is drawn this tick (blinks while invulnerable)
    pub fn is_visible(&self) -> bool {
        !(self.is_invulnerable() && (self.invulnerable_ticks / BLINK_PERIOD_TICKS) % 2 == 0)
    }
}

/// What kind of hostile actor this is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorKind {
    /// Dies on the first hit; bobs up and down
    Enemy,
    /// Walks the ground line and soaks `health` hits
    Boss { health: u32 },
}

/// A hostile actor (regular enemy or boss)
#[derive(Debug, Clone)]
pub struct Actor {
    pub id: u32,
    pub rect: Rect,
    pub vel: IVec2,
    pub kind: ActorKind,
}

impl Actor {
    pub fn enemy(id: u32, rect: Rect, vel: IVec2) -> Self {
        Self {
            id,
            rect,
            vel,
            kind: ActorKind::Enemy,
        }
    }

    /// A boss standing on the boss ground line
    pub fn boss(id: u32, x: i32, settings: &Settings) -> Self {
        Self {
            id,
            rect: Rect::new(x, settings.boss_top(), settings.boss_size, settings.boss_size),
            vel: IVec2::new(settings.boss_speed, 0),
            kind: ActorKind::Boss {
                health: settings.boss_health,
            },
        }
    }

    /// Advance one tick
    pub fn update(&mut self, settings: &Settings) {
        match self.kind {
            ActorKind::Enemy => {
                self.rect.translate(self.vel);
                if self.rect.y <= settings.enemy_top_margin
                    || self.rect.y >= settings.ground_y - self.rect.height
                {
                    self.vel.y = -self.vel.y;
                }
            }
            ActorKind::Boss { .. } => {
                self.rect.x += self.vel.x;
                if self.rect.x <= 0 || self.rect.x >= settings.world_width - self.rect.width {
                    self.vel.x = -self.vel.x;
                }
                self.rect.y = settings.boss_ground_y - self.rect.height;
                self.vel.y = 0;
            }
        }
    }

    /// Take one hit. Only bosses track health; enemies ignore this.
    pub fn damage(&mut self) {
        if let ActorKind::Boss { health } = &mut self.kind {
            *health = health.saturating_sub(1);
        }
    }

    pub fn health(&self) -> Option<u32> {
        match self.kind {
            ActorKind::Boss { health } => Some(health),
            ActorKind::Enemy => None,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health().is_none_or(|health| health > 0)
    }

    pub fn is_boss(&self) -> bool {
        matches!(self.kind, ActorKind::Boss { .. })
    }
}

/// A player shot travelling horizontally
#[derive(Debug, Clone)]
pub struct Projectile {
    pub id: u32,
    pub rect: Rect,
    /// +1 (right) or -1 (left)
    pub direction: i32,
    pub speed: i32,
}

impl Projectile {
    /// Fire from the player's leading edge at mid-height
    pub fn from_player(id: u32, player: &Player, settings: &Settings) -> Self {
        let direction = if player.facing_right { 1 } else { -1 };
        let x = if direction > 0 {
            player.rect.right()
        } else {
            player.rect.x - settings.projectile_width / 2
        };
        let y = player.rect.y + player.rect.height / 2 - settings.projectile_height / 2;
        Self {
            id,
            rect: Rect::new(x, y, settings.projectile_width, settings.projectile_height),
            direction,
            speed: settings.projectile_speed,
        }
    }

    pub fn update(&mut self) {
        self.rect.x += self.speed * self.direction;
    }
}

/// A transient banner ("WAVE 4!") with a countdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub text: String,
    pub remaining_ticks: u32,
}

/// Things that happened during a tick, for audio/UI collaborators
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    PhaseChanged { from: GamePhase, to: GamePhase },
    CharacterSelected { character: Character },
    SessionStarted { character: Character },
    EnemiesSpawned { count: u32 },
    EnemyKilled { id: u32 },
    EnemyContact { id: u32 },
    PlayerDamaged { lives: u32 },
    ShotFired { id: u32 },
    WaveAdvanced { wave: u32 },
    BossSpawned { health: u32 },
    BossHit { health: u32 },
    BossDefeated,
    GameOver { score: u64, wave: u32 },
    /// Cancel on the game-over screen; the host decides whether to exit
    QuitRequested,
}

/// Everything that belongs to one run, reset when a new run starts
#[derive(Debug, Clone)]
pub struct SessionState {
    pub player: Player,
    /// Live enemies in spawn order
    pub enemies: Vec<Actor>,
    pub projectiles: Vec<Projectile>,
    /// At most one boss per session at a time
    pub boss: Option<Actor>,
    pub score: u64,
    pub lives: u32,
    pub wave_count: u32,
    pub notification: Option<Notification>,
    pub environment: Environment,
    pub director: WaveDirector,
    /// Display-only camera offset
    pub camera_x: i32,
    /// Simulated ticks in this session
    pub time_ticks: u64,
    next_id: u32,
}

impl SessionState {
    /// Fresh run: new player, new world, wave 1, full lives
    pub fn new(character: Character, settings: &Settings, rng: &mut Pcg32) -> Self {
        let mut director = WaveDirector::new(settings);
        director.start();

        let mut session = Self {
            player: Player::new(character, settings),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            boss: None,
            score: 0,
            lives: settings.starting_lives,
            wave_count: 1,
            notification: None,
            environment: Environment::generate(settings, rng),
            director,
            camera_x: 0,
            time_ticks: 0,
            next_id: 1,
        };
        session.notify("LET THE ADVENTURE BEGIN!", settings.notification_ticks);
        session
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Show a banner, replacing any current one
    pub fn notify(&mut self, text: impl Into<String>, ticks: u32) {
        self.notification = Some(Notification {
            text: text.into(),
            remaining_ticks: ticks,
        });
    }

    /// Count the banner down, dropping it at zero
    pub fn tick_notification(&mut self) {
        if let Some(notification) = &mut self.notification {
            notification.remaining_ticks = notification.remaining_ticks.saturating_sub(1);
            if notification.remaining_ticks == 0 {
                self.notification = None;
            }
        }
    }

    /// Fire a projectile from the player; returns its ID
    pub fn shoot(&mut self, settings: &Settings) -> u32 {
        let id = self.next_entity_id();
        let projectile = Projectile::from_player(id, &self.player, settings);
        self.projectiles.push(projectile);
        id
    }

    /// Center the camera on the player, clamped to the world
    pub fn update_camera(&mut self, settings: &Settings) {
        let max_x = (settings.world_width - settings.viewport_width).max(0);
        self.camera_x = (self.player.rect.x - settings.viewport_width / 2).clamp(0, max_x);
    }
}

/// Complete game state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub settings: Settings,
    pub phase: GamePhase,
    /// Character highlighted on the select screen
    pub selected: Character,
    /// Present from the start of a run until returning to the title
    pub session: Option<SessionState>,
    /// Menu decoration
    pub title: TitleScene,
    /// Total ticks since creation, in every phase
    pub time_ticks: u64,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a new game at the title screen with default settings
    pub fn new(seed: u64) -> Self {
        Self::from_parts(seed, Settings::default())
    }

    /// Create a new game with custom tuning
    ///
    /// Rejects settings the simulation cannot run with (zero periods, empty
    /// random ranges, a world narrower than its actors).
    pub fn with_settings(seed: u64, settings: Settings) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self::from_parts(seed, settings))
    }

    fn from_parts(seed: u64, settings: Settings) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let title = TitleScene::new(&settings, &mut rng);
        Self {
            seed,
            settings,
            phase: GamePhase::Title,
            selected: Character::default(),
            session: None,
            title,
            time_ticks: 0,
            rng,
        }
    }

    /// Begin a run with the selected character and enter `Playing`
    pub fn start_session(&mut self) {
        let session = SessionState::new(self.selected, &self.settings, &mut self.rng);
        log::info!(
            "Session started as {} ({} platforms)",
            self.selected.display_name(),
            session.environment.platforms().len()
        );
        self.session = Some(session);
        self.phase = GamePhase::Playing;
    }
}
