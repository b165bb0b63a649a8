//! Read-only copy of what a renderer needs for one frame
//!
//! Built after a tick finishes so the presentation layer never holds a
//! reference into live state. Static level geometry is fixed for a session,
//! so it lives in [`SceneryView`] and is captured once per session rather
//! than every frame.

use serde::Serialize;

use super::rect::Rect;
use super::state::{Character, GamePhase, GameState, Notification, Player};
use super::world::Environment;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerView {
    pub rect: Rect,
    pub character: Character,
    pub facing_right: bool,
    pub moving: bool,
    pub animation_frame: u8,
    pub invulnerable: bool,
    /// False on the "off" half of the invulnerability blink
    pub visible: bool,
}

impl From<&Player> for PlayerView {
    fn from(player: &Player) -> Self {
        Self {
            rect: player.rect,
            character: player.character,
            facing_right: player.facing_right,
            moving: player.moving,
            animation_frame: player.animation_frame,
            invulnerable: player.is_invulnerable(),
            visible: player.is_visible(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BossView {
    pub rect: Rect,
    pub health: u32,
}

/// Everything drawn for a session in progress
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionView {
    pub player: PlayerView,
    pub enemies: Vec<Rect>,
    pub boss: Option<BossView>,
    pub projectiles: Vec<Rect>,
    pub score: u64,
    pub lives: u32,
    pub wave: u32,
    pub notification: Option<Notification>,
    pub camera_x: i32,
    /// The only decoration that moves during play
    pub clouds: Vec<Rect>,
}

/// Level geometry that never changes during a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SceneryView {
    pub trees: Vec<Rect>,
    pub mountains: Vec<Rect>,
    pub castles: Vec<Rect>,
    /// Tree canopies and castle ledges the player can stand on
    pub platforms: Vec<Rect>,
}

impl From<&Environment> for SceneryView {
    fn from(env: &Environment) -> Self {
        Self {
            trees: env.trees.clone(),
            mountains: env.mountains.clone(),
            castles: env.castles.clone(),
            platforms: env.platforms().to_vec(),
        }
    }
}

impl SceneryView {
    /// Static geometry of the running session, if any
    pub fn capture(state: &GameState) -> Option<Self> {
        state
            .session
            .as_ref()
            .map(|s| SceneryView::from(&s.environment))
    }
}

/// Frame data for the renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderSnapshot {
    pub phase: GamePhase,
    pub selected: Character,
    /// Title and menu prompts blink off this
    pub prompt_visible: bool,
    pub session: Option<SessionView>,
}

impl RenderSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let session = state.session.as_ref().map(|s| SessionView {
            player: PlayerView::from(&s.player),
            enemies: s.enemies.iter().map(|e| e.rect).collect(),
            boss: s.boss.as_ref().map(|b| BossView {
                rect: b.rect,
                health: b.health().unwrap_or(0),
            }),
            projectiles: s.projectiles.iter().map(|p| p.rect).collect(),
            score: s.score,
            lives: s.lives,
            wave: s.wave_count,
            notification: s.notification.clone(),
            camera_x: s.camera_x,
            clouds: s.environment.clouds.clone(),
        });

        Self {
            phase: state.phase,
            selected: state.selected,
            prompt_visible: state.title.prompt_visible(),
            session,
        }
    }

    /// HUD line, e.g. "Score: 120  Lives: 2  Wave: 3"
    pub fn hud_line(&self) -> Option<String> {
        self.session.as_ref().map(|s| {
            format!("Score: {}  Lives: {}  Wave: {}", s.score, s.lives, s.wave)
        })
    }
}
