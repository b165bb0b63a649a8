//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod director;
pub mod rect;
pub mod snapshot;
pub mod state;
pub mod tick;
pub mod title;
pub mod world;

pub use collision::{PlatformContact, first_hit, knock_back, outside_world, platform_contact};
pub use director::{DirectorEvent, WaveDirector};
pub use rect::Rect;
pub use snapshot::{BossView, PlayerView, RenderSnapshot, SceneryView, SessionView};
pub use state::{
    Actor, ActorKind, Character, GameEvent, GamePhase, GameState, Notification, Player,
    Projectile, SessionState,
};
pub use tick::{FixedTimestep, Horizontal, TickInput, tick};
pub use title::TitleScene;
pub use world::Environment;
