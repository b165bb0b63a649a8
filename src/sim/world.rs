//! Procedural level dressing
//!
//! Scatters trees, mountains, castles and clouds across the world. Tree
//! canopies and castle ledges double as platforms; those are fixed once
//! generated and are the only thing the player collides with besides the
//! ground.

use rand::Rng;
use rand_pcg::Pcg32;

use super::rect::Rect;
use crate::settings::Settings;

const TREE_COUNT: i32 = 15;
const TREE_SPACING: i32 = 900;
const TREE_JITTER: i32 = 500;
const TREE_WIDTH: i32 = 280;
const TREE_HEIGHT: i32 = 290;

const MOUNTAIN_COUNT: i32 = 5;
const MOUNTAIN_SPACING: i32 = 900;
const MOUNTAIN_JITTER: i32 = 500;
const MOUNTAIN_WIDTH: i32 = 480;
const MOUNTAIN_HEIGHT: i32 = 300;
/// Mountains sink below the ground line a little
const MOUNTAIN_RISE: i32 = 270;

const CASTLE_COUNT: i32 = 3;
const CASTLE_OFFSET: i32 = 100;
const CASTLE_SPACING: i32 = 1700;
const CASTLE_JITTER: i32 = 200;
const CASTLE_WIDTH: i32 = 600;
const CASTLE_HEIGHT: i32 = 500;
const CASTLE_RISE: i32 = 430;
/// (x inset, height above ground, width) of each castle ledge
const CASTLE_LEDGES: [(i32, i32, i32); 2] = [(50, 430, 500), (150, 330, 300)];

const CLOUD_COUNT: usize = 15;
const CLOUD_WIDTH: i32 = 150;
const CLOUD_HEIGHT: i32 = 120;
const CLOUD_BAND: i32 = 200;

/// Thickness of every walkable ledge
pub const PLATFORM_THICKNESS: i32 = 20;

/// Static world geometry for one session
#[derive(Debug, Clone, Default)]
pub struct Environment {
    pub trees: Vec<Rect>,
    pub mountains: Vec<Rect>,
    pub castles: Vec<Rect>,
    /// Drift slowly left and wrap; purely decorative
    pub clouds: Vec<Rect>,
    platforms: Vec<Rect>,
}

impl Environment {
    /// Lay out a new world
    pub fn generate(settings: &Settings, rng: &mut Pcg32) -> Self {
        let ground = settings.ground_y;
        let mut env = Self::default();

        for i in 0..TREE_COUNT {
            let x = i * TREE_SPACING + rng.random_range(0..TREE_JITTER);
            let tree = Rect::new(x, ground - TREE_HEIGHT, TREE_WIDTH, TREE_HEIGHT);
            env.platforms
                .push(Rect::new(tree.x, tree.y, TREE_WIDTH, PLATFORM_THICKNESS));
            env.trees.push(tree);
        }

        for i in 0..MOUNTAIN_COUNT {
            let x = i * MOUNTAIN_SPACING + rng.random_range(0..MOUNTAIN_JITTER);
            env.mountains.push(Rect::new(
                x,
                ground - MOUNTAIN_RISE,
                MOUNTAIN_WIDTH,
                MOUNTAIN_HEIGHT,
            ));
        }

        for i in 0..CASTLE_COUNT {
            let x = CASTLE_OFFSET + i * CASTLE_SPACING + rng.random_range(0..CASTLE_JITTER);
            env.castles
                .push(Rect::new(x, ground - CASTLE_RISE, CASTLE_WIDTH, CASTLE_HEIGHT));
            for (inset, rise, width) in CASTLE_LEDGES {
                env.platforms
                    .push(Rect::new(x + inset, ground - rise, width, PLATFORM_THICKNESS));
            }
        }

        for _ in 0..CLOUD_COUNT {
            env.clouds.push(Rect::new(
                rng.random_range(0..settings.world_width),
                rng.random_range(0..CLOUD_BAND),
                CLOUD_WIDTH,
                CLOUD_HEIGHT,
            ));
        }

        log::debug!(
            "Generated environment: {} trees, {} castles, {} platforms",
            env.trees.len(),
            env.castles.len(),
            env.platforms.len()
        );
        env
    }

    /// Collidable ledges (immutable for the session)
    pub fn platforms(&self) -> &[Rect] {
        &self.platforms
    }

    /// Scroll clouds one unit left, wrapping to the far edge
    pub fn drift_clouds(&mut self, world_width: i32) {
        for cloud in &mut self.clouds {
            cloud.x -= 1;
            if cloud.right() < 0 {
                cloud.x = world_width;
            }
        }
    }
}
