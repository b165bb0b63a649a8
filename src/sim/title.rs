//! Menu-screen decoration
//!
//! Keeps ticking whenever gameplay is not (title, character select, pause,
//! game over). Nothing here affects the simulation.

use rand::Rng;
use rand_pcg::Pcg32;

use super::state::Character;
use crate::settings::Settings;

const MENU_CLOUD_COUNT: usize = 8;
/// How far past the viewport edges figures and clouds travel before wrapping
const WRAP_MARGIN: i32 = 200;

/// A character sprite running across the title screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunningFigure {
    pub character: Character,
    pub x: i32,
    pub speed: i32,
    pub rightward: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuCloud {
    pub x: i32,
    pub y: i32,
    pub speed: i32,
    pub rightward: bool,
}

/// Title-screen animation state
#[derive(Debug, Clone)]
pub struct TitleScene {
    /// 0..40 cycle; the renderer blinks prompts off it
    pub blink_timer: u32,
    /// 0..8 cycle
    pub animation_frame: u32,
    pub figures: Vec<RunningFigure>,
    pub clouds: Vec<MenuCloud>,
    viewport_width: i32,
    interval: u32,
    elapsed: u32,
}

impl TitleScene {
    pub fn new(settings: &Settings, rng: &mut Pcg32) -> Self {
        let width = settings.viewport_width;
        let figures = Character::ALL
            .iter()
            .map(|&character| RunningFigure {
                character,
                x: rng.random_range(0..width),
                speed: figure_speed(rng),
                rightward: rng.random_bool(0.5),
            })
            .collect();
        let clouds = (0..MENU_CLOUD_COUNT)
            .map(|_| MenuCloud {
                x: rng.random_range(0..width),
                y: cloud_height(rng),
                speed: cloud_speed(rng),
                rightward: rng.random_bool(0.5),
            })
            .collect();

        Self {
            blink_timer: 0,
            animation_frame: 0,
            figures,
            clouds,
            viewport_width: width,
            interval: settings.title_tick_interval.max(1),
            elapsed: 0,
        }
    }

    /// Whether prompt text is shown this tick
    pub fn prompt_visible(&self) -> bool {
        self.blink_timer < 30
    }

    /// Advance one simulation tick; animates every `title_tick_interval`
    pub fn tick(&mut self, rng: &mut Pcg32) {
        self.elapsed += 1;
        if self.elapsed < self.interval {
            return;
        }
        self.elapsed = 0;
        self.step(rng);
    }

    fn step(&mut self, rng: &mut Pcg32) {
        self.animation_frame = (self.animation_frame + 1) % 8;
        self.blink_timer = (self.blink_timer + 1) % 40;

        let (left, right) = (-WRAP_MARGIN, self.viewport_width + WRAP_MARGIN);

        for figure in &mut self.figures {
            if figure.rightward {
                figure.x += figure.speed;
                if figure.x > right {
                    figure.x = left;
                    figure.speed = figure_speed(rng);
                }
            } else {
                figure.x -= figure.speed;
                if figure.x < left {
                    figure.x = right;
                    figure.speed = figure_speed(rng);
                }
            }
        }

        for cloud in &mut self.clouds {
            if cloud.rightward {
                cloud.x += cloud.speed;
                if cloud.x > right {
                    cloud.x = left;
                    cloud.y = cloud_height(rng);
                    cloud.speed = cloud_speed(rng);
                }
            } else {
                cloud.x -= cloud.speed;
                if cloud.x < left {
                    cloud.x = right;
                    cloud.y = cloud_height(rng);
                    cloud.speed = cloud_speed(rng);
                }
            }
        }
    }
}

fn figure_speed(rng: &mut Pcg32) -> i32 {
    2 + rng.random_range(0..3)
}

fn cloud_speed(rng: &mut Pcg32) -> i32 {
    1 + rng.random_range(0..2)
}

fn cloud_height(rng: &mut Pcg32) -> i32 {
    50 + rng.random_range(0..200)
}
