//! Collision detection and response for axis-aligned boxes
//!
//! Everything here is pure: callers pass rectangles in and apply the
//! returned response themselves. Platform response always judges the
//! contact from the *pre-move* rectangle, so a fast fall cannot be
//! mistaken for a side hit.

use super::rect::Rect;

/// How a moving box should respond to overlapping a platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformContact {
    /// Came down onto the platform from above; stand on `top`
    Landed { top: i32 },
    /// Walked into the platform's side this tick; undo the horizontal move
    Blocked,
}

/// Classify an overlap between a mover and a platform
///
/// `current` is the mover after this tick's integration, `previous` is the
/// same box before it moved, and `vel_y` is the mover's vertical velocity
/// (positive = falling). Landing wins over a lateral block when both apply.
/// Returns `None` if there is no overlap or the overlap needs no response
/// (e.g. jumping up through a platform from below).
pub fn platform_contact(
    current: &Rect,
    previous: &Rect,
    vel_y: i32,
    platform: &Rect,
) -> Option<PlatformContact> {
    if !current.intersects(platform) {
        return None;
    }

    if previous.bottom() <= platform.y && vel_y > 0 {
        return Some(PlatformContact::Landed { top: platform.y });
    }

    if !previous.overlaps_horizontally(platform) {
        return Some(PlatformContact::Blocked);
    }

    None
}

/// Index of the first target that overlaps `probe`, in iteration order
pub fn first_hit<'a, I>(probe: &Rect, targets: I) -> Option<usize>
where
    I: IntoIterator<Item = &'a Rect>,
{
    targets.into_iter().position(|target| probe.intersects(target))
}

/// True once a box has left `[-margin, world_width + margin]` horizontally
///
/// Both bounds are inclusive: a box sitting exactly on the margin is still
/// in the world.
#[inline]
pub fn outside_world(rect: &Rect, world_width: i32, margin: i32) -> bool {
    rect.x < -margin || rect.x > world_width + margin
}

/// Shove a box toward -x by `distance`, then keep it inside the world
pub fn knock_back(rect: &mut Rect, distance: i32, world_width: i32) {
    rect.x -= distance;
    rect.clamp_x(world_width);
}
