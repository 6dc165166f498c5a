//! Per-tick path following in pixel space.
//!
//! A [`PathFollower`] owns a cursor into a [`Path`] and, given a live
//! position each tick, either steers toward the current step's tile center
//! or advances the cursor once that center is reached within tolerance.

use glam::Vec2;
use tilewalk_core::Point;
use tilewalk_paths::Path;

/// Pixel-space movement settings.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FollowConfig {
    /// Tile edge length in pixels.
    pub tile_size: f32,
    /// Movement speed in pixels per second.
    pub speed: f32,
    /// Arrival tolerance per unit of speed.
    pub epsilon_per_speed: f32,
}

impl Default for FollowConfig {
    fn default() -> Self {
        Self {
            tile_size: 32.0,
            speed: 100.0,
            epsilon_per_speed: 0.009,
        }
    }
}

impl FollowConfig {
    /// Arrival tolerance, in pixels, at the current speed.
    #[inline]
    pub fn epsilon(&self) -> f32 {
        self.speed * self.epsilon_per_speed
    }

    /// Pixel position of the center of tile `p`.
    #[inline]
    pub fn tile_center(&self, p: Point) -> Vec2 {
        let half = self.tile_size / 2.0;
        Vec2::new(
            p.x as f32 * self.tile_size + half,
            p.y as f32 * self.tile_size + half,
        )
    }

    /// Tile containing pixel position `pos`.
    #[inline]
    pub fn tile_at(&self, pos: Vec2) -> Point {
        let t = (pos / self.tile_size).floor();
        Point::new(t.x as i32, t.y as i32)
    }
}

/// Whether `a` and `b` differ by less than `epsilon`.
#[inline]
pub fn fuzzy_eq(a: f32, b: f32, epsilon: f32) -> bool {
    (a - b).abs() < epsilon
}

/// Outcome of one follower tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FollowStep {
    /// Head toward the current target with this velocity.
    Move { velocity: Vec2 },
    /// Step `reached` was reached and the cursor moved past it. The mover
    /// keeps its current velocity for this tick.
    Advanced { reached: usize },
    /// The cursor is past the last step; the mover should stop.
    Finished,
}

/// A moving thing with a position and velocity, both in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Body {
    pub position: Vec2,
    pub velocity: Vec2,
}

impl Body {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
        }
    }

    /// Advance the position by `dt` seconds of the current velocity.
    #[inline]
    pub fn integrate(&mut self, dt: f32) {
        self.position += self.velocity * dt;
    }
}

/// Cursor-driven follower over an exploration path.
#[derive(Debug, Clone)]
pub struct PathFollower {
    path: Path,
    cursor: usize,
    config: FollowConfig,
}

impl PathFollower {
    pub fn new(path: Path, config: FollowConfig) -> Self {
        Self {
            path,
            cursor: 0,
            config,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &FollowConfig {
        &self.config
    }

    /// Index of the step currently being approached.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether every step has been reached.
    pub fn is_finished(&self) -> bool {
        self.cursor >= self.path.len()
    }

    /// Change speed. The arrival tolerance scales with it from the next
    /// tick on.
    pub fn set_speed(&mut self, speed: f32) {
        self.config.speed = speed;
    }

    /// Tile of the step currently being approached.
    pub fn target(&self) -> Option<Point> {
        self.path.get(self.cursor)
    }

    /// Pixel center of the current target tile. This is also where a mover
    /// is put back after bumping into a wall.
    pub fn snap_position(&self) -> Option<Vec2> {
        self.target().map(|p| self.config.tile_center(p))
    }

    /// Restart from the first step.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Decide what to do this tick given the mover's position.
    pub fn step(&mut self, position: Vec2) -> FollowStep {
        let Some(dest) = self.snap_position() else {
            return FollowStep::Finished;
        };

        let eps = self.config.epsilon();
        if fuzzy_eq(position.x, dest.x, eps) && fuzzy_eq(position.y, dest.y, eps) {
            let reached = self.cursor;
            self.cursor += 1;
            log::trace!(
                "reached step {reached} at {} ({}/{})",
                self.path[reached],
                self.cursor,
                self.path.len()
            );
            return FollowStep::Advanced { reached };
        }

        let angle = (dest.y - position.y).atan2(dest.x - position.x);
        FollowStep::Move {
            velocity: Vec2::from_angle(angle) * self.config.speed,
        }
    }

    /// Run [`step`](Self::step) for `body` and apply the result to its
    /// velocity.
    pub fn drive(&mut self, body: &mut Body) -> FollowStep {
        let step = self.step(body.position);
        match step {
            FollowStep::Move { velocity } => body.velocity = velocity,
            FollowStep::Advanced { .. } => {}
            FollowStep::Finished => body.velocity = Vec2::ZERO,
        }
        step
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilewalk_paths::{Adjacency, GraphConfig, TileGraph};

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-3
    }

    #[test]
    fn default_tolerance() {
        let cfg = FollowConfig::default();
        assert!((cfg.epsilon() - 0.9).abs() < 1e-6);
    }

    #[test]
    fn fuzzy_eq_is_strict() {
        assert!(fuzzy_eq(10.0, 10.5, 0.9));
        assert!(fuzzy_eq(10.5, 10.0, 0.9));
        assert!(!fuzzy_eq(10.0, 11.0, 1.0));
        assert!(!fuzzy_eq(10.0, 12.0, 0.9));
    }

    #[test]
    fn tile_centers() {
        let cfg = FollowConfig::default();
        assert_eq!(cfg.tile_center(p(0, 0)), Vec2::new(16.0, 16.0));
        assert_eq!(cfg.tile_center(p(2, 1)), Vec2::new(80.0, 48.0));
        assert_eq!(cfg.tile_at(Vec2::new(80.0, 48.0)), p(2, 1));
        assert_eq!(cfg.tile_at(Vec2::new(-1.0, 5.0)), p(-1, 0));
    }

    #[test]
    fn advances_when_on_target() {
        let path = Path::from(vec![p(0, 0), p(1, 0)]);
        let mut f = PathFollower::new(path, FollowConfig::default());
        assert_eq!(f.step(Vec2::new(16.3, 15.8)), FollowStep::Advanced { reached: 0 });
        assert_eq!(f.cursor(), 1);
        assert_eq!(f.target(), Some(p(1, 0)));
    }

    #[test]
    fn moves_toward_target_at_speed() {
        let path = Path::from(vec![p(1, 0)]);
        let mut f = PathFollower::new(path, FollowConfig::default());
        match f.step(Vec2::new(16.0, 16.0)) {
            FollowStep::Move { velocity } => {
                assert!(approx(velocity, Vec2::new(100.0, 0.0)));
            }
            other => panic!("expected Move, got {other:?}"),
        }
        match f.step(Vec2::new(48.0, 80.0)) {
            FollowStep::Move { velocity } => {
                assert!(approx(velocity, Vec2::new(0.0, -100.0)));
            }
            other => panic!("expected Move, got {other:?}"),
        }
        assert_eq!(f.cursor(), 0);
    }

    #[test]
    fn tolerance_follows_speed() {
        let path = Path::from(vec![p(0, 0)]);
        let mut f = PathFollower::new(path, FollowConfig::default());
        let near = Vec2::new(17.5, 16.0);
        assert!(matches!(f.step(near), FollowStep::Move { .. }));
        f.set_speed(200.0);
        assert_eq!(f.step(near), FollowStep::Advanced { reached: 0 });
    }

    #[test]
    fn finished_stops_body() {
        let mut f = PathFollower::new(Path::default(), FollowConfig::default());
        let mut body = Body {
            position: Vec2::ZERO,
            velocity: Vec2::new(3.0, 4.0),
        };
        assert!(f.is_finished());
        assert_eq!(f.drive(&mut body), FollowStep::Finished);
        assert_eq!(body.velocity, Vec2::ZERO);
        assert_eq!(f.snap_position(), None);
    }

    #[test]
    fn advanced_keeps_velocity() {
        let mut f = PathFollower::new(Path::from(vec![p(0, 0), p(1, 0)]), FollowConfig::default());
        let mut body = Body {
            position: Vec2::new(16.0, 16.0),
            velocity: Vec2::new(100.0, 0.0),
        };
        assert_eq!(f.drive(&mut body), FollowStep::Advanced { reached: 0 });
        assert_eq!(body.velocity, Vec2::new(100.0, 0.0));
    }

    #[test]
    fn walks_whole_path() {
        let graph =
            TileGraph::from_fn(3, 3, |q| q == p(1, 1), GraphConfig::new(Adjacency::Cardinal));
        let path = graph.dfs(p(0, 0));
        let cfg = FollowConfig::default();
        let mut body = Body::at(cfg.tile_center(p(0, 0)));
        let mut f = PathFollower::new(path.clone(), cfg);

        let dt = 1.0 / 60.0;
        let mut reached = Vec::new();
        for _ in 0..10_000 {
            match f.drive(&mut body) {
                FollowStep::Advanced { reached: i } => reached.push(i),
                FollowStep::Finished => break,
                FollowStep::Move { .. } => {}
            }
            body.integrate(dt);
        }

        assert!(f.is_finished());
        assert_eq!(reached, (0..path.len()).collect::<Vec<_>>());
        assert_eq!(body.velocity, Vec2::ZERO);
        let end = cfg.tile_center(p(1, 0));
        assert!((body.position - end).length() < 4.0);
    }

    #[test]
    fn reset_restarts() {
        let mut f = PathFollower::new(Path::from(vec![p(0, 0)]), FollowConfig::default());
        f.step(Vec2::new(16.0, 16.0));
        assert!(f.is_finished());
        f.reset();
        assert_eq!(f.cursor(), 0);
        assert_eq!(f.snap_position(), Some(Vec2::new(16.0, 16.0)));
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn config_round_trip() {
        let cfg = FollowConfig {
            speed: 150.0,
            ..FollowConfig::default()
        };
        let json = serde_json::to_string(&cfg).unwrap();
        let back: FollowConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
    }
}
