//! Auto-walk scenarios shared by the demo binaries.
//!
//! Each [`Scenario`] is plain data: a map, graph settings and movement
//! settings. [`run`] builds the walkability graph, explores it depth-first
//! from the `@` tile and simulates a character following the exploration
//! path at a fixed tick rate, snapping it back onto the path whenever it
//! bumps into a wall.

use tilewalk_core::{Point, TileSource};
use tilewalk_map::{FLOOR, Layout, Legend};
use tilewalk_motion::{Body, FollowConfig, FollowStep, PathFollower};
use tilewalk_paths::{Adjacency, BuildPolicy, GraphConfig, Path, TileGraph};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

/// Simulation rate in ticks per second.
pub const TICK_RATE: f32 = 60.0;

const CAVE: &str = "
@....#....
.##..#.##.
.#.......#
.#.###.#..
...#...#.#
";

const HALLS: &str = "
@..#....
.#.#.##.
.#...#..
...#...#
";

/// One auto-walk setup.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: &'static str,
    /// Map text for [`Legend::standard`] plus `@`, the start tile.
    pub layout: &'static str,
    pub graph: GraphConfig,
    pub follow: FollowConfig,
}

/// The built-in scenarios.
pub fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            name: "cave-cardinal",
            layout: CAVE,
            graph: GraphConfig::new(Adjacency::Cardinal),
            follow: FollowConfig::default(),
        },
        Scenario {
            name: "halls-diagonal",
            layout: HALLS,
            graph: GraphConfig::new(Adjacency::All).with_policy(BuildPolicy::SinglePass),
            follow: FollowConfig::default(),
        },
        Scenario {
            name: "cave-fast",
            layout: CAVE,
            graph: GraphConfig::new(Adjacency::Cardinal),
            follow: FollowConfig {
                speed: 160.0,
                ..FollowConfig::default()
            },
        },
    ]
}

/// What happened during one scenario run.
#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    pub start: Point,
    pub path: Path,
    /// Steps whose tile center was reached.
    pub reached: usize,
    pub ticks: u32,
    /// Times the character hit a wall and was put back on the path.
    pub snaps: u32,
    pub finished: bool,
}

/// Build, explore and walk `scenario` for at most `max_ticks` ticks.
pub fn run(scenario: &Scenario, max_ticks: u32) -> Result<Run, Box<dyn std::error::Error>> {
    let layout = Layout::parse(scenario.layout)?;
    let layer = layout.to_layer(&Legend::standard().glyph('@', FLOOR))?;
    let start = layout.find('@').unwrap_or(Point::ZERO);

    let graph = TileGraph::build(&layer, scenario.graph);
    let path = graph.dfs_checked(start)?;
    log::info!(
        "{}: {} walkable tiles, exploring {} from {}",
        scenario.name,
        graph.len(),
        path.len(),
        start
    );

    let cfg = scenario.follow;
    let mut follower = PathFollower::new(path.clone(), cfg);
    let mut body = Body::at(cfg.tile_center(start));
    let dt = 1.0 / TICK_RATE;
    let mut reached = 0;
    let mut snaps = 0;
    let mut ticks = 0;

    while ticks < max_ticks {
        ticks += 1;
        match follower.drive(&mut body) {
            FollowStep::Finished => break,
            FollowStep::Advanced { reached: i } => {
                reached += 1;
                log::debug!("{}: step {i} {} at tick {ticks}", scenario.name, path[i]);
            }
            FollowStep::Move { .. } => {}
        }
        body.integrate(dt);

        let tile = cfg.tile_at(body.position);
        if !layer.is_walkable(tile) {
            if let Some(snap) = follower.snap_position() {
                log::debug!("{}: bumped into {tile}, snapping back", scenario.name);
                body.position = snap;
                body.velocity = glam::Vec2::ZERO;
                snaps += 1;
            }
        }
    }

    let finished = follower.is_finished();
    if !finished {
        log::warn!(
            "{}: gave up after {ticks} ticks at step {}/{}",
            scenario.name,
            follower.cursor(),
            path.len()
        );
    }
    Ok(Run {
        start,
        path,
        reached,
        ticks,
        snaps,
        finished,
    })
}

/// Render `layout` with each explored tile replaced by its step number
/// (mod 10).
pub fn render_order(layout: &str, path: &Path) -> Result<String, Box<dyn std::error::Error>> {
    let layout = Layout::parse(layout)?;
    let size = layout.size();
    let mut out = String::with_capacity(((size.x + 1) * size.y) as usize);
    for y in 0..size.y {
        if y > 0 {
            out.push('\n');
        }
        for x in 0..size.x {
            let p = Point::new(x, y);
            let ch = match path.position(p) {
                Some(i) => char::from_digit((i % 10) as u32, 10).unwrap_or('?'),
                None => layout.glyph(p).unwrap_or(' '),
            };
            out.push(ch);
        }
    }
    Ok(out)
}

/// Install the global log subscriber. Records from the `log` facade are
/// bridged into it. The filter comes from `TILEWALK_LOG` (for example
/// `debug` or `tilewalk_paths=trace`) and defaults to `info`.
///
/// Fails if a subscriber or logger is already installed.
pub fn init_logging() -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_env("TILEWALK_LOG")
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish()
        .try_init()
}
