//! Headless auto-walk: explore each built-in scenario and walk the result.
//!
//! Set `TILEWALK_LOG=debug` to see every reached step.

use tilewalk_demos::{TICK_RATE, init_logging, render_order, run, scenarios};

const MAX_SECONDS: u32 = 600;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging()?;
    for scenario in scenarios() {
        let result = run(&scenario, MAX_SECONDS * TICK_RATE as u32)?;
        println!(
            "{} ({:?}): {} steps, {} reached in {:.1}s, {} snaps{}",
            scenario.name,
            scenario.graph,
            result.path.len(),
            result.reached,
            result.ticks as f32 / TICK_RATE,
            result.snaps,
            if result.finished { "" } else { " (unfinished)" }
        );
        println!("{}\n", render_order(scenario.layout, &result.path)?);
    }
    Ok(())
}
