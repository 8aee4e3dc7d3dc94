//! Proscenium studio: a scripted tour of the stage runtime on the headless platform.

mod actors;
mod scenes;

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;
use proscenium_engine::coords::Vec2;
use proscenium_engine::input::{InputEvent, MouseButton};
use proscenium_engine::logging::{init_logging, LoggingConfig};
use proscenium_engine::platform::HeadlessPlatform;
use proscenium_engine::{Stage, StageConfig};

use actors::{DEBUG_ITEM, NPC};
use scenes::{Summary, TitleScene};

const FPS: f32 = 60.0;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = StageConfig::default()
        .with_title("Proscenium Studio")
        .with_size(256, 192)
        .with_scale(2.0)
        .with_capacity(32)
        .with_integer_scale(true)
        .with_attribute(NPC, "NPC")
        .with_attribute(DEBUG_ITEM, "DEBUG_ITEM");

    let mut stage = Stage::new(config)?;
    let mut platform = scripted_platform();
    let summary = Rc::new(RefCell::new(Summary::default()));

    stage.play(&mut platform, TitleScene::new(summary.clone()))?;

    let summary = summary.borrow();
    let stats = platform.stats();
    log::info!(
        "played {} frames ({} in the arena): {} blinks, {} balls spawned, {} popped, {} resizes",
        stats.frames, summary.arena_frames, summary.blinks, summary.spawned, summary.popped, stats.resizes
    );
    Ok(())
}

/// Window events for one run: wander over the title, click into the arena,
/// click around, and stretch the window once.
fn scripted_platform() -> HeadlessPlatform {
    let seconds = |s: f32| (s * FPS) as u64;
    let mut platform = HeadlessPlatform::with_fixed_step(1.0 / FPS).close_after(seconds(20.0));

    platform.push_event(0, InputEvent::Focused(true));
    platform.push_event(seconds(0.5), InputEvent::moved(256.0, 192.0));
    click(&mut platform, seconds(1.5), 256.0, 200.0);

    // Arena: a window in stage pixels (x2) for each click.
    let clicks = [(40.0, 40.0), (200.0, 60.0), (128.0, 96.0), (60.0, 150.0), (220.0, 170.0)];
    for (i, (x, y)) in clicks.into_iter().enumerate() {
        click(&mut platform, seconds(2.5 + i as f32), x * 2.0, y * 2.0);
    }

    platform.resize_at(seconds(5.0), Vec2::new(800.0, 500.0));
    platform.push_event(seconds(6.0), InputEvent::PointerLeft);
    platform
}

fn click(platform: &mut HeadlessPlatform, frame: u64, x: f32, y: f32) {
    platform.push_event(frame, InputEvent::moved(x, y));
    platform.push_event(frame, InputEvent::pressed(MouseButton::Left, x, y));
    platform.push_event(frame + 2, InputEvent::released(MouseButton::Left, x, y));
}
