use std::cell::{Cell, RefCell};
use std::rc::Rc;

use proscenium_engine::coords::{Rect, Vec2};
use proscenium_engine::draw::DrawList;
use proscenium_engine::input::MouseButton;
use proscenium_engine::paint::Color;
use proscenium_engine::{ActorHandle, Play, Scene, SceneControl, Stage, Timer, TimerId};

use crate::actors::{Ball, Cursor, NPC};

/// Counters reported when play ends.
#[derive(Debug, Default)]
pub struct Summary {
    pub blinks: u32,
    pub spawned: u32,
    pub popped: u32,
    pub arena_frames: u64,
}

pub type SharedSummary = Rc<RefCell<Summary>>;

const TITLE_TIMEOUT_MS: f32 = 4000.0;
const BLINK_MS: f32 = 400.0;
const ARENA_MS: f32 = 8000.0;

/// Blinking prompt. A click or a timeout moves on to the arena.
pub struct TitleScene {
    summary: SharedSummary,
    prompt_visible: Rc<Cell<bool>>,
    timers: Vec<TimerId>,
}

impl TitleScene {
    pub fn new(summary: SharedSummary) -> Self {
        Self { summary, prompt_visible: Rc::new(Cell::new(true)), timers: Vec::new() }
    }
}

impl Scene for TitleScene {
    fn on_load(&mut self, stage: &mut Stage) {
        let visible = self.prompt_visible.clone();
        let summary = self.summary.clone();
        let blink = Timer::new(BLINK_MS).looping().on_finish(move |_, _| {
            visible.set(!visible.get());
            summary.borrow_mut().blinks += 1;
        });

        let summary = self.summary.clone();
        let timeout = Timer::new(TITLE_TIMEOUT_MS).on_finish(move |stage, _| {
            log::info!("title timed out");
            stage.change_scene(ArenaScene::new(summary.clone()));
        });

        self.timers = vec![stage.start_timer(blink), stage.start_timer(timeout)];
    }

    fn on_tick(&mut self, _stage: &mut Stage, play: &Play) -> SceneControl {
        if play.pressed(MouseButton::Left) {
            log::info!("title clicked at {:?}", play.pointer_px);
            return SceneControl::ChangeTo(Box::new(ArenaScene::new(self.summary.clone())));
        }
        SceneControl::Continue
    }

    fn on_draw_foreground(&mut self, list: &mut DrawList, play: &Play) {
        let center = play.stage_size * 0.5;
        list.text(center - Vec2::new(40.0, 20.0), "PROSCENIUM", 16.0, Color::WHITE);
        if self.prompt_visible.get() {
            list.text(center + Vec2::new(-36.0, 8.0), "click to start", 8.0, Color::WHITE.faded(0.8));
        }
    }

    fn on_unload(&mut self, stage: &mut Stage, requested: Option<Box<dyn Scene>>) -> Option<Box<dyn Scene>> {
        for id in self.timers.drain(..) {
            if let Err(e) = stage.stop_timer(id) {
                log::debug!("title: {e}");
            }
        }
        requested
    }
}

/// Bouncing balls under a countdown. Clicking a ball pops it, clicking empty
/// space spawns a new one.
pub struct ArenaScene {
    summary: SharedSummary,
    seconds_left: Rc<Cell<u32>>,
    cursor: Option<ActorHandle>,
    next_z: u16,
}

impl ArenaScene {
    pub fn new(summary: SharedSummary) -> Self {
        Self {
            summary,
            seconds_left: Rc::new(Cell::new((ARENA_MS / 1000.0) as u32)),
            cursor: None,
            next_z: 1,
        }
    }

    fn spawn(&mut self, stage: &mut Stage, pos: Vec2) {
        if stage.actor_count() >= stage.capacity() {
            log::warn!("arena is full; not spawning");
            return;
        }

        let n = self.summary.borrow().spawned;
        let vel = Vec2::new(30.0 + 11.0 * (n % 5) as f32, 45.0 - 13.0 * (n % 7) as f32);
        let colors = [
            Color::from_srgb_u8(0xff, 0x5f, 0x57, 0xff),
            Color::from_srgb_u8(0xff, 0xbd, 0x2e, 0xff),
            Color::from_srgb_u8(0x28, 0xc8, 0x40, 0xff),
        ];
        let z = self.next_z;
        self.next_z = self.next_z % 3 + 1;

        stage.register(Ball::new(pos, vel, 6.0 + 2.0 * z as f32, colors[z as usize - 1]), z);
        self.summary.borrow_mut().spawned += 1;
    }
}

impl Scene for ArenaScene {
    fn on_load(&mut self, stage: &mut Stage) {
        let size = stage.stage_size();
        for i in 0..5 {
            let pos = Vec2::new(size.x * (i as f32 + 1.0) / 6.0, size.y * 0.5);
            self.spawn(stage, pos);
        }
        self.cursor = Some(stage.register(Cursor::default(), 100));

        let left = self.seconds_left.clone();
        let countdown = Timer::new(ARENA_MS)
            .on_progress(1000.0, move |_, _, p| left.set(((p.goal - p.elapsed) / 1000.0).ceil() as u32))
            .on_finish(|stage, _| {
                log::info!("time is up");
                stage.end_play();
            });
        stage.start_timer(countdown);
    }

    fn on_tick(&mut self, stage: &mut Stage, play: &Play) -> SceneControl {
        self.summary.borrow_mut().arena_frames += 1;

        if !play.pressed(MouseButton::Left) || !play.pointer_on_stage() {
            return SceneControl::Continue;
        }

        // Highest z-index wins.
        let mut hits: Vec<ActorHandle> = stage
            .query(NPC)
            .into_iter()
            .filter(|&h| stage.actor_as::<Ball>(h).is_some_and(|b| b.contains(play.pointer)))
            .collect();
        hits.sort_by_key(|&h| stage.zindex(h));
        let hit = hits.last().copied();

        match hit {
            Some(ball) => {
                stage.unregister(ball);
                self.summary.borrow_mut().popped += 1;
            }
            None => self.spawn(stage, play.pointer),
        }
        SceneControl::Continue
    }

    fn on_draw_background(&mut self, list: &mut DrawList, play: &Play) {
        let floor = Color::from_srgb_u8(0x10, 0x10, 0x40, 0xff);
        list.rect(Rect::new(0.0, play.stage_size.y - 16.0, play.stage_size.x, 16.0), floor);
    }

    fn on_window_draw(&mut self, list: &mut DrawList, _play: &Play) {
        list.text(Vec2::new(8.0, 8.0), format!("time {}", self.seconds_left.get()), 14.0, Color::WHITE);
    }

    fn on_unload(&mut self, stage: &mut Stage, requested: Option<Box<dyn Scene>>) -> Option<Box<dyn Scene>> {
        for ball in stage.query(NPC) {
            stage.unregister(ball);
        }
        if let Some(cursor) = self.cursor.take() {
            stage.unregister(cursor);
        }
        requested
    }
}
