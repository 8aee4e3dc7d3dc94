use proscenium_engine::coords::{Rect, Vec2};
use proscenium_engine::draw::DrawList;
use proscenium_engine::paint::Color;
use proscenium_engine::{Actor, Attribute, Capabilities, Play, Stage};

/// Things that can be clicked away.
pub const NPC: Attribute = Attribute::custom(0);
/// Debug overlays.
pub const DEBUG_ITEM: Attribute = Attribute::custom(1);

/// Ball bouncing off the stage edges.
pub struct Ball {
    pub pos: Vec2,
    vel: Vec2,
    pub radius: f32,
    color: Color,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32, color: Color) -> Self {
        Self { pos, vel, radius, color }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        let d = p - self.pos;
        d.x * d.x + d.y * d.y <= self.radius * self.radius
    }
}

impl Actor for Ball {
    fn on_tick(&mut self, _stage: &mut Stage, play: &Play) {
        self.pos = self.pos + self.vel * play.dt;

        let max = play.stage_size - Vec2::new(self.radius, self.radius);
        if self.pos.x < self.radius || self.pos.x > max.x {
            self.vel.x = -self.vel.x;
            self.pos.x = self.pos.x.clamp(self.radius, max.x);
        }
        if self.pos.y < self.radius || self.pos.y > max.y {
            self.vel.y = -self.vel.y;
            self.pos.y = self.pos.y.clamp(self.radius, max.y);
        }
    }

    fn on_stage_draw(&mut self, list: &mut DrawList, _play: &Play) {
        list.circle(self.pos, self.radius, self.color);
    }

    fn attributes(&self) -> Vec<Attribute> {
        vec![NPC]
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::TICK | Capabilities::STAGE_DRAW
    }
}

/// Crosshair following the pointer, with its stage pixel printed next to it in
/// window space.
#[derive(Default)]
pub struct Cursor {
    pos: Vec2,
    window_pos: Vec2,
    pixel: (i32, i32),
    on_stage: bool,
}

impl Actor for Cursor {
    fn on_tick(&mut self, _stage: &mut Stage, play: &Play) {
        self.pos = play.pointer.floor();
        self.window_pos = play.window_pointer;
        self.pixel = play.pointer_px;
        self.on_stage = play.pointer_on_stage();
    }

    fn on_stage_draw(&mut self, list: &mut DrawList, _play: &Play) {
        if !self.on_stage {
            return;
        }
        let c = Color::WHITE;
        list.rect(Rect::new(self.pos.x - 3.0, self.pos.y, 7.0, 1.0), c);
        list.rect(Rect::new(self.pos.x, self.pos.y - 3.0, 1.0, 7.0), c);
    }

    fn on_window_draw(&mut self, list: &mut DrawList, _play: &Play) {
        if !self.on_stage {
            return;
        }
        let (x, y) = self.pixel;
        list.text(self.window_pos + Vec2::new(12.0, 12.0), format!("{x},{y}"), 12.0, Color::WHITE.faded(0.7));
    }

    fn attributes(&self) -> Vec<Attribute> {
        vec![DEBUG_ITEM]
    }
}
