//! Draw commands and the target they are submitted to

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Opaque texture handle issued by the asset collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureHandle(pub u32);

/// Sub-rectangle of a texture to sample, in UV units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UvRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl UvRect {
    pub const FULL: UvRect = UvRect::new(0.0, 0.0, 1.0, 1.0);

    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.x, self.y, self.w, self.h]
    }
}

impl Default for UvRect {
    fn default() -> Self {
        Self::FULL
    }
}

/// Axis-aligned rectangle centered in NDC, optionally textured
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TexturedQuad {
    /// `None` draws a flat rectangle in the tint color
    pub texture: Option<TextureHandle>,
    pub center: Vec2,
    pub size: Vec2,
    pub uv: UvRect,
    pub tint: [f32; 4],
}

impl TexturedQuad {
    /// Full-UV, untinted quad
    pub fn new(texture: TextureHandle, center: Vec2, size: Vec2) -> Self {
        Self {
            texture: Some(texture),
            center,
            size,
            uv: UvRect::FULL,
            tint: super::colors::WHITE,
        }
    }

    /// Untextured rectangle filled with `tint`
    pub fn flat(center: Vec2, size: Vec2, tint: [f32; 4]) -> Self {
        Self {
            texture: None,
            center,
            size,
            uv: UvRect::FULL,
            tint,
        }
    }

    pub fn with_uv(mut self, uv: UvRect) -> Self {
        self.uv = uv;
        self
    }

    pub fn with_tint(mut self, tint: [f32; 4]) -> Self {
        self.tint = tint;
        self
    }
}

/// Battery fill rectangle; the fill proportion follows `level`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BatteryGauge {
    pub center: Vec2,
    pub size: Vec2,
    /// Charge fraction in [0, 1]
    pub level: f32,
}

/// One primitive of a composed frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    Quad(TexturedQuad),
    BatteryGauge(BatteryGauge),
}

impl DrawCommand {
    pub fn submit(&self, target: &mut dyn DrawTarget) {
        match self {
            DrawCommand::Quad(quad) => target.draw_textured_quad(quad),
            DrawCommand::BatteryGauge(gauge) => target.draw_battery_gauge(gauge),
        }
    }

    pub fn texture(&self) -> Option<TextureHandle> {
        match self {
            DrawCommand::Quad(quad) => quad.texture,
            DrawCommand::BatteryGauge(_) => None,
        }
    }
}

/// Rendering contract implemented by the graphics collaborator
pub trait DrawTarget {
    /// Called once per frame before any primitive
    fn begin_frame(&mut self, _clear_color: [f32; 4]) {}

    fn draw_textured_quad(&mut self, quad: &TexturedQuad);

    fn draw_battery_gauge(&mut self, gauge: &BatteryGauge);
}

/// Submit a whole frame in order
pub fn submit_frame(clear_color: [f32; 4], commands: &[DrawCommand], target: &mut dyn DrawTarget) {
    target.begin_frame(clear_color);
    for command in commands {
        command.submit(target);
    }
}

/// Target that records what it is asked to draw
#[derive(Debug, Clone, Default, Serialize)]
pub struct DrawList {
    pub clear_color: Option<[f32; 4]>,
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.clear_color = None;
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Quads sampling the given texture, in draw order
    pub fn quads_with(&self, texture: TextureHandle) -> impl Iterator<Item = &TexturedQuad> {
        self.commands.iter().filter_map(move |c| match c {
            DrawCommand::Quad(q) if q.texture == Some(texture) => Some(q),
            _ => None,
        })
    }
}

impl DrawTarget for DrawList {
    fn begin_frame(&mut self, clear_color: [f32; 4]) {
        self.clear();
        self.clear_color = Some(clear_color);
    }

    fn draw_textured_quad(&mut self, quad: &TexturedQuad) {
        self.commands.push(DrawCommand::Quad(*quad));
    }

    fn draw_battery_gauge(&mut self, gauge: &BatteryGauge) {
        self.commands.push(DrawCommand::BatteryGauge(*gauge));
    }
}
