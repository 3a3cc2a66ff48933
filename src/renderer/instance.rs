//! GPU-ready encoding of a composed frame
//!
//! Every primitive is the same unit quad scaled and offset per instance, so a frame
//! flattens into one instance buffer plus a list of batches that share a program
//! and texture. Batches only merge consecutive commands; blending depends on order.

use std::ops::Range;

use bytemuck::{Pod, Zeroable};

use super::colors;
use super::command::{BatteryGauge, DrawCommand, DrawTarget, TextureHandle, TexturedQuad};

/// Corner of the shared unit quad
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct QuadVertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
}

/// Shared quad geometry, spanning [-1, 1] with UVs over [0, 1]
pub const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex {
        position: [-1.0, -1.0],
        uv: [0.0, 0.0],
    },
    QuadVertex {
        position: [1.0, -1.0],
        uv: [1.0, 0.0],
    },
    QuadVertex {
        position: [1.0, 1.0],
        uv: [1.0, 1.0],
    },
    QuadVertex {
        position: [-1.0, 1.0],
        uv: [0.0, 1.0],
    },
];

/// Two triangles covering the quad
pub const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

impl QuadVertex {
    const ATTRIBS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x2];

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// Per-instance data for one primitive
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct QuadInstance {
    pub center: [f32; 2],
    pub size: [f32; 2],
    pub uv_rect: [f32; 4],
    pub tint: [f32; 4],
    /// x: battery level (gauge program only), y: 1.0 if a texture is bound
    pub params: [f32; 2],
}

impl QuadInstance {
    const ATTRIBS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        2 => Float32x2,
        3 => Float32x2,
        4 => Float32x4,
        5 => Float32x4,
        6 => Float32x2
    ];

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBS,
        }
    }

    pub fn from_quad(quad: &TexturedQuad) -> Self {
        Self {
            center: quad.center.to_array(),
            size: quad.size.to_array(),
            uv_rect: quad.uv.to_array(),
            tint: quad.tint,
            params: [0.0, if quad.texture.is_some() { 1.0 } else { 0.0 }],
        }
    }

    pub fn from_gauge(gauge: &BatteryGauge) -> Self {
        Self {
            center: gauge.center.to_array(),
            size: gauge.size.to_array(),
            uv_rect: [0.0, 0.0, 1.0, 1.0],
            tint: colors::WHITE,
            params: [gauge.level.clamp(0.0, 1.0), 0.0],
        }
    }
}

/// Which shader program a batch needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Program {
    /// Textured or flat-tinted quad
    Basic,
    /// Battery fill
    Battery,
}

/// Run of consecutive instances drawn with one program and texture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawBatch {
    pub program: Program,
    pub texture: Option<TextureHandle>,
    pub instances: Range<u32>,
}

/// Collects a frame into instance data and ordered batches
#[derive(Debug, Clone, Default)]
pub struct InstanceBatch {
    pub clear_color: [f32; 4],
    pub instances: Vec<QuadInstance>,
    pub batches: Vec<DrawBatch>,
}

impl InstanceBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Encode a command list from scratch
    pub fn encode(clear_color: [f32; 4], commands: &[DrawCommand]) -> Self {
        let mut batch = Self::new();
        super::command::submit_frame(clear_color, commands, &mut batch);
        batch
    }

    /// Raw bytes for upload into an instance buffer
    pub fn instance_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }

    fn push(&mut self, program: Program, texture: Option<TextureHandle>, instance: QuadInstance) {
        let index = self.instances.len() as u32;
        self.instances.push(instance);

        if let Some(last) = self.batches.last_mut() {
            if last.program == program && last.texture == texture && last.instances.end == index {
                last.instances.end = index + 1;
                return;
            }
        }
        self.batches.push(DrawBatch {
            program,
            texture,
            instances: index..index + 1,
        });
    }
}

impl DrawTarget for InstanceBatch {
    fn begin_frame(&mut self, clear_color: [f32; 4]) {
        self.clear_color = clear_color;
        self.instances.clear();
        self.batches.clear();
    }

    fn draw_textured_quad(&mut self, quad: &TexturedQuad) {
        self.push(Program::Basic, quad.texture, QuadInstance::from_quad(quad));
    }

    fn draw_battery_gauge(&mut self, gauge: &BatteryGauge) {
        self.push(Program::Battery, None, QuadInstance::from_gauge(gauge));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::command::UvRect;
    use glam::Vec2;

    #[test]
    fn test_instance_layout_has_no_padding() {
        assert_eq!(std::mem::size_of::<QuadInstance>(), 14 * 4);
        assert_eq!(QuadInstance::desc().array_stride, 56);
        assert_eq!(QuadVertex::desc().array_stride, 16);
    }

    #[test]
    fn test_consecutive_same_texture_merges() {
        let digit = TextureHandle(1);
        let colon = TextureHandle(2);
        let commands = [
            DrawCommand::Quad(TexturedQuad::new(digit, Vec2::new(-0.4, 0.0), Vec2::ONE)),
            DrawCommand::Quad(TexturedQuad::new(digit, Vec2::new(-0.25, 0.0), Vec2::ONE)),
            DrawCommand::Quad(TexturedQuad::new(colon, Vec2::new(-0.12, 0.0), Vec2::ONE)),
            DrawCommand::Quad(TexturedQuad::new(digit, Vec2::new(0.0, 0.0), Vec2::ONE)),
            DrawCommand::BatteryGauge(BatteryGauge {
                center: Vec2::ZERO,
                size: Vec2::ONE,
                level: 1.5,
            }),
        ];

        let batch = InstanceBatch::encode(colors::BACKGROUND, &commands);
        assert_eq!(batch.instances.len(), 5);
        assert_eq!(batch.batches.len(), 4);
        assert_eq!(batch.batches[0].instances, 0..2);
        assert_eq!(batch.batches[1].texture, Some(colon));
        assert_eq!(batch.batches[3].program, Program::Battery);
        // Gauge level is clamped on the way to the GPU
        assert_eq!(batch.instances[4].params[0], 1.0);
        assert_eq!(batch.instance_bytes().len(), 5 * 56);
    }

    #[test]
    fn test_flat_quad_flags_no_texture() {
        let quad = TexturedQuad::flat(Vec2::ZERO, Vec2::splat(2.0), colors::WARNING_TINT)
            .with_uv(UvRect::new(0.5, 0.0, 2.0, 1.0));
        let instance = QuadInstance::from_quad(&quad);
        assert_eq!(instance.params[1], 0.0);
        assert_eq!(instance.uv_rect, [0.5, 0.0, 2.0, 1.0]);
        assert_eq!(instance.tint, colors::WARNING_TINT);
    }
}
