//! Per-pixel composite shading.

use glam::{Vec2, Vec3, Vec4, Vec4Swizzles};

use crate::backend::{CpuTexture, Framebuffer};
use crate::gpu::CompositeUniforms;

pub const WARP_ITERATIONS: u32 = 5;
/// UV offset per unit of velocity, before `distortion_amount`.
pub const DISTORTION_SCALE: f32 = 0.05;
/// Number of field periods across the surface height.
const FIELD_SCALE: f32 = 3.0;
const MIN_SOFTNESS: f32 = 1e-3;

/// Shade every framebuffer pixel from `fluid`.
pub fn run(fluid: &CpuTexture, framebuffer: &mut Framebuffer, uniforms: &CompositeUniforms) {
    let width = framebuffer.size().width as usize;
    for (i, pixel) in framebuffer.pixels_mut().iter_mut().enumerate() {
        let p = Vec2::new((i % width) as f32 + 0.5, (i / width) as f32 + 0.5);
        *pixel = composite_pixel(fluid, p, uniforms).to_array();
    }
}

/// Presented color of the pixel centred at `p`.
pub fn composite_pixel(fluid: &CpuTexture, p: Vec2, u: &CompositeUniforms) -> Vec4 {
    let resolution = Vec2::from_array(u.resolution).max(Vec2::ONE);
    let velocity = fluid.sample(p).xy();

    let uv = p / resolution + velocity * DISTORTION_SCALE * u.distortion_amount;
    let aspect = resolution.x / resolution.y;
    let q = warp((uv - Vec2::splat(0.5)) * Vec2::new(aspect, 1.0) * FIELD_SCALE, u.time);

    let m1 = shape(0.5 + 0.5 * q.x.sin(), u.softness);
    let m2 = shape(0.5 + 0.5 * q.y.cos(), u.softness);
    let m3 = shape(0.5 + 0.5 * (q.x + q.y).sin(), u.softness);

    let c1 = Vec4::from_array(u.color1).xyz();
    let c2 = Vec4::from_array(u.color2).xyz();
    let c3 = Vec4::from_array(u.color3).xyz();
    let c4 = Vec4::from_array(u.color4).xyz();
    let color = c1.lerp(c2, m1).lerp(c3.lerp(c4, m2), m3) * u.color_intensity;

    color.clamp(Vec3::ZERO, Vec3::ONE).extend(1.0)
}

/// Closed-form trigonometric domain warp driven by time.
pub fn warp(mut q: Vec2, time: f32) -> Vec2 {
    for i in 1..=WARP_ITERATIONS {
        let fi = i as f32;
        q.x += 0.6 / fi * (fi * q.y + time * 0.3 + 0.3 * fi).sin();
        q.y += 0.6 / fi * (fi * q.x + time * 0.4 + 0.7 * fi).cos();
    }
    q
}

/// Smoothstep centred on 0.5 whose width is `softness`.
fn shape(v: f32, softness: f32) -> f32 {
    let half = softness.abs().max(MIN_SOFTNESS) * 0.5;
    smoothstep(0.5 - half, 0.5 + half, v)
}

fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}
