//! Per-texel simulation step.
//!
//! Order of operations for `frame >= 1`: semi-Lagrangian advection, blend
//! with the 4-neighbour average, curvature correction, pressure correction,
//! decay, pointer forcing (with stop decay), clamp.

use glam::{Vec2, Vec4, Vec4Swizzles};

use crate::backend::CpuTexture;
use crate::gpu::SimulationUniforms;
use crate::targets::RenderTarget;

/// Symmetric bound applied to every channel of the output.
pub const OUTPUT_LIMIT: f32 = 0.4;

/// Fixed-point iterations used to trace the advection source.
pub const ADVECT_STEPS: u32 = 3;
/// Backtrace distance in pixels per unit of velocity.
pub const ADVECT_DISTANCE: f32 = 6.0;

const CENTER_TAP_WEIGHT: f32 = 0.4;
const SIDE_TAP_WEIGHT: f32 = 0.15;
const SIDE_TAPS: [Vec2; 4] = [
    Vec2::new(0.5, 0.0),
    Vec2::new(-0.5, 0.0),
    Vec2::new(0.0, 0.5),
    Vec2::new(0.0, -0.5),
];

/// Share of the advected sample per channel; the rest is the neighbour average.
pub const ADVECT_BLEND: Vec4 = Vec4::new(0.85, 0.85, 0.92, 0.5);

pub const CURVATURE_GAIN: f32 = 0.5;
pub const PRESSURE_GAIN: f32 = 0.25;

/// Area spanned by the undisturbed probe triangles.
const REST_AREA: f32 = 2.0;

/// Velocity added per pixel of pointer displacement.
pub const FORCE_SCALE: f32 = 0.01;
pub const TRAIL_BOOST: f32 = 0.15;
/// Pointer speed in pixels per frame below which stop decay applies.
pub const STOP_SPEED: f32 = 0.5;

pub const COLD_START_PEAK: f32 = 0.25;
pub const COLD_START_RADIUS: f32 = 0.5;

/// Run the pass over every texel of `current`, reading `previous`.
pub fn run(previous: &CpuTexture, current: &mut CpuTexture, uniforms: &SimulationUniforms) {
    let width = current.size().width as usize;
    for (i, texel) in current.texels_mut().iter_mut().enumerate() {
        let p = Vec2::new((i % width) as f32 + 0.5, (i / width) as f32 + 0.5);
        *texel = simulate_texel(previous, p, uniforms).to_array();
    }
}

/// Next value of the texel centred at `p`.
pub fn simulate_texel(previous: &CpuTexture, p: Vec2, u: &SimulationUniforms) -> Vec4 {
    let resolution = Vec2::from_array(u.resolution);
    if u.is_cold_start() {
        return cold_start(p, resolution);
    }

    let advected = advect(previous, p);

    let east = previous.sample(p + Vec2::X);
    let west = previous.sample(p - Vec2::X);
    let north = previous.sample(p + Vec2::Y);
    let south = previous.sample(p - Vec2::Y);
    let neighbours = (east + west + north + south) * 0.25;

    let mut value = advected * ADVECT_BLEND + neighbours * (Vec4::ONE - ADVECT_BLEND);

    // Probe points one pixel out, each carried back along its own velocity.
    let e = Vec2::X - east.xy() * ADVECT_DISTANCE;
    let n = Vec2::Y - north.xy() * ADVECT_DISTANCE;
    let w = -Vec2::X - west.xy() * ADVECT_DISTANCE;
    let s = -Vec2::Y - south.xy() * ADVECT_DISTANCE;
    let area = triangle_area(e, n, w) + triangle_area(w, s, e);
    let divergence = (area - REST_AREA) / REST_AREA;

    let correction = 1.0 - CURVATURE_GAIN * divergence.clamp(-1.0, 1.0);
    value.x *= correction;
    value.y *= correction;
    value.z *= correction;
    value.w = 0.5 * value.w + 0.5 * divergence;

    let gradient = Vec2::new(east.z - west.z, north.z - south.z) * 0.5;
    value.x -= gradient.x * PRESSURE_GAIN;
    value.y -= gradient.y * PRESSURE_GAIN;

    value.x *= u.fluid_decay;
    value.y *= u.fluid_decay;
    value.z *= u.trail_length;

    if u.pointer_active > 0.0 {
        value = apply_pointer(value, p, u);
    }

    value.clamp(Vec4::splat(-OUTPUT_LIMIT), Vec4::splat(OUTPUT_LIMIT))
}

/// Deterministic first-frame field: a radial trail bump in the centre.
///
/// Depends only on `p` and `resolution`.
pub fn cold_start(p: Vec2, resolution: Vec2) -> Vec4 {
    let aspect = resolution.x / resolution.y.max(1.0);
    let uv = p / resolution.max(Vec2::ONE);
    let d = Vec2::new((uv.x - 0.5) * aspect, uv.y - 0.5).length();
    let falloff = (1.0 - d / COLD_START_RADIUS).max(0.0);
    Vec4::new(0.0, 0.0, COLD_START_PEAK * falloff * falloff, 0.0)
}

fn advect(previous: &CpuTexture, p: Vec2) -> Vec4 {
    let step = ADVECT_DISTANCE / ADVECT_STEPS as f32;
    let mut source = p;
    for _ in 0..ADVECT_STEPS {
        source -= previous.sample(source).xy() * step;
    }
    let taps = SIDE_TAPS
        .iter()
        .fold(Vec4::ZERO, |acc, offset| acc + previous.sample(source + *offset));
    previous.sample(source) * CENTER_TAP_WEIGHT + taps * SIDE_TAP_WEIGHT
}

fn apply_pointer(mut value: Vec4, p: Vec2, u: &SimulationUniforms) -> Vec4 {
    let current = Vec2::new(u.pointer[0], u.pointer[1]);
    let previous = Vec2::new(u.pointer[2], u.pointer[3]);
    let delta = current - previous;

    let influence = if u.brush_size != 0.0 {
        let d = distance_to_segment(p, previous, current) / u.brush_size;
        (-d * d).exp()
    } else {
        0.0
    };

    if delta.length() < STOP_SPEED {
        // No extra decay right under the pointer, full stop decay far away.
        let stop = 1.0 + (u.stop_decay - 1.0) * (1.0 - influence);
        value.x *= stop;
        value.y *= stop;
        value.z *= stop;
    }

    let force = delta * FORCE_SCALE * u.brush_strength * influence;
    value.x += force.x;
    value.y += force.y;
    value.z += TRAIL_BOOST * u.brush_strength * influence;
    value
}

/// Signed area of triangle `abc`, positive when counter-clockwise.
fn triangle_area(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    0.5 * (b - a).perp_dot(c - a)
}

fn distance_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len2 = ab.length_squared();
    if len2 <= 1e-6 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len2).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::targets::TargetId;
    use fluidfx_common::PhysicalSize;
    use fluidfx_config::EffectConfig;

    fn field(width: u32, height: u32, value: [f32; 4]) -> CpuTexture {
        let mut tex = CpuTexture::new(TargetId(0), PhysicalSize::new(width, height)).unwrap();
        tex.fill(value);
        tex
    }

    fn uniforms(width: u32, height: u32, frame: u64) -> SimulationUniforms {
        let mut u = SimulationUniforms::from_config(&EffectConfig::default());
        u.update_viewport(PhysicalSize::new(width, height));
        u.set_frame(frame);
        u
    }

    #[test]
    fn rest_probes_span_rest_area() {
        let area = triangle_area(Vec2::X, Vec2::Y, -Vec2::X) + triangle_area(-Vec2::X, -Vec2::Y, Vec2::X);
        assert_eq!(area, REST_AREA);
    }

    #[test]
    fn segment_distance() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(10.0, 0.0);
        assert_eq!(distance_to_segment(Vec2::new(5.0, 3.0), a, b), 3.0);
        assert_eq!(distance_to_segment(Vec2::new(-4.0, 0.0), a, b), 4.0);
        assert_eq!(distance_to_segment(Vec2::new(3.0, 4.0), a, a), 5.0);
    }

    #[test]
    fn cold_start_peaks_at_centre_and_vanishes_at_edge() {
        let res = Vec2::new(100.0, 100.0);
        let centre = cold_start(Vec2::new(50.0, 50.0), res);
        assert!((centre.z - COLD_START_PEAK).abs() < 1e-6);
        assert_eq!(centre.x, 0.0);
        assert_eq!(centre.w, 0.0);
        assert_eq!(cold_start(Vec2::new(0.5, 0.5), res).z, 0.0);
    }

    #[test]
    fn cold_start_ignores_previous_field() {
        let u = uniforms(16, 16, 0);
        let noisy = field(16, 16, [0.3, -0.3, 0.4, 0.1]);
        let blank = field(16, 16, [0.0; 4]);
        let p = Vec2::new(7.5, 9.5);
        assert_eq!(simulate_texel(&noisy, p, &u), simulate_texel(&blank, p, &u));
    }

    #[test]
    fn uniform_field_without_forcing_only_decays() {
        let u = uniforms(8, 8, 1);
        let prev = field(8, 8, [0.0, 0.0, 0.2, 0.0]);
        let v = simulate_texel(&prev, Vec2::new(4.5, 4.5), &u);
        assert!((v.z - 0.2 * u.trail_length).abs() < 1e-6);
        assert_eq!(v.x, 0.0);
        assert_eq!(v.y, 0.0);
    }

    #[test]
    fn velocity_decays_by_fluid_decay() {
        let mut u = uniforms(8, 8, 1);
        u.fluid_decay = 0.5;
        // Uniform velocity shifts every probe equally, so the area is unchanged.
        let prev = field(8, 8, [0.1, 0.0, 0.0, 0.0]);
        let v = simulate_texel(&prev, Vec2::new(4.5, 4.5), &u);
        assert!((v.x - 0.05).abs() < 1e-6);
    }

    #[test]
    fn output_is_clamped() {
        let mut u = uniforms(8, 8, 3);
        u.fluid_decay = 10.0;
        u.trail_length = 10.0;
        let prev = field(8, 8, [1e6, -1e6, 1e6, -1e6]);
        let v = simulate_texel(&prev, Vec2::new(2.5, 2.5), &u);
        for c in v.to_array() {
            assert!((-OUTPUT_LIMIT..=OUTPUT_LIMIT).contains(&c), "{c}");
        }
    }

    #[test]
    fn forcing_pushes_along_displacement() {
        let mut u = uniforms(32, 32, 5);
        u.pointer = [20.0, 16.0, 12.0, 16.0];
        u.pointer_active = 1.0;
        u.brush_strength = 1.0;
        let prev = field(32, 32, [0.0; 4]);
        let v = simulate_texel(&prev, Vec2::new(16.5, 16.5), &u);
        assert!(v.x > 0.0);
        assert!(v.z > 0.0);
        let far = simulate_texel(&prev, Vec2::new(0.5, 0.5), &u);
        assert!(far.z < v.z);
    }

    #[test]
    fn stop_decay_spares_texels_under_resting_pointer() {
        let mut u = uniforms(64, 64, 2);
        u.pointer = [10.0, 10.0, 10.0, 10.0];
        u.pointer_active = 1.0;
        u.brush_strength = 0.0;
        u.stop_decay = 0.5;
        let prev = field(64, 64, [0.0, 0.0, 0.2, 0.0]);
        let under = simulate_texel(&prev, Vec2::new(10.0, 10.0), &u);
        let far = simulate_texel(&prev, Vec2::new(60.5, 60.5), &u);
        assert!((under.z - 0.2 * u.trail_length).abs() < 1e-4);
        assert!((far.z - 0.2 * u.trail_length * 0.5).abs() < 1e-4);
    }

    #[test]
    fn zero_brush_size_has_no_influence() {
        let mut u = uniforms(8, 8, 1);
        u.pointer = [4.0, 4.0, 0.0, 0.0];
        u.pointer_active = 1.0;
        u.brush_size = 0.0;
        let prev = field(8, 8, [0.0; 4]);
        assert_eq!(simulate_texel(&prev, Vec2::new(4.0, 4.0), &u), Vec4::ZERO);
    }
}
