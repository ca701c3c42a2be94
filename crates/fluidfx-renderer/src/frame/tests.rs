use std::time::{Duration, Instant};

use fluidfx_common::PhysicalSize;
use fluidfx_config::EffectConfig;

use super::*;
use crate::backend::{CpuBackend, CpuTexture};
use crate::gpu::{CompositeUniforms, SimulationUniforms};
use crate::pointer::{PointerForcing, PointerState};
use crate::simulation::kernel::OUTPUT_LIMIT;
use crate::targets::{RenderTarget, TargetId};

fn driver(width: u32, height: u32) -> FrameDriver<CpuBackend> {
    let size = PhysicalSize::new(width, height);
    FrameDriver::new(CpuBackend::new(size).unwrap(), size).unwrap()
}

fn inputs() -> FrameInputs {
    FrameInputs::new(EffectConfig::default()).with_time(1.25)
}

/// Overwrite the target that the next frame reads from.
fn fill_previous(driver: &mut FrameDriver<CpuBackend>, value: [f32; 4]) {
    let targets = driver.targets.as_mut().unwrap();
    targets.swap();
    targets.split_mut().1.fill(value);
    targets.swap();
}

/// CPU backend whose passes or allocations can be made to fail.
struct FlakyBackend {
    inner: CpuBackend,
    fail_simulate: bool,
    fail_composite: bool,
    fail_allocation: bool,
    simulate_calls: usize,
}

impl FlakyBackend {
    fn new(size: PhysicalSize) -> Self {
        Self {
            inner: CpuBackend::new(size).unwrap(),
            fail_simulate: false,
            fail_composite: false,
            fail_allocation: false,
            simulate_calls: 0,
        }
    }
}

impl RenderBackend for FlakyBackend {
    type Target = CpuTexture;

    fn create_target(&mut self, size: PhysicalSize) -> Result<CpuTexture, RenderError> {
        if self.fail_allocation {
            return Err(RenderError::TargetAllocation {
                size,
                message: "injected".into(),
            });
        }
        self.inner.create_target(size)
    }

    fn release_target(&mut self, target: CpuTexture) {
        self.inner.release_target(target);
    }

    fn resize_surface(&mut self, size: PhysicalSize) -> Result<(), RenderError> {
        self.inner.resize_surface(size)
    }

    fn simulate(
        &mut self,
        previous: &CpuTexture,
        current: &mut CpuTexture,
        uniforms: &SimulationUniforms,
    ) -> Result<(), RenderError> {
        self.simulate_calls += 1;
        if self.fail_simulate {
            return Err(RenderError::DeviceError("injected".into()));
        }
        self.inner.simulate(previous, current, uniforms)
    }

    fn composite(
        &mut self,
        fluid: &CpuTexture,
        uniforms: &CompositeUniforms,
    ) -> Result<(), RenderError> {
        if self.fail_composite {
            return Err(RenderError::SurfaceError("injected".into()));
        }
        self.inner.composite(fluid, uniforms)
    }

    fn release(&mut self) {
        self.inner.release();
    }
}

#[test]
fn new_driver_starts_cold() {
    let driver = driver(10, 6);
    assert_eq!(driver.frame(), 0);
    assert_eq!(driver.size(), PhysicalSize::new(10, 6));
    assert!(driver.is_running());
    assert_eq!(driver.backend().live_targets(), 2);
}

#[test]
fn frame_advances_and_swaps() {
    let mut driver = driver(8, 8);
    let first_current = driver.targets().unwrap().current().id();
    let outcome = driver.render_frame(&inputs()).unwrap();
    assert_eq!(outcome, FrameOutcome::Presented { frame: 0 });
    assert_eq!(driver.frame(), 1);
    // The target written this frame is now "previous" for the next one.
    assert_eq!(driver.targets().unwrap().previous().id(), first_current);
    assert_ne!(driver.targets().unwrap().current().id(), first_current);
}

#[test]
fn cold_start_ignores_previous_buffer_and_pointer() {
    let mut clean = driver(24, 16);
    let mut dirty = driver(24, 16);
    fill_previous(&mut dirty, [0.3, -0.2, 0.4, 0.1]);
    let forcing = PointerForcing {
        position: [12.0, 8.0],
        previous: [2.0, 3.0],
        active: 1.0,
    };

    clean.render_frame(&inputs()).unwrap();
    dirty.render_frame(&inputs().with_pointer(forcing)).unwrap();

    // Both fields were written into the target that is now "previous".
    assert_eq!(
        clean.targets().unwrap().previous().texels(),
        dirty.targets().unwrap().previous().texels()
    );
}

#[test]
fn resize_resets_counter_and_reallocates_targets() {
    let mut driver = driver(8, 8);
    for _ in 0..3 {
        driver.render_frame(&inputs()).unwrap();
    }
    let old_ids = [
        driver.targets().unwrap().current().id(),
        driver.targets().unwrap().previous().id(),
    ];
    driver.resize(PhysicalSize::new(20, 12)).unwrap();

    assert_eq!(driver.frame(), 0);
    assert_eq!(driver.size(), PhysicalSize::new(20, 12));
    let targets = driver.targets().unwrap();
    assert_eq!(targets.current().size(), PhysicalSize::new(20, 12));
    assert_eq!(targets.previous().size(), PhysicalSize::new(20, 12));
    assert!(!old_ids.contains(&targets.current().id()));
    assert!(!old_ids.contains(&targets.previous().id()));
    assert_eq!(driver.backend().live_targets(), 2);
    assert_eq!(driver.backend().framebuffer().size(), PhysicalSize::new(20, 12));
}

#[test]
fn frame_after_resize_is_a_cold_start() {
    let mut resized = driver(8, 8);
    fill_previous(&mut resized, [0.2; 4]);
    resized.render_frame(&inputs()).unwrap();
    resized.resize(PhysicalSize::new(16, 16)).unwrap();
    resized.render_frame(&inputs()).unwrap();

    let mut fresh = driver(16, 16);
    fresh.render_frame(&inputs()).unwrap();

    assert_eq!(
        resized.targets().unwrap().previous().texels(),
        fresh.targets().unwrap().previous().texels()
    );
}

#[test]
fn zero_field_is_a_fixed_point() {
    let mut driver = driver(12, 12);
    driver.frame = 1;
    for _ in 0..5 {
        driver.render_frame(&inputs()).unwrap();
        let written = driver.targets().unwrap().previous();
        assert!(written.texels().iter().all(|t| t.iter().all(|c| *c == 0.0)));
    }
}

#[test]
fn output_stays_within_bound_for_any_input() {
    let mut driver = driver(16, 16);
    driver.frame = 1;
    fill_previous(&mut driver, [50.0, -80.0, 1e5, -3.0]);
    let effect = EffectConfig {
        brush_strength: 1e4,
        fluid_decay: 4.0,
        trail_length: 4.0,
        ..Default::default()
    };
    let forcing = PointerForcing {
        position: [15.0, 15.0],
        previous: [0.0, 0.0],
        active: 1.0,
    };
    let frame = FrameInputs::new(effect).with_pointer(forcing);
    for _ in 0..3 {
        driver.render_frame(&frame).unwrap();
        let written = driver.targets().unwrap().previous();
        for texel in written.texels() {
            for c in texel {
                assert!((-OUTPUT_LIMIT..=OUTPUT_LIMIT).contains(c), "{c}");
            }
        }
    }
}

#[test]
fn idle_pointer_yields_neutral_forcing() {
    let mut pointer = PointerState::new();
    let t0 = Instant::now();
    let timeout = Duration::from_millis(100);
    pointer.on_move(40.0, 10.0, 50.0, t0);
    pointer.on_move(45.0, 12.0, 50.0, t0 + Duration::from_millis(10));

    let idle = pointer.forcing(t0 + Duration::from_millis(200), timeout);
    assert_eq!(idle, PointerForcing::NEUTRAL);

    let mut with_idle = driver(50, 50);
    let mut without = driver(50, 50);
    for d in [&mut with_idle, &mut without] {
        d.frame = 1;
        fill_previous(d, [0.0, 0.0, 0.1, 0.0]);
    }
    with_idle.render_frame(&inputs().with_pointer(idle)).unwrap();
    without.render_frame(&inputs()).unwrap();
    assert_eq!(
        with_idle.targets().unwrap().previous().texels(),
        without.targets().unwrap().previous().texels()
    );
}

#[test]
fn stop_decay_applies_once_pointer_rests() {
    let t0 = Instant::now();
    let timeout = Duration::from_millis(100);
    let mut pointer = PointerState::new();
    pointer.on_move(10.0, 40.0, 50.0, t0);
    pointer.on_move(15.0, 40.0, 50.0, t0 + Duration::from_millis(16));
    assert_eq!(
        pointer.forcing(t0 + Duration::from_millis(16), timeout).displacement(),
        [5.0, 0.0]
    );
    pointer.end_frame();

    // Still over the surface and inside the idle window, but not moving.
    let resting = pointer.forcing(t0 + Duration::from_millis(66), timeout);
    assert!(resting.is_active());
    assert_eq!(resting.displacement(), [0.0, 0.0]);

    let effect = EffectConfig {
        brush_size: 5.0,
        stop_decay: 0.5,
        trail_length: 1.0,
        ..Default::default()
    };
    let mut rested = driver(50, 50);
    let mut untouched = driver(50, 50);
    for d in [&mut rested, &mut untouched] {
        d.frame = 1;
        fill_previous(d, [0.0, 0.0, 0.2, 0.0]);
    }
    rested
        .render_frame(&FrameInputs::new(effect.clone()).with_pointer(resting))
        .unwrap();
    untouched.render_frame(&FrameInputs::new(effect)).unwrap();

    let far = |d: &FrameDriver<CpuBackend>| d.targets().unwrap().previous().texel(45, 45)[2];
    assert!((far(&untouched) - 0.2).abs() < 1e-5, "{}", far(&untouched));
    assert!((far(&rested) - 0.1).abs() < 1e-5, "{}", far(&rested));
}

#[test]
fn single_frame_output_is_deterministic() {
    let mut a = driver(100, 100);
    let mut b = driver(100, 100);
    a.render_frame(&inputs()).unwrap();
    b.render_frame(&inputs()).unwrap();
    assert_eq!(a.backend().framebuffer(), b.backend().framebuffer());

    let mut later = driver(100, 100);
    later.render_frame(&inputs().with_time(7.5)).unwrap();
    assert_ne!(a.backend().framebuffer(), later.backend().framebuffer());
}

#[test]
fn pointer_forcing_raises_trail_at_centre() {
    let effect = EffectConfig {
        brush_strength: 1.0,
        brush_size: 25.0,
        ..Default::default()
    };
    let forcing = PointerForcing {
        position: [50.0, 50.0],
        previous: [45.0, 50.0],
        active: 1.0,
    };
    let base = FrameInputs::new(effect).with_time(0.5);

    let mut active = driver(100, 100);
    let mut inactive = driver(100, 100);
    for d in [&mut active, &mut inactive] {
        d.render_frame(&base).unwrap();
    }
    active.render_frame(&base.clone().with_pointer(forcing)).unwrap();
    inactive.render_frame(&base).unwrap();

    let trail = |d: &FrameDriver<CpuBackend>| d.targets().unwrap().previous().texel(50, 50)[2];
    assert!(trail(&active) > trail(&inactive));
}

#[test]
fn failed_simulation_drops_the_frame() {
    let size = PhysicalSize::new(8, 8);
    let mut driver = FrameDriver::new(FlakyBackend::new(size), size).unwrap();
    driver.render_frame(&inputs()).unwrap();
    let current = driver.targets().unwrap().current().id();

    driver.backend_mut().fail_simulate = true;
    assert!(driver.render_frame(&inputs()).is_err());
    assert_eq!(driver.frame(), 1);
    assert_eq!(driver.targets().unwrap().current().id(), current);

    driver.backend_mut().fail_simulate = false;
    assert_eq!(
        driver.render_frame(&inputs()).unwrap(),
        FrameOutcome::Presented { frame: 1 }
    );
}

#[test]
fn failed_composite_drops_the_frame() {
    let size = PhysicalSize::new(8, 8);
    let mut driver = FrameDriver::new(FlakyBackend::new(size), size).unwrap();
    let current = driver.targets().unwrap().current().id();
    driver.backend_mut().fail_composite = true;
    assert!(driver.render_frame(&inputs()).is_err());
    assert_eq!(driver.frame(), 0);
    assert_eq!(driver.targets().unwrap().current().id(), current);
}

#[test]
fn failed_allocation_at_start_is_fatal() {
    let size = PhysicalSize::new(8, 8);
    let mut backend = FlakyBackend::new(size);
    backend.fail_allocation = true;
    let err = FrameDriver::new(backend, size).err().unwrap();
    assert!(matches!(err, RenderError::TargetAllocation { .. }));
}

#[test]
fn failed_resize_keeps_previous_targets() {
    let size = PhysicalSize::new(8, 8);
    let mut driver = FrameDriver::new(FlakyBackend::new(size), size).unwrap();
    driver.render_frame(&inputs()).unwrap();
    driver.backend_mut().fail_allocation = true;

    assert!(driver.resize(PhysicalSize::new(32, 32)).is_err());
    assert_eq!(driver.targets().unwrap().size(), size);
    assert_eq!(driver.backend().inner.live_targets(), 2);
}

#[test]
fn stop_releases_everything_and_is_idempotent() {
    let mut driver = driver(8, 8);
    driver.render_frame(&inputs()).unwrap();
    driver.stop();
    driver.stop();

    assert!(!driver.is_running());
    assert!(driver.targets().is_none());
    assert_eq!(driver.backend().live_targets(), 0);
    assert!(driver.backend().is_released());
}

#[test]
fn frames_after_stop_are_no_ops() {
    let size = PhysicalSize::new(8, 8);
    let mut driver = FrameDriver::new(FlakyBackend::new(size), size).unwrap();
    driver.stop();
    assert_eq!(driver.render_frame(&inputs()).unwrap(), FrameOutcome::Stopped);
    assert!(driver.resize(PhysicalSize::new(4, 4)).is_ok());
    assert_eq!(driver.backend().simulate_calls, 0);
    assert_eq!(driver.frame(), 0);
}

#[test]
fn config_changes_apply_next_frame() {
    let mut driver = driver(8, 8);
    driver.frame = 1;
    fill_previous(&mut driver, [0.0, 0.0, 0.2, 0.0]);
    let mut frame = inputs();
    frame.effect.trail_length = 0.5;
    driver.render_frame(&frame).unwrap();
    let t = driver.targets().unwrap().previous().texel(4, 4)[2];
    assert!((t - 0.1).abs() < 1e-6);
}

#[test]
fn target_ids_are_distinct() {
    let driver = driver(4, 4);
    let targets = driver.targets().unwrap();
    assert_ne!(targets.current().id(), targets.previous().id());
    assert!(targets.current().id() < TargetId(2));
}
