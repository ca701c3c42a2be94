//! Synchronous wgpu error scopes.
//!
//! Shader and texture creation report failures asynchronously through the
//! device. Wrapping them in a scope turns those failures into `Result`s at
//! the call site instead of the device's uncaptured-error handler.

/// Run `f` inside validation and out-of-memory error scopes.
///
/// Returns the value produced by `f` together with the first captured error.
pub(crate) fn with_error_scope<T>(
    device: &wgpu::Device,
    f: impl FnOnce() -> T,
) -> (T, Option<wgpu::Error>) {
    device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let value = f();
    let validation = pollster::block_on(device.pop_error_scope());
    let out_of_memory = pollster::block_on(device.pop_error_scope());
    (value, validation.or(out_of_memory))
}
