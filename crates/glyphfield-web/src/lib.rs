pub mod runner;

pub use runner::{resolve_config, PortraitRunner};

use std::cell::{Cell, RefCell};

use glyphfield::SceneEvent;
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<PortraitRunner>> = RefCell::new(None);
    static WARNED_UNINIT: Cell<bool> = Cell::new(false);
}

/// Run `f` against the live runner. Calls made before `portrait_init` are
/// ignored; only the first one is logged.
fn with_runner<R>(f: impl FnOnce(&mut PortraitRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(runner) => Some(f(runner)),
            None => {
                if first_uninit_call() {
                    log::warn!("portrait not initialized; call portrait_init() first");
                }
                None
            }
        }
    })
}

/// True only the first time it is called on this thread.
fn first_uninit_call() -> bool {
    !WARNED_UNINIT.with(|warned| warned.replace(true))
}

/// 64 bits of seed from the JS entropy source.
fn entropy_seed() -> u64 {
    let hi = (js_sys::Math::random() * 4_294_967_296.0) as u64;
    let lo = (js_sys::Math::random() * 4_294_967_296.0) as u64;
    (hi << 32) | lo
}

#[wasm_bindgen]
pub fn portrait_init(width: f32, height: f32, config_json: Option<String>) {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let config = resolve_config(config_json.as_deref());
    let runner = PortraitRunner::new(config, width, height, entropy_seed());

    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });

    log::info!("glyphfield: initialized at {}x{}", width, height);
}

// ---- Assets ----

#[wasm_bindgen]
pub fn portrait_load_primary(bytes: &[u8]) -> bool {
    with_runner(|r| r.load_primary(bytes)).unwrap_or(false)
}

#[wasm_bindgen]
pub fn portrait_load_primary_rgba(width: u32, height: u32, rgba: Vec<u8>) -> bool {
    with_runner(|r| r.load_primary_rgba(width, height, rgba)).unwrap_or(false)
}

#[wasm_bindgen]
pub fn portrait_load_narrow(bytes: &[u8]) {
    with_runner(|r| r.load_narrow(bytes));
}

#[wasm_bindgen]
pub fn portrait_narrow_missing(reason: &str) {
    with_runner(|r| r.narrow_missing(reason));
}

// ---- Frame loop and input ----

#[wasm_bindgen]
pub fn portrait_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

#[wasm_bindgen]
pub fn portrait_pointer_move(x: f32, y: f32) {
    with_runner(|r| r.push_event(SceneEvent::PointerMove { x, y }));
}

#[wasm_bindgen]
pub fn portrait_pointer_leave() {
    with_runner(|r| r.push_event(SceneEvent::PointerLeave));
}

#[wasm_bindgen]
pub fn portrait_click(x: f32, y: f32) {
    with_runner(|r| r.push_event(SceneEvent::Click { x, y }));
}

#[wasm_bindgen]
pub fn portrait_resize(width: f32, height: f32) {
    with_runner(|r| r.push_event(SceneEvent::Resize { width, height }));
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_instances_ptr() -> *const f32 {
    with_runner(|r| r.instances_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_instance_count() -> u32 {
    with_runner(|r| r.instance_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_instance_floats() -> u32 {
    with_runner(|r| r.instance_floats()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_frame_counter() -> u32 {
    with_runner(|r| r.frame_counter()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_particle_count() -> u32 {
    with_runner(|r| r.particle_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_ripple_count() -> u32 {
    with_runner(|r| r.ripple_count()).unwrap_or(0)
}

// ---- Palette accessors ----

#[wasm_bindgen]
pub fn get_overlay_r() -> u8 {
    with_runner(|r| r.overlay_rgb()[0]).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_overlay_g() -> u8 {
    with_runner(|r| r.overlay_rgb()[1]).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_overlay_b() -> u8 {
    with_runner(|r| r.overlay_rgb()[2]).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_overlay_alpha() -> f32 {
    with_runner(|r| r.overlay_alpha()).unwrap_or(1.0)
}

#[wasm_bindgen]
pub fn get_glyph_r() -> u8 {
    with_runner(|r| r.glyph_rgb()[0]).unwrap_or(255)
}

#[wasm_bindgen]
pub fn get_glyph_g() -> u8 {
    with_runner(|r| r.glyph_rgb()[1]).unwrap_or(255)
}

#[wasm_bindgen]
pub fn get_glyph_b() -> u8 {
    with_runner(|r| r.glyph_rgb()[2]).unwrap_or(255)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calls_before_init_are_ignored_and_warned_once() {
        assert_eq!(with_runner(|r| r.particle_count()), None);
        // The call above already used up the single warning
        assert!(!first_uninit_call());
        for _ in 0..60 {
            portrait_tick(1.0 / 60.0);
        }
        assert!(!first_uninit_call());
        assert_eq!(get_particle_count(), 0);
    }
}
