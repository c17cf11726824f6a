//! Shared test doubles for integration tests.

use keycapture::input::{InputApi, SystemMouseState};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Input backend with scripted device state that records every call the
/// capture makes into it.
#[derive(Default)]
pub struct FakeInput {
    /// Codes reported as physically held, like a polled device.
    pub physical: Mutex<Vec<u16>>,
    /// Codes set through `set_key_state`.
    pub synthetic: Mutex<Vec<u16>>,
    pub mouse: Mutex<SystemMouseState>,
    pub transient: Mutex<Vec<u16>>,
    pub disabled: AtomicBool,
    pub disable_calls: AtomicUsize,
    pub enable_calls: AtomicUsize,
    pub device_updates: AtomicUsize,
    pub resets: AtomicUsize,
}

#[allow(dead_code)]
impl FakeInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the physically held codes.
    pub fn hold(&self, codes: &[u16]) {
        *self.physical.lock().unwrap() = codes.to_vec();
    }

    pub fn set_mouse(&self, state: SystemMouseState) {
        *self.mouse.lock().unwrap() = state;
    }

    /// Queues a press that is already released by the next poll.
    pub fn tap(&self, code: u16) {
        self.transient.lock().unwrap().push(code);
    }

    pub fn disable_calls(&self) -> usize {
        self.disable_calls.load(Ordering::SeqCst)
    }

    pub fn enable_calls(&self) -> usize {
        self.enable_calls.load(Ordering::SeqCst)
    }
}

impl InputApi for FakeInput {
    fn pressed_keys(&self) -> Vec<u16> {
        let mut codes = self.synthetic.lock().unwrap().clone();
        codes.extend(self.physical.lock().unwrap().iter().copied());
        codes.sort_unstable();
        codes.dedup();
        codes
    }

    fn set_key_state(&self, code: u16, pressed: bool) {
        let mut synthetic = self.synthetic.lock().unwrap();
        synthetic.retain(|&c| c != code);
        if pressed {
            synthetic.push(code);
        }
    }

    fn reset_key_state(&self) {
        self.resets.fetch_add(1, Ordering::SeqCst);
        self.synthetic.lock().unwrap().clear();
    }

    fn update_input_devices(&self) {
        self.device_updates.fetch_add(1, Ordering::SeqCst);
    }

    fn disable_all_keys(&self, disabled: bool) {
        if disabled {
            self.disable_calls.fetch_add(1, Ordering::SeqCst);
        } else {
            self.enable_calls.fetch_add(1, Ordering::SeqCst);
        }
        self.disabled.store(disabled, Ordering::SeqCst);
    }

    fn shortcuts_disabled(&self) -> bool {
        self.disabled.load(Ordering::SeqCst)
    }

    fn system_mouse_state(&self) -> SystemMouseState {
        *self.mouse.lock().unwrap()
    }

    fn pixel_scale(&self) -> f64 {
        1.0
    }

    fn take_transient_presses(&self, codes: &[u16]) -> Vec<u16> {
        let mut transient = self.transient.lock().unwrap();
        let taken: Vec<u16> = transient.iter().copied().filter(|c| codes.contains(c)).collect();
        transient.retain(|c| !codes.contains(c));
        taken
    }
}
