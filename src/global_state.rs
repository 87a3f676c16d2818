use core::cell::RefCell;

use cortex_m::interrupt::Mutex;
use hal::gpio::{DynPinId, FunctionSioOutput, Pin, PullDown};
use hal::timer::{Alarm, Alarm0, Alarm1};
use rp_pico::hal;

use fugit::MicrosDurationU32;
use portable_atomic::AtomicBool;
use rusty_ledmat::display::MatrixDisplay;
use rusty_ledmat::matrix::LedMatrix;

pub type MatrixPin = Pin<DynPinId, FunctionSioOutput, PullDown>;
pub type Display = MatrixDisplay<LedMatrix<MatrixPin, MatrixPin>>;

pub static SHARED_STATE: Mutex<RefCell<Option<SharedState>>> = Mutex::new(RefCell::new(None));
pub static ATOMIC_STATE: AtomicState = AtomicState::new();

pub fn shared_state_interrupt_free<F, R>(f: F) -> R
where
    F: FnOnce(&mut SharedState) -> R,
{
    cortex_m::interrupt::free(|cs| {
        SHARED_STATE
            .borrow(cs)
            .borrow_mut()
            .as_mut()
            .map(f)
            .unwrap()
    })
}

pub struct AtomicState {
    pub render_next_frame: AtomicBool,
}

impl AtomicState {
    pub const fn new() -> Self {
        Self {
            render_next_frame: AtomicBool::new(true),
        }
    }
}

pub struct SharedState {
    pub display: Display,
    tick_alarm: Alarm0,
    tick_period: MicrosDurationU32,
    frame_alarm: Alarm1,
}

impl SharedState {
    pub fn new(display: Display, tick_alarm: Alarm0, tick_period: MicrosDurationU32, frame_alarm: Alarm1) -> Self {
        Self {
            display,
            tick_alarm,
            tick_period,
            frame_alarm,
        }
    }

    /// Re-arms the pacing alarm first so time spent in `tick()` does not stretch the period.
    pub fn multiplex(&mut self) {
        self.tick_alarm.clear_interrupt();
        self.tick_alarm.schedule(self.tick_period).unwrap();
        self.display.tick().unwrap();
    }

    pub fn frame_alarm_schedule(&mut self, duration: MicrosDurationU32) {
        self.frame_alarm.schedule(duration).unwrap();
    }

    pub fn frame_alarm_clear_interrupt(&mut self) {
        self.frame_alarm.clear_interrupt();
    }
}
