#![no_std]
#![no_main]

mod global_state;

use rp_pico::entry;
use panic_halt as _;
use rp_pico::hal; // Hardware Abstraction Layer (higher-level drivers)
use rp_pico::hal::pac; // Peripheral Access Crate (low-level register access)
use rp_pico::hal::pac::interrupt;
use rp_pico::hal::timer::Alarm;
use embedded_hal::digital::{OutputPin, StatefulOutputPin};

use portable_atomic::Ordering;
use rusty_ledmat::animation::Animation;
use rusty_ledmat::animation_rain::Rain;
use rusty_ledmat::animation_ripple::RippleAnimation;
use rusty_ledmat::animation_sweep::Sweep;
use rusty_ledmat::display::MatrixDisplay;
use rusty_ledmat::matrix::{LedMatrix, MatrixConfig, MatrixPins};
use rusty_ledmat::refresh::RefreshRate;

use global_state::{shared_state_interrupt_free, SharedState, ATOMIC_STATE, SHARED_STATE};

/// Frames each scene is rendered for before switching to the next one.
const SCENE_FRAMES: u32 = 80;

#[entry]
fn main() -> ! {
    let mut pac = pac::Peripherals::take().unwrap();

    let mut watchdog = hal::Watchdog::new(pac.WATCHDOG);

    // Configure the clocks (125 MHz system clock)
    let clocks = hal::clocks::init_clocks_and_plls(
        rp_pico::XOSC_CRYSTAL_FREQ,
        pac.XOSC,
        pac.CLOCKS,
        pac.PLL_SYS,
        pac.PLL_USB,
        &mut pac.RESETS,
        &mut watchdog,
    ).unwrap();

    let sio = hal::Sio::new(pac.SIO); // single-cycle IO
    let pins = rp_pico::Pins::new(
        pac.IO_BANK0,
        pac.PADS_BANK0,
        sio.gpio_bank0,
        &mut pac.RESETS,
    );
    let mut led_pin = pins.led.into_push_pull_output();
    led_pin.set_high().unwrap();

    // Rows on GP2..GP8 top to bottom, columns on GP9..GP13 left to right
    let matrix_pins = MatrixPins {
        rows: [
            pins.gpio2.into_push_pull_output().into_dyn_pin(),
            pins.gpio3.into_push_pull_output().into_dyn_pin(),
            pins.gpio4.into_push_pull_output().into_dyn_pin(),
            pins.gpio5.into_push_pull_output().into_dyn_pin(),
            pins.gpio6.into_push_pull_output().into_dyn_pin(),
            pins.gpio7.into_push_pull_output().into_dyn_pin(),
            pins.gpio8.into_push_pull_output().into_dyn_pin(),
        ],
        columns: [
            pins.gpio9.into_push_pull_output().into_dyn_pin(),
            pins.gpio10.into_push_pull_output().into_dyn_pin(),
            pins.gpio11.into_push_pull_output().into_dyn_pin(),
            pins.gpio12.into_push_pull_output().into_dyn_pin(),
            pins.gpio13.into_push_pull_output().into_dyn_pin(),
        ],
    };
    let mut display = MatrixDisplay::new(LedMatrix::new(matrix_pins, MatrixConfig::default()));
    display.init().unwrap();

    let refresh = RefreshRate::default();

    let mut timer = hal::Timer::new(pac.TIMER, &mut pac.RESETS, &clocks);
    let mut tick_alarm = timer.alarm_0().unwrap();
    let mut frame_alarm = timer.alarm_1().unwrap();
    tick_alarm.enable_interrupt();
    frame_alarm.enable_interrupt();
    tick_alarm.schedule(refresh.tick_period()).unwrap();

    cortex_m::interrupt::free(|cs| {
        SHARED_STATE.borrow(cs).replace(Some(SharedState::new(
            display,
            tick_alarm,
            refresh.tick_period(),
            frame_alarm,
        )));
    });

    unsafe {
        pac::NVIC::unmask(pac::Interrupt::TIMER_IRQ_0);
        pac::NVIC::unmask(pac::Interrupt::TIMER_IRQ_1);
    }

    let mut sweep = Sweep::new();
    let mut rain = Rain::new();
    let mut ripples = RippleAnimation::new();
    let mut scenes: [&mut dyn Animation; 3] = [&mut sweep, &mut rain, &mut ripples];
    let mut scene = 0;
    let mut frame = 0;

    loop {
        // sleep until the next frame is due; the multiplexing alarm wakes us far more often
        while !ATOMIC_STATE.render_next_frame.swap(false, Ordering::Acquire) {
            cortex_m::asm::wfi();
        }

        shared_state_interrupt_free(|state| {
            let duration = scenes[scene].render_frame(state.display.framebuffer_mut());
            state.frame_alarm_schedule(duration);
        });

        frame += 1;
        if frame == SCENE_FRAMES {
            frame = 0;
            scene = (scene + 1) % scenes.len();
        }

        // toggle LED to show activity
        led_pin.toggle().unwrap();
    }
}

#[interrupt]
fn TIMER_IRQ_0() {
    shared_state_interrupt_free(|state| state.multiplex());
}

#[interrupt]
fn TIMER_IRQ_1() {
    shared_state_interrupt_free(|state| state.frame_alarm_clear_interrupt());
    ATOMIC_STATE.render_next_frame.store(true, Ordering::Release);
}
