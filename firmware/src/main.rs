#![no_std]
#![no_main]

extern crate alloc;
extern crate panic_semihosting;

use alloc_cortex_m::CortexMHeap;
use cortex_m_rt::entry;
use cortex_m_semihosting::hprintln;
use embedded_hal::digital::v2::OutputPin;
use nb::block;

use stm32f4xx_hal::{prelude::*, spi, stm32, time, timer};
use spi::{Mode, Phase::CaptureOnFirstTransition, Polarity::IdleLow};
use time::Hertz;
use timer::Timer;

use tinydraw::atlas::CELL;
use tinydraw::display::{Orientation, St7789, HEIGHT, WIDTH};
use tinydraw::palette::{DARK_BLUE, GREEN, RED};
use tinydraw::{Drawer, FrameBuffer};

#[global_allocator]
static ALLOCATOR: CortexMHeap = CortexMHeap::empty();

const ATLAS: &str = include_str!("../../assets/demo.hex");

const PLAYER: usize = 0;
const BRICK: usize = 1;
const COIN: usize = 2;
const COIN_EDGE: usize = 3;

#[entry]
fn main() -> ! {
    let core = cortex_m::peripheral::Peripherals::take().unwrap();
    let device = stm32::Peripherals::take().unwrap();

    // frame buffer is WIDTH * HEIGHT * 2 bytes, plus the atlas
    let heap_start = cortex_m_rt::heap_start() as usize;
    let heap_size = 80 * 1024; // in bytes
    unsafe { ALLOCATOR.init(heap_start, heap_size) }

    let rcc = device.RCC.constrain();
    let clocks = rcc.cfgr
        .use_hse(25.mhz())
        .sysclk(48.mhz())
        .require_pll48clk()
        .freeze();

    let mut timer = Timer::syst(core.SYST, 30.hz(), clocks);

    let gpioa = device.GPIOA.split();
    let gpiob = device.GPIOB.split();
    let cs = gpioa.pa4.into_push_pull_output();
    let sck = gpioa.pa5.into_alternate_af5();
    let miso = gpioa.pa6.into_alternate_af5();
    let mosi = gpioa.pa7.into_alternate_af5();
    let dc = gpiob.pb0.into_push_pull_output();
    let rst = gpiob.pb1.into_push_pull_output();
    let mut backlight = gpiob.pb2.into_push_pull_output();

    let spi = spi::Spi::spi1(
        device.SPI1,
        (sck, miso, mosi),
        Mode { polarity: IdleLow, phase: CaptureOnFirstTransition },
        Hertz(24_000_000_u32),
        clocks,
    );

    let mut display = St7789::new(spi, cs, dc, rst, WIDTH, HEIGHT, Orientation::Landscape);
    if let Err(e) = display.init() {
        hprintln!("display init failed: {}", e).unwrap();
    }
    backlight.set_high().unwrap();

    let mut drawer = match Drawer::with_defaults(ATLAS) {
        Ok(drawer) => drawer,
        Err(e) => {
            hprintln!("atlas rejected: {}", e).unwrap();
            loop {
                cortex_m::asm::wfi();
            }
        }
    };

    let mut frame = FrameBuffer::new(WIDTH, HEIGHT);
    let cell = CELL as i32 * drawer.zoom() as i32;
    let floor = HEIGHT as i32 - cell;
    let mut tick: usize = 0;
    let mut x: i32 = 0;

    hprintln!("INIT").unwrap();

    loop {
        tick += 1;
        x += drawer.zoom() as i32;
        if x > WIDTH as i32 {
            x = -cell;
        }

        frame.clear(drawer.color(DARK_BLUE as usize));

        for col in 0..(WIDTH as i32 + cell - 1) / cell {
            drawer.spr(&mut frame, BRICK, col * cell, floor);
        }

        let coin = if tick % 20 > 10 { COIN_EDGE } else { COIN };
        drawer.spr(&mut frame, coin, WIDTH as i32 / 2, floor - 2 * cell);

        drawer.spr(&mut frame, PLAYER, x, floor - cell);

        drawer.set_override(RED, GREEN);
        let twin = drawer.sprite(PLAYER).at(x - cell, floor - cell).flip(true, false);
        drawer.draw_sprite(&mut frame, &twin);
        drawer.clear_overrides();

        if let Err(e) = display.present(&frame) {
            hprintln!("{}", e).unwrap();
        }

        // frame pacing, sleeps out whatever is left of the 30 Hz tick
        block!(timer.wait()).unwrap();
    }
}
