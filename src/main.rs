//! Snake on an 8×8 LED matrix, for the Raspberry Pi Pico.
//!
//! The display tick runs on an interrupt executor so it preempts the game loop and the
//! speed controller, which share the thread executor.
#![no_std]
#![no_main]

use defmt::info;
use defmt_rtt as _;
use embassy_executor::{Executor, InterruptExecutor, SendSpawner, Spawner};
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use embassy_time::Delay;
use panic_probe as _;
use static_cell::StaticCell;

use snake_matrix::hardware::{DirectionButtons, Hardware, MatrixPins, SpeedPot};
use snake_matrix::{
    FrameStatic, FreeRunningCounter, MatrixDisplay, Result, Scheduler, SchedulerShared,
    SpeedController, SpeedSetting,
};

static FRAME_STATIC: FrameStatic = FrameStatic::new();
static SPEED: SpeedSetting = SpeedSetting::new();
static COUNTER: FreeRunningCounter = FreeRunningCounter::new();

static EXECUTOR_HIGH: InterruptExecutor = InterruptExecutor::new();
static EXECUTOR_LOW: StaticCell<Executor> = StaticCell::new();

#[interrupt]
#[expect(unsafe_code, reason = "interrupt executor entry point")]
unsafe fn SWI_IRQ_1() {
    // SAFETY: SWI_IRQ_1 is reserved for EXECUTOR_HIGH and started in `main`.
    unsafe { EXECUTOR_HIGH.on_interrupt() }
}

#[cortex_m_rt::entry]
fn main() -> ! {
    info!("snake starting");
    let hardware = Hardware::default();

    interrupt::SWI_IRQ_1.set_priority(Priority::P2);
    let high = EXECUTOR_HIGH.start(interrupt::SWI_IRQ_1);

    let executor = EXECUTOR_LOW.init(Executor::new());
    executor.run(move |low| {
        if let Err(err) = spawn_tasks(high, low, hardware) {
            panic!("{err}");
        }
    })
}

fn spawn_tasks(high: SendSpawner, low: Spawner, hardware: Hardware) -> Result<()> {
    let Hardware {
        matrix,
        buttons,
        speed_pot,
    } = hardware;
    high.spawn(display_task(matrix)?);
    low.spawn(speed_task(speed_pot)?);
    low.spawn(scheduler_task(buttons)?);
    Ok(())
}

#[embassy_executor::task]
async fn display_task(matrix: MatrixPins) -> ! {
    let err = MatrixDisplay::new(matrix)
        .run(&FRAME_STATIC, &COUNTER, Delay)
        .await
        .unwrap_err();
    panic!("{err}");
}

#[embassy_executor::task]
async fn speed_task(speed_pot: SpeedPot) -> ! {
    match SpeedController::new(speed_pot, &SPEED).run().await {}
}

#[embassy_executor::task]
async fn scheduler_task(buttons: DirectionButtons) -> ! {
    let shared = SchedulerShared {
        frame_static: &FRAME_STATIC,
        speed: &SPEED,
        counter: &COUNTER,
    };
    match Scheduler::new(buttons, Delay, shared).run().await {}
}
