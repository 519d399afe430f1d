//! Peripheral register map driven from a simulated bus interrupt.
//!
//! This example demonstrates:
//! - A register map in a `static`, shared between contexts
//! - Bus callbacks handled on a separate "ISR" thread
//! - The main loop publishing sensor values and reading a config register
//! - Write protection on the read-only registers

use std::collections::VecDeque;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicU32, Ordering};
use std::thread;
use std::time::Duration;

use wire_regmap::prelude::*;

// Register layout
const REG_CONFIG: u8 = 0x00;
const REG_TEMPERATURE: u8 = 0x04;
const REG_COUNT: usize = 16;

type Registers =
    SharedRegisterMap<REG_COUNT, Unified, ProtectedMask, NoHook, fn() -> u32, NoSendHook>;

static REGISTERS: OnceLock<Registers> = OnceLock::new();
static TICKS: AtomicU32 = AtomicU32::new(0);

fn uptime_ms() -> u32 {
    TICKS.load(Ordering::Relaxed)
}

/// Bytes of one bus event as the transport hands them over.
#[derive(Default)]
struct Event {
    rx: VecDeque<u8>,
    tx: Vec<u8>,
}

impl TargetBus for Event {
    fn available(&self) -> usize {
        self.rx.len()
    }

    fn read(&mut self) -> Option<u8> {
        self.rx.pop_front()
    }

    fn write(&mut self, byte: u8) -> usize {
        self.tx.push(byte);
        1
    }
}

fn registers() -> &'static Registers {
    REGISTERS.get_or_init(|| {
        let read_only = ProtectedMask::new()
            .protect_range(REG_TEMPERATURE..REG_TEMPERATURE + 2);
        RegisterMapBuilder::new()
            .size::<REG_COUNT>()
            .protect(read_only)
            .clock(uptime_ms as fn() -> u32)
            .small_transport()
            .build_shared()
    })
}

fn main() {
    println!("=== Loopback Example ===\n");

    let target = registers().target();
    let host = registers().host();

    // Simulated bus: the controller sets the config register, then polls the
    // temperature registers.
    let isr_thread = thread::spawn(move || {
        println!("ISR simulator: Started");

        // A thread is not an interrupt, so use the checked handlers here. A
        // real bus ISR calls `on_data_received_unchecked` and friends instead.

        let mut write = Event {
            rx: VecDeque::from([REG_CONFIG, 0x03]),
            ..Event::default()
        };
        target.on_data_received(&mut write);
        println!("  ISR: controller wrote config 0x03");

        for _ in 0..4 {
            thread::sleep(Duration::from_millis(60));

            let mut address = Event {
                rx: VecDeque::from([REG_TEMPERATURE]),
                ..Event::default()
            };
            target.on_data_received(&mut address);

            let mut read = Event::default();
            target.on_data_requested(&mut read);
            let raw = u16::from_be_bytes([read.tx[0], read.tx[1]]);
            println!("  ISR: controller read temperature {raw}");

            // Attempted overwrite of a read-only register is dropped.
            let mut poke = Event {
                rx: VecDeque::from([REG_TEMPERATURE, 0xFF]),
                ..Event::default()
            };
            target.on_data_received(&mut poke);
        }

        println!("ISR simulator: Stopped");
    });

    println!("Main loop: Starting\n");

    for cycle in 0..5u16 {
        TICKS.fetch_add(50, Ordering::Relaxed);

        host.with_view(|view| {
            let temperature = 200 + cycle * 5;
            view.with_rw_slice(REG_TEMPERATURE, 2, |mut regs| {
                regs.write_u16_be_at(0, temperature);
            })
            .unwrap();

            let mut config = [0u8; 1];
            view.read_range(REG_CONFIG, &mut config).unwrap();
            println!(
                "Main loop: cycle {cycle}, published {temperature}, config {:#04x}",
                config[0]
            );
        });

        thread::sleep(Duration::from_millis(50));
    }

    isr_thread.join().unwrap();

    let snap = host.snapshot();
    println!(
        "\nLast write: {} bytes at {} ms, cursor {}",
        snap.last_received_len, snap.last_received_at, snap.cursor
    );
}
