//! Recording test doubles for bus, pins and delay.
//!
//! Every double appends to one shared event log, so a test can check the
//! exact interleaving of chip-select, data/command and bus traffic.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType as PinErrorType, InputPin, OutputPin};
use embedded_hal::spi::{ErrorKind, ErrorType as SpiErrorType, SpiBus};

use epaper::epd2in9v2::Epd2in9v2;
use epaper::ssd1681::Ssd1681;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Cs(bool),
    Dc(bool),
    Rst(bool),
    En(bool),
    Write(Vec<u8>),
    Transfer(u8),
    Flush,
    Delay(u32),
}

#[derive(Default)]
pub struct BusyLine {
    /// Levels returned by the next reads, idle once drained
    pub script: VecDeque<bool>,
    /// Report busy forever
    pub stuck: bool,
    pub reads: usize,
}

#[derive(Clone, Default)]
pub struct Bench {
    pub log: Rc<RefCell<Vec<Event>>>,
    pub busy: Rc<RefCell<BusyLine>>,
    /// Bus operations left before the bus starts failing
    pub spi_budget: Rc<RefCell<Option<usize>>>,
}

impl Bench {
    pub fn events(&self) -> Vec<Event> {
        self.log.borrow().clone()
    }

    pub fn clear(&self) {
        self.log.borrow_mut().clear();
    }

    pub fn busy_for(&self, polls: usize) {
        let mut busy = self.busy.borrow_mut();
        busy.script.extend(std::iter::repeat(true).take(polls));
    }

    pub fn stick_busy(&self) {
        self.busy.borrow_mut().stuck = true;
    }

    pub fn busy_reads(&self) -> usize {
        self.busy.borrow().reads
    }

    pub fn fail_spi_after(&self, ops: usize) {
        *self.spi_budget.borrow_mut() = Some(ops);
    }

    pub fn frames(&self) -> Vec<Frame> {
        frames(&self.events())
    }

    fn push(&self, event: Event) {
        self.log.borrow_mut().push(event);
    }
}

pub struct MockSpi(Bench);

impl MockSpi {
    fn spend(&mut self) -> Result<(), ErrorKind> {
        let mut budget = self.0.spi_budget.borrow_mut();
        match budget.as_mut() {
            Some(0) => Err(ErrorKind::Other),
            Some(left) => {
                *left -= 1;
                Ok(())
            }
            None => Ok(()),
        }
    }
}

impl SpiErrorType for MockSpi {
    type Error = ErrorKind;
}

impl SpiBus for MockSpi {
    fn read(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        self.spend()?;
        words.fill(0);
        Ok(())
    }

    fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
        self.spend()?;
        self.0.push(Event::Write(words.to_vec()));
        Ok(())
    }

    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
        self.spend()?;
        for &b in write {
            self.0.push(Event::Transfer(b));
        }
        read.fill(0);
        Ok(())
    }

    fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        self.spend()?;
        for b in words.iter_mut() {
            self.0.push(Event::Transfer(*b));
            *b = 0;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.0.push(Event::Flush);
        Ok(())
    }
}

#[derive(Clone, Copy)]
pub enum Role {
    Cs,
    Dc,
    Rst,
    En,
}

pub struct MockPin(Bench, Role);

impl PinErrorType for MockPin {
    type Error = Infallible;
}

impl MockPin {
    fn set(&mut self, level: bool) {
        let event = match self.1 {
            Role::Cs => Event::Cs(level),
            Role::Dc => Event::Dc(level),
            Role::Rst => Event::Rst(level),
            Role::En => Event::En(level),
        };
        self.0.push(event);
    }
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.set(true);
        Ok(())
    }
}

pub struct MockBusy(Bench);

impl PinErrorType for MockBusy {
    type Error = Infallible;
}

impl InputPin for MockBusy {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        let mut busy = self.0.busy.borrow_mut();
        busy.reads += 1;
        let level = busy.stuck || busy.script.pop_front().unwrap_or(false);
        Ok(level)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

pub struct MockDelay(Bench);

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.0.push(Event::Delay(ns / 1_000_000));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.0.push(Event::Delay(ms));
    }
}

pub type TestSsd1681 = Ssd1681<MockSpi, MockPin, MockPin, MockPin, MockBusy, MockPin, MockDelay>;
pub type TestEpd2in9v2 = Epd2in9v2<MockSpi, MockPin, MockPin, MockPin, MockBusy, MockDelay>;

pub fn ssd1681() -> (TestSsd1681, Bench) {
    let bench = Bench::default();
    let display = Ssd1681::new(
        MockSpi(bench.clone()),
        MockPin(bench.clone(), Role::Cs),
        MockPin(bench.clone(), Role::Dc),
        MockPin(bench.clone(), Role::Rst),
        MockBusy(bench.clone()),
        MockPin(bench.clone(), Role::En),
        MockDelay(bench.clone()),
    );
    (display, bench)
}

pub fn epd2in9v2() -> (TestEpd2in9v2, Bench) {
    let bench = Bench::default();
    let display = Epd2in9v2::new(
        MockSpi(bench.clone()),
        MockPin(bench.clone(), Role::Cs),
        MockPin(bench.clone(), Role::Dc),
        MockPin(bench.clone(), Role::Rst),
        MockBusy(bench.clone()),
        MockDelay(bench.clone()),
    );
    (display, bench)
}

/// One command byte with all data bytes that followed it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub cmd: u8,
    pub data: Vec<u8>,
}

pub fn frame(cmd: u8, data: &[u8]) -> Frame {
    Frame {
        cmd,
        data: data.to_vec(),
    }
}

/// Decode the event log into command frames.
///
/// Panics on framing violations: bytes on the bus with chip-select high,
/// D/C or chip-select changing before the written bytes were flushed.
pub fn frames(events: &[Event]) -> Vec<Frame> {
    let mut out: Vec<Frame> = Vec::new();
    let mut cs_low = false;
    let mut data_mode = false;
    let mut unflushed = false;

    for event in events {
        match event {
            Event::Cs(level) => {
                assert!(!unflushed, "chip-select released before flush");
                cs_low = !level;
            }
            Event::Dc(level) => {
                assert!(!unflushed, "D/C changed before flush");
                data_mode = *level;
            }
            Event::Write(bytes) => {
                assert!(cs_low, "bus write with chip-select high");
                unflushed = true;
                for &b in bytes {
                    push_byte(&mut out, data_mode, b);
                }
            }
            Event::Transfer(b) => {
                assert!(cs_low, "bus transfer with chip-select high");
                unflushed = true;
                push_byte(&mut out, data_mode, *b);
            }
            Event::Flush => unflushed = false,
            _ => {}
        }
    }
    out
}

fn push_byte(out: &mut Vec<Frame>, data_mode: bool, byte: u8) {
    if data_mode {
        out.last_mut()
            .expect("data byte before any command")
            .data
            .push(byte);
    } else {
        out.push(frame(byte, &[]));
    }
}

pub fn count(events: &[Event], wanted: &Event) -> usize {
    events.iter().filter(|e| *e == wanted).count()
}

pub fn delays(events: &[Event]) -> Vec<u32> {
    events
        .iter()
        .filter_map(|e| match e {
            Event::Delay(ms) => Some(*ms),
            _ => None,
        })
        .collect()
}
