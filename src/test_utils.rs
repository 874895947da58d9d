//! Recording transport for driver tests
//!
//! Bus, lines and delay all log into one shared journal, so the order of line
//! changes, bus writes and delays across all of them can be checked.

extern crate std;

use core::cell::RefCell;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, OutputPin};
use embedded_hal::spi::{self, SpiBus};

use crate::ili9341::{DisplayConfig, Ili9341};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Event {
    Cs(bool),
    Dc(bool),
    Rst(bool),
    Write(Vec<u8>),
    Flush,
    DelayMs(u32),
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum Line {
    Cs,
    Dc,
    Rst,
}

/// A command with the data sent after it, as seen by the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Transfer {
    pub opcode: u8,
    pub data: Vec<u8>,
}

#[derive(Default)]
struct Inner {
    events: Vec<Event>,
    writes: usize,
    fail_write: Option<usize>,
    fail_line: Option<(bool, bool, bool)>,
}

#[derive(Clone, Default)]
pub(crate) struct Journal(Rc<RefCell<Inner>>);

impl Journal {
    pub fn new() -> Self {
        Journal::default()
    }

    pub fn bus(&self) -> RecordingBus {
        RecordingBus(self.clone())
    }

    pub fn pin(&self, line: Line) -> RecordingPin {
        RecordingPin(self.clone(), line)
    }

    pub fn delay(&self) -> RecordingDelay {
        RecordingDelay(self.clone())
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().events.clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().events.clear();
    }

    /// The bus write with index `n` (counted from now) fails
    pub fn fail_write(&self, n: usize) {
        let mut inner = self.0.borrow_mut();
        inner.fail_write = Some(inner.writes + n);
    }

    /// Every write to the data/command line fails
    pub fn fail_dc(&self) {
        self.0.borrow_mut().fail_line = Some((false, true, false));
    }

    fn push(&self, event: Event) {
        self.0.borrow_mut().events.push(event);
    }

    /// Groups the bus writes into commands and their data
    ///
    /// Panics if a write happens without chip select or data shows up before
    /// any command.
    pub fn transfers(&self) -> Vec<Transfer> {
        let mut transfers: Vec<Transfer> = Vec::new();
        let mut selected = false;
        let mut data_mode = false;
        for event in self.events() {
            match event {
                Event::Cs(high) => selected = !high,
                Event::Dc(high) => data_mode = high,
                Event::Write(bytes) => {
                    assert!(selected, "bus write without chip select");
                    if data_mode {
                        transfers
                            .last_mut()
                            .expect("data without command")
                            .data
                            .extend_from_slice(&bytes);
                    } else {
                        for opcode in bytes {
                            transfers.push(Transfer {
                                opcode,
                                data: Vec::new(),
                            });
                        }
                    }
                }
                _ => {}
            }
        }
        transfers
    }

    pub fn opcodes(&self) -> Vec<u8> {
        self.transfers().iter().map(|t| t.opcode).collect()
    }

    /// Checks that chip select is released after every transfer and only
    /// toggled while the bus is idle
    pub fn assert_cs_brackets(&self) {
        let mut selected = false;
        let mut flushed = true;
        for event in self.events() {
            match event {
                Event::Cs(false) => {
                    assert!(!selected, "chip select asserted twice");
                    selected = true;
                }
                Event::Cs(true) => {
                    assert!(flushed, "chip select released before flush");
                    selected = false;
                }
                Event::Dc(_) => assert!(!selected, "data/command changed during a transfer"),
                Event::Write(_) => flushed = false,
                Event::Flush => flushed = true,
                _ => {}
            }
        }
        assert!(!selected, "chip select left asserted");
    }
}

pub(crate) struct RecordingBus(Journal);

impl spi::ErrorType for RecordingBus {
    type Error = spi::ErrorKind;
}

impl SpiBus for RecordingBus {
    fn read(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> {
        Err(spi::ErrorKind::Other)
    }

    fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
        let failed = {
            let mut inner = (self.0).0.borrow_mut();
            let index = inner.writes;
            inner.writes += 1;
            inner.fail_write == Some(index)
        };
        if failed {
            return Err(spi::ErrorKind::Other);
        }
        self.0.push(Event::Write(words.to_vec()));
        Ok(())
    }

    fn transfer(&mut self, _read: &mut [u8], _write: &[u8]) -> Result<(), Self::Error> {
        Err(spi::ErrorKind::Other)
    }

    fn transfer_in_place(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> {
        Err(spi::ErrorKind::Other)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.0.push(Event::Flush);
        Ok(())
    }
}

pub(crate) struct RecordingPin(Journal, Line);

impl RecordingPin {
    fn set(&mut self, high: bool) -> Result<(), digital::ErrorKind> {
        let failing = (self.0).0.borrow().fail_line;
        let fails = match (failing, self.1) {
            (Some((cs, _, _)), Line::Cs) => cs,
            (Some((_, dc, _)), Line::Dc) => dc,
            (Some((_, _, rst)), Line::Rst) => rst,
            (None, _) => false,
        };
        if fails {
            return Err(digital::ErrorKind::Other);
        }
        self.0.push(match self.1 {
            Line::Cs => Event::Cs(high),
            Line::Dc => Event::Dc(high),
            Line::Rst => Event::Rst(high),
        });
        Ok(())
    }
}

impl digital::ErrorType for RecordingPin {
    type Error = digital::ErrorKind;
}

impl OutputPin for RecordingPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.set(false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.set(true)
    }
}

pub(crate) struct RecordingDelay(Journal);

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.0.push(Event::DelayMs(ns / 1_000_000));
    }

    fn delay_us(&mut self, us: u32) {
        self.0.push(Event::DelayMs(us / 1_000));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.0.push(Event::DelayMs(ms));
    }
}

pub(crate) type TestDisplay = Ili9341<RecordingBus, RecordingPin, RecordingPin, RecordingPin>;

/// Builds a driver on a fresh journal
pub(crate) fn display(config: DisplayConfig) -> (TestDisplay, Journal) {
    let journal = Journal::new();
    let display = Ili9341::new(
        journal.bus(),
        journal.pin(Line::Cs),
        journal.pin(Line::Dc),
        journal.pin(Line::Rst),
        &mut journal.delay(),
        config,
    )
    .expect("initialization");
    (display, journal)
}
