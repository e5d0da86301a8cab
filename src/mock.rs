// SPDX-License-Identifier: MIT

//! Mock peripherals shared by the unit tests.
use crate::{
    driver::{
        AccessMode, FlashController, SecureElementDriver, TrngPeripheral, RANDOM_LEN, SERIAL_LEN,
        UID_WORDS,
    },
    error::Step,
};
use embedded_hal::{delay::DelayNs, digital};
use std::{cell::Cell, collections::VecDeque, rc::Rc};

#[derive(Debug)]
pub struct PinError;

impl digital::Error for PinError {
    fn kind(&self) -> digital::ErrorKind {
        digital::ErrorKind::Other
    }
}

/// Power-control pin. The line level is shared with the driver mock so
/// the driver can check it is only used while powered.
#[derive(Default)]
pub struct MockPin {
    pub line: Rc<Cell<bool>>,
    pub rises: usize,
    pub falls: usize,
    pub fail_high: bool,
    pub fail_low: bool,
}

impl digital::ErrorType for MockPin {
    type Error = PinError;
}

impl digital::OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), PinError> {
        self.falls += 1;
        if self.fail_low {
            return Err(PinError);
        }
        self.line.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), PinError> {
        if self.fail_high {
            return Err(PinError);
        }
        self.rises += 1;
        self.line.set(true);
        Ok(())
    }
}

#[derive(Debug)]
pub struct BusError(pub Step);

pub struct MockElement {
    pub line: Rc<Cell<bool>>,
    pub serial: [u8; SERIAL_LEN],
    pub scripted: VecDeque<[u8; RANDOM_LEN]>,
    pub fail_at: Option<Step>,
    pub fail_after_draws: Option<usize>,
    pub inits: usize,
    pub draws: usize,
    pub releases: usize,
}

impl MockElement {
    pub fn new(line: Rc<Cell<bool>>) -> Self {
        Self {
            line,
            serial: [0x01, 0x23, 0x9a, 0x4c, 0x55, 0x10, 0x77, 0x2e, 0xee],
            scripted: VecDeque::new(),
            fail_at: None,
            fail_after_draws: None,
            inits: 0,
            draws: 0,
            releases: 0,
        }
    }

    fn check(&self, step: Step) -> Result<(), BusError> {
        assert!(self.line.get(), "secure element used while unpowered");
        match self.fail_at {
            Some(s) if s == step => Err(BusError(step)),
            _ => Ok(()),
        }
    }
}

impl SecureElementDriver for MockElement {
    type Error = BusError;

    fn init(&mut self) -> Result<(), BusError> {
        self.inits += 1;
        self.check(Step::Init)
    }

    fn read_serial(&mut self, serial: &mut [u8; SERIAL_LEN]) -> Result<(), BusError> {
        self.check(Step::Read)?;
        serial.copy_from_slice(&self.serial);
        Ok(())
    }

    fn random(&mut self, chunk: &mut [u8; RANDOM_LEN]) -> Result<(), BusError> {
        self.check(Step::Read)?;
        if self.fail_after_draws == Some(self.draws) {
            return Err(BusError(Step::Read));
        }
        self.draws += 1;
        match self.scripted.pop_front() {
            Some(c) => *chunk = c,
            None => chunk.fill(self.draws as u8),
        }
        Ok(())
    }

    fn release(&mut self) -> Result<(), BusError> {
        self.releases += 1;
        self.check(Step::Release)
    }
}

#[derive(Debug)]
pub struct FlashError;

#[derive(Default)]
pub struct MockFlash {
    pub uid: [u32; UID_WORDS],
    pub mode: Option<(AccessMode, u32)>,
    pub fail_init: bool,
    pub fail_read: bool,
    pub reads: usize,
}

impl FlashController for MockFlash {
    type Error = FlashError;

    fn init(&mut self, mode: AccessMode, wait_states: u32) -> Result<(), FlashError> {
        self.mode = Some((mode, wait_states));
        if self.fail_init {
            return Err(FlashError);
        }
        Ok(())
    }

    fn read_unique_id(&mut self, uid: &mut [u32; UID_WORDS]) -> Result<(), FlashError> {
        self.reads += 1;
        if self.fail_read {
            return Err(FlashError);
        }
        *uid = self.uid;
        Ok(())
    }
}

/// Word `n` of the output holds the bytes `4n+1 ..= 4n+4`, least
/// significant first.
#[derive(Default)]
pub struct MockTrng {
    pub clocked: bool,
    pub enabled: bool,
    pub reads: u32,
}

impl TrngPeripheral for MockTrng {
    fn enable_clock(&mut self) {
        self.clocked = true;
    }

    fn enable(&mut self) {
        assert!(self.clocked, "trng enabled before its clock");
        self.enabled = true;
    }

    fn read_output(&mut self) -> u32 {
        assert!(self.enabled, "trng read while disabled");
        let base = self.reads.wrapping_mul(4) as u8;
        self.reads += 1;
        u32::from_le_bytes([
            base.wrapping_add(1),
            base.wrapping_add(2),
            base.wrapping_add(3),
            base.wrapping_add(4),
        ])
    }
}

#[derive(Default)]
pub struct MockDelay {
    pub total_ns: u64,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }
}
