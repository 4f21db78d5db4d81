//! Loopback frame device.
//!
//! A driver whose reads pop whole frames from an internal queue and
//! whose writes push them. Carries the hosted simulator's network
//! traffic and gives the service loop something deterministic to poll
//! in tests.

use alloc::collections::VecDeque;
use alloc::vec::Vec;

use spin::Mutex;

use ember_core::driver::{Capabilities, Driver};
use ember_core::{Error, Result};

use crate::frame::FRAME_LENGTH_MAX;

pub struct LoopbackDriver {
    name: &'static str,
    queue: Mutex<VecDeque<Vec<u8>>>,
}

impl LoopbackDriver {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            queue: Mutex::new(VecDeque::new()),
        }
    }

    /// Queue a frame for the next poll, as if it arrived off the wire.
    pub fn inject(&self, frame: &[u8]) {
        let mut frame = frame.to_vec();
        frame.truncate(FRAME_LENGTH_MAX);
        self.queue.lock().push_back(frame);
    }

    pub fn pending(&self) -> usize {
        self.queue.lock().len()
    }
}

impl Driver for LoopbackDriver {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        "loopback frame device"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::OPEN | Capabilities::READ | Capabilities::WRITE
    }

    // Stream device: no fixed extent.
    fn total_length(&self) -> u64 {
        u64::MAX
    }

    fn open(&self, _start: u64, _length: u64) -> Result<()> {
        Ok(())
    }

    /// Pop one whole frame. Returns 0 when nothing is pending; a frame
    /// larger than `buf` is an I/O error, frames are never split.
    fn read(&self, _offset: u64, buf: &mut [u8]) -> Result<usize> {
        let mut queue = self.queue.lock();
        let frame = match queue.pop_front() {
            Some(f) => f,
            None => return Ok(0),
        };
        if frame.len() > buf.len() {
            queue.push_front(frame);
            return Err(Error::Io);
        }
        buf[..frame.len()].copy_from_slice(&frame);
        Ok(frame.len())
    }

    /// Loop a transmitted frame straight back onto the receive queue.
    fn write(&self, _offset: u64, buf: &[u8]) -> Result<usize> {
        self.inject(buf);
        Ok(buf.len())
    }
}
