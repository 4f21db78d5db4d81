//! Ethernet frame buffers.
//!
//! Frames come from a small fixed pool; when the pool is exhausted a
//! caller may fall back to an ad hoc allocation. A frame's recorded
//! length never exceeds its buffer capacity.

use alloc::boxed::Box;
use alloc::vec::Vec;

use spin::Mutex;

/// Largest frame the service accepts, including the Ethernet header.
pub const FRAME_LENGTH_MAX: usize = 1536;

/// Where a frame buffer is in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameState {
    Free,
    Received,
    Transmit,
}

/// One frame buffer.
pub struct Frame {
    len: usize,
    pub state: FrameState,
    pub buf: [u8; FRAME_LENGTH_MAX],
}

impl Frame {
    pub fn empty() -> Box<Frame> {
        Box::new(Frame {
            len: 0,
            state: FrameState::Free,
            buf: [0; FRAME_LENGTH_MAX],
        })
    }

    /// Set the payload length. Clamped to capacity; the length can
    /// never exceed the buffer.
    pub fn set_len(&mut self, len: usize) {
        self.len = len.min(FRAME_LENGTH_MAX);
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The valid payload bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}

/// Fixed-size free list of frame buffers.
pub struct FramePool {
    free: Mutex<Vec<Box<Frame>>>,
    capacity: usize,
}

impl FramePool {
    pub fn new(capacity: usize) -> Self {
        let mut free = Vec::with_capacity(capacity);
        for _ in 0..capacity {
            free.push(Frame::empty());
        }
        Self {
            free: Mutex::new(free),
            capacity,
        }
    }

    /// Take a frame from the pool, or `None` when exhausted.
    pub fn allocate(&self) -> Option<Box<Frame>> {
        self.free.lock().pop()
    }

    /// Return a frame. Frames beyond the pool capacity (ad hoc
    /// fallbacks) are dropped instead of growing the pool.
    pub fn release(&self, mut frame: Box<Frame>) {
        frame.set_len(0);
        frame.state = FrameState::Free;
        let mut free = self.free.lock();
        if free.len() < self.capacity {
            free.push(frame);
        }
    }

    pub fn available(&self) -> usize {
        self.free.lock().len()
    }
}
