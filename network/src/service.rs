//! Frame service loop.
//!
//! Polls a network descriptor and dispatches received frames to the
//! receiver registry, until a caller-supplied termination predicate
//! fires. The poll never blocks; "no frame yet" is not an error.
//!
//! # Termination predicates
//!
//! Polled once per loop iteration, whether or not a frame arrived.
//! They must return 0 when there is no reason to terminate. By
//! convention, results < 0 are errors or failures, results > 0 are
//! successes. Callers compose predicates ("got expected reply" OR
//! "timeout elapsed"), so the polarity is part of the public contract.

use log::{debug, warn};

use ember_core::{Descriptor, Error, Result};

use crate::frame::{Frame, FramePool, FrameState, FRAME_LENGTH_MAX};
use crate::receiver::{ReceiverRegistry, Verdict};

/// Run the service loop over `dev` until `terminate` returns non-zero.
///
/// Each received frame of length ≤ [`FRAME_LENGTH_MAX`] is offered to
/// the registered receivers in (priority, registration) order until one
/// consumes it; unconsumed frames are dropped silently. This is a
/// best-effort link layer, not a queue.
///
/// Returns `Ok(code)` for a positive predicate result and the mapped
/// taxonomy error for a negative one.
pub fn service(
    dev: &mut Descriptor,
    receivers: &ReceiverRegistry,
    pool: &FramePool,
    mut terminate: impl FnMut() -> i32,
) -> Result<i32> {
    let mut frame = pool.allocate().unwrap_or_else(Frame::empty);

    let result = service_inner(dev, receivers, &mut frame, &mut terminate);
    pool.release(frame);
    result
}

fn service_inner(
    dev: &mut Descriptor,
    receivers: &ReceiverRegistry,
    frame: &mut Frame,
    terminate: &mut dyn FnMut() -> i32,
) -> Result<i32> {
    loop {
        let n = dev.read(&mut frame.buf)?;
        if n > 0 {
            if n <= FRAME_LENGTH_MAX {
                frame.set_len(n);
                frame.state = FrameState::Received;
                dispatch(dev, receivers, frame);
            } else {
                warn!("dropping oversize frame ({} bytes)", n);
            }
        }

        let verdict = terminate();
        if verdict > 0 {
            return Ok(verdict);
        }
        if verdict < 0 {
            return Err(Error::from_code(verdict));
        }
    }
}

/// Offer one frame to the receivers, walking a snapshot so that a
/// register/unregister from inside a callback cannot corrupt the walk.
fn dispatch(dev: &mut Descriptor, receivers: &ReceiverRegistry, frame: &Frame) {
    for receiver in receivers.snapshot() {
        if receiver.receive(dev, frame) == Verdict::Consumed {
            return;
        }
    }
    debug!("frame of {} bytes not consumed", frame.len());
}
