//! Cancellation: long loops poll the stop token and bail out with no output.

use std::sync::atomic::{AtomicU32, Ordering};

use enough::{Stop, StopReason};
use zenraw::*;

/// Allows `allowed` checks, then cancels every check after.
struct CancelAfter {
    allowed: u32,
    checks: AtomicU32,
}

impl CancelAfter {
    fn new(allowed: u32) -> Self {
        Self {
            allowed,
            checks: AtomicU32::new(0),
        }
    }

    fn checks(&self) -> u32 {
        self.checks.load(Ordering::SeqCst)
    }
}

impl Stop for CancelAfter {
    fn check(&self) -> Result<(), StopReason> {
        let seen = self.checks.fetch_add(1, Ordering::SeqCst);
        if seen >= self.allowed {
            Err(StopReason::Cancelled)
        } else {
            Ok(())
        }
    }
}

fn foreign_byte_order() -> ByteOrder {
    if cfg!(target_endian = "big") {
        ByteOrder::Little
    } else {
        ByteOrder::Big
    }
}

#[test]
fn planar_transpose_stops_between_row_batches() {
    let (w, h) = (2u32, 40u32);
    let planar = vec![7u8; (w * h * 3) as usize];
    let stop = CancelAfter::new(2);

    // Check 1 before the transpose, check 2 at row 0, check 3 at row 16 cancels.
    let result = decode(&Layout::new(h, w, 3, 1), &planar, &stop);
    assert!(matches!(result, Err(RawError::Cancelled(StopReason::Cancelled))));
    assert_eq!(stop.checks(), 3);
}

#[test]
fn gray16_byte_swap_stops_between_row_batches() {
    let (w, h) = (3u32, 40u32);
    let data = vec![0u8; (w * h * 2) as usize];
    let layout = Layout::new(h, w, 1, 2).with_byte_order(foreign_byte_order());
    let stop = CancelAfter::new(2);

    let result = decode(&layout, &data, &stop);
    assert!(matches!(result, Err(RawError::Cancelled(_))));
    assert_eq!(stop.checks(), 3);
}

#[test]
fn passthrough_still_honors_cancellation() {
    let stop = CancelAfter::new(0);
    let result = decode(&Layout::new(2, 2, 1, 1), &[1, 2, 3, 4], &stop);
    assert!(matches!(result, Err(RawError::Cancelled(_))));
}

#[test]
fn load_cancelled_before_read() {
    let source = MemorySource::new().with_file("a.rgb", vec![0; 2 * 40 * 3]);
    let stop = CancelAfter::new(0);
    let result = LoadRequest::new(&Layout::new(40, 2, 3, 1)).load(&source, "a.rgb", &stop);
    assert!(matches!(result, Err(RawError::Cancelled(_))));
    assert_eq!(stop.checks(), 1);
}

#[test]
fn load_cancelled_during_decode() {
    let source = MemorySource::new().with_file("a.rgb", vec![0; 2 * 40 * 3]);
    let stop = CancelAfter::new(2);
    // Load checks once before reading, decode once more, then the transpose cancels at row 0.
    let result = LoadRequest::new(&Layout::new(40, 2, 3, 1)).load(&source, "a.rgb", &stop);
    assert!(matches!(result, Err(RawError::Cancelled(_))));
    assert_eq!(stop.checks(), 3);
}

#[test]
fn no_cancel_means_full_output() {
    let (w, h) = (2u32, 40u32);
    let planar = vec![9u8; (w * h * 3) as usize];
    let stop = CancelAfter::new(u32::MAX);
    let decoded = decode(&Layout::new(h, w, 3, 1), &planar, &stop).unwrap();
    assert_eq!(decoded.pixels().len(), planar.len());
    // Decode check plus row 0, 16 and 32.
    assert_eq!(stop.checks(), 4);
}
