//! Scan signal: "is any carousel card under the scan line right now".
//!
//! Single producer (the carousel), single consumer (the scanner). The value
//! is a latest-wins flag, not a queue. A reader whose writer has been dropped
//! reports inactive, so unmounting the carousel returns the scanner to idle.

use std::cell::Cell;
use std::rc::Rc;

/// Creates a connected writer/reader pair, initially inactive.
#[must_use]
pub fn scan_channel() -> (ScanWriter, ScanReader) {
    let flag = Rc::new(Cell::new(false));
    (
        ScanWriter {
            flag: Rc::clone(&flag),
        },
        ScanReader { flag },
    )
}

/// Producer half. Not cloneable.
#[derive(Debug)]
pub struct ScanWriter {
    flag: Rc<Cell<bool>>,
}

impl ScanWriter {
    /// Publishes the current scan state.
    #[inline]
    pub fn publish(&self, active: bool) {
        self.flag.set(active);
    }
}

/// Consumer half. Not cloneable.
#[derive(Debug)]
pub struct ScanReader {
    flag: Rc<Cell<bool>>,
}

impl ScanReader {
    /// Latest published value, or false once the writer is gone.
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.is_connected() && self.flag.get()
    }

    /// True while the writer is alive.
    #[inline]
    #[must_use]
    pub fn is_connected(&self) -> bool {
        Rc::strong_count(&self.flag) > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_write_wins() {
        let (writer, reader) = scan_channel();
        assert!(!reader.is_active());

        writer.publish(true);
        writer.publish(false);
        writer.publish(true);
        assert!(reader.is_active());
    }

    #[test]
    fn test_dropped_writer_reads_inactive() {
        let (writer, reader) = scan_channel();
        writer.publish(true);
        drop(writer);

        assert!(!reader.is_connected());
        assert!(!reader.is_active());
    }
}
