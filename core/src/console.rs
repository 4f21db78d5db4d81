//! Console output sink.
//!
//! User-facing shell output goes through one global sink so that the
//! same command code runs over a serial port, a framebuffer, or a
//! captured buffer in tests. Output before a sink is installed is
//! dropped.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::sync::Arc;
use core::fmt;

use spin::Mutex;

/// Destination for user-facing text.
pub trait Console: Send {
    fn write_str(&mut self, s: &str);
}

static CONSOLE: Mutex<Option<Box<dyn Console>>> = Mutex::new(None);

/// Install the process-wide console sink, replacing any previous one.
pub fn set_console(console: Box<dyn Console>) {
    *CONSOLE.lock() = Some(console);
}

pub fn write_str(s: &str) {
    if let Some(c) = CONSOLE.lock().as_mut() {
        c.write_str(s);
    }
}

pub fn write_fmt(args: fmt::Arguments<'_>) {
    struct Adapter<'a>(&'a mut dyn Console);

    impl fmt::Write for Adapter<'_> {
        fn write_str(&mut self, s: &str) -> fmt::Result {
            self.0.write_str(s);
            Ok(())
        }
    }

    if let Some(c) = CONSOLE.lock().as_mut() {
        let _ = fmt::Write::write_fmt(&mut Adapter(c.as_mut()), args);
    }
}

#[macro_export]
macro_rules! cprint {
    ($($arg:tt)*) => {
        $crate::console::write_fmt(core::format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! cprintln {
    () => {
        $crate::console::write_str("\n")
    };
    ($($arg:tt)*) => {{
        $crate::console::write_fmt(core::format_args!($($arg)*));
        $crate::console::write_str("\n");
    }};
}

/// Sink that appends to a shared string. Tests install one and assert
/// on the capture.
pub struct BufferConsole {
    buf: Arc<Mutex<String>>,
}

impl BufferConsole {
    pub fn new() -> Self {
        Self {
            buf: Arc::new(Mutex::new(String::new())),
        }
    }

    /// Handle that stays valid after the console is installed.
    pub fn handle(&self) -> Arc<Mutex<String>> {
        self.buf.clone()
    }
}

impl Console for BufferConsole {
    fn write_str(&mut self, s: &str) {
        self.buf.lock().push_str(s);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::boxed::Box;

    #[test]
    fn test_buffer_console_captures_output() {
        let console = BufferConsole::new();
        let capture = console.handle();
        set_console(Box::new(console));

        cprintln!("hello {}", 42);

        assert!(capture.lock().contains("hello 42"));
    }
}
