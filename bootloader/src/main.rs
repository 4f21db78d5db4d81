//! Boot loader entry points.
//!
//! The hosted build runs the shell over stdin/stdout so the whole
//! loader is exercisable off-target. The bare-metal build supplies the
//! allocator and panic plumbing; a board port fills in the console,
//! clock, and flash drivers before handing control to the shell.

#![cfg_attr(target_os = "none", no_std)]
#![cfg_attr(target_os = "none", no_main)]

#[cfg(not(target_os = "none"))]
fn main() {
    hosted::run();
}

#[cfg(not(target_os = "none"))]
mod hosted {
    use std::io::{self, BufRead, Write as _};
    use std::time::Instant;

    use ember_boot::sets;
    use ember_core::console::{self, Console};
    use ember_core::time::{self, Clock};

    struct Stdout;

    impl Console for Stdout {
        fn write_str(&mut self, s: &str) {
            print!("{s}");
            let _ = io::stdout().flush();
        }
    }

    struct SystemClock {
        start: Instant,
    }

    impl Clock for SystemClock {
        fn now_ms(&self) -> u64 {
            self.start.elapsed().as_millis() as u64
        }
    }

    pub fn run() {
        env_logger::init();
        console::set_console(Box::new(Stdout));
        time::set_clock(Box::leak(Box::new(SystemClock {
            start: Instant::now(),
        })));

        let (shell, mut ctx) = sets::boot();

        println!("emberboot {} (hosted)", env!("CARGO_PKG_VERSION"));
        println!("'help' lists commands, 'exit' leaves");
        let stdin = io::stdin();
        loop {
            print!("ember> ");
            let _ = io::stdout().flush();
            let mut line = String::new();
            match stdin.lock().read_line(&mut line) {
                Ok(0) | Err(_) => break,
                Ok(_) => {}
            }
            if line.trim() == "exit" {
                break;
            }
            shell.run_line(&mut ctx, &line);
        }
    }
}

#[cfg(target_os = "none")]
mod baremetal {
    use linked_list_allocator::LockedHeap;

    #[global_allocator]
    static HEAP: LockedHeap = LockedHeap::empty();

    const HEAP_SIZE: usize = 256 * 1024;
    static mut HEAP_SPACE: [u8; HEAP_SIZE] = [0; HEAP_SIZE];

    /// Board reset lands here. The port is expected to install its
    /// console, clock, and drivers, then loop on the shell.
    #[no_mangle]
    pub extern "C" fn _start() -> ! {
        unsafe {
            HEAP.lock()
                .init(core::ptr::addr_of_mut!(HEAP_SPACE) as *mut u8, HEAP_SIZE);
        }
        loop {
            core::hint::spin_loop();
        }
    }

    #[panic_handler]
    fn panic(_info: &core::panic::PanicInfo) -> ! {
        loop {
            core::hint::spin_loop();
        }
    }
}
