use ember_core::command::CommandRecord;
use ember_core::cprintln;
use ember_core::error::{Error, Result};
use ember_core::shell::ShellContext;

pub const RECORD: CommandRecord = CommandRecord {
    name: "compare",
    description: "compare two regions byte by byte",
    help: "compare [-c COUNT] REGION REGION",
    func: run,
};

const CHUNK: usize = 1024;

/// Compare two regions, reporting up to COUNT mismatching offsets
/// (default 1) before giving up.
fn run(ctx: &mut ShellContext, argv: &[&str]) -> Result<()> {
    let mut count: u64 = 1;
    let mut args = &argv[1..];
    if args.first() == Some(&"-c") {
        let value = args.get(1).ok_or(Error::InvalidParameter)?;
        count = value.parse().map_err(|_| Error::InvalidParameter)?;
        if count == 0 {
            return Err(Error::InvalidParameter);
        }
        args = &args[2..];
    }
    let (spec_a, spec_b) = match args {
        [a, b] => (*a, *b),
        _ => {
            cprintln!("usage: {}", RECORD.help);
            return Err(Error::InvalidParameter);
        }
    };

    let mut da = ctx.open_region(spec_a)?;
    let mut db = ctx.open_region(spec_b)?;

    let total = da.length().min(db.length());
    if da.length() != db.length() {
        cprintln!(
            "regions differ in length ({} vs {}), comparing the first {} bytes",
            da.length(),
            db.length(),
            total
        );
    }

    let mut buf_a = [0u8; CHUNK];
    let mut buf_b = [0u8; CHUNK];
    let mut compared: u64 = 0;
    let mut mismatches: u64 = 0;

    'scan: while compared < total {
        let want = CHUNK.min((total - compared) as usize);
        let na = da.read(&mut buf_a[..want])?;
        let nb = db.read(&mut buf_b[..want])?;
        let n = na.min(nb);
        if n == 0 {
            break;
        }
        for i in 0..n {
            if buf_a[i] != buf_b[i] {
                cprintln!(
                    "differ at offset {:#x}: {:#04x} != {:#04x}",
                    compared + i as u64,
                    buf_a[i],
                    buf_b[i]
                );
                mismatches += 1;
                if mismatches >= count {
                    break 'scan;
                }
            }
        }
        compared += n as u64;
        if na != nb {
            break;
        }
    }

    if mismatches == 0 {
        cprintln!("{} bytes the same", total);
        Ok(())
    } else {
        Err(Error::Mismatch)
    }
}
