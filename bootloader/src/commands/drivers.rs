use ember_core::command::CommandRecord;
use ember_core::cprintln;
use ember_core::error::Result;
use ember_core::shell::ShellContext;

pub const RECORD: CommandRecord = CommandRecord {
    name: "drivers",
    description: "list the registered drivers",
    help: "drivers",
    func: run,
};

fn run(ctx: &mut ShellContext, _argv: &[&str]) -> Result<()> {
    for driver in ctx.drivers.iter() {
        let length = driver.total_length();
        if length == u64::MAX {
            // Stream device, no fixed extent.
            cprintln!("  {:<8} {:>10}  {}", driver.name(), "-", driver.description());
        } else {
            cprintln!("  {:<8} {:>10}  {}", driver.name(), length, driver.description());
        }
    }
    Ok(())
}
