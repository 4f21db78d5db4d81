use ember_core::command::CommandRecord;
use ember_core::cprintln;
use ember_core::error::Result;
use ember_core::shell::ShellContext;

pub const RECORD: CommandRecord = CommandRecord {
    name: "version",
    description: "display the loader version",
    help: "version",
    func: run,
};

fn run(_ctx: &mut ShellContext, _argv: &[&str]) -> Result<()> {
    cprintln!("emberboot {}", env!("CARGO_PKG_VERSION"));
    Ok(())
}
