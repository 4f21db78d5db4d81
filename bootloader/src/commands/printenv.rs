use ember_core::command::CommandRecord;
use ember_core::cprintln;
use ember_core::error::{Error, Result};
use ember_core::shell::ShellContext;

pub const RECORD: CommandRecord = CommandRecord {
    name: "printenv",
    description: "show environment variables",
    help: "printenv",
    func: run,
};

/// One line per key: `=` for a stored value, `*=` for a compiled-in
/// default, `#=` for a stored key the catalog does not recognize.
fn run(ctx: &mut ShellContext, _argv: &[&str]) -> Result<()> {
    let env = ctx.env.as_ref().ok_or(Error::Unsupported)?;
    for line in env.lines() {
        cprintln!("{}", line);
    }
    Ok(())
}
