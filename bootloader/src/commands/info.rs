use ember_core::command::CommandRecord;
use ember_core::error::Result;
use ember_core::shell::ShellContext;

pub const RECORD: CommandRecord = CommandRecord {
    name: "info",
    description: "report subsystem status",
    help: "info",
    func: run,
};

/// Walk the service table and run every report hook, in table order.
fn run(ctx: &mut ShellContext, _argv: &[&str]) -> Result<()> {
    let services = ctx.services.clone();
    for service in services.iter() {
        if let Some(report) = service.report {
            report(ctx);
        }
    }
    Ok(())
}
