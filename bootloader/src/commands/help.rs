use ember_core::command::CommandRecord;
use ember_core::cprintln;
use ember_core::error::{Error, Result};
use ember_core::shell::ShellContext;

pub const RECORD: CommandRecord = CommandRecord {
    name: "help",
    description: "list commands, or show usage for one",
    help: "help [COMMAND]",
    func: run,
};

fn run(ctx: &mut ShellContext, argv: &[&str]) -> Result<()> {
    let commands = ctx.commands.clone();
    if let Some(&name) = argv.get(1) {
        let record = commands.find(name).ok_or(Error::UnknownCommand)?;
        cprintln!("{} - {}", record.name, record.description);
        cprintln!("usage: {}", record.help);
        return Ok(());
    }
    for record in commands.iter() {
        cprintln!("  {:<10} {}", record.name, record.description);
    }
    Ok(())
}
