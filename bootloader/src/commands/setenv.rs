use ember_core::command::CommandRecord;
use ember_core::cprintln;
use ember_core::error::{Error, Result};
use ember_core::shell::ShellContext;

pub const RECORD: CommandRecord = CommandRecord {
    name: "setenv",
    description: "set an environment variable",
    help: "setenv KEY VALUE...",
    func: run,
};

fn run(ctx: &mut ShellContext, argv: &[&str]) -> Result<()> {
    if argv.len() < 3 {
        cprintln!("usage: {}", RECORD.help);
        return Err(Error::InvalidParameter);
    }
    let key = argv[1];
    let value = argv[2..].join(" ");
    let env = ctx.env.as_mut().ok_or(Error::Unsupported)?;
    env.set(key, &value)
}
