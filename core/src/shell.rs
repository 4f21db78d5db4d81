//! Command shell.
//!
//! Dispatches argv by exact command-name match against the command
//! table. A failed command is displayed and never terminates the
//! session; the boot prompt has to survive anything typed at it.

use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;

use log::warn;

use crate::command::CommandRecord;
use crate::cprintln;
use crate::descriptor::Descriptor;
use crate::driver::DriverRegistry;
use crate::error::{Error, Result};
use crate::region::RegionSpec;
use crate::registry::Registry;
use crate::service::ServiceRecord;

/// Seam between the shell and the persistent environment store. The
/// store crate implements this; core only needs the three-way contract
/// (current override, compiled default, unrecognized extra).
pub trait Environment {
    /// Current value for a key, if one is stored.
    fn get(&self, key: &str) -> Option<String>;
    /// Append a value record for a key.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    /// Display lines with the three-way precedence applied.
    fn lines(&self) -> Vec<String>;
}

/// State the commands operate over.
pub struct ShellContext {
    pub drivers: Arc<DriverRegistry>,
    pub services: Arc<Registry<ServiceRecord>>,
    /// The command table, shared with the shell so `help` can list it.
    pub commands: Arc<Registry<CommandRecord>>,
    /// Driver used when a region string has no `name:` prefix.
    pub default_driver: String,
    pub env: Option<Box<dyn Environment>>,
}

impl ShellContext {
    pub fn new(
        drivers: Arc<DriverRegistry>,
        services: Arc<Registry<ServiceRecord>>,
        commands: Arc<Registry<CommandRecord>>,
        default_driver: &str,
    ) -> Self {
        Self {
            drivers,
            services,
            commands,
            default_driver: default_driver.to_string(),
            env: None,
        }
    }

    /// Parse a region string and resolve it against the driver table.
    pub fn resolve(&self, spec: &str) -> Result<Descriptor> {
        let region = RegionSpec::parse(spec, &self.default_driver)?;
        Descriptor::resolve(&self.drivers, &region)
    }

    /// Parse, resolve, and open in one step.
    pub fn open_region(&self, spec: &str) -> Result<Descriptor> {
        let mut d = self.resolve(spec)?;
        d.open()?;
        Ok(d)
    }

    #[cfg(test)]
    pub(crate) fn for_tests() -> Self {
        use crate::registry::RegistryBuilder;
        Self::new(
            Arc::new(RegistryBuilder::new().build()),
            Arc::new(RegistryBuilder::new().build()),
            Arc::new(RegistryBuilder::new().build()),
            "ram",
        )
    }
}

/// The dispatcher over the immutable command table.
pub struct Shell {
    commands: Arc<Registry<CommandRecord>>,
}

impl Shell {
    pub fn new(commands: Arc<Registry<CommandRecord>>) -> Self {
        Self { commands }
    }

    pub fn commands(&self) -> &Registry<CommandRecord> {
        &self.commands
    }

    /// Match `argv[0]` exactly and invoke the command.
    ///
    /// # Errors
    ///
    /// `UnknownCommand` on a table miss; otherwise whatever the command
    /// reports.
    pub fn dispatch(&self, ctx: &mut ShellContext, argv: &[&str]) -> Result<()> {
        let name = match argv.first() {
            Some(name) => *name,
            None => return Ok(()),
        };
        let record = self.commands.find(name).ok_or(Error::UnknownCommand)?;
        (record.func)(ctx, argv)
    }

    /// Tokenize one input line and dispatch it. The result code is
    /// displayed, not propagated: 0 for success, the taxonomy code
    /// otherwise. One failed command never ends the session.
    pub fn run_line(&self, ctx: &mut ShellContext, line: &str) -> i32 {
        let argv = split_line(line);
        if argv.is_empty() {
            return 0;
        }
        match self.dispatch(ctx, &argv) {
            Ok(()) => 0,
            Err(e) => {
                warn!("{}: {}", argv[0], e);
                cprintln!("{}: {} ({})", argv[0], e, e.code());
                e.code()
            }
        }
    }
}

/// Whitespace tokenizer for shell input.
pub fn split_line(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::RegistryBuilder;

    fn ok_cmd(_ctx: &mut ShellContext, _argv: &[&str]) -> Result<()> {
        Ok(())
    }

    fn fail_cmd(_ctx: &mut ShellContext, _argv: &[&str]) -> Result<()> {
        Err(Error::Mismatch)
    }

    fn argc_cmd(_ctx: &mut ShellContext, argv: &[&str]) -> Result<()> {
        if argv.len() < 2 {
            return Err(Error::InvalidParameter);
        }
        Ok(())
    }

    fn shell() -> Shell {
        let commands = RegistryBuilder::new()
            .add(CommandRecord {
                name: "ok",
                description: "always succeeds",
                help: "ok",
                func: ok_cmd,
            })
            .add(CommandRecord {
                name: "fail",
                description: "always fails",
                help: "fail",
                func: fail_cmd,
            })
            .add(CommandRecord {
                name: "need-arg",
                description: "requires an argument",
                help: "need-arg ARG",
                func: argc_cmd,
            })
            .build();
        Shell::new(Arc::new(commands))
    }

    #[test]
    fn test_dispatch_exact_match() {
        let shell = shell();
        let mut ctx = ShellContext::for_tests();
        assert!(shell.dispatch(&mut ctx, &["ok"]).is_ok());
    }

    #[test]
    fn test_dispatch_unknown_command() {
        let shell = shell();
        let mut ctx = ShellContext::for_tests();
        assert_eq!(
            shell.dispatch(&mut ctx, &["o"]),
            Err(Error::UnknownCommand)
        );
    }

    #[test]
    fn test_failed_command_does_not_end_session() {
        let shell = shell();
        let mut ctx = ShellContext::for_tests();
        assert_eq!(shell.run_line(&mut ctx, "fail"), Error::Mismatch.code());
        // The shell keeps dispatching afterwards.
        assert_eq!(shell.run_line(&mut ctx, "ok"), 0);
    }

    #[test]
    fn test_command_receives_argv() {
        let shell = shell();
        let mut ctx = ShellContext::for_tests();
        assert_eq!(
            shell.run_line(&mut ctx, "need-arg"),
            Error::InvalidParameter.code()
        );
        assert_eq!(shell.run_line(&mut ctx, "need-arg value"), 0);
    }

    #[test]
    fn test_empty_line_is_success() {
        let shell = shell();
        let mut ctx = ShellContext::for_tests();
        assert_eq!(shell.run_line(&mut ctx, "   "), 0);
    }

    #[test]
    fn test_split_line() {
        assert_eq!(split_line("a  b\tc "), alloc::vec!["a", "b", "c"]);
        assert!(split_line("").is_empty());
    }
}
