//! Shell completion generation command.

use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};
use std::io;

/// Generate shell completions.
#[derive(Args, Debug)]
pub struct CmdCompletions {
    /// Shell to generate completions for.
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CmdCompletions {
    /// Execute the completions command.
    pub fn run<C: CommandFactory>(&self) -> anyhow::Result<()> {
        self.write::<C>(&mut io::stdout());
        Ok(())
    }

    fn write<C: CommandFactory>(&self, out: &mut dyn io::Write) {
        let mut cmd = C::command();
        let name = cmd.get_name().to_string();
        generate(self.shell, &mut cmd, name, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Cli;

    #[test]
    fn test_bash_completions_name_subcommands() {
        let cmd = CmdCompletions { shell: Shell::Bash };
        let mut out = Vec::new();
        cmd.write::<Cli>(&mut out);
        let script = String::from_utf8(out).unwrap();
        assert!(script.contains("smpte"));
        assert!(script.contains("convert"));
        assert!(script.contains("samples"));
    }
}
