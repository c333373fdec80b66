//! Shell completion generation.

use clap::CommandFactory;
use clap_complete::generate;

use crate::cli::{Cli, CompletionsArgs, Shell};

const BIN_NAME: &str = "hexa";

pub fn execute(args: CompletionsArgs) -> crate::error::CliResult<()> {
    let mut cmd = Cli::command();
    generate(
        to_generator(args.shell),
        &mut cmd,
        BIN_NAME,
        &mut std::io::stdout(),
    );
    Ok(())
}

fn to_generator(shell: Shell) -> clap_complete::Shell {
    match shell {
        Shell::Bash => clap_complete::Shell::Bash,
        Shell::Zsh => clap_complete::Shell::Zsh,
        Shell::Fish => clap_complete::Shell::Fish,
        Shell::PowerShell => clap_complete::Shell::PowerShell,
        Shell::Elvish => clap_complete::Shell::Elvish,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bash_script_completes_subcommands() {
        let mut buf = Vec::new();
        generate(
            to_generator(Shell::Bash),
            &mut Cli::command(),
            BIN_NAME,
            &mut buf,
        );
        let script = String::from_utf8(buf).unwrap();
        assert!(script.contains("hexa"));
        assert!(script.contains("generate"));
    }
}
