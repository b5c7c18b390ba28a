//! completion command - Generate shell completion scripts

use std::io::{self, Write};

use anyhow::Result;
use clap::CommandFactory;
use clap_complete::{generate, shells, Generator};

use crate::cli::args::{Cli, Shell};

/// Write the completion script for `shell` to stdout.
pub fn completion(shell: Shell) -> Result<()> {
    let mut stdout = io::stdout().lock();
    match shell {
        Shell::Bash => write_script(shells::Bash, &mut stdout),
        Shell::Zsh => write_script(shells::Zsh, &mut stdout),
        Shell::Fish => write_script(shells::Fish, &mut stdout),
        Shell::PowerShell => write_script(shells::PowerShell, &mut stdout),
    }
    stdout.flush()?;
    Ok(())
}

fn write_script(generator: impl Generator, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(generator, &mut cmd, name, out);
}
