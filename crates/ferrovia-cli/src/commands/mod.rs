//! Command dispatch and handler modules.

mod add;
mod fetch;
mod init;
mod lock;
mod outdated;
mod remove;
mod tree;
mod update;

use miette::Result;

use crate::cli::{Cli, Command};

/// Route a parsed CLI invocation to the appropriate command handler.
pub async fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Init => init::exec(),
        Command::Add { dep, dev } => add::exec(&dep, dev).await,
        Command::Remove { dep, dev } => remove::exec(&dep, dev).await,
        Command::Fetch { verify } => fetch::exec(cli.verbose, verify).await,
        Command::Lock => lock::exec(cli.verbose).await,
        Command::Tree {
            depth,
            duplicates,
            inverted,
            why,
            conflicts,
            licenses,
        } => tree::exec(depth, duplicates, inverted, why, conflicts, licenses).await,
        Command::Outdated { major } => outdated::exec(major).await,
        Command::Update {
            major,
            dep,
            dry_run,
        } => update::exec(major, dep, dry_run).await,
    }
}
