use std::io;

use anyhow::Result;
use clap::Parser;
use printcost::cli::{self, Cli, Command};
use printcost::logging;
use printcost::session::Session;

fn main() -> Result<()> {
    let args = Cli::parse();
    logging::init(args.log_level);

    match args.command.unwrap_or_else(Command::interactive_default) {
        Command::Interactive {
            printers_file,
            preload,
            params,
        } => {
            let mut session = Session::new(io::stdin().lock(), io::stdout().lock())
                .with_printers_file(printers_file);
            if let Some(path) = preload {
                session = session.with_registry(cli::load_registry(&path)?);
            }
            if let Some(path) = params {
                session = session.with_params_file(path);
            }
            session.run()
        }
        Command::Calculate {
            printers,
            params,
            units,
            json,
        } => {
            let output = cli::calculate(&printers, params.as_deref(), units, json)?;
            println!("{}", output.trim_end());
            Ok(())
        }
    }
}
