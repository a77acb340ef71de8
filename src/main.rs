//! curswap: convert cursor schemes between Windows and X11 and manage
//! the installed result on either platform.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use curswap::commands;

#[derive(Parser)]
#[command(name = "curswap")]
#[command(about = "Convert and install cursor schemes across platforms", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a scheme: .inf input becomes an X11 theme, a theme
    /// directory becomes a Windows scheme package
    Convert {
        /// Input scheme (.inf file, theme directory, or theme descriptor)
        input: PathBuf,

        /// Directory the converted scheme is written into
        output: PathBuf,

        /// External cursor-file converter program to run
        #[arg(long)]
        converter: Option<String>,

        /// Extra argument passed to the converter (repeatable)
        #[arg(long = "converter-arg")]
        converter_args: Vec<String>,

        /// Directory of fallback cursor files for roles the input lacks
        #[arg(long)]
        completion_dir: Option<PathBuf>,
    },

    /// Install a converted scheme for the current user
    Install {
        /// Scheme to install (.inf file or theme directory)
        input: PathBuf,

        /// Install cursor files here instead of the platform default
        #[arg(long)]
        install_path: Option<PathBuf>,
    },

    /// Activate an installed scheme
    Apply {
        /// Name of the installed scheme
        name: String,

        /// Cursor size to switch to alongside the scheme
        #[arg(long)]
        size: Option<u32>,
    },

    /// Remove an installed scheme and any files only it references
    Uninstall {
        /// Name of the installed scheme
        name: String,
    },

    /// List installed schemes
    List {
        /// Emit machine-readable JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show the active scheme
    Current {
        /// Emit machine-readable JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Package an installed scheme for another machine
    Export {
        /// Name of the installed scheme
        name: String,

        /// Directory the package is written into
        output: PathBuf,

        /// Target cursor directory recorded in the package descriptor
        #[arg(long)]
        install_path: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            input,
            output,
            converter,
            converter_args,
            completion_dir,
        } => {
            commands::convert::execute(
                &input,
                &output,
                converter.as_deref(),
                &converter_args,
                completion_dir.as_deref(),
            )?;
        }

        Commands::Install {
            input,
            install_path,
        } => {
            commands::install::execute(&input, install_path.as_deref())?;
        }

        Commands::Apply { name, size } => {
            commands::apply::execute(&name, size)?;
        }

        Commands::Uninstall { name } => {
            commands::uninstall::execute(&name)?;
        }

        Commands::List { json } => {
            let output = commands::list::execute(json)?;
            println!("{}", output);
        }

        Commands::Current { json } => {
            let output = commands::current::execute(json)?;
            println!("{}", output);
        }

        Commands::Export {
            name,
            output,
            install_path,
        } => {
            commands::export::execute(&name, &output, install_path.as_deref())?;
        }
    }

    Ok(())
}
