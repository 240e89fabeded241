use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod serve;
pub mod summarize;

#[derive(Subcommand)]
enum Command {
    /// Run the API server
    Serve {
        /// Set the server host address
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Set the server port
        #[arg(long, default_value = "8000")]
        port: String,
    },
    /// Print the timesheet for a week from a local or published calendar
    Summarize {
        /// Sunday before the work week, e.g. 2025-01-05
        #[arg(long)]
        week_sunday: String,

        /// Path to an .ics file
        #[arg(long, conflicts_with = "url", required_unless_present = "url")]
        file: Option<PathBuf>,

        /// Published https calendar link
        #[arg(long)]
        url: Option<String>,

        /// Recurring meetings to apply, separated by `||`
        #[arg(long, default_value = "")]
        include: String,

        /// Leave out the pending recurring meetings
        #[arg(long, action, default_value = "false")]
        finalize: bool,

        /// Track recurring meetings by summary like the legacy endpoint
        #[arg(long, action, default_value = "false")]
        legacy: bool,
    },
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

pub async fn run() -> Result<()> {
    let args = Cli::parse();

    // Handle each sub command
    match args.command {
        Some(Command::Serve { host, port }) => {
            serve::run(host, port).await?;
        }
        Some(Command::Summarize {
            week_sunday,
            file,
            url,
            include,
            finalize,
            legacy,
        }) => {
            let opts = summarize::SummarizeOptions {
                week_sunday,
                file,
                url,
                include,
                finalize,
                legacy,
            };
            let out = summarize::run(opts).await?;
            println!("{}", out);
        }
        None => {}
    }

    Ok(())
}
