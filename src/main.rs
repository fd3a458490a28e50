use clap::{Parser, Subcommand};
use std::error::Error;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;
use timetable_solver::{SchedulingInput, ValidationError, report, server, solver};

#[derive(Parser)]
#[command(name = "timetable_solver")]
#[command(author, version, about = "Weekly university timetable generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the scheduling API over HTTP
    Serve {
        /// Address to bind
        #[arg(long, env = "TIMETABLE_ADDR", default_value = "127.0.0.1:8080")]
        addr: String,
    },

    /// Schedule a course/room catalog once and write the result as JSON
    Solve {
        /// Input file path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Group the schedule by student group instead
        #[arg(long)]
        by_student: bool,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match Cli::parse().command {
        Commands::Serve { addr } => server::run_server(&addr).await?,
        Commands::Solve {
            file,
            by_student,
            output,
        } => {
            let input: SchedulingInput = serde_json::from_reader(BufReader::new(File::open(&file)?))
                .map_err(ValidationError::from)?;
            let timetable = solver::generate(&input)?;
            let json = if by_student {
                serde_json::to_string_pretty(&report::by_student_group(&timetable))?
            } else {
                serde_json::to_string_pretty(&report::build_output(&timetable))?
            };
            match output {
                Some(path) => std::fs::write(path, json)?,
                None => writeln!(io::stdout(), "{json}")?,
            }
        }
    }
    Ok(())
}
