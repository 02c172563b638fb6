use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

mod commands;

#[derive(Parser)]
#[command(name = "examgrid", version, about = "Exam timetable inspection and manual editing")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the timetable grid for one day
    Show {
        /// Exam day as reported by the backend
        #[arg(long)]
        day: String,
    },
    /// Interactive slot-by-slot editing session
    Edit,
    /// Move one exam group to an empty slot
    Move {
        #[command(flatten)]
        args: commands::mutate::MoveArgs,
    },
    /// Swap two exam groups' slots
    Swap {
        #[command(flatten)]
        args: commands::mutate::SwapArgs,
    },
    /// Move several exam groups to a common day and shift
    BatchMove {
        #[command(flatten)]
        args: commands::mutate::BatchMoveArgs,
    },
    /// Upload an input spreadsheet
    Upload {
        /// Input kind (lhp, data, cfg, sv)
        kind: String,
        /// Path to the spreadsheet file
        file: std::path::PathBuf,
    },
    /// Show upload status of the input spreadsheets
    Files,
    /// Run the solver on the uploaded inputs
    Solve,
    /// List result files on the backend
    Results,
    /// Download a result file from the backend
    Download {
        /// Filename as listed by `results`
        file: String,
        /// Local path to write to (defaults to the filename)
        #[arg(long)]
        output: Option<std::path::PathBuf>,
    },
    /// Export the per-student exam roster
    ExportStudents,
    /// Client and solver configuration
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Show { day } => commands::show::run(&day),
        Commands::Edit => commands::edit::run(),
        Commands::Move { args } => commands::mutate::run_move(args),
        Commands::Swap { args } => commands::mutate::run_swap(args),
        Commands::BatchMove { args } => commands::mutate::run_batch_move(args),
        Commands::Upload { kind, file } => commands::backend::run_upload(&kind, &file),
        Commands::Files => commands::backend::run_files(),
        Commands::Solve => commands::backend::run_solve(),
        Commands::Results => commands::backend::run_results(),
        Commands::Download { file, output } => {
            commands::backend::run_download(&file, output.as_deref())
        }
        Commands::ExportStudents => commands::backend::run_export_students(),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
