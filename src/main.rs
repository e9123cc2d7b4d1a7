//! raudio-sheet CLI - render FM playbooks to 16 bit mono wave files

use clap::{Parser, Subcommand};
use raudio_sheet::arg_parse::{self, Playbook};
use raudio_sheet::synth_config::SynthConfig;
use std::path::{Path, PathBuf};
use std::process;
use tracing::error;

#[derive(Parser)]
#[command(name = "raudio-sheet")]
#[command(about = "Render FM instrument playbooks to PCM wave files", long_about = None)]
struct Cli {
    /// Number of threads used to render notes (default: all cores)
    #[arg(short = 't', long, global = true)]
    threads: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a playbook JSON file to WAV
    Render {
        /// Playbook file
        playbook: PathBuf,

        /// Output WAV file path
        output: PathBuf,

        /// Sample rate in Hz (overrides RAUDIO_SAMPLE_RATE)
        #[arg(short, long)]
        sample_rate: Option<u32>,
    },
    /// Render the built-in demo (pluck and gong over "hot cross buns")
    Demo {
        /// Output WAV file path
        #[arg(default_value = "hot.wav")]
        output: PathBuf,
    },
}

fn render(playbook: &Playbook, config: SynthConfig, output: &Path) -> raudio_sheet::Result<()> {
    let mut song = playbook.perform(config)?;
    song.render(output)
}

fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Some(threads) = cli.threads {
        if let Err(e) = rayon::ThreadPoolBuilder::new().num_threads(threads).build_global() {
            error!("Failed to size thread pool: {}", e);
        }
    }

    let config = SynthConfig::from_env();
    let result = match cli.command {
        Commands::Render { playbook, output, sample_rate } => {
            let config = SynthConfig { sample_rate: sample_rate.unwrap_or(config.sample_rate), ..config };
            arg_parse::load_playbook(&playbook).and_then(|p| render(&p, config, &output)).map(|_| output)
        }
        Commands::Demo { output } => render(&arg_parse::demo_playbook(), config, &output).map(|_| output),
    };

    match result {
        Ok(output) => println!("{}", output.display()),
        Err(e) => {
            error!("Problem while rendering: {}", e);
            eprintln!("{}", e);
            process::exit(1);
        }
    }
}
