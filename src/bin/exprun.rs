use clap::Parser;
use exprun::{
    config::{ConfigError, SystemConfig},
    event::OutputMode,
    stream_execution, Environment, Error, InternalResult, Interpreter, Snapshot,
};
use std::{fs::File, io::BufReader, path::PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON object of initial variable values
    #[arg(short, long)]
    seed: Option<PathBuf>,

    /// Print one JSON event per line instead of plain output
    #[arg(long)]
    stream: bool,

    /// Enable debug mode
    #[arg(short, long)]
    verbose: bool,

    /// Program to run
    #[arg(default_value = "program.expr")]
    program: PathBuf,
}

fn load_config(cli: &Cli) -> Result<SystemConfig, ConfigError> {
    match &cli.config {
        Some(path) => SystemConfig::from_file(path),
        None => Ok(SystemConfig::default()),
    }
}

fn load_seed(cli: &Cli) -> Result<Environment, ConfigError> {
    let Some(path) = &cli.seed else {
        return Ok(Environment::new());
    };
    let reader = BufReader::new(File::open(path)?);
    let snapshot: Snapshot = serde_json::from_reader(reader)?;
    Ok(snapshot.into())
}

async fn run(cli: &Cli, config: SystemConfig) -> InternalResult<()> {
    let seed = load_seed(cli)?;
    let source = std::fs::read_to_string(&cli.program)
        .map_err(|e| Error::internal(format!("Failed to read program file: {}", e)))?;
    debug!("program {:?}, {} seeded variables", cli.program, seed.len());

    if cli.stream {
        let mut stream = stream_execution(source, seed, &config);
        info!("streaming run {}", stream.run_id());
        while let Some(event) = stream.recv().await {
            let json = event
                .to_json()
                .map_err(|e| Error::internal(format!("Failed to encode event: {}", e)))?;
            println!("{}", json);
        }
        return Ok(());
    }

    let mut interpreter = Interpreter::new(config.parser).with_environment(seed);
    let outcome = interpreter.run(&source, &mut OutputMode::Direct)?;
    match outcome.value {
        Some(value) => println!("{}", value),
        None => println!("None"),
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let level = if cli.verbose {
        "debug".to_string()
    } else {
        config.log_level.clone()
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("config loaded.");
    debug!("config: {:?}", config);

    if let Err(e) = run(&cli, config).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
