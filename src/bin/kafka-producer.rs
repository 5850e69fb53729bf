//! kafka-producer CLI — operator interface to the producer's startup config.

use clap::{Parser, Subcommand};
use kafka_producer::config::{Config, ConfigPaths};
use kafka_producer::telemetry::{init_logging, with_bootstrap_logging};

#[derive(Parser)]
#[command(name = "kafka-producer", about = "Kafka message producer")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load and validate the configuration, then print it
    Check {
        /// Print as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Check { json } => cmd_check(json),
    }
}

fn cmd_check(json: bool) -> anyhow::Result<()> {
    let paths = ConfigPaths::default();
    let (config, source) = with_bootstrap_logging(|| Config::load_with_source(&paths))?;
    let _guard = init_logging(&config)?;

    tracing::info!(%source, topic = %config.topic_name, "configuration valid");

    if json {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    println!("Source:     {source}");
    println!("App Env:    {}", config.app_env);
    println!("Brokers:    {}", config.broker_addresses.join(", "));
    println!("Log File:   {}", config.log_file_path.display());
    println!("Log Level:  {}", config.log_level);
    println!("Msg Limit:  {}", config.message_limit);
    println!("Sleep:      {}ms", config.sleep_timeout.as_millis());
    println!("Topic:      {}", config.topic_name);

    Ok(())
}
