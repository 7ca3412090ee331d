use clap::{Parser, Subcommand};
use country_codes::settings::get_settings;
use country_codes::telemetry::{info, init_tracing, LogKey};
use country_codes::{CountryDirectory, DataSource};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "country_lookup")]
#[command(about = "Look up country names and ISO 3166-1 / UN codes")]
struct Cli {
    /// Fetch live data from the countries API instead of the bundled table
    #[arg(long, global = true)]
    remote: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every country as JSON
    List,

    /// Print the first country whose field matches VALUE
    Find {
        /// One of: name, nativeName, 2letter, 3letter, un
        #[arg(value_name = "FIELD")]
        field: String,

        #[arg(value_name = "VALUE")]
        value: String,
    },
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let settings = get_settings()?;
    init_tracing(&settings.log_level, std::io::stderr)?;
    let directory = CountryDirectory::from_settings(&settings)?;
    let source = DataSource::from(cli.remote);

    match cli.command {
        Commands::List => {
            let countries = directory.list_all(source);
            println!("{}", serde_json::to_string_pretty(&countries)?);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Find { field, value } => match directory.find_by_key(&field, &value, source) {
            Some(country) => {
                println!("{}", serde_json::to_string_pretty(&country)?);
                Ok(ExitCode::SUCCESS)
            }
            None => {
                info(
                    &LogKey::CountryLookup,
                    &format!("No country where {} is '{}'.", field, value.trim()),
                );
                Ok(ExitCode::FAILURE)
            }
        },
    }
}
