//! Look up the stop point ids of a tube station's platforms.
//!
//! Usage: `find-station <station name>`. Prompts when no name is given.
//! Reads the TfL app key from `TFL_API_KEY` if set.

use std::io::{self, BufRead, Write};

use commute_server::config::API_KEY_ENV;
use commute_server::exit_on_error;
use commute_server::tfl::{TflClient, TflConfig, TflError, tube_platforms};

const RULE_WIDTH: usize = 60;

#[tokio::main]
async fn main() {
    commute_server::init_tracing();

    let mut search: String = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    if search.trim().is_empty() {
        search = match prompt("Enter your tube station name: ") {
            Ok(line) => line,
            Err(e) => {
                eprintln!("failed to read station name: {e}");
                std::process::exit(1);
            }
        };
    }

    let api_key = std::env::var(API_KEY_ENV).unwrap_or_default();
    let client = exit_on_error(
        TflClient::new(TflConfig::new(api_key)),
        "failed to create TfL client",
    );

    if let Err(e) = find_station(&client, search.trim()).await {
        tracing::error!(error = %e, "station lookup failed");
        std::process::exit(1);
    }
}

fn prompt(message: &str) -> io::Result<String> {
    print!("{message}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

async fn find_station(client: &TflClient, search: &str) -> Result<(), TflError> {
    let results = client.search_stop_points(search, "tube").await?;
    let Some(station) = results.matches.first() else {
        println!("No stations found");
        return Ok(());
    };

    println!();
    println!("Found: {}", station.name);
    println!("Hub ID: {}", station.id);
    println!();

    let hub = client.get_stop_point(&station.id).await?;
    let platforms = tube_platforms(&hub);
    if platforms.is_empty() {
        println!("No platform details found");
        return Ok(());
    }

    println!("Stop Points (Platforms):");
    println!("{}", "=".repeat(RULE_WIDTH));
    for platform in platforms {
        println!();
        println!("ID: {}", platform.id);
        println!("Name: {}", platform.name);
        println!("Lines: {}", platform.lines.join(", "));
        println!("Indicator: {}", platform.indicator);
        println!("{}", "-".repeat(RULE_WIDTH));
    }

    Ok(())
}
