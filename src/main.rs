use cidr_aggregate::config::Config;
use cidr_aggregate::logging::init_logging;
use cidr_aggregate::{aggregate, read_input, render_output};
use clap::Parser;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    dotenv::dotenv().ok();
    let config = Config::parse();
    init_logging(&config.log_config);
    log::info!("#Start main() format={:?}", config.format);

    let prefixes = read_input(&config.files)?;
    let input_count = prefixes.len();
    if input_count == 0 {
        log::warn!("No prefixes read from input");
    }
    let aggregated = aggregate(prefixes)?;
    log::info!("Aggregated {} prefixes into {}", input_count, aggregated.len());

    let rendered = render_output(config.format, input_count, &aggregated)?;
    if !rendered.is_empty() {
        println!("{rendered}");
    }
    Ok(())
}
