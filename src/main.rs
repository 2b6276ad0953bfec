//! Entry point for the climlib application.
//! Handles CLI parsing, configuration loading, and dispatches the archive and ESGF commands.

mod cli;

use clap::Parser;
use climlib::config::ClimlibConfig;
use climlib::errors::Result;
use climlib::esgf::{EsgfClient, EsgfQuery};
use climlib::io::get_file_meta;
use climlib::logging;
use climlib::parallel::ParallelConfig;
use climlib::util::{find_in_list, print_paths, read_path_list, split_csv};
use climlib::wrangle::trim_model_report;
use std::fs::File;
use std::io::{self, BufReader};
use std::process;

use cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = ClimlibConfig::load(cli.config.as_deref())?;
    ParallelConfig::new(cli.threads.or(config.threads)).setup_global_pool()?;

    match cli.command {
        Command::Find(args) => {
            let search = args.into_search(
                config.archive.base.display().to_string(),
                config.trim.criteria.clone(),
            );
            let files = search.find()?;
            print_paths(&files);
        }
        Command::Trim(args) => {
            let mut files = args.files;
            if let Some(list) = args.from_list {
                let extra = if list.as_os_str() == "-" {
                    read_path_list(io::stdin().lock())?
                } else {
                    read_path_list(BufReader::new(File::open(&list)?))?
                };
                files.extend(extra);
            }

            let criteria = args
                .criteria
                .map(|c| c.0)
                .unwrap_or_else(|| config.trim.criteria.clone());
            let report = trim_model_report(&files, &criteria)?;

            if args.report {
                report.print();
            } else {
                print_paths(&report.selected());
            }
        }
        Command::Meta(args) => {
            for path in &args.files {
                get_file_meta(path)?.print_report(path);
            }
        }
        Command::Match(args) => {
            for entry in find_in_list(&args.key, &args.entries) {
                println!("{}", entry);
            }
        }
        Command::Models(args) => {
            let client = EsgfClient::new(config.esgf_settings())?;
            let query = EsgfQuery::new(args.mip_era, args.experiment, args.variable)
                .frequency(args.frequency)
                .table(args.table);

            let models = runtime()?.block_on(client.available_models(&query))?;
            for model in &models {
                println!("{}", model);
            }
            println!("✅ {} model(s)", models.len());
        }
        Command::ModelSet(args) => {
            let client = EsgfClient::new(config.esgf_settings())?;
            let experiments = split_csv(&args.experiments);
            let variables = split_csv(&args.variables);

            let models = runtime()?.block_on(client.model_set(
                &args.mip_era,
                &experiments,
                &variables,
                args.frequency.as_deref(),
            ))?;
            for model in &models {
                println!("{}", model);
            }
            println!("✅ {} model(s)", models.len());
        }
        Command::Citation(args) => {
            let client = EsgfClient::new(args.settings(config.esgf_settings()))?;
            let citation = runtime()?.block_on(client.citation_from_tracking_id(&args.tracking_id))?;
            println!("{}", citation);
        }
    }

    Ok(())
}

fn runtime() -> Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?)
}
