use anyhow::{anyhow, Result};
use clap::{arg, ArgAction, Command};
use infection_core::{partition, population, InfectionControl, Population};
use infection_structs::{
    config::{SelectionConfig, TimingSettings},
    core::{PopulationSettings, SelectionMode, SelectionReport, User},
};
use infection_utils::{compress_obj, jsonify, load_json};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("infection-runtime")
        .about("Rolls features out to whole groups of connected users")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("limited_infection")
                .about("Infects whole groups totalling as close to TARGET users as possible")
                .arg(
                    arg!(<POPULATION> "Users or population settings, json string or path to json file")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(arg!(<TARGET> "Maximum number of users to infect").value_parser(clap::value_parser!(i64)))
                .arg(
                    arg!(--config [CONFIG] "Selection config json string or path to json file")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--feature [FEATURE] "Name of the feature being rolled out")
                        .default_value("feature")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--output [OUTPUT_FILE] "If set, the report will be saved to this file path (default json)")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(--compress [COMPRESS] "If output file is set, the report will be compressed as zlib")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("total_infection")
                .about("Infects every user connected to ANCHOR")
                .arg(
                    arg!(<POPULATION> "Users or population settings, json string or path to json file")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(arg!(<ANCHOR> "Id of the user to start from").value_parser(clap::value_parser!(usize)))
                .arg(
                    arg!(--feature [FEATURE] "Name of the feature being rolled out")
                        .default_value("feature")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--output [OUTPUT_FILE] "If set, the report will be saved to this file path (default json)")
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
        .subcommand(
            Command::new("generate_population")
                .about("Generates a synthetic population")
                .arg(
                    arg!(<SETTINGS> "Population settings json string or path to json file")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--output [OUTPUT_FILE] "If set, the users will be saved to this file path")
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
        .subcommand(
            Command::new("component_stats")
                .about("Averages group counts over generated populations")
                .arg(
                    arg!(<SETTINGS> "Population settings json string or path to json file")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--trials [TRIALS] "Number of populations to generate")
                        .default_value("10")
                        .value_parser(clap::value_parser!(usize)),
                ),
        )
        .subcommand(
            Command::new("timing_report")
                .about("Times every subset-sum algorithm on growing random samples")
                .arg(
                    arg!(--"initial-size" [INITIAL_SIZE] "Sample size of the first round")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(--"max-size" [MAX_SIZE] "Largest sample size to try")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(--overtime [SECS] "Seconds after which an algorithm is retired")
                        .value_parser(clap::value_parser!(f64)),
                )
                .arg(
                    arg!(--seed [SEED] "Phrase used to seed the samples")
                        .value_parser(clap::value_parser!(String)),
                ),
        )
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let matches = cli().get_matches();

    if let Err(e) = match matches.subcommand() {
        Some(("limited_infection", sub_m)) => limited_infection(
            sub_m.get_one::<String>("POPULATION").unwrap().clone(),
            *sub_m.get_one::<i64>("TARGET").unwrap(),
            sub_m.get_one::<String>("config").cloned(),
            sub_m.get_one::<String>("feature").unwrap().clone(),
            sub_m.get_one::<PathBuf>("output").cloned(),
            *sub_m.get_one::<bool>("compress").unwrap(),
        ),
        Some(("total_infection", sub_m)) => total_infection(
            sub_m.get_one::<String>("POPULATION").unwrap().clone(),
            *sub_m.get_one::<usize>("ANCHOR").unwrap(),
            sub_m.get_one::<String>("feature").unwrap().clone(),
            sub_m.get_one::<PathBuf>("output").cloned(),
        ),
        Some(("generate_population", sub_m)) => generate_population(
            sub_m.get_one::<String>("SETTINGS").unwrap().clone(),
            sub_m.get_one::<PathBuf>("output").cloned(),
        ),
        Some(("component_stats", sub_m)) => component_stats(
            sub_m.get_one::<String>("SETTINGS").unwrap().clone(),
            *sub_m.get_one::<usize>("trials").unwrap(),
        ),
        Some(("timing_report", sub_m)) => timing_report(
            sub_m.get_one::<usize>("initial-size").cloned(),
            sub_m.get_one::<usize>("max-size").cloned(),
            sub_m.get_one::<f64>("overtime").cloned(),
            sub_m.get_one::<String>("seed").cloned(),
        ),
        _ => Err(anyhow!("Invalid subcommand")),
    } {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PopulationSource {
    Users(Vec<User>),
    Settings(PopulationSettings),
}

fn load_population(population: &str) -> Result<Population> {
    match load_json::<PopulationSource>(population)
        .map_err(|e| anyhow!("Failed to parse population: {}", e))?
    {
        PopulationSource::Users(users) => Population::new(users),
        PopulationSource::Settings(settings) => Population::generate(&settings, 0),
    }
}

pub fn limited_infection(
    population: String,
    target: i64,
    config: Option<String>,
    feature: String,
    output_file: Option<PathBuf>,
    compress: bool,
) -> Result<()> {
    let population = load_population(&population)?;
    let config = match config {
        Some(config) => load_json::<SelectionConfig>(&config)
            .map_err(|e| anyhow!("Failed to parse config: {}", e))?,
        None => SelectionConfig::default(),
    };
    let groups = partition(&population.ids(), |id| population.adjacency(id))?;
    let num_groups = groups.len();

    let mut control = InfectionControl::new();
    let infector = control.get_infector(&feature);
    let plan = infector.limited_infection_grouped(&mut control, groups, target, &config)?;

    let mut selected: Vec<usize> = plan.into_iter().collect();
    selected.sort_unstable();
    let report = SelectionReport {
        feature,
        mode: SelectionMode::Limited,
        algorithm: Some(config.algorithm),
        target: Some(target as u64),
        anchor: None,
        population_size: population.len(),
        num_groups,
        selected,
    };
    info!(
        selected = report.selected_size(),
        target,
        algorithm = %config.algorithm,
        "limited infection finished"
    );
    write_output(&report, output_file, compress)
}

pub fn total_infection(
    population: String,
    anchor: usize,
    feature: String,
    output_file: Option<PathBuf>,
) -> Result<()> {
    let population = load_population(&population)?;
    let groups = partition(&population.ids(), |id| population.adjacency(id))?;
    let num_groups = groups.len();

    let mut control = InfectionControl::new();
    let infector = control.get_infector(&feature);
    let plan = infector.total_infection_grouped(&mut control, &groups, &anchor)?;

    let mut selected: Vec<usize> = plan.into_iter().collect();
    selected.sort_unstable();
    let report = SelectionReport {
        feature,
        mode: SelectionMode::Total,
        algorithm: None,
        target: None,
        anchor: Some(anchor),
        population_size: population.len(),
        num_groups,
        selected,
    };
    info!(selected = report.selected_size(), anchor, "total infection finished");
    write_output(&report, output_file, false)
}

pub fn generate_population(settings: String, output_file: Option<PathBuf>) -> Result<()> {
    let settings = load_json::<PopulationSettings>(&settings)
        .map_err(|e| anyhow!("Failed to parse settings: {}", e))?;
    let population = Population::generate(&settings, 0)?;
    write_output(&population.users(), output_file, false)
}

pub fn component_stats(settings: String, trials: usize) -> Result<()> {
    let settings = load_json::<PopulationSettings>(&settings)
        .map_err(|e| anyhow!("Failed to parse settings: {}", e))?;
    let stats = population::component_stats(&settings, trials)?;
    println!("{}", jsonify(&stats)?);
    Ok(())
}

pub fn timing_report(
    initial_size: Option<usize>,
    max_size: Option<usize>,
    overtime: Option<f64>,
    seed: Option<String>,
) -> Result<()> {
    let defaults = TimingSettings::default();
    let settings = TimingSettings {
        initial_sample_size: initial_size.unwrap_or(defaults.initial_sample_size),
        max_sample_size: max_size.unwrap_or(defaults.max_sample_size),
        overtime_secs: overtime.unwrap_or(defaults.overtime_secs),
        seed_phrase: seed.unwrap_or(defaults.seed_phrase),
        ..defaults
    };
    let report = infection_core::timing_report(&settings)?;
    println!("{}", jsonify(&report)?);
    Ok(())
}

fn write_output<T: Serialize>(obj: &T, output_file: Option<PathBuf>, compress: bool) -> Result<()> {
    if let Some(path) = output_file {
        if compress {
            fs::write(&path, compress_obj(obj)?)?;
        } else {
            fs::write(&path, jsonify(obj)?)?;
        }
        println!("output written to: {:?}", path);
    } else {
        println!("{}", jsonify(obj)?);
    }
    Ok(())
}
