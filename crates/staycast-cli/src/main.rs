use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use log::LevelFilter;
use std::path::PathBuf;

use staycast::form::{
    ADMISSION_TYPES, DISCHARGE_DISPOSITIONS, GENDERS, MAX_AGE, MIN_AGE, PRIMARY_DIAGNOSES, WARDS,
};
use staycast::narrative::{MAX_STAY_DAYS, MIN_STAY_DAYS};
use staycast_cli::predict::input::PredictInput;
use staycast_cli::predict::{run_narrate, run_prediction};
use staycast_cli::train::input::StayTrainConfig;
use staycast_cli::train::trainer;

const SEVERITIES: [&str; 3] = ["Mild", "Moderate", "Severe"];

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("STAYCAST_LOG", "error,staycast=info"))
        .init();

    let matches = Command::new("staycast")
        .version(clap::crate_version!())
        .about("\u{1F3E5} staycast - Hospital Length of Stay Prediction")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("train")
                .about("Grid-search, train and save a length of stay model")
                .arg(
                    Arg::new("config")
                        .help("Path to training configuration file (JSON)")
                        .required(false)
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("train_data")
                        .short('d')
                        .long("train_data")
                        .value_parser(clap::builder::NonEmptyStringValueParser::new())
                        .help(
                            "Path to the admissions table (*.csv or *.tsv). Overrides the \
                             training data file specified in the configuration file.",
                        )
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("output_file")
                        .short('o')
                        .long("output_file")
                        .value_parser(clap::builder::NonEmptyStringValueParser::new())
                        .help(
                            "File path that the trained model (JSON) will be written to. \
                             Overrides the output file specified in the configuration file.",
                        )
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("report_file")
                        .long("report")
                        .value_parser(clap::builder::NonEmptyStringValueParser::new())
                        .help("Path of the HTML training report.")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("cv_folds")
                        .long("cv")
                        .value_parser(clap::value_parser!(usize))
                        .help("Number of cross-validation folds."),
                )
                .arg(
                    Arg::new("no_report")
                        .long("no-report")
                        .help("Disable HTML report generation.")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("predict")
                .about("Predict the length of stay of one admission and describe each day")
                .arg(
                    Arg::new("model_path")
                        .short('m')
                        .long("model")
                        .help("Path to the trained model file (*.json)")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("age")
                        .long("age")
                        .help("Patient age in years")
                        .default_value("30")
                        .value_parser(clap::value_parser!(u32).range(MIN_AGE as i64..=MAX_AGE as i64)),
                )
                .arg(choice_arg("gender", "gender", "Patient gender", GENDERS))
                .arg(choice_arg(
                    "admission_type",
                    "admission-type",
                    "Type of admission",
                    ADMISSION_TYPES,
                ))
                .arg(choice_arg(
                    "diagnosis",
                    "diagnosis",
                    "Primary diagnosis",
                    PRIMARY_DIAGNOSES,
                ))
                .arg(choice_arg(
                    "severity",
                    "severity",
                    "Severity of illness",
                    &SEVERITIES,
                ))
                .arg(
                    Arg::new("comorbidities")
                        .long("comorbidities")
                        .help("Comorbidities (comma-separated), e.g. 'Arthritis, None'"),
                )
                .arg(
                    Arg::new("procedure_codes")
                        .long("procedure-codes")
                        .help("Procedure codes (comma-separated), e.g. '4019, 2500'"),
                )
                .arg(choice_arg("ward", "ward", "Ward or department", WARDS))
                .arg(choice_arg(
                    "discharge",
                    "discharge",
                    "Discharge disposition",
                    DISCHARGE_DISPOSITIONS,
                ))
                .arg(
                    Arg::new("html_output")
                        .long("html")
                        .help("Also write the day-by-day breakdown as an HTML page")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("narrate")
                .about("Describe each day of a stay of the given length and severity")
                .arg(
                    Arg::new("days")
                        .long("days")
                        .help("Length of stay in days")
                        .required(true)
                        .value_parser(
                            clap::value_parser!(u8)
                                .range(MIN_STAY_DAYS as i64..=MAX_STAY_DAYS as i64),
                        ),
                )
                .arg(
                    Arg::new("severity")
                        .long("severity")
                        .help("Severity of illness: Mild, Moderate or Severe")
                        .required(true)
                        .value_parser(clap::builder::NonEmptyStringValueParser::new()),
                ),
        )
        .help_template(
            "{usage-heading} {usage}\n\n\
             {about-with-newline}\n\
             Version {version}\n\n\
             {all-args}{after-help}",
        )
        .get_matches();

    match matches.subcommand() {
        Some(("train", sub_m)) => handle_train(sub_m),
        Some(("predict", sub_m)) => handle_predict(sub_m),
        Some(("narrate", sub_m)) => handle_narrate(sub_m),
        _ => unreachable!("Subcommand is required by CLI configuration"),
    }
}

fn choice_arg(
    id: &'static str,
    long: &'static str,
    help: &'static str,
    choices: &'static [&'static str],
) -> Arg {
    Arg::new(id)
        .long(long)
        .help(help)
        .required(true)
        .value_parser(PossibleValuesParser::new(choices.iter().copied()))
}

fn handle_train(matches: &ArgMatches) -> Result<()> {
    let config_path: Option<&PathBuf> = matches.get_one("config");
    let config = StayTrainConfig::from_arguments(config_path, matches)?;

    if config_path.is_none() {
        eprintln!("[staycast::train] No config file provided; using defaults.");
        println!("{}", serde_json::to_string_pretty(&config)?);
        if config.train_data.is_empty() {
            eprintln!("[staycast::train] Pass --train_data or a config file to start training.");
            return Ok(());
        }
    } else {
        log::info!("[staycast::train] Training from config: {:?}", config_path);
    }

    match trainer::run_training(&config) {
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Training failed: {:#}", e);
            std::process::exit(1)
        }
    }
}

fn handle_predict(matches: &ArgMatches) -> Result<()> {
    let input = PredictInput::from_arguments(matches)?;
    match run_prediction(input) {
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Prediction failed: {:#}", e);
            std::process::exit(1)
        }
    }
}

fn handle_narrate(matches: &ArgMatches) -> Result<()> {
    let days = *matches
        .get_one::<u8>("days")
        .ok_or_else(|| anyhow::anyhow!("Missing required argument 'days'"))?;
    let severity = matches
        .get_one::<String>("severity")
        .ok_or_else(|| anyhow::anyhow!("Missing required argument 'severity'"))?;

    match run_narrate(days, severity) {
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Narration failed: {:#}", e);
            std::process::exit(1)
        }
    }
}
