#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;

use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::ArgMatches;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use strum::IntoEnumIterator;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;

use super::report;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::EncodedAsset;
use crate::domain::models::Event;
use crate::domain::models::ModelName;
use crate::domain::models::SessionEvent;
use crate::domain::models::SlotRole;
use crate::domain::services::AssetEncoder;
use crate::domain::services::RunService;
use crate::domain::services::SessionState;
use crate::infrastructure::backends::BackendManager;

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
}

fn slot_arg_id(role: SlotRole) -> &'static str {
    match role {
        SlotRole::Reference => return "reference",
        SlotRole::CandidateA => return "candidate-a",
        SlotRole::CandidateB => return "candidate-b",
    }
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if let Some(parent) = config_file_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    let mut file = fs::File::create(config_file_path.clone()).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!("Created default config file at {config_file_path_str}");
    return Ok(());
}

/// Reads every slot the user passed a file for. Missing slots stay missing so
/// the session reports them.
async fn read_slots(matches: &ArgMatches) -> Result<Vec<(SlotRole, EncodedAsset)>> {
    let mut slots = vec![];
    for role in SlotRole::iter() {
        if let Ok(Some(file_path)) = matches.try_get_one::<String>(slot_arg_id(role)) {
            let asset = AssetEncoder::read_file(path::Path::new(file_path)).await?;
            slots.push((role, asset));
        }
    }

    return Ok(slots);
}

async fn list_models() -> Result<bool> {
    let backend = BackendManager::get();
    match backend
        .list_models(&Config::get(ConfigKey::GeminiToken))
        .await
    {
        Ok(models) => {
            report::print_model_list(&models);
            return Ok(true);
        }
        Err(err) => {
            report::print_model_list_failed(&err);
            return Ok(false);
        }
    }
}

async fn analyze(matches: &ArgMatches) -> Result<bool> {
    let slots = read_slots(matches).await?;
    let backend = BackendManager::get();

    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<SessionEvent>();
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<Event>();

    let worker_backend = backend.clone();
    let worker = tokio::spawn(async move {
        return RunService::start(
            worker_backend,
            SessionState::new("", ""),
            event_tx,
            &mut action_rx,
        )
        .await;
    });

    action_tx.send(SessionEvent::CredentialChanged(Config::get(
        ConfigKey::GeminiToken,
    )))?;
    action_tx.send(SessionEvent::ModelChanged(Config::get(ConfigKey::Model)))?;
    for (role, asset) in slots {
        action_tx.send(SessionEvent::SlotAssigned(role, asset))?;
    }
    action_tx.send(SessionEvent::RunTriggered())?;
    drop(action_tx);

    while let Some(event) = event_rx.recv().await {
        match event {
            Event::PhaseChanged(phase) => report::print_phase(phase),
            Event::RunSettled(outcome) => {
                tracing::debug!(success = outcome.is_success(), "Run settled");
            }
        }
    }
    let session = worker.await??;

    let outcome = match session.outcome() {
        Some(outcome) => outcome,
        None => bail!(format!(
            "The run ended without an outcome in phase {}",
            session.phase()
        )),
    };
    report::print_outcome(outcome);

    if outcome.remote_status() == Some(404) {
        report::print_listing_models();
        list_models().await?;
    }
    report::print_closing(outcome, session.model());

    return Ok(outcome.is_success());
}

async fn preview(matches: &ArgMatches) -> Result<bool> {
    let mut session = SessionState::new(
        &Config::get(ConfigKey::GeminiToken),
        &Config::get(ConfigKey::Model),
    );
    for (role, asset) in read_slots(matches).await? {
        (session, _) = session.reduce(SessionEvent::SlotAssigned(role, asset));
    }

    let previews = SlotRole::iter()
        .filter_map(|role| {
            return session
                .slot(role)
                .preview()
                .map(|preview| return (role, preview));
        })
        .collect::<Vec<_>>();
    report::print_previews(&previews);

    return Ok(SlotRole::iter().all(|role| return session.slot(role).is_filled()));
}

fn arg_slot(role: SlotRole, short: char, help: &'static str) -> Arg {
    return Arg::new(slot_arg_id(role))
        .short(short)
        .long(slot_arg_id(role))
        .num_args(1)
        .help(help);
}

fn slot_args(cmd: Command) -> Command {
    return cmd
        .arg(arg_slot(
            SlotRole::Reference,
            'r',
            "Path to the known real reference image (png, jpg, jpeg).",
        ))
        .arg(arg_slot(
            SlotRole::CandidateA,
            'a',
            "Path to test image A (png, jpg, jpeg).",
        ))
        .arg(arg_slot(
            SlotRole::CandidateB,
            'b',
            "Path to test image B (png, jpg, jpeg).",
        ));
}

fn subcommand_analyze() -> Command {
    return slot_args(
        Command::new("analyze")
            .about("Ask the model which of image A and image B is real, compared against the reference."),
    );
}

fn subcommand_preview() -> Command {
    return slot_args(
        Command::new("preview")
            .about("Read and encode the images without contacting the model."),
    );
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

pub fn build() -> Command {
    let about = format!(
        "{}\n\nVersion: {}\nCommit: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
        env!("VERGEN_GIT_DESCRIBE")
    );

    return Command::new("verdict")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .arg_required_else_help(true)
        .subcommand(subcommand_analyze())
        .subcommand(subcommand_preview())
        .subcommand(Command::new("models").about("Lists the models your token can use for image analysis."))
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("VERDICT_CONFIG_FILE")
                .num_args(1)
                .help(format!("Path to configuration file [default: {}]", Config::default(ConfigKey::ConfigFile)))
                .global(true)
        )
        .arg(
            Arg::new(ConfigKey::Model.to_string())
                .short('m')
                .long(ConfigKey::Model.to_string())
                .env("VERDICT_MODEL")
                .num_args(1)
                .help(format!("The Gemini model to analyze with. [default: {}]", Config::default(ConfigKey::Model)))
                .value_parser(PossibleValuesParser::new(ModelName::VARIANTS))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::GeminiToken.to_string())
                .long(ConfigKey::GeminiToken.to_string())
                .env("VERDICT_GEMINI_TOKEN")
                .hide_env_values(true)
                .num_args(1)
                .help("Gemini API token. Only held in memory for this run.")
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::GeminiURL.to_string())
                .long(ConfigKey::GeminiURL.to_string())
                .env("VERDICT_GEMINI_URL")
                .num_args(1)
                .help(format!("Gemini API URL. Can be swapped to a compatible proxy. [default: {}]", Config::default(ConfigKey::GeminiURL)))
                .global(true),
        );
}

/// Runs the selected subcommand. `Ok(false)` means it ran but did not succeed,
/// such as a settled validation or remote failure.
pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("analyze", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
            return analyze(subcmd_matches).await;
        }
        Some(("preview", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
            return preview(subcmd_matches).await;
        }
        Some(("models", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
            return list_models().await;
        }
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
            }
            _ => {
                subcommand_config().print_long_help()?;
            }
        },
        _ => {
            build().print_long_help()?;
        }
    }

    return Ok(true);
}
