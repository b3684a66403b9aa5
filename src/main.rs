//! Portal - speed-dial for gates and intercoms

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use portal::codec::{build_dial_string, build_tone_schedule, ToneSchedule};
use portal::config::{self, PortalConfig};
use portal::engine::{self, CpalBackend, PreviewOutcome, ToneSynthesizer};
use portal::gate::{Gate, GateBook, GateDraft};
use portal::store::JsonFileStore;
use portal::telephony::{Launcher, PrintLauncher, SystemLauncher};

mod cli;

use cli::{Cli, Commands, GateChanges, ToneTarget};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::List => {
            let cfg = config::load_config_or_default(&cli.config)?;
            let book = open_book(&cfg);

            if book.is_empty() {
                println!("No gates yet. Add one with `portal add`.");
                return Ok(());
            }

            for gate in book.gates() {
                println!("{} ({})", gate.name, gate.color);
                println!("  id:   {}", gate.id);
                println!("  dial: {}", build_dial_string(gate));
            }
        }

        Commands::Add {
            name,
            phone,
            code,
            delay,
            color,
        } => {
            let cfg = config::load_config_or_default(&cli.config)?;
            let mut book = open_book(&cfg);

            let draft = GateDraft {
                name,
                phone,
                code,
                delay,
                color: color.unwrap_or_default(),
            };
            let gate = book.create(&draft)?;
            println!("Added {} ({})", gate.name, gate.id);
        }

        Commands::Edit { gate, changes } => {
            let cfg = config::load_config_or_default(&cli.config)?;
            let mut book = open_book(&cfg);

            let existing = find_gate(&book, &gate)?;
            let id = existing.id.clone();
            let draft = apply_changes(GateDraft::from(existing), changes);

            let updated = book.update(&id, &draft)?;
            println!("Updated {}", updated.name);
        }

        Commands::Remove { gate } => {
            let cfg = config::load_config_or_default(&cli.config)?;
            let mut book = open_book(&cfg);

            let id = find_gate(&book, &gate)?.id.clone();
            let removed = book.delete(&id)?;
            println!("Removed {}", removed.name);
        }

        Commands::Dial { gate, print, preview } => {
            let cfg = config::load_config_or_default(&cli.config)?;
            let book = open_book(&cfg);
            let gate = find_gate(&book, &gate)?;

            if preview {
                // Dialing does not depend on audio
                play_and_wait(&cfg, &build_tone_schedule(&gate.code));
            }

            let dial = build_dial_string(gate);
            if print {
                PrintLauncher.launch(&dial)?;
            } else {
                let launcher = match &cfg.telephony.command {
                    Some(command) => SystemLauncher::with_command(command),
                    None => SystemLauncher::new(),
                };
                println!("Calling {}...", gate.name);
                launcher.launch(&dial)?;
            }
        }

        Commands::Preview { target } => {
            let cfg = config::load_config_or_default(&cli.config)?;
            let code = resolve_code(&cfg, target)?;
            let schedule = build_tone_schedule(&code);

            if schedule.is_empty() {
                println!("Nothing to play.");
                return Ok(());
            }

            println!("Playing {} ({:.2}s)...", code, schedule.total_ms() as f64 / 1000.0);
            play_and_wait(&cfg, &schedule);
        }

        Commands::Render {
            target,
            output,
            sample_rate,
        } => {
            let cfg = config::load_config_or_default(&cli.config)?;
            let sample_rate = sample_rate.unwrap_or(cfg.audio.sample_rate);
            let code = resolve_code(&cfg, target)?;

            let written = engine::render_to_wav(&build_tone_schedule(&code), &output, sample_rate)?;
            println!(
                "Rendered {} to {:?} ({:.2}s at {} Hz)",
                code,
                output,
                written as f64 / sample_rate as f64,
                sample_rate
            );
        }

        Commands::Devices => {
            println!("Available audio output devices:\n");

            match CpalBackend::output_devices() {
                Ok(devices) if devices.is_empty() => {
                    println!("  (none found, tone preview is unavailable)");
                }
                Ok(devices) => {
                    for device in devices {
                        println!(
                            "  - {} ({} Hz, {} ch){}",
                            device.name,
                            device.sample_rate,
                            device.channels,
                            if device.is_default { " [default]" } else { "" }
                        );
                    }
                }
                Err(e) => println!("  Error listing devices: {}", e),
            }
        }

        Commands::Check => {
            println!("Checking configuration at {:?}...", cli.config);

            match config::load_config(&cli.config) {
                Ok(cfg) => {
                    println!("Configuration is valid!");
                    println!("  Sample rate: {} Hz", cfg.audio.sample_rate);
                    println!(
                        "  Output device: {}",
                        cfg.audio.device.as_deref().unwrap_or("(default)")
                    );
                    println!("  Gate file: {:?}", cfg.storage.resolve_path());
                    println!("  Default color: {}", cfg.gates.default_color);
                    println!("  Double tap: {} ms", cfg.gestures.double_tap_ms);
                    println!("  Long press: {} ms", cfg.gestures.long_press_ms);
                    println!(
                        "  Launcher: {}",
                        cfg.telephony.command.as_deref().unwrap_or("(platform default)")
                    );
                }
                Err(e) => {
                    println!("Configuration is invalid: {:#}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Init => {
            let example_config = include_str!("../portal.example.yaml");

            if cli.config.exists() {
                println!("{:?} already exists. Not overwriting.", cli.config);
            } else {
                std::fs::write(&cli.config, example_config)
                    .with_context(|| format!("failed to write {:?}", cli.config))?;
                println!("Created {:?} with example configuration.", cli.config);
            }
        }
    }

    Ok(())
}

fn open_book(cfg: &PortalConfig) -> GateBook {
    let store = JsonFileStore::new(cfg.storage.resolve_path());
    GateBook::open(store).with_default_color(cfg.gates.default_color.clone())
}

fn find_gate<'a>(book: &'a GateBook, query: &str) -> Result<&'a Gate> {
    book.find(query).ok_or_else(|| anyhow!("no gate matching {:?}", query))
}

fn apply_changes(mut draft: GateDraft, changes: GateChanges) -> GateDraft {
    if let Some(name) = changes.name {
        draft.name = name;
    }
    if let Some(phone) = changes.phone {
        draft.phone = phone;
    }
    if let Some(code) = changes.code {
        draft.code = code;
    }
    if let Some(delay) = changes.delay {
        draft.delay = delay;
    }
    if let Some(color) = changes.color {
        draft.color = color;
    }
    draft
}

fn resolve_code(cfg: &PortalConfig, target: ToneTarget) -> Result<String> {
    match (target.gate, target.code) {
        (_, Some(code)) => Ok(code),
        (Some(query), None) => {
            let book = open_book(cfg);
            Ok(find_gate(&book, &query)?.code.clone())
        }
        (None, None) => bail!("give a gate or --code"),
    }
}

/// Play through the sound card and block until the schedule has finished.
/// Missing audio is only a notice.
fn play_and_wait(cfg: &PortalConfig, schedule: &ToneSchedule) {
    let mut synth = ToneSynthesizer::new(CpalBackend::new(cfg.audio.device.clone()));

    if let PreviewOutcome::Unavailable(e) = engine::preview_blocking(&mut synth, schedule) {
        println!("Tone preview unavailable: {}", e);
    }
}
