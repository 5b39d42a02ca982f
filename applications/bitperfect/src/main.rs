/// Soul Bit-Perfect - inspect whether a file would reach the DAC untouched
use anyhow::Context;
use clap::{Parser, Subcommand};
use soul_bitperfect::{report, BitPerfectConfig, BitPerfectError};
use soul_core::DeviceId;
use soul_playback::{PlaybackEngine, PlaybackEvent};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "soul-bitperfect")]
#[command(about = "Bit-perfect playback checker", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./bitperfect.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List output devices
    Devices,
    /// Load a file and report the bit-perfect verdict
    Check {
        /// Audio file
        file: PathBuf,
        /// Output device id
        #[arg(short, long)]
        device: Option<String>,
        /// Use shared (mixer) mode instead of exclusive mode
        #[arg(long)]
        shared: bool,
        /// Print the verdict as JSON
        #[arg(long)]
        json: bool,
    },
    /// Play a file on the simulated clock and print session events
    Play {
        /// Audio file
        file: PathBuf,
        /// Output device id
        #[arg(short, long)]
        device: Option<String>,
        /// Use shared (mixer) mode instead of exclusive mode
        #[arg(long)]
        shared: bool,
        /// Initial volume in [0, 1]
        #[arg(long)]
        volume: Option<f32>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "soul_bitperfect=info,soul_playback=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config =
        BitPerfectConfig::load(cli.config.as_deref()).context("failed to load configuration")?;

    match cli.command {
        Commands::Devices => {
            let engine = build_engine(config)?;
            let current = engine.current_device().map(|d| d.id);
            let devices = engine.get_audio_devices();
            if devices.is_empty() {
                println!("No output devices found");
            }
            for device in &devices {
                let is_current = current.as_ref() == Some(&device.id);
                println!("{}", report::device_line(device, is_current));
            }
        }
        Commands::Check {
            file,
            device,
            shared,
            json,
        } => {
            if shared {
                config.engine.exclusive_mode = false;
            }
            let engine = build_engine(config)?;
            select_device(&engine, device)?;

            engine
                .load(&file)
                .await
                .with_context(|| format!("failed to load {}", file.display()))?;

            let verdict = engine.get_bit_perfect_status();
            if json {
                println!("{}", serde_json::to_string_pretty(&verdict)?);
            } else {
                if let Some(characteristics) = engine.snapshot().characteristics {
                    println!(
                        "{}: {}",
                        file.display(),
                        report::characteristics_line(&characteristics)
                    );
                }
                println!("{}", report::verdict_block(&verdict));
            }
            engine.shutdown();
        }
        Commands::Play {
            file,
            device,
            shared,
            volume,
        } => {
            if shared {
                config.engine.exclusive_mode = false;
            }
            if let Some(volume) = volume {
                config.engine.initial_volume = volume;
            }
            let engine = build_engine(config)?;
            select_device(&engine, device)?;
            play(engine, file).await?;
        }
    }

    Ok(())
}

fn build_engine(config: BitPerfectConfig) -> anyhow::Result<PlaybackEngine> {
    config.validate()?;
    let host = soul_audio_desktop::create_host(config.output.backend)
        .map_err(BitPerfectError::from)?;
    tracing::debug!("Using {} output backend", config.output.backend.name());
    Ok(PlaybackEngine::with_symphonia(config.engine, host)?)
}

fn select_device(engine: &PlaybackEngine, device: Option<String>) -> anyhow::Result<()> {
    if let Some(device) = device {
        if !engine.set_device(&DeviceId::new(device.as_str())) {
            return Err(BitPerfectError::UnknownDevice(device).into());
        }
    }
    Ok(())
}

async fn play(engine: PlaybackEngine, file: PathBuf) -> anyhow::Result<()> {
    // Subscribe before loading so the fileLoaded event is not missed
    let events = engine.subscribe();

    let printer = tokio::task::spawn_blocking(move || {
        for event in events.iter() {
            if let Some(line) = report::event_line(&event) {
                println!("{line}");
            }
            if matches!(event, PlaybackEvent::Ended { .. }) {
                break;
            }
        }
    });

    if let Err(e) = engine.play_file(&file).await {
        engine.shutdown();
        drop(engine);
        let _ = printer.await;
        return Err(e).with_context(|| format!("failed to play {}", file.display()));
    }

    tokio::select! {
        result = printer => {
            result.context("event printer panicked")?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Interrupted, stopping playback");
            engine.stop();
        }
    }

    engine.shutdown();
    Ok(())
}
