use {
    parrot::{Parrot, ParrotConfig},
    std::{
        fs::OpenOptions,
        io::{BufWriter, Write},
    },
};

const FEATURES_PATH: &str = "feat.dat";

// frames between health polls
const CHECK_INTERVAL: usize = 30;

fn main() -> anyhow::Result<()> {
    base::init_stdout_logger();

    // usage: parrot-features [address] [frames]
    let mut args = std::env::args().skip(1);
    let mut config = ParrotConfig::default();
    if let Some(address) = args.next() {
        config = config.with_address(address);
    }
    let frames: Option<usize> = args.next().map(|n| n.parse()).transpose()?;

    log::info!("connecting to {}", config.address());
    let mut parrot = Parrot::connect(config)?;

    // land and close whatever way the run ends
    let result = run(&mut parrot, frames);
    if let Err(err) = parrot.land() {
        log::error!("landing failed: {err}");
    }
    parrot.close();
    result
}

fn run(parrot: &mut Parrot, frames: Option<usize>) -> anyhow::Result<()> {
    parrot.init_feature_extraction(vision::default_extractors())?;

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(FEATURES_PATH)?;
    let mut out = BufWriter::new(file);

    let mut count = 0usize;
    while frames.is_none_or(|frames| count < frames) {
        parrot.get_frame()?;
        let sample = parrot.get_telemetry()?;

        match parrot.visual_features() {
            Ok(features) => {
                for row in features.data.chunks(features.cols()) {
                    let line: Vec<String> = row.iter().map(|v| format!("{v:e}")).collect();
                    writeln!(out, "{}", line.join(" "))?;
                }
            }
            Err(err) if !err.is_fatal() => log::warn!("frame {count}: {err}"),
            Err(err) => return Err(err.into()),
        }

        count += 1;
        if count % CHECK_INTERVAL == 0 {
            let video = parrot.check_video()?;
            let telemetry = parrot.check_telemetry()?;
            let commands = parrot.check_commands()?;
            log::info!(
                "{count} frames, battery {}%, alive: video {video}, telemetry {telemetry}, commands {commands}",
                sample.battery
            );
            if !(video && telemetry && commands) {
                break;
            }
        }
    }

    out.flush()?;
    log::info!("done after {count} frames");
    Ok(())
}
