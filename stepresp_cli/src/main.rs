mod cli;
mod error_fmt;

use std::fs;
use std::io::Write;
use std::time::Duration;

use clap::Parser;
use eyre::WrapErr;
use stepresp_config::Config;
use stepresp_core::{CycleCfg, GainReply, Kp, ProportionalController, Responder};
use stepresp_link::{SerialTransport, fetch_run};
use stepresp_traits::MonotonicClock;

use cli::{Cli, Command, FetchArgs, TargetArgs};

fn main() {
    let args = Cli::parse();
    if let Err(err) = run(args) {
        eprintln!("{}", error_fmt::humanize(&err));
        std::process::exit(error_fmt::exit_code_for_error(&err));
    }
}

fn run(args: Cli) -> eyre::Result<()> {
    color_eyre::install()?;
    let cfg = load_config(&args)?;
    init_tracing(args.log_level.as_deref().or(cfg.logging.level.as_deref()));

    // A keyboard interrupt is a clean, expected way out of either loop.
    ctrlc::set_handler(|| {
        eprintln!("\nExiting on keyboard interrupt.");
        std::process::exit(130);
    })
    .wrap_err("failed to install interrupt handler")?;

    match args.command {
        Command::Target(t) => run_target(&t, &cfg),
        Command::Fetch(f) => run_fetch(&f, &cfg),
    }
}

fn load_config(args: &Cli) -> eyre::Result<Config> {
    if args.config.exists() {
        let text = fs::read_to_string(&args.config)
            .wrap_err_with(|| format!("failed to read config {}", args.config.display()))?;
        Config::from_toml_str(&text)
            .wrap_err_with(|| format!("invalid config {}", args.config.display()))
    } else {
        Ok(Config::default())
    }
}

fn init_tracing(level: Option<&str>) {
    use tracing_subscriber::EnvFilter;
    let filter = match level {
        Some(l) => EnvFilter::try_new(l).unwrap_or_else(|_| EnvFilter::new("info")),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    // protocol lines own stdout; logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cycle_cfg(t: &TargetArgs, cfg: &Config) -> CycleCfg {
    CycleCfg {
        tick_ms: t.tick_ms.unwrap_or(cfg.control.tick_ms),
        sample_period_ms: t.sample_period_ms.unwrap_or(cfg.control.sample_period_ms),
    }
}

#[cfg(not(feature = "hardware"))]
fn run_target(t: &TargetArgs, cfg: &Config) -> eyre::Result<()> {
    let (motor, encoder) = stepresp_hardware::simulated_pair();
    serve_target(t, cfg, motor, encoder)
}

#[cfg(feature = "hardware")]
fn run_target(t: &TargetArgs, cfg: &Config) -> eyre::Result<()> {
    let motor = stepresp_hardware::rig::PwmMotor::new(t.enable_pin, t.in_a_pin, t.in_b_pin)
        .wrap_err("failed to open motor pins")?;
    let encoder = stepresp_hardware::rig::QuadratureEncoder::new(t.enc_a_pin, t.enc_b_pin)
        .wrap_err("failed to open encoder pins")?;
    serve_target(t, cfg, motor, encoder)
}

fn serve_target<A, E>(t: &TargetArgs, cfg: &Config, motor: A, encoder: E) -> eyre::Result<()>
where
    A: stepresp_traits::Actuator,
    E: stepresp_traits::Encoder,
{
    let cycle = cycle_cfg(t, cfg);
    cycle.validate()?;
    let kp = Kp::new(cfg.control.default_kp)?;
    let setpoint = t.setpoint.unwrap_or(cfg.control.setpoint);
    let controller =
        ProportionalController::new(motor, encoder, kp, setpoint, cycle.data_points());
    let mut responder = Responder::new(controller, cycle, MonotonicClock::new());

    tracing::info!(setpoint, tick_ms = cycle.tick_ms, "serving target responder");
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    responder.serve(stdin.lock(), stdout.lock())
}

fn run_fetch(f: &FetchArgs, cfg: &Config) -> eyre::Result<()> {
    // Host-side gain policy: unusable input silently becomes the config
    // default, usable input is forwarded verbatim.
    let fallback = Kp::new(cfg.control.default_kp)?;
    let reply = GainReply::resolve(&f.kp, fallback);
    tracing::debug!(input = %f.kp, kp = reply.kp().get(), "gain for this fetch");

    let port = f.port.as_deref().unwrap_or(&cfg.serial.port);
    let baud = f.baud.unwrap_or(cfg.serial.baud);
    let timeout = Duration::from_millis(f.read_timeout_ms.unwrap_or(cfg.serial.read_timeout_ms));

    let mut link = SerialTransport::open(port, baud, timeout)?;
    let data = fetch_run(&mut link, reply)?;

    // aligned pairs plus axis labels for the plotting consumer
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "Time (ms),Position (encoder ticks)")?;
    for i in 0..data.len() {
        writeln!(out, "{},{}", data.x[i], data.y[i])?;
    }
    Ok(())
}
