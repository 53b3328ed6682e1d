//! Human-readable error descriptions and stable exit codes.

use stepresp_core::StepError;
use stepresp_link::LinkError;

/// Map an eyre::Report to a short explanation with likely causes and fix hints.
pub fn humanize(err: &eyre::Report) -> String {
    if let Some(se) = err.downcast_ref::<StepError>() {
        return match se {
            StepError::InvalidGain(e) => format!(
                "What happened: the gain input {:?} was rejected; the run loop exited.\nLikely causes: a typo, or a zero/negative value.\nHow to fix: restart and enter a positive nonzero number (e.g. 0.05).",
                e.input
            ),
            StepError::Hardware(msg) => format!(
                "What happened: a hardware fault mid-run ({msg}); the run is compromised.\nLikely causes: wiring, power, or pin configuration.\nHow to fix: check motor/encoder connections and pin numbers, then rerun."
            ),
            StepError::Config(msg) => format!(
                "What happened: invalid timing configuration ({msg}).\nHow to fix: adjust [control] in the config or the corresponding flags."
            ),
            StepError::Io(msg) => format!(
                "What happened: the protocol channel failed ({msg}).\nHow to fix: check the connection and rerun."
            ),
        };
    }

    if let Some(le) = err.downcast_ref::<LinkError>() {
        return match le {
            LinkError::Open { port, source } => format!(
                "What happened: could not open serial port {port} ({source}).\nLikely causes: board not plugged in, wrong --port, or missing permissions.\nHow to fix: check the device path and your group membership (dialout), then rerun."
            ),
            LinkError::Io(e) => format!(
                "What happened: the serial link errored mid-fetch ({e}).\nLikely causes: unplugged cable or a stalled target past the read timeout.\nHow to fix: reconnect the board; raise serial.read_timeout_ms if the target is just slow."
            ),
            LinkError::ChannelClosed => "What happened: the link closed before the End line.\nLikely causes: target reset mid-run or wrong resident program.\nHow to fix: verify the target's main program is flashed, then rerun.".to_string(),
        };
    }

    let mut cause = String::new();
    if let Some(src) = err.source() {
        cause = format!(" Cause: {src}");
    }
    format!("Something went wrong.{cause}\nHow to fix: re-run with --log-level=debug for details. Original: {err}")
}

/// Stable exit codes: 2 invalid gain at the target, 3 link fault, 1 otherwise.
pub fn exit_code_for_error(err: &eyre::Report) -> i32 {
    if let Some(StepError::InvalidGain(_)) = err.downcast_ref::<StepError>() {
        return 2;
    }
    if err.downcast_ref::<LinkError>().is_some() {
        return 3;
    }
    1
}
