//! Line vocabulary of the serial protocol, shared by the target responder
//! and the host initiator.
//!
//! No binary framing: everything is newline-delimited ASCII. A run is one
//! prompt line, the host's gain reply, then `time,position` data lines
//! closed by the terminator line.

use crate::sample::Sample;

/// Exact prompt the target prints before reading a gain line.
pub const PROMPT: &str =
    "Input the desired float type Kp value (control gain value) for the next sample:";

/// Exact sentinel closing one run's data stream.
pub const TERMINATOR: &str = "End";

/// Stops whatever program is currently executing on the target.
pub const INTERRUPT: u8 = 0x03;
/// Places the target into its base interactive mode.
pub const RAW_MODE: u8 = 0x02;
/// Forces a soft reboot so the resident program starts fresh.
pub const SOFT_REBOOT: u8 = 0x04;

/// Render one sample as a protocol data line (no terminator).
pub fn format_data_line(sample: Sample) -> String {
    format!("{},{}", sample.elapsed_ms, sample.position)
}

/// Tolerant data-line parse: split on commas, require at least two numeric
/// fields, ignore any extras. Returns None for anything else; callers log
/// and discard those lines rather than failing the run.
pub fn parse_data_line(line: &str) -> Option<(f64, f64)> {
    let mut fields = line.split(',');
    let x = fields.next()?.trim().parse::<f64>().ok()?;
    let y = fields.next()?.trim().parse::<f64>().ok()?;
    Some((x, y))
}
