#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Both sides of the wire vocabulary must shrug at arbitrary lines.
    let _ = stepresp_core::wire::parse_data_line(data);
    let _ = stepresp_core::Kp::parse(data);
    let _ = stepresp_core::Kp::parse_or_default(data);
});
