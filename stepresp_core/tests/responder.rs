use std::io::Cursor;

use stepresp_core::mocks::{ScriptEncoder, SpyActuator};
use stepresp_core::{CycleCfg, Kp, ProportionalController, Responder, StepError, wire};
use stepresp_traits::clock::test_clock::TestClock;

fn make_responder(
    encoder: ScriptEncoder,
    cfg: CycleCfg,
) -> Responder<SpyActuator, ScriptEncoder, TestClock> {
    let ctrl = ProportionalController::new(
        SpyActuator::default(),
        encoder,
        Kp::new(1.0).expect("valid gain"),
        100,
        cfg.data_points(),
    );
    Responder::new(ctrl, cfg, TestClock::new())
}

fn serve_to_string(responder: &mut Responder<SpyActuator, ScriptEncoder, TestClock>, input: &str) -> (Result<(), eyre::Report>, Vec<String>) {
    let mut out = Vec::new();
    let result = responder.serve(Cursor::new(input.as_bytes()), &mut out);
    let text = String::from_utf8(out).expect("ascii output");
    (result, text.lines().map(str::to_string).collect())
}

#[test]
fn one_run_prints_prompt_samples_and_terminator() {
    let cfg = CycleCfg {
        tick_ms: 10,
        sample_period_ms: 30,
    };
    let mut responder = make_responder(ScriptEncoder::new([0, 40, 70]), cfg);
    let (result, lines) = serve_to_string(&mut responder, "0.5\r\n");
    result.expect("clean eof exit");

    assert_eq!(lines[0], wire::PROMPT);
    assert_eq!(lines[1], "0,0");
    assert_eq!(lines[2], "10,40");
    assert_eq!(lines[3], "20,70");
    assert_eq!(lines[4], wire::TERMINATOR);
    // loops back and prompts again before hitting EOF
    assert_eq!(lines[5], wire::PROMPT);
    assert_eq!(lines.len(), 6);
}

#[test]
fn invalid_gain_is_terminal_and_names_the_literal() {
    let cfg = CycleCfg {
        tick_ms: 10,
        sample_period_ms: 20,
    };
    let mut responder = make_responder(ScriptEncoder::new([0]), cfg);
    let (result, lines) = serve_to_string(&mut responder, "not-a-number\r\n0.5\r\n");
    let err = result.unwrap_err();
    match err.downcast_ref::<StepError>() {
        Some(StepError::InvalidGain(e)) => assert_eq!(e.input, "not-a-number"),
        other => panic!("unexpected error shape: {other:?}"),
    }
    // nothing ran: only the prompt was written
    assert_eq!(lines, vec![wire::PROMPT.to_string()]);
}

#[rstest::rstest]
#[case("-0.5\r\n")]
#[case("0\r\n")]
#[case("\r\n")]
#[case("1e999\r\n")] // overflows f32 to infinity
fn non_positive_gain_is_rejected_like_garbage(#[case] input: &str) {
    let cfg = CycleCfg {
        tick_ms: 10,
        sample_period_ms: 20,
    };
    let mut responder = make_responder(ScriptEncoder::new([0]), cfg);
    let (result, _) = serve_to_string(&mut responder, input);
    assert!(result.is_err());
}

#[test]
fn consecutive_runs_restart_from_a_cleared_buffer() {
    let cfg = CycleCfg {
        tick_ms: 10,
        sample_period_ms: 20,
    };
    let mut responder = make_responder(ScriptEncoder::new([0, 10, 10, 15]), cfg);
    let (result, lines) = serve_to_string(&mut responder, "1.0\r\n1.0\r\n");
    result.expect("clean eof exit");

    let terminators = lines.iter().filter(|l| *l == wire::TERMINATOR).count();
    assert_eq!(terminators, 2);
    // each run emitted exactly data_points() data lines
    let data_lines = lines
        .iter()
        .filter(|l| wire::parse_data_line(l).is_some())
        .count();
    assert_eq!(data_lines, 2 * cfg.data_points());
}

#[test]
fn actuator_rests_at_zero_between_runs() {
    let cfg = CycleCfg {
        tick_ms: 10,
        sample_period_ms: 20,
    };
    let mut responder = make_responder(ScriptEncoder::new([0]), cfg);
    let (result, _) = serve_to_string(&mut responder, "");
    result.expect("clean eof exit");
    // zero duty was commanded before the first prompt
    assert_eq!(responder.controller_ref().actuator_ref().duties, vec![0.0]);
}
