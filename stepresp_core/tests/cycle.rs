use std::time::Duration;

use stepresp_core::mocks::{ScriptEncoder, SpyActuator};
use stepresp_core::{CycleCfg, Kp, ProportionalController, run_cycle};
use stepresp_traits::clock::test_clock::TestClock;
use stepresp_traits::{Clock, Encoder};

fn kp(v: f32) -> Kp {
    Kp::new(v).expect("valid gain")
}

#[test]
fn runs_exactly_n_ticks_with_nominal_timestamps() {
    let cfg = CycleCfg {
        tick_ms: 10,
        sample_period_ms: 50,
    };
    let clock = TestClock::new();
    let mut ctrl = ProportionalController::new(
        SpyActuator::default(),
        ScriptEncoder::new([0]),
        kp(1.0),
        100,
        cfg.data_points(),
    );

    let report = run_cycle(&mut ctrl, cfg, &clock).expect("run ok");
    assert_eq!(report.samples.len(), 5);
    assert_eq!(report.missed_deadlines, 0);
    // sleeps land exactly on each deadline, so timestamps are nominal
    let times: Vec<u64> = report.samples.iter().map(|s| s.elapsed_ms).collect();
    assert_eq!(times, vec![0, 10, 20, 30, 40]);
}

#[test]
fn actuator_is_zeroed_after_the_run() {
    let cfg = CycleCfg {
        tick_ms: 10,
        sample_period_ms: 30,
    };
    let clock = TestClock::new();
    let mut ctrl = ProportionalController::new(
        SpyActuator::default(),
        ScriptEncoder::new([0]),
        kp(0.5),
        200,
        cfg.data_points(),
    );
    run_cycle(&mut ctrl, cfg, &clock).expect("run ok");

    // 3 tick commands plus the final zero command
    let duties = &ctrl.actuator_ref().duties;
    assert_eq!(duties.len(), 4);
    assert_eq!(*duties.last().unwrap(), 0.0);
}

/// Encoder whose read costs more than one tick period on the shared test
/// clock, so every deadline has already passed when the sleep is computed.
struct SlowEncoder {
    inner: ScriptEncoder,
    clock: TestClock,
    cost: Duration,
}

impl Encoder for SlowEncoder {
    fn read(&mut self) -> Result<i32, Box<dyn std::error::Error + Send + Sync>> {
        self.clock.advance(self.cost);
        self.inner.read()
    }

    fn zero(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.inner.zero()
    }
}

#[test]
fn late_ticks_are_counted_not_fatal() {
    let cfg = CycleCfg {
        tick_ms: 10,
        sample_period_ms: 40,
    };
    let clock = TestClock::new();
    let encoder = SlowEncoder {
        inner: ScriptEncoder::new([0]),
        clock: clock.clone(),
        cost: Duration::from_millis(25),
    };
    let mut ctrl = ProportionalController::new(
        SpyActuator::default(),
        encoder,
        kp(1.0),
        50,
        cfg.data_points(),
    );

    let report = run_cycle(&mut ctrl, cfg, &clock).expect("run ok");
    // every sleep target was already in the past
    assert_eq!(report.missed_deadlines, 4);
    assert_eq!(report.samples.len(), 4);
    // timestamps still monotonically increase under drift
    for pair in report.samples.windows(2) {
        assert!(pair[1].elapsed_ms > pair[0].elapsed_ms);
    }
}

#[test]
fn invalid_cfg_aborts_before_touching_hardware() {
    let cfg = CycleCfg {
        tick_ms: 0,
        sample_period_ms: 1000,
    };
    let clock = TestClock::new();
    let mut ctrl = ProportionalController::new(
        SpyActuator::default(),
        ScriptEncoder::new([0]),
        kp(1.0),
        0,
        10,
    );
    assert!(run_cycle(&mut ctrl, cfg, &clock).is_err());
    assert!(ctrl.actuator_ref().duties.is_empty());
}

#[test]
fn test_clock_sleep_until_reports_past_deadlines() {
    let clock = TestClock::new();
    let then = clock.now();
    clock.advance(Duration::from_millis(5));
    assert!(!clock.sleep_until(then));
    assert!(clock.sleep_until(then + Duration::from_millis(20)));
    assert_eq!(clock.ms_since(then), 20);
}
