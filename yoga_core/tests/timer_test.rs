use std::time::Duration;

use yoga_core::time::timer::IntervalTimer;

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

#[test]
fn test_unarmed_timer_never_fires() {
    let mut timer = IntervalTimer::new(ms(100));
    assert!(!timer.is_armed());
    assert_eq!(timer.poll(ms(10_000)), 0);
}

#[test]
fn test_fires_once_per_period() {
    let mut timer = IntervalTimer::new(ms(1000));
    timer.arm(ms(500));
    assert_eq!(timer.next_due(), Some(ms(1500)));

    assert_eq!(timer.poll(ms(1499)), 0);
    assert_eq!(timer.poll(ms(1500)), 1);
    assert_eq!(timer.poll(ms(1500)), 0);
    assert_eq!(timer.poll(ms(2600)), 1);
    assert_eq!(timer.next_due(), Some(ms(3500)));
}

#[test]
fn test_catches_up_after_a_stall() {
    let mut timer = IntervalTimer::new(ms(100));
    timer.arm(ms(0));
    assert_eq!(timer.poll(ms(350)), 3);
    assert_eq!(timer.poll(ms(400)), 1);
}

#[test]
fn test_cancel_is_idempotent_and_rearm_restarts() {
    let mut timer = IntervalTimer::new(ms(100));
    timer.arm(ms(0));
    timer.cancel();
    timer.cancel();
    assert!(!timer.is_armed());
    assert_eq!(timer.poll(ms(1000)), 0);

    timer.arm(ms(1000));
    assert_eq!(timer.poll(ms(1050)), 0);
    assert_eq!(timer.poll(ms(1100)), 1);
}

#[test]
fn test_zero_period_does_not_spin() {
    let mut timer = IntervalTimer::new(Duration::ZERO);
    timer.arm(ms(0));
    assert_eq!(timer.poll(ms(100)), 0);
}
