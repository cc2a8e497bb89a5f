mod tests {
    use embassy_time::{Duration, Instant};
    use scene_dimmer::TriggerDebouncer;

    const SETTLE: Duration = Duration::from_millis(200);

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    #[test]
    fn test_single_press_fires_once() {
        let mut debouncer = TriggerDebouncer::with_settle(SETTLE);

        assert!(!debouncer.poll(false, at(0)));
        assert!(debouncer.is_armed());

        assert!(debouncer.poll(true, at(10)));
        // Held down: no second event, no matter how long.
        assert!(!debouncer.poll(true, at(50)));
        assert!(!debouncer.poll(true, at(5000)));
    }

    #[test]
    fn test_rearms_after_settled_release() {
        let mut debouncer = TriggerDebouncer::with_settle(SETTLE);
        debouncer.poll(false, at(0));
        assert!(debouncer.poll(true, at(10)));

        // Released, but the settle window has not elapsed yet.
        assert!(!debouncer.poll(false, at(100)));
        assert!(!debouncer.is_armed());

        // Past the settle window: re-armed, next press fires.
        assert!(!debouncer.poll(false, at(300)));
        assert!(debouncer.is_armed());
        assert!(debouncer.poll(true, at(310)));
    }

    #[test]
    fn test_release_bounce_does_not_rearm() {
        let mut debouncer = TriggerDebouncer::with_settle(SETTLE);
        debouncer.poll(false, at(0));
        assert!(debouncer.poll(true, at(10)));

        // Bouncing on release: brief released samples inside the settle
        // window, then pressed again. Still the same physical press.
        assert!(!debouncer.poll(false, at(50)));
        assert!(!debouncer.poll(true, at(60)));
        assert!(!debouncer.poll(false, at(100)));
        assert!(!debouncer.poll(true, at(120)));

        // Clean release, then a new press: exactly one more event.
        assert!(!debouncer.poll(false, at(400)));
        assert!(debouncer.poll(true, at(410)));
    }

    #[test]
    fn test_pressed_at_boot_does_not_fire() {
        let mut debouncer = TriggerDebouncer::with_settle(SETTLE);

        // Line already held when polling starts.
        assert!(!debouncer.poll(true, at(0)));
        assert!(!debouncer.poll(true, at(100)));

        // Must be released for a full settle window before arming.
        assert!(!debouncer.poll(false, at(150)));
        assert!(!debouncer.is_armed());
        assert!(!debouncer.poll(false, at(350)));
        assert!(debouncer.is_armed());

        assert!(debouncer.poll(true, at(360)));
    }

    #[test]
    fn test_no_press_never_fires() {
        let mut debouncer = TriggerDebouncer::with_settle(SETTLE);
        for ms in (0..10_000).step_by(10) {
            assert!(!debouncer.poll(false, at(ms)));
        }
    }
}
