mod tests {
    use scene_dimmer::fade::{converge, fade_delta};
    use scene_dimmer::{Channel, ChannelBank, DutyOutput};

    /// Output double that records every duty write.
    #[derive(Default)]
    struct RecordingOutput {
        writes: Vec<(usize, u16)>,
    }

    impl DutyOutput for RecordingOutput {
        fn set_duty(&mut self, index: usize, duty: u16) {
            self.writes.push((index, duty));
        }
    }

    fn bank_of(channels: &[(&'static str, u8, u8)]) -> ChannelBank<8> {
        let mut bank = ChannelBank::new();
        for &(name, actual, desired) in channels {
            let mut channel = Channel::at_level(name, actual);
            channel.set_desired(i16::from(desired));
            bank.add(channel).unwrap();
        }
        bank
    }

    #[test]
    fn test_fade_delta_policy() {
        assert_eq!(fade_delta(0, 255), 2);
        assert_eq!(fade_delta(253, 255), 2);
        assert_eq!(fade_delta(254, 255), 1);
        assert_eq!(fade_delta(0, 1), 1);
        assert_eq!(fade_delta(255, 0), -1);
        assert_eq!(fade_delta(1, 0), -1);
        assert_eq!(fade_delta(128, 128), 0);
        assert_eq!(fade_delta(255, 254), -1);
    }

    #[test]
    fn test_convergence_terminates_for_all_pairs() {
        // Every (actual, desired) pair must settle in at most 255 ticks
        // without ever crossing past the target.
        for actual in 0..=255u8 {
            for desired in 0..=255u8 {
                let rising = desired > actual;
                let mut channel = Channel::at_level("x", actual);
                channel.set_desired(i16::from(desired));

                let mut ticks = 0;
                while !channel.is_settled() {
                    let delta = fade_delta(channel.actual(), channel.desired());
                    assert_ne!(delta, 0, "unsettled channel must step");
                    channel.set_actual(i16::from(channel.actual()) + i16::from(delta));

                    if rising {
                        assert!(channel.actual() <= desired);
                    } else {
                        assert!(channel.actual() >= desired);
                    }

                    ticks += 1;
                    assert!(ticks <= 255, "no convergence for {actual} -> {desired}");
                }

                assert_eq!(fade_delta(channel.actual(), channel.desired()), 0);
            }
        }
    }

    #[test]
    fn test_fast_rise_sequence() {
        // 0 -> 255 rises by 2 per tick, with a final +1 step: 0,2,...,254,255.
        let mut bank = bank_of(&[("a", 0, 255)]);
        let mut output = RecordingOutput::default();

        let mut levels = vec![bank.find("a").unwrap().1.actual()];
        while converge(&mut bank, &mut output) > 0 {
            levels.push(bank.find("a").unwrap().1.actual());
        }

        let mut expected: Vec<u8> = (0..=254).step_by(2).collect();
        expected.push(255);
        assert_eq!(levels, expected);
        assert_eq!(output.writes.len(), 128);
    }

    #[test]
    fn test_slow_fall_sequence() {
        // 100 -> 0 falls by exactly 1 per tick: 100 ticks.
        let mut bank = bank_of(&[("b", 100, 0)]);
        let mut output = RecordingOutput::default();

        let mut previous = 100;
        let mut ticks = 0;
        while converge(&mut bank, &mut output) > 0 {
            let actual = bank.find("b").unwrap().1.actual();
            assert_eq!(actual, previous - 1);
            previous = actual;
            ticks += 1;
        }

        assert_eq!(ticks, 100);
        assert_eq!(bank.find("b").unwrap().1.actual(), 0);
    }

    #[test]
    fn test_settled_channels_get_no_writes() {
        let mut bank = bank_of(&[("a", 40, 40), ("b", 10, 12)]);
        let mut output = RecordingOutput::default();

        assert_eq!(converge(&mut bank, &mut output), 1);
        // Only channel "b" (index 1) was touched.
        assert!(output.writes.iter().all(|(index, _)| *index == 1));

        assert_eq!(converge(&mut bank, &mut output), 0);
        assert_eq!(output.writes.len(), 1);
    }

    #[test]
    fn test_converge_steps_all_pending_channels() {
        let mut bank = bank_of(&[("a", 0, 10), ("b", 20, 20), ("c", 30, 0)]);
        let mut output = RecordingOutput::default();

        assert_eq!(converge(&mut bank, &mut output), 2);
        assert_eq!(bank.find("a").unwrap().1.actual(), 2);
        assert_eq!(bank.find("b").unwrap().1.actual(), 20);
        assert_eq!(bank.find("c").unwrap().1.actual(), 29);
    }
}
