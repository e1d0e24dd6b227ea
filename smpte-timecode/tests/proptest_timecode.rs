//! Property-based tests for the frame count engine and string codec.
//!
//! Uses proptest to check round trips across every frame rate, subframes
//! base and upper limit.

use proptest::prelude::*;
use smpte_timecode::{
    components_from, frame_count_of, string::decode, Components, FrameCountValue, FrameRate,
    Properties, StringFormat, SubFramesBase, Timecode, TimecodeSource, UpperLimit,
    ValidationRule,
};

fn properties() -> impl Strategy<Value = Properties> {
    (
        0..FrameRate::ALL.len(),
        0..SubFramesBase::ALL.len(),
        any::<bool>(),
    )
        .prop_map(|(rate, base, long)| {
            Properties::new(FrameRate::ALL[rate])
                .with_base(SubFramesBase::ALL[base])
                .with_limit(if long {
                    UpperLimit::Max100Days
                } else {
                    UpperLimit::Max24Hours
                })
        })
}

/// Valid components under random properties.
fn valid_timecode() -> impl Strategy<Value = (Components, Properties)> {
    (
        properties(),
        0i64..100,
        0i64..24,
        0i64..60,
        0i64..60,
        0i64..120,
        0i64..100,
    )
        .prop_map(|(props, d, h, m, s, f, sf)| {
            let rate = props.frame_rate;
            let mut c = Components::new(h, m, s, f % rate.max_frames() as i64)
                .with_days(d % props.upper_limit.max_days() as i64)
                .with_sub_frames(sf % props.sub_frames_base.divisor() as i64);
            let lowest = *c.valid_range(smpte_timecode::Component::Frames, &props).start();
            c.frames = c.frames.max(lowest);
            (c, props)
        })
}

// =============================================================================
// Frame Count Round-Trip Tests
// =============================================================================

proptest! {
    /// Components survive conversion to a frame count and back.
    #[test]
    fn roundtrip_components_frame_count((c, props) in valid_timecode()) {
        prop_assert!(c.is_valid(&props));
        let count = frame_count_of(&c, props.frame_rate, props.sub_frames_base);
        prop_assert!(count.sub_frame_count() >= 0);
        prop_assert!(count.sub_frame_count() <= props.max_sub_frame_count_expressible());
        prop_assert_eq!(components_from(&count, props.frame_rate), c);
    }

    /// Every count in range decomposes into valid components.
    #[test]
    fn frame_count_decomposes_to_valid(props in properties(), seed in any::<u64>()) {
        let total = seed as i128 % props.max_total_sub_frames();
        let count = smpte_timecode::FrameCount::from_sub_frames(total, props.sub_frames_base);
        let c = components_from(&count, props.frame_rate);
        prop_assert!(c.is_valid(&props), "{:?} from {}", c, total);
        prop_assert_eq!(frame_count_of(&c, props.frame_rate, props.sub_frames_base), count);
    }

    /// Later components always count more elapsed frames.
    #[test]
    fn frame_count_is_monotonic(
        (a, props) in valid_timecode(),
        (b, _) in valid_timecode(),
    ) {
        // reinterpret b under a's properties
        let b = Timecode::new(b, props, ValidationRule::ClampingComponents).unwrap();
        let b = *b.components();
        let fa = frame_count_of(&a, props.frame_rate, props.sub_frames_base);
        let fb = frame_count_of(&b, props.frame_rate, props.sub_frames_base);
        prop_assert_eq!(a.cmp(&b), fa.sub_frame_count().cmp(&fb.sub_frame_count()));
    }

    /// Wrapping a full upper limit lands back on the same value.
    #[test]
    fn wrapping_is_modular((c, props) in valid_timecode()) {
        let tc = Timecode::new(c, props, ValidationRule::Exact).unwrap();
        let mut shifted = c;
        shifted.days += props.upper_limit.max_days() as i64;
        let wrapped = Timecode::new(shifted, props, ValidationRule::Wrapping).unwrap();
        prop_assert_eq!(wrapped.components(), tc.components());
    }
}

// =============================================================================
// String Codec Round-Trip Tests
// =============================================================================

proptest! {
    /// Encoded text decodes to the same components.
    #[test]
    fn roundtrip_string(
        (c, props) in valid_timecode(),
        show_sub_frames in any::<bool>(),
        always_show_days in any::<bool>(),
    ) {
        let tc = Timecode::new(c, props, ValidationRule::Exact).unwrap();
        let format = StringFormat { show_sub_frames, always_show_days };
        let text = tc.string_value(format);
        let mut expected = c;
        if !show_sub_frames {
            expected.sub_frames = 0;
        }
        prop_assert_eq!(decode(&text).unwrap(), expected, "{}", text);
    }

    /// The decoder never panics on arbitrary input.
    #[test]
    fn decode_arbitrary_text(text in "\\PC{0,40}") {
        let _ = decode(&text);
    }

    /// Timecode-shaped text with any digit counts parses or fails cleanly.
    #[test]
    fn decode_timecode_shaped(text in "([0-9]{1,22} )?[0-9]{1,22}([:;][0-9]{1,22}){3,5}(\\.[0-9]{1,22})?") {
        if let Err(err) = decode(&text) {
            prop_assert!(err.is_parse_error());
        }
    }
}

// =============================================================================
// Real-Time Round-Trip Tests
// =============================================================================

proptest! {
    /// Real time and sample positions convert back to the same timecode.
    #[test]
    fn roundtrip_real_time((c, props) in valid_timecode()) {
        let tc = Timecode::new(c, props, ValidationRule::Exact).unwrap();
        let back = Timecode::from_real_time(tc.real_time_value(), props).unwrap();
        prop_assert_eq!(back.components(), tc.components());

        // a subframe spans several samples, so the next whole sample is inside it
        let samples = tc.samples_value(48_000).ceil();
        let back = Timecode::from_samples(samples, 48_000, props).unwrap();
        prop_assert_eq!(back.components(), tc.components());
    }

    /// Cross-rate conversion preserves real time to within one subframe.
    #[test]
    fn conversion_preserves_real_time(
        (c, props) in valid_timecode(),
        target in 0..FrameRate::ALL.len(),
    ) {
        let tc = Timecode::new(c, props, ValidationRule::Exact).unwrap();
        let target = FrameRate::ALL[target];
        if let Ok(converted) = tc.converted(target, false) {
            let subframe = 1.0
                / (target.real_time_rate().to_f64() * props.sub_frames_base.divisor() as f64);
            let delta = tc.real_time_value() - converted.real_time_value();
            prop_assert!((-1e-6..subframe + 1e-6).contains(&delta), "{} -> {}", tc, converted);
        }
    }
}

// =============================================================================
// Unbounded Operand Tests
// =============================================================================

fn unbounded_f64() -> impl Strategy<Value = f64> {
    prop_oneof![
        any::<f64>(),
        Just(f64::INFINITY),
        Just(f64::NEG_INFINITY),
        Just(1e300),
        Just(-1e300),
    ]
}

proptest! {
    /// Huge or non-finite float operands either fail cleanly or produce a
    /// valid timecode under the bounding rules.
    #[test]
    fn unbounded_operands_stay_in_range(
        (c, props) in valid_timecode(),
        value in unbounded_f64(),
    ) {
        let tc = Timecode::new(c, props, ValidationRule::Exact).unwrap();
        let operands = [
            TimecodeSource::RealTime(value),
            TimecodeSource::Samples { value, sample_rate: 48_000 },
            TimecodeSource::FrameCount(FrameCountValue::Combined(value)),
        ];
        for operand in operands {
            for rule in [ValidationRule::Wrapping, ValidationRule::Clamping] {
                if let Ok(sum) = tc.adding(operand, rule) {
                    prop_assert!(sum.is_valid(), "{} + {:?}", tc, operand);
                }
                if let Ok(diff) = tc.subtracting(operand, rule) {
                    prop_assert!(diff.is_valid(), "{} - {:?}", tc, operand);
                }
            }
            if let Ok(sum) = tc.adding(operand, ValidationRule::Exact) {
                prop_assert!(sum.is_valid());
            }
        }
    }
}
