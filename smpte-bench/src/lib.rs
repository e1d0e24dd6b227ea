//! Benchmark fixtures for smpte-timecode
//!
//! Deterministic timecode sets shared by the criterion benches.

use smpte_timecode::{
    FrameCountValue, FrameRate, Properties, StringFormat, SubFramesBase, Timecode, UpperLimit,
    ValidationRule,
};

/// Rates covering each drop-frame family plus common non-drop rates.
pub const RATES: &[(FrameRate, &str)] = &[
    (FrameRate::Fps23_976, "23.976"),
    (FrameRate::Fps25, "25"),
    (FrameRate::Fps29_97Drop, "29.97d"),
    (FrameRate::Fps59_94Drop, "59.94d"),
    (FrameRate::Fps119_88Drop, "119.88d"),
];

/// 100-day properties with 80 subframes per frame at `rate`.
pub fn properties(rate: FrameRate) -> Properties {
    Properties::new(rate)
        .with_base(SubFramesBase::Max80)
        .with_limit(UpperLimit::Max100Days)
}

/// `count` valid timecodes spread evenly over the whole range at `rate`.
pub fn spread(rate: FrameRate, count: usize) -> Vec<Timecode> {
    let props = properties(rate);
    let base = i64::from(props.sub_frames_base.divisor());
    let step = (props.max_total_sub_frames() / count.max(1) as i128) as i64;
    (0..count as i64)
        .filter_map(|i| {
            // odd offset so subframes and drop windows are not always zero
            let total = i * step + i * 7919;
            let value = FrameCountValue::Split {
                frames: total / base,
                sub_frames: total % base,
            };
            Timecode::new(value, props, ValidationRule::Wrapping).ok()
        })
        .collect()
}

/// Formatted text of `timecodes`, with subframes.
pub fn texts(timecodes: &[Timecode]) -> Vec<String> {
    timecodes
        .iter()
        .map(|tc| tc.string_value(StringFormat::with_sub_frames().always_showing_days()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spread_is_valid_and_ordered() {
        for &(rate, _) in RATES {
            let timecodes = spread(rate, 64);
            assert_eq!(timecodes.len(), 64);
            assert!(timecodes.iter().all(Timecode::is_valid));
            assert!(timecodes.windows(2).all(|w| w[0] < w[1]), "{rate}");
        }
    }

    #[test]
    fn test_texts_parse_back() {
        let timecodes = spread(FrameRate::Fps29_97Drop, 16);
        for (tc, text) in timecodes.iter().zip(texts(&timecodes)) {
            let back = Timecode::from_components(text.parse().unwrap(), *tc.properties()).unwrap();
            assert_eq!(&back, tc);
        }
    }
}
