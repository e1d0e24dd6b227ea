#![no_main]

//! Fuzz target for timecode text parsing.
//!
//! Tests the decoder on arbitrary text, construction under every validation
//! rule, and the encode/decode roundtrip of whatever parses.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use smpte_timecode::{
    string::decode, FeetAndFrames, FrameRate, Properties, StringFormat, SubFramesBase, Timecode,
    UpperLimit, ValidationRule,
};

#[derive(Arbitrary, Debug)]
struct ParseInput {
    text: String,
    rate: u8,
    base: u8,
    long_limit: bool,
    rule: u8,
}

const RULES: [ValidationRule; 5] = [
    ValidationRule::Exact,
    ValidationRule::Clamping,
    ValidationRule::ClampingComponents,
    ValidationRule::Wrapping,
    ValidationRule::AllowingInvalid,
];

fuzz_target!(|input: ParseInput| {
    if input.text.len() > 256 {
        return;
    }

    let props = Properties::new(FrameRate::ALL[input.rate as usize % FrameRate::ALL.len()])
        .with_base(SubFramesBase::ALL[input.base as usize % SubFramesBase::ALL.len()])
        .with_limit(if input.long_limit {
            UpperLimit::Max100Days
        } else {
            UpperLimit::Max24Hours
        });
    let rule = RULES[input.rule as usize % RULES.len()];

    // Should never panic
    let _ = decode(&input.text);
    let _ = FeetAndFrames::parse(&input.text, props.sub_frames_base);
    let _ = input.text.parse::<FrameRate>();

    if let Ok(tc) = Timecode::new(input.text.as_str(), props, rule) {
        let _ = tc.frame_count();
        let _ = tc.real_time_value();
        let _ = tc.feet_and_frames();

        if tc.is_valid() && tc.components().sub_frames < i64::from(props.sub_frames_base.divisor()) {
            let text = tc.string_value(StringFormat::with_sub_frames());
            let back = decode(&text).expect("encoded timecode must decode");
            assert_eq!(&back, tc.components(), "roundtrip of {text:?}");
        }
    }
});
