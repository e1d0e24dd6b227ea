#![no_main]

//! Fuzz target for timecode arithmetic and conversion.
//!
//! Tests construction from raw frame counts, seconds and sample positions,
//! the arithmetic operations, and cross-rate conversion. Wrapped results
//! must always be valid, and huge or non-finite float operands must never
//! panic.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use smpte_timecode::{
    FrameCountValue, FrameRate, Properties, Timecode, TimecodeSource, ValidationRule,
};

#[derive(Arbitrary, Debug)]
struct MathInput {
    rate: u8,
    other_rate: u8,
    frames: i64,
    sub_frames: i64,
    seconds: f64,
    samples: f64,
    sample_rate: u32,
    factor: f64,
    op: MathOp,
}

#[derive(Arbitrary, Debug)]
enum MathOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Convert,
    Interval,
}

/// Unbounded operands: huge or non-finite seconds, samples and frame counts.
fn float_operands(input: &MathInput) -> [TimecodeSource<'static>; 3] {
    [
        TimecodeSource::RealTime(input.seconds),
        TimecodeSource::Samples {
            value: input.samples,
            sample_rate: input.sample_rate,
        },
        TimecodeSource::FrameCount(FrameCountValue::Combined(input.factor)),
    ]
}

fuzz_target!(|input: MathInput| {
    let rate = FrameRate::ALL[input.rate as usize % FrameRate::ALL.len()];
    let other = FrameRate::ALL[input.other_rate as usize % FrameRate::ALL.len()];
    let props = Properties::new(rate);

    let value = FrameCountValue::Split {
        frames: input.frames,
        sub_frames: input.sub_frames,
    };
    let Ok(tc) = Timecode::new(value, props, ValidationRule::Wrapping) else {
        return;
    };
    assert!(tc.is_valid(), "wrapped {tc:?}");

    // Should never panic
    let _ = Timecode::new(TimecodeSource::RealTime(input.seconds), props, ValidationRule::Clamping);
    let _ = Timecode::new(
        TimecodeSource::Samples {
            value: input.samples,
            sample_rate: input.sample_rate,
        },
        props,
        ValidationRule::Wrapping,
    );

    let rhs = Timecode::new(
        FrameCountValue::Frames(input.frames.wrapping_mul(31)),
        other,
        ValidationRule::Wrapping,
    );
    let Ok(rhs) = rhs else {
        return;
    };

    match input.op {
        MathOp::Add => {
            let sum = tc.adding(rhs, ValidationRule::Wrapping).expect("wrapping add");
            assert!(sum.is_valid());
            assert!((tc + rhs).is_valid());
            for operand in float_operands(&input) {
                if let Ok(sum) = tc.adding(operand, ValidationRule::Wrapping) {
                    assert!(sum.is_valid());
                }
                let _ = tc.adding(operand, ValidationRule::Exact);
                if let Ok(sum) = tc.adding(operand, ValidationRule::Clamping) {
                    assert!(sum.is_valid());
                }
            }
        }
        MathOp::Subtract => {
            let diff = tc.subtracting(rhs, ValidationRule::Wrapping).expect("wrapping subtract");
            assert!(diff.is_valid());
            assert!((tc - rhs).is_valid());
            for operand in float_operands(&input) {
                if let Ok(diff) = tc.subtracting(operand, ValidationRule::Wrapping) {
                    assert!(diff.is_valid());
                }
                let _ = tc.subtracting(operand, ValidationRule::AllowingInvalid);
                if let Ok(diff) = tc.subtracting(operand, ValidationRule::Clamping) {
                    assert!(diff.is_valid());
                }
            }
        }
        MathOp::Multiply => {
            if let Ok(product) = tc.multiplying(input.factor, ValidationRule::Wrapping) {
                assert!(product.is_valid());
            }
        }
        MathOp::Divide => {
            if let Ok(quotient) = tc.dividing(input.factor, ValidationRule::Wrapping) {
                assert!(quotient.is_valid());
            }
        }
        MathOp::Convert => {
            if let Ok(converted) = tc.converted(other, false) {
                assert!(converted.is_valid());
            }
        }
        MathOp::Interval => {
            let interval = tc.interval(&rhs);
            let _ = interval.real_time_value();
            let _ = tc.offset(&interval);
            // offsets from unvalidated far-out timecodes must not panic either
            let far = Timecode::new(
                FrameCountValue::Combined(input.factor),
                props,
                ValidationRule::AllowingInvalid,
            );
            if let Ok(far) = far {
                let _ = far.offset(&interval);
                let _ = far.interval(&tc).flattened();
                let _ = far.next_frame();
                let _ = far.previous_frame();
            }
        }
    }
});
