//! DPI scale arithmetic.
//!
//! Windows does not take an absolute scale percentage. It reports and accepts
//! a step count relative to the display's recommended scale, walking the fixed
//! ladder below.

use crate::error::DisplayError;

pub const SCALE_LADDER: [u32; 12] = [100, 125, 150, 175, 200, 225, 250, 300, 350, 400, 450, 500];

pub const MIN_SCALE_PERCENT: u32 = 100;

/// Absolute scale values of one display source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaleInfo {
    pub current: u32,
    pub recommended: u32,
    pub maximum: u32,
}

impl ScaleInfo {
    /// Decode the relative `(min, cur, max)` triple read from the OS.
    ///
    /// `min_rel` is the (non-positive) distance from the recommended value down
    /// to 100 %, so `|min_rel|` is the ladder index of the recommended value.
    pub fn from_relative(min_rel: i32, cur_rel: i32, max_rel: i32) -> Option<ScaleInfo> {
        if max_rel < min_rel {
            return None;
        }
        let cur_rel = cur_rel.clamp(min_rel, max_rel);
        let base = min_rel.unsigned_abs() as usize;

        let at = |rel: i32| -> Option<u32> {
            let idx = usize::try_from(base as i64 + rel as i64).ok()?;
            SCALE_LADDER.get(idx).copied()
        };

        Some(ScaleInfo {
            current: at(cur_rel)?,
            recommended: SCALE_LADDER.get(base).copied()?,
            maximum: at(max_rel)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleStep {
    /// Display already runs at the requested scale.
    Unchanged,
    /// Steps relative to the recommended scale to send to the OS.
    Relative(i32),
}

/// Work out the relative step that puts a display at `percent`.
pub fn relative_step(info: &ScaleInfo, percent: u32) -> Result<ScaleStep, DisplayError> {
    if percent == info.current {
        return Ok(ScaleStep::Unchanged);
    }

    let target = percent.clamp(MIN_SCALE_PERCENT, info.maximum.max(MIN_SCALE_PERCENT));
    let position = |value: u32| SCALE_LADDER.iter().position(|&v| v == value);

    let (Some(target_idx), Some(recommended_idx)) = (position(target), position(info.recommended))
    else {
        return Err(DisplayError::ScaleChangeFailed {
            percent,
            reason: format!("{target} % is not a supported scale step"),
        });
    };

    Ok(ScaleStep::Relative(target_idx as i32 - recommended_idx as i32))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_relative_triple() {
        // Recommended 150 %, currently 125 %, up to 250 %.
        let info = ScaleInfo::from_relative(-2, -1, 4).unwrap();
        assert_eq!(
            info,
            ScaleInfo {
                current: 125,
                recommended: 150,
                maximum: 250,
            }
        );
    }

    #[test]
    fn decode_clamps_current_into_range() {
        let info = ScaleInfo::from_relative(-1, 9, 2).unwrap();
        assert_eq!(info.current, 175);
        assert_eq!(info.maximum, 175);
    }

    #[test]
    fn decode_rejects_out_of_ladder() {
        assert_eq!(ScaleInfo::from_relative(-2, 0, 20), None);
        assert_eq!(ScaleInfo::from_relative(0, 0, -1), None);
    }

    #[test]
    fn same_scale_sends_nothing() {
        let info = ScaleInfo::from_relative(-2, 0, 4).unwrap();
        assert_eq!(relative_step(&info, 150).unwrap(), ScaleStep::Unchanged);
    }

    #[test]
    fn step_is_relative_to_recommended() {
        let info = ScaleInfo::from_relative(-2, 0, 4).unwrap();
        assert_eq!(relative_step(&info, 100).unwrap(), ScaleStep::Relative(-2));
        assert_eq!(relative_step(&info, 200).unwrap(), ScaleStep::Relative(2));
    }

    #[test]
    fn request_above_maximum_is_clamped() {
        let info = ScaleInfo::from_relative(-1, 0, 2).unwrap();
        // Maximum is 175 %, recommended 125 %.
        assert_eq!(relative_step(&info, 400).unwrap(), ScaleStep::Relative(2));
    }

    #[test]
    fn off_ladder_request_fails() {
        let info = ScaleInfo::from_relative(-2, 0, 4).unwrap();
        let err = relative_step(&info, 160).unwrap_err();
        assert!(matches!(err, DisplayError::ScaleChangeFailed { percent: 160, .. }));
    }
}
