/// Extended-finger counting from hand landmark coordinates
///
/// The upstream detector ships 21 joints per hand in image coordinates
/// (y grows downward). Only the relative ordering of coordinates matters,
/// so pixel and normalized inputs both work.

use anyhow::{Result, bail};

/// Joints per hand in the detector's landmark model
pub const LANDMARK_COUNT: usize = 21;

// Joint indices used by the counting rules
const THUMB_CMC: usize = 1;
const THUMB_TIP: usize = 4;
const FINGER_TIPS: [usize; 4] = [8, 12, 16, 20];
const FINGER_PIPS: [usize; 4] = [6, 10, 14, 18];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handedness {
    Left,
    Right,
}

/// One detected hand: handedness plus 21 `(x, y)` joint positions
#[derive(Debug, Clone)]
pub struct HandLandmarks {
    handedness: Handedness,
    points: Vec<(f32, f32)>,
}

impl HandLandmarks {
    pub fn new(handedness: Handedness, points: Vec<(f32, f32)>) -> Result<Self> {
        if points.len() != LANDMARK_COUNT {
            bail!(
                "A hand needs {} landmarks, got {}",
                LANDMARK_COUNT,
                points.len()
            );
        }
        Ok(HandLandmarks { handedness, points })
    }

    /// Count extended fingers on this hand
    ///
    /// Thumb: tip x compared against the CMC joint x, direction flipped by
    /// handedness (a mirrored camera image puts a right thumb to the left).
    /// Other fingers: extended when the tip sits above the PIP joint.
    pub fn extended_fingers(&self) -> u32 {
        let mut fingers = 0;

        let thumb_tip_x = self.points[THUMB_TIP].0;
        let thumb_cmc_x = self.points[THUMB_CMC].0;
        match self.handedness {
            Handedness::Right if thumb_tip_x < thumb_cmc_x => fingers += 1,
            Handedness::Left if thumb_tip_x > thumb_cmc_x => fingers += 1,
            _ => {}
        }

        for (tip, pip) in FINGER_TIPS.iter().zip(FINGER_PIPS.iter()) {
            // Image coordinates: smaller y is higher in the frame
            if self.points[*tip].1 < self.points[*pip].1 {
                fingers += 1;
            }
        }

        fingers
    }
}

/// Total extended fingers across all hands in a frame
pub fn count_fingers(hands: &[HandLandmarks]) -> u32 {
    hands.iter().map(HandLandmarks::extended_fingers).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// All fingertips below their PIP joints, thumb tucked
    fn fist(handedness: Handedness) -> HandLandmarks {
        let mut points = vec![(0.5, 0.5); LANDMARK_COUNT];
        points[THUMB_CMC] = (0.5, 0.5);
        points[THUMB_TIP] = (0.5, 0.6); // same x as CMC: thumb not extended
        for (tip, pip) in FINGER_TIPS.iter().zip(FINGER_PIPS.iter()) {
            points[*pip] = (0.5, 0.4);
            points[*tip] = (0.5, 0.7); // tip below PIP
        }
        HandLandmarks::new(handedness, points).unwrap()
    }

    /// Thumb out past the CMC joint, all fingertips above their PIPs
    fn open_hand(handedness: Handedness) -> HandLandmarks {
        let mut points = vec![(0.5, 0.5); LANDMARK_COUNT];
        points[THUMB_CMC] = (0.5, 0.5);
        points[THUMB_TIP] = match handedness {
            Handedness::Right => (0.3, 0.4),
            Handedness::Left => (0.7, 0.4),
        };
        for (tip, pip) in FINGER_TIPS.iter().zip(FINGER_PIPS.iter()) {
            points[*pip] = (0.5, 0.5);
            points[*tip] = (0.5, 0.2);
        }
        HandLandmarks::new(handedness, points).unwrap()
    }

    #[test]
    fn test_fist_counts_zero() {
        assert_eq!(fist(Handedness::Right).extended_fingers(), 0);
        assert_eq!(fist(Handedness::Left).extended_fingers(), 0);
    }

    #[test]
    fn test_open_hand_counts_five() {
        assert_eq!(open_hand(Handedness::Right).extended_fingers(), 5);
        assert_eq!(open_hand(Handedness::Left).extended_fingers(), 5);
    }

    #[test]
    fn test_thumb_rule_flips_with_handedness() {
        // A right-hand open pose labeled as left loses the thumb
        let mut points = vec![(0.5, 0.5); LANDMARK_COUNT];
        points[THUMB_CMC] = (0.5, 0.5);
        points[THUMB_TIP] = (0.3, 0.4); // left of CMC
        for (tip, pip) in FINGER_TIPS.iter().zip(FINGER_PIPS.iter()) {
            points[*pip] = (0.5, 0.5);
            points[*tip] = (0.5, 0.2);
        }

        let as_right = HandLandmarks::new(Handedness::Right, points.clone()).unwrap();
        let as_left = HandLandmarks::new(Handedness::Left, points).unwrap();

        assert_eq!(as_right.extended_fingers(), 5);
        assert_eq!(as_left.extended_fingers(), 4);
    }

    #[test]
    fn test_two_hands_sum() {
        let hands = vec![open_hand(Handedness::Right), open_hand(Handedness::Left)];
        assert_eq!(count_fingers(&hands), 10);
    }

    #[test]
    fn test_no_hands_is_zero() {
        assert_eq!(count_fingers(&[]), 0);
    }

    #[test]
    fn test_wrong_landmark_count_rejected() {
        assert!(HandLandmarks::new(Handedness::Right, vec![(0.0, 0.0); 5]).is_err());
    }
}
