//! Table-driven trigonometry on a 16-bit angle unit.
//!
//! A full turn is `TURN` (65536) angle units. Lookups mask the angle, so any
//! `i32` is accepted. Results are `Q` values in `[-1, 1]`.

use super::Q;

/// One full turn in angle units.
pub const TURN: i32 = 0x1_0000;

/// Mask that keeps an angle within one turn.
pub const ANGLE_MASK: i32 = TURN - 1;

const QUARTER_TURN: i32 = TURN >> 2;

/// Angle units covered by one table step (quarter turn / 256).
const STEP_SHIFT: u32 = 6;

/// First quadrant of sine in Q16.16, 257 entries.
/// QUARTER_SINE[i] = round(sin(i * pi / 512) * 65536)
static QUARTER_SINE: [i32; 257] = [
    0, 402, 804, 1206, 1608, 2010, 2412, 2814,
    3216, 3617, 4019, 4420, 4821, 5222, 5623, 6023,
    6424, 6824, 7224, 7623, 8022, 8421, 8820, 9218,
    9616, 10014, 10411, 10808, 11204, 11600, 11996, 12391,
    12785, 13180, 13573, 13966, 14359, 14751, 15143, 15534,
    15924, 16314, 16703, 17091, 17479, 17867, 18253, 18639,
    19024, 19409, 19792, 20175, 20557, 20939, 21320, 21699,
    22078, 22457, 22834, 23210, 23586, 23961, 24335, 24708,
    25080, 25451, 25821, 26190, 26558, 26925, 27291, 27656,
    28020, 28383, 28745, 29106, 29466, 29824, 30182, 30538,
    30893, 31248, 31600, 31952, 32303, 32652, 33000, 33347,
    33692, 34037, 34380, 34721, 35062, 35401, 35738, 36075,
    36410, 36744, 37076, 37407, 37736, 38064, 38391, 38716,
    39040, 39362, 39683, 40002, 40320, 40636, 40951, 41264,
    41576, 41886, 42194, 42501, 42806, 43110, 43412, 43713,
    44011, 44308, 44604, 44898, 45190, 45480, 45769, 46056,
    46341, 46624, 46906, 47186, 47464, 47741, 48015, 48288,
    48559, 48828, 49095, 49361, 49624, 49886, 50146, 50404,
    50660, 50914, 51166, 51417, 51665, 51911, 52156, 52398,
    52639, 52878, 53114, 53349, 53581, 53812, 54040, 54267,
    54491, 54714, 54934, 55152, 55368, 55582, 55794, 56004,
    56212, 56418, 56621, 56823, 57022, 57219, 57414, 57607,
    57798, 57986, 58172, 58356, 58538, 58718, 58896, 59071,
    59244, 59415, 59583, 59750, 59914, 60075, 60235, 60392,
    60547, 60700, 60851, 60999, 61145, 61288, 61429, 61568,
    61705, 61839, 61971, 62101, 62228, 62353, 62476, 62596,
    62714, 62830, 62943, 63054, 63162, 63268, 63372, 63473,
    63572, 63668, 63763, 63854, 63944, 64031, 64115, 64197,
    64277, 64354, 64429, 64501, 64571, 64639, 64704, 64766,
    64827, 64884, 64940, 64993, 65043, 65091, 65137, 65180,
    65220, 65259, 65294, 65328, 65358, 65387, 65413, 65436,
    65457, 65476, 65492, 65505, 65516, 65525, 65531, 65535,
    65536,
];

/// Sine of `angle` (in 1/65536 turn units).
#[must_use]
pub fn sin_lookup(angle: i32) -> Q {
    let angle = angle & ANGLE_MASK;
    let quadrant = angle / QUARTER_TURN;
    let offset = angle % QUARTER_TURN;

    match quadrant {
        0 => quarter_sine(offset),
        1 => quarter_sine(QUARTER_TURN - offset),
        2 => -quarter_sine(offset),
        _ => -quarter_sine(QUARTER_TURN - offset),
    }
}

/// Cosine of `angle` (in 1/65536 turn units).
#[must_use]
pub fn cos_lookup(angle: i32) -> Q {
    sin_lookup(angle.wrapping_add(QUARTER_TURN))
}

/// Linear interpolation inside the first quadrant, `offset` in `0..=QUARTER_TURN`.
fn quarter_sine(offset: i32) -> Q {
    let index = (offset >> STEP_SHIFT) as usize;
    let fraction = offset & ((1 << STEP_SHIFT) - 1);

    let low = QUARTER_SINE[index];
    if fraction == 0 {
        return Q::from_raw(low);
    }
    let high = QUARTER_SINE[index + 1];
    Q::from_raw(low + (((high - low) * fraction) >> STEP_SHIFT))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cardinal_angles() {
        assert_eq!(cos_lookup(0), Q::ONE);
        assert_eq!(sin_lookup(0), Q::ZERO);
        assert_eq!(sin_lookup(QUARTER_TURN), Q::ONE);
        assert_eq!(cos_lookup(TURN >> 1), -Q::ONE);
        assert_eq!(sin_lookup(3 * QUARTER_TURN), -Q::ONE);
        assert_eq!(cos_lookup(TURN), Q::ONE);
    }

    #[test]
    fn test_lookup_stays_in_unit_range() {
        for angle in (-TURN..2 * TURN).step_by(97) {
            let c = cos_lookup(angle);
            let s = sin_lookup(angle);
            assert!(c >= -Q::ONE && c <= Q::ONE, "cos out of range at {}", angle);
            assert!(s >= -Q::ONE && s <= Q::ONE, "sin out of range at {}", angle);
        }
    }

    #[test]
    fn test_matches_float_reference() {
        for angle in (0..TURN).step_by(331) {
            let radians = angle as f64 / TURN as f64 * std::f64::consts::TAU;
            let expected = radians.cos();
            let got = cos_lookup(angle).to_f32() as f64;
            assert!(
                (got - expected).abs() < 1e-4,
                "cos({}) = {} expected {}",
                angle,
                got,
                expected
            );
        }
    }
}
