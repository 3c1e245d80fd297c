//! Palette and color ramps for court images.

use image::Rgb;

pub const BACKGROUND: Rgb<u8> = Rgb([250, 246, 236]);
pub const COURT_LINE: Rgb<u8> = Rgb([34, 34, 34]);

pub const COLD: Rgb<u8> = Rgb([66, 122, 214]);
pub const NEUTRAL: Rgb<u8> = Rgb([238, 196, 84]);
pub const HOT: Rgb<u8> = Rgb([212, 58, 48]);

/// Sequential ramp used by the density overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ramp {
    /// Light pink to dark red (makes)
    Reds,
    /// Light blue to navy (misses)
    Blues,
}

impl Ramp {
    fn ends(&self) -> (Rgb<u8>, Rgb<u8>) {
        match self {
            Ramp::Reds => (Rgb([252, 187, 161]), Rgb([103, 0, 13])),
            Ramp::Blues => (Rgb([198, 219, 239]), Rgb([8, 48, 107])),
        }
    }

    /// Color for intensity `t` in `[0, 1]`; out-of-range input is clamped.
    pub fn sample(&self, t: f64) -> Rgb<u8> {
        let (low, high) = self.ends();
        lerp(low, high, t)
    }
}

/// Tint for a zone shooting percentage.
///
/// Below `cold_below` the zone is cold, above `hot_above` it is hot, and in
/// between it is neutral.
pub fn zone_tint(percentage: f64, cold_below: f64, hot_above: f64) -> Rgb<u8> {
    if percentage < cold_below {
        COLD
    } else if percentage > hot_above {
        HOT
    } else {
        NEUTRAL
    }
}

/// Alpha-composite `over` on top of `base`.
pub fn blend(base: Rgb<u8>, over: Rgb<u8>, alpha: f64) -> Rgb<u8> {
    lerp(base, over, alpha)
}

fn lerp(a: Rgb<u8>, b: Rgb<u8>, t: f64) -> Rgb<u8> {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let channel = |i: usize| {
        let v = a.0[i] as f64 + (b.0[i] as f64 - a.0[i] as f64) * t;
        v.round() as u8
    };
    Rgb([channel(0), channel(1), channel(2)])
}
