use std::fmt;

/// Saturation/value pair for the primary accent.
pub const PRIMARY_SV: (f64, f64) = (0.8, 0.9);
/// Saturation/value pair for the hover accent.
pub const HOVER_SV: (f64, f64) = (0.7, 0.8);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn to_hex(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub primary: Rgb,
    pub hover: Rgb,
}

pub fn palette(hue: f64) -> Palette {
    Palette {
        primary: color(hue, PRIMARY_SV.0, PRIMARY_SV.1),
        hover: color(hue, HOVER_SV.0, HOVER_SV.1),
    }
}

/// HSV to 8-bit RGB. `hue` is in degrees and wraps at 360; channels truncate.
pub fn color(hue: f64, s: f64, v: f64) -> Rgb {
    let h = if hue.is_finite() {
        hue.rem_euclid(360.0) / 360.0
    } else {
        0.0
    };
    let (r, g, b) = hsv_to_rgb(h, s.clamp(0.0, 1.0), v.clamp(0.0, 1.0));
    Rgb {
        r: channel(r),
        g: channel(g),
        b: channel(b),
    }
}

fn channel(x: f64) -> u8 {
    (x * 255.0) as u8
}

// h, s, v all in [0, 1]
fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (f64, f64, f64) {
    if s == 0.0 {
        return (v, v, v);
    }
    let sector = (h * 6.0).floor();
    let f = h * 6.0 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match (sector as i64).rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    }
}
