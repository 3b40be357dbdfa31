//! CSS color string normalization and RGB parsing.
//!
//! Accepted inputs: `#rgb`, `#rrggbb` (an 8-digit form drops alpha), a small named-color
//! table, and the functional `rgb()`, `rgba()`, `hsl()`, `hsla()` syntaxes.

/// Opaque 8-bit sRGB triple.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn distance_sq(self, other: Rgb8) -> u32 {
        let dr = i32::from(self.r) - i32::from(other.r);
        let dg = i32::from(self.g) - i32::from(other.g);
        let db = i32::from(self.b) - i32::from(other.b);
        (dr * dr + dg * dg + db * db) as u32
    }

    /// Scale toward black; `k` is clamped to `[0, 1]`.
    pub fn scaled(self, k: f64) -> Self {
        let k = k.clamp(0.0, 1.0);
        let s = |c: u8| (f64::from(c) * k).round() as u8;
        Self::new(s(self.r), s(self.g), s(self.b))
    }
}

const NAMED: &[(&str, &str)] = &[
    ("amber", "#ffbf00"),
    ("aqua", "#00ffff"),
    ("black", "#000000"),
    ("blue", "#0000ff"),
    ("cyan", "#00ffff"),
    ("fuchsia", "#ff00ff"),
    ("gold", "#ffd700"),
    ("gray", "#808080"),
    ("green", "#008000"),
    ("grey", "#808080"),
    ("lime", "#00ff00"),
    ("magenta", "#ff00ff"),
    ("maroon", "#800000"),
    ("navy", "#000080"),
    ("olive", "#808000"),
    ("orange", "#ffa500"),
    ("orangered", "#ff4500"),
    ("pink", "#ffc0cb"),
    ("purple", "#800080"),
    ("red", "#ff0000"),
    ("silver", "#c0c0c0"),
    ("teal", "#008080"),
    ("violet", "#ee82ee"),
    ("white", "#ffffff"),
    ("yellow", "#ffff00"),
];

pub fn named_color(name: &str) -> Option<&'static str> {
    let name = name.trim();
    NAMED
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, hex)| *hex)
}

/// Canonical string form of a color.
///
/// Hex and named colors become lowercase `#rrggbb`; functional syntaxes pass through
/// trimmed but otherwise unchanged. Returns `None` for anything unrecognized.
pub fn normalize(s: &str) -> Option<String> {
    let s = s.trim();
    if s.starts_with('#') {
        return parse_hex(s).ok().map(Rgb8::to_hex);
    }
    if let Some(hex) = named_color(s) {
        return Some(hex.to_owned());
    }
    if is_functional(s) && parse_functional(s).is_ok() {
        return Some(s.to_owned());
    }
    None
}

pub fn parse_rgb(s: &str) -> Result<Rgb8, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty color string".to_owned());
    }
    if s.starts_with('#') {
        return parse_hex(s);
    }
    if let Some(hex) = named_color(s) {
        return parse_hex(hex);
    }
    if is_functional(s) {
        return parse_functional(s);
    }
    Err(format!("unrecognized color \"{s}\""))
}

fn is_functional(s: &str) -> bool {
    let lower = s.to_ascii_lowercase();
    ["rgb(", "rgba(", "hsl(", "hsla("]
        .iter()
        .any(|p| lower.starts_with(p))
        && s.ends_with(')')
}

fn parse_hex(s: &str) -> Result<Rgb8, String> {
    let hex = s.strip_prefix('#').unwrap_or(s);

    fn digit(c: u8) -> Result<u8, String> {
        match c {
            b'0'..=b'9' => Ok(c - b'0'),
            b'a'..=b'f' => Ok(c - b'a' + 10),
            b'A'..=b'F' => Ok(c - b'A' + 10),
            _ => Err(format!("invalid hex character '{}'", c as char)),
        }
    }

    let b = hex.as_bytes();
    match b.len() {
        3 => Ok(Rgb8::new(
            digit(b[0])? * 17,
            digit(b[1])? * 17,
            digit(b[2])? * 17,
        )),
        6 | 8 => Ok(Rgb8::new(
            digit(b[0])? * 16 + digit(b[1])?,
            digit(b[2])? * 16 + digit(b[3])?,
            digit(b[4])? * 16 + digit(b[5])?,
        )),
        n => Err(format!("invalid hex color length {n}, expected 3, 6 or 8")),
    }
}

fn parse_functional(s: &str) -> Result<Rgb8, String> {
    let open = s.find('(').ok_or("missing '('")?;
    let name = s[..open].trim().to_ascii_lowercase();
    let body = &s[open + 1..s.len() - 1];
    let parts: Vec<&str> = body
        .split([',', ' ', '/'])
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    if parts.len() < 3 {
        return Err(format!("{name}() needs at least three components"));
    }

    match name.as_str() {
        "rgb" | "rgba" => {
            let channel = |p: &str| -> Result<u8, String> {
                let v = if let Some(pct) = p.strip_suffix('%') {
                    number(pct)? / 100.0 * 255.0
                } else {
                    number(p)?
                };
                Ok(v.clamp(0.0, 255.0).round() as u8)
            };
            Ok(Rgb8::new(
                channel(parts[0])?,
                channel(parts[1])?,
                channel(parts[2])?,
            ))
        }
        "hsl" | "hsla" => {
            let h = number(parts[0].trim_end_matches("deg"))?;
            let s = number(parts[1].trim_end_matches('%'))? / 100.0;
            let l = number(parts[2].trim_end_matches('%'))? / 100.0;
            Ok(hsl_to_rgb(h, s, l))
        }
        other => Err(format!("unsupported color function {other}()")),
    }
}

fn number(p: &str) -> Result<f64, String> {
    p.parse::<f64>()
        .map_err(|_| format!("invalid color component \"{p}\""))
}

fn hsl_to_rgb(h: f64, s: f64, l: f64) -> Rgb8 {
    let h = (h % 360.0 + 360.0) % 360.0 / 360.0;
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);
    let to_u8 = |x: f64| (x.clamp(0.0, 1.0) * 255.0).round() as u8;

    if s == 0.0 {
        return Rgb8::new(to_u8(l), to_u8(l), to_u8(l));
    }

    fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        if t < 1.0 / 6.0 {
            return p + (q - p) * 6.0 * t;
        }
        if t < 1.0 / 2.0 {
            return q;
        }
        if t < 2.0 / 3.0 {
            return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
        }
        p
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    Rgb8::new(
        to_u8(hue_to_rgb(p, q, h + 1.0 / 3.0)),
        to_u8(hue_to_rgb(p, q, h)),
        to_u8(hue_to_rgb(p, q, h - 1.0 / 3.0)),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/color/parse.rs"]
mod tests;
