use super::parse::{Rgb8, parse_rgb};
use super::DEFAULT_COLOR;

/// A fixed list of colors a piece of hardware can actually show.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    entries: Vec<String>,
    parsed: Vec<Option<Rgb8>>,
}

impl Palette {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries: Vec<String> = entries.into_iter().map(Into::into).collect();
        let parsed = entries
            .iter()
            .map(|e| {
                let rgb = parse_rgb(e).ok();
                if rgb.is_none() {
                    tracing::warn!(entry = %e, "palette entry is not a parseable color; ignoring it");
                }
                rgb
            })
            .collect();
        Self { entries, parsed }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.parsed.iter().all(Option::is_none)
    }

    /// Nearest palette entry by squared RGB distance; ties go to the earliest entry.
    ///
    /// The returned string is the palette's own spelling of the entry. Unparseable
    /// input is treated as [`DEFAULT_COLOR`] before snapping.
    pub fn snap(&self, color: &str) -> String {
        let target = match parse_rgb(color) {
            Ok(rgb) => rgb,
            Err(err) => {
                tracing::warn!(%color, %err, "unresolvable color; snapping the default instead");
                match parse_rgb(DEFAULT_COLOR) {
                    Ok(rgb) => rgb,
                    Err(_) => return color.to_owned(),
                }
            }
        };

        let mut best: Option<(u32, usize)> = None;
        for (i, rgb) in self.parsed.iter().enumerate() {
            let Some(rgb) = rgb else { continue };
            let d = target.distance_sq(*rgb);
            if best.is_none_or(|(bd, _)| d < bd) {
                best = Some((d, i));
            }
        }

        match best {
            Some((_, i)) => self.entries[i].clone(),
            None => color.to_owned(),
        }
    }
}

impl<'de> serde::Deserialize<'de> for Palette {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let entries = Vec::<String>::deserialize(deserializer)?;
        Ok(Self::new(entries))
    }
}

impl serde::Serialize for Palette {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.entries.serialize(serializer)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/color/palette.rs"]
mod tests;
