use std::{fmt, sync::Arc};

use super::{DEFAULT_COLOR, palette::Palette, parse::normalize};

/// Per-character color callback: `(index, char, progress) -> CSS color`.
pub type ColorFn = Arc<dyn Fn(usize, char, f64) -> String + Send + Sync>;

/// How a step colors its characters.
#[derive(Clone)]
pub enum ColorSpec {
    /// One color for every character.
    Solid(String),
    /// Colors assigned cyclically: character `i` takes `list[i % len]`.
    List(Vec<String>),
    /// Computed per character, every frame.
    Func(ColorFn),
}

impl ColorSpec {
    pub fn solid(color: impl Into<String>) -> Self {
        Self::Solid(color.into())
    }

    pub fn list<I, S>(colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(colors.into_iter().map(Into::into).collect())
    }

    pub fn func(f: impl Fn(usize, char, f64) -> String + Send + Sync + 'static) -> Self {
        Self::Func(Arc::new(f))
    }

    /// Hue sweep across the text that rotates as the phase progresses.
    pub fn rainbow() -> Self {
        Self::func(|i, _, progress| {
            let hue = (i as f64 * 36.0 + progress * 360.0) % 360.0;
            format!("hsl({hue:.0}, 100%, 50%)")
        })
    }
}

impl fmt::Debug for ColorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Solid(c) => f.debug_tuple("Solid").field(c).finish(),
            Self::List(l) => f.debug_tuple("List").field(l).finish(),
            Self::Func(_) => f.write_str("Func(..)"),
        }
    }
}

impl<'de> serde::Deserialize<'de> for ColorSpec {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Solid(String),
            List(Vec<String>),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Solid(c) => Ok(Self::Solid(c)),
            Repr::List(l) => Ok(Self::List(l)),
        }
    }
}

impl serde::Serialize for ColorSpec {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Solid(c) => serializer.serialize_str(c),
            Self::List(l) => l.serialize(serializer),
            Self::Func(_) => Err(serde::ser::Error::custom(
                "function color specs cannot be serialized",
            )),
        }
    }
}

/// Log each fixed color in `spec` that will fall back to the default, returning how
/// many were logged.
///
/// Function specs are only known per frame and are not checked.
pub fn warn_unparseable(spec: &ColorSpec) -> usize {
    let fixed: &[String] = match spec {
        ColorSpec::Solid(c) => std::slice::from_ref(c),
        ColorSpec::List(list) => list,
        ColorSpec::Func(_) => &[],
    };
    let mut count = 0;
    for raw in fixed.iter().filter(|c| normalize(c).is_none()) {
        tracing::warn!(color = %raw, "unresolvable color; using default");
        count += 1;
    }
    count
}

/// Resolve `spec` into one color per character of `text`.
///
/// Missing specs and empty lists use [`DEFAULT_COLOR`]; unparseable colors fall back to
/// it as well. With a palette, each color is snapped independently.
pub fn resolve(
    spec: Option<&ColorSpec>,
    text: &str,
    progress: f64,
    palette: Option<&Palette>,
) -> Vec<String> {
    let finish = |raw: String| -> String {
        let color = match normalize(&raw) {
            Some(c) => c,
            None => {
                tracing::debug!(color = %raw, "unresolvable color; using default");
                DEFAULT_COLOR.to_owned()
            }
        };
        match palette {
            Some(p) if !p.is_empty() => p.snap(&color),
            _ => color,
        }
    };

    match spec {
        Some(ColorSpec::Solid(c)) => {
            let c = finish(c.clone());
            text.chars().map(|_| c.clone()).collect()
        }
        Some(ColorSpec::List(list)) if !list.is_empty() => {
            let resolved: Vec<String> = list.iter().cloned().map(finish).collect();
            (0..text.chars().count())
                .map(|i| resolved[i % resolved.len()].clone())
                .collect()
        }
        Some(ColorSpec::Func(f)) => text
            .chars()
            .enumerate()
            .map(|(i, ch)| finish(f(i, ch, progress)))
            .collect(),
        Some(ColorSpec::List(_)) | None => {
            let c = finish(DEFAULT_COLOR.to_owned());
            text.chars().map(|_| c.clone()).collect()
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/color/resolve.rs"]
mod tests;
