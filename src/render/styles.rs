use std::sync::OnceLock;

/// Base presentation rules shared by every surface.
///
/// Hosts that paint into a document inject this once; headless hosts can ignore it.
#[derive(Debug)]
pub struct BaseStyles {
    pub css: String,
}

static BASE_STYLES: OnceLock<BaseStyles> = OnceLock::new();

/// Install the base styles for this process and return them.
///
/// Idempotent; the first call builds them and every later call returns the same value.
pub fn ensure_styles_installed() -> &'static BaseStyles {
    BASE_STYLES.get_or_init(|| {
        tracing::debug!("installing base sign styles");
        BaseStyles {
            css: BASE_CSS.to_owned(),
        }
    })
}

pub fn styles_installed() -> bool {
    BASE_STYLES.get().is_some()
}

const BASE_CSS: &str = "\
.sign { position: relative; overflow: hidden; }
.sign-text { position: absolute; white-space: pre; will-change: transform, opacity; }
.sign-char { display: inline-block; }
.sign-matrix { display: grid; }
.sign-dot { border-radius: 50%; }
.sign-dot.glow { box-shadow: 0 0 4px currentColor; }
.sign-flap { display: inline-block; text-align: center; }
.sign-flap.flipping { animation: sign-flap-flip var(--flip-duration) linear; }
";

#[cfg(test)]
#[path = "../../tests/unit/render/styles.rs"]
mod tests;
