//! Rendered gradient snapshots.
//!
//! A [`Gradient`] is an opaque CSS-like string such as
//! `linear-gradient(135deg, #a1c4fd, #c2e9fb)`. It is persisted and reapplied
//! verbatim; parsing it back into colors is only done for drawing.

use std::fmt;

use palette::{Mix, Srgb};
use serde::{Deserialize, Serialize};

/// Angle used for every swatch gradient.
const GRADIENT_ANGLE: &str = "135deg";

/// Opaque visual-style snapshot of the active color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Gradient(String);

impl Gradient {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Build the snapshot for a list of color stops.
    pub fn from_stops<S: AsRef<str>>(stops: &[S]) -> Self {
        match stops {
            [] => Self(String::new()),
            [single] => Self(single.as_ref().to_string()),
            _ => {
                let joined = stops
                    .iter()
                    .map(AsRef::as_ref)
                    .collect::<Vec<_>>()
                    .join(", ");
                Self(format!("linear-gradient({GRADIENT_ANGLE}, {joined})"))
            }
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Color stops found in the snapshot. Tokens that are not colors
    /// (angles, positions, unknown words) are skipped.
    pub fn stops(&self) -> Vec<Srgb<u8>> {
        let inner = match (self.0.find('('), self.0.rfind(')')) {
            (Some(open), Some(close)) if close > open && self.0[..open].contains("gradient") => {
                &self.0[open + 1..close]
            }
            _ => self.0.as_str(),
        };

        split_top_level(inner)
            .into_iter()
            .filter_map(|token| {
                // "#aabbcc 40%" -> "#aabbcc"
                let candidate = match token.find(')') {
                    Some(close) => &token[..=close],
                    None => token.split_whitespace().next().unwrap_or_default(),
                };
                parse_color(candidate).ok()
            })
            .collect()
    }

    /// Color at position `t` (0..=1) along the gradient.
    pub fn sample(&self, t: f32) -> Option<Srgb<u8>> {
        let stops = self.stops();
        match stops.as_slice() {
            [] => None,
            [only] => Some(*only),
            _ => {
                let t = t.clamp(0.0, 1.0);
                let scaled = t * (stops.len() - 1) as f32;
                let idx = (scaled.floor() as usize).min(stops.len() - 2);
                let local = scaled - idx as f32;
                let a: Srgb<f32> = stops[idx].into_format();
                let b: Srgb<f32> = stops[idx + 1].into_format();
                Some(a.mix(b, local).into_format())
            }
        }
    }
}

impl fmt::Display for Gradient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parse a color string in any CSS format (hex, rgb(), hsl(), named).
pub fn parse_color(input: &str) -> Result<Srgb<u8>, String> {
    let css_color: csscolorparser::Color = input
        .trim()
        .parse()
        .map_err(|e| format!("Invalid color '{}': {}", input, e))?;
    let [r, g, b, _a] = css_color.to_rgba8();
    Ok(Srgb::new(r, g, b))
}

/// Split on commas that are not nested inside parentheses.
fn split_top_level(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in s.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(s[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(s[start..].trim());
    parts.into_iter().filter(|p| !p.is_empty()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_rgb_stops_survive_split() {
        let g = Gradient::new("linear-gradient(90deg, rgb(255, 0, 0) 0%, #0000ff 100%)");
        assert_eq!(g.stops(), vec![Srgb::new(255, 0, 0), Srgb::new(0, 0, 255)]);
    }

    #[test]
    fn sample_midpoint_mixes() {
        let g = Gradient::from_stops(&["#000000", "#ffffff"]);
        let mid = g.sample(0.5).unwrap();
        assert!((127..=128).contains(&mid.red));
    }
}
