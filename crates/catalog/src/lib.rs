//! Section metadata.
//!
//! The host page embeds a JSON list of sections (id, display name, curve
//! parameter, accent color). The catalog validates it once at startup and
//! is immutable afterwards; every other crate refers to sections through
//! `SectionId`, an index into the validated order.

use foundation::SectionId;
use foundation::math::{stable_total_cmp_f64, wrapped_delta};
use serde::Deserialize;

/// One section as authored in the host page's JSON config.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawSection {
    pub id: String,
    pub display_name: String,
    pub curve_parameter: f64,
    /// `#rrggbb` hex literal.
    pub accent_color: String,
}

/// A validated section.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub id: String,
    pub display_name: String,
    pub curve_parameter: f64,
    /// Linear RGB accent in [0, 1].
    pub accent: [f32; 3],
    pub variant: ThemeVariant,
}

/// The closed set of billboard shapes, keyed by section id.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum ThemeVariant {
    Hero,
    Directing,
    Network,
    Ugc,
    Clientele,
    Projects,
    Social,
    Resume,
    Contact,
    #[default]
    Default,
}

impl ThemeVariant {
    pub fn from_id(id: &str) -> Self {
        match id.trim().to_ascii_lowercase().as_str() {
            "hero" => ThemeVariant::Hero,
            "directing" => ThemeVariant::Directing,
            "network" => ThemeVariant::Network,
            "ugc" => ThemeVariant::Ugc,
            "clientele" => ThemeVariant::Clientele,
            "projects" => ThemeVariant::Projects,
            "social" => ThemeVariant::Social,
            "resume" => ThemeVariant::Resume,
            "contact" => ThemeVariant::Contact,
            _ => ThemeVariant::Default,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    Parse(String),
    Empty,
    DuplicateId(String),
    ParameterOutOfRange(String),
    UnsortedParameters(String),
    BadColor(String),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Parse(msg) => write!(f, "section config parse error: {msg}"),
            CatalogError::Empty => write!(f, "section config is empty"),
            CatalogError::DuplicateId(id) => write!(f, "duplicate section id: {id}"),
            CatalogError::ParameterOutOfRange(id) => {
                write!(f, "curve parameter outside [0, 1] for section: {id}")
            }
            CatalogError::UnsortedParameters(id) => {
                write!(f, "curve parameters must be ascending; violated at: {id}")
            }
            CatalogError::BadColor(c) => write!(f, "bad accent color literal: {c}"),
        }
    }
}

impl std::error::Error for CatalogError {}

/// Immutable, validated list of sections ordered by curve parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionCatalog {
    sections: Vec<Section>,
}

impl SectionCatalog {
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let raw: Vec<RawSection> =
            serde_json::from_str(json).map_err(|e| CatalogError::Parse(e.to_string()))?;
        Self::from_raw(raw)
    }

    pub fn from_raw(raw: Vec<RawSection>) -> Result<Self, CatalogError> {
        if raw.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut sections = Vec::with_capacity(raw.len());
        let mut prev_param = f64::NEG_INFINITY;
        for r in raw {
            if !(0.0..=1.0).contains(&r.curve_parameter) {
                return Err(CatalogError::ParameterOutOfRange(r.id));
            }
            if r.curve_parameter <= prev_param {
                return Err(CatalogError::UnsortedParameters(r.id));
            }
            prev_param = r.curve_parameter;

            if sections.iter().any(|s: &Section| s.id == r.id) {
                return Err(CatalogError::DuplicateId(r.id));
            }

            let accent = parse_hex_color(&r.accent_color)
                .ok_or_else(|| CatalogError::BadColor(r.accent_color.clone()))?;
            let variant = ThemeVariant::from_id(&r.id);
            sections.push(Section {
                id: r.id,
                display_name: r.display_name,
                curve_parameter: r.curve_parameter,
                accent,
                variant,
            });
        }

        Ok(Self { sections })
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn get(&self, id: SectionId) -> Option<&Section> {
        self.sections.get(id.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = (SectionId, &Section)> {
        self.sections
            .iter()
            .enumerate()
            .map(|(i, s)| (SectionId(i as u32), s))
    }

    pub fn index_of(&self, id: &str) -> Option<SectionId> {
        self.sections
            .iter()
            .position(|s| s.id == id)
            .map(|i| SectionId(i as u32))
    }

    /// Nearest section to curve parameter `t`, with its absolute distance.
    ///
    /// Ordering contract: distances compare with the deterministic float
    /// ordering; an exact tie goes to the lower section index.
    pub fn nearest(&self, t: f64, closed: bool) -> Option<(SectionId, f64)> {
        let mut best: Option<(SectionId, f64)> = None;
        for (id, s) in self.iter() {
            let d = if closed {
                wrapped_delta(t, s.curve_parameter).abs()
            } else {
                (s.curve_parameter - t).abs()
            };
            best = match best {
                None => Some((id, d)),
                Some((bid, bd)) => {
                    if stable_total_cmp_f64(d, bd).is_lt() {
                        Some((id, d))
                    } else {
                        Some((bid, bd))
                    }
                }
            };
        }
        best
    }
}

fn parse_hex_color(s: &str) -> Option<[f32; 3]> {
    let hex = s.trim().strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some([
        f32::from(r) / 255.0,
        f32::from(g) / 255.0,
        f32::from(b) / 255.0,
    ])
}
