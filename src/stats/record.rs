use serde::Serialize;
use serde_json::{Map, Value};

use crate::stats::error::FetchError;

/// Upstream stat keys that must be present in `data.stats`, in reporting order.
pub const REQUIRED_FIELDS: [&str; 8] = [
    "hp",
    "maxHealth",
    "mp",
    "maxMP",
    "exp",
    "toNextLevel",
    "lvl",
    "class",
];

/// Class label used when the upstream value is blank or unusable.
pub const FALLBACK_CLASS: &str = "warrior";

const DEFAULT_MAX_HEALTH: f64 = 50.0;
const DEFAULT_TO_NEXT_LEVEL: f64 = 100.0;

/// Normalized snapshot of a user's stats; the renderer's only input.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatRecord {
    /// Current health points.
    pub hp: f64,
    /// Health capacity.
    pub max_health: f64,
    /// Current mana points.
    pub mp: f64,
    /// Mana capacity; 0 for classes without mana.
    #[serde(rename = "maxMP")]
    pub max_mp: f64,
    /// Experience within the current level.
    pub exp: f64,
    /// Experience required for the next level.
    pub to_next_level: f64,
    /// Character level.
    pub lvl: u32,
    /// Gold, floored.
    pub gp: u64,
    /// Character class label as reported upstream.
    pub class: String,
}

/// The three bars drawn on a badge, in drawing order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatKind {
    /// `hp / maxHealth`.
    Health,
    /// `exp / toNextLevel`.
    Experience,
    /// `mp / maxMP`.
    Mana,
}

impl StatKind {
    /// Drawing order, top to bottom.
    pub const ALL: [StatKind; 3] = [StatKind::Health, StatKind::Experience, StatKind::Mana];

    /// Row label.
    pub fn label(self) -> &'static str {
        match self {
            StatKind::Health => "Health",
            StatKind::Experience => "Experience",
            StatKind::Mana => "Mana",
        }
    }
}

#[derive(Clone, Copy)]
enum Bound {
    NonNegative,
    Positive,
}

impl StatRecord {
    /// Mock record served by the `mock` mode.
    pub fn sample() -> Self {
        Self {
            hp: 45.0,
            max_health: 50.0,
            mp: 32.0,
            max_mp: 40.0,
            exp: 180.0,
            to_next_level: 250.0,
            lvl: 15,
            gp: 125,
            class: "mage".to_owned(),
        }
    }

    /// Parse a raw `GET /user` body: `{ "data": { "stats": { .. } } }`.
    pub fn from_envelope(body: &str) -> Result<Self, FetchError> {
        let root: Value = serde_json::from_str(body)
            .map_err(|e| FetchError::MalformedResponse(format!("body is not JSON: {e}")))?;

        let data = root
            .get("data")
            .and_then(Value::as_object)
            .ok_or_else(|| FetchError::MalformedResponse("missing `data` object".to_owned()))?;
        let stats = data.get("stats").and_then(Value::as_object).ok_or_else(|| {
            FetchError::MalformedResponse("missing `data.stats` object".to_owned())
        })?;

        tracing::debug!(
            data_keys = data.len(),
            stats_keys = stats.len(),
            "upstream envelope shape"
        );
        Self::from_stats(stats)
    }

    /// Validate presence of [`REQUIRED_FIELDS`] and coerce every value.
    ///
    /// A key holding `null` counts as present and coerces to its default.
    pub fn from_stats(stats: &Map<String, Value>) -> Result<Self, FetchError> {
        let names: Vec<String> = REQUIRED_FIELDS
            .iter()
            .filter(|name| !stats.contains_key(**name))
            .map(|name| (*name).to_owned())
            .collect();
        if !names.is_empty() {
            return Err(FetchError::MissingFields { names });
        }

        let field = |name: &str| stats.get(name);
        let lvl = coerce(field("lvl"), 1.0, Bound::Positive).floor().max(1.0);
        let gp = coerce(field("gp"), 0.0, Bound::NonNegative).floor();

        Ok(Self {
            hp: coerce(field("hp"), 0.0, Bound::NonNegative),
            max_health: coerce(field("maxHealth"), DEFAULT_MAX_HEALTH, Bound::Positive),
            mp: coerce(field("mp"), 0.0, Bound::NonNegative),
            max_mp: coerce(field("maxMP"), 0.0, Bound::NonNegative),
            exp: coerce(field("exp"), 0.0, Bound::NonNegative),
            to_next_level: coerce(field("toNextLevel"), DEFAULT_TO_NEXT_LEVEL, Bound::Positive),
            lvl: lvl.min(f64::from(u32::MAX)) as u32,
            gp: gp as u64,
            class: coerce_class(field("class")),
        })
    }

    /// `(value, max)` for one bar.
    pub fn bar(&self, kind: StatKind) -> (f64, f64) {
        match kind {
            StatKind::Health => (self.hp, self.max_health),
            StatKind::Experience => (self.exp, self.to_next_level),
            StatKind::Mana => (self.mp, self.max_mp),
        }
    }

    /// Title line, e.g. `@mage`.
    pub fn handle(&self) -> String {
        format!("@{}", self.class.to_lowercase())
    }

    /// Subtitle line, e.g. `Level 15 mage`.
    pub fn level_line(&self) -> String {
        format!("Level {} {}", self.lvl, self.class)
    }
}

/// Lenient number conversion; never fails, substitutes `default` instead.
fn coerce(value: Option<&Value>, default: f64, bound: Bound) -> f64 {
    let parsed = match value {
        None | Some(Value::Null) => Some(0.0),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::Bool(b)) => Some(if *b { 1.0 } else { 0.0 }),
        Some(Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                Some(0.0)
            } else {
                s.parse::<f64>().ok()
            }
        }
        Some(Value::Array(_)) | Some(Value::Object(_)) => None,
    };

    match parsed {
        Some(v) if v.is_finite() => match bound {
            Bound::NonNegative if v >= 0.0 => v,
            Bound::Positive if v > 0.0 => v,
            _ => default,
        },
        _ => default,
    }
}

fn coerce_class(value: Option<&Value>) -> String {
    let text = match value {
        Some(Value::String(s)) => s.trim().to_owned(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    };
    if text.is_empty() {
        FALLBACK_CLASS.to_owned()
    } else {
        text
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stats/record.rs"]
mod tests;
