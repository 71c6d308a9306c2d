use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Low,
    Medium,
    High,
}

impl Tier {
    /// Colour bucket for a displayed RTP: <50 low, 50..70 medium, >=70 high.
    pub fn from_rtp(rtp: u32) -> Self {
        match rtp {
            0..=49 => Tier::Low,
            50..=69 => Tier::Medium,
            _ => Tier::High,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Low => "low",
            Tier::Medium => "medium",
            Tier::High => "high",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MultiplierEntry {
    pub label: String,
    pub tier: Tier,
}

impl MultiplierEntry {
    pub fn new(label: impl Into<String>, tier: Tier) -> Self {
        Self {
            label: label.into(),
            tier,
        }
    }
}

/// Ordered badge table; the seeded index selects by position.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct MultiplierTable(pub Vec<MultiplierEntry>);

impl MultiplierTable {
    pub fn standard() -> Self {
        Self(vec![
            MultiplierEntry::new("3X", Tier::Low),
            MultiplierEntry::new("5X", Tier::Low),
            MultiplierEntry::new("7X", Tier::Medium),
            MultiplierEntry::new("10X", Tier::Medium),
            MultiplierEntry::new("15X", Tier::High),
            MultiplierEntry::new("20X", Tier::High),
        ])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&MultiplierEntry> {
        self.0.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MultiplierEntry> {
        self.0.iter()
    }
}
