//! Fixed facts about the Mate Engine project shown on the dashboard.
//!
//! Everything here is read-only and lives for the whole process.

use chrono::NaiveDate;

use crate::metrics;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepositoryFact {
    pub name: &'static str,
    pub description: &'static str,
    pub stars: u32,
    pub forks: u32,
    pub language: &'static str,
    pub size: &'static str,
    pub license: &'static str,
    /// ISO date, e.g. "2024-12-15"
    pub last_update: &'static str,
}

impl RepositoryFact {
    pub fn last_update_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.last_update, "%Y-%m-%d").ok()
    }

    /// Human readable last update, falling back to the raw string.
    pub fn last_update_label(&self) -> String {
        self.last_update_date()
            .map(|d| d.format("%B %-d, %Y").to_string())
            .unwrap_or_else(|| self.last_update.to_string())
    }
}

// Star and fork counts are estimates.
pub const REPOSITORY: RepositoryFact = RepositoryFact {
    name: "Mate-Engine",
    description: "A free, lightweight alternative to Desktop Mate with custom VRM support and modding. Fewer limitations, more freedom.",
    stars: 150,
    forks: 25,
    language: "C#",
    size: "~50MB",
    license: "Mixed - GNU AGPL v3 & Copyrighted Components",
    last_update: "2024-12-15",
};

pub const FEATURES: &[&str] = &[
    "Custom VRM Model Support",
    "Free and Open Source",
    "Advanced Shader Support",
    "Mod Support",
    "Smooth Animation Transitions",
    "Touch Reactions",
    "Dance Animation",
    "Particle Effects",
    "FPS Control",
    "Always-on-Top Toggle",
    "Chibi Mode",
];

pub const UPCOMING_FEATURES: &[&str] = &[
    "Wallpaper Engine Integration",
    "Window & Taskbar Sitting",
    "Menu Color Customization",
];

pub const HIGHLIGHTS: &[&str] = &[
    "Free & Open Source",
    "VRM Model Support",
    "Mod Support",
    "Unity Engine",
    "Advanced Animations",
];

/// One cell of the comparison table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Support {
    Supported,
    Unsupported,
    /// Paused, paid-only or planned; the note says which.
    Partial(Option<&'static str>),
}

impl Support {
    pub fn symbol(self) -> &'static str {
        match self {
            Support::Supported => "✅",
            Support::Unsupported => "❌",
            Support::Partial(_) => "⏸",
        }
    }

    pub fn label(self) -> String {
        match self {
            Support::Partial(Some(note)) => format!("{} ({})", self.symbol(), note),
            _ => self.symbol().to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureComparisonRow {
    pub feature: &'static str,
    pub desktop_mate: Support,
    pub mate_engine: Support,
}

const fn row(
    feature: &'static str,
    desktop_mate: Support,
    mate_engine: Support,
) -> FeatureComparisonRow {
    FeatureComparisonRow {
        feature,
        desktop_mate,
        mate_engine,
    }
}

use Support::{Partial, Supported, Unsupported};

pub const FEATURE_COMPARISON: &[FeatureComparisonRow] = &[
    row("Custom Shader Support", Unsupported, Supported),
    row("Advanced .ME Model Format", Unsupported, Supported),
    row("Mod Support", Unsupported, Supported),
    row("Custom Model Support (.VRM, .ME)", Unsupported, Supported),
    row("Window Sitting", Supported, Partial(Some("v1.5.0"))),
    row("Taskbar Sitting", Supported, Partial(None)),
    row("Dragging Animation", Supported, Supported),
    row("Idle Animation", Supported, Supported),
    row("Eye Movement", Unsupported, Supported),
    row("Spine Movement", Unsupported, Supported),
    row("Touch Reactions", Partial(None), Supported),
    row("Sound Effects", Partial(Some("Paid Only")), Supported),
    row("Particle Effects", Unsupported, Supported),
    row("Smooth Animation Transitions", Unsupported, Supported),
    row("FPS Control", Unsupported, Supported),
    row("Always-on-Top Toggle", Unsupported, Supported),
    row("Open Source", Unsupported, Supported),
    row("Chibi Mode", Unsupported, Supported),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TechUsage {
    pub name: &'static str,
    /// 0..=100
    pub usage: u8,
}

impl TechUsage {
    pub fn fraction(&self) -> f32 {
        metrics::progress_fraction(f64::from(self.usage))
    }
}

pub const TECH_STACK: &[TechUsage] = &[
    TechUsage { name: "Unity Engine", usage: 85 },
    TechUsage { name: "C# Scripts", usage: 70 },
    TechUsage { name: "VRM Support", usage: 90 },
    TechUsage { name: "Animation System", usage: 80 },
    TechUsage { name: "Shader Development", usage: 75 },
];

pub const PERFORMANCE_NOTE: &str =
    "Mate Engine is lightweight and efficient. RAM usage depends on the avatar's texture size.";
pub const PERFORMANCE_EXAMPLE_TITLE: &str = "Example: \"Alice\" Model";
pub const PERFORMANCE_EXAMPLE: &str = "~190MB texture memory → ~200MB total RAM usage";

/// Funding raised against a target. The percentage is always derived.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FundingProgress {
    raised: f64,
    target: f64,
}

impl FundingProgress {
    /// `None` unless the target is positive and both amounts are finite.
    pub fn new(raised: f64, target: f64) -> Option<Self> {
        if raised.is_finite() && target.is_finite() && target > 0.0 {
            Some(Self { raised, target })
        } else {
            None
        }
    }

    pub fn raised(&self) -> f64 {
        self.raised
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    /// Exact percentage, may exceed 100.
    pub fn percentage(&self) -> f64 {
        metrics::funding_percentage(self.raised, self.target)
    }

    /// Progress bar input, capped at 100.
    pub fn bar_percentage(&self) -> f64 {
        metrics::bar_percentage(self.percentage())
    }

    pub fn bar_fraction(&self) -> f32 {
        metrics::progress_fraction(self.percentage())
    }

    pub fn target_exceeded(&self) -> bool {
        self.raised >= self.target
    }

    /// "$239.34 / $100"
    pub fn amounts_label(&self) -> String {
        format!("${} / ${}", self.raised, self.target)
    }

    /// "239% funded - Target exceeded!"
    pub fn status_label(&self) -> String {
        let mut label = format!("{:.0}% funded", self.percentage());
        if self.target_exceeded() {
            label.push_str(" - Target exceeded!");
        }
        label
    }
}

pub const STEAM_FUNDING: FundingProgress = FundingProgress {
    raised: 239.34,
    target: 100.0,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Supporter {
    /// Masked by the source page
    pub name: &'static str,
    pub amount: f64,
}

pub const TOP_SUPPORTERS: &[Supporter] = &[
    Supporter { name: "Gra**** Ja*****", amount: 94.00 },
    Supporter { name: "Co**** Da*****", amount: 96.00 },
    Supporter { name: "Dym**** Sk*****", amount: 5.59 },
    Supporter { name: "Dreezer", amount: 45.00 },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReleaseDetails {
    pub target_date: &'static str,
    pub price: &'static str,
}

impl ReleaseDetails {
    pub fn target_date_label(&self) -> String {
        NaiveDate::parse_from_str(self.target_date, "%Y-%m-%d")
            .map(|d| d.format("%B %-d, %Y").to_string())
            .unwrap_or_else(|_| self.target_date.to_string())
    }
}

pub const STEAM_RELEASE: ReleaseDetails = ReleaseDetails {
    target_date: "2025-03-26",
    price: "$3.99 on Steam (always free on GitHub)",
};

pub const MOTIVATION: &str = "Desktop Mate charges $10–$25 USD for single character models—prices comparable to full games on Steam. Additionally, modding and custom models were disabled in later versions.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueProp {
    pub title: &'static str,
    pub detail: &'static str,
}

pub const VALUE_PROPS: &[ValueProp] = &[
    ValueProp { title: "Completely Free", detail: "No cost for models or features" },
    ValueProp { title: "Custom VRM Support", detail: "Load any valid VRM model" },
    ValueProp { title: "Open Source & Moddable", detail: "Full customization freedom" },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarketTrend {
    pub category: &'static str,
    pub value: u8,
    pub change: u8,
    pub description: &'static str,
}

impl MarketTrend {
    pub fn fraction(&self) -> f32 {
        metrics::progress_fraction(f64::from(self.value))
    }

    pub fn emphasized(&self) -> bool {
        metrics::trend_is_emphasized(self.change)
    }
}

pub const MARKET_TRENDS: &[MarketTrend] = &[
    MarketTrend {
        category: "VRM Adoption",
        value: 89,
        change: 23,
        description: "Growing interest in VRM avatars across platforms",
    },
    MarketTrend {
        category: "Desktop Companions",
        value: 67,
        change: 15,
        description: "Increasing demand for interactive desktop apps",
    },
    MarketTrend {
        category: "Open Source Gaming",
        value: 82,
        change: 31,
        description: "Strong preference for open-source alternatives",
    },
    MarketTrend {
        category: "Unity Development",
        value: 74,
        change: 8,
        description: "Steady growth in Unity-based indie projects",
    },
];

pub const STEAM_POSITIVE_FACTORS: &[&str] = &[
    "Exceeded funding target by 239%",
    "Strong supporter base with high-value backers",
    "Remains free on GitHub (good PR)",
    "Reasonable Steam price point ($3.99)",
];

pub const STEAM_OPPORTUNITIES: &[&str] = &[
    "Steam Workshop integration potential",
    "Broader audience exposure",
    "Community features and achievements",
    "User-generated content marketplace",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExternalLink {
    pub label: &'static str,
    pub url: &'static str,
}

pub const LINKS: &[ExternalLink] = &[
    ExternalLink {
        label: "View on GitHub",
        url: "https://github.com/shinyflvre/Mate-Engine",
    },
    ExternalLink {
        label: "Download Latest Release",
        url: "https://github.com/shinyflvre/Mate-Engine/releases",
    },
    ExternalLink {
        label: "Get Hatsune Miku VRM",
        url: "https://booth.pm/en/items/1025226",
    },
];
