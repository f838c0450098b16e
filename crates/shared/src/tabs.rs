//! Tab selection.
//!
//! A [`TabController`] holds exactly one selected tab out of a closed set.
//! Views render only the selected tab; the other panels keep their state.

use std::fmt;

/// A closed set of tabs identified by stable string ids.
pub trait TabSet: Copy + Eq + fmt::Debug + 'static {
    /// Every tab, in display order.
    const ALL: &'static [Self];

    fn id(self) -> &'static str;

    fn title(self) -> &'static str;

    fn from_id(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|tab| tab.id() == id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabController<T: TabSet> {
    selected: T,
}

impl<T: TabSet> TabController<T> {
    pub fn new(initial: T) -> Self {
        Self { selected: initial }
    }

    pub fn selected(&self) -> T {
        self.selected
    }

    pub fn is_selected(&self, tab: T) -> bool {
        self.selected == tab
    }

    /// Select by id. Unknown ids are ignored; returns whether the id was valid.
    pub fn select(&mut self, id: &str) -> bool {
        match T::from_id(id) {
            Some(tab) => {
                self.selected = tab;
                true
            }
            None => {
                tracing::debug!(id, "ignoring unknown tab id");
                false
            }
        }
    }

    pub fn select_tab(&mut self, tab: T) {
        self.selected = tab;
    }

    pub fn tabs(&self) -> &'static [T] {
        T::ALL
    }
}

impl<T: TabSet + Default> Default for TabController<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// Top-level dashboard tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DashboardTab {
    #[default]
    Overview,
    Features,
    Comparison,
    Tech,
    Steam,
    AiAnalysis,
    Community,
    ModelAnalyzer,
}

impl TabSet for DashboardTab {
    const ALL: &'static [Self] = &[
        DashboardTab::Overview,
        DashboardTab::Features,
        DashboardTab::Comparison,
        DashboardTab::Tech,
        DashboardTab::Steam,
        DashboardTab::AiAnalysis,
        DashboardTab::Community,
        DashboardTab::ModelAnalyzer,
    ];

    fn id(self) -> &'static str {
        match self {
            DashboardTab::Overview => "overview",
            DashboardTab::Features => "features",
            DashboardTab::Comparison => "comparison",
            DashboardTab::Tech => "tech",
            DashboardTab::Steam => "steam",
            DashboardTab::AiAnalysis => "ai",
            DashboardTab::Community => "community",
            DashboardTab::ModelAnalyzer => "vrm",
        }
    }

    fn title(self) -> &'static str {
        match self {
            DashboardTab::Overview => "Overview",
            DashboardTab::Features => "Features",
            DashboardTab::Comparison => "Comparison",
            DashboardTab::Tech => "Tech Stack",
            DashboardTab::Steam => "Steam Release",
            DashboardTab::AiAnalysis => "AI Analysis",
            DashboardTab::Community => "Community",
            DashboardTab::ModelAnalyzer => "VRM Analyzer",
        }
    }
}

/// Tabs over a finished AI analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InsightTab {
    #[default]
    Summary,
    Insights,
    Suggestions,
    Technical,
}

impl TabSet for InsightTab {
    const ALL: &'static [Self] = &[
        InsightTab::Summary,
        InsightTab::Insights,
        InsightTab::Suggestions,
        InsightTab::Technical,
    ];

    fn id(self) -> &'static str {
        match self {
            InsightTab::Summary => "summary",
            InsightTab::Insights => "insights",
            InsightTab::Suggestions => "suggestions",
            InsightTab::Technical => "technical",
        }
    }

    fn title(self) -> &'static str {
        match self {
            InsightTab::Summary => "AI Summary",
            InsightTab::Insights => "Insights",
            InsightTab::Suggestions => "Suggestions",
            InsightTab::Technical => "Technical",
        }
    }
}
