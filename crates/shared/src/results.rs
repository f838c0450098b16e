//! Result records produced by the async panels.
//!
//! Each record keeps the text returned by the generation service apart from
//! the placeholder content attached to it (see [`crate::canned`]).

use crate::canned;
use crate::metrics;
use crate::selection::ModelFile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Impact {
    High,
    Medium,
    Low,
}

impl Impact {
    pub fn as_str(&self) -> &'static str {
        match self {
            Impact::High => "high",
            Impact::Medium => "medium",
            Impact::Low => "low",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insight {
    pub category: String,
    pub title: String,
    pub description: String,
    /// 0..=100
    pub confidence: u8,
    pub impact: Impact,
}

impl Insight {
    pub fn new(
        category: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        confidence: u8,
        impact: Impact,
    ) -> Self {
        Self {
            category: category.into(),
            title: title.into(),
            description: description.into(),
            confidence: confidence.min(100),
            impact,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiAnalysisResult {
    /// Generated text, shown verbatim
    pub summary: String,
    pub insights: Vec<Insight>,
    pub suggestions: Vec<String>,
    pub technical_recommendations: Vec<String>,
}

impl AiAnalysisResult {
    pub fn from_summary(summary: String) -> Self {
        Self {
            summary,
            insights: canned::project_insights(),
            suggestions: canned::feature_suggestions(),
            technical_recommendations: canned::technical_recommendations(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommunityMetrics {
    pub engagement: u32,
    /// May exceed 100; bars clamp it
    pub growth: u32,
    pub sentiment: Sentiment,
    pub top_topics: Vec<String>,
    pub recommendations: Vec<String>,
    /// Generated text
    pub narrative: String,
}

impl CommunityMetrics {
    pub fn from_narrative(narrative: String) -> Self {
        let mut metrics = canned::community_metrics();
        metrics.narrative = narrative;
        metrics
    }

    pub fn engagement_fraction(&self) -> f32 {
        metrics::progress_fraction(f64::from(self.engagement))
    }

    pub fn growth_fraction(&self) -> f32 {
        metrics::progress_fraction(f64::from(self.growth))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Compatibility {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl Compatibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Compatibility::Excellent => "excellent",
            Compatibility::Good => "good",
            Compatibility::Fair => "fair",
            Compatibility::Poor => "poor",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub severity: Severity,
    pub message: String,
    pub suggestion: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerformanceEstimate {
    pub memory: String,
    pub rendering: String,
    pub animation: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VrmAnalysisResult {
    /// Name of the file this result belongs to
    pub file_name: String,
    pub compatibility: Compatibility,
    /// 20..=100
    pub score: f64,
    pub issues: Vec<Issue>,
    pub optimizations: Vec<String>,
    pub performance: PerformanceEstimate,
    /// Generated text
    pub narrative: String,
    pub public_url: Option<String>,
}

impl VrmAnalysisResult {
    /// Size-derived assessment of `file` plus the generated narrative.
    pub fn assess(file: &ModelFile, narrative: String, public_url: Option<String>) -> Self {
        let size = file.size_bytes;
        let size_issue = Issue {
            severity: metrics::issue_severity(size),
            message: format!("File size: {}", metrics::format_mib(size)),
            suggestion: Some(metrics::size_suggestion(size).to_string()),
        };

        Self {
            file_name: file.name.clone(),
            compatibility: metrics::compatibility_tier(size),
            score: metrics::compatibility_score(size),
            issues: vec![size_issue, canned::format_issue()],
            optimizations: canned::model_optimizations(),
            performance: PerformanceEstimate {
                memory: metrics::memory_estimate_label(size).to_string(),
                rendering: metrics::rendering_estimate_label(size).to_string(),
                animation: metrics::animation_estimate_label().to_string(),
            },
            narrative,
            public_url,
        }
    }

    pub fn score_fraction(&self) -> f32 {
        metrics::progress_fraction(self.score)
    }

    /// "87/100"
    pub fn score_label(&self) -> String {
        format!("{:.0}/100", self.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::MIB;

    #[test]
    fn test_insight_confidence_clamped() {
        let insight = Insight::new("Tech", "Title", "Desc", 140, Impact::Low);
        assert_eq!(insight.confidence, 100);
    }

    #[test]
    fn test_analysis_keeps_generated_summary() {
        let result = AiAnalysisResult::from_summary("generated".into());
        assert_eq!(result.summary, "generated");
        assert_eq!(result.insights.len(), 4);
        assert!(result.insights.iter().all(|i| i.confidence <= 100));
        assert_eq!(result.suggestions.len(), 5);
        assert_eq!(result.technical_recommendations.len(), 5);
    }

    #[test]
    fn test_growth_is_display_clamped() {
        let metrics = CommunityMetrics::from_narrative("text".into());
        assert_eq!(metrics.growth, 145);
        assert_eq!(metrics.growth_fraction(), 1.0);
        assert!((metrics.engagement_fraction() - 0.78).abs() < 1e-6);
        assert_eq!(metrics.sentiment, Sentiment::Positive);
        assert_eq!(metrics.narrative, "text");
    }

    #[test]
    fn test_small_model_assessment() {
        let file = ModelFile::new("avatar.vrm", 5 * MIB, "model/vrm");
        let result = VrmAnalysisResult::assess(&file, "looks fine".into(), None);

        assert_eq!(result.file_name, "avatar.vrm");
        assert_eq!(result.compatibility, Compatibility::Excellent);
        assert_eq!(result.score_label(), "90/100");
        assert_eq!(result.issues[0].severity, Severity::Info);
        assert_eq!(result.issues[0].message, "File size: 5.00 MB");
        assert_eq!(result.performance.memory, "Low (< 100MB)");
        assert_eq!(result.performance.rendering, "Excellent");
    }

    #[test]
    fn test_large_model_assessment() {
        let file = ModelFile::new("heavy.glb", 60 * MIB, "model/gltf-binary");
        let result = VrmAnalysisResult::assess(&file, String::new(), Some("https://x/y".into()));

        assert_eq!(result.compatibility, Compatibility::Fair);
        assert_eq!(result.score, 20.0);
        assert_eq!(result.issues[0].severity, Severity::Warning);
        assert_eq!(
            result.issues[0].suggestion.as_deref(),
            Some("Consider optimizing textures to reduce memory usage")
        );
        assert_eq!(result.performance.memory, "High (> 200MB)");
        assert_eq!(result.public_url.as_deref(), Some("https://x/y"));
    }
}
