//! Placeholder content attached to generated results.
//!
//! None of this is computed. It is kept in one place so the views can label
//! it and so a real analysis can replace it without touching the panels.

use crate::results::{CommunityMetrics, Impact, Insight, Issue, Sentiment, Severity};

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn project_insights() -> Vec<Insight> {
    vec![
        Insight::new(
            "Performance",
            "Memory Optimization Potential",
            "Unity-based desktop apps can benefit from texture streaming and LOD systems for VRM models",
            85,
            Impact::High,
        ),
        Insight::new(
            "User Engagement",
            "AI-Powered Interactions",
            "Integrate conversational AI to make avatars more interactive and engaging",
            90,
            Impact::High,
        ),
        Insight::new(
            "Market Position",
            "Competitive Advantage",
            "Free and open-source nature provides strong differentiation from paid alternatives",
            95,
            Impact::Medium,
        ),
        Insight::new(
            "Technical",
            "Cross-Platform Expansion",
            "Consider expanding beyond Windows to reach broader audience",
            75,
            Impact::Medium,
        ),
    ]
}

pub fn feature_suggestions() -> Vec<String> {
    owned(&[
        "Implement AI-powered avatar conversations using LLM integration",
        "Add real-time emotion recognition to make avatars more responsive",
        "Create an AI-assisted VRM model optimizer for better performance",
        "Develop community-driven AI training for personalized avatar behaviors",
        "Integrate with popular streaming platforms for enhanced interaction",
    ])
}

pub fn technical_recommendations() -> Vec<String> {
    owned(&[
        "Implement GPU-accelerated animation blending for smoother transitions",
        "Use Unity's Addressable Asset System for efficient model loading",
        "Add configurable quality settings for different hardware capabilities",
        "Implement proper multi-threading for animation and physics calculations",
        "Create modular plugin architecture for community extensions",
    ])
}

pub fn community_metrics() -> CommunityMetrics {
    CommunityMetrics {
        engagement: 78,
        growth: 145,
        sentiment: Sentiment::Positive,
        top_topics: owned(&[
            "VRM Model Optimization",
            "Animation System Improvements",
            "Steam Release Discussion",
            "Custom Shader Development",
            "Performance Optimization",
            "Community Model Sharing",
        ]),
        recommendations: owned(&[
            "Create a Discord server for real-time community interaction",
            "Establish a model sharing marketplace or gallery",
            "Host monthly community challenges for VRM creation",
            "Develop comprehensive modding documentation",
            "Partner with VTuber communities for cross-promotion",
            "Create tutorial content for Unity developers",
        ]),
        narrative: String::new(),
    }
}

pub fn format_issue() -> Issue {
    Issue {
        severity: Severity::Info,
        message: "VRM format detected - compatible with Mate Engine".into(),
        suggestion: Some("Ensure proper bone hierarchy and blend shapes for animations".into()),
    }
}

pub fn model_optimizations() -> Vec<String> {
    owned(&[
        "Compress textures using Unity's texture compression",
        "Reduce polygon count for non-essential geometry",
        "Optimize blend shapes for better animation performance",
        "Use LOD (Level of Detail) system for distant viewing",
        "Implement texture atlasing to reduce draw calls",
    ])
}
