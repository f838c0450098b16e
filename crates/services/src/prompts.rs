//! Prompt text for each generation request.

use shared::facts::{FundingProgress, ReleaseDetails, TOP_SUPPORTERS};
use shared::metrics::format_mib;
use shared::selection::ModelFile;

const PROJECT_CONTEXT: &str = "Mate Engine is a free, open-source desktop companion app built in Unity with C#. \
It is an alternative to Desktop Mate, which charges $10-25 for models, and supports VRM avatars, \
custom animations, touch reactions, and modding.";

const PROJECT_FEATURES: &[&str] = &[
    "VRM (Virtual Reality Model) avatar support",
    "Advanced animation system with smooth transitions",
    "Touch reactions and interactive elements",
    "Custom shader support and mod capabilities",
    "Dance animations that react to music",
    "Particle effects and visual enhancements",
    "Always-on-top window management",
    "Chibi mode and FPS controls",
];

fn bullets(items: &[&str]) -> String {
    items
        .iter()
        .map(|item| format!("- {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}

fn numbered(items: &[&str]) -> String {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{}. {}", i + 1, item))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn project_analysis_prompt() -> String {
    format!(
        "Analyze the Mate Engine project.\n\n{}\n\nKey features:\n{}\n\nPlease provide:\n{}\n\n\
         Format your response as a comprehensive analysis with specific, actionable insights.",
        PROJECT_CONTEXT,
        bullets(PROJECT_FEATURES),
        numbered(&[
            "Technical analysis of the project's strengths and potential areas for improvement",
            "Insights about the desktop companion market",
            "Feature suggestions that would enhance user engagement",
            "Performance optimization recommendations for Unity-based desktop apps",
            "Community growth strategies for open-source avatar/companion projects",
        ]),
    )
}

/// The question is embedded verbatim, quoted.
pub fn chat_prompt(question: &str) -> String {
    format!(
        "You are an expert on the Mate Engine project, a Unity-based desktop companion app.\n\n\
         User question: \"{}\"\n\nContext: {}\n\n\
         Please provide a helpful, detailed response related to the project.",
        question, PROJECT_CONTEXT,
    )
}

pub fn community_prompt(funding: &FundingProgress, release: &ReleaseDetails) -> String {
    // The two largest contributions
    let mut amounts: Vec<f64> = TOP_SUPPORTERS.iter().map(|s| s.amount).collect();
    amounts.sort_by(|a, b| b.total_cmp(a));
    let top_range = match amounts.as_slice() {
        [high, low, ..] => format!("${:.0}-{:.0} from top supporters", low, high),
        [only] => format!("${:.0} from the top supporter", only),
        [] => "early supporters".to_string(),
    };
    let funding_line = if funding.target_exceeded() {
        format!("{} raised for the Steam release (target exceeded)", funding.amounts_label())
    } else {
        format!("{} raised for the Steam release", funding.amounts_label())
    };

    format!(
        "Analyze the Mate Engine open-source project community and provide insights.\n\n\
         Project context:\n{}\n\nPlease analyze:\n{}\n\n\
         Provide specific, actionable insights for community growth and engagement.",
        bullets(&[
            "Unity-based desktop companion app (alternative to Desktop Mate)",
            "Features VRM avatar support, animations, touch reactions",
            "Completely free and open-source",
            &format!(
                "Steam release planned for {} ({})",
                release.target_date_label(),
                release.price
            ),
            &funding_line,
            &format!("Supporters contributing significant amounts ({})", top_range),
        ]),
        numbered(&[
            "Community engagement potential and current state",
            "Growth opportunities for open-source avatar/companion projects",
            "Key discussion topics and user interests in this space",
            "Recommendations for building a stronger community",
            "Market trends in desktop companions and VRM avatars",
        ]),
    )
}

pub fn model_file_prompt(file: &ModelFile) -> String {
    format!(
        "Analyze this VRM/GLB file for compatibility with Mate Engine (Unity-based desktop companion app).\n\n\
         File details:\n{}\n\nPlease provide analysis on:\n{}\n\n\
         Consider Unity engine limitations and desktop companion app requirements. \
         Focus on practical recommendations for optimal performance.",
        bullets(&[
            &format!("Name: {}", file.name),
            &format!("Size: {}", format_mib(file.size_bytes)),
            &format!("Type: {}", file.mime_type),
        ]),
        numbered(&[
            "Mate Engine compatibility assessment",
            "Potential performance impact",
            "Common VRM issues to check for",
            "Optimization recommendations",
            "Estimated memory usage and rendering performance",
        ]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::facts::{STEAM_FUNDING, STEAM_RELEASE};
    use shared::metrics::MIB;

    #[test]
    fn test_chat_prompt_quotes_question() {
        let prompt = chat_prompt("How do I add a dance?");
        assert!(prompt.contains("User question: \"How do I add a dance?\""));
        assert!(prompt.contains("VRM avatars"));
    }

    #[test]
    fn test_project_prompt_lists_features() {
        let prompt = project_analysis_prompt();
        assert!(prompt.contains("- Chibi mode and FPS controls"));
        assert!(prompt.contains("5. Community growth strategies"));
    }

    #[test]
    fn test_community_prompt_mentions_funding() {
        let prompt = community_prompt(&STEAM_FUNDING, &STEAM_RELEASE);
        assert!(prompt.contains("$239.34 / $100 raised"));
        assert!(prompt.contains("target exceeded"));
        assert!(prompt.contains("March 26, 2025"));
        assert!(prompt.contains("$94-96 from top supporters"));
    }

    #[test]
    fn test_model_prompt_describes_file() {
        let file = ModelFile::new("alice.vrm", 5 * MIB / 2, "model/gltf-binary");
        let prompt = model_file_prompt(&file);
        assert!(prompt.contains("- Name: alice.vrm"));
        assert!(prompt.contains("- Size: 2.50 MB"));
        assert!(prompt.contains("- Type: model/gltf-binary"));
    }
}
