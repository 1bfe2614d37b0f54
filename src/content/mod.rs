//! Static dashboard content
//!
//! Headings, educational text and footer shown alongside the calculators

use once_cell::sync::Lazy;
use serde::Serialize;

/// One expandable section about AI's environmental impact
#[derive(Debug, Clone, Serialize)]
pub struct ImpactTopic {
    pub icon: &'static str,
    pub title: &'static str,
    pub body: &'static str,
}

/// Everything on the page that is not computed
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub usage_heading: &'static str,
    pub usage_prompt: &'static str,
    pub training_heading: &'static str,
    pub training_prompt: &'static str,
    pub offset_heading: &'static str,
    pub impact_heading: &'static str,
    pub impact_topics: Vec<ImpactTopic>,
    pub solutions_heading: &'static str,
    pub solutions: Vec<&'static str>,
    pub pledge_button: &'static str,
    pub pledge_message: &'static str,
    pub closing_note: &'static str,
    pub footer: Vec<&'static str>,
}

pub static CONTENT: Lazy<Content> = Lazy::new(|| Content {
    title: "⚡ AI Power Meter: Energy & Impact",
    subtitle: "💡 Discover how AI usage consumes energy and affects the environment",
    usage_heading: "🔎 AI Prompt Energy Usage",
    usage_prompt: "Enter the number of AI prompts you generate per day",
    training_heading: "🤖 AI Model Training Impact",
    training_prompt: "Enter the number of small AI models trained",
    offset_heading: "🌳 Carbon Offset Calculator",
    impact_heading: "⚠️ Environmental Impact of AI",
    impact_topics: vec![
        ImpactTopic {
            icon: "🔋",
            title: "Energy Consumption Crisis",
            body: "AI data centers require enormous electricity, increasing grid loads and fossil fuel dependency.",
        },
        ImpactTopic {
            icon: "🌡️",
            title: "Carbon Footprint Increase",
            body: "AI-related CO2 emissions contribute to climate change, raising global temperatures.",
        },
        ImpactTopic {
            icon: "📉",
            title: "E-Waste from AI Hardware",
            body: "The demand for AI accelerates GPU and chip production, leading to more e-waste.",
        },
    ],
    solutions_heading: "🌱 Towards a Greener AI Future",
    solutions: vec![
        "Transition to AI models powered by renewable energy sources.",
        "Optimize AI algorithms for lower energy consumption.",
        "Encourage sustainable AI policies and carbon-neutral data centers.",
    ],
    pledge_button: "I support Green AI! 🌍",
    pledge_message: "Great! Every step towards sustainability counts! 🌿",
    closing_note: "💡 Think before you prompt unnecessarily! AI usage has a real-world environmental cost.",
    footer: vec![
        "Designed & Developed with ♥ by: Vivek Singh",
        "Team: ♥ (Vivek Singh, Aditya Rudola and Madhav Arora)",
        "© 2025 AI Power Meter. All rights reserved.",
    ],
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_sections_present() {
        assert_eq!(CONTENT.impact_topics.len(), 3);
        assert_eq!(CONTENT.solutions.len(), 3);
        assert!(CONTENT.title.contains("AI Power Meter"));
    }

    #[test]
    fn test_content_serializes_camel_case() {
        let json = serde_json::to_value(&*CONTENT).unwrap();
        assert!(json["impactTopics"].is_array());
        assert_eq!(json["pledgeMessage"], CONTENT.pledge_message);
    }
}
