//! Template-substitution assistant.

use super::IdeaAssistant;
use crate::types::AppIdea;

/// Number of suggestions shown on the summary screen
pub const SUGGESTION_COUNT: usize = 5;

/// Generic suggestions used to pad the list when few answers were given
pub const FALLBACK_SUGGESTIONS: [&str; SUGGESTION_COUNT] = [
    "Consider creating a simple prototype or MVP to test your core assumptions before building the full app.",
    "User onboarding is critical - design a simple, engaging first-time user experience that showcases your app's value.",
    "Think about how your app will evolve over time. What features might you add in version 2.0?",
    "Research shows that apps with regular updates retain users better. Plan for a consistent update schedule.",
    "Consider how you'll gather and incorporate user feedback from the beginning.",
];

/// Keyword family a chat message is routed to. Checked in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyTopic {
    Features,
    Monetization,
    Challenges,
    Market,
    General,
}

impl ReplyTopic {
    const ROUTES: [(ReplyTopic, &'static [&'static str]); 4] = [
        (ReplyTopic::Features, &["feature", "functionality"]),
        (ReplyTopic::Monetization, &["monetiz", "revenue", "business"]),
        (ReplyTopic::Challenges, &["challenge", "problem", "issue"]),
        (ReplyTopic::Market, &["market", "competitor", "research"]),
    ];

    /// First topic whose keywords appear in the lowercased message
    pub fn classify(message: &str) -> Self {
        let lower = message.to_lowercase();
        Self::ROUTES
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
            .map(|(topic, _)| *topic)
            .unwrap_or(ReplyTopic::General)
    }
}

/// Fills fixed templates with the user's answers.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateAssistant;

fn or<'a>(idea: &'a AppIdea, id: &str, fallback: &'a str) -> &'a str {
    idea.answer(id).unwrap_or(fallback)
}

impl IdeaAssistant for TemplateAssistant {
    fn suggestions(&self, idea: &AppIdea) -> Vec<String> {
        let mut out = Vec::new();

        if let (Some(audience), Some(problem)) = (idea.answer("audience"), idea.answer("problem")) {
            out.push(format!(
                "Consider adding a community feature where {} can share their experiences with {} and support each other.",
                audience, problem
            ));
        }

        if let Some(features) = idea.answer("features") {
            out.push(format!(
                "You might want to explore integrating with existing services that complement your {} to provide a more comprehensive solution.",
                features
            ));
        }

        if let Some(benefit) = idea.answer("benefit") {
            out.push(format!(
                "Adding analytics to track how users experience the benefit of \"{}\" could provide valuable insights for future improvements.",
                benefit
            ));
        }

        if let Some(monetization) = idea.answer("monetization") {
            out.push(format!(
                "Your monetization approach of \"{}\" could be enhanced by offering tiered pricing based on usage levels or feature access.",
                monetization
            ));
        } else if let Some(audience) = idea.answer("audience") {
            out.push(format!(
                "Based on your target audience of {}, a subscription model with a free tier might be an effective monetization strategy.",
                audience
            ));
        }

        match idea.answer("challenges") {
            Some(challenges) => out.push(format!(
                "To address the challenge of \"{}\", consider implementing a phased rollout strategy and gathering early user feedback.",
                challenges
            )),
            None => out.push(
                "A common challenge for apps in this space is user retention. Consider implementing engagement features like achievements or progress tracking."
                    .to_string(),
            ),
        }

        if let Some(uniqueness) = idea.answer("uniqueness") {
            out.push(format!(
                "Your unique approach of \"{}\" could be highlighted in your marketing to differentiate from competitors.",
                uniqueness
            ));
        }

        if let Some(goal) = idea.answer("goal") {
            out.push(format!(
                "To achieve your goal of \"{}\", consider creating measurable milestones and tracking your progress against them.",
                goal
            ));
        }

        if out.len() < SUGGESTION_COUNT {
            out.extend(FALLBACK_SUGGESTIONS.iter().map(|s| s.to_string()));
        }
        out.truncate(SUGGESTION_COUNT);
        out
    }

    fn greeting(&self, idea: &AppIdea) -> String {
        let problem = or(idea, "problem", "your problem");
        let audience = or(idea, "audience", "your audience");
        let features = or(idea, "features", "key features");

        format!(
            "Hi there! I'm your AI brainstorming assistant. I've reviewed your app idea about solving {problem} for {audience}. Let's explore this further! You can ask me about:

1. How to refine your value proposition
2. Ideas for additional features beyond {features}
3. Potential challenges and how to overcome them
4. Market research suggestions
5. Technical implementation considerations

What aspect of your app idea would you like to discuss first?"
        )
    }

    fn reply(&self, idea: &AppIdea, message: &str) -> String {
        let problem = or(idea, "problem", "the problem");
        let audience = or(idea, "audience", "the target audience");
        let benefit = or(idea, "benefit", "the main benefit");
        let features = or(idea, "features", "the features");
        let uniqueness = or(idea, "uniqueness", "unique aspects");
        let monetization = or(idea, "monetization", "monetization strategy");

        match ReplyTopic::classify(message) {
            ReplyTopic::Features => format!(
                "Based on your goal to solve {problem} for {audience}, here are some additional feature ideas:

1. A personalized dashboard that tracks user progress and engagement
2. Integration with existing tools that {audience} already uses
3. Community features where users can share their experiences
4. Analytics to help users understand how they're benefiting
5. Customizable notifications based on user preferences

Which of these features resonates most with your vision?"
            ),
            ReplyTopic::Monetization => format!(
                "For monetizing an app that {benefit}, you have several options:

1. Freemium model: Basic features free, premium features paid
2. Subscription tiers: Different levels of access at different price points
3. One-time purchase with optional add-ons
4. Partnership with businesses that serve {audience}
5. In-app purchases for enhanced functionality

Your current thinking about {monetization} is a good starting point. Would you like to explore any of these alternatives in more depth?"
            ),
            ReplyTopic::Challenges => format!(
                "When building an app for {audience} that addresses {problem}, you might face these challenges:

1. User acquisition and retention
2. Differentiating from competitors who also offer {uniqueness}
3. Technical implementation of {features}
4. Scaling as your user base grows
5. Keeping the app engaging over time

Which of these concerns you most, and would you like to brainstorm solutions?"
            ),
            ReplyTopic::Market => format!(
                "To better understand the market for an app that {benefit} for {audience}, consider:

1. Conducting user interviews with potential customers
2. Analyzing competitors who also address {problem}
3. Testing a simple landing page to gauge interest
4. Joining communities where {audience} gathers
5. Creating a simple prototype to get early feedback

This research will help refine your unique value proposition around {uniqueness}. What research method seems most feasible to start with?"
            ),
            ReplyTopic::General => format!(
                "Thanks for sharing your thoughts about {problem}. To further develop your app idea:

1. Consider how you might enhance {features} to better deliver {benefit}
2. Think about how your approach to {uniqueness} truly sets you apart
3. Explore different ways to connect with {audience}
4. Test assumptions about how users will engage with your solution

What specific aspect of your app would you like to explore next?"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idea(pairs: &[(&str, &str)]) -> AppIdea {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_empty_idea_gets_retention_then_fallbacks() {
        let out = TemplateAssistant.suggestions(&AppIdea::new());
        assert_eq!(out.len(), SUGGESTION_COUNT);
        assert!(out[0].starts_with("A common challenge for apps in this space is user retention."));
        let expected: Vec<String> = FALLBACK_SUGGESTIONS[..4]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(out[1..].to_vec(), expected);
    }

    #[test]
    fn test_problem_and_audience_lead_the_list() {
        let out = TemplateAssistant.suggestions(&idea(&[
            ("problem", "missed medication doses"),
            ("audience", "elderly patients"),
        ]));

        assert_eq!(out.len(), SUGGESTION_COUNT);
        assert!(out[0].contains("missed medication doses"));
        assert!(out[0].contains("elderly patients"));
        assert!(out[1].contains("subscription model with a free tier"));
    }

    #[test]
    fn test_full_idea_truncates_to_five_in_priority_order() {
        let out = TemplateAssistant.suggestions(&idea(&[
            ("problem", "p"),
            ("audience", "a"),
            ("benefit", "b"),
            ("features", "f"),
            ("uniqueness", "u"),
            ("goal", "g"),
            ("monetization", "m"),
            ("challenges", "c"),
        ]));

        assert_eq!(out.len(), SUGGESTION_COUNT);
        assert!(out[0].starts_with("Consider adding a community feature"));
        assert!(out[1].contains("complement your f"));
        assert!(out[2].contains("\"b\""));
        assert!(out[3].contains("monetization approach of \"m\""));
        assert!(out[4].contains("challenge of \"c\""));
        assert!(!out.iter().any(|s| s.contains("\"g\"")));
    }

    #[test]
    fn test_empty_answers_count_as_missing() {
        let out = TemplateAssistant.suggestions(&idea(&[("features", ""), ("goal", "")]));
        assert!(out[0].starts_with("A common challenge"));
    }

    #[test]
    fn test_classify_order_and_case() {
        assert_eq!(ReplyTopic::classify("How do I make REVENUE?"), ReplyTopic::Monetization);
        assert_eq!(ReplyTopic::classify("feature vs business"), ReplyTopic::Features);
        assert_eq!(ReplyTopic::classify("any Issues?"), ReplyTopic::Challenges);
        assert_eq!(ReplyTopic::classify("who are my competitors"), ReplyTopic::Market);
        assert_eq!(ReplyTopic::classify("hello"), ReplyTopic::General);
    }

    #[test]
    fn test_reply_uses_fallback_phrases() {
        let reply = TemplateAssistant.reply(&AppIdea::new(), "tell me something");
        assert!(reply.starts_with("Thanks for sharing your thoughts about the problem."));
        assert!(reply.contains("enhance the features to better deliver the main benefit"));
    }

    #[test]
    fn test_monetization_reply_interpolates_answers() {
        let reply = TemplateAssistant.reply(
            &idea(&[("benefit", "saves time"), ("monetization", "ads")]),
            "Revenue ideas?",
        );
        assert!(reply.starts_with("For monetizing an app that saves time"));
        assert!(reply.contains("Your current thinking about ads"));
    }

    #[test]
    fn test_greeting_mentions_idea() {
        let greeting = TemplateAssistant.greeting(&idea(&[("problem", "noisy offices")]));
        assert!(greeting.contains("about solving noisy offices for your audience"));
        assert!(greeting.contains("beyond key features"));
    }
}
