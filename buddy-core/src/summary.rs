//! Text derived from an [`AppIdea`] for the summary screen.

use crate::types::AppIdea;

const NOT_SPECIFIED: &str = "Not specified";

/// Label used in front of the build prompt inside a share payload
pub const PROMPT_LABEL: &str = "Prompt for ChatAndBuild";

/// Prose description of the idea. Missing answers read "not specified".
pub fn describe(idea: &AppIdea) -> String {
    let field = |id: &str| idea.answer(id).unwrap_or(NOT_SPECIFIED).to_lowercase();

    format!(
        "Your app aims to solve the problem of {} for {}.\nThe main benefit is that it {}.\nKey features include {}.",
        field("problem"),
        field("audience"),
        field("benefit"),
        field("features"),
    )
}

/// One-line build prompt, omitting the parts that were not answered.
pub fn build_prompt(idea: &AppIdea) -> String {
    let parts = [
        idea.answer("problem").map(|v| format!("that solves {}", v)),
        idea.answer("audience").map(|v| format!("for {}", v)),
        idea.answer("features").map(|v| format!("with features like {}", v)),
    ];

    parts
        .into_iter()
        .flatten()
        .fold("Create an app".to_string(), |mut prompt, part| {
            prompt.push(' ');
            prompt.push_str(&part);
            prompt
        })
}

/// Suggested title: the first three words of the problem statement.
pub fn default_title(idea: &AppIdea) -> Option<String> {
    let problem = idea.answer("problem")?;
    let words: Vec<&str> = problem.split(' ').take(3).collect();
    Some(format!("App for {}...", words.join(" ")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idea(pairs: &[(&str, &str)]) -> AppIdea {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_describe_lowercases_and_fills_gaps() {
        let text = describe(&idea(&[("problem", "Lost Keys"), ("features", "")]));
        assert!(
            text.starts_with("Your app aims to solve the problem of lost keys for not specified.")
        );
        assert!(text.ends_with("Key features include not specified."));
    }

    #[test]
    fn test_build_prompt_full() {
        let prompt = build_prompt(&idea(&[
            ("problem", "lost keys"),
            ("audience", "commuters"),
            ("features", "bluetooth tags"),
        ]));
        assert_eq!(
            prompt,
            "Create an app that solves lost keys for commuters with features like bluetooth tags"
        );
    }

    #[test]
    fn test_build_prompt_skips_missing_parts() {
        assert_eq!(
            build_prompt(&idea(&[("audience", "commuters")])),
            "Create an app for commuters"
        );
        assert_eq!(build_prompt(&AppIdea::new()), "Create an app");
    }

    #[test]
    fn test_default_title() {
        assert_eq!(
            default_title(&idea(&[("problem", "People forget to water plants")])),
            Some("App for People forget to...".to_string())
        );
        assert_eq!(default_title(&AppIdea::new()), None);
    }
}
