//! The fixed questionnaire.
//!
//! Order here is the order the questions are asked in, and the ids are the
//! keys an [`AppIdea`](crate::AppIdea) is filled with.

use crate::types::Question;

pub const QUESTIONS: &[Question] = &[
    Question {
        id: "problem",
        text: "What problem does your app solve?",
        category: "Problem",
        placeholder: "E.g., \"People struggle to find healthy recipes that match their dietary restrictions\"",
    },
    Question {
        id: "audience",
        text: "Who will use your app?",
        category: "Audience",
        placeholder: "E.g., \"Health-conscious individuals with dietary restrictions\"",
    },
    Question {
        id: "benefit",
        text: "What's the main benefit of your app?",
        category: "Value",
        placeholder: "E.g., \"Saves time finding suitable recipes and reduces frustration\"",
    },
    Question {
        id: "features",
        text: "What are 1-2 key features?",
        category: "Features",
        placeholder: "E.g., \"Recipe filtering by multiple dietary needs, personalized recommendations\"",
    },
    Question {
        id: "uniqueness",
        text: "How will your app be unique?",
        category: "Differentiation",
        placeholder: "E.g., \"Combines dietary filtering with taste preferences unlike other recipe apps\"",
    },
    Question {
        id: "goal",
        text: "What's your goal for the app?",
        category: "Vision",
        placeholder: "E.g., \"Help people enjoy cooking despite dietary restrictions\"",
    },
    Question {
        id: "monetization",
        text: "How might you monetize this app?",
        category: "Business",
        placeholder: "E.g., \"Freemium model with premium recipes and meal planning features\"",
    },
    Question {
        id: "challenges",
        text: "What challenges do you anticipate?",
        category: "Challenges",
        placeholder: "E.g., \"Building a large enough recipe database to be useful\"",
    },
];

/// Number of questions in the questionnaire
pub fn total() -> usize {
    QUESTIONS.len()
}

/// Question at a zero-based position
pub fn at(index: usize) -> Option<&'static Question> {
    QUESTIONS.get(index)
}

/// Look up a question by id
pub fn by_id(id: &str) -> Option<&'static Question> {
    QUESTIONS.iter().find(|q| q.id == id)
}
