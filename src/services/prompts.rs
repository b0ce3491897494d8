use crate::models::mood::Mood;

/// Asked when the mood is missing or not one we know.
pub const FALLBACK_QUESTIONS: [&str; 3] = [
    "How are you feeling?",
    "What caused this feeling?",
    "What would help you right now?",
];

impl Mood {
    pub fn questions(&self) -> [&'static str; 3] {
        match self {
            Mood::Happy => [
                "What made you feel happy today?",
                "Who were you with when you felt this happiness?",
                "How can you recreate this feeling in the future?",
            ],
            Mood::Sad => [
                "What triggered this feeling?",
                "Have you felt this way before?",
                "What usually helps you feel better?",
            ],
            Mood::Angry => [
                "What caused your anger?",
                "How did your body feel when you got angry?",
                "What would help you feel calmer right now?",
            ],
            Mood::Calm => [
                "What helped you achieve this peaceful state?",
                "How does your body feel right now?",
                "What activities contribute to your sense of calm?",
            ],
            Mood::Confused => [
                "What's causing you to feel uncertain?",
                "What would help bring more clarity?",
                "Who could you talk to about this?",
            ],
            Mood::Stressed => [
                "What is causing you to feel stressed?",
                "How is this stress affecting your body and mind?",
                "What coping strategies could help you manage this stress?",
            ],
        }
    }
}

/// Journal questions for a mood label; never fails.
pub fn questions_for(label: Option<&str>) -> [&'static str; 3] {
    label
        .and_then(Mood::from_label)
        .map(|mood| mood.questions())
        .unwrap_or(FALLBACK_QUESTIONS)
}
