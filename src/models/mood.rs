use serde::{Deserialize, Serialize};

/// The fixed set of emotional states a journal entry starts from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Mood {
    Happy,
    Sad,
    Angry,
    Calm,
    Confused,
    Stressed,
}

/// Target audio features for music matching a mood.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct MusicProfile {
    pub valence: f32,
    pub energy: f32,
    pub tempo: u16,
}

impl MusicProfile {
    pub const NEUTRAL: MusicProfile = MusicProfile {
        valence: 0.5,
        energy: 0.5,
        tempo: 100,
    };
}

/// Catalog row as handed to clients.
#[derive(Debug, Clone, Serialize)]
pub struct MoodInfo {
    pub label: &'static str,
    pub glyph: &'static str,
    pub color: &'static str,
}

impl Mood {
    pub fn all() -> [Mood; 6] {
        [
            Mood::Happy,
            Mood::Sad,
            Mood::Angry,
            Mood::Calm,
            Mood::Confused,
            Mood::Stressed,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Mood::Happy => "Happy",
            Mood::Sad => "Sad",
            Mood::Angry => "Angry",
            Mood::Calm => "Calm",
            Mood::Confused => "Confused",
            Mood::Stressed => "Stressed",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Mood::Happy => "😀",
            Mood::Sad => "😢",
            Mood::Angry => "😡",
            Mood::Calm => "😌",
            Mood::Confused => "😕",
            Mood::Stressed => "😫",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Mood::Happy => "#FFD700",
            Mood::Sad => "#1E90FF",
            Mood::Angry => "#DC143C",
            Mood::Calm => "#32CD32",
            Mood::Confused => "#FF8C00",
            Mood::Stressed => "#9932CC",
        }
    }

    pub fn music_profile(&self) -> MusicProfile {
        let (valence, energy, tempo) = match self {
            Mood::Happy => (0.8, 0.8, 120),
            Mood::Sad => (0.2, 0.3, 80),
            Mood::Angry => (0.4, 0.9, 140),
            Mood::Calm => (0.6, 0.3, 90),
            Mood::Confused => (0.5, 0.5, 100),
            Mood::Stressed => (0.3, 0.7, 110),
        };
        MusicProfile { valence, energy, tempo }
    }

    /// Three small things to try right away, before any journaling.
    pub fn recommended_actions(&self) -> [&'static str; 3] {
        match self {
            Mood::Happy => [
                "Journal about what went well today",
                "Share your joy with someone you care about",
                "Practice gratitude meditation",
            ],
            Mood::Sad => [
                "Take a few deep breaths",
                "Listen to comforting music",
                "Reach out to a supportive friend",
            ],
            Mood::Angry => [
                "Practice deep breathing",
                "Go for a walk or exercise",
                "Write down what's bothering you",
            ],
            Mood::Calm => [
                "Practice mindfulness meditation",
                "Set intentions for the day",
                "Enjoy the peaceful moment",
            ],
            Mood::Confused => [
                "Make a list of your thoughts",
                "Talk to someone who can offer perspective",
                "Take a break to clear your mind",
            ],
            Mood::Stressed => [
                "Try a slow breathing exercise",
                "Break your next task into one small step",
                "Step away from screens for a few minutes",
            ],
        }
    }

    /// Case-insensitive lookup by display label.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::all()
            .into_iter()
            .find(|m| m.label().eq_ignore_ascii_case(label))
    }

    pub fn info(&self) -> MoodInfo {
        MoodInfo {
            label: self.label(),
            glyph: self.glyph(),
            color: self.color(),
        }
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
