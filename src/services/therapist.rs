use rand::seq::SliceRandom;

pub const GREETING: &str = "Hello! I'm your AI therapist. I'm here to listen and help you work through whatever's on your mind. How are you feeling today?";

const REPLIES: [&str; 5] = [
    "I understand how you're feeling. Could you tell me more about that?",
    "That sounds challenging. How long have you been feeling this way?",
    "I hear you. What do you think triggered these feelings?",
    "Let's explore that further. How does this affect your daily life?",
    "It's normal to feel this way. What usually helps you cope with similar situations?",
];

/// Canned reply to a chat message. Holds no conversation state.
pub fn reply_to<R: rand::Rng + ?Sized>(message: &str, rng: &mut R) -> Option<&'static str> {
    if message.trim().is_empty() {
        return None;
    }
    REPLIES.choose(rng).copied()
}
