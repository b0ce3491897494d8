use axum::{extract::Path, Json};

use crate::dto::{MoodListResponse, MoodPromptsResponse};
use crate::models::mood::{Mood, MusicProfile};
use crate::services::prompts::questions_for;

pub async fn list_moods() -> Json<MoodListResponse> {
    Json(MoodListResponse {
        moods: Mood::all().iter().map(Mood::info).collect(),
    })
}

/// Questions for a mood label. Unknown labels get the fallback questions
/// rather than a 404, so clients can always start a journal entry.
pub async fn get_mood_prompts(Path(label): Path<String>) -> Json<MoodPromptsResponse> {
    let mood = Mood::from_label(&label);

    Json(MoodPromptsResponse {
        mood: mood.map(|m| m.info()),
        questions: questions_for(Some(&label)).to_vec(),
        actions: mood.map(|m| m.recommended_actions().to_vec()).unwrap_or_default(),
        music: mood.map_or(MusicProfile::NEUTRAL, |m| m.music_profile()),
    })
}
