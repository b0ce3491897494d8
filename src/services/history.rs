use std::{collections::HashMap, sync::Arc};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::mood::Mood;

/// A completed journal submission as shown in the history list.
#[derive(Debug, Clone, Serialize)]
pub struct MoodEntry {
    pub id: Uuid,
    pub mood: String,
    pub glyph: Option<&'static str>,
    pub color: Option<&'static str>,
    pub narrative: String,
    pub created_at: DateTime<Utc>,
}

impl MoodEntry {
    pub fn new(mood_label: &str, narrative: &str, created_at: DateTime<Utc>) -> Self {
        let mood = Mood::from_label(mood_label);
        Self {
            id: Uuid::new_v4(),
            mood: mood.map(|m| m.label().to_string()).unwrap_or_else(|| mood_label.to_string()),
            glyph: mood.map(|m| m.glyph()),
            color: mood.map(|m| m.color()),
            narrative: narrative.to_string(),
            created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MonthGroup {
    pub month: String,
    pub entries: Vec<MoodEntry>,
}

#[derive(Debug, Serialize)]
pub struct HistoryStats {
    pub total: usize,
    pub by_mood: HashMap<String, usize>,
    pub latest_glyph: Option<&'static str>,
}

/// In-memory, per-user history (single-instance; cleared on restart).
#[derive(Clone, Default)]
pub struct HistoryStore {
    entries: Arc<RwLock<HashMap<Uuid, Vec<MoodEntry>>>>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn record(&self, user_id: Uuid, entry: MoodEntry) {
        let mut entries = self.entries.write().await;
        entries.entry(user_id).or_default().push(entry);
    }

    /// Entries for `user_id`, newest first, optionally restricted to one mood.
    pub async fn list(&self, user_id: Uuid, mood: Option<Mood>) -> Vec<MoodEntry> {
        let entries = self.entries.read().await;
        let mut list: Vec<MoodEntry> = entries
            .get(&user_id)
            .map(|v| {
                v.iter()
                    .filter(|e| mood.map_or(true, |m| e.mood == m.label()))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        list
    }
}

/// Groups newest-first entries by calendar month, keeping order.
pub fn group_by_month(entries: Vec<MoodEntry>) -> Vec<MonthGroup> {
    let mut groups: Vec<MonthGroup> = Vec::new();
    for entry in entries {
        let month = entry.created_at.format("%B %Y").to_string();
        match groups.last_mut() {
            Some(group) if group.month == month => group.entries.push(entry),
            _ => groups.push(MonthGroup {
                month,
                entries: vec![entry],
            }),
        }
    }
    groups
}

/// Stats over newest-first entries.
pub fn stats(entries: &[MoodEntry]) -> HistoryStats {
    let mut by_mood: HashMap<String, usize> = HashMap::new();
    for entry in entries {
        *by_mood.entry(entry.mood.clone()).or_insert(0) += 1;
    }
    HistoryStats {
        total: entries.len(),
        by_mood,
        latest_glyph: entries.first().and_then(|e| e.glyph),
    }
}
