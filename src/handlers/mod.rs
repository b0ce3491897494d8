pub mod health;
pub mod history;
pub mod journal;
pub mod moods;
pub mod therapist;
