pub mod advice;
pub mod health;
pub mod moods;
pub mod ws;
