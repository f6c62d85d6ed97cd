// Per-session generation statistics

use chrono::{DateTime, Local};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Analytics {
    pub stories_generated: u64,
    /// Rounded running mean of story length, in characters
    pub average_length: u64,
    pub last_genre: String,
    pub last_generated: Option<DateTime<Local>>,
}

impl Analytics {
    pub fn record(&mut self, story: &str, genre: &str, at: DateTime<Local>) {
        let length = story.chars().count() as u64;
        self.average_length = running_average(self.average_length, self.stories_generated, length);
        self.stories_generated += 1;
        self.last_genre = genre.to_string();
        self.last_generated = Some(at);
    }

    pub fn genre_label(&self) -> &str {
        if self.last_genre.is_empty() {
            "N/A"
        } else {
            &self.last_genre
        }
    }

    pub fn last_generated_label(&self) -> String {
        self.last_generated.map_or_else(
            || "Never".to_string(),
            |at| at.format("%Y-%m-%d %H:%M:%S").to_string(),
        )
    }
}

/// Fold one more sample into a rounded mean of `count` samples.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn running_average(average: u64, count: u64, sample: u64) -> u64 {
    let total = average as f64 * count as f64 + sample as f64;
    (total / (count + 1) as f64).round() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_record() {
        let mut analytics = Analytics::default();
        let now = Local::now();
        analytics.record("Once upon a time", "Fantasy", now);

        assert_eq!(analytics.stories_generated, 1);
        assert_eq!(analytics.average_length, 16);
        assert_eq!(analytics.last_genre, "Fantasy");
        assert_eq!(analytics.last_generated, Some(now));
    }

    #[test]
    fn test_running_average_rounds() {
        assert_eq!(running_average(0, 0, 10), 10);
        assert_eq!(running_average(10, 1, 15), 13); // 12.5 rounds up
        assert_eq!(running_average(13, 2, 0), 9); // 26 / 3 = 8.67
    }

    #[test]
    fn test_average_counts_characters() {
        let mut analytics = Analytics::default();
        analytics.record("héé", "", Local::now());
        assert_eq!(analytics.average_length, 3);
    }

    #[test]
    fn test_empty_genre_label() {
        let mut analytics = Analytics::default();
        assert_eq!(analytics.genre_label(), "N/A");
        analytics.record("story", "", Local::now());
        assert_eq!(analytics.genre_label(), "N/A");
        analytics.record("story", "Horror", Local::now());
        assert_eq!(analytics.genre_label(), "Horror");
    }

    #[test]
    fn test_never_generated_label() {
        assert_eq!(Analytics::default().last_generated_label(), "Never");
    }
}
