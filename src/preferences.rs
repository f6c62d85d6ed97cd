// Story preference categories and their per-field selection state

use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

pub const MOODS: &[&str] = &[
    "Sad",
    "Hopeful",
    "Mysterious",
    "Vivid",
    "Nostalgic",
    "Dreamy",
    "Energetic",
    "Peaceful",
    "Dark",
    "Whimsical",
    "Intense",
    "Calm",
];

pub const LENGTHS: &[&str] = &[
    "100 words",
    "150 words",
    "200 words",
    "300 words",
    "500 words",
    "1000 words",
    "1500 words",
    "2000 words",
];

pub const STYLES: &[&str] = &[
    "Narrative",
    "Third Person",
    "First Person",
    "Descriptive",
    "Stream of Consciousness",
    "Minimalist",
    "Poetic",
    "Experimental",
];

pub const GENRES: &[&str] = &[
    "Mystery",
    "Thriller",
    "Romance",
    "Fantasy",
    "Horror",
    "Science Fiction",
    "Adventure",
    "Historical",
    "Comedy",
    "Drama",
    "Fairy Tale",
    "Dystopian",
];

pub const TONES: &[&str] = &[
    "Serious",
    "Humorous",
    "Satirical",
    "Philosophical",
    "Casual",
    "Formal",
    "Playful",
    "Academic",
];

pub const SETTINGS: &[&str] = &[
    "Urban",
    "Rural",
    "Futuristic",
    "Medieval",
    "Contemporary",
    "Post-apocalyptic",
    "Magical",
    "Space",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreferenceKind {
    Mood,
    Length,
    Style,
    Genre,
    Tone,
    Setting,
}

impl PreferenceKind {
    /// Display order of the preference panels.
    pub const ALL: [Self; 6] = [
        Self::Mood,
        Self::Length,
        Self::Style,
        Self::Genre,
        Self::Tone,
        Self::Setting,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Mood => "Mood",
            Self::Length => "Length",
            Self::Style => "Style",
            Self::Genre => "Genre",
            Self::Tone => "Tone",
            Self::Setting => "Setting",
        }
    }

    pub const fn options(self) -> &'static [&'static str] {
        match self {
            Self::Mood => MOODS,
            Self::Length => LENGTHS,
            Self::Style => STYLES,
            Self::Genre => GENRES,
            Self::Tone => TONES,
            Self::Setting => SETTINGS,
        }
    }
}

/// Selection state of a single preference field.
///
/// On the wire a choice is a plain string: `""`, `null` and an absent field
/// all decode to [`Choice::Unset`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum Choice {
    #[default]
    Unset,
    Selected(String),
}

impl Choice {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Unset => "",
            Self::Selected(value) => value,
        }
    }

    pub fn is_set(&self) -> bool {
        !self.as_str().is_empty()
    }

    pub fn is(&self, option: &str) -> bool {
        matches!(self, Self::Selected(value) if value == option)
    }

    /// `unset -> selected(option)`, `selected(option) -> unset`,
    /// `selected(other) -> selected(option)`.
    pub fn toggle(&mut self, option: &str) {
        *self = if self.is(option) {
            Self::Unset
        } else {
            Self::from(option)
        };
    }
}

impl From<Option<String>> for Choice {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(value) if !value.is_empty() => Self::Selected(value),
            _ => Self::Unset,
        }
    }
}

impl From<&str> for Choice {
    fn from(value: &str) -> Self {
        Self::from(Some(value.to_string()))
    }
}

impl From<Choice> for String {
    fn from(choice: Choice) -> Self {
        match choice {
            Choice::Unset => Self::new(),
            Choice::Selected(value) => value,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryPreferences {
    #[serde(default)]
    pub mood: Choice,
    #[serde(default)]
    pub length: Choice,
    #[serde(default)]
    pub style: Choice,
    #[serde(default)]
    pub genre: Choice,
    #[serde(default)]
    pub tone: Choice,
    #[serde(default)]
    pub setting: Choice,
}

impl StoryPreferences {
    pub const fn get(&self, kind: PreferenceKind) -> &Choice {
        match kind {
            PreferenceKind::Mood => &self.mood,
            PreferenceKind::Length => &self.length,
            PreferenceKind::Style => &self.style,
            PreferenceKind::Genre => &self.genre,
            PreferenceKind::Tone => &self.tone,
            PreferenceKind::Setting => &self.setting,
        }
    }

    pub fn get_mut(&mut self, kind: PreferenceKind) -> &mut Choice {
        match kind {
            PreferenceKind::Mood => &mut self.mood,
            PreferenceKind::Length => &mut self.length,
            PreferenceKind::Style => &mut self.style,
            PreferenceKind::Genre => &mut self.genre,
            PreferenceKind::Tone => &mut self.tone,
            PreferenceKind::Setting => &mut self.setting,
        }
    }

    pub fn toggle(&mut self, kind: PreferenceKind, option: &str) {
        self.get_mut(kind).toggle(option);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Pick one option per field, each drawn independently and uniformly.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for kind in PreferenceKind::ALL {
            *self.get_mut(kind) = kind
                .options()
                .choose(rng)
                .map_or(Choice::Unset, |option| Choice::from(*option));
        }
    }

    pub fn is_empty(&self) -> bool {
        PreferenceKind::ALL
            .iter()
            .all(|kind| !self.get(*kind).is_set())
    }
}
