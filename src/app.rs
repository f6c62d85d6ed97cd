use crate::analytics::Analytics;
use crate::events::AppEvent;
use crate::models::{GenerationRequest, MAX_PROMPT_CHARS};
use crate::preferences::{PreferenceKind, StoryPreferences};
use crate::prompt::build_story_prompt;

use chrono::Local;
use rand::Rng;
use tracing::{debug, warn};

pub const EXAMPLE_PROMPTS: [&str; 4] = [
    "A mysterious artifact that grants unexpected wishes...",
    "Two strangers connected by a peculiar dream...",
    "A forgotten library with books that write themselves...",
    "A time-traveling letter that changes everything...",
];

/// The counter turns red past this many characters.
pub const PROMPT_WARN_CHARS: usize = 450;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please enter a prompt or select preferences")]
    Empty,
    #[error("A story is already being generated")]
    Busy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Prompt,
    Preference(PreferenceKind),
}

impl Focus {
    const ORDER: [Self; 7] = [
        Self::Prompt,
        Self::Preference(PreferenceKind::Mood),
        Self::Preference(PreferenceKind::Length),
        Self::Preference(PreferenceKind::Style),
        Self::Preference(PreferenceKind::Genre),
        Self::Preference(PreferenceKind::Tone),
        Self::Preference(PreferenceKind::Setting),
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    fn after(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    fn before(self) -> Self {
        let len = Self::ORDER.len();
        Self::ORDER[(self.position() + len - 1) % len]
    }
}

#[derive(Debug)]
pub struct App {
    pub focus: Focus,
    pub should_quit: bool,
    pub show_help: bool,
    pub show_info: bool,
    pub exit_pending: bool,
    pub scroll_offset: usize,

    // Form
    pub prompt: String,
    pub preferences: StoryPreferences,
    /// Highlighted option per preference panel, in `PreferenceKind::ALL` order
    pub cursors: [usize; 6],
    example_index: usize,

    // Generation
    pub is_loading: bool,
    pub story: String,
    pub error: Option<String>,
    pub last_instruction: Option<String>,
    in_flight: Option<GenerationRequest>,

    pub analytics: Analytics,
}

impl App {
    pub fn new() -> Self {
        Self {
            focus: Focus::Prompt,
            should_quit: false,
            show_help: false,
            show_info: false,
            exit_pending: false,
            scroll_offset: 0,
            prompt: String::new(),
            preferences: StoryPreferences::default(),
            cursors: [0; 6],
            example_index: 0,
            is_loading: false,
            story: String::new(),
            error: None,
            last_instruction: None,
            in_flight: None,
            analytics: Analytics::default(),
        }
    }

    pub const fn quit(&mut self) {
        self.should_quit = true;
    }

    pub const fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub const fn toggle_info(&mut self) {
        self.show_info = !self.show_info;
    }

    pub const fn scroll_up(&mut self, amount: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(amount);
    }

    pub const fn scroll_down(&mut self, amount: usize) {
        // Clamped against the story height at render time
        self.scroll_offset = self.scroll_offset.saturating_add(amount);
    }

    pub const fn scroll_to_top(&mut self) {
        self.scroll_offset = 0;
    }

    pub const fn scroll_to_bottom(&mut self) {
        self.scroll_offset = usize::MAX;
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.after();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.before();
    }

    pub fn cursor(&self, kind: PreferenceKind) -> usize {
        self.cursors[kind_index(kind)]
    }

    /// Move the highlight in the focused panel, wrapping at both ends.
    pub fn move_cursor(&mut self, forward: bool) {
        let Focus::Preference(kind) = self.focus else {
            return;
        };
        let len = kind.options().len();
        let cursor = &mut self.cursors[kind_index(kind)];
        *cursor = if forward {
            (*cursor + 1) % len
        } else {
            (*cursor + len - 1) % len
        };
    }

    pub fn toggle(&mut self, kind: PreferenceKind, option: &str) {
        self.preferences.toggle(kind, option);
    }

    /// Toggle the highlighted option of the focused panel.
    pub fn toggle_focused(&mut self) {
        let Focus::Preference(kind) = self.focus else {
            return;
        };
        if let Some(option) = kind.options().get(self.cursor(kind)) {
            self.toggle(kind, option);
        }
    }

    pub fn char_count(&self) -> usize {
        self.prompt.chars().count()
    }

    /// Append to the prompt; refused once the prompt is full.
    pub fn push_char(&mut self, c: char) -> bool {
        if self.char_count() >= MAX_PROMPT_CHARS {
            return false;
        }
        self.prompt.push(c);
        true
    }

    pub fn pop_char(&mut self) {
        self.prompt.pop();
    }

    pub fn set_prompt(&mut self, text: &str) {
        self.prompt = text.chars().take(MAX_PROMPT_CHARS).collect();
    }

    /// Replace the prompt with the next canned example.
    pub fn next_example(&mut self) {
        let example = EXAMPLE_PROMPTS[self.example_index % EXAMPLE_PROMPTS.len()];
        self.example_index = self.example_index.wrapping_add(1);
        self.set_prompt(example);
    }

    pub fn randomize(&mut self) {
        self.randomize_with(&mut rand::rng());
    }

    pub fn randomize_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.is_loading {
            return;
        }
        self.preferences.randomize(rng);
    }

    /// Unset every preference. Prompt and story are kept.
    pub fn clear_preferences(&mut self) {
        if self.is_loading {
            return;
        }
        self.preferences.clear();
    }

    pub fn can_submit(&self) -> bool {
        !self.is_loading && !(self.prompt.is_empty() && self.preferences.is_empty())
    }

    /// Validate the form and snapshot it into a request.
    ///
    /// On success the form is marked loading and the caller must send the
    /// returned request exactly once, then feed the outcome to
    /// [`App::handle_event`].
    pub fn begin_submit(&mut self) -> Result<GenerationRequest, ValidationError> {
        if self.is_loading {
            return Err(ValidationError::Busy);
        }
        if self.prompt.is_empty() && self.preferences.is_empty() {
            let err = ValidationError::Empty;
            self.error = Some(err.to_string());
            return Err(err);
        }

        let request = GenerationRequest::new(self.prompt.clone(), self.preferences.clone());
        self.error = None;
        self.is_loading = true;
        self.in_flight = Some(request.clone());
        debug!(prompt_chars = self.char_count(), "submitting story request");
        Ok(request)
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        let request = self.in_flight.take();
        self.is_loading = false;

        match event {
            AppEvent::StoryReady(story) => {
                let genre = request
                    .as_ref()
                    .map(|r| r.preferences.genre.as_str().to_string())
                    .unwrap_or_default();
                self.last_instruction = request.as_ref().map(build_story_prompt);
                self.analytics.record(&story, &genre, Local::now());
                self.story = story;
                self.scroll_to_top();
            }
            AppEvent::GenerationFailed(message) => {
                warn!("generation failed: {message}");
                self.error = Some(message);
            }
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

const fn kind_index(kind: PreferenceKind) -> usize {
    match kind {
        PreferenceKind::Mood => 0,
        PreferenceKind::Length => 1,
        PreferenceKind::Style => 2,
        PreferenceKind::Genre => 3,
        PreferenceKind::Tone => 4,
        PreferenceKind::Setting => 5,
    }
}
