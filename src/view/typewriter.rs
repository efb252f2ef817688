use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Text regions that can be typed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextTarget {
    SceneText,
    Narration,
}

/// Reveals text one character per interval.
///
/// Progress is derived from elapsed time rather than from frame ticks, so the
/// first character shows at once and one more appears every `interval`.
#[derive(Debug, Clone)]
pub struct Typewriter {
    chars: Vec<char>,
    interval: Duration,
    started: Instant,
}

impl Typewriter {
    pub fn new(text: &str, interval: Duration, now: Instant) -> Self {
        Self {
            chars: text.chars().collect(),
            interval,
            started: now,
        }
    }

    pub fn visible_len(&self, now: Instant) -> usize {
        if self.chars.is_empty() {
            return 0;
        }
        if self.interval.is_zero() {
            return self.chars.len();
        }

        let elapsed = now.saturating_duration_since(self.started);
        let steps = elapsed.as_nanos() / self.interval.as_nanos();
        let shown = usize::try_from(steps).unwrap_or(usize::MAX).saturating_add(1);
        shown.min(self.chars.len())
    }

    pub fn visible(&self, now: Instant) -> String {
        self.chars[..self.visible_len(now)].iter().collect()
    }

    #[cfg(test)]
    pub fn full_text(&self) -> String {
        self.chars.iter().collect()
    }

    pub fn is_done(&self, now: Instant) -> bool {
        self.visible_len(now) == self.chars.len()
    }
}

/// At most one running reveal per target. Starting a new one cancels the old.
#[derive(Debug, Clone, Default)]
pub struct TypingEffects {
    active: HashMap<TextTarget, Typewriter>,
}

impl TypingEffects {
    pub fn reveal(&mut self, target: TextTarget, text: &str, interval: Duration, now: Instant) {
        self.active
            .insert(target, Typewriter::new(text, interval, now));
    }

    /// Sets the text outright, cancelling any reveal in progress.
    pub fn set(&mut self, target: TextTarget, text: &str, now: Instant) {
        self.reveal(target, text, Duration::ZERO, now);
    }

    pub fn clear(&mut self, target: TextTarget) {
        self.active.remove(&target);
    }

    pub fn text(&self, target: TextTarget, now: Instant) -> String {
        self.active
            .get(&target)
            .map(|t| t.visible(now))
            .unwrap_or_default()
    }

    /// The text the target will show once its reveal finishes.
    #[cfg(test)]
    pub fn final_text(&self, target: TextTarget) -> String {
        self.active
            .get(&target)
            .map(Typewriter::full_text)
            .unwrap_or_default()
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.active.values().any(|t| !t.is_done(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn reveals_one_char_per_interval() {
        let t0 = Instant::now();
        let tw = Typewriter::new("下一幕", 16 * MS, t0);

        assert_eq!(tw.visible(t0), "下");
        assert_eq!(tw.visible(t0 + 15 * MS), "下");
        assert_eq!(tw.visible(t0 + 16 * MS), "下一");
        assert_eq!(tw.visible(t0 + 32 * MS), "下一幕");
        assert_eq!(tw.visible(t0 + 1000 * MS), "下一幕");
        assert!(tw.is_done(t0 + 32 * MS));
        assert!(!tw.is_done(t0 + 31 * MS));
    }

    #[test]
    fn empty_text_is_done_immediately() {
        let t0 = Instant::now();
        let tw = Typewriter::new("", 16 * MS, t0);
        assert_eq!(tw.visible(t0), "");
        assert!(tw.is_done(t0));
    }

    #[test]
    fn new_reveal_replaces_old_on_same_target() {
        let t0 = Instant::now();
        let mut fx = TypingEffects::default();
        fx.reveal(TextTarget::SceneText, "abcdef", 10 * MS, t0);
        fx.reveal(TextTarget::SceneText, "xyz", 10 * MS, t0 + 20 * MS);

        assert_eq!(fx.text(TextTarget::SceneText, t0 + 20 * MS), "x");
        assert_eq!(fx.text(TextTarget::SceneText, t0 + 100 * MS), "xyz");
    }

    #[test]
    fn targets_are_independent() {
        let t0 = Instant::now();
        let mut fx = TypingEffects::default();
        fx.reveal(TextTarget::SceneText, "scene", 10 * MS, t0);
        fx.set(TextTarget::Narration, "done", t0);

        assert_eq!(fx.text(TextTarget::Narration, t0), "done");
        assert!(fx.is_animating(t0));

        fx.clear(TextTarget::SceneText);
        assert_eq!(fx.text(TextTarget::SceneText, t0), "");
        assert!(!fx.is_animating(t0));
    }
}
