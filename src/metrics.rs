use crate::session::Session;

/// Characters per "word" for WPM purposes
pub const CHARS_PER_WORD: f64 = 5.0;

/// Smallest elapsed time used when computing WPM, in seconds. Keeps the
/// result finite for a session that has not ticked yet.
pub const MIN_ELAPSED_SECS: f64 = 0.6;

/// Live or final figures for a session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Metrics {
    pub wpm: u32,
    pub accuracy: u32,
    pub errors: u32,
}

impl Metrics {
    /// Recompute from the current session. No session means all zeros.
    pub fn compute(session: Option<&Session>) -> Self {
        let Some(session) = session else {
            return Self::default();
        };

        let typed = session.typed_len();
        let correct = correct_chars(&session.typed, &session.reference);

        Self {
            wpm: wpm(typed, session.elapsed_secs() as f64),
            accuracy: accuracy(correct, typed),
            errors: session.errors,
        }
    }
}

/// Rounded words per minute for `chars` typed over `elapsed_secs`
pub fn wpm(chars: usize, elapsed_secs: f64) -> u32 {
    let minutes = elapsed_secs.max(MIN_ELAPSED_SECS) / 60.0;
    ((chars as f64 / CHARS_PER_WORD) / minutes).round() as u32
}

/// Rounded percentage of `correct` over `typed`; zero when nothing was typed
pub fn accuracy(correct: usize, typed: usize) -> u32 {
    if typed == 0 {
        return 0;
    }
    ((correct as f64 / typed as f64) * 100.0).round() as u32
}

/// Number of positions where `typed` matches `reference`
pub fn correct_chars(typed: &str, reference: &str) -> usize {
    typed
        .chars()
        .zip(reference.chars())
        .filter(|(t, r)| t == r)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::TestDuration;

    fn session(reference: &str, typed: &str, time_left: u64) -> Session {
        let mut s = Session::new(reference.to_string(), TestDuration::Sixty, 0);
        s.set_typed(typed.to_string(), typed.chars().count());
        s.time_left = time_left;
        s
    }

    #[test]
    fn test_wpm_standard_word_length() {
        // 300 chars in 60 seconds = 60 WPM
        assert_eq!(wpm(300, 60.0), 60);
        // 150 chars in 30 seconds = 60 WPM
        assert_eq!(wpm(150, 30.0), 60);
    }

    #[test]
    fn test_wpm_zero_elapsed_is_floored() {
        // 5 chars over the 0.6s floor
        assert_eq!(wpm(5, 0.0), 100);
        assert_eq!(wpm(0, 0.0), 0);
    }

    #[test]
    fn test_accuracy() {
        assert_eq!(accuracy(90, 100), 90);
        assert_eq!(accuracy(0, 0), 0);
        assert_eq!(accuracy(100, 100), 100);
        assert_eq!(accuracy(2, 3), 67);
    }

    #[test]
    fn test_correct_chars_positional() {
        assert_eq!(correct_chars("cat", "cat"), 3);
        assert_eq!(correct_chars("cut", "cat"), 2);
        assert_eq!(correct_chars("", "cat"), 0);
        assert_eq!(correct_chars("at", "cat"), 0);
    }

    #[test]
    fn test_compute_without_session() {
        assert_eq!(Metrics::compute(None), Metrics::default());
    }

    #[test]
    fn test_compute_cat_after_ten_seconds() {
        let s = session("cat", "cat", 50);
        let m = Metrics::compute(Some(&s));
        // round((3/5) / (10/60)) = round(3.6)
        assert_eq!(m.wpm, 4);
        assert_eq!(m.accuracy, 100);
        assert_eq!(m.errors, 0);
    }

    #[test]
    fn test_compute_partial_accuracy() {
        let mut s = session("hello", "hxl", 30);
        s.errors = 1;
        let m = Metrics::compute(Some(&s));
        assert_eq!(m.accuracy, 67);
        assert_eq!(m.errors, 1);
    }

    #[test]
    fn test_accuracy_bounds_over_prefixes() {
        let reference = "the quick brown fox";
        let typed = "thw quick brpwn fix";
        for n in 0..=typed.len() {
            let s = session(reference, &typed[..n], 40);
            let m = Metrics::compute(Some(&s));
            assert!(m.accuracy <= 100);
            let all_match = typed[..n] == reference[..n];
            assert_eq!(m.accuracy == 100, n > 0 && all_match);
        }

        // one miss in 200 or more rounds up to 100
        let long_ref = "a".repeat(200);
        let one_miss = format!("{}b", "a".repeat(199));
        let m = Metrics::compute(Some(&session(&long_ref, &one_miss, 40)));
        assert_eq!(m.accuracy, 100);
        assert_eq!(correct_chars(&one_miss, &long_ref), 199);

        let short_ref = "a".repeat(100);
        let one_miss = format!("{}b", "a".repeat(99));
        let m = Metrics::compute(Some(&session(&short_ref, &one_miss, 40)));
        assert_eq!(m.accuracy, 99);
    }

    #[test]
    fn test_wpm_non_decreasing_with_more_chars() {
        let mut last = 0;
        for chars in 0..200 {
            let w = wpm(chars, 30.0);
            assert!(w >= last);
            last = w;
        }
    }
}
