use rand::seq::SliceRandom;
use rand::Rng;

use crate::session::TestDuration;

/// Sample passages a test draws from
pub const PASSAGES: &[&str] = &[
    "The quick brown fox jumps over the lazy dog. Programming is the art of algorithm design and the craft of debugging errant code. It is a process of problem solving. Technology continues to evolve at a breakneck pace, transforming the way we live and work.",
    "A journey of a thousand miles begins with a single step. The only way to do great work is to love what you do. If you haven't found it yet, keep looking. Don't settle. As with all matters of the heart, you'll know when you find it.",
    "In the middle of every difficulty lies opportunity. Success is not final, failure is not fatal: it is the courage to continue that counts. Believe you can and you're halfway there. Keep your face always toward the sunshine and shadows will fall behind you.",
];

/// Pick a passage uniformly from `pool`. Falls back to the first built-in
/// passage when the pool is empty.
pub fn pick<'a, R: Rng + ?Sized>(pool: &[&'a str], rng: &mut R) -> &'a str {
    pool.choose(rng).copied().unwrap_or(PASSAGES[0])
}

/// Build the reference text for a test of the given length.
///
/// Two minute tests repeat the passage so a fast typist does not run out of
/// text before the clock does.
pub fn for_duration(passage: &str, duration: TestDuration) -> String {
    match duration {
        TestDuration::OneTwenty => format!("{passage} {passage}"),
        _ => passage.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_passages_not_empty() {
        assert_eq!(PASSAGES.len(), 3);
        assert!(PASSAGES.iter().all(|p| !p.is_empty()));
    }

    #[test]
    fn test_pick_is_reproducible_with_seed() {
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        for _ in 0..10 {
            assert_eq!(pick(PASSAGES, &mut a), pick(PASSAGES, &mut b));
        }
    }

    #[test]
    fn test_pick_stays_in_pool() {
        let mut rng = StdRng::seed_from_u64(42);
        let pool = ["one", "two"];
        for _ in 0..20 {
            assert!(pool.contains(&pick(&pool, &mut rng)));
        }
    }

    #[test]
    fn test_pick_empty_pool_falls_back() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(pick(&[], &mut rng), PASSAGES[0]);
    }

    #[test]
    fn test_for_duration_doubles_two_minute_tests() {
        assert_eq!(for_duration("abc", TestDuration::Thirty), "abc");
        assert_eq!(for_duration("abc", TestDuration::Sixty), "abc");
        assert_eq!(for_duration("abc", TestDuration::OneTwenty), "abc abc");
    }
}
