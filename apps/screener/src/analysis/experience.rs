use std::sync::LazyLock;

use chrono::{Datelike, Utc};
use regex::Regex;

/// `2015 - 2019`, `2018–Present`, `2020 - current`
static YEAR_RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([0-9]{4})\s*[-–]\s*([0-9]{4}|present|current)")
        .expect("year range pattern is valid")
});

/// `5 years of experience`, `3+ year of experience`
static EXPLICIT_YEARS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([0-9]+)\+?\s+years? of experience").expect("explicit years pattern is valid")
});

/// Estimates total years of experience, as of the current calendar year.
pub fn estimate_experience(text: &str) -> u32 {
    estimate_experience_as_of(text, Utc::now().year())
}

/// Sums every year range (open ranges end at `current_year`), then lets any
/// explicit "N years of experience" phrase raise the total.
pub fn estimate_experience_as_of(text: &str, current_year: i32) -> u32 {
    let mut years: u32 = YEAR_RANGE_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let start: i32 = caps[1].parse().ok()?;
            let end = match caps[2].parse::<i32>() {
                Ok(end) => end,
                Err(_) => current_year,
            };
            Some((end - start).max(0) as u32)
        })
        .fold(0, u32::saturating_add);

    let explicit = EXPLICIT_YEARS_RE
        .captures_iter(text)
        .filter_map(|caps| caps[1].parse::<u32>().ok())
        .max();

    if let Some(explicit) = explicit {
        years = years.max(explicit);
    }
    years
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_ranges_are_summed() {
        let text = "Acme 2012 - 2015\nGlobex 2015–2019";
        assert_eq!(estimate_experience_as_of(text, 2024), 7);
    }

    #[test]
    fn test_present_and_current_use_current_year() {
        assert_eq!(estimate_experience_as_of("Initech 2020 - Present", 2024), 4);
        assert_eq!(estimate_experience_as_of("Initech 2021-CURRENT", 2024), 3);
    }

    #[test]
    fn test_reversed_range_contributes_zero() {
        assert_eq!(estimate_experience_as_of("2019 - 2015", 2024), 0);
    }

    #[test]
    fn test_explicit_phrase_takes_max() {
        let text = "2018 - 2020. Over 8+ years of experience in backend work.";
        assert_eq!(estimate_experience_as_of(text, 2024), 8);
    }

    #[test]
    fn test_ranges_win_over_smaller_phrase() {
        let text = "2010 - 2020, 3 years of experience with Rust";
        assert_eq!(estimate_experience_as_of(text, 2024), 10);
    }

    #[test]
    fn test_singular_year_phrase() {
        assert_eq!(estimate_experience_as_of("1 year of experience", 2024), 1);
    }

    #[test]
    fn test_no_signals_is_zero() {
        assert_eq!(estimate_experience_as_of("Fresh graduate, eager to learn", 2024), 0);
    }

    #[test]
    fn test_current_year_default_is_sane() {
        assert!(estimate_experience("2000 - present") >= 24);
    }
}
