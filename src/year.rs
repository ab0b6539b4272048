//! Exam-year extraction from filenames.
//!
//! A year is a run of exactly four ASCII digits bounded by non-digits, so
//! `AFL_2023.pdf` yields `2023` while `scan_120234.pdf` yields nothing.
//! When a name holds several candidates the first one wins.

use regex::Regex;
use serde::Deserialize;

/// Which 4-digit runs count as a year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YearPattern {
    /// Any isolated 4-digit run.
    Any,
    /// Only runs starting with `19` or `20`.
    #[default]
    Century,
}

#[derive(Debug, Clone)]
pub struct YearExtractor {
    digit_runs: Regex,
    pattern: YearPattern,
}

impl YearExtractor {
    pub fn new(pattern: YearPattern) -> Self {
        Self {
            // Maximal runs, so a longer number is never split into a year.
            digit_runs: Regex::new("[0-9]+").expect("static digit-run pattern"),
            pattern,
        }
    }

    pub fn pattern(&self) -> YearPattern {
        self.pattern
    }

    /// Return the first year-like token in `text`, if any.
    pub fn extract<'a>(&self, text: &'a str) -> Option<&'a str> {
        self.digit_runs
            .find_iter(text)
            .map(|m| m.as_str())
            .find(|run| run.len() == 4 && self.accepts(run))
    }

    fn accepts(&self, run: &str) -> bool {
        match self.pattern {
            YearPattern::Any => true,
            YearPattern::Century => run.starts_with("19") || run.starts_with("20"),
        }
    }
}

impl Default for YearExtractor {
    fn default() -> Self {
        Self::new(YearPattern::default())
    }
}

/// Exactly four ASCII digits in 1900–2099.
pub fn is_plausible_year(token: &str) -> bool {
    token.len() == 4
        && token.bytes().all(|b| b.is_ascii_digit())
        && (token.starts_with("19") || token.starts_with("20"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_extracts_year_from_filename() {
        let years = YearExtractor::default();
        assert_eq!(years.extract("AFL_MIDSEM_2023.pdf"), Some("2023"));
        assert_eq!(years.extract("2021-end.pdf"), Some("2021"));
        assert_eq!(years.extract("final.pdf"), None);
    }

    #[test]
    fn test_longer_digit_runs_are_skipped() {
        let years = YearExtractor::new(YearPattern::Any);
        assert_eq!(years.extract("scan_120234.pdf"), None);
        assert_eq!(years.extract("scan_12023_2019.pdf"), Some("2019"));
        assert_eq!(years.extract("id123.pdf"), None);
    }

    #[test]
    fn test_first_year_wins() {
        let years = YearExtractor::default();
        assert_eq!(years.extract("2019_makeup_2020.pdf"), Some("2019"));
    }

    #[test]
    fn test_century_pattern_skips_other_runs() {
        let any = YearExtractor::new(YearPattern::Any);
        let century = YearExtractor::new(YearPattern::Century);
        assert_eq!(any.extract("room1234_2022.pdf"), Some("1234"));
        assert_eq!(century.extract("room1234_2022.pdf"), Some("2022"));
        assert_eq!(century.extract("code_3141.pdf"), None);
    }

    #[test]
    fn test_plausible_year() {
        assert!(is_plausible_year("1900"));
        assert!(is_plausible_year("2099"));
        assert!(!is_plausible_year("1899"));
        assert!(!is_plausible_year("2100"));
        assert!(!is_plausible_year("202"));
        assert!(!is_plausible_year("20x3"));
        assert!(!is_plausible_year("２０２３"));
    }

    proptest! {
        #[test]
        fn prop_isolated_run_is_returned(
            prefix in "[a-zA-Z_ .-]{0,8}",
            year in "[0-9]{4}",
            suffix in "[a-zA-Z_ .-]{0,8}",
        ) {
            let text = format!("{prefix}{year}{suffix}");
            let years = YearExtractor::new(YearPattern::Any);
            prop_assert_eq!(years.extract(&text), Some(year.as_str()));
        }

        #[test]
        fn prop_no_four_digit_run_means_none(text in "([a-z_.-]|[0-9]{1,3}[a-z_.-]|[0-9]{5,7}[a-z_.-])*") {
            let years = YearExtractor::new(YearPattern::Any);
            prop_assert_eq!(years.extract(&text), None);
        }
    }
}
