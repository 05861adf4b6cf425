use chrono::{Datelike, Local};

/// Get the current calendar year in the local timezone
///
/// Used for the footer copyright stamp, both when the page is rendered and
/// when the interactive layer boots.
///
/// # Examples
///
/// ```
/// use portfolio_shell::utils::current_year;
///
/// let year = current_year();
/// assert!(year >= 2024);
/// ```
#[must_use]
pub fn current_year() -> i32 {
    Local::now().year()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_year_is_plausible() {
        let year = current_year();
        assert!(year >= 2024);
        assert!(year < 10_000);
    }

    #[test]
    fn test_current_year_renders_as_four_digits() {
        let rendered = current_year().to_string();
        assert_eq!(rendered.len(), 4);
        assert!(rendered.chars().all(|c| c.is_ascii_digit()));
    }
}
