//! Derived date field formatting

use chrono::Local;

/// Today's date formatted `YYYY-MM-DD`, used to fill a body's `date`
/// field when the caller omits it.
pub fn default_date() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_date_shape() {
        let date = default_date();
        assert_eq!(date.len(), 10);

        let parts: Vec<&str> = date.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0].len(), 4);
        assert_eq!(parts[1].len(), 2);
        assert_eq!(parts[2].len(), 2);
        assert!(parts.iter().all(|p| p.chars().all(|c| c.is_ascii_digit())));
    }
}
