//! Rupiah price-string parsing.

use crate::klik::error::ScrapeError;

/// Converts a formatted Rupiah string into an integer number of Rupiah.
///
/// The source format uses `.` as a thousands separator and `,` as the
/// decimal separator; the fractional part is discarded entirely. Currency
/// prefixes ("Rp", "IDR") fall out with the other non-digit characters.
pub fn rupiah_to_minor(text: &str) -> Result<u64, ScrapeError> {
    let integral = text.split(',').next().unwrap_or(text);
    let digits: String = integral.chars().filter(char::is_ascii_digit).collect();

    if digits.is_empty() {
        return Err(ScrapeError::MalformedCurrency { text: text.to_string() });
    }

    digits.parse().map_err(|_| ScrapeError::MalformedCurrency { text: text.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_grouped_amount() {
        assert_eq!(rupiah_to_minor("Rp 1.000.000").unwrap(), 1_000_000);
        assert_eq!(rupiah_to_minor("Rp 15.900").unwrap(), 15_900);
        assert_eq!(rupiah_to_minor("900").unwrap(), 900);
    }

    #[test]
    fn test_fraction_is_discarded() {
        assert_eq!(rupiah_to_minor("IDR 5.000.000,00").unwrap(), 5_000_000);
        assert_eq!(rupiah_to_minor("26.900,99").unwrap(), 26_900);
    }

    #[test]
    fn test_prefix_variants() {
        assert_eq!(rupiah_to_minor("Rp15.900").unwrap(), 15_900);
        assert_eq!(rupiah_to_minor("  IDR 15.900 ").unwrap(), 15_900);
    }

    #[test]
    fn test_no_digits_is_malformed() {
        assert!(matches!(
            rupiah_to_minor("Gratis"),
            Err(ScrapeError::MalformedCurrency { .. })
        ));
        assert!(matches!(rupiah_to_minor(""), Err(ScrapeError::MalformedCurrency { .. })));
        assert!(matches!(rupiah_to_minor("Rp ,50"), Err(ScrapeError::MalformedCurrency { .. })));
    }

    #[test]
    fn test_only_fraction_digits_is_malformed() {
        // Everything after the comma is dropped before digit filtering.
        assert!(matches!(rupiah_to_minor(",900"), Err(ScrapeError::MalformedCurrency { .. })));
    }
}
