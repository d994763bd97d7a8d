use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref ID_NUMBER_PATTERN: Regex = Regex::new(r"[1-9][0-9]{10}").unwrap();
}

pub struct ChecksumValidator;

impl ChecksumValidator {
    /// Two-stage check for an 11-digit identity number.
    ///
    /// The last digit is the sum of the first ten modulo 10, and the tenth
    /// digit is `7 * (odd positions) - (even positions)` over the first nine,
    /// modulo 10. Both must hold.
    pub fn validate_id(candidate: &str) -> bool {
        if candidate.len() != 11 || !candidate.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
        let digits: Vec<i32> = candidate.bytes().map(|b| (b - b'0') as i32).collect();
        if digits[0] == 0 {
            return false;
        }

        let first_ten: i32 = digits[..10].iter().sum();
        if digits[10] != first_ten % 10 {
            return false;
        }

        let even: i32 = digits[0..9].iter().step_by(2).sum();
        let odd: i32 = digits[1..8].iter().step_by(2).sum();
        digits[9] == (7 * even - odd).rem_euclid(10)
    }

    /// First identity-number-shaped substring of a line, if any
    pub fn find_candidate(line: &str) -> Option<&str> {
        ID_NUMBER_PATTERN.find(line).map(|m| m.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_numbers() {
        assert!(ChecksumValidator::validate_id("10000000146"));
        assert!(ChecksumValidator::validate_id("12345678950"));
    }

    #[test]
    fn test_rejects_bad_shape() {
        assert!(!ChecksumValidator::validate_id(""));
        assert!(!ChecksumValidator::validate_id("1000000014"));
        assert!(!ChecksumValidator::validate_id("100000001460"));
        assert!(!ChecksumValidator::validate_id("1000000014A"));
        assert!(!ChecksumValidator::validate_id("00000000000"));
        assert!(!ChecksumValidator::validate_id("１0000000146"));
    }

    #[test]
    fn test_rejects_either_failed_stage() {
        // last digit wrong
        assert!(!ChecksumValidator::validate_id("10000000147"));
        // tenth digit wrong, last digit recomputed so only stage two fails
        assert!(!ChecksumValidator::validate_id("10000000157"));
        assert!(!ChecksumValidator::validate_id("12345678901"));
    }

    #[test]
    fn test_negative_weighted_sum_wraps() {
        // 7 * 1 - 9 = -2, which must wrap to 8
        assert!(ChecksumValidator::validate_id("19000000088"));
    }

    #[test]
    fn test_find_candidate() {
        assert_eq!(
            ChecksumValidator::find_candidate("T.C. KİMLİK NO 10000000146"),
            Some("10000000146")
        );
        assert_eq!(ChecksumValidator::find_candidate("0123"), None);
    }
}
