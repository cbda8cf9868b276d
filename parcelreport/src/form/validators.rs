use std::sync::Arc;

use lazy_static::lazy_static;
use regex::Regex;

/// Checks a single field value. `None` means the field was never filled in.
pub type ValidateFn =
    Arc<dyn Fn(Option<&str>) -> Result<(), String> + Send + Sync>;

pub const REQUIRED_MESSAGE: &str = "Required";
pub const NON_EMPTY_MESSAGE: &str = "Cannot be empty";
pub const FIVE_CHARACTERS_MESSAGE: &str = "Must be exactly 5 characters";
pub const IS_NUM_MESSAGE: &str = "Must be a number";

lazy_static! {
    static ref DIGITS: Regex = Regex::new(r"^[0-9]*$").unwrap();
}

pub fn required(value: Option<&str>) -> Result<(), String> {
    match value {
        Some(value) if !value.is_empty() => Ok(()),
        _ => Err(REQUIRED_MESSAGE.to_string()),
    }
}

pub fn non_empty(value: Option<&str>) -> Result<(), String> {
    if value.unwrap_or_default().trim().is_empty() {
        Err(NON_EMPTY_MESSAGE.to_string())
    } else {
        Ok(())
    }
}

/// Length is measured in UTF-16 code units, the way browsers measure input
/// values.
pub fn five_characters(value: Option<&str>) -> Result<(), String> {
    if value.unwrap_or_default().encode_utf16().count() == 5 {
        Ok(())
    } else {
        Err(FIVE_CHARACTERS_MESSAGE.to_string())
    }
}

pub fn is_num(value: Option<&str>) -> Result<(), String> {
    if DIGITS.is_match(value.unwrap_or_default()) {
        Ok(())
    } else {
        Err(IS_NUM_MESSAGE.to_string())
    }
}

pub fn validate_with_pattern(
    pattern: Regex,
    error_msg: String,
) -> impl Fn(Option<&str>) -> Result<(), String> + Send + Sync {
    move |value: Option<&str>| {
        if pattern.is_match(value.unwrap_or_default()) {
            Ok(())
        } else {
            Err(error_msg.clone())
        }
    }
}

/// Runs `validators` in order and stops at the first failure.
pub fn validate_chain(
    validators: &[ValidateFn],
    value: Option<&str>,
) -> Result<(), String> {
    validators.iter().try_for_each(|validate| validate(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> Vec<ValidateFn> {
        vec![
            Arc::new(required),
            Arc::new(non_empty),
            Arc::new(five_characters),
            Arc::new(is_num),
        ]
    }

    #[test]
    fn test_required() {
        assert!(required(None).is_err());
        assert!(required(Some("")).is_err());
        assert!(required(Some("x")).is_ok());
        // whitespace is a value, non_empty catches it
        assert!(required(Some(" ")).is_ok());
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(Some(" \t\n")), Err(NON_EMPTY_MESSAGE.into()));
        assert!(non_empty(None).is_err());
        assert!(non_empty(Some(" a ")).is_ok());
    }

    #[test]
    fn test_five_characters() {
        for input in ["", "1", "1234", "123456", "abcdefgh"] {
            assert_eq!(
                five_characters(Some(input)),
                Err(FIVE_CHARACTERS_MESSAGE.to_string()),
                "input: {:?}",
                input
            );
        }
        assert!(five_characters(None).is_err());
        // counts UTF-16 units, not bytes
        assert!(five_characters(Some("ééééé")).is_ok());
        // outside the BMP one character is two units
        assert!(five_characters(Some("a😀bc")).is_ok());
        assert!(five_characters(Some("😀😀😀")).is_err());
        assert!(five_characters(Some("1234😀")).is_err());
    }

    #[test]
    fn test_five_digit_strings_pass_both() {
        for input in ["00000", "12345", "99999", "40213"] {
            assert!(five_characters(Some(input)).is_ok());
            assert!(is_num(Some(input)).is_ok());
        }
    }

    #[test]
    fn test_is_num() {
        assert_eq!(is_num(Some("abc12")), Err(IS_NUM_MESSAGE.to_string()));
        assert!(is_num(Some("12345")).is_ok());
        assert!(is_num(Some("12.45")).is_err());
        assert!(is_num(Some("-1234")).is_err());
        assert!(is_num(Some("١٢٣٤٥")).is_err());
    }

    #[test]
    fn test_chain_first_failure_wins() {
        let validators = chain();
        assert_eq!(
            validate_chain(&validators, None),
            Err(REQUIRED_MESSAGE.to_string())
        );
        assert_eq!(
            validate_chain(&validators, Some("     ")),
            Err(NON_EMPTY_MESSAGE.to_string())
        );
        assert_eq!(
            validate_chain(&validators, Some("abc")),
            Err(FIVE_CHARACTERS_MESSAGE.to_string())
        );
        assert_eq!(
            validate_chain(&validators, Some("abc12")),
            Err(IS_NUM_MESSAGE.to_string())
        );
        assert_eq!(validate_chain(&validators, Some("12345")), Ok(()));
        assert_eq!(validate_chain(&[], None), Ok(()));
    }

    #[test]
    fn test_chain_short_circuits() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let validators: Vec<ValidateFn> = vec![
            Arc::new(required),
            Arc::new(move |_: Option<&str>| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }),
        ];
        assert!(validate_chain(&validators, Some("")).is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(validate_chain(&validators, Some("x")).is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_validate_with_pattern() {
        let postcode = validate_with_pattern(
            Regex::new(r"^[A-Z]{2}$").unwrap(),
            "Two capitals".to_string(),
        );
        assert!(postcode(Some("NL")).is_ok());
        assert_eq!(postcode(Some("nl")), Err("Two capitals".to_string()));
    }
}
