//! Integer stop ids synthesised from alphanumeric stop codes.
//!
//! Most codes are plain numbers and are used as is. Codes carrying a platform
//! or direction suffix (`12a`, `45in`) are shifted into a per-suffix bucket so
//! every variant of a stop code gets its own stable id while staying sorted by
//! the number printed on the sign.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{AgencyError, Result};
use crate::model::GStop;

/// Stop code value meaning "no code".
pub const NO_STOP_CODE: &str = "0";

/// Leftover codes without any digit, mapped to reserved ids.
pub static STOP_CODE_EXCEPTIONS: &[(&str, u32)] = &[
    ("Por&Burn", 1_000_001),
    ("Por&Mlnd", 1_000_002),
    ("Temp", 6_200_000),
];

/// Lowercase suffix to id offset, longest suffix first.
pub static SUFFIX_BUCKETS: &[(&str, u32)] = &[
    ("temp10", 6_100_000),
    ("out", 5_100_000),
    ("in", 5_000_000),
    ("c", 300_000),
    ("b", 200_000),
    ("a", 100_000),
];

lazy_static! {
    static ref STARTS_WITH_NF_A00: Regex =
        Regex::new(r"(?i)^(nf_[a-z]{1,3}[0-9]{2,4}_?)+([a-z]{3}stop)?(stop|sto)?").unwrap();
    static ref DIGITS: Regex = Regex::new(r"[0-9]+").unwrap();
}

/// The stop code shown to riders; `"0"` means the stop has none.
pub fn stop_code(stop: &GStop) -> String {
    if stop.stop_code == NO_STOP_CODE {
        return String::new();
    }
    stop.stop_code.clone()
}

/// Removes the agency's `nf_A00_` style prefix.
pub fn clean_stop_original_id(stop_id: &str) -> String {
    STARTS_WITH_NF_A00.replace(stop_id, "").into_owned()
}

pub fn stop_id(stop: &GStop) -> Result<u32> {
    let candidate = if stop.stop_code.is_empty() || stop.stop_code == NO_STOP_CODE {
        &stop.stop_id
    } else {
        &stop.stop_code
    };
    let code = clean_stop_original_id(candidate);

    if !code.is_empty() && code.bytes().all(|b| b.is_ascii_digit()) {
        return match code.parse::<u32>() {
            Ok(id) if id > 0 => Ok(id),
            _ => Err(unresolvable(stop, code)),
        };
    }

    let Some(digits) = DIGITS.find(&code) else {
        return STOP_CODE_EXCEPTIONS
            .iter()
            .find(|(exception, _)| *exception == code)
            .map(|(_, id)| *id)
            .ok_or_else(|| unresolvable(stop, code.clone()));
    };
    let Ok(digits) = digits.as_str().parse::<u32>() else {
        return Err(unresolvable(stop, code));
    };

    let code_lc = code.to_lowercase();
    SUFFIX_BUCKETS
        .iter()
        .find(|(suffix, _)| code_lc.ends_with(suffix))
        .and_then(|(_, offset)| offset.checked_add(digits))
        .ok_or_else(|| unresolvable(stop, code.clone()))
}

fn unresolvable(stop: &GStop, code: String) -> AgencyError {
    AgencyError::UnresolvableStopId {
        stop: stop.clone(),
        code,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop(stop_id: &str, stop_code: &str) -> GStop {
        GStop {
            stop_id: stop_id.to_string(),
            stop_code: stop_code.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_numeric_code_is_the_id() {
        assert_eq!(stop_id(&stop("x", "1234")).unwrap(), 1234);
    }

    #[test]
    fn test_falls_back_to_stop_id() {
        assert_eq!(stop_id(&stop("nf_A12_4321", "")).unwrap(), 4321);
        assert_eq!(stop_id(&stop("nf_A12_4321", "0")).unwrap(), 4321);
    }

    #[test]
    fn test_prefix_stripping() {
        assert_eq!(clean_stop_original_id("nf_A12_1234"), "1234");
        assert_eq!(clean_stop_original_id("NF_ABC123_nf_B22_45a"), "45a");
        assert_eq!(clean_stop_original_id("nf_A12_XYZstop12"), "12");
        assert_eq!(clean_stop_original_id("nf_A12_sto7"), "7");
        assert_eq!(clean_stop_original_id("Por&Burn"), "Por&Burn");
    }

    #[test]
    fn test_suffix_buckets() {
        assert_eq!(stop_id(&stop("x", "12a")).unwrap(), 100_012);
        assert_eq!(stop_id(&stop("x", "12B")).unwrap(), 200_012);
        assert_eq!(stop_id(&stop("x", "12c")).unwrap(), 300_012);
        assert_eq!(stop_id(&stop("x", "45in")).unwrap(), 5_000_045);
        assert_eq!(stop_id(&stop("x", "3OUT")).unwrap(), 5_100_003);
        assert_eq!(stop_id(&stop("x", "temp10")).unwrap(), 6_100_010);
    }

    #[test]
    fn test_a_and_b_variants_differ_by_bucket_width() {
        let a = stop_id(&stop("nf_A12_12a", "")).unwrap();
        let b = stop_id(&stop("nf_A12_12b", "")).unwrap();
        assert_eq!(b - a, 100_000);
    }

    #[test]
    fn test_exception_table() {
        assert_eq!(stop_id(&stop("x", "Por&Burn")).unwrap(), 1_000_001);
        assert_eq!(stop_id(&stop("x", "Por&Mlnd")).unwrap(), 1_000_002);
        assert_eq!(stop_id(&stop("x", "Temp")).unwrap(), 6_200_000);
    }

    #[test]
    fn test_unknown_letter_code_is_fatal() {
        let err = stop_id(&stop("x", "Main&Ferry")).unwrap_err();
        assert!(matches!(err, AgencyError::UnresolvableStopId { ref code, .. } if code == "Main&Ferry"));
    }

    #[test]
    fn test_unknown_suffix_is_fatal() {
        assert!(stop_id(&stop("x", "12d")).is_err());
    }

    #[test]
    fn test_zero_and_overflow_are_fatal() {
        assert!(stop_id(&stop("000", "")).is_err());
        assert!(stop_id(&stop("x", "99999999999")).is_err());
        assert!(stop_id(&stop("x", "4294967295a")).is_err());
    }

    #[test]
    fn test_empty_after_prefix_is_fatal() {
        assert!(stop_id(&stop("nf_A12_", "")).is_err());
    }

    #[test]
    fn test_stop_id_is_deterministic() {
        let s = stop("nf_A12_77b", "");
        assert_eq!(stop_id(&s).unwrap(), stop_id(&s).unwrap());
    }

    #[test]
    fn test_stop_code() {
        assert_eq!(stop_code(&stop("x", "0")), "");
        assert_eq!(stop_code(&stop("x", "12a")), "12a");
    }
}
