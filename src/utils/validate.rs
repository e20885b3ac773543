//! Input validation for user attributes: PIN, CPF and e-mail shape.
//! Everything here runs before any write; no partial writes happen on
//! validation failure.

use crate::errors::{AppError, AppResult};
use regex::Regex;
use std::sync::OnceLock;

/// Compiled once on first use.
fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("static e-mail pattern"))
}

pub fn validate_pin(pin: &str) -> AppResult<()> {
    // Exactly four ASCII digits.
    if pin.len() == 4 && pin.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(AppError::InvalidPin(pin.to_string()))
    }
}

pub fn validate_email(email: &str) -> AppResult<()> {
    if email_regex().is_match(email) {
        Ok(())
    } else {
        Err(AppError::InvalidEmail(email.to_string()))
    }
}

/// Validate a Brazilian CPF: 11 digits (punctuation tolerated) with the
/// standard mod-11 check digits. Repeated-digit sequences are rejected.
pub fn validate_cpf(cpf: &str) -> AppResult<String> {
    let digits: Vec<u32> = cpf.chars().filter_map(|c| c.to_digit(10)).collect();

    if digits.len() != 11 {
        return Err(AppError::InvalidCpf(format!(
            "expected 11 digits, got {}",
            digits.len()
        )));
    }
    if digits.windows(2).all(|w| w[0] == w[1]) {
        return Err(AppError::InvalidCpf("repeated digit sequence".into()));
    }

    let check = |len: usize| -> u32 {
        let sum: u32 = digits[..len]
            .iter()
            .enumerate()
            .map(|(i, d)| d * (len as u32 + 1 - i as u32))
            .sum();
        let rest = (sum * 10) % 11;
        if rest == 10 { 0 } else { rest }
    };

    if check(9) != digits[9] || check(10) != digits[10] {
        return Err(AppError::InvalidCpf("check digits do not match".into()));
    }

    Ok(digits.iter().map(|d| d.to_string()).collect())
}
