use bcrypt::{DEFAULT_COST, hash, verify};

pub fn hash_password(raw: &str) -> Result<String, bcrypt::BcryptError> {
    hash(raw, DEFAULT_COST)
}

pub fn verify_password(raw: &str, hashed: &str) -> Result<bool, bcrypt::BcryptError> {
    verify(raw, hashed)
}

/// garde custom validator mirroring the registration policy: at least 8
/// characters with one uppercase, one lowercase, one number and one symbol.
pub fn strong_password(value: &str, _ctx: &()) -> garde::Result {
    let long_enough = value.chars().count() >= 8;
    let has_lower = value.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = value.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = value.chars().any(|c| c.is_ascii_digit());
    let has_symbol = value.chars().any(|c| !c.is_alphanumeric());

    if long_enough && has_lower && has_upper && has_digit && has_symbol {
        Ok(())
    } else {
        Err(garde::Error::new(
            "Password must contain at least 8 characters, including at least one uppercase letter, one lowercase letter, one symbol, and one number",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_roundtrip() {
        let hashed = hash_password("Sup3r$ecret").unwrap();
        assert!(verify_password("Sup3r$ecret", &hashed).unwrap());
        assert!(!verify_password("wrong-password", &hashed).unwrap());
    }

    #[test]
    fn weak_passwords_are_rejected() {
        assert!(strong_password("Sh0rt!", &()).is_err());
        assert!(strong_password("alllowercase1!", &()).is_err());
        assert!(strong_password("ALLUPPERCASE1!", &()).is_err());
        assert!(strong_password("NoDigitsHere!", &()).is_err());
        assert!(strong_password("NoSymbols123", &()).is_err());
        assert!(strong_password("G00d&Strong", &()).is_ok());
    }
}
