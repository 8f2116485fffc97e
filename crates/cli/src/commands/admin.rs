//! Admin account commands.
//!
//! # Usage
//!
//! ```bash
//! echo 'correct horse battery' | cafe-cli admin hash-password
//! ```
//!
//! The printed PHC string goes in `CAFE_ADMIN_PASSWORD_HASH`, alongside
//! `CAFE_ADMIN_EMAIL`. The password is read from stdin so it never appears in
//! shell history or the process list.

use std::io::{self, BufRead, Write};

use cafe_nine_storefront::services::auth::{self, AuthError, MIN_PASSWORD_LENGTH};

use super::CliError;

/// Read a password from stdin and print its argon2 hash.
///
/// # Errors
///
/// Returns an error if stdin cannot be read, the password is shorter than
/// [`MIN_PASSWORD_LENGTH`], or hashing fails.
pub fn hash_password() -> Result<(), CliError> {
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let hash = hash_line(&line)?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{hash}")?;
    tracing::info!("Set CAFE_ADMIN_PASSWORD_HASH to the value above");
    Ok(())
}

/// Hash one line of input, ignoring the trailing newline.
fn hash_line(line: &str) -> Result<String, AuthError> {
    let password = line.trim_end_matches(['\r', '\n']);
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    auth::hash_password(password)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_line_round_trips_through_verify() {
        let hash = hash_line("correct horse battery\n").unwrap();
        assert!(hash.starts_with("$argon2"));
        auth::verify_password("correct horse battery", &hash).unwrap();
    }

    #[test]
    fn test_hash_line_rejects_short_password() {
        assert!(matches!(
            hash_line("short\n"),
            Err(AuthError::WeakPassword(_))
        ));
    }
}
