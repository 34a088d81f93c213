// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Credential validation for sign-up and sign-in.
//!
//! Lengths are counted in characters, not bytes.

use thiserror::Error;

/// Malformed sign-up or sign-in input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Username length is out of range.
    #[error("Username must be between {min} and {max} characters")]
    UsernameLength { min: usize, max: usize },

    /// Password length is out of range.
    #[error("Password must be between {min} and {max} characters")]
    PasswordLength { min: usize, max: usize },

    /// Password and confirmation do not match.
    #[error("Passwords do not match")]
    ConfirmationMismatch,
}

/// Length limits applied to usernames and passwords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CredentialPolicy {
    pub username_min: usize,
    pub username_max: usize,
    pub password_min: usize,
    pub password_max: usize,
}

impl Default for CredentialPolicy {
    fn default() -> Self {
        Self {
            username_min: 6,
            username_max: 50,
            password_min: 8,
            password_max: 50,
        }
    }
}

impl CredentialPolicy {
    /// Validates a username and password pair.
    ///
    /// # Errors
    ///
    /// Returns the first length rule that fails.
    pub fn validate_credentials(&self, username: &str, password: &str) -> Result<(), ValidationError> {
        let username_len: usize = username.chars().count();
        if !(self.username_min..=self.username_max).contains(&username_len) {
            return Err(ValidationError::UsernameLength {
                min: self.username_min,
                max: self.username_max,
            });
        }

        let password_len: usize = password.chars().count();
        if !(self.password_min..=self.password_max).contains(&password_len) {
            return Err(ValidationError::PasswordLength {
                min: self.password_min,
                max: self.password_max,
            });
        }

        Ok(())
    }

    /// Validates sign-up input, including the password confirmation.
    ///
    /// # Errors
    ///
    /// Returns the first rule that fails.
    pub fn validate_sign_up(
        &self,
        username: &str,
        password: &str,
        confirmation: &str,
    ) -> Result<(), ValidationError> {
        self.validate_credentials(username, password)?;

        if password != confirmation {
            return Err(ValidationError::ConfirmationMismatch);
        }

        Ok(())
    }
}
