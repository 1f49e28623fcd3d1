//! Test-code verification for phone and email sign-in steps.

use thiserror::Error;

use crate::config::VerificationCodes;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VerificationError {
    #[error("incorrect SMS code")]
    WrongSmsCode,
    #[error("incorrect email code")]
    WrongEmailCode,
    #[error("email code is required to register a shop with an email")]
    MissingEmailCode,
}

/// Codes submitted with a login request.
#[derive(Debug, Clone, Copy, Default)]
pub struct Submitted<'a> {
    pub sms_code: &'a str,
    pub email: Option<&'a str>,
    pub email_code: Option<&'a str>,
}

impl VerificationCodes {
    pub fn check_sms(&self, code: &str) -> Result<(), VerificationError> {
        if code.trim() == self.sms {
            Ok(())
        } else {
            Err(VerificationError::WrongSmsCode)
        }
    }

    pub fn check_email(&self, code: &str) -> Result<(), VerificationError> {
        if code.trim() == self.email {
            Ok(())
        } else {
            Err(VerificationError::WrongEmailCode)
        }
    }

    /// The SMS code is always required. A shop registering with an email
    /// must also confirm it.
    pub fn verify_login(
        &self,
        submitted: Submitted<'_>,
        registering_shop: bool,
    ) -> Result<(), VerificationError> {
        self.check_sms(submitted.sms_code)?;

        let email = submitted.email.map(str::trim).filter(|e| !e.is_empty());
        if registering_shop && email.is_some() {
            let code = submitted
                .email_code
                .ok_or(VerificationError::MissingEmailCode)?;
            self.check_email(code)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sms_code_is_always_checked() {
        let codes = VerificationCodes::default();
        let submitted = Submitted {
            sms_code: "0000",
            ..Default::default()
        };
        assert_eq!(
            codes.verify_login(submitted, false),
            Err(VerificationError::WrongSmsCode)
        );
    }

    #[test]
    fn shop_registration_with_email_needs_email_code() {
        let codes = VerificationCodes::default();
        let mut submitted = Submitted {
            sms_code: "1234",
            email: Some("loja@example.com"),
            email_code: None,
        };
        assert_eq!(
            codes.verify_login(submitted, true),
            Err(VerificationError::MissingEmailCode)
        );

        submitted.email_code = Some("1111");
        assert_eq!(
            codes.verify_login(submitted, true),
            Err(VerificationError::WrongEmailCode)
        );

        submitted.email_code = Some("5555");
        assert_eq!(codes.verify_login(submitted, true), Ok(()));
    }

    #[test]
    fn plain_login_ignores_email() {
        let codes = VerificationCodes::default();
        let submitted = Submitted {
            sms_code: " 1234 ",
            email: Some("a@b.c"),
            email_code: None,
        };
        assert_eq!(codes.verify_login(submitted, false), Ok(()));
    }
}
