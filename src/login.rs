// src/login.rs
//! Account login. The site guards the form with an image captcha; reading it
//! is delegated to a [`CaptchaSolver`].

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{info, warn};

use crate::config::consts::{BASE, CAPTCHA_PATH, LOGIN_ATTEMPTS, LOGIN_PATH, LOGIN_SUBMIT};
use crate::core::Fetch;
use crate::error::{Result, ScrapeError};

// Mainland carrier prefixes: China Mobile, China Unicom, China Telecom.
static PHONE: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        r"(134|135|136|137|138|139|150|151|152|157|158|159|182|183|184|187|188|147|178|1705)[1-9]+",
        r"(130|131|132|155|156|185|186|145|176|1709)[1-9]+",
        r"(13|153|180|181|189|177|1700)[1-9]+",
    ]
    .map(|p| Regex::new(p).expect("static regex"))
});

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:([A-Za-z0-9]+[.-_])*[A-Za-z0-9]+@[A-Za-z0-9-]+(\.[A-Z|a-z]{2,})+)$")
        .expect("static regex")
});

/// Turns a captcha image (raw bytes as served, usually GIF/JPEG) into text.
pub trait CaptchaSolver {
    fn solve(&self, image: &[u8]) -> Result<String>;
}

#[derive(Clone)]
pub struct Credentials {
    account: String,
    password: String,
}

impl Credentials {
    /// `account` is a mobile number or an e-mail address; the password must
    /// be 6 to 20 characters.
    pub fn new(account: impl Into<String>, password: impl Into<String>) -> Result<Self> {
        let account = account.into();
        let password = password.into();

        let len = password.chars().count();
        if !(6..=20).contains(&len) {
            return Err(ScrapeError::InvalidInput(s!(
                "incorrect password format, length must be between 6~20"
            )));
        }
        if !is_phone(&account) && !EMAIL.is_match(&account) {
            return Err(ScrapeError::InvalidInput(s!(
                "not a valid phone number or an email address"
            )));
        }
        Ok(Self { account, password })
    }

    pub fn account(&self) -> &str {
        &self.account
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("account", &self.account)
            .field("password", &"***")
            .finish()
    }
}

fn is_phone(account: &str) -> bool {
    PHONE.iter().any(|re| re.is_match(account))
}

/// Log in on `fetch`'s session. Each attempt fetches a fresh captcha; gives up
/// after `LOGIN_ATTEMPTS`.
pub fn login(fetch: &dyn Fetch, creds: &Credentials, solver: &dyn CaptchaSolver) -> Result<()> {
    let captcha_url = join!(BASE, CAPTCHA_PATH);
    let login_url = join!(BASE, LOGIN_PATH);

    let mut last_err = s!();
    for attempt in 1..=LOGIN_ATTEMPTS {
        match try_once(fetch, creds, solver, &captcha_url, &login_url) {
            Ok(()) => {
                info!(attempt, account = creds.account(), "logged in");
                return Ok(());
            }
            Err(e) => {
                warn!(attempt, error = %e, "login attempt failed");
                last_err = e.to_string();
            }
        }
    }
    Err(ScrapeError::Login(format!(
        "gave up after {LOGIN_ATTEMPTS} attempts: {last_err}"
    )))
}

fn try_once(
    fetch: &dyn Fetch,
    creds: &Credentials,
    solver: &dyn CaptchaSolver,
    captcha_url: &str,
    login_url: &str,
) -> Result<()> {
    let image = fetch.get_bytes(captcha_url)?;
    let code = solver.solve(&image)?;
    let form = [
        ("email", creds.account.as_str()),
        ("pwd", creds.password.as_str()),
        ("code", code.trim()),
        ("denglu", LOGIN_SUBMIT),
    ];
    fetch.post_form(login_url, &form)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use super::*;
    use crate::core::Page;

    #[test]
    fn accepts_phone_and_email() {
        assert!(Credentials::new("13912345678", "secret1").is_ok());
        assert!(Credentials::new("15512345678", "secret1").is_ok());
        assert!(Credentials::new("someone@example.com", "secret1").is_ok());
        assert!(Credentials::new("first.last@mail.example.cn", "secret1").is_ok());
    }

    #[test]
    fn rejects_bad_account() {
        let err = Credentials::new("not-an-account", "secret1").unwrap_err();
        assert!(matches!(err, ScrapeError::InvalidInput(_)));
        assert!(Credentials::new("someone@example", "secret1").is_err());
    }

    #[test]
    fn rejects_bad_password_length() {
        assert!(Credentials::new("13912345678", "short").is_err());
        assert!(Credentials::new("13912345678", "x".repeat(21)).is_err());
        assert!(Credentials::new("13912345678", "六个中文字符").is_ok());
    }

    #[test]
    fn debug_hides_password() {
        let c = Credentials::new("13912345678", "secret1").unwrap();
        let dbg = format!("{c:?}");
        assert!(dbg.contains("13912345678"));
        assert!(!dbg.contains("secret1"));
    }

    /// Records every POST; captcha download always succeeds.
    #[derive(Default)]
    struct Recorder {
        posts: RefCell<Vec<Vec<(String, String)>>>,
    }

    impl Fetch for Recorder {
        fn get_page(&self, url: &str) -> Result<Page> {
            Err(ScrapeError::not_found(url))
        }
        fn get_bytes(&self, _url: &str) -> Result<Vec<u8>> {
            Ok(b"GIF89a".to_vec())
        }
        fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<Page> {
            self.posts
                .borrow_mut()
                .push(form.iter().map(|(k, v)| (s!(*k), s!(*v))).collect());
            Ok(Page { url: s!(url), body: s!() })
        }
    }

    struct Fixed(&'static str);
    impl CaptchaSolver for Fixed {
        fn solve(&self, _image: &[u8]) -> Result<String> {
            Ok(s!(self.0))
        }
    }

    /// Fails until the n-th call.
    struct Flaky {
        calls: Cell<usize>,
        succeed_on: usize,
    }
    impl CaptchaSolver for Flaky {
        fn solve(&self, _image: &[u8]) -> Result<String> {
            let n = self.calls.get() + 1;
            self.calls.set(n);
            if n >= self.succeed_on {
                Ok(s!("ab12"))
            } else {
                Err(ScrapeError::InvalidInput(s!("unreadable")))
            }
        }
    }

    #[test]
    fn posts_login_form() {
        let fetch = Recorder::default();
        let creds = Credentials::new("someone@example.com", "secret1").unwrap();
        login(&fetch, &creds, &Fixed(" ab12 ")).unwrap();

        let posts = fetch.posts.borrow();
        assert_eq!(posts.len(), 1);
        let form = &posts[0];
        assert!(form.contains(&(s!("email"), s!("someone@example.com"))));
        assert!(form.contains(&(s!("pwd"), s!("secret1"))));
        assert!(form.contains(&(s!("code"), s!("ab12"))));
        assert!(form.contains(&(s!("denglu"), s!("登录"))));
    }

    #[test]
    fn retries_until_solver_succeeds() {
        let fetch = Recorder::default();
        let creds = Credentials::new("13912345678", "secret1").unwrap();
        let solver = Flaky { calls: Cell::new(0), succeed_on: 3 };
        login(&fetch, &creds, &solver).unwrap();
        assert_eq!(solver.calls.get(), 3);
        assert_eq!(fetch.posts.borrow().len(), 1);
    }

    #[test]
    fn gives_up_after_attempts() {
        let fetch = Recorder::default();
        let creds = Credentials::new("13912345678", "secret1").unwrap();
        let solver = Flaky { calls: Cell::new(0), succeed_on: usize::MAX };
        let err = login(&fetch, &creds, &solver).unwrap_err();
        assert!(matches!(err, ScrapeError::Login(_)));
        assert_eq!(solver.calls.get(), LOGIN_ATTEMPTS);
        assert!(fetch.posts.borrow().is_empty());
    }
}
