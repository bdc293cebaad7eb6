use std::time::Duration;

/// Name of the session cookie carrying the signed token.
pub const TOKEN_COOKIE_NAME: &str = "token";
pub const TOKEN_COOKIE_PATH: &str = "/";

#[derive(Debug, Clone, Copy)]
pub struct CookieOptions {
    pub secure: bool,
}

pub fn build_session_cookie(value: &str, max_age: Duration, options: CookieOptions) -> String {
    let mut cookie = format!(
        "{}={}; Path={}; Max-Age={}; HttpOnly; SameSite=Lax",
        TOKEN_COOKIE_NAME,
        value,
        TOKEN_COOKIE_PATH,
        max_age.as_secs(),
    );
    if options.secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Max-Age=0 instructs the client to discard the session immediately.
pub fn build_clear_cookie(options: CookieOptions) -> String {
    let mut cookie = format!(
        "{}=; Path={}; Max-Age=0; HttpOnly; SameSite=Lax",
        TOKEN_COOKIE_NAME, TOKEN_COOKIE_PATH,
    );
    if options.secure {
        cookie.push_str("; Secure");
    }
    cookie
}

pub fn extract_cookie_value(header: &str, name: &str) -> Option<String> {
    header.split(';').map(str::trim).find_map(|pair| {
        let mut parts = pair.splitn(2, '=');
        let key = parts.next()?.trim();
        let value = parts.next()?.trim();
        if key == name {
            Some(value.to_string())
        } else {
            None
        }
    })
}
