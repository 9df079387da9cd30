use axum::http::HeaderValue;
use color_eyre::Result;

pub fn cookie(name: &str, value: &str, secure: bool) -> Result<HeaderValue> {
    let secure_attr = if secure { "; Secure" } else { "" };
    let cookie =
        format!("{name}={value}; HttpOnly; Max-Age=86400; Path=/; SameSite=Strict{secure_attr}");
    Ok(cookie.parse()?)
}

pub fn clear_cookie(name: &str, secure: bool) -> Result<HeaderValue> {
    let secure_attr = if secure { "; Secure" } else { "" };
    let cookie = format!("{name}=; HttpOnly; Max-Age=0; Path=/; SameSite=Strict{secure_attr}");
    Ok(cookie.parse()?)
}
