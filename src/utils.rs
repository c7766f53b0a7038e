pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn cookie(name: &str, value: &str, secure: bool) -> String {
    let secure = if secure { " Secure;" } else { "" };
    format!("{name}={value}; HttpOnly; Max-Age=28800;{secure} Path=/; SameSite=Strict")
}

pub fn clear_cookie(name: &str, secure: bool) -> String {
    let secure = if secure { " Secure;" } else { "" };
    format!("{name}=; HttpOnly; Max-Age=0;{secure} Path=/; SameSite=Strict")
}
