//! Cookie read/write helpers.
//!
//! Browser access goes through `document.cookie` and is gated behind the
//! `hydrate` feature; the parse/format logic is plain string handling so it
//! stays testable without a browser. On the server every operation is a no-op
//! returning the empty case.

#[cfg(test)]
#[path = "cookie_test.rs"]
mod cookie_test;

/// Extract a cookie value by name from a raw `document.cookie` string.
pub fn parse_cookie(raw: &str, name: &str) -> Option<String> {
    raw.split(';').map(str::trim).find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        (key == name).then(|| value.to_owned())
    })
}

/// Build a `document.cookie` assignment string.
///
/// Always scoped to `Path=/` with `SameSite=Lax`; `Secure` is appended only
/// when the page itself is served over an encrypted transport.
pub fn format_set_cookie(name: &str, value: &str, max_age_secs: u32, secure: bool) -> String {
    let mut cookie = format!("{name}={value}; Path=/; Max-Age={max_age_secs}; SameSite=Lax");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Read a named cookie from the current document.
pub fn read(name: &str) -> Option<String> {
    #[cfg(feature = "hydrate")]
    {
        let raw = html_document()?.cookie().ok()?;
        parse_cookie(&raw, name)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = name;
        None
    }
}

/// Write a named cookie on the current document.
pub fn write(name: &str, value: &str, max_age_secs: u32) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(doc) = html_document() {
            let _ = doc.set_cookie(&format_set_cookie(name, value, max_age_secs, is_secure()));
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (name, value, max_age_secs);
    }
}

/// Delete a named cookie by expiring it immediately.
pub fn delete(name: &str) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(doc) = html_document() {
            let _ = doc.set_cookie(&format_set_cookie(name, "", 0, is_secure()));
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = name;
    }
}

#[cfg(feature = "hydrate")]
fn html_document() -> Option<web_sys::HtmlDocument> {
    use wasm_bindgen::JsCast;

    let doc = web_sys::window()?.document()?;
    doc.dyn_into::<web_sys::HtmlDocument>().ok()
}

#[cfg(feature = "hydrate")]
fn is_secure() -> bool {
    web_sys::window()
        .and_then(|w| w.location().protocol().ok())
        .map_or(false, |proto| proto == "https:")
}
