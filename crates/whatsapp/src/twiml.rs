//! Minimal TwiML messaging-response construction.

use std::fmt::Write;

use crate::{Error, Result};

/// Content type of a TwiML reply body.
pub const CONTENT_TYPE: &str = "application/xml";

/// Build a `<Response><Message>` envelope carrying `body`.
pub fn message_reply(body: &str) -> Result<String> {
    let mut xml = String::with_capacity(body.len() + 96);
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    write!(
        xml,
        "<Response><Message>{}</Message></Response>",
        escape(body)
    )
    .map_err(|e| Error::message(format!("twiml construction failed: {e}")))?;
    Ok(xml)
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
