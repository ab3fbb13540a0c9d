//! WhatsApp channel integration (Twilio transport).
//!
//! Outbound replies go through a tiered fallback chain so a valid reply is
//! produced under all conditions: direct API delivery when credentials are
//! configured, an inline TwiML envelope otherwise, and raw text as the last
//! resort.

pub mod deliver;
pub mod error;
pub mod format;
pub mod outbound;
pub mod twiml;

pub use {
    deliver::{Delivery, Messenger},
    error::{Error, Result},
    format::format_for_whatsapp,
    outbound::TwilioOutbound,
};
