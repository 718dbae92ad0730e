//! Outgoing notifications: digest formatting and mail transport.

pub mod digest;
pub mod mailer;
