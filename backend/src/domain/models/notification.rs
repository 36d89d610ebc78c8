use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

/// Who a notification is addressed to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Recipient {
    Admin,
    Vendor(String),
}

impl fmt::Display for Recipient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recipient::Admin => f.write_str("admin"),
            Recipient::Vendor(id) => write!(f, "vendor:{}", id),
        }
    }
}

impl FromStr for Recipient {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "admin" => Ok(Recipient::Admin),
            other => match other.strip_prefix("vendor:") {
                Some(id) if !id.trim().is_empty() => Ok(Recipient::Vendor(id.trim().to_string())),
                _ => Err(format!("Invalid recipient: {}", s)),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DomainNotification {
    pub id: String,
    pub recipient: Recipient,
    pub severity: Severity,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
}

impl DomainNotification {
    pub fn generate_id() -> String {
        format!("notification::{}", uuid::Uuid::new_v4())
    }
}
