use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

use crate::domain::error::LedgerError;

/// Fixed set of diary categories the ledger knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DiaryType {
    PeriOperative,
    PostOperative,
    FollowUp,
    Chemotherapy,
    Radiology,
}

impl DiaryType {
    /// All types in catalog (display) order
    pub const ALL: [DiaryType; 5] = [
        DiaryType::PeriOperative,
        DiaryType::PostOperative,
        DiaryType::FollowUp,
        DiaryType::Chemotherapy,
        DiaryType::Radiology,
    ];

    /// Two-letter code embedded in diary IDs
    pub fn code(self) -> &'static str {
        match self {
            DiaryType::PeriOperative => "PO",
            DiaryType::PostOperative => "PT",
            DiaryType::FollowUp => "FU",
            DiaryType::Chemotherapy => "CT",
            DiaryType::Radiology => "RD",
        }
    }

    /// Kebab-case name used on the wire
    pub fn as_str(self) -> &'static str {
        match self {
            DiaryType::PeriOperative => "peri-operative",
            DiaryType::PostOperative => "post-operative",
            DiaryType::FollowUp => "follow-up",
            DiaryType::Chemotherapy => "chemotherapy",
            DiaryType::Radiology => "radiology",
        }
    }

    pub fn from_code(code: &str) -> Option<DiaryType> {
        DiaryType::ALL.into_iter().find(|t| t.code() == code)
    }
}

impl fmt::Display for DiaryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiaryType {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        DiaryType::ALL
            .into_iter()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| LedgerError::InvalidType(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomainDiaryStatus {
    Unassigned,
    Assigned,
    Active,
    Inactive,
}

impl DomainDiaryStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            DomainDiaryStatus::Unassigned => "unassigned",
            DomainDiaryStatus::Assigned => "assigned",
            DomainDiaryStatus::Active => "active",
            DomainDiaryStatus::Inactive => "inactive",
        }
    }
}

impl fmt::Display for DomainDiaryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A generated diary held by the inventory ledger.
///
/// `assigned_vendor_id` is set iff the status is assigned or active
/// (inactive diaries keep the vendor they were retired under).
#[derive(Debug, Clone, PartialEq)]
pub struct DomainDiary {
    pub id: String,
    pub diary_type: DiaryType,
    pub generated_date: DateTime<Utc>,
    pub status: DomainDiaryStatus,
    pub assigned_vendor_id: Option<String>,
    pub patient_name: Option<String>,
}

impl DomainDiary {
    pub fn type_code(&self) -> &'static str {
        self.diary_type.code()
    }

    /// Build the canonical ID: `DRY-{year}-{code}-{seq:03}`
    pub fn generate_id(year: i32, diary_type: DiaryType, sequence: u32) -> String {
        format!("DRY-{}-{}-{:03}", year, diary_type.code(), sequence)
    }

    /// Split an ID into (year, type, sequence)
    pub fn parse_id(id: &str) -> Result<(i32, DiaryType, u32), String> {
        let parts: Vec<&str> = id.split('-').collect();
        if parts.len() != 4 || parts[0] != "DRY" {
            return Err(format!("Invalid diary ID format: {}", id));
        }
        let year = parts[1]
            .parse::<i32>()
            .map_err(|_| format!("Invalid year in diary ID: {}", id))?;
        let diary_type = DiaryType::from_code(parts[2])
            .ok_or_else(|| format!("Unknown type code in diary ID: {}", id))?;
        if parts[3].len() < 3 {
            return Err(format!("Sequence must be at least 3 digits: {}", id));
        }
        let sequence = parts[3]
            .parse::<u32>()
            .map_err(|_| format!("Invalid sequence in diary ID: {}", id))?;
        Ok((year, diary_type, sequence))
    }
}
