use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
pub enum LeaveType {
    Personal,
    Sick,
    Official,
}

impl LeaveType {
    pub const ALL: [LeaveType; 3] = [LeaveType::Personal, LeaveType::Sick, LeaveType::Official];

    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveType::Personal => "Personal",
            LeaveType::Sick => "Sick",
            LeaveType::Official => "Official",
        }
    }
}

impl fmt::Display for LeaveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeaveType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Personal" => Ok(LeaveType::Personal),
            "Sick" => Ok(LeaveType::Sick),
            "Official" => Ok(LeaveType::Official),
            _ => Err(format!("Invalid leave type: {s}")),
        }
    }
}

/// Workflow status. Only `Waiting` may move, and only once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
pub enum LeaveStatus {
    Waiting,
    Approved,
    Rejected,
}

impl LeaveStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveStatus::Waiting => "Waiting",
            LeaveStatus::Approved => "Approved",
            LeaveStatus::Rejected => "Rejected",
        }
    }

    /// Returns the status a decision moves this one to, or `None` if the
    /// request was already decided.
    pub fn apply(self, decision: Decision) -> Option<LeaveStatus> {
        match self {
            LeaveStatus::Waiting => Some(decision.target()),
            LeaveStatus::Approved | LeaveStatus::Rejected => None,
        }
    }
}

impl fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeaveStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Waiting" => Ok(LeaveStatus::Waiting),
            "Approved" => Ok(LeaveStatus::Approved),
            "Rejected" => Ok(LeaveStatus::Rejected),
            _ => Err(format!("Invalid leave status: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    pub fn target(&self) -> LeaveStatus {
        match self {
            Decision::Approve => LeaveStatus::Approved,
            Decision::Reject => LeaveStatus::Rejected,
        }
    }

    pub fn past_tense(&self) -> &'static str {
        match self {
            Decision::Approve => "approved",
            Decision::Reject => "rejected",
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct LeaveRequest {
    #[sqlx(rename = "leave_id")]
    pub id: i64,
    pub user_id: i64,
    pub leave_type: LeaveType,
    pub application_date: NaiveDate,
    pub comment: Option<String>,
    pub status: LeaveStatus,
}

/// A request as its owner sees it, with the manager's name resolved.
#[derive(Debug, Clone, Serialize)]
pub struct OwnLeaveRequest {
    pub id: i64,
    pub application_date: NaiveDate,
    pub leave_type: LeaveType,
    pub manager_name: String,
    pub comment: Option<String>,
    pub status: LeaveStatus,
}

/// A waiting request of a direct report, joined with the requester's name.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct PendingLeave {
    #[sqlx(rename = "leave_id")]
    pub id: i64,
    pub employee_name: String,
    pub leave_type: LeaveType,
    pub application_date: NaiveDate,
    pub comment: Option<String>,
    pub status: LeaveStatus,
}
