mod leave_request;
mod user;

pub use leave_request::{Decision, LeaveRequest, LeaveStatus, LeaveType, OwnLeaveRequest, PendingLeave};
pub use user::{ManagerOption, Role, User};
