pub mod attendance;
pub mod role;
pub mod salary;
pub mod user;

pub use attendance::{AttendanceRecord, AttendanceStatus};
pub use role::Role;
pub use salary::{DaysWorkedPolicy, SalaryConfig};
pub use user::{User, UserId};
