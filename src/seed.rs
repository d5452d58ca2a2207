use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::model::{AttendanceRecord, User, UserId};

/// Directory of users plus the attendance pool every ledger is seeded from.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedData {
    pub users: Vec<User>,
    #[serde(default)]
    pub attendance: Vec<AttendanceRecord>,
}

const BUILTIN: &str = r#"{
    "users": [
        { "id": "1", "name": "Admin User", "email": "admin@attendx.com", "role": "ADMIN", "department": "Human Resources" },
        { "id": "2", "name": "John Doe", "email": "john@attendx.com", "role": "EMPLOYEE", "department": "Engineering" },
        { "id": "3", "name": "Jane Smith", "email": "jane@attendx.com", "role": "EMPLOYEE", "department": "Marketing" }
    ],
    "attendance": [
        { "id": "101", "userId": "2", "date": "2023-10-25", "checkIn": "08:55", "checkOut": "17:05", "status": "Present", "totalHours": 8.1 },
        { "id": "102", "userId": "2", "date": "2023-10-24", "checkIn": "09:15", "checkOut": "18:15", "status": "Late", "totalHours": 9.0 },
        { "id": "103", "userId": "3", "date": "2023-10-25", "checkIn": "08:30", "checkOut": "16:30", "status": "Present", "totalHours": 8.0 }
    ]
}"#;

impl SeedData {
    /// Demo directory used when no seed file is configured.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN).context("builtin seed data is invalid")
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let seed: SeedData = serde_json::from_str(json)?;
        seed.check_owners()?;
        Ok(seed)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read seed file {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("invalid seed file {}", path.display()))
    }

    pub fn find_user(&self, id: &UserId) -> Option<&User> {
        self.users.iter().find(|user| &user.id == id)
    }

    /// Users other than administrators.
    pub fn employee_count(&self) -> usize {
        self.users.iter().filter(|user| !user.is_admin()).count()
    }

    fn check_owners(&self) -> Result<()> {
        for record in &self.attendance {
            if self.find_user(record.user_id()).is_none() {
                anyhow::bail!(
                    "attendance record {} belongs to unknown user {}",
                    record.id(),
                    record.user_id()
                );
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AttendanceStatus, Role};

    #[test]
    fn builtin_matches_the_demo_directory() {
        let seed = SeedData::builtin().unwrap();
        assert_eq!(seed.users.len(), 3);
        assert_eq!(seed.attendance.len(), 3);
        assert_eq!(seed.employee_count(), 2);

        let john = seed.find_user(&UserId::from("2")).unwrap();
        assert_eq!(john.name, "John Doe");
        assert_eq!(john.role, Role::Employee);
        assert_eq!(seed.attendance[1].status(), AttendanceStatus::Late);
    }

    #[test]
    fn rejects_malformed_records_instead_of_coercing() {
        let json = r#"{
            "users": [{ "id": "2", "name": "John Doe", "email": "j@x.com", "role": "EMPLOYEE", "department": "Eng" }],
            "attendance": [
                { "id": "1", "userId": "2", "date": "2023-10-25", "checkIn": "8:55", "checkOut": "17:05", "status": "Present", "totalHours": 8.1 }
            ]
        }"#;
        let err = SeedData::from_json(json).unwrap_err();
        assert!(err.to_string().contains("HH:MM"), "{err}");
    }

    #[test]
    fn rejects_records_of_unknown_users() {
        let json = r#"{
            "users": [],
            "attendance": [
                { "id": "1", "userId": "7", "date": "2023-10-25", "checkIn": "08:55", "checkOut": "17:05", "status": "Present", "totalHours": 8.1 }
            ]
        }"#;
        let err = SeedData::from_json(json).unwrap_err();
        assert!(err.to_string().contains("unknown user 7"));
    }

    #[test]
    fn missing_file_reports_its_path() {
        let err = SeedData::from_path("/nonexistent/seed.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/seed.json"));
    }
}
