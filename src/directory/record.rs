//! Patient directory record

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single patient entry in the reference directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientRecord {
    /// Unique patient identifier (e.g., "12345")
    pub id: String,
    /// Display name
    pub name: String,
    /// Phone number including country code
    pub phone_number: String,
    pub email: String,
    pub last_appointment: NaiveDate,
    pub next_appointment_due: NaiveDate,
    /// Assigned provider, e.g. "Dr. Johnson"
    pub doctor: String,
    pub department: String,
}

impl PatientRecord {
    /// Create a record with placeholder contact and care details
    pub fn new(id: impl Into<String>, name: impl Into<String>, phone_number: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            phone_number: phone_number.into(),
            email: String::new(),
            last_appointment: NaiveDate::default(),
            next_appointment_due: NaiveDate::default(),
            doctor: String::new(),
            department: String::new(),
        }
    }

    /// Set email
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Set last and next appointment dates
    pub fn with_appointments(mut self, last: NaiveDate, next_due: NaiveDate) -> Self {
        self.last_appointment = last;
        self.next_appointment_due = next_due;
        self
    }

    /// Set assigned doctor and department
    pub fn with_care_team(mut self, doctor: impl Into<String>, department: impl Into<String>) -> Self {
        self.doctor = doctor.into();
        self.department = department.into();
        self
    }
}
