// Test-only helpers for `labfinder-lib` tests
#![allow(dead_code)]
use crate::record::{LabId, LabRecord};

/// Builder to create `LabRecord` instances in tests with sensible defaults.
pub struct LabRecordBuilder {
    record: LabRecord,
}

impl LabRecordBuilder {
    #[must_use]
    pub fn new(id: LabId) -> Self {
        Self {
            record: LabRecord {
                id,
                name: format!("Lab {id}"),
                address: String::new(),
                city: String::new(),
                state: String::new(),
                certificate_no: format!("TC-{id:04}"),
                discipline: String::new(),
                issue_date: String::new(),
                expiry_date: String::new(),
                contact_person: String::new(),
                contact_no: String::new(),
                email: String::new(),
            },
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.record.name = name.to_string();
        self
    }

    pub fn address(mut self, address: &str) -> Self {
        self.record.address = address.to_string();
        self
    }

    pub fn city(mut self, city: &str) -> Self {
        self.record.city = city.to_string();
        self
    }

    pub fn state(mut self, state: &str) -> Self {
        self.record.state = state.to_string();
        self
    }

    pub fn discipline(mut self, discipline: &str) -> Self {
        self.record.discipline = discipline.to_string();
        self
    }

    pub fn issue_date(mut self, date: &str) -> Self {
        self.record.issue_date = date.to_string();
        self
    }

    pub fn expiry_date(mut self, date: &str) -> Self {
        self.record.expiry_date = date.to_string();
        self
    }

    pub fn contact_person(mut self, person: &str) -> Self {
        self.record.contact_person = person.to_string();
        self
    }

    pub fn email(mut self, email: &str) -> Self {
        self.record.email = email.to_string();
        self
    }

    pub fn build(self) -> LabRecord {
        self.record
    }
}

impl Default for LabRecordBuilder {
    fn default() -> Self {
        Self::new(1)
    }
}
