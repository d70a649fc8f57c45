use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::metadata::RequestMeta;

use super::document::Fields;
use super::timestamp;

/// Contact form input after validation and normalization.
#[derive(Debug, Clone, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// A contact submission as written to the `contacts` collection.
#[derive(Debug, Clone)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub ip_address: String,
    pub user_agent: Option<String>,
}

impl ContactSubmission {
    pub fn new(form: ContactForm, meta: RequestMeta, timestamp: DateTime<Utc>) -> Self {
        Self {
            name: form.name,
            email: form.email,
            message: form.message,
            timestamp,
            ip_address: meta.ip_address,
            user_agent: meta.user_agent,
        }
    }

    pub fn to_fields(&self) -> Fields {
        let mut fields = Fields::new();
        fields.insert("name".into(), Value::String(self.name.clone()));
        fields.insert("email".into(), Value::String(self.email.clone()));
        fields.insert("message".into(), Value::String(self.message.clone()));
        fields.insert("timestamp".into(), timestamp::to_value(&self.timestamp));
        fields.insert("ipAddress".into(), Value::String(self.ip_address.clone()));
        if let Some(ua) = &self.user_agent {
            fields.insert("userAgent".into(), Value::String(ua.clone()));
        }
        fields
    }
}

/// Body returned to the submitter after a successful create.
#[derive(Debug, Clone, Serialize)]
pub struct ContactReceipt {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(serialize_with = "timestamp::serialize")]
    pub timestamp: DateTime<Utc>,
}

impl ContactReceipt {
    pub fn new(id: String, submission: &ContactSubmission) -> Self {
        Self {
            id,
            name: submission.name.clone(),
            email: submission.email.clone(),
            timestamp: submission.timestamp,
        }
    }
}
