//! Validation gate: checks a raw JSON body against a resource's field
//! contract before anything touches the store.
//!
//! Errors come back in rule order as `{field, message}` pairs. On success the
//! caller gets the normalized field map (text trimmed, email lower-cased).

pub mod body;
pub mod rules;

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::models::Fields;

pub use body::JsonBody;
use rules::{CONTACT_RULES, EMAIL_MAX_CHARS, FieldKind, FieldRule, PROJECT_RESERVED, PROJECT_RULES};

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Contact,
    /// Project creation: every required field must be present.
    Project,
    /// Project update: only the fields present are checked.
    ProjectPatch,
}

/// Validate `raw` for `kind` and return the normalized fields.
///
/// Contacts keep only their declared fields. Projects are open maps: unknown
/// keys pass through untouched, server-owned keys are rejected.
pub fn validate(kind: ResourceKind, raw: &Value) -> Result<Fields, Vec<FieldError>> {
    let Some(obj) = raw.as_object() else {
        return Err(vec![FieldError::new(
            "body",
            "Request body must be a JSON object",
        )]);
    };

    let (rules, partial, open) = match kind {
        ResourceKind::Contact => (CONTACT_RULES, false, false),
        ResourceKind::Project => (PROJECT_RULES, false, true),
        ResourceKind::ProjectPatch => (PROJECT_RULES, true, true),
    };

    let mut errors = Vec::new();
    let mut out = if open { obj.clone() } else { Fields::new() };

    if open {
        for key in PROJECT_RESERVED {
            if obj.contains_key(*key) {
                errors.push(FieldError::new(*key, format!("{key} is managed by the server")));
                out.remove(*key);
            }
        }
    }

    if partial && obj.is_empty() {
        errors.push(FieldError::new("body", "At least one field must be provided"));
    }

    for rule in rules {
        match obj.get(rule.name) {
            None if partial => {}
            None | Some(Value::Null) if rule.required => {
                errors.push(FieldError::new(rule.name, format!("{} is required", rule.label)));
            }
            None => {}
            Some(Value::Null) => {
                out.insert(rule.name.to_string(), Value::Null);
            }
            Some(value) => match check_value(rule, value) {
                Ok(normalized) => {
                    out.insert(rule.name.to_string(), normalized);
                }
                Err(message) => errors.push(FieldError::new(rule.name, message)),
            },
        }
    }

    if errors.is_empty() {
        Ok(out)
    } else {
        Err(errors)
    }
}

/// Validate, then deserialize the normalized fields into a typed form.
pub fn validate_into<T: DeserializeOwned>(
    kind: ResourceKind,
    raw: &Value,
) -> Result<T, Vec<FieldError>> {
    let fields = validate(kind, raw)?;
    serde_json::from_value(Value::Object(fields))
        .map_err(|e| vec![FieldError::new("body", e.to_string())])
}

fn check_value(rule: &FieldRule, value: &Value) -> Result<Value, String> {
    let label = rule.label;
    match rule.kind {
        FieldKind::Text { max_chars } => {
            let s = expect_str(label, value)?.trim();
            if rule.required && s.is_empty() {
                return Err(format!("{label} is required"));
            }
            if s.chars().count() > max_chars {
                return Err(format!("{label} must be at most {max_chars} characters"));
            }
            Ok(Value::String(s.to_string()))
        }
        FieldKind::Email => {
            let s = expect_str(label, value)?.trim().to_lowercase();
            if s.is_empty() {
                return Err(format!("{label} is required"));
            }
            if s.chars().count() > EMAIL_MAX_CHARS || !EMAIL_RE.is_match(&s) {
                return Err("Please provide a valid email address".to_string());
            }
            Ok(Value::String(s))
        }
        FieldKind::Url => {
            let s = expect_str(label, value)?.trim();
            if s.is_empty() {
                if rule.required {
                    return Err(format!("{label} is required"));
                }
                return Ok(Value::String(String::new()));
            }
            match url::Url::parse(s) {
                Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {
                    Ok(Value::String(s.to_string()))
                }
                _ => Err(format!("{label} must be a valid http(s) URL")),
            }
        }
        FieldKind::StringList => {
            let Some(items) = value.as_array() else {
                return Err(format!("{label} must be an array of strings"));
            };
            if rule.required && items.is_empty() {
                return Err(format!("{label} must contain at least one entry"));
            }
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                match item.as_str().map(str::trim) {
                    Some(s) if !s.is_empty() => out.push(Value::String(s.to_string())),
                    _ => return Err(format!("{label} entries must be non-empty strings")),
                }
            }
            Ok(Value::Array(out))
        }
        FieldKind::Boolean => match value {
            Value::Bool(_) => Ok(value.clone()),
            _ => Err(format!("{label} must be a boolean")),
        },
    }
}

fn expect_str<'a>(label: &str, value: &'a Value) -> Result<&'a str, String> {
    value
        .as_str()
        .ok_or_else(|| format!("{label} must be a string"))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn fields_of(errors: &[FieldError]) -> Vec<&str> {
        errors.iter().map(|e| e.field.as_str()).collect()
    }

    #[test]
    fn contact_is_trimmed_and_lowercased() {
        let out = validate(
            ResourceKind::Contact,
            &json!({ "name": "  Ann  ", "email": " ANN@X.COM ", "message": " hi ", "extra": 1 }),
        )
        .unwrap();
        assert_eq!(out.get("name"), Some(&json!("Ann")));
        assert_eq!(out.get("email"), Some(&json!("ann@x.com")));
        assert_eq!(out.get("message"), Some(&json!("hi")));
        assert!(!out.contains_key("extra"));
    }

    #[test]
    fn contact_errors_are_reported_in_rule_order() {
        let errors = validate(
            ResourceKind::Contact,
            &json!({ "name": "   ", "email": "not-an-email", "message": "" }),
        )
        .unwrap_err();
        assert_eq!(fields_of(&errors), vec!["name", "email", "message"]);
        assert_eq!(errors[1].message, "Please provide a valid email address");
    }

    #[test]
    fn contact_rejects_wrong_types_and_long_names() {
        let errors = validate(
            ResourceKind::Contact,
            &json!({ "name": "x".repeat(101), "email": 7, "message": "ok" }),
        )
        .unwrap_err();
        assert_eq!(errors[0].message, "Name must be at most 100 characters");
        assert_eq!(errors[1].message, "Email must be a string");
    }

    #[test]
    fn non_object_body_is_rejected() {
        let errors = validate(ResourceKind::Project, &json!([1, 2])).unwrap_err();
        assert_eq!(fields_of(&errors), vec!["body"]);
    }

    #[test]
    fn project_create_requires_declared_fields() {
        let errors = validate(ResourceKind::Project, &json!({ "title": "Site" })).unwrap_err();
        assert_eq!(fields_of(&errors), vec!["description", "techStack"]);
    }

    #[test]
    fn project_keeps_unknown_fields() {
        let out = validate(
            ResourceKind::Project,
            &json!({
                "title": " Foodshare ",
                "description": "Share food",
                "techStack": ["React", " Firebase "],
                "githubUrl": "https://github.com/example/food-share",
                "demoUrl": "",
                "featured": true,
                "order": 3
            }),
        )
        .unwrap();
        assert_eq!(out.get("title"), Some(&json!("Foodshare")));
        assert_eq!(out.get("techStack"), Some(&json!(["React", "Firebase"])));
        assert_eq!(out.get("order"), Some(&json!(3)));
    }

    #[test]
    fn project_rejects_server_owned_keys_and_bad_urls() {
        let errors = validate(
            ResourceKind::ProjectPatch,
            &json!({ "createdAt": "2020-01-01", "githubUrl": "ftp://example.com" }),
        )
        .unwrap_err();
        assert_eq!(fields_of(&errors), vec!["createdAt", "githubUrl"]);
    }

    #[test]
    fn project_patch_checks_only_present_fields() {
        let out = validate(ResourceKind::ProjectPatch, &json!({ "description": "new" })).unwrap();
        assert_eq!(out.len(), 1);

        let errors = validate(ResourceKind::ProjectPatch, &json!({ "title": "" })).unwrap_err();
        assert_eq!(errors[0].message, "Title is required");

        let errors = validate(ResourceKind::ProjectPatch, &json!({})).unwrap_err();
        assert_eq!(fields_of(&errors), vec!["body"]);
    }

    #[test]
    fn validate_into_produces_typed_form() {
        let form: crate::models::ContactForm = validate_into(
            ResourceKind::Contact,
            &json!({ "name": "Ann", "email": "a@b.co", "message": "hello" }),
        )
        .unwrap();
        assert_eq!(form.email, "a@b.co");
    }
}
