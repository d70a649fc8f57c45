//! Static field contracts for each resource.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Trimmed string with a character limit.
    Text { max_chars: usize },
    /// Trimmed, lower-cased email address.
    Email,
    /// Absolute http(s) URL. An empty string means "no link".
    Url,
    /// Non-empty list of non-empty strings.
    StringList,
    Boolean,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

const fn rule(name: &'static str, label: &'static str, kind: FieldKind, required: bool) -> FieldRule {
    FieldRule {
        name,
        label,
        kind,
        required,
    }
}

pub const EMAIL_MAX_CHARS: usize = 254;

pub const CONTACT_RULES: &[FieldRule] = &[
    rule("name", "Name", FieldKind::Text { max_chars: 100 }, true),
    rule("email", "Email", FieldKind::Email, true),
    rule("message", "Message", FieldKind::Text { max_chars: 5000 }, true),
];

pub const PROJECT_RULES: &[FieldRule] = &[
    rule("title", "Title", FieldKind::Text { max_chars: 200 }, true),
    rule("description", "Description", FieldKind::Text { max_chars: 5000 }, true),
    rule("techStack", "Tech stack", FieldKind::StringList, true),
    rule("githubUrl", "GitHub URL", FieldKind::Url, false),
    rule("demoUrl", "Demo URL", FieldKind::Url, false),
    rule("image", "Image", FieldKind::Text { max_chars: 2048 }, false),
    rule("featured", "Featured", FieldKind::Boolean, false),
];

/// Keys the server owns on every project document.
pub const PROJECT_RESERVED: &[&str] = &["id", "createdAt", "updatedAt"];
