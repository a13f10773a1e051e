//! Schema validation as a pure function over plain data: no HTTP types,
//! no executable schema objects. Handlers run this before touching the
//! store, so a rejected payload never causes a partial write.

use serde::Serialize;
use serde_json::Value;

pub struct Schema {
    pub fields: &'static [Field],
}

pub struct Field {
    pub name: &'static str,
    pub required: bool,
    pub kind: Kind,
}

pub enum Kind {
    Text {
        min_len: usize,
        max_len: Option<usize>,
        /// Restrict to word characters: `[A-Za-z0-9_]`.
        word_chars: bool,
    },
    Int,
}

#[derive(Debug, Clone, Serialize)]
pub struct Violation {
    pub field: &'static str,
    pub rule: &'static str,
}

pub const SIGNUP: Schema = Schema {
    fields: &[
        Field {
            name: "username",
            required: true,
            kind: Kind::Text { min_len: 4, max_len: Some(255), word_chars: true },
        },
        Field {
            name: "password",
            required: true,
            kind: Kind::Text { min_len: 6, max_len: None, word_chars: false },
        },
    ],
};

pub const CREATE_ACTIVITY: Schema = Schema {
    fields: &[Field {
        name: "name",
        required: true,
        kind: Kind::Text { min_len: 1, max_len: None, word_chars: false },
    }],
};

pub const CREATE_LOG: Schema = Schema {
    fields: &[
        Field {
            name: "summary",
            required: false,
            kind: Kind::Text { min_len: 0, max_len: None, word_chars: false },
        },
        Field { name: "date", required: true, kind: Kind::Int },
        Field { name: "duration", required: true, kind: Kind::Int },
    ],
};

pub fn validate(schema: &Schema, payload: &Value) -> Vec<Violation> {
    let mut violations = Vec::new();

    for field in schema.fields {
        let value = payload.get(field.name);

        let Some(value) = value.filter(|v| !v.is_null()) else {
            if field.required {
                violations.push(Violation { field: field.name, rule: "required" });
            }
            continue;
        };

        match &field.kind {
            Kind::Text { min_len, max_len, word_chars } => {
                let Some(text) = value.as_str() else {
                    violations.push(Violation { field: field.name, rule: "type" });
                    continue;
                };
                if text.chars().count() < *min_len {
                    violations.push(Violation { field: field.name, rule: "min_length" });
                }
                if let Some(max) = max_len {
                    if text.chars().count() > *max {
                        violations.push(Violation { field: field.name, rule: "max_length" });
                    }
                }
                if *word_chars
                    && !text.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
                {
                    violations.push(Violation { field: field.name, rule: "pattern" });
                }
            }
            Kind::Int => {
                if value.as_i64().is_none() {
                    violations.push(Violation { field: field.name, rule: "type" });
                }
            }
        }
    }

    violations
}
