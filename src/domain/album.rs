use serde::Serialize;

/// Represent an album together with its release year
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Album {
    pub name: String,
    pub year: i32,
}

impl Album {
    pub fn new(name: impl Into<String>, year: i32) -> Self {
        Self {
            name: name.into(),
            year,
        }
    }
}
