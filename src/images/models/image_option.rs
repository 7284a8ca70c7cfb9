use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageOption {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

impl ImageOption {
    pub const fn new(id: &'static str, name: &'static str, description: &'static str) -> Self {
        Self {
            id,
            name,
            description,
        }
    }
}
