use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Volunteer {
    pub id: i64,
    pub name: Option<String>,
    pub message: Option<String>,
    pub birth_date: Option<String>,
    pub tax_id: Option<String>,
}

impl Volunteer {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().filter(|n| !n.is_empty()).unwrap_or("Sem nome")
    }

    /// First letter of the name, used for avatars.
    pub fn initial(&self) -> char {
        self.name.as_deref().and_then(|n| n.chars().next()).unwrap_or('?')
    }
}
