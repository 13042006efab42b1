use serde::Serialize;

/// A volunteering position posted by an NGO.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Opportunity {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub ngo_name: String,
    pub ngo_id: Option<i64>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NewOpportunity {
    pub ngo_name: String,
    pub address: String,
    pub title: String,
    pub description: String,
}

impl NewOpportunity {
    pub fn is_empty(&self) -> bool {
        self.ngo_name.is_empty() && self.address.is_empty() && self.title.is_empty() && self.description.is_empty()
    }
}
