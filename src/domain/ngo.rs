use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ngo {
    pub id: i64,
    pub name: Option<String>,
    pub address: Option<String>,
}
