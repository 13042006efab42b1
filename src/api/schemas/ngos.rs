use crate::domain::Ngo;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct NgoRecord {
    pub id: i64,
    pub nome: Option<String>,
    pub endereco: Option<String>,
}

impl From<NgoRecord> for Ngo {
    fn from(record: NgoRecord) -> Self {
        Self { id: record.id, name: record.nome, address: record.endereco }
    }
}
