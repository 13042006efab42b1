use crate::domain::Volunteer;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct VolunteerRecord {
    pub id: i64,
    pub nome: Option<String>,
    pub mensagem: Option<String>,
    pub nascimento: Option<String>,
    pub cpf: Option<String>,
}

impl From<VolunteerRecord> for Volunteer {
    fn from(record: VolunteerRecord) -> Self {
        Self {
            id: record.id,
            name: record.nome,
            message: record.mensagem,
            birth_date: record.nascimento,
            tax_id: record.cpf,
        }
    }
}
