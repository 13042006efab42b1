use crate::domain::{Application, ApplicationStatus, NewApplication};
use serde::{Deserialize, Serialize};

/// Listing row. The backend names the primary key `inscricao_id` in joins.
#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationRecord {
    #[serde(rename = "inscricao_id", alias = "id")]
    pub id: i64,
    pub status: ApplicationStatus,
    pub voluntario_id: Option<i64>,
    pub voluntario_nome: Option<String>,
    pub oportunidade_id: Option<i64>,
    pub oportunidade_titulo: Option<String>,
    pub data_inscricao: Option<String>,
}

impl From<ApplicationRecord> for Application {
    fn from(record: ApplicationRecord) -> Self {
        Self {
            id: record.id,
            status: record.status,
            volunteer_id: record.voluntario_id,
            volunteer_name: record.voluntario_nome,
            opportunity_id: record.oportunidade_id,
            opportunity_title: record.oportunidade_titulo,
            applied_at: record.data_inscricao,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmitApplication {
    pub nome: String,
    pub nascimento: String,
    pub cpf: String,
    pub mensagem: String,
    pub oportunidade_id: i64,
}

impl From<NewApplication> for SubmitApplication {
    fn from(new: NewApplication) -> Self {
        Self {
            nome: new.name,
            nascimento: new.birth_date,
            cpf: new.tax_id,
            mensagem: new.message,
            oportunidade_id: new.opportunity_id,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusUpdate {
    pub status: ApplicationStatus,
}
