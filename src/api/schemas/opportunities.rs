use crate::domain::{NewOpportunity, Opportunity};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct OpportunityRecord {
    pub id: i64,
    #[serde(default)]
    pub titulo: Option<String>,
    #[serde(default)]
    pub descricao: Option<String>,
    #[serde(default)]
    pub ong_nome: Option<String>,
    pub ong_id: Option<i64>,
    pub endereco: Option<String>,
}

impl From<OpportunityRecord> for Opportunity {
    fn from(record: OpportunityRecord) -> Self {
        Self {
            id: record.id,
            title: record.titulo.unwrap_or_default(),
            description: record.descricao.unwrap_or_default(),
            ngo_name: record.ong_nome.unwrap_or_default(),
            ngo_id: record.ong_id,
            address: record.endereco,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateOpportunity {
    pub ong_nome: String,
    pub endereco: String,
    pub titulo: String,
    pub descricao: String,
}

impl From<NewOpportunity> for CreateOpportunity {
    fn from(new: NewOpportunity) -> Self {
        Self { ong_nome: new.ngo_name, endereco: new.address, titulo: new.title, descricao: new.description }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_without_address() {
        let record: OpportunityRecord = serde_json::from_value(json!({
            "id": 3,
            "titulo": "Horta comunitária",
            "descricao": "Plantio aos sábados",
            "ong_id": 2,
            "ong_nome": "GreenLeaf"
        }))
        .unwrap();

        let opportunity = Opportunity::from(record);
        assert_eq!(opportunity.title, "Horta comunitária");
        assert_eq!(opportunity.ngo_name, "GreenLeaf");
        assert_eq!(opportunity.ngo_id, Some(2));
        assert_eq!(opportunity.address, None);
    }

    #[test]
    fn test_create_payload_field_names() {
        let payload = CreateOpportunity::from(NewOpportunity {
            ngo_name: "GreenLeaf".into(),
            address: "Avenida Paulista 1000, SP".into(),
            title: "Mutirão".into(),
            description: "Limpeza do parque".into(),
        });
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "ong_nome": "GreenLeaf",
                "endereco": "Avenida Paulista 1000, SP",
                "titulo": "Mutirão",
                "descricao": "Limpeza do parque"
            })
        );
    }
}
