use crate::domain::{Role, Session};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct Signup {
    pub nome: String,
    pub email: String,
    pub senha: String,
    pub role: Role,
    /// Always serialized; `null` for volunteers.
    pub cnpj: Option<String>,
}

impl Signup {
    /// Builds the payload, dropping the tax id unless the account is an NGO.
    pub fn new(name: String, email: String, password: String, role: Role, tax_id: Option<String>) -> Self {
        let cnpj = if role == Role::Ngo { tax_id } else { None };
        Self { nome: name, email, senha: password, role, cnpj }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Login {
    pub email: String,
    pub senha: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthUser {
    pub id: Option<i64>,
    pub nome: String,
    pub email: Option<String>,
    pub role: Role,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: Option<String>,
    pub user: AuthUser,
}

impl From<AuthResponse> for Session {
    fn from(resp: AuthResponse) -> Self {
        Self { token: resp.access_token, role: resp.user.role, display_name: resp.user.nome }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_signup_volunteer_drops_tax_id() {
        let payload = Signup::new(
            "Ana".into(),
            "ana@example.org".into(),
            "segredo".into(),
            Role::Volunteer,
            Some("12.345.678/0001-90".into()),
        );
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            json!({ "nome": "Ana", "email": "ana@example.org", "senha": "segredo", "role": "volunteer", "cnpj": null })
        );
    }

    #[test]
    fn test_signup_ngo_keeps_tax_id() {
        let payload = Signup::new(
            "GreenLeaf".into(),
            "contato@greenleaf.org".into(),
            "segredo".into(),
            Role::Ngo,
            Some("12.345.678/0001-90".into()),
        );
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["role"], "ngo");
        assert_eq!(value["cnpj"], "12.345.678/0001-90");
    }

    #[test]
    fn test_auth_response_into_session() {
        let resp: AuthResponse = serde_json::from_value(json!({
            "access_token": "jwt-abc",
            "token_type": "bearer",
            "user": { "id": 7, "nome": "Ana", "email": "ana@example.org", "role": "volunteer" }
        }))
        .unwrap();

        let session = Session::from(resp);
        assert_eq!(session.token, "jwt-abc");
        assert_eq!(session.role, Role::Volunteer);
        assert_eq!(session.display_name, "Ana");
    }
}
