use serde::{Deserialize, Serialize};
use super::de;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentRole {
    Admin,
    #[serde(other)]
    Agent,
}

impl Default for AgentRole {
    fn default() -> Self {
        AgentRole::Agent
    }
}

impl AgentRole {
    pub fn label(&self) -> &'static str {
        match self {
            AgentRole::Admin => "Admin",
            AgentRole::Agent => "Agent",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    #[serde(deserialize_with = "de::string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: AgentRole,
    #[serde(default = "default_available")]
    pub is_available: bool,
}

fn default_available() -> bool {
    true
}

/// Sesión autenticada del agente. Se crea en login y se invalida en
/// logout o ante un 401 del backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub agent: Agent,
}

impl Session {
    pub fn new(token: impl Into<String>, agent: Agent) -> Self {
        Self {
            token: token.into(),
            agent,
        }
    }
}

#[derive(Clone, PartialEq, Serialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, PartialEq, Deserialize, Debug)]
pub struct LoginResponse {
    pub token: String,
    pub agent: Agent,
}

impl From<LoginResponse> for Session {
    fn from(response: LoginResponse) -> Self {
        Session::new(response.token, response.agent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_response_becomes_session() {
        let raw = r#"{
            "token": "abc123",
            "agent": {"id": 4, "name": "Dana", "email": "dana@pioneerfeeders.com", "role": "admin", "isAvailable": false}
        }"#;
        let response: LoginResponse = serde_json::from_str(raw).unwrap();
        let session = Session::from(response);
        assert_eq!(session.token, "abc123");
        assert_eq!(session.agent.id, "4");
        assert_eq!(session.agent.role, AgentRole::Admin);
        assert!(!session.agent.is_available);
    }

    #[test]
    fn unknown_role_falls_back_to_agent() {
        let agent: Agent = serde_json::from_str(r#"{"id": "a1", "role": "supervisor"}"#).unwrap();
        assert_eq!(agent.role, AgentRole::Agent);
        assert!(agent.is_available);
        assert_eq!(agent.role.label(), "Agent");
    }
}
