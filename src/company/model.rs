use serde::Serialize;
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;

/// Full company record as persisted. Carries secret material, so it never
/// leaves the service; handlers respond with [`CompanyProfile`] instead.
#[derive(Clone)]
pub struct CompanyAccount {
    pub id: Uuid,
    pub company_name: String,
    pub owner_name: String,
    pub roll_no: String,
    pub owner_email: String,
    pub access_code_hash: String,
    pub client_id: Uuid,
    pub client_secret_hash: Vec<u8>,
    pub refresh_token: Option<String>,
}

impl CompanyAccount {
    /// Secret-stripped view of the account.
    #[must_use]
    pub fn profile(&self) -> CompanyProfile {
        CompanyProfile {
            id: self.id,
            company_name: self.company_name.clone(),
            owner_name: self.owner_name.clone(),
            roll_no: self.roll_no.clone(),
            owner_email: self.owner_email.clone(),
            client_id: self.client_id,
        }
    }
}

impl fmt::Debug for CompanyAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompanyAccount")
            .field("id", &self.id)
            .field("company_name", &self.company_name)
            .field("owner_name", &self.owner_name)
            .field("roll_no", &self.roll_no)
            .field("owner_email", &self.owner_email)
            .field("access_code_hash", &"***")
            .field("client_id", &self.client_id)
            .field("client_secret_hash", &"***")
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Account ready to be inserted. The access code is already a bcrypt hash and
/// the client secret is already digested.
#[derive(Clone)]
pub struct NewCompany {
    pub id: Uuid,
    pub company_name: String,
    pub owner_name: String,
    pub roll_no: String,
    pub owner_email: String,
    pub access_code_hash: String,
    pub client_id: Uuid,
    pub client_secret_hash: Vec<u8>,
}

impl NewCompany {
    pub(crate) fn into_account(self) -> CompanyAccount {
        CompanyAccount {
            id: self.id,
            company_name: self.company_name,
            owner_name: self.owner_name,
            roll_no: self.roll_no,
            owner_email: self.owner_email,
            access_code_hash: self.access_code_hash,
            client_id: self.client_id,
            client_secret_hash: self.client_secret_hash,
            refresh_token: None,
        }
    }
}

/// Public company profile returned by `/current-user` and attached to
/// authenticated requests.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfile {
    pub id: Uuid,
    pub company_name: String,
    pub owner_name: String,
    pub roll_no: String,
    pub owner_email: String,
    #[serde(rename = "clientID")]
    pub client_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> CompanyAccount {
        NewCompany {
            id: Uuid::now_v7(),
            company_name: "Acme".to_string(),
            owner_name: "Jo".to_string(),
            roll_no: "R1".to_string(),
            owner_email: "jo@acme.com".to_string(),
            access_code_hash: "$2b$10$hash".to_string(),
            client_id: Uuid::new_v4(),
            client_secret_hash: vec![1, 2, 3],
        }
        .into_account()
    }

    #[test]
    fn new_company_starts_without_refresh_token() {
        assert!(account().refresh_token.is_none());
    }

    #[test]
    fn profile_omits_secret_material() -> anyhow::Result<()> {
        let mut account = account();
        account.refresh_token = Some("refresh".to_string());
        let json = serde_json::to_value(account.profile())?;
        let object = json.as_object().cloned().unwrap_or_default();

        assert_eq!(object.len(), 6);
        assert_eq!(object.get("companyName"), Some(&"Acme".into()));
        assert_eq!(
            object.get("clientID"),
            Some(&account.client_id.to_string().into())
        );
        assert!(!object.contains_key("accessCodeHash"));
        assert!(!object.contains_key("refreshToken"));
        Ok(())
    }

    #[test]
    fn debug_redacts_secrets() {
        let mut account = account();
        account.refresh_token = Some("refresh-token-value".to_string());
        let debug = format!("{account:?}");
        assert!(!debug.contains("$2b$10$hash"));
        assert!(!debug.contains("refresh-token-value"));
        assert!(debug.contains("jo@acme.com"));
    }
}
