use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomField {
    pub value: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl CustomField {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            updated_at: Utc::now(),
        }
    }

    pub fn has_value(&self) -> bool {
        self.value.as_deref().is_some_and(|v| !v.is_empty())
    }
}

pub type CustomFields = HashMap<String, CustomField>;

/// Either lookup may be left unimplemented.
pub trait CustomFieldSource: Send + Sync {
    fn contact_fields(&self, _thread_id: Uuid) -> anyhow::Result<CustomFields> {
        Ok(CustomFields::new())
    }

    fn customer_fields(&self) -> anyhow::Result<CustomFields> {
        Ok(CustomFields::new())
    }
}

#[derive(Debug, Clone, Default)]
pub struct StaticFieldSource {
    pub customer: CustomFields,
    pub contact: HashMap<Uuid, CustomFields>,
}

impl StaticFieldSource {
    pub fn with_customer_field(mut self, ident: &str, value: impl Into<String>) -> Self {
        self.customer
            .insert(ident.to_string(), CustomField::new(value));
        self
    }

    pub fn with_contact_field(
        mut self,
        thread_id: Uuid,
        ident: &str,
        value: impl Into<String>,
    ) -> Self {
        self.contact
            .entry(thread_id)
            .or_default()
            .insert(ident.to_string(), CustomField::new(value));
        self
    }
}

impl CustomFieldSource for StaticFieldSource {
    fn contact_fields(&self, thread_id: Uuid) -> anyhow::Result<CustomFields> {
        Ok(self.contact.get(&thread_id).cloned().unwrap_or_default())
    }

    fn customer_fields(&self) -> anyhow::Result<CustomFields> {
        Ok(self.customer.clone())
    }
}
