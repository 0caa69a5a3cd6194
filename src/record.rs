use crate::error::{GenerateError, Result};

/// Upper bound on records in one generated script.
pub const MAX_RECORDS: usize = 20;

const MAX_DOMAIN_LEN: usize = 255;

/// Credentials and zone a script is generated for.
///
/// Built once per successful validation and passed by reference into
/// generation; nothing here is shared or mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptContext {
    pub api_token: String,
    pub domain: String,
    pub zone_id: String,
}

impl ScriptContext {
    pub fn new(
        api_token: impl Into<String>,
        domain: &str,
        zone_id: impl Into<String>,
    ) -> Result<Self> {
        let domain = domain.trim().to_lowercase();
        let api_token = api_token.into();
        let zone_id = zone_id.into();
        reject_control_chars("Domain", &domain)?;
        reject_control_chars("API token", &api_token)?;
        reject_control_chars("Zone id", &zone_id)?;
        if domain.is_empty() {
            return Err(GenerateError::validation("Domain is required"));
        }
        if domain.len() > MAX_DOMAIN_LEN {
            return Err(GenerateError::validation(format!(
                "Domain must be at most {} characters",
                MAX_DOMAIN_LEN
            )));
        }

        Ok(Self {
            api_token,
            domain,
            zone_id,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Fully-qualified name to update.
    pub name: String,
    pub record_type: String,
    pub proxied: bool,
}

/// Builds a record from a subdomain label; `@` or an empty label is the apex.
pub fn derive_record(label: &str, domain: &str, record_type: &str, proxied: bool) -> Result<Record> {
    let domain = domain.trim();
    if domain.is_empty() {
        return Err(GenerateError::validation("Domain is required"));
    }

    let label = label.trim();
    let record_type = record_type.trim();
    reject_control_chars("Domain", domain)?;
    reject_control_chars("Record name", label)?;
    reject_control_chars("Record type", record_type)?;

    let name = match label {
        "" | "@" => domain.to_string(),
        _ => format!("{}.{}", label, domain),
    };

    Ok(Record {
        name,
        record_type: record_type.to_string(),
        proxied,
    })
}

/// Line breaks and other control characters would split the generated
/// script's lines, so they never reach the emitters.
fn reject_control_chars(field: &str, value: &str) -> Result<()> {
    if value.chars().any(char::is_control) {
        return Err(GenerateError::validation(format!(
            "{} must not contain control characters",
            field
        )));
    }
    Ok(())
}

pub fn check_record_count(records: &[Record]) -> Result<()> {
    if records.len() > MAX_RECORDS {
        return Err(GenerateError::validation(format!(
            "Maximum of {} DNS records allowed",
            MAX_RECORDS
        )));
    }
    Ok(())
}
