use super::*;
use vox_core::Error;
use vox_core::MAX_FAMILY_MEMBERS;

/// Role-specific profile captured at step 2.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(untagged)]
pub enum Profile {
    Civilian {
        occupation: String,
        family_members: u32,
    },
    Authority {
        #[serde(rename = "authority_position")]
        position: String,
        government_id: String,
        #[serde(rename = "department_name")]
        department: String,
        work_location: String,
    },
}

#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct CivilianForm {
    id_proof: Proof,
    occupation: String,
    family_members: u32,
}

#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct AuthorityForm {
    id_proof: Proof,
    #[serde(alias = "position")]
    authority_position: String,
    government_id: String,
    #[serde(alias = "department")]
    department_name: String,
    work_location: String,
}

impl Profile {
    pub fn role(&self) -> Role {
        match self {
            Self::Civilian { .. } => Role::Civilian,
            Self::Authority { .. } => Role::Authority,
        }
    }
    /// Civilian step-2 schema.
    pub fn civilian(body: serde_json::Value) -> Result<(Self, Proof), Error> {
        let form = serde_json::from_value::<CivilianForm>(body)
            .map_err(|e| Error::validation(format!("invalid civilian profile: {}", e)))?;
        if form.family_members > MAX_FAMILY_MEMBERS {
            return Err(Error::validation(format!(
                "family_members must be at most {}",
                MAX_FAMILY_MEMBERS
            )));
        }
        let profile = Self::Civilian {
            occupation: required("occupation", form.occupation)?,
            family_members: form.family_members,
        };
        Ok((profile, form.id_proof.validate()?))
    }
    /// Authority step-2 schema.
    pub fn authority(body: serde_json::Value) -> Result<(Self, Proof), Error> {
        let form = serde_json::from_value::<AuthorityForm>(body)
            .map_err(|e| Error::validation(format!("invalid authority profile: {}", e)))?;
        let profile = Self::Authority {
            position: required("authority_position", form.authority_position)?,
            government_id: required("government_id", form.government_id)?,
            department: required("department_name", form.department_name)?,
            work_location: required("work_location", form.work_location)?,
        };
        Ok((profile, form.id_proof.validate()?))
    }
}

/// Trims a field and rejects it if nothing (or too much) is left.
pub(crate) fn required(name: &str, value: String) -> Result<String, Error> {
    let value = value.trim();
    if value.is_empty() {
        return Err(Error::validation(format!("{} is required", name)));
    }
    if value.chars().count() > vox_core::MAX_FIELD_LEN {
        return Err(Error::validation(format!("{} is too long", name)));
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn proof() -> serde_json::Value {
        json!({ "document_type": "passport", "document_file": "https://cdn.example.org/id.png" })
    }

    #[test]
    fn civilian_schema_parses_civilian_fields() {
        let body = json!({ "occupation": "engineer", "family_members": 2, "id_proof": proof() });
        let (profile, proof) = Role::Civilian.schema()(body).unwrap();
        assert_eq!(profile.role(), Role::Civilian);
        assert_eq!(proof.document_type, DocumentType::Passport);
    }
    #[test]
    fn authority_schema_accepts_short_names() {
        let body = json!({
            "position": "inspector",
            "government_id": "GOV-17",
            "department": "roads",
            "work_location": "north district",
            "id_proof": proof(),
        });
        let (profile, _) = Role::Authority.schema()(body).unwrap();
        assert_eq!(profile.role(), Role::Authority);
    }
    #[test]
    fn schemas_are_mutually_exclusive() {
        let civilian = json!({ "occupation": "engineer", "family_members": 2, "id_proof": proof() });
        let authority = json!({
            "authority_position": "inspector",
            "government_id": "GOV-17",
            "department_name": "roads",
            "work_location": "north district",
            "id_proof": proof(),
        });
        assert!(matches!(Role::Authority.schema()(civilian), Err(Error::Validation(_))));
        assert!(matches!(Role::Civilian.schema()(authority), Err(Error::Validation(_))));
    }
    #[test]
    fn proof_is_required() {
        let body = json!({ "occupation": "engineer", "family_members": 2 });
        assert!(matches!(Profile::civilian(body), Err(Error::Validation(_))));
    }
    #[test]
    fn blank_fields_are_rejected() {
        let body = json!({ "occupation": "   ", "family_members": 2, "id_proof": proof() });
        assert!(matches!(Profile::civilian(body), Err(Error::Validation(_))));
    }
    #[test]
    fn serializes_with_stored_field_names() {
        let profile = Profile::Authority {
            position: "inspector".into(),
            government_id: "GOV-17".into(),
            department: "roads".into(),
            work_location: "north".into(),
        };
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["authority_position"], "inspector");
        assert_eq!(json["department_name"], "roads");
    }
}
