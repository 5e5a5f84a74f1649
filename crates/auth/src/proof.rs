use vox_core::Error;

/// Kind of document offered as proof of identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    Passport,
    NationalId,
    DrivingLicense,
    VoterId,
}

impl DocumentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Passport => "passport",
            Self::NationalId => "national_id",
            Self::DrivingLicense => "driving_license",
            Self::VoterId => "voter_id",
        }
    }
}

impl TryFrom<&str> for DocumentType {
    type Error = Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "passport" => Ok(Self::Passport),
            "national_id" => Ok(Self::NationalId),
            "driving_license" => Ok(Self::DrivingLicense),
            "voter_id" => Ok(Self::VoterId),
            _ => Err(Error::validation(format!("unknown document type: {}", s))),
        }
    }
}

/// Identity proof. The file itself lives in an external object store;
/// only its URL is kept here.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Proof {
    #[serde(alias = "type")]
    pub document_type: DocumentType,
    #[serde(alias = "file")]
    pub document_file: String,
}

impl Proof {
    pub fn new(document_type: DocumentType, document_file: String) -> Self {
        Self {
            document_type,
            document_file,
        }
    }
    pub fn validate(self) -> Result<Self, Error> {
        let url = self.document_file.trim();
        let scheme = url.starts_with("https://") || url.starts_with("http://");
        if !scheme || url.len() <= "https://".len() || url.contains(char::is_whitespace) {
            return Err(Error::validation("id_proof.document_file must be an http(s) url"));
        }
        Ok(Self::new(self.document_type, url.to_string()))
    }
}
