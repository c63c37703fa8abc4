use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EmploymentType {
    Employed,
    Zzp,
    Both,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CompanyType {
    Eenmanszaak,
    Vof,
    Bv,
}

impl EmploymentType {
    pub fn as_str(self) -> &'static str {
        match self {
            EmploymentType::Employed => "employed",
            EmploymentType::Zzp => "zzp",
            EmploymentType::Both => "both",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "employed" => Some(EmploymentType::Employed),
            "zzp" => Some(EmploymentType::Zzp),
            "both" => Some(EmploymentType::Both),
            _ => None,
        }
    }
}

impl CompanyType {
    pub fn as_str(self) -> &'static str {
        match self {
            CompanyType::Eenmanszaak => "eenmanszaak",
            CompanyType::Vof => "vof",
            CompanyType::Bv => "bv",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "eenmanszaak" => Some(CompanyType::Eenmanszaak),
            "vof" => Some(CompanyType::Vof),
            "bv" => Some(CompanyType::Bv),
            _ => None,
        }
    }
}

/// Self-reported tax facts of one user. Missing fields read as null/false,
/// so every save is a full replacement.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    pub employment_type: Option<EmploymentType>,
    pub yearly_income: Option<i64>,
    pub has_partner: bool,
    pub has_mortgage: bool,
    pub has_company: bool,
    pub company_type: Option<CompanyType>,
}

#[derive(Debug, Serialize)]
pub struct SaveProfileResponse {
    pub success: bool,
}
