use sqlx::FromRow;

use super::dto::{CompanyType, EmploymentType, Profile};

#[derive(Debug, FromRow)]
pub struct ProfileRow {
    pub employment_type: Option<String>,
    pub yearly_income: Option<i64>,
    pub has_partner: bool,
    pub has_mortgage: bool,
    pub has_company: bool,
    pub company_type: Option<String>,
}

impl From<ProfileRow> for Profile {
    fn from(r: ProfileRow) -> Self {
        Self {
            employment_type: r.employment_type.as_deref().and_then(EmploymentType::parse),
            yearly_income: r.yearly_income,
            has_partner: r.has_partner,
            has_mortgage: r.has_mortgage,
            has_company: r.has_company,
            company_type: r.company_type.as_deref().and_then(CompanyType::parse),
        }
    }
}
