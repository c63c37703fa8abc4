use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::dto::Profile;
use super::repo_types::ProfileRow;

#[async_trait]
pub trait ProfileRepo: Send + Sync {
    async fn find(&self, user_id: Uuid) -> anyhow::Result<Option<Profile>>;

    /// Insert or fully replace the profile of `user_id`.
    async fn upsert(&self, user_id: Uuid, profile: &Profile) -> anyhow::Result<()>;
}

#[derive(Clone)]
pub struct PgProfileRepo {
    db: PgPool,
}

impl PgProfileRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProfileRepo for PgProfileRepo {
    async fn find(&self, user_id: Uuid) -> anyhow::Result<Option<Profile>> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT employment_type, yearly_income, has_partner, has_mortgage,
                   has_company, company_type
              FROM profiles
             WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await
        .context("find profile")?;
        Ok(row.map(Profile::from))
    }

    async fn upsert(&self, user_id: Uuid, profile: &Profile) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO profiles (user_id, employment_type, yearly_income, has_partner,
                                  has_mortgage, has_company, company_type)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (user_id) DO UPDATE
               SET employment_type = EXCLUDED.employment_type,
                   yearly_income   = EXCLUDED.yearly_income,
                   has_partner     = EXCLUDED.has_partner,
                   has_mortgage    = EXCLUDED.has_mortgage,
                   has_company     = EXCLUDED.has_company,
                   company_type    = EXCLUDED.company_type,
                   updated_at      = now()
            "#,
        )
        .bind(user_id)
        .bind(profile.employment_type.map(|e| e.as_str()))
        .bind(profile.yearly_income)
        .bind(profile.has_partner)
        .bind(profile.has_mortgage)
        .bind(profile.has_company)
        .bind(profile.company_type.map(|c| c.as_str()))
        .execute(&self.db)
        .await
        .context("upsert profile")?;
        Ok(())
    }
}
