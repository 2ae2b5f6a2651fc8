use sqlx::PgPool;

use super::repo_types::Country;

const COLUMNS: &str = "a2code, common_name, official_name, capital, population, un_member";

pub async fn list_all(db: &PgPool) -> anyhow::Result<Vec<Country>> {
    let rows = sqlx::query_as::<_, Country>(&format!(
        "SELECT {COLUMNS} FROM countries ORDER BY common_name"
    ))
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn find_by_code(db: &PgPool, a2code: &str) -> anyhow::Result<Option<Country>> {
    let row = sqlx::query_as::<_, Country>(&format!(
        "SELECT {COLUMNS} FROM countries WHERE a2code = $1"
    ))
    .bind(a2code)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

pub async fn insert(db: &PgPool, country: &Country) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO countries (a2code, common_name, official_name, capital, population, un_member)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(&country.a2code)
    .bind(&country.common_name)
    .bind(&country.official_name)
    .bind(&country.capital)
    .bind(country.population)
    .bind(country.un_member)
    .execute(db)
    .await?;
    Ok(())
}

pub async fn update(db: &PgPool, country: &Country) -> anyhow::Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE countries
        SET common_name = $2, official_name = $3, capital = $4, population = $5, un_member = $6
        WHERE a2code = $1
        "#,
    )
    .bind(&country.a2code)
    .bind(&country.common_name)
    .bind(&country.official_name)
    .bind(&country.capital)
    .bind(country.population)
    .bind(country.un_member)
    .execute(db)
    .await?;
    if result.rows_affected() == 0 {
        anyhow::bail!("no country with code {}", country.a2code);
    }
    Ok(())
}

pub async fn delete(db: &PgPool, a2code: &str) -> anyhow::Result<()> {
    let result = sqlx::query("DELETE FROM countries WHERE a2code = $1")
        .bind(a2code)
        .execute(db)
        .await?;
    if result.rows_affected() == 0 {
        anyhow::bail!("no country with code {a2code}");
    }
    Ok(())
}
