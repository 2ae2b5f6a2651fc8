use serde::Deserialize;

use super::repo_types::Country;

/// Add/edit form body. Field names match the HTML form inputs; population
/// arrives as free text and checkbox absence means false.
#[derive(Debug, Deserialize)]
pub struct CountryForm {
    pub a2code: String,
    #[serde(rename = "commonName")]
    pub common_name: String,
    #[serde(rename = "officialName")]
    pub official_name: String,
    #[serde(default)]
    pub capital: String,
    #[serde(default)]
    pub population: String,
    #[serde(rename = "unMember", default)]
    pub un_member: Option<String>,
}

impl CountryForm {
    pub fn into_country(self) -> Country {
        let capital = {
            let trimmed = self.capital.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        };
        Country {
            a2code: self.a2code.trim().to_uppercase(),
            common_name: self.common_name,
            official_name: self.official_name,
            capital,
            population: self.population.trim().parse::<i64>().ok(),
            un_member: self.un_member.is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> CountryForm {
        CountryForm {
            a2code: " ca ".into(),
            common_name: "Canada".into(),
            official_name: "Canada".into(),
            capital: " Ottawa ".into(),
            population: "38000000".into(),
            un_member: Some("true".into()),
        }
    }

    #[test]
    fn form_normalizes_code_and_fields() {
        let country = form().into_country();
        assert_eq!(country.a2code, "CA");
        assert_eq!(country.capital.as_deref(), Some("Ottawa"));
        assert_eq!(country.population, Some(38_000_000));
        assert!(country.un_member);
    }

    #[test]
    fn blank_optionals_become_none_and_false() {
        let mut f = form();
        f.capital = "  ".into();
        f.population = "not a number".into();
        f.un_member = None;
        let country = f.into_country();
        assert_eq!(country.capital, None);
        assert_eq!(country.population, None);
        assert!(!country.un_member);
    }
}
