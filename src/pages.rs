//! Minimal server-rendered pages. The original site used a template
//! engine; here each page is a small HTML string so the route handlers
//! stay the interesting part.

use crate::auth::history::LoginEntry;
use crate::countries::repo_types::Country;

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>{title} | UN Atlas</title></head>\n<body>\n<nav><a href=\"/un/countries\">Countries</a> | <a href=\"/userHistory\">Login History</a> | <a href=\"/logout\">Log Out</a></nav>\n{body}\n</body>\n</html>\n",
        title = escape(title),
    )
}

fn error_banner(error: Option<&str>) -> String {
    match error {
        Some(msg) => format!("<p class=\"error\">{}</p>", escape(msg)),
        None => String::new(),
    }
}

pub fn login(error: Option<&str>, user_name: &str) -> String {
    let body = format!(
        "<h1>Log In</h1>\n{banner}\n<form method=\"post\" action=\"/login\">\n<input name=\"userName\" placeholder=\"User Name\" value=\"{user_name}\">\n<input name=\"password\" type=\"password\" placeholder=\"Password\">\n<button type=\"submit\">Log In</button>\n</form>\n<p><a href=\"/register\">Need an account? Register</a></p>",
        banner = error_banner(error),
        user_name = escape(user_name),
    );
    layout("Log In", &body)
}

pub fn register(error: Option<&str>, success: Option<&str>, user_name: &str) -> String {
    let banner = match success {
        Some(msg) => format!("<p class=\"success\">{}</p>", escape(msg)),
        None => error_banner(error),
    };
    let body = format!(
        "<h1>Register</h1>\n{banner}\n<form method=\"post\" action=\"/register\">\n<input name=\"userName\" placeholder=\"User Name\" value=\"{user_name}\">\n<input name=\"email\" type=\"email\" placeholder=\"Email\">\n<input name=\"password\" type=\"password\" placeholder=\"Password\">\n<input name=\"password2\" type=\"password\" placeholder=\"Confirm Password\">\n<button type=\"submit\">Register</button>\n</form>\n<p><a href=\"/login\">Already registered? Log in</a></p>",
        user_name = escape(user_name),
    );
    layout("Register", &body)
}

pub fn user_history(user_name: &str, entries: &[LoginEntry]) -> String {
    let rows: String = entries
        .iter()
        .map(|e| {
            format!(
                "<tr><td>{}</td><td>{}</td></tr>\n",
                e.timestamp,
                escape(&e.user_agent)
            )
        })
        .collect();
    let body = format!(
        "<h1>Login History for {user_name}</h1>\n<table>\n<tr><th>Time</th><th>User Agent</th></tr>\n{rows}</table>",
        user_name = escape(user_name),
    );
    layout("Login History", &body)
}

pub fn countries(countries: &[Country]) -> String {
    let rows: String = countries
        .iter()
        .map(|c| {
            format!(
                "<tr><td><a href=\"/un/countries/{code}\">{code}</a></td><td>{name}</td><td>{capital}</td><td><a href=\"/un/editCountry/{code}\">edit</a> <a href=\"/un/deleteCountry/{code}\">delete</a></td></tr>\n",
                code = escape(&c.a2code),
                name = escape(&c.common_name),
                capital = escape(c.capital.as_deref().unwrap_or("-")),
            )
        })
        .collect();
    let body = format!(
        "<h1>UN Countries</h1>\n<p><a href=\"/un/addCountry\">Add a country</a></p>\n<table>\n<tr><th>Code</th><th>Name</th><th>Capital</th><th></th></tr>\n{rows}</table>",
    );
    layout("Countries", &body)
}

pub fn country_detail(country: &Country) -> String {
    let body = format!(
        "<h1>{name}</h1>\n<ul>\n<li>Code: {code}</li>\n<li>Official name: {official}</li>\n<li>Capital: {capital}</li>\n<li>Population: {population}</li>\n<li>UN member: {member}</li>\n</ul>",
        name = escape(&country.common_name),
        code = escape(&country.a2code),
        official = escape(&country.official_name),
        capital = escape(country.capital.as_deref().unwrap_or("-")),
        population = country
            .population
            .map(|p| p.to_string())
            .unwrap_or_else(|| "-".into()),
        member = if country.un_member { "yes" } else { "no" },
    );
    layout(&country.common_name, &body)
}

fn country_form(action: &str, country: Option<&Country>) -> String {
    let get = |f: fn(&Country) -> String| country.map(f).unwrap_or_default();
    format!(
        "<form method=\"post\" action=\"{action}\">\n<input name=\"a2code\" placeholder=\"A2 Code\" value=\"{code}\" {lock}>\n<input name=\"commonName\" placeholder=\"Common Name\" value=\"{name}\">\n<input name=\"officialName\" placeholder=\"Official Name\" value=\"{official}\">\n<input name=\"capital\" placeholder=\"Capital\" value=\"{capital}\">\n<input name=\"population\" placeholder=\"Population\" value=\"{population}\">\n<label><input name=\"unMember\" type=\"checkbox\" value=\"true\" {checked}> UN member</label>\n<button type=\"submit\">Save</button>\n</form>",
        code = escape(&get(|c| c.a2code.clone())),
        lock = if country.is_some() { "readonly" } else { "" },
        name = escape(&get(|c| c.common_name.clone())),
        official = escape(&get(|c| c.official_name.clone())),
        capital = escape(&get(|c| c.capital.clone().unwrap_or_default())),
        population = get(|c| c.population.map(|p| p.to_string()).unwrap_or_default()),
        checked = if country.map(|c| c.un_member).unwrap_or(false) {
            "checked"
        } else {
            ""
        },
    )
}

pub fn add_country() -> String {
    let body = format!("<h1>Add Country</h1>\n{}", country_form("/un/addCountry", None));
    layout("Add Country", &body)
}

pub fn edit_country(country: &Country) -> String {
    let body = format!(
        "<h1>Edit {}</h1>\n{}",
        escape(&country.common_name),
        country_form("/un/editCountry", Some(country))
    );
    layout("Edit Country", &body)
}

pub fn not_found() -> String {
    layout(
        "Not Found",
        "<h1>404</h1>\n<p>I'm sorry, we're unable to find what you're looking for</p>",
    )
}

pub fn server_error(err: &str) -> String {
    layout(
        "Error",
        &format!(
            "<h1>500</h1>\n<p>I'm sorry, but we have encountered the following error: {}</p>",
            escape(err)
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_page_keeps_user_name_sticky() {
        let html = login(Some("Incorrect Password for user: alice"), "alice");
        assert!(html.contains("value=\"alice\""));
        assert!(html.contains("Incorrect Password for user: alice"));
    }

    #[test]
    fn pages_escape_untrusted_input() {
        let html = login(Some("<script>alert(1)</script>"), "<b>bold</b>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<b>bold</b>"));
    }
}
