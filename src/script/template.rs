use crate::provider::cloudflare::CLOUDFLARE_API_BASE;
use crate::record::{Record, ScriptContext};

use super::IP_ENDPOINT;

const TITLE: &str = "Cloudflare DNS Update Script";
const GENERATOR: &str = "Generated by Cloudflare DNS Generator";

/// Everything that differs between target shells.
///
/// Templates may reference `{ip_endpoint}`, `{api_base}`, `{token}` and
/// `{zone_id}`; the record template additionally sees `{n}`, `{name}`,
/// `{type}` and `{proxied}`. Values are already escaped for the dialect.
pub(super) struct Dialect {
    /// Written before the header, including its trailing newline(s).
    pub opening: &'static str,
    pub comment: &'static str,
    pub escape: fn(&str) -> String,
    pub boolean: fn(bool) -> &'static str,
    pub variables: &'static str,
    pub prelude: &'static str,
    pub procedures: &'static str,
    pub record: &'static str,
    pub footer: &'static str,
}

pub(super) fn render(
    dialect: &Dialect,
    context: &ScriptContext,
    records: &[Record],
    generated_on: &str,
) -> String {
    let token = (dialect.escape)(&context.api_token);
    let zone_id = (dialect.escape)(&context.zone_id);
    let globals = [
        ("ip_endpoint", IP_ENDPOINT),
        ("api_base", CLOUDFLARE_API_BASE),
        ("token", token.as_str()),
        ("zone_id", zone_id.as_str()),
    ];

    let mut out = String::from(dialect.opening);

    let c = dialect.comment;
    out.push_str(&format!("{c} {TITLE}\n"));
    out.push_str(&format!("{c} {GENERATOR}\n"));
    out.push_str(&format!("{c} Domain: {}\n", context.domain));
    out.push_str(&format!("{c} Records: {}\n", records.len()));
    out.push_str(&format!("{c} Generated on: {generated_on}\n"));
    out.push('\n');

    expand_into(&mut out, dialect.variables, &globals);
    out.push('\n');
    expand_into(&mut out, dialect.prelude, &globals);
    expand_into(&mut out, dialect.procedures, &globals);

    out.push_str(&format!("\n{c} Update DNS records\n"));
    for (index, record) in records.iter().enumerate() {
        let n = (index + 1).to_string();
        let name = (dialect.escape)(&record.name);
        let record_type = (dialect.escape)(&record.record_type);
        let vars = [
            ("n", n.as_str()),
            ("name", name.as_str()),
            ("type", record_type.as_str()),
            ("proxied", (dialect.boolean)(record.proxied)),
            ("api_base", CLOUDFLARE_API_BASE),
        ];
        out.push('\n');
        expand_into(&mut out, dialect.record, &vars);
    }

    expand_into(&mut out, dialect.footer, &globals);
    out
}

/// Single-pass `{key}` substitution.
///
/// Braces that do not enclose a known key are copied through untouched, which
/// keeps shell blocks, JSON bodies and `${var}` references intact. Substituted
/// values are never rescanned.
fn expand_into(out: &mut String, template: &str, vars: &[(&str, &str)]) {
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let key_len = after
            .find(|c: char| !(c.is_ascii_lowercase() || c == '_'))
            .unwrap_or(after.len());

        let value = if after[key_len..].starts_with('}') {
            let key = &after[..key_len];
            vars.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
        } else {
            None
        };

        match value {
            Some(value) => {
                out.push_str(value);
                rest = &after[key_len + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
}
