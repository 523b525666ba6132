/// Escapes text for use in HTML element content and quoted attribute values.
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Replaces each `{{KEY}}` in `template` with the escaped value for `KEY`.
///
/// Placeholders without a value are left as they are. Substituted text is
/// never rescanned.
pub fn render<'a, I>(template: &str, values: I) -> String
where
    I: IntoIterator<Item = (&'a str, String)>,
{
    let values: Vec<(String, String)> = values
        .into_iter()
        .map(|(key, value)| (format!("{{{{{}}}}}", key), escape_html(&value)))
        .collect();

    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let candidate = &rest[start..];
        match values.iter().find(|(placeholder, _)| candidate.starts_with(placeholder.as_str())) {
            Some((placeholder, value)) => {
                out.push_str(value);
                rest = &candidate[placeholder.len()..];
            }
            None => {
                out.push_str("{{");
                rest = &candidate[2..];
            }
        }
    }
    out.push_str(rest);
    out
}
