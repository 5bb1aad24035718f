/// Strips punctuation the model tends to glue onto the end of links
/// ("visita https://store.example/products/x." renders as a broken URL in
/// most chat clients). Pure text transformation, no other side effects.
pub fn strip_url_trailing_punctuation(reply: &str) -> String {
    let mut output = String::with_capacity(reply.len());
    let mut rest = reply;

    while let Some(position) = rest.find("http") {
        output.push_str(&rest[..position]);
        let tail = &rest[position..];
        let end = tail.find(char::is_whitespace).unwrap_or(tail.len());
        let token = &tail[..end];

        if token.starts_with("http://") || token.starts_with("https://") {
            output.push_str(token.trim_end_matches(is_trailing_punctuation));
        } else {
            output.push_str(token);
        }

        rest = &tail[end..];
    }

    output.push_str(rest);
    output
}

fn is_trailing_punctuation(character: char) -> bool {
    matches!(character, '.' | ',' | ';' | ':' | '!' | '?' | ')' | ']')
}
