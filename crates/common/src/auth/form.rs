//! `application/x-www-form-urlencoded` bodies and query strings.

use url::form_urlencoded;

/// Encode key/value pairs in insertion order.
///
/// ```
/// use glide_common::auth::encode_form;
///
/// let body = encode_form(&[("scope", "sim-swap"), ("login_hint", "tel:+1555")]);
/// assert_eq!(body, "scope=sim-swap&login_hint=tel%3A%2B1555");
/// ```
#[must_use]
pub fn encode_form<K, V>(pairs: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in pairs {
        serializer.append_pair(key.as_ref(), value.as_ref());
    }
    serializer.finish()
}

/// Decode a form body back into ordered pairs.
#[must_use]
pub fn decode_form(body: &str) -> Vec<(String, String)> {
    form_urlencoded::parse(body.as_bytes()).into_owned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_order_and_escapes() {
        let body = encode_form(&[
            ("grant_type", "urn:openid:params:grant-type:ciba"),
            ("auth_req_id", "abc 123"),
        ]);
        assert_eq!(body, "grant_type=urn%3Aopenid%3Aparams%3Agrant-type%3Aciba&auth_req_id=abc+123");

        let decoded = decode_form(&body);
        assert_eq!(decoded[0], ("grant_type".into(), "urn:openid:params:grant-type:ciba".into()));
        assert_eq!(decoded[1], ("auth_req_id".into(), "abc 123".into()));
    }
}
