//! Masking of personal data in logged payloads.
//!
//! Only ever applied to copies rendered for logs; request bodies and decoded
//! responses are never touched.

use serde_json::Value;

/// Replacement written over sensitive values.
pub const REDACTION_MARKER: &str = "[Filtered private data]";

/// Key fragments treated as sensitive unless configured otherwise.
pub const DEFAULT_SENSITIVE_KEYS: &[&str] = &[
    "address", "email", "phone", "name", "zip", "postal", "city", "state", "country",
];

/// Replaces, in place and at any depth, the value of every object key whose
/// lowercase form contains one of `sensitive_keys`.
///
/// Fragments are expected in lowercase. Strings and other scalars are left as
/// they are.
///
/// # Examples
///
/// ```
/// use octo_client::redact::{redact, REDACTION_MARKER};
/// use serde_json::json;
///
/// let mut payload = json!({"contact": {"emailAddress": "a@b.c"}, "uuid": "1"});
/// redact(&mut payload, &["email"]);
///
/// assert_eq!(payload["contact"]["emailAddress"], REDACTION_MARKER);
/// assert_eq!(payload["uuid"], "1");
/// ```
pub fn redact<S: AsRef<str>>(value: &mut Value, sensitive_keys: &[S]) {
    match value {
        Value::Object(map) => {
            for (key, child) in map.iter_mut() {
                let lowered = key.to_lowercase();
                if sensitive_keys
                    .iter()
                    .any(|fragment| lowered.contains(fragment.as_ref()))
                {
                    *child = Value::String(REDACTION_MARKER.to_string());
                } else {
                    redact(child, sensitive_keys);
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                redact(item, sensitive_keys);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_redacts_nested_keys() {
        let mut data = json!({
            "nonSensitiveData": "foo",
            "otherNonSensitiveData": {
                "isItSensitive": "I don't think so ;)"
            },
            "userAddress": "1234 Main St",
            "userCity": "Anytown",
            "userZip": "12345",
            "userCountry": "USA",
            "userState": "CA",
            "contact": {
                "firstName": "John",
                "lastName": "Doe",
                "userEmail": "foo@boo.com",
                "userPhone": "1234567890"
            }
        });

        redact(&mut data, DEFAULT_SENSITIVE_KEYS);

        assert_eq!(
            data,
            json!({
                "nonSensitiveData": "foo",
                "otherNonSensitiveData": {
                    "isItSensitive": "I don't think so ;)"
                },
                "userAddress": REDACTION_MARKER,
                "userCity": REDACTION_MARKER,
                "userZip": REDACTION_MARKER,
                "userCountry": REDACTION_MARKER,
                "userState": REDACTION_MARKER,
                "contact": {
                    "firstName": REDACTION_MARKER,
                    "lastName": REDACTION_MARKER,
                    "userEmail": REDACTION_MARKER,
                    "userPhone": REDACTION_MARKER
                }
            })
        );
    }

    #[test]
    fn test_redacts_inside_arrays() {
        let mut data = json!([
            {"unitItems": [{"contact": {"phoneNumber": "+44"}, "unitId": "adult"}]}
        ]);

        redact(&mut data, DEFAULT_SENSITIVE_KEYS);

        assert_eq!(data[0]["unitItems"][0]["contact"]["phoneNumber"], REDACTION_MARKER);
        assert_eq!(data[0]["unitItems"][0]["unitId"], "adult");
    }

    #[test]
    fn test_strings_are_terminal() {
        let mut data = json!("name@example.com");
        redact(&mut data, DEFAULT_SENSITIVE_KEYS);
        assert_eq!(data, json!("name@example.com"));
    }

    #[test]
    fn test_whole_subtree_replaced_when_key_matches() {
        let mut data = json!({"address": {"street": "Main", "zip": "1"}});
        redact(&mut data, &["address"]);
        assert_eq!(data, json!({"address": REDACTION_MARKER}));
    }
}
