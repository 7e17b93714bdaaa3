/*
[INPUT]:  API schema definitions and caller-supplied identifiers
[OUTPUT]: Typed Rust enums (HTTP verbs, token lookup keys)
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    /// Whether requests with this verb carry a JSON body
    pub fn sends_body(self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Key used to look up a single token on a chain
///
/// Strings of the form `0x` followed by hex digits are addresses, anything
/// else is treated as a ticker symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TokenLookup {
    ByAddress(String),
    BySymbol(String),
}

impl TokenLookup {
    pub fn parse(value: &str) -> Self {
        if is_hex_address(value) {
            TokenLookup::ByAddress(value.to_string())
        } else {
            TokenLookup::BySymbol(value.to_string())
        }
    }

    pub fn value(&self) -> &str {
        match self {
            TokenLookup::ByAddress(value) | TokenLookup::BySymbol(value) => value,
        }
    }
}

impl From<&str> for TokenLookup {
    fn from(value: &str) -> Self {
        TokenLookup::parse(value)
    }
}

impl From<String> for TokenLookup {
    fn from(value: String) -> Self {
        TokenLookup::parse(&value)
    }
}

fn is_hex_address(value: &str) -> bool {
    match value.strip_prefix("0x") {
        Some(digits) => !digits.is_empty() && digits.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913", true)]
    #[case("0xabc", true)]
    #[case("0x", false)]
    #[case("0xZZ", false)]
    #[case("USDC", false)]
    #[case("833589fcd6edb6e08f4c7c32d4f71b54bda02913", false)]
    #[case("0X833589", false)]
    fn test_token_lookup_disambiguation(#[case] input: &str, #[case] is_address: bool) {
        let lookup = TokenLookup::parse(input);
        assert_eq!(matches!(lookup, TokenLookup::ByAddress(_)), is_address);
        assert_eq!(lookup.value(), input);
    }

    #[test]
    fn test_method_body_rules() {
        assert!(HttpMethod::Post.sends_body());
        assert!(HttpMethod::Put.sends_body());
        assert!(!HttpMethod::Get.sends_body());
        assert!(!HttpMethod::Delete.sends_body());
        assert_eq!(reqwest::Method::from(HttpMethod::Delete), reqwest::Method::DELETE);
    }
}
