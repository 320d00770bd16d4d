//! Channel and rule token parsing.
//!
//! Channel grammar:
//!
//! ```text
//! ["+" | "-" | "<=" | "<" | ">=" | ">"] ["0x"] (digits | "?" | "#" letter) ["%"]
//! ```

use crate::error::{MapError, Result};
use crate::types::{Channel, NamedRef, Number, Operator, Rule};

/// Operator prefixes, longest first so `<=` is never read as `<` followed by `=`.
const OPERATORS: [(&str, Operator); 6] = [
    ("+", Operator::Add),
    ("-", Operator::Sub),
    ("<=", Operator::LessEq),
    ("<", Operator::Less),
    (">=", Operator::GreaterEq),
    (">", Operator::Greater),
];

/// Length of a packed `0xRRGGBBAA` rule literal.
const PACKED_LEN: usize = 10;

/// Parse a single channel token.
pub fn parse_channel(token: &str) -> Result<Channel> {
    let token = token.trim();
    let (operator, rest) = split_operator(token);
    let (radix, rest) = split_radix(rest);

    if rest.is_empty() {
        return Err(MapError::Parse {
            message: format!("empty channel value {:?}", token),
            help: Some("Expected a number, `?` or a `#` reference after the prefix".to_string()),
        });
    }

    if rest == "?" {
        return Ok(Channel::Wildcard);
    }

    if rest.len() == 2 && rest.starts_with('#') {
        let letter = rest.chars().nth(1).unwrap_or('#');
        return NamedRef::from_letter(letter)
            .map(Channel::Named)
            .ok_or_else(|| MapError::Parse {
                message: format!("invalid named reference {:?}", rest),
                help: Some("Named references are #r, #g, #b, #a and #m".to_string()),
            });
    }

    let (digits, percentage) = match rest.strip_suffix('%') {
        Some(digits) => (digits, true),
        None => (rest, false),
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(MapError::Parse {
            message: format!("invalid channel value {:?}", token),
            help: None,
        });
    }

    let value = u8::from_str_radix(digits, radix).map_err(|_| MapError::Parse {
        message: format!("channel value {:?} out of range", token),
        help: Some("Channel values must be between 0 and 255".to_string()),
    })?;

    Ok(Channel::Number(Number {
        operator,
        value,
        percentage,
    }))
}

/// Parse a rule: four channels separated by commas and/or whitespace, or a
/// packed `0xRRGGBBAA` literal.
pub fn parse_rule(text: &str) -> Result<Rule> {
    let tokens: Vec<&str> = text
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .collect();

    match tokens.as_slice() {
        [packed] if packed.len() == PACKED_LEN => parse_packed(packed),
        [r, g, b, a] => Ok(Rule::new(
            parse_channel(r)?,
            parse_channel(g)?,
            parse_channel(b)?,
            parse_channel(a)?,
        )),
        _ => Err(invalid_rule(text)),
    }
}

fn split_operator(token: &str) -> (Operator, &str) {
    for (prefix, operator) in OPERATORS {
        if let Some(rest) = token.strip_prefix(prefix) {
            return (operator, rest);
        }
    }
    (Operator::None, token)
}

fn split_radix(s: &str) -> (u32, &str) {
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(rest) => (16, rest),
        None => (10, s),
    }
}

/// `0xRRGGBBAA` -> four hex literals.
fn parse_packed(token: &str) -> Result<Rule> {
    let hex = match split_radix(token) {
        (16, hex) if hex.chars().all(|c| c.is_ascii_hexdigit()) => hex,
        _ => return Err(invalid_rule(token)),
    };

    let mut bytes = [0u8; 4];
    for (i, byte) in bytes.iter_mut().enumerate() {
        let pair = &hex[i * 2..i * 2 + 2];
        *byte = u8::from_str_radix(pair, 16).map_err(|_| invalid_rule(token))?;
    }

    let [r, g, b, a] = bytes.map(Channel::literal);
    Ok(Rule::new(r, g, b, a))
}

fn invalid_rule(text: &str) -> MapError {
    MapError::Parse {
        message: format!("invalid rule value {:?}", text.trim()),
        help: Some("A rule is four channels (R G B A) or a packed 0xRRGGBBAA literal".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn num(operator: Operator, value: u8) -> Channel {
        Channel::Number(Number::new(operator, value))
    }

    #[test]
    fn test_parse_plain_number() {
        assert_eq!(parse_channel("10").unwrap(), Channel::literal(10));
        assert_eq!(parse_channel("0").unwrap(), Channel::literal(0));
        assert_eq!(parse_channel("255").unwrap(), Channel::literal(255));
    }

    #[test]
    fn test_parse_operators() {
        assert_eq!(parse_channel("+5").unwrap(), num(Operator::Add, 5));
        assert_eq!(parse_channel("-5").unwrap(), num(Operator::Sub, 5));
        assert_eq!(parse_channel("<5").unwrap(), num(Operator::Less, 5));
        assert_eq!(parse_channel("<=5").unwrap(), num(Operator::LessEq, 5));
        assert_eq!(parse_channel(">5").unwrap(), num(Operator::Greater, 5));
        assert_eq!(parse_channel(">=5").unwrap(), num(Operator::GreaterEq, 5));
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_channel("0xff").unwrap(), Channel::literal(255));
        assert_eq!(parse_channel("0XFF").unwrap(), Channel::literal(255));
        assert_eq!(parse_channel(">0x80").unwrap(), num(Operator::Greater, 128));
        assert_eq!(
            parse_channel("+0x0a%").unwrap(),
            Channel::Number(Number::new(Operator::Add, 10).percent())
        );
    }

    #[test]
    fn test_parse_percentage() {
        assert_eq!(
            parse_channel("50%").unwrap(),
            Channel::Number(Number::new(Operator::None, 50).percent())
        );
        assert_eq!(
            parse_channel("-20%").unwrap(),
            Channel::Number(Number::new(Operator::Sub, 20).percent())
        );
    }

    #[test]
    fn test_parse_wildcard_and_names() {
        assert_eq!(parse_channel("?").unwrap(), Channel::Wildcard);
        assert_eq!(parse_channel("#r").unwrap(), Channel::Named(NamedRef::R));
        assert_eq!(parse_channel("#G").unwrap(), Channel::Named(NamedRef::G));
        assert_eq!(parse_channel("#b").unwrap(), Channel::Named(NamedRef::B));
        assert_eq!(parse_channel("#a").unwrap(), Channel::Named(NamedRef::A));
        assert_eq!(parse_channel("#m").unwrap(), Channel::Named(NamedRef::Mean));
    }

    #[test]
    fn test_parse_invalid_named_reference() {
        let err = parse_channel("#x").unwrap_err();
        assert!(err.to_string().contains("invalid named reference"));
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_channel("").is_err());
        assert!(parse_channel("+").is_err());
        assert!(parse_channel("<=").is_err());
        assert!(parse_channel("0x").is_err());
        assert!(parse_channel("%").is_err());
        assert!(parse_channel("256").is_err());
        assert!(parse_channel("0x100").is_err());
        assert!(parse_channel("abc").is_err());
        assert!(parse_channel("12a").is_err());
        assert!(parse_channel("++5").is_err());
        assert!(parse_channel("#red").is_err());
    }

    #[test]
    fn test_operator_not_split() {
        // `<=` must not leave a dangling `=`.
        assert!(parse_channel("<=10").is_ok());
        assert!(parse_channel("=10").is_err());
    }

    #[test]
    fn test_round_trip() {
        let mut channels = vec![
            Channel::Wildcard,
            Channel::Named(NamedRef::R),
            Channel::Named(NamedRef::G),
            Channel::Named(NamedRef::B),
            Channel::Named(NamedRef::A),
            Channel::Named(NamedRef::Mean),
        ];
        let operators = [
            Operator::None,
            Operator::Add,
            Operator::Sub,
            Operator::Less,
            Operator::LessEq,
            Operator::Greater,
            Operator::GreaterEq,
        ];
        for operator in operators {
            for value in [0u8, 1, 9, 10, 99, 100, 128, 254, 255] {
                channels.push(num(operator, value));
                channels.push(Channel::Number(Number::new(operator, value).percent()));
            }
        }

        for c in channels {
            assert_eq!(parse_channel(&c.to_string()).unwrap(), c, "token {}", c);
        }
    }

    #[test]
    fn test_parse_rule_separators() {
        let expected = Rule::new(
            Channel::literal(1),
            Channel::Wildcard,
            num(Operator::Greater, 3),
            Channel::Named(NamedRef::A),
        );
        assert_eq!(parse_rule("1 ? >3 #a").unwrap(), expected);
        assert_eq!(parse_rule("1,?,>3,#a").unwrap(), expected);
        assert_eq!(parse_rule(" 1, ?,,  >3 ,#a ").unwrap(), expected);
        assert_eq!(parse_rule("1\t?\t>3\t#a").unwrap(), expected);
    }

    #[test]
    fn test_parse_rule_wrong_count() {
        let err = parse_rule("1 2 3").unwrap_err();
        assert!(err.to_string().contains("invalid rule value"));
        assert!(parse_rule("1 2 3 4 5").is_err());
        assert!(parse_rule("").is_err());
        assert!(parse_rule(" , ,").is_err());
    }

    #[test]
    fn test_parse_rule_bad_channel() {
        assert!(parse_rule("1 2 3 300").is_err());
    }

    #[test]
    fn test_parse_packed_rule() {
        let rule = parse_rule("0xFF008040").unwrap();
        assert_eq!(
            rule,
            Rule::new(
                Channel::literal(255),
                Channel::literal(0),
                Channel::literal(128),
                Channel::literal(64),
            )
        );
        assert_eq!(parse_rule("0xff008040").unwrap(), rule);
    }

    #[test]
    fn test_parse_packed_rule_invalid() {
        assert!(parse_rule("0xGG008040").is_err());
        assert!(parse_rule("0x#r008040").is_err());
        assert!(parse_rule("1234567890").is_err());
        assert!(parse_rule("0xFF0080").is_err());
    }
}
