use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Reserved words of the expression language.
///
/// Keywords are recognised by [`super::token::parse_identifier`] after a whole
/// word has been read, so `printer` or `order` stay identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, EnumIter, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Keyword {
    Assert,
    Print,
    And,
    Or,
    Not,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_all_keywords_round_trip() {
        for keyword in Keyword::iter() {
            let text = keyword.to_string();
            assert_eq!(Keyword::from_str(&text).unwrap(), keyword);
        }
    }

    #[test]
    fn test_keywords_are_case_sensitive() {
        assert!(Keyword::from_str("Print").is_err());
        assert!(Keyword::from_str("AND").is_err());
    }
}
