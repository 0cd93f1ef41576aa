//! Closed enums with stable wire tokens.
//!
//! An enum member has a label (`JOY_8WAY`, used for display) and a wire token
//! (`"joy-8way"` or `90`). Encoding a member is total; decoding rejects any
//! token outside the declared set.

use serde_json::Value;

use crate::codec::primitives::{decode_number, decode_string};
use crate::error::DecodeError;

/// Enum whose wire token is a string.
pub trait StringEnum: Sized + Copy + PartialEq + 'static {
    /// Enum name used in error messages.
    const NAME: &'static str;

    /// All members in declaration order.
    fn values() -> &'static [Self];

    fn label(self) -> &'static str;

    fn token(self) -> &'static str;

    /// Looks up a member by wire token.
    fn get(token: &str) -> Option<Self> {
        Self::values().iter().copied().find(|v| v.token() == token)
    }

    /// Looks up a member by label.
    fn get_by_label(label: &str) -> Option<Self> {
        Self::values().iter().copied().find(|v| v.label() == label)
    }

    /// `LABEL (token)`
    fn description(self) -> String {
        format!("{} ({})", self.label(), self.token())
    }

    fn serialize(self) -> Value {
        Value::String(self.token().to_string())
    }

    fn deserialize(value: Option<&Value>, path: &str) -> Result<Self, DecodeError> {
        let token = decode_string(value, path)?;
        Self::get(&token).ok_or_else(|| DecodeError::InvalidEnumToken {
            path: path.to_string(),
            enum_name: Self::NAME,
            token: format!("'{token}'"),
        })
    }
}

/// Enum whose wire token is a number.
pub trait NumberEnum: Sized + Copy + PartialEq + 'static {
    /// Enum name used in error messages.
    const NAME: &'static str;

    /// All members in declaration order.
    fn values() -> &'static [Self];

    fn label(self) -> &'static str;

    fn token(self) -> i64;

    /// Looks up a member by wire token.
    fn get(token: i64) -> Option<Self> {
        Self::values().iter().copied().find(|v| v.token() == token)
    }

    /// Looks up a member by label.
    fn get_by_label(label: &str) -> Option<Self> {
        Self::values().iter().copied().find(|v| v.label() == label)
    }

    /// `LABEL (token)`
    fn description(self) -> String {
        format!("{} ({})", self.label(), self.token())
    }

    fn serialize(self) -> Value {
        Value::from(self.token())
    }

    fn deserialize(value: Option<&Value>, path: &str) -> Result<Self, DecodeError> {
        let n = decode_number(value, path)?;
        let member = if n.fract() == 0.0 { Self::get(n as i64) } else { None };
        member.ok_or_else(|| DecodeError::InvalidEnumToken {
            path: path.to_string(),
            enum_name: Self::NAME,
            token: n.to_string(),
        })
    }

    /// Member with the smallest token. `None` for an empty slice.
    fn min(members: &[Self]) -> Option<Self> {
        members.iter().copied().min_by_key(|m| m.token())
    }

    /// Member with the largest token. `None` for an empty slice.
    fn max(members: &[Self]) -> Option<Self> {
        members.iter().copied().max_by_key(|m| m.token())
    }
}

/// Declares a string-token enum and its [`StringEnum`] impl.
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = ($label:literal, $token:literal) ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $crate::codec::enums::StringEnum for $name {
            const NAME: &'static str = stringify!($name);

            fn values() -> &'static [Self] {
                &[ $( $name::$variant ),+ ]
            }

            fn label(self) -> &'static str {
                match self { $( $name::$variant => $label ),+ }
            }

            fn token(self) -> &'static str {
                match self { $( $name::$variant => $token ),+ }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str($crate::codec::enums::StringEnum::label(*self))
            }
        }
    };
}

/// Declares a number-token enum and its [`NumberEnum`] impl.
macro_rules! number_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = ($label:literal, $token:literal) ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $crate::codec::enums::NumberEnum for $name {
            const NAME: &'static str = stringify!($name);

            fn values() -> &'static [Self] {
                &[ $( $name::$variant ),+ ]
            }

            fn label(self) -> &'static str {
                match self { $( $name::$variant => $label ),+ }
            }

            fn token(self) -> i64 {
                match self { $( $name::$variant => $token ),+ }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str($crate::codec::enums::NumberEnum::label(*self))
            }
        }
    };
}

pub(crate) use number_enum;
pub(crate) use string_enum;

/// Returns the first pair of members sharing a label or a token.
#[cfg(test)]
pub(crate) fn duplicate_string_members<E: StringEnum>() -> Option<(E, E)> {
    let values = E::values();
    for (i, a) in values.iter().enumerate() {
        for b in &values[i + 1..] {
            if a.label() == b.label() || a.token() == b.token() {
                return Some((*a, *b));
            }
        }
    }
    None
}

/// Returns the first pair of members sharing a label or a token.
#[cfg(test)]
pub(crate) fn duplicate_number_members<E: NumberEnum>() -> Option<(E, E)> {
    let values = E::values();
    for (i, a) in values.iter().enumerate() {
        for b in &values[i + 1..] {
            if a.label() == b.label() || a.token() == b.token() {
                return Some((*a, *b));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    string_enum! {
        enum Fruit {
            Apple = ("APPLE", "apple"),
            Pear = ("PEAR", "pear"),
        }
    }

    number_enum! {
        enum Speed {
            Slow = ("SLOW", 1),
            Fast = ("FAST", 10),
        }
    }

    #[test]
    fn test_string_enum_lookup() {
        assert_eq!(Fruit::get("pear"), Some(Fruit::Pear));
        assert_eq!(Fruit::get("PEAR"), None);
        assert_eq!(Fruit::get_by_label("APPLE"), Some(Fruit::Apple));
        assert_eq!(Fruit::Apple.description(), "APPLE (apple)");
        assert_eq!(Fruit::Pear.to_string(), "PEAR");
        assert_eq!(Fruit::Pear.serialize(), json!("pear"));
    }

    #[test]
    fn test_string_enum_deserialize() {
        assert_eq!(Fruit::deserialize(Some(&json!("apple")), "p").unwrap(), Fruit::Apple);

        let err = Fruit::deserialize(Some(&json!("kiwi")), "p.fruit").unwrap_err();
        assert_eq!(
            err,
            DecodeError::InvalidEnumToken {
                path: "p.fruit".to_string(),
                enum_name: "Fruit",
                token: "'kiwi'".to_string(),
            }
        );

        let err = Fruit::deserialize(Some(&json!(1)), "p.fruit").unwrap_err();
        assert!(matches!(err, DecodeError::TypeMismatch { .. }));
    }

    #[test]
    fn test_number_enum() {
        assert_eq!(Speed::deserialize(Some(&json!(10)), "p").unwrap(), Speed::Fast);
        assert!(matches!(
            Speed::deserialize(Some(&json!(5)), "p"),
            Err(DecodeError::InvalidEnumToken { .. })
        ));
        assert!(matches!(
            Speed::deserialize(Some(&json!(1.5)), "p"),
            Err(DecodeError::InvalidEnumToken { .. })
        ));
        assert_eq!(Speed::Slow.serialize(), json!(1));
        assert_eq!(Speed::min(&[Speed::Fast, Speed::Slow]), Some(Speed::Slow));
        assert_eq!(Speed::max(&[Speed::Slow, Speed::Fast]), Some(Speed::Fast));
        assert_eq!(Speed::max(&[]), None);
    }

    #[test]
    fn test_duplicate_detection() {
        assert_eq!(duplicate_string_members::<Fruit>(), None);
        assert_eq!(duplicate_number_members::<Speed>(), None);
    }
}
