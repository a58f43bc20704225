//! Human-facing labels for the closed enums, and forgiving name lookup.
//!
//! Lookup ignores case and any non-alphanumeric characters, so
//! "supply room", "Supply-Room" and "supplyroom" all resolve.

use thiserror::Error;

/// A closed enum with a display label for every variant.
pub trait Labeled: Sized + Copy + 'static {
    /// What the enum names, e.g. "room" or "medication".
    const KIND: &'static str;

    fn all() -> &'static [Self];

    fn label(self) -> &'static str;

    /// Extra accepted spellings.
    fn aliases(self) -> &'static [&'static str] {
        &[]
    }
}

/// Returned when a typed name matches no variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: '{input}'")]
pub struct UnknownName {
    pub kind: &'static str,
    pub input: String,
}

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Resolve a user-typed name to a variant.
pub fn parse_label<T: Labeled>(input: &str) -> Result<T, UnknownName> {
    let wanted = normalize(input);
    let found = if wanted.is_empty() {
        None
    } else {
        T::all().iter().copied().find(|v| {
            normalize(v.label()) == wanted || v.aliases().iter().any(|a| normalize(a) == wanted)
        })
    };
    found.ok_or_else(|| UnknownName {
        kind: T::KIND,
        input: input.trim().to_string(),
    })
}

/// Comma-separated list of all labels, for help text.
pub fn label_list<T: Labeled>() -> String {
    T::all()
        .iter()
        .map(|v| v.label())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Implements `Display` and `FromStr` in terms of [`Labeled`].
#[macro_export]
macro_rules! labeled_str {
    ($ty:ty) => {
        impl ::std::fmt::Display for $ty {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::labels::Labeled::label(*self))
            }
        }

        impl ::std::str::FromStr for $ty {
            type Err = $crate::labels::UnknownName;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $crate::labels::parse_label(s)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rooms::Room;

    #[test]
    fn test_parse_ignores_case_and_punctuation() {
        assert_eq!(parse_label::<Room>("supply room"), Ok(Room::SupplyRoom));
        assert_eq!(parse_label::<Room>("Supply-Room"), Ok(Room::SupplyRoom));
        assert_eq!(parse_label::<Room>("SUPPLYROOM"), Ok(Room::SupplyRoom));
    }

    #[test]
    fn test_parse_alias() {
        assert_eq!(parse_label::<Room>("or"), Ok(Room::OperatingRoom));
        assert_eq!(parse_label::<Room>("lab"), Ok(Room::DiagnosticLab));
    }

    #[test]
    fn test_parse_unknown() {
        let err = parse_label::<Room>("cafeteria").unwrap_err();
        assert_eq!(err.kind, "room");
        assert_eq!(err.to_string(), "unknown room: 'cafeteria'");
    }

    #[test]
    fn test_parse_empty_is_unknown() {
        assert!(parse_label::<Room>("  ").is_err());
    }

    #[test]
    fn test_label_list() {
        let list = label_list::<Room>();
        assert!(list.starts_with("ER, "));
        assert!(list.contains("Radiology"));
    }
}
