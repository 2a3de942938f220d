// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::*;

/// Skip serializing if optional list is None or empty
pub fn skip_serializing_list<T>(members: &Option<Vec<T>>) -> bool {
    match members {
        None => true,
        Some(v) => v.is_empty(),
    }
}

/// Skip serializing if optional map is None or empty
pub fn skip_serializing_map(attributes: &Option<Map<String, Value>>) -> bool {
    match attributes {
        None => true,
        Some(m) => m.is_empty(),
    }
}

/// Generates `Display` and `FromStr` for a fieldless enum from the same
/// wire strings serde uses for it.
macro_rules! wire_enum_strings {
    ($ty:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        impl $ty {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($ty::$variant => $wire,)+
                }
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($ty::$variant),)+
                    _ => Err(format!(
                        "{s} is not a valid {}",
                        stringify!($ty)
                    )),
                }
            }
        }
    };
}

pub(crate) use wire_enum_strings;
