use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Declares a string-backed identifier newtype.
///
/// Ids serialize as bare strings so the persisted layout stays
/// `{"<id>": {...}}` in every entity map.
macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an existing id string without validation.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Parse a user-supplied id. Rejects empty or blank strings.
            pub fn parse(s: &str) -> Result<Self, TypeError> {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err(TypeError::InvalidId {
                        kind: $kind,
                        value: s.to_string(),
                    });
                }
                Ok(Self(trimmed.to_string()))
            }

            /// The raw id string.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl FromStr for $name {
            type Err = TypeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(
    /// Identifier of a [`Dataroom`](crate::Dataroom).
    DataroomId,
    "dataroom"
);

string_id!(
    /// Identifier of a [`Folder`](crate::Folder), root folders included.
    FolderId,
    "folder"
);

string_id!(
    /// Identifier of a [`FileNode`](crate::FileNode).
    FileId,
    "file"
);

string_id!(
    /// Opaque handle correlating a file's metadata with its content blob.
    ///
    /// The blob may be gone (the process restarted) while the metadata
    /// survives; consumers must treat a dangling key as normal.
    StorageKey,
    "storage"
);

/// The kind of entity an id is being minted for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IdKind {
    Dataroom,
    RootFolder,
    Folder,
    File,
}

impl IdKind {
    /// Prefix placed in front of generated ids of this kind.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Dataroom => "dr",
            Self::RootFolder => "folder-root",
            Self::Folder => "folder",
            Self::File => "file",
        }
    }

    /// Build an id string: `{prefix}_{6 random base36}_{epoch-millis base36}`.
    pub fn mint(self, random: &str, epoch_ms: u64) -> String {
        format!("{}_{}_{}", self.prefix(), random, base36::encode(epoch_ms))
    }
}

/// Lower-case base-36 helpers shared by id and storage-key generation.
pub mod base36 {
    use rand::Rng;

    const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    /// Encode an unsigned integer in base 36.
    pub fn encode(mut value: u64) -> String {
        if value == 0 {
            return "0".to_string();
        }
        let mut digits = Vec::new();
        while value > 0 {
            digits.push(ALPHABET[(value % 36) as usize]);
            value /= 36;
        }
        digits.reverse();
        String::from_utf8(digits).unwrap_or_default()
    }

    /// `len` random base-36 characters from the thread-local generator.
    pub fn random(len: usize) -> String {
        random_with(&mut rand::thread_rng(), len)
    }

    /// `len` random base-36 characters from the given generator.
    pub fn random_with<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
        (0..len)
            .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
            .collect()
    }
}
