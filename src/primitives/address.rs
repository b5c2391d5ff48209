use {
  super::ToBase58String,
  std::{
    fmt::{Debug, Display, Formatter},
    ops::Deref,
  },
};

/// The value a deployment entrypoint resolves with.
///
/// Its shape is owned by the module that produced it, so the host
/// treats it as opaque bytes. UTF-8 values (hex strings, bech32,
/// formatted hashes) are shown as returned, with control characters
/// escaped so the address stays on one line. Anything that is not
/// UTF-8 is shown in base58.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Address(Vec<u8>);

impl Address {
  pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
    Self(bytes.into())
  }

  pub fn as_bytes(&self) -> &[u8] {
    &self.0
  }

  /// Returns the address as text if the module produced
  /// a non-empty UTF-8 value.
  pub fn as_text(&self) -> Option<&str> {
    std::str::from_utf8(&self.0).ok().filter(|s| !s.is_empty())
  }
}

impl Deref for Address {
  type Target = [u8];

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl AsRef<[u8]> for Address {
  fn as_ref(&self) -> &[u8] {
    &self.0
  }
}

impl From<&str> for Address {
  fn from(s: &str) -> Self {
    Self(s.as_bytes().to_vec())
  }
}

impl From<String> for Address {
  fn from(s: String) -> Self {
    Self(s.into_bytes())
  }
}

impl From<Vec<u8>> for Address {
  fn from(bytes: Vec<u8>) -> Self {
    Self(bytes)
  }
}

impl Display for Address {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self.as_text() {
      Some(text) => {
        for c in text.chars() {
          if c.is_control() {
            write!(f, "{}", c.escape_default())?;
          } else {
            write!(f, "{c}")?;
          }
        }
        Ok(())
      }
      None => write!(f, "{}", self.0.to_b58()),
    }
  }
}

impl Debug for Address {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "Address({self})")
  }
}
