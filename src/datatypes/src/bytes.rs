// Copyright 2023 Greptime Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::ops::Deref;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Buffer of bytes.
#[derive(Debug, Default, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Bytes(bytes::Bytes);

impl From<Vec<u8>> for Bytes {
    fn from(bytes: Vec<u8>) -> Bytes {
        Bytes(bytes::Bytes::from(bytes))
    }
}

impl From<&[u8]> for Bytes {
    fn from(bytes: &[u8]) -> Bytes {
        Bytes(bytes::Bytes::copy_from_slice(bytes))
    }
}

impl Deref for Bytes {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<[u8]> for Bytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// String buffer that holds its content in utf8 encoded bytes.
///
/// Now this buffer is restricted to only hold valid utf8 strings, all
/// constructors take strings, so the invariant holds by construction.
#[derive(Debug, Default, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StringBytes(bytes::Bytes);

impl StringBytes {
    /// View the string content.
    pub fn as_utf8(&self) -> &str {
        // SAFETY: the inner bytes are only ever built from `String`/`&str`.
        unsafe { std::str::from_utf8_unchecked(&self.0) }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for StringBytes {
    fn from(string: String) -> StringBytes {
        StringBytes(bytes::Bytes::from(string))
    }
}

impl From<&str> for StringBytes {
    fn from(string: &str) -> StringBytes {
        StringBytes(bytes::Bytes::copy_from_slice(string.as_bytes()))
    }
}

impl PartialEq<String> for StringBytes {
    fn eq(&self, other: &String) -> bool {
        self.as_utf8() == other
    }
}

impl PartialEq<str> for StringBytes {
    fn eq(&self, other: &str) -> bool {
        self.as_utf8() == other
    }
}

impl Serialize for StringBytes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_utf8())
    }
}

impl<'de> Deserialize<'de> for StringBytes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let string = String::deserialize(deserializer)?;
        Ok(StringBytes::from(string))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_deref() {
        let hello = b"hello".to_vec();
        let bytes = Bytes::from(hello.clone());
        assert_eq!(hello.as_slice(), &*bytes);
    }

    #[test]
    fn test_string_bytes() {
        let hello = "hello".to_string();
        let string_bytes = StringBytes::from(hello.clone());
        assert_eq!(hello, string_bytes.as_utf8());
        assert_eq!(string_bytes, hello);
        assert_eq!(5, string_bytes.len());
        assert!(!string_bytes.is_empty());
    }

    #[test]
    fn test_string_bytes_ordering() {
        assert!(StringBytes::from("abc") < StringBytes::from("abd"));
        assert!(StringBytes::from("ab") < StringBytes::from("abc"));
    }

    #[test]
    fn test_string_bytes_serde() {
        let string_bytes = StringBytes::from("hello");
        let json = serde_json::to_string(&string_bytes).unwrap();
        assert_eq!("\"hello\"", json);
        assert_eq!(string_bytes, serde_json::from_str::<StringBytes>(&json).unwrap());
    }
}
