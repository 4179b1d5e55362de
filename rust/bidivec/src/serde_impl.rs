//! `serde` support: a `BidiVec` serializes as a plain sequence.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{Deserialize, Deserializer, SeqAccess, Visitor};
use serde::ser::{Serialize, Serializer};

use crate::BidiVec;

/// Upper bound on the capacity preallocated from an untrusted length hint.
const MAX_PREALLOCATED: usize = 4096;

impl<T: Serialize> Serialize for BidiVec<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for BidiVec<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SeqVisitor<T>(PhantomData<T>);

        impl<'de, T: Deserialize<'de>> Visitor<'de> for SeqVisitor<T> {
            type Value = BidiVec<T>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a sequence")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let hint = seq.size_hint().unwrap_or(0).min(MAX_PREALLOCATED);
                let mut values = BidiVec::with_capacity(hint);
                while let Some(value) = seq.next_element()? {
                    values.push_back(value);
                }
                Ok(values)
            }
        }

        deserializer.deserialize_seq(SeqVisitor(PhantomData))
    }
}
