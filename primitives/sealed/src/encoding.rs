/*
 * Copyright 2025 by Ideal Labs, LLC
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */

//! Byte encodings at the ledger boundary.
//!
//! Ledger values are exchanged as `0x` prefixed hex strings and round numbers as decimal strings.
//! Both must round trip exactly since the ledger recomputes commitments from them.

use crate::{error::Error, types::{RoundNumber, BYTES32}};
use alloc::{format, string::String, vec::Vec};

/// Hex encode with a `0x` prefix
pub fn encode_hex(bytes: &[u8]) -> String {
	format!("0x{}", hex::encode(bytes))
}

/// Decode hex with or without a `0x` prefix
pub fn decode_hex(value: &str) -> Result<Vec<u8>, Error> {
	let digits = value
		.strip_prefix("0x")
		.or_else(|| value.strip_prefix("0X"))
		.unwrap_or(value);
	Ok(hex::decode(digits)?)
}

/// Decode hex into exactly 32 bytes
pub fn decode_hex32(value: &str) -> Result<[u8; BYTES32], Error> {
	bytes32(&decode_hex(value)?)
}

/// Copy a slice into a 32 byte array, rejecting any other length
pub fn bytes32(bytes: &[u8]) -> Result<[u8; BYTES32], Error> {
	bytes
		.try_into()
		.map_err(|_| Error::InvalidLength { expected: BYTES32, actual: bytes.len() })
}

/// The canonical decimal form of a round number
pub fn round_to_decimal(round: RoundNumber) -> String {
	format!("{}", round)
}

/// Parse a decimal round number, rejecting signs, whitespace and other noise
pub fn parse_round(value: &str) -> Result<RoundNumber, Error> {
	if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
		return Err(Error::EncodingError);
	}
	value.parse().map_err(|_| Error::EncodingError)
}

/// serde adapter for `[u8; 32]` as `0x` hex
pub mod serde_hex32 {
	use super::*;
	use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

	pub fn serialize<S: Serializer>(bytes: &[u8; BYTES32], serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(&encode_hex(bytes))
	}

	pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<[u8; BYTES32], D::Error> {
		let value = String::deserialize(deserializer)?;
		decode_hex32(&value).map_err(D::Error::custom)
	}
}

/// serde adapter for an optional `[u8; 32]` as `0x` hex, `null` when absent
pub mod serde_hex32_opt {
	use super::*;
	use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

	pub fn serialize<S: Serializer>(
		bytes: &Option<[u8; BYTES32]>,
		serializer: S,
	) -> Result<S::Ok, S::Error> {
		match bytes {
			Some(bytes) => serializer.serialize_some(&encode_hex(bytes)),
			None => serializer.serialize_none(),
		}
	}

	pub fn deserialize<'de, D: Deserializer<'de>>(
		deserializer: D,
	) -> Result<Option<[u8; BYTES32]>, D::Error> {
		Option::<String>::deserialize(deserializer)?
			.map(|value| decode_hex32(&value).map_err(D::Error::custom))
			.transpose()
	}
}

/// serde adapter for byte vectors as bare hex, the way drand publishes its `/info` fields.
/// Accepts input with or without a `0x` prefix.
pub mod serde_hex {
	use super::*;
	use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

	pub fn serialize<S: Serializer, T: AsRef<[u8]>>(bytes: T, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(&hex::encode(bytes.as_ref()))
	}

	pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
		let value = String::deserialize(deserializer)?;
		decode_hex(&value).map_err(D::Error::custom)
	}
}

/// serde adapter for byte vectors as `0x` hex, like every other ledger field.
/// Accepts input with or without the prefix.
pub mod serde_prefixed_hex {
	use super::*;
	use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

	pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(&encode_hex(bytes))
	}

	pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
		let value = String::deserialize(deserializer)?;
		decode_hex(&value).map_err(D::Error::custom)
	}
}
