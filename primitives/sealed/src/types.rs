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

use crate::{encoding, error::Error};
use alloc::string::String;
use ark_std::rand::{CryptoRng, RngCore};
use codec::{Decode, Encode, MaxEncodedLen};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

/// The round number to track rounds of the beacon
pub type RoundNumber = u64;
/// Seconds since the unix epoch
pub type UnixSeconds = u64;

/// The size of keys, salts and commitments
pub const BYTES32: usize = 32;

macro_rules! secret_bytes32 {
	($(#[$meta:meta])* $name:ident) => {
		$(#[$meta])*
		#[derive(Clone, PartialEq, Eq, Encode, Decode)]
		pub struct $name([u8; BYTES32]);

		impl $name {
			/// Draw fresh bytes from a cryptographically secure rng
			pub fn generate<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
				let mut bytes = [0u8; BYTES32];
				rng.fill_bytes(&mut bytes);
				Self(bytes)
			}

			pub fn as_bytes(&self) -> &[u8; BYTES32] {
				&self.0
			}

			/// Hex encoding with a `0x` prefix
			pub fn to_hex(&self) -> String {
				encoding::encode_hex(&self.0)
			}

			pub fn from_hex(value: &str) -> Result<Self, Error> {
				encoding::decode_hex32(value).map(Self)
			}
		}

		impl From<[u8; BYTES32]> for $name {
			fn from(bytes: [u8; BYTES32]) -> Self {
				Self(bytes)
			}
		}

		impl TryFrom<&[u8]> for $name {
			type Error = Error;

			fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
				encoding::bytes32(bytes).map(Self)
			}
		}

		impl Drop for $name {
			fn drop(&mut self) {
				self.0.zeroize();
			}
		}

		// never print secret material
		impl core::fmt::Debug for $name {
			fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
				f.write_str(concat!(stringify!($name), "(..)"))
			}
		}
	};
}

secret_bytes32!(
	/// A 32 byte content encryption key
	Key
);

secret_bytes32!(
	/// A 32 byte salt, unique per standard listing
	Salt
);

/// A public commitment to a (key, salt) pair
#[derive(
	Clone,
	Copy,
	Debug,
	PartialEq,
	Eq,
	Hash,
	Encode,
	Decode,
	MaxEncodedLen,
	TypeInfo,
	Serialize,
	Deserialize,
)]
pub struct Commitment(#[serde(with = "crate::encoding::serde_hex32")] pub [u8; BYTES32]);

impl Commitment {
	pub fn as_bytes(&self) -> &[u8; BYTES32] {
		&self.0
	}

	pub fn to_hex(&self) -> String {
		encoding::encode_hex(&self.0)
	}

	pub fn from_hex(value: &str) -> Result<Self, Error> {
		encoding::decode_hex32(value).map(Self)
	}
}

impl core::fmt::Display for Commitment {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.write_str(&self.to_hex())
	}
}

impl core::str::FromStr for Commitment {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::from_hex(s)
	}
}
