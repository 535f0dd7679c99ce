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

use crate::types::RoundNumber;
use sp_sealed_crypto::bls12_381::CryptoError;

/// Errors raised by commitments, round arithmetic and the timelock codecs
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
	/// A key or salt is not exactly the expected number of bytes.
	InvalidLength { expected: usize, actual: usize },
	/// The timestamp is not strictly after the beacon genesis.
	BeforeGenesis { timestamp: u64, genesis: u64 },
	/// The beacon has not published the round yet.
	RoundNotYetPublished(RoundNumber),
	/// A hex string could not be decoded.
	MalformedHex,
	/// Bytes could not be decoded into the expected structure.
	EncodingError,
	/// The beacon configuration is unusable (e.g. a zero period).
	InvalidConfig,
	/// The signature is not the beacon's signature for the round.
	InvalidSignature,
	/// The ciphertext does not open under the round's signature.
	DecryptionFailed,
	/// Any other failure in the underlying pairing crypto.
	Crypto(CryptoError),
}

impl From<CryptoError> for Error {
	fn from(err: CryptoError) -> Self {
		match err {
			CryptoError::InvalidSignature => Error::InvalidSignature,
			CryptoError::DecryptionFailed => Error::DecryptionFailed,
			other => Error::Crypto(other),
		}
	}
}

impl From<hex::FromHexError> for Error {
	fn from(_: hex::FromHexError) -> Self {
		Error::MalformedHex
	}
}

impl From<codec::Error> for Error {
	fn from(_: codec::Error) -> Self {
		Error::EncodingError
	}
}

impl core::fmt::Display for Error {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		match self {
			Self::InvalidLength { expected, actual } =>
				write!(f, "expected {} bytes but received {}", expected, actual),
			Self::BeforeGenesis { timestamp, genesis } =>
				write!(f, "timestamp {} is not after the beacon genesis {}", timestamp, genesis),
			Self::RoundNotYetPublished(round) =>
				write!(f, "round {} has not been published by the beacon", round),
			Self::MalformedHex => f.write_str("malformed hex string"),
			Self::EncodingError => f.write_str("the bytes could not be decoded"),
			Self::InvalidConfig => f.write_str("invalid beacon configuration"),
			Self::InvalidSignature => f.write_str("the signature is not valid for the round"),
			Self::DecryptionFailed => f.write_str("the ciphertext could not be opened"),
			Self::Crypto(err) => write!(f, "crypto failure: {}", err),
		}
	}
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
