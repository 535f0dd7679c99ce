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

//! # Sealed Primitives
//!
//! Client side building blocks for time-locked content listings.
//!
//! A seller either commits to a content key and reveals it later ([`KeyCommitment`]), or locks
//! the key to a drand round so it is released automatically once the beacon reaches that round
//! ([`TimelockBeaconCodec`]).
//!
//! ## Modules
//!
//! * [`commitment`] - `keccak256(key || salt)` commitments
//! * [`codec`] - Time to round conversion and timelock transforms
//! * [`beacon`] - Beacon configuration, with a drand quicknet preset
//! * [`pulse`] - Beacon pulses as gossiped by drand
//! * [`listing`] - Listing records and drafts exchanged with the ledger
//! * [`encoding`] - Hex and decimal encodings at the ledger boundary

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod beacon;
pub mod codec;
pub mod commitment;
pub mod encoding;
pub mod error;
pub mod listing;
pub mod pulse;
pub mod types;

#[cfg(test)]
pub(crate) mod test_utils;

pub use beacon::BeaconConfig;
pub use codec::{TimelockBeaconCodec, TimelockCiphertext};
pub use commitment::KeyCommitment;
pub use error::Error;
pub use listing::{
	AutoReleaseDraft, AutoReleaseListing, Listing, ListingId, RevealSecrets, StandardDraft,
	StandardListing,
};
pub use pulse::{OpaquePulse, Pulse};
pub use types::{Commitment, Key, RoundNumber, Salt, UnixSeconds};
