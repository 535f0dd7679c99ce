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

//! # Sealed Crypto
//!
//! Pairing-based primitives used to lock content keys to future drand rounds.
//!
//! ## Modules
//!
//! * [`bls12_381`] - (De)serialization helpers and the optimized pairing check
//! * [`drand`] - Round identities: the hash of a round number onto G1, as signed by quicknet
//! * [`verifier`] - Verification of beacon pulses against the beacon public key
//! * [`ibe`] - Boneh-Franklin identity based encryption keyed by round identities

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod bls12_381;
pub mod drand;
pub mod ibe;
pub mod prelude;
pub mod verifier;

#[cfg(test)]
pub(crate) mod test_utils;
