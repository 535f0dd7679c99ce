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

use crate::{error::Error, source::PulseSource};
use async_trait::async_trait;
use sp_sealed_primitives::{BeaconConfig, OpaquePulse, Pulse, RoundNumber};
use std::{
	collections::BTreeMap,
	sync::{Arc, Mutex},
};

const LOG_TARGET: &str = "pulse-store";

/// One day of quicknet rounds
pub const DEFAULT_RETENTION_ROUNDS: u64 = 28_800;

#[derive(Default)]
struct Pulses {
	by_round: BTreeMap<RoundNumber, OpaquePulse>,
	/// Rounds below this were pruned
	floor: RoundNumber,
}

/// Pulses that verified against the beacon public key, shared between the ingester and readers.
///
/// Only the latest `retention` rounds are kept; older pulses are pruned as new ones arrive.
#[derive(Clone)]
pub struct PulseStore {
	config: Arc<BeaconConfig>,
	retention: u64,
	pulses: Arc<Mutex<Pulses>>,
}

impl PulseStore {
	pub fn new(config: BeaconConfig) -> Self {
		Self::with_retention(config, DEFAULT_RETENTION_ROUNDS)
	}

	/// A store that keeps `retention` rounds behind the latest one it has seen
	pub fn with_retention(config: BeaconConfig, retention: u64) -> Self {
		Self { config: Arc::new(config), retention, pulses: Default::default() }
	}

	pub fn config(&self) -> &BeaconConfig {
		&self.config
	}

	/// Verify and store a pulse. Returns `false` if the round was already known or pruned.
	pub fn insert(&self, pulse: OpaquePulse) -> Result<bool, Error> {
		self.config.verify_pulse(&pulse)?;
		let mut pulses = self.pulses.lock().map_err(|_| Error::StateLocked)?;
		if pulse.round < pulses.floor || pulses.by_round.contains_key(&pulse.round) {
			return Ok(false);
		}
		let round = pulse.round;
		log::debug!(target: LOG_TARGET, "Stored pulse for round {}", round);
		pulses.by_round.insert(round, pulse);

		if let Some(latest) = pulses.by_round.keys().next_back().copied() {
			pulses.prune_below(latest.saturating_sub(self.retention));
		}
		Ok(true)
	}

	/// Verify and store a pulse as decoded from the wire
	pub fn ingest(&self, pulse: Pulse) -> Result<bool, Error> {
		let opaque = OpaquePulse::try_from(pulse)?;
		self.insert(opaque)
	}

	/// Drop every pulse for a round below `round`, returning how many were dropped.
	///
	/// Later inserts for those rounds are ignored, and reading them fails with
	/// [`Error::PulsePruned`].
	pub fn prune_below(&self, round: RoundNumber) -> Result<usize, Error> {
		let mut pulses = self.pulses.lock().map_err(|_| Error::StateLocked)?;
		Ok(pulses.prune_below(round))
	}

	pub fn get(&self, round: RoundNumber) -> Result<Option<OpaquePulse>, Error> {
		let pulses = self.pulses.lock().map_err(|_| Error::StateLocked)?;
		if round < pulses.floor {
			return Err(Error::PulsePruned(round));
		}
		Ok(pulses.by_round.get(&round).cloned())
	}

	/// The highest round seen so far
	pub fn latest_round(&self) -> Result<Option<RoundNumber>, Error> {
		let pulses = self.pulses.lock().map_err(|_| Error::StateLocked)?;
		Ok(pulses.by_round.keys().next_back().copied())
	}

	pub fn len(&self) -> Result<usize, Error> {
		Ok(self.pulses.lock().map_err(|_| Error::StateLocked)?.by_round.len())
	}
}

impl Pulses {
	fn prune_below(&mut self, round: RoundNumber) -> usize {
		if round <= self.floor {
			return 0;
		}
		let kept = self.by_round.split_off(&round);
		let pruned = std::mem::replace(&mut self.by_round, kept).len();
		self.floor = round;
		if pruned > 0 {
			log::debug!(target: LOG_TARGET, "Pruned {} pulses below round {}", pruned, round);
		}
		pruned
	}
}

#[async_trait]
impl PulseSource for PulseStore {
	async fn pulse(&self, round: RoundNumber) -> Result<Option<OpaquePulse>, Error> {
		self.get(round)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::mock::{pulse1000, pulse1001};
	use sp_sealed_primitives::Error as PrimitivesError;

	fn store() -> PulseStore {
		PulseStore::new(BeaconConfig::quicknet())
	}

	#[test]
	fn can_store_verified_pulses() {
		let store = store();
		assert_eq!(store.latest_round().unwrap(), None);

		assert!(store.insert(pulse1001()).unwrap());
		assert!(store.insert(pulse1000()).unwrap());

		assert_eq!(store.len().unwrap(), 2);
		assert_eq!(store.latest_round().unwrap(), Some(1001));
		assert_eq!(store.get(1000).unwrap(), Some(pulse1000()));
	}

	#[test]
	fn duplicate_rounds_are_ignored() {
		let store = store();
		assert!(store.insert(pulse1000()).unwrap());
		assert!(!store.insert(pulse1000()).unwrap());
		assert_eq!(store.len().unwrap(), 1);
	}

	#[test]
	fn forged_pulses_are_rejected() {
		let store = store();
		// a real signature claimed for another round
		let mut forged = pulse1000();
		forged.round = 1002;
		assert_eq!(
			store.insert(forged),
			Err(Error::Primitives(PrimitivesError::InvalidSignature))
		);
		assert_eq!(store.len().unwrap(), 0);
	}

	#[test]
	fn wire_pulses_with_bad_signature_size_are_rejected() {
		let store = store();
		let pulse = Pulse { round: 1000, signature: vec![1; 49] };
		assert_eq!(
			store.ingest(pulse),
			Err(Error::Primitives(PrimitivesError::InvalidLength { expected: 48, actual: 49 }))
		);
	}

	#[test]
	fn clones_share_state() {
		let store = store();
		let reader = store.clone();
		store.insert(pulse1000()).unwrap();
		assert_eq!(reader.get(1000).unwrap(), Some(pulse1000()));
	}

	#[tokio::test]
	async fn pulse_source_reports_unpublished_rounds_as_none() {
		let store = store();
		store.insert(pulse1000()).unwrap();
		assert_eq!(store.pulse(1000).await.unwrap(), Some(pulse1000()));
		assert_eq!(store.pulse(1001).await.unwrap(), None);
	}

	#[test]
	fn prune_below_drops_older_rounds() {
		let store = store();
		store.insert(pulse1000()).unwrap();
		store.insert(pulse1001()).unwrap();

		assert_eq!(store.prune_below(1001).unwrap(), 1);
		assert_eq!(store.len().unwrap(), 1);
		assert_eq!(store.get(1000), Err(Error::PulsePruned(1000)));
		assert_eq!(store.get(1001).unwrap(), Some(pulse1001()));
		// a pruned round is not stored again
		assert!(!store.insert(pulse1000()).unwrap());
		assert_eq!(store.len().unwrap(), 1);
		// pruning is monotonic
		assert_eq!(store.prune_below(900).unwrap(), 0);
		assert_eq!(store.get(1001).unwrap(), Some(pulse1001()));
	}

	#[test]
	fn retention_bounds_the_store() {
		let store = PulseStore::with_retention(BeaconConfig::quicknet(), 0);
		store.insert(pulse1000()).unwrap();
		assert_eq!(store.len().unwrap(), 1);

		store.insert(pulse1001()).unwrap();
		assert_eq!(store.len().unwrap(), 1);
		assert_eq!(store.latest_round().unwrap(), Some(1001));
		assert_eq!(store.get(1000), Err(Error::PulsePruned(1000)));
	}

	#[test]
	fn retention_keeps_rounds_within_the_window() {
		let store = PulseStore::with_retention(BeaconConfig::quicknet(), 1);
		store.insert(pulse1001()).unwrap();
		assert!(store.insert(pulse1000()).unwrap());
		assert_eq!(store.len().unwrap(), 2);
	}
}
