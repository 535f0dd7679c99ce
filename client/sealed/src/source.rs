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

//! Where beacon pulses come from, and unlocking secrets once their round is published.

use crate::error::Error;
use async_trait::async_trait;
use sp_sealed_primitives::{OpaquePulse, RoundNumber, TimelockBeaconCodec};

/// Looks up the pulse a beacon published for a round
#[async_trait]
pub trait PulseSource: Send + Sync {
	/// The pulse for `round`, or `None` when the beacon has not published it (yet).
	///
	/// Implementations must not retry internally; dropping the future cancels the lookup.
	async fn pulse(&self, round: RoundNumber) -> Result<Option<OpaquePulse>, Error>;
}

/// Open a SCALE encoded timelock ciphertext once the beacon has published `round`.
///
/// Fails with `RoundNotYetPublished` when the source has no pulse for the round. Callers decide
/// whether and when to try again.
pub async fn unlock_when_published<S: PulseSource + ?Sized>(
	codec: &TimelockBeaconCodec,
	source: &S,
	ciphertext: &[u8],
	round: RoundNumber,
) -> Result<Vec<u8>, Error> {
	let pulse = source.pulse(round).await?.ok_or(Error::not_yet_published(round))?;
	Ok(codec.open_encoded(ciphertext, round, &pulse.signature)?)
}
