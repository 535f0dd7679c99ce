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

use libp2p::Multiaddr;
use sp_sealed_primitives::{ListingId, RoundNumber};

/// Errors raised by the client services and flows
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Primitives(#[from] sp_sealed_primitives::Error),
	#[error("Listing {0} does not exist.")]
	ListingNotFound(ListingId),
	#[error("The key for listing {0} has not been revealed.")]
	KeyNotRevealed(ListingId),
	#[error("The secrets do not open the commitment of listing {0}.")]
	CommitmentMismatch(ListingId),
	#[error("The ledger rejected the request: {0}")]
	Ledger(String),
	#[error("The content store failed: {0}")]
	Storage(String),
	#[error("The pulse for round {0} was pruned from the store.")]
	PulsePruned(RoundNumber),
	#[error("The beacon configuration could not be loaded: {0}")]
	Config(String),
	/// The provided gossipsub behaviour is invalid
	#[error("The gossipsub behaviour is invalid.")]
	InvalidGossipsubNetworkBehaviour,
	#[error("The libp2p transport could not be built.")]
	TransportFailure,
	/// The peer could not be dialed.
	#[error("The peer {who} is unreachable.")]
	PeerUnreachable { who: Multiaddr },
	/// The swarm could not listen on the given port
	#[error("The swarm could not listen on the given address.")]
	SwarmListenFailure,
	/// The swarm could not subscribe to the topic.
	#[error("The swarm could not subscribe to the topic.")]
	GossipsubSubscriptionFailed,
	/// The Mutex is locked and can not be accessed.
	#[error("The shared state is locked.")]
	StateLocked,
}

impl Error {
	/// Whether the failure only means the beacon has not reached the round yet
	pub fn is_not_yet_published(&self) -> bool {
		matches!(self, Self::Primitives(sp_sealed_primitives::Error::RoundNotYetPublished(_)))
	}

	pub(crate) fn not_yet_published(round: RoundNumber) -> Self {
		Self::Primitives(sp_sealed_primitives::Error::RoundNotYetPublished(round))
	}
}
