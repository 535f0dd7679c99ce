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

//! `PulseGossip` is a libp2p node that ingests drand pulses from the beacon's gossipsub topic
//! and writes the ones that verify into a [`PulseStore`].

use crate::{error::Error, store::PulseStore};
use futures::StreamExt;
use libp2p::{
	gossipsub,
	gossipsub::{
		Behaviour as GossipsubBehaviour, Config as GossipsubConfig, IdentTopic, MessageAuthenticity,
	},
	identity::Keypair,
	swarm::{dial_opts::DialOpts, ConnectionId, Swarm, SwarmEvent},
	Multiaddr, SwarmBuilder,
};
use prost::Message;
use sp_sealed_primitives::Pulse;
use std::collections::HashMap;

const LOG_TARGET: &str = "pulse-gossip";

/// Any free local tcp port
const RAND_LISTEN_ADDR: &str = "/ip4/0.0.0.0/tcp/0";

/// What happened to a single gossiped message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ingested {
	/// A verified pulse for a round not seen before
	Stored(u64),
	/// A verified pulse for a round already in the store
	Duplicate(u64),
	/// Not a pulse, or a pulse that does not verify
	Dropped,
}

/// A gossipsub node feeding a pulse store
pub struct PulseGossip {
	swarm: Swarm<GossipsubBehaviour>,
	store: PulseStore,
}

impl PulseGossip {
	/// Build the node's swarm: tcp transport with noise and yamux, and a gossipsub behaviour
	/// that signs outgoing messages with `key`.
	///
	/// * `key`: The node identity
	/// * `store`: Where verified pulses are written
	/// * `gossipsub_config`: Gossipsub parameters; must accept signed messages
	pub fn new(
		key: &Keypair,
		store: PulseStore,
		gossipsub_config: GossipsubConfig,
	) -> Result<Self, Error> {
		let message_authenticity = MessageAuthenticity::Signed(key.clone());
		let gossipsub = GossipsubBehaviour::new(message_authenticity, gossipsub_config)
			.map_err(|_| Error::InvalidGossipsubNetworkBehaviour)?;
		let swarm = SwarmBuilder::with_existing_identity(key.clone())
			.with_tokio()
			.with_tcp(
				libp2p::tcp::Config::default(),
				libp2p::noise::Config::new,
				libp2p::yamux::Config::default,
			)
			.map_err(|_| Error::TransportFailure)?
			.with_behaviour(|_| gossipsub)
			.map_err(|_| Error::InvalidGossipsubNetworkBehaviour)?
			.build();

		Ok(Self { swarm, store })
	}

	/// Dial `peers`, wait until each connection is up, then ingest pulses from the beacon's topic
	/// until the future is dropped. A dial that fails, synchronously or once attempted, ends the
	/// run with [`Error::PeerUnreachable`].
	///
	/// * `peers`: Relays of the beacon's pubsub topic
	/// * `listen_addr`: Where to listen; any free local tcp port when `None`
	pub async fn run(
		&mut self,
		peers: Vec<&Multiaddr>,
		listen_addr: Option<&Multiaddr>,
	) -> Result<(), Error> {
		let listen_addr = match listen_addr {
			Some(addr) => addr.clone(),
			None => RAND_LISTEN_ADDR.parse().map_err(|_| Error::SwarmListenFailure)?,
		};
		self.swarm.listen_on(listen_addr).map_err(|_| Error::SwarmListenFailure)?;

		let mut pending = HashMap::new();
		for peer in peers {
			let opts = DialOpts::unknown_peer_id().address(peer.clone()).build();
			pending.insert(opts.connection_id(), peer.clone());
			self.swarm.dial(opts).map_err(|_| Error::PeerUnreachable { who: peer.clone() })?;
		}

		self.wait_for_peers(pending).await?;
		let topic = self.store.config().pubsub_topic();
		self.subscribe(&topic).await
	}

	/// Wait until every pending dial has connected; the first failed dial aborts the wait.
	async fn wait_for_peers(
		&mut self,
		mut pending: HashMap<ConnectionId, Multiaddr>,
	) -> Result<(), Error> {
		while !pending.is_empty() {
			match self.swarm.next().await {
				Some(SwarmEvent::ConnectionEstablished { peer_id, connection_id, .. }) => {
					log::debug!(target: LOG_TARGET, "Connected to {:?}", peer_id);
					pending.remove(&connection_id);
				},
				Some(SwarmEvent::OutgoingConnectionError { connection_id, error, .. }) => {
					if let Some(who) = pending.remove(&connection_id) {
						log::warn!(target: LOG_TARGET, "Failed to dial {}: {}", who, error);
						return Err(Error::PeerUnreachable { who });
					}
				},
				Some(_) => {},
				None => return Err(Error::TransportFailure),
			}
		}
		Ok(())
	}

	async fn subscribe(&mut self, topic_str: &str) -> Result<(), Error> {
		let topic = IdentTopic::new(topic_str);

		self.swarm
			.behaviour_mut()
			.subscribe(&topic)
			.map_err(|_| Error::GossipsubSubscriptionFailed)?;
		log::info!(target: LOG_TARGET, "Subscribed to {}", topic_str);

		loop {
			if let Some(SwarmEvent::Behaviour(gossipsub::Event::Message {
				propagation_source,
				message_id,
				message,
			})) = self.swarm.next().await
			{
				log::trace!(
					target: LOG_TARGET,
					"Message {} from peer {:?}",
					message_id,
					propagation_source
				);
				self.handle_message(&message.data);
			}
		}
	}

	/// Decode, verify and store one message.
	pub fn handle_message(&self, data: &[u8]) -> Ingested {
		let pulse = match Pulse::decode(data) {
			Ok(pulse) => pulse,
			Err(e) => {
				log::debug!(target: LOG_TARGET, "Dropping undecodable message: {}", e);
				return Ingested::Dropped;
			},
		};
		let round = pulse.round;

		match self.store.ingest(pulse) {
			Ok(true) => {
				log::info!(target: LOG_TARGET, "Received pulse for round {}", round);
				Ingested::Stored(round)
			},
			Ok(false) => Ingested::Duplicate(round),
			Err(e) => {
				log::warn!(target: LOG_TARGET, "Dropping pulse for round {}: {}", round, e);
				Ingested::Dropped
			},
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::mock::pulse1000;
	use libp2p::gossipsub::{ConfigBuilder, ValidationMode};
	use sp_sealed_primitives::BeaconConfig;
	use std::time::Duration;
	use tokio::time::timeout;

	fn build_node() -> (PulseGossip, PulseStore) {
		let local_identity: Keypair = Keypair::generate_ed25519();
		let store = PulseStore::new(BeaconConfig::quicknet());
		let gossipsub_config = GossipsubConfig::default();
		(PulseGossip::new(&local_identity, store.clone(), gossipsub_config).unwrap(), store)
	}

	fn encoded(round: u64, signature: Vec<u8>) -> Vec<u8> {
		Pulse { round, signature }.encode_to_vec()
	}

	#[tokio::test]
	async fn verified_pulses_are_stored_once() {
		let (node, store) = build_node();
		let data = encoded(1000, pulse1000().signature.to_vec());

		assert_eq!(node.handle_message(&data), Ingested::Stored(1000));
		assert_eq!(node.handle_message(&data), Ingested::Duplicate(1000));
		assert_eq!(store.get(1000).unwrap(), Some(pulse1000()));
	}

	#[tokio::test]
	async fn undecodable_messages_are_dropped() {
		let (node, store) = build_node();
		assert_eq!(node.handle_message(&[0xff, 0xff, 0xff]), Ingested::Dropped);
		assert_eq!(store.len().unwrap(), 0);
	}

	#[tokio::test]
	async fn pulses_that_do_not_verify_are_dropped() {
		let (node, store) = build_node();
		let forged = encoded(1001, pulse1000().signature.to_vec());
		let short = encoded(1000, vec![1; 47]);

		assert_eq!(node.handle_message(&forged), Ingested::Dropped);
		assert_eq!(node.handle_message(&short), Ingested::Dropped);
		assert_eq!(store.latest_round().unwrap(), None);
	}

	#[tokio::test]
	async fn can_fail_on_invalid_gossipsub_network_behaviour() {
		let local_identity: Keypair = Keypair::generate_ed25519();
		let store = PulseStore::new(BeaconConfig::quicknet());

		let gossipsub_config = ConfigBuilder::default()
			.validation_mode(ValidationMode::Anonymous)
			.build()
			.unwrap();

		let result = PulseGossip::new(&local_identity, store, gossipsub_config);
		assert!(
			matches!(result, Err(Error::InvalidGossipsubNetworkBehaviour)),
			"Expected InvalidGossipsubNetworkBehaviour error"
		);
	}

	#[tokio::test]
	async fn can_fail_when_bad_listen_addr_provided() {
		// TEST-NET-3, never assigned to a local interface
		let fake_listen_addr: Multiaddr = "/ip4/203.0.113.1/tcp/0".parse().unwrap();

		let (mut node, _store) = build_node();

		let res = timeout(Duration::from_secs(5), node.run(vec![], Some(&fake_listen_addr)))
			.await
			.expect("listen failure should be reported immediately");
		assert!(matches!(res, Err(Error::SwarmListenFailure)), "Expected SwarmListenFailure error");
	}

	#[tokio::test]
	async fn can_fail_when_peer_refuses_connection() {
		let refused: Multiaddr = "/ip4/127.0.0.1/tcp/1".parse().unwrap();
		let listen_addr: Multiaddr = "/ip4/127.0.0.1/tcp/0".parse().unwrap();

		let (mut node, _store) = build_node();

		let res = timeout(Duration::from_secs(5), node.run(vec![&refused], Some(&listen_addr)))
			.await
			.expect("a refused dial should end the wait for peers");
		assert_eq!(res, Err(Error::PeerUnreachable { who: refused }));
	}
}
