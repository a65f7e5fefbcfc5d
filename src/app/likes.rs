use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::app::feed::FeedMirror;
use crate::domain::post::Like;
use crate::error::ClientError;
use crate::infra::api::ApiClient;
use crate::infra::bus::{EventBus, Topic};
use crate::infra::session::Session;

/// One outstanding like round-trip for a single post. `desired` is the
/// latest user intent (membership of the signed-in user in the like set);
/// `original` is the like set from before the first toggle of the flight,
/// kept for exact rollback.
struct Flight {
    desired: bool,
    original: Vec<Like>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// This call dispatched the request(s) and reconciled the mirror.
    Applied,
    /// A request for this post was already in flight; the intent was
    /// recorded and will be honored when that request resolves.
    Coalesced,
}

/// Makes the like action feel instantaneous while staying eventually
/// correct: flip the local prediction at once, keep at most one request in
/// flight per post, and reconcile with the authoritative like set from the
/// response — or roll back exactly on failure.
#[derive(Clone)]
pub struct LikeCoordinator {
    api: ApiClient,
    mirror: FeedMirror,
    bus: EventBus,
    session: Session,
    flights: Arc<Mutex<HashMap<String, Flight>>>,
}

impl LikeCoordinator {
    pub fn new(api: ApiClient, mirror: FeedMirror, bus: EventBus, session: Session) -> Self {
        Self {
            api,
            mirror,
            bus,
            session,
            flights: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub async fn toggle(&self, post_id: &str) -> Result<ToggleOutcome, ClientError> {
        let user = self
            .session
            .current_user()
            .ok_or(ClientError::Unauthenticated)?;

        // Flip the prediction, then either join the live flight for this
        // post or open a new one. Lock order is flights before mirror,
        // here and in `drive`.
        {
            let mut flights = self.flights.lock().expect("flight lock");
            if flights.contains_key(post_id) {
                match self.mirror.flip_like(post_id, &user.id) {
                    Some(desired) => {
                        if let Some(flight) = flights.get_mut(post_id) {
                            flight.desired = desired;
                        }
                        debug!(post_id, desired, "like intent coalesced into live flight");
                        return Ok(ToggleOutcome::Coalesced);
                    }
                    None => {
                        // The post left the mirror mid-flight; drop the
                        // flight so its response settles against nothing.
                        flights.remove(post_id);
                        return Err(ClientError::validation("unknown post"));
                    }
                }
            }

            let original = match self.mirror.find_by_id(post_id) {
                Some(post) => post.likes,
                None => return Err(ClientError::validation("unknown post")),
            };
            let desired = match self.mirror.flip_like(post_id, &user.id) {
                Some(desired) => desired,
                None => return Err(ClientError::validation("unknown post")),
            };
            flights.insert(post_id.to_string(), Flight { desired, original });
        }

        match self.drive(post_id, &user.id).await {
            Ok(()) => Ok(ToggleOutcome::Applied),
            Err(err) => {
                self.roll_back(post_id);
                Err(err)
            }
        }
    }

    /// Send toggle requests until the flight settles. A response settles
    /// the flight when the intent it was dispatched for is still current,
    /// or when the authoritative like set already matches a changed
    /// intent; either way the authoritative set replaces the prediction,
    /// even when the server disagreed with it. A second request goes out
    /// only when the user re-toggled mid-flight and the response landed on
    /// the wrong side of that newer intent.
    async fn drive(&self, post_id: &str, user_id: &str) -> Result<(), ClientError> {
        loop {
            let dispatched = {
                let flights = self.flights.lock().expect("flight lock");
                match flights.get(post_id) {
                    Some(flight) => flight.desired,
                    None => return Ok(()),
                }
            };

            let likes = self.api.toggle_like(post_id).await?;
            let confirmed = likes.iter().any(|like| like.user_id() == user_id);

            let settled = {
                let mut flights = self.flights.lock().expect("flight lock");
                let desired = match flights.get(post_id) {
                    Some(flight) => flight.desired,
                    None => return Ok(()),
                };
                if desired == dispatched || desired == confirmed {
                    self.mirror.set_likes(post_id, likes);
                    flights.remove(post_id);
                    true
                } else {
                    false
                }
            };

            if settled {
                self.bus.emit(Topic::PostsChanged);
                return Ok(());
            }
            debug!(post_id, "intent changed mid-flight, sending coalesced toggle");
        }
    }

    /// Restore the like set from before the first toggle of the flight.
    fn roll_back(&self, post_id: &str) {
        let flight = self.flights.lock().expect("flight lock").remove(post_id);
        if let Some(flight) = flight {
            self.mirror.set_likes(post_id, flight.original);
            self.bus.emit(Topic::PostsChanged);
        }
    }
}
