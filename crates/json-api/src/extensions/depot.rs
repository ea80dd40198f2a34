//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::Depot;

use tantika_app::auth::Actor;

use crate::envelope::ApiError;

const ACTOR_DEPOT_KEY: &str = "actor";

/// Helpers for reading request-scoped values out of the depot.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, ApiError>;

    fn insert_actor(&mut self, actor: Actor);

    /// The signed-in caller, if the request carried a valid session.
    fn actor(&self) -> Option<Actor>;

    fn actor_or_401(&self) -> Result<Actor, ApiError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, ApiError> {
        self.obtain::<T>().map_err(|_ignored| {
            ApiError::internal("missing depot value", std::any::type_name::<T>())
        })
    }

    fn insert_actor(&mut self, actor: Actor) {
        self.insert(ACTOR_DEPOT_KEY, actor);
    }

    fn actor(&self) -> Option<Actor> {
        self.get::<Actor>(ACTOR_DEPOT_KEY).ok().copied()
    }

    fn actor_or_401(&self) -> Result<Actor, ApiError> {
        self.actor()
            .ok_or_else(|| ApiError::unauthorized("Authentication required"))
    }
}
