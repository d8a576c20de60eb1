//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};

use stockroom_app::auth::Identity;

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    /// Attach the caller identity resolved by the authorization gate.
    fn insert_identity(&mut self, identity: Identity);

    /// The identity attached by the authorization gate, if it ran.
    fn identity(&self) -> Option<Identity>;

    fn identity_or_401(&self) -> Result<Identity, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_identity(&mut self, identity: Identity) {
        self.inject(identity);
    }

    fn identity(&self) -> Option<Identity> {
        self.obtain::<Identity>().ok().copied()
    }

    fn identity_or_401(&self) -> Result<Identity, StatusError> {
        self.identity()
            .ok_or_else(|| StatusError::unauthorized().brief("Authentication required"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_round_trips_through_depot() {
        let mut depot = Depot::new();

        assert!(depot.identity().is_none(), "empty depot has no identity");

        depot.insert_identity(Identity::local_admin());

        assert_eq!(depot.identity_or_401().ok(), Some(Identity::local_admin()));
    }

    #[test]
    fn missing_identity_is_unauthorized() {
        let depot = Depot::new();

        let error = depot.identity_or_401().err();

        assert_eq!(
            error.map(|error| error.code),
            Some(salvo::http::StatusCode::UNAUTHORIZED)
        );
    }
}
