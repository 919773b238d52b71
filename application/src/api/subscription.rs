//! GraphQL [`Subscription`]s definitions.

use futures::stream::{self, BoxStream, StreamExt as _};
use juniper::graphql_subscription;
use service::domain;
use tokio::sync::broadcast::error::RecvError;

use crate::{Context, Error};

/// Root of all GraphQL subscription.
#[derive(Clone, Copy, Debug)]
pub struct Subscription;

#[graphql_subscription(context = Context)]
impl Subscription {
    /// Notifies about every change of the stored entities, carrying the
    /// `EntityKind` of the changed one.
    ///
    /// Clients are expected to refetch the affected lists on each event.
    /// Events missed by a slow client are skipped silently.
    pub async fn invalidations(
        &self,
        ctx: &Context,
    ) -> Result<BoxStream<'static, Result<EntityKind, Error>>, Error> {
        let rx = ctx.service().subscribe();
        Ok(stream::unfold(rx, |mut rx| async move {
            loop {
                match rx.recv().await {
                    Ok(kind) => return Some((Ok(kind.into()), rx)),
                    Err(RecvError::Lagged(n)) => {
                        tracing::debug!(
                            "subscriber lagged behind {n} invalidations",
                        );
                    }
                    Err(RecvError::Closed) => return None,
                }
            }
        })
        .boxed())
    }
}

mirror_kind! {
    #[doc = "Kind of a stored entity."]
    #[graphql(name = "EntityKind")]
    enum EntityKind = domain::EntityKind {
        #[doc = "`Property` entity."]
        Property,
        #[doc = "`Client` entity."]
        Client,
        #[doc = "`Commission` entity."]
        Commission,
        #[doc = "`Interaction` entity."]
        Interaction,
        #[doc = "`Reminder` entity."]
        Reminder,
    }
}
