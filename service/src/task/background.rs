//! Background environment for running [`Task`]s.

use std::{
    error::Error,
    future::{Future, IntoFuture},
    iter,
};

use derive_more::Display;
use futures::{
    future::{self, LocalBoxFuture},
    FutureExt as _, TryFutureExt as _,
};
use tokio::task;
use tracing as log;

#[cfg(doc)]
use crate::Task;

/// Type-erased error of a [`Task`].
type BoxError = Box<dyn Error + 'static>;

/// Background environment for running [`Task`]s on the current thread.
#[derive(Debug, Default)]
pub struct Background {
    /// Local set of [`Task`]s.
    set: task::LocalSet,

    /// Names and handles of the spawned [`Task`]s.
    handles: Vec<(&'static str, task::JoinHandle<Result<(), BoxError>>)>,
}

impl Background {
    /// Spawns a new [`Task`] with the provided `name` inside this
    /// [`Background`] environment.
    pub fn spawn<F, E>(&mut self, name: &'static str, future: F)
    where
        F: Future<Output = Result<(), E>> + 'static,
        E: Error + 'static,
    {
        log::debug!("spawning `{name}` background task");
        let handle = self
            .set
            .spawn_local(future.map_err(|e| BoxError::from(Box::new(e))));
        self.handles.push((name, handle));
    }

    /// Returns the number of [`Task`]s spawned in this [`Background`]
    /// environment.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Indicates whether no [`Task`]s were spawned in this [`Background`]
    /// environment.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

impl IntoFuture for Background {
    type Output = Result<(), Failure>;
    type IntoFuture = LocalBoxFuture<'static, Self::Output>;

    /// Runs all the spawned [`Task`]s until they complete, or until any of
    /// them fails.
    fn into_future(self) -> Self::IntoFuture {
        let Self { set, handles } = self;
        future::try_join_all(iter::once(set.map(Ok).boxed_local()).chain(
            handles.into_iter().map(|(task, h)| {
                h.map(move |r| {
                    let source = match r {
                        Ok(Ok(())) => return Ok(()),
                        Ok(Err(e)) => e,
                        Err(e) => BoxError::from(Box::new(e)),
                    };
                    Err(Failure { task, source })
                })
                .boxed_local()
            }),
        ))
        .map_ok(drop)
        .boxed_local()
    }
}

/// Failure of a [`Task`] running in a [`Background`] environment.
#[derive(Debug, Display)]
#[display("`{task}` background task failed: {source}")]
pub struct Failure {
    /// Name of the failed [`Task`].
    pub task: &'static str,

    /// Error the [`Task`] failed with.
    pub source: BoxError,
}

impl Error for Failure {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&*self.source)
    }
}

#[cfg(test)]
mod spec {
    use std::{fmt, future::IntoFuture as _};

    use super::Background;

    #[derive(Debug)]
    struct Broken;

    impl fmt::Display for Broken {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("broken")
        }
    }

    impl std::error::Error for Broken {}

    #[tokio::test]
    async fn completes_when_tasks_complete() {
        let mut bg = Background::default();
        bg.spawn("noop", async { Ok::<_, Broken>(()) });
        bg.spawn("other", async { Ok::<_, Broken>(()) });

        assert_eq!(bg.len(), 2);
        assert!(bg.into_future().await.is_ok());
    }

    #[tokio::test]
    async fn reports_failed_task_name() {
        let mut bg = Background::default();
        bg.spawn("failing", async { Err::<(), _>(Broken) });

        let err = bg.into_future().await.unwrap_err();

        assert_eq!(err.task, "failing");
        assert_eq!(
            err.to_string(),
            "`failing` background task failed: broken",
        );
    }

    #[tokio::test]
    async fn empty_background_completes() {
        let bg = Background::default();

        assert!(bg.is_empty());
        assert!(bg.into_future().await.is_ok());
    }
}
