//! [`Reminder`]-related definitions.

use common::{DateTime, Handler as _};
use derive_more::{AsRef, Display, From, Into};
use juniper::{
    graphql_object, GraphQLInputObject, GraphQLObject, GraphQLScalar,
};
use service::{command, domain, query, view};
use uuid::Uuid;

use crate::{api, api::scalar, define_error, AsError, Context, Error};

/// A scheduled task of the agency.
#[derive(Clone, Debug, From)]
pub struct Reminder(domain::Reminder);

/// A scheduled task of the agency.
#[graphql_object(context = Context)]
impl Reminder {
    /// Unique identifier of this `Reminder`.
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// Title of this `Reminder`.
    pub fn title(&self) -> Title {
        self.0.title.clone().into()
    }

    /// Free-form description of this `Reminder`.
    pub fn description(&self) -> Description {
        self.0.description.clone().into()
    }

    /// `DateTime` this `Reminder` is due at.
    pub fn due_at(&self) -> DateTime {
        self.0.due_at.coerce()
    }

    /// Kind of this `Reminder`.
    pub fn kind(&self) -> Kind {
        self.0.kind.into()
    }

    /// Priority of this `Reminder`.
    pub fn priority(&self) -> Priority {
        self.0.priority.into()
    }

    /// Status of this `Reminder`.
    pub fn status(&self) -> Status {
        self.0.status.into()
    }

    /// Bucket of this `Reminder` relative to the current moment.
    ///
    /// `null` if this `Reminder` is not `PENDING`.
    pub fn bucket(&self, ctx: &Context) -> Option<Bucket> {
        view::reminder::Bucket::of(&self.0, &ctx.service().clock())
            .map(Into::into)
    }

    /// `Client` this `Reminder` relates to.
    ///
    /// `null` if not specified, or the `Client` doesn't exist anymore.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Reminder.client",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn client(
        &self,
        ctx: &Context,
    ) -> Result<Option<api::Client>, Error> {
        let Some(id) = self.0.client_id else {
            return Ok(None);
        };
        ctx.service()
            .execute(query::client::ById::by(id))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|c| c.map(Into::into))
    }

    /// `Property` this `Reminder` relates to.
    ///
    /// `null` if not specified, or the `Property` doesn't exist anymore.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Reminder.property",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn property(
        &self,
        ctx: &Context,
    ) -> Result<Option<api::Property>, Error> {
        let Some(id) = self.0.property_id else {
            return Ok(None);
        };
        ctx.service()
            .execute(query::property::ById::by(id))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|p| p.map(Into::into))
    }

    /// `DateTime` when this `Reminder` was created.
    pub fn created_at(&self) -> DateTime {
        self.0.created_at.coerce()
    }
}

/// `Reminder`s grouped for display.
#[derive(Clone, Debug, GraphQLObject)]
#[graphql(name = "ReminderAgenda", context = Context)]
pub struct Agenda {
    /// `PENDING` `Reminder`s whose due moment has already passed.
    pub overdue: Vec<Reminder>,

    /// `PENDING` `Reminder`s due later today.
    pub today: Vec<Reminder>,

    /// `PENDING` `Reminder`s due on a later day.
    pub upcoming: Vec<Reminder>,

    /// `COMPLETED` `Reminder`s.
    pub completed: Vec<Reminder>,
}

impl From<view::Agenda> for Agenda {
    fn from(agenda: view::Agenda) -> Self {
        let into = |rs: Vec<domain::Reminder>| {
            rs.into_iter().map(Reminder).collect::<Vec<_>>()
        };
        Self {
            overdue: into(agenda.overdue),
            today: into(agenda.today),
            upcoming: into(agenda.upcoming),
            completed: into(agenda.completed),
        }
    }
}

/// Counters of `PENDING` `Reminder`s.
#[derive(Clone, Copy, Debug, GraphQLObject)]
#[graphql(name = "ReminderStats")]
pub struct Stats {
    /// Number of `PENDING` `Reminder`s.
    pub pending: i32,

    /// Number of `OVERDUE` ones.
    pub overdue: i32,

    /// Number of ones due later today.
    pub today: i32,

    /// Number of ones due within the next seven days.
    pub this_week: i32,
}

impl From<view::reminder::Stats> for Stats {
    fn from(stats: view::reminder::Stats) -> Self {
        Self {
            pending: api::count(stats.pending),
            overdue: api::count(stats.overdue),
            today: api::count(stats.today),
            this_week: api::count(stats.this_week),
        }
    }
}

/// Attributes of a `Reminder` to be created or updated with.
#[derive(Clone, Debug, GraphQLInputObject)]
#[graphql(name = "ReminderInput")]
pub struct Input {
    /// Title of the `Reminder`.
    pub title: Title,

    /// Free-form description. Empty, if omitted.
    pub description: Option<Description>,

    /// `DateTime` the `Reminder` is due at.
    pub due_at: DateTime,

    /// Kind of the `Reminder`. `CUSTOM`, if omitted.
    pub kind: Option<Kind>,

    /// Priority of the `Reminder`. `MEDIUM`, if omitted.
    pub priority: Option<Priority>,

    /// Status of the `Reminder`. `PENDING`, if omitted.
    pub status: Option<Status>,

    /// ID of the `Client` the `Reminder` relates to.
    pub client_id: Option<api::client::Id>,

    /// ID of the `Property` the `Reminder` relates to.
    pub property_id: Option<api::property::Id>,
}

impl From<Input> for command::reminder::Attributes {
    fn from(input: Input) -> Self {
        use domain::reminder;

        let Input {
            title,
            description,
            due_at,
            kind,
            priority,
            status,
            client_id,
            property_id,
        } = input;
        Self {
            title: title.into(),
            description: description.map(Into::into).unwrap_or_default(),
            due_at: due_at.coerce(),
            kind: kind.map_or(reminder::Kind::Custom, Into::into),
            priority: priority.map_or(reminder::Priority::Medium, Into::into),
            status: status.map_or(reminder::Status::Pending, Into::into),
            client_id: client_id.map(Into::into),
            property_id: property_id.map(Into::into),
        }
    }
}

impl AsError for command::reminder::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::ReminderNotExists(_) => {
                Some(ReminderError::NotExists.into())
            }
        }
    }
}

define_error! {
    enum ReminderError {
        #[code = "REMINDER_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Reminder` with the specified ID does not exist"]
        NotExists,
    }
}

/// Unique identifier of a `Reminder`.
#[derive(Clone, Copy, Debug, Display, Into, From, GraphQLScalar)]
#[from(domain::reminder::Id)]
#[into(domain::reminder::Id)]
#[graphql(name = "ReminderId", transparent)]
pub struct Id(Uuid);

/// Title of a `Reminder`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "ReminderTitle",
    with = scalar::Via::<domain::reminder::Title>,
)]
pub struct Title(domain::reminder::Title);

/// Free-form description of a `Reminder`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "ReminderDescription",
    with = scalar::Via::<domain::reminder::Description>,
)]
pub struct Description(domain::reminder::Description);

mirror_kind! {
    #[doc = "Kind of a `Reminder`."]
    #[graphql(name = "ReminderKind")]
    enum Kind = domain::reminder::Kind {
        #[doc = "Agency contract of a `Property` is about to end."]
        ContractRenewal,
        #[doc = "`Property` viewing."]
        Viewing,
        #[doc = "Follow-up with a `Client`."]
        FollowUp,
        #[doc = "Payment to collect."]
        Payment,
        #[doc = "Anything else."]
        Custom,
    }
}

mirror_kind! {
    #[doc = "Priority of a `Reminder`."]
    #[graphql(name = "ReminderPriority")]
    enum Priority = domain::reminder::Priority {
        #[doc = "Low priority."]
        Low,
        #[doc = "Medium priority."]
        Medium,
        #[doc = "High priority."]
        High,
    }
}

mirror_kind! {
    #[doc = "Status of a `Reminder`."]
    #[graphql(name = "ReminderStatus")]
    enum Status = domain::reminder::Status {
        #[doc = "Awaits an action."]
        Pending,
        #[doc = "Has been acted upon."]
        Completed,
        #[doc = "Has been dismissed without an action."]
        Dismissed,
    }
}

mirror_kind! {
    #[doc = "Bucket of a `PENDING` `Reminder` relative to the current moment."]
    #[graphql(name = "ReminderBucket")]
    enum Bucket = view::reminder::Bucket {
        #[doc = "Due moment has already passed."]
        Overdue,
        #[doc = "Due later today."]
        Today,
        #[doc = "Due on a later day."]
        Upcoming,
    }
}

#[cfg(test)]
mod spec {
    use common::DateTime;
    use service::{command, domain, view};

    use super::{Agenda, Input, Priority, Stats};

    #[test]
    fn defaults_omitted_attributes() {
        let attrs = command::reminder::Attributes::from(Input {
            title: domain::reminder::Title::new("Call back").unwrap().into(),
            description: None,
            due_at: DateTime::now(),
            kind: None,
            priority: Some(Priority::High),
            status: None,
            client_id: None,
            property_id: None,
        });

        assert_eq!(attrs.kind, domain::reminder::Kind::Custom);
        assert_eq!(attrs.priority, domain::reminder::Priority::High);
        assert_eq!(attrs.status, domain::reminder::Status::Pending);
    }

    #[test]
    fn converts_empty_agenda() {
        let agenda = Agenda::from(view::Agenda::default());

        assert!(agenda.overdue.is_empty());
        assert!(agenda.completed.is_empty());
    }

    #[test]
    fn converts_stats() {
        let stats = Stats::from(view::reminder::Stats {
            pending: 4,
            overdue: 1,
            today: 2,
            this_week: 3,
        });

        assert_eq!(stats.pending, 4);
        assert_eq!(stats.this_week, 3);
    }
}
