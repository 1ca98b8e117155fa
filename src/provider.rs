//! Remote data providers.
//!
//! A [`Resource`] owns the fetch state of one remote collection. It never
//! talks to the network itself: starting a fetch hands back a [`Ticket`],
//! the caller performs the request, and the outcome comes back through
//! [`Resource::settle`]. Tickets carry a monotonically increasing sequence
//! number and a response is only applied when its number is higher than
//! every response applied before it, so a superseded request can never
//! overwrite fresher data.
//!
//! ```
//! use std::sync::Arc;
//! use pawshop::provider::{CategoryProvider, FetchState};
//! use pawshop::models::Category;
//!
//! let mut provider = CategoryProvider::new("categories");
//! let ticket = provider.fetch().expect("nothing in flight yet");
//! assert!(provider.state().is_loading());
//!
//! // a second refresh joins the outstanding request
//! assert!(provider.refetch().is_none());
//!
//! let cats: Arc<[Category]> = vec![Category::new("dogs", "Dogs")].into();
//! assert!(provider.settle(ticket, Ok(cats)));
//! assert!(matches!(provider.state(), FetchState::Success(c) if c.len() == 1));
//! ```

use std::sync::Arc;

use crate::api::ApiError;
use crate::models::{Banner, Category, GridLayout, Product};

/// State of a remote fetch
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FetchState<T> {
    /// Nothing requested yet
    #[default]
    Idle,
    /// A request is outstanding
    Loading,
    /// The last request failed; the message is user-presentable
    Error(String),
    /// The last request succeeded
    Success(T),
}

impl<T> FetchState<T> {
    /// Whether a request is outstanding
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// The fetched value, if the last request succeeded
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Success(value) => Some(value),
            _ => None,
        }
    }
}

/// Why a fetch was started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// First load, or a load nobody asked for explicitly
    Initial,
    /// User asked for fresh data (refresh, retry)
    Refresh,
    /// Request parameters changed; supersedes anything in flight
    Invalidate,
}

/// Handle for one network request.
///
/// Must be passed back to [`Resource::settle`] together with the outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    seq: u64,
    trigger: Trigger,
}

impl Ticket {
    /// Sequence number of the request
    pub const fn seq(&self) -> u64 {
        self.seq
    }

    /// What started the request
    pub const fn trigger(&self) -> Trigger {
        self.trigger
    }
}

/// Fetch state of one remote collection
#[derive(Debug)]
pub struct Resource<T> {
    name: &'static str,
    state: FetchState<T>,
    /// Last successful value, kept visible while a refresh is outstanding
    last_good: Option<T>,
    issued: u64,
    applied: u64,
    in_flight: Option<Ticket>,
    closed: bool,
}

/// Provider for the category collection
pub type CategoryProvider = Resource<Arc<[Category]>>;
/// Provider for home banners
pub type BannerProvider = Resource<Arc<[Banner]>>;
/// Provider for the home grid layout
pub type LayoutProvider = Resource<Arc<GridLayout>>;
/// Provider for one list of product recommendations
pub type ProductProvider = Resource<Arc<[Product]>>;

impl<T: Clone> Resource<T> {
    /// Create an idle provider. `name` only appears in logs.
    pub const fn new(name: &'static str) -> Self {
        Self::starting_after(name, 0)
    }

    /// Create an idle provider whose first ticket is numbered after `seq`.
    ///
    /// Tickets issued by an earlier provider for the same data, up to
    /// `seq`, are then rejected by [`settle`](Self::settle).
    pub const fn starting_after(name: &'static str, seq: u64) -> Self {
        Self {
            name,
            state: FetchState::Idle,
            last_good: None,
            issued: seq,
            applied: seq,
            in_flight: None,
            closed: false,
        }
    }

    /// Sequence number of the most recently issued ticket
    pub const fn last_issued(&self) -> u64 {
        self.issued
    }

    /// Current fetch state
    pub const fn state(&self) -> &FetchState<T> {
        &self.state
    }

    /// Last successful value, even while a newer request is outstanding
    pub const fn last_good(&self) -> Option<&T> {
        self.last_good.as_ref()
    }

    /// Whether any request is outstanding
    pub const fn in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Whether a user-initiated refresh is outstanding
    pub fn is_refreshing(&self) -> bool {
        self.in_flight
            .is_some_and(|t| t.trigger == Trigger::Refresh)
    }

    /// Whether the provider has been torn down
    pub const fn is_closed(&self) -> bool {
        self.closed
    }

    /// Start the initial fetch.
    ///
    /// Returns `None` when a request is already outstanding or the
    /// provider is closed; the caller then issues no network call.
    pub fn fetch(&mut self) -> Option<Ticket> {
        self.begin(Trigger::Initial)
    }

    /// Start a user-initiated refetch.
    ///
    /// Overlapping calls join the outstanding request.
    pub fn refetch(&mut self) -> Option<Ticket> {
        self.begin(Trigger::Refresh)
    }

    /// Start a request that supersedes whatever is outstanding
    pub fn invalidate(&mut self) -> Option<Ticket> {
        self.begin(Trigger::Invalidate)
    }

    fn begin(&mut self, trigger: Trigger) -> Option<Ticket> {
        if self.closed {
            return None;
        }

        if let Some(current) = self.in_flight.as_mut() {
            if trigger != Trigger::Invalidate {
                // A refresh joining an initial load still counts as a refresh.
                if trigger == Trigger::Refresh {
                    current.trigger = Trigger::Refresh;
                }
                tracing::debug!(resource = self.name, seq = current.seq, "joined in-flight request");
                return None;
            }
        }

        self.issued += 1;
        let ticket = Ticket {
            seq: self.issued,
            trigger,
        };
        self.in_flight = Some(ticket);
        self.state = FetchState::Loading;
        tracing::debug!(resource = self.name, seq = ticket.seq, ?trigger, "request issued");
        Some(ticket)
    }

    /// Apply the outcome of a request.
    ///
    /// Returns `false` when the outcome was discarded: the provider is
    /// closed, or a response with a higher sequence number was already
    /// applied.
    pub fn settle(&mut self, ticket: Ticket, outcome: Result<T, ApiError>) -> bool {
        if self.closed {
            tracing::debug!(resource = self.name, seq = ticket.seq, "discarded after close");
            return false;
        }
        if ticket.seq <= self.applied || ticket.seq > self.issued {
            tracing::debug!(
                resource = self.name,
                seq = ticket.seq,
                applied = self.applied,
                "discarded stale response"
            );
            return false;
        }

        self.applied = ticket.seq;
        let superseded = self.in_flight.is_some_and(|t| t.seq > ticket.seq);
        if !superseded {
            self.in_flight = None;
        }

        match outcome {
            Ok(value) => {
                tracing::debug!(resource = self.name, seq = ticket.seq, "request succeeded");
                self.last_good = Some(value.clone());
                self.state = if superseded {
                    FetchState::Loading
                } else {
                    FetchState::Success(value)
                };
            }
            Err(err) => {
                tracing::warn!(
                    resource = self.name,
                    seq = ticket.seq,
                    kind = err.kind(),
                    error = %err,
                    "request failed"
                );
                self.state = if superseded {
                    FetchState::Loading
                } else {
                    FetchState::Error(err.user_message().to_string())
                };
            }
        }
        true
    }

    /// Tear the provider down. Later outcomes are discarded.
    pub fn close(&mut self) {
        self.closed = true;
        self.in_flight = None;
    }
}
