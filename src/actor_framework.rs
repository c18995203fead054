use std::cmp::Ordering;
use std::fmt::{Debug, Display};
use std::hash::Hash;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument, warn};

// =============================================================================
// 1. THE ABSTRACTION (Rows, Filters, Columns)
// =============================================================================

/// Trait that any table row must implement to be stored by [`ResourceActor`].
pub trait Entity: Clone + Debug + Send + Sync + 'static {
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;
    type CreateParams: Send + Sync + Debug;
    type Patch: Clone + Send + Sync + Debug;
    /// Equality predicate on one named column.
    type Filter: Send + Sync + Debug;
    /// Columns a select may be ordered by.
    type Column: Copy + Send + Sync + Debug;

    /// Logical table name, used for tracing.
    const TABLE: &'static str;

    fn id(&self) -> &Self::Id;

    /// Filter selecting exactly the row with this id.
    fn id_filter(id: Self::Id) -> Self::Filter;

    /// Construct the stored row from a generated id, the server timestamp and the payload.
    fn from_create_params(
        id: Self::Id,
        created_at: DateTime<Utc>,
        params: Self::CreateParams,
    ) -> Result<Self, String>;

    fn on_update(&mut self, patch: Self::Patch) -> Result<(), String>;

    fn on_delete(&self) -> Result<(), String> {
        Ok(())
    }

    fn matches(&self, filter: &Self::Filter) -> bool;

    fn compare_by(&self, other: &Self, column: Self::Column) -> Ordering;
}

/// Sort direction for a select.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderBy<C> {
    pub column: C,
    pub direction: Direction,
}

/// A select: optional equality filter plus optional ordering.
#[derive(Debug)]
pub struct Query<F, C> {
    pub filter: Option<F>,
    pub order_by: Option<OrderBy<C>>,
}

impl<F, C> Default for Query<F, C> {
    fn default() -> Self {
        Self {
            filter: None,
            order_by: None,
        }
    }
}

impl<F, C> Query<F, C> {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: F) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn ascending(mut self, column: C) -> Self {
        self.order_by = Some(OrderBy {
            column,
            direction: Direction::Ascending,
        });
        self
    }

    pub fn descending(mut self, column: C) -> Self {
        self.order_by = Some(OrderBy {
            column,
            direction: Direction::Descending,
        });
        self
    }
}

pub type TableQuery<T> = Query<<T as Entity>::Filter, <T as Entity>::Column>;

/// Errors raised by the table plumbing itself.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped")]
    ActorDropped,
    #[error("Row rejected: {0}")]
    Rejected(String),
    #[error("Backend error: {0}")]
    Backend(String),
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    Insert {
        params: T::CreateParams,
        respond_to: Response<T>,
    },
    Select {
        query: TableQuery<T>,
        respond_to: Response<Vec<T>>,
    },
    Update {
        filter: T::Filter,
        patch: T::Patch,
        respond_to: Response<usize>,
    },
    Delete {
        filter: T::Filter,
        respond_to: Response<Vec<T>>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

type Clock = Box<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Owns one table. Rows keep insertion order so unordered selects are stable.
pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    rows: Vec<T>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
    clock: Clock,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            rows: Vec::new(),
            next_id_fn: Box::new(next_id_fn),
            clock: Box::new(Utc::now),
        };
        (actor, ResourceClient::new(sender))
    }

    /// Replace the server clock that stamps `created_at` on insert.
    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    #[instrument(name = "resource_actor", skip(self), fields(table = T::TABLE))]
    pub async fn run(mut self) {
        debug!("Table actor starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Insert { params, respond_to } => {
                    let _ = respond_to.send(self.handle_insert(params));
                }
                ResourceRequest::Select { query, respond_to } => {
                    let _ = respond_to.send(Ok(self.handle_select(query)));
                }
                ResourceRequest::Update {
                    filter,
                    patch,
                    respond_to,
                } => {
                    let _ = respond_to.send(self.handle_update(filter, patch));
                }
                ResourceRequest::Delete { filter, respond_to } => {
                    let _ = respond_to.send(self.handle_delete(filter));
                }
            }
        }
        debug!("Table actor stopped");
    }

    fn handle_insert(&mut self, params: T::CreateParams) -> Result<T, FrameworkError> {
        let id = (self.next_id_fn)();
        let row = T::from_create_params(id, (self.clock)(), params).map_err(|e| {
            warn!(error = %e, "Insert rejected");
            FrameworkError::Rejected(e)
        })?;
        self.rows.push(row.clone());
        debug!(id = %row.id(), "Row inserted");
        Ok(row)
    }

    fn handle_select(&self, query: TableQuery<T>) -> Vec<T> {
        let mut rows: Vec<T> = match &query.filter {
            Some(filter) => self.rows.iter().filter(|r| r.matches(filter)).cloned().collect(),
            None => self.rows.clone(),
        };
        if let Some(order_by) = query.order_by {
            rows.sort_by(|a, b| {
                let ordering = a.compare_by(b, order_by.column);
                match order_by.direction {
                    Direction::Ascending => ordering,
                    Direction::Descending => ordering.reverse(),
                }
            });
        }
        rows
    }

    /// Patches every matching row, or none of them if any patch is rejected.
    fn handle_update(&mut self, filter: T::Filter, patch: T::Patch) -> Result<usize, FrameworkError> {
        let mut staged = Vec::new();
        for (index, row) in self.rows.iter().enumerate() {
            if row.matches(&filter) {
                let mut updated = row.clone();
                updated
                    .on_update(patch.clone())
                    .map_err(FrameworkError::Rejected)?;
                staged.push((index, updated));
            }
        }
        let count = staged.len();
        for (index, updated) in staged {
            self.rows[index] = updated;
        }
        debug!(count, "Rows updated");
        Ok(count)
    }

    fn handle_delete(&mut self, filter: T::Filter) -> Result<Vec<T>, FrameworkError> {
        for row in self.rows.iter().filter(|r| r.matches(&filter)) {
            row.on_delete().map_err(FrameworkError::Rejected)?;
        }
        let (deleted, kept): (Vec<T>, Vec<T>) =
            self.rows.drain(..).partition(|r| r.matches(&filter));
        self.rows = kept;
        debug!(count = deleted.len(), "Rows deleted");
        Ok(deleted)
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

#[derive(Clone)]
pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: Entity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn insert(&self, params: T::CreateParams) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Insert { params, respond_to })
            .await
    }

    pub async fn select(&self, query: TableQuery<T>) -> Result<Vec<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Select { query, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        let rows = self.select(Query::all().filter(T::id_filter(id))).await?;
        Ok(rows.into_iter().next())
    }

    pub async fn update(&self, filter: T::Filter, patch: T::Patch) -> Result<usize, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Update {
            filter,
            patch,
            respond_to,
        })
        .await
    }

    pub async fn delete(&self, filter: T::Filter) -> Result<Vec<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Delete { filter, respond_to })
            .await
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================
