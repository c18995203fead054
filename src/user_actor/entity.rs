use std::cmp::Ordering;
use std::convert::Infallible;

use chrono::{DateTime, Utc};

use crate::actor_framework::Entity;
use crate::domain::{RegisteredUser, UserCreate};

/// Equality predicates over `registered_users`.
#[derive(Debug, Clone, PartialEq)]
pub enum UserFilter {
    Id(String),
    Phone(String),
}

impl Entity for RegisteredUser {
    type Id = String;
    type CreateParams = UserCreate;
    type Patch = ();
    type Filter = UserFilter;
    /// The ledger is only ever probed by phone, never listed in order.
    type Column = Infallible;

    const TABLE: &'static str = "registered_users";

    fn id(&self) -> &String {
        &self.id
    }

    fn id_filter(id: String) -> UserFilter {
        UserFilter::Id(id)
    }

    /// Creates the ledger row.
    ///
    /// Phone uniqueness is checked by the registration flow before the insert,
    /// not here.
    fn from_create_params(id: String, created_at: DateTime<Utc>, params: UserCreate) -> Result<Self, String> {
        Ok(Self {
            id,
            phone: params.phone,
            name: params.name,
            created_at,
        })
    }

    /// Registered users are never mutated.
    fn on_update(&mut self, _patch: ()) -> Result<(), String> {
        Err(format!("Registered user {} is immutable", self.id))
    }

    fn matches(&self, filter: &UserFilter) -> bool {
        match filter {
            UserFilter::Id(id) => &self.id == id,
            UserFilter::Phone(phone) => &self.phone == phone,
        }
    }

    fn compare_by(&self, _other: &Self, column: Infallible) -> Ordering {
        match column {}
    }
}
