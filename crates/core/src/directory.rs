//! The customer directory: search, sign-up defaults, relation linking, and
//! occasion reminders.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::customer::{Customer, CustomerId, Relation};
use crate::relations::inverse_of;

/// How far ahead occasion reminders look, in days.
pub const UPCOMING_EVENT_WINDOW_DAYS: i64 = 30;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("missing required fields: {}", .missing_fields.join(", "))]
    MissingRequiredFields { missing_fields: Vec<String> },
    #[error("customer `{customer_id}` does not exist")]
    UnknownCustomer { customer_id: CustomerId },
}

/// Sign-up form for a new customer. Everything beyond name and email is
/// optional and can be filled in later through an update.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub birthday: Option<NaiveDate>,
}

/// What the relation pass of an update did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LinkOutcome {
    /// Customer records created for relatives that had none.
    pub created: Vec<CustomerId>,
    /// Existing records that received a back-link.
    pub back_linked: Vec<CustomerId>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Birthday,
    Anniversary,
}

/// An occasion coming up within the reminder window.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingEvent {
    pub kind: EventKind,
    pub date: NaiveDate,
    pub days_until: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDirectory {
    customers: Vec<Customer>,
}

impl CustomerDirectory {
    pub fn new(customers: Vec<Customer>) -> Self {
        Self { customers }
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn find(&self, id: &CustomerId) -> Option<&Customer> {
        self.customers.iter().find(|customer| &customer.id == id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Customer> {
        self.customers.iter().find(|customer| customer.name == name)
    }

    /// Matches name or email case-insensitively, and phone by raw substring.
    /// An empty term matches everyone.
    pub fn search(&self, term: &str) -> Vec<&Customer> {
        let needle = term.to_lowercase();
        self.customers
            .iter()
            .filter(|customer| {
                customer.name.to_lowercase().contains(&needle)
                    || customer.email.to_lowercase().contains(&needle)
                    || customer.phone.as_deref().is_some_and(|phone| phone.contains(term))
            })
            .collect()
    }

    /// Registers a walk-in customer with sign-up defaults. Name and email are
    /// required; a provided birthday overrides the sign-up-date default.
    pub fn add(&mut self, draft: NewCustomer, today: NaiveDate) -> Result<CustomerId, DirectoryError> {
        let mut missing_fields = Vec::new();
        if draft.name.is_empty() {
            missing_fields.push("name".to_string());
        }
        if draft.email.is_empty() {
            missing_fields.push("email".to_string());
        }
        if !missing_fields.is_empty() {
            return Err(DirectoryError::MissingRequiredFields { missing_fields });
        }

        let id = CustomerId::generate();
        let mut customer = Customer::new(id.clone(), draft.name, draft.email, today);
        customer.phone = draft.phone;
        if draft.birthday.is_some() {
            customer.birthday = draft.birthday;
        }
        self.customers.push(customer);
        Ok(id)
    }

    /// Replaces a customer record and runs the relation pass over it.
    ///
    /// For every relation: if a customer with that name exists, the relation
    /// is linked to it and the relative gets a back-link with the inverse
    /// relationship, unless one already points back. If no record exists and
    /// the relation has a birthday, a customer record is created for the
    /// relative with a derived `@family.local` email, no starter discount,
    /// and the back-link as its only relation.
    pub fn update(
        &mut self,
        customer: Customer,
        today: NaiveDate,
    ) -> Result<LinkOutcome, DirectoryError> {
        let position = self
            .customers
            .iter()
            .position(|existing| existing.id == customer.id)
            .ok_or_else(|| DirectoryError::UnknownCustomer { customer_id: customer.id.clone() })?;
        self.customers[position] = customer;

        let updated = self.customers[position].clone();
        let mut outcome = LinkOutcome::default();
        for (index, relation) in updated.relations.iter().enumerate() {
            let existing_id = self
                .customers
                .iter()
                .find(|candidate| candidate.name == relation.name)
                .map(|candidate| candidate.id.clone());
            match existing_id {
                Some(relative_id) => {
                    self.customers[position].relations[index].customer_id =
                        Some(relative_id.clone());
                    let already_linked = self
                        .find(&relative_id)
                        .is_some_and(|relative| relative.has_relation_to(&updated.id));
                    if already_linked {
                        continue;
                    }
                    if let Some(relative) =
                        self.customers.iter_mut().find(|candidate| candidate.id == relative_id)
                    {
                        relative.relations.push(back_link(&updated, relation));
                        outcome.back_linked.push(relative_id);
                    }
                }
                None => {
                    let Some(birthday) = relation.birthday else {
                        continue;
                    };
                    let relative_id = CustomerId::generate();
                    let mut relative = Customer::new(
                        relative_id.clone(),
                        relation.name.clone(),
                        derive_family_email(&relation.name),
                        today,
                    );
                    relative.birthday = Some(birthday);
                    relative.discount_level = rust_decimal::Decimal::ZERO;
                    relative.relations = vec![back_link(&updated, relation)];
                    self.customers.push(relative);
                    self.customers[position].relations[index].customer_id =
                        Some(relative_id.clone());
                    outcome.created.push(relative_id);
                }
            }
        }
        Ok(outcome)
    }

    /// Birthdays and anniversaries within the next
    /// [`UPCOMING_EVENT_WINDOW_DAYS`] days, next occurrence first computed
    /// against `today`.
    pub fn upcoming_events(
        &self,
        customer_id: &CustomerId,
        today: NaiveDate,
    ) -> Result<Vec<UpcomingEvent>, DirectoryError> {
        let customer = self
            .find(customer_id)
            .ok_or_else(|| DirectoryError::UnknownCustomer { customer_id: customer_id.clone() })?;

        let mut events = Vec::new();
        for (kind, date) in [
            (EventKind::Birthday, customer.birthday),
            (EventKind::Anniversary, customer.anniversary),
        ] {
            let Some(date) = date else { continue };
            let Some(next) = next_occurrence(date, today) else { continue };
            let days_until = (next - today).num_days();
            if days_until <= UPCOMING_EVENT_WINDOW_DAYS {
                events.push(UpcomingEvent { kind, date: next, days_until });
            }
        }
        Ok(events)
    }
}

fn back_link(customer: &Customer, relation: &Relation) -> Relation {
    Relation {
        name: customer.name.clone(),
        relationship: inverse_of(&relation.relationship).to_string(),
        birthday: customer.birthday,
        customer_id: Some(customer.id.clone()),
    }
}

fn derive_family_email(name: &str) -> String {
    let slug = name.to_lowercase().split_whitespace().collect::<Vec<_>>().join(".");
    format!("{slug}@family.local")
}

/// The next calendar occurrence of a yearly date. Leap-day dates roll to
/// 1 March in non-leap years.
fn next_occurrence(date: NaiveDate, today: NaiveDate) -> Option<NaiveDate> {
    let in_year = |year: i32| {
        date.with_year(year).or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
    };
    let this_year = in_year(today.year())?;
    if this_year < today {
        in_year(today.year() + 1)
    } else {
        Some(this_year)
    }
}
