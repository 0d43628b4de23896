//! CRUD over subscriptions plus dashboard stats.
//!
//! Status is snapshotted on create and whenever `renewal_date` changes, and
//! recomputed from the renewal date on every read.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::clock::{Clock, SystemClock};
use crate::dashboard;
use crate::errors::{SubtrackError, SubtrackResult};
use crate::models::{DashboardStats, NewSubscription, Subscription, SubscriptionPatch};
use crate::status::status_for_renewal_date;
use crate::traits::ISubscriptionStorage;

#[derive(Clone)]
pub struct SubscriptionLedger {
    subscriptions: Arc<dyn ISubscriptionStorage>,
    clock: Arc<dyn Clock>,
}

impl SubscriptionLedger {
    pub fn new(subscriptions: Arc<dyn ISubscriptionStorage>) -> Self {
        Self::with_clock(subscriptions, Arc::new(SystemClock))
    }

    pub fn with_clock(subscriptions: Arc<dyn ISubscriptionStorage>, clock: Arc<dyn Clock>) -> Self {
        Self {
            subscriptions,
            clock,
        }
    }

    pub fn create(&self, new_sub: NewSubscription, created_by: &str) -> SubtrackResult<Subscription> {
        let now = self.clock.now();
        let status = status_for_renewal_date(&new_sub.renewal_date, now.date_naive());

        let sub = Subscription {
            id: Uuid::new_v4().to_string(),
            client_name: new_sub.client_name,
            business_name: new_sub.business_name,
            client_email: new_sub.client_email,
            client_phone: new_sub.client_phone,
            price: new_sub.price,
            paid_date: new_sub.paid_date,
            renewal_date: new_sub.renewal_date,
            duration: new_sub.duration,
            subscription_type: new_sub.subscription_type,
            category: new_sub.category,
            notes: new_sub.notes,
            status,
            created_by: created_by.to_string(),
            created_at: now,
            updated_at: now,
        };

        self.subscriptions.insert_subscription(&sub)?;
        info!(subscription_id = %sub.id, status = %sub.status, "subscription created");
        Ok(sub)
    }

    /// All subscriptions with freshly derived status.
    pub fn list(&self) -> SubtrackResult<Vec<Subscription>> {
        let today = self.clock.today();
        let mut subs = self.subscriptions.list_subscriptions()?;
        for sub in &mut subs {
            sub.status = status_for_renewal_date(&sub.renewal_date, today);
        }
        Ok(subs)
    }

    pub fn get(&self, id: &str) -> SubtrackResult<Subscription> {
        let mut sub = self
            .subscriptions
            .get_subscription(id)?
            .ok_or_else(|| SubtrackError::subscription_not_found(id))?;
        sub.status = status_for_renewal_date(&sub.renewal_date, self.clock.today());
        Ok(sub)
    }

    /// Apply a partial update and return the stored record.
    ///
    /// `status` is recomputed only when the patch carries `renewal_date`;
    /// otherwise the stored snapshot is returned untouched.
    pub fn update(&self, id: &str, patch: SubscriptionPatch) -> SubtrackResult<Subscription> {
        let mut sub = self
            .subscriptions
            .get_subscription(id)?
            .ok_or_else(|| SubtrackError::subscription_not_found(id))?;

        if patch.is_empty() {
            return Ok(sub);
        }

        let now = self.clock.now();
        patch.apply(&mut sub);
        if patch.touches_renewal_date() {
            sub.status = status_for_renewal_date(&sub.renewal_date, now.date_naive());
        }
        sub.updated_at = now;

        if !self.subscriptions.update_subscription(&sub)? {
            return Err(SubtrackError::subscription_not_found(id));
        }

        info!(subscription_id = %id, status = %sub.status, "subscription updated");
        Ok(sub)
    }

    pub fn delete(&self, id: &str) -> SubtrackResult<()> {
        if !self.subscriptions.delete_subscription(id)? {
            return Err(SubtrackError::subscription_not_found(id));
        }
        info!(subscription_id = %id, "subscription deleted");
        Ok(())
    }

    pub fn dashboard_stats(&self) -> SubtrackResult<DashboardStats> {
        let dates = self.subscriptions.list_renewal_dates()?;
        Ok(dashboard::aggregate(
            dates.iter().map(String::as_str),
            self.clock.today(),
        ))
    }
}
