//! Subscription records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

labelled_enum! {
    /// Lifecycle status derived from the renewal date. See [`crate::status`].
    pub enum SubscriptionStatus {
        Expired => "Expired",
        ExpiringToday => "Expiring Today",
        ExpiringSoon => "Expiring Soon",
        Active => "Active",
        Upcoming => "Upcoming",
    }
}

labelled_enum! {
    pub enum DurationLabel {
        Monthly => "Monthly",
        ThreeMonths => "3 Months",
        SixMonths => "6 Months",
        OneYear => "1 Year",
        TwoYears => "2 Years",
        ThreeYears => "3 Years",
    }
}

labelled_enum! {
    pub enum SubscriptionType {
        Personal => "Personal",
        Client => "Client",
        Official => "Official",
    }
}

labelled_enum! {
    pub enum Category {
        Domain => "Domain",
        HostingPlatform => "Hosting Platform",
        WhatsAppApi => "WhatsApp API",
        Ssl => "SSL",
        CloudService => "Cloud Service",
        Others => "Others",
    }
}

/// A tracked subscription.
///
/// `paid_date` and `renewal_date` are kept as the `YYYY-MM-DD` strings they
/// were submitted as; a malformed renewal date is tolerated and resolves to
/// `Active` when the status is derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: String,
    pub client_name: String,
    pub business_name: String,
    pub client_email: Option<String>,
    pub client_phone: Option<String>,
    pub price: f64,
    pub paid_date: String,
    pub renewal_date: String,
    pub duration: DurationLabel,
    #[serde(rename = "type")]
    pub subscription_type: SubscriptionType,
    pub category: Category,
    pub notes: Option<String>,
    pub status: SubscriptionStatus,
    /// Id of the user who created the record. Back-reference only.
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Creation payload.
#[derive(Debug, Clone, Deserialize)]
pub struct NewSubscription {
    pub client_name: String,
    pub business_name: String,
    #[serde(default)]
    pub client_email: Option<String>,
    #[serde(default)]
    pub client_phone: Option<String>,
    pub price: f64,
    pub paid_date: String,
    pub renewal_date: String,
    pub duration: DurationLabel,
    #[serde(rename = "type")]
    pub subscription_type: SubscriptionType,
    pub category: Category,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Partial update. `None` (absent or `null`) fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SubscriptionPatch {
    pub client_name: Option<String>,
    pub business_name: Option<String>,
    pub client_email: Option<String>,
    pub client_phone: Option<String>,
    pub price: Option<f64>,
    pub paid_date: Option<String>,
    pub renewal_date: Option<String>,
    pub duration: Option<DurationLabel>,
    #[serde(rename = "type")]
    pub subscription_type: Option<SubscriptionType>,
    pub category: Option<Category>,
    pub notes: Option<String>,
}

impl SubscriptionPatch {
    pub fn is_empty(&self) -> bool {
        self.client_name.is_none()
            && self.business_name.is_none()
            && self.client_email.is_none()
            && self.client_phone.is_none()
            && self.price.is_none()
            && self.paid_date.is_none()
            && self.renewal_date.is_none()
            && self.duration.is_none()
            && self.subscription_type.is_none()
            && self.category.is_none()
            && self.notes.is_none()
    }

    pub fn touches_renewal_date(&self) -> bool {
        self.renewal_date.is_some()
    }

    /// Copy every present field onto `sub`. Leaves `status` and timestamps alone.
    pub fn apply(&self, sub: &mut Subscription) {
        if let Some(v) = &self.client_name {
            sub.client_name = v.clone();
        }
        if let Some(v) = &self.business_name {
            sub.business_name = v.clone();
        }
        if let Some(v) = &self.client_email {
            sub.client_email = Some(v.clone());
        }
        if let Some(v) = &self.client_phone {
            sub.client_phone = Some(v.clone());
        }
        if let Some(v) = self.price {
            sub.price = v;
        }
        if let Some(v) = &self.paid_date {
            sub.paid_date = v.clone();
        }
        if let Some(v) = &self.renewal_date {
            sub.renewal_date = v.clone();
        }
        if let Some(v) = self.duration {
            sub.duration = v;
        }
        if let Some(v) = self.subscription_type {
            sub.subscription_type = v;
        }
        if let Some(v) = self.category {
            sub.category = v;
        }
        if let Some(v) = &self.notes {
            sub.notes = Some(v.clone());
        }
    }
}
