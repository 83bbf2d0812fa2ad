use crate::core::filters::filter_by_preferred_type;
use crate::core::ranking::sort_by_tier;
use crate::models::{Inquiry, InquiryStatus, InquirySubmission, PreferredType, Profile};
use crate::services::notifier::{LeadContext, OutboundMessage};
use crate::services::postgres::StoreError;
use crate::services::traits::{InquiryStore, Notifier};
use futures::future::join_all;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

/// Errors that stop a lead from being distributed
#[derive(Debug, Error)]
pub enum LeadError {
    #[error("No matching counselors found for this preference")]
    NoMatchingProfessionals,

    #[error("Failed to store inquiry: {0}")]
    Persistence(#[from] StoreError),
}

/// Recipient bounds and links used when distributing a lead
#[derive(Debug, Clone)]
pub struct LeadPolicy {
    pub min_recipients: usize,
    pub max_recipients: usize,
    pub dashboard_url: String,
}

impl Default for LeadPolicy {
    fn default() -> Self {
        Self {
            min_recipients: 3,
            max_recipients: 5,
            dashboard_url: "https://www.weddingcounselors.com/professional/analytics".to_string(),
        }
    }
}

/// Number of recipients to take from a pool of `available`
///
/// `min(max, max(min, available))`, capped by what is available.
#[inline]
pub fn selection_size(available: usize, min_recipients: usize, max_recipients: usize) -> usize {
    max_recipients.min(min_recipients.max(available)).min(available)
}

/// Filter by preferred type, rank by tier and take the front of the pool
pub fn select_recipients(pool: Vec<Profile>, preferred: PreferredType, policy: &LeadPolicy) -> Vec<Profile> {
    let mut matching = filter_by_preferred_type(pool, preferred);
    sort_by_tier(&mut matching);

    let take = selection_size(matching.len(), policy.min_recipients, policy.max_recipients);
    matching.truncate(take);
    matching
}

/// Where the lead came from, with display names for message copy
#[derive(Debug, Clone)]
pub struct LeadLocation {
    pub state_slug: String,
    pub state_name: String,
    pub city_slug: String,
    pub city_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum DeliveryStatus {
    Sent,
    Failed(String),
    Skipped(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecipientKind {
    Professional,
    Couple,
}

/// Delivery outcome for one recipient
#[derive(Debug, Clone, Serialize)]
pub struct DeliveryResult {
    pub recipient: RecipientKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_id: Option<String>,
    #[serde(flatten)]
    pub status: DeliveryStatus,
}

/// Outcome of distributing one inquiry
#[derive(Debug, Clone, Serialize)]
pub struct DistributionReport {
    pub inquiry_id: uuid::Uuid,
    pub provider_ids: Vec<String>,
    pub deliveries: Vec<DeliveryResult>,
}

impl DistributionReport {
    pub fn sent_count(&self) -> usize {
        self.deliveries
            .iter()
            .filter(|d| d.status == DeliveryStatus::Sent)
            .count()
    }

    pub fn professional_deliveries(&self) -> impl Iterator<Item = &DeliveryResult> {
        self.deliveries
            .iter()
            .filter(|d| d.recipient == RecipientKind::Professional)
    }

    pub fn confirmation(&self) -> Option<&DeliveryResult> {
        self.deliveries
            .iter()
            .find(|d| d.recipient == RecipientKind::Couple)
    }
}

/// Selects professionals for an inquiry, stores it and fans out messages
pub struct LeadDistributor {
    store: Arc<dyn InquiryStore>,
    notifier: Arc<dyn Notifier>,
    policy: LeadPolicy,
}

impl LeadDistributor {
    pub fn new(store: Arc<dyn InquiryStore>, notifier: Arc<dyn Notifier>, policy: LeadPolicy) -> Self {
        Self {
            store,
            notifier,
            policy,
        }
    }

    /// Distribute an inquiry across a pool of candidate professionals
    ///
    /// Nothing is stored or sent when no professional matches. The inquiry is
    /// stored before any message goes out; a storage failure aborts the
    /// distribution. Individual send failures are reported, never raised.
    pub async fn distribute(
        &self,
        submission: &InquirySubmission,
        location: &LeadLocation,
        pool: Vec<Profile>,
    ) -> Result<DistributionReport, LeadError> {
        let selected = select_recipients(pool, submission.preferred_type, &self.policy);
        if selected.is_empty() {
            tracing::info!(
                "No {} professionals for inquiry in {}, {}",
                submission.preferred_type.as_str(),
                location.city_name,
                location.state_name
            );
            return Err(LeadError::NoMatchingProfessionals);
        }

        let inquiry = Inquiry {
            id: uuid::Uuid::new_v4(),
            couple_name: submission.couple_name().map(str::to_string),
            couple_email: submission.email.trim().to_string(),
            message: submission.message.clone(),
            preferred_type: submission.preferred_type,
            city: location.city_name.clone(),
            state: location.state_name.clone(),
            provider_ids: selected.iter().map(|p| p.id.clone()).collect(),
            source: submission.source.clone(),
            status: InquiryStatus::Sent,
            created_at: chrono::Utc::now(),
        };

        if let Err(e) = self.store.insert_inquiry(&inquiry).await {
            tracing::error!("Failed to store inquiry {}: {}", inquiry.id, e);
            return Err(e.into());
        }

        let ctx = LeadContext {
            city_name: &location.city_name,
            city_slug: &location.city_slug,
            state_name: &location.state_name,
            state_slug: &location.state_slug,
            couple_name: inquiry.couple_name.as_deref(),
            couple_email: &inquiry.couple_email,
            message: &inquiry.message,
        };

        let provider_sends = selected.iter().map(|profile| self.notify_professional(profile, &ctx));
        let confirmation = self.send_confirmation(&ctx, selected.len());

        let (mut deliveries, confirmation) =
            futures::future::join(join_all(provider_sends), confirmation).await;
        deliveries.push(confirmation);

        let report = DistributionReport {
            inquiry_id: inquiry.id,
            provider_ids: inquiry.provider_ids,
            deliveries,
        };

        tracing::info!(
            "Distributed inquiry {} to {} professionals ({} messages sent)",
            report.inquiry_id,
            report.provider_ids.len(),
            report.sent_count()
        );

        Ok(report)
    }

    async fn notify_professional(&self, profile: &Profile, ctx: &LeadContext<'_>) -> DeliveryResult {
        let result = |status| DeliveryResult {
            recipient: RecipientKind::Professional,
            profile_id: Some(profile.id.clone()),
            status,
        };

        let Some(email) = profile.contact_email() else {
            tracing::warn!("Professional {} has no email, skipping notification", profile.id);
            return result(DeliveryStatus::Skipped("no email address".to_string()));
        };

        let message = OutboundMessage::inquiry_to_provider(
            email,
            profile.first_name(),
            ctx,
            &self.policy.dashboard_url,
        );

        match self.notifier.send(&message).await {
            Ok(()) => result(DeliveryStatus::Sent),
            Err(e) => {
                tracing::warn!("Failed to notify professional {}: {}", profile.id, e);
                result(DeliveryStatus::Failed(e.to_string()))
            }
        }
    }

    async fn send_confirmation(&self, ctx: &LeadContext<'_>, provider_count: usize) -> DeliveryResult {
        let message = OutboundMessage::inquiry_confirmation(ctx, provider_count);

        let status = match self.notifier.send(&message).await {
            Ok(()) => DeliveryStatus::Sent,
            Err(e) => {
                tracing::warn!("Failed to send inquiry confirmation: {}", e);
                DeliveryStatus::Failed(e.to_string())
            }
        };

        DeliveryResult {
            recipient: RecipientKind::Couple,
            profile_id: None,
            status,
        }
    }
}
