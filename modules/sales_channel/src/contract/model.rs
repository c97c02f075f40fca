//! Contract models for the sales channel service
//!
//! These models are transport-agnostic and used for inter-module communication.
//! NO serde derives - these are pure domain models.

use chrono::{DateTime, Utc};

/// A named context (storefront, marketplace, ...) through which products
/// and orders are exposed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalesChannel {
    /// Stable identifier (`sc_...`), assigned on creation
    pub id: String,
    /// Display name, unique among stored channels
    pub name: String,
    /// Free-form description
    pub description: Option<String>,
    /// Whether the channel is active; `None` until explicitly set
    pub active: Option<bool>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
    /// Soft delete timestamp
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Payload for creating a sales channel. The id is assigned by storage.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreateSalesChannelInput {
    pub name: String,
    pub description: Option<String>,
    pub active: Option<bool>,
}

impl CreateSalesChannelInput {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Partial update payload.
///
/// Every field is optional: `None` leaves the stored value untouched.
/// Nullable fields use a nested option so that `Some(None)` clears the
/// value while `None` means "not provided".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UpdateSalesChannelInput {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub active: Option<Option<bool>>,
}

impl UpdateSalesChannelInput {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = Some(description);
        self
    }

    pub fn active(mut self, active: Option<bool>) -> Self {
        self.active = Some(active);
        self
    }

    /// True when no field is present
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.active.is_none()
    }

    /// Overwrite every provided field on `channel`, leaving the rest as is
    pub fn apply_to(&self, channel: &mut SalesChannel) {
        if let Some(name) = &self.name {
            channel.name = name.clone();
        }
        if let Some(description) = &self.description {
            channel.description = description.clone();
        }
        if let Some(active) = self.active {
            channel.active = active;
        }
    }
}

/// Filter for listing sales channels. Unset fields do not constrain the result.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SalesChannelSelector {
    /// Restrict to these ids
    pub ids: Option<Vec<String>>,
    /// Exact name match
    pub name: Option<String>,
    /// Match on the active flag
    pub active: Option<bool>,
    /// Case-insensitive substring search over name and description
    pub q: Option<String>,
}

impl SalesChannelSelector {
    pub fn by_id(id: impl Into<String>) -> Self {
        Self {
            ids: Some(vec![id.into()]),
            ..Default::default()
        }
    }
}

/// Sortable sales channel columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SalesChannelField {
    Id,
    Name,
    CreatedAt,
    UpdatedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Query configuration: relation expansion, paging, ordering
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FindConfig {
    /// Relations to expand
    pub relations: Vec<String>,
    /// Number of rows to skip
    pub skip: Option<u64>,
    /// Maximum number of rows to return
    pub take: Option<u64>,
    /// Sort order, applied in sequence
    pub order: Vec<(SalesChannelField, SortDirection)>,
    /// Include soft-deleted channels
    pub with_deleted: bool,
}

impl FindConfig {
    /// Default paging used by `list_and_count`: no relations, skip 0, take 10
    pub fn list_default() -> Self {
        Self {
            relations: Vec::new(),
            skip: Some(0),
            take: Some(10),
            order: Vec::new(),
            with_deleted: false,
        }
    }

    pub fn skip(mut self, skip: u64) -> Self {
        self.skip = Some(skip);
        self
    }

    pub fn take(mut self, take: u64) -> Self {
        self.take = Some(take);
        self
    }

    pub fn order_by(mut self, field: SalesChannelField, direction: SortDirection) -> Self {
        self.order.push((field, direction));
        self
    }

    pub fn with_deleted(mut self) -> Self {
        self.with_deleted = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel() -> SalesChannel {
        let now = Utc::now();
        SalesChannel {
            id: "sc_1".to_string(),
            name: "Web".to_string(),
            description: Some("Main storefront".to_string()),
            active: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    #[test]
    fn test_apply_leaves_absent_fields_untouched() {
        let mut sc = channel();
        let before = sc.clone();

        UpdateSalesChannelInput::default().active(Some(true)).apply_to(&mut sc);

        assert_eq!(sc.active, Some(true));
        assert_eq!(sc.name, before.name);
        assert_eq!(sc.description, before.description);
        assert_eq!(sc.id, before.id);
    }

    #[test]
    fn test_apply_explicit_null_clears_field() {
        let mut sc = channel();

        UpdateSalesChannelInput::default().description(None).apply_to(&mut sc);

        assert_eq!(sc.description, None);
        assert_eq!(sc.name, "Web");
    }

    #[test]
    fn test_is_empty() {
        assert!(UpdateSalesChannelInput::default().is_empty());
        assert!(!UpdateSalesChannelInput::default().name("POS").is_empty());
    }
}
