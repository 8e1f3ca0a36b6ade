//! Per-visitor wishlist membership with optimistic toggling.

use std::collections::HashSet;

use d2c_market_core::{AnonymousUserId, ProductId};
use tracing::instrument;

use crate::backend::{BackendError, WishlistStore};

/// Direction of a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WishlistChange {
    Added,
    Removed,
}

impl WishlistChange {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Removed => "removed",
        }
    }
}

/// What a [`WishlistController::toggle`] did locally and how the backend
/// write went.
#[derive(Debug)]
pub struct WishlistToggle {
    pub product_id: ProductId,
    pub change: WishlistChange,
    pub outcome: Result<(), BackendError>,
}

impl WishlistToggle {
    /// Whether the backend accepted the write.
    #[must_use]
    pub const fn is_persisted(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// The set of product ids one visitor has saved.
///
/// The local set is updated before the backend answers and is not rolled
/// back on failure unless the caller asks for it with
/// [`revert`](Self::revert).
pub struct WishlistController<'a> {
    store: &'a dyn WishlistStore,
    user: AnonymousUserId,
    members: HashSet<ProductId>,
}

impl<'a> WishlistController<'a> {
    /// Load the visitor's saved product ids. A failed read is logged and
    /// yields an empty set.
    #[instrument(skip(store), fields(user = %user))]
    pub async fn load(store: &'a dyn WishlistStore, user: AnonymousUserId) -> Self {
        let members = store.wishlist_product_ids(&user).await.unwrap_or_else(|e| {
            tracing::error!(error = %e, "Failed to load wishlist");
            HashSet::new()
        });
        Self::with_members(store, user, members)
    }

    #[must_use]
    pub const fn with_members(
        store: &'a dyn WishlistStore,
        user: AnonymousUserId,
        members: HashSet<ProductId>,
    ) -> Self {
        Self {
            store,
            user,
            members,
        }
    }

    #[must_use]
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.members.contains(product_id)
    }

    #[must_use]
    pub const fn members(&self) -> &HashSet<ProductId> {
        &self.members
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[must_use]
    pub fn into_members(self) -> HashSet<ProductId> {
        self.members
    }

    /// Flip membership of `product_id`: delete the row if saved, insert one
    /// otherwise. The local set changes whatever the backend answers.
    #[instrument(skip(self), fields(user = %self.user, product = %product_id))]
    pub async fn toggle(&mut self, product_id: ProductId) -> WishlistToggle {
        let (change, outcome) = if self.members.remove(&product_id) {
            let outcome = self
                .store
                .remove_from_wishlist(&self.user, &product_id)
                .await;
            (WishlistChange::Removed, outcome)
        } else {
            self.members.insert(product_id.clone());
            let outcome = self.store.add_to_wishlist(&self.user, &product_id).await;
            (WishlistChange::Added, outcome)
        };

        if let Err(e) = &outcome {
            tracing::warn!(
                error = %e,
                change = change.as_str(),
                "Wishlist write failed"
            );
        }

        WishlistToggle {
            product_id,
            change,
            outcome,
        }
    }

    /// Undo the local effect of `toggle`. Issues no backend request.
    pub fn revert(&mut self, toggle: &WishlistToggle) {
        match toggle.change {
            WishlistChange::Added => {
                self.members.remove(&toggle.product_id);
            }
            WishlistChange::Removed => {
                self.members.insert(toggle.product_id.clone());
            }
        }
    }
}
