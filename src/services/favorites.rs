// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Optimistic favorite toggling reconciled with the server's list.
//!
//! Membership is fetched once and tested locally afterwards. A toggle flips
//! local state before the remote call; if the call fails the flip is undone.
//! At most one toggle per recipe id may be in flight.

use crate::error::{ClientError, Result};
use dashmap::DashSet;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};

/// Remote favorites operations.
pub trait FavoritesApi {
    fn favorite_ids(&self) -> impl Future<Output = Result<Vec<u64>>> + Send;
    fn add_favorite(&self, recipe_id: u64) -> impl Future<Output = Result<()>> + Send;
    fn remove_favorite(&self, recipe_id: u64) -> impl Future<Output = Result<()>> + Send;
}

/// Favorite membership for one mounted view.
pub struct FavoriteToggle<A> {
    api: A,
    members: DashSet<u64>,
    in_flight: DashSet<u64>,
    loaded: AtomicBool,
    mounted: AtomicBool,
}

/// Clears the in-flight marker however the toggle ends.
struct InFlight<'a> {
    set: &'a DashSet<u64>,
    id: u64,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.set.remove(&self.id);
    }
}

impl<A: FavoritesApi> FavoriteToggle<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            members: DashSet::new(),
            in_flight: DashSet::new(),
            loaded: AtomicBool::new(false),
            mounted: AtomicBool::new(true),
        }
    }

    /// Fetch the favorited ids. Only the first successful call hits the API.
    pub async fn load(&self) -> Result<()> {
        if self.loaded.load(Ordering::Acquire) {
            return Ok(());
        }

        let ids = self.api.favorite_ids().await?;

        if !self.mounted.load(Ordering::Acquire) {
            tracing::debug!("Favorites arrived after unmount, discarding");
            return Ok(());
        }
        // A concurrent load may have won; its result is equally fresh.
        if self.loaded.swap(true, Ordering::AcqRel) {
            return Ok(());
        }
        for id in ids {
            self.members.insert(id);
        }
        tracing::debug!(count = self.members.len(), "Favorites loaded");
        Ok(())
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::Acquire)
    }

    pub fn is_favorite(&self, recipe_id: u64) -> bool {
        self.members.contains(&recipe_id)
    }

    pub fn is_in_flight(&self, recipe_id: u64) -> bool {
        self.in_flight.contains(&recipe_id)
    }

    /// Stop applying remote results to this instance.
    pub fn unmount(&self) {
        self.mounted.store(false, Ordering::Release);
    }

    /// Flip membership of `recipe_id` and sync it to the server.
    ///
    /// Returns the new membership. Local state reflects the flip as soon as
    /// this is called, and reverts if the server call fails. Fails with
    /// `InvalidState` until [`Self::load`] has succeeded.
    pub async fn toggle(&self, recipe_id: u64) -> Result<bool> {
        if !self.is_loaded() {
            return Err(ClientError::InvalidState(
                "Favorites are still loading".to_string(),
            ));
        }
        if !self.in_flight.insert(recipe_id) {
            return Err(ClientError::ToggleInFlight(recipe_id));
        }
        let _guard = InFlight {
            set: &self.in_flight,
            id: recipe_id,
        };

        let now_favorite = if self.members.remove(&recipe_id).is_some() {
            false
        } else {
            self.members.insert(recipe_id);
            true
        };

        let result = if now_favorite {
            self.api.add_favorite(recipe_id).await
        } else {
            self.api.remove_favorite(recipe_id).await
        };

        match result {
            Ok(()) => {
                tracing::info!(recipe_id, favorite = now_favorite, "Favorite updated");
                Ok(now_favorite)
            }
            Err(e) => {
                if self.mounted.load(Ordering::Acquire) {
                    if now_favorite {
                        self.members.remove(&recipe_id);
                    } else {
                        self.members.insert(recipe_id);
                    }
                }
                tracing::warn!(recipe_id, error = %e, "Favorite update failed, rolled back");
                Err(e)
            }
        }
    }
}
