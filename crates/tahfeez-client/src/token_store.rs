//! Session credentials: access/refresh tokens and the cached user, mirrored
//! in memory over a [`KeyValueStore`].

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tahfeez_core::{storage_keys, Tokens, User};
use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::error::StorageError;
use crate::jwt::{decode_claims, TokenClaims};
use crate::storage::KeyValueStore;

/// Memory slot state. `Cleared` is authoritative and never falls back to
/// storage, so a clear that failed to reach the backend still reads as
/// signed out in this process.
enum Slot<T> {
    Unloaded,
    Cleared,
    Present(T),
}

impl<T: Clone> Slot<T> {
    fn value(&self) -> Option<Option<T>> {
        match self {
            Self::Unloaded => None,
            Self::Cleared => Some(None),
            Self::Present(value) => Some(Some(value.clone())),
        }
    }
}

struct Mirror {
    access: Slot<Zeroizing<String>>,
    refresh: Slot<Zeroizing<String>>,
    user: Slot<User>,
}

impl Mirror {
    const fn unloaded() -> Self {
        Self {
            access: Slot::Unloaded,
            refresh: Slot::Unloaded,
            user: Slot::Unloaded,
        }
    }
}

pub struct TokenStore {
    store: Arc<dyn KeyValueStore>,
    mirror: RwLock<Mirror>,
}

impl TokenStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            mirror: RwLock::new(Mirror::unloaded()),
        }
    }

    pub fn access_token(&self) -> Option<String> {
        self.load_token(storage_keys::ACCESS_TOKEN, |mirror| &mut mirror.access)
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.load_token(storage_keys::REFRESH_TOKEN, |mirror| &mut mirror.refresh)
    }

    /// Both tokens, only when both are present. The pair is taken under one
    /// read guard, so it never mixes two `set_tokens` calls.
    pub fn tokens(&self) -> Option<Tokens> {
        if let Some(pair) = self.loaded_pair() {
            return pair;
        }
        self.access_token()?;
        self.refresh_token()?;
        self.loaded_pair().flatten()
    }

    /// `None` while either slot still has to be read from storage.
    fn loaded_pair(&self) -> Option<Option<Tokens>> {
        let mirror = self.read();
        let access = mirror.access.value()?;
        let refresh = mirror.refresh.value()?;
        Some(match (access, refresh) {
            (Some(access), Some(refresh)) => Some(Tokens {
                access: access.to_string(),
                refresh: refresh.to_string(),
            }),
            _ => None,
        })
    }

    /// Persists both tokens in one batch, then swaps both memory slots under
    /// a single write lock. On a storage error memory is left untouched.
    pub fn set_tokens(&self, access: &str, refresh: &str) -> Result<(), StorageError> {
        self.store.set_many(&[
            (storage_keys::ACCESS_TOKEN, access),
            (storage_keys::REFRESH_TOKEN, refresh),
        ])?;
        let mut mirror = self.write();
        mirror.access = Slot::Present(Zeroizing::new(access.to_string()));
        mirror.refresh = Slot::Present(Zeroizing::new(refresh.to_string()));
        debug!("session tokens updated");
        Ok(())
    }

    /// Drops tokens and the cached user from memory and storage. Memory is
    /// cleared first and stays cleared even if the backend fails.
    pub fn clear_tokens(&self) -> Result<(), StorageError> {
        {
            let mut mirror = self.write();
            mirror.access = Slot::Cleared;
            mirror.refresh = Slot::Cleared;
            mirror.user = Slot::Cleared;
        }
        self.store.remove_many(&[
            storage_keys::ACCESS_TOKEN,
            storage_keys::REFRESH_TOKEN,
            storage_keys::USER,
        ])?;
        debug!("session tokens cleared");
        Ok(())
    }

    pub fn user(&self) -> Option<User> {
        if let Some(user) = self.read().user.value() {
            return user;
        }
        let raw = match self.store.get(storage_keys::USER) {
            Ok(raw) => raw?,
            Err(err) => {
                warn!(key = storage_keys::USER, "failed to read cached user: {err}");
                return None;
            }
        };
        let user: User = match serde_json::from_str(&raw) {
            Ok(user) => user,
            Err(err) => {
                warn!(key = storage_keys::USER, "cached user is not valid json: {err}");
                return None;
            }
        };
        let mut mirror = self.write();
        if matches!(mirror.user, Slot::Unloaded) {
            mirror.user = Slot::Present(user.clone());
        }
        Some(user)
    }

    pub fn set_user(&self, user: &User) -> Result<(), StorageError> {
        let raw = serde_json::to_string(user)?;
        self.store.set(storage_keys::USER, &raw)?;
        self.write().user = Slot::Present(user.clone());
        Ok(())
    }

    /// Best-effort look at the access token payload.
    pub fn access_token_claims(&self) -> Option<TokenClaims> {
        decode_claims(&self.access_token()?)
    }

    /// Forgets the in-memory mirror; the next read reloads from storage.
    pub fn reset_mirror(&self) {
        *self.write() = Mirror::unloaded();
    }

    fn load_token(
        &self,
        key: &'static str,
        slot: fn(&mut Mirror) -> &mut Slot<Zeroizing<String>>,
    ) -> Option<String> {
        {
            let mut mirror = self.write();
            if let Some(value) = slot(&mut *mirror).value() {
                return value.map(|token| token.to_string());
            }
        }
        let value = match self.store.get(key) {
            Ok(value) => value?,
            Err(err) => {
                warn!(key, "failed to read token from storage: {err}");
                return None;
            }
        };
        let mut mirror = self.write();
        let slot = slot(&mut *mirror);
        match slot {
            Slot::Unloaded => {
                *slot = Slot::Present(Zeroizing::new(value.clone()));
                Some(value)
            }
            // Another writer got there first; its value wins.
            _ => slot.value().flatten().map(|token| token.to_string()),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Mirror> {
        self.mirror
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Mirror> {
        self.mirror
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
