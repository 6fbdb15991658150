//! Authorization state
//!
//! A [`PolicyState`] holds two flag maps seeded from the [registry](crate::registry):
//!
//! - per extension: every registered extension, mapped to its current flag
//! - per category: a cached OR over the flags of the category's extensions
//!
//! The category map is only brought back in line with the extension map at
//! two points: [`PolicyState::authorize`] sets the owning category of each
//! granted extension, and [`PolicyState::deauthorize`] runs
//! [`PolicyState::reconcile_categories`] after revoking. After every
//! `deauthorize`, a category is `true` iff one of its extensions is `true`.
//!
//! A category absent from the map is "not present", which is distinct from
//! an explicit `false` but authorizes nothing either.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use filecheck_traits::Category;

use crate::registry::registry;

/// Mutable per-checker authorization record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyState {
    extensions: HashMap<String, bool>,
    categories: BTreeMap<Category, bool>,
}

impl PolicyState {
    /// Create a policy seeded with the registry defaults.
    ///
    /// Every registered extension is tracked with its default flag. Only the
    /// categories owning a default-authorized extension are tracked, all `true`.
    pub fn new() -> Self {
        let registry = registry();

        let extensions = registry
            .extensions()
            .map(|(extension, entry)| (extension.to_string(), entry.default_authorized))
            .collect();

        let categories = registry
            .default_authorized_categories()
            .into_iter()
            .map(|category| (category, true))
            .collect();

        Self {
            extensions,
            categories,
        }
    }

    /// Grant extensions.
    ///
    /// Each registered extension, and its owning category, is set to `true`.
    /// Unregistered extensions are ignored. Never revokes anything.
    pub fn authorize<I, S>(&mut self, extensions: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let registry = registry();

        for extension in extensions {
            let extension = extension.as_ref();
            match registry.category_of(extension) {
                Some(category) => {
                    self.extensions.insert(extension.to_string(), true);
                    self.categories.insert(category, true);
                    tracing::trace!(
                        target: "filecheck_core::policy::authorize",
                        "Authorized extension {} ({})",
                        extension,
                        category
                    );
                }
                None => {
                    tracing::debug!(
                        target: "filecheck_core::policy::authorize",
                        "Ignoring unregistered extension {:?}",
                        extension
                    );
                }
            }
        }
    }

    /// Revoke extensions, then reconcile the category flags.
    ///
    /// Every requested extension is set to `false`, registered or not. An
    /// unregistered extension becomes a tracked entry that stays `false`:
    /// [`PolicyState::authorize`] will never turn it on.
    pub fn deauthorize<I, S>(&mut self, extensions: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for extension in extensions {
            let extension = extension.as_ref();
            if !registry().is_known(extension) {
                tracing::debug!(
                    target: "filecheck_core::policy::deauthorize",
                    "Tracking unregistered extension {:?} as unauthorized",
                    extension
                );
            }
            self.extensions.insert(extension.to_string(), false);
        }

        self.reconcile_categories();
    }

    /// Recompute every category flag from the extension flags.
    ///
    /// Tracked categories are reset to `false`, then each category owning an
    /// authorized extension is set to `true`. Untracked categories with no
    /// authorized extension stay absent.
    pub fn reconcile_categories(&mut self) {
        for authorized in self.categories.values_mut() {
            *authorized = false;
        }

        let registry = registry();
        for (extension, _) in self.extensions.iter().filter(|(_, authorized)| **authorized) {
            if let Some(category) = registry.category_of(extension) {
                self.categories.insert(category, true);
            }
        }

        tracing::trace!(
            target: "filecheck_core::policy::reconcile",
            "Authorized categories after reconcile: {:?}",
            self.authorized_categories()
        );
    }

    /// Whether `extension` is tracked and `true`
    pub fn is_extension_authorized(&self, extension: &str) -> bool {
        self.extensions.get(extension).copied().unwrap_or(false)
    }

    /// Whether `category` is tracked and `true`
    pub fn is_category_authorized(&self, category: Category) -> bool {
        self.categories.get(&category).copied().unwrap_or(false)
    }

    /// Raw flag of `extension`; `None` if untracked
    pub fn extension_flag(&self, extension: &str) -> Option<bool> {
        self.extensions.get(extension).copied()
    }

    /// Raw flag of `category`; `None` if untracked
    pub fn category_flag(&self, category: Category) -> Option<bool> {
        self.categories.get(&category).copied()
    }

    /// Extensions currently authorized
    pub fn authorized_extensions(&self) -> BTreeSet<&str> {
        self.extensions
            .iter()
            .filter(|(_, authorized)| **authorized)
            .map(|(extension, _)| extension.as_str())
            .collect()
    }

    /// Categories currently authorized
    pub fn authorized_categories(&self) -> BTreeSet<Category> {
        self.categories
            .iter()
            .filter(|(_, authorized)| **authorized)
            .map(|(category, _)| *category)
            .collect()
    }

    /// Number of tracked extensions, including unregistered revoked ones
    pub fn tracked_extensions(&self) -> usize {
        self.extensions.len()
    }
}

impl Default for PolicyState {
    fn default() -> Self {
        Self::new()
    }
}
