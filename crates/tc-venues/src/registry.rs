//! `CalendarRegistry`: name → venue calendar dispatch.
//!
//! A registry maps canonical names to either a ready [`VenueCalendar`] or a
//! factory that builds one on first use, plus an alias table.  Calendars
//! built by factories are cached per `(canonical name, variant)` so every
//! caller asking for the same pair shares one immutable instance.
//!
//! # Concurrency
//!
//! All tables sit behind one `Mutex`.  Factories run *outside* the lock, so
//! two threads may both build the same calendar; the first to re-take the
//! lock caches its result and the other is handed that cached instance.
//!
//! # Global instance
//!
//! [`CalendarRegistry::global`] is a lazily created process-wide registry
//! seeded with the default catalog.  Code that can take a `&CalendarRegistry`
//! should prefer that over reaching for the global.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

use tc_core::errors::{Error, Result};

use crate::venue::VenueCalendar;
use crate::venues;

/// Builds a calendar, optionally for a named variant (product group).
pub type CalendarFactory = Arc<dyn Fn(Option<&str>) -> Result<VenueCalendar> + Send + Sync>;

/// What a name can be registered as.
#[derive(Clone)]
pub enum Registration {
    /// A ready instance.
    Calendar(Arc<VenueCalendar>),
    /// A factory invoked lazily.
    Factory(CalendarFactory),
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Registration::Calendar(cal) => f.debug_tuple("Calendar").field(cal).finish(),
            Registration::Factory(_) => f.write_str("Factory(..)"),
        }
    }
}

type CacheKey = (String, Option<String>);

#[derive(Default)]
struct Tables {
    calendars: HashMap<String, Arc<VenueCalendar>>,
    factories: HashMap<String, CalendarFactory>,
    aliases: HashMap<String, String>,
    built: HashMap<CacheKey, Arc<VenueCalendar>>,
}

impl Tables {
    fn has(&self, name: &str) -> bool {
        self.calendars.contains_key(name)
            || self.factories.contains_key(name)
            || self.aliases.contains_key(name)
    }

    fn resolve(&self, name: &str) -> Result<String> {
        let mut seen: Vec<&str> = Vec::new();
        let mut current = name;
        while let Some(target) = self.aliases.get(current) {
            seen.push(current);
            current = target.as_str();
            if seen.contains(&current) {
                seen.push(current);
                let cycle = seen
                    .iter()
                    .map(|k| format!("'{k}'"))
                    .collect::<Vec<_>>()
                    .join(" -> ");
                return Err(Error::CyclicAlias { cycle });
            }
        }
        Ok(current.to_string())
    }

    fn remove(&mut self, name: &str) -> Removed {
        self.built.retain(|(canonical, _), _| canonical != name);
        Removed {
            calendar: self.calendars.remove(name),
            factory: self.factories.remove(name),
            alias: self.aliases.remove(name),
        }
    }

    fn restore(&mut self, name: &str, removed: Removed) {
        if let Some(cal) = removed.calendar {
            self.calendars.insert(name.to_string(), cal);
        }
        if let Some(factory) = removed.factory {
            self.factories.insert(name.to_string(), factory);
        }
        if let Some(target) = removed.alias {
            self.aliases.insert(name.to_string(), target);
        }
    }
}

struct Removed {
    calendar: Option<Arc<VenueCalendar>>,
    factory: Option<CalendarFactory>,
    alias: Option<String>,
}

impl Removed {
    fn is_empty(&self) -> bool {
        self.calendar.is_none() && self.factory.is_none() && self.alias.is_none()
    }
}

/// A thread-safe registry of venue calendars.
#[derive(Default)]
pub struct CalendarRegistry {
    tables: Mutex<Tables>,
}

static GLOBAL: OnceLock<CalendarRegistry> = OnceLock::new();

impl CalendarRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the default venue catalog and its aliases.
    pub fn with_defaults() -> Self {
        let registry = Self::new();
        {
            let mut t = registry.lock();
            for (name, factory) in venues::default_factories() {
                t.factories.insert(name.to_string(), factory);
            }
            for (alias, target) in venues::DEFAULT_ALIASES {
                t.aliases.insert(alias.to_string(), target.to_string());
            }
        }
        registry
    }

    /// The process-wide registry, created with [`with_defaults`](Self::with_defaults)
    /// on first use.
    pub fn global() -> &'static CalendarRegistry {
        GLOBAL.get_or_init(Self::with_defaults)
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        // Every mutation below leaves the tables consistent before it can
        // panic, so a poisoned lock is still usable.
        self.tables.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Fetch the calendar registered as `name` (or an alias of it).
    ///
    /// `variant` selects a sub-configuration, such as a product group, and
    /// is handed to the factory; each variant is built and cached separately.
    ///
    /// # Errors
    /// * [`Error::CyclicAlias`] if alias resolution loops.
    /// * [`Error::UnknownCalendar`] if nothing is registered under the name.
    /// * [`Error::UnknownVariant`] if a variant is requested for a name that
    ///   was registered as a plain instance, or the factory rejects it.
    /// * Any configuration error the factory raises.
    pub fn get(&self, name: &str, variant: Option<&str>) -> Result<Arc<VenueCalendar>> {
        let (canonical, factory) = {
            let t = self.lock();
            let canonical = t.resolve(name)?;
            if let Some(cal) = t.calendars.get(&canonical) {
                return match variant {
                    None => Ok(Arc::clone(cal)),
                    Some(v) => Err(Error::UnknownVariant {
                        name: canonical,
                        variant: v.to_string(),
                    }),
                };
            }
            let key = (canonical.clone(), variant.map(str::to_string));
            if let Some(cal) = t.built.get(&key) {
                tracing::debug!(calendar = %canonical, ?variant, "calendar cache hit");
                return Ok(Arc::clone(cal));
            }
            match t.factories.get(&canonical) {
                Some(factory) => (canonical, Arc::clone(factory)),
                None => {
                    return Err(Error::UnknownCalendar {
                        name: name.to_string(),
                    })
                }
            }
        };

        tracing::debug!(calendar = %canonical, ?variant, "building calendar");
        let built = Arc::new(factory(variant)?);

        let mut t = self.lock();
        let still_registered = t
            .factories
            .get(&canonical)
            .is_some_and(|f| Arc::ptr_eq(f, &factory));
        if !still_registered {
            // Deregistered or replaced while building: hand the result out
            // but do not cache it under the new registration.
            return Ok(built);
        }
        let key = (canonical.clone(), variant.map(str::to_string));
        if let Some(existing) = t.built.get(&key) {
            tracing::warn!(calendar = %canonical, ?variant, "concurrent build lost, using cached calendar");
            return Ok(Arc::clone(existing));
        }
        t.built.insert(key, Arc::clone(&built));
        Ok(built)
    }

    /// Register `name` as a calendar instance or a factory.
    ///
    /// With `force`, anything already registered under `name` (instance,
    /// factory, or alias) is removed first.
    ///
    /// # Errors
    /// [`Error::NameCollision`] if `name` is taken and `force` is not set.
    pub fn register(&self, name: &str, registration: Registration, force: bool) -> Result<()> {
        let mut t = self.lock();
        if force {
            t.remove(name);
        }
        if t.has(name) {
            return Err(Error::NameCollision {
                name: name.to_string(),
            });
        }
        match registration {
            Registration::Calendar(cal) => {
                t.calendars.insert(name.to_string(), cal);
            }
            Registration::Factory(factory) => {
                t.factories.insert(name.to_string(), factory);
            }
        }
        tracing::info!(calendar = name, force, "registered calendar");
        Ok(())
    }

    /// Register a ready calendar instance.
    pub fn register_calendar(&self, name: &str, calendar: VenueCalendar, force: bool) -> Result<()> {
        self.register(name, Registration::Calendar(Arc::new(calendar)), force)
    }

    /// Register a factory to be invoked on first [`get`](Self::get).
    pub fn register_factory<F>(&self, name: &str, factory: F, force: bool) -> Result<()>
    where
        F: Fn(Option<&str>) -> Result<VenueCalendar> + Send + Sync + 'static,
    {
        self.register(name, Registration::Factory(Arc::new(factory)), force)
    }

    /// Make `alias` resolve to `target`.
    ///
    /// The alias is validated immediately; if it would close a cycle the
    /// registry is left exactly as it was, including anything `force`
    /// removed.
    ///
    /// # Errors
    /// * [`Error::NameCollision`] if `alias` is taken and `force` is not set.
    /// * [`Error::CyclicAlias`] naming the full cycle.
    pub fn register_alias(&self, alias: &str, target: &str, force: bool) -> Result<()> {
        let mut t = self.lock();
        let removed = if force {
            t.remove(alias)
        } else {
            Removed {
                calendar: None,
                factory: None,
                alias: None,
            }
        };
        if t.has(alias) {
            return Err(Error::NameCollision {
                name: alias.to_string(),
            });
        }
        t.aliases.insert(alias.to_string(), target.to_string());
        if let Err(e) = t.resolve(alias) {
            t.aliases.remove(alias);
            if !removed.is_empty() {
                t.restore(alias, removed);
            }
            return Err(e);
        }
        tracing::info!(alias, target, force, "registered calendar alias");
        Ok(())
    }

    /// Follow the alias chain from `name` to a canonical name.
    ///
    /// Names that are not aliases resolve to themselves.
    pub fn resolve_alias(&self, name: &str) -> Result<String> {
        self.lock().resolve(name)
    }

    /// Remove whatever is registered under `name`.  Removing an unknown name
    /// is a no-op.
    pub fn deregister(&self, name: &str) {
        let removed = self.lock().remove(name);
        if !removed.is_empty() {
            tracing::info!(calendar = name, "deregistered calendar");
        }
    }

    /// Remove every registration and cached calendar.
    pub fn clear(&self) {
        *self.lock() = Tables::default();
        tracing::info!("cleared calendar registry");
    }

    /// Return `true` if `name` is registered as an instance, factory, or
    /// alias.
    pub fn has_calendar(&self, name: &str) -> bool {
        self.lock().has(name)
    }

    /// Every registered name (instances, factories, and aliases), sorted.
    pub fn names(&self) -> Vec<String> {
        let t = self.lock();
        let mut names: Vec<String> = t
            .calendars
            .keys()
            .chain(t.factories.keys())
            .chain(t.aliases.keys())
            .cloned()
            .collect();
        names.sort();
        names.dedup();
        names
    }
}

impl fmt::Debug for CalendarRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalendarRegistry")
            .field("names", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::venue::SessionHours;

    fn plain(name: &str) -> VenueCalendar {
        VenueCalendar::builder(name)
            .hours(SessionHours::new(
                NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            ))
            .build()
            .unwrap()
    }

    #[test]
    fn factory_runs_once_per_variant() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let registry = CalendarRegistry::new();
        registry
            .register_factory(
                "B",
                move |variant| {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok(plain(variant.unwrap_or("B")))
                },
                false,
            )
            .unwrap();
        let a = registry.get("B", None).unwrap();
        let b = registry.get("B", None).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        let v = registry.get("B", Some("CC")).unwrap();
        assert!(!Arc::ptr_eq(&a, &v));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn collision_and_force() {
        let registry = CalendarRegistry::new();
        registry.register_calendar("A", plain("A"), false).unwrap();
        assert!(matches!(
            registry.register_calendar("A", plain("A"), false),
            Err(Error::NameCollision { .. })
        ));
        registry.register_calendar("A", plain("A2"), true).unwrap();
        assert_eq!(
            tc_time::SessionCalendar::name(&*registry.get("A", None).unwrap()),
            "A2"
        );
    }

    #[test]
    fn cycle_message_names_every_hop() {
        let registry = CalendarRegistry::new();
        registry.register_alias("A", "B", false).unwrap();
        let err = registry.register_alias("B", "A", false).unwrap_err();
        assert_eq!(
            err,
            Error::CyclicAlias {
                cycle: "'B' -> 'A' -> 'B'".into()
            }
        );
        assert!(!registry.has_calendar("B"));
    }

    #[test]
    fn forced_cyclic_alias_restores_previous_registration() {
        let registry = CalendarRegistry::new();
        registry.register_calendar("B", plain("B"), false).unwrap();
        registry.register_alias("A", "B", false).unwrap();
        assert!(registry.register_alias("B", "A", true).is_err());
        assert!(registry.get("A", None).is_ok());
    }

    #[test]
    fn instance_has_no_variants() {
        let registry = CalendarRegistry::new();
        registry.register_calendar("A", plain("A"), false).unwrap();
        assert!(matches!(
            registry.get("A", Some("CC")),
            Err(Error::UnknownVariant { .. })
        ));
    }

    #[test]
    fn deregister_drops_cache_and_is_idempotent() {
        let registry = CalendarRegistry::new();
        registry.register_factory("A", |_| Ok(plain("A")), false).unwrap();
        registry.get("A", None).unwrap();
        registry.deregister("A");
        registry.deregister("A");
        assert!(matches!(
            registry.get("A", None),
            Err(Error::UnknownCalendar { .. })
        ));
        registry.register_factory("A", |_| Ok(plain("A3")), false).unwrap();
        assert_eq!(
            tc_time::SessionCalendar::name(&*registry.get("A", None).unwrap()),
            "A3"
        );
    }
}
