//! Transactional record store
//!
//! Five tables under one handle, with:
//!
//! - natural-key uniqueness enforced on every insert and update
//! - natural-key lookups (license number, VIN, plate, code, name, resolution)
//! - application-level cascade deletes: driver -> owned cars -> their
//!   violations; car -> its violations; article / type -> their violations
//! - `clear()` in dependency order (children before parents)
//! - a JSON state file guarded by a CRC32 line, written atomically
//! - a `Transaction` guard snapshotting the in-memory state; dropping the
//!   guard without `commit()` restores the snapshot exactly
//!
//! Single-threaded and synchronous: one import or export runs to completion
//! while holding `&mut Store` exclusively. The handle is always passed in
//! explicitly; there is no ambient global session.

mod errors;
mod file;
mod state;

pub use errors::{StoreError, StoreResult};
pub use state::StoreState;

use std::ops::{Deref, DerefMut};
use std::path::PathBuf;

use crate::model::{
    Car, Driver, EntityKind, RecordId, Violation, ViolationArticle, ViolationType,
};
use crate::validate::KeyLookup;

#[derive(Debug)]
pub struct Store {
    path: Option<PathBuf>,
    state: StoreState,
}

impl Store {
    /// Creates a new store backed by `path`, writing an empty state file.
    pub fn create(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let store = Store {
            path: Some(path.into()),
            state: StoreState::default(),
        };
        store.persist()?;
        Ok(store)
    }

    /// Opens an existing store from its state file.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let state = file::load(&path)?;
        Ok(Store {
            path: Some(path),
            state,
        })
    }

    /// A store with no backing file. `persist` is a no-op; used by tests and
    /// callers that manage durability themselves.
    pub fn in_memory() -> Self {
        Store {
            path: None,
            state: StoreState::default(),
        }
    }

    /// Writes the current state to the backing file, if any.
    pub fn persist(&self) -> StoreResult<()> {
        match &self.path {
            Some(path) => file::save(path, &self.state),
            None => Ok(()),
        }
    }

    /// Begins a transaction. All mutations through the returned guard are
    /// discarded unless `commit()` is called.
    pub fn begin(&mut self) -> Transaction<'_> {
        let snapshot = self.state.clone();
        Transaction {
            store: self,
            snapshot: Some(snapshot),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    // ---- drivers ----

    pub fn drivers(&self) -> impl Iterator<Item = &Driver> {
        self.state.drivers.values()
    }

    pub fn driver(&self, id: RecordId) -> Option<&Driver> {
        self.state.drivers.get(&id)
    }

    pub fn find_driver_by_license(&self, license: &str) -> Option<&Driver> {
        self.state
            .drivers
            .values()
            .find(|d| d.license_number == license)
    }

    pub fn insert_driver(&mut self, driver: Driver) -> StoreResult<()> {
        self.ensure_unique_license(&driver.license_number, driver.id)?;
        self.state.drivers.insert(driver.id, driver);
        Ok(())
    }

    pub fn update_driver(&mut self, driver: Driver) -> StoreResult<()> {
        if !self.state.drivers.contains_key(&driver.id) {
            return Err(StoreError::UnknownId {
                kind: EntityKind::Driver,
                id: driver.id,
            });
        }
        self.ensure_unique_license(&driver.license_number, driver.id)?;
        self.state.drivers.insert(driver.id, driver);
        Ok(())
    }

    /// Removes a driver, cascading to owned cars and their violations.
    pub fn remove_driver(&mut self, id: RecordId) -> StoreResult<()> {
        if self.state.drivers.remove(&id).is_none() {
            return Err(StoreError::UnknownId {
                kind: EntityKind::Driver,
                id,
            });
        }
        let owned: Vec<RecordId> = self
            .state
            .cars
            .values()
            .filter(|c| c.owner == id)
            .map(|c| c.id)
            .collect();
        for car_id in owned {
            self.state.cars.remove(&car_id);
            self.state.violations.retain(|_, v| v.car != car_id);
        }
        Ok(())
    }

    fn ensure_unique_license(&self, license: &str, own_id: RecordId) -> StoreResult<()> {
        let taken = self
            .state
            .drivers
            .values()
            .any(|d| d.license_number == license && d.id != own_id);
        if taken {
            return Err(StoreError::DuplicateKey {
                kind: EntityKind::Driver,
                key: license.to_string(),
            });
        }
        Ok(())
    }

    // ---- cars ----

    pub fn cars(&self) -> impl Iterator<Item = &Car> {
        self.state.cars.values()
    }

    pub fn car(&self, id: RecordId) -> Option<&Car> {
        self.state.cars.get(&id)
    }

    pub fn find_car_by_vin(&self, vin: &str) -> Option<&Car> {
        self.state.cars.values().find(|c| c.vin_number == vin)
    }

    pub fn find_car_by_plate(&self, plate: &str) -> Option<&Car> {
        self.state.cars.values().find(|c| c.license_plate == plate)
    }

    pub fn insert_car(&mut self, car: Car) -> StoreResult<()> {
        self.ensure_car_keys(&car)?;
        self.ensure_owner_exists(&car)?;
        self.state.cars.insert(car.id, car);
        Ok(())
    }

    pub fn update_car(&mut self, car: Car) -> StoreResult<()> {
        if !self.state.cars.contains_key(&car.id) {
            return Err(StoreError::UnknownId {
                kind: EntityKind::Car,
                id: car.id,
            });
        }
        self.ensure_car_keys(&car)?;
        self.ensure_owner_exists(&car)?;
        self.state.cars.insert(car.id, car);
        Ok(())
    }

    /// Removes a car, cascading to its violations.
    pub fn remove_car(&mut self, id: RecordId) -> StoreResult<()> {
        if self.state.cars.remove(&id).is_none() {
            return Err(StoreError::UnknownId {
                kind: EntityKind::Car,
                id,
            });
        }
        self.state.violations.retain(|_, v| v.car != id);
        Ok(())
    }

    fn ensure_car_keys(&self, car: &Car) -> StoreResult<()> {
        for other in self.state.cars.values() {
            if other.id == car.id {
                continue;
            }
            if other.vin_number == car.vin_number {
                return Err(StoreError::DuplicateKey {
                    kind: EntityKind::Car,
                    key: car.vin_number.clone(),
                });
            }
            if other.license_plate == car.license_plate {
                return Err(StoreError::DuplicateKey {
                    kind: EntityKind::Car,
                    key: car.license_plate.clone(),
                });
            }
        }
        Ok(())
    }

    fn ensure_owner_exists(&self, car: &Car) -> StoreResult<()> {
        if !self.state.drivers.contains_key(&car.owner) {
            return Err(StoreError::BrokenReference {
                kind: EntityKind::Car,
                target: EntityKind::Driver,
                id: car.owner,
            });
        }
        Ok(())
    }

    // ---- violation articles ----

    pub fn articles(&self) -> impl Iterator<Item = &ViolationArticle> {
        self.state.violation_articles.values()
    }

    pub fn article(&self, id: RecordId) -> Option<&ViolationArticle> {
        self.state.violation_articles.get(&id)
    }

    pub fn find_article_by_code(&self, code: &str) -> Option<&ViolationArticle> {
        self.state
            .violation_articles
            .values()
            .find(|a| a.code == code)
    }

    pub fn insert_article(&mut self, article: ViolationArticle) -> StoreResult<()> {
        self.ensure_unique_code(&article.code, article.id)?;
        self.state.violation_articles.insert(article.id, article);
        Ok(())
    }

    pub fn update_article(&mut self, article: ViolationArticle) -> StoreResult<()> {
        if !self.state.violation_articles.contains_key(&article.id) {
            return Err(StoreError::UnknownId {
                kind: EntityKind::ViolationArticle,
                id: article.id,
            });
        }
        self.ensure_unique_code(&article.code, article.id)?;
        self.state.violation_articles.insert(article.id, article);
        Ok(())
    }

    /// Removes an article, cascading to its violations.
    pub fn remove_article(&mut self, id: RecordId) -> StoreResult<()> {
        if self.state.violation_articles.remove(&id).is_none() {
            return Err(StoreError::UnknownId {
                kind: EntityKind::ViolationArticle,
                id,
            });
        }
        self.state.violations.retain(|_, v| v.article != id);
        Ok(())
    }

    fn ensure_unique_code(&self, code: &str, own_id: RecordId) -> StoreResult<()> {
        let taken = self
            .state
            .violation_articles
            .values()
            .any(|a| a.code == code && a.id != own_id);
        if taken {
            return Err(StoreError::DuplicateKey {
                kind: EntityKind::ViolationArticle,
                key: code.to_string(),
            });
        }
        Ok(())
    }

    // ---- violation types ----

    pub fn types(&self) -> impl Iterator<Item = &ViolationType> {
        self.state.violation_types.values()
    }

    pub fn violation_type(&self, id: RecordId) -> Option<&ViolationType> {
        self.state.violation_types.get(&id)
    }

    pub fn find_type_by_name(&self, name: &str) -> Option<&ViolationType> {
        self.state.violation_types.values().find(|t| t.name == name)
    }

    pub fn insert_type(&mut self, violation_type: ViolationType) -> StoreResult<()> {
        self.ensure_unique_type_name(&violation_type.name, violation_type.id)?;
        self.state
            .violation_types
            .insert(violation_type.id, violation_type);
        Ok(())
    }

    pub fn update_type(&mut self, violation_type: ViolationType) -> StoreResult<()> {
        if !self.state.violation_types.contains_key(&violation_type.id) {
            return Err(StoreError::UnknownId {
                kind: EntityKind::ViolationType,
                id: violation_type.id,
            });
        }
        self.ensure_unique_type_name(&violation_type.name, violation_type.id)?;
        self.state
            .violation_types
            .insert(violation_type.id, violation_type);
        Ok(())
    }

    /// Removes a type, cascading to its violations.
    pub fn remove_type(&mut self, id: RecordId) -> StoreResult<()> {
        if self.state.violation_types.remove(&id).is_none() {
            return Err(StoreError::UnknownId {
                kind: EntityKind::ViolationType,
                id,
            });
        }
        self.state.violations.retain(|_, v| v.violation_type != id);
        Ok(())
    }

    fn ensure_unique_type_name(&self, name: &str, own_id: RecordId) -> StoreResult<()> {
        let taken = self
            .state
            .violation_types
            .values()
            .any(|t| t.name == name && t.id != own_id);
        if taken {
            return Err(StoreError::DuplicateKey {
                kind: EntityKind::ViolationType,
                key: name.to_string(),
            });
        }
        Ok(())
    }

    // ---- violations ----

    pub fn violations(&self) -> impl Iterator<Item = &Violation> {
        self.state.violations.values()
    }

    pub fn violation(&self, id: RecordId) -> Option<&Violation> {
        self.state.violations.get(&id)
    }

    pub fn find_violation_by_resolution(&self, resolution: &str) -> Option<&Violation> {
        self.state
            .violations
            .values()
            .find(|v| v.resolution == resolution)
    }

    pub fn insert_violation(&mut self, violation: Violation) -> StoreResult<()> {
        self.ensure_unique_resolution(&violation.resolution, violation.id)?;
        self.ensure_violation_refs(&violation)?;
        self.state.violations.insert(violation.id, violation);
        Ok(())
    }

    pub fn update_violation(&mut self, violation: Violation) -> StoreResult<()> {
        if !self.state.violations.contains_key(&violation.id) {
            return Err(StoreError::UnknownId {
                kind: EntityKind::Violation,
                id: violation.id,
            });
        }
        self.ensure_unique_resolution(&violation.resolution, violation.id)?;
        self.ensure_violation_refs(&violation)?;
        self.state.violations.insert(violation.id, violation);
        Ok(())
    }

    pub fn remove_violation(&mut self, id: RecordId) -> StoreResult<()> {
        if self.state.violations.remove(&id).is_none() {
            return Err(StoreError::UnknownId {
                kind: EntityKind::Violation,
                id,
            });
        }
        Ok(())
    }

    fn ensure_unique_resolution(&self, resolution: &str, own_id: RecordId) -> StoreResult<()> {
        let taken = self
            .state
            .violations
            .values()
            .any(|v| v.resolution == resolution && v.id != own_id);
        if taken {
            return Err(StoreError::DuplicateKey {
                kind: EntityKind::Violation,
                key: resolution.to_string(),
            });
        }
        Ok(())
    }

    fn ensure_violation_refs(&self, violation: &Violation) -> StoreResult<()> {
        if !self.state.cars.contains_key(&violation.car) {
            return Err(StoreError::BrokenReference {
                kind: EntityKind::Violation,
                target: EntityKind::Car,
                id: violation.car,
            });
        }
        if !self
            .state
            .violation_articles
            .contains_key(&violation.article)
        {
            return Err(StoreError::BrokenReference {
                kind: EntityKind::Violation,
                target: EntityKind::ViolationArticle,
                id: violation.article,
            });
        }
        if !self
            .state
            .violation_types
            .contains_key(&violation.violation_type)
        {
            return Err(StoreError::BrokenReference {
                kind: EntityKind::Violation,
                target: EntityKind::ViolationType,
                id: violation.violation_type,
            });
        }
        Ok(())
    }

    /// Empties every table, children before parents.
    pub fn clear(&mut self) {
        self.state.violations.clear();
        self.state.cars.clear();
        self.state.drivers.clear();
        self.state.violation_types.clear();
        self.state.violation_articles.clear();
    }
}

impl KeyLookup for Store {
    fn license_number_exists(&self, license_number: &str) -> bool {
        self.find_driver_by_license(license_number).is_some()
    }
    fn vin_exists(&self, vin: &str) -> bool {
        self.find_car_by_vin(vin).is_some()
    }
    fn license_plate_exists(&self, plate: &str) -> bool {
        self.find_car_by_plate(plate).is_some()
    }
    fn article_code_exists(&self, code: &str) -> bool {
        self.find_article_by_code(code).is_some()
    }
    fn type_name_exists(&self, name: &str) -> bool {
        self.find_type_by_name(name).is_some()
    }
    fn resolution_exists(&self, resolution: &str) -> bool {
        self.find_violation_by_resolution(resolution).is_some()
    }
}

/// Unit-of-work guard over the store.
///
/// Holds a snapshot of the pre-transaction state. `commit()` persists to the
/// backing file; dropping the guard without committing (including the error
/// path of a failed persist) restores the snapshot, leaving the store exactly
/// as it was before the transaction began.
pub struct Transaction<'a> {
    store: &'a mut Store,
    snapshot: Option<StoreState>,
}

impl<'a> Transaction<'a> {
    pub fn commit(mut self) -> StoreResult<()> {
        // Persist first: if the write fails, the guard drops with the
        // snapshot still armed and the in-memory state rolls back too.
        self.store.persist()?;
        self.snapshot = None;
        Ok(())
    }
}

impl Drop for Transaction<'_> {
    fn drop(&mut self) {
        if let Some(snapshot) = self.snapshot.take() {
            self.store.state = snapshot;
        }
    }
}

impl Deref for Transaction<'_> {
    type Target = Store;
    fn deref(&self) -> &Store {
        self.store
    }
}

impl DerefMut for Transaction<'_> {
    fn deref_mut(&mut self) -> &mut Store {
        self.store
    }
}
