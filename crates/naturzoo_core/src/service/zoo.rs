//! Zoo facade: one access point over every entity repository.
//!
//! # Responsibility
//! - Build one repository per entity kind plus the log reader, all bound to
//!   the same storage context.
//! - Reject absent records at the boundary, then delegate unchanged.
//!
//! # Invariants
//! - Construction is all-or-nothing: a `Zoo` exists only if every
//!   repository was built.
//! - Reads return storage results untouched. Creates only add the
//!   `InvalidArgument` check in front of storage.
//! - A `Zoo` never outlives the storage context it borrows (`'ctx`).

use crate::model::{
    Address, Animal, Building, Enclosure, Entity, EntityKind, Food, Foodplan, Guardian, Supplier,
    Table, Territory,
};
use crate::repo::entity_repo::{ContextEntityRepository, EntityRepository};
use crate::repo::log_repo::LogRepository;
use crate::storage::{StorageContext, StorageError, StorageResult};
use log::{debug, error, info, warn};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ZooResult<T> = Result<T, ZooError>;

/// Failures surfaced by the facade.
#[derive(Debug)]
pub enum ZooError {
    /// A required argument was absent; names the argument.
    InvalidArgument(&'static str),
    /// Storage failure, carried as produced by the storage context.
    Storage(StorageError),
}

impl Display for ZooError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArgument(argument) => {
                write!(f, "invalid argument `{argument}`: value must be present")
            }
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ZooError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidArgument(_) => None,
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<StorageError> for ZooError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Flat access point for every zoo entity.
///
/// Not `Send`/`Sync` unless the storage context is; callers sharing a `Zoo`
/// across threads must synchronize at the storage boundary.
pub struct Zoo<'ctx> {
    repositories: BTreeMap<EntityKind, Box<dyn EntityRepository + 'ctx>>,
    log: LogRepository<'ctx>,
}

impl<'ctx> Zoo<'ctx> {
    /// Builds every repository over `context`.
    ///
    /// # Errors
    /// - Returns the first repository construction failure unchanged, wrapped
    ///   in `ZooError::Storage`. No partially built facade is returned.
    pub fn try_new(context: &'ctx dyn StorageContext) -> ZooResult<Self> {
        let mut repositories: BTreeMap<EntityKind, Box<dyn EntityRepository + 'ctx>> =
            BTreeMap::new();

        for kind in EntityKind::ALL {
            let repository = ContextEntityRepository::try_new(context, kind).map_err(|err| {
                error!("event=zoo_init module=zoo status=error kind={kind} error={err}");
                err
            })?;
            repositories.insert(kind, Box::new(repository));
        }

        let log = LogRepository::try_new(context).map_err(|err| {
            error!("event=zoo_init module=zoo status=error kind=log error={err}");
            err
        })?;

        info!(
            "event=zoo_init module=zoo status=ok repositories={}",
            repositories.len() + 1
        );
        Ok(Self { repositories, log })
    }

    /// Like `try_new`, for callers whose context may be absent.
    ///
    /// # Errors
    /// - `ZooError::InvalidArgument("context")` when `context` is `None`.
    pub fn from_optional(context: Option<&'ctx dyn StorageContext>) -> ZooResult<Self> {
        match context {
            Some(context) => Self::try_new(context),
            None => {
                warn!("event=zoo_init module=zoo status=rejected error_code=invalid_argument argument=context");
                Err(ZooError::InvalidArgument("context"))
            }
        }
    }

    /// Activity log lines in the order the store returned them.
    pub fn get_log(&self) -> StorageResult<Vec<String>> {
        debug!("event=zoo_read module=zoo op=log");
        self.log.get_log()
    }

    fn repository(&self, kind: EntityKind) -> &dyn EntityRepository {
        // every kind is inserted by `try_new`
        &*self.repositories[&kind]
    }

    fn count(&self, kind: EntityKind) -> StorageResult<String> {
        debug!("event=zoo_read module=zoo op=count kind={kind}");
        self.repository(kind).count()
    }

    fn grid(&self, kind: EntityKind) -> StorageResult<Table> {
        debug!("event=zoo_read module=zoo op=grid kind={kind}");
        self.repository(kind).get_all()
    }

    fn dropdown(&self, kind: EntityKind) -> StorageResult<Table> {
        debug!("event=zoo_read module=zoo op=dropdown kind={kind}");
        self.repository(kind).get_dropdown()
    }

    fn last_change(&self, kind: EntityKind) -> StorageResult<String> {
        debug!("event=zoo_read module=zoo op=last_change kind={kind}");
        self.repository(kind).last_update()
    }

    fn create<E: Entity>(&self, entity: Option<&E>, argument: &'static str) -> ZooResult<()> {
        let Some(entity) = entity else {
            warn!(
                "event=zoo_create module=zoo status=rejected kind={} error_code=invalid_argument argument={argument}",
                E::KIND
            );
            return Err(ZooError::InvalidArgument(argument));
        };

        self.repository(E::KIND).add(&entity.to_record())?;
        debug!("event=zoo_create module=zoo status=ok kind={}", E::KIND);
        Ok(())
    }
}

/// Generates the per-entity public surface from a table of
/// `Entity("argument") { operation => method, .. }` entries.
macro_rules! entity_accessors {
    (@count $entity:ident $argument:literal $method:ident) => {
        #[doc = concat!("Number of stored `", stringify!($entity), "` records.")]
        pub fn $method(&self) -> StorageResult<String> {
            self.count(<$entity as Entity>::KIND)
        }
    };
    (@grid $entity:ident $argument:literal $method:ident) => {
        #[doc = concat!("All stored `", stringify!($entity), "` records.")]
        pub fn $method(&self) -> StorageResult<Table> {
            self.grid(<$entity as Entity>::KIND)
        }
    };
    (@dropdown $entity:ident $argument:literal $method:ident) => {
        #[doc = concat!("`id` + `label` projection of `", stringify!($entity), "` records.")]
        pub fn $method(&self) -> StorageResult<Table> {
            self.dropdown(<$entity as Entity>::KIND)
        }
    };
    (@create $entity:ident $argument:literal $method:ident) => {
        #[doc = concat!("Persists one `", stringify!($entity), "`.")]
        ///
        /// # Errors
        #[doc = concat!("- `ZooError::InvalidArgument(\"", $argument, "\")` when the record is `None`; storage is not touched.")]
        /// - `ZooError::Storage` with the storage failure unchanged.
        pub fn $method(&self, entity: Option<&$entity>) -> ZooResult<()> {
            self.create(entity, $argument)
        }
    };
    (@last_change $entity:ident $argument:literal $method:ident) => {
        #[doc = concat!("Most recent modification time of any `", stringify!($entity), "` record.")]
        pub fn $method(&self) -> StorageResult<String> {
            self.last_change(<$entity as Entity>::KIND)
        }
    };
    ($($entity:ident ($argument:literal) { $($operation:ident => $method:ident),+ $(,)? })+) => {
        impl<'ctx> Zoo<'ctx> {
            $($(entity_accessors!(@$operation $entity $argument $method);)+)+
        }
    };
}

entity_accessors! {
    // Address exposes only dropdown and create; count, grid and last change
    // are intentionally not generated.
    Address("address") {
        dropdown => get_address_dropdown,
        create => create_address,
    }
    Animal("animal") {
        count => get_animal_count,
        grid => get_animal_grid,
        dropdown => get_animal_dropdown,
        create => create_animal,
        last_change => get_animal_last_change,
    }
    Building("building") {
        count => get_building_count,
        grid => get_building_grid,
        dropdown => get_building_dropdown,
        create => create_building,
        last_change => get_building_last_change,
    }
    Enclosure("enclosure") {
        count => get_enclosure_count,
        grid => get_enclosure_grid,
        dropdown => get_enclosure_dropdown,
        create => create_enclosure,
        last_change => get_enclosure_last_change,
    }
    Foodplan("foodplan") {
        count => get_foodplan_count,
        grid => get_foodplan_grid,
        dropdown => get_foodplan_dropdown,
        create => create_foodplan,
        last_change => get_foodplan_last_change,
    }
    Food("food") {
        count => get_food_count,
        grid => get_food_grid,
        dropdown => get_food_dropdown,
        create => create_food,
        last_change => get_food_last_change,
    }
    Guardian("guardian") {
        count => get_guardian_count,
        grid => get_guardian_grid,
        dropdown => get_guardian_dropdown,
        create => create_guardian,
        last_change => get_guardian_last_change,
    }
    Supplier("supplier") {
        count => get_supplier_count,
        grid => get_supplier_grid,
        dropdown => get_supplier_dropdown,
        create => create_supplier,
        last_change => get_supplier_last_change,
    }
    Territory("territory") {
        count => get_territory_count,
        grid => get_territory_grid,
        dropdown => get_territory_dropdown,
        create => create_territory,
        last_change => get_territory_last_change,
    }
}
