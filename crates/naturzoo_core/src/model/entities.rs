//! Record structs for the nine structured zoo entities.
//!
//! Constructors take the required fields and generate a fresh `EntityId`;
//! optional fields start as `None` and are set directly.

use crate::model::kind::{Entity, EntityId, EntityKind};
use crate::model::record::Record;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Postal address of a guardian or supplier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub id: EntityId,
    pub street: String,
    pub house_number: String,
    pub postal_code: String,
    pub city: String,
    pub country: String,
}

impl Address {
    pub fn new(
        street: impl Into<String>,
        house_number: impl Into<String>,
        postal_code: impl Into<String>,
        city: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            street: street.into(),
            house_number: house_number.into(),
            postal_code: postal_code.into(),
            city: city.into(),
            country: country.into(),
        }
    }
}

impl Entity for Address {
    const KIND: EntityKind = EntityKind::Address;

    fn to_record(&self) -> Record {
        Record::new()
            .with("id", self.id)
            .with("street", &self.street)
            .with("house_number", &self.house_number)
            .with("postal_code", &self.postal_code)
            .with("city", &self.city)
            .with("country", &self.country)
    }
}

/// A named area of the zoo grounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Territory {
    pub id: EntityId,
    pub name: String,
    pub description: Option<String>,
}

impl Territory {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: None,
        }
    }
}

impl Entity for Territory {
    const KIND: EntityKind = EntityKind::Territory;

    fn to_record(&self) -> Record {
        Record::new()
            .with("id", self.id)
            .with("name", &self.name)
            .with("description", self.description.as_ref())
    }
}

/// A building located in one territory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Building {
    pub id: EntityId,
    pub name: String,
    pub territory_id: EntityId,
    pub description: Option<String>,
}

impl Building {
    pub fn new(name: impl Into<String>, territory_id: EntityId) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            territory_id,
            description: None,
        }
    }
}

impl Entity for Building {
    const KIND: EntityKind = EntityKind::Building;

    fn to_record(&self) -> Record {
        Record::new()
            .with("id", self.id)
            .with("name", &self.name)
            .with("territory_id", self.territory_id)
            .with("description", self.description.as_ref())
    }
}

/// An animal enclosure inside a building.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enclosure {
    pub id: EntityId,
    pub name: String,
    pub building_id: EntityId,
    /// Floor area in square meters.
    pub area_sqm: Option<f64>,
}

impl Enclosure {
    pub fn new(name: impl Into<String>, building_id: EntityId) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            building_id,
            area_sqm: None,
        }
    }
}

impl Entity for Enclosure {
    const KIND: EntityKind = EntityKind::Enclosure;

    fn to_record(&self) -> Record {
        Record::new()
            .with("id", self.id)
            .with("name", &self.name)
            .with("building_id", self.building_id)
            .with("area_sqm", self.area_sqm)
    }
}

/// A company delivering food items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: EntityId,
    pub name: String,
    pub address_id: EntityId,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl Supplier {
    pub fn new(name: impl Into<String>, address_id: EntityId) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            address_id,
            phone: None,
            email: None,
        }
    }
}

impl Entity for Supplier {
    const KIND: EntityKind = EntityKind::Supplier;

    fn to_record(&self) -> Record {
        Record::new()
            .with("id", self.id)
            .with("name", &self.name)
            .with("address_id", self.address_id)
            .with("phone", self.phone.as_ref())
            .with("email", self.email.as_ref())
    }
}

/// A food item and the supplier it is ordered from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Food {
    pub id: EntityId,
    pub name: String,
    /// Unit the item is measured in, e.g. `kg`.
    pub unit: String,
    pub supplier_id: EntityId,
}

impl Food {
    pub fn new(name: impl Into<String>, unit: impl Into<String>, supplier_id: EntityId) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            unit: unit.into(),
            supplier_id,
        }
    }
}

impl Entity for Food {
    const KIND: EntityKind = EntityKind::Food;

    fn to_record(&self) -> Record {
        Record::new()
            .with("id", self.id)
            .with("name", &self.name)
            .with("unit", &self.unit)
            .with("supplier_id", self.supplier_id)
    }
}

/// Feeding schedule entry: how much of one food, and when.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Foodplan {
    pub id: EntityId,
    pub name: String,
    pub food_id: EntityId,
    /// Amount per feeding, in the food's unit.
    pub quantity: f64,
    /// Local time of day, `HH:MM`.
    pub feeding_time: String,
}

impl Foodplan {
    pub fn new(
        name: impl Into<String>,
        food_id: EntityId,
        quantity: f64,
        feeding_time: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            food_id,
            quantity,
            feeding_time: feeding_time.into(),
        }
    }
}

impl Entity for Foodplan {
    const KIND: EntityKind = EntityKind::Foodplan;

    fn to_record(&self) -> Record {
        Record::new()
            .with("id", self.id)
            .with("name", &self.name)
            .with("food_id", self.food_id)
            .with("quantity", self.quantity)
            .with("feeding_time", &self.feeding_time)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Animal {
    pub id: EntityId,
    pub name: String,
    pub species: String,
    pub enclosure_id: EntityId,
    pub foodplan_id: Option<EntityId>,
    /// ISO date, `YYYY-MM-DD`.
    pub birth_date: Option<String>,
}

impl Animal {
    pub fn new(name: impl Into<String>, species: impl Into<String>, enclosure_id: EntityId) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            species: species.into(),
            enclosure_id,
            foodplan_id: None,
            birth_date: None,
        }
    }
}

impl Entity for Animal {
    const KIND: EntityKind = EntityKind::Animal;

    fn to_record(&self) -> Record {
        Record::new()
            .with("id", self.id)
            .with("name", &self.name)
            .with("species", &self.species)
            .with("enclosure_id", self.enclosure_id)
            .with("foodplan_id", self.foodplan_id)
            .with("birth_date", self.birth_date.as_ref())
    }
}

/// A keeper, optionally assigned to one enclosure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guardian {
    pub id: EntityId,
    pub first_name: String,
    pub last_name: String,
    pub address_id: EntityId,
    pub phone: Option<String>,
    pub enclosure_id: Option<EntityId>,
}

impl Guardian {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        address_id: EntityId,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            address_id,
            phone: None,
            enclosure_id: None,
        }
    }
}

impl Entity for Guardian {
    const KIND: EntityKind = EntityKind::Guardian;

    fn to_record(&self) -> Record {
        Record::new()
            .with("id", self.id)
            .with("first_name", &self.first_name)
            .with("last_name", &self.last_name)
            .with("address_id", self.address_id)
            .with("phone", self.phone.as_ref())
            .with("enclosure_id", self.enclosure_id)
    }
}
