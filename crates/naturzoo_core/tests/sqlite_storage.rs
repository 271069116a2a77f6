use naturzoo_core::db::migrations::latest_version;
use naturzoo_core::db::open_db_in_memory;
use naturzoo_core::{
    Address, Animal, Building, CellValue, ContextEntityRepository, Enclosure, EntityKind,
    EntityRepository, Food, Foodplan, Guardian, LogRepository, Record, SqliteStorage,
    StorageContext, StorageError, Supplier, Territory, Zoo, ZooError,
};
use rusqlite::Connection;

struct ZooGraph {
    address: Address,
    territory: Territory,
    building: Building,
    enclosure: Enclosure,
    supplier: Supplier,
    food: Food,
    foodplan: Foodplan,
    animal: Animal,
    guardian: Guardian,
}

fn sample_graph() -> ZooGraph {
    let address = Address::new("Tierparkstrasse", "1", "48432", "Rheine", "DE");
    let mut territory = Territory::new("Savanna");
    territory.description = Some("open grassland".to_string());
    let building = Building::new("Giraffe house", territory.id);
    let mut enclosure = Enclosure::new("Giraffe yard", building.id);
    enclosure.area_sqm = Some(850.0);
    let supplier = Supplier::new("Green Fodder GmbH", address.id);
    let food = Food::new("Acacia leaves", "kg", supplier.id);
    let foodplan = Foodplan::new("Giraffe morning", food.id, 12.5, "08:00");
    let mut animal = Animal::new("Kimani", "giraffe", enclosure.id);
    animal.foodplan_id = Some(foodplan.id);
    let mut guardian = Guardian::new("Lena", "Vogel", address.id);
    guardian.enclosure_id = Some(enclosure.id);

    ZooGraph {
        address,
        territory,
        building,
        enclosure,
        supplier,
        food,
        foodplan,
        animal,
        guardian,
    }
}

fn create_graph(zoo: &Zoo<'_>, graph: &ZooGraph) {
    zoo.create_address(Some(&graph.address)).unwrap();
    zoo.create_territory(Some(&graph.territory)).unwrap();
    zoo.create_building(Some(&graph.building)).unwrap();
    zoo.create_enclosure(Some(&graph.enclosure)).unwrap();
    zoo.create_supplier(Some(&graph.supplier)).unwrap();
    zoo.create_food(Some(&graph.food)).unwrap();
    zoo.create_foodplan(Some(&graph.foodplan)).unwrap();
    zoo.create_animal(Some(&graph.animal)).unwrap();
    zoo.create_guardian(Some(&graph.guardian)).unwrap();
}

#[test]
fn fresh_store_reports_empty_state() {
    let conn = open_db_in_memory().unwrap();
    let storage = SqliteStorage::new(&conn);
    let zoo = Zoo::try_new(&storage).unwrap();

    assert_eq!(zoo.get_animal_count().unwrap(), "0");
    assert_eq!(zoo.get_territory_last_change().unwrap(), "");
    assert!(zoo.get_log().unwrap().is_empty());

    let grid = zoo.get_guardian_grid().unwrap();
    assert!(grid.is_empty());
    assert_eq!(
        grid.columns,
        vec![
            "id",
            "first_name",
            "last_name",
            "address_id",
            "phone",
            "enclosure_id",
            "updated_at"
        ]
    );
    assert_eq!(zoo.get_address_dropdown().unwrap().columns, vec!["id", "label"]);
}

#[test]
fn created_records_show_up_in_counts_grids_and_dropdowns() {
    let conn = open_db_in_memory().unwrap();
    let storage = SqliteStorage::new(&conn);
    let zoo = Zoo::try_new(&storage).unwrap();
    let graph = sample_graph();

    create_graph(&zoo, &graph);

    for count in [
        zoo.get_animal_count().unwrap(),
        zoo.get_building_count().unwrap(),
        zoo.get_enclosure_count().unwrap(),
        zoo.get_foodplan_count().unwrap(),
        zoo.get_food_count().unwrap(),
        zoo.get_guardian_count().unwrap(),
        zoo.get_supplier_count().unwrap(),
        zoo.get_territory_count().unwrap(),
    ] {
        assert_eq!(count, "1");
    }

    let animals = zoo.get_animal_grid().unwrap();
    assert_eq!(animals.len(), 1);
    let row = &animals.rows[0];
    assert_eq!(row["id"], CellValue::from(graph.animal.id));
    assert_eq!(row["name"], CellValue::from("Kimani"));
    assert_eq!(row["foodplan_id"], CellValue::from(graph.foodplan.id));
    assert!(row["birth_date"].is_null());
    assert!(row["updated_at"].as_integer().unwrap() > 0);

    let enclosures = zoo.get_enclosure_grid().unwrap();
    assert_eq!(enclosures.rows[0]["area_sqm"], CellValue::Real(850.0));

    let animal_labels = zoo.get_animal_dropdown().unwrap().column_values("label");
    assert_eq!(animal_labels, vec![CellValue::from("Kimani (giraffe)")]);

    let address_labels = zoo.get_address_dropdown().unwrap().column_values("label");
    assert_eq!(
        address_labels,
        vec![CellValue::from("Tierparkstrasse 1, 48432 Rheine")]
    );

    let guardian_labels = zoo.get_guardian_dropdown().unwrap().column_values("label");
    assert_eq!(guardian_labels, vec![CellValue::from("Vogel, Lena")]);
}

#[test]
fn dropdown_is_sorted_by_label_ignoring_case() {
    let conn = open_db_in_memory().unwrap();
    let storage = SqliteStorage::new(&conn);
    let zoo = Zoo::try_new(&storage).unwrap();

    for name in ["savanna", "Wetlands", "Arctic"] {
        zoo.create_territory(Some(&Territory::new(name))).unwrap();
    }

    let dropdown = zoo.get_territory_dropdown().unwrap();
    let labels: Vec<&str> = dropdown
        .rows
        .iter()
        .filter_map(|row| row["label"].as_text())
        .collect();
    assert_eq!(labels, vec!["Arctic", "savanna", "Wetlands"]);
}

#[test]
fn inserts_append_activity_log_lines_in_order() {
    let conn = open_db_in_memory().unwrap();
    let storage = SqliteStorage::new(&conn);
    let zoo = Zoo::try_new(&storage).unwrap();

    create_graph(&zoo, &sample_graph());

    let messages: Vec<String> = zoo
        .get_log()
        .unwrap()
        .into_iter()
        .map(|line| {
            assert!(line.starts_with('['), "unexpected log line: {line}");
            let (_, message) = line.split_once("] ").unwrap();
            message.to_string()
        })
        .collect();

    assert_eq!(
        messages,
        vec![
            "address created: Tierparkstrasse 1, Rheine",
            "territory created: Savanna",
            "building created: Giraffe house",
            "enclosure created: Giraffe yard",
            "supplier created: Green Fodder GmbH",
            "food created: Acacia leaves",
            "foodplan created: Giraffe morning",
            "animal created: Kimani",
            "guardian created: Lena Vogel",
        ]
    );
}

#[test]
fn last_change_reports_latest_update_in_utc() {
    let conn = open_db_in_memory().unwrap();
    let storage = SqliteStorage::new(&conn);
    let zoo = Zoo::try_new(&storage).unwrap();

    zoo.create_territory(Some(&Territory::new("Savanna")))
        .unwrap();
    zoo.create_territory(Some(&Territory::new("Arctic")))
        .unwrap();
    conn.execute(
        "UPDATE territory SET updated_at = 1600000000000 WHERE name = 'Savanna';",
        [],
    )
    .unwrap();
    conn.execute(
        "UPDATE territory SET updated_at = 1700000000000 WHERE name = 'Arctic';",
        [],
    )
    .unwrap();

    assert_eq!(
        zoo.get_territory_last_change().unwrap(),
        "2023-11-14 22:13:20"
    );
}

#[test]
fn foreign_key_violation_is_returned_as_storage_error() {
    let conn = open_db_in_memory().unwrap();
    let storage = SqliteStorage::new(&conn);
    let zoo = Zoo::try_new(&storage).unwrap();

    let orphan = Building::new("Nowhere hall", Territory::new("missing").id);
    let err = zoo.create_building(Some(&orphan)).unwrap_err();

    assert!(matches!(err, ZooError::Storage(StorageError::Sqlite(_))));
    assert_eq!(zoo.get_building_count().unwrap(), "0");
    assert!(zoo.get_log().unwrap().is_empty());
}

#[test]
fn insert_rejects_columns_outside_the_table_spec() {
    let conn = open_db_in_memory().unwrap();
    let storage = SqliteStorage::new(&conn);

    let record = Record::new()
        .with("id", "t-1")
        .with("name", "Savanna")
        .with("nickname", "the big one");
    let err = storage.insert(EntityKind::Territory, &record).unwrap_err();

    assert!(matches!(
        err,
        StorageError::UnknownColumn {
            table: "territory",
            column: "nickname"
        }
    ));
}

#[test]
fn construction_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();
    let storage = SqliteStorage::new(&conn);

    let result = Zoo::try_new(&storage);
    match result {
        Err(ZooError::Storage(StorageError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        })) => assert_eq!(expected_version, latest_version()),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn construction_rejects_missing_table() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch("DROP TABLE guardian;").unwrap();
    let storage = SqliteStorage::new(&conn);

    assert!(matches!(
        Zoo::try_new(&storage),
        Err(ZooError::Storage(StorageError::MissingRequiredTable(
            "guardian"
        )))
    ));
}

#[test]
fn construction_rejects_missing_log_table() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch("DROP TABLE log;").unwrap();
    let storage = SqliteStorage::new(&conn);

    let result = Zoo::try_new(&storage);
    assert!(matches!(
        result,
        Err(ZooError::Storage(StorageError::MissingRequiredTable("log")))
    ));
}

#[test]
fn construction_rejects_missing_column() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch("ALTER TABLE territory DROP COLUMN description;")
        .unwrap();
    let storage = SqliteStorage::new(&conn);

    assert!(matches!(
        Zoo::try_new(&storage),
        Err(ZooError::Storage(StorageError::MissingRequiredColumn {
            table: "territory",
            column: "description"
        }))
    ));
}

#[test]
fn repositories_can_be_used_without_the_facade() {
    let conn = open_db_in_memory().unwrap();
    let storage = SqliteStorage::new(&conn);
    let territories = ContextEntityRepository::try_new(&storage, EntityKind::Territory).unwrap();
    let log = LogRepository::try_new(&storage).unwrap();

    territories
        .add(&Record::new().with("id", "t-1").with("name", "Savanna"))
        .unwrap();

    assert_eq!(territories.kind(), EntityKind::Territory);
    assert_eq!(territories.count().unwrap(), "1");
    assert_eq!(log.get_log().unwrap().len(), 1);
}

#[test]
fn grid_serializes_to_json_for_ui_binding() {
    let conn = open_db_in_memory().unwrap();
    let storage = SqliteStorage::new(&conn);
    let zoo = Zoo::try_new(&storage).unwrap();
    let graph = sample_graph();
    create_graph(&zoo, &graph);

    let json = serde_json::to_value(zoo.get_animal_grid().unwrap()).unwrap();

    assert_eq!(json["columns"][1], "name");
    assert_eq!(json["rows"][0]["name"], "Kimani");
    assert_eq!(json["rows"][0]["species"], "giraffe");
    assert!(json["rows"][0]["birth_date"].is_null());
}
